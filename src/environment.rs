use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Represents the admin panel deployments the client can talk to.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// Admin panel served by the development server on this machine.
    #[default]
    Local,
    /// Admin panel reachable at an explicit base URL.
    Custom { api_url: String },
}

impl Environment {
    /// Returns the base URL of the admin panel's HTTP API.
    pub fn api_url(&self) -> String {
        match self {
            Environment::Local => "http://localhost:5000".to_string(),
            Environment::Custom { api_url } => api_url.clone(),
        }
    }

    /// Resolves the environment from `ADMIN_PANEL_ENVIRONMENT`, falling back to local.
    pub fn from_env() -> Self {
        std::env::var("ADMIN_PANEL_ENVIRONMENT")
            .unwrap_or_default()
            .parse::<Environment>()
            .unwrap_or_default()
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "production" => std::env::var("ADMIN_PANEL_URL")
                .ok()
                .filter(|url| !url.trim().is_empty())
                .map(|api_url| Environment::Custom { api_url })
                .ok_or(()),
            lower if lower.starts_with("http://") || lower.starts_with("https://") => {
                Ok(Environment::Custom {
                    api_url: trimmed.to_string(),
                })
            }
            _ => Err(()),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "Local"),
            Environment::Custom { .. } => write!(f, "Custom"),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, URL: {}", self, self.api_url())
    }
}
