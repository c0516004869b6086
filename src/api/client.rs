//! Admin Panel API Client
//!
//! Fetches chart datasets from the admin panel's JSON endpoints.

use crate::api::ChartApi;
use crate::api::error::ApiError;
use crate::charts::ChartName;
use crate::charts::payload::{ChartPayload, DailyActivity};
use crate::consts::cli_consts::{http, refresh::CHART_DATA_ENDPOINT};
use reqwest::{Client, ClientBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

// User-Agent string with client version
const USER_AGENT: &str = concat!("admin-panel/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    /// Window for the daily activity dataset; the server default applies when unset.
    analytics_days: Option<u32>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: ClientBuilder::new()
                .connect_timeout(http::timeout())
                .timeout(http::timeout())
                .user_agent(USER_AGENT)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.into(),
            analytics_days: None,
        }
    }

    pub fn with_analytics_days(mut self, days: Option<u32>) -> Self {
        self.analytics_days = days;
        self
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    fn chart_endpoint(&self, name: ChartName) -> String {
        let endpoint = format!(
            "{}/{}",
            CHART_DATA_ENDPOINT,
            urlencoding::encode(name.as_str())
        );
        match (name, self.analytics_days) {
            (ChartName::DailyActivity, Some(days)) => format!("{}?days={}", endpoint, days),
            _ => endpoint,
        }
    }

    async fn handle_response_status(response: Response) -> Result<Response, ApiError> {
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = self.build_url(endpoint);
        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let response_bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&response_bytes)?)
    }
}

#[async_trait::async_trait]
impl ChartApi for ApiClient {
    async fn fetch_chart(&self, name: ChartName) -> Result<ChartPayload, ApiError> {
        let endpoint = self.chart_endpoint(name);
        match name {
            ChartName::DailyActivity => {
                let activity: DailyActivity = self.get_json(&endpoint).await?;
                Ok(ChartPayload::DailyActivity(activity))
            }
            ChartName::UsersByLevel | ChartName::ProgressBySection => {
                let counts: Map<String, Value> = self.get_json(&endpoint).await?;
                Ok(ChartPayload::counts_from_map(counts))
            }
        }
    }
}

#[cfg(test)]
/// These are ignored by default since they require a running admin panel.
mod live_panel_tests {
    use crate::api::ChartApi;
    use crate::charts::ChartName;
    use crate::environment::Environment;

    #[tokio::test]
    #[ignore] // This test requires a live admin panel instance.
    /// Should fetch every chart dataset from the local panel.
    async fn test_fetch_all_charts() {
        let client = super::ApiClient::new(Environment::Local.api_url());
        for name in ChartName::ALL {
            match client.fetch_chart(name).await {
                Ok(payload) => println!("{}: {:?}", name, payload),
                Err(e) => panic!("Failed to fetch {}: {}", name, e),
            }
        }
    }
}
