use crate::api::error::ApiError;
use crate::charts::ChartName;
use crate::charts::payload::ChartPayload;

pub(crate) mod client;
pub use client::ApiClient;
pub mod error;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ChartApi: Send + Sync {
    /// Fetch the current dataset for a chart.
    async fn fetch_chart(&self, name: ChartName) -> Result<ChartPayload, ApiError>;
}
