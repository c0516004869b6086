//! Chart datasets as returned by `/api/chart-data/{name}`

use serde::Deserialize;
use serde_json::{Map, Value};

/// One `[label, value]` pair of a daily series.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DailyPoint(pub String, pub f64);

/// Two parallel daily series sharing one label axis.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DailyActivity {
    #[serde(default)]
    pub daily_users: Vec<DailyPoint>,
    #[serde(default)]
    pub daily_progress: Vec<DailyPoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartPayload {
    /// Label → count, in the server's key order.
    Counts(Vec<(String, f64)>),
    DailyActivity(DailyActivity),
}

impl ChartPayload {
    /// Reads a label → number mapping. Non-numeric values count as zero.
    pub fn counts_from_map(map: Map<String, Value>) -> Self {
        ChartPayload::Counts(
            map.into_iter()
                .map(|(label, value)| (label, value.as_f64().unwrap_or_default()))
                .collect(),
        )
    }
}
