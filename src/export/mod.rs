//! Export of tabular data as CSV or JSON files.

pub mod csv;
pub mod sink;

use crate::consts::cli_consts::export::{CSV_MIME_TYPE, FILENAME_PREFIX, JSON_MIME_TYPE};
use crate::events::{Event, EventSender, EventType};
use crate::logging::LogLevel;
use chrono::{NaiveDate, Utc};
use log::error;
use serde_json::Value;
use sink::DownloadSink;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// One row of tabular data; keys keep their original order.
pub type Record = serde_json::Map<String, Value>;

/// Rows sharing the field set of the first row.
pub type Dataset = Vec<Record>;

#[derive(Debug, Error)]
pub enum ExportError {
    /// Nothing to export
    #[error("No data available to export")]
    NoData,

    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => CSV_MIME_TYPE,
            ExportFormat::Json => JSON_MIME_TYPE,
        }
    }

    /// Encodes the dataset in this format.
    pub fn encode(&self, dataset: &[Record]) -> Result<String, ExportError> {
        match self {
            ExportFormat::Csv => Ok(csv::to_csv(dataset)),
            ExportFormat::Json => Ok(serde_json::to_string_pretty(dataset)?),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("unsupported export format: {}", other)),
        }
    }
}

impl Display for ExportFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// File name for an export made on `date`, e.g. `telegram_bot_data_2024-03-01.csv`.
pub fn export_filename(format: ExportFormat, date: NaiveDate) -> String {
    format!(
        "{}_{}.{}",
        FILENAME_PREFIX,
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

/// Encodes datasets and hands them to a [`DownloadSink`], reporting each outcome as a notification.
pub struct Exporter {
    sink: Box<dyn DownloadSink>,
    events: EventSender,
}

impl Exporter {
    pub fn new(sink: Box<dyn DownloadSink>, events: EventSender) -> Self {
        Self { sink, events }
    }

    /// Exports using today's UTC date in the file name.
    pub async fn export_data(
        &self,
        format: ExportFormat,
        dataset: Option<&[Record]>,
    ) -> Result<PathBuf, ExportError> {
        self.export_data_on(format, dataset, Utc::now().date_naive())
            .await
    }

    pub async fn export_data_on(
        &self,
        format: ExportFormat,
        dataset: Option<&[Record]>,
        date: NaiveDate,
    ) -> Result<PathBuf, ExportError> {
        let Some(dataset) = dataset.filter(|rows| !rows.is_empty()) else {
            self.notify(
                ExportError::NoData.to_string(),
                EventType::Warning,
                LogLevel::Warn,
            )
            .await;
            return Err(ExportError::NoData);
        };

        let filename = export_filename(format, date);
        let result = format.encode(dataset).and_then(|content| {
            self.sink
                .deliver(&filename, format.mime_type(), content.as_bytes())
                .map_err(ExportError::from)
        });

        match result {
            Ok(path) => {
                self.notify(
                    format!("Exported data to {}", filename),
                    EventType::Success,
                    LogLevel::Info,
                )
                .await;
                Ok(path)
            }
            Err(e) => {
                error!("Export of {} failed: {}", filename, e);
                self.notify(
                    format!("Failed to export {}: {}", filename, e),
                    EventType::Error,
                    LogLevel::Error,
                )
                .await;
                Err(e)
            }
        }
    }

    async fn notify(&self, msg: String, event_type: EventType, log_level: LogLevel) {
        self.events
            .send_event(Event::export(msg, event_type, log_level))
            .await;
    }
}
