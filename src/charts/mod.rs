//! Registered dashboard charts and the merging of refreshed datasets into them.

pub mod payload;

use log::debug;
use payload::{ChartPayload, DailyActivity};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex};

/// Datasets served by the admin panel.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChartName {
    UsersByLevel,
    ProgressBySection,
    DailyActivity,
}

impl ChartName {
    pub const ALL: [ChartName; 3] = [
        ChartName::UsersByLevel,
        ChartName::ProgressBySection,
        ChartName::DailyActivity,
    ];

    /// Path segment of the dataset endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartName::UsersByLevel => "users_by_level",
            ChartName::ProgressBySection => "progress_by_section",
            ChartName::DailyActivity => "daily_activity",
        }
    }
}

impl Display for ChartName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Labels plus one or more value series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Vec<f64>>,
}

impl ChartData {
    pub fn with_series(series: usize) -> Self {
        Self {
            labels: Vec::new(),
            datasets: vec![Vec::new(); series],
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UpdateMode {
    Animated,
    /// Re-render in place, skipping transitions.
    NoAnimation,
}

/// The chart library that draws a chart's data.
pub trait ChartRenderer: Send + Sync {
    fn render(&self, name: ChartName, data: &ChartData, mode: UpdateMode);
}

/// A rendered chart whose data series can be replaced.
pub struct ChartHandle {
    name: ChartName,
    data: ChartData,
    revision: u64,
    renderer: Arc<dyn ChartRenderer>,
}

impl ChartHandle {
    pub fn new(name: ChartName, data: ChartData, renderer: Arc<dyn ChartRenderer>) -> Self {
        Self {
            name,
            data,
            revision: 0,
            renderer,
        }
    }

    #[cfg(test)]
    pub fn data(&self) -> &ChartData {
        &self.data
    }

    /// Number of updates applied since registration.
    #[cfg(test)]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn update(&mut self, mode: UpdateMode) {
        self.revision += 1;
        self.renderer.render(self.name, &self.data, mode);
    }

    /// Replaces the first series with the payload's values. Charts without a series are left as is.
    ///
    /// Existing labels are kept while the payload has as many entries as there are labels;
    /// otherwise the payload's labels replace them.
    fn apply_counts(&mut self, counts: &[(String, f64)]) -> bool {
        let Some(primary) = self.data.datasets.first_mut() else {
            return false;
        };
        *primary = counts.iter().map(|(_, value)| *value).collect();
        if self.data.labels.len() != counts.len() {
            self.data.labels = counts.iter().map(|(label, _)| label.clone()).collect();
        }
        self.update(UpdateMode::NoAnimation);
        true
    }

    fn apply_daily_activity(&mut self, activity: &DailyActivity) -> bool {
        if self.data.datasets.len() < 2 {
            self.data.datasets.resize(2, Vec::new());
        }
        self.data.labels = activity
            .daily_users
            .iter()
            .map(|point| point.0.clone())
            .collect();
        self.data.datasets[0] = activity.daily_users.iter().map(|point| point.1).collect();
        self.data.datasets[1] = activity
            .daily_progress
            .iter()
            .map(|point| point.1)
            .collect();
        self.update(UpdateMode::NoAnimation);
        true
    }
}

/// Charts on the current page, keyed by dataset name.
#[derive(Clone, Default)]
pub struct ChartRegistry {
    charts: Arc<Mutex<HashMap<ChartName, ChartHandle>>>,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, handle: ChartHandle) {
        let mut charts = self.charts.lock().unwrap_or_else(|e| e.into_inner());
        charts.insert(handle.name, handle);
    }

    /// Copy of a chart's current data.
    #[cfg(test)]
    pub fn snapshot(&self, name: ChartName) -> Option<(ChartData, u64)> {
        let charts = self.charts.lock().unwrap_or_else(|e| e.into_inner());
        charts
            .get(&name)
            .map(|handle| (handle.data().clone(), handle.revision()))
    }

    /// Asks every chart to draw its current data.
    pub fn render_all(&self, mode: UpdateMode) {
        let mut charts = self.charts.lock().unwrap_or_else(|e| e.into_inner());
        for handle in charts.values_mut() {
            handle.update(mode);
        }
    }

    /// Merges a fetched dataset into its chart. Returns false when no chart took the update.
    pub fn apply(&self, name: ChartName, payload: &ChartPayload) -> bool {
        let mut charts = self.charts.lock().unwrap_or_else(|e| e.into_inner());
        let Some(handle) = charts.get_mut(&name) else {
            debug!("No chart registered for {}, dropping refreshed data", name);
            return false;
        };
        match payload {
            ChartPayload::Counts(counts) => handle.apply_counts(counts),
            ChartPayload::DailyActivity(activity) => handle.apply_daily_activity(activity),
        }
    }
}
