//! Periodic chart refresh
//!
//! Every tick fetches the three dashboard datasets concurrently and merges
//! each one into its chart as soon as it arrives.

use crate::api::ChartApi;
use crate::charts::{ChartName, ChartRegistry};
use crate::error_classifier::ErrorClassifier;
use crate::events::{EventSender, EventType};
use crate::logging::LogLevel;
use crate::scheduler::{Scheduler, TimerHandle};
use futures::FutureExt;
use futures::future::join_all;
use log::{debug, log};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Where the client currently is.
pub trait RouteProvider: Send + Sync {
    fn current_path(&self) -> String;
}

/// A route that never changes.
#[derive(Debug, Clone)]
pub struct StaticRoute(String);

impl StaticRoute {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }
}

impl RouteProvider for StaticRoute {
    fn current_path(&self) -> String {
        self.0.clone()
    }
}

/// Only the dashboard root and analytics pages carry refreshable charts.
pub fn should_refresh(path: &str) -> bool {
    path == "/" || path.contains("analytics")
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// All fetches settled; `failed` of them errored.
    Completed { failed: usize },
    SkippedRoute,
    /// A previous tick was still in flight.
    SkippedBusy,
}

/// Clears the in-flight flag when a tick ends, however it ends.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct Refresher {
    api: Arc<dyn ChartApi>,
    registry: ChartRegistry,
    events: EventSender,
    route: Arc<dyn RouteProvider>,
    in_flight: AtomicBool,
    classifier: ErrorClassifier,
}

impl Refresher {
    pub fn new(
        api: Arc<dyn ChartApi>,
        registry: ChartRegistry,
        events: EventSender,
        route: Arc<dyn RouteProvider>,
    ) -> Self {
        Self {
            api,
            registry,
            events,
            route,
            in_flight: AtomicBool::new(false),
            classifier: ErrorClassifier::new(),
        }
    }

    pub async fn tick(&self) -> TickOutcome {
        let path = self.route.current_path();
        if !should_refresh(&path) {
            debug!("Skipping refresh on {}", path);
            return TickOutcome::SkippedRoute;
        }
        if self.in_flight.swap(true, Ordering::AcqRel) {
            debug!("Previous refresh still in flight, skipping tick");
            return TickOutcome::SkippedBusy;
        }
        let _in_flight = InFlight(&self.in_flight);

        self.events
            .send_refresh_event(
                "Refreshing dashboard data...".to_string(),
                EventType::Info,
                LogLevel::Info,
            )
            .await;

        let results = join_all(ChartName::ALL.map(|name| self.refresh_chart(name))).await;
        let failed = results.iter().filter(|refreshed| !**refreshed).count();

        if failed > 0 {
            self.events
                .send_refresh_event(
                    format!(
                        "Error refreshing dashboard data ({} of {} charts failed)",
                        failed,
                        results.len()
                    ),
                    EventType::Error,
                    LogLevel::Error,
                )
                .await;
        } else {
            self.events
                .send_refresh_event(
                    "Dashboard data refreshed".to_string(),
                    EventType::Success,
                    LogLevel::Info,
                )
                .await;
        }

        TickOutcome::Completed { failed }
    }

    async fn refresh_chart(&self, name: ChartName) -> bool {
        match self.api.fetch_chart(name).await {
            Ok(payload) => {
                self.registry.apply(name, &payload);
                true
            }
            Err(e) => {
                let level = self.classifier.classify_fetch_error(&e);
                log!(log::Level::from(level), "Failed to refresh {}: {}", name, e);
                false
            }
        }
    }
}

/// Runs [`Refresher::tick`] every `interval`, first after one interval.
pub fn run_refresher(
    refresher: Arc<Refresher>,
    scheduler: &dyn Scheduler,
    interval: Duration,
) -> TimerHandle {
    scheduler.schedule_repeating(
        interval,
        Arc::new(move || {
            let refresher = refresher.clone();
            async move {
                refresher.tick().await;
            }
            .boxed()
        }),
    )
}
