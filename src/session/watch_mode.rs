//! Watch mode execution
//!
//! Keeps the dashboard charts fresh in the terminal until Ctrl+C.

use super::messages::{
    print_event, print_session_exit_success, print_session_shutdown, print_session_starting,
};
use crate::api::ApiClient;
use crate::boundary;
use crate::charts::{ChartData, ChartHandle, ChartName, ChartRegistry, ChartRenderer, UpdateMode};
use crate::consts::cli_consts::EVENT_QUEUE_SIZE;
use crate::events::{Event, EventSender};
use crate::scheduler::{Scheduler, TokioScheduler};
use crate::utils::format::format_number;
use crate::workers::refresher::{
    Refresher, StaticRoute, TickOutcome, run_refresher, should_refresh,
};
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};

/// Draws charts as plain text tables.
pub struct TerminalRenderer;

impl ChartRenderer for TerminalRenderer {
    fn render(&self, name: ChartName, data: &ChartData, mode: UpdateMode) {
        for line in chart_lines(name, data, mode) {
            println!("{}", line);
        }
    }
}

fn chart_lines(name: ChartName, data: &ChartData, mode: UpdateMode) -> Vec<String> {
    let heading = match mode {
        UpdateMode::Animated => format!("== {} ==", name),
        UpdateMode::NoAnimation => format!("== {} (updated) ==", name),
    };
    let mut lines = vec![heading];
    if data.labels.is_empty() {
        lines.push("  (no data)".to_string());
        return lines;
    }
    for (index, label) in data.labels.iter().enumerate() {
        let values: Vec<String> = data
            .datasets
            .iter()
            .map(|series| {
                series
                    .get(index)
                    .map(|value| format_number(*value))
                    .unwrap_or_else(|| "-".to_string())
            })
            .collect();
        lines.push(format!("  {:<16} {}", label, values.join("  ")));
    }
    lines
}

/// Registers the three dashboard charts. Daily activity carries users and progress.
pub fn dashboard_registry(renderer: Arc<dyn ChartRenderer>) -> ChartRegistry {
    let registry = ChartRegistry::new();
    for name in ChartName::ALL {
        let series = match name {
            ChartName::DailyActivity => 2,
            ChartName::UsersByLevel | ChartName::ProgressBySection => 1,
        };
        registry.register(ChartHandle::new(
            name,
            ChartData::with_series(series),
            renderer.clone(),
        ));
    }
    registry
}

pub struct WatchOptions {
    pub api_url: String,
    pub route: String,
    pub interval: Duration,
    pub analytics_days: Option<u32>,
    /// Run a single refresh and exit.
    pub once: bool,
}

/// Runs the refresher until Ctrl+C, printing notifications as they arrive.
pub async fn run_watch_mode(options: WatchOptions) -> Result<(), Box<dyn Error>> {
    print_session_starting("watch", &options.api_url, &options.route);

    let (event_sender, mut event_receiver) = mpsc::channel::<Event>(EVENT_QUEUE_SIZE);
    let events = EventSender::new(event_sender);
    boundary::install(events.clone());

    let registry = dashboard_registry(Arc::new(TerminalRenderer));
    registry.render_all(UpdateMode::Animated);

    let api = ApiClient::new(options.api_url.as_str()).with_analytics_days(options.analytics_days);
    let refresher = Arc::new(Refresher::new(
        Arc::new(api),
        registry,
        events,
        Arc::new(StaticRoute::new(options.route.as_str())),
    ));

    if options.once {
        let outcome = refresher.tick().await;
        while let Ok(event) = event_receiver.try_recv() {
            print_event(&event);
        }
        return match outcome {
            TickOutcome::Completed { failed } if failed > 0 => {
                Err(format!("{} of {} charts failed to refresh", failed, ChartName::ALL.len()).into())
            }
            TickOutcome::SkippedRoute => {
                Err(format!("Route {} has no charts to refresh", options.route).into())
            }
            _ => Ok(()),
        };
    }

    if !should_refresh(&options.route) {
        print_cmd_warn!(
            "Nothing to refresh",
            "{} is neither the dashboard nor an analytics page; every tick will be skipped",
            options.route
        );
    }

    let scheduler = TokioScheduler::new();
    let timer = run_refresher(refresher, &scheduler, options.interval);

    // Trigger shutdown on Ctrl+C
    let (shutdown_sender, mut shutdown_receiver) = broadcast::channel::<()>(1);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_sender.send(());
        }
    });

    // Event loop: log events to console until shutdown
    loop {
        tokio::select! {
            Some(event) = event_receiver.recv() => {
                print_event(&event);
            }
            _ = shutdown_receiver.recv() => {
                break;
            }
        }
    }

    print_session_shutdown();
    scheduler.cancel(timer);
    print_session_exit_success();

    Ok(())
}
