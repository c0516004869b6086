mod api;
mod boundary;
mod charts;
#[macro_use]
mod cli_messages;
mod config;
mod consts;
mod debounce;
mod environment;
mod error_classifier;
mod events;
mod export;
mod logging;
mod scheduler;
mod search;
mod session;
mod utils;
mod workers;

use crate::config::{Config, get_config_path};
use crate::consts::cli_consts::EVENT_QUEUE_SIZE;
use crate::environment::Environment;
use crate::events::EventSender;
use crate::export::sink::DirectorySink;
use crate::export::{Dataset, ExportFormat, Exporter};
use crate::session::messages::print_event;
use crate::session::{WatchOptions, run_search_mode, run_watch_mode};
use crate::utils::validation::validate_required;
use clap::{Parser, Subcommand};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Keep the dashboard charts refreshed
    Watch {
        /// Route to refresh for. Only "/" and analytics pages carry charts.
        #[arg(long, value_name = "PATH")]
        route: Option<String>,

        /// Refresh once and exit.
        #[arg(long, default_value_t = false)]
        once: bool,
    },
    /// Export a JSON array of records as CSV or JSON
    Export {
        /// File holding the records to export.
        #[arg(long, value_name = "FILE")]
        input: PathBuf,

        /// Output format: csv or json.
        #[arg(long, default_value = "csv")]
        format: ExportFormat,

        /// Directory to write the export to.
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
    },
    /// Filter the rows of a JSON array of records
    Search {
        /// File holding the records to search.
        #[arg(long, value_name = "FILE")]
        input: PathBuf,

        /// Term to search for. Without it, each line read from stdin is a new term.
        #[arg(long)]
        term: Option<String>,

        /// Match only this field of each record.
        #[arg(long, value_name = "FIELD")]
        column: Option<String>,
    },
    /// Save client settings
    Configure {
        /// Base URL of the admin panel.
        #[arg(long, value_name = "URL")]
        api_url: String,

        #[arg(long, value_name = "PATH")]
        route: Option<String>,

        #[arg(long)]
        refresh_interval_secs: Option<u64>,

        #[arg(long)]
        search_debounce_ms: Option<u64>,

        #[arg(long, value_name = "DIR")]
        export_dir: Option<String>,

        /// Days of history shown by the daily activity chart.
        #[arg(long)]
        analytics_days: Option<u32>,
    },
    /// Clear the saved settings.
    Reset,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    logging::init_logger();

    let config_path = get_config_path()?;
    let args = Args::parse();
    match args.command {
        Command::Watch { route, once } => {
            let config = Config::load_or_default(&config_path)?;
            let api_url = resolve_api_url(&config);
            run_watch_mode(WatchOptions {
                api_url,
                route: route.unwrap_or(config.route.clone()),
                interval: config.refresh_interval(),
                analytics_days: config.analytics_days,
                once,
            })
            .await
        }
        Command::Export {
            input,
            format,
            out_dir,
        } => {
            let config = Config::load_or_default(&config_path)?;
            let dir = out_dir.unwrap_or_else(|| export_dir(&config));
            export(&input, format, dir).await
        }
        Command::Search {
            input,
            term,
            column,
        } => {
            let config = Config::load_or_default(&config_path)?;
            let dataset = read_dataset(&input)?;
            run_search_mode(&dataset, term, column, config.search_debounce()).await
        }
        Command::Configure {
            api_url,
            route,
            refresh_interval_secs,
            search_debounce_ms,
            export_dir,
            analytics_days,
        } => {
            if let Err(fields) = validate_required(&[("api_url", api_url.as_str())]) {
                let missing = fields.join(", ");
                print_cmd_error!("Missing required settings", missing.as_str());
                return Err(Box::from("Missing required settings"));
            }
            if api_url.parse::<Environment>().is_err() {
                let err_msg = format!(
                    "Invalid admin panel URL: {}. It should start with http:// or https://",
                    api_url
                );
                print_cmd_error!("Invalid settings", err_msg.as_str());
                return Err(Box::from(err_msg));
            }

            let mut config = Config::load_or_default(&config_path)?;
            config.api_url = api_url;
            if let Some(route) = route {
                config.route = route;
            }
            if let Some(secs) = refresh_interval_secs {
                config.refresh_interval_secs = secs;
            }
            if let Some(ms) = search_debounce_ms {
                config.search_debounce_ms = ms;
            }
            if let Some(dir) = export_dir {
                config.export_dir = dir;
            }
            if analytics_days.is_some() {
                config.analytics_days = analytics_days;
            }
            if let Err(e) = config.validate() {
                let err_msg = e.to_string();
                print_cmd_error!("Invalid settings", err_msg.as_str());
                return Err(Box::from(err_msg));
            }
            config
                .save(&config_path)
                .map_err(|e| format!("Failed to save config: {}", e))?;
            print_cmd_success!("Settings saved", "{}", config_path.display());
            Ok(())
        }
        Command::Reset => {
            println!("Clearing admin panel client settings...");
            Config::clear(&config_path).map_err(Into::into)
        }
    }
}

/// The saved URL wins over `ADMIN_PANEL_ENVIRONMENT`.
fn resolve_api_url(config: &Config) -> String {
    if config.api_url.trim().is_empty() {
        Environment::from_env().api_url()
    } else {
        config.api_url.clone()
    }
}

fn export_dir(config: &Config) -> PathBuf {
    if config.export_dir.trim().is_empty() {
        PathBuf::from(".")
    } else {
        PathBuf::from(&config.export_dir)
    }
}

fn read_dataset(path: &Path) -> Result<Dataset, Box<dyn Error>> {
    let buf = fs::read(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let dataset: Dataset = serde_json::from_slice(&buf)
        .map_err(|e| format!("{} is not a JSON array of records: {}", path.display(), e))?;
    Ok(dataset)
}

async fn export(input: &Path, format: ExportFormat, dir: PathBuf) -> Result<(), Box<dyn Error>> {
    let dataset = read_dataset(input)?;
    let sink = DirectorySink::new(dir);
    print_cmd_info!(
        "Exporting",
        "{} records as {} to {}",
        dataset.len(),
        format,
        sink.dir().display()
    );

    let (event_sender, mut event_receiver) = mpsc::channel(EVENT_QUEUE_SIZE);
    let exporter = Exporter::new(Box::new(sink), EventSender::new(event_sender));
    let result = exporter.export_data(format, Some(&dataset)).await;

    while let Ok(event) = event_receiver.try_recv() {
        print_event(&event);
    }
    result?;
    Ok(())
}
