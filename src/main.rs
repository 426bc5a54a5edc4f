//! CLI entry point for the EV charger locator.
//!
//! `serve` runs the web front end and its `/api/chargers` proxy; `nearby`
//! performs a single lookup from the terminal.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ev_charger_locator::{
    config::Config,
    infra::ev_charger::client::ChargerClient,
    output::{write_json, write_lines},
    query::GeoQuery,
    server::{router, serve, state::AppState},
    services::charger_api::ChargerApi,
};
use std::ffi::OsStr;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tokio::net::TcpListener;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "ev_charger_locator")]
#[command(about = "Find EV charging stations near a location", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the search page and the /api/chargers proxy
    Serve {
        /// Address to listen on (overrides BIND_ADDR)
        #[arg(short, long)]
        bind: Option<SocketAddr>,

        /// Directory holding index.html (overrides STATIC_DIR)
        #[arg(short, long)]
        static_dir: Option<PathBuf>,
    },
    /// Look up chargers near a point and print them
    Nearby {
        /// Latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        latitude: f64,

        /// Longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        longitude: f64,

        /// Search radius in kilometres [default: 10]
        #[arg(short, long)]
        radius: Option<u32>,

        /// Print the upstream JSON instead of one line per charger
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let _file_guard = init_tracing()?;

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Commands::Serve { bind, static_dir } => {
            let bind = bind.unwrap_or(config.bind_addr);
            let static_dir = static_dir.unwrap_or_else(|| config.static_dir.clone());

            let client = ChargerClient::new(&config)?;
            info!(
                endpoint = %client.endpoint(),
                static_dir = %static_dir.display(),
                "Charger client ready"
            );

            let app = router(AppState::new(client), &static_dir);
            let listener = TcpListener::bind(bind)
                .await
                .with_context(|| format!("Failed to bind {bind}"))?;

            serve(listener, app).await?;
        }
        Commands::Nearby {
            latitude,
            longitude,
            radius,
            json,
        } => {
            let query = GeoQuery::new(latitude, longitude, radius)?;
            let client = ChargerClient::new(&config)?;
            let payload = client.get_chargers_nearby(&query).await?;

            let mut stdout = std::io::stdout().lock();
            if json {
                write_json(&mut stdout, &payload)?;
            } else {
                write_lines(&mut stdout, &payload)?;
            }
        }
    }

    Ok(())
}

/// Colored stderr output plus a JSON daily-rolling log file.
///
/// The returned guard flushes the file writer on drop and must outlive `main`'s work.
fn init_tracing() -> Result<WorkerGuard> {
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/ev_charger_locator.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("ev_charger_locator.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    Ok(file_guard)
}
