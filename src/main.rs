use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use upgrade_timer::api::{build_router, state::AppState};
use upgrade_timer::calculate::{
    calculate_batch, CalculatorSettings, Clock, FixedClock, SystemClock,
};
use upgrade_timer::config::AppConfig;
use upgrade_timer::models::CalculationInput;

#[derive(Parser)]
#[command(name = "upgrade-timer")]
#[command(about = "Upgrade completion time calculator with builder potion speed-ups")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,

        /// Log all HTTP requests
        #[arg(long)]
        access_log: bool,
    },

    /// Calculate completion times for one batch and print them
    Calculate {
        /// Current hour of day (0-23)
        #[arg(long)]
        hour: u32,

        /// Current minute (0-59)
        #[arg(long)]
        minute: u32,

        /// Builder potions to spend on each upgrade
        #[arg(long, default_value = "0")]
        potions: u32,

        /// Pretend the wall clock reads this local time ("YYYY-MM-DD HH:MM")
        #[arg(long)]
        now: Option<String>,

        /// Upgrade durations, e.g. 3d 12h 2d6h
        #[arg(required = true)]
        durations: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;

    // Initialize tracing
    let mut directives = cli.log_level.clone().unwrap_or(config.log_level.clone());
    if matches!(cli.command, Commands::Serve { access_log: true, .. }) {
        directives.push_str(",tower_http=debug");
    }
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&directives));

    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::debug!("Starting upgrade-timer v{}", env!("CARGO_PKG_VERSION"));

    let settings = CalculatorSettings::from(&config.calculator);

    match cli.command {
        Commands::Serve { host, port, .. } => {
            let host = host.unwrap_or(config.server.host);
            let port = port.unwrap_or(config.server.port);

            let state = AppState {
                settings,
                clock: Arc::new(SystemClock),
                cors_origin: config.server.cors_origin,
            };
            let app = build_router(state);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;
            tracing::info!("Upgrade timer: http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Calculate {
            hour,
            minute,
            potions,
            now,
            durations,
        } => {
            let clock: Box<dyn Clock> = match now {
                Some(s) => {
                    let at = NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M").with_context(
                        || format!("Invalid --now (expected YYYY-MM-DD HH:MM): {}", s),
                    )?;
                    Box::new(FixedClock(at))
                }
                None => Box::new(SystemClock),
            };

            let input = CalculationInput {
                current_hour: hour,
                current_minute: minute,
                builder_potions: potions,
                upgrade_times: durations,
            };

            match calculate_batch(&input, &settings, clock.as_ref()) {
                Ok(results) => {
                    for r in &results {
                        println!(
                            "#{} {}: {} [{}]",
                            r.index, r.original_time, r.completion, r.completion_datetime
                        );
                    }
                }
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
