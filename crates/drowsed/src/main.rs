//! drowsed - The drowse background service
//!
//! This is the main entry point for the drowse service.
//! It wires together all the components:
//! - Configuration loading
//! - Probe construction from the built-in registry
//! - Idle processor and command dispatcher
//! - The polling loop with resume-marker handling

use anyhow::{Context, Result};
use clap::Parser;
use drowse_config::load_config;
use drowse_core::{
    build_probes, ActionDispatcher, IdleProcessor, IdleState, ProcessorConfig, TickOutcome,
};
use drowse_host_linux::{builtin_registry, ShellExecutor, WokeUpMarker};
use drowse_util::default_config_path;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::signal::unix::{signal, SignalKind};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// drowsed - Suspend the machine after a period of inactivity
#[derive(Parser, Debug)]
#[command(name = "drowsed")]
#[command(
    about = "Automatically suspends a machine based on activity and wake-up probes",
    long_about = None
)]
struct Args {
    /// Configuration file path (or set DROWSE_CONFIG env var)
    #[arg(short, long, env = "DROWSE_CONFIG", default_value_os_t = default_config_path())]
    config: PathBuf,

    /// Run every activity probe even if one already prevents suspension
    #[arg(short, long)]
    all_checks: bool,

    /// Stop after roughly this many seconds instead of running forever
    #[arg(short, long, value_name = "SECONDS")]
    run_for: Option<u64>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

/// Main service state
struct Service {
    processor: IdleProcessor,
    state: IdleState,
    marker: WokeUpMarker,
    interval: Duration,
    run_for: Option<Duration>,
}

impl Service {
    fn new(args: &Args) -> Result<Self> {
        let settings = load_config(&args.config)
            .with_context(|| format!("Failed to load config from {:?}", args.config))?;

        info!(
            config_path = %args.config.display(),
            activity_probes = settings.activities.len(),
            wake_probes = settings.wakeups.len(),
            "Configuration loaded"
        );

        let registry = builtin_registry();
        let probes = build_probes(&registry, &settings).context("Failed to set up probes")?;

        let dispatcher =
            ActionDispatcher::new(Arc::new(ShellExecutor::new()), settings.commands.clone());
        let config = ProcessorConfig::from_settings(&settings.general, args.all_checks);
        let processor = IdleProcessor::new(probes, config, dispatcher);

        Ok(Self {
            processor,
            state: IdleState::new(),
            marker: WokeUpMarker::new(settings.general.woke_up_file.clone()),
            interval: settings.general.interval,
            run_for: args.run_for.map(Duration::from_secs),
        })
    }

    fn tick(&mut self) -> TickOutcome {
        let just_woke_up = self.marker.take();
        self.processor
            .iteration(&mut self.state, drowse_util::now(), just_woke_up)
    }

    async fn run(mut self) -> Result<()> {
        let mut sigterm = signal(SignalKind::terminate())
            .context("Failed to create SIGTERM handler")?;
        let mut sigint = signal(SignalKind::interrupt())
            .context("Failed to create SIGINT handler")?;

        let started = Instant::now();

        info!(
            interval_secs = self.interval.as_secs(),
            marker = %self.marker.path().display(),
            "Service running"
        );

        loop {
            if self.run_for.is_some_and(|limit| started.elapsed() >= limit) {
                info!("Requested run time elapsed");
                break;
            }

            // ticks run to completion; signals are only observed between them
            let outcome = self.tick();
            debug!(outcome = ?outcome, idle_since = ?self.state.idle_since(), "Tick finished");

            tokio::select! {
                _ = sigterm.recv() => {
                    info!("Received SIGTERM, shutting down gracefully");
                    break;
                }
                _ = sigint.recv() => {
                    info!("Received SIGINT, shutting down gracefully");
                    break;
                }
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        info!("Shutdown complete");
        Ok(())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "drowsed starting");

    if drowse_util::is_mock_time_active() {
        warn!(
            mock_time_var = drowse_util::MOCK_TIME_ENV_VAR,
            "Mock time is active; idle and wake-up decisions use the shifted clock"
        );
    }

    let service = Service::new(&args)?;
    service.run().await
}
