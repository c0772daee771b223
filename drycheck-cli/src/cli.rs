use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use drycheck_core::{
    Config, DesktopNotifier, Poller, RainSource, config::DEFAULT_CHECK_INTERVAL,
    source_from_config,
};
use inquire::{Confirm, CustomType};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "drycheck", version, about = "Get notified when the rain stops")]
pub struct Cli {
    /// Config file (YAML or TOML). Defaults to ./config.yaml, then the user config dir.
    #[arg(long, short, global = true, env = "DRYCHECK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Poll the weather forever and notify when rain turns dry (default).
    Run,

    /// Fetch the current rain status once and print it.
    Check,

    /// Interactively write a config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let path = Config::resolve_path(self.config.as_deref())?;

        match self.command.unwrap_or(Command::Run) {
            Command::Run => run_monitor(&path).await,
            Command::Check => check_once(&path).await,
            Command::Configure => configure(&path),
        }
    }
}

/// Config problems are fatal at startup: log and exit 1.
fn load_or_exit(path: &Path) -> Config {
    match Config::load(path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config error: {e:#}");
            std::process::exit(1);
        }
    }
}

async fn run_monitor(path: &Path) -> anyhow::Result<()> {
    info!("Starting drycheck…");
    let cfg = load_or_exit(path);

    info!(
        "Config: lat={}, lon={}, interval={}s, alert_once={}",
        cfg.latitude, cfg.longitude, cfg.check_interval, cfg.alert_once
    );

    let source = source_from_config(&cfg)?;
    let mut poller = Poller::new(source, DesktopNotifier::new(), cfg.interval(), cfg.alert_once);

    poller.run(shutdown_signal()).await;
    Ok(())
}

async fn check_once(path: &Path) -> anyhow::Result<()> {
    let cfg = load_or_exit(path);
    let source = source_from_config(&cfg)?;

    let reading = source
        .fetch_reading()
        .await
        .map_err(|err| anyhow!("{}: {err}", err.category()))?;

    println!("{reading}");
    Ok(())
}

fn configure(path: &Path) -> anyhow::Result<()> {
    let existing = Config::load(path).ok();

    let mut latitude = CustomType::<f64>::new("Latitude:")
        .with_error_message("Please type a decimal number, e.g. 52.52");
    let mut longitude = CustomType::<f64>::new("Longitude:")
        .with_error_message("Please type a decimal number, e.g. 13.41");
    if let Some(cfg) = &existing {
        latitude = latitude.with_default(cfg.latitude);
        longitude = longitude.with_default(cfg.longitude);
    }

    let cfg = Config {
        latitude: latitude.prompt().context("Failed to read latitude")?,
        longitude: longitude.prompt().context("Failed to read longitude")?,
        check_interval: CustomType::<u64>::new("Check interval (seconds):")
            .with_default(existing.as_ref().map_or(DEFAULT_CHECK_INTERVAL, |c| c.check_interval))
            .with_error_message("Please type a whole number of seconds")
            .prompt()
            .context("Failed to read check interval")?,
        alert_once: Confirm::new("Notify only once per dry spell?")
            .with_default(existing.as_ref().is_none_or(|c| c.alert_once))
            .prompt()
            .context("Failed to read alert-once choice")?,
    };

    cfg.validate()?;
    cfg.save(path)?;

    println!("Saved config to {}", path.display());
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("Could not listen for Ctrl-C: {err}");
        std::future::pending::<()>().await;
    }
}
