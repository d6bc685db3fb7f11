//! `watchpost`: live terminal dashboard for a sensor-network backend.
//!
//! Polls the backend's `/api/status` and `/api/alerts` once per refresh
//! interval through `watchpost-core`'s [`Monitor`], and draws the metric
//! cards, node table, and alert feed with [ratatui](https://ratatui.rs).
//!
//! Logs are written to a file (default `/tmp/watchpost.log`) to avoid
//! corrupting the terminal UI.
//!
//! Entry point: CLI argument parsing, config layering, tracing setup,
//! panic hooks, and app launch.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use watchpost_config::Config;
use watchpost_core::Monitor;

use crate::app::App;

const DEFAULT_LOG_FILE: &str = "/tmp/watchpost.log";

/// Live terminal dashboard for a sensor-network backend.
#[derive(Parser, Debug)]
#[command(name = "watchpost", version, about)]
struct Cli {
    /// Backend base URL (e.g., http://127.0.0.1:8080)
    #[arg(short = 'u', long, env = "WATCHPOST_URL")]
    url: Option<String>,

    /// Refresh interval in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Per-request timeout in seconds (no timeout unless set)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Config file path (defaults to the platform config dir)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Log file path (defaults to /tmp/watchpost.log)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Persist the effective settings to the config file and continue
    #[arg(long)]
    save: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// CLI flags win over everything the config layers produced.
    fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(url) = &self.url {
            cfg.backend.url.clone_from(url);
        }
        if let Some(interval_ms) = self.interval_ms {
            cfg.refresh.interval_ms = interval_ms;
        }
        if let Some(timeout_secs) = self.timeout_secs {
            cfg.backend.timeout_secs = Some(timeout_secs);
        }
        if let Some(log_file) = &self.log_file {
            cfg.log_file = Some(log_file.clone());
        }
    }

    fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(watchpost_config::config_path)
    }
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr; that would
/// corrupt the TUI output. The returned guard flushes logs when dropped.
fn setup_tracing(verbose: u8, log_file: &Path) -> WorkerGuard {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "watchpost={log_level},watchpost_core={log_level},watchpost_api={log_level}"
        ))
    });

    let log_dir = log_file.parent().unwrap_or(Path::new("/tmp"));
    let log_filename = log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("watchpost.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Priority: CLI flags > environment > config file > defaults
    let config_path = cli.config_path();
    let mut cfg = watchpost_config::load_config_from(&config_path)?;
    cli.apply_overrides(&mut cfg);
    let monitor_config = cfg.to_monitor_config()?;

    let log_file = cfg
        .log_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));
    let _log_guard = setup_tracing(cli.verbose, &log_file);

    if cli.save {
        watchpost_config::save_config_to(&cfg, &config_path)?;
        info!(path = %config_path.display(), "saved config");
    }

    info!(
        url = %monitor_config.base_url,
        interval_ms = monitor_config.refresh_interval.as_millis(),
        "starting watchpost"
    );

    let monitor = Monitor::new(monitor_config)?;
    let mut app = App::new(monitor);
    app.run().await?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn flags_override_config() {
        let cli = Cli::try_parse_from([
            "watchpost",
            "--url",
            "http://10.0.0.5:9000",
            "--interval-ms",
            "250",
            "--timeout-secs",
            "4",
            "--log-file",
            "/var/log/wp.log",
        ])
        .unwrap();

        let mut cfg = Config::default();
        cli.apply_overrides(&mut cfg);

        assert_eq!(cfg.backend.url, "http://10.0.0.5:9000");
        assert_eq!(cfg.refresh.interval_ms, 250);
        assert_eq!(cfg.backend.timeout_secs, Some(4));
        assert_eq!(cfg.log_file, Some(PathBuf::from("/var/log/wp.log")));
    }

    #[test]
    fn absent_flags_keep_config() {
        let cli = Cli::try_parse_from(["watchpost", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);

        let mut cfg = Config::default();
        cfg.refresh.interval_ms = 5000;
        cli.apply_overrides(&mut cfg);

        assert_eq!(cfg.refresh.interval_ms, 5000);
        assert_eq!(cfg.backend.timeout_secs, None);
    }

    #[test]
    fn explicit_config_path_wins() {
        let cli = Cli::try_parse_from(["watchpost", "--config", "/etc/watchpost.toml"]).unwrap();
        assert_eq!(cli.config_path(), PathBuf::from("/etc/watchpost.toml"));
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
