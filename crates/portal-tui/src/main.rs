//! `wifi-portal`: terminal front end for the Wi-Fi captive portal.
//!
//! Lists the networks the portal backend can see, and joins one through a
//! password dialog. All state lives in `portal-core`'s reducer; this binary
//! maps keys and mouse clicks to portal events and draws the resulting view.
//!
//! Logs are written to a file (default `/tmp/wifi-portal.log`) to avoid
//! corrupting the terminal UI.

mod action;
mod app;
mod component;
mod event;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;

/// Join a Wi-Fi network through the captive portal backend.
#[derive(Parser, Debug)]
#[command(name = "wifi-portal", version, about)]
struct Cli {
    /// Portal backend URL (e.g., http://10.42.0.1:8080)
    #[arg(short = 'u', long, env = "PORTAL_URL")]
    url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "PORTAL_TIMEOUT")]
    timeout: Option<u64>,

    /// Log file path (defaults to /tmp/wifi-portal.log)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Layer flags over the file/env configuration.
    fn apply(&self, cfg: &mut portal_config::Config) {
        if let Some(ref url) = self.url {
            cfg.url.clone_from(url);
        }
        if let Some(timeout) = self.timeout {
            cfg.timeout = timeout;
        }
        if let Some(ref path) = self.log_file {
            cfg.log_file.clone_from(path);
        }
    }
}

/// Set up file-based tracing. Nothing may be logged to stdout/stderr while
/// the TUI owns the terminal. The returned guard flushes on drop.
fn setup_tracing(verbose: u8, log_file: &std::path::Path) -> WorkerGuard {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "wifi_portal={log_level},portal_core={log_level},portal_api={log_level}"
        ))
    });

    let log_dir = log_file.parent().unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("wifi-portal.log"));

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

    // Hooks go in before the terminal switches to raw mode
    tui::install_hooks()?;

    let mut cfg = portal_config::load_config().wrap_err_with(|| {
        format!(
            "failed to load {}",
            portal_config::config_path().display()
        )
    })?;
    cli.apply(&mut cfg);
    let portal = cfg.to_portal_config()?;

    let _log_guard = setup_tracing(cli.verbose, &cfg.log_file);

    info!(url = %portal.url, timeout = ?portal.timeout, "starting wifi-portal");

    let mut app = App::new(&portal)?;
    app.run().await?;

    Ok(())
}
