//! Terminal front end for the Citadel city simulation.
//!
//! Reads one command per line from stdin and prints the outcome.
//! Notifications are read from a board and dismissed one by one; pending
//! decisions are listed and answered by number.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing, to stderr)
//! 2. Load configuration from `citadel.yaml` (or the path given as the
//!    first argument)
//! 3. Open the save file, founding a city on first start
//! 4. Read commands until `quit` or end of input
//!
//! ```text
//!   stdin ──► Command ──► Session ──► TurnEngine ──► MemoryStore ──► save file
//!                            │
//!                            └──► rendered outcome ──► stdout
//! ```

mod command;
mod config;
mod error;
mod session;

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::command::Command;
use crate::config::AppConfig;
use crate::error::CliError;
use crate::session::Session;

/// Config file looked up in the working directory.
const DEFAULT_CONFIG_PATH: &str = "citadel.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if the configuration or save file can't be read, or a
/// command fails in a way the player can't recover from.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!("citadel starting");

    let config = load_config().context("failed to load configuration")?;
    info!(
        save_path = %config.storage.save_path.display(),
        threshold_max = config.engine.selection.threshold_max,
        disabled_events = config.engine.selection.disabled_events.len(),
        seed = ?config.engine.turn.seed,
        "Configuration loaded"
    );

    let mut session = Session::open(&config).context("failed to open the save file")?;

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", session.status()?)?;
    writeln!(stdout, "Type 'help' for commands.")?;

    for line in stdin.lock().lines() {
        let line = line.context("failed to read from stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let outcome = line
            .parse::<Command>()
            .and_then(|command| match command {
                Command::Quit => Ok(None),
                other => session.execute(other).map(Some),
            });

        match outcome {
            Ok(Some(output)) => writeln!(stdout, "{output}")?,
            Ok(None) => break,
            Err(e) if !e.is_fatal() => {
                warn!(error = %e, "Command rejected");
                writeln!(stdout, "{e}")?;
            }
            Err(e) => return Err(e).context("command failed"),
        }
        stdout.flush()?;
    }

    info!("citadel shutdown complete");
    Ok(())
}

/// Load `citadel.yaml`, or the file named by the first argument.
///
/// A missing default file means defaults; a missing explicit file is an
/// error.
fn load_config() -> Result<AppConfig, CliError> {
    if let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) {
        return Ok(AppConfig::from_file(&path)?);
    }
    let path = PathBuf::from(DEFAULT_CONFIG_PATH);
    if path.exists() {
        Ok(AppConfig::from_file(&path)?)
    } else {
        info!("Config file not found, using defaults");
        Ok(AppConfig::default())
    }
}
