//! Error types for the terminal front end.
//!
//! [`CliError`] wraps every subsystem failure so `main` can propagate with
//! `?`. Mistakes the player can fix (a typo, a stale choice number, an
//! engine precondition) are not fatal; the loop prints them and carries on.

use citadel_db::StoreError;
use citadel_events::{ConfigError, ConfigurationError, EngineError};
use citadel_world::WorldError;

/// Top-level error for the `citadel` binary.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// The event catalog could not be assembled.
    #[error("content error: {source}")]
    Content {
        /// The underlying catalog error.
        #[from]
        source: ConfigurationError,
    },

    /// Reading or writing the save file failed.
    #[error("storage error: {source}")]
    Store {
        /// The underlying store error.
        #[from]
        source: StoreError,
    },

    /// Building the starting city failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// The event engine rejected or failed an operation.
    #[error("{source}")]
    Engine {
        /// The underlying engine error.
        #[from]
        source: EngineError,
    },

    /// Terminal I/O failed.
    #[error("terminal error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The input did not name a command.
    #[error("unknown command '{input}', type 'help' for a list")]
    UnknownCommand {
        /// What was typed.
        input: String,
    },

    /// A command argument is missing or malformed.
    #[error("{command}: {reason}")]
    InvalidArgument {
        /// Command the argument belongs to.
        command: &'static str,
        /// What is wrong.
        reason: String,
    },

    /// A pending decision number does not exist.
    #[error("there is no pending decision number {position}")]
    NoSuchDecision {
        /// 1-based position the player typed.
        position: usize,
    },

    /// `ack` with nothing left on the board.
    #[error("there is nothing to acknowledge")]
    NothingToAcknowledge,
}

impl CliError {
    /// Whether the turn loop has to stop.
    pub const fn is_fatal(&self) -> bool {
        match self {
            Self::Engine { source } => source.is_fatal(),
            Self::UnknownCommand { .. }
            | Self::InvalidArgument { .. }
            | Self::NoSuchDecision { .. }
            | Self::NothingToAcknowledge => false,
            Self::Config { .. }
            | Self::Content { .. }
            | Self::Store { .. }
            | Self::World { .. }
            | Self::Io { .. } => true,
        }
    }
}
