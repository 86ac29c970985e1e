//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Positionals are optional here so missing ones map to the tool's own
//!   exit codes instead of clap's.
//! - Moves are opaque: a leading `-` and non-UTF-8 bytes are accepted
//!   (the latter decoded lossily).
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, ValueHint};
use std::ffi::OsString;
use std::path::PathBuf;

use crate::commands::Invocation;
use crate::config::types::{Config, LogLevel};
use crate::errors::MoveLogError;

/// CLI wrapper for the move_log library.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Keep an ordered log of chess moves in a plain-text file",
    override_usage = "move_log [OPTIONS] <add|undo|list|clear> <FILE> [MOVE]"
)]
pub struct Args {
    /// Operation: add, undo, list or clear.
    #[arg(value_name = "OPERATION")]
    pub operation: Option<OsString>,

    /// Text file holding one move per line. A missing file is an empty log.
    #[arg(value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    /// Move to append (required for `add`, ignored otherwise).
    #[arg(value_name = "MOVE", allow_hyphen_values = true)]
    pub move_text: Option<OsString>,

    /// Extra positionals are accepted and ignored.
    #[arg(hide = true, allow_hyphen_values = true)]
    pub extra: Vec<OsString>,

    /// Write the resulting log back to FILE after add, undo or clear.
    #[arg(long, help = "Write the resulting log back to FILE after add/undo/clear")]
    pub persist: bool,

    /// Longest move kept, in characters; longer moves are truncated.
    #[arg(long, value_name = "N", help = "Truncate moves longer than N characters")]
    pub max_move_len: Option<usize>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Print where move_log will look for the config file, then exit.
    #[arg(long, help = "Print the config file location used by move_log and exit")]
    pub print_config: bool,
}

impl Args {
    /// Validate positionals into an operation and target file.
    pub fn invocation(&self) -> Result<Invocation, MoveLogError> {
        let operation = self.operation.as_ref().map(|s| s.to_string_lossy());
        let move_text = self.move_text.as_ref().map(|s| s.to_string_lossy());
        Invocation::from_args(operation.as_deref(), self.file.clone(), move_text.as_deref())
    }

    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if self.persist {
            cfg.persist = true;
        }
        if let Some(n) = self.max_move_len.filter(|n| *n > 0) {
            cfg.max_move_len = n;
        }
    }
}

/// Parse process arguments. Errors are returned so the caller picks the exit code.
pub fn parse() -> Result<Args, clap::Error> {
    Args::try_parse()
}
