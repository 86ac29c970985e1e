//! Typed error definitions for move_log.
//! Usage errors carry the process exit code the dispatcher reports for them.

use thiserror::Error;

/// Exit code for failures outside the usage table (bad flags, config, write-back, output).
pub const EXIT_RUNTIME_FAILURE: u8 = 4;

/// Usage line shown alongside every usage error.
pub const USAGE: &str = "usage: move_log <add|undo|list|clear> <file> [move]";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoveLogError {
    #[error("too few arguments: expected an operation and a file")]
    TooFewArguments,

    #[error("missing move for add")]
    MissingMove,

    #[error("unknown command: {0}")]
    UnknownOperation(String),
}

impl MoveLogError {
    /// Process exit code for this failure.
    pub fn code(&self) -> u8 {
        match self {
            MoveLogError::TooFewArguments => 1,
            MoveLogError::MissingMove => 2,
            MoveLogError::UnknownOperation(_) => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_exit_table() {
        assert_eq!(MoveLogError::TooFewArguments.code(), 1);
        assert_eq!(MoveLogError::MissingMove.code(), 2);
        assert_eq!(MoveLogError::UnknownOperation("redo".into()).code(), 3);
    }

    #[test]
    fn unknown_operation_names_the_operation() {
        let msg = MoveLogError::UnknownOperation("redo".into()).to_string();
        assert!(msg.contains("redo"));
    }
}
