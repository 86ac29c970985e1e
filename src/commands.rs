//! Operation parsing and dispatch.
//!
//! `execute` runs exactly one operation against a loaded log and writes the
//! visible result to two writers: the primary stream (the rendered log) and
//! the diagnostic stream (the move removed by `undo`).

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use crate::errors::MoveLogError;
use crate::move_log::MoveLog;

/// One of the four supported operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Add(String),
    Undo,
    List,
    Clear,
}

impl Operation {
    /// Parse an operation name. `move_arg` is only consulted for `add`.
    pub fn parse(name: &str, move_arg: Option<&str>) -> Result<Self, MoveLogError> {
        match name {
            "add" => match move_arg {
                Some(mv) if !mv.is_empty() => Ok(Operation::Add(mv.to_owned())),
                _ => Err(MoveLogError::MissingMove),
            },
            "undo" => Ok(Operation::Undo),
            "list" => Ok(Operation::List),
            "clear" => Ok(Operation::Clear),
            other => Err(MoveLogError::UnknownOperation(other.to_owned())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Add(_) => "add",
            Operation::Undo => "undo",
            Operation::List => "list",
            Operation::Clear => "clear",
        }
    }

    /// Whether this operation can change the log's content.
    pub fn mutates(&self) -> bool {
        !matches!(self, Operation::List)
    }
}

/// A validated request: which operation, against which file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub operation: Operation,
    pub file: PathBuf,
}

impl Invocation {
    /// Validate raw positional arguments.
    ///
    /// Missing operation or file is reported before the operation name is
    /// looked at, so `bogus` alone is "too few arguments", not "unknown".
    pub fn from_args(
        operation: Option<&str>,
        file: Option<PathBuf>,
        move_arg: Option<&str>,
    ) -> Result<Self, MoveLogError> {
        let (Some(name), Some(file)) = (operation, file) else {
            return Err(MoveLogError::TooFewArguments);
        };
        let operation = Operation::parse(name, move_arg)?;
        Ok(Self { operation, file })
    }
}

/// What an executed operation did, for the caller's write-back decision.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// True if the log content differs from what was loaded.
    pub changed: bool,
}

/// Run one operation against `log`.
///
/// - add: append, then render to `primary`.
/// - undo: echo the removed move (if any) to `diagnostic`, then render to `primary`.
/// - list: render to `primary`.
/// - clear: drop the loaded moves; write nothing.
pub fn execute<P: Write, D: Write>(
    op: &Operation,
    log: &mut MoveLog,
    mut primary: P,
    mut diagnostic: D,
) -> Result<Outcome> {
    let outcome = match op {
        Operation::Add(text) => {
            let added = log.append(text)?;
            debug!(mv = %added, "Appended move");
            Outcome { changed: true }
        }
        Operation::Undo => {
            let removed = log.remove_last();
            if let Some(mv) = &removed {
                writeln!(diagnostic, "{mv}").context("write undone move")?;
                diagnostic.flush().context("flush diagnostic output")?;
                debug!(mv = %mv, "Removed last move");
            } else {
                debug!("Undo on empty log; nothing removed");
            }
            Outcome {
                changed: removed.is_some(),
            }
        }
        Operation::List => Outcome::default(),
        Operation::Clear => {
            let changed = !log.is_empty();
            log.clear();
            return Ok(Outcome { changed });
        }
    };

    log.write_to(&mut primary).context("write move list")?;
    primary.flush().context("flush primary output")?;
    Ok(outcome)
}
