//! Core library for `move_log`.
//!
//! A move log is an ordered list of opaque move strings kept in a plain-text
//! file, one move per line. The library loads that file (a missing file is an
//! empty log), applies one operation, renders the result, and can optionally
//! write it back atomically.

pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod move_log;
pub mod output;
pub mod persist;

pub use commands::{Invocation, Operation, Outcome, execute};
pub use config::{
    Config, LogLevel, default_config_path, load_config, load_config_from_xml_path,
    path_has_symlink_ancestor,
};
pub use errors::{EXIT_RUNTIME_FAILURE, MoveLogError, USAGE};
pub use move_log::{MOVE_MAX_LEN, Move, MoveLog};
pub use persist::save_atomic;
