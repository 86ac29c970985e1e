//! Application orchestrator.
//! Validates the invocation, loads/merges config, initializes logging, loads the
//! move file, runs the operation, and optionally writes the result back.
//!
//! Exit codes: 0 success, 1 too few arguments, 2 `add` without a move,
//! 3 unknown operation, 4 any other failure (bad flags, config, write-back, output).

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use tracing::debug;

use move_log::cli::Args;
use move_log::output as out;
use move_log::{
    EXIT_RUNTIME_FAILURE, Invocation, MoveLog, MoveLogError, default_config_path, execute,
    load_config, save_atomic,
};

use crate::logging::init_tracing;

/// Run the CLI application and map the result to a process exit code.
pub fn run(args: Args) -> ExitCode {
    if args.print_config {
        print_config_location();
        return ExitCode::SUCCESS;
    }

    // Usage problems are reported before anything touches the filesystem.
    let invocation = match args.invocation() {
        Ok(inv) => inv,
        Err(e) => return usage_failure(&e),
    };

    match run_invocation(&args, &invocation) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(usage) = e.downcast_ref::<MoveLogError>() {
                return usage_failure(usage);
            }
            debug!(error = ?e, operation = invocation.operation.name(), "Operation failed");
            out::print_error(&format!("{e:#}"));
            ExitCode::from(EXIT_RUNTIME_FAILURE)
        }
    }
}

fn usage_failure(e: &MoveLogError) -> ExitCode {
    out::print_error(&e.to_string());
    out::print_usage();
    ExitCode::from(e.code())
}

fn print_config_location() {
    match default_config_path() {
        Some(p) => {
            out::print_info(&format!("move_log config path:\n  {}", p.display()));
            if p.exists() {
                out::print_info("A config file exists at that location.");
            } else {
                out::print_info("No config file exists there; built-in defaults are used.");
            }
        }
        None => out::print_error("Could not determine a config path"),
    }
}

fn run_invocation(args: &Args, invocation: &Invocation) -> Result<()> {
    // CLI flags win over config file values.
    let mut cfg = load_config()?;
    args.apply_overrides(&mut cfg);

    // Hold the guard until return so file logs are flushed.
    let _guard = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json)?;
    debug!(?args, ?cfg, "Starting move_log");

    let file = &invocation.file;
    let mut log = MoveLog::load_with_max_len(file, cfg.max_move_len);

    let outcome = execute(
        &invocation.operation,
        &mut log,
        io::stdout().lock(),
        io::stderr().lock(),
    )?;

    if cfg.persist && invocation.operation.mutates() {
        if outcome.changed {
            save_atomic(&log, file)?;
        } else {
            debug!(path = %file.display(), "Log unchanged; skipping write-back");
        }
    }

    debug!(
        operation = invocation.operation.name(),
        moves = log.len(),
        "Operation completed"
    );
    Ok(())
}
