//! User-facing messages.
//! Data (the rendered log and the undo echo) is written plain by `commands`;
//! these helpers are for everything said *about* the run. Colors are enabled
//! only when the target stream is a TTY.

use owo_colors::OwoColorize;

use crate::errors::USAGE;

fn stdout_is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn stderr_is_tty() -> bool {
    atty::is(atty::Stream::Stderr)
}

pub fn print_info(msg: &str) {
    if stdout_is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if stderr_is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if stderr_is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

/// Usage hint printed after a usage error.
pub fn print_usage() {
    if stderr_is_tty() {
        eprintln!("{}", USAGE.dimmed());
    } else {
        eprintln!("{}", USAGE);
    }
}
