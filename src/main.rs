use std::process::ExitCode;

use move_log::EXIT_RUNTIME_FAILURE;

mod app;
mod logging;

fn main() -> ExitCode {
    let args = match move_log::cli::parse() {
        Ok(args) => args,
        // --help and --version go to stdout and exit 0.
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(EXIT_RUNTIME_FAILURE);
        }
    };
    app::run(args)
}
