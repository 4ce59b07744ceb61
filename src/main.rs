//! Binary entrypoint for the `dwellmap` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    dwellmap::logging::configure_logging();

    // Recording and replay are handled in commands::dispatch via
    // DWELLMAP_RECORD=<file> and DWELLMAP_REPLAY=<file>.
    match dwellmap::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
