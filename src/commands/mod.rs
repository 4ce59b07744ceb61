//! Command dispatch and handlers.

pub mod merge;
pub mod normalize;

use std::env;
use std::path::PathBuf;

use crate::cli::Command;
use crate::config::Config;
use crate::context::ServiceContext;

/// Dispatch a parsed command to its handler.
///
/// For `merge`, `DWELLMAP_RECORD=<file>` records every port interaction to a
/// cassette and `DWELLMAP_REPLAY=<file>` answers them from one instead of
/// touching the disk, network, or browser.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    match command {
        Command::Normalize { addresses } => {
            normalize::run(addresses);
            Ok(())
        }
        Command::Merge(args) => {
            let config = merge::apply_args(Config::from_env(), args);
            let ctx = context_from_env(&config)?;
            let result = merge::run(&ctx, &config);

            // Write the cassette even when the run failed.
            let summary = combine(result, ctx.finish())?;
            println!("{summary}");
            Ok(())
        }
    }
}

/// Merges the run outcome with the cassette outcome, keeping both errors.
fn combine(
    result: crate::error::Result<merge::Summary>,
    finished: crate::error::Result<Option<PathBuf>>,
) -> Result<merge::Summary, String> {
    match (result, finished) {
        (Ok(summary), Ok(path)) => {
            if let Some(path) = path {
                eprintln!("Recording saved to: {}", path.display());
            }
            Ok(summary)
        }
        (Err(run), Ok(path)) => {
            if let Some(path) = path {
                eprintln!("Recording saved to: {}", path.display());
            }
            Err(run.to_string())
        }
        (Ok(_), Err(cassette)) => Err(cassette.to_string()),
        (Err(run), Err(cassette)) => Err(format!("{run}; additionally, {cassette}")),
    }
}

fn context_from_env(config: &Config) -> Result<ServiceContext, String> {
    if let Ok(path) = env::var("DWELLMAP_REPLAY") {
        return ServiceContext::replaying(&PathBuf::from(path)).map_err(|e| e.to_string());
    }
    if let Ok(path) = env::var("DWELLMAP_RECORD") {
        return Ok(ServiceContext::recording(config, &PathBuf::from(path)));
    }
    Ok(ServiceContext::live(config))
}
