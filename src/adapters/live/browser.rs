//! Live browser adapter that hands files to the platform opener.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::ports::{Browser, PortError};

/// Opens files with `open` (macOS), `cmd /C start` (Windows) or
/// `xdg-open` (everything else).
pub struct LiveBrowser;

impl LiveBrowser {
    fn command(path: &Path) -> Command {
        let mut cmd = if cfg!(target_os = "macos") {
            Command::new("open")
        } else if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", ""]);
            cmd
        } else {
            Command::new("xdg-open")
        };
        cmd.arg(path).stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::null());
        cmd
    }
}

impl Browser for LiveBrowser {
    fn open(&self, path: &Path) -> Result<(), PortError> {
        Self::command(path)
            .spawn()
            .map(drop)
            .map_err(|e| format!("failed to open {} in a browser: {e}", path.display()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_passes_path_last() {
        let cmd = LiveBrowser::command(Path::new("map.html"));
        let last = cmd.get_args().last().map(|a| a.to_string_lossy().into_owned());
        assert_eq!(last.as_deref(), Some("map.html"));
    }
}
