//! Where the demo keeps its config and logs.
//!
//! Follows the platform conventions picked by `directories`: XDG on Linux,
//! `~/Library` on macOS, `AppData` on Windows.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

const LATEST_LOG: &str = "latest.log";
const KEEP_ARCHIVED_LOGS: usize = 10;

fn dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "trellis", "trellis-demo")
}

/// `trellis.json` in the platform config dir, e.g.
/// `~/.config/trellis-demo/trellis.json` on Linux.
pub fn config_file() -> Option<PathBuf> {
    dirs().map(|d| d.config_dir().join("trellis.json"))
}

/// `latest.log` in the platform cache dir, e.g. `~/.cache/trellis-demo`.
pub fn log_file() -> Option<PathBuf> {
    dirs().map(|d| d.cache_dir().join(LATEST_LOG))
}

/// Archive the previous run's log under a timestamp and drop the oldest
/// archives. Call before opening a fresh `latest.log`.
pub fn rotate_logs() {
    let Some(latest) = log_file() else { return };
    let Some(dir) = latest.parent() else { return };

    if latest.exists() {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let _ = fs::rename(&latest, dir.join(format!("{stamp}.log")));
    }
    prune_archives(dir);
}

/// Archive names are timestamps, so name order is age order.
fn prune_archives(dir: &Path) {
    let Ok(entries) = fs::read_dir(dir) else { return };
    let mut archives: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension().is_some_and(|ext| ext == "log")
                && path.file_name().is_some_and(|name| name != LATEST_LOG)
        })
        .collect();
    archives.sort();

    let excess = archives.len().saturating_sub(KEEP_ARCHIVED_LOGS);
    for path in archives.drain(..excess) {
        let _ = fs::remove_file(path);
    }
}
