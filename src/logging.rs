//! File logging. The terminal belongs to the UI, so events go to a file in
//! the state directory. `VISTRACE_LOG` takes an `EnvFilter` directive.

use crate::app_dirs::AppDirs;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "VISTRACE_LOG";
const DEFAULT_FILTER: &str = "vistrace=info";

pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn open_log(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber writing to `path`, or the default log
/// location. Returns the file in use; logging stays off if it cannot be
/// opened or a subscriber is already installed.
pub fn init(path: Option<PathBuf>) -> Option<PathBuf> {
    let path = path.or_else(AppDirs::log_path)?;
    let file = match open_log(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("vistrace: logging disabled, cannot open {}: {e}", path.display());
            return None;
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .ok()?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "logging started");
    Some(path)
}
