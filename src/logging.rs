use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "ABACUS_FLASH_LOG";
const DEFAULT_DIRECTIVE: &str = "abacus_flash=info";

/// Build the filter from `ABACUS_FLASH_LOG`, falling back to info for this crate.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Route logs to a file; stdout belongs to the terminal UI.
///
/// Returns false when the file cannot be opened, in which case nothing is logged.
pub fn init_file_logging(path: &Path) -> bool {
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return false;
        }
    }
    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => file,
        Err(_) => return false,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .is_ok()
}
