use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn settings_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "abacus-flash")
            .map(|proj_dirs| proj_dirs.config_dir().join("settings.json"))
    }

    pub fn log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("abacus-flash");
            Some(state_dir.join("abacus-flash.log"))
        } else {
            ProjectDirs::from("", "", "abacus-flash")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("abacus-flash.log"))
        }
    }
}
