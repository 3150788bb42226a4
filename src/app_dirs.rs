use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// `~/.local/state/vistrace`, falling back to the platform data dir
    pub fn state_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(PathBuf::from(home).join(".local").join("state").join("vistrace"))
        } else {
            ProjectDirs::from("", "", "vistrace").map(|dirs| dirs.data_local_dir().to_path_buf())
        }
    }

    pub fn log_path() -> Option<PathBuf> {
        Self::state_dir().map(|dir| dir.join("vistrace.log"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_lives_in_state_dir() {
        let (Some(state), Some(log)) = (AppDirs::state_dir(), AppDirs::log_path()) else {
            return;
        };
        assert_eq!(log.parent(), Some(state.as_path()));
        assert!(state.ends_with("vistrace"));
    }
}
