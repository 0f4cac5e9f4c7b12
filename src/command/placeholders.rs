//! Path placeholders available to command templates.

use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::PathError;

pub const CURRENT_PATH: &str = "_CURRENTPATH";
pub const PARENT_PATH: &str = "_PARENTPATH";
pub const HOME_PATH: &str = "_HOMEPATH";
pub const LOCAL_DATA: &str = "_LOCALDATA";

/// Resolved values for every placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathContext {
    /// Directory containing the running executable
    pub current: PathBuf,
    /// Parent of `current`
    pub parent: PathBuf,
    pub home: PathBuf,
    /// `%LOCALAPPDATA%` on Windows, home elsewhere
    pub local_data: PathBuf,
}

impl PathContext {
    /// Resolve all paths for this process.
    pub fn resolve() -> Result<Self, PathError> {
        let current = match std::env::current_exe() {
            Ok(exe) => exe
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
            Err(e) => {
                warn!(error = %e, "Failed to get executable path");
                PathBuf::from(".")
            }
        };

        let home = dirs::home_dir().ok_or(PathError::HomeDirUnavailable)?;
        let local_data = local_data_dir(&home, std::env::var_os("LOCALAPPDATA"));

        Ok(Self::new(current, home, local_data))
    }

    pub fn new(current: PathBuf, home: PathBuf, local_data: PathBuf) -> Self {
        let parent = current
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| current.clone());

        Self {
            current,
            parent,
            home,
            local_data,
        }
    }

    /// Replace every placeholder in `template` with its double-quoted path.
    pub fn expand(&self, template: &str) -> String {
        [
            (CURRENT_PATH, &self.current),
            (PARENT_PATH, &self.parent),
            (HOME_PATH, &self.home),
            (LOCAL_DATA, &self.local_data),
        ]
        .into_iter()
        .fold(template.to_string(), |command, (token, path)| {
            command.replace(token, &format!("\"{}\"", path.display()))
        })
    }
}

/// Directory substituted for `_LOCALDATA`.
#[cfg(windows)]
fn local_data_dir(home: &Path, local_app_data: Option<std::ffi::OsString>) -> PathBuf {
    local_app_data
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| home.join("AppData").join("Local"))
}

#[cfg(not(windows))]
fn local_data_dir(home: &Path, _local_app_data: Option<std::ffi::OsString>) -> PathBuf {
    home.to_path_buf()
}
