//! Error types for jsontray.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while installing the tray icon and menu.
#[derive(Error, Debug)]
pub enum TrayError {
    #[error("Icon error: {0}")]
    Icon(#[from] IconError),

    #[cfg(any(windows, target_os = "macos"))]
    #[error("Tray icon error: {0}")]
    Native(#[from] tray_icon::Error),

    #[cfg(any(windows, target_os = "macos"))]
    #[error("Menu error: {0}")]
    Menu(#[from] tray_icon::menu::Error),

    #[cfg(not(any(windows, target_os = "macos")))]
    #[error("StatusNotifierItem error: {0}")]
    Indicator(#[from] ksni::Error),

    #[cfg(not(any(windows, target_os = "macos")))]
    #[error("Tray service is no longer running")]
    Closed,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum IconError {
    #[error("Failed to read icon {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode icon {path}: {message}")]
    Decode { path: PathBuf, message: String },

    #[error("Failed to create icon from {path}: {message}")]
    Build { path: PathBuf, message: String },
}

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Failed to execute command `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to wait for command `{program}`: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command `{program}` finished with error: {status}")]
    Exit {
        program: String,
        status: std::process::ExitStatus,
    },
}

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Cannot resolve watch path {path}: {source}")]
    Path {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to watch {path}: {source}")]
    Establish {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },
}

#[derive(Error, Debug)]
pub enum PathError {
    #[error("Failed to get home directory")]
    HomeDirUnavailable,
}

/// Result type alias for tray operations.
pub type TrayResult<T> = Result<T, TrayError>;
