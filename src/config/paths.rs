//! Path utilities for jsontray.
//!
//! Defines standard locations for logs and menu icons.

use std::path::PathBuf;

/// Base data directory.
///
/// On Windows: `%LOCALAPPDATA%\jsontray`
/// On macOS: `~/Library/Application Support/jsontray`
pub fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("jsontray"))
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".local")
                .join("share")
                .join("jsontray")
        })
}

/// Log directory, created on demand.
pub fn log_dir() -> std::io::Result<PathBuf> {
    let path = data_dir().join("logs");
    std::fs::create_dir_all(&path)?;
    Ok(path)
}

/// Directory holding the running executable.
pub fn executable_dir() -> std::io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    Ok(exe
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".")))
}

/// Default menu icon directory: `icons/` next to the executable.
pub fn default_icon_dir() -> PathBuf {
    executable_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("icons")
}
