//! CLI definitions and handlers.

use clap::{CommandFactory, Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::paths;
use crate::tray::TrayOptions;
use crate::watcher;

pub mod check;
pub mod run;

/// System tray menu generated from a JSON file.
#[derive(Parser, Debug)]
#[command(name = "jsontray")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the JSON config file
    pub config: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info", env = "JSONTRAY_LOG_LEVEL")]
    pub log_level: LogLevel,

    /// Directory containing menu icon bitmaps (defaults to `icons` next to the executable)
    #[arg(long, env = "JSONTRAY_ICON_DIR")]
    pub icon_dir: Option<PathBuf>,

    /// Quiet period before a changed config file is reloaded, in milliseconds
    #[arg(
        long,
        default_value_t = watcher::DEFAULT_DEBOUNCE.as_millis() as u64,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub debounce_ms: u64,

    /// Log to the console instead of the log file
    #[arg(long)]
    pub console_log: bool,

    /// Validate the config file, print a summary and exit
    #[arg(long)]
    pub check: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl Cli {
    /// Tray settings for a given config path.
    pub fn tray_options(&self, config_path: PathBuf) -> TrayOptions {
        TrayOptions {
            config_path,
            icon_dir: self
                .icon_dir
                .clone()
                .unwrap_or_else(paths::default_icon_dir),
            debounce: Duration::from_millis(self.debounce_ms),
        }
    }

    /// One-line usage, printed when the config argument is missing.
    pub fn usage() -> String {
        Cli::command().render_usage().to_string()
    }
}
