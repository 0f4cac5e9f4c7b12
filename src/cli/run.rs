//! Run command - load the config and hand it to the tray.

use anyhow::{Context, Result};
use tracing::info;

use crate::config::TrayConfig;
use crate::tray::{self, TrayOptions};

/// Load the config and run the tray until the process exits.
///
/// A config that cannot be loaded here is fatal; later reload failures are not.
pub fn run(config: &std::path::Path, options: TrayOptions) -> Result<()> {
    let tray_config = TrayConfig::load(config).context("Failed to set up tray")?;

    info!(
        config_path = %config.display(),
        title = %tray_config.title,
        entries = tray_config.entry_count(),
        icon_dir = %options.icon_dir.display(),
        "Configuration loaded"
    );

    tray::run_tray(tray_config, options)
}
