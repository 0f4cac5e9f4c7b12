//! System tray controller.
//!
//! Owns the UI event loop, installs the menu and icon built from a
//! [`TrayConfig`] and swaps them out whenever the watcher delivers a new one.
//! Windows and macOS use `tray-icon` on a `winit` loop; everything else
//! publishes a StatusNotifierItem through `ksni`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::command;
use crate::config::TrayConfig;
use crate::error::{IconError, TrayResult};
use crate::menu::MenuPlan;

#[cfg(any(windows, target_os = "macos"))]
mod native;
#[cfg(any(windows, target_os = "macos"))]
pub use native::run_tray;

#[cfg(not(any(windows, target_os = "macos")))]
mod linux;
#[cfg(not(any(windows, target_os = "macos")))]
pub use linux::run_tray;

/// Settings for a tray run that do not come from the JSON file.
#[derive(Debug, Clone)]
pub struct TrayOptions {
    /// Path the config was loaded from; watched for changes
    pub config_path: PathBuf,
    /// Where menu icon bitmaps live
    pub icon_dir: PathBuf,
    pub debounce: Duration,
}

/// A toolkit's tray icon and menu.
pub trait TraySurface {
    type Icon;

    /// Decode the tray icon. Must not touch what is currently shown.
    fn load_icon(&self, path: &Path) -> Result<Self::Icon, IconError>;

    /// Show `icon` and `plan`, replacing whatever is live.
    ///
    /// On error the previous icon and menu must still be the ones shown.
    fn install(&mut self, icon: Self::Icon, plan: &MenuPlan) -> TrayResult<()>;
}

/// Keeps the shown menu and the click dispatch table in step.
pub struct TrayController<S> {
    surface: S,
    /// Menu entry id to command template
    actions: HashMap<String, String>,
}

impl<S: TraySurface> TrayController<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            actions: HashMap::new(),
        }
    }

    /// Install menu and icon for `config`.
    ///
    /// The icon is loaded first; if that or the install fails nothing changes.
    pub fn setup(&mut self, config: &TrayConfig) -> TrayResult<()> {
        let icon = self.surface.load_icon(&config.icon_path())?;

        let plan = MenuPlan::build(&config.title, &config.items);
        if plan.is_empty() {
            warn!(path = %config.path.display(), "Configuration has no menu items");
        }

        self.surface.install(icon, &plan)?;
        self.actions = plan.actions();

        info!(
            title = %config.title,
            entries = plan.len(),
            commands = self.actions.len(),
            "Tray menu installed"
        );
        Ok(())
    }

    /// Command bound to a menu entry.
    pub fn action(&self, id: &str) -> Option<&str> {
        self.actions.get(id).map(String::as_str)
    }

    pub fn handle_click(&self, id: &str) {
        match self.action(id) {
            Some(template) => {
                debug!(id = %id, "Menu item clicked");
                command::execute(template);
            }
            None => debug!(id = %id, "Menu item without command"),
        }
    }

    #[cfg(test)]
    fn surface(&self) -> &S {
        &self.surface
    }
}

/// Decode an image file into square RGBA pixels.
pub(crate) fn decode_rgba(path: &Path, size: u32) -> Result<(Vec<u8>, u32, u32), IconError> {
    let bytes = std::fs::read(path).map_err(|source| IconError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let img = image::load_from_memory(&bytes).map_err(|e| IconError::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let img = img.resize_exact(size, size, image::imageops::FilterType::Lanczos3);
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok((rgba.into_raw(), width, height))
}
