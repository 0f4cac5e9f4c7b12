//! macOS hooks: run as an accessory app so only the menu bar icon shows.

use std::process::Command;

use objc2::MainThreadMarker;
use objc2_app_kit::{NSApplication, NSApplicationActivationPolicy};
use tracing::{info, warn};

use super::Platform;

#[derive(Debug, Clone, Copy, Default)]
pub struct Native;

impl Platform for Native {
    fn configure_command(&self, _command: &mut Command) {}

    fn hide_dock_icon(&self) {
        let Some(mtm) = MainThreadMarker::new() else {
            warn!("Activation policy can only be set from the main thread");
            return;
        };

        info!("Setting activation policy to accessory");
        let app = NSApplication::sharedApplication(mtm);
        if !app.setActivationPolicy(NSApplicationActivationPolicy::Accessory) {
            warn!("NSApplication rejected the accessory activation policy");
        }
    }
}
