use std::process::Command;

use super::Platform;

#[derive(Debug, Clone, Copy, Default)]
pub struct Native;

impl Platform for Native {
    fn configure_command(&self, _command: &mut Command) {}

    fn hide_dock_icon(&self) {}
}
