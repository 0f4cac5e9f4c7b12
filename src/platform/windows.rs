//! Windows hooks: no console window for spawned commands.

use std::os::windows::process::CommandExt;
use std::process::Command;

use windows_sys::Win32::System::Threading::CREATE_NO_WINDOW;

use super::Platform;

#[derive(Debug, Clone, Copy, Default)]
pub struct Native;

impl Platform for Native {
    fn configure_command(&self, command: &mut Command) {
        command.creation_flags(CREATE_NO_WINDOW);
    }

    fn hide_dock_icon(&self) {}
}
