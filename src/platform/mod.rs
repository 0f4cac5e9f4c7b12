//! Per-platform hooks.
//!
//! Each target provides a `Native` type implementing [`Platform`]; the right
//! one is picked at compile time.

use std::process::Command;
use std::time::Duration;

#[cfg(windows)]
mod windows;
#[cfg(windows)]
pub use windows::Native;

#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "macos")]
pub use macos::Native;

#[cfg(not(any(windows, target_os = "macos")))]
mod other;
#[cfg(not(any(windows, target_os = "macos")))]
pub use other::Native;

/// Delay between startup and hiding the Dock icon.
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
pub const DOCK_POLICY_DELAY: Duration = Duration::from_millis(200);

pub trait Platform {
    /// Apply spawn flags to a child process before it starts.
    fn configure_command(&self, command: &mut Command);

    /// Remove the app from the Dock and app switcher. Must run on the UI thread.
    #[cfg_attr(not(target_os = "macos"), allow(dead_code))]
    fn hide_dock_icon(&self);
}

/// Hooks for the platform this binary was built for.
pub fn native() -> Native {
    Native
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configure_command_keeps_program_and_args() {
        let mut command = Command::new("echo");
        command.arg("hello");
        native().configure_command(&mut command);

        assert_eq!(command.get_program(), "echo");
        assert_eq!(command.get_args().collect::<Vec<_>>(), vec!["hello"]);
    }
}
