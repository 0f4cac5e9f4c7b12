//! Command execution for menu clicks.
//!
//! A command template goes through three steps: sentinel check (`""` and
//! `"EXIT"`), placeholder expansion, and interpreter selection. The child is
//! waited on; failures are logged and never reach the caller.

use std::process::Command;
use tracing::{debug, error, info, warn};

use crate::error::CommandError;
use crate::platform::{self, Platform};

pub mod placeholders;

pub use placeholders::PathContext;

/// Template value that quits the tray.
pub const EXIT_SENTINEL: &str = "EXIT";

/// What a raw template asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation<'a> {
    Nothing,
    Exit,
    Run(&'a str),
}

impl<'a> Invocation<'a> {
    pub fn classify(template: &'a str) -> Self {
        match template {
            "" => Invocation::Nothing,
            EXIT_SENTINEL => Invocation::Exit,
            other => Invocation::Run(other),
        }
    }
}

/// Interpreter family used to run expanded commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    /// `powershell -ExecutionPolicy Bypass`
    PowerShell,
    /// `sh -c`
    Posix,
}

impl Shell {
    /// Interpreter for the platform this binary was built for.
    pub fn native() -> Self {
        if cfg!(windows) {
            Shell::PowerShell
        } else {
            Shell::Posix
        }
    }

    /// Program and arguments that run `command` through this shell.
    pub fn invocation(&self, command: &str) -> ShellCommand {
        match self {
            Shell::PowerShell => {
                let command = match command.strip_suffix(".sh") {
                    Some(stem) => format!("{stem}.ps1"),
                    None => command.to_string(),
                };
                let mode = if command.ends_with(".ps1") {
                    "-File"
                } else {
                    "-Command"
                };
                ShellCommand::new(
                    "powershell",
                    ["-ExecutionPolicy", "Bypass", mode, command.as_str()],
                )
            }
            Shell::Posix => ShellCommand::new("sh", ["-c", command]),
        }
    }
}

/// A fully resolved child process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ShellCommand {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Start the child and block until it exits.
    pub fn run(&self, platform: &impl Platform) -> Result<(), CommandError> {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        platform.configure_command(&mut command);

        let mut child = command.spawn().map_err(|source| CommandError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        let status = child.wait().map_err(|source| CommandError::Wait {
            program: self.program.clone(),
            source,
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(CommandError::Exit {
                program: self.program.clone(),
                status,
            })
        }
    }
}

/// Run a menu command template.
///
/// Exits the process for `"EXIT"` and when the home directory cannot be found.
pub fn execute(template: &str) {
    let command = match Invocation::classify(template) {
        Invocation::Nothing => return,
        Invocation::Exit => {
            info!("Exit requested from menu");
            std::process::exit(0);
        }
        Invocation::Run(command) => command,
    };

    let paths = match PathContext::resolve() {
        Ok(paths) => paths,
        Err(e) => {
            error!(error = %e, "Cannot expand command placeholders");
            std::process::exit(1);
        }
    };

    let expanded = paths.expand(command);
    let shell_command = Shell::native().invocation(&expanded);
    debug!(
        program = %shell_command.program,
        args = ?shell_command.args,
        "Running menu command"
    );

    match shell_command.run(&platform::native()) {
        Ok(()) => debug!(command = %expanded, "Command finished"),
        Err(e @ CommandError::Exit { .. }) => warn!(error = %e, command = %expanded, "Command failed"),
        Err(e) => error!(error = %e, command = %expanded, "Failed to execute command"),
    }
}
