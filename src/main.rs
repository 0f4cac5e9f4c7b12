//! jsontray
//!
//! A system tray icon whose menu is generated from a JSON file. Menu items
//! run shell commands; the menu is rebuilt whenever the file changes.

use anyhow::Result;
use clap::Parser;
use tracing::info;

mod cli;
mod command;
mod config;
mod crash;
mod error;
mod menu;
mod platform;
mod tray;
mod watcher;

use cli::Cli;

fn main() {
    let cli = Cli::parse();

    let Some(config_path) = cli.config.clone() else {
        println!("{}", Cli::usage());
        std::process::exit(1);
    };

    if cli.check {
        let _guard = init_console_logging(&cli);
        let valid = cli::check::run(&config_path);
        std::process::exit(if valid { 0 } else { 1 });
    }

    if let Err(e) = real_main(&cli, config_path) {
        tracing::error!(error = ?e, "Fatal startup error");
        show_startup_error(&format!("{:?}", e));
        std::process::exit(1);
    }
}

#[cfg(windows)]
fn show_startup_error(message: &str) {
    use std::ffi::OsStr;
    use std::os::windows::ffi::OsStrExt;

    let title = "jsontray - Startup Error";
    let full_message = format!("Failed to start jsontray:\n\n{}", message);

    let title_wide: Vec<u16> = OsStr::new(title).encode_wide().chain(Some(0)).collect();
    let message_wide: Vec<u16> = OsStr::new(&full_message)
        .encode_wide()
        .chain(Some(0))
        .collect();

    // MB_ICONERROR = 0x10, MB_SETFOREGROUND = 0x10000, MB_TOPMOST = 0x40000
    let flags: u32 = 0x10 | 0x10000 | 0x40000;

    unsafe {
        windows_sys::Win32::UI::WindowsAndMessaging::MessageBoxW(
            0,
            message_wide.as_ptr(),
            title_wide.as_ptr(),
            flags,
        );
    }
}

#[cfg(not(windows))]
fn show_startup_error(message: &str) {
    eprintln!("jsontray startup error: {}", message);
}

fn real_main(cli: &Cli, config_path: std::path::PathBuf) -> Result<()> {
    crash::install_panic_hook();

    // The tray doesn't need a console; commands it spawns get none either
    #[cfg(windows)]
    if !cli.console_log {
        unsafe {
            windows_sys::Win32::System::Console::FreeConsole();
        }
    }

    let _guard = if cli.console_log {
        init_console_logging(cli)
    } else {
        init_file_logging(cli)?
    };

    info!(version = env!("CARGO_PKG_VERSION"), "jsontray starting");

    cli::run::run(&config_path, cli.tray_options(config_path.clone()))
}

fn init_console_logging(cli: &Cli) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.as_str()));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();

    None
}

fn init_file_logging(cli: &Cli) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let log_dir = config::paths::log_dir()?;

    let file_appender = tracing_appender::rolling::Builder::new()
        .rotation(tracing_appender::rolling::Rotation::DAILY)
        .filename_prefix("jsontray")
        .filename_suffix("log")
        .max_log_files(10)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.as_str()));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .json()
                .with_writer(non_blocking),
        )
        .init();

    Ok(Some(guard))
}
