//! Crash reporting and panic handling.

use std::backtrace::Backtrace;
use std::fs;
use std::panic::PanicHookInfo;

use crate::config::paths;

/// Install the panic hook for crash reporting.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|panic_info| {
        handle_panic(panic_info);
    }));
}

fn handle_panic(panic_info: &PanicHookInfo) {
    let backtrace = Backtrace::force_capture();

    let report = build_crash_report(panic_info, &backtrace);
    let crash_file = write_crash_report(&report);

    tracing::error!(crash_file = ?crash_file, "jsontray panicked");

    eprintln!("jsontray crashed!");
    if let Some(f) = crash_file {
        eprintln!("Crash report saved to: {}", f);
    }
}

fn panic_message(panic_info: &PanicHookInfo) -> String {
    if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

fn build_crash_report(panic_info: &PanicHookInfo, backtrace: &Backtrace) -> String {
    let location = panic_info
        .location()
        .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()))
        .unwrap_or_else(|| "unknown location".to_string());

    format_report(&panic_message(panic_info), &location, &backtrace.to_string())
}

fn format_report(message: &str, location: &str, backtrace: &str) -> String {
    let version = env!("CARGO_PKG_VERSION");
    let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
    let os_info = format!("{} {}", std::env::consts::OS, std::env::consts::ARCH);

    format!(
        r#"jsontray Crash Report
=====================

Version: {version}
Timestamp: {timestamp}
OS: {os_info}

Panic Message:
{message}

Location:
{location}

Backtrace:
{backtrace}
"#
    )
}

fn write_crash_report(report: &str) -> Option<String> {
    let log_dir = paths::log_dir().ok()?;

    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let filename = format!("crash_{}.txt", timestamp);
    let path = log_dir.join(&filename);

    fs::write(&path, report).ok()?;
    Some(path.display().to_string())
}
