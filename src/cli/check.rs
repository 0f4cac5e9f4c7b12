//! Check command - validate a config file without starting the tray.

use std::fmt::Write as _;
use std::path::Path;

use crate::config::{MenuItemSpec, TrayConfig};
use crate::menu::{icons, MenuPlan};

/// Findings about a loaded config.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CheckReport {
    pub entries: usize,
    pub depth: usize,
    pub commands: usize,
    pub unknown_icons: Vec<String>,
    /// Titles of items carrying both `exec` and `items`
    pub ambiguous: Vec<String>,
}

impl CheckReport {
    pub fn inspect(config: &TrayConfig) -> Self {
        let plan = MenuPlan::build(&config.title, &config.items);

        let mut report = Self {
            entries: plan.len(),
            depth: plan.depth(),
            commands: plan.actions().len(),
            ..Default::default()
        };
        report.walk(&config.items);
        report
    }

    fn walk(&mut self, items: &[MenuItemSpec]) {
        for item in items {
            if !item.icon.is_empty() && icons::lookup(&item.icon).is_none() {
                self.unknown_icons.push(item.icon.clone());
            }
            if item.is_ambiguous() {
                self.ambiguous.push(item.title.clone());
            }
            self.walk(&item.items);
        }
    }
}

/// Run the check and print a summary. Returns false for an invalid config.
pub fn run(path: &Path) -> bool {
    println!();
    println!("Validating configuration...");
    println!("Path: {}", path.display());
    println!();

    match TrayConfig::load(path) {
        Ok(config) => {
            print!("{}", render(&config, &CheckReport::inspect(&config)));
            true
        }
        Err(e) => {
            println!("ERROR: Configuration is invalid");
            println!();
            println!("Details: {}", e);
            println!();
            false
        }
    }
}

fn render(config: &TrayConfig, report: &CheckReport) -> String {
    let icon_path = config.icon_path();
    let mut out = String::new();

    let _ = writeln!(out, "Configuration is valid.");
    let _ = writeln!(out);
    let _ = writeln!(out, "Summary:");
    let _ = writeln!(out, "  Title: {}", config.title);
    let _ = writeln!(
        out,
        "  Tray icon: {} ({})",
        icon_path.display(),
        if icon_path.is_file() { "found" } else { "missing" }
    );
    if !config.icon.is_empty() && Path::new(&config.icon).is_relative() {
        let _ = writeln!(
            out,
            "    (relative icon paths resolve against the config file's directory, not the working directory)"
        );
    }
    let _ = writeln!(out, "  Entries: {}", report.entries);
    let _ = writeln!(out, "  Depth: {}", report.depth);
    let _ = writeln!(out, "  Commands: {}", report.commands);

    if !report.unknown_icons.is_empty() {
        let _ = writeln!(out, "  Unknown icons (shown without icon):");
        for name in &report.unknown_icons {
            let _ = writeln!(out, "    - {}", name);
        }
    }

    if !report.ambiguous.is_empty() {
        let _ = writeln!(out, "  Items with both exec and items (exec ignored):");
        for title in &report.ambiguous {
            let _ = writeln!(out, "    - {}", title);
        }
    }

    let _ = writeln!(out);
    out
}
