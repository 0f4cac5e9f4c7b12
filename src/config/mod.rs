//! Tray configuration loaded from the user's JSON file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub mod paths;

/// Root of the JSON document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrayConfig {
    /// Path to the config file (set after loading)
    #[serde(skip)]
    pub path: PathBuf,

    /// Path to the tray icon image
    #[serde(default)]
    pub icon: String,

    /// Root menu title, shown as the tray tooltip
    #[serde(default)]
    pub title: String,

    /// Top-level menu entries
    #[serde(default)]
    pub items: Vec<MenuItemSpec>,
}

/// A single menu entry, possibly with a submenu.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItemSpec {
    #[serde(default)]
    pub title: String,

    /// Command template run on click
    #[serde(default)]
    pub exec: String,

    /// Symbolic icon name, see [`crate::menu::icons`]
    #[serde(default)]
    pub icon: String,

    #[serde(default)]
    pub items: Vec<MenuItemSpec>,
}

impl TrayConfig {
    /// Read and parse the config file. Always hits the disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::from_json(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.path = path.to_path_buf();

        Ok(config)
    }

    /// Parse a config document without touching the filesystem.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Tray icon location. Relative paths are taken from the config file's directory.
    pub fn icon_path(&self) -> PathBuf {
        let icon = Path::new(&self.icon);
        if icon.is_absolute() {
            return icon.to_path_buf();
        }

        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.join(icon),
            _ => icon.to_path_buf(),
        }
    }

    /// Total number of entries in the menu tree.
    pub fn entry_count(&self) -> usize {
        fn count(items: &[MenuItemSpec]) -> usize {
            items.iter().map(|i| 1 + count(&i.items)).sum()
        }
        count(&self.items)
    }
}

impl MenuItemSpec {
    pub fn has_children(&self) -> bool {
        !self.items.is_empty()
    }

    /// Both a command and a submenu are set; the submenu wins.
    pub fn is_ambiguous(&self) -> bool {
        !self.exec.is_empty() && self.has_children()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "icon": "icon.png",
        "title": "Tools",
        "items": [
            { "title": "Terminal", "exec": "xterm", "icon": "ComputerIcon" },
            { "title": "Scripts", "items": [
                { "title": "Backup", "exec": "_HOMEPATH/backup.sh" },
                { "title": "Deep", "items": [ { "title": "Leaf" } ] }
            ]},
            { "title": "Quit", "exec": "EXIT" }
        ]
    }"#;

    #[test]
    fn test_parse_sample() {
        let config = TrayConfig::from_json(SAMPLE).unwrap();

        assert_eq!(config.title, "Tools");
        assert_eq!(config.items.len(), 3);
        assert_eq!(config.items[0].icon, "ComputerIcon");
        assert_eq!(config.items[1].items[1].items[0].title, "Leaf");
        assert_eq!(config.items[2].exec, "EXIT");
        assert_eq!(config.entry_count(), 6);
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let config = TrayConfig::from_json(r#"{ "items": [ { "title": "Only" } ] }"#).unwrap();

        assert!(config.icon.is_empty());
        assert!(config.title.is_empty());
        let item = &config.items[0];
        assert!(item.exec.is_empty());
        assert!(item.icon.is_empty());
        assert!(!item.has_children());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let config =
            TrayConfig::from_json(r#"{ "title": "T", "tooltip": "x", "items": [] }"#).unwrap();
        assert_eq!(config.title, "T");
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TrayConfig::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_malformed_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tray.json");

        std::fs::write(&path, "{ \"title\": ").unwrap();
        let err = TrayConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));

        // Valid JSON, wrong shape
        std::fs::write(&path, r#"{ "items": "not a list" }"#).unwrap();
        let err = TrayConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_rereads_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tray.json");

        std::fs::write(&path, r#"{ "title": "first" }"#).unwrap();
        assert_eq!(TrayConfig::load(&path).unwrap().title, "first");

        std::fs::write(&path, r#"{ "title": "second" }"#).unwrap();
        let config = TrayConfig::load(&path).unwrap();
        assert_eq!(config.title, "second");
        assert_eq!(config.path, path);
    }

    #[test]
    fn test_icon_path_relative_to_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tray.json");
        std::fs::write(&path, r#"{ "icon": "assets/tray.png" }"#).unwrap();

        let config = TrayConfig::load(&path).unwrap();
        assert_eq!(config.icon_path(), dir.path().join("assets/tray.png"));

        let absolute = dir.path().join("elsewhere.png");
        let config = TrayConfig {
            icon: absolute.display().to_string(),
            ..config
        };
        assert_eq!(config.icon_path(), absolute);
    }

    #[test]
    fn test_ambiguous_item() {
        let item = MenuItemSpec {
            title: "Both".into(),
            exec: "echo hi".into(),
            items: vec![MenuItemSpec::default()],
            ..Default::default()
        };
        assert!(item.is_ambiguous());
        assert!(!MenuItemSpec::default().is_ambiguous());
    }
}
