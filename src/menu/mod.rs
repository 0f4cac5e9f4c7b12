//! Menu builder.
//!
//! Turns the config's item tree into a [`MenuPlan`]: a toolkit-neutral tree
//! with stable ids, resolved icons and bound commands. The tray realizes the
//! plan into native menu items and dispatches clicks through
//! [`MenuPlan::actions`].

use std::collections::HashMap;
use tracing::{debug, warn};

use crate::config::MenuItemSpec;

pub mod icons;

use icons::ThemeIcon;

/// Id prefix for all generated entries.
const ID_PREFIX: &str = "item-";

/// Planned root menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuPlan {
    pub title: String,
    pub entries: Vec<MenuEntry>,
}

/// One planned menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    /// Index path of the entry, e.g. `item-1.0`
    pub id: String,
    pub title: String,
    pub icon: Option<&'static ThemeIcon>,
    /// Command template run on click. Never set for entries with children.
    pub action: Option<String>,
    pub children: Vec<MenuEntry>,
}

impl MenuEntry {
    pub fn is_submenu(&self) -> bool {
        !self.children.is_empty()
    }
}

impl MenuPlan {
    /// Build the plan for a root menu.
    pub fn build(title: &str, items: &[MenuItemSpec]) -> Self {
        let entries = build_entries(items, ID_PREFIX);
        debug!(title = %title, entries = entries.len(), "Menu plan built");

        Self {
            title: title.to_string(),
            entries,
        }
    }

    /// Click dispatch table: entry id to command template.
    pub fn actions(&self) -> HashMap<String, String> {
        let mut actions = HashMap::new();
        collect_actions(&self.entries, &mut actions);
        actions
    }

    /// Number of entries in the whole tree.
    pub fn len(&self) -> usize {
        fn count(entries: &[MenuEntry]) -> usize {
            entries.iter().map(|e| 1 + count(&e.children)).sum()
        }
        count(&self.entries)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Nesting depth; 0 for an empty menu.
    pub fn depth(&self) -> usize {
        fn depth(entries: &[MenuEntry]) -> usize {
            entries
                .iter()
                .map(|e| 1 + depth(&e.children))
                .max()
                .unwrap_or(0)
        }
        depth(&self.entries)
    }
}

fn build_entries(items: &[MenuItemSpec], prefix: &str) -> Vec<MenuEntry> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let id = format!("{prefix}{index}");

            let icon = if item.icon.is_empty() {
                None
            } else {
                let icon = icons::lookup(&item.icon);
                if icon.is_none() {
                    debug!(title = %item.title, icon = %item.icon, "Unknown icon name");
                }
                icon
            };

            let children = build_entries(&item.items, &format!("{id}."));

            if item.is_ambiguous() {
                warn!(
                    title = %item.title,
                    exec = %item.exec,
                    "Menu item has both exec and items; the submenu takes precedence"
                );
            }

            let action = if children.is_empty() && !item.exec.is_empty() {
                Some(item.exec.clone())
            } else {
                None
            };

            MenuEntry {
                id,
                title: item.title.clone(),
                icon,
                action,
                children,
            }
        })
        .collect()
}

fn collect_actions(entries: &[MenuEntry], actions: &mut HashMap<String, String>) {
    for entry in entries {
        if let Some(action) = &entry.action {
            actions.insert(entry.id.clone(), action.clone());
        }
        collect_actions(&entry.children, actions);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrayConfig;
    use std::collections::HashSet;

    fn item(title: &str, exec: &str, icon: &str, items: Vec<MenuItemSpec>) -> MenuItemSpec {
        MenuItemSpec {
            title: title.into(),
            exec: exec.into(),
            icon: icon.into(),
            items,
        }
    }

    fn leaf(title: &str, exec: &str) -> MenuItemSpec {
        item(title, exec, "", Vec::new())
    }

    /// Same titles, order and nesting.
    fn assert_same_shape(items: &[MenuItemSpec], entries: &[MenuEntry]) {
        assert_eq!(items.len(), entries.len());
        for (item, entry) in items.iter().zip(entries) {
            assert_eq!(item.title, entry.title);
            assert_same_shape(&item.items, &entry.children);
        }
    }

    fn sample_items() -> Vec<MenuItemSpec> {
        vec![
            leaf("Open", "xdg-open _HOMEPATH"),
            item(
                "Tools",
                "",
                "SettingsIcon",
                vec![
                    leaf("Build", "make"),
                    item("More", "", "", vec![leaf("Deep", "true"), leaf("Noop", "")]),
                ],
            ),
            leaf("Quit", "EXIT"),
        ]
    }

    #[test]
    fn test_shape_preserved() {
        let items = sample_items();
        let plan = MenuPlan::build("Root", &items);

        assert_eq!(plan.title, "Root");
        assert_same_shape(&items, &plan.entries);
        assert_eq!(plan.len(), 7);
        assert_eq!(plan.depth(), 3);
    }

    #[test]
    fn test_shape_preserved_for_parsed_config() {
        let config = TrayConfig::from_json(
            r#"{ "title": "T", "items": [
                { "title": "a", "items": [ { "title": "b" }, { "title": "c", "items": [ { "title": "d" } ] } ] },
                { "title": "e" }
            ] }"#,
        )
        .unwrap();

        let plan = MenuPlan::build(&config.title, &config.items);
        assert_same_shape(&config.items, &plan.entries);
        assert_eq!(plan.len(), config.entry_count());
    }

    #[test]
    fn test_ids_unique_and_path_based() {
        let plan = MenuPlan::build("Root", &sample_items());

        let mut ids = HashSet::new();
        fn walk(entries: &[MenuEntry], ids: &mut HashSet<String>) {
            for e in entries {
                assert!(ids.insert(e.id.clone()), "duplicate id {}", e.id);
                walk(&e.children, ids);
            }
        }
        walk(&plan.entries, &mut ids);

        assert_eq!(ids.len(), plan.len());
        assert_eq!(plan.entries[1].children[1].children[0].id, "item-1.1.0");
    }

    #[test]
    fn test_actions_bound_for_non_empty_exec() {
        let plan = MenuPlan::build("Root", &sample_items());
        let actions = plan.actions();

        assert_eq!(actions.len(), 4);
        assert_eq!(actions["item-0"], "xdg-open _HOMEPATH");
        assert_eq!(actions["item-1.0"], "make");
        assert_eq!(actions["item-2"], "EXIT");
        // Empty exec is a no-op item
        assert!(!actions.contains_key("item-1.1.1"));
        assert!(plan.entries[1].children[1].children[1].action.is_none());
    }

    #[test]
    fn test_submenu_takes_precedence_over_exec() {
        let items = vec![item("Both", "echo parent", "", vec![leaf("Child", "echo child")])];
        let plan = MenuPlan::build("Root", &items);

        let entry = &plan.entries[0];
        assert!(entry.is_submenu());
        assert!(entry.action.is_none());
        assert_eq!(plan.actions().len(), 1);
        assert_eq!(plan.actions()["item-0.0"], "echo child");
    }

    #[test]
    fn test_icons_resolved_silently() {
        let items = vec![
            item("Known", "", "HomeIcon", Vec::new()),
            item("Unknown", "", "NotAnIcon", Vec::new()),
            item("None", "", "", Vec::new()),
        ];
        let plan = MenuPlan::build("Root", &items);

        assert_eq!(plan.entries[0].icon.map(|i| i.file_stem), Some("home"));
        assert!(plan.entries[1].icon.is_none());
        assert!(plan.entries[2].icon.is_none());
    }

    #[test]
    fn test_empty_menu() {
        let plan = MenuPlan::build("", &[]);
        assert!(plan.is_empty());
        assert_eq!(plan.depth(), 0);
        assert!(plan.actions().is_empty());
    }
}
