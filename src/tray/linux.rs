//! Tray implementation on top of `ksni` (StatusNotifierItem over D-Bus).
//!
//! `ksni` runs its own service thread; clicks and reloads come back to the
//! main thread over a channel, which plays the role of the UI loop.

use anyhow::Result;
use ksni::blocking::{Handle, TrayMethods};
use ksni::menu::{MenuItem, StandardItem, SubMenu};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::{decode_rgba, TrayController, TrayOptions, TraySurface};
use crate::config::TrayConfig;
use crate::error::{IconError, TrayError, TrayResult};
use crate::menu::{MenuEntry, MenuPlan};
use crate::watcher::{ConfigWatcher, ReloadSink};

/// Tray icon edge length in pixels
const TRAY_ICON_SIZE: u32 = 32;

/// Events handed to the main loop from other threads.
#[derive(Debug)]
pub enum AppEvent {
    /// Id of the clicked menu entry
    Menu(String),
    Reload(TrayConfig),
}

impl ReloadSink for mpsc::Sender<AppEvent> {
    fn deliver(&self, config: TrayConfig) -> bool {
        self.send(AppEvent::Reload(config)).is_ok()
    }
}

/// State published over D-Bus.
struct MenuTray {
    title: String,
    icon: Vec<ksni::Icon>,
    entries: Vec<MenuEntry>,
    /// PNG bytes per menu icon file stem
    menu_icons: HashMap<&'static str, Vec<u8>>,
    events: mpsc::Sender<AppEvent>,
}

impl ksni::Tray for MenuTray {
    fn id(&self) -> String {
        env!("CARGO_PKG_NAME").to_string()
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn icon_pixmap(&self) -> Vec<ksni::Icon> {
        self.icon.clone()
    }

    fn tool_tip(&self) -> ksni::ToolTip {
        ksni::ToolTip {
            icon_name: String::new(),
            icon_pixmap: vec![],
            title: self.title.clone(),
            description: String::new(),
        }
    }

    fn menu(&self) -> Vec<MenuItem<Self>> {
        self.entries.iter().map(|e| self.realize_entry(e)).collect()
    }
}

impl MenuTray {
    fn realize_entry(&self, entry: &MenuEntry) -> MenuItem<Self> {
        let icon_data = entry
            .icon
            .and_then(|icon| self.menu_icons.get(icon.file_stem))
            .cloned()
            .unwrap_or_default();

        if entry.is_submenu() {
            return SubMenu {
                label: entry.title.clone(),
                icon_data,
                submenu: entry
                    .children
                    .iter()
                    .map(|child| self.realize_entry(child))
                    .collect(),
                ..Default::default()
            }
            .into();
        }

        let id = entry.id.clone();
        StandardItem {
            label: entry.title.clone(),
            icon_data,
            activate: Box::new(move |tray: &mut MenuTray| {
                let _ = tray.events.send(AppEvent::Menu(id.clone()));
            }),
            ..Default::default()
        }
        .into()
    }
}

/// `ksni` service handle plus what is needed to publish a new menu.
struct IndicatorSurface {
    handle: Option<Handle<MenuTray>>,
    icon_dir: PathBuf,
    events: mpsc::Sender<AppEvent>,
}

impl TraySurface for IndicatorSurface {
    type Icon = ksni::Icon;

    fn load_icon(&self, path: &Path) -> Result<ksni::Icon, IconError> {
        let (mut data, width, height) = decode_rgba(path, TRAY_ICON_SIZE)?;

        // StatusNotifierItem pixmaps are ARGB
        for pixel in data.chunks_exact_mut(4) {
            pixel.rotate_right(1);
        }

        Ok(ksni::Icon {
            width: width as i32,
            height: height as i32,
            data,
        })
    }

    fn install(&mut self, icon: ksni::Icon, plan: &MenuPlan) -> TrayResult<()> {
        let menu_icons = load_menu_icons(plan, &self.icon_dir);

        match &self.handle {
            Some(handle) => handle
                .update(|tray: &mut MenuTray| {
                    tray.title = plan.title.clone();
                    tray.icon = vec![icon];
                    tray.entries = plan.entries.clone();
                    tray.menu_icons = menu_icons;
                })
                .ok_or(TrayError::Closed)?,
            None => {
                let tray = MenuTray {
                    title: plan.title.clone(),
                    icon: vec![icon],
                    entries: plan.entries.clone(),
                    menu_icons,
                    events: self.events.clone(),
                };
                self.handle = Some(tray.spawn()?);
            }
        }
        Ok(())
    }
}

/// Read the PNG file behind every icon the plan uses. Missing files are skipped.
fn load_menu_icons(plan: &MenuPlan, icon_dir: &Path) -> HashMap<&'static str, Vec<u8>> {
    fn walk(entries: &[MenuEntry], icon_dir: &Path, out: &mut HashMap<&'static str, Vec<u8>>) {
        for entry in entries {
            if let Some(icon) = entry.icon {
                if !out.contains_key(icon.file_stem) {
                    match std::fs::read(icon.path_in(icon_dir)) {
                        Ok(bytes) => {
                            out.insert(icon.file_stem, bytes);
                        }
                        Err(e) => debug!(icon = icon.name, error = %e, "Menu icon unavailable"),
                    }
                }
            }
            walk(&entry.children, icon_dir, out);
        }
    }

    let mut icons = HashMap::new();
    walk(&plan.entries, icon_dir, &mut icons);
    icons
}

/// Run the system tray application
pub fn run_tray(config: TrayConfig, options: TrayOptions) -> Result<()> {
    let (tx, rx) = mpsc::channel::<AppEvent>();

    // Lives as long as the event loop
    let _watch = ConfigWatcher::new(&options.config_path, options.debounce)?.spawn(tx.clone())?;

    let mut controller = TrayController::new(IndicatorSurface {
        handle: None,
        icon_dir: options.icon_dir.clone(),
        events: tx,
    });

    if let Err(e) = controller.setup(&config) {
        error!(error = %e, "Failed to set up tray");
    }

    info!("Starting tray event loop");
    for event in rx {
        match event {
            AppEvent::Menu(id) => controller.handle_click(&id),
            AppEvent::Reload(config) => {
                if let Err(e) = controller.setup(&config) {
                    warn!(error = %e, "Failed to apply reloaded configuration");
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MenuItemSpec;

    fn plan() -> MenuPlan {
        let items = vec![
            MenuItemSpec {
                title: "Home".to_string(),
                exec: "true".to_string(),
                icon: "HomeIcon".to_string(),
                items: vec![],
            },
            MenuItemSpec {
                title: "More".to_string(),
                exec: String::new(),
                icon: "FolderIcon".to_string(),
                items: vec![MenuItemSpec {
                    title: "Inner".to_string(),
                    exec: "true".to_string(),
                    icon: "HomeIcon".to_string(),
                    items: vec![],
                }],
            },
        ];
        MenuPlan::build("Tray", &items)
    }

    fn tray(events: mpsc::Sender<AppEvent>) -> MenuTray {
        let plan = plan();
        MenuTray {
            title: plan.title.clone(),
            icon: vec![],
            entries: plan.entries,
            menu_icons: HashMap::new(),
            events,
        }
    }

    #[test]
    fn test_menu_icons_skip_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let home = crate::menu::icons::lookup("HomeIcon").unwrap();
        std::fs::write(home.path_in(dir.path()), b"png-bytes").unwrap();

        let icons = load_menu_icons(&plan(), dir.path());

        assert_eq!(icons.len(), 1);
        assert_eq!(icons[home.file_stem], b"png-bytes");
    }

    #[test]
    fn test_menu_mirrors_plan() {
        let (tx, _rx) = mpsc::channel();
        let items = ksni::Tray::menu(&tray(tx));

        assert_eq!(items.len(), 2);
        match &items[1] {
            MenuItem::SubMenu(sub) => {
                assert_eq!(sub.label, "More");
                assert_eq!(sub.submenu.len(), 1);
            }
            _ => panic!("expected a submenu"),
        }
    }

    #[test]
    fn test_activate_sends_entry_id() {
        let (tx, rx) = mpsc::channel();
        let mut tray = tray(tx);
        let items = ksni::Tray::menu(&tray);

        let MenuItem::SubMenu(sub) = &items[1] else {
            panic!("expected a submenu");
        };
        let MenuItem::Standard(inner) = &sub.submenu[0] else {
            panic!("expected a standard item");
        };
        (inner.activate)(&mut tray);

        match rx.try_recv().unwrap() {
            AppEvent::Menu(id) => assert_eq!(id, "item-1.0"),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_tray_icon_is_argb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tray.png");
        image::RgbaImage::from_pixel(2, 2, image::Rgba([0, 0, 255, 255]))
            .save(&path)
            .unwrap();

        let (tx, _rx) = mpsc::channel();
        let surface = IndicatorSurface {
            handle: None,
            icon_dir: dir.path().to_path_buf(),
            events: tx,
        };
        let icon = surface.load_icon(&path).unwrap();

        assert_eq!((icon.width, icon.height), (32, 32));
        assert_eq!(&icon.data[..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_reload_sink_wraps_config() {
        let (tx, rx) = mpsc::channel();
        assert!(tx.deliver(TrayConfig::default()));
        assert!(matches!(rx.try_recv().unwrap(), AppEvent::Reload(_)));

        drop(rx);
        assert!(!tx.deliver(TrayConfig::default()));
    }
}
