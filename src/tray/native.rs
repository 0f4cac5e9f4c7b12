//! Tray implementation on top of `tray-icon` and `winit`.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use tray_icon::{
    menu::{IconMenuItem, IsMenuItem, Menu, MenuEvent, MenuItem, Submenu},
    TrayIcon, TrayIconBuilder,
};
use winit::application::ApplicationHandler;
use winit::event::{StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy};
use winit::window::WindowId;

use super::{decode_rgba, TrayController, TrayOptions, TraySurface};
use crate::config::TrayConfig;
use crate::error::{IconError, TrayResult};
use crate::menu::{icons::ThemeIcon, MenuEntry, MenuPlan};
use crate::platform::{self, Platform};
use crate::watcher::{ConfigWatcher, ReloadSink};

/// Tray icon edge length in pixels
const TRAY_ICON_SIZE: u32 = 32;
/// Menu item icon edge length in pixels
const MENU_ICON_SIZE: u32 = 16;

/// Events handed to the UI loop from other threads.
#[derive(Debug)]
pub enum AppEvent {
    Menu(MenuEvent),
    Reload(TrayConfig),
    HideDockIcon,
}

impl ReloadSink for EventLoopProxy<AppEvent> {
    fn deliver(&self, config: TrayConfig) -> bool {
        self.send_event(AppEvent::Reload(config)).is_ok()
    }
}

/// `tray-icon` handle plus what is needed to build menus for it.
struct NativeSurface {
    tray_icon: Option<TrayIcon>,
    icon_dir: PathBuf,
}

impl TraySurface for NativeSurface {
    type Icon = tray_icon::Icon;

    fn load_icon(&self, path: &Path) -> Result<tray_icon::Icon, IconError> {
        load_tray_icon(path)
    }

    fn install(&mut self, icon: tray_icon::Icon, plan: &MenuPlan) -> TrayResult<()> {
        let menu = realize_menu(plan, &self.icon_dir)?;

        match &self.tray_icon {
            Some(tray_icon) => {
                // Only fallible step; nothing is swapped if it fails
                tray_icon.set_icon(Some(icon))?;
                tray_icon.set_menu(Some(Box::new(menu)));
                if let Err(e) = tray_icon.set_tooltip(Some(&plan.title)) {
                    warn!(error = %e, "Failed to update tray tooltip");
                }
            }
            None => {
                let tray_icon = TrayIconBuilder::new()
                    .with_menu(Box::new(menu))
                    .with_tooltip(&plan.title)
                    .with_icon(icon)
                    .build()?;
                self.tray_icon = Some(tray_icon);
            }
        }
        Ok(())
    }
}

/// Application state for the tray icon
struct TrayApp {
    controller: TrayController<NativeSurface>,
    /// Config waiting for the loop to start
    initial: Option<TrayConfig>,
    #[cfg_attr(not(target_os = "macos"), allow(dead_code))]
    proxy: EventLoopProxy<AppEvent>,
}

impl TrayApp {
    fn new(config: TrayConfig, options: &TrayOptions, proxy: EventLoopProxy<AppEvent>) -> Self {
        let surface = NativeSurface {
            tray_icon: None,
            icon_dir: options.icon_dir.clone(),
        };

        Self {
            controller: TrayController::new(surface),
            initial: Some(config),
            proxy,
        }
    }

    #[cfg(target_os = "macos")]
    fn schedule_dock_policy(&self) {
        let proxy = self.proxy.clone();
        std::thread::spawn(move || {
            std::thread::sleep(platform::DOCK_POLICY_DELAY);
            let _ = proxy.send_event(AppEvent::HideDockIcon);
        });
    }

    #[cfg(not(target_os = "macos"))]
    fn schedule_dock_policy(&self) {}
}

impl ApplicationHandler<AppEvent> for TrayApp {
    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: StartCause) {
        // Tray icons must be created once the loop is actually running
        if cause != StartCause::Init {
            return;
        }

        if let Some(config) = self.initial.take() {
            if let Err(e) = self.controller.setup(&config) {
                error!(error = %e, "Failed to set up tray");
            }
        }

        self.schedule_dock_policy();
    }

    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {}

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: AppEvent) {
        match event {
            AppEvent::Menu(event) => self.controller.handle_click(event.id.0.as_str()),
            AppEvent::Reload(config) => {
                if let Err(e) = self.controller.setup(&config) {
                    warn!(error = %e, "Failed to apply reloaded configuration");
                }
            }
            AppEvent::HideDockIcon => platform::native().hide_dock_icon(),
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        _event: WindowEvent,
    ) {
        // We don't have any windows, just the tray icon
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);
    }
}

fn realize_menu(plan: &MenuPlan, icon_dir: &Path) -> TrayResult<Menu> {
    let menu = Menu::new();
    for entry in &plan.entries {
        menu.append(realize_entry(entry, icon_dir)?.as_ref())?;
    }
    Ok(menu)
}

fn realize_entry(entry: &MenuEntry, icon_dir: &Path) -> TrayResult<Box<dyn IsMenuItem>> {
    if entry.is_submenu() {
        // Submenu title mirrors the parent entry
        let submenu = Submenu::with_id(entry.id.as_str(), &entry.title, true);
        for child in &entry.children {
            submenu.append(realize_entry(child, icon_dir)?.as_ref())?;
        }
        return Ok(Box::new(submenu));
    }

    let item: Box<dyn IsMenuItem> = match entry.icon.and_then(|i| load_menu_icon(i, icon_dir)) {
        Some(icon) => Box::new(IconMenuItem::with_id(
            entry.id.as_str(),
            &entry.title,
            true,
            Some(icon),
            None,
        )),
        None => Box::new(MenuItem::with_id(
            entry.id.as_str(),
            &entry.title,
            true,
            None,
        )),
    };
    Ok(item)
}

fn load_tray_icon(path: &Path) -> Result<tray_icon::Icon, IconError> {
    let (rgba, width, height) = decode_rgba(path, TRAY_ICON_SIZE)?;

    tray_icon::Icon::from_rgba(rgba, width, height).map_err(|e| IconError::Build {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Missing or broken menu icons fall back to a plain entry.
fn load_menu_icon(icon: &ThemeIcon, icon_dir: &Path) -> Option<tray_icon::menu::Icon> {
    let path = icon.path_in(icon_dir);

    let result = decode_rgba(&path, MENU_ICON_SIZE).and_then(|(rgba, width, height)| {
        tray_icon::menu::Icon::from_rgba(rgba, width, height).map_err(|e| IconError::Build {
            path: path.clone(),
            message: e.to_string(),
        })
    });

    match result {
        Ok(icon) => Some(icon),
        Err(e) => {
            debug!(icon = icon.name, error = %e, "Menu icon unavailable");
            None
        }
    }
}

/// Run the system tray application
pub fn run_tray(config: TrayConfig, options: TrayOptions) -> Result<()> {
    let event_loop = EventLoop::<AppEvent>::with_user_event().build()?;

    let proxy = event_loop.create_proxy();
    MenuEvent::set_event_handler(Some(move |event: MenuEvent| {
        let _ = proxy.send_event(AppEvent::Menu(event));
    }));

    // Lives as long as the event loop
    let _watch = ConfigWatcher::new(&options.config_path, options.debounce)?
        .spawn(event_loop.create_proxy())?;

    let mut app = TrayApp::new(config, &options, event_loop.create_proxy());

    info!("Starting tray event loop");
    event_loop.run_app(&mut app)?;

    Ok(())
}
