//! System tray entry with "Show Window" and "Quit".
//!
//! Menu clicks arrive on a background thread and are forwarded to a
//! [`WindowService`], so a window parked offscreen can be brought back.

use crate::window_service::WindowService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayAction {
    ShowWindow,
    Quit,
}

impl TrayAction {
    pub const ALL: [TrayAction; 2] = [TrayAction::ShowWindow, TrayAction::Quit];

    pub fn label(self) -> &'static str {
        match self {
            TrayAction::ShowWindow => "Show Window",
            TrayAction::Quit => "Quit",
        }
    }

    pub fn dispatch<S: WindowService + ?Sized>(self, service: &S) {
        match self {
            TrayAction::ShowWindow => service.show_from_system_tray(),
            TrayAction::Quit => service.close(),
        }
    }
}

/// Menu item ids assigned by the tray backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrayMenuIds {
    pub show: String,
    pub quit: String,
}

impl TrayMenuIds {
    pub fn action_for(&self, id: &str) -> Option<TrayAction> {
        if id == self.show {
            Some(TrayAction::ShowWindow)
        } else if id == self.quit {
            Some(TrayAction::Quit)
        } else {
            None
        }
    }
}

/// Forward one menu click. Unknown ids are ignored.
pub fn handle_menu_event<S: WindowService + ?Sized>(
    ids: &TrayMenuIds,
    id: &str,
    service: &S,
) -> Option<TrayAction> {
    let action = ids.action_for(id);
    match action {
        Some(action) => {
            tracing::debug!(?action, "tray menu item clicked");
            action.dispatch(service);
        }
        None => tracing::debug!(id, "ignoring unknown tray menu id"),
    }
    action
}

/// A live tray icon. Dropping it removes the icon.
pub struct ShellTray {
    #[cfg(any(target_os = "windows", target_os = "macos"))]
    _icon: tray_icon::TrayIcon,
}

impl ShellTray {
    /// Create the tray icon and start forwarding its menu clicks to
    /// `service` until `running` is cleared. Must run on the UI thread
    /// after the event loop has started.
    #[cfg(any(target_os = "windows", target_os = "macos"))]
    pub fn start<S>(
        tooltip: &str,
        service: S,
        running: std::sync::Arc<std::sync::atomic::AtomicBool>,
    ) -> anyhow::Result<Self>
    where
        S: WindowService + Send + 'static,
    {
        use std::sync::atomic::Ordering;
        use std::time::Duration;
        use tray_icon::menu::{Menu, MenuEvent, MenuItem};
        use tray_icon::TrayIconBuilder;

        let show_item = MenuItem::new(TrayAction::ShowWindow.label(), true, None);
        let quit_item = MenuItem::new(TrayAction::Quit.label(), true, None);
        let menu = Menu::new();
        menu.append_items(&[&show_item, &quit_item])?;

        let ids = TrayMenuIds {
            show: show_item.id().0.clone(),
            quit: quit_item.id().0.clone(),
        };

        let icon = TrayIconBuilder::new()
            .with_menu(Box::new(menu))
            .with_tooltip(tooltip)
            .with_icon(tray_icon::Icon::from_rgba(icon_rgba(), ICON_SIZE, ICON_SIZE)?)
            .build()?;

        std::thread::spawn(move || {
            let events = MenuEvent::receiver();
            while running.load(Ordering::SeqCst) {
                if let Ok(event) = events.recv_timeout(Duration::from_millis(200)) {
                    handle_menu_event(&ids, &event.id.0, &service);
                }
            }
        });

        tracing::info!("system tray icon created");
        Ok(Self { _icon: icon })
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    pub fn start<S>(
        _tooltip: &str,
        _service: S,
        _running: std::sync::Arc<std::sync::atomic::AtomicBool>,
    ) -> anyhow::Result<Self>
    where
        S: WindowService + Send + 'static,
    {
        anyhow::bail!("system tray is not supported on this platform")
    }
}

pub const ICON_SIZE: u32 = 16;

/// Round badge in the accent colour, RGBA.
pub fn icon_rgba() -> Vec<u8> {
    let size = ICON_SIZE as i32;
    let r = size / 2;
    let mut rgba = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let (dx, dy) = (x - r, y - r);
            let inside = dx * dx + dy * dy <= (r - 1) * (r - 1);
            let alpha = if inside { 0xff } else { 0x00 };
            rgba.extend_from_slice(&[0x2d, 0x8c, 0xeb, alpha]);
        }
    }
    rgba
}
