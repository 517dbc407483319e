use shell_controls::gui::ShellApp;
use shell_controls::hotkey::HotkeyTrigger;
use shell_controls::logging;
use shell_controls::settings::{self, Settings};
use shell_controls::tray::ShellTray;
use shell_controls::visibility::spawn_hotkey_poller;
use shell_controls::window_service::{ViewportWindowService, WindowState};

use eframe::egui;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    let settings_path = settings::default_path();
    let settings = Settings::load(&settings_path)?;
    logging::init(settings.debug_logging, settings.log_file.as_deref().map(Path::new));
    tracing::info!(path = %settings_path.display(), "settings loaded");

    let trigger = HotkeyTrigger::new(settings.hotkey());
    let hotkey_active = trigger.start_listener();

    let (w, h) = settings.window_size;
    let mut viewport = egui::ViewportBuilder::default()
        .with_title(settings.title.clone())
        .with_inner_size([w, h])
        .with_min_inner_size([320.0, 160.0])
        .with_decorations(false);
    if settings.always_on_top {
        viewport = viewport.with_always_on_top();
    }
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let state = Arc::new(WindowState::default());
    let running = Arc::new(AtomicBool::new(true));
    let title = settings.title.clone();

    eframe::run_native(
        &title,
        native_options,
        Box::new(move |cc| {
            if hotkey_active {
                spawn_hotkey_poller(trigger, cc.egui_ctx.clone(), state.clone(), running.clone());
            }
            let tray_service = ViewportWindowService::new(cc.egui_ctx.clone(), state.clone());
            let tray = match ShellTray::start(&settings.title, tray_service, running.clone()) {
                Ok(tray) => Some(tray),
                Err(e) => {
                    tracing::warn!("system tray unavailable: {e}");
                    None
                }
            };
            state.set_can_restore(hotkey_active || tray.is_some());
            Box::new(ShellApp::new(settings, settings_path, state, running, tray))
        }),
    )
    .map_err(|e| anyhow::anyhow!("failed to run window shell: {e}"))
}
