use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use eframe::egui;

use crate::hotkey::HotkeyTrigger;
use crate::window_service::{ViewportWindowService, WindowCommand, WindowService, WindowState};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Toggle window visibility when the given hotkey trigger fires.
pub fn handle_visibility_trigger<S: WindowService + ?Sized>(
    trigger: &HotkeyTrigger,
    service: &S,
) -> bool {
    if trigger.take() {
        tracing::debug!("visibility hotkey fired");
        service.dispatch(WindowCommand::ToggleVisibility);
        true
    } else {
        false
    }
}

/// Poll `trigger` off the UI thread so a hidden window can still be revealed.
/// The thread exits once `running` is cleared.
pub fn spawn_hotkey_poller(
    trigger: HotkeyTrigger,
    ctx: egui::Context,
    state: Arc<WindowState>,
    running: Arc<AtomicBool>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let service = ViewportWindowService::new(ctx, state);
        while running.load(Ordering::SeqCst) {
            handle_visibility_trigger(&trigger, &service);
            thread::sleep(POLL_INTERVAL);
        }
    })
}
