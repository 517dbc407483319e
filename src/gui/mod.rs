use crate::controls::{ControlAction, ControlSurface};
use crate::settings::Settings;
use crate::tray::ShellTray;
use crate::window_service::{
    ChannelWindowService, CommandQueue, ViewportWindowService, WindowService, WindowState,
};
use eframe::egui;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const HEADER_HEIGHT: f32 = 28.0;

/// Window shell hosting the header controls.
///
/// Owns the always-on-top flag; the header's [`ControlSurface`] only gets a
/// copy each frame and asks for changes through its callback.
pub struct ShellApp {
    is_always_on_top: bool,
    settings: Settings,
    settings_path: PathBuf,
    hotkey_label: String,
    commands: ChannelWindowService,
    queue: CommandQueue,
    state: Arc<WindowState>,
    running: Arc<AtomicBool>,
    tray: Option<ShellTray>,
}

impl ShellApp {
    pub fn new(
        settings: Settings,
        settings_path: PathBuf,
        state: Arc<WindowState>,
        running: Arc<AtomicBool>,
        tray: Option<ShellTray>,
    ) -> Self {
        let (commands, queue) = ChannelWindowService::new();
        Self {
            is_always_on_top: settings.always_on_top,
            hotkey_label: settings.hotkey().to_string(),
            settings,
            settings_path,
            commands,
            queue,
            state,
            running,
            tray,
        }
    }

    pub fn is_always_on_top(&self) -> bool {
        self.is_always_on_top
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Store a new always-on-top value and persist it for the next start.
    pub fn set_always_on_top(&mut self, next: bool) {
        tracing::info!(from = self.is_always_on_top, to = next, "always on top changed");
        self.is_always_on_top = next;
        self.settings.always_on_top = next;
        if let Err(e) = self.settings.save(&self.settings_path) {
            tracing::warn!("failed to save settings to {}: {e}", self.settings_path.display());
        }
    }

    /// Render the header cluster. Commands are queued, not applied; see
    /// [`ShellApp::apply_pending`].
    pub fn header_ui(&mut self, ui: &mut egui::Ui) -> Option<ControlAction> {
        let mut requested = None;
        let action = ControlSurface::new(
            self.is_always_on_top,
            |next| requested = Some(next),
            &self.commands,
        )
        .show(ui)
        .inner;
        if let Some(next) = requested {
            self.set_always_on_top(next);
        }
        action
    }

    /// Same as clicking `action` in the header.
    pub fn activate(&mut self, action: ControlAction) {
        let mut requested = None;
        ControlSurface::new(
            self.is_always_on_top,
            |next| requested = Some(next),
            &self.commands,
        )
        .activate(action);
        if let Some(next) = requested {
            self.set_always_on_top(next);
        }
    }

    /// Forward queued commands to `backend`.
    pub fn apply_pending<S: WindowService + ?Sized>(&self, backend: &S) -> usize {
        self.queue.drain_into(backend)
    }
}

impl eframe::App for ShellApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("header")
            .exact_height(HEADER_HEIGHT)
            .show(ctx, |ui| {
                let drag = ui.interact(
                    ui.max_rect(),
                    egui::Id::new("header_drag"),
                    egui::Sense::click_and_drag(),
                );
                if drag.drag_started_by(egui::PointerButton::Primary) {
                    ctx.send_viewport_cmd(egui::ViewportCommand::StartDrag);
                }
                ui.horizontal_centered(|ui| {
                    ui.label(egui::RichText::new(&self.settings.title).strong());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        self.header_ui(ui);
                    });
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.tray.is_some() {
                ui.label("Show Window in the tray menu brings a hidden window back.");
            }
            if cfg!(target_os = "windows") {
                ui.label(format!("Press {} to show or hide this window.", self.hotkey_label));
            }
            if !self.state.can_restore() {
                ui.label("Hide to Tray minimizes the window on this platform.");
            }
        });

        let backend = ViewportWindowService::new(ctx.clone(), self.state.clone());
        let applied = self.apply_pending(&backend);
        if applied > 0 {
            tracing::debug!(applied, "window commands applied");
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.running.store(false, Ordering::SeqCst);
        if let Err(e) = self.settings.save(&self.settings_path) {
            tracing::warn!("failed to save settings on exit: {e}");
        }
    }
}
