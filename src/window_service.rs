use eframe::egui;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

/// A single request for the window backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowCommand {
    SetAlwaysOnTop(bool),
    HideToSystemTray,
    ShowFromSystemTray,
    ToggleVisibility,
    Minimize,
    Maximize,
    Close,
}

/// Sink for window commands.
///
/// Dispatch is fire-and-forget: nothing is returned to the caller and a
/// command that cannot be applied is only logged.
pub trait WindowService {
    fn dispatch(&self, cmd: WindowCommand);

    fn set_always_on_top(&self, flag: bool) {
        self.dispatch(WindowCommand::SetAlwaysOnTop(flag));
    }

    fn hide_to_system_tray(&self) {
        self.dispatch(WindowCommand::HideToSystemTray);
    }

    fn show_from_system_tray(&self) {
        self.dispatch(WindowCommand::ShowFromSystemTray);
    }

    fn minimize(&self) {
        self.dispatch(WindowCommand::Minimize);
    }

    fn maximize(&self) {
        self.dispatch(WindowCommand::Maximize);
    }

    fn close(&self) {
        self.dispatch(WindowCommand::Close);
    }
}

impl<S: WindowService + ?Sized> WindowService for &S {
    fn dispatch(&self, cmd: WindowCommand) {
        (**self).dispatch(cmd);
    }
}

impl<S: WindowService + ?Sized> WindowService for Arc<S> {
    fn dispatch(&self, cmd: WindowCommand) {
        (**self).dispatch(cmd);
    }
}

/// Minimal view of an egui context so the viewport backend can be driven by
/// a mock in tests.
pub trait ViewportCtx {
    fn send_viewport_cmd(&self, cmd: egui::ViewportCommand);
    fn request_repaint(&self);
    fn is_maximized(&self) -> bool;
    fn outer_position(&self) -> Option<egui::Pos2>;
}

impl ViewportCtx for egui::Context {
    fn send_viewport_cmd(&self, cmd: egui::ViewportCommand) {
        egui::Context::send_viewport_cmd(self, cmd);
    }

    fn request_repaint(&self) {
        egui::Context::request_repaint(self);
    }

    fn is_maximized(&self) -> bool {
        self.input(|i| i.viewport().maximized.unwrap_or(false))
    }

    fn outer_position(&self) -> Option<egui::Pos2> {
        self.input(|i| i.viewport().outer_rect.map(|r| r.min))
    }
}

/// Where a hidden window is parked. It stays `Visible(true)` so the viewport
/// keeps receiving frames and can process the command that brings it back.
pub const OFFSCREEN_POS: (f32, f32) = (-10_000.0, -10_000.0);

/// Window state shared between the UI thread and the tray/hotkey pollers.
#[derive(Debug)]
pub struct WindowState {
    visible: AtomicBool,
    can_restore: AtomicBool,
    restore_pos: Mutex<Option<egui::Pos2>>,
}

impl Default for WindowState {
    fn default() -> Self {
        Self {
            visible: AtomicBool::new(true),
            can_restore: AtomicBool::new(false),
            restore_pos: Mutex::new(None),
        }
    }
}

impl WindowState {
    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    /// Whether something (tray menu or global hotkey) can show a hidden
    /// window again. Without it hiding degrades to minimizing.
    pub fn can_restore(&self) -> bool {
        self.can_restore.load(Ordering::SeqCst)
    }

    pub fn set_can_restore(&self, value: bool) {
        self.can_restore.store(value, Ordering::SeqCst);
    }

    fn set_visible(&self, value: bool) {
        self.visible.store(value, Ordering::SeqCst);
    }

    fn remember_position(&self, pos: Option<egui::Pos2>) {
        if let Ok(mut slot) = self.restore_pos.lock() {
            *slot = pos;
        }
    }

    fn take_position(&self) -> Option<egui::Pos2> {
        self.restore_pos.lock().ok().and_then(|mut slot| slot.take())
    }
}

/// Applies [`WindowCommand`]s to an egui viewport.
pub struct ViewportWindowService<C: ViewportCtx> {
    ctx: C,
    state: Arc<WindowState>,
}

impl<C: ViewportCtx> ViewportWindowService<C> {
    pub fn new(ctx: C, state: Arc<WindowState>) -> Self {
        Self { ctx, state }
    }

    pub fn is_visible(&self) -> bool {
        self.state.is_visible()
    }

    fn hide(&self) {
        if !self.state.can_restore() {
            tracing::warn!("no tray or hotkey available to restore the window; minimizing instead");
            self.ctx.send_viewport_cmd(egui::ViewportCommand::Minimized(true));
            return;
        }
        if self.state.is_visible() {
            self.state.remember_position(self.ctx.outer_position());
        }
        let (x, y) = OFFSCREEN_POS;
        self.ctx
            .send_viewport_cmd(egui::ViewportCommand::OuterPosition(egui::pos2(x, y)));
        self.ctx.send_viewport_cmd(egui::ViewportCommand::Visible(true));
        self.state.set_visible(false);
    }

    fn show(&self) {
        if let Some(pos) = self.state.take_position() {
            self.ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(pos));
        }
        self.ctx.send_viewport_cmd(egui::ViewportCommand::Visible(true));
        self.ctx.send_viewport_cmd(egui::ViewportCommand::Minimized(false));
        self.ctx.send_viewport_cmd(egui::ViewportCommand::Focus);
        self.state.set_visible(true);
    }
}

impl<C: ViewportCtx> WindowService for ViewportWindowService<C> {
    fn dispatch(&self, cmd: WindowCommand) {
        tracing::debug!(?cmd, "applying window command");
        match cmd {
            WindowCommand::SetAlwaysOnTop(flag) => {
                let level = if flag {
                    egui::WindowLevel::AlwaysOnTop
                } else {
                    egui::WindowLevel::Normal
                };
                self.ctx.send_viewport_cmd(egui::ViewportCommand::WindowLevel(level));
            }
            WindowCommand::HideToSystemTray => self.hide(),
            WindowCommand::ShowFromSystemTray => self.show(),
            WindowCommand::ToggleVisibility => {
                if self.is_visible() {
                    self.hide();
                } else {
                    self.show();
                }
            }
            WindowCommand::Minimize => {
                self.ctx.send_viewport_cmd(egui::ViewportCommand::Minimized(true));
            }
            WindowCommand::Maximize => {
                let maximized = self.ctx.is_maximized();
                self.ctx
                    .send_viewport_cmd(egui::ViewportCommand::Maximized(!maximized));
            }
            WindowCommand::Close => self.ctx.send_viewport_cmd(egui::ViewportCommand::Close),
        }
        self.ctx.request_repaint();
    }
}

/// Queues commands on a channel so they can be applied after the UI pass.
#[derive(Clone)]
pub struct ChannelWindowService {
    tx: Sender<WindowCommand>,
}

/// Receiving end of a [`ChannelWindowService`].
pub struct CommandQueue {
    rx: Receiver<WindowCommand>,
}

impl ChannelWindowService {
    pub fn new() -> (Self, CommandQueue) {
        let (tx, rx) = channel();
        (Self { tx }, CommandQueue { rx })
    }
}

impl WindowService for ChannelWindowService {
    fn dispatch(&self, cmd: WindowCommand) {
        if let Err(e) = self.tx.send(cmd) {
            tracing::warn!(cmd = ?e.0, "window command dropped: backend is gone");
        }
    }
}

impl CommandQueue {
    /// Forward every pending command to `backend`. Returns how many were applied.
    pub fn drain_into<S: WindowService + ?Sized>(&self, backend: &S) -> usize {
        let mut applied = 0;
        while let Ok(cmd) = self.rx.try_recv() {
            backend.dispatch(cmd);
            applied += 1;
        }
        applied
    }
}
