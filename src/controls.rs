//! Window control cluster shown in the shell header.
//!
//! [`ControlSurface`] is a controlled widget: it is rebuilt every frame from
//! the caller's always-on-top flag and reports a requested change through a
//! callback instead of keeping a flag of its own.

use crate::window_service::WindowService;
use eframe::egui;

/// One clickable control of the cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlAction {
    TogglePin,
    HideToTray,
    Minimize,
    Maximize,
    Close,
}

impl ControlAction {
    /// Render order, left to right.
    pub const ALL: [ControlAction; 5] = [
        ControlAction::TogglePin,
        ControlAction::HideToTray,
        ControlAction::Minimize,
        ControlAction::Maximize,
        ControlAction::Close,
    ];

    pub fn tooltip(self) -> &'static str {
        match self {
            ControlAction::TogglePin => "Always on Top",
            ControlAction::HideToTray => "Hide to Tray",
            ControlAction::Minimize => "Minimize",
            ControlAction::Maximize => "Maximize",
            ControlAction::Close => "Close",
        }
    }

    /// The pin glyph follows the flag; the others are fixed.
    fn glyph(self, is_always_on_top: bool) -> &'static str {
        match self {
            ControlAction::TogglePin => pin_icon(is_always_on_top).glyph(),
            ControlAction::HideToTray => "⏷",
            ControlAction::Minimize => "🗕",
            ControlAction::Maximize => "🗖",
            ControlAction::Close => "🗙",
        }
    }

    /// Destructive controls get the error colour.
    pub fn is_danger(self) -> bool {
        matches!(self, ControlAction::Close)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinIcon {
    Filled,
    Outline,
}

impl PinIcon {
    pub fn glyph(self) -> &'static str {
        match self {
            PinIcon::Filled => "📌",
            PinIcon::Outline => "📍",
        }
    }
}

/// Icon for the pin control. Depends on nothing but the flag.
pub fn pin_icon(is_always_on_top: bool) -> PinIcon {
    if is_always_on_top {
        PinIcon::Filled
    } else {
        PinIcon::Outline
    }
}

pub struct ControlSurface<'a, F>
where
    F: FnMut(bool),
{
    is_always_on_top: bool,
    on_always_on_top_change: F,
    service: &'a dyn WindowService,
}

impl<'a, F> ControlSurface<'a, F>
where
    F: FnMut(bool),
{
    pub fn new(
        is_always_on_top: bool,
        on_always_on_top_change: F,
        service: &'a dyn WindowService,
    ) -> Self {
        Self {
            is_always_on_top,
            on_always_on_top_change,
            service,
        }
    }

    pub fn pin_icon(&self) -> PinIcon {
        pin_icon(self.is_always_on_top)
    }

    /// Perform the side effects of a single gesture on `action`.
    pub fn activate(&mut self, action: ControlAction) {
        tracing::debug!(?action, "window control activated");
        match action {
            ControlAction::TogglePin => {
                let next = !self.is_always_on_top;
                (self.on_always_on_top_change)(next);
                self.service.set_always_on_top(next);
            }
            ControlAction::HideToTray => self.service.hide_to_system_tray(),
            ControlAction::Minimize => self.service.minimize(),
            ControlAction::Maximize => self.service.maximize(),
            ControlAction::Close => self.service.close(),
        }
    }

    /// Draw the cluster and activate whichever control was clicked this frame.
    pub fn show(mut self, ui: &mut egui::Ui) -> egui::InnerResponse<Option<ControlAction>> {
        let resp = ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 2.0;
            let mut clicked = None;
            let mut draw = |ui: &mut egui::Ui, action: ControlAction| {
                let mut text = egui::RichText::new(action.glyph(self.is_always_on_top));
                if action.is_danger() {
                    text = text.color(ui.visuals().error_fg_color);
                }
                let selected = action == ControlAction::TogglePin && self.is_always_on_top;
                let resp = ui
                    .add(egui::Button::new(text).frame(false).selected(selected))
                    .on_hover_text(action.tooltip());
                if resp.clicked() {
                    clicked.get_or_insert(action);
                }
            };
            // keep the visual order when the parent lays out right-to-left
            if ui.layout().prefer_right_to_left() {
                ControlAction::ALL.into_iter().rev().for_each(|a| draw(ui, a));
            } else {
                ControlAction::ALL.into_iter().for_each(|a| draw(ui, a));
            }
            clicked
        });
        if let Some(action) = resp.inner {
            self.activate(action);
        }
        resp
    }
}
