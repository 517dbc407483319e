use eframe::egui;
use shell_controls::window_service::{
    ChannelWindowService, ViewportWindowService, WindowCommand, WindowService, WindowState,
    OFFSCREEN_POS,
};
use std::sync::Arc;

use mock_ctx::{MockCtx, RecordingService};

fn backend(can_restore: bool) -> (MockCtx, Arc<WindowState>, ViewportWindowService<MockCtx>) {
    let ctx = MockCtx::default();
    let state = Arc::new(WindowState::default());
    state.set_can_restore(can_restore);
    let service = ViewportWindowService::new(ctx.clone(), state.clone());
    (ctx, state, service)
}

fn offscreen() -> egui::Pos2 {
    egui::pos2(OFFSCREEN_POS.0, OFFSCREEN_POS.1)
}

#[test]
fn always_on_top_maps_to_window_level() {
    let (ctx, _, service) = backend(true);
    service.set_always_on_top(true);
    service.set_always_on_top(false);

    let cmds = ctx.commands.lock().unwrap();
    assert_eq!(cmds.len(), 2);
    assert!(matches!(
        cmds[0],
        egui::ViewportCommand::WindowLevel(egui::WindowLevel::AlwaysOnTop)
    ));
    assert!(matches!(
        cmds[1],
        egui::ViewportCommand::WindowLevel(egui::WindowLevel::Normal)
    ));
    assert_eq!(*ctx.repaints.lock().unwrap(), 2);
}

#[test]
fn minimize_and_close() {
    let (ctx, _, service) = backend(true);
    service.minimize();
    service.close();

    let cmds = ctx.commands.lock().unwrap();
    assert_eq!(cmds.len(), 2);
    assert!(matches!(cmds[0], egui::ViewportCommand::Minimized(true)));
    assert!(matches!(cmds[1], egui::ViewportCommand::Close));
}

#[test]
fn maximize_toggles_against_current_state() {
    let (ctx, _, service) = backend(true);
    service.maximize();
    *ctx.maximized.lock().unwrap() = true;
    service.maximize();

    let cmds = ctx.commands.lock().unwrap();
    assert!(matches!(cmds[0], egui::ViewportCommand::Maximized(true)));
    assert!(matches!(cmds[1], egui::ViewportCommand::Maximized(false)));
}

#[test]
fn hide_parks_offscreen_and_show_restores_position() {
    let (ctx, state, service) = backend(true);
    *ctx.position.lock().unwrap() = Some(egui::pos2(120.0, 80.0));

    service.hide_to_system_tray();
    assert!(!state.is_visible());
    service.show_from_system_tray();
    assert!(state.is_visible());

    let cmds = ctx.commands.lock().unwrap();
    assert_eq!(
        *cmds,
        vec![
            egui::ViewportCommand::OuterPosition(offscreen()),
            egui::ViewportCommand::Visible(true),
            egui::ViewportCommand::OuterPosition(egui::pos2(120.0, 80.0)),
            egui::ViewportCommand::Visible(true),
            egui::ViewportCommand::Minimized(false),
            egui::ViewportCommand::Focus,
        ]
    );
    assert!(!cmds.contains(&egui::ViewportCommand::Visible(false)));
}

#[test]
fn hiding_twice_keeps_first_position() {
    let (ctx, _, service) = backend(true);
    *ctx.position.lock().unwrap() = Some(egui::pos2(40.0, 30.0));
    service.hide_to_system_tray();
    // the backend now reports the parked position
    *ctx.position.lock().unwrap() = Some(offscreen());
    service.hide_to_system_tray();
    service.show_from_system_tray();

    let cmds = ctx.commands.lock().unwrap();
    assert!(cmds.contains(&egui::ViewportCommand::OuterPosition(egui::pos2(40.0, 30.0))));
}

#[test]
fn show_without_known_position_only_reveals() {
    let (ctx, state, service) = backend(true);
    service.show_from_system_tray();
    assert!(state.is_visible());
    let cmds = ctx.commands.lock().unwrap();
    assert_eq!(
        *cmds,
        vec![
            egui::ViewportCommand::Visible(true),
            egui::ViewportCommand::Minimized(false),
            egui::ViewportCommand::Focus,
        ]
    );
}

#[test]
fn hide_without_restore_path_minimizes() {
    let (ctx, state, service) = backend(false);
    service.hide_to_system_tray();

    assert!(state.is_visible());
    let cmds = ctx.commands.lock().unwrap();
    assert_eq!(*cmds, vec![egui::ViewportCommand::Minimized(true)]);
    assert_eq!(*ctx.repaints.lock().unwrap(), 1);
}

#[test]
fn toggle_visibility_flips_flag() {
    let (ctx, state, service) = backend(true);
    service.dispatch(WindowCommand::ToggleVisibility);
    assert!(!service.is_visible());
    service.dispatch(WindowCommand::ToggleVisibility);
    assert!(state.is_visible());
    assert_eq!(ctx.commands.lock().unwrap().len(), 5);
}

#[test]
fn channel_queues_until_drained() {
    let (commands, queue) = ChannelWindowService::new();
    commands.set_always_on_top(true);
    commands.minimize();
    commands.minimize();

    let backend = RecordingService::default();
    assert_eq!(queue.drain_into(&backend), 3);
    assert_eq!(
        backend.calls(),
        vec![
            WindowCommand::SetAlwaysOnTop(true),
            WindowCommand::Minimize,
            WindowCommand::Minimize,
        ]
    );
    assert_eq!(queue.drain_into(&backend), 0);
}

#[test]
fn dispatch_after_queue_dropped_is_ignored() {
    let (commands, queue) = ChannelWindowService::new();
    drop(queue);
    commands.close();
    commands.set_always_on_top(false);
}

#[test]
fn shared_service_forwards() {
    let shared = Arc::new(RecordingService::default());
    let by_ref: &dyn WindowService = &shared;
    by_ref.maximize();
    assert_eq!(shared.calls(), vec![WindowCommand::Maximize]);
}
