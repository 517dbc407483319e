pub mod controls;
pub mod gui;
pub mod hotkey;
pub mod logging;
pub mod settings;
pub mod tray;
pub mod visibility;
pub mod window_service;
