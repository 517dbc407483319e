use crate::hotkey::{Hotkey, HotkeySettings};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// Last always-on-top state chosen in the header; applied at startup.
    #[serde(default)]
    pub always_on_top: bool,
    /// Global hotkey that shows or hides the window.
    #[serde(default)]
    pub hotkey: HotkeySettings,
    /// When enabled the application initialises the logger at debug level.
    #[serde(default)]
    pub debug_logging: bool,
    /// Optional file receiving log output instead of stdout.
    #[serde(default)]
    pub log_file: Option<String>,
    #[serde(default = "default_window_size")]
    pub window_size: (f32, f32),
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_window_size() -> (f32, f32) {
    (480.0, 320.0)
}

fn default_title() -> String {
    "Shell Controls".into()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            always_on_top: false,
            hotkey: HotkeySettings::default(),
            debug_logging: false,
            log_file: None,
            window_size: default_window_size(),
            title: default_title(),
        }
    }
}

/// Location of the settings file: the platform config directory when known,
/// the working directory otherwise.
pub fn default_path() -> PathBuf {
    match dirs_next::config_dir() {
        Some(dir) => dir.join("shell_controls").join(SETTINGS_FILE),
        None => PathBuf::from(SETTINGS_FILE),
    }
}

impl Settings {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn hotkey(&self) -> Hotkey {
        match self.hotkey.to_hotkey() {
            Some(k) => k,
            None => {
                tracing::warn!(
                    "provided hotkey {:?} is invalid; using default Ctrl+Shift+S",
                    self.hotkey
                );
                Hotkey::default()
            }
        }
    }
}
