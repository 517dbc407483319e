use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

const MODIFIERS: [&str; 4] = ["ctrl", "shift", "alt", "meta"];

/// Hotkey as stored in the settings file, e.g.
/// `{ "modifiers": ["ctrl", "shift"], "key": "s" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotkeySettings {
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub key: String,
}

impl Default for HotkeySettings {
    fn default() -> Self {
        Self {
            modifiers: vec!["ctrl".into(), "shift".into()],
            key: "s".into(),
        }
    }
}

impl HotkeySettings {
    pub fn to_hotkey(&self) -> Option<Hotkey> {
        let mut hk = Hotkey::bare(parse_key(&self.key)?);
        for m in &self.modifiers {
            if !hk.set_modifier(m) {
                return None;
            }
        }
        Some(hk)
    }
}

/// Modifier names accepted in [`HotkeySettings::modifiers`].
pub fn available_modifiers() -> Vec<&'static str> {
    MODIFIERS.to_vec()
}

/// Keys accepted in [`HotkeySettings::key`].
pub fn available_keys() -> Vec<String> {
    ('a'..='z').chain('0'..='9').map(String::from).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hotkey {
    /// Lowercase ASCII letter or digit.
    pub key: char,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Default for Hotkey {
    fn default() -> Self {
        Self {
            key: 's',
            ctrl: true,
            shift: true,
            alt: false,
            meta: false,
        }
    }
}

impl Hotkey {
    /// `key` with no modifiers.
    pub fn bare(key: char) -> Self {
        Self {
            key,
            ctrl: false,
            shift: false,
            alt: false,
            meta: false,
        }
    }

    fn set_modifier(&mut self, name: &str) -> bool {
        match name.trim().to_ascii_lowercase().as_str() {
            "ctrl" | "control" => self.ctrl = true,
            "shift" => self.shift = true,
            "alt" => self.alt = true,
            "meta" | "cmd" | "win" => self.meta = true,
            _ => return false,
        }
        true
    }
}

impl std::fmt::Display for Hotkey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mods = [
            (self.ctrl, "Ctrl"),
            (self.shift, "Shift"),
            (self.alt, "Alt"),
            (self.meta, "Meta"),
        ];
        for (_, name) in mods.iter().filter(|(on, _)| *on) {
            write!(f, "{name}+")?;
        }
        write!(f, "{}", self.key.to_ascii_uppercase())
    }
}

/// Parse a hotkey string like "Ctrl+Shift+S" into a [`Hotkey`].
pub fn parse_hotkey(s: &str) -> Option<Hotkey> {
    let mut hk = Hotkey::bare('s');
    let mut key = None;

    for part in s.split('+') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        if hk.set_modifier(part) {
            continue;
        }
        key = Some(parse_key(part)?);
    }

    key.map(|k| Hotkey { key: k, ..hk })
}

fn parse_key(s: &str) -> Option<char> {
    let mut chars = s.trim().chars();
    let c = chars.next()?.to_ascii_lowercase();
    if chars.next().is_some() || !c.is_ascii_alphanumeric() {
        return None;
    }
    Some(c)
}

/// Flag raised by the global listener and consumed by the UI side.
pub struct HotkeyTrigger {
    pub open: Arc<Mutex<bool>>,
    pub hotkey: Hotkey,
}

impl HotkeyTrigger {
    pub fn new(hotkey: Hotkey) -> Self {
        Self {
            open: Arc::new(Mutex::new(false)),
            hotkey,
        }
    }

    pub fn fire(&self) {
        if let Ok(mut flag) = self.open.lock() {
            *flag = true;
        }
    }

    pub fn take(&self) -> bool {
        match self.open.lock() {
            Ok(mut open) => std::mem::replace(&mut *open, false),
            Err(_) => false,
        }
    }

    /// Start the global listener. Returns `false` when global hotkeys are
    /// unavailable.
    #[cfg(target_os = "windows")]
    pub fn start_listener(&self) -> bool {
        use rdev::{listen, EventType, Key};
        use std::thread;
        use std::time::Duration;

        let open = self.open.clone();
        let hotkey = self.hotkey;
        let Some(watch) = rdev_key(hotkey.key) else {
            tracing::warn!(%hotkey, "hotkey key has no keyboard mapping");
            return false;
        };
        tracing::debug!(%hotkey, "starting hotkey listener");
        thread::spawn(move || loop {
            let mut watch_pressed = false;
            let mut triggered = false;
            let mut ctrl_pressed = false;
            let mut shift_pressed = false;
            let mut alt_pressed = false;
            let mut meta_pressed = false;
            let open_listener = open.clone();

            let result = listen(move |event| {
                let (k, down) = match event.event_type {
                    EventType::KeyPress(k) => (k, true),
                    EventType::KeyRelease(k) => (k, false),
                    _ => return,
                };
                match k {
                    Key::ControlLeft | Key::ControlRight => ctrl_pressed = down,
                    Key::ShiftLeft | Key::ShiftRight => shift_pressed = down,
                    Key::Alt | Key::AltGr => alt_pressed = down,
                    Key::MetaLeft | Key::MetaRight => meta_pressed = down,
                    _ => {}
                }
                if k == watch {
                    watch_pressed = down;
                }

                let combo = watch_pressed
                    && (!hotkey.ctrl || ctrl_pressed)
                    && (!hotkey.shift || shift_pressed)
                    && (!hotkey.alt || alt_pressed)
                    && (!hotkey.meta || meta_pressed);
                if combo {
                    if !triggered {
                        triggered = true;
                        tracing::debug!("hotkey match -> open=true");
                        if let Ok(mut flag) = open_listener.lock() {
                            *flag = true;
                        }
                    }
                } else {
                    triggered = false;
                }
            });

            match result {
                Ok(()) => tracing::warn!("Hotkey listener exited unexpectedly. Restarting shortly"),
                Err(e) => tracing::warn!("Hotkey listener failed: {:?}. Retrying shortly", e),
            }

            thread::sleep(Duration::from_millis(500));
        });
        true
    }

    #[cfg(not(target_os = "windows"))]
    pub fn start_listener(&self) -> bool {
        tracing::info!(hotkey = %self.hotkey, "global hotkeys are not supported on this platform");
        false
    }
}

#[cfg(target_os = "windows")]
fn rdev_key(c: char) -> Option<rdev::Key> {
    use rdev::Key;
    Some(match c {
        'a' => Key::KeyA,
        'b' => Key::KeyB,
        'c' => Key::KeyC,
        'd' => Key::KeyD,
        'e' => Key::KeyE,
        'f' => Key::KeyF,
        'g' => Key::KeyG,
        'h' => Key::KeyH,
        'i' => Key::KeyI,
        'j' => Key::KeyJ,
        'k' => Key::KeyK,
        'l' => Key::KeyL,
        'm' => Key::KeyM,
        'n' => Key::KeyN,
        'o' => Key::KeyO,
        'p' => Key::KeyP,
        'q' => Key::KeyQ,
        'r' => Key::KeyR,
        's' => Key::KeyS,
        't' => Key::KeyT,
        'u' => Key::KeyU,
        'v' => Key::KeyV,
        'w' => Key::KeyW,
        'x' => Key::KeyX,
        'y' => Key::KeyY,
        'z' => Key::KeyZ,
        '0' => Key::Num0,
        '1' => Key::Num1,
        '2' => Key::Num2,
        '3' => Key::Num3,
        '4' => Key::Num4,
        '5' => Key::Num5,
        '6' => Key::Num6,
        '7' => Key::Num7,
        '8' => Key::Num8,
        '9' => Key::Num9,
        _ => return None,
    })
}
