use shell_controls::hotkey::{Hotkey, HotkeySettings};
use shell_controls::settings::Settings;
use tempfile::tempdir;

#[test]
fn missing_file_yields_defaults() {
    let dir = tempdir().unwrap();
    let settings = Settings::load(dir.path().join("settings.json")).unwrap();
    assert_eq!(settings, Settings::default());
    assert!(!settings.always_on_top);
    assert_eq!(settings.hotkey(), Hotkey::default());
}

#[test]
fn partial_file_fills_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{ "always_on_top": true }"#).unwrap();

    let settings = Settings::load(&path).unwrap();
    assert!(settings.always_on_top);
    assert_eq!(settings.hotkey, HotkeySettings::default());
    assert_eq!(settings.window_size, (480.0, 320.0));
}

#[test]
fn always_on_top_survives_save_and_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");
    let mut settings = Settings::default();
    settings.always_on_top = true;
    settings.save(&path).unwrap();

    let loaded = Settings::load(&path).unwrap();
    assert!(loaded.always_on_top);
}

#[test]
fn malformed_json_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(Settings::load(&path).is_err());
}

#[test]
fn invalid_hotkey_falls_back_to_default() {
    let mut settings = Settings::default();
    settings.hotkey = HotkeySettings {
        modifiers: vec!["hyper".into()],
        key: "s".into(),
    };
    assert_eq!(settings.hotkey(), Hotkey::default());

    settings.hotkey = HotkeySettings {
        modifiers: vec!["alt".into()],
        key: "k".into(),
    };
    let hk = settings.hotkey();
    assert_eq!(hk.key, 'k');
    assert!(hk.alt && !hk.ctrl && !hk.shift && !hk.meta);
}

#[test]
fn hotkey_without_key_loads_and_falls_back() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{ "hotkey": { "modifiers": ["alt"] } }"#).unwrap();

    let settings = Settings::load(&path).unwrap();
    assert_eq!(settings.hotkey.modifiers, vec!["alt".to_string()]);
    assert!(settings.hotkey.key.is_empty());
    assert_eq!(settings.hotkey(), Hotkey::default());
}
