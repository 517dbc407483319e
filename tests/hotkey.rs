use shell_controls::hotkey::{
    available_keys, available_modifiers, parse_hotkey, Hotkey, HotkeySettings, HotkeyTrigger,
};

#[test]
fn default_is_ctrl_shift_s() {
    let hk = HotkeySettings::default().to_hotkey().expect("default should parse");
    assert_eq!(hk, Hotkey::default());
    assert_eq!(hk.to_string(), "Ctrl+Shift+S");
}

#[test]
fn parse_combo_hotkey() {
    let hk = parse_hotkey("Ctrl+Alt+7").expect("should parse combination");
    assert_eq!(hk.key, '7');
    assert!(hk.ctrl && hk.alt && !hk.shift && !hk.meta);

    let hk = parse_hotkey("cmd + q").expect("cmd is an alias of meta");
    assert_eq!(hk.key, 'q');
    assert!(hk.meta && !hk.ctrl);
}

#[test]
fn parse_invalid_hotkey() {
    assert!(parse_hotkey("Ctrl+Foo").is_none());
    assert!(parse_hotkey("Ctrl+Shift").is_none());
    assert!(parse_hotkey("Ctrl+!").is_none());
}

#[test]
fn settings_reject_unknown_parts() {
    let bad_key = HotkeySettings {
        modifiers: vec!["ctrl".into()],
        key: "F13".into(),
    };
    assert!(bad_key.to_hotkey().is_none());

    let bad_mod = HotkeySettings {
        modifiers: vec!["ctrl".into(), "super-duper".into()],
        key: "a".into(),
    };
    assert!(bad_mod.to_hotkey().is_none());
}

#[test]
fn available_lists() {
    assert_eq!(available_modifiers(), vec!["ctrl", "shift", "alt", "meta"]);
    let keys = available_keys();
    assert_eq!(keys.len(), 36);
    assert_eq!(keys.first().map(String::as_str), Some("a"));
    assert_eq!(keys.last().map(String::as_str), Some("9"));
    for k in &keys {
        let settings = HotkeySettings {
            modifiers: vec![],
            key: k.clone(),
        };
        assert!(settings.to_hotkey().is_some(), "{k} should be accepted");
    }
}

#[test]
fn trigger_take_resets() {
    let trigger = HotkeyTrigger::new(Hotkey::default());
    assert!(!trigger.take());
    trigger.fire();
    assert!(trigger.take());
    assert!(!trigger.take());
}

#[test]
fn modifiers_come_only_from_settings() {
    let none = HotkeySettings {
        modifiers: vec![],
        key: "a".into(),
    };
    assert_eq!(none.to_hotkey(), Some(Hotkey::bare('a')));
    let hk = none.to_hotkey().unwrap();
    assert!(!hk.ctrl && !hk.shift && !hk.alt && !hk.meta);
    assert_eq!(hk.to_string(), "A");

    let alt = HotkeySettings {
        modifiers: vec!["alt".into()],
        key: "a".into(),
    };
    let hk = alt.to_hotkey().expect("alt+a should parse");
    assert!(hk.alt && !hk.ctrl && !hk.shift && !hk.meta);
    assert_eq!(hk.to_string(), "Alt+A");
}
