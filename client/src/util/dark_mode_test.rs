use super::*;

#[test]
fn resolve_follows_system_only_for_system_theme() {
    assert_eq!(resolve(Theme::System, true), ResolvedTheme::Dark);
    assert_eq!(resolve(Theme::System, false), ResolvedTheme::Light);
    assert_eq!(resolve(Theme::Light, true), ResolvedTheme::Light);
    assert_eq!(resolve(Theme::Dark, false), ResolvedTheme::Dark);
}

#[test]
fn stored_value_uses_persist_envelope() {
    assert_eq!(encode_stored(Theme::Dark), r#"{"state":{"theme":"dark"},"version":0}"#);
    assert_eq!(parse_stored(r#"{"state":{"theme":"light"},"version":0}"#), Some(Theme::Light));
    assert_eq!(parse_stored(r#"{"state":{"theme":"system"}}"#), Some(Theme::System));
    assert_eq!(parse_stored("dark"), None);
    assert_eq!(parse_stored(r#"{"state":{"theme":"sepia"}}"#), None);
}

#[test]
fn toggle_cycles_through_all_themes() {
    assert_eq!(Theme::Light.next(), Theme::Dark);
    assert_eq!(Theme::Dark.next(), Theme::System);
    assert_eq!(Theme::System.next(), Theme::Light);
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn browser_calls_are_noops_without_hydrate() {
    assert_eq!(read_preference(), Theme::System);
    assert!(!system_prefers_dark());
    assert_eq!(apply(Theme::Dark), ResolvedTheme::Dark);
    assert_eq!(set_theme(Theme::System), ResolvedTheme::Light);
}

#[test]
fn init_script_reads_stored_theme_and_sets_class() {
    let script = init_script();
    assert!(script.contains(r#"localStorage.getItem("theme-storage")"#));
    assert!(script.contains("p.state.theme"));
    assert!(script.contains("prefers-color-scheme: dark"));
    assert!(script.contains(r#"c.remove("light","dark")"#));
    assert!(!script.contains("{{"));
}
