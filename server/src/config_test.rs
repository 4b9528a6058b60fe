use std::collections::HashMap;

use super::*;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_when_nothing_is_set() {
    let cfg = ServerConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.backend_url, DEFAULT_BACKEND_URL);
    assert!(!cfg.cookie_secure);
    assert_eq!(
        cfg.timeouts,
        BackendTimeouts {
            request_secs: DEFAULT_BACKEND_REQUEST_TIMEOUT_SECS,
            connect_secs: DEFAULT_BACKEND_CONNECT_TIMEOUT_SECS
        }
    );
}

#[test]
fn overrides_are_parsed() {
    let cfg = ServerConfig::from_lookup(lookup(&[
        ("PORT", "8080"),
        ("BACKEND_URL", "https://api.eduvault.test/"),
        ("COOKIE_SECURE", "yes"),
        ("BACKEND_REQUEST_TIMEOUT_SECS", "12"),
        ("BACKEND_CONNECT_TIMEOUT_SECS", "2"),
    ]))
    .unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.backend_url, "https://api.eduvault.test");
    assert!(cfg.cookie_secure);
    assert_eq!(cfg.timeouts, BackendTimeouts { request_secs: 12, connect_secs: 2 });
}

#[test]
fn invalid_port_is_rejected() {
    let err = ServerConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
    assert_eq!(err, ConfigError::Invalid { key: "PORT", value: "eighty".into(), expected: "a non-negative integer" });
}

#[test]
fn invalid_cookie_secure_is_rejected() {
    let err = ServerConfig::from_lookup(lookup(&[("COOKIE_SECURE", "maybe")])).unwrap_err();
    assert!(err.to_string().contains("COOKIE_SECURE"));
}

#[test]
fn backend_url_must_be_http() {
    for raw in ["localhost:8000", "ftp://backend", "http://", "https://exa mple.com", "httpfoo://x"] {
        assert!(ServerConfig::from_lookup(lookup(&[("BACKEND_URL", raw)])).is_err(), "{raw}");
    }
    assert!(ServerConfig::from_lookup(lookup(&[("BACKEND_URL", "http://10.0.0.5:8000/")])).is_ok());
}

#[test]
fn parse_bool_accepts_common_spellings() {
    for raw in ["1", "true", "YES", " on "] {
        assert_eq!(parse_bool(raw), Some(true), "{raw}");
    }
    for raw in ["0", "false", "No", "off"] {
        assert_eq!(parse_bool(raw), Some(false), "{raw}");
    }
    assert_eq!(parse_bool(""), None);
}
