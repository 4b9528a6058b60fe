//! Theme initialization and switching.
//!
//! Reads the user's preference from `localStorage["theme-storage"]` and
//! applies the resolved theme as a `light`/`dark` class on the `<html>`
//! element. `System` follows `prefers-color-scheme`. Requires a browser
//! environment.
//!
//! TRADE-OFFS
//! ==========
//! Preference persistence is best-effort browser-only behavior; SSR paths
//! safely no-op to keep server rendering deterministic.

#[cfg(test)]
#[path = "dark_mode_test.rs"]
mod dark_mode_test;

use serde::{Deserialize, Serialize};

pub const STORAGE_KEY: &str = "theme-storage";

/// User-selected theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    /// Next theme in the toggle cycle.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::System,
            Self::System => Self::Light,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
            Self::System => "System",
        }
    }
}

/// Theme actually painted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolvedTheme {
    Light,
    Dark,
}

impl ResolvedTheme {
    #[must_use]
    pub fn as_class(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

#[must_use]
pub fn resolve(theme: Theme, system_dark: bool) -> ResolvedTheme {
    match theme {
        Theme::Light => ResolvedTheme::Light,
        Theme::Dark => ResolvedTheme::Dark,
        Theme::System if system_dark => ResolvedTheme::Dark,
        Theme::System => ResolvedTheme::Light,
    }
}

#[derive(Serialize, Deserialize)]
struct Persisted {
    state: PersistedState,
    #[serde(default)]
    version: u32,
}

#[derive(Serialize, Deserialize)]
struct PersistedState {
    theme: Theme,
}

/// Theme from the stored `{"state":{"theme":...},"version":0}` value.
#[must_use]
pub fn parse_stored(raw: &str) -> Option<Theme> {
    serde_json::from_str::<Persisted>(raw).ok().map(|p| p.state.theme)
}

#[must_use]
pub fn encode_stored(theme: Theme) -> String {
    let persisted = Persisted { state: PersistedState { theme }, version: 0 };
    serde_json::to_string(&persisted).unwrap_or_default()
}

/// Inline `<head>` script that applies the stored theme before first paint,
/// so hydration never starts from the wrong theme. Mirrors [`read_preference`]
/// and [`apply`].
#[must_use]
pub fn init_script() -> String {
    format!(
        r#"(function(){{try{{var t="system";var s=localStorage.getItem("{STORAGE_KEY}");if(s){{var p=JSON.parse(s);if(p&&p.state&&p.state.theme){{t=p.state.theme;}}}}var d=t==="dark"||(t==="system"&&window.matchMedia("(prefers-color-scheme: dark)").matches);var c=document.documentElement.classList;c.remove("light","dark");c.add(d?"dark":"light");}}catch(e){{}}}})();"#
    )
}

/// Read the stored theme, defaulting to [`Theme::System`].
pub fn read_preference() -> Theme {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .and_then(|storage| storage.get_item(STORAGE_KEY).ok().flatten())
            .and_then(|raw| parse_stored(&raw))
            .unwrap_or_default()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Theme::default()
    }
}

/// Whether the OS asks for a dark color scheme.
pub fn system_prefers_dark() -> bool {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()
            .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
            .map_or(false, |mq| mq.matches())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        false
    }
}

/// Put the resolved theme class on `<html>`.
pub fn apply(theme: Theme) -> ResolvedTheme {
    let resolved = resolve(theme, system_prefers_dark());
    #[cfg(feature = "hydrate")]
    {
        if let Some(el) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.document_element()) {
            let classes = el.class_list();
            let _ = classes.remove_2("light", "dark");
            let _ = classes.add_1(resolved.as_class());
        }
    }
    resolved
}

/// Apply `theme` and persist it.
pub fn set_theme(theme: Theme) -> ResolvedTheme {
    let resolved = apply(theme);
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.set_item(STORAGE_KEY, &encode_stored(theme));
        }
    }
    resolved
}
