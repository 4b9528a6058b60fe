//! Client-side route guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! The SSR guard already redirects on the initial request. This covers
//! client-side navigation and auth changes after hydration, using the same
//! `authkit::access` rules so both sides agree.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use authkit::access::access_for;
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_location;

use crate::state::auth::AuthState;

/// Where to send the viewer, if anywhere. `None` while auth is loading.
pub fn guard_redirect(state: &AuthState, pathname: &str, query: &str) -> Option<String> {
    if state.loading {
        return None;
    }
    access_for(pathname, query, state.viewer()).redirect_target().map(str::to_owned)
}

/// Re-run [`guard_redirect`] whenever auth or the location changes.
pub fn install_access_guard<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let location = use_location();
    Effect::new(move || {
        let state = auth.get();
        let pathname = location.pathname.get();
        let query = location.search.get();
        if let Some(target) = guard_redirect(&state, &pathname, &query) {
            navigate(&target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}
