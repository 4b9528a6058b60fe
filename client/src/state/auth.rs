//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Provided as an `RwSignal<AuthState>` at the root. Route guards, the
//! sidebar and the user menu read it; `AuthSync` refreshes it whenever
//! another tab logs in or out, or this tab becomes visible again.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use authkit::access::Viewer;
use authkit::bus::AuthEventBus;
use authkit::event::AuthEventType;
use authkit::roles::UserRole;
use authkit::wire::User;
use leptos::prelude::*;

/// The tab's auth event bus as provided through context. The bus is
/// single-threaded, so it lives in local arena storage.
pub type AuthBus = StoredValue<AuthEventBus, LocalStorage>;

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

impl AuthState {
    /// State while the first status request is in flight.
    #[must_use]
    pub fn pending() -> Self {
        Self { user: None, loading: true }
    }

    #[must_use]
    pub fn resolved(user: Option<User>) -> Self {
        Self { user, loading: false }
    }

    #[must_use]
    pub fn viewer(&self) -> Viewer {
        Viewer::from_user(self.user.as_ref())
    }

    #[must_use]
    pub fn role(&self) -> Option<UserRole> {
        self.user.as_ref().and_then(User::user_role)
    }
}

/// Re-fetch the current user from the status endpoint into `auth`.
pub fn refresh_user(auth: RwSignal<AuthState>) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let user = crate::net::api::fetch_current_user().await;
        auth.update(|state| *state = AuthState::resolved(user));
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = auth;
}

/// Tell this tab's listeners and every other tab about a login/logout.
pub fn announce(bus: AuthBus, kind: AuthEventType) {
    if bus.try_with_value(|bus| bus.emit(kind)).is_none() {
        log_disposed_bus(kind);
    }
}

fn log_disposed_bus(kind: AuthEventType) {
    #[cfg(feature = "hydrate")]
    log::debug!("auth bus already disposed; {} not announced", kind.as_str());
    #[cfg(not(feature = "hydrate"))]
    let _ = kind;
}
