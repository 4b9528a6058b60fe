//! `/logout`: ends the session, tells the other tabs, then reloads into
//! `/login`.

#[cfg(test)]
#[path = "logout_test.rs"]
mod logout_test;

use authkit::event::AuthEventType;
use authkit::redirects::LOGIN_PATH;
use leptos::prelude::*;

use crate::net::types::LogoutResult;
use crate::state::auth::{AuthBus, announce};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum LogoutStatus {
    Pending,
    Done,
    Failed(String),
}

/// Only a failure to reach the backend (or get a CSRF token) keeps the tab
/// here; an HTTP error from the logout call itself still signs the tab out.
pub(crate) fn logout_status(result: &LogoutResult) -> LogoutStatus {
    match &result.error {
        Some(error) => LogoutStatus::Failed(error.clone()),
        None => LogoutStatus::Done,
    }
}

#[component]
pub fn LogoutPage() -> impl IntoView {
    let bus = expect_context::<AuthBus>();
    let status = RwSignal::new(LogoutStatus::Pending);

    Effect::new(move || {
        leptos::task::spawn_local(async move {
            let next = logout_status(&crate::net::api::logout().await);
            if next == LogoutStatus::Done {
                announce(bus, AuthEventType::Logout);
                #[cfg(feature = "hydrate")]
                if let Some(window) = web_sys::window() {
                    let _ = window.location().replace(LOGIN_PATH);
                }
            }
            status.set(next);
        });
    });

    view! {
        <div class="auth-page">
            <div class="auth-card auth-card--center">
                {move || match status.get() {
                    LogoutStatus::Pending | LogoutStatus::Done => view! {
                        <div class="spinner" aria-hidden="true"></div>
                        <p>"Signing out..."</p>
                    }.into_any(),
                    LogoutStatus::Failed(error) => view! {
                        <div class="auth-alert" role="alert">
                            <p class="auth-alert__title">"Logout failed"</p>
                            <p>{error}</p>
                            <a href=LOGIN_PATH>"Back to sign in"</a>
                        </div>
                    }.into_any(),
                }}
            </div>
        </div>
    }
}
