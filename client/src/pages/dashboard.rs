//! Dashboard: the authenticated landing route for every role.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use authkit::nav;
use authkit::wire::{SecurityLevel, User};
use leptos::prelude::*;

use crate::state::auth::AuthState;

pub(crate) fn greeting(user: &User) -> String {
    let first = user.first_name.trim();
    let name = if first.is_empty() { user.display_name() } else { first };
    format!("Welcome, {name}")
}

pub(crate) fn security_class(level: SecurityLevel) -> &'static str {
    match level {
        SecurityLevel::Low => "security-badge security-badge--low",
        SecurityLevel::Medium => "security-badge security-badge--medium",
        SecurityLevel::High => "security-badge security-badge--high",
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    let title = move || auth.with(|s| s.user.as_ref().map(greeting).unwrap_or_default());
    let security = move || auth.with(|s| s.user.as_ref().map(|u| u.security).unwrap_or_default());
    let unverified = move || auth.with(|s| s.user.as_ref().is_some_and(|u| !u.is_verified));
    // Skip the dashboard link itself.
    let shortcuts = move || nav::visible_links(auth.with(AuthState::role)).into_iter().skip(1).collect::<Vec<_>>();

    view! {
        <section class="dashboard">
            <h2 class="dashboard__title">{title}</h2>
            <Show when=unverified>
                <p class="auth-alert auth-alert--warning">"Your account is not verified yet. Check your email or SMS."</p>
            </Show>
            <div class="dashboard__card">
                <h3>"Account security"</h3>
                <span class=move || security_class(security().level)>
                    {move || format!("{} / 100", security().score)}
                </span>
            </div>
            <div class="dashboard__shortcuts">
                <For each=shortcuts key=|link| link.to let:link>
                    <a href=link.to class="dashboard__shortcut">{link.label}</a>
                </For>
            </div>
        </section>
    }
}
