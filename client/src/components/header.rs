//! Top bar of the authenticated shell: theme toggle and user menu.

#[cfg(test)]
#[path = "header_test.rs"]
mod header_test;

use authkit::roles::UserRole;
use leptos::prelude::*;

use crate::components::theme_toggle::ThemeToggle;
use crate::state::auth::AuthState;

fn role_label(role: Option<UserRole>) -> &'static str {
    match role {
        Some(UserRole::Admin) => "Administrator",
        Some(UserRole::Teacher) => "Teacher",
        Some(UserRole::Student) => "Student",
        Some(UserRole::Parent) => "Parent",
        Some(UserRole::SystemAdmin) => "System administrator",
        None => "Member",
    }
}

#[component]
pub fn Header() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let open = RwSignal::new(false);

    let name = move || auth.with(|s| s.user.as_ref().map(|u| u.display_name().to_owned()).unwrap_or_default());
    let initials = move || auth.with(|s| s.user.as_ref().map(authkit::wire::User::initials).unwrap_or_default());
    let role = move || role_label(auth.with(AuthState::role));

    view! {
        <header class="app-header">
            <ThemeToggle/>
            <div class="user-menu">
                <button
                    class="user-menu__trigger"
                    aria-haspopup="menu"
                    aria-expanded=move || open.get().to_string()
                    on:click=move |_| open.update(|o| *o = !*o)
                >
                    <span class="user-menu__avatar">{initials}</span>
                    <span class="user-menu__name">{name}</span>
                </button>
                <Show when=move || open.get()>
                    <div class="user-menu__panel" role="menu">
                        <p class="user-menu__role">{role}</p>
                        <a href="/logout" class="user-menu__item" role="menuitem">"Sign out"</a>
                    </div>
                </Show>
            </div>
        </header>
    }
}
