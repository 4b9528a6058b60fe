//! Role-filtered navigation sidebar.

#[cfg(test)]
#[path = "sidebar_test.rs"]
mod sidebar_test;

use authkit::nav::{self, NavLink};
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

use crate::state::auth::AuthState;

fn link_class(link: &NavLink, pathname: &str) -> &'static str {
    if nav::is_link_active(link, pathname) { "sidebar__link sidebar__link--active" } else { "sidebar__link" }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let pathname = use_location().pathname;

    let links = move || nav::visible_links(auth.get().role());

    view! {
        <nav class="sidebar" aria-label="Main">
            <a href="/" class="sidebar__brand">"EduVault"</a>
            <ul class="sidebar__links">
                <For each=links key=|link| link.to let:link>
                    <li>
                        <A href=link.to attr:class=move || link_class(link, &pathname.get())>
                            {link.label}
                        </A>
                    </li>
                </For>
            </ul>
        </nav>
    }
}
