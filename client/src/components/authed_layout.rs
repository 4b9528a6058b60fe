//! Shell for every page under the authenticated area.
//!
//! SYSTEM CONTEXT
//! ==============
//! Installs the client-side access guard and renders the sidebar and header
//! once a user is known. The SSR guard has already redirected anonymous and
//! wrong-role requests, so the fallback only shows while the status request
//! is in flight or a redirect is pending.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::header::Header;
use crate::components::sidebar::Sidebar;
use crate::state::auth::AuthState;
use crate::util::auth::install_access_guard;

#[component]
pub fn AuthedLayout(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_access_guard(auth, use_navigate());

    let ready = move || {
        let state = auth.get();
        !state.loading && state.user.is_some()
    };

    view! {
        <Show when=ready fallback=|| view! { <div class="page-loading" aria-busy="true">"Loading..."</div> }>
            <div class="authed-shell">
                <Sidebar/>
                <div class="authed-shell__main">
                    <Header/>
                    <main class="authed-shell__content">{children()}</main>
                </div>
            </div>
        </Show>
    }
}
