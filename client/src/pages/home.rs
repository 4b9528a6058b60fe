//! Public landing page.

use leptos::prelude::*;

use crate::state::auth::AuthState;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let signed_in = move || auth.with(|s| s.user.is_some());

    view! {
        <div class="landing">
            <header class="landing__nav">
                <span class="landing__brand">"EduVault"</span>
                <Show
                    when=signed_in
                    fallback=|| view! {
                        <a href="/login" class="landing__link">"Sign in"</a>
                        <a href="/register" class="landing__cta">"Get started"</a>
                    }
                >
                    <a href="/dashboard" class="landing__cta">"Open dashboard"</a>
                </Show>
            </header>
            <section class="landing__hero">
                <h1>"School management for Guinea"</h1>
                <p>"Classes, grades, schedules and payments in one place for administrators, teachers, students and parents."</p>
            </section>
        </div>
    }
}
