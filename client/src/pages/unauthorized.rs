//! Role denial target and the not-found fallback.

use leptos::prelude::*;

#[component]
pub fn UnauthorizedPage() -> impl IntoView {
    view! {
        <div class="auth-page">
            <div class="auth-card auth-card--center">
                <h1 class="auth-card__title">"Access denied"</h1>
                <p>"Your account does not have access to this section."</p>
                <a href="/dashboard" class="auth-form__submit">"Back to dashboard"</a>
            </div>
        </div>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="auth-page">
            <div class="auth-card auth-card--center">
                <h1 class="auth-card__title">"Page not found"</h1>
                <a href="/">"Go home"</a>
            </div>
        </div>
    }
}
