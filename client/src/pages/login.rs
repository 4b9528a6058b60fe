//! Login page: identifier (email, phone or username) + password.
//!
//! SYSTEM CONTEXT
//! ==============
//! On success this tab announces `login` on the auth bus, so other tabs
//! sitting on `/login` follow along, then continues to the sanitized
//! `?from=` target.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use std::collections::BTreeMap;

use authkit::event::AuthEventType;
use authkit::redirects;
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::components::form_field::FormField;
use crate::net::types::{AuthResult, LoginInput};
use crate::state::auth::{AuthBus, AuthState, refresh_user};
use crate::util::auth::install_access_guard;

const LOCKED_CODE: &str = "ACCOUNT_LOCKED";
const INVALID_CREDENTIALS_CODE: &str = "INVALID_CREDENTIALS";

/// What the form shows after a failed attempt.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginFeedback {
    pub message: String,
    pub locked: bool,
    pub cooldown_secs: Option<u32>,
    pub field_errors: BTreeMap<String, String>,
}

pub(crate) fn login_feedback(result: &AuthResult) -> LoginFeedback {
    let error = result.error.as_deref().unwrap_or_default();
    let code = result.error_code.as_deref();

    if code == Some(LOCKED_CODE) || error.contains("locked") {
        return LoginFeedback {
            message: "Account temporarily locked. Please contact support or try again later.".to_owned(),
            locked: true,
            ..LoginFeedback::default()
        };
    }
    if let Some(secs) = result.retry_after {
        return LoginFeedback {
            message: format!("Too many attempts. Try again in {secs} seconds."),
            cooldown_secs: Some(secs),
            ..LoginFeedback::default()
        };
    }
    if !result.field_errors.is_empty() {
        let field_errors = result.field_errors.iter().map(|(field, msgs)| (field.clone(), msgs.join(", "))).collect();
        return LoginFeedback {
            message: "Please fix the highlighted fields.".to_owned(),
            field_errors,
            ..LoginFeedback::default()
        };
    }
    if code == Some(INVALID_CREDENTIALS_CODE) || error.contains("Invalid") || error.contains("Incorrect") {
        // Mark both fields without saying which one is wrong.
        let field_errors = ["identifier", "password"].into_iter().map(|f| (f.to_owned(), " ".to_owned())).collect();
        return LoginFeedback {
            message: "Incorrect identifier or password.".to_owned(),
            field_errors,
            ..LoginFeedback::default()
        };
    }
    let message = if error.is_empty() { "Login failed. Please try again." } else { error };
    LoginFeedback { message: message.to_owned(), ..LoginFeedback::default() }
}

pub(crate) fn validate_identifier(value: &str) -> Option<&'static str> {
    value.trim().is_empty().then_some("Please enter your email, phone, or username")
}

pub(crate) fn validate_password(value: &str) -> Option<&'static str> {
    value.is_empty().then_some("Please enter your password")
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let bus = expect_context::<AuthBus>();
    let navigate = use_navigate();
    let search = use_location().search;
    install_access_guard(auth, navigate.clone());

    let identifier = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let remember_me = RwSignal::new(false);
    let busy = RwSignal::new(false);
    let feedback = RwSignal::new(None::<LoginFeedback>);
    let cooldown = RwSignal::new(None::<u32>);
    let field_errors = RwSignal::new(BTreeMap::<String, String>::new());

    let field_error = move |field: &'static str| Signal::derive(move || field_errors.with(|errs| errs.get(field).cloned()));
    let set_field_error = move |field: &'static str, error: Option<&str>| {
        field_errors.update(|errs| match error {
            Some(e) => {
                errs.insert(field.to_owned(), e.to_owned());
            }
            None => {
                errs.remove(field);
            }
        });
    };

    let start_cooldown = move |secs: u32| {
        cooldown.set(Some(secs));
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            loop {
                gloo_timers::future::TimeoutFuture::new(1_000).await;
                let Some(left) = cooldown.try_get_untracked().flatten() else { break };
                if left <= 1 {
                    cooldown.set(None);
                    break;
                }
                cooldown.set(Some(left - 1));
            }
        });
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() || cooldown.get_untracked().is_some() {
            return;
        }
        let input = LoginInput {
            identifier: identifier.get_untracked(),
            password: password.get_untracked(),
            remember_me: remember_me.get_untracked(),
        };
        busy.set(true);
        feedback.set(None);
        field_errors.set(BTreeMap::new());

        let navigate = navigate.clone();
        let query = search.get_untracked();
        leptos::task::spawn_local(async move {
            let result = crate::net::api::login(&input).await;
            busy.set(false);
            if !result.success {
                let next = login_feedback(&result);
                field_errors.set(next.field_errors.clone());
                if let Some(secs) = next.cooldown_secs {
                    start_cooldown(secs);
                }
                feedback.set(Some(next));
                return;
            }
            crate::state::auth::announce(bus, AuthEventType::Login);
            refresh_user(auth);
            let destination = redirects::post_login_destination(&query);
            navigate(&destination, NavigateOptions { replace: true, ..NavigateOptions::default() });
        });
    };

    let locked = move || feedback.with(|f| f.as_ref().is_some_and(|f| f.locked));
    let disabled = move || busy.get() || cooldown.get().is_some() || locked();
    let register_href = move || {
        let from = redirects::query_param(&search.get(), redirects::FROM_PARAM);
        from.map_or_else(|| "/register".to_owned(), |from| redirects::path_with_return("/register", &from))
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1 class="auth-card__title">"Sign in"</h1>
                <p class="auth-card__subtitle">"Welcome back to EduVault"</p>
                <form class="auth-form" on:submit=on_submit aria-busy=move || busy.get().to_string()>
                    <FormField
                        label="Email, phone or username"
                        html_for="identifier"
                        required=true
                        error=field_error("identifier")
                    >
                        <input
                            id="identifier"
                            type="text"
                            autocomplete="username"
                            prop:value=move || identifier.get()
                            on:input=move |ev| identifier.set(event_target_value(&ev))
                            on:blur=move |_| set_field_error("identifier", validate_identifier(&identifier.get_untracked()))
                            disabled=move || busy.get()
                        />
                    </FormField>
                    <FormField label="Password" html_for="password" required=true error=field_error("password")>
                        <input
                            id="password"
                            type="password"
                            autocomplete="current-password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                            on:blur=move |_| set_field_error("password", validate_password(&password.get_untracked()))
                            disabled=move || busy.get()
                        />
                    </FormField>
                    <label class="auth-form__checkbox">
                        <input
                            type="checkbox"
                            prop:checked=move || remember_me.get()
                            on:change=move |ev| remember_me.set(event_target_checked(&ev))
                        />
                        "Remember me"
                    </label>
                    <Show when=move || feedback.with(Option::is_some)>
                        <div class="auth-alert" class:auth-alert--warning=locked role="alert">
                            <p>{move || feedback.with(|f| f.as_ref().map(|f| f.message.clone()).unwrap_or_default())}</p>
                            <Show when=locked>
                                <a href="mailto:support@eduvault.app">"Contact support"</a>
                            </Show>
                        </div>
                    </Show>
                    <button class="auth-form__submit" type="submit" disabled=disabled>
                        {move || match cooldown.get() {
                            Some(secs) => format!("Try again in {secs}s"),
                            None if busy.get() => "Signing in...".to_owned(),
                            None => "Sign in".to_owned(),
                        }}
                    </button>
                </form>
                <p class="auth-card__footer">
                    "No account yet? "
                    <a href=register_href>"Create one"</a>
                </p>
            </div>
        </div>
    }
}

