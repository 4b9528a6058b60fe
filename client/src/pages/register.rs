//! Registration page.
//!
//! Client-side checks mirror the backend rules; whatever the backend still
//! rejects comes back as per-field messages. A successful registration signs
//! the user in, so it is announced as `login`.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use std::collections::BTreeMap;

use authkit::event::AuthEventType;
use authkit::redirects;
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::components::form_field::FormField;
use crate::components::password_strength::PasswordStrengthMeter;
use crate::net::types::RegisterInput;
use crate::state::auth::{AuthBus, AuthState, announce, refresh_user};
use crate::util::validation::{self, trimmed};

/// Raw form values as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub password_confirm: String,
    pub terms_accepted: bool,
    pub marketing_opt_in: bool,
}

impl RegisterForm {
    /// Request body with text fields trimmed.
    pub(crate) fn to_input(&self) -> RegisterInput {
        let phone = trimmed(&self.phone);
        RegisterInput {
            email: trimmed(&self.email),
            phone: (!phone.is_empty()).then_some(phone),
            password: self.password.clone(),
            password_confirm: self.password_confirm.clone(),
            first_name: trimmed(&self.first_name),
            last_name: trimmed(&self.last_name),
            terms_accepted: self.terms_accepted,
            marketing_opt_in: self.marketing_opt_in,
        }
    }
}

pub(crate) const TERMS_REQUIRED: &str = "You must accept the terms to continue.";
pub(crate) const FIX_FIELDS: &str = "Please fix the highlighted fields.";

/// Field name to first error, empty when the form may be submitted.
pub(crate) fn validate_form(form: &RegisterForm) -> BTreeMap<String, String> {
    let email = form.email.trim();
    let phone = form.phone.trim();
    let checks = [
        ("first_name", validation::validate_required(&form.first_name, "First name")),
        ("last_name", validation::validate_required(&form.last_name, "Last name")),
        ("email", validation::validate_at_least_one_contact(email, phone).and_then(|()| validation::validate_email(email))),
        ("phone", validation::validate_phone(phone)),
        ("password", validation::validate_password(&form.password)),
        ("password_confirm", validation::validate_password_match(&form.password, &form.password_confirm)),
    ];
    let mut errors: BTreeMap<String, String> =
        checks.into_iter().filter_map(|(field, check)| check.err().map(|e| (field.to_owned(), e))).collect();
    if !form.terms_accepted {
        errors.insert("terms_accepted".to_owned(), TERMS_REQUIRED.to_owned());
    }
    errors
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let bus = expect_context::<AuthBus>();
    let navigate = use_navigate();
    let search = use_location().search;

    // Already signed in: continue where the visitor was headed.
    let navigate_away = navigate.clone();
    Effect::new(move || {
        let state = auth.get();
        if !state.loading && state.user.is_some() {
            let destination = redirects::post_login_destination(&search.get_untracked());
            navigate_away(&destination, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    let form = RwSignal::new(RegisterForm::default());
    let busy = RwSignal::new(false);
    let global_error = RwSignal::new(None::<String>);
    let field_errors = RwSignal::new(BTreeMap::<String, String>::new());

    let field_error = move |field: &'static str| Signal::derive(move || field_errors.with(|errs| errs.get(field).cloned()));
    let password = Signal::derive(move || form.with(|f| f.password.clone()));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        global_error.set(None);
        let current = form.get_untracked();
        let errors = validate_form(&current);
        if !errors.is_empty() {
            let terms_only = errors.len() == 1 && errors.contains_key("terms_accepted");
            global_error.set(Some(if terms_only { TERMS_REQUIRED } else { FIX_FIELDS }.to_owned()));
            field_errors.set(errors);
            return;
        }
        field_errors.set(BTreeMap::new());
        busy.set(true);

        let navigate = navigate.clone();
        let query = search.get_untracked();
        leptos::task::spawn_local(async move {
            let result = crate::net::api::register(&current.to_input()).await;
            busy.set(false);
            if !result.success {
                if result.field_errors.is_empty() {
                    global_error.set(Some(result.error.unwrap_or_else(|| "Registration failed. Please try again.".to_owned())));
                } else {
                    field_errors.set(result.field_errors.iter().map(|(f, msgs)| (f.clone(), msgs.join(", "))).collect());
                    global_error.set(Some(FIX_FIELDS.to_owned()));
                }
                return;
            }
            announce(bus, AuthEventType::Login);
            refresh_user(auth);
            let destination = redirects::post_login_destination(&query);
            navigate(&destination, NavigateOptions { replace: true, ..NavigateOptions::default() });
        });
    };

    let login_href = move || {
        redirects::query_param(&search.get(), redirects::FROM_PARAM)
            .map_or_else(|| redirects::LOGIN_PATH.to_owned(), |from| redirects::login_path_with_return(&from))
    };

    view! {
        <div class="auth-page">
            <div class="auth-card auth-card--wide">
                <h1 class="auth-card__title">"Create your account"</h1>
                <form class="auth-form" on:submit=on_submit aria-busy=move || busy.get().to_string()>
                    <div class="auth-form__row">
                        <FormField label="First name" html_for="first_name" required=true error=field_error("first_name")>
                            <input
                                id="first_name"
                                type="text"
                                autocomplete="given-name"
                                prop:value=move || form.with(|f| f.first_name.clone())
                                on:input=move |ev| form.update(|f| f.first_name = event_target_value(&ev))
                            />
                        </FormField>
                        <FormField label="Last name" html_for="last_name" required=true error=field_error("last_name")>
                            <input
                                id="last_name"
                                type="text"
                                autocomplete="family-name"
                                prop:value=move || form.with(|f| f.last_name.clone())
                                on:input=move |ev| form.update(|f| f.last_name = event_target_value(&ev))
                            />
                        </FormField>
                    </div>
                    <FormField label="Email" html_for="email" error=field_error("email")>
                        <input
                            id="email"
                            type="email"
                            autocomplete="email"
                            prop:value=move || form.with(|f| f.email.clone())
                            on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                        />
                    </FormField>
                    <FormField
                        label="Phone"
                        html_for="phone"
                        error=field_error("phone")
                        helper="+224 followed by 9 digits"
                    >
                        <input
                            id="phone"
                            type="tel"
                            autocomplete="tel"
                            prop:value=move || form.with(|f| f.phone.clone())
                            on:input=move |ev| {
                                form.update(|f| f.phone = validation::format_phone_number(&event_target_value(&ev)));
                            }
                        />
                    </FormField>
                    <FormField label="Password" html_for="password" required=true error=field_error("password")>
                        <input
                            id="password"
                            type="password"
                            autocomplete="new-password"
                            prop:value=password
                            on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                        />
                        <PasswordStrengthMeter password/>
                    </FormField>
                    <FormField
                        label="Confirm password"
                        html_for="password_confirm"
                        required=true
                        error=field_error("password_confirm")
                    >
                        <input
                            id="password_confirm"
                            type="password"
                            autocomplete="new-password"
                            prop:value=move || form.with(|f| f.password_confirm.clone())
                            on:input=move |ev| form.update(|f| f.password_confirm = event_target_value(&ev))
                        />
                    </FormField>
                    <label class="auth-form__checkbox">
                        <input
                            type="checkbox"
                            prop:checked=move || form.with(|f| f.terms_accepted)
                            on:change=move |ev| form.update(|f| f.terms_accepted = event_target_checked(&ev))
                        />
                        "I accept the terms of use"
                    </label>
                    <label class="auth-form__checkbox">
                        <input
                            type="checkbox"
                            prop:checked=move || form.with(|f| f.marketing_opt_in)
                            on:change=move |ev| form.update(|f| f.marketing_opt_in = event_target_checked(&ev))
                        />
                        "Send me product news"
                    </label>
                    <Show when=move || global_error.with(Option::is_some)>
                        <div class="auth-alert" role="alert">{move || global_error.get().unwrap_or_default()}</div>
                    </Show>
                    <button class="auth-form__submit" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Creating account..." } else { "Create account" }}
                    </button>
                </form>
                <p class="auth-card__footer">
                    "Already registered? "
                    <a href=login_href>"Sign in"</a>
                </p>
            </div>
        </div>
    }
}
