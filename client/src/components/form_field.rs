//! Labelled form field with an error slot.

use leptos::prelude::*;

#[component]
pub fn FormField(
    label: &'static str,
    html_for: &'static str,
    #[prop(into)] error: Signal<Option<String>>,
    #[prop(optional)] required: bool,
    #[prop(optional)] helper: Option<&'static str>,
    children: Children,
) -> impl IntoView {
    let error_id = format!("{html_for}-error");
    view! {
        <div class="form-field" class:form-field--invalid=move || error.get().is_some()>
            <label for=html_for class="form-field__label">
                {label}
                {required.then_some(view! { <span class="form-field__required">" *"</span> })}
            </label>
            {children()}
            {helper.map(|text| view! { <p class="form-field__helper">{text}</p> })}
            <Show when=move || error.get().is_some_and(|e| !e.trim().is_empty())>
                <p id=error_id.clone() class="form-field__error" role="alert">
                    {move || error.get().unwrap_or_default()}
                </p>
            </Show>
        </div>
    }
}
