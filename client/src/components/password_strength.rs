//! Strength meter shown under the registration password field.

use leptos::prelude::*;

use crate::util::validation::password_strength;

#[component]
pub fn PasswordStrengthMeter(#[prop(into)] password: Signal<String>) -> impl IntoView {
    let strength = Memo::new(move |_| password.with(|p| password_strength(p)));

    view! {
        <Show when=move || password.with(|p| !p.is_empty())>
            <div class="password-strength">
                <div class="password-strength__track">
                    <div
                        class=move || format!("password-strength__bar password-strength__bar--{}", strength.get().level.as_str())
                        style=move || format!("width: {}%", strength.get().score)
                    ></div>
                </div>
                <ul class="password-strength__feedback">
                    {move || strength.get().feedback.into_iter().map(|hint| view! { <li>{hint}</li> }).collect_view()}
                </ul>
            </div>
        </Show>
    }
}
