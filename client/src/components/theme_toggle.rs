//! Button cycling light, dark and system themes.

use leptos::prelude::*;

use crate::util::dark_mode::{self, Theme};

#[component]
pub fn ThemeToggle() -> impl IntoView {
    let theme = RwSignal::new(Theme::System);
    Effect::new(move || theme.set(dark_mode::read_preference()));

    let on_click = move |_| {
        let next = theme.get_untracked().next();
        dark_mode::set_theme(next);
        theme.set(next);
    };

    view! {
        <button class="theme-toggle" title="Change theme" on:click=on_click>
            {move || theme.get().label()}
        </button>
    }
}
