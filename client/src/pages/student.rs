//! Student section (`student` role).

use leptos::prelude::*;

#[component]
pub fn StudentPage() -> impl IntoView {
    view! {
        <section class="section-page">
            <h2>"Student portal"</h2>
            <p>"View your grades and schedule here."</p>
        </section>
    }
}
