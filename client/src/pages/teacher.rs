//! Teacher section (`teacher` role).

use leptos::prelude::*;

#[component]
pub fn TeacherPage() -> impl IntoView {
    view! {
        <section class="section-page">
            <h2>"My classes"</h2>
            <p>"Manage your classes and record grades here."</p>
        </section>
    }
}
