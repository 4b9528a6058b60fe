//! Administration section (`admin` role).

use leptos::prelude::*;

#[component]
pub fn AdminPage() -> impl IntoView {
    view! {
        <section class="section-page">
            <h2>"Administration"</h2>
            <p>"Only administrators can see this."</p>
            <a href="/admin/users">"Manage users"</a>
        </section>
    }
}

#[component]
pub fn AdminUsersPage() -> impl IntoView {
    view! {
        <section class="section-page">
            <h2>"Users"</h2>
            <p>"Invite, deactivate and assign roles to school accounts."</p>
        </section>
    }
}
