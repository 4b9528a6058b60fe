//! Root application component with routing and context providers.

use authkit::bus::AuthEventBus;
use authkit::controller::{self, ControllerOptions, CurrentLocation, Reaction};
use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    NavigateOptions, StaticSegment,
    components::{Route, Router, Routes},
    hooks::{use_location, use_navigate},
};

use crate::components::authed_layout::AuthedLayout;
use crate::pages::{
    admin::{AdminPage, AdminUsersPage},
    dashboard::DashboardPage,
    home::HomePage,
    login::LoginPage,
    logout::LogoutPage,
    register::RegisterPage,
    student::StudentPage,
    teacher::TeacherPage,
    unauthorized::{NotFoundPage, UnauthorizedPage},
};
use crate::state::auth::{AuthBus, AuthState, refresh_user};
use crate::util::dark_mode;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <script inner_html=dark_mode::init_script()></script>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

fn new_bus() -> AuthEventBus {
    #[cfg(feature = "hydrate")]
    {
        crate::util::tab_channel::browser_bus()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        AuthEventBus::unavailable()
    }
}

/// Root application component.
///
/// Provides the auth state and the tab's auth event bus, then sets up
/// client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::pending());
    let bus: AuthBus = StoredValue::new_local(new_bus());
    provide_context(auth);
    provide_context(bus);
    on_cleanup(move || {
        let _ = bus.try_with_value(AuthEventBus::dispose);
    });

    Effect::new(move || {
        dark_mode::apply(dark_mode::read_preference());
        refresh_user(auth);
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/eduvault.css"/>
        <Title text="EduVault"/>

        <Router>
            <AuthSync/>
            <Routes fallback=NotFoundPage>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("logout") view=LogoutPage/>
                <Route path=StaticSegment("register") view=RegisterPage/>
                <Route path=StaticSegment("unauthorized") view=UnauthorizedPage/>
                <Route
                    path=StaticSegment("dashboard")
                    view=|| view! { <AuthedLayout><DashboardPage/></AuthedLayout> }
                />
                <Route
                    path=StaticSegment("admin")
                    view=|| view! { <AuthedLayout><AdminPage/></AuthedLayout> }
                />
                <Route
                    path=(StaticSegment("admin"), StaticSegment("users"))
                    view=|| view! { <AuthedLayout><AdminUsersPage/></AuthedLayout> }
                />
                <Route
                    path=StaticSegment("teacher")
                    view=|| view! { <AuthedLayout><TeacherPage/></AuthedLayout> }
                />
                <Route
                    path=StaticSegment("student")
                    view=|| view! { <AuthedLayout><StudentPage/></AuthedLayout> }
                />
            </Routes>
        </Router>
    }
}

/// Keeps this tab in step with auth changes made elsewhere.
///
/// Subscribes to the bus for the lifetime of the router, and refreshes the
/// user when the tab becomes visible or regains focus. Decisions come from
/// `authkit::controller`; this only applies them.
#[component]
fn AuthSync() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let bus = expect_context::<AuthBus>();
    let navigate = use_navigate();
    let location = use_location();
    let (pathname, search, hash) = (location.pathname, location.search, location.hash);

    let apply = move |reaction: Reaction| {
        if reaction.invalidate {
            refresh_user(auth);
        }
        if let Some(nav) = reaction.navigate {
            navigate(&nav.to, NavigateOptions { replace: nav.replace, ..NavigateOptions::default() });
        }
    };

    let on_event = apply.clone();
    let subscription = bus.try_with_value(|bus| {
        bus.subscribe(move |event| {
            let (path, query, fragment) = (pathname.get_untracked(), search.get_untracked(), hash.get_untracked());
            let here = CurrentLocation { pathname: &path, query: &query, hash: &fragment };
            on_event(controller::react_to_auth_event(event.kind, here, ControllerOptions::default()));
        })
    });
    let subscription = StoredValue::new_local(subscription);
    on_cleanup(move || {
        // Dropping the guard unsubscribes; the last one closes the transport.
        let _ = subscription.try_update_value(Option::take);
    });

    #[cfg(feature = "hydrate")]
    {
        let on_visibility = apply.clone();
        let visibility = window_event_listener_untyped("visibilitychange", move |_| {
            let visible = web_sys::window()
                .and_then(|w| w.document())
                .is_some_and(|d| d.visibility_state() == web_sys::VisibilityState::Visible);
            on_visibility(controller::react_to_visibility(visible));
        });
        let focus = window_event_listener(leptos::ev::focus, move |_| apply(controller::react_to_focus()));
        on_cleanup(move || {
            visibility.remove();
            focus.remove();
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = apply;
}
