//! Router-agnostic auth building blocks shared by `client` and `server`.
//!
//! SYSTEM CONTEXT
//! ==============
//! The Django backend owns sessions and every authorization decision. This
//! crate only keeps open tabs in agreement about "someone logged in/out",
//! classifies navigation targets, and refuses unsafe post-login redirects.
//! Nothing here touches the DOM or the router directly: browser transports
//! live in `client::util::tab_channel`, and router side effects are applied
//! by thin adapters on top of [`controller`].

pub mod access;
pub mod bus;
pub mod controller;
pub mod event;
pub mod nav;
pub mod protection;
pub mod redirects;
pub mod roles;
pub mod routes;
pub mod transport;
pub mod wire;

pub use access::{access_for, Access, Viewer};
pub use bus::{AuthEventBus, Subscription};
pub use controller::{react_to_auth_event, ControllerOptions, CurrentLocation, Reaction};
pub use event::{AuthEvent, AuthEventType};
pub use protection::{is_protected, is_protected_path, is_route_protected};
pub use redirects::{build_return_parameter, safe_redirect_path};
