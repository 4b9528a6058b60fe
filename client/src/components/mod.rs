//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the authenticated shell and the auth form pieces while
//! reading shared state from Leptos context providers.

pub mod authed_layout;
pub mod form_field;
pub mod header;
pub mod password_strength;
pub mod sidebar;
pub mod theme_toggle;
