//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`. Pages under the authenticated area are wrapped in
//! `AuthedLayout` by the router.

pub mod admin;
pub mod dashboard;
pub mod home;
pub mod login;
pub mod logout;
pub mod register;
pub mod student;
pub mod teacher;
pub mod unauthorized;
