//! Networking modules for the backend auth API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs the HTTP calls through the same-origin `/api` proxy and
//! `types` holds the request bodies and result classification.

pub mod api;
pub mod types;
