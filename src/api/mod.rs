//! Article Editor WASM API
//!
//! The JavaScript-facing surface of the crate.
//!
//! # Module Structure
//!
//! - `helpers`: console logging macros, serialization and error conversion
//! - `editor`: the WASM-owned editor and every user action
//! - `routes`: the HTTP route handlers, for service-worker hosts

pub mod helpers;
pub mod editor;
pub mod routes;

pub use editor::*;
pub use routes::{handle_links_route, handle_transform_route};
