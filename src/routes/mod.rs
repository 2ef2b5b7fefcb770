//! HTTP route handlers
//!
//! Framework-free handlers for the two JSON endpoints the editor talks to.
//! Each takes the raw request body and returns a status with a JSON body;
//! hosts wire them into whatever server (or service worker) they run.

pub mod links;
pub mod transform;

pub use links::{handle_links, mock_links};
pub use transform::handle_transform;

use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteResponse {
    pub status: u16,
    pub body: Value,
}

impl RouteResponse {
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "error": message.into() }),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
