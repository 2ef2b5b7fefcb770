//! Article Editor WASM Module
//!
//! Selection-scoped assistance for a rich-text article editor: a debounced
//! action menu over the selection, AI rewrites with local fallbacks, and
//! keyword link suggestions, all applied back to the document as single
//! undoable transactions.

pub mod config;
pub mod document;
pub mod error;
pub mod gateway;
pub mod models;
pub mod mutation;
pub mod routes;
pub mod selection;
pub mod ui;
pub mod api;

// Re-export commonly used types
pub use config::EditorConfig;
pub use document::{BlockDocument, DocumentModel};
pub use error::{EditorError, Result};
pub use models::*;
pub use ui::{ArticleEditor, UiState, UiView};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        wasm_warn!("logger already initialized: {}", e);
    }

    log::info!("Article Editor WASM module initialized");
}
