//! Document layer
//!
//! - `model`: the contract the assist core consumes from a rich document
//! - `blocks`: WASM-owned paragraph document implementing that contract
//! - `layout`: fixed-pitch glyph geometry for the in-memory document
//! - `history`: one undo entry per dispatched transaction

pub mod blocks;
pub mod history;
pub mod layout;
pub mod model;

pub use blocks::{Block, BlockDocument, DocumentView, LinkMark, LinkView};
pub use layout::LayoutMetrics;
pub use model::{BlockContext, DocumentModel, Step, TextBlockSpan, Transaction};
