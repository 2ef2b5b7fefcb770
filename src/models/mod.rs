//! Data models for the article assist core
//!
//! Plain serde types shared by the tracker, the gateway and the panel state
//! machine. None of them hold references into the live document.

pub mod links;
pub mod range;
pub mod snapshot;
pub mod transform;

// Re-export commonly used types
pub use links::{LinkList, LinkSuggestion, LinkSuggestions};
pub use range::{AnchorPoint, DocRange, GlyphRect, Selection};
pub use snapshot::SelectionSnapshot;
pub use transform::{TransformKind, TransformRequest, TransformResult};
