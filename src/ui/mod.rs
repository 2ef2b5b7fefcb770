//! Action menu and suggestion panels
//!
//! - `state`: the single-surface state machine values and tickets
//! - `editor`: `ArticleEditor`, the controller driving the state machine
//! - `placement`: floating surface geometry
//! - `view`: serializable rendering for the host

pub mod editor;
pub mod placement;
pub mod state;
pub mod view;

pub use editor::ArticleEditor;
pub use placement::{ContainerRect, FloatingPosition};
pub use state::{
    LinkPanel, LinkSearch, LinkTicket, MutationOutcome, SuggestionPanel, SuggestionStatus, Ticket,
    TransformTicket, UiState,
};
pub use view::UiView;
