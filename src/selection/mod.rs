//! Selection tracking
//!
//! Snapshots the live selection with its paragraph context and anchor, and
//! debounces the menu transitions it drives.

pub mod tracker;

pub use tracker::{capture, SelectionTracker, Transition};
