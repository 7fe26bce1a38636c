//! # complete_core
//!
//! UI-agnostic editing/state layer for autocomplete text inputs.
//!
//! This crate provides the fundamental building blocks for suggestion-driven
//! text editing:
//! - [`word_at`]/[`replace_word_at`]/[`complete_word_at`]: separator-delimited
//!   word editing — locate the entry under the caret, splice a committed
//!   suggestion into it, or type ahead with a candidate's remainder
//! - [`ValueStore`]: central store for input values, caret positions, and
//!   selections, keyed by an opaque [`WidgetId`]
//! - [`SelectionRange`]: a text selection with start/end byte offsets
//!
//! ## Design Principles
//!
//! This crate is intentionally UI-agnostic and does not depend on:
//! - Any graphics or widget framework
//! - DOM, layout, or hit-testing systems
//! - Data binding or list rendering
//!
//! All word operations are pure functions over caller-supplied text and caret
//! arguments; the store holds host input state so integration layers can read
//! it, call the editing functions, and apply the results back.
//!
//! ## Integration
//!
//! Hosts identify inputs with their own id types and convert at the boundary:
//! ```ignore
//! // In your integration layer:
//! impl From<dom::NodeId> for WidgetId {
//!     fn from(id: dom::NodeId) -> Self {
//!         WidgetId::from_raw(id.0 as u64)
//!     }
//! }
//! ```

mod id;
mod selection;
mod store;
mod text;
mod word;

pub use id::WidgetId;
pub use selection::SelectionRange;
pub use store::ValueStore;
pub use word::{
    EditResult, complete_word_at, replace_word_at, typed_prefix_at, word_at, word_index_at,
};

// Re-export text utilities for integration layers that manage their own
// caret state.
pub use text::{
    clamp_to_char_boundary, filter_single_line, find_ignore_case, next_cursor_boundary,
    prev_cursor_boundary,
};
