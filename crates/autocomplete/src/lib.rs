//! # autocomplete
//!
//! Widget-level state for suggestion-driven text inputs: configuration,
//! suggestion-list highlight navigation, type-ahead completion, and commit
//! semantics for separator-delimited multi-value entry.
//!
//! The crate deliberately stops at state. The hosting UI owns the input
//! control and the popup; it feeds text/caret changes into a
//! [`ValueStore`], asks [`AutoComplete`] what to do
//! ([`AutoComplete::query`]), hands back the externally filtered items
//! ([`AutoComplete::set_suggestions`]), and renders whatever the store and
//! list say afterwards. Fetching and filtering the candidate data is
//! likewise the host's data layer's job.

mod list;
mod options;
mod widget;

pub use list::SuggestionList;
pub use options::AutoCompleteOptions;
pub use widget::{AutoComplete, QueryOutcome};

// Re-export the editing layer so hosts need only one dependency.
pub use complete_core::{EditResult, SelectionRange, ValueStore, WidgetId};
