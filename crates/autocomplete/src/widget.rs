//! Autocomplete widget state.

use complete_core::{
    ValueStore, WidgetId, complete_word_at, replace_word_at, typed_prefix_at, word_at,
};

use crate::list::SuggestionList;
use crate::options::AutoCompleteOptions;

/// What the host should do with the word under the caret.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryOutcome<'a> {
    /// The current word is empty; any open suggestion list should go away.
    Dismiss,
    /// The current word is shorter than `min_length`; nothing to do yet.
    TooShort,
    /// Ask the external data layer to filter suggestions on this term.
    Search(&'a str),
}

/// Suggestion-driven state for one text input.
///
/// The widget does not own the input's text: the hosting document owns a
/// [`ValueStore`] and passes it in, and the widget reads the value/caret from
/// it and writes edits back through it. Rendering the list, debouncing
/// searches, and fetching/filtering the candidate items are the host's
/// concerns; the widget only decides what the buffer, caret, selection, and
/// highlight become.
#[derive(Clone, Debug)]
pub struct AutoComplete {
    id: WidgetId,
    options: AutoCompleteOptions,
    list: SuggestionList,
    value_before_focus: Option<String>,
}

impl AutoComplete {
    /// Create a widget bound to the store entry `id`.
    pub fn new(id: WidgetId, options: AutoCompleteOptions) -> Self {
        Self {
            id,
            options,
            list: SuggestionList::new(),
            value_before_focus: None,
        }
    }

    /// The store entry this widget edits.
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// The widget configuration.
    pub fn options(&self) -> &AutoCompleteOptions {
        &self.options
    }

    /// The current suggestion list.
    pub fn list(&self) -> &SuggestionList {
        &self.list
    }

    /// Extract the search term for the external data layer.
    ///
    /// The term is the word under the caret (the whole value without a
    /// separator). An empty word dismisses the list; a word shorter than
    /// `min_length` (in scalar values) requests nothing.
    pub fn query<'a>(&self, store: &'a ValueStore) -> QueryOutcome<'a> {
        let (value, caret) = match store.get_state(self.id) {
            Some((value, caret, _)) => (value, caret),
            None => ("", 0),
        };

        let word = word_at(caret, value, &self.options.separator).unwrap_or("");
        if word.is_empty() {
            return QueryOutcome::Dismiss;
        }
        if word.chars().count() < self.options.min_length {
            return QueryOutcome::TooShort;
        }

        log::trace!(target: "autocomplete.search", "filter on {word:?}");
        QueryOutcome::Search(word)
    }

    /// Install freshly filtered suggestions.
    ///
    /// Highlights the first item when `suggest` or `highlight_first` is on;
    /// with `suggest` on, immediately types ahead with it. Returns whether
    /// any items are available (the host's open/close signal for its list).
    pub fn set_suggestions(&mut self, store: &mut ValueStore, items: Vec<String>) -> bool {
        self.list.set_items(items);
        if self.list.is_empty() {
            return false;
        }

        if self.options.suggest || self.options.highlight_first {
            self.list.highlight(0);
        }
        if self.options.suggest
            && let Some(text) = self.list.highlighted_text().map(str::to_owned)
        {
            self.suggest(store, &text);
        }
        true
    }

    /// Type ahead with `candidate` for the word under the caret.
    ///
    /// Suppressed while the store reports that the last edit removed text:
    /// the completion would fight the user's deletion. A suppressed call
    /// consumes the flag, so the next one goes through.
    pub fn suggest(&self, store: &mut ValueStore, candidate: &str) {
        if store.last_edit_deleted(self.id) {
            store.clear_deletion_flag(self.id);
            return;
        }

        let (value, caret) = match store.get_state(self.id) {
            Some((value, caret, _)) => (value, caret),
            None => ("", 0),
        };
        let edit = complete_word_at(caret, value, candidate, &self.options.separator, false);
        store.apply_edit(self.id, edit);
    }

    /// Move the highlight down one item; with `suggest` on, the buffer
    /// follows the highlight. Returns the new highlight.
    pub fn highlight_next(&mut self, store: &mut ValueStore) -> Option<usize> {
        let highlighted = self.list.highlight_next();
        if self.options.suggest {
            self.resuggest_highlight(store);
        }
        highlighted
    }

    /// Move the highlight up one item; with `suggest` on, the buffer follows
    /// the highlight. Returns the new highlight.
    pub fn highlight_prev(&mut self, store: &mut ValueStore) -> Option<usize> {
        let highlighted = self.list.highlight_prev();
        if self.options.suggest {
            self.resuggest_highlight(store);
        }
        highlighted
    }

    fn resuggest_highlight(&self, store: &mut ValueStore) {
        match self.list.highlighted_text() {
            Some(text) => {
                let text = text.to_owned();
                self.suggest(store, &text);
            }
            None => {
                // Highlight stepped off the list: roll the pending completion
                // back to what was actually typed.
                let typed = {
                    let (value, caret) = match store.get_state(self.id) {
                        Some((value, caret, _)) => (value, caret),
                        None => return,
                    };
                    typed_prefix_at(caret, value, &self.options.separator).to_owned()
                };
                self.suggest(store, &typed);
            }
        }
    }

    /// Commit the suggestion at `index` into the buffer.
    ///
    /// With a separator configured only the word under the caret is replaced,
    /// preserving every other entry; without one the item becomes the whole
    /// value. The committed item stays highlighted. Returns `false` if
    /// `index` is out of range.
    pub fn select(&mut self, store: &mut ValueStore, index: usize) -> bool {
        let Some(text) = self.list.items().get(index).cloned() else {
            return false;
        };

        log::debug!(target: "autocomplete.select", "commit item {index}: {text:?}");

        let new_value = if self.options.separator.is_empty() {
            text
        } else {
            let (value, caret) = match store.get_state(self.id) {
                Some((value, caret, _)) => (value, caret),
                None => ("", 0),
            };
            replace_word_at(caret, value, &text, &self.options.separator)
        };

        store.set(self.id, new_value);
        self.list.highlight(index);
        true
    }

    /// Commit the highlighted suggestion (if any), park the caret at the end
    /// of the buffer, and drop the list. Returns whether an item was
    /// committed.
    pub fn accept(&mut self, store: &mut ValueStore) -> bool {
        let committed = match self.list.highlighted() {
            Some(index) => self.select(store, index),
            None => false,
        };
        store.move_caret_to_end(self.id, false);
        self.dismiss();
        committed
    }

    /// Drop the suggestions and the highlight. Closing any visible popup is
    /// the host's job; this is only the state reset.
    pub fn dismiss(&mut self) {
        self.list.clear();
    }

    /// The input gained focus: snapshot the value for change detection.
    pub fn focus(&mut self, store: &mut ValueStore) {
        store.focus(self.id);
        self.value_before_focus = Some(store.get(self.id).unwrap_or("").to_owned());
    }

    /// The input lost focus: drop the list and report whether the value
    /// changed since [`focus`](Self::focus).
    pub fn blur(&mut self, store: &mut ValueStore) -> bool {
        store.blur(self.id);
        self.dismiss();
        match self.value_before_focus.take() {
            Some(old) => old != store.get(self.id).unwrap_or(""),
            None => false,
        }
    }
}
