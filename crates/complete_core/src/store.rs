//! Central store for host input values, caret positions, and selections.
//!
//! This store is UI-agnostic: it does not render, measure text, or know
//! about events. Integration layers translate their native input events into
//! calls on this store and paint from the state it holds.

use std::collections::HashMap;

use crate::id::WidgetId;
use crate::selection::SelectionRange;
use crate::text::{
    clamp_to_char_boundary, filter_single_line, next_cursor_boundary, prev_cursor_boundary,
};
use crate::word::EditResult;

/// Per-widget input state.
#[derive(Clone, Debug, Default)]
struct WidgetState {
    /// The current text value.
    value: String,

    /// Monotonic revision counter, incremented on any text change.
    /// Useful for cache invalidation and change detection.
    value_rev: u64,

    /// Caret position as a byte index into `value` (always on a UTF-8 char
    /// boundary).
    caret: usize,

    /// Selection anchor as a byte index into `value` (UTF-8 char boundary).
    ///
    /// When `Some(anchor)`, the selection range is
    /// `min(anchor, caret)..max(anchor, caret)`.
    selection_anchor: Option<usize>,

    /// Whether the most recent edit removed text (backspace/delete).
    ///
    /// Completion logic reads this to avoid re-inserting a suggestion the
    /// user just deleted. Any non-deleting mutation clears it.
    last_edit_deleted: bool,
}

/// Central store for input widget state.
///
/// This is the primary API for managing text input state in a UI-agnostic
/// way: values with revision tracking, caret positioning, and selection.
///
/// # Example
///
/// ```
/// use complete_core::{ValueStore, WidgetId};
///
/// let mut store = ValueStore::new();
/// let id = WidgetId::from_raw(1);
///
/// store.ensure_initial(id, "Hello".to_string());
/// store.focus(id);
/// store.insert_text(id, " World");
///
/// assert_eq!(store.get(id), Some("Hello World"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ValueStore {
    values: HashMap<WidgetId, WidgetState>,
}

impl ValueStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Returns `true` if an entry exists for this widget.
    pub fn has(&self, id: WidgetId) -> bool {
        self.values.contains_key(&id)
    }

    /// Returns the stored value for this widget, if any.
    pub fn get(&self, id: WidgetId) -> Option<&str> {
        self.values.get(&id).map(|s| s.value.as_str())
    }

    /// Returns the current caret byte index for this widget, if any.
    pub fn caret(&self, id: WidgetId) -> Option<usize> {
        self.values.get(&id).map(|s| s.caret)
    }

    /// Returns the current selection for this widget, if one exists.
    pub fn selection(&self, id: WidgetId) -> Option<SelectionRange> {
        self.values
            .get(&id)
            .and_then(|s| selection_range(&s.value, s.selection_anchor, s.caret))
    }

    /// Get the full state tuple for a widget.
    ///
    /// Returns `(value, caret, selection)` if the widget exists.
    pub fn get_state(&self, id: WidgetId) -> Option<(&str, usize, Option<SelectionRange>)> {
        self.values.get(&id).map(|s| {
            let sel = selection_range(&s.value, s.selection_anchor, s.caret);
            (s.value.as_str(), s.caret, sel)
        })
    }

    /// Monotonic revision counter for the widget's value.
    ///
    /// Increments on any text change.
    pub fn value_revision(&self, id: WidgetId) -> u64 {
        self.values.get(&id).map(|s| s.value_rev).unwrap_or(0)
    }

    /// Whether the most recent edit on this widget removed text.
    pub fn last_edit_deleted(&self, id: WidgetId) -> bool {
        self.values.get(&id).is_some_and(|s| s.last_edit_deleted)
    }

    /// Forget a pending deletion, so the next completion is not suppressed.
    pub fn clear_deletion_flag(&mut self, id: WidgetId) {
        if let Some(st) = self.values.get_mut(&id) {
            st.last_edit_deleted = false;
        }
    }

    /// Set/overwrite the value for this widget.
    ///
    /// This resets the caret to the end and clears any selection.
    pub fn set(&mut self, id: WidgetId, value: String) {
        let caret = clamp_to_char_boundary(&value, value.len());
        let value_rev = self
            .values
            .get(&id)
            .map(|s| s.value_rev.wrapping_add(1))
            .unwrap_or(0);
        self.values.insert(
            id,
            WidgetState {
                value,
                value_rev,
                caret,
                selection_anchor: None,
                last_edit_deleted: false,
            },
        );
    }

    /// Ensure an entry exists; if missing, inserts the provided initial value.
    pub fn ensure_initial(&mut self, id: WidgetId, initial: String) {
        let caret = clamp_to_char_boundary(&initial, initial.len());
        self.values.entry(id).or_insert(WidgetState {
            value: initial,
            value_rev: 0,
            caret,
            selection_anchor: None,
            last_edit_deleted: false,
        });
    }

    /// Called when a widget gains focus.
    ///
    /// Clamps the caret to a valid UTF-8 boundary and clears the selection.
    pub fn focus(&mut self, id: WidgetId) {
        if let Some(st) = self.values.get_mut(&id) {
            clamp_state(st);
            clear_selection(st);
            st.last_edit_deleted = false;
        }
    }

    /// Called when a widget loses focus.
    ///
    /// Clamps the caret to a valid boundary and clears the selection.
    pub fn blur(&mut self, id: WidgetId) {
        if let Some(st) = self.values.get_mut(&id) {
            clamp_state(st);
            clear_selection(st);
        }
    }

    /// Clear all stored state.
    ///
    /// Typically called when the hosting document is torn down.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Insert text at the current caret position.
    ///
    /// Newlines are stripped (the hosts are single-line inputs). If there is
    /// a selection, it is replaced.
    pub fn insert_text(&mut self, id: WidgetId, s: &str) {
        let st = self.values.entry(id).or_default();
        clamp_state(st);
        let s = filter_single_line(s);
        if s.is_empty() {
            return;
        }

        delete_selection_if_any(st);

        let caret = clamp_to_char_boundary(&st.value, st.caret);
        st.value.insert_str(caret, &s);
        st.caret = clamp_to_char_boundary(&st.value, caret + s.len());
        st.last_edit_deleted = false;
        mark_text_dirty(st);
    }

    /// Delete the character before the caret (backspace).
    ///
    /// If there is a selection, deletes the selection instead. Marks the
    /// widget's deletion flag either way.
    pub fn backspace(&mut self, id: WidgetId) {
        if let Some(st) = self.values.get_mut(&id) {
            clamp_state(st);
            st.last_edit_deleted = true;
            if delete_selection_if_any(st) {
                return;
            }

            let caret = clamp_to_char_boundary(&st.value, st.caret);
            if caret == 0 {
                return;
            }

            let prev = prev_cursor_boundary(&st.value, caret);
            st.value.drain(prev..caret);
            st.caret = clamp_to_char_boundary(&st.value, prev);
            mark_text_dirty(st);
        }
    }

    /// Delete the character after the caret (delete key).
    ///
    /// If there is a selection, deletes the selection instead. Marks the
    /// widget's deletion flag either way.
    pub fn delete(&mut self, id: WidgetId) {
        if let Some(st) = self.values.get_mut(&id) {
            clamp_state(st);
            st.last_edit_deleted = true;
            if delete_selection_if_any(st) {
                return;
            }

            let caret = clamp_to_char_boundary(&st.value, st.caret);
            if caret >= st.value.len() {
                return;
            }

            let next = next_cursor_boundary(&st.value, caret);
            st.value.drain(caret..next);
            st.caret = clamp_to_char_boundary(&st.value, caret);
            mark_text_dirty(st);
        }
    }

    /// Move the caret left by one character.
    ///
    /// If `selecting` is true, extends/modifies the selection.
    pub fn move_caret_left(&mut self, id: WidgetId, selecting: bool) {
        let st = self.values.entry(id).or_default();
        clamp_state(st);
        st.last_edit_deleted = false;

        if selecting {
            if st.selection_anchor.is_none() {
                st.selection_anchor = Some(st.caret);
            }
            st.caret = prev_cursor_boundary(&st.value, st.caret);
            normalize_selection_anchor(st);
            return;
        }

        if let Some(sel) = selection_range(&st.value, st.selection_anchor, st.caret) {
            st.caret = sel.start;
        } else {
            st.caret = prev_cursor_boundary(&st.value, st.caret);
        }
        clear_selection(st);
    }

    /// Move the caret right by one character.
    ///
    /// If `selecting` is true, extends/modifies the selection.
    pub fn move_caret_right(&mut self, id: WidgetId, selecting: bool) {
        let st = self.values.entry(id).or_default();
        clamp_state(st);
        st.last_edit_deleted = false;

        if selecting {
            if st.selection_anchor.is_none() {
                st.selection_anchor = Some(st.caret);
            }
            st.caret = next_cursor_boundary(&st.value, st.caret);
            normalize_selection_anchor(st);
            return;
        }

        if let Some(sel) = selection_range(&st.value, st.selection_anchor, st.caret) {
            st.caret = sel.end;
        } else {
            st.caret = next_cursor_boundary(&st.value, st.caret);
        }
        clear_selection(st);
    }

    /// Move the caret to the start of the text.
    ///
    /// If `selecting` is true, extends/modifies the selection.
    pub fn move_caret_to_start(&mut self, id: WidgetId, selecting: bool) {
        let st = self.values.entry(id).or_default();
        clamp_state(st);
        st.last_edit_deleted = false;

        if selecting {
            if st.selection_anchor.is_none() {
                st.selection_anchor = Some(st.caret);
            }
            st.caret = 0;
            normalize_selection_anchor(st);
        } else {
            st.caret = 0;
            clear_selection(st);
        }
    }

    /// Move the caret to the end of the text.
    ///
    /// If `selecting` is true, extends/modifies the selection.
    pub fn move_caret_to_end(&mut self, id: WidgetId, selecting: bool) {
        let st = self.values.entry(id).or_default();
        clamp_state(st);
        st.last_edit_deleted = false;

        if selecting {
            if st.selection_anchor.is_none() {
                st.selection_anchor = Some(st.caret);
            }
            st.caret = st.value.len();
            normalize_selection_anchor(st);
        } else {
            st.caret = st.value.len();
            clear_selection(st);
        }
    }

    /// Select all text in the widget.
    pub fn select_all(&mut self, id: WidgetId) {
        let st = self.values.entry(id).or_default();
        clamp_state(st);
        st.last_edit_deleted = false;
        st.caret = st.value.len();
        st.selection_anchor = Some(0);
        normalize_selection_anchor(st);
    }

    /// Set the caret to a specific byte position.
    ///
    /// If `selecting` is true, extends/modifies the selection.
    pub fn set_caret(&mut self, id: WidgetId, caret: usize, selecting: bool) {
        let st = self.values.entry(id).or_default();
        clamp_state(st);
        st.last_edit_deleted = false;

        let caret = clamp_to_char_boundary(&st.value, caret);

        if selecting {
            if st.selection_anchor.is_none() {
                st.selection_anchor = Some(st.caret);
            }
            st.caret = caret;
            normalize_selection_anchor(st);
        } else {
            st.caret = caret;
            clear_selection(st);
        }
    }

    /// Apply a completion result back to a widget.
    ///
    /// Sets the value and restores the selection: the caret rests at
    /// `selection.start` (the typed boundary — hosts report the selection
    /// start as the caret) with the auto-typed tail selected out to
    /// `selection.end`, ready for overwrite.
    pub fn apply_edit(&mut self, id: WidgetId, edit: EditResult) {
        let st = self.values.entry(id).or_default();

        if st.value != edit.value {
            st.value = edit.value;
            mark_text_dirty(st);
        }

        st.caret = clamp_to_char_boundary(&st.value, edit.selection.start);
        st.selection_anchor = if edit.selection.is_empty() {
            None
        } else {
            Some(clamp_to_char_boundary(&st.value, edit.selection.end))
        };
        normalize_selection_anchor(st);
        st.last_edit_deleted = false;
    }
}

// --- Internal helper functions ---

fn selection_range(value: &str, anchor: Option<usize>, caret: usize) -> Option<SelectionRange> {
    let anchor = anchor?;

    let a = clamp_to_char_boundary(value, anchor);
    let c = clamp_to_char_boundary(value, caret);
    if a == c {
        return None;
    }

    Some(SelectionRange {
        start: a.min(c),
        end: a.max(c),
    })
}

fn normalize_selection_anchor(st: &mut WidgetState) {
    let Some(anchor) = st.selection_anchor else {
        return;
    };
    let anchor = clamp_to_char_boundary(&st.value, anchor);
    st.selection_anchor = Some(anchor);

    // If selection collapsed, clear anchor to avoid "sticky" selection.
    if anchor == st.caret {
        st.selection_anchor = None;
    }
}

fn delete_selection_if_any(st: &mut WidgetState) -> bool {
    let Some(sel) = selection_range(&st.value, st.selection_anchor, st.caret) else {
        st.selection_anchor = None;
        st.caret = clamp_to_char_boundary(&st.value, st.caret);
        return false;
    };

    st.value.drain(sel.start..sel.end);
    st.caret = clamp_to_char_boundary(&st.value, sel.start);
    st.selection_anchor = None;
    mark_text_dirty(st);
    true
}

fn clamp_state(st: &mut WidgetState) {
    st.caret = clamp_to_char_boundary(&st.value, st.caret);
    if let Some(a) = st.selection_anchor {
        st.selection_anchor = Some(clamp_to_char_boundary(&st.value, a));
    }
}

fn clear_selection(st: &mut WidgetState) {
    st.selection_anchor = None;
}

fn mark_text_dirty(st: &mut WidgetState) {
    st.value_rev = st.value_rev.wrapping_add(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_text_keeps_caret_on_char_boundary() {
        let mut store = ValueStore::new();
        let id = WidgetId::from_raw(1);

        store.ensure_initial(id, String::new());
        store.focus(id);

        store.insert_text(id, "€"); // 3-byte UTF-8
        let v = store.get(id).unwrap();
        let caret = store.caret(id).unwrap();
        assert_eq!(v, "€");
        assert_eq!(caret, v.len());
        assert!(v.is_char_boundary(caret));
    }

    #[test]
    fn insert_text_strips_newlines() {
        let mut store = ValueStore::new();
        let id = WidgetId::from_raw(1);

        store.ensure_initial(id, String::new());
        store.insert_text(id, "ab\r\ncd");
        assert_eq!(store.get(id), Some("abcd"));
    }

    #[test]
    fn backspace_removes_a_full_unicode_scalar_value() {
        let mut store = ValueStore::new();
        let id = WidgetId::from_raw(1);

        store.set(id, "a€".to_string());
        store.focus(id);

        store.backspace(id);
        assert_eq!(store.get(id), Some("a"));
        let v = store.get(id).unwrap();
        let caret = store.caret(id).unwrap();
        assert_eq!(caret, v.len());
        assert!(v.is_char_boundary(caret));
    }

    #[test]
    fn invalid_caret_is_clamped_before_insert() {
        let mut store = ValueStore::new();
        let id = WidgetId::from_raw(1);

        store.set(id, "€".to_string());
        // Manually corrupt the caret to an invalid boundary
        store.values.get_mut(&id).unwrap().caret = 1;

        store.insert_text(id, "x");
        assert_eq!(store.get(id), Some("x€"));
        let v = store.get(id).unwrap();
        let caret = store.caret(id).unwrap();
        assert!(v.is_char_boundary(caret));
    }

    #[test]
    fn move_caret_left_right_moves_by_unicode_scalar_value() {
        let mut store = ValueStore::new();
        let id = WidgetId::from_raw(1);

        store.set(id, "a€b".to_string());
        store.focus(id);

        // Caret starts at end.
        assert_eq!(store.caret(id), Some("a€b".len()));

        store.move_caret_left(id, false);
        assert_eq!(store.caret(id), Some("a€".len()));

        store.move_caret_left(id, false);
        assert_eq!(store.caret(id), Some("a".len()));

        store.move_caret_right(id, false);
        assert_eq!(store.caret(id), Some("a€".len()));
    }

    #[test]
    fn shift_arrow_creates_selection_and_backspace_deletes_it() {
        let mut store = ValueStore::new();
        let id = WidgetId::from_raw(1);

        store.set(id, "hello".to_string());
        store.focus(id);

        store.move_caret_left(id, true); // select last char
        assert_eq!(store.selection(id), Some(SelectionRange { start: 4, end: 5 }));

        store.backspace(id);
        assert_eq!(store.get(id), Some("hell"));
        assert_eq!(store.caret(id), Some(4));
        assert_eq!(store.selection(id), None);
    }

    #[test]
    fn typing_replaces_selection() {
        let mut store = ValueStore::new();
        let id = WidgetId::from_raw(1);

        store.set(id, "hello".to_string());
        store.focus(id);
        store.move_caret_left(id, true); // select "o"
        store.insert_text(id, "X");

        assert_eq!(store.get(id), Some("hellX"));
        assert_eq!(store.caret(id), Some("hellX".len()));
    }

    #[test]
    fn delete_removes_next_char() {
        let mut store = ValueStore::new();
        let id = WidgetId::from_raw(1);

        store.set(id, "abc".to_string());
        store.focus(id);
        store.move_caret_left(id, false); // caret before 'c'
        assert_eq!(store.caret(id), Some(2));

        store.delete(id);
        assert_eq!(store.get(id), Some("ab"));
        assert_eq!(store.caret(id), Some(2));
    }

    #[test]
    fn set_caret_supports_shift_extend_selection() {
        let mut store = ValueStore::new();
        let id = WidgetId::from_raw(1);

        store.set(id, "hello".to_string());
        store.focus(id);

        store.set_caret(id, 2, false);
        assert_eq!(store.caret(id), Some(2));
        assert_eq!(store.selection(id), None);

        store.set_caret(id, 4, true);
        assert_eq!(store.caret(id), Some(4));
        assert_eq!(store.selection(id), Some(SelectionRange { start: 2, end: 4 }));

        store.set_caret(id, 1, false);
        assert_eq!(store.caret(id), Some(1));
        assert_eq!(store.selection(id), None);
    }

    #[test]
    fn home_and_end_move_caret_to_extremes() {
        let mut store = ValueStore::new();
        let id = WidgetId::from_raw(1);

        store.set(id, "hello".to_string());
        store.focus(id);

        store.move_caret_to_start(id, false);
        assert_eq!(store.caret(id), Some(0));
        assert_eq!(store.selection(id), None);

        store.move_caret_to_end(id, true);
        assert_eq!(store.caret(id), Some(5));
        assert_eq!(store.selection(id), Some(SelectionRange { start: 0, end: 5 }));
    }

    #[test]
    fn revision_increments_on_text_change_only() {
        let mut store = ValueStore::new();
        let id = WidgetId::from_raw(1);

        store.ensure_initial(id, "ab".to_string());
        let rev = store.value_revision(id);

        store.move_caret_left(id, false);
        assert_eq!(store.value_revision(id), rev);

        store.insert_text(id, "c");
        assert_eq!(store.value_revision(id), rev + 1);
    }

    #[test]
    fn deletion_flag_set_by_backspace_and_cleared_by_typing() {
        let mut store = ValueStore::new();
        let id = WidgetId::from_raw(1);

        store.set(id, "abc".to_string());
        assert!(!store.last_edit_deleted(id));

        store.backspace(id);
        assert!(store.last_edit_deleted(id));

        store.insert_text(id, "x");
        assert!(!store.last_edit_deleted(id));

        store.delete(id); // caret at end: nothing removed, flag still set
        assert!(store.last_edit_deleted(id));

        store.move_caret_left(id, false);
        assert!(!store.last_edit_deleted(id));

        store.backspace(id);
        store.clear_deletion_flag(id);
        assert!(!store.last_edit_deleted(id));
    }

    #[test]
    fn apply_edit_sets_value_caret_and_selection() {
        use crate::word::complete_word_at;

        let mut store = ValueStore::new();
        let id = WidgetId::from_raw(1);

        store.set(id, "App".to_string());
        let edit = complete_word_at(3, store.get(id).unwrap(), "Apple", "", false);
        store.apply_edit(id, edit);

        assert_eq!(store.get(id), Some("Apple"));
        // The caret rests at the typed boundary; the auto-typed tail is selected.
        assert_eq!(store.caret(id), Some(3));
        assert_eq!(store.selection(id), Some(SelectionRange { start: 3, end: 5 }));
    }

    #[test]
    fn apply_edit_with_collapsed_selection_clears_anchor() {
        let mut store = ValueStore::new();
        let id = WidgetId::from_raw(1);

        store.set(id, "ab".to_string());
        store.select_all(id);
        assert!(store.selection(id).is_some());

        store.apply_edit(
            id,
            EditResult {
                value: "ab".to_string(),
                selection: SelectionRange::caret(1),
            },
        );
        assert_eq!(store.caret(id), Some(1));
        assert_eq!(store.selection(id), None);
    }

    #[test]
    fn apply_edit_keeps_revision_when_value_unchanged() {
        let mut store = ValueStore::new();
        let id = WidgetId::from_raw(1);

        store.set(id, "ab".to_string());
        let rev = store.value_revision(id);
        store.apply_edit(
            id,
            EditResult {
                value: "ab".to_string(),
                selection: SelectionRange::caret(2),
            },
        );
        assert_eq!(store.value_revision(id), rev);
    }
}
