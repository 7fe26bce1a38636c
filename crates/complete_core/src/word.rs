//! Separator-delimited word editing.
//!
//! A buffer may hold several entries delimited by a separator token (e.g.
//! `", "`); the word under the caret is the unit a suggestion replaces or
//! completes. An empty separator means single-value mode: the whole buffer is
//! one word. All functions are pure; the caller owns the buffer and the caret
//! and applies results back to its own input state.
//!
//! Carets are byte offsets and are defensively clamped to `[0, text.len()]`
//! and to a `char` boundary, so no input panics.

use memchr::memmem;

use crate::selection::SelectionRange;
use crate::text::{clamp_to_char_boundary, find_ignore_case};

/// Result of a completion splice.
///
/// `value` is the new buffer; `selection` is the range the host should
/// restore on its input control. After a type-ahead completion the selection
/// covers exactly the auto-typed tail, so the next keystroke overwrites it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditResult {
    /// The new buffer contents.
    pub value: String,
    /// The selection to restore; collapsed to the caret when nothing was
    /// auto-typed.
    pub selection: SelectionRange,
}

/// Index of the word the caret is in.
///
/// With an empty separator the whole buffer is one word and the index is
/// always 0. Otherwise this is the number of separator occurrences fully
/// before the caret, i.e. `text[..caret].split(separator).count() - 1`.
///
/// # Examples
///
/// ```
/// use complete_core::word_index_at;
///
/// assert_eq!(word_index_at(0, "ab, cd", ", "), 0);
/// assert_eq!(word_index_at(5, "ab, cd", ", "), 1);
/// assert_eq!(word_index_at(5, "ab, cd", ""), 0);
/// ```
pub fn word_index_at(caret: usize, text: &str, separator: &str) -> usize {
    if separator.is_empty() {
        return 0;
    }
    let caret = clamp_to_char_boundary(text, caret);
    memmem::find_iter(text[..caret].as_bytes(), separator.as_bytes()).count()
}

/// The word the caret is in, as a slice of `text`.
///
/// With an empty separator this is the whole buffer. `None` only if the
/// derived index somehow exceeds the segment count; with the caret clamped
/// into the buffer the index is always in range.
///
/// # Examples
///
/// ```
/// use complete_core::word_at;
///
/// assert_eq!(word_at(0, "apple", ""), Some("apple"));
/// assert_eq!(word_at(5, "ab, cd", ", "), Some("cd"));
/// ```
pub fn word_at<'a>(caret: usize, text: &'a str, separator: &str) -> Option<&'a str> {
    if separator.is_empty() {
        return Some(text);
    }
    text.split(separator)
        .nth(word_index_at(caret, text, separator))
}

/// Replace the word the caret is in and rejoin the buffer.
///
/// With a non-empty separator, only the segment at
/// [`word_index_at`] changes; every other segment is preserved verbatim.
/// When the final segment ends up non-empty, one empty trailing segment is
/// appended so the result ends with a fresh separator, leaving a blank slot
/// ready for the next entry. With an empty separator the whole buffer is the
/// one segment and the result is `replacement`.
///
/// # Examples
///
/// ```
/// use complete_core::replace_word_at;
///
/// assert_eq!(replace_word_at(5, "ab, cd, ", "xyz", ", "), "ab, xyz, ");
/// assert_eq!(replace_word_at(2, "ab, cd, ", "xyz", ", "), "xyz, cd, ");
/// assert_eq!(replace_word_at(3, "abc", "xyz", ""), "xyz");
/// ```
pub fn replace_word_at(caret: usize, text: &str, replacement: &str, separator: &str) -> String {
    if separator.is_empty() {
        return replacement.to_owned();
    }

    let mut words: Vec<&str> = text.split(separator).collect();
    let index = word_index_at(caret, text, separator);
    if let Some(slot) = words.get_mut(index) {
        *slot = replacement;
    }

    if words.last().is_some_and(|w| !w.is_empty()) {
        words.push("");
    }

    words.join(separator)
}

/// The part of the current word typed before the caret.
///
/// Runs from just after the last separator occurrence in `text[..caret]`
/// (or from the start of the buffer) up to the caret.
///
/// # Examples
///
/// ```
/// use complete_core::typed_prefix_at;
///
/// assert_eq!(typed_prefix_at(3, "App", ""), "App");
/// assert_eq!(typed_prefix_at(5, "ab, cd", ", "), "c");
/// assert_eq!(typed_prefix_at(4, "ab, cd", ", "), "");
/// ```
pub fn typed_prefix_at<'a>(caret: usize, text: &'a str, separator: &str) -> &'a str {
    let caret = clamp_to_char_boundary(text, caret);
    let before = &text[..caret];
    if separator.is_empty() {
        return before;
    }

    match memmem::rfind(before.as_bytes(), separator.as_bytes()) {
        Some(pos) => &before[pos + separator.len()..],
        None => before,
    }
}

/// Type ahead: extend what the user has typed in the current word with the
/// untyped remainder of `candidate`, leaving the auto-typed tail selected so
/// the next keystroke overwrites it.
///
/// The typed-so-far prefix is located case-insensitively within `candidate`;
/// when found, the remainder after the match is appended and
/// `selection = caret..caret + remainder.len()`. When the prefix does not
/// occur in `candidate`, the word is left as typed (anything beyond the caret
/// in the current word is dropped) and the selection collapses to the caret.
/// No completion is ever forced.
///
/// Two inputs make the operation a no-op returning the buffer unchanged with
/// a collapsed selection at the caret:
/// - `last_edit_deleted`: the host's most recent edit removed text
///   (backspace/delete); re-inserting a completion would fight the deletion.
/// - an empty `candidate`.
///
/// Trailing-empty-segment normalization is applied as in
/// [`replace_word_at`] when the separator is non-empty.
///
/// # Examples
///
/// ```
/// use complete_core::{SelectionRange, complete_word_at};
///
/// let edit = complete_word_at(3, "App", "Apple", "", false);
/// assert_eq!(edit.value, "Apple");
/// assert_eq!(edit.selection, SelectionRange::new(3, 5));
///
/// let edit = complete_word_at(3, "App", "Apple", "", true);
/// assert_eq!(edit.value, "App");
/// assert!(edit.selection.is_empty());
/// ```
pub fn complete_word_at(
    caret: usize,
    text: &str,
    candidate: &str,
    separator: &str,
    last_edit_deleted: bool,
) -> EditResult {
    let caret = clamp_to_char_boundary(text, caret);

    if last_edit_deleted || candidate.is_empty() {
        return EditResult {
            value: text.to_owned(),
            selection: SelectionRange::caret(caret),
        };
    }

    let typed = typed_prefix_at(caret, text, separator);
    let mut word = typed.to_owned();
    let mut selection_end = caret;

    if let Some((_, matched_end)) = find_ignore_case(candidate, typed) {
        let remainder = &candidate[matched_end..];
        selection_end = caret + remainder.len();
        word.push_str(remainder);
    }

    if separator.is_empty() {
        return EditResult {
            value: word,
            selection: SelectionRange::new(caret, selection_end),
        };
    }

    let mut words: Vec<&str> = text.split(separator).collect();
    // Trailing slot is decided on the pre-replacement segments, then the
    // current word is spliced in.
    if words.last().is_some_and(|w| !w.is_empty()) {
        words.push("");
    }
    let index = word_index_at(caret, text, separator);
    if let Some(slot) = words.get_mut(index) {
        *slot = word.as_str();
    }

    EditResult {
        value: words.join(separator),
        selection: SelectionRange::new(caret, selection_end),
    }
}
