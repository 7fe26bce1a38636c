//! UTF-8 text utilities for caret handling.
//!
//! Carets and selections in this crate are byte offsets into UTF-8 strings;
//! these helpers keep every offset on a valid `char` boundary.

use std::borrow::Cow;

/// Clamp an arbitrary byte index to a valid UTF-8 character boundary.
///
/// If `index` is beyond the string length, it is clamped to `s.len()`.
/// If `index` falls in the middle of a multi-byte character, it is
/// adjusted backwards to the start of that character.
///
/// # Examples
///
/// ```
/// use complete_core::clamp_to_char_boundary;
///
/// let s = "a€b"; // '€' is 3 bytes
/// assert_eq!(clamp_to_char_boundary(s, 0), 0); // 'a'
/// assert_eq!(clamp_to_char_boundary(s, 2), 1); // mid '€' -> start of '€'
/// assert_eq!(clamp_to_char_boundary(s, 100), 5); // beyond end -> len
/// ```
#[inline]
pub fn clamp_to_char_boundary(s: &str, index: usize) -> usize {
    let mut index = index.min(s.len());
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Find the previous valid caret position (character boundary) before `i`.
///
/// Returns 0 if already at the start.
pub fn prev_cursor_boundary(s: &str, i: usize) -> usize {
    let i = clamp_to_char_boundary(s, i);
    if i == 0 {
        return 0;
    }
    s[..i]
        .char_indices()
        .last()
        .map(|(idx, _)| idx)
        .unwrap_or(0)
}

/// Find the next valid caret position (character boundary) after `i`.
///
/// Returns `s.len()` if already at or beyond the end.
pub fn next_cursor_boundary(s: &str, i: usize) -> usize {
    let i = clamp_to_char_boundary(s, i);
    if i >= s.len() {
        return s.len();
    }

    let mut it = s[i..].char_indices();
    let _ = it.next(); // current char at 0
    it.next().map(|(idx, _)| i + idx).unwrap_or(s.len())
}

/// Filter a string to remove newlines (CR and LF), for single-line inputs.
///
/// Returns a `Cow::Borrowed` if the string contains no newlines (fast path),
/// or a `Cow::Owned` with newlines removed.
///
/// # Examples
///
/// ```
/// use complete_core::filter_single_line;
///
/// assert_eq!(filter_single_line("hello"), "hello");
/// assert_eq!(filter_single_line("hello\nworld"), "helloworld");
/// assert_eq!(filter_single_line("a\r\nb"), "ab");
/// ```
pub fn filter_single_line(s: &str) -> Cow<'_, str> {
    if !s.contains('\n') && !s.contains('\r') {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.chars().filter(|c| *c != '\n' && *c != '\r').collect())
}

/// Find the first case-insensitive occurrence of `needle` in `haystack`.
///
/// Returns the byte range `(start, end)` of the match in `haystack`, where
/// `end` accounts for any byte-length difference between the matched text and
/// the needle. Matching compares one scalar value at a time under simple case
/// folding (`char::to_lowercase`); full/locale case folding is out of scope.
///
/// An empty needle matches at the start.
///
/// # Examples
///
/// ```
/// use complete_core::find_ignore_case;
///
/// assert_eq!(find_ignore_case("Apple", "app"), Some((0, 3)));
/// assert_eq!(find_ignore_case("pineAPPLE", "apple"), Some((4, 9)));
/// assert_eq!(find_ignore_case("pear", "apple"), None);
/// ```
pub fn find_ignore_case(haystack: &str, needle: &str) -> Option<(usize, usize)> {
    if needle.is_empty() {
        return Some((0, 0));
    }

    for (start, _) in haystack.char_indices() {
        if let Some(end) = match_ignore_case_at(haystack, start, needle) {
            return Some((start, end));
        }
    }
    None
}

fn match_ignore_case_at(haystack: &str, start: usize, needle: &str) -> Option<usize> {
    let mut end = start;
    let mut hay = haystack[start..].chars();

    for n in needle.chars() {
        let h = hay.next()?;
        if !h.to_lowercase().eq(n.to_lowercase()) {
            return None;
        }
        end += h.len_utf8();
    }
    Some(end)
}
