//! Diff Reducer: turn two text snapshots into one positional edit
//!
//! The reducer strips the longest common prefix and the longest common
//! suffix of the old and new text. Whatever remains in the middle is the
//! edit: `del` characters removed from the old text at `pos`, replaced by
//! `ins`. Only a single contiguous region is ever reported.
//!
//! # Units
//!
//! All positions and lengths count Unicode scalar values (Rust `char`s),
//! never bytes. A multi-byte character such as `é` or `🎉` is a single
//! indivisible element, so the descriptor can be replayed against any
//! replica that indexes text by code point.
//!
//! # Repeated characters
//!
//! Prefix/suffix reduction cannot tell which `a` was typed into a run of
//! `a`s. The suffix scan stops as soon as prefix and suffix would cover
//! either whole text, so the edit is always anchored at the end of the
//! common prefix:
//!
//! ```rust
//! use eggwalker_core::diff::{calc_diff, TextEdit};
//!
//! let edit = calc_diff("aaa", "aaaa");
//! assert_eq!(edit, TextEdit::new(3, 0, "a"));
//! ```
//!
//! # Example
//!
//! ```rust
//! use eggwalker_core::diff::calc_diff;
//!
//! let edit = calc_diff("cat", "cut");
//! assert_eq!((edit.pos, edit.del, edit.ins.as_str()), (1, 1, "u"));
//! assert_eq!(edit.apply("cat").unwrap(), "cut");
//! ```

use crate::error::{Result, SyncError};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A single contiguous replacement: at `pos` remove `del` chars, then insert `ins`
///
/// Serializes as `{"pos": .., "del": .., "ins": ..}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextEdit {
    /// Char offset into the old text where the edit starts
    pub pos: usize,

    /// Number of chars removed from the old text at `pos`
    pub del: usize,

    /// Text inserted at `pos` after the removal
    pub ins: String,
}

impl TextEdit {
    /// Create an edit descriptor
    pub fn new(pos: usize, del: usize, ins: impl Into<String>) -> Self {
        Self {
            pos,
            del,
            ins: ins.into(),
        }
    }

    /// The canonical no-op: `{pos: 0, del: 0, ins: ""}`
    pub fn noop() -> Self {
        Self::default()
    }

    /// True when the edit neither removes nor inserts anything
    pub fn is_noop(&self) -> bool {
        self.del == 0 && self.ins.is_empty()
    }

    /// Apply this edit to `old` and return the resulting text
    ///
    /// # Errors
    ///
    /// Returns `SyncError::RangeOutOfBounds` if `pos + del` exceeds the char
    /// length of `old`. An edit produced by `calc_diff(old, _)` always fits.
    ///
    /// # Example
    ///
    /// ```rust
    /// use eggwalker_core::diff::TextEdit;
    ///
    /// let edit = TextEdit::new(5, 6, "");
    /// assert_eq!(edit.apply("hello world").unwrap(), "hello");
    /// assert!(edit.apply("hi").is_err());
    /// ```
    pub fn apply(&self, old: &str) -> Result<String> {
        let length = old.chars().count();
        let end = self.pos.saturating_add(self.del);
        if end > length {
            return Err(SyncError::RangeOutOfBounds {
                start: self.pos,
                end,
                length,
            });
        }

        let mut result = String::with_capacity(old.len() + self.ins.len());
        result.extend(old.chars().take(self.pos));
        result.push_str(&self.ins);
        result.extend(old.chars().skip(end));
        Ok(result)
    }
}

/// Result of a prefix/suffix reduction over two element sequences
///
/// `ins` is the range of the *new* sequence that replaces
/// `old[pos..pos + del]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reduction {
    pub pos: usize,
    pub del: usize,
    pub ins: Range<usize>,
}

impl Reduction {
    fn unchanged() -> Self {
        Self {
            pos: 0,
            del: 0,
            ins: 0..0,
        }
    }
}

/// Reduce two sequences to the single region where they differ
///
/// Works on any element type; `calc_diff` uses it over `char`s.
///
/// ```rust
/// use eggwalker_core::diff::reduce;
///
/// let r = reduce(&[1, 2, 3, 4], &[1, 9, 9, 4]);
/// assert_eq!((r.pos, r.del, r.ins), (1, 2, 1..3));
/// ```
pub fn reduce<T: PartialEq>(old: &[T], new: &[T]) -> Reduction {
    if old == new {
        return Reduction::unchanged();
    }

    let common_start = old
        .iter()
        .zip(new.iter())
        .take_while(|(a, b)| a == b)
        .count();

    // The bound is checked before each comparison, so prefix and suffix never
    // overlap in either sequence.
    let mut common_end = 0;
    while common_start + common_end < old.len()
        && common_start + common_end < new.len()
        && old[old.len() - 1 - common_end] == new[new.len() - 1 - common_end]
    {
        common_end += 1;
    }

    Reduction {
        pos: common_start,
        del: old.len() - common_start - common_end,
        ins: common_start..new.len() - common_end,
    }
}

/// Compute the edit that turns `old` into `new`
///
/// Identical inputs short-circuit to `TextEdit::noop()`. Otherwise both
/// strings are decomposed into chars and reduced with [`reduce`].
///
/// # Example
///
/// ```rust
/// use eggwalker_core::diff::{calc_diff, TextEdit};
///
/// assert_eq!(calc_diff("hello", "hello world"), TextEdit::new(5, 0, " world"));
/// assert_eq!(calc_diff("abc", ""), TextEdit::new(0, 3, ""));
/// ```
pub fn calc_diff(old: &str, new: &str) -> TextEdit {
    if old == new {
        return TextEdit::noop();
    }

    let old_chars: Vec<char> = old.chars().collect();
    let new_chars: Vec<char> = new.chars().collect();
    diff_chars(&old_chars, &new_chars)
}

/// Compute the edit between two UTF-16 buffers (e.g. JavaScript strings)
///
/// Code units are decoded to Unicode scalar values before comparison, so a
/// surrogate pair is one element and the result uses char positions, the
/// same units as [`calc_diff`]. Unpaired surrogates are replaced with
/// U+FFFD during decoding.
pub fn calc_diff_utf16(old: &[u16], new: &[u16]) -> TextEdit {
    if old == new {
        return TextEdit::noop();
    }

    let old_chars = decode_utf16_lossy(old);
    let new_chars = decode_utf16_lossy(new);
    diff_chars(&old_chars, &new_chars)
}

fn diff_chars(old: &[char], new: &[char]) -> TextEdit {
    let Reduction { pos, del, ins } = reduce(old, new);
    TextEdit {
        pos,
        del,
        ins: new[ins].iter().collect(),
    }
}

fn decode_utf16_lossy(units: &[u16]) -> Vec<char> {
    char::decode_utf16(units.iter().copied())
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_is_noop() {
        assert_eq!(calc_diff("hello", "hello"), TextEdit::new(0, 0, ""));
    }

    #[test]
    fn test_append() {
        assert_eq!(calc_diff("hello", "hello world"), TextEdit::new(5, 0, " world"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(calc_diff("hello world", "hello"), TextEdit::new(5, 6, ""));
    }

    #[test]
    fn test_replace_middle() {
        assert_eq!(calc_diff("cat", "cut"), TextEdit::new(1, 1, "u"));
    }

    #[test]
    fn test_from_empty() {
        assert_eq!(calc_diff("", "abc"), TextEdit::new(0, 0, "abc"));
    }

    #[test]
    fn test_to_empty() {
        assert_eq!(calc_diff("abc", ""), TextEdit::new(0, 3, ""));
    }

    #[test]
    fn test_both_empty() {
        let edit = calc_diff("", "");
        assert!(edit.is_noop());
        assert_eq!(edit, TextEdit::noop());
    }

    #[test]
    fn test_prepend() {
        assert_eq!(calc_diff("world", "hello world"), TextEdit::new(0, 0, "hello "));
    }

    #[test]
    fn test_repeated_char_insert_anchors_after_prefix() {
        assert_eq!(calc_diff("aaa", "aaaa"), TextEdit::new(3, 0, "a"));
        assert_eq!(calc_diff("aaaa", "aaaaa"), TextEdit::new(4, 0, "a"));
    }

    #[test]
    fn test_repeated_char_delete_anchors_after_prefix() {
        assert_eq!(calc_diff("aaaa", "aaa"), TextEdit::new(3, 1, ""));
    }

    #[test]
    fn test_overlap_bounded_by_shorter_text() {
        // "ab" is both the prefix of the old text and the suffix of the new
        // one; the suffix scan must stop before reusing prefix chars.
        assert_eq!(calc_diff("ab", "abab"), TextEdit::new(2, 0, "ab"));
        assert_eq!(calc_diff("abab", "ab"), TextEdit::new(2, 2, ""));
    }

    #[test]
    fn test_multibyte_chars_counted_as_one() {
        let edit = calc_diff("héllo", "hélló");
        assert_eq!(edit, TextEdit::new(4, 1, "ó"));

        let edit = calc_diff("a🎉b", "a🎉🎉b");
        assert_eq!(edit, TextEdit::new(2, 0, "🎉"));
        assert_eq!(edit.apply("a🎉b").unwrap(), "a🎉🎉b");
    }

    #[test]
    fn test_utf16_matches_char_positions() {
        let old: Vec<u16> = "x🎉y".encode_utf16().collect();
        let new: Vec<u16> = "x🎉zy".encode_utf16().collect();
        assert_eq!(calc_diff_utf16(&old, &new), TextEdit::new(2, 0, "z"));
    }

    #[test]
    fn test_utf16_unpaired_surrogate_replaced() {
        let old: Vec<u16> = vec![0x61];
        let new: Vec<u16> = vec![0x61, 0xD800];
        assert_eq!(calc_diff_utf16(&old, &new), TextEdit::new(1, 0, "\u{FFFD}"));
    }

    #[test]
    fn test_reduce_generic() {
        let r = reduce(&[1, 2, 3], &[1, 2, 3]);
        assert_eq!(r, Reduction::unchanged());

        let r = reduce::<u8>(&[], &[7, 8]);
        assert_eq!((r.pos, r.del, r.ins), (0, 0, 0..2));
    }

    #[test]
    fn test_apply_out_of_bounds() {
        let edit = TextEdit::new(2, 5, "x");
        match edit.apply("abc") {
            Err(SyncError::RangeOutOfBounds { start, end, length }) => {
                assert_eq!((start, end, length), (2, 7, 3));
            }
            other => panic!("Expected RangeOutOfBounds, got {:?}", other),
        }
    }

    #[test]
    fn test_serialization_field_names() {
        let edit = TextEdit::new(1, 1, "u");
        let json = serde_json::to_value(&edit).unwrap();
        assert_eq!(json, serde_json::json!({"pos": 1, "del": 1, "ins": "u"}));

        let back: TextEdit = serde_json::from_value(json).unwrap();
        assert_eq!(back, edit);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    // Small alphabet so prefix/suffix overlaps and repeated runs are common
    fn repetitive_text() -> impl Strategy<Value = String> {
        prop::string::string_regex("[ab]{0,12}").unwrap()
    }

    fn unicode_text() -> impl Strategy<Value = String> {
        prop::collection::vec(
            prop_oneof![
                Just("a".to_string()),
                Just(" ".to_string()),
                Just("\n".to_string()),
                Just("é".to_string()),
                Just("世".to_string()),
                Just("🎉".to_string()),
            ],
            0..30,
        )
        .prop_map(|v| v.join(""))
    }

    fn any_pair() -> impl Strategy<Value = (String, String)> {
        prop_oneof![
            (repetitive_text(), repetitive_text()),
            (unicode_text(), unicode_text()),
            (any::<String>(), any::<String>()),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn round_trip((old, new) in any_pair()) {
            let edit = calc_diff(&old, &new);
            prop_assert_eq!(edit.apply(&old).unwrap(), new);
        }

        #[test]
        fn identity_is_noop(s in any::<String>()) {
            prop_assert_eq!(calc_diff(&s, &s), TextEdit::noop());
        }

        #[test]
        fn pos_within_both_lengths((old, new) in any_pair()) {
            let edit = calc_diff(&old, &new);
            let bound = old.chars().count().min(new.chars().count());
            prop_assert!(edit.pos <= bound);
        }

        #[test]
        fn edit_contained_in_old((old, new) in any_pair()) {
            let edit = calc_diff(&old, &new);
            prop_assert!(edit.pos + edit.del <= old.chars().count());
        }

        #[test]
        fn noop_only_for_equal((old, new) in any_pair()) {
            let edit = calc_diff(&old, &new);
            if edit.is_noop() {
                prop_assert_eq!(old, new);
            }
        }

        #[test]
        fn pos_is_common_prefix((old, new) in any_pair()) {
            prop_assume!(old != new);
            let edit = calc_diff(&old, &new);
            let prefix = old
                .chars()
                .zip(new.chars())
                .take_while(|(a, b)| a == b)
                .count();
            prop_assert_eq!(edit.pos, prefix);
        }

        #[test]
        fn utf16_agrees_with_str((old, new) in any_pair()) {
            let old16: Vec<u16> = old.encode_utf16().collect();
            let new16: Vec<u16> = new.encode_utf16().collect();
            prop_assert_eq!(calc_diff_utf16(&old16, &new16), calc_diff(&old, &new));
        }
    }
}
