use crate::balance::{analyze, BalanceReport, Mark};
use crate::breaks::find_breaks;
use crate::compose::{compose, ComposeContext};
use crate::mask::mask_colon_pairs;
use derive_builder::Builder;
use serde::Serialize;
use std::ops::Range;

/// Per-call configuration for [`replace_text_at_position`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Builder)]
#[builder(default)]
pub struct ReplaceOptions {
    /// Wrap the inserted text in a quote mark chosen from the surrounding
    /// context. On by default.
    pub quotation: bool,
    /// Append a trailing space when the insertion lands at the very end of
    /// the query, so the user can keep typing the next term. Off by default.
    pub add_space: bool,
}

impl Default for ReplaceOptions {
    fn default() -> Self {
        Self {
            quotation: true,
            add_space: false,
        }
    }
}

/// One finished replacement: the new query string plus the offsets a
/// text-input integration needs to reposition its caret. Serializes with the
/// camelCase keys such integrations consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Replacement {
    /// The full new query string.
    pub text: String,
    /// Char offset in the old text where the replacement began.
    pub start_position: usize,
    /// Char offset in the old text where the replacement ended (exclusive).
    pub end_position: usize,
    /// Caret offset in `text`, just past the inserted token.
    pub new_end_position: usize,
}

/// The token under the cursor, as [`token_at_position`] sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSpan {
    /// The token text, sliced from the query.
    pub text: String,
    pub start_position: usize,
    pub end_position: usize,
}

/// Replaces the token under the cursor with `insert_text`.
///
/// Positions are zero-based char offsets; a `position` past the end of
/// `old_text` clamps to the end. This never fails: when no token boundary is
/// discoverable the whole string is replaced, which is the safe fallback for
/// a query that is about to be superseded anyway.
pub fn replace_text_at_position(
    old_text: &str,
    insert_text: &str,
    position: usize,
    options: &ReplaceOptions,
) -> Replacement {
    let old: Vec<char> = old_text.chars().collect();
    let masked: Vec<char> = mask_colon_pairs(old_text).chars().collect();
    let cursor = position.min(old.len());

    let (span, left, right) = token_range(&old, &masked, cursor);
    let ctx = ComposeContext {
        left: &left,
        right: &right,
        adjoining_mark: cursor.checked_sub(1).and_then(|at| Mark::from_char(masked[at])),
    };
    compose(&old, insert_text, span, ctx, options)
}

/// The span the cursor's token occupies, without composing any replacement.
///
/// This is the lookup half of the suggestion workflow: an autocomplete
/// surface extracts the token under the caret to search on, then feeds the
/// chosen suggestion back through [`replace_text_at_position`].
pub fn token_at_position(text: &str, position: usize) -> TokenSpan {
    let old: Vec<char> = text.chars().collect();
    let masked: Vec<char> = mask_colon_pairs(text).chars().collect();
    let cursor = position.min(old.len());

    let (span, _, _) = token_range(&old, &masked, cursor);
    TokenSpan {
        text: old[span.clone()].iter().collect(),
        start_position: span.start,
        end_position: span.end,
    }
}

fn token_range(old: &[char], masked: &[char], cursor: usize) -> (Range<usize>, BalanceReport, BalanceReport) {
    let left = analyze(&masked[..cursor]);
    let right = analyze(&masked[cursor..]);

    let breaks = find_breaks(old, masked, cursor, &left, &right);
    // an absent break widens to the corresponding end of the string, and the
    // start yields to the end so the span can never invert
    let end = breaks.end.map_or(old.len(), |end| end.min(old.len()));
    let start = breaks.start.unwrap_or(0).min(end);
    (start..end, left, right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bare_word_gets_double_quotes() {
        let replaced = replace_text_at_position("test", "yes", 4, &ReplaceOptions::default());
        assert_eq!(replaced.text, "\"yes\"");
        assert_eq!((replaced.start_position, replaced.end_position), (0, 4));
        assert_eq!(replaced.new_end_position, 5);
    }

    #[test]
    fn quoted_token_reuses_its_mark() {
        let replaced = replace_text_at_position("'test'", "yes", 3, &ReplaceOptions::default());
        assert_eq!(replaced.text, "'yes'");
    }

    #[test]
    fn position_clamps_to_text_end() {
        let clamped = replace_text_at_position("test", "yes", 400, &ReplaceOptions::default());
        let at_end = replace_text_at_position("test", "yes", 4, &ReplaceOptions::default());
        assert_eq!(clamped, at_end);
    }

    #[test]
    fn empty_text_inserts_only() {
        let replaced = replace_text_at_position("", "x", 0, &ReplaceOptions::default());
        assert_eq!(replaced.text, "\"x\"");
        assert_eq!((replaced.start_position, replaced.end_position), (0, 0));
    }

    #[test]
    fn no_quotation_adds_no_marks() {
        let options = ReplaceOptionsBuilder::default().quotation(false).build().unwrap();
        let replaced = replace_text_at_position("test", "yes", 4, &options);
        assert_eq!(replaced.text, "yes");
    }

    #[test]
    fn options_builder_defaults_match() {
        let built = ReplaceOptionsBuilder::default().build().unwrap();
        assert_eq!(built, ReplaceOptions::default());
        assert_eq!(built.quotation, true);
        assert_eq!(built.add_space, false);
    }

    #[test]
    fn replacing_quoted_token_with_itself_is_stable() {
        let first = replace_text_at_position("\"X\"", "\"X\"", 2, &ReplaceOptions::default());
        assert_eq!(first.text, "\"X\"");
        let again = replace_text_at_position(&first.text, "\"X\"", 2, &ReplaceOptions::default());
        assert_eq!(again, first);
    }

    #[test]
    fn new_end_position_counts_chars_not_bytes() {
        let replaced = replace_text_at_position("héllo wörld", "ünïcode", 2, &ReplaceOptions::default());
        assert_eq!(replaced.text, "\"ünïcode\" wörld");
        assert_eq!((replaced.start_position, replaced.end_position), (0, 5));
        assert_eq!(replaced.new_end_position, 9);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let replaced = replace_text_at_position("test", "yes", 4, &ReplaceOptions::default());
        let json = serde_json::to_value(&replaced).unwrap();
        assert_eq!(json["text"], "\"yes\"");
        assert_eq!(json["startPosition"], 0);
        assert_eq!(json["endPosition"], 4);
        assert_eq!(json["newEndPosition"], 5);
    }

    mod token_at {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn bare_word() {
            let token = token_at_position("hello world", 3);
            assert_eq!(token.text, "hello");
            assert_eq!((token.start_position, token.end_position), (0, 5));
        }

        #[test]
        fn colon_pair_spans_key_and_value() {
            let token = token_at_position("artist:\"cool\" blue", 9);
            assert_eq!(token.text, "artist:\"cool\"");
        }

        #[test]
        fn gap_after_space_covers_only_the_space() {
            let token = token_at_position("ok hey", 3);
            assert_eq!(token.text, " ");
            assert_eq!((token.start_position, token.end_position), (2, 3));
        }

        #[test]
        fn empty_text() {
            let token = token_at_position("", 0);
            assert_eq!(token.text, "");
            assert_eq!((token.start_position, token.end_position), (0, 0));
        }
    }
}
