use crate::balance::{BalanceReport, Mark};
use crate::replace::{ReplaceOptions, Replacement};
use std::ops::Range;

/// Everything the composer needs to know about the text around the span.
pub struct ComposeContext<'a> {
    pub left: &'a BalanceReport,
    pub right: &'a BalanceReport,
    /// The quote mark touching the cursor's left, if any.
    pub adjoining_mark: Option<Mark>,
}

/// Quotes and pads `insert`, splices it over `span`, and reports the offsets
/// the caller needs to reposition its caret.
pub fn compose(
    old: &[char],
    insert: &str,
    span: Range<usize>,
    ctx: ComposeContext,
    options: &ReplaceOptions,
) -> Replacement {
    let mut composed = if options.quotation && needs_quoting(insert) {
        let mark = choose_mark(&ctx).as_char();
        let mut quoted = String::with_capacity(insert.len() + 2);
        quoted.push(mark);
        quoted.push_str(insert);
        quoted.push(mark);
        quoted
    } else {
        insert.to_string()
    };

    // a space on each side whose neighbor isn't one already
    if span.start >= 1 && old[span.start - 1] != ' ' {
        composed.insert(0, ' ');
    }
    if let Some(&next) = old.get(span.end) {
        if next != ' ' {
            composed.push(' ');
        }
    } else if options.add_space {
        composed.push(' ');
    }

    let mut text = String::with_capacity(old.len() + composed.len());
    text.extend(&old[..span.start]);
    text.push_str(&composed);
    text.extend(&old[span.end..]);

    Replacement {
        text,
        start_position: span.start,
        end_position: span.end,
        new_end_position: span.start + composed.chars().count(),
    }
}

/// An insertion that already carries its own quoting is left untouched: fully
/// wrapped in matching marks on both ends, or a `key:"value"` construct (a
/// colon somewhere and a mark at the end).
fn needs_quoting(insert: &str) -> bool {
    let wrapped = Mark::BOTH
        .iter()
        .any(|mark| insert.starts_with(mark.as_char()) && insert.ends_with(mark.as_char()));
    let colon_quoted = insert.contains(':') && Mark::BOTH.iter().any(|mark| insert.ends_with(mark.as_char()));
    !wrapped && !colon_quoted
}

/// Which mark to wrap the insertion in. A mark adjoining the cursor wins, so
/// the insertion continues its neighbor's quoting; then whichever side has an
/// open quote; then the marks already present in the context, preferring
/// agreement, then the left side. `"` when nothing suggests otherwise.
fn choose_mark(ctx: &ComposeContext) -> Mark {
    if let Some(adjoining) = ctx.adjoining_mark {
        return adjoining;
    }
    if let Some(unbalanced) = ctx.left.first_unbalanced.or(ctx.right.last_unbalanced) {
        return unbalanced;
    }
    match (ctx.left.last_mark, ctx.right.first_mark) {
        (Some(left), _) => left,
        (None, Some(right)) => right,
        (None, None) => Mark::Double,
    }
}
