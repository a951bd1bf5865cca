use crate::balance::{BalanceReport, Mark};

/// Where the replaceable token starts and ends, as absolute char offsets into
/// the (masked) query. An absent side means no boundary was found there; the
/// caller widens it to the corresponding end of the string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breaks {
    pub start: Option<usize>,
    pub end: Option<usize>,
}

/// Decides the token boundaries around `cursor`, given the balance state of
/// the text on each side. `old` and `masked` are the same length; mark and
/// colon checks that must not see masked-away `key:"value"` marks run against
/// `masked`, while the colon test for a mark's prefix reads `old`.
///
/// Stages run in order and later stages may override earlier results:
/// unbalanced-left analysis, whitespace analysis, then the end-of-quote
/// override for a closing mark touching the cursor.
pub fn find_breaks(
    old: &[char],
    masked: &[char],
    cursor: usize,
    left: &BalanceReport,
    right: &BalanceReport,
) -> Breaks {
    let mut start: Option<usize> = None;
    let mut end: Option<usize> = None;
    let mut in_colon = false;

    if !left.balanced {
        // the cursor is inside an open quote; the token runs to the next space
        end = position_from(masked, cursor, |ch| ch == ' ');

        if !right.balanced || !right.has_mark {
            let left_marks = unbalanced_or_both(&left.first_unbalanced);
            let right_marks = unbalanced_or_both(&right.last_unbalanced);

            // Cursor sitting past the end of a balanced quote (`'sis|ters'`):
            // consume the whole quoted run through its closing mark.
            if cursor >= 2 && !is_any(masked[cursor - 1], right_marks) {
                end = Some(match position_from(masked, cursor, |ch| is_any(ch, right_marks)) {
                    Some(closing) => closing + 1,
                    None => masked.len(),
                });
            }

            // The nearest opening-mark candidate strictly before the char
            // left of the cursor.
            let candidate = rposition_before(masked, cursor.saturating_sub(1), |ch| is_any(ch, left_marks));
            if let Some(opening) = candidate {
                if old[opening.saturating_sub(1)] == ':' {
                    // the mark belongs to a `key:"value"` pair, so the key is
                    // part of the token; whitespace rules take over below
                    in_colon = true;
                } else {
                    start = Some(opening);
                }
            }

            // A break with a word on its left and a space on its right would
            // split that word (`sister' ok|`); the nearest space wins instead.
            if let Some(opening) = start {
                let before = (opening as isize - 1).min(cursor as isize - 2).max(0) as usize;
                let after = (opening + 1).min(cursor);
                if masked.get(before) != Some(&' ') && masked.get(after) == Some(&' ') {
                    start = rposition_before(masked, cursor, |ch| ch == ' ');
                }
            }
        }
    }

    if left.balanced || in_colon || (right.has_mark && right.balanced) {
        // whitespace-delimited: nearest space on each side
        if start.is_none() {
            start = rposition_before(masked, cursor, |ch| ch == ' ');
        }
        end = Some(position_from(masked, cursor, |ch| ch == ' ').unwrap_or(masked.len()));

        // An empty gap -- cursor at 0 or right after a space with everything
        // balanced -- replaces nothing to the right.
        let at_gap = cursor == 0 || old[cursor - 1] == ' ';
        if at_gap && left.balanced && right.balanced {
            end = Some(cursor);
        }
    }

    // A closing mark touching the cursor's left whose opening partner starts a
    // token: the whole quoted run is the token, opening mark included.
    if let Some(closing) = cursor.checked_sub(1).and_then(|at| Mark::from_char(masked[at])) {
        if left.first_unbalanced != Some(closing) {
            match rposition_before(masked, cursor - 1, |ch| ch == closing.as_char()) {
                Some(opening) if opening == 0 || masked[opening - 1] == ' ' => {
                    start = Some(opening);
                    end = Some(cursor);
                }
                // the mark pairs into a neighboring token; leave the breaks be
                Some(_) => {}
                None => start = Some(cursor - 1),
            }
        }
    }

    Breaks { start, end }
}

/// Offset of the first char at or after `from` satisfying `pred`.
fn position_from<F>(chars: &[char], from: usize, pred: F) -> Option<usize>
where
    F: Fn(char) -> bool,
{
    let from = from.min(chars.len());
    chars[from..].iter().position(|&ch| pred(ch)).map(|at| from + at)
}

/// Offset of the last char strictly before `before` satisfying `pred`.
fn rposition_before<F>(chars: &[char], before: usize, pred: F) -> Option<usize>
where
    F: Fn(char) -> bool,
{
    chars[..before.min(chars.len())].iter().rposition(|&ch| pred(ch))
}

fn unbalanced_or_both(mark: &Option<Mark>) -> &[Mark] {
    match mark {
        Some(single) => std::slice::from_ref(single),
        None => &Mark::BOTH,
    }
}

fn is_any(ch: char, marks: &[Mark]) -> bool {
    marks.iter().any(|mark| mark.as_char() == ch)
}
