/// One of the two quote characters the query grammar recognizes as a token
/// delimiter.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mark {
    Double,
    Single,
}

impl Mark {
    pub const BOTH: [Mark; 2] = [Mark::Double, Mark::Single];

    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '"' => Some(Mark::Double),
            '\'' => Some(Mark::Single),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Mark::Double => '"',
            Mark::Single => '\'',
        }
    }
}

/// Characters that end a word. A mark flanked by word characters on both
/// sides is an apostrophe (`brother's`, `sisters'`), not a delimiter.
const NON_WORD_CHARS: &[char] = &[
    ':', '(', ')', '{', '}', '|', '/', '\\', '^', '!', '@', '#', '$', '%', '&', '*', '-', '=', '+', '~', '[', ']',
    '<', '>', '?', ' ',
];

pub fn is_word_char(ch: char) -> bool {
    !NON_WORD_CHARS.contains(&ch)
}

/// Quote state of a slice of query text, computed independently for the text
/// on each side of the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceReport {
    /// Every opened mark was closed again.
    pub balanced: bool,
    /// At least one mark opened a quote (even one that was closed later).
    pub has_mark: bool,
    /// The first genuine mark in the text, balanced or not.
    pub first_mark: Option<Mark>,
    /// The last genuine mark in the text, balanced or not.
    pub last_mark: Option<Mark>,
    /// The most recently opened mark still unclosed (top of the stack).
    pub first_unbalanced: Option<Mark>,
    /// The first opened mark still unclosed (bottom of the stack).
    pub last_unbalanced: Option<Mark>,
}

/// Scans `chars` left to right, pairing quote marks on a stack: a mark equal
/// to the stack top closes it, any other mark opens a new quote. Marks that
/// read as apostrophes don't participate at all. Always returns a full
/// report; there is no failure mode, including for the empty slice.
pub fn analyze(chars: &[char]) -> BalanceReport {
    let mut stack: Vec<Mark> = Vec::new();
    let mut has_mark = false;
    let mut first_mark = None;
    let mut last_mark = None;

    for (at, &ch) in chars.iter().enumerate() {
        let Some(mark) = Mark::from_char(ch) else {
            continue;
        };
        if at > 0 && at + 1 < chars.len() && is_word_char(chars[at - 1]) && is_word_char(chars[at + 1]) {
            // `sisters' and` still counts; `brother's` does not
            continue;
        }

        if first_mark.is_none() {
            first_mark = Some(mark);
        }
        last_mark = Some(mark);

        if stack.last() == Some(&mark) {
            stack.pop();
        } else {
            has_mark = true;
            stack.push(mark);
        }
    }

    BalanceReport {
        balanced: stack.is_empty(),
        has_mark,
        first_mark,
        last_mark,
        first_unbalanced: stack.last().copied(),
        last_unbalanced: stack.first().copied(),
    }
}
