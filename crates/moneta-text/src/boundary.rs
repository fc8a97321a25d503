//! Script classification and boundary predicates for unit tokens.
//!
//! Ideographic scripts carry no inter-word whitespace, so a word-boundary
//! test in the `\b` sense never fires there. The boundary has to be read
//! off the characters that conventionally flank a bare unit word instead:
//! digits, closing brackets, and sentence punctuation. Space-delimited
//! scripts keep the conventional word-boundary rule.

/// Tokenization regime a unit token belongs to.
///
/// Selected once per token, at token-set construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    /// Contains at least one Han ideograph; boundaries are inferred from
    /// flanking digits, brackets, and punctuation.
    Ideographic,
    /// Everything else; boundaries follow word-character transitions.
    Delimited,
}

/// Classify a token by the presence of a Han ideograph.
#[must_use]
pub fn classify(token: &str) -> Script {
    if token.chars().any(is_han) {
        Script::Ideographic
    } else {
        Script::Delimited
    }
}

/// Whether `c` falls in the unified Han ideograph block (`U+4E00..=U+9FA5`).
#[inline]
#[must_use]
pub fn is_han(c: char) -> bool {
    ('\u{4e00}'..='\u{9fa5}').contains(&c)
}

/// Sentence/clause punctuation that may trail an ideographic unit word.
///
/// Both full-width and ASCII forms are listed. The set is closed on
/// purpose: bracket- and tag-adjacent matches depend on exactly these
/// characters.
const TRAILING_PUNCT: &[char] = &[
    '，', '。', '！', '？', '、', '；', '：', ',', '.', '!', '?', ';', ':',
];

/// Valid character immediately before an ideographic unit occurrence.
///
/// `None` means start-of-text. Digits admit amounts like `100元`; the
/// closing brackets admit interpolation placeholders like `{user_gift}元`.
#[inline]
#[must_use]
pub fn ideographic_leading_ok(before: Option<char>) -> bool {
    match before {
        None => true,
        Some(c) => c.is_ascii_digit() || c.is_whitespace() || c == '}' || c == ']',
    }
}

/// Valid character immediately after an ideographic unit occurrence.
///
/// `None` means end-of-text. Angle brackets admit markup-adjacent
/// occurrences like `100元<br>`.
#[inline]
#[must_use]
pub fn ideographic_trailing_ok(after: Option<char>) -> bool {
    match after {
        None => true,
        Some(c) => c.is_whitespace() || c == '<' || c == '>' || TRAILING_PUNCT.contains(&c),
    }
}

/// Word character for the delimited boundary rule: letter, digit, or `_`.
#[inline]
#[must_use]
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Word boundary between two adjacent characters.
///
/// Text edges (`None`) always qualify; between two characters a boundary
/// exists exactly when one side is a word character and the other is not.
#[inline]
#[must_use]
pub fn word_boundary(a: Option<char>, b: Option<char>) -> bool {
    match (a, b) {
        (None, _) | (_, None) => true,
        (Some(a), Some(b)) => is_word_char(a) != is_word_char(b),
    }
}
