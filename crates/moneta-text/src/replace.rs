//! Boundary-aware replacement of unit tokens with a placeholder.
//!
//! # Invariants
//!
//! 1. **List order wins**: tokens are applied in list order; an earlier
//!    token claims its span, and later tokens never re-match the inserted
//!    placeholder. The placeholder must not itself be a standalone match
//!    for any configured token.
//!
//! 2. **Literal matching**: occurrences are found by case-sensitive
//!    substring search. No pattern language is involved, so any token
//!    string is safe verbatim.
//!
//! 3. **Total**: `mark` never panics; text outside the claimed spans
//!    passes through byte-for-byte.

use std::borrow::Cow;

use smallvec::SmallVec;

use crate::boundary::{self, Script, classify};

/// A unit token with its precomputed [`Script`] classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitToken {
    text: String,
    script: Script,
}

impl UnitToken {
    /// Create a token, classifying it once.
    ///
    /// Returns `None` for the empty string, which would otherwise match
    /// everywhere.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.is_empty() {
            return None;
        }
        let script = classify(&text);
        Some(Self { text, script })
    }

    /// The literal token text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The classification selected at construction.
    #[must_use]
    pub fn script(&self) -> Script {
        self.script
    }

    /// Whether the occurrence at `start..end` of `text` sits on valid
    /// boundaries for this token's script.
    fn qualifies(&self, text: &str, start: usize, end: usize) -> bool {
        let before = text[..start].chars().next_back();
        let after = text[end..].chars().next();
        match self.script {
            Script::Ideographic => {
                boundary::ideographic_leading_ok(before)
                    && boundary::ideographic_trailing_ok(after)
            }
            Script::Delimited => {
                boundary::word_boundary(before, self.text.chars().next())
                    && boundary::word_boundary(self.text.chars().next_back(), after)
            }
        }
    }
}

/// Ordered set of unit tokens.
///
/// Order determines replacement precedence: whichever token is processed
/// first claims its span.
///
/// # Example
///
/// ```
/// use moneta_text::TokenSet;
///
/// let units = TokenSet::new(["元", "yuan"]);
/// assert_eq!(units.mark("余额100元", "{currency}"), "余额100{currency}");
/// assert_eq!(units.mark("元素周期表", "{currency}"), "元素周期表");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet {
    tokens: Vec<UnitToken>,
}

impl TokenSet {
    /// Build a token set, preserving order. Empty strings are dropped.
    pub fn new<I, S>(units: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens = units
            .into_iter()
            .filter_map(|unit| {
                let token = UnitToken::new(unit);
                if token.is_none() {
                    tracing::debug!("dropping empty unit token");
                }
                token
            })
            .collect();
        Self { tokens }
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the set has no tokens (marking becomes the identity).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterate over the tokens in precedence order.
    pub fn tokens(&self) -> impl Iterator<Item = &UnitToken> {
        self.tokens.iter()
    }

    /// Rewrite every qualifying occurrence of each token to `placeholder`.
    ///
    /// Tokens are applied as sequential passes in list order; each pass
    /// scans the output of the previous one, left to right, without
    /// overlaps. A `}` introduced by an earlier replacement is therefore a
    /// valid leading boundary for a later ideographic token. Text with no
    /// qualifying occurrence is returned unchanged.
    #[must_use]
    pub fn mark(&self, text: &str, placeholder: &str) -> String {
        let mut current = Cow::Borrowed(text);
        for token in &self.tokens {
            if let Some(rewritten) = mark_token(current.as_ref(), token, placeholder) {
                current = Cow::Owned(rewritten);
            }
        }
        current.into_owned()
    }
}

/// Single replacement pass for one token. `None` when nothing qualified.
fn mark_token(text: &str, token: &UnitToken, placeholder: &str) -> Option<String> {
    let needle = token.text();
    let mut starts: SmallVec<[usize; 4]> = SmallVec::new();
    let mut pos = 0;
    while let Some(off) = text[pos..].find(needle) {
        let start = pos + off;
        let end = start + needle.len();
        if token.qualifies(text, start, end) {
            starts.push(start);
            pos = end;
        } else {
            // A failed candidate only consumes one char; the next
            // occurrence may begin inside it.
            pos = start + text[start..].chars().next().map_or(needle.len(), char::len_utf8);
        }
    }
    if starts.is_empty() {
        return None;
    }

    let mut out = String::with_capacity(text.len() + starts.len() * placeholder.len());
    let mut tail = 0;
    for &start in &starts {
        out.push_str(&text[tail..start]);
        out.push_str(placeholder);
        tail = start + needle.len();
    }
    out.push_str(&text[tail..]);
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PH: &str = "{currency}";

    fn units() -> TokenSet {
        TokenSet::new([
            "元", "yuan", "yuans", "Yuan", "dollar", "dollars", "$", "USD", "RMB", "CNY", "¥",
        ])
    }

    #[test]
    fn ideographic_after_digits() {
        assert_eq!(units().mark("100元。", PH), "100{currency}。");
        assert_eq!(units().mark("余额500元", PH), "余额500{currency}");
    }

    #[test]
    fn ideographic_embedded_rejected() {
        assert_eq!(units().mark("元素周期表", PH), "元素周期表");
        assert_eq!(units().mark("单元格", PH), "单元格");
        assert_eq!(units().mark("状态元气满满", PH), "状态元气满满");
    }

    #[test]
    fn ideographic_requires_trailing_boundary() {
        // Leading boundary alone is not enough.
        assert_eq!(units().mark("100元宝", PH), "100元宝");
    }

    #[test]
    fn ideographic_bare_token() {
        assert_eq!(units().mark("元", PH), "{currency}");
    }

    #[test]
    fn ideographic_after_closing_brackets() {
        assert_eq!(units().mark(":{user_gift}元<", PH), ":{user_gift}{currency}<");
        assert_eq!(units().mark(":{user_gift}元>", PH), ":{user_gift}{currency}>");
        assert_eq!(units().mark("[gift]元，好", PH), "[gift]{currency}，好");
    }

    #[test]
    fn ideographic_before_angle_bracket() {
        assert_eq!(units().mark("100元<", PH), "100{currency}<");
    }

    #[test]
    fn ideographic_sentence_positions() {
        assert_eq!(units().mark("价格：100元", PH), "价格：100{currency}");
        assert_eq!(units().mark("付100元，谢谢", PH), "付100{currency}，谢谢");
    }

    #[test]
    fn delimited_whole_word() {
        assert_eq!(units().mark("100 yuan", PH), "100 {currency}");
        assert_eq!(units().mark("Price: 100 yuan.", PH), "Price: 100 {currency}.");
        assert_eq!(units().mark("pay in USD today", PH), "pay in {currency} today");
    }

    #[test]
    fn delimited_embedded_rejected() {
        assert_eq!(units().mark("yuanbao", PH), "yuanbao");
        assert_eq!(units().mark("siyuan", PH), "siyuan");
        assert_eq!(units().mark("yuan_reserve", PH), "yuan_reserve");
    }

    #[test]
    fn delimited_case_sensitive() {
        assert_eq!(units().mark("YUAN 100", PH), "YUAN 100");
        assert_eq!(units().mark("Yuan 100", PH), "{currency} 100");
    }

    #[test]
    fn symbol_token_needs_adjacent_word_run() {
        assert_eq!(units().mark("US$100", PH), "US{currency}100");
        assert_eq!(units().mark("100$", PH), "100{currency}");
        assert_eq!(units().mark("$5", PH), "{currency}5");
        // No word run on either side: no boundary to anchor on.
        assert_eq!(units().mark("pay $ now", PH), "pay $ now");
    }

    #[test]
    fn prefix_token_does_not_claim_longer_word() {
        // "yuan" precedes "yuans" in the list but cannot match inside it.
        assert_eq!(units().mark("5 yuans!", PH), "5 {currency}!");
    }

    #[test]
    fn list_order_claims_span() {
        let long_first = TokenSet::new(["100元", "元"]);
        assert_eq!(long_first.mark(" 100元。", PH), " {currency}。");

        let short_first = TokenSet::new(["元", "100元"]);
        assert_eq!(short_first.mark(" 100元。", PH), " 100{currency}。");
    }

    #[test]
    fn sequential_passes_see_rewritten_text() {
        // The `}` closing the first placeholder is a valid leading
        // boundary for the ideographic pass that follows.
        let set = TokenSet::new(["$", "元"]);
        assert_eq!(set.mark("100$元。", PH), "100{currency}{currency}。");
    }

    #[test]
    fn empty_set_is_identity() {
        let set = TokenSet::new(Vec::<String>::new());
        assert!(set.is_empty());
        assert_eq!(set.mark("100元", PH), "100元");
    }

    #[test]
    fn empty_tokens_are_dropped() {
        let set = TokenSet::new(["", "元"]);
        assert_eq!(set.len(), 1);
        assert_eq!(set.mark("100元", PH), "100{currency}");
    }

    #[test]
    fn token_free_text_unchanged() {
        assert_eq!(units().mark("用户名", PH), "用户名");
        assert_eq!(units().mark("！？。", PH), "！？。");
        assert_eq!(units().mark("", PH), "");
    }

    #[test]
    fn token_classification_is_cached() {
        let token = UnitToken::new("元").unwrap();
        assert_eq!(token.script(), Script::Ideographic);
        assert_eq!(token.text(), "元");
        assert!(UnitToken::new("").is_none());
    }

    #[test]
    fn precedence_order_is_preserved() {
        let set = TokenSet::new(["元", "yuan"]);
        let texts: Vec<&str> = set.tokens().map(UnitToken::text).collect();
        assert_eq!(texts, vec!["元", "yuan"]);
    }

    #[test]
    fn multiple_occurrences_in_one_pass() {
        assert_eq!(
            units().mark("押金100元，租金200元。", PH),
            "押金100{currency}，租金200{currency}。"
        );
    }
}
