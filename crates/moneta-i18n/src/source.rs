//! Currency-aware message source: lookup orchestration and symbol filling.
//!
//! Resolution is a two-pass substitution. The first pass marks every
//! standalone unit token in the resolved translation with
//! [`CURRENCY_PLACEHOLDER`]; the second fills the placeholder with the
//! symbol read from the param source.
//!
//! # Invariants
//!
//! 1. **Missing is not empty**: a missing lookup falls back to the key
//!    text when the key is non-empty; an explicit empty translation is
//!    returned verbatim with no further processing.
//!
//! 2. **Symbol reads are fresh**: the currency symbol is read from the
//!    param source on every call, never cached.
//!
//! 3. **No shared mutable state**: `resolve` only reads its collaborators;
//!    calls are independent and safe to issue concurrently.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Missing translation | No catalog entry | Falls back to the key text |
//! | Empty translation | Explicit `""` entry | Returned as-is |
//! | Absent symbol param | Key not configured | Default symbol used |
//! | Empty unit list | No units configured | Marking is a no-op |

use std::collections::HashMap;
use std::hash::BuildHasher;

use moneta_text::TokenSet;

/// Reserved literal marking a confirmed currency span between the two
/// substitution passes. Must never be a standalone match for a configured
/// unit token.
pub const CURRENCY_PLACEHOLDER: &str = "{currency}";

/// Symbol used when the param source has no entry for the symbol key.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "￥";

/// Default param key naming the currency symbol.
pub const DEFAULT_SYMBOL_KEY: &str = "currency_symbol";

/// Unit tokens recognized out of the box: written forms of yuan and
/// dollar, the bare symbols, and the usual abbreviations.
pub const DEFAULT_UNITS: &[&str] = &[
    "元", "yuan", "yuans", "Yuan", "Yuans", "dollar", "dollars", "Dollar", "Dollars", "$", "USD",
    "RMB", "CNY", "¥",
];

/// Source of translated text.
///
/// `None` is a missing entry; `Some("")` is an explicit empty translation.
/// The two are not interchangeable: only a missing entry triggers the
/// fallback-to-key policy.
pub trait MessageLookup {
    /// Resolve `key` in `category` for `language`.
    fn message(&self, category: &str, key: &str, language: &str) -> Option<String>;
}

impl<F> MessageLookup for F
where
    F: Fn(&str, &str, &str) -> Option<String>,
{
    fn message(&self, category: &str, key: &str, language: &str) -> Option<String> {
        self(category, key, language)
    }
}

/// Key-value application parameters: the configuration collaborator the
/// currency symbol is read from.
pub trait ParamReader {
    /// Read a single parameter. Absence is not an error.
    fn param(&self, key: &str) -> Option<String>;
}

impl<F> ParamReader for F
where
    F: Fn(&str) -> Option<String>,
{
    fn param(&self, key: &str) -> Option<String> {
        self(key)
    }
}

impl<S: BuildHasher> ParamReader for HashMap<String, String, S> {
    fn param(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Construction-time configuration for currency replacement.
#[derive(Debug, Clone)]
pub struct CurrencyOptions {
    /// Ordered unit tokens; order determines replacement precedence.
    pub units: TokenSet,
    /// Master switch for the replacement pipeline.
    pub enabled: bool,
    /// Param key naming the currency symbol.
    pub symbol_key: String,
    /// Symbol used when the param source has no entry.
    pub default_symbol: String,
}

impl CurrencyOptions {
    /// Defaults: the stock unit list, replacement enabled, symbol read
    /// from `currency_symbol`, `￥` when absent.
    #[must_use]
    pub fn new() -> Self {
        Self {
            units: TokenSet::new(DEFAULT_UNITS.iter().copied()),
            enabled: true,
            symbol_key: DEFAULT_SYMBOL_KEY.to_string(),
            default_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }

    /// Replace the unit list. Order determines precedence; empty strings
    /// are dropped.
    #[must_use]
    pub fn units<I, S>(mut self, units: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.units = TokenSet::new(units);
        self
    }

    /// Enable or disable currency replacement.
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the param key the symbol is read from.
    #[must_use]
    pub fn symbol_key(mut self, key: impl Into<String>) -> Self {
        self.symbol_key = key.into();
        self
    }

    /// Set the symbol used when the param source has no entry.
    #[must_use]
    pub fn default_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.default_symbol = symbol.into();
        self
    }
}

impl Default for CurrencyOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Translation front-end that rewrites standalone currency units in
/// resolved messages to the configured symbol.
///
/// Composes two injected collaborators: a [`MessageLookup`] supplying raw
/// translations and a [`ParamReader`] supplying the symbol.
///
/// # Example
///
/// ```
/// use moneta_i18n::{CategoryStrings, CurrencyOptions, MessageCatalog, MessageSource};
///
/// let mut app = CategoryStrings::new();
/// app.insert("currency", "元");
///
/// let mut catalog = MessageCatalog::new();
/// catalog.add_category("zh-CN", "app", app);
///
/// let source = MessageSource::new(catalog, |_: &str| None::<String>, CurrencyOptions::new());
///
/// // A translated value that is itself a bare unit token.
/// assert_eq!(source.resolve("app", "currency", "zh-CN"), Some("￥".into()));
/// // No catalog entry: the key itself is processed.
/// assert_eq!(source.resolve("app", "余额100元", "zh-CN"), Some("余额100￥".into()));
/// ```
#[derive(Debug, Clone)]
pub struct MessageSource<L, P> {
    lookup: L,
    params: P,
    options: CurrencyOptions,
}

impl<L, P> MessageSource<L, P>
where
    L: MessageLookup,
    P: ParamReader,
{
    /// Create a message source over the two collaborators.
    pub fn new(lookup: L, params: P, options: CurrencyOptions) -> Self {
        Self {
            lookup,
            params,
            options,
        }
    }

    /// The configuration this source was built with.
    #[must_use]
    pub fn options(&self) -> &CurrencyOptions {
        &self.options
    }

    /// Resolve a message and fill in the currency symbol.
    ///
    /// A missing lookup falls back to the key text, so embedded units in
    /// untranslated keys are still processed. `None` is returned only
    /// when the lookup misses and the key is empty; an explicit empty
    /// translation comes back as `Some("")` untouched.
    #[must_use]
    pub fn resolve(&self, category: &str, key: &str, language: &str) -> Option<String> {
        let mut value = self.lookup.message(category, key, language);
        if value.is_none() && !key.is_empty() {
            tracing::debug!(category, key, language, "translation missing, using key text");
            value = Some(key.to_owned());
        }
        let value = value?;
        if value.is_empty() || !self.options.enabled {
            return Some(value);
        }

        let marked = self.options.units.mark(&value, CURRENCY_PLACEHOLDER);
        Some(marked.replace(CURRENCY_PLACEHOLDER, &self.symbol()))
    }

    /// Currency symbol for one call: the param value when present, the
    /// configured default otherwise.
    #[must_use]
    pub fn symbol(&self) -> String {
        self.params
            .param(&self.options.symbol_key)
            .unwrap_or_else(|| self.options.default_symbol.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_lookup(_: &str, _: &str, _: &str) -> Option<String> {
        None
    }

    fn no_params(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn default_options() {
        let options = CurrencyOptions::new();
        assert!(options.enabled);
        assert_eq!(options.units.len(), DEFAULT_UNITS.len());
        assert_eq!(options.symbol_key, "currency_symbol");
        assert_eq!(options.default_symbol, "￥");
    }

    #[test]
    fn builder_chain() {
        let options = CurrencyOptions::new()
            .units(["元"])
            .enabled(false)
            .symbol_key("money_sign")
            .default_symbol("$");
        assert_eq!(options.units.len(), 1);
        assert!(!options.enabled);
        assert_eq!(options.symbol_key, "money_sign");
        assert_eq!(options.default_symbol, "$");
    }

    #[test]
    fn missing_key_falls_back_to_key_text() {
        let source = MessageSource::new(no_lookup, no_params, CurrencyOptions::new());
        assert_eq!(
            source.resolve("app", "用户名", "zh-CN"),
            Some("用户名".into())
        );
    }

    #[test]
    fn missing_empty_key_stays_missing() {
        let source = MessageSource::new(no_lookup, no_params, CurrencyOptions::new());
        assert_eq!(source.resolve("app", "", "zh-CN"), None);
    }

    #[test]
    fn empty_translation_passes_through_unprocessed() {
        let lookup = |_: &str, _: &str, _: &str| Some(String::new());
        let source = MessageSource::new(lookup, no_params, CurrencyOptions::new());
        assert_eq!(source.resolve("app", "余额100元", "zh-CN"), Some(String::new()));
    }

    #[test]
    fn fallback_value_is_processed() {
        let source = MessageSource::new(no_lookup, no_params, CurrencyOptions::new());
        assert_eq!(
            source.resolve("app", "余额100元", "zh-CN"),
            Some("余额100￥".into())
        );
    }

    #[test]
    fn disabled_flag_short_circuits() {
        let options = CurrencyOptions::new().enabled(false);
        let source = MessageSource::new(no_lookup, no_params, options);
        assert!(!source.options().enabled);
        assert_eq!(
            source.resolve("app", "余额100元", "zh-CN"),
            Some("余额100元".into())
        );
    }

    #[test]
    fn symbol_prefers_param_value() {
        let params = |key: &str| (key == "currency_symbol").then(|| "$".to_string());
        let source = MessageSource::new(no_lookup, params, CurrencyOptions::new());
        assert_eq!(source.symbol(), "$");
        assert_eq!(
            source.resolve("app", "余额100元", "zh-CN"),
            Some("余额100$".into())
        );
    }

    #[test]
    fn symbol_defaults_when_param_absent() {
        let source = MessageSource::new(no_lookup, no_params, CurrencyOptions::new());
        assert_eq!(source.symbol(), "￥");
    }

    #[test]
    fn custom_symbol_key() {
        let params = |key: &str| (key == "money_sign").then(|| "€".to_string());
        let options = CurrencyOptions::new().symbol_key("money_sign");
        let source = MessageSource::new(no_lookup, params, options);
        assert_eq!(source.symbol(), "€");
    }

    #[test]
    fn empty_unit_list_is_a_no_op() {
        let options = CurrencyOptions::new().units(Vec::<String>::new());
        let source = MessageSource::new(no_lookup, no_params, options);
        assert_eq!(
            source.resolve("app", "余额100元", "zh-CN"),
            Some("余额100元".into())
        );
    }
}
