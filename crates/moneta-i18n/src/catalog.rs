//! Message catalog with per-language, per-category tables and language
//! fallback.
//!
//! # Invariants
//!
//! 1. **Fallback chain terminates**: every lookup walks the chain exactly
//!    once, returning `None` if no language provides the key.
//!
//! 2. **Empty is present**: an explicit empty translation stops the walk
//!    and is returned as-is; it is distinct from a missing entry.
//!
//! 3. **Thread safety**: `MessageCatalog` is `Send + Sync` (all data is
//!    immutable after construction).

use std::fmt;

use rustc_hash::FxHashMap;

use crate::source::MessageLookup;

/// Errors from catalog construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The same key appeared twice while building one category table.
    DuplicateKey {
        /// The offending message key.
        key: String,
    },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateKey { key } => write!(f, "duplicate key '{key}'"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Translations for one `(language, category)` cell.
#[derive(Debug, Clone, Default)]
pub struct CategoryStrings {
    strings: FxHashMap<String, String>,
}

impl CategoryStrings {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a translation, overwriting any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.strings.insert(key.into(), value.into());
    }

    /// Build a table from `(key, value)` pairs, rejecting duplicate keys.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateKey`] when the same key appears
    /// more than once.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut table = Self::new();
        for (key, value) in pairs {
            let key = key.into();
            if table.strings.contains_key(&key) {
                return Err(CatalogError::DuplicateKey { key });
            }
            table.strings.insert(key, value.into());
        }
        Ok(table)
    }

    /// Look up a translation by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Iterate over all keys in this table.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.strings.keys().map(String::as_str)
    }
}

/// Central catalog: language → category → translations, with a language
/// fallback chain walked in order on a miss.
///
/// # Example
///
/// ```
/// use moneta_i18n::{CategoryStrings, MessageCatalog};
///
/// let mut app = CategoryStrings::new();
/// app.insert("Hello", "你好");
///
/// let mut catalog = MessageCatalog::new();
/// catalog.add_category("zh-CN", "app", app);
/// catalog.set_fallback_chain(vec!["zh-CN".into()]);
///
/// assert_eq!(catalog.get("app", "Hello", "zh-CN"), Some("你好"));
/// // "zh-TW" is not loaded; the chain resolves it.
/// assert_eq!(catalog.get("app", "Hello", "zh-TW"), Some("你好"));
/// assert_eq!(catalog.get("app", "Goodbye", "zh-CN"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    languages: FxHashMap<String, FxHashMap<String, CategoryStrings>>,
    fallback_chain: Vec<String>,
}

impl MessageCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a category table for a language, replacing any previous one.
    pub fn add_category(
        &mut self,
        language: impl Into<String>,
        category: impl Into<String>,
        strings: CategoryStrings,
    ) {
        self.languages
            .entry(language.into())
            .or_default()
            .insert(category.into(), strings);
    }

    /// Set the language fallback chain (tried in order on a miss).
    ///
    /// Example: `["zh-CN", "en-US"]` tries Simplified Chinese, then
    /// US English.
    pub fn set_fallback_chain(&mut self, chain: Vec<String>) {
        self.fallback_chain = chain;
    }

    /// Look up a translation.
    ///
    /// Tries the requested language first, then walks the fallback chain.
    /// `None` means no language provides the key; an explicit empty
    /// translation is `Some("")` and stops the walk.
    #[must_use]
    pub fn get(&self, category: &str, key: &str, language: &str) -> Option<&str> {
        if let Some(value) = self.get_from(language, category, key) {
            return Some(value);
        }
        for fallback in &self.fallback_chain {
            if fallback == language {
                continue; // Already tried
            }
            if let Some(value) = self.get_from(fallback, category, key) {
                return Some(value);
            }
        }
        None
    }

    fn get_from(&self, language: &str, category: &str, key: &str) -> Option<&str> {
        self.languages
            .get(language)
            .and_then(|categories| categories.get(category))
            .and_then(|strings| strings.get(key))
    }

    /// All registered language tags.
    #[must_use]
    pub fn languages(&self) -> Vec<&str> {
        self.languages.keys().map(String::as_str).collect()
    }
}

impl MessageLookup for MessageCatalog {
    fn message(&self, category: &str, key: &str, language: &str) -> Option<String> {
        self.get(category, key, language).map(str::to_string)
    }
}
