#![forbid(unsafe_code)]

//! Currency-aware message lookup for translation pipelines.
//!
//! Provides key-based message catalogs with language fallback, and a
//! post-processing message source that rewrites standalone currency-unit
//! tokens in resolved translations to a configurable currency symbol.

pub mod catalog;
pub mod source;

pub use catalog::{CatalogError, CategoryStrings, MessageCatalog};
pub use source::{
    CURRENCY_PLACEHOLDER, CurrencyOptions, DEFAULT_CURRENCY_SYMBOL, DEFAULT_SYMBOL_KEY,
    DEFAULT_UNITS, MessageLookup, MessageSource, ParamReader,
};
