#![forbid(unsafe_code)]

//! Boundary-aware token replacement for mixed-script text.
//!
//! Decides which occurrences of a unit token are standalone mentions versus
//! substrings of longer words, and rewrites the standalone ones to a
//! placeholder. Two tokenization regimes are covered: ideographic text,
//! where no inter-word whitespace exists and boundaries must be inferred
//! from flanking digits, brackets, and punctuation; and space-delimited
//! text, where conventional word boundaries apply.

pub mod boundary;
pub mod replace;

pub use boundary::{Script, classify, is_word_char};
pub use replace::{TokenSet, UnitToken};
