//! Featureset implementations: named, pure feature-extraction functions.
//!
//! A featureset maps a cleaned string to a mapping of feature name to
//! numeric count. Rather than hand-writing each extractor, this module
//! provides generic builders that close over their parameters and return a
//! ready-to-register [`FeatureSet`]:
//!
//! - [`FeatureSet::regex_count`] - count of non-overlapping pattern matches
//! - [`FeatureSet::split_select`] - split, then count tokens matching a pattern
//! - [`FeatureSet::word_ngrams`] - word n-gram counts over alphabetic tokens
//! - [`FeatureSet::char_ngrams`] - character n-gram counts within alphabetic tokens
//!
//! # Examples
//!
//! ```
//! use shrike::analysis::featureset::FeatureSet;
//!
//! let bigrams = FeatureSet::word_ngrams("bigram_counts", 2).unwrap();
//! let context = bigrams.extract("one two three one two");
//! assert_eq!(context["2w:one_two"], 2.0);
//! assert_eq!(context["2w:two_three"], 1.0);
//! ```

use std::fmt;

use regex::Regex;

use crate::analysis::context::Context;
use crate::error::{Result, ShrikeError};

type ExtractFn = Box<dyn Fn(&str) -> Context + Send + Sync>;

/// A named, pure extraction function contributing zero or more entries to a
/// [`Context`].
pub struct FeatureSet {
    name: String,
    extract: ExtractFn,
}

impl FeatureSet {
    /// Create a featureset from a name and an extraction closure.
    pub fn new<S, F>(name: S, extract: F) -> Self
    where
        S: Into<String>,
        F: Fn(&str) -> Context + Send + Sync + 'static,
    {
        FeatureSet {
            name: name.into(),
            extract: Box::new(extract),
        }
    }

    /// The featureset's registry name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the extraction function over a cleaned string.
    pub fn extract(&self, text: &str) -> Context {
        (self.extract)(text)
    }

    /// A featureset emitting a single feature: the count of non-overlapping
    /// matches of `pattern`, scanned left-to-right over the whole string.
    ///
    /// The feature is always emitted, with a zero count when nothing
    /// matches.
    pub fn regex_count(name: &str, pattern: &str) -> Result<Self> {
        let regex = compile(pattern)?;
        let feature = name.to_string();
        Ok(FeatureSet::new(name, move |text: &str| {
            let mut context = Context::new();
            context.insert(feature.clone(), regex.find_iter(text).count() as f64);
            context
        }))
    }

    /// A featureset emitting a single feature: split the string on
    /// whitespace and count the tokens the `select` pattern matches.
    pub fn split_select(name: &str, select: &str) -> Result<Self> {
        let select = compile(select)?;
        let feature = name.to_string();
        Ok(FeatureSet::new(name, move |text: &str| {
            let count = text.split_whitespace().filter(|t| select.is_match(t)).count();
            let mut context = Context::new();
            context.insert(feature.clone(), count as f64);
            context
        }))
    }

    /// Like [`FeatureSet::split_select`], but splitting on a custom pattern
    /// instead of whitespace.
    pub fn split_select_with(name: &str, select: &str, split: &str) -> Result<Self> {
        let select = compile(select)?;
        let split = compile(split)?;
        let feature = name.to_string();
        Ok(FeatureSet::new(name, move |text: &str| {
            let count = split
                .split(text)
                .filter(|t| !t.is_empty() && select.is_match(t))
                .count();
            let mut context = Context::new();
            context.insert(feature.clone(), count as f64);
            context
        }))
    }

    /// A featureset counting word n-grams.
    ///
    /// The string is lower-cased and whitespace-tokenized; every window of
    /// `n` contiguous tokens in which ALL tokens are purely alphabetic
    /// emits `"{n}w:{tok1}_.._{tokn}"` incremented by one. Windows
    /// containing a non-alphabetic token are dropped whole. Input shorter
    /// than `n` tokens yields an empty context.
    pub fn word_ngrams(name: &str, n: usize) -> Result<Self> {
        if n == 0 {
            return Err(ShrikeError::configuration("ngram size must be at least 1"));
        }
        Ok(FeatureSet::new(name, move |text: &str| {
            let lowered = text.to_lowercase();
            let tokens: Vec<&str> = lowered.split_whitespace().collect();
            let mut counts = Context::new();
            for window in tokens.windows(n) {
                if window.iter().all(|t| alphabetic(t)) {
                    let feature = format!("{n}w:{}", window.join("_"));
                    *counts.entry(feature).or_insert(0.0) += 1.0;
                }
            }
            counts
        }))
    }

    /// A featureset counting character n-grams.
    ///
    /// The string is lower-cased and whitespace-tokenized, non-alphabetic
    /// tokens are discarded, and every window of `n` contiguous characters
    /// within a token emits `"{n}c:{chars}"` incremented by one. Windows
    /// never span token boundaries.
    pub fn char_ngrams(name: &str, n: usize) -> Result<Self> {
        if n == 0 {
            return Err(ShrikeError::configuration("ngram size must be at least 1"));
        }
        Ok(FeatureSet::new(name, move |text: &str| {
            let lowered = text.to_lowercase();
            let mut counts = Context::new();
            for token in lowered.split_whitespace().filter(|t| alphabetic(t)) {
                let chars: Vec<char> = token.chars().collect();
                for window in chars.windows(n) {
                    let gram: String = window.iter().collect();
                    *counts.entry(format!("{n}c:{gram}")).or_insert(0.0) += 1.0;
                }
            }
            counts
        }))
    }
}

impl fmt::Debug for FeatureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureSet").field("name", &self.name).finish()
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| ShrikeError::configuration(format!("invalid regex pattern: {e}")))
}

fn alphabetic(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphabetic)
}
