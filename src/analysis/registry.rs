//! Featureset registry with the built-in extraction catalogue.
//!
//! The registry maps featureset names to stored [`FeatureSet`] closures.
//! [`FeatureSetRegistry::builtin`] carries the full catalogue:
//!
//! - `word_counts`, `bigram_counts`, `trigram_counts` - word n-grams (n = 1..3)
//! - `char_counts`, `char_bigram_counts`, `char_trigram_counts` - character
//!   n-grams (n = 1..3)
//! - `c_token`, `c_word`, `c_cap_word`, `c_natnum`, `c_punct`, `c_path` -
//!   split-and-select token counts
//! - `c_telno`, `c_url`, `c_email` - regex-scan counts

use std::collections::HashMap;
use std::sync::Arc;

use crate::analysis::cleanup::PUNCT_CLASS;
use crate::analysis::featureset::FeatureSet;
use crate::error::{Result, ShrikeError};

/// Resolves featureset names to extraction functions.
#[derive(Debug, Default)]
pub struct FeatureSetRegistry {
    sets: HashMap<String, Arc<FeatureSet>>,
}

impl FeatureSetRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        FeatureSetRegistry::default()
    }

    /// Create a registry populated with the built-in featuresets.
    pub fn builtin() -> Result<Self> {
        let mut registry = FeatureSetRegistry::new();

        registry.register(FeatureSet::word_ngrams("word_counts", 1)?)?;
        registry.register(FeatureSet::word_ngrams("bigram_counts", 2)?)?;
        registry.register(FeatureSet::word_ngrams("trigram_counts", 3)?)?;

        registry.register(FeatureSet::char_ngrams("char_counts", 1)?)?;
        registry.register(FeatureSet::char_ngrams("char_bigram_counts", 2)?)?;
        registry.register(FeatureSet::char_ngrams("char_trigram_counts", 3)?)?;

        registry.register(FeatureSet::split_select("c_token", ".*")?)?;
        registry.register(FeatureSet::split_select("c_word", "[[:alpha:]]+")?)?;
        registry.register(FeatureSet::split_select("c_cap_word", r"[[:upper:]]\w*")?)?;
        registry.register(FeatureSet::split_select("c_natnum", r"^\d+$")?)?;
        registry.register(FeatureSet::split_select(
            "c_punct",
            &format!(r"(^[{PUNCT_CLASS}]+\w*)|(\w*[{PUNCT_CLASS}]+$)"),
        )?)?;
        registry.register(FeatureSet::split_select("c_path", r"\S+")?)?;

        registry.register(FeatureSet::regex_count(
            "c_telno",
            r"([\d+\-()][\d+\-()\s]{3,})(?:[^\d+\-()]|$)",
        )?)?;
        registry.register(FeatureSet::regex_count(
            "c_url",
            r"(?:(?:http|ftp|mailto):\S+)|(?:www\.(?:\w+\.)+\w+)",
        )?)?;
        registry.register(FeatureSet::regex_count("c_email", r"\S+@(?:\w+\.)+\w+")?)?;

        Ok(registry)
    }

    /// Register a featureset. Registering a second featureset under an
    /// already-taken name is a configuration error.
    pub fn register(&mut self, set: FeatureSet) -> Result<()> {
        if self.sets.contains_key(set.name()) {
            return Err(ShrikeError::configuration(format!(
                "featureset already registered: {}",
                set.name()
            )));
        }
        self.sets.insert(set.name().to_string(), Arc::new(set));
        Ok(())
    }

    /// Resolve a featureset by name.
    pub fn resolve(&self, name: &str) -> Result<Arc<FeatureSet>> {
        self.sets.get(name).cloned().ok_or_else(|| {
            ShrikeError::configuration(format!("unknown featureset: {name}"))
        })
    }

    /// Whether a featureset with the given name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.sets.contains_key(name)
    }

    /// The registered featureset names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
