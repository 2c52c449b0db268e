//! Context generation: cleanup plus ordered featureset merging.
//!
//! A [`ContextGenerator`] owns an ordered list of featuresets and a cleanup
//! transform. [`ContextGenerator::generate`] applies the cleanup once, runs
//! every featureset over the cleaned string in declaration order, and merges
//! the results into one [`Context`]. Two featuresets emitting the same
//! feature name is an error, never a silent overwrite.
//!
//! # Examples
//!
//! ```
//! use shrike::analysis::context::ContextGenerator;
//!
//! let generator = ContextGenerator::new(["word_counts"]).unwrap();
//! let context = generator.generate("some word word repeated").unwrap();
//! assert_eq!(context["1w:word"], 2.0);
//! assert_eq!(context["1w:some"], 1.0);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::analysis::cleanup::{CleanupFn, default_cleanup};
use crate::analysis::featureset::FeatureSet;
use crate::analysis::registry::FeatureSetRegistry;
use crate::error::{Result, ShrikeError};

/// A mapping from feature name to numeric count for one input string.
pub type Context = HashMap<String, f64>;

/// Applies a cleanup transform and an ordered list of featuresets to text.
pub struct ContextGenerator {
    featuresets: Vec<Arc<FeatureSet>>,
    cleanup: CleanupFn,
}

impl ContextGenerator {
    /// Create a generator resolving `featuresets` against the built-in
    /// registry, with the default cleanup transform.
    ///
    /// Fails if the list is empty or names an unknown featureset.
    pub fn new<I, S>(featuresets: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let registry = FeatureSetRegistry::builtin()?;
        ContextGenerator::with_registry(featuresets, &registry)
    }

    /// Create a generator resolving `featuresets` against a caller-supplied
    /// registry.
    pub fn with_registry<I, S>(featuresets: I, registry: &FeatureSetRegistry) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let featuresets = featuresets
            .into_iter()
            .map(|name| registry.resolve(name.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        if featuresets.is_empty() {
            return Err(ShrikeError::configuration(
                "must give some featureset names",
            ));
        }
        Ok(ContextGenerator {
            featuresets,
            cleanup: default_cleanup()?,
        })
    }

    /// Replace the default cleanup transform with a custom one.
    pub fn with_cleanup<F>(mut self, cleanup: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.cleanup = Box::new(cleanup);
        self
    }

    /// The configured featureset names, in declaration order.
    pub fn featureset_names(&self) -> Vec<&str> {
        self.featuresets.iter().map(|s| s.name()).collect()
    }

    /// Apply the cleanup transform.
    pub fn cleanup(&self, text: &str) -> String {
        (self.cleanup)(text)
    }

    /// Generate the merged feature context for `text`.
    pub fn generate(&self, text: &str) -> Result<Context> {
        let cleaned = self.cleanup(text);
        let mut context = Context::new();

        for set in &self.featuresets {
            for (feature, value) in set.extract(&cleaned) {
                if context.contains_key(&feature) {
                    return Err(ShrikeError::FeatureNameCollision {
                        feature,
                        featureset: set.name().to_string(),
                        text: cleaned.clone(),
                    });
                }
                context.insert(feature, value);
            }
        }

        Ok(context)
    }

    /// Generate the context as parallel name/value lists, the form the
    /// maxent engine consumes.
    pub fn generate_lists(&self, text: &str) -> Result<(Vec<String>, Vec<f64>)> {
        let context = self.generate(text)?;
        let mut features = Vec::with_capacity(context.len());
        let mut values = Vec::with_capacity(context.len());
        for (feature, value) in context {
            features.push(feature);
            values.push(value);
        }
        Ok((features, values))
    }
}

impl fmt::Debug for ContextGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextGenerator")
            .field("featuresets", &self.featureset_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::featureset::FeatureSet;

    fn expect(featureset: &str, text: &str, pairs: &[(&str, f64)]) {
        let generator = ContextGenerator::new([featureset]).unwrap();
        let context = generator.generate(text).unwrap();
        let expected: Context = pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        assert_eq!(context, expected, "featureset {featureset} on {text:?}");
    }

    #[test]
    fn test_word_counts() {
        expect(
            "word_counts",
            "some word word repeated",
            &[("1w:some", 1.0), ("1w:word", 2.0), ("1w:repeated", 1.0)],
        );
    }

    #[test]
    fn test_char_counts() {
        expect(
            "char_counts",
            "some chars chars",
            &[
                ("1c:s", 3.0),
                ("1c:o", 1.0),
                ("1c:m", 1.0),
                ("1c:e", 1.0),
                ("1c:c", 2.0),
                ("1c:h", 2.0),
                ("1c:a", 2.0),
                ("1c:r", 2.0),
            ],
        );
    }

    #[test]
    fn test_char_bigram_counts() {
        expect(
            "char_bigram_counts",
            "one foo23 mon",
            &[("2c:on", 2.0), ("2c:ne", 1.0), ("2c:mo", 1.0)],
        );
    }

    #[test]
    fn test_char_trigram_counts() {
        expect(
            "char_trigram_counts",
            "bank 001 ewbanks",
            &[
                ("3c:ban", 2.0),
                ("3c:ank", 2.0),
                ("3c:ewb", 1.0),
                ("3c:wba", 1.0),
                ("3c:nks", 1.0),
            ],
        );
    }

    #[test]
    fn test_bigram_counts() {
        expect(
            "bigram_counts",
            "one two three one two",
            &[("2w:one_two", 2.0), ("2w:two_three", 1.0), ("2w:three_one", 1.0)],
        );
    }

    #[test]
    fn test_no_bigrams_yields_empty_context() {
        let generator = ContextGenerator::new(["bigram_counts"]).unwrap();
        assert!(generator.generate("one").unwrap().is_empty());
    }

    #[test]
    fn test_c_token_counts_cleaned_tokens() {
        let generator = ContextGenerator::new(["c_token"]).unwrap();
        let text = "I'm working through interface bugs and tidying. There's loads of it.";
        let tokens = generator.cleanup(text).split_whitespace().count();
        let context = generator.generate(text).unwrap();
        assert_eq!(context["c_token"], tokens as f64);
    }

    #[test]
    fn test_c_word() {
        expect(
            "c_word",
            "one 1 two ! three four five and six but not % or 23 or 01-756",
            &[("c_word", 11.0)],
        );
    }

    #[test]
    fn test_c_cap_word() {
        expect(
            "c_cap_word",
            "One 1 Two and Three but not four five and six or % or 23 or 01-756",
            &[("c_cap_word", 3.0)],
        );
    }

    #[test]
    fn test_c_natnum() {
        expect(
            "c_natnum",
            "One 1 Two and Three but not four five and six or % or 23 or 01-756 23.5",
            &[("c_natnum", 2.0)],
        );
    }

    #[test]
    fn test_c_telno() {
        expect(
            "c_telno",
            "One 1 Two and Three but not (01273) 123-456 ... 020 7253 6959 four five and six or % or 23 or 01-756 23.5",
            &[("c_telno", 3.0)],
        );
    }

    #[test]
    fn test_c_url() {
        expect(
            "c_url",
            "One 1 Two and Three but www.trampolinesystems.com ... http://www.ms.com, and perhaps ftp://abc.com or mailto:foo@bar.com huh",
            &[("c_url", 4.0)],
        );
    }

    #[test]
    fn test_c_email() {
        expect(
            "c_email",
            "One 1 Two and Three but foo@bar.com ... abc@def.com, http://www.foo.com kitten@cats.com or mailto:foo@bar.com huh",
            &[("c_email", 4.0)],
        );
    }

    #[test]
    fn test_multiple_featuresets_merge() {
        let generator = ContextGenerator::new(["word_counts", "c_natnum"]).unwrap();
        let context = generator.generate("one two 3").unwrap();
        assert_eq!(context["1w:one"], 1.0);
        assert_eq!(context["1w:two"], 1.0);
        assert_eq!(context["c_natnum"], 1.0);
    }

    #[test]
    fn test_empty_featureset_list_is_an_error() {
        let names: [&str; 0] = [];
        assert!(matches!(
            ContextGenerator::new(names),
            Err(ShrikeError::Configuration(_))
        ));
    }

    #[test]
    fn test_unknown_featureset_is_an_error() {
        assert!(matches!(
            ContextGenerator::new(["no_such_featureset"]),
            Err(ShrikeError::Configuration(_))
        ));
    }

    #[test]
    fn test_feature_name_collision() {
        let mut registry = FeatureSetRegistry::new();
        registry
            .register(FeatureSet::new("first", |_| {
                Context::from([("x".to_string(), 1.0)])
            }))
            .unwrap();
        registry
            .register(FeatureSet::new("second", |_| {
                Context::from([("x".to_string(), 2.0)])
            }))
            .unwrap();

        let generator = ContextGenerator::with_registry(["first", "second"], &registry).unwrap();
        match generator.generate("anything") {
            Err(ShrikeError::FeatureNameCollision {
                feature,
                featureset,
                ..
            }) => {
                assert_eq!(feature, "x");
                assert_eq!(featureset, "second");
            }
            other => panic!("expected a feature name collision, got {other:?}"),
        }
    }

    #[test]
    fn test_custom_cleanup() {
        let generator = ContextGenerator::new(["c_token"])
            .unwrap()
            .with_cleanup(|text| text.replace("%%", " "));
        let context = generator.generate("one%%two%%three and four").unwrap();
        assert_eq!(context["c_token"], 5.0);
    }

    #[test]
    fn test_cleanup_splits_punctuation() {
        let generator = ContextGenerator::new(["c_token"]).unwrap();
        assert_eq!(
            generator.cleanup("+words\" with, ?punctuation! . attached# %@front (and& back*"),
            "+ words \" with , ? punctuation ! . attached # %@ front ( and & back *"
        );
    }

    #[test]
    fn test_generate_lists_is_parallel() {
        let generator = ContextGenerator::new(["word_counts"]).unwrap();
        let context = generator.generate("some word word repeated").unwrap();
        let (features, values) = generator.generate_lists("some word word repeated").unwrap();
        assert_eq!(features.len(), values.len());
        assert_eq!(features.len(), context.len());
        for (feature, value) in features.iter().zip(&values) {
            assert_eq!(context[feature], *value);
        }
    }

    #[test]
    fn test_word_count_values_sum_to_token_count() {
        let generator = ContextGenerator::new(["word_counts"]).unwrap();
        let text = "the cat sat on the mat";
        let cleaned = generator.cleanup(text);
        let context = generator.generate(text).unwrap();
        let sum: f64 = context.values().sum();
        assert_eq!(sum, cleaned.split_whitespace().count() as f64);
        assert!(context.keys().all(|k| k.starts_with("1w:")));
    }
}
