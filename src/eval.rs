//! Evaluation harness: per-outcome accuracy over a labeled test corpus.
//!
//! Misclassifications are data here, not errors: every miss increments a
//! tally and is logged at warning level with the full ranking and the
//! offending text, but nothing is raised.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::{debug, info, warn};

use crate::classifier::{Classifier, DEFAULT_MARGIN};
use crate::error::{Result, ShrikeError};
use crate::loader::{corpus_files, select_model_dir};
use crate::stream::split_paragraphs;

/// Correct/incorrect counts for one outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeTally {
    /// Paragraphs classified as their file's outcome.
    pub correct: usize,
    /// Paragraphs classified otherwise, including uncertain decisions.
    pub incorrect: usize,
}

/// Per-outcome tallies accumulated over a labeled test corpus.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationTally {
    outcomes: HashMap<String, OutcomeTally>,
}

impl EvaluationTally {
    /// Record a correct classification for `outcome`.
    pub fn record_correct(&mut self, outcome: &str) {
        self.outcomes.entry(outcome.to_string()).or_default().correct += 1;
    }

    /// Record an incorrect classification for `outcome`.
    pub fn record_incorrect(&mut self, outcome: &str) {
        self.outcomes.entry(outcome.to_string()).or_default().incorrect += 1;
    }

    /// The tally for one outcome (zeroes when the outcome was never seen).
    pub fn outcome(&self, outcome: &str) -> OutcomeTally {
        self.outcomes.get(outcome).copied().unwrap_or_default()
    }

    /// All per-outcome tallies.
    pub fn outcomes(&self) -> &HashMap<String, OutcomeTally> {
        &self.outcomes
    }

    /// Total correct classifications across outcomes.
    pub fn total_correct(&self) -> usize {
        self.outcomes.values().map(|t| t.correct).sum()
    }

    /// Total incorrect classifications across outcomes.
    pub fn total_incorrect(&self) -> usize {
        self.outcomes.values().map(|t| t.incorrect).sum()
    }

    /// Overall accuracy, or zero when nothing was tallied.
    pub fn accuracy(&self) -> f64 {
        let total = self.total_correct() + self.total_incorrect();
        if total == 0 {
            0.0
        } else {
            self.total_correct() as f64 / total as f64
        }
    }
}

/// Run `classifier` over every paragraph of every `*.txt` file in `dir`,
/// comparing the decided outcome against each file's stem.
///
/// Uses `margin` when given, otherwise [`DEFAULT_MARGIN`]. Uncertain
/// decisions never match and therefore tally as incorrect.
pub fn test_against(
    classifier: &Classifier,
    dir: impl AsRef<Path>,
    margin: Option<f64>,
) -> Result<EvaluationTally> {
    let dir = select_model_dir(dir)?;
    debug!("testing against model directory: {}", dir.display());
    let margin = margin.unwrap_or(DEFAULT_MARGIN);

    let mut tally = EvaluationTally::default();
    for file in corpus_files(&dir)? {
        let outcome = file
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| {
                ShrikeError::configuration(format!(
                    "test file has no usable name: {}",
                    file.display()
                ))
            })?
            .to_string();
        let text = fs::read_to_string(&file)?;

        for paragraph in split_paragraphs(&text) {
            let decision = classifier.classify_margin(paragraph, margin)?;
            if decision.top_outcome() == Some(outcome.as_str()) {
                tally.record_correct(&outcome);
            } else {
                tally.record_incorrect(&outcome);
                warn!(
                    "failure: {outcome} incorrectly classified: {:?}\n{paragraph}",
                    decision.ranking()
                );
            }
        }
    }

    info!(
        "evaluation summary: {} correct, {} incorrect ({:.3} accuracy)",
        tally.total_correct(),
        tally.total_incorrect(),
        tally.accuracy()
    );
    Ok(tally)
}
