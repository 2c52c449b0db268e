//! Classification decisions over a trained maxent model.
//!
//! A [`Classifier`] pairs an opaque trained model with the
//! [`ContextGenerator`] that produced its training encoding. The two must
//! travel together: feature encoding has to match what the model was
//! trained on, and nothing here can detect a mismatch. [`Classifier::classify`]
//! returns the full ranking; [`Classifier::classify_margin`] gates it into a
//! confident or uncertain decision.

use std::fmt;
use std::path::Path;

use log::{Level, log_enabled};

use crate::analysis::context::ContextGenerator;
use crate::engine::{MaxentEngine, MaxentModel, TrainOptions};
use crate::error::{Result, ShrikeError};
use crate::stream::FilesetEventStream;

/// The margin applied when no explicit one is given: the top score must
/// reach 1.1x the runner-up to count as confident.
pub const DEFAULT_MARGIN: f64 = 1.1;

/// One outcome with its evaluated score.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedOutcome {
    /// The outcome label.
    pub outcome: String,
    /// The model's score for this outcome.
    pub score: f64,
}

/// Outcomes sorted by descending score; ties keep outcome-index order.
pub type RankedClassification = Vec<RankedOutcome>;

/// A margin-gated classification decision.
///
/// An uncertain decision still exposes the full ranking behind it, so a
/// caller can inspect what the model preferred even when the margin was not
/// met. [`MarginDecision::top_outcome`] returns `None` for uncertain
/// decisions, which is what makes them count as misses in the evaluation
/// harness.
#[derive(Debug, Clone, PartialEq)]
pub enum MarginDecision {
    /// The top score met the margin; the ranking stands.
    Confident(RankedClassification),
    /// The top score fell short of the margin over the runner-up.
    Uncertain(RankedClassification),
}

impl MarginDecision {
    /// Whether the margin was met.
    pub fn is_confident(&self) -> bool {
        matches!(self, MarginDecision::Confident(_))
    }

    /// The winning outcome label, or `None` when the decision is uncertain
    /// or the ranking is empty.
    pub fn top_outcome(&self) -> Option<&str> {
        match self {
            MarginDecision::Confident(ranking) => {
                ranking.first().map(|r| r.outcome.as_str())
            }
            MarginDecision::Uncertain(_) => None,
        }
    }

    /// The full ranking, regardless of confidence.
    pub fn ranking(&self) -> &RankedClassification {
        match self {
            MarginDecision::Confident(ranking) | MarginDecision::Uncertain(ranking) => ranking,
        }
    }
}

/// A trained model paired with the context generator that encoded its
/// training data.
pub struct Classifier {
    model: Box<dyn MaxentModel>,
    context_generator: ContextGenerator,
}

impl Classifier {
    /// Wrap a trained model and its context generator.
    pub fn new(model: Box<dyn MaxentModel>, context_generator: ContextGenerator) -> Self {
        Classifier {
            model,
            context_generator,
        }
    }

    /// The context generator this classifier encodes input with.
    pub fn context_generator(&self) -> &ContextGenerator {
        &self.context_generator
    }

    /// Classify `text`, returning every outcome ranked by descending score.
    pub fn classify(&self, text: &str) -> Result<RankedClassification> {
        let (features, values) = self.context_generator.generate_lists(text)?;
        let scores = self.model.eval(&features, &values)?;

        let mut ranking = Vec::with_capacity(scores.len());
        for (index, score) in scores.into_iter().enumerate() {
            let outcome = self.model.outcome(index).ok_or_else(|| {
                ShrikeError::model(format!("no outcome label at index {index}"))
            })?;
            ranking.push(RankedOutcome {
                outcome: outcome.to_string(),
                score,
            });
        }

        // Stable sort: equal scores keep outcome-index order.
        ranking.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(ranking)
    }

    /// Classify `text` and gate the result on `margin`: confident iff the
    /// top score is at least `margin` times the runner-up. A ranking with
    /// fewer than two outcomes is always confident.
    pub fn classify_margin(&self, text: &str, margin: f64) -> Result<MarginDecision> {
        let ranking = self.classify(text)?;
        match ranking.get(1) {
            Some(second) if ranking[0].score < margin * second.score => {
                Ok(MarginDecision::Uncertain(ranking))
            }
            _ => Ok(MarginDecision::Confident(ranking)),
        }
    }

    /// Persist the wrapped model to `path`.
    ///
    /// The context generator is not persisted; at load time the caller must
    /// supply one built from the same featureset configuration used at
    /// training time, otherwise classification is silently wrong.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.model.save(path)
    }

    /// Load a persisted model and pair it with `context_generator`.
    pub fn load(
        engine: &dyn MaxentEngine,
        context_generator: ContextGenerator,
        path: &Path,
    ) -> Result<Self> {
        let model = engine.load(path)?;
        Ok(Classifier::new(model, context_generator))
    }

    /// Train a classifier from labeled files.
    ///
    /// Builds a [`FilesetEventStream`] over `files`, invokes the engine
    /// with `options`, and derives trainer verbosity from the ambient log
    /// level (debug or finer).
    pub fn train_from_files<P: AsRef<Path>>(
        engine: &dyn MaxentEngine,
        context_generator: ContextGenerator,
        files: &[P],
        options: TrainOptions,
    ) -> Result<Self> {
        let mut events = FilesetEventStream::from_files(&context_generator, files)?;
        let verbose = log_enabled!(Level::Debug);
        let model = engine.train(&mut events, &options, verbose)?;
        Ok(Classifier::new(model, context_generator))
    }
}

impl fmt::Debug for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Classifier")
            .field("outcomes", &self.model.num_outcomes())
            .field("context_generator", &self.context_generator)
            .finish()
    }
}
