//! The opaque maximum-entropy engine capability.
//!
//! Training, evaluation, label lookup, and persistence are external
//! concerns: this crate encodes text into feature contexts and interprets
//! ranked scores, but never looks inside a trained model. The two traits
//! here are the full surface an engine must provide, which also makes every
//! consumer testable against a fake implementation.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::stream::EventStream;

/// Hyperparameters handed to the external trainer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainOptions {
    /// Number of training iterations.
    pub iterations: u32,
    /// Minimum event count for a feature to be kept.
    pub cutoff: u32,
    /// Whether the trainer should apply smoothing.
    pub smoothing: bool,
}

impl Default for TrainOptions {
    fn default() -> Self {
        TrainOptions {
            iterations: 100,
            cutoff: 0,
            smoothing: false,
        }
    }
}

/// A trained maximum-entropy model, treated as opaque.
pub trait MaxentModel: Send + Sync {
    /// Evaluate a feature context, returning one score per outcome, indexed
    /// by outcome index.
    fn eval(&self, features: &[String], values: &[f64]) -> Result<Vec<f64>>;

    /// The outcome label at `index`, if any.
    fn outcome(&self, index: usize) -> Option<&str>;

    /// The number of outcomes the model can predict.
    fn num_outcomes(&self) -> usize;

    /// Persist the model to `path` as an implementation-defined blob.
    fn save(&self, path: &Path) -> Result<()>;
}

/// A maximum-entropy training/persistence capability.
pub trait MaxentEngine: Send + Sync {
    /// Train a model from an event stream.
    ///
    /// `verbose` asks the trainer to print per-iteration progress; callers
    /// normally derive it from the ambient log level.
    fn train(
        &self,
        events: &mut dyn EventStream,
        options: &TrainOptions,
        verbose: bool,
    ) -> Result<Box<dyn MaxentModel>>;

    /// Load a model previously written by [`MaxentModel::save`].
    fn load(&self, path: &Path) -> Result<Box<dyn MaxentModel>>;
}
