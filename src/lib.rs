//! # Shrike
//!
//! A maximum-entropy string classification library for Rust.
//!
//! Shrike extracts count-valued feature contexts from free text, feeds
//! labeled contexts to an injected maxent training capability, and turns a
//! trained model's ranked scores into margin-gated classification
//! decisions.
//!
//! ## Features
//!
//! - Composable, registry-backed feature extraction (word and character
//!   n-grams, token counts, regex scanners)
//! - Restartable training event streams over labeled corpora
//! - A four-operation engine capability, so any maxent implementation can
//!   plug in and consumers can test against a fake
//! - Margin-gated decisions with an explicit "uncertain" outcome
//! - A per-outcome evaluation harness over labeled test corpora
//!
//! ## Example
//!
//! ```
//! use shrike::analysis::ContextGenerator;
//!
//! let generator = ContextGenerator::new(["word_counts", "c_email"]).unwrap();
//! let context = generator.generate("write to kitten@cats.com today").unwrap();
//! assert_eq!(context["1w:today"], 1.0);
//! assert_eq!(context["c_email"], 1.0);
//! ```

pub mod analysis;
pub mod classifier;
pub mod engine;
pub mod error;
pub mod eval;
pub mod loader;
pub mod stream;

pub mod prelude {
    //! Convenience re-exports of the commonly used types.

    pub use crate::analysis::{Context, ContextGenerator, FeatureSet, FeatureSetRegistry};
    pub use crate::classifier::{
        Classifier, DEFAULT_MARGIN, MarginDecision, RankedClassification, RankedOutcome,
    };
    pub use crate::engine::{MaxentEngine, MaxentModel, TrainOptions};
    pub use crate::error::{Result, ShrikeError};
    pub use crate::eval::{EvaluationTally, OutcomeTally, test_against};
    pub use crate::loader::{ModelConfig, load, train};
    pub use crate::stream::{Event, EventStream, FilesetEventStream};
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
