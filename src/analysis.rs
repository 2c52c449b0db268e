//! Text analysis module for Shrike.
//!
//! This module turns free text into count-valued feature contexts: a cleanup
//! transform makes punctuation and words distinguishable sub-tokens, then an
//! ordered list of registry-resolved featuresets is merged into one context
//! per input string.

pub mod cleanup;
pub mod context;
pub mod featureset;
pub mod registry;

// Re-export commonly used types
pub use cleanup::{CleanupFn, default_cleanup};
pub use context::{Context, ContextGenerator};
pub use featureset::FeatureSet;
pub use registry::FeatureSetRegistry;
