//! Error types for the Shrike library.
//!
//! All errors are represented by the [`ShrikeError`] enum. Failures reported
//! by an external maxent engine propagate through the [`ShrikeError::Model`]
//! and [`ShrikeError::Anyhow`] variants unchanged; no retry policy is applied
//! anywhere in the library.

use std::io;

use thiserror::Error;

/// The main error type for Shrike operations.
#[derive(Error, Debug)]
pub enum ShrikeError {
    /// I/O errors (corpus reads, model persistence, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid configuration: empty featureset lists, unknown featureset
    /// names, missing model directories, unreadable model config files.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Two featuresets emitted the same feature name for one input.
    #[error("feature name clash: {feature} from featureset: {featureset} on str:\n{text}")]
    FeatureNameCollision {
        /// The feature name that was emitted twice.
        feature: String,
        /// The featureset that emitted the duplicate.
        featureset: String,
        /// The (cleaned) input text that provoked the clash.
        text: String,
    },

    /// An event stream was constructed with no input files.
    #[error("no data: {0}")]
    NoData(String),

    /// `next_event` was called on an exhausted event stream.
    #[error("end of event stream")]
    EndOfStream,

    /// Failures reported by the external maxent engine.
    #[error("model error: {0}")]
    Model(String),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic anyhow error, for engine implementations.
    #[error("error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with [`ShrikeError`].
pub type Result<T> = std::result::Result<T, ShrikeError>;

impl ShrikeError {
    /// Create a new configuration error.
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        ShrikeError::Configuration(msg.into())
    }

    /// Create a new no-data error.
    pub fn no_data<S: Into<String>>(msg: S) -> Self {
        ShrikeError::NoData(msg.into())
    }

    /// Create a new model error.
    pub fn model<S: Into<String>>(msg: S) -> Self {
        ShrikeError::Model(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ShrikeError::configuration("must give some featureset names");
        assert_eq!(
            err.to_string(),
            "configuration error: must give some featureset names"
        );

        let err = ShrikeError::FeatureNameCollision {
            feature: "x".to_string(),
            featureset: "y".to_string(),
            text: "input".to_string(),
        };
        assert!(err.to_string().contains("feature name clash: x"));
        assert!(err.to_string().contains("featureset: y"));
    }

    #[test]
    fn test_io_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err: ShrikeError = io_err.into();
        assert!(matches!(err, ShrikeError::Io(_)));
    }
}
