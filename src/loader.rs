//! Model-directory orchestration: configuration, training, loading.
//!
//! A model directory holds one `<outcome>.txt` file per outcome and an
//! optional `model.json` configuration (searched in the directory, then its
//! parent). The compiled model lives alongside the corpus as
//! `<dir>/<dir-basename>.txt.gz` - an opaque blob written and read entirely
//! through the engine capability.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::context::ContextGenerator;
use crate::classifier::Classifier;
use crate::engine::{MaxentEngine, TrainOptions};
use crate::error::{Result, ShrikeError};

/// File name of the per-model configuration document.
pub const MODEL_CONFIG_FILE: &str = "model.json";

/// Model configuration loaded from [`MODEL_CONFIG_FILE`].
///
/// A missing file means defaults; a present but unparseable one is a
/// configuration error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Ordered featureset names the context generator is built from.
    #[serde(default = "default_featuresets")]
    pub featuresets: Vec<String>,
    /// Optional trainer iteration override.
    #[serde(default)]
    pub iterations: Option<u32>,
    /// Optional trainer cutoff override.
    #[serde(default)]
    pub cutoff: Option<u32>,
    /// Optional trainer smoothing override.
    #[serde(default)]
    pub smoothing: Option<bool>,
}

fn default_featuresets() -> Vec<String> {
    vec!["word_counts".to_string()]
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            featuresets: default_featuresets(),
            iterations: None,
            cutoff: None,
            smoothing: None,
        }
    }
}

impl ModelConfig {
    /// Resolve training options: configured values over defaults.
    pub fn train_options(&self) -> TrainOptions {
        let defaults = TrainOptions::default();
        TrainOptions {
            iterations: self.iterations.unwrap_or(defaults.iterations),
            cutoff: self.cutoff.unwrap_or(defaults.cutoff),
            smoothing: self.smoothing.unwrap_or(defaults.smoothing),
        }
    }
}

/// Validate that `dir` exists as a directory.
pub fn select_model_dir(dir: impl AsRef<Path>) -> Result<PathBuf> {
    let dir = dir.as_ref();
    if dir.is_dir() {
        Ok(dir.to_path_buf())
    } else {
        Err(ShrikeError::configuration(format!(
            "no data at: {}",
            dir.display()
        )))
    }
}

/// Load the model configuration for `dir`, looking in the directory first
/// and its parent second. Falls back to defaults when neither has one.
pub fn model_config(dir: &Path) -> Result<ModelConfig> {
    let candidates = [
        dir.join(MODEL_CONFIG_FILE),
        dir.join("..").join(MODEL_CONFIG_FILE),
    ];
    for path in &candidates {
        if path.is_file() {
            let text = fs::read_to_string(path)?;
            let config: ModelConfig = serde_json::from_str(&text).map_err(|e| {
                ShrikeError::configuration(format!(
                    "bad model config at {}: {e}",
                    path.display()
                ))
            })?;
            debug!("using model config from {}: {config:?}", path.display());
            return Ok(config);
        }
    }
    debug!(
        "no model config under {}; using default featuresets",
        dir.display()
    );
    Ok(ModelConfig::default())
}

/// The path the compiled model is persisted at for `dir`.
pub fn model_file(dir: &Path) -> Result<PathBuf> {
    let basename = dir
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            ShrikeError::configuration(format!(
                "model directory has no usable name: {}",
                dir.display()
            ))
        })?;
    Ok(dir.join(format!("{basename}.txt.gz")))
}

/// The sorted `*.txt` corpus files under `dir`.
pub fn corpus_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("txt") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Train a classifier from the corpus in `dir`, optionally persisting the
/// compiled model next to it.
///
/// `overrides` beats the `model.json` training options, which beat the
/// defaults.
pub fn train(
    engine: &dyn MaxentEngine,
    dir: impl AsRef<Path>,
    persist: bool,
    overrides: Option<TrainOptions>,
) -> Result<Classifier> {
    let dir = select_model_dir(dir)?;
    debug!("reading from model directory: {}", dir.display());

    let config = model_config(&dir)?;
    let generator = ContextGenerator::new(&config.featuresets)?;
    let options = overrides.unwrap_or_else(|| config.train_options());

    let files = corpus_files(&dir)?;
    let classifier = Classifier::train_from_files(engine, generator, &files, options)?;

    if persist {
        let path = model_file(&dir)?;
        classifier.save(&path)?;
        debug!("model written to: {}", path.display());
    }
    Ok(classifier)
}

/// Load a persisted classifier from `dir`, rebuilding the context generator
/// from the directory's configuration.
pub fn load(engine: &dyn MaxentEngine, dir: impl AsRef<Path>) -> Result<Classifier> {
    let dir = select_model_dir(dir)?;
    let config = model_config(&dir)?;
    let generator = ContextGenerator::new(&config.featuresets)?;

    let path = model_file(&dir)?;
    let classifier = Classifier::load(engine, generator, &path)?;
    debug!("model loaded from: {}", path.display());
    Ok(classifier)
}
