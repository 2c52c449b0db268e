//! A deterministic, frequency-weighted stand-in for a real maxent engine.
//!
//! `CountEngine` accumulates per-outcome feature weights from the event
//! stream and scores by weighted feature overlap with add-one smoothing.
//! It is not a maximum-entropy trainer, but it honors the engine contract
//! and separates disjoint vocabularies, which is all the scenarios need.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use shrike::engine::{MaxentEngine, MaxentModel, TrainOptions};
use shrike::error::Result;
use shrike::stream::EventStream;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CountModel {
    outcomes: Vec<String>,
    // feature -> outcome -> accumulated weight
    weights: HashMap<String, HashMap<String, f64>>,
}

impl MaxentModel for CountModel {
    fn eval(&self, features: &[String], values: &[f64]) -> Result<Vec<f64>> {
        let mut scores = vec![1.0; self.outcomes.len()];
        for (feature, value) in features.iter().zip(values) {
            if let Some(per_outcome) = self.weights.get(feature) {
                for (index, outcome) in self.outcomes.iter().enumerate() {
                    if let Some(weight) = per_outcome.get(outcome) {
                        scores[index] += weight * value;
                    }
                }
            }
        }
        let total: f64 = scores.iter().sum();
        Ok(scores.into_iter().map(|s| s / total).collect())
    }

    fn outcome(&self, index: usize) -> Option<&str> {
        self.outcomes.get(index).map(String::as_str)
    }

    fn num_outcomes(&self) -> usize {
        self.outcomes.len()
    }

    fn save(&self, path: &Path) -> Result<()> {
        let bytes = serde_json::to_vec(self)?;
        fs::write(path, bytes)?;
        Ok(())
    }
}

pub struct CountEngine;

impl MaxentEngine for CountEngine {
    fn train(
        &self,
        events: &mut dyn EventStream,
        _options: &TrainOptions,
        _verbose: bool,
    ) -> Result<Box<dyn MaxentModel>> {
        let mut outcomes: Vec<String> = Vec::new();
        let mut weights: HashMap<String, HashMap<String, f64>> = HashMap::new();

        events.reset();
        while events.has_next() {
            let event = events.next_event()?;
            if !outcomes.contains(&event.outcome) {
                outcomes.push(event.outcome.clone());
            }
            for (feature, value) in event.context.iter().zip(&event.values) {
                *weights
                    .entry(feature.clone())
                    .or_default()
                    .entry(event.outcome.clone())
                    .or_insert(0.0) += value;
            }
        }

        Ok(Box::new(CountModel { outcomes, weights }))
    }

    fn load(&self, path: &Path) -> Result<Box<dyn MaxentModel>> {
        let text = fs::read_to_string(path)?;
        let model: CountModel = serde_json::from_str(&text)?;
        Ok(Box::new(model))
    }
}
