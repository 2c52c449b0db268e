//! Training event streams over labeled file sets.
//!
//! A [`FilesetEventStream`] adapts a set of labeled text files into an
//! ordered, restartable cursor of training events. Each file's stem is its
//! outcome label and contributes one event per non-empty paragraph
//! (paragraphs are separated by a blank line). The stream is materialized
//! eagerly at construction; iteration afterwards is a bounded-index cursor,
//! and [`EventStream::reset`] replays the identical sequence without
//! re-deriving anything.

use std::fs;
use std::path::Path;

use log::debug;

use crate::analysis::context::ContextGenerator;
use crate::error::{Result, ShrikeError};

/// One training instance: an outcome label plus the encoded feature context
/// as parallel name/value lists.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// The outcome label this event was observed under.
    pub outcome: String,
    /// Feature names, parallel to `values`.
    pub context: Vec<String>,
    /// Feature values, parallel to `context`.
    pub values: Vec<f64>,
}

/// Pull-based cursor contract consumed by a maxent trainer.
pub trait EventStream {
    /// Whether the cursor has events remaining.
    fn has_next(&self) -> bool;

    /// Return the event at the cursor and advance. Fails with
    /// [`ShrikeError::EndOfStream`] past the end.
    fn next_event(&mut self) -> Result<&Event>;

    /// Rewind the cursor to the first event. Idempotent.
    fn reset(&mut self);
}

/// Split text on blank-line boundaries, dropping whitespace-only paragraphs.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    text.split("\n\n").filter(|p| !p.trim().is_empty()).collect()
}

/// An eagerly-built, restartable stream of training events derived from
/// `<outcome>.<ext>` files.
#[derive(Debug)]
pub struct FilesetEventStream {
    events: Vec<Event>,
    index: usize,
}

impl FilesetEventStream {
    /// Build the stream from an ordered list of labeled files.
    ///
    /// Fails with [`ShrikeError::NoData`] when `files` is empty. Paragraphs
    /// whose generated context comes back empty are dropped without
    /// emitting an event.
    pub fn from_files<P: AsRef<Path>>(
        generator: &ContextGenerator,
        files: &[P],
    ) -> Result<Self> {
        if files.is_empty() {
            return Err(ShrikeError::no_data("no training files given"));
        }

        let mut events = Vec::new();
        for file in files {
            let file = file.as_ref();
            let outcome = file
                .file_stem()
                .and_then(|stem| stem.to_str())
                .ok_or_else(|| {
                    ShrikeError::configuration(format!(
                        "training file has no usable name: {}",
                        file.display()
                    ))
                })?;
            let text = fs::read_to_string(file)?;

            for paragraph in split_paragraphs(&text) {
                let (context, values) = generator.generate_lists(paragraph)?;
                if context.is_empty() {
                    debug!("dropping empty context for outcome {outcome}");
                    continue;
                }
                events.push(Event {
                    outcome: outcome.to_string(),
                    context,
                    values,
                });
            }
        }

        Ok(FilesetEventStream { events, index: 0 })
    }

    /// The number of events in the stream.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the stream holds no events at all.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All events, in stream order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }
}

impl EventStream for FilesetEventStream {
    fn has_next(&self) -> bool {
        self.index < self.events.len()
    }

    fn next_event(&mut self) -> Result<&Event> {
        if self.index >= self.events.len() {
            return Err(ShrikeError::EndOfStream);
        }
        self.index += 1;
        Ok(&self.events[self.index - 1])
    }

    fn reset(&mut self) {
        self.index = 0;
    }
}
