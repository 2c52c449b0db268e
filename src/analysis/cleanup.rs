//! Cleanup transforms applied to raw text before feature extraction.
//!
//! The default transform makes punctuation and words distinguishable
//! sub-tokens: for every whitespace-delimited token of the shape
//! `(punctuation run)(word)(punctuation run)` it splits the runs off into
//! their own space-delimited tokens, collapses whitespace runs, and replaces
//! literal escape-sequence artifacts (a backslash followed by an escape
//! letter) with a space. Tokens with interior punctuation (`01-756`,
//! `23.5`) are left intact.

use regex::Regex;

use crate::error::{Result, ShrikeError};

/// Boxed text-to-text transform run once before feature extraction.
pub type CleanupFn = Box<dyn Fn(&str) -> String + Send + Sync>;

/// Punctuation characters split away from words, as a regex character class
/// body. The explicit list avoids locale-dependent `[:punct:]` behavior.
pub(crate) const PUNCT_CLASS: &str = r##"±§!@#$%^&*()_\-+={\[}\]:;"'|~`<,>.?/"##;

/// Build the default cleanup transform.
pub fn default_cleanup() -> Result<CleanupFn> {
    let token = Regex::new(&format!(r"^([{PUNCT_CLASS}]*)(\w+)([{PUNCT_CLASS}]*)$"))
        .map_err(|e| ShrikeError::configuration(format!("invalid cleanup pattern: {e}")))?;
    let escapes = Regex::new(r"\\[tnrfbaes]")
        .map_err(|e| ShrikeError::configuration(format!("invalid cleanup pattern: {e}")))?;

    Ok(Box::new(move |text: &str| {
        let mut parts: Vec<&str> = Vec::new();
        for tok in text.split_whitespace() {
            match token.captures(tok) {
                Some(caps) => {
                    for group in 1..=3 {
                        let piece = caps.get(group).map(|m| m.as_str()).unwrap_or("");
                        if !piece.is_empty() {
                            parts.push(piece);
                        }
                    }
                }
                None => parts.push(tok),
            }
        }
        escapes.replace_all(&parts.join(" "), " ").into_owned()
    }))
}
