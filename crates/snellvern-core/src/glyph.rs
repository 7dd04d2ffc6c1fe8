// ─────────────────────────────────────────────────────────────────────
// Snell-Vern Drive Matrix — Glyph Recognizers
// ─────────────────────────────────────────────────────────────────────
//! Recognizer trait for symbolic input and its stock implementations.
//!
//! The phase machine only needs a three-way verdict per input; what
//! counts as a recognized glyph is up to the recognizer behind this
//! trait. `LengthHeuristic` is the default and needs no vocabulary.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Verdict on one symbolic input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recognition {
    Accepted,
    /// Recognized, but needs further delta refinement before it settles.
    NeedsRefinement,
    Rejected(String),
}

pub trait GlyphRecognizer: Send + Sync {
    fn recognize(&self, input: &str) -> Recognition;
}

/// Empty or whitespace-only input is rejected; input longer than
/// `refinement_length` characters needs refinement; anything else passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthHeuristic {
    pub refinement_length: usize,
}

impl LengthHeuristic {
    pub fn new(refinement_length: usize) -> Self {
        Self { refinement_length }
    }
}

impl Default for LengthHeuristic {
    fn default() -> Self {
        Self::new(100)
    }
}

impl GlyphRecognizer for LengthHeuristic {
    fn recognize(&self, input: &str) -> Recognition {
        if input.trim().is_empty() {
            return Recognition::Rejected("empty input".into());
        }
        if input.chars().count() > self.refinement_length {
            return Recognition::NeedsRefinement;
        }
        Recognition::Accepted
    }
}

/// Accepts input only when every whitespace-separated token belongs to a
/// known vocabulary (case-insensitive).
#[derive(Debug, Clone, Default)]
pub struct TokenSetRecognizer {
    vocabulary: HashSet<String>,
    length: LengthHeuristic,
}

impl TokenSetRecognizer {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            vocabulary: tokens
                .into_iter()
                .map(|t| t.as_ref().to_lowercase())
                .collect(),
            length: LengthHeuristic::default(),
        }
    }

    pub fn with_refinement_length(mut self, refinement_length: usize) -> Self {
        self.length = LengthHeuristic::new(refinement_length);
        self
    }
}

impl GlyphRecognizer for TokenSetRecognizer {
    fn recognize(&self, input: &str) -> Recognition {
        let unknown: Vec<&str> = input
            .split_whitespace()
            .filter(|t| !self.vocabulary.contains(&t.to_lowercase()))
            .collect();
        if !unknown.is_empty() {
            return Recognition::Rejected(format!("unrecognized glyphs: {}", unknown.join(", ")));
        }
        self.length.recognize(input)
    }
}

type RecognizeFn = Box<dyn Fn(&str) -> Recognition + Send + Sync>;

/// Recognizer backed by a caller-supplied closure.
pub struct ExternalRecognizer {
    recognize_fn: RecognizeFn,
}

impl ExternalRecognizer {
    pub fn new(recognize_fn: impl Fn(&str) -> Recognition + Send + Sync + 'static) -> Self {
        Self {
            recognize_fn: Box::new(recognize_fn),
        }
    }
}

impl GlyphRecognizer for ExternalRecognizer {
    fn recognize(&self, input: &str) -> Recognition {
        (self.recognize_fn)(input)
    }
}
