//! # Configuration
//!
//! Session configuration - how lookups score and how geometry compares.
//!
//! Everything is configurable, not hardcoded:
//! - Fuzzy threshold for name search
//! - Similarity function
//! - Comparison tolerance for contours built through the session

use super::contour::DEFAULT_TOLERANCE;
use super::similarity::{IndelRatio, Similarity, DEFAULT_FUZZY_THRESHOLD};
use std::fmt;
use std::sync::Arc;

/// Main session configuration
#[derive(Clone)]
pub struct SessionConfig {
    /// Best name score below this yields an empty search result
    pub fuzzy_threshold: u8,

    /// Similarity function for name search
    pub similarity: Arc<dyn Similarity>,

    /// Tolerance handed to contours created by the session
    pub tolerance: f64,
}

impl SessionConfig {
    /// Create a configuration with default scoring and tolerance
    pub fn new() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            similarity: Arc::new(IndelRatio),
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Set the fuzzy threshold (clamped to 100)
    pub fn with_fuzzy_threshold(mut self, threshold: u8) -> Self {
        self.fuzzy_threshold = threshold.min(100);
        self
    }

    /// Set a custom similarity function
    pub fn with_similarity<S: Similarity + 'static>(mut self, similarity: S) -> Self {
        self.similarity = Arc::new(similarity);
        self
    }

    /// Set the contour tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance.abs();
        self
    }
}

impl Default for SessionConfig {
    /// Default configuration: threshold 70, indel ratio, tolerance 1e-9
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("fuzzy_threshold", &self.fuzzy_threshold)
            .field("similarity", &self.similarity.name())
            .field("tolerance", &self.tolerance)
            .finish()
    }
}
