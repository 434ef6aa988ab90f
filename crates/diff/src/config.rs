use anyhow::Result;
use similar::Algorithm;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::buffer_diff::BufferDiff;
use crate::signs::{SignAlgorithm, SignCalculator};
use crate::word_diff::{Granularity, SimilarWordDiff};

/// Configuration for computing and presenting hunks
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiffConfig {
    /// Diff algorithm for both the line diff and intraline diffs
    pub algorithm: Algorithm,

    /// Which sign strategy to use
    pub sign_algorithm: SignAlgorithm,

    /// Whether previews get intraline highlights
    pub word_diff: bool,

    /// Token size for intraline highlights
    pub granularity: Granularity,

    /// Deadline for the line diff
    pub timeout: Option<Duration>,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Myers,
            sign_algorithm: SignAlgorithm::default(),
            word_diff: false,
            granularity: Granularity::default(),
            timeout: None,
        }
    }
}

impl DiffConfig {
    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn sign_algorithm(mut self, sign_algorithm: SignAlgorithm) -> Self {
        self.sign_algorithm = sign_algorithm;
        self
    }

    pub fn word_diff(mut self, enabled: bool) -> Self {
        self.word_diff = enabled;
        self
    }

    pub fn granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Diff two texts with this configuration
    pub fn diff(&self, old_text: &str, new_text: &str) -> Result<BufferDiff> {
        BufferDiff::with_config(old_text, new_text, self.clone())
    }

    pub fn sign_calculator(&self) -> SignCalculator {
        SignCalculator::new(self.sign_algorithm)
    }

    /// The intraline engine, if intraline highlights are enabled
    pub fn word_differ(&self) -> Option<SimilarWordDiff> {
        self.word_diff
            .then(|| SimilarWordDiff::new(self.algorithm, self.granularity))
    }
}
