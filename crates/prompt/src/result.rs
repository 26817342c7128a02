// ABOUTME: FormatResult struct holding a formatted prompt rendering plus reduction statistics.
// ABOUTME: Serializable to JSON for the CLI's --json mode.

use serde::{Deserialize, Serialize};

use crate::reduce::ReduceStats;

/// The result of formatting one HTML input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatResult {
    pub content: String,
    pub stats: ReduceStats,
    pub input_bytes: usize,
    pub output_bytes: usize,
}

impl FormatResult {
    /// Fraction of input bytes that survived, in `0.0..=1.0` for any input
    /// that shrank. Zero for empty input.
    pub fn compression_ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            return 0.0;
        }
        self.output_bytes as f64 / self.input_bytes as f64
    }
}
