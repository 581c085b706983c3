use serde::{Deserialize, Serialize};

/// Main scoring configuration.
///
/// Sub-score point budgets are fixed; what can be tuned is how the four
/// sub-scores are weighted and where the bucket cutoffs sit.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   weights:
///     company: 0.4
///     persona: 0.3
///     intent: 0.2
///     timing: 0.1
///   buckets:
///     hot: 80
///     warm: 50
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Sub-score weights (default: 0.4 / 0.3 / 0.2 / 0.1)
    #[serde(default)]
    pub weights: Option<FitWeights>,

    /// Bucket cutoffs. Categorizing without them is an error.
    #[serde(default)]
    pub buckets: Option<BucketThresholds>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: Some(FitWeights::default()),
            buckets: Some(BucketThresholds::default()),
        }
    }
}

/// Weight of each sub-score in the total. Must sum to 1.0.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FitWeights {
    pub company: f64,
    pub persona: f64,
    pub intent: f64,
    pub timing: f64,
}

impl Default for FitWeights {
    fn default() -> Self {
        Self {
            company: 0.4,
            persona: 0.3,
            intent: 0.2,
            timing: 0.1,
        }
    }
}

impl FitWeights {
    pub fn sum(&self) -> f64 {
        self.company + self.persona + self.intent + self.timing
    }
}

/// Inclusive lower bounds for the hot and warm buckets.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BucketThresholds {
    pub hot: f64,
    pub warm: f64,
}

impl Default for BucketThresholds {
    fn default() -> Self {
        Self {
            hot: 80.0,
            warm: 50.0,
        }
    }
}
