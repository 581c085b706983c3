use super::config::ScoringConfig;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(weights) = config.weights {
        let named = [
            ("company", weights.company),
            ("persona", weights.persona),
            ("intent", weights.intent),
            ("timing", weights.timing),
        ];
        for (name, value) in named {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                errors.push(format!(
                    "scoring.weights.{}: must be between 0 and 1, got {}",
                    name, value
                ));
            }
        }

        let sum = weights.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            errors.push(format!("scoring.weights: must sum to 1.0, got {}", sum));
        }
    }

    if let Some(buckets) = config.buckets {
        for (name, value) in [("hot", buckets.hot), ("warm", buckets.warm)] {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                errors.push(format!(
                    "scoring.buckets.{}: must be between 0 and 100, got {}",
                    name, value
                ));
            }
        }

        if buckets.warm > buckets.hot {
            errors.push(format!(
                "scoring.buckets: warm ({}) must not exceed hot ({})",
                buckets.warm, buckets.hot
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
