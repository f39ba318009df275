use super::config::ScoringConfig;
use super::factors::{RangeOp, RecencyRule};
use super::engine::MAX_SCORE;

const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    // Validate weights
    if let Some(weights) = config.weights {
        for (name, value) in [
            ("keywords", weights.keywords),
            ("trends", weights.trends),
            ("content", weights.content),
            ("recency", weights.recency),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!(
                    "scoring.weights.{}: must be a non-negative number",
                    name
                ));
            }
        }
        if (weights.total() - 1.0).abs() > WEIGHT_TOLERANCE {
            errors.push(format!(
                "scoring.weights: must sum to 1.0 (got {})",
                weights.total()
            ));
        }
    }

    // Validate featured threshold
    if let Some(threshold) = config.featured_threshold {
        if !(0.0..=MAX_SCORE).contains(&threshold) {
            errors.push(format!(
                "scoring.featured_threshold: must be between 0 and {}",
                MAX_SCORE
            ));
        }
    }

    // Validate keyword list
    if let Some(ref keywords) = config.keywords {
        for (i, keyword) in keywords.iter().enumerate() {
            if keyword.trim().is_empty() {
                errors.push(format!("scoring.keywords[{}]: must not be empty", i));
            }
        }
    }

    // Validate content ranges
    if let Some(ref content) = config.content {
        for (name, range) in [
            ("title_length", &content.title_length),
            ("summary_length", &content.summary_length),
            ("body_length", &content.body_length),
        ] {
            if let Some(range) = range {
                if let Err(e) = RangeOp::parse(range) {
                    errors.push(format!(
                        "scoring.content.{}: invalid '{}' - {}",
                        name, range, e
                    ));
                }
            }
        }
    }

    // Validate recency buckets
    if let Some(ref buckets) = config.recency {
        for (i, bucket) in buckets.iter().enumerate() {
            if let Err(e) = RecencyRule::parse(bucket) {
                errors.push(format!(
                    "scoring.recency[{}]: invalid '{}' - {}",
                    i, bucket.within, e
                ));
            }
        }
    }

    // Validate weekend penalty
    if let Some(penalty) = config.weekend_penalty {
        if !penalty.is_finite() || penalty < 0.0 {
            errors.push("scoring.weekend_penalty: must be a non-negative number".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
