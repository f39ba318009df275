use serde::{Deserialize, Serialize};

use super::tables::SIGNIFICANT_KEYWORDS;

/// Main scoring configuration.
///
/// Defines how relevance scores are calculated. Every field is optional and
/// falls back to the built-in defaults, which reproduce the standard newsroom
/// scoring exactly.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   weights: { keywords: 0.3, trends: 0.4, content: 0.2, recency: 0.1 }
///   featured_threshold: 7.0
///   content:
///     title_length: "20-100"
///     summary_length: "100-300"
///     body_length: ">500"
///   recency:
///     - { within: "1d", bonus: 3.0 }
///     - { within: "7d", bonus: 2.0 }
///     - { within: "30d", bonus: 1.0 }
///   weekend_penalty: 1.0
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Weight of each sub-score in the final score (must sum to 1.0)
    #[serde(default)]
    pub weights: Option<Weights>,

    /// Score at or above which an article becomes featured (default: 7.0)
    #[serde(default)]
    pub featured_threshold: Option<f64>,

    /// Significant terms for the keyword sub-score (default: built-in table)
    #[serde(default)]
    pub keywords: Option<Vec<String>>,

    /// Length ranges for the content-quality checks
    #[serde(default)]
    pub content: Option<ContentConfig>,

    /// Recency buckets, first match wins
    #[serde(default)]
    pub recency: Option<Vec<RecencyBucket>>,

    /// Subtracted from the recency sub-score for weekend publications
    #[serde(default)]
    pub weekend_penalty: Option<f64>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: Some(Weights::default()),
            featured_threshold: Some(DEFAULT_FEATURED_THRESHOLD),
            keywords: Some(SIGNIFICANT_KEYWORDS.iter().map(|k| k.to_string()).collect()),
            content: Some(ContentConfig::default()),
            recency: Some(default_recency()),
            weekend_penalty: Some(DEFAULT_WEEKEND_PENALTY),
        }
    }
}

pub const DEFAULT_FEATURED_THRESHOLD: f64 = 7.0;
pub const DEFAULT_WEEKEND_PENALTY: f64 = 1.0;

/// Sub-score weights.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Weights {
    pub keywords: f64,
    pub trends: f64,
    pub content: f64,
    pub recency: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            keywords: 0.3,
            trends: 0.4,
            content: 0.2,
            recency: 0.1,
        }
    }
}

impl Weights {
    pub fn total(&self) -> f64 {
        self.keywords + self.trends + self.content + self.recency
    }
}

/// Content-quality length checks.
///
/// Range format: "<N", "<=N", ">N", ">=N", "N", "N-M" (inclusive range),
/// measured in characters.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ContentConfig {
    #[serde(default)]
    pub title_length: Option<String>,
    #[serde(default)]
    pub summary_length: Option<String>,
    #[serde(default)]
    pub body_length: Option<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            title_length: Some("20-100".to_string()),
            summary_length: Some("100-300".to_string()),
            body_length: Some(">500".to_string()),
        }
    }
}

/// Recency bucket.
///
/// Articles published no longer than `within` ago (humantime syntax, e.g.
/// "1d", "12h") receive `bonus`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RecencyBucket {
    pub within: String,
    pub bonus: f64,
}

pub fn default_recency() -> Vec<RecencyBucket> {
    vec![
        RecencyBucket {
            within: "1d".to_string(),
            bonus: 3.0,
        },
        RecencyBucket {
            within: "7d".to_string(),
            bonus: 2.0,
        },
        RecencyBucket {
            within: "30d".to_string(),
            bonus: 1.0,
        },
    ]
}
