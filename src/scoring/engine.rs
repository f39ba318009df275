use anyhow::{bail, Context, Result};
use chrono::{DateTime, Datelike, Utc, Weekday};

use super::config::{
    default_recency, ContentConfig, ScoringConfig, Weights, DEFAULT_FEATURED_THRESHOLD,
    DEFAULT_WEEKEND_PENALTY,
};
use super::factors::{ContentCheck, RangeOp, RecencyRule};
use super::keywords::{extract_keywords, join_keywords};
use super::tables::SIGNIFICANT_KEYWORDS;
use super::validation::validate_scoring;
use crate::article::Article;
use crate::trends::TrendCache;

/// Upper bound of every sub-score and of the final score
pub const MAX_SCORE: f64 = 10.0;
/// Trend sub-score used when trends cannot be evaluated
pub const TREND_FALLBACK_SCORE: f64 = 5.0;

const KEYWORD_HIT: f64 = 1.0;
const TREND_HIT: f64 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct FactorContribution {
    pub label: String,       // e.g. "Keywords", "Trends"
    pub description: String, // e.g. "2 matched: economia, saúde"
    pub raw: f64,            // Sub-score in [0, 10]
    pub weight: f64,
}

impl FactorContribution {
    pub fn weighted(&self) -> f64 {
        self.raw * self.weight
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub factors: Vec<FactorContribution>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    pub score: f64,
    /// True when the trend sub-score fell back because trends were unavailable
    pub incomplete: bool,
    pub breakdown: ScoreBreakdown,
}

/// Scoring configuration with every default filled in and every string parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringRules {
    pub weights: Weights,
    pub featured_threshold: f64,
    pub keywords: Vec<String>,
    pub content_checks: Vec<ContentCheck>,
    pub recency: Vec<RecencyRule>,
    pub weekend_penalty: f64,
}

impl Default for ScoringRules {
    fn default() -> Self {
        let rule = |days: i64, bonus: f64| RecencyRule {
            within: chrono::Duration::days(days),
            label: format!("{}d", days),
            bonus,
        };
        Self {
            weights: Weights::default(),
            featured_threshold: DEFAULT_FEATURED_THRESHOLD,
            keywords: SIGNIFICANT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            content_checks: vec![
                ContentCheck::TitleLength(RangeOp::Between(20, 100)),
                ContentCheck::SummaryLength(RangeOp::Between(100, 300)),
                ContentCheck::BodyLength(RangeOp::GreaterThan(500)),
                ContentCheck::BodyHasDigit,
                ContentCheck::BodyHasQuote,
                ContentCheck::BodyHasLink,
            ],
            recency: vec![rule(1, 3.0), rule(7, 2.0), rule(30, 1.0)],
            weekend_penalty: DEFAULT_WEEKEND_PENALTY,
        }
    }
}

impl ScoringRules {
    pub fn from_config(config: &ScoringConfig) -> Result<Self> {
        if let Err(errors) = validate_scoring(config) {
            bail!("Invalid scoring config: {}", errors.join("; "));
        }

        let content = config.content.clone().unwrap_or_default();
        let defaults = ContentConfig::default();
        let range = |value: &Option<String>, fallback: &Option<String>, field: &str| {
            let s = value.as_ref().or(fallback.as_ref()).map(String::as_str).unwrap_or("");
            RangeOp::parse(s).with_context(|| format!("scoring.content.{}: invalid '{}'", field, s))
        };

        let content_checks = vec![
            ContentCheck::TitleLength(range(&content.title_length, &defaults.title_length, "title_length")?),
            ContentCheck::SummaryLength(range(
                &content.summary_length,
                &defaults.summary_length,
                "summary_length",
            )?),
            ContentCheck::BodyLength(range(&content.body_length, &defaults.body_length, "body_length")?),
            ContentCheck::BodyHasDigit,
            ContentCheck::BodyHasQuote,
            ContentCheck::BodyHasLink,
        ];

        let recency = config
            .recency
            .clone()
            .unwrap_or_else(default_recency)
            .iter()
            .enumerate()
            .map(|(i, bucket)| {
                RecencyRule::parse(bucket).with_context(|| format!("scoring.recency[{}]", i))
            })
            .collect::<Result<Vec<_>>>()?;

        let keywords = match config.keywords {
            Some(ref keywords) => keywords.iter().map(|k| k.trim().to_lowercase()).collect(),
            None => SIGNIFICANT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        };

        Ok(Self {
            weights: config.weights.unwrap_or_default(),
            featured_threshold: config.featured_threshold.unwrap_or(DEFAULT_FEATURED_THRESHOLD),
            keywords,
            content_checks,
            recency,
            weekend_penalty: config.weekend_penalty.unwrap_or(DEFAULT_WEEKEND_PENALTY),
        })
    }
}

/// Computes relevance scores, featured flags and extracted keywords.
///
/// Holds the trend cache for its whole lifetime; construct one engine per
/// process and share it by reference.
pub struct RelevanceEngine {
    rules: ScoringRules,
    trends: TrendCache,
}

impl RelevanceEngine {
    pub fn new(config: &ScoringConfig, trends: TrendCache) -> Result<Self> {
        Ok(Self::with_rules(ScoringRules::from_config(config)?, trends))
    }

    pub fn with_rules(rules: ScoringRules, trends: TrendCache) -> Self {
        Self { rules, trends }
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    pub fn trends(&self) -> &TrendCache {
        &self.trends
    }

    pub fn compute_relevance(&self, article: &Article) -> ScoreResult {
        self.compute_relevance_at(article, Utc::now())
    }

    /// Weighted sum of the keyword, trend, content and recency sub-scores,
    /// rounded to two decimals.
    pub fn compute_relevance_at(&self, article: &Article, now: DateTime<Utc>) -> ScoreResult {
        let weights = self.rules.weights;
        let (keywords, keywords_desc) = self.keyword_score(article);
        let (trends, trends_desc, incomplete) = self.trend_score(article, now);
        let (content, content_desc) = self.content_score(article);
        let (recency, recency_desc) = self.recency_score(article, now);

        let factors = vec![
            FactorContribution {
                label: "Keywords".to_string(),
                description: keywords_desc,
                raw: keywords,
                weight: weights.keywords,
            },
            FactorContribution {
                label: "Trends".to_string(),
                description: trends_desc,
                raw: trends,
                weight: weights.trends,
            },
            FactorContribution {
                label: "Content".to_string(),
                description: content_desc,
                raw: content,
                weight: weights.content,
            },
            FactorContribution {
                label: "Recency".to_string(),
                description: recency_desc,
                raw: recency,
                weight: weights.recency,
            },
        ];

        let total: f64 = factors.iter().map(FactorContribution::weighted).sum();
        let score = round2(total.clamp(0.0, MAX_SCORE));

        tracing::debug!(
            id = article.id,
            score,
            keywords,
            trends,
            content,
            recency,
            "Computed relevance"
        );

        ScoreResult {
            score,
            incomplete,
            breakdown: ScoreBreakdown { factors },
        }
    }

    pub fn apply_relevance(&self, article: &mut Article) -> ScoreResult {
        self.apply_relevance_at(article, Utc::now())
    }

    /// Recompute score, keywords and featured flag together. The caller is
    /// responsible for persisting the article afterwards.
    pub fn apply_relevance_at(&self, article: &mut Article, now: DateTime<Utc>) -> ScoreResult {
        let result = self.compute_relevance_at(article, now);
        article.relevance_score = result.score;
        article.extracted_keywords = join_keywords(&extract_keywords(article));
        article.featured = self.is_featured(result.score);
        result
    }

    pub fn is_featured(&self, score: f64) -> bool {
        score >= self.rules.featured_threshold
    }

    /// +1 for every significant term found anywhere in the article text
    pub fn keyword_score(&self, article: &Article) -> (f64, String) {
        let text = format!("{} {} {}", article.title, article.summary, article.body).to_lowercase();
        let matched: Vec<&str> = self
            .rules
            .keywords
            .iter()
            .filter(|k| !k.is_empty() && text.contains(k.as_str()))
            .map(String::as_str)
            .collect();

        let score = (matched.len() as f64 * KEYWORD_HIT).min(MAX_SCORE);
        (score, describe_matches(&matched))
    }

    /// +2 for every trending term found in the title or summary. Falls back to
    /// a fixed score when the trend cache cannot be refreshed.
    pub fn trend_score(&self, article: &Article, now: DateTime<Utc>) -> (f64, String, bool) {
        let terms = match self.trends.terms_at(now) {
            Ok(terms) => terms,
            Err(e) => {
                tracing::warn!(
                    id = article.id,
                    source = self.trends.source_name(),
                    error = %e,
                    "Trend analysis failed, using fallback score"
                );
                return (
                    TREND_FALLBACK_SCORE,
                    format!("unavailable ({}), fallback", e),
                    true,
                );
            }
        };

        let text = format!("{} {}", article.title, article.summary).to_lowercase();
        let matched: Vec<String> = terms
            .iter()
            .map(|t| t.to_lowercase())
            .filter(|t| !t.is_empty() && text.contains(t.as_str()))
            .collect();

        let score = (matched.len() as f64 * TREND_HIT).min(MAX_SCORE);
        let matched: Vec<&str> = matched.iter().map(String::as_str).collect();
        (score, describe_matches(&matched), false)
    }

    /// Sum of the bonuses of every content-quality check that passes
    pub fn content_score(&self, article: &Article) -> (f64, String) {
        let passed: Vec<&ContentCheck> = self
            .rules
            .content_checks
            .iter()
            .filter(|check| check.passes(article))
            .collect();

        let score: f64 = passed.iter().map(|check| check.bonus()).sum();
        let description = if passed.is_empty() {
            "no checks passed".to_string()
        } else {
            passed
                .iter()
                .map(|check| check.describe())
                .collect::<Vec<_>>()
                .join(", ")
        };
        (score.min(MAX_SCORE), description)
    }

    /// Bonus of the first recency bucket the publication date falls into,
    /// minus the weekend penalty, floored at zero
    pub fn recency_score(&self, article: &Article, now: DateTime<Utc>) -> (f64, String) {
        let age = now - article.published_at;
        let bucket = self.rules.recency.iter().find(|rule| age <= rule.within);

        let mut score = bucket.map(|rule| rule.bonus).unwrap_or(0.0);
        let mut description = match bucket {
            Some(rule) => format!("within {}", rule.label),
            None => "older than every window".to_string(),
        };

        if matches!(article.published_at.weekday(), Weekday::Sat | Weekday::Sun) {
            score -= self.rules.weekend_penalty;
            description.push_str(", weekend");
        }

        (score.clamp(0.0, MAX_SCORE), description)
    }
}

fn describe_matches(matched: &[&str]) -> String {
    if matched.is_empty() {
        "no matches".to_string()
    } else {
        format!("{} matched: {}", matched.len(), matched.join(", "))
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
