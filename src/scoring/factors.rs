use anyhow::{bail, Context, Result};
use std::fmt;

use super::config::RecencyBucket;
use crate::article::Article;

#[derive(Debug, Clone, PartialEq)]
pub enum RangeOp {
    LessThan(u64),
    LessEqual(u64),
    GreaterThan(u64),
    GreaterEqual(u64),
    Equal(u64),
    Between(u64, u64), // Inclusive range: N-M
}

impl RangeOp {
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(val) = s.strip_prefix(">=") {
            Ok(RangeOp::GreaterEqual(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix("<=") {
            Ok(RangeOp::LessEqual(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix('>') {
            Ok(RangeOp::GreaterThan(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix('<') {
            Ok(RangeOp::LessThan(val.trim().parse()?))
        } else if let Some((low, high)) = s.split_once('-') {
            let low: u64 = low.trim().parse()?;
            let high: u64 = high.trim().parse()?;
            if low > high {
                bail!("Empty range: {}", s)
            }
            Ok(RangeOp::Between(low, high))
        } else {
            Ok(RangeOp::Equal(s.parse()?))
        }
    }

    pub fn matches(&self, value: u64) -> bool {
        match self {
            RangeOp::LessThan(n) => value < *n,
            RangeOp::LessEqual(n) => value <= *n,
            RangeOp::GreaterThan(n) => value > *n,
            RangeOp::GreaterEqual(n) => value >= *n,
            RangeOp::Equal(n) => value == *n,
            RangeOp::Between(low, high) => value >= *low && value <= *high,
        }
    }
}

impl fmt::Display for RangeOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeOp::LessThan(n) => write!(f, "<{}", n),
            RangeOp::LessEqual(n) => write!(f, "<={}", n),
            RangeOp::GreaterThan(n) => write!(f, ">{}", n),
            RangeOp::GreaterEqual(n) => write!(f, ">={}", n),
            RangeOp::Equal(n) => write!(f, "{}", n),
            RangeOp::Between(low, high) => write!(f, "{}-{}", low, high),
        }
    }
}

/// One content-quality check and the bonus it awards when satisfied.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentCheck {
    TitleLength(RangeOp),
    SummaryLength(RangeOp),
    BodyLength(RangeOp),
    BodyHasDigit,
    BodyHasQuote,
    BodyHasLink,
}

impl ContentCheck {
    pub fn bonus(&self) -> f64 {
        match self {
            ContentCheck::TitleLength(_) | ContentCheck::SummaryLength(_) => 2.0,
            ContentCheck::BodyLength(_) => 3.0,
            ContentCheck::BodyHasDigit | ContentCheck::BodyHasQuote | ContentCheck::BodyHasLink => {
                1.0
            }
        }
    }

    pub fn passes(&self, article: &Article) -> bool {
        match self {
            ContentCheck::TitleLength(range) => range.matches(char_len(&article.title)),
            ContentCheck::SummaryLength(range) => range.matches(char_len(&article.summary)),
            ContentCheck::BodyLength(range) => range.matches(char_len(&article.body)),
            ContentCheck::BodyHasDigit => article.body.chars().any(|c| c.is_ascii_digit()),
            ContentCheck::BodyHasQuote => article.body.contains(['"', '\'']),
            ContentCheck::BodyHasLink => {
                article.body.contains("http") || article.body.contains("www")
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            ContentCheck::TitleLength(range) => format!("title length {}", range),
            ContentCheck::SummaryLength(range) => format!("summary length {}", range),
            ContentCheck::BodyLength(range) => format!("body length {}", range),
            ContentCheck::BodyHasDigit => "body has figures".to_string(),
            ContentCheck::BodyHasQuote => "body has quotes".to_string(),
            ContentCheck::BodyHasLink => "body has links".to_string(),
        }
    }
}

fn char_len(s: &str) -> u64 {
    s.chars().count() as u64
}

/// Recency bucket with its window parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct RecencyRule {
    pub within: chrono::Duration,
    pub label: String,
    pub bonus: f64,
}

impl RecencyRule {
    pub fn parse(bucket: &RecencyBucket) -> Result<Self> {
        let std_duration = humantime::parse_duration(bucket.within.trim())
            .with_context(|| format!("Invalid duration '{}'", bucket.within))?;
        let within = chrono::Duration::from_std(std_duration)
            .with_context(|| format!("Duration out of range '{}'", bucket.within))?;
        if !bucket.bonus.is_finite() || bucket.bonus < 0.0 {
            bail!("Bonus must be a non-negative number: {}", bucket.bonus)
        }
        Ok(Self {
            within,
            label: bucket.within.trim().to_string(),
            bonus: bucket.bonus,
        })
    }
}
