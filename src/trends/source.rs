use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Default validity of a fetched trend snapshot
pub const DEFAULT_TREND_TTL: Duration = Duration::from_secs(60 * 60);

/// Simulated trending queries served by [`StaticTrendSource`].
pub const SIMULATED_TRENDS: &[&str] = &[
    "tecnologia",
    "política",
    "economia",
    "saúde",
    "educação",
    "meio ambiente",
    "cultura",
    "esporte",
    "internacional",
    "nacional",
];

/// Trending terms plus the instant after which they must be fetched again.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSnapshot {
    pub terms: BTreeSet<String>,
    pub valid_until: DateTime<Utc>,
}

impl TrendSnapshot {
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.valid_until
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TrendError {
    Unavailable(String),
    Io(String),
    Parse(String),
    Poisoned,
}

impl fmt::Display for TrendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendError::Unavailable(msg) => write!(f, "Trend source unavailable: {}", msg),
            TrendError::Io(msg) => write!(f, "Failed to read trends: {}", msg),
            TrendError::Parse(msg) => write!(f, "Failed to parse trends: {}", msg),
            TrendError::Poisoned => write!(f, "Trend cache lock poisoned"),
        }
    }
}

impl std::error::Error for TrendError {}

/// A provider of currently trending query terms.
///
/// Implementations return the terms together with a validity deadline; the
/// cache will not call `fetch` again before that deadline passes.
pub trait TrendSource: Send + Sync {
    /// Short identifier used in log lines
    fn name(&self) -> &str;

    fn fetch(&self, now: DateTime<Utc>) -> Result<TrendSnapshot, TrendError>;
}

/// Fixed in-memory trend fixture standing in for a real trends provider
#[derive(Debug, Clone)]
pub struct StaticTrendSource {
    terms: Vec<String>,
    ttl: Duration,
}

impl Default for StaticTrendSource {
    fn default() -> Self {
        Self::new(DEFAULT_TREND_TTL)
    }
}

impl StaticTrendSource {
    pub fn new(ttl: Duration) -> Self {
        Self::with_terms(SIMULATED_TRENDS.iter().map(|t| t.to_string()).collect(), ttl)
    }

    pub fn with_terms(terms: Vec<String>, ttl: Duration) -> Self {
        Self { terms, ttl }
    }
}

impl TrendSource for StaticTrendSource {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch(&self, now: DateTime<Utc>) -> Result<TrendSnapshot, TrendError> {
        Ok(TrendSnapshot {
            terms: normalize_terms(self.terms.iter()),
            valid_until: valid_until(now, self.ttl)?,
        })
    }
}

/// Reads trending terms from a local YAML file on every refresh.
///
/// The file holds either a plain list or a `terms:` mapping:
/// ```yaml
/// terms:
///   - tecnologia
///   - eleições
/// ```
#[derive(Debug, Clone)]
pub struct FileTrendSource {
    path: PathBuf,
    ttl: Duration,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TrendFile {
    List(Vec<String>),
    Terms { terms: Vec<String> },
}

impl FileTrendSource {
    pub fn new(path: PathBuf, ttl: Duration) -> Self {
        Self { path, ttl }
    }
}

impl TrendSource for FileTrendSource {
    fn name(&self) -> &str {
        "file"
    }

    fn fetch(&self, now: DateTime<Utc>) -> Result<TrendSnapshot, TrendError> {
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| TrendError::Io(format!("{}: {}", self.path.display(), e)))?;

        let parsed: TrendFile = serde_saphyr::from_str(&content)
            .map_err(|e| TrendError::Parse(format!("{}: {}", self.path.display(), e)))?;

        let terms = match parsed {
            TrendFile::List(terms) | TrendFile::Terms { terms } => terms,
        };

        Ok(TrendSnapshot {
            terms: normalize_terms(terms.iter()),
            valid_until: valid_until(now, self.ttl)?,
        })
    }
}

/// Lowercase and trim terms, dropping blanks
fn normalize_terms<'a, I>(terms: I) -> BTreeSet<String>
where
    I: Iterator<Item = &'a String>,
{
    terms
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

fn valid_until(now: DateTime<Utc>, ttl: Duration) -> Result<DateTime<Utc>, TrendError> {
    let ttl = chrono::Duration::from_std(ttl)
        .map_err(|e| TrendError::Unavailable(format!("invalid ttl: {}", e)))?;
    now.checked_add_signed(ttl)
        .ok_or_else(|| TrendError::Unavailable("ttl overflows the calendar".to_string()))
}
