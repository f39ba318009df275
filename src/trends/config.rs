use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::source::{FileTrendSource, StaticTrendSource, TrendSource, DEFAULT_TREND_TTL};

/// Which trend provider feeds the cache.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TrendSourceKind {
    #[default]
    Static,
    File,
}

/// Trend source configuration.
///
/// Example YAML:
/// ```yaml
/// trends:
///   source: file
///   path: ~/.config/noticias/trends.yaml
///   ttl: 30m
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TrendsConfig {
    #[serde(default)]
    pub source: TrendSourceKind,

    /// Terms file, required when `source: file`
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// How long a fetched snapshot stays valid (humantime, default "1h")
    #[serde(default)]
    pub ttl: Option<String>,
}

impl TrendsConfig {
    pub fn ttl(&self) -> Result<std::time::Duration> {
        match self.ttl {
            Some(ref ttl) => humantime::parse_duration(ttl.trim())
                .with_context(|| format!("trends.ttl: invalid duration '{}'", ttl)),
            None => Ok(DEFAULT_TREND_TTL),
        }
    }

    /// Terms file path with a leading `~` expanded to the home directory
    pub fn resolved_path(&self) -> Option<PathBuf> {
        let path = self.path.as_ref()?;
        match (path.strip_prefix("~"), dirs::home_dir()) {
            (Ok(rest), Some(home)) => Some(home.join(rest)),
            _ => Some(path.clone()),
        }
    }

    /// Build the configured trend source
    pub fn build_source(&self) -> Result<Box<dyn TrendSource>> {
        let ttl = self.ttl()?;
        if ttl.is_zero() {
            bail!("trends.ttl: must be greater than zero");
        }
        match self.source {
            TrendSourceKind::Static => Ok(Box::new(StaticTrendSource::new(ttl))),
            TrendSourceKind::File => {
                let Some(path) = self.resolved_path() else {
                    bail!("trends.path: required when trends.source is 'file'");
                };
                Ok(Box::new(FileTrendSource::new(path, ttl)))
            }
        }
    }
}
