use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::scoring::ScoringConfig;
use crate::trends::TrendsConfig;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Article store file (default: ~/.config/noticias/articles.json)
    #[serde(default)]
    pub store: Option<PathBuf>,

    #[serde(default)]
    pub scoring: Option<ScoringConfig>,

    #[serde(default)]
    pub trends: Option<TrendsConfig>,
}
