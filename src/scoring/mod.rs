pub mod config;
pub mod engine;
pub mod factors;
pub mod keywords;
pub mod tables;
pub mod validation;

pub use config::*;
pub use engine::{
    FactorContribution, RelevanceEngine, ScoreBreakdown, ScoreResult, ScoringRules,
    TREND_FALLBACK_SCORE,
};
pub use factors::{ContentCheck, RangeOp, RecencyRule};
pub use keywords::{extract_keywords, join_keywords};
pub use validation::validate_scoring;
