pub mod cache;
pub mod config;
pub mod source;

pub use cache::TrendCache;
pub use config::{TrendSourceKind, TrendsConfig};
pub use source::{
    FileTrendSource, StaticTrendSource, TrendError, TrendSnapshot, TrendSource, DEFAULT_TREND_TTL,
    SIMULATED_TRENDS,
};
