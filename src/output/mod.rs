pub mod formatter;

pub use formatter::{
    format_article_detail, format_article_table, format_breakdown, format_recomputed_breakdown,
    format_score, format_stats, format_tsv, should_use_colors,
};
