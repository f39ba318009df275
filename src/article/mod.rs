pub mod types;

pub use types::{validate_draft, Article, ArticleDraft, KEYWORD_SEPARATOR};
