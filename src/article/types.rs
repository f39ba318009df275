use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const TITLE_MAX_CHARS: usize = 200;
pub const SUMMARY_MAX_CHARS: usize = 500;

/// Separator used when the extracted keyword list is stored as one string.
pub const KEYWORD_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Assigned by the store on first save; 0 means "not yet stored"
    #[serde(default)]
    pub id: u64,
    pub title: String,
    pub summary: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub published_at: DateTime<Utc>,
    #[serde(default = "default_published")]
    pub published: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub relevance_score: f64,
    #[serde(default)]
    pub extracted_keywords: String,
}

fn default_published() -> bool {
    true
}

/// The editable content fields of an article.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticleDraft {
    pub title: String,
    pub summary: String,
    pub body: String,
}

impl Article {
    /// Build a new, unscored article from a draft. Publication date defaults
    /// to the creation time.
    pub fn from_draft(draft: ArticleDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            title: draft.title,
            summary: draft.summary,
            body: draft.body,
            created_at: now,
            published_at: now,
            published: true,
            featured: false,
            relevance_score: 0.0,
            extracted_keywords: String::new(),
        }
    }

    /// Replace the content fields, leaving dates and flags untouched
    pub fn apply_draft(&mut self, draft: ArticleDraft) {
        self.title = draft.title;
        self.summary = draft.summary;
        self.body = draft.body;
    }

    /// Current content fields as a draft (for partial edits)
    pub fn to_draft(&self) -> ArticleDraft {
        ArticleDraft {
            title: self.title.clone(),
            summary: self.summary.clone(),
            body: self.body.clone(),
        }
    }

    /// Stored keywords as an ordered sequence
    pub fn keywords(&self) -> Vec<&str> {
        if self.extracted_keywords.is_empty() {
            return Vec::new();
        }
        self.extracted_keywords.split(KEYWORD_SEPARATOR).collect()
    }

    /// Format the time elapsed since publication, e.g. "3 days ago"
    pub fn time_ago_at(&self, now: DateTime<Utc>) -> String {
        let elapsed = now - self.published_at;
        let days = elapsed.num_days();
        let seconds = elapsed.num_seconds();

        if days > 0 {
            plural(days, "day")
        } else if seconds > 3600 {
            plural(seconds / 3600, "hour")
        } else if seconds > 60 {
            plural(seconds / 60, "minute")
        } else {
            "just now".to_string()
        }
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n > 1 {
        format!("{} {}s ago", n, unit)
    } else {
        format!("{} {} ago", n, unit)
    }
}

/// Validate draft content before it is stored.
/// Returns all validation errors at once (not just the first).
pub fn validate_draft(draft: &ArticleDraft) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if draft.title.trim().is_empty() {
        errors.push("title: must not be empty".to_string());
    }
    let title_len = draft.title.chars().count();
    if title_len > TITLE_MAX_CHARS {
        errors.push(format!(
            "title: {} characters, at most {} allowed",
            title_len, TITLE_MAX_CHARS
        ));
    }

    if draft.summary.trim().is_empty() {
        errors.push("summary: must not be empty".to_string());
    }
    let summary_len = draft.summary.chars().count();
    if summary_len > SUMMARY_MAX_CHARS {
        errors.push(format!(
            "summary: {} characters, at most {} allowed",
            summary_len, SUMMARY_MAX_CHARS
        ));
    }

    if draft.body.trim().is_empty() {
        errors.push("body: must not be empty".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
