use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};

use crate::article::{validate_draft, Article, ArticleDraft};
use crate::scoring::{RelevanceEngine, ScoreResult};
use crate::store::ArticleStore;

/// Article lifecycle operations. Every change to an article's content is
/// followed by a relevance recomputation and a save.
pub struct Newsroom<S: ArticleStore> {
    store: S,
    engine: RelevanceEngine,
}

impl<S: ArticleStore> Newsroom<S> {
    pub fn new(store: S, engine: RelevanceEngine) -> Self {
        Self { store, engine }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn engine(&self) -> &RelevanceEngine {
        &self.engine
    }

    pub fn get(&self, id: u64) -> Result<Article> {
        match self.store.get(id)? {
            Some(article) => Ok(article),
            None => bail!(NotFound(id)),
        }
    }

    /// Publish a new article dated `now` and score it
    pub fn create(&mut self, draft: ArticleDraft, now: DateTime<Utc>) -> Result<(Article, ScoreResult)> {
        check_draft(&draft)?;

        let mut article = Article::from_draft(draft, now);
        let result = self.score_and_save(&mut article, now)?;
        tracing::info!(id = article.id, score = result.score, "Created article");
        Ok((article, result))
    }

    /// Replace an article's content and rescore it. The publication date is
    /// left untouched.
    pub fn update(
        &mut self,
        id: u64,
        draft: ArticleDraft,
        now: DateTime<Utc>,
    ) -> Result<(Article, ScoreResult)> {
        check_draft(&draft)?;

        let mut article = self.get(id)?;
        article.apply_draft(draft);

        let result = self.score_and_save(&mut article, now)?;
        tracing::info!(id, score = result.score, "Updated article");
        Ok((article, result))
    }

    pub fn delete(&mut self, id: u64) -> Result<Article> {
        let article = self.get(id)?;
        self.store
            .delete(id)
            .with_context(|| format!("Failed to delete article {}", id))?;
        tracing::info!(id, "Deleted article");
        Ok(article)
    }

    /// Flip the published flag. The score is not recomputed.
    pub fn toggle_published(&mut self, id: u64) -> Result<Article> {
        let mut article = self.get(id)?;
        article.published = !article.published;
        self.store
            .save(&mut article)
            .with_context(|| format!("Failed to save article {}", id))?;
        tracing::info!(id, published = article.published, "Toggled publication");
        Ok(article)
    }

    /// Recompute and save the relevance of a single article
    pub fn rescore(&mut self, id: u64, now: DateTime<Utc>) -> Result<(Article, ScoreResult)> {
        let mut article = self.get(id)?;
        let result = self.score_and_save(&mut article, now)?;
        Ok((article, result))
    }

    /// Recompute and save the relevance of every published article.
    /// Returns how many articles were updated.
    pub fn refresh_all(&mut self, now: DateTime<Utc>) -> Result<usize> {
        let published: Vec<Article> = self
            .store
            .all()?
            .into_iter()
            .filter(|a| a.published)
            .collect();

        let mut count = 0;
        for mut article in published {
            self.score_and_save(&mut article, now)?;
            count += 1;
        }

        tracing::info!(count, "Refreshed relevance");
        Ok(count)
    }

    fn score_and_save(&mut self, article: &mut Article, now: DateTime<Utc>) -> Result<ScoreResult> {
        let result = self.engine.apply_relevance_at(article, now);
        self.store
            .save(article)
            .with_context(|| format!("Failed to save article {}", article.id))?;
        Ok(result)
    }
}

/// Returned (inside `anyhow::Error`) when an article id does not exist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotFound(pub u64);

impl std::fmt::Display for NotFound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Article {} not found", self.0)
    }
}

impl std::error::Error for NotFound {}

/// Returned (inside `anyhow::Error`) when draft content is rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidDraft(pub Vec<String>);

impl std::fmt::Display for InvalidDraft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid article: {}", self.0.join("; "))
    }
}

impl std::error::Error for InvalidDraft {}

fn check_draft(draft: &ArticleDraft) -> Result<()> {
    validate_draft(draft).map_err(|errors| InvalidDraft(errors).into())
}
