use anyhow::{bail, Result};

use super::ArticleStore;
use crate::article::Article;

/// In-memory article store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    articles: Vec<Article>,
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace `article` in `articles`, assigning an id from
    /// `next_id` when it has none.
    pub(crate) fn upsert(articles: &mut Vec<Article>, next_id: &mut u64, article: &mut Article) -> Result<()> {
        if article.id == 0 {
            *next_id += 1;
            article.id = *next_id;
            articles.push(article.clone());
            return Ok(());
        }

        match articles.iter_mut().find(|a| a.id == article.id) {
            Some(existing) => *existing = article.clone(),
            None => bail!("Article {} not found", article.id),
        }
        Ok(())
    }
}

impl ArticleStore for MemoryStore {
    fn all(&self) -> Result<Vec<Article>> {
        Ok(self.articles.clone())
    }

    fn get(&self, id: u64) -> Result<Option<Article>> {
        Ok(self.articles.iter().find(|a| a.id == id).cloned())
    }

    fn save(&mut self, article: &mut Article) -> Result<()> {
        Self::upsert(&mut self.articles, &mut self.next_id, article)
    }

    fn delete(&mut self, id: u64) -> Result<bool> {
        let before = self.articles.len();
        self.articles.retain(|a| a.id != id);
        Ok(self.articles.len() != before)
    }
}
