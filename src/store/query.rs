use std::cmp::Ordering;

use crate::article::Article;

pub const PAGE_SIZE: usize = 10;
pub const HEADLINE_COUNT: usize = 3;
pub const RECENT_COUNT: usize = 6;
pub const RELATED_COUNT: usize = 3;

/// Keep only published articles
pub fn published_only(articles: Vec<Article>) -> Vec<Article> {
    articles.into_iter().filter(|a| a.published).collect()
}

/// Keep articles whose title, summary or body contains `query`, ignoring case
pub fn search(articles: Vec<Article>, query: &str) -> Vec<Article> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return articles;
    }
    articles
        .into_iter()
        .filter(|a| {
            a.title.to_lowercase().contains(&needle)
                || a.summary.to_lowercase().contains(&needle)
                || a.body.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Sort by publication date descending, newest id first for ties
pub fn sort_newest_first(articles: &mut [Article]) {
    articles.sort_by(|a, b| {
        b.published_at
            .cmp(&a.published_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

/// Sort by relevance descending, then newest first
pub fn sort_ranked(articles: &mut [Article]) {
    articles.sort_by(|a, b| {
        // Primary: score descending
        let score_cmp = b
            .relevance_score
            .partial_cmp(&a.relevance_score)
            .unwrap_or(Ordering::Equal);
        if score_cmp != Ordering::Equal {
            return score_cmp;
        }
        // Tie-breaker: publication date descending
        b.published_at.cmp(&a.published_at)
    });
}

/// Newest published featured articles, for the front page
pub fn featured_headlines(articles: Vec<Article>, limit: usize) -> Vec<Article> {
    let mut featured: Vec<Article> = published_only(articles)
        .into_iter()
        .filter(|a| a.featured)
        .collect();
    sort_newest_first(&mut featured);
    featured.truncate(limit);
    featured
}

/// Newest published articles
pub fn recent(articles: Vec<Article>, limit: usize) -> Vec<Article> {
    let mut published = published_only(articles);
    sort_newest_first(&mut published);
    published.truncate(limit);
    published
}

/// Newest published articles other than `id`
pub fn related(articles: Vec<Article>, id: u64, limit: usize) -> Vec<Article> {
    let others: Vec<Article> = articles.into_iter().filter(|a| a.id != id).collect();
    recent(others, limit)
}

/// One page (1-based) of `per_page` items; out-of-range pages are empty
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    if page == 0 || per_page == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(per_page);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(per_page).min(items.len());
    &items[start..end]
}

/// Number of pages needed for `len` items
pub fn page_count(len: usize, per_page: usize) -> usize {
    if per_page == 0 {
        0
    } else {
        len.div_ceil(per_page)
    }
}

/// Article counts for the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub published: usize,
    pub drafts: usize,
    pub featured: usize,
}

impl Stats {
    pub fn from_articles(articles: &[Article]) -> Self {
        let published = articles.iter().filter(|a| a.published).count();
        Self {
            total: articles.len(),
            published,
            drafts: articles.len() - published,
            featured: articles.iter().filter(|a| a.published && a.featured).count(),
        }
    }
}
