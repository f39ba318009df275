pub mod json;
pub mod memory;
pub mod query;

pub use json::{get_store_path, JsonFileStore};
pub use memory::MemoryStore;
pub use query::Stats;

use anyhow::Result;

use crate::article::Article;

/// Persistence for articles.
///
/// `save` inserts when `article.id` is 0 (assigning a fresh id in place) and
/// replaces the stored copy otherwise.
pub trait ArticleStore {
    fn all(&self) -> Result<Vec<Article>>;

    fn get(&self, id: u64) -> Result<Option<Article>>;

    fn save(&mut self, article: &mut Article) -> Result<()>;

    /// Returns true if an article was removed
    fn delete(&mut self, id: u64) -> Result<bool>;
}
