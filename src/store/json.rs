use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};

use super::memory::MemoryStore;
use super::ArticleStore;
use crate::article::Article;

const STORE_VERSION: u32 = 1;

/// Get the default article store path (~/.config/noticias/articles.json)
pub fn get_store_path() -> PathBuf {
    crate::config::get_config_dir().join("articles.json")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ArticleDocument {
    version: u32,
    #[serde(default)]
    next_id: u64,
    #[serde(default)]
    articles: Vec<Article>,
}

impl ArticleDocument {
    fn new() -> Self {
        Self {
            version: STORE_VERSION,
            next_id: 0,
            articles: Vec::new(),
        }
    }
}

/// Article store persisted as one JSON document.
///
/// The whole document is loaded on open and rewritten atomically after every
/// mutation, so the file is never left half-written.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    doc: ArticleDocument,
}

impl JsonFileStore {
    /// Open the store at `path`.
    ///
    /// If the file doesn't exist, starts empty (the file is created on first save).
    /// If the file exists but has an unsupported version, returns an error.
    pub fn open(path: &Path) -> Result<Self> {
        let doc = if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open article store at {}", path.display()))?;
            let doc: ArticleDocument = serde_json::from_reader(file)
                .with_context(|| format!("Failed to load article store at {}", path.display()))?;
            if doc.version != STORE_VERSION {
                anyhow::bail!("Unsupported article store version: {}", doc.version);
            }
            doc
        } else {
            ArticleDocument::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            doc,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {}", parent.display()))?;
            }
        }

        let mut file = AtomicWriteFile::open(&self.path).with_context(|| {
            format!("Failed to open atomic write file at {}", self.path.display())
        })?;

        serde_json::to_writer_pretty(&mut file, &self.doc)
            .context("Failed to serialize article store")?;

        file.commit().context("Failed to save article store")?;

        Ok(())
    }
}

impl ArticleStore for JsonFileStore {
    fn all(&self) -> Result<Vec<Article>> {
        Ok(self.doc.articles.clone())
    }

    fn get(&self, id: u64) -> Result<Option<Article>> {
        Ok(self.doc.articles.iter().find(|a| a.id == id).cloned())
    }

    fn save(&mut self, article: &mut Article) -> Result<()> {
        MemoryStore::upsert(&mut self.doc.articles, &mut self.doc.next_id, article)?;
        self.persist()
    }

    fn delete(&mut self, id: u64) -> Result<bool> {
        let before = self.doc.articles.len();
        self.doc.articles.retain(|a| a.id != id);
        if self.doc.articles.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::ArticleDraft;
    use chrono::Utc;
    use std::env;

    fn article(title: &str) -> Article {
        Article::from_draft(
            ArticleDraft {
                title: title.to_string(),
                summary: "Resumo".to_string(),
                body: "Corpo".to_string(),
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let temp_path = env::temp_dir().join("noticias_test_store_missing.json");
        let _ = std::fs::remove_file(&temp_path);

        let store = JsonFileStore::open(&temp_path).unwrap();
        assert!(store.all().unwrap().is_empty());
        // Opening alone never creates the file
        assert!(!temp_path.exists());
    }

    #[test]
    fn test_save_and_reopen_roundtrip() {
        let temp_path = env::temp_dir().join("noticias_test_store_roundtrip.json");
        let _ = std::fs::remove_file(&temp_path);

        let mut store = JsonFileStore::open(&temp_path).unwrap();
        let mut first = article("Primeira");
        let mut second = article("Segunda");
        store.save(&mut first).unwrap();
        store.save(&mut second).unwrap();
        second.relevance_score = 7.5;
        second.featured = true;
        store.save(&mut second).unwrap();

        let reopened = JsonFileStore::open(&temp_path).unwrap();
        let articles = reopened.all().unwrap();
        assert_eq!(articles.len(), 2);
        let loaded = reopened.get(second.id).unwrap().unwrap();
        assert_eq!(loaded, second);

        // Ids keep counting after reopening
        let mut reopened = reopened;
        let mut third = article("Terceira");
        reopened.save(&mut third).unwrap();
        assert_eq!(third.id, 3);

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_delete_persists() {
        let temp_path = env::temp_dir().join("noticias_test_store_delete.json");
        let _ = std::fs::remove_file(&temp_path);

        let mut store = JsonFileStore::open(&temp_path).unwrap();
        let mut a = article("Apagar");
        store.save(&mut a).unwrap();
        assert!(store.delete(a.id).unwrap());
        assert!(!store.delete(a.id).unwrap());

        let reopened = JsonFileStore::open(&temp_path).unwrap();
        assert!(reopened.all().unwrap().is_empty());

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_unsupported_version_rejected() {
        let temp_path = env::temp_dir().join("noticias_test_store_version.json");
        std::fs::write(&temp_path, r#"{"version": 2, "next_id": 0, "articles": []}"#).unwrap();

        let result = JsonFileStore::open(&temp_path);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("version"));

        let _ = std::fs::remove_file(&temp_path);
    }
}
