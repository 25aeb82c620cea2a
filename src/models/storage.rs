use crate::models::book::Book;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Whole-collection persistence. Every call reads or replaces the full
/// sequence of books; there is no partial update.
#[async_trait]
pub trait BookStore {
    async fn load(&self) -> Result<Vec<Book>, StorageError>;
    async fn save(&self, books: &[Book]) -> Result<(), StorageError>;
    async fn test_connection(&self) -> Result<(), StorageError>;
}

/// Stores the collection as one pretty-printed JSON array.
///
/// Writes go straight to the target path without a temp file, so a crash
/// mid-write can leave a truncated document behind.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates parent directories and seeds an empty collection when the
    /// document does not exist yet.
    pub async fn ensure_exists(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        if !tokio::fs::try_exists(&self.path).await? {
            info!("Seeding empty book collection at {}", self.path.display());
            tokio::fs::write(&self.path, "[]").await?;
        }

        Ok(())
    }
}

#[async_trait]
impl BookStore for JsonFileStore {
    async fn load(&self) -> Result<Vec<Book>, StorageError> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        let books: Vec<Book> = serde_json::from_str(&raw)?;
        Ok(books)
    }

    async fn save(&self, books: &[Book]) -> Result<(), StorageError> {
        let raw = serde_json::to_string_pretty(books)?;
        tokio::fs::write(&self.path, raw).await?;
        Ok(())
    }

    async fn test_connection(&self) -> Result<(), StorageError> {
        self.load().await.map(|_| ())
    }
}

/// In-process store used by tests and benchmarks.
#[derive(Default)]
pub struct MemoryStore {
    books: Mutex<Vec<Book>>,
    failing: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: Mutex::new(books),
            failing: false,
        }
    }

    /// A store whose every call fails, for exercising error paths.
    pub fn failing() -> Self {
        Self {
            books: Mutex::new(Vec::new()),
            failing: true,
        }
    }

    fn guard(&self) -> Result<std::sync::MutexGuard<'_, Vec<Book>>, StorageError> {
        if self.failing {
            return Err(StorageError::Unavailable("memory store is failing".to_string()));
        }
        self.books
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn load(&self) -> Result<Vec<Book>, StorageError> {
        Ok(self.guard()?.clone())
    }

    async fn save(&self, books: &[Book]) -> Result<(), StorageError> {
        *self.guard()? = books.to_vec();
        Ok(())
    }

    async fn test_connection(&self) -> Result<(), StorageError> {
        self.guard().map(|_| ())
    }
}
