use crate::models::book::{normalize_title, Book, CreateBookRequest};
use crate::models::errors::{ApiError, Operation};
use crate::models::storage::BookStore;
use crate::services::validation::{parse_book_id, validate_new_book};
use crate::utils::time::current_year;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

pub type Store = Arc<dyn BookStore + Send + Sync>;

/// Book operations over a whole-collection store.
///
/// Mutations hold the write side of `lock` for the full load/modify/save
/// cycle, so two concurrent creates or deletes can never overwrite each
/// other's result. Reads hold the read side, so a file store is never read
/// while it is being rewritten.
pub struct Catalog {
    store: Store,
    lock: RwLock<()>,
}

impl Catalog {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            lock: RwLock::new(()),
        }
    }

    pub async fn list(&self) -> Result<Vec<Book>, ApiError> {
        let _guard = self.lock.read().await;
        self.store
            .load()
            .await
            .map_err(ApiError::storage(Operation::Read))
    }

    pub async fn get(&self, raw_id: &str) -> Result<Book, ApiError> {
        let id = parse_book_id(raw_id)?;

        let books = self.list().await?;
        books
            .into_iter()
            .find(|book| book.id == id)
            .ok_or(ApiError::NotFound)
    }

    pub async fn create(&self, request: &CreateBookRequest) -> Result<Book, ApiError> {
        let new_book = validate_new_book(request, current_year())?;

        let _guard = self.lock.write().await;
        let mut books = self
            .store
            .load()
            .await
            .map_err(ApiError::storage(Operation::Create))?;

        if let Some(year) = new_book.year {
            let title = normalize_title(&new_book.title);
            let duplicate = books
                .iter()
                .any(|book| book.year == Some(year) && book.normalized_title() == title);
            if duplicate {
                warn!("Rejected duplicate book '{}' ({})", new_book.title, year);
                return Err(ApiError::Conflict);
            }
        }

        let book = Book {
            id: fresh_id(&books),
            title: new_book.title,
            author: new_book.author,
            year: new_book.year,
        };
        books.push(book.clone());

        self.store
            .save(&books)
            .await
            .map_err(ApiError::storage(Operation::Create))?;

        info!("Created book {}", book.id);
        Ok(book)
    }

    pub async fn delete(&self, raw_id: &str) -> Result<(), ApiError> {
        let id = parse_book_id(raw_id)?;

        let _guard = self.lock.write().await;
        let mut books = self
            .store
            .load()
            .await
            .map_err(ApiError::storage(Operation::Delete))?;

        let index = match books.iter().position(|book| book.id == id) {
            Some(index) => index,
            None => {
                warn!("Delete requested for unknown book {}", id);
                return Err(ApiError::NotFound);
            }
        };
        books.remove(index);

        self.store
            .save(&books)
            .await
            .map_err(ApiError::storage(Operation::Delete))?;

        info!("Deleted book {}", id);
        Ok(())
    }
}

fn fresh_id(books: &[Book]) -> Uuid {
    loop {
        let id = Uuid::new_v4();
        if !books.iter().any(|book| book.id == id) {
            return id;
        }
    }
}
