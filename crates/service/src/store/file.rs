use async_trait::async_trait;
use chrono::Utc;

use configs::StorageConfig;
use models::{Book, BookPatch, NewBook, NewReview, NewUser, Review, ReviewPatch, User};

use crate::errors::ServiceError;
use crate::storage::JsonArrayStore;
use crate::store::{contains_ci, matches_query, RecordStore};

/// File-backed record store: one JSON array file per collection under the
/// configured data directory. Each collection serializes its mutations
/// through its own write lock, held across the file rewrite.
#[derive(Clone)]
pub struct FileStorage {
    users: JsonArrayStore<User>,
    books: JsonArrayStore<Book>,
    reviews: JsonArrayStore<Review>,
}

impl FileStorage {
    /// Open (or create) the three collection files.
    pub async fn new(cfg: &StorageConfig) -> Result<Self, ServiceError> {
        Ok(Self {
            users: JsonArrayStore::new(cfg.users_path()).await?,
            books: JsonArrayStore::new(cfg.books_path()).await?,
            reviews: JsonArrayStore::new(cfg.reviews_path()).await?,
        })
    }
}

#[async_trait]
impl RecordStore for FileStorage {
    async fn get_user(&self, id: u32) -> Option<User> {
        self.users.get(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.users.find_one(|u| u.username == username).await
    }

    async fn create_user(&self, new: NewUser) -> Result<User, ServiceError> {
        self.users.insert_with(|id| new.into_user(id)).await
    }

    async fn list_books(&self) -> Vec<Book> {
        self.books.list().await
    }

    async fn get_book(&self, id: u32) -> Option<Book> {
        self.books.get(id).await
    }

    async fn books_by_title(&self, title: &str) -> Vec<Book> {
        self.books.find(|b| contains_ci(&b.title, title)).await
    }

    async fn books_by_author(&self, author: &str) -> Vec<Book> {
        self.books.find(|b| contains_ci(&b.author, author)).await
    }

    async fn book_by_isbn(&self, isbn: &str) -> Option<Book> {
        self.books.find_one(|b| b.isbn.as_deref() == Some(isbn)).await
    }

    async fn search_books(&self, query: &str) -> Vec<Book> {
        self.books.find(|b| matches_query(b, query)).await
    }

    async fn create_book(&self, new: NewBook) -> Result<Book, ServiceError> {
        let now = Utc::now();
        self.books.insert_with(|id| new.into_book(id, now)).await
    }

    async fn update_book(&self, id: u32, patch: BookPatch) -> Result<Option<Book>, ServiceError> {
        self.books.update_with(id, |b| patch.apply(b)).await
    }

    /// Cascade delete: reviews referencing the book are filtered out before
    /// the book removal commits, so a write failure leaves no window where
    /// the book is gone but orphaned reviews remain. A failure between the
    /// two rewrites surfaces as `Persistence` so the caller can detect it.
    async fn delete_book(&self, id: u32) -> Result<bool, ServiceError> {
        if self.books.get(id).await.is_none() {
            return Ok(false);
        }
        self.reviews.remove_where(|r| r.book_id == id).await?;
        self.books.remove(id).await
    }

    async fn get_review(&self, id: u32) -> Option<Review> {
        self.reviews.get(id).await
    }

    async fn reviews_by_book(&self, book_id: u32) -> Vec<Review> {
        self.reviews.find(|r| r.book_id == book_id).await
    }

    async fn reviews_by_user(&self, user_id: u32) -> Vec<Review> {
        self.reviews.find(|r| r.user_id == user_id).await
    }

    async fn create_review(&self, new: NewReview) -> Result<Review, ServiceError> {
        let now = Utc::now();
        self.reviews.insert_with(|id| new.into_review(id, now)).await
    }

    async fn update_review(
        &self,
        id: u32,
        patch: ReviewPatch,
    ) -> Result<Option<Review>, ServiceError> {
        self.reviews.update_with(id, |r| patch.apply(r)).await
    }

    async fn delete_review(&self, id: u32) -> Result<bool, ServiceError> {
        self.reviews.remove(id).await
    }
}
