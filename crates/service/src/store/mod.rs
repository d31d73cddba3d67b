use async_trait::async_trait;

use models::{Book, BookPatch, NewBook, NewReview, NewUser, Review, ReviewPatch, User};

use crate::errors::ServiceError;
use crate::storage::Record;

pub mod file;
pub mod memory;

impl Record for User {
    fn id(&self) -> u32 {
        self.id
    }
}

impl Record for Book {
    fn id(&self) -> u32 {
        self.id
    }
}

impl Record for Review {
    fn id(&self) -> u32 {
        self.id
    }
}

/// Medium-agnostic contract for the three collections.
/// Implementations can be file-backed or in-memory; callers see the same
/// behavior either way, including id assignment and cascade deletes.
/// Absent lookups are `None`, not errors; only persistence failures error.
///
/// The store performs no field validation — that is the caller's stage (see
/// `catalog`). Deleting a book also deletes every review referencing it.
#[async_trait]
pub trait RecordStore: Send + Sync {
    // users
    async fn get_user(&self, id: u32) -> Option<User>;
    async fn get_user_by_username(&self, username: &str) -> Option<User>;
    async fn create_user(&self, new: NewUser) -> Result<User, ServiceError>;

    // books
    async fn list_books(&self) -> Vec<Book>;
    async fn get_book(&self, id: u32) -> Option<Book>;
    async fn books_by_title(&self, title: &str) -> Vec<Book>;
    async fn books_by_author(&self, author: &str) -> Vec<Book>;
    async fn book_by_isbn(&self, isbn: &str) -> Option<Book>;
    async fn search_books(&self, query: &str) -> Vec<Book>;
    async fn create_book(&self, new: NewBook) -> Result<Book, ServiceError>;
    async fn update_book(&self, id: u32, patch: BookPatch) -> Result<Option<Book>, ServiceError>;
    async fn delete_book(&self, id: u32) -> Result<bool, ServiceError>;

    // reviews
    async fn get_review(&self, id: u32) -> Option<Review>;
    async fn reviews_by_book(&self, book_id: u32) -> Vec<Review>;
    async fn reviews_by_user(&self, user_id: u32) -> Vec<Review>;
    async fn create_review(&self, new: NewReview) -> Result<Review, ServiceError>;
    async fn update_review(
        &self,
        id: u32,
        patch: ReviewPatch,
    ) -> Result<Option<Review>, ServiceError>;
    async fn delete_review(&self, id: u32) -> Result<bool, ServiceError>;
}

/// Case-insensitive substring containment, shared by both implementations.
pub(crate) fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Combined search over title, author and description.
pub(crate) fn matches_query(book: &Book, query: &str) -> bool {
    contains_ci(&book.title, query)
        || contains_ci(&book.author, query)
        || book
            .description
            .as_deref()
            .map(|d| contains_ci(d, query))
            .unwrap_or(false)
}
