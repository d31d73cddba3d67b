use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use models::{Book, BookPatch, NewBook, NewReview, NewUser, Review, ReviewPatch, User};

use crate::errors::ServiceError;
use crate::storage::Record;
use crate::store::{contains_ci, matches_query, RecordStore};

#[derive(Default)]
struct MemState {
    users: Vec<User>,
    books: Vec<Book>,
    reviews: Vec<Review>,
}

/// In-memory record store with the same contract as `FileStorage`, including
/// the `max + 1` id rule and cascade deletes. All three collections live
/// behind one lock, so the cascade is a single critical section. Intended
/// for tests and ephemeral deployments.
#[derive(Clone, Default)]
pub struct MemStorage {
    inner: Arc<RwLock<MemState>>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn next_id<T: Record>(items: &[T]) -> u32 {
    items.iter().map(|t| t.id()).max().unwrap_or(0) + 1
}

#[async_trait]
impl RecordStore for MemStorage {
    async fn get_user(&self, id: u32) -> Option<User> {
        let state = self.inner.read().await;
        state.users.iter().find(|u| u.id == id).cloned()
    }

    async fn get_user_by_username(&self, username: &str) -> Option<User> {
        let state = self.inner.read().await;
        state.users.iter().find(|u| u.username == username).cloned()
    }

    async fn create_user(&self, new: NewUser) -> Result<User, ServiceError> {
        let mut state = self.inner.write().await;
        let user = new.into_user(next_id(&state.users));
        state.users.push(user.clone());
        Ok(user)
    }

    async fn list_books(&self) -> Vec<Book> {
        self.inner.read().await.books.clone()
    }

    async fn get_book(&self, id: u32) -> Option<Book> {
        let state = self.inner.read().await;
        state.books.iter().find(|b| b.id == id).cloned()
    }

    async fn books_by_title(&self, title: &str) -> Vec<Book> {
        let state = self.inner.read().await;
        state
            .books
            .iter()
            .filter(|b| contains_ci(&b.title, title))
            .cloned()
            .collect()
    }

    async fn books_by_author(&self, author: &str) -> Vec<Book> {
        let state = self.inner.read().await;
        state
            .books
            .iter()
            .filter(|b| contains_ci(&b.author, author))
            .cloned()
            .collect()
    }

    async fn book_by_isbn(&self, isbn: &str) -> Option<Book> {
        let state = self.inner.read().await;
        state
            .books
            .iter()
            .find(|b| b.isbn.as_deref() == Some(isbn))
            .cloned()
    }

    async fn search_books(&self, query: &str) -> Vec<Book> {
        let state = self.inner.read().await;
        state
            .books
            .iter()
            .filter(|b| matches_query(b, query))
            .cloned()
            .collect()
    }

    async fn create_book(&self, new: NewBook) -> Result<Book, ServiceError> {
        let mut state = self.inner.write().await;
        let book = new.into_book(next_id(&state.books), Utc::now());
        state.books.push(book.clone());
        Ok(book)
    }

    async fn update_book(&self, id: u32, patch: BookPatch) -> Result<Option<Book>, ServiceError> {
        let mut state = self.inner.write().await;
        let Some(book) = state.books.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        patch.apply(book);
        Ok(Some(book.clone()))
    }

    async fn delete_book(&self, id: u32) -> Result<bool, ServiceError> {
        let mut state = self.inner.write().await;
        let before = state.books.len();
        state.books.retain(|b| b.id != id);
        if state.books.len() == before {
            return Ok(false);
        }
        state.reviews.retain(|r| r.book_id != id);
        Ok(true)
    }

    async fn get_review(&self, id: u32) -> Option<Review> {
        let state = self.inner.read().await;
        state.reviews.iter().find(|r| r.id == id).cloned()
    }

    async fn reviews_by_book(&self, book_id: u32) -> Vec<Review> {
        let state = self.inner.read().await;
        state
            .reviews
            .iter()
            .filter(|r| r.book_id == book_id)
            .cloned()
            .collect()
    }

    async fn reviews_by_user(&self, user_id: u32) -> Vec<Review> {
        let state = self.inner.read().await;
        state
            .reviews
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect()
    }

    async fn create_review(&self, new: NewReview) -> Result<Review, ServiceError> {
        let mut state = self.inner.write().await;
        let review = new.into_review(next_id(&state.reviews), Utc::now());
        state.reviews.push(review.clone());
        Ok(review)
    }

    async fn update_review(
        &self,
        id: u32,
        patch: ReviewPatch,
    ) -> Result<Option<Review>, ServiceError> {
        let mut state = self.inner.write().await;
        let Some(review) = state.reviews.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        patch.apply(review);
        Ok(Some(review.clone()))
    }

    async fn delete_review(&self, id: u32) -> Result<bool, ServiceError> {
        let mut state = self.inner.write().await;
        let before = state.reviews.len();
        state.reviews.retain(|r| r.id != id);
        Ok(state.reviews.len() != before)
    }
}
