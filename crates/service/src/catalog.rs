//! Caller-side operations over a `RecordStore`.
//!
//! The store persists whatever it is handed; this module is the stage in
//! front of it: field validation, username uniqueness, and ownership checks.
//! Not-found and forbidden outcomes surface as typed errors here, since the
//! plain `Option` results of the store are no longer enough for a caller
//! deciding between 403 and 404.

use models::{Book, BookPatch, NewBook, NewReview, NewUser, Review, User};

use crate::errors::ServiceError;
use crate::store::RecordStore;

/// Register a new account. Usernames are unique across the collection.
pub async fn register_user(store: &dyn RecordStore, new: NewUser) -> Result<User, ServiceError> {
    new.validate()?;
    if store.get_user_by_username(&new.username).await.is_some() {
        return Err(ServiceError::Validation("username already exists".into()));
    }
    store.create_user(new).await
}

/// Add a book to the catalog on behalf of `requester`.
pub async fn add_book(
    store: &dyn RecordStore,
    requester: u32,
    mut new: NewBook,
) -> Result<Book, ServiceError> {
    new.validate()?;
    new.added_by = Some(requester);
    store.create_book(new).await
}

/// Update a book. Only the user who added it may change it; books without a
/// recorded creator are open to edits.
pub async fn edit_book(
    store: &dyn RecordStore,
    requester: u32,
    id: u32,
    patch: BookPatch,
) -> Result<Book, ServiceError> {
    patch.validate()?;
    let book = store.get_book(id).await.ok_or_else(|| ServiceError::not_found("book"))?;
    if matches!(book.added_by, Some(owner) if owner != requester) {
        return Err(ServiceError::forbidden("update this book"));
    }
    store
        .update_book(id, patch)
        .await?
        .ok_or_else(|| ServiceError::not_found("book"))
}

/// Delete a book (and, via the store, its reviews). Same ownership rule as
/// `edit_book`.
pub async fn remove_book(store: &dyn RecordStore, requester: u32, id: u32) -> Result<(), ServiceError> {
    let book = store.get_book(id).await.ok_or_else(|| ServiceError::not_found("book"))?;
    if matches!(book.added_by, Some(owner) if owner != requester) {
        return Err(ServiceError::forbidden("delete this book"));
    }
    if !store.delete_book(id).await? {
        return Err(ServiceError::not_found("book"));
    }
    Ok(())
}

/// Review a book as `requester`. The book must exist at submission time.
pub async fn add_review(
    store: &dyn RecordStore,
    requester: u32,
    book_id: u32,
    rating: u8,
    title: Option<String>,
    content: String,
) -> Result<Review, ServiceError> {
    if store.get_book(book_id).await.is_none() {
        return Err(ServiceError::not_found("book"));
    }
    let new = NewReview { book_id, user_id: requester, rating, title, content };
    new.validate()?;
    store.create_review(new).await
}

/// Update a review; author-only.
pub async fn edit_review(
    store: &dyn RecordStore,
    requester: u32,
    id: u32,
    patch: models::ReviewPatch,
) -> Result<Review, ServiceError> {
    patch.validate()?;
    let review = store.get_review(id).await.ok_or_else(|| ServiceError::not_found("review"))?;
    if review.user_id != requester {
        return Err(ServiceError::forbidden("update this review"));
    }
    store
        .update_review(id, patch)
        .await?
        .ok_or_else(|| ServiceError::not_found("review"))
}

/// Delete a review; author-only.
pub async fn remove_review(store: &dyn RecordStore, requester: u32, id: u32) -> Result<(), ServiceError> {
    let review = store.get_review(id).await.ok_or_else(|| ServiceError::not_found("review"))?;
    if review.user_id != requester {
        return Err(ServiceError::forbidden("delete this review"));
    }
    if !store.delete_review(id).await? {
        return Err(ServiceError::not_found("review"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemStorage;
    use models::ReviewPatch;

    fn user(name: &str) -> NewUser {
        NewUser {
            username: name.into(),
            password: "secret1".into(),
            full_name: None,
            email: None,
        }
    }

    fn book(title: &str) -> NewBook {
        NewBook {
            title: title.into(),
            author: "Someone".into(),
            isbn: None,
            description: None,
            publication_year: None,
            added_by: None,
        }
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() -> Result<(), anyhow::Error> {
        let store = MemStorage::new();
        register_user(&store, user("alice")).await?;
        let err = register_user(&store, user("alice")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        Ok(())
    }

    #[tokio::test]
    async fn add_book_stamps_the_requester() -> Result<(), anyhow::Error> {
        let store = MemStorage::new();
        let b = add_book(&store, 7, book("Clean Code")).await?;
        assert_eq!(b.added_by, Some(7));
        Ok(())
    }

    #[tokio::test]
    async fn only_the_creator_may_edit_a_book() -> Result<(), anyhow::Error> {
        let store = MemStorage::new();
        let b = add_book(&store, 1, book("Clean Code")).await?;

        let err = edit_book(&store, 2, b.id, BookPatch::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));

        let ok = edit_book(
            &store,
            1,
            b.id,
            BookPatch { title: Some("Clean Code, 2nd ed.".into()), ..Default::default() },
        )
        .await?;
        assert_eq!(ok.title, "Clean Code, 2nd ed.");
        Ok(())
    }

    #[tokio::test]
    async fn editing_a_missing_book_is_not_found() {
        let store = MemStorage::new();
        let err = edit_book(&store, 1, 99, BookPatch::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn review_requires_an_existing_book() {
        let store = MemStorage::new();
        let err = add_review(&store, 1, 42, 5, None, "A review of nothing at all".into())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn review_validation_happens_before_insert() -> Result<(), anyhow::Error> {
        let store = MemStorage::new();
        let b = add_book(&store, 1, book("Clean Code")).await?;

        let err = add_review(&store, 1, b.id, 6, None, "Rating is out of range here".into())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Model(_)));

        let err = add_review(&store, 1, b.id, 4, None, "short".into()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Model(_)));

        assert!(store.reviews_by_book(b.id).await.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn reviews_are_author_only() -> Result<(), anyhow::Error> {
        let store = MemStorage::new();
        let b = add_book(&store, 1, book("Clean Code")).await?;
        let r = add_review(&store, 1, b.id, 5, None, "Essential reading for developers".into())
            .await?;

        let err = edit_review(&store, 2, r.id, ReviewPatch::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
        let err = remove_review(&store, 2, r.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));

        remove_review(&store, 1, r.id).await?;
        assert!(store.get_review(r.id).await.is_none());
        Ok(())
    }
}
