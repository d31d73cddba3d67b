use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// A user's review of a book. `book_id` and `user_id` are weak references;
/// they may dangle after the target is deleted and callers treat a dangling
/// reference as not-found.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: u32,
    pub book_id: u32,
    pub user_id: u32,
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Insert model: id and creation timestamp are assigned by the store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub book_id: u32,
    pub user_id: u32,
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
}

impl NewReview {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_rating(self.rating)?;
        validate_content(&self.content)
    }

    pub fn into_review(self, id: u32, created_at: DateTime<Utc>) -> Review {
        Review {
            id,
            book_id: self.book_id,
            user_id: self.user_id,
            rating: self.rating,
            title: self.title,
            content: self.content,
            created_at,
        }
    }
}

/// Partial update with merge semantics: `None` retains the prior value.
/// Id, book/user references and the creation timestamp cannot be patched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReviewPatch {
    pub rating: Option<u8>,
    pub title: Option<String>,
    pub content: Option<String>,
}

impl ReviewPatch {
    pub fn validate(&self) -> Result<(), ModelError> {
        if let Some(rating) = self.rating {
            validate_rating(rating)?;
        }
        if let Some(content) = &self.content {
            validate_content(content)?;
        }
        Ok(())
    }

    pub fn apply(self, review: &mut Review) {
        if let Some(rating) = self.rating {
            review.rating = rating;
        }
        if let Some(title) = self.title {
            review.title = Some(title);
        }
        if let Some(content) = self.content {
            review.content = content;
        }
    }
}

fn validate_rating(rating: u8) -> Result<(), ModelError> {
    if !(1..=5).contains(&rating) {
        return Err(ModelError::Validation(
            "rating must be between 1 and 5".into(),
        ));
    }
    Ok(())
}

fn validate_content(content: &str) -> Result<(), ModelError> {
    if content.chars().count() < 10 {
        return Err(ModelError::Validation(
            "review content must be at least 10 characters".into(),
        ));
    }
    Ok(())
}
