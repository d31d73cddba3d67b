use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Catalog entry. `added_by` is a weak reference to the creating user's id;
/// it is not enforced as a foreign key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: u32,
    pub title: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_by: Option<u32>,
    pub created_at: DateTime<Utc>,
}

/// Insert model: id and creation timestamp are assigned by the store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    pub title: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_by: Option<u32>,
}

impl NewBook {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.title.trim().is_empty() {
            return Err(ModelError::Validation("title is required".into()));
        }
        if self.author.trim().is_empty() {
            return Err(ModelError::Validation("author is required".into()));
        }
        Ok(())
    }

    pub fn into_book(self, id: u32, created_at: DateTime<Utc>) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            isbn: self.isbn,
            description: self.description,
            publication_year: self.publication_year,
            added_by: self.added_by,
            created_at,
        }
    }
}

/// Partial update with merge semantics: `None` retains the prior value.
/// Neither the id nor the creation timestamp can be patched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub description: Option<String>,
    pub publication_year: Option<i32>,
}

impl BookPatch {
    pub fn validate(&self) -> Result<(), ModelError> {
        if matches!(&self.title, Some(t) if t.trim().is_empty()) {
            return Err(ModelError::Validation("title is required".into()));
        }
        if matches!(&self.author, Some(a) if a.trim().is_empty()) {
            return Err(ModelError::Validation("author is required".into()));
        }
        Ok(())
    }

    pub fn apply(self, book: &mut Book) {
        if let Some(title) = self.title {
            book.title = title;
        }
        if let Some(author) = self.author {
            book.author = author;
        }
        if let Some(isbn) = self.isbn {
            book.isbn = Some(isbn);
        }
        if let Some(description) = self.description {
            book.description = Some(description);
        }
        if let Some(year) = self.publication_year {
            book.publication_year = Some(year);
        }
    }
}
