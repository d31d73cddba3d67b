//! Entity definitions shared by the record store and its callers.
//! - Serialized field names match the legacy `data/*.json` layout (camelCase,
//!   ISO-8601 timestamps), so existing files load without migration.
//! - Field validation lives here; the store itself persists whatever
//!   well-typed record it is handed.

pub mod errors;
pub mod book;
pub mod review;
pub mod user;

pub use book::{Book, BookPatch, NewBook};
pub use errors::ModelError;
pub use review::{NewReview, Review, ReviewPatch};
pub use user::{NewUser, User};
