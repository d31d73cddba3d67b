//! Record store for the book-review catalog.
//! - `storage` holds the generic JSON-file collection primitive.
//! - `store` exposes the medium-agnostic `RecordStore` trait with file-backed
//!   and in-memory implementations.
//! - `catalog` is the caller-side stage: field validation, uniqueness and
//!   ownership checks, before anything reaches the store.

pub mod catalog;
pub mod errors;
pub mod seed;
pub mod storage;
pub mod store;

pub use errors::ServiceError;
pub use store::file::FileStorage;
pub use store::memory::MemStorage;
pub use store::RecordStore;
