//! Storage primitives for the record store
//!
//! Contains the reusable file-backed collection that every entity store is
//! built on.

pub mod json_array_store;

pub use json_array_store::{JsonArrayStore, Record};
