//! Local media storage
//!
//! A flat, key-addressed byte store backing the upload and download
//! endpoints.

mod media_store;

pub use media_store::{MediaStore, StorageError};
