//! Object storage for uploaded files.
//!
//! The [`ObjectStore`] trait narrows the S3 API down to the three calls the
//! upload path needs: probe a bucket, create it, write one object. Two
//! backends implement it:
//!
//! - [`S3ObjectStore`] for any S3-compatible endpoint (MinIO, AWS S3, R2)
//! - [`MemoryObjectStore`] for tests and throwaway local development
//!
//! # Architecture
//!
//! ```text
//! HTTP handler ──► StorageService ──► ObjectStore (trait)
//!                                       ├── S3ObjectStore
//!                                       └── MemoryObjectStore
//! ```

mod config;
mod error;
mod memory;
mod s3;
mod service;
mod store;

pub use config::StorageConfig;
pub use error::StorageError;
pub use memory::{MemoryObjectStore, StoredObject};
pub use s3::S3ObjectStore;
pub use service::{StorageService, UploadRequest};
pub use store::{DynObjectStore, ObjectStore};
