//! Core upload logic for Depot.
//!
//! This crate contains the storage domain with ZERO web dependencies:
//! the object-store contract, its S3 and in-memory backends, and the
//! upload service that owns the bucket lifecycle.

pub mod storage;
