//! Shared configuration for Depot.
//!
//! This crate provides the layered application configuration used by the
//! server binary: file-based defaults, per-environment overrides, and
//! `DEPOT`-prefixed environment variables.

pub mod config;

pub use config::AppConfig;
