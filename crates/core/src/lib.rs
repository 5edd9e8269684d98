//! Core domain types and shared configuration for the filecat catalog.
//!
//! This crate defines the data model used by the other crates:
//! - File records, identifiers and creation input
//! - Exact-match find criteria
//! - Configuration for the registry and the HTTP server

pub mod config;
pub mod error;
pub mod file;

pub use error::{Error, Result};
pub use file::{FileFilter, FileId, FileRecord, NewFile, base_name};
