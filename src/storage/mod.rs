//! Storage layer for lapwatch.
//!
//! Session history is persisted as a single serialized blob under a string
//! key. This module provides the blob store contract and its backends:
//! - `SqliteBlobStore`: a key/value table in the local SQLite database
//! - `MemoryBlobStore`: a process-local map for tests and ephemeral runs

mod blob;
mod database;
mod migrations;

pub use blob::{BlobStore, MemoryBlobStore, SqliteBlobStore};
pub use database::Database;
