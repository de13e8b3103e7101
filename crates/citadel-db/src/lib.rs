//! Storage layer for the Citadel simulation.
//!
//! The engine processes one request at a time against one active save, so
//! storage is synchronous. Every turn, resolution and acknowledgement runs
//! inside [`GameStore::transaction`]: either all of its writes land or none
//! do.
//!
//! # Architecture
//!
//! ```text
//! Turn / resolution / acknowledgement
//!     |
//!     +-- transaction(|store| ...) --> GameStore
//!                                        |
//!                                        +-- MemoryStore (records in memory)
//!                                              |
//!                                              +-- persist() --> save file (JSON)
//!                                              +-- load()    <-- save file (JSON)
//! ```
//!
//! # Modules
//!
//! - [`store`] -- The [`GameStore`] trait
//! - [`memory`] -- In-memory implementation with JSON save files
//! - [`error`] -- Shared error types

pub mod error;
pub mod memory;
pub mod store;

// Re-export primary types for convenience.
pub use error::StoreError;
pub use memory::{MemoryStore, STORE_FORMAT_VERSION};
pub use store::GameStore;
