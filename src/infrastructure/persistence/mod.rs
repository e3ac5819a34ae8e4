//! Concrete [`MappingStore`](crate::domain::repositories::MappingStore)
//! implementations.
//!
//! # Backends
//!
//! - [`MemoryStore`] - guarded in-process table, the default
//! - [`FileStore`] - in-process table with an append-only JSON-lines journal
//! - [`PgStore`] - PostgreSQL via SQLx

pub mod file;
pub mod memory;
pub mod postgres;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use postgres::PgStore;
