//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; concrete backends live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit tests.

pub mod mapping_store;

pub use mapping_store::{MappingStore, StoreError};

#[cfg(test)]
pub use mapping_store::MockMappingStore;
