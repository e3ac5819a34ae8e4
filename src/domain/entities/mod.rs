//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic. The single
//! entity of this service is the [`Mapping`] between a short code and its
//! target URL.

pub mod mapping;

pub use mapping::Mapping;
