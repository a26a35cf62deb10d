//! Common test utilities for document assembly testing
//!
//! Shared infrastructure: mock collaborators (terminology, narrative
//! rendering) and fixture builders for complete documents.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
