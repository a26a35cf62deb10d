//! CDA data element types
//!
//! This crate defines the leaf data elements of the assembly engine:
//! - Null flavors (standardized reasons for absent values)
//! - Instance and template identifiers
//! - Coded concepts with deterministic null-flavor fallback
//! - Temporal values (instants, intervals, periodic and event-related timing)
//! - Physical quantities and ratios with UCUM unit checking

pub mod concept;
pub mod identifier;
pub mod null_flavor;
pub mod quantity;
pub mod time;

pub use concept::*;
pub use identifier::*;
pub use null_flavor::*;
pub use quantity::*;
pub use time::*;
