//! # Ports
//!
//! Trait definitions shared across layers. Contracts only.
//!
//! - `Lookup` defines WHAT a searchable collection offers
//! - `Contour` and `Session` define WHICH members it searches
//!
//! The search policy lives here once, so both collections agree on result
//! ordering, tie handling and what "not found" looks like.

mod lookup;

pub use lookup::{Found, Lookup};
