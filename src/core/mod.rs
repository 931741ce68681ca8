//! # Core Domain
//!
//! Pure math, no I/O. The foundation of geomspace.
//!
//! This module contains the fundamental types and operations:
//! - `Identity` / `Uid` - Unique identifier and name of every object
//! - `Vector` - Ordered real coordinates and their algebra
//! - `Point` - A position, wrapping a Vector
//! - `Segment` - Directed pair of points
//! - `Contour` - Ordered chain of segments with closure/coplanarity checks
//! - `Entity` - The closed set of objects a workspace holds
//! - `Similarity` - Trait for scoring name likeness
//!
//! ## Design Principles
//!
//! - All functions are pure (deterministic apart from uid allocation)
//! - No I/O operations
//! - Fully testable in isolation

mod id;
mod vector;
mod point;
mod segment;
mod contour;
mod entity;
mod error;
pub mod similarity;
pub mod config;

// Re-exports
pub use id::{Identified, Identity, Uid};
pub use vector::Vector;
pub use point::Point;
pub use segment::Segment;
pub use contour::{parallelogram, Contour, DEFAULT_TOLERANCE};
pub use entity::{Entity, Label};
pub use error::{GeometryError, GeometryResult};
pub use config::SessionConfig;
