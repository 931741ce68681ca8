//! # geomspace
//!
//! Geometric primitives and a persistent, searchable workspace.
//!
//! ## Overview
//!
//! Vectors, points, segments and contours carry a unique uid and a free
//! display name. A `Session` collects any of them in an ordered workspace,
//! finds them by uid or by approximate name, and saves or restores the
//! whole workspace as a single versioned file.
//!
//! ## Key Features
//!
//! - **Checked algebra**: dimension mismatches are errors, never panics
//! - **Contour checks**: closure and coplanarity with a tolerance
//! - **Fuzzy lookup**: every tied best match above a threshold
//! - **Atomic saves**: temp file then rename, nothing half-written
//!
//! ## Usage
//!
//! ```rust
//! use geomspace::{parallelogram, Lookup, Point, Session, Vector};
//!
//! let square = parallelogram(
//!     &Point::at([0.0, 0.0, 0.0]),
//!     &Vector::from([1.0, 0.0, 0.0]),
//!     &Vector::from([0.0, 1.0, 0.0]),
//!     "base plate",
//! ).unwrap();
//! assert!(square.is_closed() && square.is_coplanar());
//!
//! let mut session = Session::new();
//! session.append(square).unwrap();
//! assert_eq!(session.search_by_name("base plat").len(), 1);
//! ```

pub mod core;
pub mod ports;
pub mod adapters;

// Re-exports for convenience
pub use self::core::{
    parallelogram, Contour, Entity, GeometryError, GeometryResult, Identified, Identity, Label,
    Point, Segment, SessionConfig, Uid, Vector,
};
pub use self::ports::{Found, Lookup};
pub use self::adapters::session::{Header, HeaderValue, Session, SessionError, SessionResult};
