//! # Adapters
//!
//! Code that touches the outside world.
//!
//! - `session` - workspace ownership and file persistence

pub mod session;
