//! # Point
//!
//! A position in space, expressed as a Vector from the origin of the single
//! implicit reference frame.
//!
//! The Point owns its position. Every operation returns a freshly built
//! Point or Vector, never an alias into this one.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::GeometryResult;
use super::id::{Identified, Identity};
use super::vector::{write_coordinates, Vector};

/// A named point in dimensional space
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Point {
    identity: Identity,
    position: Vector,
}

impl Point {
    /// Create a point at the given position
    ///
    /// # Example
    /// ```
    /// use geomspace::{Point, Vector};
    /// let p = Point::new(Vector::from(vec![1.0, 2.0, 3.0]), "p");
    /// assert_eq!(p.to_string(), "p[1.0, 2.0, 3.0]");
    /// ```
    pub fn new(position: Vector, name: impl Into<String>) -> Self {
        Self {
            identity: Identity::new(name),
            position,
        }
    }

    /// Unnamed point at the given coordinates
    pub fn at(coords: impl Into<Vector>) -> Self {
        Self::new(coords.into(), String::new())
    }

    /// Unnamed point with a zero-length position
    pub fn origin() -> Self {
        Self::at(Vector::default())
    }

    pub fn position(&self) -> &Vector {
        &self.position
    }

    /// Replace the position wholesale
    pub fn set_position(&mut self, position: Vector) {
        self.position = position;
    }

    /// New point moved by `offset`
    pub fn translate(&self, offset: &Vector) -> GeometryResult<Point> {
        Ok(Point::at(self.position.add(offset)?))
    }

    /// Vector from `other` to `self`
    pub fn subtract(&self, other: &Point) -> GeometryResult<Vector> {
        self.position.subtract(&other.position)
    }

    /// Positions within `tolerance` of each other
    pub fn approx_eq(&self, other: &Point, tolerance: f64) -> bool {
        self.position.approx_eq(&other.position, tolerance)
    }

    /// Structurally equal copy with a new uid
    pub fn duplicate(&self) -> Self {
        Self {
            identity: self.identity.fresh_copy(),
            position: self.position.duplicate(),
        }
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::origin()
    }
}

impl Identified for Point {
    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn identity_mut(&mut self) -> &mut Identity {
        &mut self.identity
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())?;
        write_coordinates(f, self.position.coordinates())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GeometryError;

    #[test]
    fn test_display_skips_position_name() {
        let p = Point::new(Vector::new(vec![1.0, 2.0, 3.0], "vectorExample"), "pointExample");
        assert_eq!(p.to_string(), "pointExample[1.0, 2.0, 3.0]");
    }

    #[test]
    fn test_origin() {
        let p = Point::default();
        assert_eq!(p.position().dimension(), 0);
        assert_eq!(p.name(), "");
    }

    #[test]
    fn test_translate() {
        let p1 = Point::at([1.0, 2.0, 3.0]);
        let p2 = Point::at([3.0, 4.0, 5.0]);
        let p3 = p1.translate(&Vector::from([2.0, 2.0, 2.0])).unwrap();
        assert_eq!(p3.position(), p2.position());
        assert!(!p3.is_same(&p1));
        assert!(matches!(
            p1.translate(&Vector::from([1.0])),
            Err(GeometryError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_subtract() {
        let p1 = Point::at([1.0, 2.0, 3.0]);
        let p2 = Point::at([3.0, 4.0, 5.0]);
        let v = p2.subtract(&p1).unwrap();
        assert_eq!(v.coordinates(), &[2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_set_position() {
        let mut p = Point::at([1.0, 1.0]);
        let uid = p.uid();
        p.set_position(Vector::from([5.0, 6.0]));
        assert_eq!(p.position().coordinates(), &[5.0, 6.0]);
        assert_eq!(p.uid(), uid);
    }

    #[test]
    fn test_translate_leaves_source_untouched() {
        let p = Point::at([0.0, 0.0]);
        let _moved = p.translate(&Vector::from([1.0, 1.0])).unwrap();
        assert_eq!(p.position().coordinates(), &[0.0, 0.0]);
    }
}
