//! # Segment
//!
//! A directed straight piece of outline from `start` to `end`.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::GeometryResult;
use super::id::{Identified, Identity};
use super::point::Point;
use super::vector::Vector;

/// Directed pair of points
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Segment {
    identity: Identity,
    start: Point,
    end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point, name: impl Into<String>) -> Self {
        Self {
            identity: Identity::new(name),
            start,
            end,
        }
    }

    /// Unnamed segment between two points
    pub fn between(start: Point, end: Point) -> Self {
        Self::new(start, end, String::new())
    }

    pub fn start(&self) -> &Point {
        &self.start
    }

    pub fn end(&self) -> &Point {
        &self.end
    }

    pub fn set_start(&mut self, start: Point) {
        self.start = start;
    }

    pub fn set_end(&mut self, end: Point) {
        self.end = end;
    }

    /// `end - start`
    pub fn direction_vector(&self) -> GeometryResult<Vector> {
        self.end.subtract(&self.start)
    }

    /// Point halfway along the segment
    pub fn midpoint(&self) -> GeometryResult<Point> {
        self.start.translate(&self.direction_vector()?.divide(2.0))
    }

    pub fn length(&self) -> GeometryResult<f64> {
        Ok(self.direction_vector()?.norm())
    }

    /// Structurally equal copy with new uids throughout
    pub fn duplicate(&self) -> Self {
        Self {
            identity: self.identity.fresh_copy(),
            start: self.start.duplicate(),
            end: self.end.duplicate(),
        }
    }
}

impl Default for Segment {
    fn default() -> Self {
        Self::between(Point::origin(), Point::origin())
    }
}

impl Identified for Segment {
    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn identity_mut(&mut self) -> &mut Identity {
        &mut self.identity
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}--{}", self.name(), self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GeometryError;

    #[test]
    fn test_display() {
        let p1 = Point::new(Vector::new(vec![1.0, 2.0, 3.0], "vector1Example"), "point1Ex");
        let p2 = Point::new(Vector::new(vec![2.0, 4.0, 6.0], "vector2Example"), "point2Ex");
        let s = Segment::new(p1, p2, "segmentExample");
        assert_eq!(
            s.to_string(),
            "segmentExample:point1Ex[1.0, 2.0, 3.0]--point2Ex[2.0, 4.0, 6.0]"
        );
    }

    #[test]
    fn test_direction_vector() {
        let s = Segment::between(Point::at([1.0, 2.0, 3.0]), Point::at([2.0, 4.0, 7.0]));
        assert_eq!(s.direction_vector().unwrap().coordinates(), &[1.0, 2.0, 4.0]);
    }

    #[test]
    fn test_midpoint() {
        let s = Segment::between(Point::at([1.0, 2.0, 3.0]), Point::at([3.0, 4.0, 5.0]));
        let mid = s.midpoint().unwrap();
        assert_eq!(mid.position(), Point::at([2.0, 3.0, 4.0]).position());
    }

    #[test]
    fn test_length() {
        let s = Segment::between(Point::at([0.0, 0.0]), Point::at([3.0, 4.0]));
        assert_eq!(s.length().unwrap(), 5.0);
    }

    #[test]
    fn test_default_is_degenerate() {
        let s = Segment::default();
        assert_eq!(s.direction_vector().unwrap().dimension(), 0);
        assert_eq!(s.to_string(), ":[]--[]");
    }

    #[test]
    fn test_mixed_dimensions_fail() {
        let s = Segment::between(Point::at([0.0, 0.0]), Point::at([1.0, 1.0, 1.0]));
        assert!(matches!(
            s.direction_vector(),
            Err(GeometryError::DimensionMismatch { .. })
        ));
    }
}
