//! # Contour
//!
//! The outline of a shape: an ordered chain of segments.
//!
//! Structural checks:
//! - `is_closed`: every segment ends where the next one starts, wrapping
//!   from the last segment back to the first
//! - `is_coplanar`: every direction vector lies in the plane spanned by the
//!   first two non-parallel directions
//!
//! Both checks compare within the contour's tolerance. Exact inputs give
//! exact answers since the default tolerance is far below any meaningful
//! coordinate difference.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::config::SessionConfig;
use super::error::{GeometryError, GeometryResult};
use super::id::{Identified, Identity, Uid};
use super::point::Point;
use super::segment::Segment;
use super::similarity::{IndelRatio, Similarity, DEFAULT_FUZZY_THRESHOLD};
use super::vector::Vector;
use crate::ports::Lookup;

/// Default comparison tolerance for closure and coplanarity
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Ordered collection of segments
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Contour {
    identity: Identity,
    segments: Vec<Segment>,
    tolerance: f64,
    fuzzy_threshold: u8,
    #[serde(skip, default = "default_similarity")]
    similarity: Arc<dyn Similarity>,
}

fn default_similarity() -> Arc<dyn Similarity> {
    Arc::new(IndelRatio)
}

impl Contour {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            identity: Identity::new(name),
            segments: Vec::new(),
            tolerance: DEFAULT_TOLERANCE,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            similarity: default_similarity(),
        }
    }

    /// Take tolerance and name search policy from a session configuration
    pub fn with_config(self, config: &SessionConfig) -> Self {
        let mut contour = self
            .with_tolerance(config.tolerance)
            .with_fuzzy_threshold(config.fuzzy_threshold);
        contour.similarity = Arc::clone(&config.similarity);
        contour
    }

    /// Set the name search threshold (clamped to 100)
    pub fn with_fuzzy_threshold(mut self, threshold: u8) -> Self {
        self.fuzzy_threshold = threshold.min(100);
        self
    }

    /// Set the comparison tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Add a segment at the end of the chain
    pub fn append(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Remove the segment sharing `segment`'s uid
    pub fn delete(&mut self, segment: &Segment) -> GeometryResult<Segment> {
        self.delete_uid(segment.uid())
    }

    /// Remove the first segment with this uid
    pub fn delete_uid(&mut self, uid: Uid) -> GeometryResult<Segment> {
        let index = self
            .segments
            .iter()
            .position(|s| s.uid() == uid)
            .ok_or(GeometryError::NotFound(uid))?;
        Ok(self.segments.remove(index))
    }

    /// Vertices of the chain, the start point of each segment
    pub fn points(&self) -> Vec<&Point> {
        self.segments.iter().map(Segment::start).collect()
    }

    /// Sum of segment lengths
    pub fn perimeter(&self) -> GeometryResult<f64> {
        self.segments.iter().map(Segment::length).sum()
    }

    /// True when the chain loops back on itself without gaps
    ///
    /// A contour of fewer than three segments is never closed.
    pub fn is_closed(&self) -> bool {
        let n = self.segments.len();
        if n < 3 {
            return false;
        }
        (0..n).all(|i| {
            self.segments[i]
                .end()
                .approx_eq(self.segments[(i + 1) % n].start(), self.tolerance)
        })
    }

    /// Coplanarity check that reports why it could not decide
    ///
    /// Direction vectors of dimension 2 or lower are trivially coplanar.
    /// Any other dimension besides 3 is `UnsupportedOperation`.
    pub fn try_is_coplanar(&self) -> GeometryResult<bool> {
        if self.segments.len() <= 1 {
            return Ok(true);
        }
        let directions = self
            .segments
            .iter()
            .map(Segment::direction_vector)
            .collect::<GeometryResult<Vec<_>>>()?;

        if directions.iter().all(|d| d.dimension() <= 2) {
            return Ok(true);
        }
        if let Some(d) = directions.iter().find(|d| d.dimension() != 3) {
            return Err(GeometryError::UnsupportedOperation(format!(
                "coplanarity is defined for 3-D contours, found a {}-D direction",
                d.dimension()
            )));
        }

        let Some(normal) = self.plane_normal(&directions)? else {
            return Ok(true);
        };
        let normal_norm = normal.norm();
        for d in &directions {
            let volume = d.dot_product(&normal)?;
            if volume.abs() > self.tolerance * d.norm() * normal_norm {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// True when every direction vector lies in one plane
    ///
    /// Returns false when the check is undefined for this contour's
    /// dimension; see `try_is_coplanar`.
    pub fn is_coplanar(&self) -> bool {
        self.try_is_coplanar().unwrap_or(false)
    }

    /// Cross product of the first two non-parallel directions, if any
    fn plane_normal(&self, directions: &[Vector]) -> GeometryResult<Option<Vector>> {
        for (i, a) in directions.iter().enumerate() {
            for b in &directions[i + 1..] {
                let cross = a.cross_product(b)?;
                if cross.norm() > self.tolerance * a.norm() * b.norm() {
                    return Ok(Some(cross));
                }
            }
        }
        Ok(None)
    }

    /// Structurally equal copy with new uids throughout
    pub fn duplicate(&self) -> Self {
        Self {
            identity: self.identity.fresh_copy(),
            segments: self.segments.iter().map(Segment::duplicate).collect(),
            tolerance: self.tolerance,
            fuzzy_threshold: self.fuzzy_threshold,
            similarity: Arc::clone(&self.similarity),
        }
    }
}

impl Default for Contour {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl Identified for Contour {
    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn identity_mut(&mut self) -> &mut Identity {
        &mut self.identity
    }
}

impl Lookup for Contour {
    type Item = Segment;

    fn members(&self) -> &[Segment] {
        &self.segments
    }

    fn fuzzy_threshold(&self) -> u8 {
        self.fuzzy_threshold
    }

    fn similarity(&self) -> &dyn Similarity {
        self.similarity.as_ref()
    }
}

impl fmt::Display for Contour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.name())?;
        for segment in &self.segments {
            write!(f, "\n{}", segment)?;
        }
        Ok(())
    }
}

/// Build a parallelogram contour
///
/// Corners in order: `corner`, `corner + v1`, `corner + v1 + v2`,
/// `corner + v2`, then back to `corner`.
///
/// # Example
/// ```
/// use geomspace::{parallelogram, Point, Vector};
/// let square = parallelogram(
///     &Point::at([0.0, 0.0, 0.0]),
///     &Vector::from([1.0, 0.0, 0.0]),
///     &Vector::from([0.0, 1.0, 0.0]),
///     "square",
/// ).unwrap();
/// assert!(square.is_closed());
/// assert!(square.is_coplanar());
/// ```
pub fn parallelogram(
    corner: &Point,
    v1: &Vector,
    v2: &Vector,
    name: impl Into<String>,
) -> GeometryResult<Contour> {
    let c1 = corner.duplicate();
    let c2 = corner.translate(v1)?;
    let c3 = c2.translate(v2)?;
    let c4 = corner.translate(v2)?;

    let mut contour = Contour::new(name);
    contour.append(Segment::between(c1.clone(), c2.clone()));
    contour.append(Segment::between(c2, c3.clone()));
    contour.append(Segment::between(c3, c4.clone()));
    contour.append(Segment::between(c4, c1.duplicate()));
    Ok(contour)
}
