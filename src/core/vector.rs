//! # Vector
//!
//! An ordered tuple of real coordinates. The fundamental primitive.
//!
//! Dimensionality is NOT fixed: every binary operation checks that both
//! operands share it and reports `DimensionMismatch` otherwise.
//! Operations never mutate in place, they return new Vectors with a fresh
//! identity.

use std::fmt;
use std::ops::{Div, Mul, Neg};

use serde::{Deserialize, Serialize};

use super::error::{GeometryError, GeometryResult};
use super::id::{Identified, Identity};

/// A named vector in dimensional space
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Vector {
    identity: Identity,
    coords: Vec<f64>,
}

impl Vector {
    /// Create a new vector from coordinates
    ///
    /// # Example
    /// ```
    /// use geomspace::Vector;
    /// let v = Vector::new(vec![1.0, 2.0, 3.0], "v");
    /// assert_eq!(v.dimension(), 3);
    /// ```
    pub fn new(coords: Vec<f64>, name: impl Into<String>) -> Self {
        Self {
            identity: Identity::new(name),
            coords,
        }
    }

    /// Create an unnamed zero vector of given dimension
    pub fn zeros(dim: usize) -> Self {
        Self::from(vec![0.0; dim])
    }

    /// Number of coordinates
    pub fn dimension(&self) -> usize {
        self.coords.len()
    }

    /// Access the coordinates as a slice
    pub fn coordinates(&self) -> &[f64] {
        &self.coords
    }

    /// Fail with `DimensionMismatch` unless `other` has the same dimension
    pub fn check_dimension(&self, other: &Vector) -> GeometryResult<()> {
        if self.dimension() != other.dimension() {
            return Err(GeometryError::dimension(
                self.dimension(),
                other.dimension(),
            ));
        }
        Ok(())
    }

    fn zip_with(&self, other: &Vector, f: impl Fn(f64, f64) -> f64) -> GeometryResult<Vector> {
        self.check_dimension(other)?;
        Ok(Vector::from(
            self.coords
                .iter()
                .zip(other.coords.iter())
                .map(|(&a, &b)| f(a, b))
                .collect::<Vec<_>>(),
        ))
    }

    fn map(&self, f: impl Fn(f64) -> f64) -> Vector {
        Vector::from(self.coords.iter().map(|&c| f(c)).collect::<Vec<_>>())
    }

    /// Componentwise sum
    ///
    /// # Example
    /// ```
    /// use geomspace::Vector;
    /// let sum = Vector::from(vec![1.0, 2.0]).add(&Vector::from(vec![3.0, 4.0])).unwrap();
    /// assert_eq!(sum.coordinates(), &[4.0, 6.0]);
    /// ```
    pub fn add(&self, other: &Vector) -> GeometryResult<Vector> {
        self.zip_with(other, |a, b| a + b)
    }

    /// Componentwise difference `self - other`
    pub fn subtract(&self, other: &Vector) -> GeometryResult<Vector> {
        self.zip_with(other, |a, b| a - b)
    }

    /// Multiply every coordinate by `k`
    pub fn scale(&self, k: f64) -> Vector {
        self.map(|c| c * k)
    }

    /// Divide every coordinate by `k`
    ///
    /// Division by zero follows IEEE-754 (infinities or NaN).
    pub fn divide(&self, k: f64) -> Vector {
        self.map(|c| c / k)
    }

    /// Euclidean length
    ///
    /// # Example
    /// ```
    /// use geomspace::Vector;
    /// assert_eq!(Vector::from(vec![3.0, 4.0]).norm(), 5.0);
    /// ```
    pub fn norm(&self) -> f64 {
        self.coords.iter().map(|x| x * x).sum::<f64>().sqrt()
    }

    /// Sum of pairwise products
    pub fn dot_product(&self, other: &Vector) -> GeometryResult<f64> {
        self.check_dimension(other)?;
        Ok(self
            .coords
            .iter()
            .zip(other.coords.iter())
            .map(|(a, b)| a * b)
            .sum())
    }

    /// 3-D cross product `self x other`
    pub fn cross_product(&self, other: &Vector) -> GeometryResult<Vector> {
        if self.dimension() != 3 || other.dimension() != 3 {
            return Err(GeometryError::UnsupportedOperation(format!(
                "cross product needs two 3-D vectors, got {} and {}",
                self.dimension(),
                other.dimension()
            )));
        }
        let a = &self.coords;
        let b = &other.coords;
        Ok(Vector::from(vec![
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]))
    }

    /// Scalar triple product `self . (v1 x v2)`
    ///
    /// Signed volume of the parallelepiped spanned by the three vectors,
    /// zero exactly when they are coplanar.
    pub fn triple_product(&self, v1: &Vector, v2: &Vector) -> GeometryResult<f64> {
        if let Some(bad) = [self, v1, v2].into_iter().find(|v| v.dimension() != 3) {
            return Err(GeometryError::dimension(3, bad.dimension()));
        }
        self.dot_product(&v1.cross_product(v2)?)
    }

    /// True when the cross product vanishes within `tolerance`
    ///
    /// Only defined in 3-D, like the cross product itself.
    pub fn is_parallel(&self, other: &Vector, tolerance: f64) -> GeometryResult<bool> {
        let cross = self.cross_product(other)?;
        Ok(cross.coords.iter().all(|c| c.abs() <= tolerance))
    }

    /// Same dimension and every coordinate within `tolerance`
    pub fn approx_eq(&self, other: &Vector, tolerance: f64) -> bool {
        self.dimension() == other.dimension()
            && self
                .coords
                .iter()
                .zip(other.coords.iter())
                .all(|(a, b)| (a - b).abs() <= tolerance)
    }

    /// Structurally equal copy with a new uid
    pub fn duplicate(&self) -> Self {
        Self {
            identity: self.identity.fresh_copy(),
            coords: self.coords.clone(),
        }
    }
}

impl Default for Vector {
    fn default() -> Self {
        Self::from(Vec::new())
    }
}

impl From<Vec<f64>> for Vector {
    fn from(coords: Vec<f64>) -> Self {
        Self::new(coords, String::new())
    }
}

impl From<&[f64]> for Vector {
    fn from(coords: &[f64]) -> Self {
        Self::from(coords.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for Vector {
    fn from(coords: [f64; N]) -> Self {
        Self::from(coords.to_vec())
    }
}

impl PartialEq for Vector {
    /// Exact coordinate comparison; names and uids are ignored.
    fn eq(&self, other: &Self) -> bool {
        self.coords == other.coords
    }
}

impl Identified for Vector {
    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn identity_mut(&mut self) -> &mut Identity {
        &mut self.identity
    }
}

impl Mul<f64> for &Vector {
    type Output = Vector;

    fn mul(self, k: f64) -> Vector {
        self.scale(k)
    }
}

impl Div<f64> for &Vector {
    type Output = Vector;

    fn div(self, k: f64) -> Vector {
        self.divide(k)
    }
}

impl Neg for &Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        self.map(|c| -c)
    }
}

/// Render coordinates as `[1.0, 2.0, 3.0]`
pub(crate) fn write_coordinates(f: &mut fmt::Formatter<'_>, coords: &[f64]) -> fmt::Result {
    f.write_str("[")?;
    for (i, &c) in coords.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_real(f, c)?;
    }
    f.write_str("]")
}

/// Shortest round-trip form: `1.0`, `0.25`, `1e+16`, `1.5e-05`, `nan`, `-inf`
///
/// Magnitudes in `[1e-4, 1e16)` and zero print positionally, the rest with
/// a signed exponent of at least two digits.
fn write_real(f: &mut fmt::Formatter<'_>, c: f64) -> fmt::Result {
    if c.is_nan() {
        return f.write_str("nan");
    }
    if c.is_infinite() {
        return f.write_str(if c < 0.0 { "-inf" } else { "inf" });
    }
    let magnitude = c.abs();
    if magnitude == 0.0 || (1e-4..1e16).contains(&magnitude) {
        return write!(f, "{:?}", c);
    }
    let sci = format!("{:e}", c);
    match sci.split_once('e').map(|(m, e)| (m, e.parse::<i32>())) {
        Some((mantissa, Ok(exp))) => {
            let sign = if exp < 0 { '-' } else { '+' };
            write!(f, "{}e{}{:02}", mantissa, sign, exp.abs())
        }
        _ => f.write_str(&sci),
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())?;
        write_coordinates(f, &self.coords)
    }
}
