use crate::error::TraceError;
use crate::vec3::Vec3;

/// A ray, beginning at `origin` and extending along `direction`.
///
/// `direction` need not be unit length; the tracer normalizes it before use.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Ray { origin, direction }
    }

    /// Finds the point along the ray at parameter `t`. Positive values of `t`
    /// represent positions forward from the origin, and negative values,
    /// behind the origin.
    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + t * self.direction
    }

    /// Returns the normalized direction, or an error if the ray can't be
    /// traced: a zero-length direction, or any non-finite lane.
    pub fn unit_direction(&self) -> Result<Vec3, TraceError> {
        let unit = self.direction.into_unit();
        if self.origin.is_finite() && unit.is_finite() {
            Ok(unit)
        } else {
            Err(TraceError::DegenerateRay(*self))
        }
    }
}
