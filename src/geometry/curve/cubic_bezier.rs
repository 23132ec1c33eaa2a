use crate::error::{GeometryError, Result};
use crate::geometry::Node;
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{check_unit_parameter, Curve};

/// A cubic Bezier segment defined by four control points.
///
/// The parametric form over `t ∈ [0, 1]` is the Bernstein blend
/// `(1-t)³·P0 + 3(1-t)²t·P1 + 3(1-t)t²·P2 + t³·P3`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    p0: Point3,
    p1: Point3,
    p2: Point3,
    p3: Point3,
}

impl CubicBezier {
    /// Creates a segment from its control points.
    #[must_use]
    pub fn new(p0: Point3, p1: Point3, p2: Point3, p3: Point3) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Creates the segment leaving `start` through its forward handle and
    /// arriving at `end` through its backward handle.
    #[must_use]
    pub fn between(start: &Node, end: &Node) -> Self {
        Self::new(
            start.point(),
            start.forward_point(),
            end.backward_point(),
            end.point(),
        )
    }

    /// Returns the length of the control polygon, an upper bound of the
    /// arc length used to pick a sampling resolution.
    #[must_use]
    pub fn control_polygon_length(&self) -> f64 {
        (self.p1 - self.p0).norm() + (self.p2 - self.p3).norm() + (self.p2 - self.p1).norm()
    }
}

impl Curve for CubicBezier {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        check_unit_parameter(t)?;
        let it = 1.0 - t;
        let (it2, t2) = (it * it, t * t);
        Ok(Point3::from(
            self.p0.coords * (it2 * it)
                + self.p1.coords * (3.0 * it2 * t)
                + self.p2.coords * (3.0 * it * t2)
                + self.p3.coords * (t2 * t),
        ))
    }

    fn derivative(&self, t: f64) -> Result<Vector3> {
        check_unit_parameter(t)?;
        let it = 1.0 - t;
        Ok((self.p1 - self.p0) * (3.0 * it * it)
            + (self.p2 - self.p1) * (6.0 * it * t)
            + (self.p3 - self.p2) * (3.0 * t * t))
    }

    /// A handle collapsed onto its node zeroes the derivative at that end.
    /// The limit direction then follows the next control point along the
    /// polygon, and finally the chord.
    fn tangent(&self, t: f64) -> Result<Vector3> {
        let fallback = if t < 0.5 {
            self.p2 - self.p0
        } else {
            self.p3 - self.p1
        };

        [self.derivative(t)?, fallback, self.p3 - self.p0]
            .iter()
            .find_map(|v| v.try_normalize(TOLERANCE))
            .ok_or_else(|| GeometryError::ZeroVector.into())
    }
}
