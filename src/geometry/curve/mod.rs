mod cubic_bezier;

pub use cubic_bezier::CubicBezier;

use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

/// A parametric curve segment over the unit interval `t ∈ [0, 1]`.
pub trait Curve {
    /// Evaluates the position at `t`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParameterOutOfRange`] for `t` outside `[0, 1]`.
    fn evaluate(&self, t: f64) -> Result<Point3>;

    /// Returns the unnormalized first derivative at `t`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParameterOutOfRange`] for `t` outside `[0, 1]`.
    fn derivative(&self, t: f64) -> Result<Vector3>;

    /// Returns the unit direction of travel at `t`.
    ///
    /// # Errors
    ///
    /// Returns an error if `t` is out of range or the derivative vanishes.
    fn tangent(&self, t: f64) -> Result<Vector3> {
        self.derivative(t)?
            .try_normalize(TOLERANCE)
            .ok_or_else(|| GeometryError::ZeroVector.into())
    }
}

/// Rejects parameters outside the unit interval.
pub(crate) fn check_unit_parameter(t: f64) -> Result<()> {
    if (0.0..=1.0).contains(&t) {
        Ok(())
    } else {
        Err(GeometryError::ParameterOutOfRange {
            parameter: "t",
            value: t,
            min: 0.0,
            max: 1.0,
        }
        .into())
    }
}
