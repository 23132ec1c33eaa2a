use crate::error::{CurveError, Result};
use crate::geometry::CurvePoint;
use crate::math::TOLERANCE;

/// Fraction of the spacing within which a target is considered to sit on
/// the final point already.
const END_SNAP: f64 = 1e-6;

/// Resamples a polyline of curve points at a uniform arc-length spacing.
///
/// Walks the input accumulating chord length and emits an interpolated
/// point at every multiple of the spacing. The first and last input points
/// are always kept verbatim, so only the final interval may be shorter.
pub struct EqualDistanceResample {
    spacing: f64,
}

impl EqualDistanceResample {
    /// Creates a new `EqualDistanceResample` operation.
    #[must_use]
    pub fn new(spacing: f64) -> Self {
        Self { spacing }
    }

    /// Executes the resampling.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidSampleDistance`] if the spacing is not a
    /// positive finite number, or [`CurveError::Empty`] if `points` is empty.
    pub fn execute(&self, points: &[CurvePoint]) -> Result<Vec<CurvePoint>> {
        if !(self.spacing > 0.0 && self.spacing.is_finite()) {
            return Err(CurveError::InvalidSampleDistance(self.spacing).into());
        }
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return Err(CurveError::Empty.into());
        };
        if points.len() == 1 {
            return Ok(vec![*first]);
        }

        let total: f64 = points
            .windows(2)
            .map(|pair| (pair[1].position - pair[0].position).norm())
            .sum();
        let end_limit = total - self.spacing * END_SNAP;

        let mut result = vec![*first];
        let mut travelled = 0.0;
        let mut target = self.spacing;

        for pair in points.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let step = (b.position - a.position).norm();

            if step > TOLERANCE {
                while travelled + step >= target && target < end_limit {
                    let t = (target - travelled) / step;
                    result.push(CurvePoint::lerp(a, b, t));
                    target += self.spacing;
                }
            }

            travelled += step;
        }

        result.push(*last);
        Ok(result)
    }
}
