use crate::error::{CurveError, Result};
use crate::geometry::CurvePoint;

/// Evaluates a sampled spline at a fraction of its point sequence.
///
/// The points are treated as evenly spaced, so `percent` maps linearly onto
/// the `len - 1` intervals between them. Out-of-range percents are clamped.
pub struct PointAtPercent {
    percent: f64,
}

impl PointAtPercent {
    /// Creates a new `PointAtPercent` query.
    #[must_use]
    pub fn new(percent: f64) -> Self {
        Self { percent }
    }

    /// Executes the query, returning the interpolated point in the same space
    /// as `points`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::Empty`] if `points` is empty.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn execute(&self, points: &[CurvePoint]) -> Result<CurvePoint> {
        let Some(last) = points.last() else {
            return Err(CurveError::Empty.into());
        };

        let percent = if self.percent.is_nan() {
            0.0
        } else {
            self.percent.clamp(0.0, 1.0)
        };

        // There is no point after the last one to interpolate towards.
        if percent >= 1.0 || points.len() == 1 {
            return Ok(*last);
        }

        let intervals = points.len() - 1;
        let index = ((intervals as f64 * percent) as usize).min(intervals - 1);
        let interval = 1.0 / intervals as f64;
        let local = (percent - interval * index as f64) / interval;

        Ok(CurvePoint::lerp(&points[index], &points[index + 1], local))
    }
}
