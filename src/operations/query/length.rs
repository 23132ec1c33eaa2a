use crate::geometry::CurvePoint;

/// Computes the length of an evenly resampled spline.
///
/// Every interval but the last spans exactly the sample distance; the last
/// one is measured directly.
pub struct SplineLength {
    sample_distance: f64,
}

impl SplineLength {
    /// Creates a new `SplineLength` query.
    #[must_use]
    pub fn new(sample_distance: f64) -> Self {
        Self { sample_distance }
    }

    /// Executes the query. Fewer than two points have zero length.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn execute(&self, points: &[CurvePoint]) -> f64 {
        match points {
            [.., second_last, last] => {
                let full = (points.len() - 2) as f64 * self.sample_distance;
                full + (last.position - second_last.position).norm()
            }
            _ => 0.0,
        }
    }
}
