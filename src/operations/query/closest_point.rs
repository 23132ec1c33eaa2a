use crate::error::{CurveError, Result};
use crate::geometry::CurvePoint;
use crate::math::{Point3, TOLERANCE};

/// Number of evenly spaced candidates probed per refinement pass.
const CANDIDATES: i64 = 5;

/// Finds the percent along a sampled spline closest to a query point.
///
/// This works on the sampled polyline, not the Bezier segments, so its
/// accuracy is bounded by the sample spacing. A coarse-to-fine search
/// narrows a window of point indices around the nearest candidate, then the
/// query is projected onto the two intervals adjoining the winner.
///
/// Both the query and `points` must be in the same (local) space.
pub struct NearestPointOnSpline {
    point: Point3,
    closed: bool,
}

impl NearestPointOnSpline {
    /// Creates a new `NearestPointOnSpline` query.
    #[must_use]
    pub fn new(point: Point3, closed: bool) -> Self {
        Self { point, closed }
    }

    /// Executes the query, returning a percent in `[0, 1]` for an open
    /// spline and in `[0, 1)` for a closed one.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::Empty`] if `points` is empty.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_sign_loss
    )]
    pub fn execute(&self, points: &[CurvePoint]) -> Result<f64> {
        if points.is_empty() {
            return Err(CurveError::Empty.into());
        }
        if points.len() == 1 {
            return Ok(0.0);
        }

        let len = points.len() as i64;
        let wrap = |index: i64| -> usize {
            let index = if index < 0 && self.closed {
                len - 1 + index
            } else {
                index
            };
            (index % len).max(0) as usize
        };
        let distance = |index: usize| (points[index].position - self.point).norm();

        let (mut start, mut finish) = (0_i64, len - 1);
        let mut nearest = 0_usize;

        while finish - start >= 2 {
            let delta = (finish - start) as f64;
            let mut best = f64::INFINITY;

            for i in 0..CANDIDATES {
                let candidate = wrap(start + (delta / 4.0 * i as f64) as i64);
                let d = distance(candidate);
                if d < best {
                    best = d;
                    nearest = candidate;
                }
            }

            start = (nearest as f64 - delta / 4.0) as i64;
            finish = (nearest as f64 + delta / 4.0) as i64;
        }

        let base = wrap(nearest as i64 - 1);
        let n = points.len();
        let mut local = 0.0;

        for i in 0..2 {
            let mut a = (base + i) % n;
            let mut b = (a + 1) % n;
            if b == 0 {
                // An open spline has nothing past its last point.
                if !self.closed {
                    continue;
                }
                // The closing point duplicates index 0, so `base` never
                // exceeds `n - 2` and the interval past it is `0 → 1`.
                (a, b) = (0, 1);
            }
            local += project_onto_interval(&points[a], &points[b], &self.point).clamp(0.0, 1.0);
        }

        let step = 1.0 / (n as f64 - 1.0);
        let percent = step * base as f64 + step * local;
        if self.closed {
            Ok(percent.rem_euclid(1.0))
        } else {
            Ok(percent.clamp(0.0, 1.0))
        }
    }
}

/// Scalar projection of `point` onto the interval `a → b`, as a fraction of
/// its length. Unclamped.
fn project_onto_interval(a: &CurvePoint, b: &CurvePoint, point: &Point3) -> f64 {
    let along = b.position - a.position;
    let length_sq = along.norm_squared();
    if length_sq < TOLERANCE * TOLERANCE {
        return 0.0;
    }
    (point - a.position).dot(&along) / length_sq
}
