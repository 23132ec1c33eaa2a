use tracing::debug;

use crate::error::{CurveError, Result};
use crate::geometry::{CubicBezier, CurvePoint, Node};

use super::{EqualDistanceResample, SegmentFrames};

/// Samples a whole node sequence into evenly spaced oriented points.
///
/// Segment `i` joins `nodes[i]` to `nodes[i + 1]`; a closed spline adds a
/// final segment back to `nodes[0]`. Each segment is sampled densely
/// enough for its control polygon, then the concatenation is resampled at
/// `sample_distance`.
pub struct SampleSpline<'a> {
    nodes: &'a [Node],
    sample_distance: f64,
    closed: bool,
}

impl<'a> SampleSpline<'a> {
    /// Creates a new `SampleSpline` operation.
    #[must_use]
    pub fn new(nodes: &'a [Node], sample_distance: f64, closed: bool) -> Self {
        Self {
            nodes,
            sample_distance,
            closed,
        }
    }

    /// Executes the sampling.
    ///
    /// Fewer than two nodes yield an empty sequence, which is a valid
    /// (degenerate) spline rather than an error.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidSampleDistance`] if the sample distance is
    /// not a positive finite number.
    pub fn execute(&self) -> Result<Vec<CurvePoint>> {
        if !(self.sample_distance > 0.0 && self.sample_distance.is_finite()) {
            return Err(CurveError::InvalidSampleDistance(self.sample_distance).into());
        }

        let n = self.nodes.len();
        if n < 2 {
            return Ok(Vec::new());
        }

        let segment_count = if self.closed { n } else { n - 1 };
        let mut raw = Vec::new();

        for i in 0..segment_count {
            let (start, end) = (&self.nodes[i], &self.nodes[(i + 1) % n]);
            let resolution = self.segment_resolution(&CubicBezier::between(start, end));
            raw.extend(SegmentFrames::new(start, end, resolution).execute()?);
        }

        let points = EqualDistanceResample::new(self.sample_distance).execute(&raw)?;
        debug!(
            nodes = n,
            closed = self.closed,
            raw = raw.len(),
            resampled = points.len(),
            "Sampled spline"
        );
        Ok(points)
    }

    /// Number of raw samples for a segment, at least 2.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn segment_resolution(&self, segment: &CubicBezier) -> usize {
        let estimate = segment.control_polygon_length() / self.sample_distance;
        (estimate.max(2.0) as usize).max(2)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::math::{Point3, Vector3};

    fn straight_nodes() -> Vec<Node> {
        let (forward, backward) = (Vector3::new(1.0, 0.0, 0.0), Vector3::new(-1.0, 0.0, 0.0));
        vec![
            Node::new(Point3::origin(), forward, backward),
            Node::new(Point3::new(10.0, 0.0, 0.0), forward, backward),
        ]
    }

    fn square_nodes() -> Vec<Node> {
        [(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]
            .iter()
            .enumerate()
            .map(|(i, &(x, z))| {
                #[allow(clippy::cast_precision_loss)]
                let angle = std::f64::consts::FRAC_PI_2 * i as f64;
                let dir = Vector3::new(angle.cos(), 0.0, angle.sin());
                Node::new(Point3::new(x, 0.0, z), dir, -dir)
            })
            .collect()
    }

    #[test]
    fn fewer_than_two_nodes_is_empty() {
        let nodes = straight_nodes();
        assert!(SampleSpline::new(&nodes[..1], 0.5, false).execute().unwrap().is_empty());
        assert!(SampleSpline::new(&[], 0.5, true).execute().unwrap().is_empty());
    }

    #[test]
    fn non_positive_sample_distance_is_rejected() {
        let nodes = straight_nodes();
        assert!(SampleSpline::new(&nodes, 0.0, false).execute().is_err());
        assert!(SampleSpline::new(&nodes, -1.0, false).execute().is_err());
    }

    #[test]
    fn open_spline_starts_and_ends_on_nodes() {
        let nodes = straight_nodes();
        let points = SampleSpline::new(&nodes, 0.5, false).execute().unwrap();
        assert_abs_diff_eq!(points[0].position, nodes[0].point(), epsilon = 1e-12);
        assert_abs_diff_eq!(points[points.len() - 1].position, nodes[1].point(), epsilon = 1e-12);
        assert_eq!(points.len(), 21);
    }

    #[test]
    fn closed_spline_returns_to_first_node() {
        let nodes = square_nodes();
        let points = SampleSpline::new(&nodes, 0.25, true).execute().unwrap();
        let first = points[0].position;
        let last = points[points.len() - 1].position;
        assert_abs_diff_eq!(first, last, epsilon = 1e-12);
        assert_abs_diff_eq!(first, nodes[0].point(), epsilon = 1e-12);
    }

    #[test]
    fn closed_spline_has_extra_segment() {
        let nodes = square_nodes();
        let open = SampleSpline::new(&nodes, 0.25, false).execute().unwrap();
        let closed = SampleSpline::new(&nodes, 0.25, true).execute().unwrap();
        assert!(closed.len() > open.len());
    }
}
