use tracing::warn;

use crate::error::Result;
use crate::geometry::{CubicBezier, Curve, CurvePoint, Node};
use crate::math::{
    euler_degrees, from_to_rotation, look_rotation, Rotation, Vector3, BACK, FORWARD, TOLERANCE,
    UP,
};

/// `|dot(direction, UP)|` above this is treated as pointing straight up or down.
const POLE_THRESHOLD: f64 = 1.0 - 1e-9;

/// Returns the normal for a curve leaving in `direction` with the given
/// twist (degrees).
///
/// Away from the poles the normal is the world up axis, rolled by `twist`
/// about `direction` and made perpendicular to it. Along the up axis that
/// construction is singular, so the world back axis yawed by `twist` is
/// used instead.
#[must_use]
pub fn twisted_normal(direction: &Vector3, twist: f64) -> Vector3 {
    let pole = || euler_degrees(0.0, twist, 0.0) * BACK;

    let Some(direction) = direction.try_normalize(TOLERANCE) else {
        return pole();
    };
    if direction.dot(&UP).abs() > POLE_THRESHOLD {
        return pole();
    }

    let orientation = look_rotation(&direction, &UP);
    let rolled_up = orientation * euler_degrees(0.0, 0.0, twist) * UP;
    let bitangent = direction.cross(&rolled_up);
    bitangent
        .cross(&direction)
        .try_normalize(TOLERANCE)
        .unwrap_or_else(pole)
}

/// Samples one Bezier segment between two nodes into oriented points.
///
/// The first normal comes from the start node's forward handle and twist.
/// Each following normal is the previous one carried along by the minimal
/// rotation between consecutive tangents. The roll left over between the
/// carried end normal and the end node's own normal is then spread over
/// the segment, so adjacent segments meet without a jump.
pub struct SegmentFrames<'a> {
    start: &'a Node,
    end: &'a Node,
    resolution: usize,
}

impl<'a> SegmentFrames<'a> {
    /// Creates a new `SegmentFrames` operation.
    ///
    /// `resolution` is the number of points produced, both ends included.
    /// Values below 2 are raised to 2.
    #[must_use]
    pub fn new(start: &'a Node, end: &'a Node, resolution: usize) -> Self {
        Self {
            start,
            end,
            resolution: resolution.max(2),
        }
    }

    /// Executes the sampling.
    ///
    /// # Errors
    ///
    /// Returns an error if the Bezier segment cannot be evaluated.
    #[allow(clippy::cast_precision_loss)]
    pub fn execute(&self) -> Result<Vec<CurvePoint>> {
        let curve = CubicBezier::between(self.start, self.end);
        let last = self.resolution - 1;
        let param = |i: usize| i as f64 / last as f64;

        let first_tangent = curve.tangent(0.0).unwrap_or_else(|_| {
            warn!("segment collapses to a point; using forward axis as tangent");
            FORWARD
        });
        let start_direction = self
            .start
            .forward()
            .try_normalize(TOLERANCE)
            .unwrap_or(first_tangent);

        let mut points = Vec::with_capacity(self.resolution);
        points.push(CurvePoint::new(
            self.start.point(),
            first_tangent,
            twisted_normal(&start_direction, self.start.twist()),
        ));

        // Rotation-minimizing propagation.
        for i in 1..self.resolution {
            let t = param(i);
            let prev = points[i - 1];
            let tangent = curve.tangent(t).unwrap_or(prev.tangent);
            let normal = from_to_rotation(&prev.tangent, &tangent) * prev.normal;
            points.push(CurvePoint::new(curve.evaluate(t)?, tangent, normal));
        }

        let end_direction = (-self.end.backward())
            .try_normalize(TOLERANCE)
            .unwrap_or(points[last].tangent);
        let target = twisted_normal(&end_direction, self.end.twist());

        let start_local = points[0].orientation().inverse() * points[0].normal;
        let finish_local = points[last].orientation().inverse() * target;
        let roll = roll_between(&start_local, &finish_local);

        // Slerp from identity to the residual roll about the local tangent.
        for (i, point) in points.iter_mut().enumerate().skip(1) {
            let partial = Rotation::from_axis_angle(&Vector3::z_axis(), roll * param(i));
            let normal = point.orientation() * (partial * start_local);
            *point = CurvePoint::new(point.position, point.tangent, normal);
        }

        Ok(points)
    }
}

/// Signed angle about local `Z+` taking `from` onto `to`, measured in the
/// local XY plane. Components along the tangent are ignored.
fn roll_between(from: &Vector3, to: &Vector3) -> f64 {
    let (ax, ay) = (from.x, from.y);
    let (bx, by) = (to.x, to.y);
    if ax.hypot(ay) < TOLERANCE || bx.hypot(by) < TOLERANCE {
        return 0.0;
    }
    (ax * by - ay * bx).atan2(ax * bx + ay * by)
}
