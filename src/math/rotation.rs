//! Orientation helpers.
//!
//! The conventions match a Y-up, Z-forward frame: a "look rotation" maps
//! `Z+` onto the look direction and `Y+` onto the (orthogonalized) up vector,
//! so its `X+` axis is `up × forward`. Every helper is total: degenerate
//! input collapses to the identity rotation or a zero vector instead of NaN.

use std::f64::consts::PI;

use nalgebra::{Matrix3, Rotation3, Unit};

use super::{Matrix4, Rotation, Vector3, FORWARD, TOLERANCE};

/// Builds the rotation whose local `Z+` points along `forward` and whose
/// local `Y+` is as close to `up` as possible.
///
/// When `forward` is zero-length the identity is returned. When `up` is
/// parallel to `forward` the minimal rotation from `Z+` onto `forward` is
/// used instead.
#[must_use]
pub fn look_rotation(forward: &Vector3, up: &Vector3) -> Rotation {
    let Some(z) = forward.try_normalize(TOLERANCE) else {
        return Rotation::identity();
    };

    match up.cross(&z).try_normalize(TOLERANCE) {
        Some(x) => {
            let y = z.cross(&x);
            let basis = Rotation3::from_matrix_unchecked(Matrix3::from_columns(&[x, y, z]));
            Rotation::from_rotation_matrix(&basis)
        }
        None => from_to_rotation(&FORWARD, &z),
    }
}

/// Returns the minimal rotation taking direction `from` onto direction `to`.
///
/// Opposite directions produce a half turn about an arbitrary axis
/// perpendicular to `from`. Zero-length input yields the identity.
#[must_use]
pub fn from_to_rotation(from: &Vector3, to: &Vector3) -> Rotation {
    let (Some(a), Some(b)) = (from.try_normalize(TOLERANCE), to.try_normalize(TOLERANCE)) else {
        return Rotation::identity();
    };

    Rotation::rotation_between(&a, &b).unwrap_or_else(|| {
        Rotation::from_axis_angle(&Unit::new_unchecked(perpendicular(&a)), PI)
    })
}

/// Builds a rotation from Euler angles in degrees.
///
/// The rotation applies Z first, then X, then Y.
#[must_use]
pub fn euler_degrees(x: f64, y: f64, z: f64) -> Rotation {
    let qx = Rotation::from_axis_angle(&Vector3::x_axis(), x.to_radians());
    let qy = Rotation::from_axis_angle(&Vector3::y_axis(), y.to_radians());
    let qz = Rotation::from_axis_angle(&Vector3::z_axis(), z.to_radians());
    qy * qx * qz
}

/// Spherically interpolates between two vectors.
///
/// Directions are rotated along the great arc between them while the
/// magnitude is interpolated linearly, so a vector that flips direction
/// turns through the half circle rather than shrinking through zero.
#[must_use]
pub fn slerp_vectors(a: &Vector3, b: &Vector3, t: f64) -> Vector3 {
    let (len_a, len_b) = (a.norm(), b.norm());
    if len_a < TOLERANCE || len_b < TOLERANCE {
        return a.lerp(b, t);
    }

    let (ua, ub) = (a / len_a, b / len_b);
    let magnitude = len_a + (len_b - len_a) * t;
    let theta = ua.dot(&ub).clamp(-1.0, 1.0).acos();

    let direction = if theta < 1e-9 {
        ua.lerp(&ub, t).try_normalize(TOLERANCE).unwrap_or(ua)
    } else if PI - theta < 1e-9 {
        Rotation::from_axis_angle(&Unit::new_unchecked(perpendicular(&ua)), theta * t) * ua
    } else {
        let sin_theta = theta.sin();
        (ua * ((1.0 - t) * theta).sin() + ub * (t * theta).sin()) / sin_theta
    };

    direction * magnitude
}

/// Extracts the rotation part of an affine matrix, discarding scale and
/// translation.
#[must_use]
pub fn rotation_of(matrix: &Matrix4) -> Rotation {
    let linear: Matrix3<f64> = matrix.fixed_view::<3, 3>(0, 0).into_owned();
    let mut columns = [Vector3::zeros(); 3];
    for (i, column) in columns.iter_mut().enumerate() {
        match linear.column(i).into_owned().try_normalize(TOLERANCE) {
            Some(unit) => *column = unit,
            None => return Rotation::identity(),
        }
    }
    let rotation = Rotation3::from_matrix(&Matrix3::from_columns(&columns));
    Rotation::from_rotation_matrix(&rotation)
}

/// Returns a unit vector perpendicular to `v`, choosing the world axis
/// least aligned with it.
pub(crate) fn perpendicular(v: &Vector3) -> Vector3 {
    let (ax, ay, az) = (v.x.abs(), v.y.abs(), v.z.abs());
    let axis = if ax <= ay && ax <= az {
        Vector3::x()
    } else if ay <= az {
        Vector3::y()
    } else {
        Vector3::z()
    };

    v.cross(&axis).try_normalize(TOLERANCE).unwrap_or_else(Vector3::y)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::math::UP;

    // ── look_rotation ──

    #[test]
    fn look_rotation_maps_forward_and_up() {
        let forward = Vector3::new(1.0, 0.0, 0.0);
        let rot = look_rotation(&forward, &UP);
        assert_abs_diff_eq!(rot * FORWARD, forward, epsilon = 1e-12);
        assert_abs_diff_eq!(rot * UP, UP, epsilon = 1e-12);
        // X axis is up × forward
        assert_abs_diff_eq!(rot * Vector3::x(), UP.cross(&forward), epsilon = 1e-12);
    }

    #[test]
    fn look_rotation_orthogonalizes_up() {
        let forward = Vector3::new(0.0, 0.0, 1.0);
        let up = Vector3::new(0.0, 1.0, 1.0);
        let rot = look_rotation(&forward, &up);
        assert_abs_diff_eq!(rot * UP, Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn look_rotation_with_parallel_up_still_faces_forward() {
        let rot = look_rotation(&UP, &UP);
        assert_abs_diff_eq!(rot * FORWARD, UP, epsilon = 1e-12);
    }

    #[test]
    fn look_rotation_of_zero_is_identity() {
        let rot = look_rotation(&Vector3::zeros(), &UP);
        assert_abs_diff_eq!(rot.angle(), 0.0, epsilon = 1e-12);
    }

    // ── from_to_rotation ──

    #[test]
    fn from_to_rotation_aligns_vectors() {
        let a = Vector3::new(1.0, 0.0, 0.0);
        let b = Vector3::new(0.0, 0.0, 2.0);
        let rot = from_to_rotation(&a, &b);
        assert_abs_diff_eq!(rot * a, Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn from_to_rotation_handles_opposite_vectors() {
        let a = Vector3::new(0.0, 1.0, 0.0);
        let rot = from_to_rotation(&a, &(-a));
        assert_abs_diff_eq!(rot * a, -a, epsilon = 1e-12);
    }

    // ── euler_degrees ──

    #[test]
    fn euler_yaw_rotates_back_axis() {
        let rot = euler_degrees(0.0, 90.0, 0.0);
        assert_abs_diff_eq!(
            rot * Vector3::new(0.0, 0.0, -1.0),
            Vector3::new(-1.0, 0.0, 0.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn euler_applies_z_before_x() {
        // Z turns X+ onto Y+, then X turns Y+ onto Z+.
        let rot = euler_degrees(90.0, 0.0, 90.0);
        assert_abs_diff_eq!(rot * Vector3::x(), Vector3::z(), epsilon = 1e-12);
    }

    // ── slerp_vectors ──

    #[test]
    fn slerp_halfway_between_axes() {
        let mid = slerp_vectors(&Vector3::x(), &Vector3::y(), 0.5);
        let s = std::f64::consts::FRAC_1_SQRT_2;
        assert_abs_diff_eq!(mid, Vector3::new(s, s, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn slerp_of_flipped_vector_keeps_unit_length() {
        let mid = slerp_vectors(&Vector3::y(), &(-Vector3::y()), 0.5);
        assert_abs_diff_eq!(mid.norm(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(mid.dot(&Vector3::y()), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn slerp_endpoints_are_exact() {
        let a = Vector3::new(0.0, 0.0, 1.0);
        let b = Vector3::new(1.0, 0.0, 0.0);
        assert_abs_diff_eq!(slerp_vectors(&a, &b, 0.0), a, epsilon = 1e-12);
        assert_abs_diff_eq!(slerp_vectors(&a, &b, 1.0), b, epsilon = 1e-12);
    }

    // ── rotation_of ──

    #[test]
    fn rotation_of_strips_scale_and_translation() {
        let rot = euler_degrees(0.0, 45.0, 0.0);
        let matrix = Matrix4::new_translation(&Vector3::new(3.0, 2.0, 1.0))
            * rot.to_homogeneous()
            * Matrix4::new_nonuniform_scaling(&Vector3::new(2.0, 3.0, 4.0));
        let extracted = rotation_of(&matrix);
        assert_abs_diff_eq!(extracted.angle_to(&rot), 0.0, epsilon = 1e-9);
    }
}
