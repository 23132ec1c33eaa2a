use crate::error::{GeometryError, Result};

use super::{euler_degrees, Matrix4, Point3, Rotation, Vector3};

/// A translation-rotation-scale transform mapping local space to world space.
///
/// Points receive the full transform. Directions receive the rotation only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Translation applied last.
    pub translation: Vector3,
    /// Rotation applied after scaling.
    pub rotation: Rotation,
    /// Per-axis scale applied first.
    pub scale: Vector3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// The identity transform.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            translation: Vector3::zeros(),
            rotation: Rotation::identity(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    /// Creates a transform from its components.
    #[must_use]
    pub fn new(translation: Vector3, rotation: Rotation, scale: Vector3) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// Creates a transform whose rotation is given as Euler angles in degrees.
    #[must_use]
    pub fn from_euler_degrees(translation: Vector3, euler: Vector3, scale: Vector3) -> Self {
        Self::new(translation, euler_degrees(euler.x, euler.y, euler.z), scale)
    }

    /// Returns the homogeneous matrix `T * R * S`.
    #[must_use]
    pub fn matrix(&self) -> Matrix4 {
        Matrix4::new_translation(&self.translation)
            * self.rotation.to_homogeneous()
            * Matrix4::new_nonuniform_scaling(&self.scale)
    }

    /// Transforms a point from local to world space.
    #[must_use]
    pub fn transform_point(&self, point: &Point3) -> Point3 {
        Point3::from(self.rotation * point.coords.component_mul(&self.scale) + self.translation)
    }

    /// Rotates a direction from local to world space. Scale is ignored.
    #[must_use]
    pub fn transform_direction(&self, direction: &Vector3) -> Vector3 {
        self.rotation * direction
    }

    /// Transforms a point from world back to local space.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if any scale component is zero.
    pub fn inverse_transform_point(&self, point: &Point3) -> Result<Point3> {
        if self.scale.iter().any(|s| s.abs() < super::TOLERANCE) {
            return Err(GeometryError::Degenerate(
                "transform with zero scale is not invertible".into(),
            )
            .into());
        }
        let unrotated = self.rotation.inverse() * (point.coords - self.translation);
        Ok(Point3::from(unrotated.component_div(&self.scale)))
    }
}
