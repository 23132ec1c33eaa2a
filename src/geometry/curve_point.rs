use crate::math::{look_rotation, slerp_vectors, Point3, Rotation, Transform, Vector3};

/// A sampled point on a spline together with its orientation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    /// Position along the spline.
    pub position: Point3,
    /// Unit direction of travel.
    pub tangent: Vector3,
    /// Unit "up" direction of the frame.
    pub normal: Vector3,
    /// Unit sideways direction, `normal × tangent`.
    pub bitangent: Vector3,
}

impl CurvePoint {
    /// Creates a point whose bitangent is derived as `normal × tangent`.
    #[must_use]
    pub fn new(position: Point3, tangent: Vector3, normal: Vector3) -> Self {
        Self {
            position,
            tangent,
            normal,
            bitangent: normal.cross(&tangent),
        }
    }

    /// Creates a point with an explicitly supplied bitangent.
    #[must_use]
    pub fn with_bitangent(
        position: Point3,
        tangent: Vector3,
        normal: Vector3,
        bitangent: Vector3,
    ) -> Self {
        Self {
            position,
            tangent,
            normal,
            bitangent,
        }
    }

    /// Returns the rotation whose `Z+` is the tangent and `Y+` the normal.
    #[must_use]
    pub fn orientation(&self) -> Rotation {
        look_rotation(&self.tangent, &self.normal)
    }

    /// Interpolates between two points.
    ///
    /// Positions are blended linearly. Tangents and normals are blended
    /// spherically so a flipping direction rotates instead of collapsing.
    #[must_use]
    pub fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self::new(
            a.position + (b.position - a.position) * t,
            slerp_vectors(&a.tangent, &b.tangent, t),
            slerp_vectors(&a.normal, &b.normal, t),
        )
    }

    /// Maps the point into the space described by `transform`.
    ///
    /// The position gets the whole transform, the frame its rotation only.
    #[must_use]
    pub fn transformed(&self, transform: &Transform) -> Self {
        Self::new(
            transform.transform_point(&self.position),
            transform.transform_direction(&self.tangent),
            transform.transform_direction(&self.normal),
        )
    }
}
