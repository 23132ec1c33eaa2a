use crate::math::{rotation_of, Matrix4, Point3, Rotation};
use crate::tessellation::TriangleMesh;

/// Applies an arbitrary 4x4 transformation matrix to a mesh.
///
/// Positions go through the full matrix. Normals are only rotated, using the
/// rotation extracted from the matrix, so scale and shear never skew them.
/// UVs and indices are carried over unchanged.
pub struct TransformMesh {
    matrix: Matrix4,
    rotation: Rotation,
}

impl TransformMesh {
    /// Creates a new `TransformMesh` operation.
    #[must_use]
    pub fn new(matrix: Matrix4) -> Self {
        Self {
            rotation: rotation_of(&matrix),
            matrix,
        }
    }

    /// Executes the transformation, returning a new mesh.
    #[must_use]
    pub fn execute(&self, mesh: &TriangleMesh) -> TriangleMesh {
        TriangleMesh {
            vertices: mesh.vertices.iter().map(|p| self.transform_point(p)).collect(),
            normals: mesh.normals.iter().map(|n| self.rotation * n).collect(),
            uvs: mesh.uvs.clone(),
            indices: mesh.indices.clone(),
        }
    }

    /// Transforms a point by the matrix (homogeneous coordinates).
    fn transform_point(&self, point: &Point3) -> Point3 {
        let v = self.matrix * nalgebra::Vector4::new(point.x, point.y, point.z, 1.0);
        Point3::new(v.x, v.y, v.z)
    }
}

impl Default for TransformMesh {
    fn default() -> Self {
        Self::new(Matrix4::identity())
    }
}
