mod normals;
mod tessellate_spline;

pub use normals::compute_face_normals;
pub use tessellate_spline::TessellateSpline;

use crate::error::{Result, TessellationError};
use crate::math::{Point2, Point3, Vector3};
use crate::operations::query::{Aabb, BoundingBox};

/// A polyline approximation of a curve.
#[derive(Debug, Clone, Default)]
pub struct Polyline {
    /// The ordered vertices of the polyline.
    pub points: Vec<Point3>,
}

/// A triangle mesh.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Vertex normals.
    pub normals: Vec<Vector3>,
    /// UV coordinates.
    pub uvs: Vec<Point2>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Returns the number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Returns the axis-aligned bounds of the vertices.
    ///
    /// # Errors
    ///
    /// Returns an error if the mesh has no vertices.
    pub fn bounds(&self) -> Result<Aabb> {
        BoundingBox::new(&self.vertices).execute()
    }

    /// Checks that every index refers to an existing vertex and that the
    /// per-vertex attribute arrays are either empty or vertex-sized.
    ///
    /// # Errors
    ///
    /// Returns [`TessellationError::InvalidParameters`] describing the first
    /// inconsistency found.
    pub fn validate(&self) -> Result<()> {
        let n = self.vertices.len();
        if !self.normals.is_empty() && self.normals.len() != n {
            return Err(TessellationError::InvalidParameters(format!(
                "{} normals for {n} vertices",
                self.normals.len()
            ))
            .into());
        }
        if !self.uvs.is_empty() && self.uvs.len() != n {
            return Err(TessellationError::InvalidParameters(format!(
                "{} uvs for {n} vertices",
                self.uvs.len()
            ))
            .into());
        }
        if let Some(bad) = self.indices.iter().flatten().find(|&&i| i as usize >= n) {
            return Err(TessellationError::InvalidParameters(format!(
                "index {bad} out of range for {n} vertices"
            ))
            .into());
        }
        Ok(())
    }
}

/// Converts a vertex count into the index type used by [`TriangleMesh`].
pub(crate) fn index_of(i: usize) -> Result<u32> {
    u32::try_from(i).map_err(|_| {
        TessellationError::Failed(format!("vertex index {i} exceeds the u32 range")).into()
    })
}
