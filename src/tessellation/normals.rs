use crate::error::{Result, TessellationError};
use crate::math::{Point3, Vector3, TOLERANCE};

/// Computes smooth vertex normals by averaging the unit normals of the
/// triangles around each vertex.
///
/// Face normals are `(c - b) × (a - b)` and contribute equally regardless of
/// triangle area or corner angle. Vertices touched by no (or only
/// degenerate) triangles get a zero normal.
///
/// # Errors
///
/// Returns [`TessellationError::InvalidParameters`] if a triangle refers to a
/// vertex that does not exist.
pub fn compute_face_normals(vertices: &[Point3], indices: &[[u32; 3]]) -> Result<Vec<Vector3>> {
    let mut normals = vec![Vector3::zeros(); vertices.len()];

    for tri in indices {
        let [a, b, c] = tri.map(|i| i as usize);
        if a.max(b).max(c) >= vertices.len() {
            return Err(TessellationError::InvalidParameters(format!(
                "triangle {tri:?} refers past {} vertices",
                vertices.len()
            ))
            .into());
        }

        let c2b = vertices[c] - vertices[b];
        let a2b = vertices[a] - vertices[b];
        let face = c2b.cross(&a2b).try_normalize(TOLERANCE).unwrap_or_else(Vector3::zeros);

        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }

    for n in &mut normals {
        *n = n.try_normalize(TOLERANCE).unwrap_or_else(Vector3::zeros);
    }

    Ok(normals)
}
