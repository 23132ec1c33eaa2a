use tracing::debug;

use crate::error::{CurveError, Result, TessellationError};
use crate::math::{Matrix4, Point2, Transform, Vector3, TOLERANCE};
use crate::operations::transform::TransformMesh;
use crate::spline::{SampledCurve, Space};
use crate::tessellation::{compute_face_normals, index_of, TriangleMesh};

/// A source mesh and the local placement applied to it before stamping.
#[derive(Debug, Clone)]
pub struct StampSettings {
    mesh: TriangleMesh,
    /// Offset applied to the source mesh.
    pub position: Vector3,
    /// Rotation applied to the source mesh, as Euler angles in degrees.
    pub rotation: Vector3,
    /// Per-axis scale applied to the source mesh.
    pub scale: Vector3,
    /// Stretch the copies so they exactly cover the curve.
    pub stretch_to_fit: bool,
}

impl StampSettings {
    /// Creates settings with an identity placement and stretching enabled.
    ///
    /// # Errors
    ///
    /// Returns [`TessellationError::InvalidParameters`] if the mesh has no
    /// vertices or its attribute arrays are inconsistent.
    pub fn new(mesh: TriangleMesh) -> Result<Self> {
        if mesh.vertices.is_empty() {
            return Err(TessellationError::InvalidParameters(
                "source mesh has no vertices".to_owned(),
            )
            .into());
        }
        mesh.validate()?;
        Ok(Self {
            mesh,
            position: Vector3::zeros(),
            rotation: Vector3::zeros(),
            scale: Vector3::new(1.0, 1.0, 1.0),
            stretch_to_fit: true,
        })
    }

    /// Sets the placement offset.
    #[must_use]
    pub fn with_position(mut self, position: Vector3) -> Self {
        self.position = position;
        self
    }

    /// Sets the placement rotation in Euler degrees.
    #[must_use]
    pub fn with_rotation(mut self, rotation: Vector3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Sets the placement scale.
    #[must_use]
    pub fn with_scale(mut self, scale: Vector3) -> Self {
        self.scale = scale;
        self
    }

    /// Enables or disables stretching.
    #[must_use]
    pub fn with_stretch_to_fit(mut self, stretch_to_fit: bool) -> Self {
        self.stretch_to_fit = stretch_to_fit;
        self
    }

    /// Returns the source mesh.
    #[must_use]
    pub fn mesh(&self) -> &TriangleMesh {
        &self.mesh
    }

    /// Returns the placement as a `T * R * S` matrix.
    #[must_use]
    pub fn transform_matrix(&self) -> Matrix4 {
        Transform::from_euler_degrees(self.position, self.rotation, self.scale).matrix()
    }
}

/// Repeats a source mesh along a curve.
///
/// The placed source mesh is cut into copies along its Z extent. Each
/// vertex keeps its XY offset in the curve's frame, while its Z coordinate
/// becomes distance along the curve.
pub struct StampMesh<'a> {
    settings: &'a StampSettings,
    space: Space,
}

impl<'a> StampMesh<'a> {
    /// Creates a new `StampMesh` operation producing local-space geometry.
    #[must_use]
    pub fn new(settings: &'a StampSettings) -> Self {
        Self {
            settings,
            space: Space::Local,
        }
    }

    /// Selects the space the mesh is emitted in.
    #[must_use]
    pub fn with_space(mut self, space: Space) -> Self {
        self.space = space;
        self
    }

    /// Executes the stamping.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::ZeroLength`] if the curve has no length, or
    /// [`TessellationError::InvalidParameters`] if the placed mesh is flat
    /// along Z.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn execute<C: SampledCurve + ?Sized>(&self, curve: &C) -> Result<TriangleMesh> {
        let length = curve.length();
        if length <= TOLERANCE || !length.is_finite() {
            return Err(CurveError::ZeroLength.into());
        }

        let source = self.placed_source()?;
        let size_z = source.bounds()?.size().z;
        if size_z <= TOLERANCE {
            return Err(TessellationError::InvalidParameters(
                "source mesh has no depth along Z".to_owned(),
            )
            .into());
        }

        let size_factor = length / size_z;
        let duplicates = (size_factor as usize).max(1);
        let stretch = if self.settings.stretch_to_fit {
            size_factor / duplicates as f64
        } else {
            1.0
        };

        let per_copy = source.vertex_count();
        let total = per_copy * duplicates;
        index_of(total)?;

        let mut mesh = TriangleMesh {
            vertices: Vec::with_capacity(total),
            normals: Vec::with_capacity(total),
            uvs: Vec::with_capacity(total),
            indices: Vec::with_capacity(source.triangle_count() * duplicates),
        };

        for copy in 0..duplicates {
            let z_offset = size_z * copy as f64;
            let base = index_of(copy * per_copy)?;

            for ((v, n), uv) in source.vertices.iter().zip(&source.normals).zip(&source.uvs) {
                let percent = (z_offset + v.z) / length;
                let frame = curve.sample(percent * stretch, self.space)?;
                let orientation = frame.orientation();

                mesh.vertices
                    .push(frame.position + orientation * Vector3::new(v.x, v.y, 0.0));
                mesh.normals.push(orientation * n);
                mesh.uvs.push(*uv);
            }

            mesh.indices
                .extend(source.indices.iter().map(|tri| tri.map(|i| i + base)));
        }

        debug!(
            duplicates,
            stretch,
            length,
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "Stamped mesh"
        );
        Ok(mesh)
    }

    /// Applies the placement and fills in missing normals and UVs.
    fn placed_source(&self) -> Result<TriangleMesh> {
        let mut source = self.settings.mesh.clone();
        if source.normals.is_empty() {
            source.normals = compute_face_normals(&source.vertices, &source.indices)?;
        }
        if source.uvs.is_empty() {
            source.uvs = vec![Point2::origin(); source.vertex_count()];
        }
        Ok(TransformMesh::new(self.settings.transform_matrix()).execute(&source))
    }
}
