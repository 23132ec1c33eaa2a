use std::f64::consts::TAU;

use tracing::debug;

use crate::error::{Result, TessellationError};
use crate::math::{Point2, Vector3, TOLERANCE};
use crate::spline::{SampledCurve, Space};
use crate::tessellation::{compute_face_normals, index_of, TriangleMesh};

/// Parameters of a radial tube extrusion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtrudeSettings {
    resolution: usize,
    radius: f64,
    segments: usize,
}

impl Default for ExtrudeSettings {
    fn default() -> Self {
        Self {
            resolution: 12,
            radius: 0.5,
            segments: 12,
        }
    }
}

impl ExtrudeSettings {
    /// Creates new extrusion settings.
    ///
    /// # Errors
    ///
    /// Returns [`TessellationError::InvalidParameters`] if `resolution < 3`,
    /// `segments < 1`, or `radius` is negative or not finite.
    pub fn new(resolution: usize, radius: f64, segments: usize) -> Result<Self> {
        if resolution < 3 {
            return Err(TessellationError::InvalidParameters(format!(
                "tube resolution must be at least 3, got {resolution}"
            ))
            .into());
        }
        if segments < 1 {
            return Err(TessellationError::InvalidParameters(
                "tube needs at least one segment".to_owned(),
            )
            .into());
        }
        if radius < 0.0 || !radius.is_finite() {
            return Err(TessellationError::InvalidParameters(format!(
                "tube radius must be non-negative, got {radius}"
            ))
            .into());
        }
        Ok(Self {
            resolution,
            radius,
            segments,
        })
    }

    /// Dense preset for rendering.
    #[must_use]
    pub fn visual() -> Self {
        Self {
            resolution: 12,
            radius: 0.5,
            segments: 64,
        }
    }

    /// Coarse preset for collision meshes.
    #[must_use]
    pub fn collision() -> Self {
        Self {
            resolution: 6,
            radius: 0.5,
            segments: 24,
        }
    }

    /// Vertices around each ring, not counting the seam duplicate.
    #[must_use]
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Returns the tube radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Number of ring-to-ring bands along the curve.
    #[must_use]
    pub fn segments(&self) -> usize {
        self.segments
    }
}

/// Sweeps a circle along a curve, producing an open tube.
///
/// Each ring duplicates its first vertex so the U coordinate can run from 0
/// to 1. The V coordinate advances with arc length measured in
/// circumferences, so a texture tiles at the same rate on long and short
/// curves.
pub struct ExtrudeTube {
    settings: ExtrudeSettings,
    space: Space,
}

impl ExtrudeTube {
    /// Creates a new `ExtrudeTube` operation producing local-space geometry.
    #[must_use]
    pub fn new(settings: ExtrudeSettings) -> Self {
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

    /// Executes the extrusion.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::Empty`](crate::error::CurveError::Empty) if the
    /// curve has no sampled points, or a tessellation error if the mesh
    /// would exceed the `u32` index range.
    #[allow(clippy::cast_precision_loss)]
    pub fn execute<C: SampledCurve + ?Sized>(&self, curve: &C) -> Result<TriangleMesh> {
        let (res, segs, radius) = (
            self.settings.resolution,
            self.settings.segments,
            self.settings.radius,
        );
        let ring = res + 1;
        let vertex_count = ring * (segs + 1);
        index_of(vertex_count)?;

        let circumference = if radius > TOLERANCE { TAU * radius } else { 1.0 };
        let v_scale = curve.length() / circumference;

        let mut mesh = TriangleMesh {
            vertices: Vec::with_capacity(vertex_count),
            normals: Vec::new(),
            uvs: Vec::with_capacity(vertex_count),
            indices: Vec::with_capacity(res * segs * 2),
        };

        for seg in 0..=segs {
            let percent = seg as f64 / segs as f64;
            let frame = curve.sample(percent, self.space)?;
            let orientation = frame.orientation();

            for v in 0..=res {
                let u = v as f64 / res as f64;
                let angle = TAU * u;
                let offset = orientation * Vector3::new(angle.sin(), angle.cos(), 0.0);
                mesh.vertices.push(frame.position + offset * radius);
                mesh.uvs.push(Point2::new(u, percent * v_scale));
            }
        }

        for seg in 0..segs {
            let base = seg * ring;
            for j in 0..res {
                let a = index_of(base + j)?;
                let b = index_of(base + j + 1)?;
                let c = index_of(base + j + ring)?;
                let d = index_of(base + j + ring + 1)?;
                mesh.indices.push([a, c, b]);
                mesh.indices.push([c, d, b]);
            }
        }

        mesh.normals = compute_face_normals(&mesh.vertices, &mesh.indices)?;
        weld_seam_normals(&mut mesh.normals, ring);

        debug!(
            resolution = res,
            segments = segs,
            radius,
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "Extruded tube"
        );
        Ok(mesh)
    }
}

/// Gives both copies of each ring's seam vertex their shared average normal.
fn weld_seam_normals(normals: &mut [Vector3], ring: usize) {
    for start in (0..normals.len()).step_by(ring) {
        let end = start + ring - 1;
        let shared = (normals[start] + normals[end])
            .try_normalize(TOLERANCE)
            .unwrap_or_else(Vector3::zeros);
        normals[start] = shared;
        normals[end] = shared;
    }
}
