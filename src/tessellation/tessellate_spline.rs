use crate::error::Result;
use crate::spline::{Space, Spline};

use super::Polyline;

/// Tessellates a spline into a polyline through its sampled points.
pub struct TessellateSpline<'a> {
    spline: &'a Spline,
    space: Space,
}

impl<'a> TessellateSpline<'a> {
    /// Creates a new `TessellateSpline` operation producing local-space points.
    #[must_use]
    pub fn new(spline: &'a Spline) -> Self {
        Self {
            spline,
            space: Space::Local,
        }
    }

    /// Selects the space the polyline is emitted in.
    #[must_use]
    pub fn with_space(mut self, space: Space) -> Self {
        self.space = space;
        self
    }

    /// Executes the tessellation, returning a polyline.
    ///
    /// A spline with fewer than two nodes yields an empty polyline.
    ///
    /// # Errors
    ///
    /// Returns an error if the operation fails.
    pub fn execute(&self) -> Result<Polyline> {
        let transform = self.spline.transform();
        let points = self
            .spline
            .points()
            .iter()
            .map(|p| match self.space {
                Space::Local => p.position,
                Space::World => transform.transform_point(&p.position),
            })
            .collect();
        Ok(Polyline { points })
    }
}
