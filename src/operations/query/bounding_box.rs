use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3};

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl Aabb {
    /// Returns the extent along each axis.
    #[must_use]
    pub fn size(&self) -> Vector3 {
        self.max - self.min
    }
}

/// Computes the axis-aligned bounding box of a point set.
pub struct BoundingBox<'a> {
    points: &'a [Point3],
}

impl<'a> BoundingBox<'a> {
    /// Creates a new `BoundingBox` query.
    #[must_use]
    pub fn new(points: &'a [Point3]) -> Self {
        Self { points }
    }

    /// Executes the query, returning the AABB.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if the point set is empty.
    pub fn execute(&self) -> Result<Aabb> {
        let Some(first) = self.points.first() else {
            return Err(GeometryError::Degenerate("bounding box of no points".into()).into());
        };

        Ok(self.points.iter().skip(1).fold(
            Aabb {
                min: *first,
                max: *first,
            },
            |acc, p| Aabb {
                min: acc.min.inf(p),
                max: acc.max.sup(p),
            },
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn box_spans_all_points() {
        let points = [
            Point3::new(1.0, -2.0, 0.5),
            Point3::new(-1.0, 4.0, 0.0),
            Point3::new(0.0, 0.0, 3.0),
        ];
        let aabb = BoundingBox::new(&points).execute().unwrap();
        assert_abs_diff_eq!(aabb.min, Point3::new(-1.0, -2.0, 0.0));
        assert_abs_diff_eq!(aabb.max, Point3::new(1.0, 4.0, 3.0));
        assert_abs_diff_eq!(aabb.size(), Vector3::new(2.0, 6.0, 3.0));
    }

    #[test]
    fn empty_point_set_fails() {
        assert!(BoundingBox::new(&[]).execute().is_err());
    }
}
