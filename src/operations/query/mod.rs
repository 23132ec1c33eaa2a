mod bounding_box;
mod closest_point;
mod length;
mod point_on_curve;

pub use bounding_box::{Aabb, BoundingBox};
pub use closest_point::NearestPointOnSpline;
pub use length::SplineLength;
pub use point_on_curve::PointAtPercent;
