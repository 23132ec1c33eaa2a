pub mod rotation;
pub mod transform;

pub use rotation::{euler_degrees, from_to_rotation, look_rotation, rotation_of, slerp_vectors};
pub use transform::Transform;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// 4x4 transformation matrix.
pub type Matrix4 = nalgebra::Matrix4<f64>;

/// Unit quaternion used for all orientations.
pub type Rotation = nalgebra::UnitQuaternion<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// World up axis (Y+). Node twist angles are measured against it.
pub const UP: Vector3 = Vector3::new(0.0, 1.0, 0.0);

/// World back axis (Z-).
pub const BACK: Vector3 = Vector3::new(0.0, 0.0, -1.0);

/// World forward axis (Z+). Orientations look down this axis.
pub const FORWARD: Vector3 = Vector3::new(0.0, 0.0, 1.0);
