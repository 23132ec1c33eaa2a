pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod spline;
pub mod tessellation;

pub use error::{GeoloftError, Result};
pub use geometry::{CurvePoint, HandleMode, Node, Preserve};
pub use operations::loft::{ExtrudeSettings, ExtrudeTube, StampMesh, StampSettings};
pub use spline::{SampledCurve, Space, Spline, SplineSettings};
pub use tessellation::{Polyline, TriangleMesh};
