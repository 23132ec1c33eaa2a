pub mod curve;
pub mod curve_point;
pub mod node;

pub use curve::{CubicBezier, Curve};
pub use curve_point::CurvePoint;
pub use node::{HandleMode, Node, Preserve};
