mod extrude_tube;
mod stamp_mesh;

pub use extrude_tube::{ExtrudeSettings, ExtrudeTube};
pub use stamp_mesh::{StampMesh, StampSettings};
