mod transform_mesh;

pub use transform_mesh::TransformMesh;
