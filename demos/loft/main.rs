//! Geoloft demo — samples a small spline and lofts a tube and a stamped
//! strip along it, logging a summary of each step.
//!
//! Usage:
//! ```text
//! cargo run --example loft
//! RUST_LOG=geoloft=debug cargo run --example loft
//! ```

use geoloft::math::{Point3, Vector3};
use geoloft::{
    ExtrudeSettings, ExtrudeTube, GeoloftError, Node, SampledCurve, Space, Spline, SplineSettings,
    StampMesh, StampSettings, TriangleMesh,
};
use tracing::info;

fn main() -> Result<(), GeoloftError> {
    // Default: WARN for everything, INFO for the demo and the library.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("loft=info".parse().unwrap_or_default())
        .add_directive("geoloft=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let nodes: Vec<Node> = [
        (Point3::new(0.0, 0.0, 0.0), Vector3::new(2.0, 0.0, 2.0)),
        (Point3::new(6.0, 2.0, 4.0), Vector3::new(3.0, 0.0, -1.0)),
        (Point3::new(12.0, 0.0, 0.0), Vector3::new(1.0, 0.0, -3.0)),
    ]
    .into_iter()
    .map(|(point, handle)| Node::new(point, handle, -handle))
    .collect();
    let spline = Spline::new(nodes, SplineSettings::new(0.1, false)?)?;
    info!(points = spline.points().len(), length = spline.length(), "sampled spline");

    let mid = spline.sample(0.5, Space::World)?;
    info!(
        position = ?mid.position,
        tangent = ?mid.tangent,
        normal = ?mid.normal,
        "midpoint frame"
    );

    let tube = ExtrudeTube::new(ExtrudeSettings::visual()).execute(&spline)?;
    info!(vertices = tube.vertex_count(), triangles = tube.triangle_count(), "tube");

    let strip = TriangleMesh {
        vertices: vec![
            Point3::new(-0.5, 0.0, 0.0),
            Point3::new(0.5, 0.0, 0.0),
            Point3::new(0.5, 0.0, 1.0),
            Point3::new(-0.5, 0.0, 1.0),
        ],
        normals: Vec::new(),
        uvs: Vec::new(),
        indices: vec![[0, 2, 1], [0, 3, 2]],
    };
    let settings = StampSettings::new(strip)?;
    let road = StampMesh::new(&settings).execute(&spline)?;
    let bounds = road.bounds()?;
    info!(
        vertices = road.vertex_count(),
        triangles = road.triangle_count(),
        size = ?bounds.size(),
        "stamped strip"
    );

    let percent = spline.nearest_point(&Point3::new(6.0, 3.0, 4.0))?;
    info!(percent, "nearest point to the middle node");

    Ok(())
}
