#![allow(clippy::unwrap_used)]

use approx::assert_abs_diff_eq;
use geoloft::math::{Point3, Transform, Vector3};
use geoloft::tessellation::TessellateSpline;
use geoloft::{
    ExtrudeSettings, ExtrudeTube, HandleMode, Node, Preserve, SampledCurve, Space, Spline,
    SplineSettings, StampMesh, StampSettings, TriangleMesh,
};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn v(x: f64, y: f64, z: f64) -> Vector3 {
    Vector3::new(x, y, z)
}

fn straight(k: f64, sample_distance: f64) -> Spline {
    let nodes = vec![
        Node::new(Point3::origin(), v(k, 0.0, 0.0), v(-k, 0.0, 0.0)),
        Node::new(Point3::new(10.0, 0.0, 0.0), v(k, 0.0, 0.0), v(-k, 0.0, 0.0)),
    ];
    Spline::new(nodes, SplineSettings::new(sample_distance, false).unwrap()).unwrap()
}

/// Three nodes bending through the XZ plane with a rise in Y.
fn wave(sample_distance: f64, closed: bool) -> Spline {
    let nodes = vec![
        Node::new(Point3::new(0.0, 0.0, 0.0), v(2.0, 0.0, 2.0), v(-2.0, 0.0, -2.0)),
        Node::new(Point3::new(6.0, 2.0, 4.0), v(3.0, 0.0, -1.0), v(-3.0, 0.0, 1.0)),
        Node::new(Point3::new(12.0, 0.0, 0.0), v(1.0, -1.0, -3.0), v(-1.0, 1.0, 3.0)),
    ];
    Spline::new(nodes, SplineSettings::new(sample_distance, closed).unwrap()).unwrap()
}

// ── Sampling ──

#[test]
fn open_spline_ends_on_its_nodes() {
    init_tracing();
    let spline = wave(0.1, false);
    let points = spline.points();
    assert_abs_diff_eq!(points[0].position, Point3::origin(), epsilon = 1e-9);
    assert_abs_diff_eq!(
        points.last().unwrap().position,
        Point3::new(12.0, 0.0, 0.0),
        epsilon = 1e-9
    );
}

#[test]
fn closed_spline_returns_to_start() {
    init_tracing();
    let spline = wave(0.1, true);
    let points = spline.points();
    assert_abs_diff_eq!(points[0].position, points.last().unwrap().position, epsilon = 1e-9);
}

#[test]
fn straight_spline_has_expected_length_and_tangents() {
    init_tracing();
    for k in [0.5, 2.0, 4.0] {
        let spline = straight(k, 0.1);
        assert_abs_diff_eq!(spline.length(), 10.0, epsilon = 0.1);
        for p in spline.points() {
            assert_abs_diff_eq!(p.tangent, Vector3::x(), epsilon = 1e-9);
        }
    }
}

#[test]
fn curved_spline_is_evenly_spaced() {
    init_tracing();
    let sample_distance = 0.1;
    let spline = wave(sample_distance, false);
    let points = spline.points();
    assert!(points.len() > 100);
    for pair in points[..points.len() - 1].windows(2) {
        let gap = (pair[1].position - pair[0].position).norm();
        assert_abs_diff_eq!(gap, sample_distance, epsilon = sample_distance * 0.02);
    }
}

#[test]
fn frames_stay_orthonormal_along_curve() {
    init_tracing();
    let spline = wave(0.1, false);
    for p in spline.points() {
        assert_abs_diff_eq!(p.tangent.norm(), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(p.normal.norm(), 1.0, epsilon = 1e-6);
        // Interpolated frames drift from orthogonal by the square of the step angle.
        assert_abs_diff_eq!(p.tangent.dot(&p.normal), 0.0, epsilon = 1e-2);
        assert_abs_diff_eq!(p.bitangent, p.normal.cross(&p.tangent), epsilon = 1e-9);
    }
}

#[test]
fn normals_do_not_jump_between_segments() {
    init_tracing();
    let spline = wave(0.1, false);
    for pair in spline.points().windows(2) {
        assert!(pair[0].normal.dot(&pair[1].normal) > 0.9);
    }
}

#[test]
fn sampling_ends_are_exact() {
    init_tracing();
    let spline = wave(0.1, false);
    let points = spline.points();
    let first = spline.sample(0.0, Space::Local).unwrap();
    let last = spline.sample(1.0, Space::Local).unwrap();
    assert_abs_diff_eq!(first.position, points[0].position, epsilon = 1e-12);
    assert_eq!(last, *points.last().unwrap());
}

#[test]
fn world_sampling_applies_transform() {
    init_tracing();
    let mut spline = straight(2.0, 0.1);
    spline.set_transform(Transform::new(
        v(0.0, 5.0, 0.0),
        geoloft::math::Rotation::identity(),
        v(1.0, 1.0, 1.0),
    ));
    let p = spline.sample(0.5, Space::World).unwrap();
    assert_abs_diff_eq!(p.position.y, 5.0, epsilon = 1e-9);
    let polyline = TessellateSpline::new(&spline).with_space(Space::World).execute().unwrap();
    assert_eq!(polyline.points.len(), spline.points().len());
}

#[test]
fn too_few_nodes_leave_spline_empty() {
    init_tracing();
    let spline = Spline::new(
        vec![Node::new(Point3::origin(), Vector3::x(), -Vector3::x())],
        SplineSettings::default(),
    )
    .unwrap();
    assert!(spline.points().is_empty());
    assert_abs_diff_eq!(spline.length(), 0.0);
    assert!(spline.sample(0.5, Space::Local).is_err());
}

#[test]
fn invalid_sample_distance_is_rejected() {
    assert!(SplineSettings::new(0.0, false).is_err());
    assert!(SplineSettings::new(-1.0, false).is_err());
    let mut spline = straight(2.0, 0.1);
    assert!(spline.set_sample_distance(0.0).is_err());
    assert_abs_diff_eq!(spline.settings().sample_distance(), 0.1);
}

// ── Nearest point ──

#[test]
fn nearest_point_projects_onto_straight_spline() {
    init_tracing();
    let spline = straight(2.0, 0.1);
    let percent = spline.nearest_point(&Point3::new(5.0, 1.0, 0.0)).unwrap();
    assert_abs_diff_eq!(percent, 0.5, epsilon = 1e-3);
}

#[test]
fn nearest_point_lands_near_sampled_point() {
    init_tracing();
    let spline = wave(0.1, false);
    let target = spline.sample(0.3, Space::Local).unwrap();
    let query = target.position + target.normal * 0.2;
    let percent = spline.nearest_point(&query).unwrap();
    assert_abs_diff_eq!(percent, 0.3, epsilon = 0.02);
}

/// Four nodes approximating a circle of radius 5 in the XZ plane.
fn hoop() -> Spline {
    let k = 5.0 * 4.0 / 3.0 * std::f64::consts::FRAC_PI_8.tan();
    let nodes = (0..4)
        .map(|i| {
            let angle = std::f64::consts::FRAC_PI_2 * f64::from(i);
            let handle = v(-angle.sin(), 0.0, angle.cos()) * k;
            Node::new(
                Point3::new(5.0 * angle.cos(), 0.0, 5.0 * angle.sin()),
                handle,
                -handle,
            )
        })
        .collect();
    Spline::new(nodes, SplineSettings::new(0.1, true).unwrap()).unwrap()
}

#[test]
fn nearest_point_at_open_end_is_one() {
    init_tracing();
    let spline = straight(2.0, 1.0);
    for query in [Point3::new(10.0, 1.0, 0.0), Point3::new(11.0, 0.0, 0.0)] {
        let percent = spline.nearest_point(&query).unwrap();
        assert_abs_diff_eq!(percent, 1.0, epsilon = 1e-9);
        let end = spline.sample(percent, Space::Local).unwrap();
        assert_abs_diff_eq!(end.position, Point3::new(10.0, 0.0, 0.0), epsilon = 1e-9);
    }
}

#[test]
fn nearest_point_on_closed_spline_around_seam() {
    init_tracing();
    let spline = hoop();
    for target in [0.25, 0.6, 0.99, 0.995, 0.01] {
        let query = spline.sample(target, Space::Local).unwrap().position + Vector3::y() * 0.3;
        let percent = spline.nearest_point(&query).unwrap();
        assert!((0.0..1.0).contains(&percent), "percent = {percent}");
        assert_abs_diff_eq!(percent, target, epsilon = 1e-3);
    }
}

// ── Lofting ──

#[test]
fn tube_has_expected_topology() {
    init_tracing();
    let spline = wave(0.1, false);
    let (res, segs) = (10, 32);
    let mesh = ExtrudeTube::new(ExtrudeSettings::new(res, 0.4, segs).unwrap())
        .execute(&spline)
        .unwrap();

    assert_eq!(mesh.vertex_count(), (res + 1) * (segs + 1));
    assert_eq!(mesh.triangle_count() * 3, res * 6 * segs);
    assert!(mesh.validate().is_ok());
    for ring in 0..=segs {
        let start = ring * (res + 1);
        assert_eq!(mesh.normals[start], mesh.normals[start + res]);
    }
}

#[test]
fn tube_rejects_empty_spline() {
    let spline = Spline::new(Vec::new(), SplineSettings::default()).unwrap();
    assert!(ExtrudeTube::new(ExtrudeSettings::visual()).execute(&spline).is_err());
    assert!(ExtrudeSettings::new(2, 0.5, 4).is_err());
    assert!(ExtrudeSettings::new(3, 0.5, 0).is_err());
}

fn slab(depth: f64) -> TriangleMesh {
    TriangleMesh {
        vertices: vec![
            Point3::new(-1.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, depth),
            Point3::new(-1.0, 0.0, depth),
        ],
        normals: Vec::new(),
        uvs: Vec::new(),
        indices: vec![[0, 2, 1], [0, 3, 2]],
    }
}

#[test]
fn stretched_stamp_spans_curve_length() {
    init_tracing();
    let spline = straight(2.0, 0.1);
    let settings = StampSettings::new(slab(7.0)).unwrap();
    let mesh = StampMesh::new(&settings).execute(&spline).unwrap();
    let bounds = mesh.bounds().unwrap();
    assert_abs_diff_eq!(bounds.size().x, spline.length(), epsilon = 1e-6);
}

#[test]
fn stamp_placement_is_applied_before_duplication() {
    init_tracing();
    let spline = straight(2.0, 0.1);
    // Scaled to a depth of 3, three whole copies fit along the curve.
    let settings = StampSettings::new(slab(1.0))
        .unwrap()
        .with_scale(v(1.0, 1.0, 3.0))
        .with_stretch_to_fit(false);
    let mesh = StampMesh::new(&settings).execute(&spline).unwrap();
    assert_eq!(mesh.vertex_count(), 4 * 3);
    assert_eq!(mesh.triangle_count(), 2 * 3);
    let bounds = mesh.bounds().unwrap();
    assert_abs_diff_eq!(bounds.max.x, 9.0, epsilon = 1e-6);
    assert!(mesh.validate().is_ok());
}

// ── Nodes ──

#[test]
fn mirrored_handles_stay_opposite() {
    let mut node = Node::new(Point3::origin(), v(1.0, 0.0, 0.0), v(-3.0, 0.0, 0.0));
    node.set_handle_mode(HandleMode::Mirrored, Preserve::Forward);
    node.set_forward(v(0.5, 2.0, -1.0));
    assert_abs_diff_eq!(node.backward(), -node.forward(), epsilon = 1e-12);
}

#[test]
fn aligned_handles_keep_backward_magnitude() {
    let mut node = Node::new(Point3::origin(), v(1.0, 0.0, 0.0), v(-3.0, 0.0, 0.0));
    assert_eq!(node.mode(), HandleMode::Aligned);
    node.set_forward(v(0.0, 4.0, 0.0));
    assert_abs_diff_eq!(node.backward(), v(0.0, -3.0, 0.0), epsilon = 1e-12);
}

#[test]
fn editing_a_node_resamples_the_spline() {
    init_tracing();
    let mut spline = straight(2.0, 0.1);
    spline
        .update_node(1, |node| node.set_point(Point3::new(20.0, 0.0, 0.0)))
        .unwrap();
    assert_abs_diff_eq!(spline.length(), 20.0, epsilon = 0.1);
    assert!(spline.update_node(5, |_| {}).is_err());
}
