//! The spline component: a node sequence plus its cached sampling.

use tracing::debug;

use crate::error::{CurveError, Result};
use crate::geometry::{CurvePoint, Node};
use crate::math::{Point3, Transform, Vector3};
use crate::operations::query::{NearestPointOnSpline, PointAtPercent, SplineLength};
use crate::operations::sampling::SampleSpline;

/// Smallest accepted sample distance.
pub const MIN_SAMPLE_DISTANCE: f64 = 0.01;

/// Coordinate space of sampled output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Space {
    /// The spline's own space, in which nodes are authored.
    #[default]
    Local,
    /// Local space mapped through the spline's transform.
    World,
}

/// Percent-based access to a sampled curve.
///
/// Mesh builders depend on this rather than on [`Spline`] itself.
pub trait SampledCurve {
    /// Returns the oriented point at `percent ∈ [0, 1]` along the curve.
    ///
    /// # Errors
    ///
    /// Returns an error if the curve has no sampled points.
    fn sample(&self, percent: f64, space: Space) -> Result<CurvePoint>;

    /// Returns the arc length of the curve, zero when it is empty.
    fn length(&self) -> f64;
}

/// Sampling configuration of a spline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplineSettings {
    sample_distance: f64,
    closed: bool,
}

impl Default for SplineSettings {
    fn default() -> Self {
        Self {
            sample_distance: 0.1,
            closed: false,
        }
    }
}

impl SplineSettings {
    /// Creates new settings.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidSampleDistance`] if `sample_distance` is
    /// below [`MIN_SAMPLE_DISTANCE`] or not finite.
    pub fn new(sample_distance: f64, closed: bool) -> Result<Self> {
        if !(sample_distance >= MIN_SAMPLE_DISTANCE && sample_distance.is_finite()) {
            return Err(CurveError::InvalidSampleDistance(sample_distance).into());
        }
        Ok(Self {
            sample_distance,
            closed,
        })
    }

    /// Returns the spacing between sampled points.
    #[must_use]
    pub fn sample_distance(&self) -> f64 {
        self.sample_distance
    }

    /// Returns whether the last node connects back to the first.
    #[must_use]
    pub fn closed(&self) -> bool {
        self.closed
    }
}

/// A Bezier spline through a sequence of nodes.
///
/// The sampled points and length are derived data: every mutation
/// regenerates them wholesale, so readers always see a consistent snapshot.
#[derive(Debug, Clone)]
pub struct Spline {
    nodes: Vec<Node>,
    settings: SplineSettings,
    transform: Transform,
    points: Vec<CurvePoint>,
    length: f64,
}

impl Default for Spline {
    /// A short S-curve between two nodes, open, sampled every `0.1`.
    fn default() -> Self {
        let forward = Vector3::new(0.0, 0.0, 1.0);
        let nodes = vec![
            Node::new(Point3::new(1.0, 0.0, -1.0), forward, -forward),
            Node::new(Point3::new(-1.0, 0.0, 1.0), forward, -forward),
        ];
        let settings = SplineSettings::default();
        let points = SampleSpline::new(&nodes, settings.sample_distance, settings.closed)
            .execute()
            .unwrap_or_default();
        let length = SplineLength::new(settings.sample_distance).execute(&points);
        Self {
            nodes,
            settings,
            transform: Transform::identity(),
            points,
            length,
        }
    }
}

impl Spline {
    /// Creates a spline and samples it.
    ///
    /// # Errors
    ///
    /// Returns an error if sampling fails.
    pub fn new(nodes: Vec<Node>, settings: SplineSettings) -> Result<Self> {
        let mut spline = Self {
            nodes: Vec::new(),
            settings,
            transform: Transform::identity(),
            points: Vec::new(),
            length: 0.0,
        };
        spline.rebuild(nodes, settings)?;
        Ok(spline)
    }

    /// Replaces the nodes and settings, then regenerates the sampling.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidSampleDistance`] for an invalid sample
    /// distance. The spline is left untouched on error.
    pub fn recompute(
        &mut self,
        nodes: Vec<Node>,
        closed: bool,
        sample_distance: f64,
    ) -> Result<()> {
        let settings = SplineSettings::new(sample_distance, closed)?;
        self.rebuild(nodes, settings)
    }

    /// Replaces the nodes.
    ///
    /// # Errors
    ///
    /// Returns an error if sampling fails.
    pub fn set_nodes(&mut self, nodes: Vec<Node>) -> Result<()> {
        self.rebuild(nodes, self.settings)
    }

    /// Edits a single node in place.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::NodeIndexOutOfRange`] for a bad index.
    pub fn update_node(&mut self, index: usize, edit: impl FnOnce(&mut Node)) -> Result<()> {
        let len = self.nodes.len();
        let mut nodes = self.nodes.clone();
        let node = nodes
            .get_mut(index)
            .ok_or(CurveError::NodeIndexOutOfRange { index, len })?;
        edit(node);
        self.rebuild(nodes, self.settings)
    }

    /// Opens or closes the spline.
    ///
    /// # Errors
    ///
    /// Returns an error if sampling fails.
    pub fn set_closed(&mut self, closed: bool) -> Result<()> {
        let settings = SplineSettings {
            closed,
            ..self.settings
        };
        self.rebuild(self.nodes.clone(), settings)
    }

    /// Changes the sample distance.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidSampleDistance`] for an invalid distance.
    pub fn set_sample_distance(&mut self, sample_distance: f64) -> Result<()> {
        let settings = SplineSettings::new(sample_distance, self.settings.closed)?;
        self.rebuild(self.nodes.clone(), settings)
    }

    /// Sets the local-to-world transform. The sampling is unaffected.
    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    /// Returns the local-to-world transform.
    #[must_use]
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Returns the control nodes.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the sampled points in local space.
    #[must_use]
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    /// Returns the curve length, zero when fewer than two nodes exist.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Returns the sampling settings.
    #[must_use]
    pub fn settings(&self) -> SplineSettings {
        self.settings
    }

    /// Returns whether the spline is closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.settings.closed
    }

    /// Returns the curve percent nearest to a world-space point.
    ///
    /// # Errors
    ///
    /// Returns an error if the spline is empty or its transform cannot be
    /// inverted.
    pub fn nearest_point(&self, world_point: &Point3) -> Result<f64> {
        let local = self.transform.inverse_transform_point(world_point)?;
        NearestPointOnSpline::new(local, self.settings.closed).execute(&self.points)
    }

    fn rebuild(&mut self, nodes: Vec<Node>, settings: SplineSettings) -> Result<()> {
        let points =
            SampleSpline::new(&nodes, settings.sample_distance, settings.closed).execute()?;
        let length = SplineLength::new(settings.sample_distance).execute(&points);
        debug!(nodes = nodes.len(), points = points.len(), length, "Recomputed spline");

        self.nodes = nodes;
        self.settings = settings;
        self.points = points;
        self.length = length;
        Ok(())
    }
}

impl SampledCurve for Spline {
    fn sample(&self, percent: f64, space: Space) -> Result<CurvePoint> {
        let point = PointAtPercent::new(percent).execute(&self.points)?;
        Ok(match space {
            Space::Local => point,
            Space::World => point.transformed(&self.transform),
        })
    }

    fn length(&self) -> f64 {
        self.length
    }
}
