use crate::math::{Point3, Vector3, TOLERANCE};

/// How a node's two handles react when one of them is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandleMode {
    /// The backward handle is always the negated forward handle.
    Mirrored,
    /// The handles point in opposite directions but keep their own lengths.
    #[default]
    Aligned,
    /// The handles are independent.
    Free,
}

/// Which handle is kept when a new [`HandleMode`] re-derives the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preserve {
    /// Keep the forward handle and rebuild the backward one.
    #[default]
    Forward,
    /// Keep the backward handle and rebuild the forward one.
    Backward,
}

/// A control node of a Bezier spline.
///
/// Handles are offsets relative to [`Node::point`]. The coupling between
/// them is enforced by the mutators, never by the reader, so a node read
/// back from storage is used as-is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    mode: HandleMode,
    point: Point3,
    forward: Vector3,
    backward: Vector3,
    twist: f64,
}

impl Node {
    /// Creates an `Aligned` node with no twist.
    ///
    /// The handles are stored exactly as given.
    #[must_use]
    pub fn new(point: Point3, forward: Vector3, backward: Vector3) -> Self {
        Self::with_mode(HandleMode::Aligned, point, forward, backward, 0.0)
    }

    /// Creates a node with every field specified.
    ///
    /// * `twist` - Roll of the curve normal at this node, in degrees.
    #[must_use]
    pub fn with_mode(
        mode: HandleMode,
        point: Point3,
        forward: Vector3,
        backward: Vector3,
        twist: f64,
    ) -> Self {
        Self {
            mode,
            point,
            forward,
            backward,
            twist,
        }
    }

    /// Returns the node position.
    #[must_use]
    pub fn point(&self) -> Point3 {
        self.point
    }

    /// Moves the node. Handles are relative and move with it.
    pub fn set_point(&mut self, point: Point3) {
        self.point = point;
    }

    /// Returns the twist angle in degrees.
    #[must_use]
    pub fn twist(&self) -> f64 {
        self.twist
    }

    /// Sets the twist angle in degrees.
    pub fn set_twist(&mut self, twist: f64) {
        self.twist = twist;
    }

    /// Returns the handle mode.
    #[must_use]
    pub fn mode(&self) -> HandleMode {
        self.mode
    }

    /// Returns the outgoing handle offset.
    #[must_use]
    pub fn forward(&self) -> Vector3 {
        self.forward
    }

    /// Returns the incoming handle offset.
    #[must_use]
    pub fn backward(&self) -> Vector3 {
        self.backward
    }

    /// Returns the absolute position of the outgoing handle.
    #[must_use]
    pub fn forward_point(&self) -> Point3 {
        self.point + self.forward
    }

    /// Returns the absolute position of the incoming handle.
    #[must_use]
    pub fn backward_point(&self) -> Point3 {
        self.point + self.backward
    }

    /// Sets the outgoing handle and re-derives the incoming one from the mode.
    pub fn set_forward(&mut self, forward: Vector3) {
        self.forward = forward;
        self.backward = self.coupled(&self.forward, &self.backward);
    }

    /// Sets the incoming handle and re-derives the outgoing one from the mode.
    pub fn set_backward(&mut self, backward: Vector3) {
        self.backward = backward;
        self.forward = self.coupled(&self.backward, &self.forward);
    }

    /// Switches the handle mode, immediately rebuilding the handle that is
    /// not preserved.
    pub fn set_handle_mode(&mut self, mode: HandleMode, preserve: Preserve) {
        self.mode = mode;
        match preserve {
            Preserve::Forward => self.backward = self.coupled(&self.forward, &self.backward),
            Preserve::Backward => self.forward = self.coupled(&self.backward, &self.forward),
        }
    }

    /// Returns the handle opposite `driver` as the current mode dictates.
    fn coupled(&self, driver: &Vector3, other: &Vector3) -> Vector3 {
        match self.mode {
            HandleMode::Mirrored => -driver,
            HandleMode::Aligned => match driver.try_normalize(TOLERANCE) {
                Some(dir) => -dir * other.norm(),
                // A collapsed driver carries no direction to align to.
                None => *other,
            },
            HandleMode::Free => *other,
        }
    }
}
