//! Gesture sessions and the choice picker

use gestalt_ast::NodeId;
use gestalt_edit::Choice;
use gestalt_gesture::{Drag, Gesture, Point, Preview};

/// One pointer interaction, from press to release or cancellation
pub(crate) struct Session {
    pub target: NodeId,
    pub origin: Point,
    /// `None` for a click-only session on a hole no engine handles
    pub engine: Option<Box<dyn Gesture>>,
    /// Farthest the pointer got from the origin
    pub travel: f64,
    /// A continuous engine wrote to the tree during this session
    pub changed: bool,
    pub preview: Preview,
}

impl Session {
    pub fn new(target: NodeId, origin: Point, engine: Option<Box<dyn Gesture>>) -> Self {
        Self { target, origin, engine, travel: 0.0, changed: false, preview: Preview::none() }
    }

    pub fn track(&mut self, point: Point) {
        self.travel = self.travel.max(Drag::between(self.origin, point).distance());
    }
}

/// The open choice menu for a hole
#[derive(Debug, Clone, PartialEq)]
pub struct Picker {
    pub target: NodeId,
    pub choices: Vec<Choice>,
}
