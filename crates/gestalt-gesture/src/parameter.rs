//! Parameter list gestures
//!
//! Dragging down adds a parameter whose type is picked by distance: to the
//! left it closes the list, to the right it leaves a fresh slot after it.
//! Dragging up removes: right deletes the last parameter, left clears all.

use gestalt_ast::{NodeId, Ty};
use gestalt_edit::{is_param_slot, Payload};
use tracing::trace;

use crate::{commit, Drag, EditContext, Gesture, GestureConfig, ParameterConfig, Point, Preview, Release};

pub struct ParameterGesture {
    config: ParameterConfig,
    target: Option<NodeId>,
    origin: Point,
    candidate: Option<Payload>,
}

impl ParameterGesture {
    pub fn new(config: &GestureConfig) -> Self {
        Self { config: config.parameter.clone(), target: None, origin: Point::default(), candidate: None }
    }

    /// The list edit a release after `drag` would perform
    pub fn pick(&self, drag: Drag, types: &[Ty]) -> Option<Payload> {
        let angle = drag.angle()?;
        if (225.0..=315.0).contains(&angle) {
            let ty = *types.get(self.type_index(drag.distance(), types.len()))?;
            if drag.dx < 0.0 {
                Some(Payload::AddParam { ty })
            } else {
                Some(Payload::AddParamNext { ty })
            }
        } else if (45.0..=135.0).contains(&angle) {
            if drag.dx >= 0.0 {
                Some(Payload::DeleteLastParam)
            } else {
                Some(Payload::ClearParams)
            }
        } else {
            None
        }
    }

    fn type_index(&self, distance: f64, count: usize) -> usize {
        let count = count.max(1);
        let step = (self.config.span / count as f64).floor().max(1.0);
        let distance = distance.min(self.config.max_distance);
        ((distance / step).floor() as usize).min(count - 1)
    }
}

impl Gesture for ParameterGesture {
    fn name(&self) -> &'static str {
        "parameter"
    }

    fn can_start(&self, ctx: &EditContext<'_>, target: NodeId) -> bool {
        is_param_slot(ctx.tree, target)
    }

    fn start(&mut self, ctx: &mut EditContext<'_>, target: NodeId, origin: Point) -> bool {
        if !self.can_start(ctx, target) {
            return false;
        }
        self.target = Some(target);
        self.origin = origin;
        self.candidate = None;
        true
    }

    fn drag(&mut self, ctx: &mut EditContext<'_>, point: Point) -> Preview {
        if self.target.is_none() {
            return Preview::none();
        }
        let drag = Drag::between(self.origin, point);
        self.candidate = self.pick(drag, ctx.lexicon.declarable_types());
        trace!(dx = drag.dx, dy = drag.dy, candidate = ?self.candidate, "parameter drag");
        match &self.candidate {
            Some(Payload::AddParam { ty }) => Preview::candidate(format!("{} param", ctx.lexicon.type_name(*ty))),
            Some(Payload::AddParamNext { ty }) => {
                Preview::candidate(format!("{} param, ...", ctx.lexicon.type_name(*ty)))
            }
            Some(payload) => Preview::candidate(payload.describe()),
            None => Preview::none(),
        }
    }

    fn end(&mut self, ctx: &mut EditContext<'_>) -> Release {
        match (self.target.take(), self.candidate.take()) {
            (Some(target), Some(payload)) => commit(ctx, target, &payload),
            _ => Release::NoCandidate,
        }
    }

    fn cancel(&mut self, _ctx: &mut EditContext<'_>) {
        self.target = None;
        self.candidate = None;
    }
}
