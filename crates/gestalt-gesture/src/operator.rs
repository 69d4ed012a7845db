//! Operator cycling: drag distance walks the operators of the category

use gestalt_ast::{NodeId, NodeKind, Operator};
use tracing::trace;

use crate::{Drag, EditContext, Gesture, GestureConfig, Point, Preview, Release};

pub struct OperatorGesture {
    step: f64,
    target: Option<NodeId>,
    origin: Point,
    start: Option<Operator>,
}

impl OperatorGesture {
    pub fn new(config: &GestureConfig) -> Self {
        Self { step: config.operator_step, target: None, origin: Point::default(), start: None }
    }

    /// Index into a category of `count` operators at `distance`
    pub fn index(&self, distance: f64, count: usize) -> usize {
        let steps = (distance / self.step).floor().max(0.0) as usize;
        steps.min(count.saturating_sub(1))
    }
}

impl Gesture for OperatorGesture {
    fn name(&self) -> &'static str {
        "operator"
    }

    fn can_start(&self, ctx: &EditContext<'_>, target: NodeId) -> bool {
        matches!(ctx.tree.kind(target), Ok(NodeKind::Operator(_)))
    }

    fn start(&mut self, ctx: &mut EditContext<'_>, target: NodeId, origin: Point) -> bool {
        let Ok(NodeKind::Operator(op)) = ctx.tree.kind(target) else {
            return false;
        };
        self.start = Some(op.clone());
        self.origin = origin;
        self.target = Some(target);
        true
    }

    fn drag(&mut self, ctx: &mut EditContext<'_>, point: Point) -> Preview {
        let Some(target) = self.target else {
            return Preview::none();
        };
        let distance = Drag::between(self.origin, point).distance();
        let Ok(op) = ctx.tree.operator_mut(target) else {
            return Preview::none();
        };
        let symbols = op.category.symbols();
        let Some(symbol) = symbols.get(self.index(distance, symbols.len())) else {
            return Preview::none();
        };

        let changed = op.symbol != *symbol;
        op.symbol = symbol.to_string();
        trace!(node = %target, distance, symbol, "operator drag");
        Preview::live(ctx.lexicon.operator(symbol), changed)
    }

    fn end(&mut self, ctx: &mut EditContext<'_>) -> Release {
        let (Some(target), Some(start)) = (self.target.take(), self.start.take()) else {
            return Release::NoCandidate;
        };
        match ctx.tree.kind(target) {
            Ok(NodeKind::Operator(op)) if *op != start => Release::Committed,
            _ => Release::NoCandidate,
        }
    }

    fn cancel(&mut self, _ctx: &mut EditContext<'_>) {
        self.target = None;
        self.start = None;
    }

    fn is_continuous(&self) -> bool {
        true
    }
}
