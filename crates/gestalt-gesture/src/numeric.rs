//! Numeric literal scrubbing
//!
//! Dragging right past the dead zone while staying level adds whole units at
//! an accelerating rate. Anywhere else the horizontal offset picks a decade
//! and the vertical offset a coefficient. Bool literals flip with the
//! horizontal direction.

use gestalt_ast::{LiteralValue, NodeId, NodeKind, Ty};
use tracing::trace;

use crate::{Drag, EditContext, Gesture, GestureConfig, NumericConfig, Point, Preview, Release};

pub struct NumericGesture {
    config: NumericConfig,
    target: Option<NodeId>,
    origin: Point,
    start: LiteralValue,
    ty: Ty,
}

impl NumericGesture {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            config: config.numeric.clone(),
            target: None,
            origin: Point::default(),
            start: LiteralValue::Number(0.0),
            ty: Ty::Float,
        }
    }

    /// Value of a number literal of type `ty` starting at `start` after `drag`
    pub fn scrub(&self, start: f64, ty: Ty, drag: Drag) -> f64 {
        let delta = self.delta(drag, ty == Ty::Int);
        if delta == 0.0 {
            return start;
        }
        let value = start + delta;
        if ty == Ty::Int {
            value.round()
        } else {
            let scale = 10f64.powi(self.config.fraction_digits as i32);
            (value * scale).round() / scale
        }
    }

    fn delta(&self, drag: Drag, int: bool) -> f64 {
        let c = &self.config;
        let Drag { dx, dy } = drag;

        if dx > c.dead_zone_x && dy.abs() <= c.dead_zone_y {
            let travel = dx - c.dead_zone_x;
            return (travel + 10f64.powf(travel / 10.0)).round();
        }

        let mut exponent = ((dx / c.exponent_step).floor() as i32).clamp(-c.max_exponent, c.max_exponent);
        if int {
            exponent = exponent.max(0);
        }
        let coefficient = if dy.abs() <= c.dead_zone_y {
            0.0
        } else if dy > 0.0 {
            ((dy - c.dead_zone_y) / c.coefficient_step).floor()
        } else {
            ((dy + c.dead_zone_y) / c.coefficient_step).ceil()
        };
        let coefficient = coefficient.clamp(-c.max_coefficient, c.max_coefficient);
        coefficient * 10f64.powi(exponent)
    }

    fn toggle(&self, start: bool, drag: Drag) -> bool {
        if drag.dx > self.config.dead_zone_x {
            !start
        } else {
            start
        }
    }
}

impl Gesture for NumericGesture {
    fn name(&self) -> &'static str {
        "numeric"
    }

    fn can_start(&self, ctx: &EditContext<'_>, target: NodeId) -> bool {
        matches!(ctx.tree.kind(target), Ok(NodeKind::Literal(_)))
    }

    fn start(&mut self, ctx: &mut EditContext<'_>, target: NodeId, origin: Point) -> bool {
        let Ok(NodeKind::Literal(literal)) = ctx.tree.kind(target) else {
            return false;
        };
        self.start = literal.value;
        self.ty = literal.ty;
        self.origin = origin;
        self.target = Some(target);
        true
    }

    fn drag(&mut self, ctx: &mut EditContext<'_>, point: Point) -> Preview {
        let Some(target) = self.target else {
            return Preview::none();
        };
        let drag = Drag::between(self.origin, point);
        let value = match self.start {
            LiteralValue::Number(start) => LiteralValue::Number(self.scrub(start, self.ty, drag)),
            LiteralValue::Bool(start) => LiteralValue::Bool(self.toggle(start, drag)),
        };

        let Ok(literal) = ctx.tree.literal_mut(target) else {
            return Preview::none();
        };
        let changed = literal.value != value;
        literal.value = value;
        let label = ctx.lexicon.format_literal(literal);
        trace!(node = %target, dx = drag.dx, dy = drag.dy, %label, "numeric drag");
        Preview::live(label, changed)
    }

    fn end(&mut self, ctx: &mut EditContext<'_>) -> Release {
        let Some(target) = self.target.take() else {
            return Release::NoCandidate;
        };
        match ctx.tree.kind(target) {
            Ok(NodeKind::Literal(literal)) if literal.value != self.start => Release::Committed,
            _ => Release::NoCandidate,
        }
    }

    fn cancel(&mut self, _ctx: &mut EditContext<'_>) {
        self.target = None;
    }

    fn is_continuous(&self) -> bool {
        true
    }
}
