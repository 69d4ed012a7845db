//! Directional expression insertion
//!
//! Bands name a kind of pick; picks are resolved against the choices the
//! hole offers when the gesture starts, so a gesture can only insert what the
//! picker would have offered.

use gestalt_ast::{HoleRole, NodeId};
use gestalt_edit::{choices, Choice, Payload};
use tracing::trace;

use crate::{commit, lookup, Drag, EditContext, ExpressionPick, Gesture, GestureConfig, Point, Preview, Release, SectorTable};

pub struct ExpressionGesture {
    table: SectorTable<ExpressionPick>,
    step: f64,
    target: Option<NodeId>,
    origin: Point,
    offered: Vec<(String, Payload)>,
    candidate: Option<usize>,
}

impl ExpressionGesture {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            table: config.expression.clone(),
            step: config.expression_step,
            target: None,
            origin: Point::default(),
            offered: Vec::new(),
            candidate: None,
        }
    }

    /// Index into `offered` selected by `drag`
    fn resolve(&self, drag: Drag) -> Option<usize> {
        let distance = drag.distance();
        let pick = lookup(&self.table, drag.sector()?, distance)?;
        let matching: Vec<usize> = self
            .offered
            .iter()
            .enumerate()
            .filter(|(_, (_, payload))| matches_pick(pick, payload))
            .map(|(i, _)| i)
            .collect();

        let nth = match pick {
            ExpressionPick::Variable | ExpressionPick::Builtin | ExpressionPick::Function => {
                ((distance / self.step).floor() as usize).min(matching.len().saturating_sub(1))
            }
            _ => 0,
        };
        matching.get(nth).copied()
    }
}

/// Whether `payload` is what `pick` asks for. Under the mutation hint the
/// offered variables are mutators, which `Variable` picks too.
fn matches_pick(pick: &ExpressionPick, payload: &Payload) -> bool {
    match (pick, payload) {
        (ExpressionPick::Number, Payload::Number { .. }) => true,
        (ExpressionPick::Bool { value }, Payload::Bool { value: offered }) => value == offered,
        (ExpressionPick::Math, Payload::Math { .. }) => true,
        (ExpressionPick::Compare { operand }, Payload::Compare { operand: offered }) => operand == offered,
        (ExpressionPick::Variable, Payload::Variable { .. } | Payload::Mutate { .. }) => true,
        (ExpressionPick::Builtin, Payload::CallBuiltin { .. }) => true,
        (ExpressionPick::Function, Payload::CallFunction { .. }) => true,
        _ => false,
    }
}

impl Gesture for ExpressionGesture {
    fn name(&self) -> &'static str {
        "expression"
    }

    fn can_start(&self, ctx: &EditContext<'_>, target: NodeId) -> bool {
        ctx.tree.as_hole(target).is_some_and(|hole| hole.role == HoleRole::Expression)
    }

    fn start(&mut self, ctx: &mut EditContext<'_>, target: NodeId, origin: Point) -> bool {
        if !self.can_start(ctx, target) {
            return false;
        }
        let menu = choices(ctx.tree, ctx.lexicon, target);
        self.offered = Choice::leaves(&menu)
            .into_iter()
            .filter_map(|choice| choice.payload.clone().map(|payload| (choice.label.clone(), payload)))
            .collect();
        self.target = Some(target);
        self.origin = origin;
        self.candidate = None;
        true
    }

    fn drag(&mut self, _ctx: &mut EditContext<'_>, point: Point) -> Preview {
        if self.target.is_none() {
            return Preview::none();
        }
        let drag = Drag::between(self.origin, point);
        self.candidate = self.resolve(drag);
        let label = self.candidate.and_then(|i| self.offered.get(i)).map(|(label, _)| label.as_str());
        trace!(dx = drag.dx, dy = drag.dy, candidate = ?label, "expression drag");
        match label {
            Some(label) => Preview::candidate(label),
            None => Preview::none(),
        }
    }

    fn end(&mut self, ctx: &mut EditContext<'_>) -> Release {
        let target = self.target.take();
        let candidate = self.candidate.take().and_then(|i| self.offered.get(i));
        match (target, candidate) {
            (Some(target), Some((_, payload))) => commit(ctx, target, payload),
            _ => Release::NoCandidate,
        }
    }

    fn cancel(&mut self, _ctx: &mut EditContext<'_>) {
        self.target = None;
        self.candidate = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gestalt_ast::{Hole, NodeKind, Tree, Ty};
    use gestalt_lexicon::Lexicon;

    /// `float x = <float>; float y = <float>;` inside main, returning y's initializer hole
    fn setup(lexicon: &Lexicon, expected: Ty) -> (Tree, NodeId) {
        let mut tree = gestalt_edit::entry_program(lexicon).unwrap();
        for _ in 0..2 {
            let hole = *tree.holes_with_role(HoleRole::Statement).last().unwrap();
            gestalt_edit::apply(&mut tree, lexicon, hole, &Payload::DeclareVariable { ty: Ty::Float }).unwrap();
        }
        let decl = tree.list_of(*tree.holes_with_role(HoleRole::Statement).last().unwrap()).unwrap()[1];
        let init = match tree.kind(decl).unwrap() {
            NodeKind::VarDecl { init, .. } => *init,
            _ => unreachable!(),
        };
        let hole = tree.hole(Hole::expression(expected));
        tree.replace(init, hole).unwrap();
        (tree, hole)
    }

    fn preview_at(lexicon: &Lexicon, expected: Ty, to: Point) -> (Tree, Preview, Release) {
        let (mut tree, hole) = setup(lexicon, expected);
        let mut ctx = EditContext::new(&mut tree, lexicon);
        let mut g = ExpressionGesture::new(&GestureConfig::default());
        assert!(g.start(&mut ctx, hole, Point::default()));
        let preview = g.drag(&mut ctx, to);
        let release = g.end(&mut ctx);
        (tree, preview, release)
    }

    #[test]
    fn test_east_inserts_number() {
        let lexicon = Lexicon::glsl();
        let (tree, preview, release) = preview_at(&lexicon, Ty::Float, Point::new(20.0, 0.0));
        assert_eq!(preview.label.as_deref(), Some("0.0"));
        assert_eq!(release, Release::Committed);
        assert!(tree.is_structurally_complete());
    }

    #[test]
    fn test_north_walks_compatible_variables() {
        let lexicon = Lexicon::glsl();
        let (_, near, _) = preview_at(&lexicon, Ty::Float, Point::new(0.0, -10.0));
        assert_eq!(near.label.as_deref(), Some("x1"));
        let (_, far, _) = preview_at(&lexicon, Ty::Float, Point::new(0.0, -300.0));
        assert_eq!(far.label.as_deref(), Some("x1"));
    }

    #[test]
    fn test_pick_without_matching_choice_is_no_candidate() {
        let lexicon = Lexicon::glsl();
        // a bool hole has no number literal
        let (tree, preview, release) = preview_at(&lexicon, Ty::Bool, Point::new(20.0, 0.0));
        assert_eq!(preview, Preview::none());
        assert_eq!(release, Release::NoCandidate);
        assert_eq!(tree.holes_with_role(HoleRole::Expression).len(), 1);
    }

    #[test]
    fn test_bool_hole_takes_true_then_false() {
        let lexicon = Lexicon::glsl();
        let (_, preview, _) = preview_at(&lexicon, Ty::Bool, Point::new(50.0, 0.0));
        assert_eq!(preview.label.as_deref(), Some("true"));
        let (_, preview, _) = preview_at(&lexicon, Ty::Bool, Point::new(100.0, 0.0));
        assert_eq!(preview.label.as_deref(), Some("false"));
    }

    #[test]
    fn test_north_east_builds_comparison() {
        let lexicon = Lexicon::glsl();
        let (tree, _, release) = preview_at(&lexicon, Ty::Bool, Point::new(60.0, -60.0));
        assert_eq!(release, Release::Committed);
        let binaries = tree
            .preorder()
            .into_iter()
            .filter(|id| matches!(tree.kind(*id), Ok(NodeKind::Binary { .. })))
            .count();
        assert_eq!(binaries, 1);
        let holes = tree.holes_with_role(HoleRole::Expression);
        assert!(holes.iter().all(|h| tree.as_hole(*h).map(|h| h.expected) == Some(Ty::Int)));
    }

    #[test]
    fn test_zero_drag_has_no_candidate() {
        let lexicon = Lexicon::glsl();
        let (_, preview, release) = preview_at(&lexicon, Ty::Float, Point::default());
        assert_eq!(preview, Preview::none());
        assert_eq!(release, Release::NoCandidate);
    }
}
