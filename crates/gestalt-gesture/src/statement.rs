//! Directional statement insertion
//!
//! The drag direction picks a sector, the distance a band within it; the
//! band's payload is committed into the statement hole on release.

use gestalt_ast::{HoleRole, NodeId};
use gestalt_edit::Payload;
use tracing::trace;

use crate::{commit, lookup, Drag, EditContext, Gesture, GestureConfig, Point, Preview, Release, SectorTable};

pub struct StatementGesture {
    table: SectorTable<Payload>,
    target: Option<NodeId>,
    origin: Point,
    candidate: Option<Payload>,
}

impl StatementGesture {
    pub fn new(config: &GestureConfig) -> Self {
        Self { table: config.statement.clone(), target: None, origin: Point::default(), candidate: None }
    }

    /// The payload a release after `drag` would insert
    pub fn pick(&self, drag: Drag) -> Option<&Payload> {
        let sector = drag.sector()?;
        lookup(&self.table, sector, drag.distance())
    }
}

impl Gesture for StatementGesture {
    fn name(&self) -> &'static str {
        "statement"
    }

    fn can_start(&self, ctx: &EditContext<'_>, target: NodeId) -> bool {
        ctx.tree.as_hole(target).is_some_and(|hole| hole.role == HoleRole::Statement)
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

    fn drag(&mut self, _ctx: &mut EditContext<'_>, point: Point) -> Preview {
        if self.target.is_none() {
            return Preview::none();
        }
        let drag = Drag::between(self.origin, point);
        self.candidate = self.pick(drag).cloned();
        trace!(dx = drag.dx, dy = drag.dy, candidate = ?self.candidate, "statement drag");
        match &self.candidate {
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

#[cfg(test)]
mod tests {
    use super::*;
    use gestalt_ast::{NodeKind, Ty};
    use gestalt_edit::entry_program;
    use gestalt_lexicon::Lexicon;

    fn drag_at(degrees: f64, distance: f64) -> Drag {
        let radians = degrees.to_radians();
        Drag { dx: distance * radians.cos(), dy: -distance * radians.sin() }
    }

    #[test]
    fn test_bands_by_direction_and_distance() {
        let g = StatementGesture::new(&GestureConfig::default());
        assert_eq!(g.pick(drag_at(45.0, 30.0)), Some(&Payload::DeclareFunction { returns: Ty::Int }));
        assert_eq!(g.pick(drag_at(0.0, 50.0)), Some(&Payload::DeclareVariable { ty: Ty::Float }));
        assert_eq!(g.pick(drag_at(90.0, 200.0)), Some(&Payload::ForLoop { template: gestalt_ast::LoopTemplate::Custom }));
        assert_eq!(g.pick(drag_at(135.0, 10.0)), Some(&Payload::If));
        assert_eq!(g.pick(drag_at(180.0, 10.0)), Some(&Payload::Return));
        assert_eq!(g.pick(drag_at(225.0, 10.0)), Some(&Payload::Comment));
        assert_eq!(g.pick(drag_at(270.0, 80.0)), None);
        assert_eq!(g.pick(drag_at(315.0, 80.0)), None);
        assert_eq!(g.pick(Drag::default()), None);
    }

    #[test]
    fn test_release_inserts_function() {
        let lexicon = Lexicon::glsl();
        let mut tree = entry_program(&lexicon).unwrap();
        let hole = tree.holes_with_role(HoleRole::Statement)[0];
        let mut ctx = EditContext::new(&mut tree, &lexicon);

        let mut g = StatementGesture::new(&GestureConfig::default());
        assert!(g.start(&mut ctx, hole, Point::new(100.0, 100.0)));
        let preview = g.drag(&mut ctx, Point::new(121.0, 79.0));
        assert_eq!(preview.label.as_deref(), Some("int function"));
        assert!(!preview.changed);
        assert_eq!(g.end(&mut ctx), Release::Committed);

        let inserted = tree.list_of(hole);
        assert!(inserted.is_none(), "the hole was replaced");
        let functions: Vec<_> = tree
            .preorder()
            .into_iter()
            .filter(|id| matches!(tree.kind(*id), Ok(NodeKind::FunctionDecl { .. })))
            .collect();
        assert_eq!(functions.len(), 2);
        assert!(tree.is_structurally_complete());
    }

    #[test]
    fn test_release_without_candidate_changes_nothing() {
        let lexicon = Lexicon::glsl();
        let mut tree = entry_program(&lexicon).unwrap();
        let hole = tree.holes_with_role(HoleRole::Statement)[0];
        let before = tree.clone();
        let mut ctx = EditContext::new(&mut tree, &lexicon);

        let mut g = StatementGesture::new(&GestureConfig::default());
        g.start(&mut ctx, hole, Point::default());
        g.drag(&mut ctx, Point::new(0.0, 60.0));
        assert_eq!(g.end(&mut ctx), Release::NoCandidate);
        assert_eq!(tree, before);
    }

    #[test]
    fn test_cancel_drops_candidate() {
        let lexicon = Lexicon::glsl();
        let mut tree = entry_program(&lexicon).unwrap();
        let hole = tree.holes_with_role(HoleRole::Statement)[0];
        let before = tree.clone();
        let mut ctx = EditContext::new(&mut tree, &lexicon);

        let mut g = StatementGesture::new(&GestureConfig::default());
        g.start(&mut ctx, hole, Point::default());
        g.drag(&mut ctx, Point::new(50.0, 0.0));
        g.cancel(&mut ctx);
        assert_eq!(g.end(&mut ctx), Release::NoCandidate);
        assert_eq!(tree, before);
    }

    #[test]
    fn test_only_statement_holes() {
        let lexicon = Lexicon::glsl();
        let mut tree = entry_program(&lexicon).unwrap();
        let param = tree.holes_with_role(HoleRole::Parameter)[0];
        let ctx = EditContext::new(&mut tree, &lexicon);
        let g = StatementGesture::new(&GestureConfig::default());
        assert!(!g.can_start(&ctx, param));
    }
}
