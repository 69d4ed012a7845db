//! Gestalt Gesture - drag gestures that edit the program tree
//!
//! Each engine implements [`Gesture`]. Continuous engines (numeric literal,
//! operator) write onto the live node on every move; the others compute a
//! candidate while dragging and commit it through [`gestalt_edit::apply`] on
//! release.
//!
//! # Example
//!
//! ```ignore
//! use gestalt_gesture::{EditContext, Gesture, GestureConfig, Point, StatementGesture};
//!
//! let mut gesture = StatementGesture::new(&GestureConfig::default());
//! let mut ctx = EditContext::new(&mut tree, &lexicon);
//! if gesture.start(&mut ctx, hole, Point::new(0.0, 0.0)) {
//!     gesture.drag(&mut ctx, Point::new(21.0, -21.0));
//!     gesture.end(&mut ctx);
//! }
//! ```

mod config;
mod expression;
mod geometry;
mod numeric;
mod operator;
mod parameter;
mod statement;

pub use config::*;
pub use expression::ExpressionGesture;
pub use geometry::{Drag, Point, Sector};
pub use numeric::NumericGesture;
pub use operator::OperatorGesture;
pub use parameter::ParameterGesture;
pub use statement::StatementGesture;

use gestalt_ast::{NodeId, Tree};
use gestalt_edit::{apply, Payload};
use gestalt_lexicon::Lexicon;
use thiserror::Error;
use tracing::debug;

/// Invalid gesture configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be a positive number, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("numeric dead zones cannot be negative")]
    NegativeDeadZone,

    #[error("{table} table: sector {sector} has no bands")]
    EmptySector { table: &'static str, sector: Sector },

    #[error("{table} table: band bounds in sector {sector} must be strictly increasing")]
    Unordered { table: &'static str, sector: Sector },

    #[error("{table} table: the last band in sector {sector} must be unbounded")]
    BoundedTail { table: &'static str, sector: Sector },

    #[error("statement table: '{pick}' in sector {sector} is not a statement")]
    NotAStatement { sector: Sector, pick: String },
}

/// The tree under edit and the lexicon it is presented in
pub struct EditContext<'a> {
    pub tree: &'a mut Tree,
    pub lexicon: &'a Lexicon,
}

impl<'a> EditContext<'a> {
    pub fn new(tree: &'a mut Tree, lexicon: &'a Lexicon) -> Self {
        Self { tree, lexicon }
    }
}

/// Feedback for the current pointer position
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Preview {
    /// What a release here would do, if anything
    pub label: Option<String>,
    /// Whether this move wrote to the tree
    pub changed: bool,
}

impl Preview {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn candidate(label: impl Into<String>) -> Self {
        Self { label: Some(label.into()), changed: false }
    }

    pub fn live(label: impl Into<String>, changed: bool) -> Self {
        Self { label: Some(label.into()), changed }
    }
}

/// Result of releasing the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    /// The tree holds a committed edit
    Committed,
    /// Nothing was selected; the tree is as before the release
    NoCandidate,
}

pub trait Gesture {
    fn name(&self) -> &'static str;

    /// Whether this engine handles `target`
    fn can_start(&self, ctx: &EditContext<'_>, target: NodeId) -> bool;

    /// Begin a gesture at `origin`; returns false and does nothing when
    /// `can_start` rejects the target
    fn start(&mut self, ctx: &mut EditContext<'_>, target: NodeId, origin: Point) -> bool;

    /// Pointer moved to `point`
    fn drag(&mut self, ctx: &mut EditContext<'_>, point: Point) -> Preview;

    fn end(&mut self, ctx: &mut EditContext<'_>) -> Release;

    /// Abandon the gesture; edits already written by continuous engines stay
    fn cancel(&mut self, ctx: &mut EditContext<'_>);

    /// Whether `drag` writes to the tree
    fn is_continuous(&self) -> bool {
        false
    }
}

/// All engines in selection order
pub fn engines(config: &GestureConfig) -> Vec<Box<dyn Gesture>> {
    vec![
        Box::new(NumericGesture::new(config)),
        Box::new(OperatorGesture::new(config)),
        Box::new(StatementGesture::new(config)),
        Box::new(ParameterGesture::new(config)),
        Box::new(ExpressionGesture::new(config)),
    ]
}

/// The engine that would handle `target`, if any
pub fn engine_for(config: &GestureConfig, ctx: &EditContext<'_>, target: NodeId) -> Option<Box<dyn Gesture>> {
    engines(config).into_iter().find(|engine| engine.can_start(ctx, target))
}

/// Commit a release-time candidate, reporting failures as no candidate
pub(crate) fn commit(ctx: &mut EditContext<'_>, target: NodeId, payload: &Payload) -> Release {
    match apply(ctx.tree, ctx.lexicon, target, payload) {
        Ok(applied) => {
            debug!(node = %target, payload = %payload.describe(), ?applied, "gesture committed");
            Release::Committed
        }
        Err(err) => {
            debug!(node = %target, payload = %payload.describe(), error = %err, "gesture candidate rejected");
            Release::NoCandidate
        }
    }
}
