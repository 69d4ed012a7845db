//! Gestalt Edit - structural edits on the program tree
//!
//! This crate provides the pieces that turn a decision into a tree change:
//! - [`ChoiceGenerator`]: enumerates what may fill a hole
//! - [`NodeFactory`]: builds complete subtrees for each construct
//! - [`apply`]: validates a payload against the hole's choices and splices
//!   the result in, or edits a parameter list

mod choices;
mod factory;
mod params;
mod payload;

pub use choices::{choices, Choice, ChoiceGenerator, ChoiceKind};
pub use factory::{entry_program, NodeFactory};
pub use params::{edit_params, is_param_slot, param_list, ParamEdit};
pub use payload::Payload;

use gestalt_ast::{Hole, HoleRole, NodeId, NodeKind, Tree, TreeError, Ty};
use gestalt_lexicon::Lexicon;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error("{0} is not a hole")]
    NotAHole(NodeId),

    #[error("{0} is not in a parameter list")]
    NotAParameterSlot(NodeId),

    #[error("'{payload}' cannot fill a {role} hole")]
    RoleMismatch { payload: String, role: HoleRole },

    #[error("'{payload}' is not offered at {hole}")]
    NotOffered { payload: String, hole: NodeId },

    #[error("'{0}' edits a parameter list and fills nothing")]
    NotAFill(String),

    #[error("unknown builtin '{0}'")]
    UnknownBuiltin(String),
}

/// What an applied edit changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// `hole` was replaced by the subtree rooted at `node`
    Replaced { hole: NodeId, node: NodeId },
    /// The parameter list of `function` was edited
    Params { function: NodeId },
}

/// Apply `payload` at `target`.
///
/// Fill payloads must be among the choices currently offered for the hole,
/// which checks them against the visible scope and the active lexicon.
/// Filling the last statement hole of a block appends a fresh one so the
/// block stays open for the next statement. Filling the type or initializer
/// of a declaration narrows its other open slots to match.
pub fn apply(tree: &mut Tree, lexicon: &Lexicon, target: NodeId, payload: &Payload) -> Result<Applied, EditError> {
    if let Some(edit) = payload.param_edit() {
        let function = edit_params(tree, lexicon, target, edit)?;
        return Ok(Applied::Params { function });
    }

    let hole = *tree.as_hole(target).ok_or(EditError::NotAHole(target))?;
    if payload.role() != hole.role {
        return Err(EditError::RoleMismatch { payload: payload.describe(), role: hole.role });
    }
    if !Choice::offers(&choices(tree, lexicon, target), payload) {
        return Err(EditError::NotOffered { payload: payload.describe(), hole: target });
    }

    let was_last = tree.list_of(target).and_then(|list| list.last().copied()) == Some(target);
    let node = NodeFactory::new(tree, lexicon).build(payload, target)?;
    if let Err(err) = tree.replace(target, node) {
        tree.discard(node)?;
        return Err(err.into());
    }
    if let Some(parent) = tree.parent(node) {
        settle_declaration(tree, parent, node, payload)?;
    }
    if hole.role == HoleRole::Statement && was_last {
        let next = tree.hole(Hole::statement());
        tree.insert_after(node, next)?;
    }
    Ok(Applied::Replaced { hole: target, node })
}

/// Once either the type or the initializer of a declaration with open slots
/// is filled, narrow the other open slots to agree with it
fn settle_declaration(tree: &mut Tree, decl: NodeId, filled: NodeId, payload: &Payload) -> Result<(), TreeError> {
    let Ok(NodeKind::VarDecl { ty, name, init }) = tree.kind(decl) else {
        return Ok(());
    };
    let (ty, name, init) = (*ty, *name, *init);

    let narrowed = match payload {
        Payload::Type { ty: declared } if filled == ty => vec![(init, *declared), (name, *declared)],
        _ if filled == init => match payload.yields() {
            Some(actual) if actual.is_declarable() => vec![(ty, actual)],
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };
    for (slot, expected) in narrowed {
        if tree.as_hole(slot).is_some_and(|hole| hole.expected == Ty::Any) {
            tree.hole_mut(slot)?.expected = expected;
        }
    }
    Ok(())
}
