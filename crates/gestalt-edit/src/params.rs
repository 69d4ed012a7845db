//! Parameter list edits
//!
//! A parameter list is a sequence of parameters, optionally terminated by a
//! parameter hole; separators are implied between consecutive slots. The
//! list never drops to zero slots: an empty list is a single hole.

use gestalt_ast::{Hole, NodeId, NodeKind, Tree, Ty};
use gestalt_lexicon::Lexicon;
use gestalt_symbols::{declared_names, variable_name};

use crate::{EditError, NodeFactory};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamEdit {
    /// Fill the trailing hole (or append) with a parameter, closing the list
    Add(Ty),
    /// Add a parameter, then a separator and a fresh hole
    AddNext(Ty),
    /// Open the list with a trailing hole if it has none
    AddComma,
    DeleteLast,
    Clear,
}

/// Apply `edit` to the parameter list holding `slot`; returns the function
pub fn edit_params(tree: &mut Tree, lexicon: &Lexicon, slot: NodeId, edit: ParamEdit) -> Result<NodeId, EditError> {
    let (function, params) = param_list(tree, slot)?;
    let last = *params.last().ok_or(EditError::NotAParameterSlot(slot))?;

    match edit {
        ParamEdit::Add(ty) => {
            add(tree, lexicon, last, ty)?;
        }
        ParamEdit::AddNext(ty) => {
            let param = add(tree, lexicon, last, ty)?;
            let hole = tree.hole(Hole::parameter());
            tree.insert_after(param, hole)?;
        }
        ParamEdit::AddComma => {
            if !is_hole(tree, last) {
                let hole = tree.hole(Hole::parameter());
                tree.insert_after(last, hole)?;
            }
        }
        ParamEdit::DeleteLast => {
            let concrete = params.iter().rev().find(|id| !is_hole(tree, **id)).copied();
            if let Some(param) = concrete {
                if params.len() == 1 {
                    let hole = tree.hole(Hole::parameter());
                    tree.insert_after(param, hole)?;
                }
                tree.remove_from_list(param)?;
            }
        }
        ParamEdit::Clear => {
            let hole = tree.hole(Hole::parameter());
            tree.insert_after(last, hole)?;
            for id in params {
                tree.remove_from_list(id)?;
            }
        }
    }
    Ok(function)
}

/// The function owning the list that holds `slot`, and a copy of the list
pub fn param_list(tree: &Tree, slot: NodeId) -> Result<(NodeId, Vec<NodeId>), EditError> {
    let function = tree.parent(slot).ok_or(EditError::NotAParameterSlot(slot))?;
    match tree.kind(function)? {
        NodeKind::FunctionDecl { params, .. } if params.contains(&slot) => Ok((function, params.clone())),
        _ => Err(EditError::NotAParameterSlot(slot)),
    }
}

/// Whether `slot` sits in a function's parameter list
pub fn is_param_slot(tree: &Tree, slot: NodeId) -> bool {
    param_list(tree, slot).is_ok()
}

fn is_hole(tree: &Tree, id: NodeId) -> bool {
    tree.as_hole(id).is_some()
}

fn add(tree: &mut Tree, lexicon: &Lexicon, last: NodeId, ty: Ty) -> Result<NodeId, EditError> {
    let name = variable_name(ty, &declared_names(tree));
    let param = NodeFactory::new(tree, lexicon).param(ty, &name);
    let spliced = if is_hole(tree, last) { tree.replace(last, param) } else { tree.insert_after(last, param) };
    if let Err(err) = spliced {
        tree.discard(param)?;
        return Err(err.into());
    }
    Ok(param)
}
