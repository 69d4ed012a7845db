//! Gestalt AST - the program tree edited by gestures
//!
//! This crate defines the node kinds, the arena-backed tree that owns them,
//! the value types with their compatibility rule, and the structural
//! completeness check every edit must preserve.

mod node;
mod tree;
mod types;
mod validate;

pub use node::*;
pub use tree::*;
pub use types::*;

use thiserror::Error;

/// Errors from tree operations and validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    #[error("node {0} has no parent")]
    Detached(NodeId),

    #[error("node {0} is already part of the tree")]
    AlreadyAttached(NodeId),

    #[error("the root cannot be replaced")]
    RootReplacement,

    #[error("node {0} is not in an ordered list")]
    NotInList(NodeId),

    #[error("node {child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },

    #[error("expected {expected} at {node}, found {found}")]
    WrongKind {
        node: NodeId,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{parent} refers to missing child {child}")]
    MissingChild { parent: NodeId, child: NodeId },

    #[error("{node} should have parent {expected}, has {found:?}")]
    ParentMismatch {
        node: NodeId,
        expected: NodeId,
        found: Option<NodeId>,
    },

    #[error("{child} cannot fill a {role:?} slot of {parent}")]
    RoleMismatch {
        parent: NodeId,
        child: NodeId,
        role: SlotRole,
    },

    #[error("{list} of {node} is empty")]
    EmptyList { node: NodeId, list: &'static str },

    #[error("{0} is reachable twice")]
    Shared(NodeId),

    #[error("{0} is not reachable from the root")]
    Orphaned(NodeId),
}

/// A type name that is not one of [`Ty`]'s spellings
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown type: {0}")]
pub struct UnknownType(pub String);
