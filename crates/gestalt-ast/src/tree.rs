//! Arena-backed program tree
//!
//! Nodes live in an arena indexed by [`NodeId`]. Every node records its
//! parent, and all structural mutation goes through the methods here so the
//! parent links always agree with the child slots.

use serde::{Deserialize, Serialize};

use crate::{Hole, HoleRole, Literal, NodeId, NodeKind, Operator, TreeError};

/// A node and its position in the tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub kind: NodeKind,
}

/// The program being edited
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    nodes: Vec<Option<Node>>,
    root: NodeId,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// An empty program
    pub fn new() -> Self {
        let root = NodeId(0);
        Self {
            nodes: vec![Some(Node {
                id: root,
                parent: None,
                kind: NodeKind::Program { items: Vec::new() },
            })],
            root,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, detached subtrees included
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Allocate a detached node. Its children are adopted immediately.
    pub fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        for child in kind.children() {
            if let Some(node) = self.slot_mut(child) {
                node.parent = Some(id);
            }
        }
        self.nodes.push(Some(Node { id, parent: None, kind }));
        id
    }

    pub fn hole(&mut self, hole: Hole) -> NodeId {
        self.alloc(NodeKind::Hole(hole))
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize).and_then(|n| n.as_ref())
    }

    fn slot_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize).and_then(|n| n.as_mut())
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn node(&self, id: NodeId) -> Result<&Node, TreeError> {
        self.get(id).ok_or(TreeError::UnknownNode(id))
    }

    pub fn kind(&self, id: NodeId) -> Result<&NodeKind, TreeError> {
        self.node(id).map(|n| &n.kind)
    }

    pub fn as_hole(&self, id: NodeId) -> Option<&Hole> {
        self.get(id).and_then(|n| n.kind.as_hole())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.get(id).map(|n| n.kind.children()).unwrap_or_default()
    }

    /// In-place access to a literal; leaf edits cannot break the structure
    pub fn literal_mut(&mut self, id: NodeId) -> Result<&mut Literal, TreeError> {
        match self.slot_mut(id) {
            Some(Node { kind: NodeKind::Literal(lit), .. }) => Ok(lit),
            Some(node) => Err(TreeError::WrongKind { node: id, expected: "literal", found: node.kind.name() }),
            None => Err(TreeError::UnknownNode(id)),
        }
    }

    pub fn operator_mut(&mut self, id: NodeId) -> Result<&mut Operator, TreeError> {
        match self.slot_mut(id) {
            Some(Node { kind: NodeKind::Operator(op), .. }) => Ok(op),
            Some(node) => Err(TreeError::WrongKind { node: id, expected: "operator", found: node.kind.name() }),
            None => Err(TreeError::UnknownNode(id)),
        }
    }

    /// Retype an open hole in place
    pub fn hole_mut(&mut self, id: NodeId) -> Result<&mut Hole, TreeError> {
        match self.slot_mut(id) {
            Some(Node { kind: NodeKind::Hole(hole), .. }) => Ok(hole),
            Some(node) => Err(TreeError::WrongKind { node: id, expected: "hole", found: node.kind.name() }),
            None => Err(TreeError::UnknownNode(id)),
        }
    }

    /// Iterate over the ancestors of `id`, nearest first
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors { tree: self, next: self.parent(id) }
    }

    /// The ordered list (block, parameter list, arguments) holding `id`
    pub fn list_of(&self, id: NodeId) -> Option<&[NodeId]> {
        let parent = self.parent(id)?;
        self.get(parent)?.kind.list_containing(id)
    }

    /// Siblings before `id` in its ordered list, in order
    pub fn preceding_siblings(&self, id: NodeId) -> Vec<NodeId> {
        match self.list_of(id) {
            Some(list) => list.iter().copied().take_while(|sib| *sib != id).collect(),
            None => Vec::new(),
        }
    }

    /// Closest function declaration containing `id`
    pub fn enclosing_function(&self, id: NodeId) -> Option<NodeId> {
        self.ancestors(id)
            .find(|a| matches!(self.get(*a).map(|n| &n.kind), Some(NodeKind::FunctionDecl { .. })))
    }

    /// All nodes reachable from the root in source order
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            out.push(id);
            let mut children = self.children(id);
            children.reverse();
            stack.extend(children);
        }
        out
    }

    /// Reachable holes in source order
    pub fn holes(&self) -> Vec<NodeId> {
        self.preorder().into_iter().filter(|id| self.as_hole(*id).is_some()).collect()
    }

    /// Reachable holes with the given role, in source order
    pub fn holes_with_role(&self, role: HoleRole) -> Vec<NodeId> {
        self.holes()
            .into_iter()
            .filter(|id| self.as_hole(*id).map(|h| h.role) == Some(role))
            .collect()
    }

    /// Splice the detached subtree `new` into the slot held by `old`, then
    /// drop `old` and everything under it.
    pub fn replace(&mut self, old: NodeId, new: NodeId) -> Result<(), TreeError> {
        if old == self.root {
            return Err(TreeError::RootReplacement);
        }
        self.ensure_detached(new)?;
        let parent = self.node(old)?.parent.ok_or(TreeError::Detached(old))?;
        let parent_node = self.slot_mut(parent).ok_or(TreeError::UnknownNode(parent))?;
        if !parent_node.kind.replace_child(old, new) {
            return Err(TreeError::NotAChild { parent, child: old });
        }
        if let Some(node) = self.slot_mut(new) {
            node.parent = Some(parent);
        }
        self.drop_subtree(old);
        Ok(())
    }

    /// Insert the detached subtree `new` right after `anchor` in its list
    pub fn insert_after(&mut self, anchor: NodeId, new: NodeId) -> Result<(), TreeError> {
        self.ensure_detached(new)?;
        let parent = self.node(anchor)?.parent.ok_or(TreeError::Detached(anchor))?;
        let list = self
            .slot_mut(parent)
            .and_then(|p| p.kind.list_containing_mut(anchor))
            .ok_or(TreeError::NotInList(anchor))?;
        let at = list.iter().position(|id| *id == anchor).ok_or(TreeError::NotInList(anchor))?;
        list.insert(at + 1, new);
        if let Some(node) = self.slot_mut(new) {
            node.parent = Some(parent);
        }
        Ok(())
    }

    /// Append a detached subtree to the root's top-level items
    pub fn push_item(&mut self, new: NodeId) -> Result<(), TreeError> {
        self.ensure_detached(new)?;
        let root = self.root;
        match self.slot_mut(root) {
            Some(Node { kind: NodeKind::Program { items }, .. }) => items.push(new),
            _ => return Err(TreeError::UnknownNode(root)),
        }
        if let Some(node) = self.slot_mut(new) {
            node.parent = Some(root);
        }
        Ok(())
    }

    /// Remove `id` from its ordered list and drop its subtree.
    ///
    /// Does not refill the list; callers keep required lists non-empty.
    pub fn remove_from_list(&mut self, id: NodeId) -> Result<(), TreeError> {
        let parent = self.node(id)?.parent.ok_or(TreeError::Detached(id))?;
        let list = self
            .slot_mut(parent)
            .and_then(|p| p.kind.list_containing_mut(id))
            .ok_or(TreeError::NotInList(id))?;
        list.retain(|child| *child != id);
        self.drop_subtree(id);
        Ok(())
    }

    /// Drop a subtree that was built but never attached
    pub fn discard(&mut self, id: NodeId) -> Result<(), TreeError> {
        self.ensure_detached(id)?;
        self.drop_subtree(id);
        Ok(())
    }

    fn ensure_detached(&self, id: NodeId) -> Result<(), TreeError> {
        let node = self.node(id)?;
        if node.parent.is_some() || id == self.root {
            return Err(TreeError::AlreadyAttached(id));
        }
        Ok(())
    }

    fn drop_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.get_mut(next.0 as usize).and_then(|n| n.take()) {
                stack.extend(node.kind.children());
            }
        }
    }

    /// Ids of every live node, in allocation order
    pub(crate) fn live_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().flatten().map(|n| n.id)
    }
}

/// Iterator over a node's ancestors
pub struct Ancestors<'a> {
    tree: &'a Tree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Ty;

    fn block_with_two_statements() -> (Tree, NodeId, NodeId, NodeId) {
        let mut tree = Tree::new();
        let first = tree.alloc(NodeKind::Comment { text: "a".into() });
        let second = tree.hole(Hole::statement());
        let cond = tree.hole(Hole::expression(Ty::Bool));
        let stmt = tree.alloc(NodeKind::If { condition: cond, body: vec![first, second] });
        tree.push_item(stmt).unwrap();
        (tree, stmt, first, second)
    }

    #[test]
    fn test_alloc_adopts_children() {
        let (tree, stmt, first, second) = block_with_two_statements();
        assert_eq!(tree.parent(first), Some(stmt));
        assert_eq!(tree.parent(second), Some(stmt));
        assert_eq!(tree.parent(stmt), Some(tree.root()));
    }

    #[test]
    fn test_replace_splices_and_drops_old_subtree() {
        let (mut tree, stmt, _, second) = block_with_two_statements();
        let replacement = tree.alloc(NodeKind::Comment { text: "b".into() });
        tree.replace(second, replacement).unwrap();

        assert!(!tree.contains(second));
        assert_eq!(tree.parent(replacement), Some(stmt));
        assert_eq!(tree.list_of(replacement).map(|l| l.len()), Some(2));
    }

    #[test]
    fn test_replace_rejects_attached_replacement() {
        let (mut tree, _, first, second) = block_with_two_statements();
        assert!(matches!(tree.replace(second, first), Err(TreeError::AlreadyAttached(_))));
        let root = tree.root();
        let fresh = tree.hole(Hole::statement());
        assert!(matches!(tree.replace(root, fresh), Err(TreeError::RootReplacement)));
    }

    #[test]
    fn test_preceding_siblings_stop_at_node() {
        let (mut tree, _, first, second) = block_with_two_statements();
        let third = tree.hole(Hole::statement());
        tree.insert_after(second, third).unwrap();

        assert_eq!(tree.preceding_siblings(first), Vec::<NodeId>::new());
        assert_eq!(tree.preceding_siblings(third), vec![first, second]);
    }

    #[test]
    fn test_remove_from_list() {
        let (mut tree, stmt, first, second) = block_with_two_statements();
        tree.remove_from_list(first).unwrap();
        assert!(!tree.contains(first));
        assert_eq!(tree.preceding_siblings(second), Vec::<NodeId>::new());
        assert_eq!(tree.ancestors(second).collect::<Vec<_>>(), vec![stmt, tree.root()]);
    }

    #[test]
    fn test_preorder_and_holes_follow_source_order() {
        let (tree, stmt, first, second) = block_with_two_statements();
        let order = tree.preorder();
        assert_eq!(order[0], tree.root());
        assert_eq!(order[1], stmt);
        assert!(order.iter().position(|id| *id == first) < order.iter().position(|id| *id == second));
        assert_eq!(tree.holes().len(), 2);
        assert_eq!(tree.holes_with_role(HoleRole::Statement), vec![second]);
    }

    #[test]
    fn test_leaf_accessors_check_kind() {
        let (mut tree, _, first, _) = block_with_two_statements();
        assert!(matches!(tree.literal_mut(first), Err(TreeError::WrongKind { .. })));
        let lit = tree.alloc(NodeKind::Literal(Literal::number(1.0, Ty::Float)));
        tree.literal_mut(lit).unwrap().value = crate::LiteralValue::Number(2.0);
        assert_eq!(tree.kind(lit).unwrap(), &NodeKind::Literal(Literal::number(2.0, Ty::Float)));
    }

    #[test]
    fn test_hole_mut_retypes_holes_only() {
        let (mut tree, stmt, first, _) = block_with_two_statements();
        let condition = match tree.kind(stmt).unwrap() {
            NodeKind::If { condition, .. } => *condition,
            other => panic!("expected if, got {:?}", other),
        };
        tree.hole_mut(condition).unwrap().expected = Ty::Int;
        assert_eq!(tree.as_hole(condition).map(|h| h.expected), Some(Ty::Int));
        assert!(matches!(tree.hole_mut(first), Err(TreeError::WrongKind { .. })));
    }
}
