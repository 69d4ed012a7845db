//! Structural completeness checks

use std::collections::HashSet;

use crate::{NodeKind, Tree, TreeError};

impl Tree {
    /// Check every structural invariant, reporting the first violation:
    /// each required slot is filled by a node of the right role (or a hole
    /// tagged with it), parent links agree with slots, required lists are
    /// non-empty and nothing live is unreachable from the root.
    pub fn validate(&self) -> Result<(), TreeError> {
        let mut seen = HashSet::new();
        let mut stack = vec![self.root()];

        match self.kind(self.root())? {
            NodeKind::Program { .. } => {}
            other => {
                return Err(TreeError::WrongKind {
                    node: self.root(),
                    expected: "program",
                    found: other.name(),
                })
            }
        }

        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                return Err(TreeError::Shared(id));
            }
            let kind = self.kind(id)?;

            for (list, ids) in kind.required_lists() {
                if ids.is_empty() {
                    return Err(TreeError::EmptyList { node: id, list });
                }
            }

            for (child, role) in kind.slots() {
                let node = self.get(child).ok_or(TreeError::MissingChild { parent: id, child })?;
                if node.parent != Some(id) {
                    return Err(TreeError::ParentMismatch { node: child, expected: id, found: node.parent });
                }
                if !node.kind.fits(role) {
                    return Err(TreeError::RoleMismatch { parent: id, child, role });
                }
                stack.push(child);
            }
        }

        if let Some(orphan) = self.live_ids().find(|id| !seen.contains(id)) {
            return Err(TreeError::Orphaned(orphan));
        }
        Ok(())
    }

    pub fn is_structurally_complete(&self) -> bool {
        self.validate().is_ok()
    }
}
