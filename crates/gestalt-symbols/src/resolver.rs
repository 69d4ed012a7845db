//! Declare-before-use scope resolution
//!
//! Walks upward from a node. At every level the preceding siblings are
//! scanned for declarations, and the ancestor itself contributes whatever it
//! binds for its descendants (loop iterator, function parameters).

use gestalt_ast::{NodeId, NodeKind, Tree, Ty};

use crate::{FnBinding, ScopeSnapshot, VarBinding};

/// Resolves the bindings visible at a tree position
pub struct ScopeResolver<'a> {
    tree: &'a Tree,
}

#[derive(Default)]
struct Level {
    variables: Vec<VarBinding>,
    functions: Vec<FnBinding>,
}

impl<'a> ScopeResolver<'a> {
    pub fn new(tree: &'a Tree) -> Self {
        Self { tree }
    }

    pub fn resolve(&self, node: NodeId) -> ScopeSnapshot {
        let mut levels = Vec::new();
        let mut current = node;

        for ancestor in self.tree.ancestors(node) {
            let mut level = Level::default();
            self.introduced_by(ancestor, current, &mut level);
            for sibling in self.tree.preceding_siblings(current) {
                self.declared_by(sibling, &mut level);
            }
            levels.push(level);
            current = ancestor;
        }

        let mut scope = ScopeSnapshot { types: Ty::DECLARABLE.to_vec(), ..Default::default() };
        for level in levels.into_iter().rev() {
            scope.variables.extend(level.variables);
            scope.functions.extend(level.functions);
        }
        scope
    }

    /// Bindings `ancestor` makes visible to its child `child`
    fn introduced_by(&self, ancestor: NodeId, child: NodeId, level: &mut Level) {
        match self.tree.kind(ancestor) {
            Ok(NodeKind::ForLoop { init, .. }) if *init != child => {
                if let Some(var) = self.iterator_binding(*init) {
                    level.variables.push(var);
                }
            }
            Ok(NodeKind::FunctionDecl { params, body, .. }) if body.contains(&child) => {
                for param in params {
                    if let Some(var) = self.param_binding(*param) {
                        level.variables.push(var);
                    }
                }
            }
            _ => {}
        }
    }

    /// Bindings a preceding sibling statement leaves behind
    fn declared_by(&self, sibling: NodeId, level: &mut Level) {
        match self.tree.kind(sibling) {
            Ok(NodeKind::VarDecl { ty, name, .. }) => {
                if let (Some(ty), Some(name)) = (self.type_of(*ty), self.name_of(*name)) {
                    level.variables.push(VarBinding::new(name, ty));
                }
            }
            Ok(NodeKind::FunctionDecl { name, return_type, params, .. }) => {
                if let Some(name) = self.name_of(*name) {
                    let params = params
                        .iter()
                        .filter_map(|p| match self.tree.kind(*p) {
                            Ok(NodeKind::Param { ty, .. }) => Some(self.type_of(*ty).unwrap_or(Ty::Float)),
                            _ => None,
                        })
                        .collect();
                    level.functions.push(FnBinding {
                        name: name.to_string(),
                        returns: self.type_of(*return_type).unwrap_or(Ty::Void),
                        params,
                    });
                }
            }
            _ => {}
        }
    }

    /// The iterator keeps the loop counter type; int until its type is chosen
    fn iterator_binding(&self, init: NodeId) -> Option<VarBinding> {
        match self.tree.kind(init) {
            Ok(NodeKind::VarDecl { ty, name, .. }) => {
                let name = self.name_of(*name)?;
                Some(VarBinding::new(name, self.type_of(*ty).unwrap_or(Ty::Int)))
            }
            _ => None,
        }
    }

    fn param_binding(&self, param: NodeId) -> Option<VarBinding> {
        match self.tree.kind(param) {
            Ok(NodeKind::Param { ty, name }) => {
                Some(VarBinding::new(self.name_of(*name)?, self.type_of(*ty)?))
            }
            _ => None,
        }
    }

    fn type_of(&self, id: NodeId) -> Option<Ty> {
        match self.tree.kind(id) {
            Ok(NodeKind::Type { ty }) => Some(*ty),
            _ => None,
        }
    }

    fn name_of(&self, id: NodeId) -> Option<&'a str> {
        match self.tree.kind(id) {
            Ok(NodeKind::Identifier { name }) => Some(name.as_str()),
            _ => None,
        }
    }
}

/// Resolve the scope at `node`
pub fn resolve(tree: &Tree, node: NodeId) -> ScopeSnapshot {
    ScopeResolver::new(tree).resolve(node)
}
