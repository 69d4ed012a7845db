//! Bindings visible at a tree position

use gestalt_ast::{compatible, Ty};
use serde::{Deserialize, Serialize};

/// A variable, parameter or loop iterator in scope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarBinding {
    pub name: String,
    pub ty: Ty,
}

impl VarBinding {
    pub fn new(name: impl Into<String>, ty: Ty) -> Self {
        Self { name: name.into(), ty }
    }
}

/// A callable user function in scope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FnBinding {
    pub name: String,
    pub returns: Ty,
    pub params: Vec<Ty>,
}

/// Everything visible at one position, outermost declarations first.
///
/// Derived from the tree and never mutated; recompute after every edit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeSnapshot {
    pub variables: Vec<VarBinding>,
    pub functions: Vec<FnBinding>,
    pub types: Vec<Ty>,
}

impl ScopeSnapshot {
    pub fn is_bound(&self, name: &str) -> bool {
        self.variables.iter().any(|v| v.name == name) || self.functions.iter().any(|f| f.name == name)
    }

    /// Variables after shadowing: one binding per name, the innermost one,
    /// kept at the position of that innermost declaration
    pub fn visible_variables(&self) -> Vec<&VarBinding> {
        let mut seen = Vec::new();
        let mut out = Vec::new();
        for var in self.variables.iter().rev() {
            if !seen.contains(&var.name.as_str()) {
                seen.push(var.name.as_str());
                out.push(var);
            }
        }
        out.reverse();
        out
    }

    /// Visible variables whose type may fill a slot expecting `expected`
    pub fn variables_fitting(&self, expected: Ty) -> Vec<&VarBinding> {
        self.visible_variables().into_iter().filter(|v| compatible(v.ty, expected)).collect()
    }

    pub fn visible_functions(&self) -> Vec<&FnBinding> {
        let mut seen = Vec::new();
        let mut out = Vec::new();
        for func in self.functions.iter().rev() {
            if !seen.contains(&func.name.as_str()) {
                seen.push(func.name.as_str());
                out.push(func);
            }
        }
        out.reverse();
        out
    }

    pub fn functions_returning(&self, expected: Ty) -> Vec<&FnBinding> {
        self.visible_functions()
            .into_iter()
            .filter(|f| f.returns != Ty::Void && compatible(f.returns, expected))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shadowing_keeps_innermost_binding() {
        let scope = ScopeSnapshot {
            variables: vec![
                VarBinding::new("a", Ty::Int),
                VarBinding::new("b", Ty::Float),
                VarBinding::new("a", Ty::Vec3),
            ],
            ..Default::default()
        };
        let visible: Vec<_> = scope.visible_variables().into_iter().cloned().collect();
        assert_eq!(visible, vec![VarBinding::new("b", Ty::Float), VarBinding::new("a", Ty::Vec3)]);
        assert!(scope.variables_fitting(Ty::Int).is_empty());
        assert_eq!(scope.variables_fitting(Ty::Any).len(), 2);
    }

    #[test]
    fn test_void_functions_never_fit_expressions() {
        let scope = ScopeSnapshot {
            functions: vec![
                FnBinding { name: "draw".into(), returns: Ty::Void, params: vec![] },
                FnBinding { name: "level".into(), returns: Ty::Float, params: vec![Ty::Int] },
            ],
            ..Default::default()
        };
        let names: Vec<_> = scope.functions_returning(Ty::Any).iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["level"]);
        assert!(scope.is_bound("draw"));
    }
}
