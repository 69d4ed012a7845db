//! Name synthesis for new declarations

use std::collections::HashSet;

use gestalt_ast::{NodeKind, Tree, Ty};

/// Preferred iterator names, in order
pub const INT_COUNTERS: [&str; 4] = ["i", "j", "k", "m"];
pub const FLOAT_COUNTERS: [&str; 3] = ["t", "s", "u"];

/// Every name declared anywhere in the tree.
///
/// New names avoid all of these, not only the ones in scope, so a
/// declaration never shadows or collides with one made later in the body.
pub fn declared_names(tree: &Tree) -> HashSet<String> {
    let mut names = HashSet::new();
    for id in tree.preorder() {
        let slot = match tree.kind(id) {
            Ok(NodeKind::VarDecl { name, .. })
            | Ok(NodeKind::Param { name, .. })
            | Ok(NodeKind::FunctionDecl { name, .. }) => *name,
            _ => continue,
        };
        if let Ok(NodeKind::Identifier { name }) = tree.kind(slot) {
            names.insert(name.clone());
        }
    }
    names
}

/// Up to `limit` names `prefix1, prefix2, ...` that are not in `taken`
pub fn candidate_names(prefix: &str, taken: &HashSet<String>, limit: usize) -> Vec<String> {
    (1..)
        .map(|n| format!("{}{}", prefix, n))
        .filter(|name| !taken.contains(name))
        .take(limit)
        .collect()
}

pub fn fresh_name(prefix: &str, taken: &HashSet<String>) -> String {
    candidate_names(prefix, taken, 1).into_iter().next().unwrap_or_else(|| prefix.to_string())
}

pub fn variable_name(ty: Ty, taken: &HashSet<String>) -> String {
    fresh_name(ty.name_prefix(), taken)
}

pub fn function_name(returns: Ty, taken: &HashSet<String>) -> String {
    fresh_name(&format!("{}Fn", returns.name()), taken)
}

/// `i`, `j`, ... for int loops and `t`, `s`, ... for float loops,
/// numbered once the short names run out
pub fn loop_counter(ty: Ty, taken: &HashSet<String>) -> String {
    let preferred: &[&str] = if ty == Ty::Float { &FLOAT_COUNTERS } else { &INT_COUNTERS };
    preferred
        .iter()
        .find(|name| !taken.contains(**name))
        .map(|name| name.to_string())
        .unwrap_or_else(|| fresh_name(preferred[0], taken))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taken(names: &[&str]) -> HashSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_candidates_skip_taken_names() {
        assert_eq!(candidate_names("x", &taken(&["x1", "x3"]), 3), vec!["x2", "x4", "x5"]);
    }

    #[test]
    fn test_function_names_carry_return_type() {
        assert_eq!(function_name(Ty::Int, &taken(&[])), "intFn1");
        assert_eq!(function_name(Ty::Int, &taken(&["intFn1"])), "intFn2");
    }

    #[test]
    fn test_loop_counters_fall_back_to_numbered_names() {
        assert_eq!(loop_counter(Ty::Int, &taken(&["i"])), "j");
        assert_eq!(loop_counter(Ty::Float, &taken(&[])), "t");
        assert_eq!(loop_counter(Ty::Int, &taken(&["i", "j", "k", "m"])), "i1");
    }
}
