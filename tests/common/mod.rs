#![allow(dead_code)]

use gestalt::ast::{HoleRole, NodeId, Tree};
use gestalt::edit::{apply, choices, entry_program, Choice, Payload};
use gestalt::lexicon::Lexicon;

/// Fill the last statement hole of the program
pub fn append(tree: &mut Tree, lexicon: &Lexicon, payload: Payload) -> NodeId {
    let hole = *tree
        .holes_with_role(HoleRole::Statement)
        .last()
        .expect("program has no statement hole");
    apply(tree, lexicon, hole, &payload).unwrap_or_else(|e| panic!("cannot append {:?}: {}", payload, e));
    hole
}

/// Every payload the picker would offer for `hole`, submenus flattened
pub fn offered(tree: &Tree, lexicon: &Lexicon, hole: NodeId) -> Vec<Payload> {
    Choice::leaves(&choices(tree, lexicon, hole))
        .into_iter()
        .filter_map(|choice| choice.payload.clone())
        .collect()
}

/// A program touching every statement kind:
/// a float variable, an int variable, a float function, each loop template and an if
pub fn rich_program(lexicon: &Lexicon) -> Tree {
    use gestalt::ast::{LoopTemplate, Ty};

    let mut tree = entry_program(lexicon).unwrap();
    append(&mut tree, lexicon, Payload::DeclareVariable { ty: Ty::Float });
    append(&mut tree, lexicon, Payload::DeclareVariable { ty: Ty::Int });
    append(&mut tree, lexicon, Payload::DeclareFunction { returns: Ty::Float });
    for template in LoopTemplate::ALL {
        append(&mut tree, lexicon, Payload::ForLoop { template });
    }
    append(&mut tree, lexicon, Payload::If);
    tree
}

/// Panics with the violation when the tree is not structurally complete
pub fn assert_complete(tree: &Tree) {
    if let Err(e) = tree.validate() {
        panic!("tree is not structurally complete: {}", e);
    }
}
