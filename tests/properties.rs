//! Invariants that hold for every edit the editor offers

mod common;

use std::collections::HashSet;

use gestalt::ast::{HoleRole, NodeKind, Ty};
use gestalt::codegen::generate;
use gestalt::edit::{apply, Payload};
use gestalt::lexicon::{Catalog, Lexicon};
use gestalt::symbols::{declared_names, resolve};

use common::{offered, rich_program};

/// Every offered choice, applied to every hole of a rich program, leaves a
/// complete tree that renders in every profile
#[test]
fn prop_every_offered_edit_keeps_the_tree_complete() {
    let catalog = Catalog::builtin();
    for lexicon in catalog.profiles() {
        let base = rich_program(lexicon);
        common::assert_complete(&base);

        for hole in base.holes() {
            for payload in offered(&base, lexicon, hole) {
                let mut tree = base.clone();
                apply(&mut tree, lexicon, hole, &payload)
                    .unwrap_or_else(|e| panic!("{}: {:?} at {}: {}", lexicon.name, payload, hole, e));
                if let Err(e) = tree.validate() {
                    panic!("{}: {:?} at {} broke the tree: {}", lexicon.name, payload, hole, e);
                }
                for profile in catalog.profiles() {
                    assert!(generate(&tree, profile).ends_with("}\n"));
                }
            }
        }
    }
}

#[test]
fn prop_output_is_deterministic() {
    let lexicon = Lexicon::glsl();
    let tree = rich_program(&lexicon);
    let first = generate(&tree, &lexicon);
    assert_eq!(generate(&tree.clone(), &lexicon), first);
    assert_eq!(generate(&rich_program(&lexicon), &lexicon), first);
}

#[test]
fn prop_gpu_output_has_no_nested_functions() {
    let lexicon = Lexicon::hlsl();
    let mut tree = rich_program(&lexicon);
    // one more level: a function inside the float function's body
    let inner = tree.holes_with_role(HoleRole::Statement)[0];
    apply(&mut tree, &lexicon, inner, &Payload::DeclareFunction { returns: Ty::Int }).unwrap();

    let output = generate(&tree, &lexicon);
    let mut depth = 0usize;
    for line in output.lines() {
        let trimmed = line.trim_start();
        let opens_function = line.ends_with('{')
            && !trimmed.starts_with("for ")
            && !trimmed.starts_with("if ")
            && line.contains('(');
        if opens_function {
            assert_eq!(depth, 0, "nested function in:\n{}", output);
        }
        depth += line.matches('{').count();
        depth -= line.matches('}').count();
    }
    assert_eq!(depth, 0);

    let int_fn = output.find("int intFn1()").unwrap();
    let float_fn = output.find("float floatFn1()").unwrap();
    let main = output.find("void main()").unwrap();
    assert!(int_fn < float_fn && float_fn < main, "{}", output);
}

#[test]
fn prop_synthesized_names_never_collide() {
    let lexicon = Lexicon::javascript();
    let mut tree = rich_program(&lexicon);
    for ty in Ty::DECLARABLE {
        common::append(&mut tree, &lexicon, Payload::DeclareVariable { ty });
        common::append(&mut tree, &lexicon, Payload::DeclareVariable { ty });
    }

    let mut seen = HashSet::new();
    for id in tree.preorder() {
        let name = match tree.kind(id) {
            Ok(NodeKind::VarDecl { name, .. }) | Ok(NodeKind::FunctionDecl { name, .. }) => *name,
            _ => continue,
        };
        if let Ok(NodeKind::Identifier { name }) = tree.kind(name) {
            assert!(seen.insert(name.clone()), "{} declared twice", name);
        }
    }
    assert_eq!(seen, declared_names(&tree));
}

#[test]
fn prop_scope_only_grows_down_a_block() {
    let lexicon = Lexicon::glsl();
    let tree = rich_program(&lexicon);
    let NodeKind::FunctionDecl { body, .. } = tree.kind(tree.children(tree.root())[0]).unwrap() else {
        unreachable!()
    };

    let mut previous: Vec<String> = Vec::new();
    for statement in body {
        let names: Vec<String> = resolve(&tree, *statement).variables.into_iter().map(|v| v.name).collect();
        assert!(names.starts_with(&previous), "{:?} does not extend {:?}", names, previous);
        previous = names;
    }
}
