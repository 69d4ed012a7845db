//! Generation of programs built through the edit API

use gestalt_ast::{HoleRole, LoopTemplate, Tree, Ty};
use gestalt_codegen::generate;
use gestalt_edit::{apply, entry_program, Payload};
use gestalt_lexicon::Lexicon;

/// main { float floatFn1() { return <float>; } for (simple) {} }
fn nested_program(lexicon: &Lexicon) -> Tree {
    let mut tree = entry_program(lexicon).unwrap();
    let hole = tree.holes_with_role(HoleRole::Statement)[0];
    apply(&mut tree, lexicon, hole, &Payload::DeclareFunction { returns: Ty::Float }).unwrap();

    let inner = tree.holes_with_role(HoleRole::Statement)[0];
    apply(&mut tree, lexicon, inner, &Payload::Return).unwrap();

    let outer = *tree.holes_with_role(HoleRole::Statement).last().unwrap();
    apply(&mut tree, lexicon, outer, &Payload::ForLoop { template: LoopTemplate::Simple }).unwrap();
    tree
}

#[test]
fn test_gpu_profiles_hoist_nested_functions() {
    let lexicon = Lexicon::glsl();
    let tree = nested_program(&lexicon);
    let expected = "\
float floatFn1() {
    return 0.0;
}

void main() {
    for (int i = 0; i < 10; i++) {
    }
}
";
    assert_eq!(generate(&tree, &lexicon), expected);
}

#[test]
fn test_javascript_keeps_nested_functions() {
    let lexicon = Lexicon::javascript();
    let tree = nested_program(&lexicon);
    let expected = "\
function main() {
  function floatFn1() {
    return 0;
  }
  for (let i = 0; i < 10; i++) {
  }
}
";
    assert_eq!(generate(&tree, &lexicon), expected);
}

#[test]
fn test_same_tree_renders_in_every_profile() {
    let glsl = Lexicon::glsl();
    let mut tree = entry_program(&glsl).unwrap();
    let hole = tree.holes_with_role(HoleRole::Statement)[0];
    apply(&mut tree, &glsl, hole, &Payload::DeclareVariable { ty: Ty::Vec3 }).unwrap();
    let hole = *tree.holes_with_role(HoleRole::Statement).last().unwrap();
    apply(&mut tree, &glsl, hole, &Payload::ForLoop { template: LoopTemplate::Float }).unwrap();

    assert_eq!(
        generate(&tree, &glsl),
        "void main() {\n    vec3 color1 = vec3(0.0);\n    for (float t = 0.0; t < 0.0; t += 0.1) {\n    }\n}\n"
    );
    assert_eq!(
        generate(&tree, &Lexicon::hlsl()),
        "void main() {\n    float3 color1 = float3(0.0f, 0.0f, 0.0f);\n    for (float t = 0.0f; t < 0.0f; t += 0.1f) {\n    }\n}\n"
    );
    assert_eq!(
        generate(&tree, &Lexicon::javascript()),
        "function main() {\n  let color1 = [0, 0, 0];\n  for (let t = 0; t < 0; t += 0.1) {\n  }\n}\n"
    );
}

#[test]
fn test_parameters_render_and_holes_are_omitted() {
    let lexicon = Lexicon::glsl();
    let mut tree = entry_program(&lexicon).unwrap();
    let slot = tree.holes_with_role(HoleRole::Parameter)[0];
    apply(&mut tree, &lexicon, slot, &Payload::AddParamNext { ty: Ty::Float }).unwrap();
    let slot = tree.holes_with_role(HoleRole::Parameter)[0];
    apply(&mut tree, &lexicon, slot, &Payload::AddParamNext { ty: Ty::Int }).unwrap();

    assert_eq!(generate(&tree, &lexicon), "void main(float x1, int n1) {\n}\n");
    assert_eq!(generate(&tree, &Lexicon::javascript()), "function main(x1, n1) {\n}\n");
}
