//! Builtin callables and their per-profile rendering templates

use gestalt_ast::Ty;
use serde::{Deserialize, Serialize};

/// A callable provided by the output language
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Builtin {
    /// Canonical name stored in call nodes
    pub name: String,
    pub params: Vec<Ty>,
    pub returns: Ty,
    /// Rendering template; `{0}`, `{1}`, ... are replaced by arguments
    pub template: String,
}

impl Builtin {
    pub fn render(&self, args: &[String]) -> String {
        let mut out = self.template.clone();
        for (i, arg) in args.iter().enumerate() {
            out = out.replace(&format!("{{{}}}", i), arg);
        }
        out
    }
}

/// Canonical signatures shared by every profile
const SIGNATURES: &[(&str, &[Ty], Ty)] = &[
    ("sin", &[Ty::Float], Ty::Float),
    ("cos", &[Ty::Float], Ty::Float),
    ("abs", &[Ty::Float], Ty::Float),
    ("floor", &[Ty::Float], Ty::Float),
    ("fract", &[Ty::Float], Ty::Float),
    ("sqrt", &[Ty::Float], Ty::Float),
    ("pow", &[Ty::Float, Ty::Float], Ty::Float),
    ("min", &[Ty::Float, Ty::Float], Ty::Float),
    ("max", &[Ty::Float, Ty::Float], Ty::Float),
    ("clamp", &[Ty::Float, Ty::Float, Ty::Float], Ty::Float),
    ("mix", &[Ty::Float, Ty::Float, Ty::Float], Ty::Float),
    ("length", &[Ty::Vec3], Ty::Float),
    ("dot", &[Ty::Vec3, Ty::Vec3], Ty::Float),
    ("normalize", &[Ty::Vec3], Ty::Vec3),
    ("vec2", &[Ty::Float], Ty::Vec2),
    ("vec3", &[Ty::Float], Ty::Vec3),
    ("vec4", &[Ty::Float], Ty::Vec4),
];

/// Parameter and return types of a builtin, whether or not a profile has it
pub fn signature(name: &str) -> Option<(&'static [Ty], Ty)> {
    SIGNATURES.iter().find(|(n, _, _)| *n == name).map(|(_, params, returns)| (*params, *returns))
}

pub(crate) const GLSL: &[(&str, &str)] = &[
    ("sin", "sin({0})"),
    ("cos", "cos({0})"),
    ("abs", "abs({0})"),
    ("floor", "floor({0})"),
    ("fract", "fract({0})"),
    ("sqrt", "sqrt({0})"),
    ("pow", "pow({0}, {1})"),
    ("min", "min({0}, {1})"),
    ("max", "max({0}, {1})"),
    ("clamp", "clamp({0}, {1}, {2})"),
    ("mix", "mix({0}, {1}, {2})"),
    ("length", "length({0})"),
    ("dot", "dot({0}, {1})"),
    ("normalize", "normalize({0})"),
    ("vec2", "vec2({0})"),
    ("vec3", "vec3({0})"),
    ("vec4", "vec4({0})"),
];

pub(crate) const HLSL: &[(&str, &str)] = &[
    ("sin", "sin({0})"),
    ("cos", "cos({0})"),
    ("abs", "abs({0})"),
    ("floor", "floor({0})"),
    ("fract", "frac({0})"),
    ("sqrt", "sqrt({0})"),
    ("pow", "pow({0}, {1})"),
    ("min", "min({0}, {1})"),
    ("max", "max({0}, {1})"),
    ("clamp", "clamp({0}, {1}, {2})"),
    ("mix", "lerp({0}, {1}, {2})"),
    ("length", "length({0})"),
    ("dot", "dot({0}, {1})"),
    ("normalize", "normalize({0})"),
    ("vec2", "float2({0}, {0})"),
    ("vec3", "float3({0}, {0}, {0})"),
    ("vec4", "float4({0}, {0}, {0}, {0})"),
];

// No vector math in plain JavaScript: length, dot and normalize are absent.
pub(crate) const JAVASCRIPT: &[(&str, &str)] = &[
    ("sin", "Math.sin({0})"),
    ("cos", "Math.cos({0})"),
    ("abs", "Math.abs({0})"),
    ("floor", "Math.floor({0})"),
    ("fract", "({0} - Math.floor({0}))"),
    ("sqrt", "Math.sqrt({0})"),
    ("pow", "Math.pow({0}, {1})"),
    ("min", "Math.min({0}, {1})"),
    ("max", "Math.max({0}, {1})"),
    ("clamp", "Math.min(Math.max({0}, {1}), {2})"),
    ("mix", "({0} + ({1} - {0}) * {2})"),
    ("vec2", "[{0}, {0}]"),
    ("vec3", "[{0}, {0}, {0}]"),
    ("vec4", "[{0}, {0}, {0}, {0}]"),
];

/// Join a profile's templates with the canonical signatures, in signature order
pub(crate) fn builtins(templates: &[(&str, &str)]) -> Vec<Builtin> {
    SIGNATURES
        .iter()
        .filter_map(|(name, params, returns)| {
            templates.iter().find(|(n, _)| n == name).map(|(_, template)| Builtin {
                name: name.to_string(),
                params: params.to_vec(),
                returns: *returns,
                template: template.to_string(),
            })
        })
        .collect()
}
