//! Gestalt Lexicon - output profiles
//!
//! A [`Lexicon`] bundles everything profile-specific: how types, literals,
//! operators and builtins are spelled, and which constructs the target
//! language lacks. The [`Catalog`] holds the available profiles in cycle
//! order. Lexicons are plain values handed to the choice generator, the
//! node factory and the code generator; there is no global active profile.

mod builtins;
mod format;

pub use builtins::{signature, Builtin};
pub use format::LiteralRules;

use gestalt_ast::{compatible, Literal, LiteralValue, Ty};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("unknown profile '{name}' (known: {known})")]
    UnknownProfile { name: String, known: String },
}

/// How variable declarations are introduced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclStyle {
    /// `float x = ...;`
    Typed,
    /// `let x = ...;`
    Keyword(String),
}

/// The rendering rules of one output profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lexicon {
    pub name: String,
    pub title: String,
    pub decl: DeclStyle,
    /// Keyword introducing functions when return types are not written
    pub function_keyword: Option<String>,
    pub type_names: BTreeMap<Ty, String>,
    pub literals: LiteralRules,
    /// Spellings that differ from the canonical operator symbol
    pub operator_spellings: BTreeMap<String, String>,
    pub indent: String,
    /// Functions may be declared inside other functions
    pub nested_functions: bool,
    pub builtins: Vec<Builtin>,
}

impl Lexicon {
    pub fn glsl() -> Self {
        Self {
            name: "glsl".into(),
            title: "GLSL".into(),
            decl: DeclStyle::Typed,
            function_keyword: None,
            type_names: type_names(&[]),
            literals: LiteralRules { force_decimal: true, float_suffix: String::new(), fraction_digits: 5 },
            operator_spellings: BTreeMap::new(),
            indent: "    ".into(),
            nested_functions: false,
            builtins: builtins::builtins(builtins::GLSL),
        }
    }

    pub fn hlsl() -> Self {
        Self {
            name: "hlsl".into(),
            title: "HLSL".into(),
            decl: DeclStyle::Typed,
            function_keyword: None,
            type_names: type_names(&[(Ty::Vec2, "float2"), (Ty::Vec3, "float3"), (Ty::Vec4, "float4")]),
            literals: LiteralRules { force_decimal: true, float_suffix: "f".into(), fraction_digits: 5 },
            operator_spellings: BTreeMap::new(),
            indent: "    ".into(),
            nested_functions: false,
            builtins: builtins::builtins(builtins::HLSL),
        }
    }

    pub fn javascript() -> Self {
        let operator_spellings = [("==", "==="), ("!=", "!==")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            name: "javascript".into(),
            title: "JavaScript".into(),
            decl: DeclStyle::Keyword("let".into()),
            function_keyword: Some("function".into()),
            type_names: type_names(&[]),
            literals: LiteralRules { force_decimal: false, float_suffix: String::new(), fraction_digits: 5 },
            operator_spellings,
            indent: "  ".into(),
            nested_functions: true,
            builtins: builtins::builtins(builtins::JAVASCRIPT),
        }
    }

    /// Types that may be declared in this profile, in menu order
    pub fn declarable_types(&self) -> &[Ty] {
        &Ty::DECLARABLE
    }

    pub fn type_name(&self, ty: Ty) -> &str {
        self.type_names.get(&ty).map(|s| s.as_str()).unwrap_or(ty.name())
    }

    pub fn format_number(&self, value: f64, ty: Ty) -> String {
        self.literals.format(value, ty)
    }

    pub fn format_literal(&self, literal: &Literal) -> String {
        match literal.value {
            LiteralValue::Number(v) => self.format_number(v, literal.ty),
            LiteralValue::Bool(b) => b.to_string(),
        }
    }

    /// Source text of a type's zero value; `any` falls back to float
    pub fn default_value(&self, ty: Ty) -> String {
        match ty {
            Ty::Int => self.format_number(0.0, Ty::Int),
            Ty::Float | Ty::Any => self.format_number(0.0, Ty::Float),
            Ty::Bool => "false".to_string(),
            Ty::Vec2 | Ty::Vec3 | Ty::Vec4 => {
                let zero = self.format_number(0.0, Ty::Float);
                match self.builtin(ty.name()) {
                    Some(ctor) => ctor.render(&[zero]),
                    None => zero,
                }
            }
            Ty::Void => String::new(),
        }
    }

    pub fn operator<'a>(&'a self, symbol: &'a str) -> &'a str {
        self.operator_spellings.get(symbol).map(|s| s.as_str()).unwrap_or(symbol)
    }

    pub fn builtin(&self, name: &str) -> Option<&Builtin> {
        self.builtins.iter().find(|b| b.name == name)
    }

    /// Builtins whose return type fits `expected`, vector constructors last
    pub fn builtins_returning(&self, expected: Ty) -> impl Iterator<Item = &Builtin> {
        self.builtins.iter().filter(move |b| compatible(b.returns, expected))
    }
}

fn type_names(overrides: &[(Ty, &str)]) -> BTreeMap<Ty, String> {
    Ty::RETURNABLE
        .iter()
        .map(|ty| {
            let name = overrides
                .iter()
                .find(|(t, _)| t == ty)
                .map(|(_, n)| n.to_string())
                .unwrap_or_else(|| ty.name().to_string());
            (*ty, name)
        })
        .collect()
}

/// The available output profiles, in cycle order
#[derive(Debug, Clone)]
pub struct Catalog {
    profiles: Vec<Lexicon>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// Two GPU shading dialects and one scripting dialect
    pub fn builtin() -> Self {
        Self { profiles: vec![Lexicon::glsl(), Lexicon::hlsl(), Lexicon::javascript()] }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.iter().map(|p| p.name.as_str())
    }

    pub fn profiles(&self) -> &[Lexicon] {
        &self.profiles
    }

    pub fn get(&self, name: &str) -> Result<&Lexicon, ProfileError> {
        self.profiles.iter().find(|p| p.name == name).ok_or_else(|| ProfileError::UnknownProfile {
            name: name.to_string(),
            known: self.names().collect::<Vec<_>>().join(", "),
        })
    }

    /// The profile after `name`, wrapping around
    pub fn next_after(&self, name: &str) -> Result<&Lexicon, ProfileError> {
        self.get(name)?;
        let at = self.profiles.iter().position(|p| p.name == name).unwrap_or(0);
        Ok(&self.profiles[(at + 1) % self.profiles.len()])
    }
}
