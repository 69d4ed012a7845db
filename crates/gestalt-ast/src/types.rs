//! Value types and the compatibility rule

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::UnknownType;

/// A value type as seen by the editor.
///
/// `Void` only appears as a function return type and `Any` only as the
/// expectation of a hole; neither can be declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ty {
    Int,
    Float,
    Bool,
    Vec2,
    Vec3,
    Vec4,
    Void,
    Any,
}

impl Ty {
    /// Types a variable or parameter may be declared with, in menu order
    pub const DECLARABLE: [Ty; 6] = [Ty::Int, Ty::Float, Ty::Bool, Ty::Vec2, Ty::Vec3, Ty::Vec4];

    /// Types a function may return, in menu order
    pub const RETURNABLE: [Ty; 7] = [
        Ty::Int,
        Ty::Float,
        Ty::Bool,
        Ty::Vec2,
        Ty::Vec3,
        Ty::Vec4,
        Ty::Void,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Ty::Int => "int",
            Ty::Float => "float",
            Ty::Bool => "bool",
            Ty::Vec2 => "vec2",
            Ty::Vec3 => "vec3",
            Ty::Vec4 => "vec4",
            Ty::Void => "void",
            Ty::Any => "any",
        }
    }

    pub fn is_declarable(self) -> bool {
        Self::DECLARABLE.contains(&self)
    }

    /// Scalar numeric types (valid numeric literal targets)
    pub fn is_numeric(self) -> bool {
        matches!(self, Ty::Int | Ty::Float)
    }

    pub fn is_vector(self) -> bool {
        matches!(self, Ty::Vec2 | Ty::Vec3 | Ty::Vec4)
    }

    /// Whether `+ - * /` are defined on this type
    pub fn supports_math(self) -> bool {
        self.is_numeric() || self.is_vector()
    }

    /// Component count of a vector type
    pub fn arity(self) -> usize {
        match self {
            Ty::Vec2 => 2,
            Ty::Vec3 => 3,
            Ty::Vec4 => 4,
            _ => 1,
        }
    }

    /// Prefix used when synthesizing variable and parameter names
    pub fn name_prefix(self) -> &'static str {
        match self {
            Ty::Int => "n",
            Ty::Float => "x",
            Ty::Bool => "flag",
            Ty::Vec2 => "uv",
            Ty::Vec3 => "color",
            Ty::Vec4 => "pos",
            Ty::Void => "v",
            Ty::Any => "value",
        }
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Ty {
    type Err = UnknownType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "int" => Ok(Ty::Int),
            "float" => Ok(Ty::Float),
            "bool" => Ok(Ty::Bool),
            "vec2" => Ok(Ty::Vec2),
            "vec3" => Ok(Ty::Vec3),
            "vec4" => Ok(Ty::Vec4),
            "void" => Ok(Ty::Void),
            "any" => Ok(Ty::Any),
            other => Err(UnknownType(other.to_string())),
        }
    }
}

/// `actual` may fill a slot expecting `expected`.
///
/// There is no implicit widening: an `int` never satisfies `float`.
pub fn compatible(actual: Ty, expected: Ty) -> bool {
    expected == Ty::Any || actual == expected
}
