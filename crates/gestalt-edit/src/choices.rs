//! Choice generation for holes
//!
//! Combines the scope at a hole with the active lexicon into the ordered
//! menu a picker shows. A hole with nothing valid to offer yields an empty
//! or partial list rather than an error.

use gestalt_ast::{compatible, FillHint, Hole, HoleRole, LoopTemplate, NodeId, Tree, Ty, UpdateOp};
use gestalt_lexicon::Lexicon;
use gestalt_symbols::{candidate_names, declared_names, resolve, ScopeSnapshot};
use serde::{Deserialize, Serialize};

use crate::Payload;

/// Names synthesized per type prefix for identifier holes
const NAME_CANDIDATES: usize = 3;

/// Numeric and vector types offered under an `any` math chooser
const MATH_TYPES: [Ty; 5] = [Ty::Int, Ty::Float, Ty::Vec2, Ty::Vec3, Ty::Vec4];

/// Operand types offered under a comparison chooser
const COMPARE_TYPES: [Ty; 2] = [Ty::Int, Ty::Float];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChoiceKind {
    Statement,
    Variable,
    Function,
    Literal,
    Operator,
    Builtin,
    Mutator,
    Type,
    Identifier,
    Parameter,
    Action,
}

/// One menu entry. Entries with a submenu carry no payload of their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub kind: ChoiceKind,
    pub label: String,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub submenu: Vec<Choice>,
}

impl Choice {
    fn leaf(kind: ChoiceKind, label: impl Into<String>, icon: &str, payload: Payload) -> Self {
        Self { kind, label: label.into(), icon: icon.to_string(), payload: Some(payload), submenu: Vec::new() }
    }

    fn menu(kind: ChoiceKind, label: impl Into<String>, icon: &str, submenu: Vec<Choice>) -> Self {
        Self { kind, label: label.into(), icon: icon.to_string(), payload: None, submenu }
    }

    /// Every entry carrying a payload, submenus flattened in order
    pub fn leaves(choices: &[Choice]) -> Vec<&Choice> {
        let mut out = Vec::new();
        for choice in choices {
            if choice.payload.is_some() {
                out.push(choice);
            }
            out.extend(Self::leaves(&choice.submenu));
        }
        out
    }

    /// Follow an index path through nested submenus
    pub fn at_path<'a>(choices: &'a [Choice], path: &[usize]) -> Option<&'a Choice> {
        let (first, rest) = path.split_first()?;
        let choice = choices.get(*first)?;
        if rest.is_empty() {
            Some(choice)
        } else {
            Self::at_path(&choice.submenu, rest)
        }
    }

    /// Whether `payload` is offered anywhere in `choices`
    pub fn offers(choices: &[Choice], payload: &Payload) -> bool {
        Self::leaves(choices).iter().any(|c| c.payload.as_ref() == Some(payload))
    }
}

/// Builds menus for holes
pub struct ChoiceGenerator<'a> {
    tree: &'a Tree,
    lexicon: &'a Lexicon,
}

impl<'a> ChoiceGenerator<'a> {
    pub fn new(tree: &'a Tree, lexicon: &'a Lexicon) -> Self {
        Self { tree, lexicon }
    }

    pub fn choices(&self, hole_id: NodeId) -> Vec<Choice> {
        let Some(hole) = self.tree.as_hole(hole_id) else {
            return Vec::new();
        };
        let scope = resolve(self.tree, hole_id);
        self.choices_with_scope(hole, &scope)
    }

    /// Choices for `hole` given an already resolved scope
    pub fn choices_with_scope(&self, hole: &Hole, scope: &ScopeSnapshot) -> Vec<Choice> {
        match hole.role {
            HoleRole::Statement => self.statement_menu(),
            HoleRole::Expression => self.expression_menu(hole, scope),
            HoleRole::Type => self.type_menu(hole),
            HoleRole::Identifier => self.identifier_menu(hole, scope),
            HoleRole::Parameter => self.parameter_menu(),
        }
    }

    fn statement_menu(&self) -> Vec<Choice> {
        let variables = self
            .lexicon
            .declarable_types()
            .iter()
            .map(|ty| {
                Choice::leaf(
                    ChoiceKind::Statement,
                    self.lexicon.type_name(*ty),
                    "var",
                    Payload::DeclareVariable { ty: *ty },
                )
            })
            .collect();
        let functions = Ty::RETURNABLE
            .iter()
            .map(|ty| {
                Choice::leaf(
                    ChoiceKind::Statement,
                    self.lexicon.type_name(*ty),
                    "fn",
                    Payload::DeclareFunction { returns: *ty },
                )
            })
            .collect();
        let loops = LoopTemplate::ALL
            .iter()
            .map(|t| Choice::leaf(ChoiceKind::Statement, t.name(), "for", Payload::ForLoop { template: *t }))
            .collect();

        vec![
            Choice::menu(ChoiceKind::Statement, "declare variable", "var", variables),
            Choice::menu(ChoiceKind::Statement, "declare function", "fn", functions),
            Choice::menu(ChoiceKind::Statement, "for loop", "for", loops),
            Choice::leaf(ChoiceKind::Statement, "if", "if", Payload::If),
            Choice::leaf(ChoiceKind::Statement, "return", "ret", Payload::Return),
            Choice::leaf(ChoiceKind::Statement, "comment", "//", Payload::Comment),
        ]
    }

    fn expression_menu(&self, hole: &Hole, scope: &ScopeSnapshot) -> Vec<Choice> {
        let expected = hole.expected;
        if hole.hint == FillHint::Mutation {
            return scope
                .variables_fitting(Ty::Int)
                .into_iter()
                .flat_map(|var| {
                    [UpdateOp::Increment, UpdateOp::Decrement].into_iter().map(move |op| {
                        Choice::leaf(
                            ChoiceKind::Mutator,
                            format!("{}{}", var.name, op.symbol()),
                            "++",
                            Payload::Mutate { target: var.name.clone(), op },
                        )
                    })
                })
                .collect();
        }

        let mut out = Vec::new();
        for var in scope.variables_fitting(expected) {
            out.push(Choice::leaf(
                ChoiceKind::Variable,
                var.name.clone(),
                "x",
                Payload::Variable { name: var.name.clone(), ty: var.ty },
            ));
        }
        for func in scope.functions_returning(expected) {
            out.push(Choice::leaf(
                ChoiceKind::Function,
                format!("{}()", func.name),
                "f()",
                Payload::CallFunction { name: func.name.clone(), returns: func.returns, params: func.params.clone() },
            ));
        }

        if matches!(expected, Ty::Int | Ty::Float | Ty::Any) {
            let ty = if expected == Ty::Any { Ty::Float } else { expected };
            out.push(Choice::leaf(ChoiceKind::Literal, self.lexicon.default_value(ty), "#", Payload::Number { ty }));
        }
        if compatible(Ty::Bool, expected) {
            for value in [true, false] {
                out.push(Choice::leaf(ChoiceKind::Literal, value.to_string(), "?", Payload::Bool { value }));
            }
        }

        if expected == Ty::Any {
            let submenu = MATH_TYPES
                .iter()
                .map(|ty| Choice::leaf(ChoiceKind::Operator, self.lexicon.type_name(*ty), "+", Payload::Math { ty: *ty }))
                .collect();
            out.push(Choice::menu(ChoiceKind::Operator, "math", "+", submenu));
        } else if expected.supports_math() {
            out.push(Choice::leaf(ChoiceKind::Operator, "a + b", "+", Payload::Math { ty: expected }));
        }
        if compatible(Ty::Bool, expected) {
            let submenu = COMPARE_TYPES
                .iter()
                .map(|ty| {
                    Choice::leaf(ChoiceKind::Operator, self.lexicon.type_name(*ty), "<", Payload::Compare { operand: *ty })
                })
                .collect();
            out.push(Choice::menu(ChoiceKind::Operator, "compare", "<", submenu));
        }

        for builtin in self.lexicon.builtins_returning(expected) {
            out.push(Choice::leaf(
                ChoiceKind::Builtin,
                format!("{}()", builtin.name),
                "f()",
                Payload::CallBuiltin { name: builtin.name.clone() },
            ));
        }
        out
    }

    fn type_menu(&self, hole: &Hole) -> Vec<Choice> {
        self.lexicon
            .declarable_types()
            .iter()
            .filter(|ty| compatible(**ty, hole.expected))
            .map(|ty| Choice::leaf(ChoiceKind::Type, self.lexicon.type_name(*ty), "T", Payload::Type { ty: *ty }))
            .collect()
    }

    fn identifier_menu(&self, hole: &Hole, scope: &ScopeSnapshot) -> Vec<Choice> {
        if hole.hint == FillHint::SelectExisting {
            return scope
                .variables_fitting(hole.expected)
                .into_iter()
                .map(|var| {
                    Choice::leaf(
                        ChoiceKind::Identifier,
                        var.name.clone(),
                        "x",
                        Payload::Identifier { name: var.name.clone() },
                    )
                })
                .collect();
        }

        let mut taken = declared_names(self.tree);
        taken.extend(scope.variables.iter().map(|v| v.name.clone()));
        taken.extend(scope.functions.iter().map(|f| f.name.clone()));

        let types: Vec<Ty> = if hole.expected.is_declarable() {
            vec![hole.expected]
        } else {
            self.lexicon.declarable_types().to_vec()
        };
        types
            .into_iter()
            .flat_map(|ty| candidate_names(ty.name_prefix(), &taken, NAME_CANDIDATES))
            .map(|name| Choice::leaf(ChoiceKind::Identifier, name.clone(), "id", Payload::Identifier { name }))
            .collect()
    }

    fn parameter_menu(&self) -> Vec<Choice> {
        let mut out: Vec<Choice> = self
            .lexicon
            .declarable_types()
            .iter()
            .map(|ty| {
                Choice::leaf(
                    ChoiceKind::Parameter,
                    format!("{} param", self.lexicon.type_name(*ty)),
                    "p",
                    Payload::AddParam { ty: *ty },
                )
            })
            .collect();
        out.push(Choice::leaf(ChoiceKind::Action, "add comma", ",", Payload::AddComma));
        out.push(Choice::leaf(ChoiceKind::Action, "clear parameters", "x", Payload::ClearParams));
        out
    }
}

/// Choices for the hole `hole_id`; empty when it is not a hole
pub fn choices(tree: &Tree, lexicon: &Lexicon, hole_id: NodeId) -> Vec<Choice> {
    ChoiceGenerator::new(tree, lexicon).choices(hole_id)
}
