//! Node kinds of the program tree

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Ty;

/// Stable identifier of a node; never reused within a tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a hole stands in for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoleRole {
    Statement,
    Expression,
    Type,
    Identifier,
    Parameter,
}

impl HoleRole {
    pub fn name(self) -> &'static str {
        match self {
            HoleRole::Statement => "statement",
            HoleRole::Expression => "expression",
            HoleRole::Type => "type",
            HoleRole::Identifier => "identifier",
            HoleRole::Parameter => "parameter",
        }
    }
}

impl fmt::Display for HoleRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Narrows the choices offered for a hole
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FillHint {
    #[default]
    None,
    /// Only increment-style mutators over int variables
    Mutation,
    /// Identifier holes offering bound names instead of fresh ones
    SelectExisting,
}

/// A placeholder reserving a required slot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hole {
    pub role: HoleRole,
    pub expected: Ty,
    #[serde(default)]
    pub hint: FillHint,
}

impl Hole {
    pub fn new(role: HoleRole, expected: Ty) -> Self {
        Self { role, expected, hint: FillHint::None }
    }

    pub fn statement() -> Self {
        Self::new(HoleRole::Statement, Ty::Any)
    }

    pub fn expression(expected: Ty) -> Self {
        Self::new(HoleRole::Expression, expected)
    }

    pub fn mutation() -> Self {
        Self { hint: FillHint::Mutation, ..Self::expression(Ty::Int) }
    }

    pub fn type_slot() -> Self {
        Self::new(HoleRole::Type, Ty::Any)
    }

    pub fn identifier(expected: Ty) -> Self {
        Self::new(HoleRole::Identifier, expected)
    }

    pub fn select_existing(expected: Ty) -> Self {
        Self { hint: FillHint::SelectExisting, ..Self::identifier(expected) }
    }

    pub fn parameter() -> Self {
        Self::new(HoleRole::Parameter, Ty::Any)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiteralValue {
    Number(f64),
    Bool(bool),
}

/// A literal together with the type it was declared as
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Literal {
    pub value: LiteralValue,
    pub ty: Ty,
}

impl Literal {
    pub fn number(value: f64, ty: Ty) -> Self {
        Self { value: LiteralValue::Number(value), ty }
    }

    pub fn boolean(value: bool) -> Self {
        Self { value: LiteralValue::Bool(value), ty: Ty::Bool }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self.value {
            LiteralValue::Number(v) => Some(v),
            LiteralValue::Bool(_) => None,
        }
    }
}

pub const MATH_OPERATORS: [&str; 4] = ["+", "-", "*", "/"];
pub const COMPARISON_OPERATORS: [&str; 6] = ["==", "<", ">", "!=", "<=", ">="];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatorCategory {
    Math,
    Comparison,
}

impl OperatorCategory {
    /// Operators of this category in gesture order
    pub fn symbols(self) -> &'static [&'static str] {
        match self {
            OperatorCategory::Math => &MATH_OPERATORS,
            OperatorCategory::Comparison => &COMPARISON_OPERATORS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    pub category: OperatorCategory,
    pub symbol: String,
}

impl Operator {
    pub fn math(symbol: &str) -> Self {
        Self { category: OperatorCategory::Math, symbol: symbol.to_string() }
    }

    pub fn comparison(symbol: &str) -> Self {
        Self { category: OperatorCategory::Comparison, symbol: symbol.to_string() }
    }
}

/// Which header slots of a for-loop come pre-filled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoopTemplate {
    /// `int i = 0; i < 10; i++`
    Simple,
    /// Start, bound and update left as typed holes
    Flexible,
    /// `float t = 0.0; t < <float>; t += 0.1`
    Float,
    /// Every header slot is a hole
    Custom,
}

impl LoopTemplate {
    pub const ALL: [LoopTemplate; 4] = [
        LoopTemplate::Simple,
        LoopTemplate::Flexible,
        LoopTemplate::Float,
        LoopTemplate::Custom,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LoopTemplate::Simple => "simple",
            LoopTemplate::Flexible => "flexible",
            LoopTemplate::Float => "float",
            LoopTemplate::Custom => "custom",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UpdateOp {
    Increment,
    Decrement,
    AddAssign,
    SubAssign,
}

impl UpdateOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UpdateOp::Increment => "++",
            UpdateOp::Decrement => "--",
            UpdateOp::AddAssign => "+=",
            UpdateOp::SubAssign => "-=",
        }
    }

    /// Whether the mutator carries a step operand
    pub fn takes_step(self) -> bool {
        matches!(self, UpdateOp::AddAssign | UpdateOp::SubAssign)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Callee {
    /// Profile builtin, looked up in the active lexicon by canonical name
    Builtin(String),
    /// Function declared in the program
    User(String),
}

impl Callee {
    pub fn name(&self) -> &str {
        match self {
            Callee::Builtin(name) | Callee::User(name) => name,
        }
    }
}

/// The role a child slot demands of whatever fills it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotRole {
    Statement,
    Expression,
    Type,
    Identifier,
    Parameter,
    /// Operator slot of a binary expression; never a hole
    Operator,
}

impl From<HoleRole> for SlotRole {
    fn from(role: HoleRole) -> Self {
        match role {
            HoleRole::Statement => SlotRole::Statement,
            HoleRole::Expression => SlotRole::Expression,
            HoleRole::Type => SlotRole::Type,
            HoleRole::Identifier => SlotRole::Identifier,
            HoleRole::Parameter => SlotRole::Parameter,
        }
    }
}

/// A node's payload. Children are referenced by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum NodeKind {
    /// Root: ordered top-level items
    Program { items: Vec<NodeId> },
    Hole(Hole),
    Literal(Literal),
    /// A variable reference in expression position, or a declared name
    Identifier { name: String },
    Operator(Operator),
    VarDecl { ty: NodeId, name: NodeId, init: NodeId },
    FunctionDecl {
        name: NodeId,
        return_type: NodeId,
        params: Vec<NodeId>,
        body: Vec<NodeId>,
    },
    ForLoop {
        template: LoopTemplate,
        /// The iterator declaration
        init: NodeId,
        condition: NodeId,
        update: NodeId,
        body: Vec<NodeId>,
    },
    If { condition: NodeId, body: Vec<NodeId> },
    Return { value: Option<NodeId> },
    Comment { text: String },
    Param { ty: NodeId, name: NodeId },
    Call { callee: Callee, args: Vec<NodeId> },
    Type { ty: Ty },
    Binary { left: NodeId, op: NodeId, right: NodeId },
    Update { target: NodeId, op: UpdateOp, step: Option<NodeId> },
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Program { .. } => "program",
            NodeKind::Hole(_) => "hole",
            NodeKind::Literal(_) => "literal",
            NodeKind::Identifier { .. } => "identifier",
            NodeKind::Operator(_) => "operator",
            NodeKind::VarDecl { .. } => "var-decl",
            NodeKind::FunctionDecl { .. } => "function-decl",
            NodeKind::ForLoop { .. } => "for-loop",
            NodeKind::If { .. } => "if",
            NodeKind::Return { .. } => "return",
            NodeKind::Comment { .. } => "comment",
            NodeKind::Param { .. } => "param",
            NodeKind::Call { .. } => "call",
            NodeKind::Type { .. } => "type",
            NodeKind::Binary { .. } => "binary",
            NodeKind::Update { .. } => "update",
        }
    }

    pub fn as_hole(&self) -> Option<&Hole> {
        match self {
            NodeKind::Hole(hole) => Some(hole),
            _ => None,
        }
    }

    pub fn is_hole(&self) -> bool {
        matches!(self, NodeKind::Hole(_))
    }

    /// Child slots in source order, each with the role it demands
    pub fn slots(&self) -> Vec<(NodeId, SlotRole)> {
        use SlotRole as R;
        let block = |ids: &[NodeId]| ids.iter().map(|id| (*id, R::Statement)).collect::<Vec<_>>();
        match self {
            NodeKind::Program { items } => block(items),
            NodeKind::Hole(_)
            | NodeKind::Literal(_)
            | NodeKind::Identifier { .. }
            | NodeKind::Operator(_)
            | NodeKind::Comment { .. }
            | NodeKind::Type { .. } => Vec::new(),
            NodeKind::VarDecl { ty, name, init } => {
                vec![(*ty, R::Type), (*name, R::Identifier), (*init, R::Expression)]
            }
            NodeKind::FunctionDecl { name, return_type, params, body } => {
                let mut slots = vec![(*name, R::Identifier), (*return_type, R::Type)];
                slots.extend(params.iter().map(|id| (*id, R::Parameter)));
                slots.extend(block(body));
                slots
            }
            NodeKind::ForLoop { init, condition, update, body, .. } => {
                let mut slots = vec![
                    (*init, R::Statement),
                    (*condition, R::Expression),
                    (*update, R::Expression),
                ];
                slots.extend(block(body));
                slots
            }
            NodeKind::If { condition, body } => {
                let mut slots = vec![(*condition, R::Expression)];
                slots.extend(block(body));
                slots
            }
            NodeKind::Return { value } => value.iter().map(|id| (*id, R::Expression)).collect(),
            NodeKind::Param { ty, name } => vec![(*ty, R::Type), (*name, R::Identifier)],
            NodeKind::Call { args, .. } => args.iter().map(|id| (*id, R::Expression)).collect(),
            NodeKind::Binary { left, op, right } => {
                vec![(*left, R::Expression), (*op, R::Operator), (*right, R::Expression)]
            }
            NodeKind::Update { target, step, .. } => {
                let mut slots = vec![(*target, R::Identifier)];
                slots.extend(step.iter().map(|id| (*id, R::Expression)));
                slots
            }
        }
    }

    pub fn children(&self) -> Vec<NodeId> {
        self.slots().into_iter().map(|(id, _)| id).collect()
    }

    /// Whether this node may occupy a slot with the given role
    pub fn fits(&self, role: SlotRole) -> bool {
        match self {
            NodeKind::Hole(hole) => role != SlotRole::Operator && SlotRole::from(hole.role) == role,
            NodeKind::Program { .. } => false,
            NodeKind::VarDecl { .. }
            | NodeKind::FunctionDecl { .. }
            | NodeKind::ForLoop { .. }
            | NodeKind::If { .. }
            | NodeKind::Return { .. }
            | NodeKind::Comment { .. } => role == SlotRole::Statement,
            NodeKind::Identifier { .. } => {
                matches!(role, SlotRole::Expression | SlotRole::Identifier)
            }
            NodeKind::Literal(_)
            | NodeKind::Call { .. }
            | NodeKind::Binary { .. }
            | NodeKind::Update { .. } => role == SlotRole::Expression,
            NodeKind::Operator(_) => role == SlotRole::Operator,
            NodeKind::Type { .. } => role == SlotRole::Type,
            NodeKind::Param { .. } => role == SlotRole::Parameter,
        }
    }

    /// Ordered child lists that must never be empty
    pub(crate) fn required_lists(&self) -> Vec<(&'static str, &[NodeId])> {
        match self {
            NodeKind::FunctionDecl { params, body, .. } => {
                vec![("params", params.as_slice()), ("body", body.as_slice())]
            }
            NodeKind::ForLoop { body, .. } | NodeKind::If { body, .. } => {
                vec![("body", body.as_slice())]
            }
            _ => Vec::new(),
        }
    }

    /// The ordered list (items, body, params or args) holding `child`
    pub(crate) fn list_containing_mut(&mut self, child: NodeId) -> Option<&mut Vec<NodeId>> {
        let lists: Vec<&mut Vec<NodeId>> = match self {
            NodeKind::Program { items } => vec![items],
            NodeKind::FunctionDecl { params, body, .. } => vec![params, body],
            NodeKind::ForLoop { body, .. } | NodeKind::If { body, .. } => vec![body],
            NodeKind::Call { args, .. } => vec![args],
            _ => Vec::new(),
        };
        lists.into_iter().find(|list| list.contains(&child))
    }

    pub(crate) fn list_containing(&self, child: NodeId) -> Option<&[NodeId]> {
        let lists: Vec<&Vec<NodeId>> = match self {
            NodeKind::Program { items } => vec![items],
            NodeKind::FunctionDecl { params, body, .. } => vec![params, body],
            NodeKind::ForLoop { body, .. } | NodeKind::If { body, .. } => vec![body],
            NodeKind::Call { args, .. } => vec![args],
            _ => Vec::new(),
        };
        lists.into_iter().find(|list| list.contains(&child)).map(|list| list.as_slice())
    }

    /// Point the slot holding `old` at `new`; false when `old` is not a child
    pub(crate) fn replace_child(&mut self, old: NodeId, new: NodeId) -> bool {
        if let Some(list) = self.list_containing_mut(old) {
            for id in list.iter_mut().filter(|id| **id == old) {
                *id = new;
            }
            return true;
        }
        let swap = |slot: &mut NodeId| {
            if *slot == old {
                *slot = new;
                true
            } else {
                false
            }
        };
        match self {
            NodeKind::VarDecl { ty, name, init } => swap(ty) | swap(name) | swap(init),
            NodeKind::FunctionDecl { name, return_type, .. } => swap(name) | swap(return_type),
            NodeKind::ForLoop { init, condition, update, .. } => {
                swap(init) | swap(condition) | swap(update)
            }
            NodeKind::If { condition, .. } => swap(condition),
            NodeKind::Return { value: Some(value) } => swap(value),
            NodeKind::Param { ty, name } => swap(ty) | swap(name),
            NodeKind::Binary { left, op, right } => swap(left) | swap(op) | swap(right),
            NodeKind::Update { target, step, .. } => {
                let hit = swap(target);
                match step {
                    Some(step) => hit | swap(step),
                    None => hit,
                }
            }
            _ => false,
        }
    }
}
