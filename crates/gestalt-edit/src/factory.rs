//! Node factory
//!
//! Every constructor returns the root of a detached, structurally complete
//! subtree: each required slot holds a concrete node or a hole tagged with
//! the slot's role. Splicing is left to [`crate::apply`].

use std::collections::HashSet;

use gestalt_ast::{
    Callee, Hole, Literal, LoopTemplate, NodeId, NodeKind, Operator, OperatorCategory, Tree, Ty,
    UpdateOp,
};
use gestalt_lexicon::Lexicon;
use gestalt_symbols::{declared_names, function_name, loop_counter, variable_name};

use crate::{EditError, Payload};

/// Bound of the simple loop template
const SIMPLE_LOOP_BOUND: f64 = 10.0;
/// Step of the float loop template
const FLOAT_LOOP_STEP: f64 = 0.1;
/// Text of a freshly inserted comment
const DEFAULT_COMMENT: &str = "comment";

pub struct NodeFactory<'a> {
    tree: &'a mut Tree,
    lexicon: &'a Lexicon,
}

impl<'a> NodeFactory<'a> {
    pub fn new(tree: &'a mut Tree, lexicon: &'a Lexicon) -> Self {
        Self { tree, lexicon }
    }

    /// Build the subtree a fill payload describes, for the hole `at`
    pub fn build(&mut self, payload: &Payload, at: NodeId) -> Result<NodeId, EditError> {
        let taken = declared_names(self.tree);
        let node = match payload {
            Payload::DeclareVariable { ty } => {
                let name = variable_name(*ty, &taken);
                self.var_decl(*ty, &name)
            }
            Payload::DeclareFunction { returns } => {
                let name = function_name(*returns, &taken);
                self.function_decl(*returns, &name)
            }
            Payload::ForLoop { template } => self.for_loop(*template, &taken),
            Payload::If => self.if_statement(),
            Payload::Return => {
                let returns = self.enclosing_return_type(at);
                self.return_statement(returns)
            }
            Payload::Comment => self.comment(DEFAULT_COMMENT),
            Payload::Number { ty } => self.number(0.0, *ty),
            Payload::Bool { value } => self.tree.alloc(NodeKind::Literal(Literal::boolean(*value))),
            Payload::Variable { name, .. } => self.identifier(name),
            Payload::CallFunction { name, params, .. } => self.call(Callee::User(name.clone()), params),
            Payload::CallBuiltin { name } => {
                let builtin = self
                    .lexicon
                    .builtin(name)
                    .ok_or_else(|| EditError::UnknownBuiltin(name.clone()))?;
                let params = builtin.params.clone();
                self.call(Callee::Builtin(name.clone()), &params)
            }
            Payload::Math { ty } => self.binary(OperatorCategory::Math, *ty),
            Payload::Compare { operand } => self.binary(OperatorCategory::Comparison, *operand),
            Payload::Mutate { target, op } => {
                let target = self.identifier(target);
                self.update(target, *op, None)
            }
            Payload::Type { ty } => self.type_node(*ty),
            Payload::Identifier { name } => self.identifier(name),
            Payload::AddParam { .. }
            | Payload::AddParamNext { .. }
            | Payload::AddComma
            | Payload::DeleteLastParam
            | Payload::ClearParams => {
                return Err(EditError::NotAFill(payload.describe()));
            }
        };
        Ok(node)
    }

    pub fn hole(&mut self, hole: Hole) -> NodeId {
        self.tree.hole(hole)
    }

    pub fn identifier(&mut self, name: &str) -> NodeId {
        self.tree.alloc(NodeKind::Identifier { name: name.to_string() })
    }

    pub fn type_node(&mut self, ty: Ty) -> NodeId {
        self.tree.alloc(NodeKind::Type { ty })
    }

    pub fn number(&mut self, value: f64, ty: Ty) -> NodeId {
        let ty = if ty.is_numeric() { ty } else { Ty::Float };
        self.tree.alloc(NodeKind::Literal(Literal::number(value, ty)))
    }

    /// Zero value of `ty`: a literal, or a splat constructor for vectors
    pub fn default_value(&mut self, ty: Ty) -> NodeId {
        match ty {
            Ty::Int => self.number(0.0, Ty::Int),
            Ty::Bool => self.tree.alloc(NodeKind::Literal(Literal::boolean(false))),
            Ty::Vec2 | Ty::Vec3 | Ty::Vec4 => {
                let zero = self.number(0.0, Ty::Float);
                self.tree.alloc(NodeKind::Call { callee: Callee::Builtin(ty.name().to_string()), args: vec![zero] })
            }
            Ty::Float | Ty::Void | Ty::Any => self.number(0.0, Ty::Float),
        }
    }

    pub fn var_decl(&mut self, ty: Ty, name: &str) -> NodeId {
        let ty_node = self.type_node(ty);
        let name = self.identifier(name);
        let init = self.default_value(ty);
        self.tree.alloc(NodeKind::VarDecl { ty: ty_node, name, init })
    }

    /// A function with a hole-terminated parameter list and one statement hole
    pub fn function_decl(&mut self, returns: Ty, name: &str) -> NodeId {
        let name = self.identifier(name);
        let return_type = self.type_node(returns);
        let param = self.hole(Hole::parameter());
        let body = self.hole(Hole::statement());
        self.tree.alloc(NodeKind::FunctionDecl { name, return_type, params: vec![param], body: vec![body] })
    }

    pub fn for_loop(&mut self, template: LoopTemplate, taken: &HashSet<String>) -> NodeId {
        let (init, condition, update) = match template {
            LoopTemplate::Simple => {
                let counter = loop_counter(Ty::Int, taken);
                let start = self.number(0.0, Ty::Int);
                let init = self.iterator(Ty::Int, &counter, start);
                let bound = self.number(SIMPLE_LOOP_BOUND, Ty::Int);
                let condition = self.less_than(&counter, bound);
                let target = self.identifier(&counter);
                (init, condition, self.update(target, UpdateOp::Increment, None))
            }
            LoopTemplate::Flexible => {
                let counter = loop_counter(Ty::Int, taken);
                let start = self.hole(Hole::expression(Ty::Int));
                let init = self.iterator(Ty::Int, &counter, start);
                let bound = self.hole(Hole::expression(Ty::Int));
                let condition = self.less_than(&counter, bound);
                (init, condition, self.hole(Hole::mutation()))
            }
            LoopTemplate::Float => {
                let counter = loop_counter(Ty::Float, taken);
                let start = self.number(0.0, Ty::Float);
                let init = self.iterator(Ty::Float, &counter, start);
                let bound = self.hole(Hole::expression(Ty::Float));
                let condition = self.less_than(&counter, bound);
                let target = self.identifier(&counter);
                let step = self.number(FLOAT_LOOP_STEP, Ty::Float);
                (init, condition, self.update(target, UpdateOp::AddAssign, Some(step)))
            }
            LoopTemplate::Custom => {
                let ty = self.hole(Hole::type_slot());
                let name = self.hole(Hole::identifier(Ty::Any));
                let start = self.hole(Hole::expression(Ty::Any));
                let init = self.tree.alloc(NodeKind::VarDecl { ty, name, init: start });
                let condition = self.hole(Hole::expression(Ty::Bool));
                let target = self.hole(Hole::select_existing(Ty::Any));
                (init, condition, self.update(target, UpdateOp::Increment, None))
            }
        };
        let body = self.hole(Hole::statement());
        self.tree.alloc(NodeKind::ForLoop { template, init, condition, update, body: vec![body] })
    }

    fn iterator(&mut self, ty: Ty, name: &str, start: NodeId) -> NodeId {
        let ty = self.type_node(ty);
        let name = self.identifier(name);
        self.tree.alloc(NodeKind::VarDecl { ty, name, init: start })
    }

    fn less_than(&mut self, counter: &str, bound: NodeId) -> NodeId {
        let left = self.identifier(counter);
        let op = self.tree.alloc(NodeKind::Operator(Operator::comparison("<")));
        self.tree.alloc(NodeKind::Binary { left, op, right: bound })
    }

    pub fn if_statement(&mut self) -> NodeId {
        let condition = self.hole(Hole::expression(Ty::Bool));
        let body = self.hole(Hole::statement());
        self.tree.alloc(NodeKind::If { condition, body: vec![body] })
    }

    /// `return;` for void functions, otherwise a value hole of the return type
    pub fn return_statement(&mut self, returns: Ty) -> NodeId {
        let value = match returns {
            Ty::Void => None,
            ty => Some(self.hole(Hole::expression(ty))),
        };
        self.tree.alloc(NodeKind::Return { value })
    }

    pub fn comment(&mut self, text: &str) -> NodeId {
        self.tree.alloc(NodeKind::Comment { text: text.to_string() })
    }

    pub fn param(&mut self, ty: Ty, name: &str) -> NodeId {
        let ty = self.type_node(ty);
        let name = self.identifier(name);
        self.tree.alloc(NodeKind::Param { ty, name })
    }

    /// A call with one typed argument hole per parameter
    pub fn call(&mut self, callee: Callee, params: &[Ty]) -> NodeId {
        let args = params.iter().map(|ty| self.hole(Hole::expression(*ty))).collect();
        self.tree.alloc(NodeKind::Call { callee, args })
    }

    /// `<hole> op <hole>`; math yields `operand`, comparison yields bool
    pub fn binary(&mut self, category: OperatorCategory, operand: Ty) -> NodeId {
        let left = self.hole(Hole::expression(operand));
        let op = match category {
            OperatorCategory::Math => Operator::math("+"),
            OperatorCategory::Comparison => Operator::comparison("<"),
        };
        let op = self.tree.alloc(NodeKind::Operator(op));
        let right = self.hole(Hole::expression(operand));
        self.tree.alloc(NodeKind::Binary { left, op, right })
    }

    pub fn update(&mut self, target: NodeId, op: UpdateOp, step: Option<NodeId>) -> NodeId {
        self.tree.alloc(NodeKind::Update { target, op, step })
    }

    fn enclosing_return_type(&self, at: NodeId) -> Ty {
        let Some(func) = self.tree.enclosing_function(at) else {
            return Ty::Void;
        };
        match self.tree.kind(func) {
            Ok(NodeKind::FunctionDecl { return_type, .. }) => match self.tree.kind(*return_type) {
                Ok(NodeKind::Type { ty }) => *ty,
                _ => Ty::Void,
            },
            _ => Ty::Void,
        }
    }
}

/// Build and return the entry program: `void main() { <statement hole> }`
pub fn entry_program(lexicon: &Lexicon) -> Result<Tree, EditError> {
    let mut tree = Tree::new();
    let main = NodeFactory::new(&mut tree, lexicon).function_decl(Ty::Void, "main");
    tree.push_item(main)?;
    Ok(tree)
}
