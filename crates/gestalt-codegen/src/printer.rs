//! Source printer
//!
//! Renders statements as indented lines and expressions as strings. Holes and
//! constructs the profile cannot express degrade to something that still
//! parses in the target language.

use gestalt_ast::{Callee, HoleRole, NodeId, NodeKind, Tree, Ty, UpdateOp};
use gestalt_lexicon::{signature, DeclStyle, Lexicon};
use tracing::debug;

/// Name printed for an identifier slot that is still a hole
pub const UNNAMED: &str = "unnamed";

pub struct Printer<'a> {
    tree: &'a Tree,
    lexicon: &'a Lexicon,
}

impl<'a> Printer<'a> {
    pub fn new(tree: &'a Tree, lexicon: &'a Lexicon) -> Self {
        Self { tree, lexicon }
    }

    /// The whole program, top-level items separated by blank lines
    pub fn program(&self) -> String {
        let mut blocks = Vec::new();
        for item in self.tree.children(self.tree.root()) {
            if !self.lexicon.nested_functions {
                for nested in self.nested_functions(item) {
                    debug!(node = %nested, profile = %self.lexicon.name, "hoisting nested function");
                    blocks.push(self.statement(nested, 0).join("\n"));
                }
            }
            let lines = self.statement(item, 0);
            if !lines.is_empty() {
                blocks.push(lines.join("\n"));
            }
        }
        let mut out = blocks.join("\n\n");
        out.push('\n');
        out
    }

    fn indent(&self, level: usize) -> String {
        self.lexicon.indent.repeat(level)
    }

    /// Function declarations inside `id`, innermost first
    fn nested_functions(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        for child in self.tree.children(id) {
            self.collect_functions(child, &mut out);
        }
        out
    }

    fn collect_functions(&self, id: NodeId, out: &mut Vec<NodeId>) {
        for child in self.tree.children(id) {
            self.collect_functions(child, out);
        }
        if matches!(self.tree.kind(id), Ok(NodeKind::FunctionDecl { .. })) {
            out.push(id);
        }
    }

    // ===== Statements =====

    /// Lines for the statement `id` at nesting `level`; empty for omitted statements
    pub fn statement(&self, id: NodeId, level: usize) -> Vec<String> {
        let ind = self.indent(level);
        let Ok(kind) = self.tree.kind(id) else {
            return Vec::new();
        };

        match kind {
            NodeKind::Hole(_) => Vec::new(),
            NodeKind::VarDecl { .. } => vec![format!("{}{};", ind, self.declaration(id))],
            NodeKind::FunctionDecl { name, return_type, params, body } => {
                if level > 0 && !self.lexicon.nested_functions {
                    // hoisted by `program`
                    return Vec::new();
                }
                let params = params.iter().filter_map(|p| self.param(*p)).collect::<Vec<_>>().join(", ");
                let head = match &self.lexicon.function_keyword {
                    Some(keyword) => format!("{} {}", keyword, self.name(*name)),
                    None => format!("{} {}", self.type_name(*return_type), self.name(*name)),
                };
                self.block(format!("{}{}({}) {{", ind, head, params), body, level)
            }
            NodeKind::ForLoop { init, condition, update, body, .. } => {
                let head = format!(
                    "{}for ({}; {}; {}) {{",
                    ind,
                    self.declaration(*init),
                    self.expression(*condition),
                    self.expression(*update)
                );
                self.block(head, body, level)
            }
            NodeKind::If { condition, body } => {
                self.block(format!("{}if ({}) {{", ind, self.expression(*condition)), body, level)
            }
            NodeKind::Return { value: None } => vec![format!("{}return;", ind)],
            NodeKind::Return { value: Some(value) } => vec![format!("{}return {};", ind, self.expression(*value))],
            NodeKind::Comment { text } => vec![format!("{}// {}", ind, text)],
            _ => vec![format!("{}{};", ind, self.expression(id))],
        }
    }

    fn block(&self, head: String, body: &[NodeId], level: usize) -> Vec<String> {
        let mut lines = vec![head];
        for stmt in body {
            lines.extend(self.statement(*stmt, level + 1));
        }
        lines.push(format!("{}}}", self.indent(level)));
        lines
    }

    /// `float x = 0.0` or `let x = 0`, without the terminator
    fn declaration(&self, id: NodeId) -> String {
        match self.tree.kind(id) {
            Ok(NodeKind::VarDecl { ty, name, init }) => {
                let head = match &self.lexicon.decl {
                    DeclStyle::Typed => format!("{} {}", self.type_name(*ty), self.name(*name)),
                    DeclStyle::Keyword(keyword) => format!("{} {}", keyword, self.name(*name)),
                };
                format!("{} = {}", head, self.expression(*init))
            }
            _ => self.expression(id),
        }
    }

    fn param(&self, id: NodeId) -> Option<String> {
        match self.tree.kind(id) {
            Ok(NodeKind::Param { ty, name }) => Some(match self.lexicon.decl {
                DeclStyle::Typed => format!("{} {}", self.type_name(*ty), self.name(*name)),
                DeclStyle::Keyword(_) => self.name(*name),
            }),
            _ => None,
        }
    }

    // ===== Expressions =====

    pub fn expression(&self, id: NodeId) -> String {
        let Ok(kind) = self.tree.kind(id) else {
            return String::new();
        };
        match kind {
            NodeKind::Hole(hole) => match hole.role {
                HoleRole::Type => self.lexicon.type_name(Ty::Float).to_string(),
                HoleRole::Identifier => {
                    debug!(node = %id, "unnamed identifier hole");
                    UNNAMED.to_string()
                }
                _ => {
                    debug!(node = %id, expected = %hole.expected, "expression hole rendered as default value");
                    self.lexicon.default_value(hole.expected)
                }
            },
            NodeKind::Literal(literal) => self.lexicon.format_literal(literal),
            NodeKind::Identifier { name } => name.clone(),
            NodeKind::Type { ty } => self.lexicon.type_name(*ty).to_string(),
            NodeKind::Operator(op) => self.lexicon.operator(&op.symbol).to_string(),
            NodeKind::Binary { left, op, right } => {
                format!("{} {} {}", self.operand(*left), self.expression(*op), self.operand(*right))
            }
            NodeKind::Call { callee, args } => self.call(id, callee, args),
            NodeKind::Update { target, op, step } => match (op, step) {
                (UpdateOp::Increment | UpdateOp::Decrement, _) => {
                    format!("{}{}", self.expression(*target), op.symbol())
                }
                (_, Some(step)) => format!("{} {} {}", self.expression(*target), op.symbol(), self.expression(*step)),
                (_, None) => format!("{} {} 1", self.expression(*target), op.symbol()),
            },
            NodeKind::VarDecl { .. } => self.declaration(id),
            other => {
                debug!(node = %id, kind = other.name(), "not an expression");
                String::new()
            }
        }
    }

    /// Nested binaries are parenthesized
    fn operand(&self, id: NodeId) -> String {
        match self.tree.kind(id) {
            Ok(NodeKind::Binary { .. }) => format!("({})", self.expression(id)),
            _ => self.expression(id),
        }
    }

    fn call(&self, id: NodeId, callee: &Callee, args: &[NodeId]) -> String {
        let rendered: Vec<String> = args.iter().map(|a| self.expression(*a)).collect();
        match callee {
            Callee::User(name) => format!("{}({})", name, rendered.join(", ")),
            Callee::Builtin(name) => match self.lexicon.builtin(name) {
                Some(builtin) => builtin.render(&rendered),
                None => {
                    let returns = signature(name).map(|(_, returns)| returns).unwrap_or(Ty::Float);
                    debug!(node = %id, builtin = %name, profile = %self.lexicon.name, "builtin unavailable");
                    format!(
                        "{} /* {} is unavailable in {} */",
                        self.lexicon.default_value(returns),
                        name,
                        self.lexicon.title
                    )
                }
            },
        }
    }

    fn type_name(&self, id: NodeId) -> String {
        match self.tree.kind(id) {
            Ok(NodeKind::Type { ty }) => self.lexicon.type_name(*ty).to_string(),
            _ => self.lexicon.type_name(Ty::Float).to_string(),
        }
    }

    fn name(&self, id: NodeId) -> String {
        match self.tree.kind(id) {
            Ok(NodeKind::Identifier { name }) => name.clone(),
            _ => UNNAMED.to_string(),
        }
    }
}
