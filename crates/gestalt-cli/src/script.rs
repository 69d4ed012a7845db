//! Pointer scripts: recorded editor sessions replayed from JSON
//!
//! A script is a JSON array of steps:
//!
//! ```json
//! [
//!   { "step": "down", "at": "hole:statement:last" },
//!   { "step": "move", "x": 21, "y": -21 },
//!   { "step": "up", "x": 21, "y": -21 },
//!   { "step": "apply", "at": "hole:expression", "payload": { "edit": "number", "ty": "float" } },
//!   { "step": "profile", "name": "hlsl" }
//! ]
//! ```
//!
//! Pointer coordinates are screen pixels with y growing downwards.

use std::fmt;
use std::str::FromStr;

use gestalt_ast::{HoleRole, NodeId, NodeKind, Tree};
use gestalt_edit::{is_param_slot, Payload};
use gestalt_editor::{Editor, EditorError, Point, Pressed, Released};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("invalid selector '{0}' (expected hole:<role>[:n|last], literal[:n], operator[:n], param[:n] or node:<id>)")]
    Selector(String),

    #[error("nothing matches '{0}'")]
    NoMatch(String),

    #[error(transparent)]
    Editor(#[from] EditorError),
}

/// Which node a step targets, resolved against the tree when the step runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Selector {
    Hole { role: HoleRole, index: Index },
    Literal(Index),
    Operator(Index),
    /// A slot of any parameter list, filled or not
    Param(Index),
    Node(NodeId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Index {
    Nth(usize),
    Last,
}

impl Index {
    fn pick(self, ids: &[NodeId]) -> Option<NodeId> {
        match self {
            Index::Nth(n) => ids.get(n).copied(),
            Index::Last => ids.last().copied(),
        }
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Index::Nth(n) => write!(f, "{}", n),
            Index::Last => write!(f, "last"),
        }
    }
}

fn parse_role(name: &str) -> Option<HoleRole> {
    Some(match name {
        "statement" => HoleRole::Statement,
        "expression" => HoleRole::Expression,
        "type" => HoleRole::Type,
        "identifier" => HoleRole::Identifier,
        "parameter" => HoleRole::Parameter,
        _ => return None,
    })
}

fn parse_index(text: Option<&str>) -> Option<Index> {
    match text {
        None => Some(Index::Nth(0)),
        Some("last") => Some(Index::Last),
        Some(n) => n.parse().ok().map(Index::Nth),
    }
}

impl FromStr for Selector {
    type Err = ScriptError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || ScriptError::Selector(text.to_string());
        let mut parts = text.split(':');
        let selector = match parts.next() {
            Some("hole") => {
                let role = parts.next().and_then(parse_role).ok_or_else(invalid)?;
                Selector::Hole { role, index: parse_index(parts.next()).ok_or_else(invalid)? }
            }
            Some("literal") => Selector::Literal(parse_index(parts.next()).ok_or_else(invalid)?),
            Some("operator") => Selector::Operator(parse_index(parts.next()).ok_or_else(invalid)?),
            Some("param") => Selector::Param(parse_index(parts.next()).ok_or_else(invalid)?),
            Some("node") => {
                let id = parts.next().and_then(|n| n.trim_start_matches('#').parse().ok()).ok_or_else(invalid)?;
                Selector::Node(NodeId(id))
            }
            _ => return Err(invalid()),
        };
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(selector)
    }
}

impl TryFrom<String> for Selector {
    type Error = ScriptError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        text.parse()
    }
}

impl From<Selector> for String {
    fn from(selector: Selector) -> Self {
        selector.to_string()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Hole { role, index } => write!(f, "hole:{}:{}", role.name(), index),
            Selector::Literal(index) => write!(f, "literal:{}", index),
            Selector::Operator(index) => write!(f, "operator:{}", index),
            Selector::Param(index) => write!(f, "param:{}", index),
            Selector::Node(id) => write!(f, "node:{}", id.0),
        }
    }
}

impl Selector {
    /// Nodes are counted in document order
    pub fn resolve(&self, tree: &Tree) -> Result<NodeId, ScriptError> {
        let of_kind = |pred: fn(&NodeKind) -> bool| -> Vec<NodeId> {
            tree.preorder().into_iter().filter(|id| tree.kind(*id).is_ok_and(pred)).collect()
        };
        let found = match self {
            Selector::Hole { role, index } => index.pick(&tree.holes_with_role(*role)),
            Selector::Literal(index) => index.pick(&of_kind(|k| matches!(k, NodeKind::Literal(_)))),
            Selector::Operator(index) => index.pick(&of_kind(|k| matches!(k, NodeKind::Operator(_)))),
            Selector::Param(index) => {
                let slots: Vec<NodeId> = tree.preorder().into_iter().filter(|id| is_param_slot(tree, *id)).collect();
                index.pick(&slots)
            }
            Selector::Node(id) => Some(*id).filter(|id| tree.contains(*id)),
        };
        found.ok_or_else(|| ScriptError::NoMatch(self.to_string()))
    }
}

fn origin() -> f64 {
    0.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "kebab-case")]
pub enum Step {
    Down {
        at: Selector,
        #[serde(default = "origin")]
        x: f64,
        #[serde(default = "origin")]
        y: f64,
    },
    Move { x: f64, y: f64 },
    Up { x: f64, y: f64 },
    Cancel,
    /// Select from the open picker by index path
    Pick { path: Vec<usize> },
    Dismiss,
    Apply { at: Selector, payload: Payload },
    Profile { name: String },
    Cycle,
    Reset,
}

pub fn parse_script(text: &str) -> Result<Vec<Step>, serde_json::Error> {
    serde_json::from_str(text)
}

/// Run one step; returns a one-line account of what happened
pub fn run_step(editor: &mut Editor, step: &Step) -> Result<String, ScriptError> {
    let line = match step {
        Step::Down { at, x, y } => {
            let target = at.resolve(editor.tree())?;
            match editor.pointer_down(target, Point::new(*x, *y)) {
                Pressed::Gesture(name) => format!("down {}: {} gesture", target, name),
                Pressed::ClickOnly => format!("down {}: click", target),
                Pressed::PickerDismissed => "down: picker dismissed".to_string(),
                Pressed::Ignored => format!("down {}: ignored", target),
            }
        }
        Step::Move { x, y } => {
            let preview = editor.pointer_move(Point::new(*x, *y));
            match preview.label {
                Some(label) => format!("move ({}, {}): {}", x, y, label),
                None => format!("move ({}, {}): -", x, y),
            }
        }
        Step::Up { x, y } => match editor.pointer_up(Point::new(*x, *y)) {
            Released::Committed => "up: committed".to_string(),
            Released::PickerOpened => {
                let labels: Vec<_> = editor
                    .choices()
                    .unwrap_or_default()
                    .iter()
                    .enumerate()
                    .map(|(i, choice)| format!("{}:{}", i, choice.label))
                    .collect();
                format!("up: picker [{}]", labels.join(", "))
            }
            Released::Nothing => "up: nothing".to_string(),
        },
        Step::Cancel => {
            editor.cancel();
            "cancel".to_string()
        }
        Step::Pick { path } => {
            let applied = editor.select(path)?;
            format!("pick {:?}: {:?}", path, applied)
        }
        Step::Dismiss => {
            editor.dismiss();
            "dismiss".to_string()
        }
        Step::Apply { at, payload } => {
            let target = at.resolve(editor.tree())?;
            editor.apply(target, payload)?;
            format!("apply {} at {}", payload.describe(), target)
        }
        Step::Profile { name } => {
            editor.set_profile(name)?;
            format!("profile {}", name)
        }
        Step::Cycle => format!("profile {}", editor.cycle_profile()?),
        Step::Reset => {
            editor.initialize()?;
            "reset".to_string()
        }
    };
    Ok(line)
}

/// Parse one REPL line in the short form `down hole:statement 0 0`, `move 21 -21`, `pick 0.2`
pub fn parse_command(line: &str) -> Result<Step, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let number = |i: usize| -> Result<f64, String> {
        match words.get(i) {
            None => Ok(0.0),
            Some(w) => w.parse().map_err(|_| format!("not a number: {}", w)),
        }
    };
    let selector = |i: usize| -> Result<Selector, String> {
        words.get(i).ok_or("missing selector")?.parse().map_err(|e: ScriptError| e.to_string())
    };
    match words.first().copied() {
        Some("down") => Ok(Step::Down { at: selector(1)?, x: number(2)?, y: number(3)? }),
        Some("move") => Ok(Step::Move { x: number(1)?, y: number(2)? }),
        Some("up") => Ok(Step::Up { x: number(1)?, y: number(2)? }),
        Some("cancel") => Ok(Step::Cancel),
        Some("dismiss") => Ok(Step::Dismiss),
        Some("pick") => {
            let path = words
                .get(1)
                .ok_or("missing choice path")?
                .split('.')
                .map(|i| i.parse().map_err(|_| format!("not an index: {}", i)))
                .collect::<Result<_, _>>()?;
            Ok(Step::Pick { path })
        }
        Some("apply") => {
            let at = selector(1)?;
            let json = words.get(2..).map(|rest| rest.join(" ")).unwrap_or_default();
            let payload = serde_json::from_str(&json).map_err(|e| format!("bad payload: {}", e))?;
            Ok(Step::Apply { at, payload })
        }
        Some("profile") => Ok(Step::Profile { name: words.get(1).ok_or("missing profile name")?.to_string() }),
        Some("cycle") => Ok(Step::Cycle),
        Some("reset") => Ok(Step::Reset),
        Some(other) => Err(format!("unknown command: {}", other)),
        None => Err("empty command".to_string()),
    }
}
