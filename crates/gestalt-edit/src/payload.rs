//! Edit payloads: what a committed choice or gesture asks the factory to do

use gestalt_ast::{HoleRole, LoopTemplate, Ty, UpdateOp};
use gestalt_lexicon::signature;
use serde::{Deserialize, Serialize};

use crate::ParamEdit;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "edit", rename_all = "kebab-case")]
pub enum Payload {
    // statements
    DeclareVariable { ty: Ty },
    DeclareFunction { returns: Ty },
    ForLoop { template: LoopTemplate },
    If,
    Return,
    Comment,

    // expressions
    Number { ty: Ty },
    Bool { value: bool },
    Variable { name: String, ty: Ty },
    CallFunction { name: String, returns: Ty, params: Vec<Ty> },
    CallBuiltin { name: String },
    Math { ty: Ty },
    Compare { operand: Ty },
    Mutate { target: String, op: UpdateOp },

    Type { ty: Ty },
    Identifier { name: String },

    // parameter lists
    AddParam { ty: Ty },
    AddParamNext { ty: Ty },
    AddComma,
    DeleteLastParam,
    ClearParams,
}

impl Payload {
    /// Role of the hole this payload fills or, for list edits, of the slot it targets
    pub fn role(&self) -> HoleRole {
        match self {
            Payload::DeclareVariable { .. }
            | Payload::DeclareFunction { .. }
            | Payload::ForLoop { .. }
            | Payload::If
            | Payload::Return
            | Payload::Comment => HoleRole::Statement,
            Payload::Number { .. }
            | Payload::Bool { .. }
            | Payload::Variable { .. }
            | Payload::CallFunction { .. }
            | Payload::CallBuiltin { .. }
            | Payload::Math { .. }
            | Payload::Compare { .. }
            | Payload::Mutate { .. } => HoleRole::Expression,
            Payload::Type { .. } => HoleRole::Type,
            Payload::Identifier { .. } => HoleRole::Identifier,
            Payload::AddParam { .. }
            | Payload::AddParamNext { .. }
            | Payload::AddComma
            | Payload::DeleteLastParam
            | Payload::ClearParams => HoleRole::Parameter,
        }
    }

    /// Short human description, used in previews and errors
    pub fn describe(&self) -> String {
        match self {
            Payload::DeclareVariable { ty } => format!("{} variable", ty),
            Payload::DeclareFunction { returns } => format!("{} function", returns),
            Payload::ForLoop { template } => format!("{} for-loop", template.name()),
            Payload::If => "if".to_string(),
            Payload::Return => "return".to_string(),
            Payload::Comment => "comment".to_string(),
            Payload::Number { ty } => format!("{} literal", ty),
            Payload::Bool { value } => value.to_string(),
            Payload::Variable { name, .. } => name.clone(),
            Payload::CallFunction { name, .. } | Payload::CallBuiltin { name } => format!("{}()", name),
            Payload::Math { ty } => format!("{} math", ty),
            Payload::Compare { operand } => format!("{} comparison", operand),
            Payload::Mutate { target, op } => format!("{}{}", target, op.symbol()),
            Payload::Type { ty } => ty.to_string(),
            Payload::Identifier { name } => name.clone(),
            Payload::AddParam { ty } => format!("{} param", ty),
            Payload::AddParamNext { ty } => format!("{} param, ...", ty),
            Payload::AddComma => "add comma".to_string(),
            Payload::DeleteLastParam => "delete last param".to_string(),
            Payload::ClearParams => "clear parameters".to_string(),
        }
    }

    /// List edits operate on the whole parameter list rather than fill a hole
    pub fn is_list_edit(&self) -> bool {
        self.param_edit().is_some()
    }

    /// The parameter list edit this payload requests, if it is one
    pub fn param_edit(&self) -> Option<ParamEdit> {
        match self {
            Payload::AddParam { ty } => Some(ParamEdit::Add(*ty)),
            Payload::AddParamNext { ty } => Some(ParamEdit::AddNext(*ty)),
            Payload::AddComma => Some(ParamEdit::AddComma),
            Payload::DeleteLastParam => Some(ParamEdit::DeleteLast),
            Payload::ClearParams => Some(ParamEdit::Clear),
            Payload::DeclareVariable { .. }
            | Payload::DeclareFunction { .. }
            | Payload::ForLoop { .. }
            | Payload::If
            | Payload::Return
            | Payload::Comment
            | Payload::Number { .. }
            | Payload::Bool { .. }
            | Payload::Variable { .. }
            | Payload::CallFunction { .. }
            | Payload::CallBuiltin { .. }
            | Payload::Math { .. }
            | Payload::Compare { .. }
            | Payload::Mutate { .. }
            | Payload::Type { .. }
            | Payload::Identifier { .. } => None,
        }
    }

    /// Type of the expression an expression payload builds
    pub fn yields(&self) -> Option<Ty> {
        match self {
            Payload::Number { ty } | Payload::Math { ty } | Payload::Variable { ty, .. } => Some(*ty),
            Payload::Bool { .. } | Payload::Compare { .. } => Some(Ty::Bool),
            Payload::CallFunction { returns, .. } => Some(*returns),
            Payload::CallBuiltin { name } => signature(name).map(|(_, returns)| returns),
            Payload::Mutate { .. } => Some(Ty::Int),
            Payload::DeclareVariable { .. }
            | Payload::DeclareFunction { .. }
            | Payload::ForLoop { .. }
            | Payload::If
            | Payload::Return
            | Payload::Comment
            | Payload::Type { .. }
            | Payload::Identifier { .. }
            | Payload::AddParam { .. }
            | Payload::AddParamNext { .. }
            | Payload::AddComma
            | Payload::DeleteLastParam
            | Payload::ClearParams => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_json_shape() {
        let json = serde_json::to_string(&Payload::DeclareFunction { returns: Ty::Int }).unwrap();
        assert_eq!(json, r#"{"edit":"declare-function","returns":"int"}"#);
        let back: Payload = serde_json::from_str(r#"{"edit":"for-loop","template":"float"}"#).unwrap();
        assert_eq!(back, Payload::ForLoop { template: LoopTemplate::Float });
    }

    #[test]
    fn test_mutate_payload_json() {
        let json = serde_json::to_string(&Payload::Mutate { target: "i".into(), op: UpdateOp::Increment }).unwrap();
        assert_eq!(json, r#"{"edit":"mutate","target":"i","op":"increment"}"#);
        let back: Payload = serde_json::from_str(r#"{"edit":"mutate","target":"j","op":"sub-assign"}"#).unwrap();
        assert_eq!(back, Payload::Mutate { target: "j".into(), op: UpdateOp::SubAssign });
    }

    #[test]
    fn test_every_payload_survives_json() {
        let payloads = vec![
            Payload::DeclareVariable { ty: Ty::Vec3 },
            Payload::DeclareFunction { returns: Ty::Void },
            Payload::ForLoop { template: LoopTemplate::Custom },
            Payload::If,
            Payload::Return,
            Payload::Comment,
            Payload::Number { ty: Ty::Float },
            Payload::Bool { value: false },
            Payload::Variable { name: "x1".into(), ty: Ty::Float },
            Payload::CallFunction { name: "intFn1".into(), returns: Ty::Int, params: vec![Ty::Int, Ty::Float] },
            Payload::CallBuiltin { name: "sin".into() },
            Payload::Math { ty: Ty::Vec2 },
            Payload::Compare { operand: Ty::Int },
            Payload::Mutate { target: "i".into(), op: UpdateOp::Decrement },
            Payload::Type { ty: Ty::Bool },
            Payload::Identifier { name: "n1".into() },
            Payload::AddParam { ty: Ty::Int },
            Payload::AddParamNext { ty: Ty::Vec4 },
            Payload::AddComma,
            Payload::DeleteLastParam,
            Payload::ClearParams,
        ];
        for payload in payloads {
            let json = serde_json::to_string(&payload).unwrap();
            let back: Payload = serde_json::from_str(&json).unwrap_or_else(|e| panic!("{}: {}", json, e));
            assert_eq!(back, payload);
        }
    }

    #[test]
    fn test_roles() {
        assert_eq!(Payload::Comment.role(), HoleRole::Statement);
        assert_eq!(Payload::Bool { value: true }.role(), HoleRole::Expression);
        assert!(Payload::ClearParams.is_list_edit());
        assert!(!Payload::Type { ty: Ty::Int }.is_list_edit());
        assert_eq!(Payload::ClearParams.param_edit(), Some(ParamEdit::Clear));
        assert_eq!(Payload::AddParamNext { ty: Ty::Vec2 }.param_edit(), Some(ParamEdit::AddNext(Ty::Vec2)));
        assert_eq!(Payload::Mutate { target: "i".into(), op: UpdateOp::Increment }.param_edit(), None);
    }

    #[test]
    fn test_yields() {
        assert_eq!(Payload::Compare { operand: Ty::Float }.yields(), Some(Ty::Bool));
        assert_eq!(Payload::Math { ty: Ty::Vec3 }.yields(), Some(Ty::Vec3));
        assert_eq!(Payload::CallBuiltin { name: "sin".into() }.yields(), Some(Ty::Float));
        assert_eq!(Payload::If.yields(), None);
    }
}
