//! Literal formatting rules

use gestalt_ast::Ty;
use serde::{Deserialize, Serialize};

/// How numeric literals are spelled in a profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiteralRules {
    /// Floats always carry a decimal point (`1.0`, never `1`)
    pub force_decimal: bool,
    /// Appended to every float literal (`1.0f`)
    pub float_suffix: String,
    /// Fraction digits kept before trailing zeros are trimmed
    pub fraction_digits: usize,
}

impl LiteralRules {
    pub fn format(&self, value: f64, ty: Ty) -> String {
        let value = if value.is_finite() { value } else { 0.0 };
        if ty == Ty::Int {
            return format!("{}", value.round() as i64);
        }

        let mut text = format!("{:.*}", self.fraction_digits, value);
        if text.contains('.') {
            while text.ends_with('0') {
                text.pop();
            }
            if text.ends_with('.') {
                if self.force_decimal {
                    text.push('0');
                } else {
                    text.pop();
                }
            }
        }
        if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
            text.remove(0);
        }
        text.push_str(&self.float_suffix);
        text
    }
}
