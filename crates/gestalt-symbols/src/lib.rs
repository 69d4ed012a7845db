//! gestalt-symbols: scope resolution
//!
//! Computes which variables, functions and types are visible at a tree
//! position under declare-before-use rules, and synthesizes fresh names for
//! new declarations.
//!
//! # Example
//!
//! ```ignore
//! use gestalt_symbols::resolve;
//!
//! let scope = resolve(&tree, hole);
//! for var in scope.variables_fitting(Ty::Float) {
//!     println!("{}: {}", var.name, var.ty);
//! }
//! ```

mod naming;
mod resolver;
mod symbol;

pub use naming::{
    candidate_names, declared_names, fresh_name, function_name, loop_counter, variable_name,
    FLOAT_COUNTERS, INT_COUNTERS,
};
pub use resolver::{resolve, ScopeResolver};
pub use symbol::{FnBinding, ScopeSnapshot, VarBinding};
