//! Gestalt - a gesture-driven structural program editor
//!
//! This is the root workspace crate that provides integration tests.
//! The actual implementation is in the workspace member crates.

// Re-export main crates for convenience
pub use gestalt_ast as ast;
pub use gestalt_codegen as codegen;
pub use gestalt_edit as edit;
pub use gestalt_editor as editor;
pub use gestalt_gesture as gesture;
pub use gestalt_lexicon as lexicon;
pub use gestalt_symbols as symbols;

pub use gestalt_editor::{Editor, EditorConfig, EditorError};
