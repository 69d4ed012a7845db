//! Gestalt Codegen - source text generation
//!
//! Renders the program tree in the active profile. Generation never fails:
//! holes and constructs a profile lacks degrade locally (see [`Printer`]).

mod printer;

pub use printer::{Printer, UNNAMED};

use gestalt_ast::Tree;
use gestalt_lexicon::Lexicon;

/// Render the whole tree with `lexicon`
pub fn generate(tree: &Tree, lexicon: &Lexicon) -> String {
    Printer::new(tree, lexicon).program()
}
