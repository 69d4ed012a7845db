//! Gestalt Editor - the interaction controller
//!
//! [`Editor`] owns the program tree and routes pointer input to gesture
//! engines, opens the choice picker on clicks, and regenerates the output
//! after every committed edit. It is single-threaded and synchronous: every
//! call completes before the next one starts.

mod config;
mod editor;
mod session;

pub use config::EditorConfig;
pub use editor::{Committed, Editor, Pressed, Released};
pub use session::Picker;

pub use gestalt_gesture::{Point, Preview};

use std::path::PathBuf;

use gestalt_ast::NodeId;
use gestalt_edit::EditError;
use gestalt_gesture::ConfigError;
use gestalt_lexicon::ProfileError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error("invalid gesture configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("click slop must be a non-negative number, got {0}")]
    ClickSlop(f64),

    #[error("cannot parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("cannot read {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },

    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    #[error("no picker is open")]
    NoPicker,

    #[error("no choice at path {0:?}")]
    ChoicePath(Vec<usize>),

    #[error("choice at path {0:?} opens a submenu")]
    Submenu(Vec<usize>),
}
