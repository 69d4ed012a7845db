//! Editor state machine

use std::collections::BTreeMap;

use gestalt_ast::{HoleRole, NodeId, Tree, Ty};
use gestalt_codegen::generate;
use gestalt_edit::{apply, choices, entry_program, Applied, Choice, Payload};
use gestalt_gesture::{engine_for, EditContext, Point, Preview, Release};
use gestalt_lexicon::{Catalog, Lexicon};
use gestalt_symbols::{resolve, ScopeSnapshot};
use tracing::{debug, trace};

use crate::session::{Picker, Session};
use crate::{EditorConfig, EditorError};

/// What a pointer press did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pressed {
    /// A gesture engine took the target
    Gesture(&'static str),
    /// No engine handles the target, but a click may open the picker
    ClickOnly,
    /// The press closed the open picker and did nothing else
    PickerDismissed,
    Ignored,
}

/// What a pointer release did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Released {
    Committed,
    PickerOpened,
    Nothing,
}

/// Passed to commit listeners after every committed edit
#[derive(Debug)]
pub struct Committed<'a> {
    pub profile: &'a str,
    pub output: &'a str,
    pub tree: &'a Tree,
}

type Listener = Box<dyn FnMut(&Committed<'_>)>;

pub struct Editor {
    config: EditorConfig,
    catalog: Catalog,
    lexicon: Lexicon,
    tree: Tree,
    session: Option<Session>,
    picker: Option<Picker>,
    scopes: BTreeMap<NodeId, ScopeSnapshot>,
    output: String,
    listeners: Vec<Listener>,
}

impl Editor {
    /// An editor holding the entry program, in the configured profile
    pub fn new(config: EditorConfig) -> Result<Self, EditorError> {
        config.validate()?;
        let catalog = Catalog::builtin();
        let lexicon = catalog.get(&config.profile)?.clone();
        let tree = entry_program(&lexicon)?;
        let mut editor = Self {
            config,
            catalog,
            lexicon,
            tree,
            session: None,
            picker: None,
            scopes: BTreeMap::new(),
            output: String::new(),
            listeners: Vec::new(),
        };
        editor.refresh();
        Ok(editor)
    }

    /// Reset to the entry program, dropping any session or picker
    pub fn initialize(&mut self) -> Result<(), EditorError> {
        self.tree = entry_program(&self.lexicon)?;
        self.session = None;
        self.picker = None;
        debug!(profile = %self.lexicon.name, "editor initialized");
        self.committed();
        Ok(())
    }

    // ===== Accessors =====

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn profile(&self) -> &str {
        &self.lexicon.name
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn picker(&self) -> Option<&Picker> {
        self.picker.as_ref()
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// Label of the candidate the active gesture would commit
    pub fn preview(&self) -> Option<&Preview> {
        self.session.as_ref().map(|session| &session.preview)
    }

    /// Bindings visible at `node`; holes use the snapshot taken at the last commit
    pub fn scope_at(&self, node: NodeId) -> Result<ScopeSnapshot, EditorError> {
        if !self.tree.contains(node) {
            return Err(EditorError::UnknownNode(node));
        }
        Ok(self.scopes.get(&node).cloned().unwrap_or_else(|| resolve(&self.tree, node)))
    }

    /// Holes that only gestures fill; clicking them never opens the picker
    pub fn is_gesture_only(&self, hole: NodeId) -> bool {
        match self.tree.as_hole(hole) {
            Some(hole) => match hole.role {
                HoleRole::Statement | HoleRole::Parameter => true,
                HoleRole::Expression => hole.expected == Ty::Int,
                HoleRole::Type | HoleRole::Identifier => false,
            },
            None => false,
        }
    }

    fn is_pickable(&self, node: NodeId) -> bool {
        self.tree.as_hole(node).is_some() && !self.is_gesture_only(node)
    }

    // ===== Profiles =====

    pub fn set_profile(&mut self, name: &str) -> Result<(), EditorError> {
        self.lexicon = self.catalog.get(name)?.clone();
        debug!(profile = %self.lexicon.name, "profile switched");
        self.committed();
        Ok(())
    }

    /// Switch to the next profile in catalog order; returns its name
    pub fn cycle_profile(&mut self) -> Result<&str, EditorError> {
        self.lexicon = self.catalog.next_after(&self.lexicon.name)?.clone();
        debug!(profile = %self.lexicon.name, "profile cycled");
        self.committed();
        Ok(&self.lexicon.name)
    }

    // ===== Commit channel =====

    /// Call `listener` after every committed edit and profile switch
    pub fn subscribe(&mut self, listener: impl FnMut(&Committed<'_>) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Recompute hole scopes and regenerate the output
    fn refresh(&mut self) {
        self.scopes = self.tree.holes().into_iter().map(|hole| (hole, resolve(&self.tree, hole))).collect();
        self.output = generate(&self.tree, &self.lexicon);
    }

    fn committed(&mut self) {
        self.refresh();
        let event = Committed { profile: &self.lexicon.name, output: &self.output, tree: &self.tree };
        for listener in &mut self.listeners {
            listener(&event);
        }
    }

    // ===== Pointer input =====

    pub fn pointer_down(&mut self, target: NodeId, point: Point) -> Pressed {
        if self.picker.take().is_some() {
            debug!("picker dismissed by outside press");
            return Pressed::PickerDismissed;
        }
        if self.session.is_some() {
            self.cancel();
        }
        if !self.tree.contains(target) {
            return Pressed::Ignored;
        }

        let mut ctx = EditContext::new(&mut self.tree, &self.lexicon);
        if let Some(mut engine) = engine_for(&self.config.gestures, &ctx, target) {
            if engine.start(&mut ctx, target, point) {
                let name = engine.name();
                debug!(node = %target, engine = name, "gesture started");
                self.session = Some(Session::new(target, point, Some(engine)));
                return Pressed::Gesture(name);
            }
        }
        if self.is_pickable(target) {
            self.session = Some(Session::new(target, point, None));
            return Pressed::ClickOnly;
        }
        Pressed::Ignored
    }

    pub fn pointer_move(&mut self, point: Point) -> Preview {
        let Some(session) = self.session.as_mut() else {
            return Preview::none();
        };
        session.track(point);
        let Some(engine) = session.engine.as_mut() else {
            return Preview::none();
        };

        let mut ctx = EditContext::new(&mut self.tree, &self.lexicon);
        let preview = engine.drag(&mut ctx, point);
        session.preview = preview.clone();
        if preview.changed {
            session.changed = true;
            self.output = generate(&self.tree, &self.lexicon);
        }
        trace!(x = point.x, y = point.y, label = ?preview.label, "pointer move");
        preview
    }

    pub fn pointer_up(&mut self, point: Point) -> Released {
        let Some(mut session) = self.session.take() else {
            return Released::Nothing;
        };
        session.track(point);

        if session.travel <= self.config.click_slop {
            return self.click(session);
        }

        let release = match session.engine.as_mut() {
            Some(engine) => {
                let mut ctx = EditContext::new(&mut self.tree, &self.lexicon);
                if engine.drag(&mut ctx, point).changed {
                    session.changed = true;
                }
                engine.end(&mut ctx)
            }
            None => Release::NoCandidate,
        };

        if release == Release::Committed {
            self.committed();
            return Released::Committed;
        }
        if session.changed {
            // a continuous edit that ended where it started
            self.refresh();
        }
        Released::Nothing
    }

    /// A release within the click slop: the engine never commits, and
    /// pickable holes open the picker
    fn click(&mut self, mut session: Session) -> Released {
        if let Some(engine) = session.engine.as_mut() {
            let mut ctx = EditContext::new(&mut self.tree, &self.lexicon);
            engine.cancel(&mut ctx);
            debug!(node = %session.target, engine = engine.name(), "gesture released as click");
        }
        if session.changed {
            self.committed();
            return Released::Committed;
        }
        if self.open_picker(session.target) {
            return Released::PickerOpened;
        }
        Released::Nothing
    }

    /// Abandon the session. Continuous edits stay; release edits are dropped.
    pub fn cancel(&mut self) {
        let Some(mut session) = self.session.take() else {
            return;
        };
        if let Some(engine) = session.engine.as_mut() {
            let mut ctx = EditContext::new(&mut self.tree, &self.lexicon);
            engine.cancel(&mut ctx);
            debug!(node = %session.target, engine = engine.name(), "gesture cancelled");
        }
        if session.changed {
            self.committed();
        }
    }

    // ===== Picker =====

    fn open_picker(&mut self, target: NodeId) -> bool {
        if !self.is_pickable(target) {
            return false;
        }
        let choices = choices(&self.tree, &self.lexicon, target);
        if choices.is_empty() {
            return false;
        }
        debug!(node = %target, count = choices.len(), "picker opened");
        self.picker = Some(Picker { target, choices });
        true
    }

    pub fn choices(&self) -> Option<&[Choice]> {
        self.picker.as_ref().map(|p| p.choices.as_slice())
    }

    /// Apply the choice at `path` (indices through nested submenus) and close the picker
    pub fn select(&mut self, path: &[usize]) -> Result<Applied, EditorError> {
        let picker = self.picker.as_ref().ok_or(EditorError::NoPicker)?;
        let choice = Choice::at_path(&picker.choices, path).ok_or_else(|| EditorError::ChoicePath(path.to_vec()))?;
        let payload = choice.payload.clone().ok_or_else(|| EditorError::Submenu(path.to_vec()))?;
        let target = picker.target;
        self.picker = None;
        self.apply(target, &payload)
    }

    pub fn dismiss(&mut self) {
        self.picker = None;
    }

    /// Programmatic edit; on success the output is regenerated and listeners notified
    pub fn apply(&mut self, target: NodeId, payload: &Payload) -> Result<Applied, EditorError> {
        let applied = apply(&mut self.tree, &self.lexicon, target, payload)?;
        debug!(node = %target, payload = %payload.describe(), "edit applied");
        self.committed();
        Ok(applied)
    }
}
