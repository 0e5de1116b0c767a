//! Editing session
//!
//! [`EditorSession`] owns everything one editor window works on: the
//! document, the view transform, the undo history, the current selection,
//! the input modes and the redraw flag. Frontends feed it normalized
//! pointer and key events and ask it to render when a frame is due.

use crate::action::ActionHistory;
use crate::actions::{CellAction, DeleteCellsAction};
use crate::config::EditorConfig;
use crate::dirty::ModifiedFlag;
use crate::document::Document;
use crate::export::{export_cells, ExportRect};
use crate::file_io::{CellRecord, PersistError, PersistedState, Persistence};
use crate::handlers::default_input_state;
use crate::renderer::{render_scene, Renderer};
use crate::selection::MultiCell;
use crate::tool::{Cursor, InputMode, InputState, KeyEvent, Modifiers};
use crate::transform::Transform;
use kurbo::{Point, Size};
use log::debug;

/// State shared by every input handler
#[derive(Debug)]
pub struct EditorState {
    pub document: Document,
    pub transform: Transform,
    pub history: ActionHistory<CellAction>,

    /// Current selection, dropped whenever the gesture or mode that made it ends
    pub selection: Option<MultiCell>,

    pub config: EditorConfig,
}

impl EditorState {
    pub fn new(image_size: Size, config: EditorConfig) -> Self {
        Self {
            document: Document::new(image_size),
            transform: Transform::new(),
            history: ActionHistory::new(config.history_capacity),
            selection: None,
            config,
        }
    }

    /// Record an edit that has already been applied to the document
    pub fn record(&mut self, action: impl Into<CellAction>) {
        self.history.done(action.into());
    }

    /// Apply an edit to the document and record it
    pub fn perform(&mut self, action: impl Into<CellAction>) {
        self.history.perform(action.into(), &mut self.document);
    }

    /// Drop the selection if its reference cell no longer exists
    pub fn prune_selection(&mut self) {
        if let Some(selection) = self.selection.as_mut() {
            if !selection.retain_existing(&self.document) {
                self.selection = None;
            }
        }
    }
}

/// One editing session over a single image
pub struct EditorSession {
    state: EditorState,
    input: InputState,
    modified: ModifiedFlag,
}

impl EditorSession {
    /// Create a session with the standard input modes, starting in pan/zoom mode
    pub fn new(image_size: Size, config: EditorConfig) -> Self {
        let mut session = Self {
            state: EditorState::new(image_size, config),
            input: default_input_state(),
            modified: ModifiedFlag::new(),
        };
        session.set_mode(InputMode::Image);
        session
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut EditorState {
        self.modified.set();
        &mut self.state
    }

    pub fn document(&self) -> &Document {
        &self.state.document
    }

    pub fn transform(&self) -> &Transform {
        &self.state.transform
    }

    pub fn history(&self) -> &ActionHistory<CellAction> {
        &self.state.history
    }

    pub fn selection(&self) -> Option<&MultiCell> {
        self.state.selection.as_ref()
    }

    pub fn mode(&self) -> Option<InputMode> {
        self.input.active()
    }

    pub fn cursor(&self) -> Cursor {
        self.input.cursor()
    }

    pub fn is_modified(&self) -> bool {
        self.modified.is_modified()
    }

    /// Switch input mode, ending any gesture in progress
    pub fn set_mode(&mut self, mode: InputMode) {
        self.input.set(mode, &mut self.state);
        self.modified.set();
    }

    /// Register a callback run after every mode switch
    pub fn set_mode_hook(&mut self, hook: impl FnMut(InputMode) + 'static) {
        self.input.set_hook(hook);
    }

    pub fn pointer_down(&mut self, pos: Point, modifiers: Modifiers) {
        self.input.pointer_down(&mut self.state, pos, modifiers);
        self.modified.set();
    }

    pub fn pointer_move(&mut self, pos: Point, modifiers: Modifiers) {
        // Hovering changes nothing on screen
        if self.input.gesture_active() {
            self.input.pointer_move(&mut self.state, pos, modifiers);
            self.modified.set();
        }
    }

    pub fn pointer_up(&mut self, pos: Point, modifiers: Modifiers) {
        self.input.pointer_up(&mut self.state, pos, modifiers);
        self.modified.set();
    }

    pub fn key_down(&mut self, event: &KeyEvent) {
        self.modified.set();
        if event.modifiers.ctrl {
            match event.key.char() {
                Some('z') if event.modifiers.shift => {
                    self.redo();
                    return;
                }
                Some('z') => {
                    self.undo();
                    return;
                }
                Some('y') => {
                    self.redo();
                    return;
                }
                _ => {}
            }
        }
        self.input.key_down(&mut self.state, event);
    }

    pub fn key_up(&mut self, event: &KeyEvent) {
        self.input.key_up(&mut self.state, event);
        self.modified.set();
    }

    /// Undo the last edit. An in-flight gesture is committed first.
    pub fn undo(&mut self) -> bool {
        self.input.end_gesture(&mut self.state);
        let undone = self.state.history.undo(&mut self.state.document);
        if undone {
            self.state.prune_selection();
            self.modified.set();
        }
        undone
    }

    /// Redo the next undone edit
    pub fn redo(&mut self) -> bool {
        self.input.end_gesture(&mut self.state);
        let redone = self.state.history.redo(&mut self.state.document);
        if redone {
            self.state.prune_selection();
            self.modified.set();
        }
        redone
    }

    /// Delete every cell as one undoable edit
    pub fn clear_all(&mut self) {
        self.input.end_gesture(&mut self.state);
        if self.state.document.is_empty() {
            return;
        }
        let before = self.state.document.cells.clone();
        self.state.perform(DeleteCellsAction::new(before, Vec::new()));
        self.state.selection = None;
        self.modified.set();
    }

    pub fn zoom(&mut self, d: f64) {
        self.state.transform.zoom(d);
        self.modified.set();
    }

    /// Cell rectangles in image pixels, in creation order
    pub fn export(&self) -> Vec<ExportRect> {
        export_cells(&self.state.document.cells, self.state.document.image_size)
    }

    pub fn snapshot(&self) -> PersistedState {
        PersistedState {
            mode: self.mode().unwrap_or(InputMode::Image),
            transform: self.state.transform,
            cells: self.state.document.cells.iter().map(CellRecord::from).collect(),
        }
    }

    /// Replace the session contents with a stored state. History is cleared.
    pub fn restore(&mut self, stored: PersistedState) {
        self.input.clear(&mut self.state);
        self.state.document.cells = stored.cells.iter().map(CellRecord::to_cell).collect();
        self.state.transform = stored.transform;
        self.state.history.clear();
        self.state.selection = None;
        debug!("restored {} cell(s)", self.state.document.len());
        self.set_mode(stored.mode);
    }

    pub fn load_from(&mut self, store: &mut dyn Persistence) {
        let stored = store.load();
        self.restore(stored);
    }

    pub fn save_to(&self, store: &mut dyn Persistence) -> Result<(), PersistError> {
        store.save(&self.snapshot())
    }

    /// Draw the scene if anything changed since the last frame.
    ///
    /// Returns whether a frame was drawn.
    pub fn render(&mut self, renderer: &mut dyn Renderer) -> bool {
        if !self.modified.take() {
            return false;
        }
        render_scene(&self.state, &self.input, renderer);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::FrameLog;
    use crate::tool::Key;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn session() -> EditorSession {
        EditorSession::new(Size::new(128.0, 128.0), EditorConfig::default())
    }

    fn draw_cell(session: &mut EditorSession, from: (f64, f64), to: (f64, f64)) {
        session.set_mode(InputMode::CreateCell);
        session.pointer_down(from.into(), Modifiers::NONE);
        session.pointer_move(to.into(), Modifiers::NONE);
        session.pointer_up(to.into(), Modifiers::NONE);
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(Key::Char(c), Modifiers::CTRL)
    }

    #[test]
    fn test_starts_in_image_mode() {
        let session = session();
        assert_eq!(session.mode(), Some(InputMode::Image));
        assert!(session.is_modified());
        assert_eq!(session.history().capacity(), 100);
    }

    #[test]
    fn test_create_switches_to_modify() {
        let mut session = session();
        draw_cell(&mut session, (10.0, 10.0), (60.0, 60.0));
        assert_eq!(session.mode(), Some(InputMode::ModifyCell));
        assert_eq!(session.document().len(), 1);
        assert!(session.selection().is_some());
    }

    #[test]
    fn test_ctrl_z_and_ctrl_y() {
        let mut session = session();
        draw_cell(&mut session, (10.0, 10.0), (60.0, 60.0));

        session.key_down(&ctrl('z'));
        assert!(session.document().is_empty());
        assert!(session.selection().is_none());

        session.key_down(&ctrl('y'));
        assert_eq!(session.document().len(), 1);

        session.key_down(&ctrl('z'));
        session.key_down(&KeyEvent::new(
            Key::Char('Z'),
            Modifiers {
                shift: true,
                ctrl: true,
                alt: false,
            },
        ));
        assert_eq!(session.document().len(), 1);
    }

    #[test]
    fn test_hover_does_not_dirty() {
        let mut session = session();
        let mut frame = FrameLog::new();
        assert!(session.render(&mut frame));

        session.pointer_move(Point::new(5.0, 5.0), Modifiers::NONE);
        assert!(!session.render(&mut frame));

        session.pointer_down(Point::new(5.0, 5.0), Modifiers::NONE);
        session.pointer_move(Point::new(9.0, 5.0), Modifiers::NONE);
        assert!(session.render(&mut frame));
        assert_eq!(session.transform().offset_x, 4.0);
    }

    #[test]
    fn test_clear_all_is_undoable() {
        let mut session = session();
        draw_cell(&mut session, (10.0, 10.0), (60.0, 60.0));
        draw_cell(&mut session, (70.0, 10.0), (120.0, 60.0));
        assert_eq!(session.document().len(), 2);

        session.clear_all();
        assert!(session.document().is_empty());
        assert_eq!(session.history().undo_name(), Some("delete-cells (2)".to_string()));

        assert!(session.undo());
        assert_eq!(session.document().len(), 2);
    }

    #[test]
    fn test_mode_hook_sees_switches() {
        let mut session = session();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        session.set_mode_hook(move |mode| sink.borrow_mut().push(mode));

        draw_cell(&mut session, (10.0, 10.0), (60.0, 60.0));
        assert_eq!(*seen.borrow(), vec![InputMode::CreateCell, InputMode::ModifyCell]);
    }

    #[test]
    fn test_restore_clears_history() {
        let mut original = session();
        draw_cell(&mut original, (10.0, 10.0), (60.0, 60.0));
        let snapshot = original.snapshot();
        assert_eq!(snapshot.mode, InputMode::ModifyCell);

        let mut other = session();
        other.restore(snapshot);
        assert_eq!(other.document().len(), 1);
        assert_eq!(other.mode(), Some(InputMode::ModifyCell));
        assert!(!other.history().can_undo());
    }
}
