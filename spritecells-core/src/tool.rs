//! Input modes for the editor canvas
//!
//! Each mode owns a handler that receives pointer and keyboard events while
//! the mode is active. Only one mode is live at a time; switching is
//! synchronous and runs the outgoing handler's `leave` before the incoming
//! handler's `enter`.

use crate::renderer::Renderer;
use crate::session::EditorState;
use kurbo::{Point, Vec2};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Editor input modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputMode {
    /// Pan and zoom the image
    Image,
    /// Draw new cells
    CreateCell,
    /// Select, move, resize, align and delete cells
    ModifyCell,
}

impl InputMode {
    /// Stable name, also used for persistence and the mode-change hook
    pub fn name(self) -> &'static str {
        match self {
            InputMode::Image => "image",
            InputMode::CreateCell => "create-cell",
            InputMode::ModifyCell => "modify-cell",
        }
    }

    /// Get display name for the mode
    pub fn display_name(self) -> &'static str {
        match self {
            InputMode::Image => "Pan / Zoom",
            InputMode::CreateCell => "Create Cell",
            InputMode::ModifyCell => "Modify Cell",
        }
    }

    /// Get all available modes
    pub fn all() -> &'static [InputMode] {
        &[InputMode::Image, InputMode::CreateCell, InputMode::ModifyCell]
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InputMode::all()
            .iter()
            .copied()
            .find(|m| m.name() == s)
            .ok_or_else(|| format!("unknown input mode '{}'", s))
    }
}

/// Modifier keys held during an event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        alt: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        shift: false,
        ctrl: true,
        alt: false,
    };
}

/// Keys the editor reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Shift,
    Control,
    Delete,
    Backspace,
    Escape,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Other,
}

impl Key {
    /// Parse a key name as delivered by a browser-style event source
    pub fn from_name(name: &str) -> Key {
        match name {
            "Shift" => Key::Shift,
            "Control" | "Ctrl" => Key::Control,
            "Delete" | "Del" => Key::Delete,
            "Backspace" => Key::Backspace,
            "Escape" | "Esc" => Key::Escape,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            "ArrowUp" | "Up" => Key::ArrowUp,
            "ArrowDown" | "Down" => Key::ArrowDown,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => Key::Other,
                }
            }
        }
    }

    /// Lowercased character, if this is a character key
    pub fn char(self) -> Option<char> {
        match self {
            Key::Char(c) => Some(c.to_ascii_lowercase()),
            _ => None,
        }
    }
}

/// A key press or release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }
}

/// What a handler wants to happen after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    Switch(InputMode),
}

/// Pointer cursor to show over the canvas
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Cursor {
    #[default]
    Default,
    Crosshair,
    Grab,
    Grabbing,
    Move,
}

/// Gesture-local pointer tracking: start and last position of a drag
#[derive(Debug, Clone, Copy, Default)]
pub struct DragState {
    pub start_pos: Option<Point>,
    pub last_pos: Option<Point>,
}

impl DragState {
    /// Start tracking a new drag from the given position
    pub fn start(&mut self, pos: Point) {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
    }

    /// Movement since the last update, or `None` when not dragging
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        self.start_pos?;
        let last = self.last_pos.replace(pos)?;
        Some(pos - last)
    }

    pub fn end(&mut self) {
        self.start_pos = None;
        self.last_pos = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.start_pos.is_some()
    }
}

/// Event callbacks for one input mode
///
/// Every callback is optional: the default implementations do nothing, so a
/// handler only implements the events it cares about.
pub trait InputHandler {
    fn enter(&mut self, _state: &mut EditorState) {}

    fn leave(&mut self, _state: &mut EditorState) {}

    fn pointer_down(&mut self, _state: &mut EditorState, _pos: Point, _modifiers: Modifiers) -> Transition {
        Transition::Stay
    }

    fn pointer_move(&mut self, _state: &mut EditorState, _pos: Point, _modifiers: Modifiers) -> Transition {
        Transition::Stay
    }

    fn pointer_up(&mut self, _state: &mut EditorState, _pos: Point, _modifiers: Modifiers) -> Transition {
        Transition::Stay
    }

    fn key_down(&mut self, _state: &mut EditorState, _event: &KeyEvent) -> Transition {
        Transition::Stay
    }

    fn key_up(&mut self, _state: &mut EditorState, _event: &KeyEvent) -> Transition {
        Transition::Stay
    }

    /// Draw mode-specific overlays (transient cell, marquee)
    fn draw(&self, _state: &EditorState, _renderer: &mut dyn Renderer) {}

    /// Last pointer position of a gesture in flight, if any
    fn gesture_position(&self) -> Option<Point> {
        None
    }

    fn cursor(&self) -> Cursor {
        Cursor::Default
    }
}

/// Mode switch plus the handler registered for each mode
#[derive(Default)]
pub struct InputState {
    handlers: HashMap<InputMode, Box<dyn InputHandler>>,
    active: Option<InputMode>,
    hook: Option<Box<dyn FnMut(InputMode)>>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the handler for a mode
    pub fn add(&mut self, mode: InputMode, handler: Box<dyn InputHandler>) {
        self.handlers.insert(mode, handler);
    }

    /// Callback invoked with the new mode after every switch
    pub fn set_hook(&mut self, hook: impl FnMut(InputMode) + 'static) {
        self.hook = Some(Box::new(hook));
    }

    /// Currently active mode
    pub fn active(&self) -> Option<InputMode> {
        self.active
    }

    /// Switch to `mode`.
    ///
    /// Ends the previous handler's gesture, calls its `leave`, then calls
    /// `enter` on the new handler and notifies the hook. An unregistered mode
    /// is still recorded as active but receives no events.
    pub fn set(&mut self, mode: InputMode, state: &mut EditorState) {
        self.clear(state);
        self.active = Some(mode);

        match self.handlers.get_mut(&mode) {
            Some(handler) => handler.enter(state),
            None => warn!("handler not registered: {}", mode),
        }
        debug!("input mode -> {}", mode);

        if let Some(hook) = self.hook.as_mut() {
            hook(mode);
        }
    }

    /// Detach the active handler.
    ///
    /// A gesture still in flight is finished with a synthetic pointer-up at
    /// its last position so that no half-done edit is left behind.
    pub fn clear(&mut self, state: &mut EditorState) {
        let Some(mode) = self.active.take() else {
            return;
        };
        if let Some(handler) = self.handlers.get_mut(&mode) {
            if let Some(pos) = handler.gesture_position() {
                debug!("ending {} gesture on mode exit", mode);
                // Any switch requested by the release is superseded
                let _ = handler.pointer_up(state, pos, Modifiers::NONE);
            }
            handler.leave(state);
        }
    }

    /// Finish the active gesture without leaving the mode.
    ///
    /// The mode stays put even if the release would normally switch it.
    pub fn end_gesture(&mut self, state: &mut EditorState) {
        let Some(mode) = self.active else {
            return;
        };
        if let Some(handler) = self.handlers.get_mut(&mode) {
            if let Some(pos) = handler.gesture_position() {
                debug!("ending {} gesture in place", mode);
                let _ = handler.pointer_up(state, pos, Modifiers::NONE);
            }
        }
    }

    /// Whether the active handler is in the middle of a gesture
    pub fn gesture_active(&self) -> bool {
        self.active_handler()
            .is_some_and(|h| h.gesture_position().is_some())
    }

    pub fn pointer_down(&mut self, state: &mut EditorState, pos: Point, modifiers: Modifiers) {
        self.dispatch(state, |handler, state| handler.pointer_down(state, pos, modifiers));
    }

    pub fn pointer_move(&mut self, state: &mut EditorState, pos: Point, modifiers: Modifiers) {
        self.dispatch(state, |handler, state| handler.pointer_move(state, pos, modifiers));
    }

    pub fn pointer_up(&mut self, state: &mut EditorState, pos: Point, modifiers: Modifiers) {
        self.dispatch(state, |handler, state| handler.pointer_up(state, pos, modifiers));
    }

    pub fn key_down(&mut self, state: &mut EditorState, event: &KeyEvent) {
        self.dispatch(state, |handler, state| handler.key_down(state, event));
    }

    pub fn key_up(&mut self, state: &mut EditorState, event: &KeyEvent) {
        self.dispatch(state, |handler, state| handler.key_up(state, event));
    }

    pub fn draw(&self, state: &EditorState, renderer: &mut dyn Renderer) {
        if let Some(handler) = self.active_handler() {
            handler.draw(state, renderer);
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.active_handler().map_or(Cursor::Default, |h| h.cursor())
    }

    fn active_handler(&self) -> Option<&dyn InputHandler> {
        let mode = self.active?;
        self.handlers.get(&mode).map(|h| h.as_ref())
    }

    fn dispatch(
        &mut self,
        state: &mut EditorState,
        event: impl FnOnce(&mut dyn InputHandler, &mut EditorState) -> Transition,
    ) {
        let Some(mode) = self.active else {
            return;
        };
        let Some(handler) = self.handlers.get_mut(&mode) else {
            return;
        };
        let transition = event(handler.as_mut(), state);
        if let Transition::Switch(next) = transition {
            self.set(next, state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use kurbo::Size;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every callback it receives
    struct Recorder {
        name: &'static str,
        log: Rc<RefCell<Vec<String>>>,
        drag: DragState,
    }

    impl Recorder {
        fn boxed(name: &'static str, log: &Rc<RefCell<Vec<String>>>) -> Box<dyn InputHandler> {
            Box::new(Self {
                name,
                log: Rc::clone(log),
                drag: DragState::default(),
            })
        }

        fn push(&self, what: &str) {
            self.log.borrow_mut().push(format!("{}:{}", self.name, what));
        }
    }

    impl InputHandler for Recorder {
        fn enter(&mut self, _state: &mut EditorState) {
            self.push("enter");
        }

        fn leave(&mut self, _state: &mut EditorState) {
            self.push("leave");
        }

        fn pointer_down(&mut self, _state: &mut EditorState, pos: Point, _modifiers: Modifiers) -> Transition {
            self.drag.start(pos);
            self.push("down");
            Transition::Stay
        }

        fn pointer_up(&mut self, _state: &mut EditorState, pos: Point, _modifiers: Modifiers) -> Transition {
            self.drag.end();
            self.push(&format!("up@{},{}", pos.x, pos.y));
            Transition::Switch(InputMode::Image)
        }

        fn gesture_position(&self) -> Option<Point> {
            self.drag.last_pos
        }
    }

    fn state() -> EditorState {
        EditorState::new(Size::new(100.0, 100.0), EditorConfig::default())
    }

    #[test]
    fn test_mode_names_round_trip() {
        for mode in InputMode::all() {
            assert_eq!(mode.name().parse::<InputMode>(), Ok(*mode));
        }
        assert!("paint".parse::<InputMode>().is_err());
        assert_eq!(serde_json::to_string(&InputMode::CreateCell).unwrap(), "\"create-cell\"");
        assert_eq!(InputMode::Image.display_name(), "Pan / Zoom");
    }

    #[test]
    fn test_set_calls_leave_then_enter_then_hook() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut input = InputState::new();
        input.add(InputMode::Image, Recorder::boxed("image", &log));
        input.add(InputMode::CreateCell, Recorder::boxed("create", &log));

        let hook_log = Rc::clone(&log);
        input.set_hook(move |mode| hook_log.borrow_mut().push(format!("hook:{}", mode)));

        let mut state = state();
        input.set(InputMode::Image, &mut state);
        input.set(InputMode::CreateCell, &mut state);

        assert_eq!(
            *log.borrow(),
            vec!["image:enter", "hook:image", "image:leave", "create:enter", "hook:create-cell"]
        );
        assert_eq!(input.active(), Some(InputMode::CreateCell));
    }

    #[test]
    fn test_only_active_handler_receives_events() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut input = InputState::new();
        input.add(InputMode::Image, Recorder::boxed("image", &log));
        input.add(InputMode::CreateCell, Recorder::boxed("create", &log));

        let mut state = state();
        input.pointer_down(&mut state, Point::ZERO, Modifiers::NONE);
        assert!(log.borrow().is_empty());

        input.set(InputMode::CreateCell, &mut state);
        log.borrow_mut().clear();
        input.pointer_down(&mut state, Point::ZERO, Modifiers::NONE);
        assert_eq!(*log.borrow(), vec!["create:down"]);
    }

    #[test]
    fn test_switch_mid_gesture_sends_synthetic_up() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut input = InputState::new();
        input.add(InputMode::Image, Recorder::boxed("image", &log));
        input.add(InputMode::CreateCell, Recorder::boxed("create", &log));

        let mut state = state();
        input.set(InputMode::CreateCell, &mut state);
        input.pointer_down(&mut state, Point::new(3.0, 4.0), Modifiers::NONE);
        assert!(input.gesture_active());
        log.borrow_mut().clear();

        input.set(InputMode::ModifyCell, &mut state);
        assert_eq!(*log.borrow(), vec!["create:up@3,4", "create:leave"]);
        // The release asked for Image, but the explicit switch wins
        assert_eq!(input.active(), Some(InputMode::ModifyCell));
        assert!(!input.gesture_active());
    }

    #[test]
    fn test_transition_switches_mode() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut input = InputState::new();
        input.add(InputMode::Image, Recorder::boxed("image", &log));
        input.add(InputMode::CreateCell, Recorder::boxed("create", &log));

        let mut state = state();
        input.set(InputMode::CreateCell, &mut state);
        input.pointer_up(&mut state, Point::ZERO, Modifiers::NONE);
        assert_eq!(input.active(), Some(InputMode::Image));
    }

    #[test]
    fn test_end_gesture_keeps_mode() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut input = InputState::new();
        input.add(InputMode::Image, Recorder::boxed("image", &log));
        input.add(InputMode::CreateCell, Recorder::boxed("create", &log));

        let mut state = state();
        input.set(InputMode::CreateCell, &mut state);
        input.pointer_down(&mut state, Point::new(3.0, 4.0), Modifiers::NONE);
        log.borrow_mut().clear();

        input.end_gesture(&mut state);
        assert_eq!(*log.borrow(), vec!["create:up@3,4"]);
        assert_eq!(input.active(), Some(InputMode::CreateCell));
        assert!(!input.gesture_active());

        // Nothing in flight, nothing sent
        input.end_gesture(&mut state);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_drag_state_deltas() {
        let mut drag = DragState::default();
        assert!(drag.update(Point::new(1.0, 1.0)).is_none());

        drag.start(Point::new(10.0, 20.0));
        assert_eq!(drag.update(Point::new(15.0, 25.0)), Some(Vec2::new(5.0, 5.0)));
        assert_eq!(drag.update(Point::new(15.0, 20.0)), Some(Vec2::new(0.0, -5.0)));

        drag.end();
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_name("Del"), Key::Delete);
        assert_eq!(Key::from_name("y"), Key::Char('y'));
        assert_eq!(Key::from_name("Y").char(), Some('y'));
        assert_eq!(Key::from_name("F5"), Key::Other);
    }
}
