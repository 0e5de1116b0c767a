//! Scripted input for headless replay
//!
//! A script is a JSON array of events, applied in order to a session:
//!
//! ```json
//! [
//!   { "event": "mode", "mode": "create-cell" },
//!   { "event": "pointer_down", "x": 10, "y": 10 },
//!   { "event": "pointer_up", "x": 60, "y": 60 },
//!   { "event": "key_down", "key": "y" },
//!   { "event": "undo" }
//! ]
//! ```

use anyhow::Context;
use kurbo::Point;
use serde::Deserialize;
use spritecells_core::session::EditorSession;
use spritecells_core::tool::{InputMode, Key, KeyEvent, Modifiers};
use log::trace;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScriptModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl From<ScriptModifiers> for Modifiers {
    fn from(m: ScriptModifiers) -> Self {
        Modifiers {
            shift: m.shift,
            ctrl: m.ctrl,
            alt: m.alt,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptEvent {
    Mode {
        mode: InputMode,
    },
    PointerDown {
        x: f64,
        y: f64,
        #[serde(flatten)]
        modifiers: ScriptModifiers,
    },
    PointerMove {
        x: f64,
        y: f64,
        #[serde(flatten)]
        modifiers: ScriptModifiers,
    },
    PointerUp {
        x: f64,
        y: f64,
        #[serde(flatten)]
        modifiers: ScriptModifiers,
    },
    KeyDown {
        key: String,
        #[serde(flatten)]
        modifiers: ScriptModifiers,
    },
    KeyUp {
        key: String,
        #[serde(flatten)]
        modifiers: ScriptModifiers,
    },
    Zoom {
        delta: f64,
    },
    Undo,
    Redo,
    ClearAll,
}

impl ScriptEvent {
    pub fn apply(&self, session: &mut EditorSession) {
        match self {
            ScriptEvent::Mode { mode } => session.set_mode(*mode),
            ScriptEvent::PointerDown { x, y, modifiers } => {
                session.pointer_down(Point::new(*x, *y), (*modifiers).into())
            }
            ScriptEvent::PointerMove { x, y, modifiers } => {
                session.pointer_move(Point::new(*x, *y), (*modifiers).into())
            }
            ScriptEvent::PointerUp { x, y, modifiers } => {
                session.pointer_up(Point::new(*x, *y), (*modifiers).into())
            }
            ScriptEvent::KeyDown { key, modifiers } => {
                session.key_down(&KeyEvent::new(Key::from_name(key), (*modifiers).into()))
            }
            ScriptEvent::KeyUp { key, modifiers } => {
                session.key_up(&KeyEvent::new(Key::from_name(key), (*modifiers).into()))
            }
            ScriptEvent::Zoom { delta } => session.zoom(*delta),
            ScriptEvent::Undo => {
                session.undo();
            }
            ScriptEvent::Redo => {
                session.redo();
            }
            ScriptEvent::ClearAll => session.clear_all(),
        }
    }
}

pub fn parse(json: &str) -> anyhow::Result<Vec<ScriptEvent>> {
    serde_json::from_str(json).context("invalid event script")
}

pub fn load(path: &Path) -> anyhow::Result<Vec<ScriptEvent>> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("reading script {}", path.display()))?;
    parse(&contents)
}

/// Apply every event in order
pub fn replay(session: &mut EditorSession, events: &[ScriptEvent]) {
    for event in events {
        trace!("replay {:?}", event);
        event.apply(session);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;
    use spritecells_core::config::EditorConfig;

    #[test]
    fn test_parse_events() {
        let events = parse(
            r#"[
                { "event": "mode", "mode": "modify-cell" },
                { "event": "pointer_down", "x": 1, "y": 2, "shift": true },
                { "event": "key_down", "key": "Delete" },
                { "event": "undo" }
            ]"#,
        )
        .unwrap();

        assert_eq!(events[0], ScriptEvent::Mode { mode: InputMode::ModifyCell });
        match &events[1] {
            ScriptEvent::PointerDown { x, modifiers, .. } => {
                assert_eq!(*x, 1.0);
                assert!(modifiers.shift);
                assert!(!modifiers.ctrl);
            }
            other => panic!("unexpected event {:?}", other),
        }
        assert_eq!(events[3], ScriptEvent::Undo);
    }

    #[test]
    fn test_unknown_event_is_rejected() {
        assert!(parse(r#"[{ "event": "teleport" }]"#).is_err());
    }

    #[test]
    fn test_replay_creates_and_aligns() {
        let events = parse(
            r#"[
                { "event": "mode", "mode": "create-cell" },
                { "event": "pointer_down", "x": 10, "y": 10 },
                { "event": "pointer_up", "x": 60, "y": 60 },
                { "event": "mode", "mode": "create-cell" },
                { "event": "pointer_down", "x": 70, "y": 30 },
                { "event": "pointer_up", "x": 100, "y": 90 },
                { "event": "mode", "mode": "modify-cell" },
                { "event": "pointer_down", "x": 0, "y": 0 },
                { "event": "pointer_move", "x": 120, "y": 120 },
                { "event": "pointer_up", "x": 120, "y": 120 },
                { "event": "key_down", "key": "y" },
                { "event": "key_up", "key": "y" }
            ]"#,
        )
        .unwrap();

        let mut session = EditorSession::new(Size::new(128.0, 128.0), EditorConfig::default());
        replay(&mut session, &events);

        let cells = &session.document().cells;
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[1].top, 10.0);
        assert_eq!(session.history().len(), 3);
    }
}
