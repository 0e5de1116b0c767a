//! Pan/zoom mode

use super::handle_zoom_key;
use crate::session::EditorState;
use crate::tool::{Cursor, DragState, InputHandler, KeyEvent, Modifiers, Transition};
use kurbo::Point;

/// Drag pans the view, zoom keys change the scale
#[derive(Debug, Default)]
pub struct ImageHandler {
    drag: DragState,
}

impl InputHandler for ImageHandler {
    fn leave(&mut self, _state: &mut EditorState) {
        self.drag.end();
    }

    fn pointer_down(&mut self, _state: &mut EditorState, pos: Point, _modifiers: Modifiers) -> Transition {
        self.drag.start(pos);
        Transition::Stay
    }

    fn pointer_move(&mut self, state: &mut EditorState, pos: Point, _modifiers: Modifiers) -> Transition {
        if let Some(delta) = self.drag.update(pos) {
            state.transform.move_by(delta);
        }
        Transition::Stay
    }

    fn pointer_up(&mut self, state: &mut EditorState, pos: Point, modifiers: Modifiers) -> Transition {
        self.pointer_move(state, pos, modifiers);
        self.drag.end();
        Transition::Stay
    }

    fn key_down(&mut self, state: &mut EditorState, event: &KeyEvent) -> Transition {
        handle_zoom_key(state, event);
        Transition::Stay
    }

    fn gesture_position(&self) -> Option<Point> {
        self.drag.last_pos
    }

    fn cursor(&self) -> Cursor {
        if self.drag.is_dragging() {
            Cursor::Grabbing
        } else {
            Cursor::Grab
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::tool::Key;
    use kurbo::{Size, Vec2};

    #[test]
    fn test_drag_pans_view() {
        let mut state = EditorState::new(Size::new(64.0, 64.0), EditorConfig::default());
        state.transform.zoom(1.0);
        let mut handler = ImageHandler::default();

        // Moving without a press does nothing
        handler.pointer_move(&mut state, Point::new(50.0, 50.0), Modifiers::NONE);
        assert_eq!(state.transform.offset(), Vec2::ZERO);

        handler.pointer_down(&mut state, Point::new(10.0, 10.0), Modifiers::NONE);
        assert_eq!(handler.cursor(), Cursor::Grabbing);
        handler.pointer_move(&mut state, Point::new(30.0, 20.0), Modifiers::NONE);
        handler.pointer_up(&mut state, Point::new(30.0, 30.0), Modifiers::NONE);

        assert_eq!(state.transform.offset(), Vec2::new(10.0, 10.0));
        assert!(handler.gesture_position().is_none());
    }

    #[test]
    fn test_zoom_keys() {
        let mut state = EditorState::new(Size::new(64.0, 64.0), EditorConfig::default());
        let mut handler = ImageHandler::default();
        handler.key_down(&mut state, &KeyEvent::plain(Key::Char('+')));
        assert!((state.transform.scale - 1.2).abs() < 1e-12);
        handler.key_down(&mut state, &KeyEvent::plain(Key::Char('-')));
        assert!((state.transform.scale - 1.0).abs() < 1e-12);
    }
}
