//! Cell editing mode
//!
//! Clicking a cell selects it and dragging moves the selection. With Shift
//! held the drag resizes the bottom-right edges instead. Dragging on empty
//! space draws a marquee that selects every fully enclosed cell.
//!
//! A whole gesture is recorded as a single [`ModifyCellsAction`] on release,
//! after the touched cells have been put back in canonical form.

use super::handle_zoom_key;
use crate::actions::{CreateCellAction, DeleteCellsAction, ModifyCellsAction};
use crate::cell::Direction;
use crate::document::Document;
use crate::renderer::Renderer;
use crate::selection::{CellDeltas, Marquee, MultiCell};
use crate::session::EditorState;
use crate::tool::{Cursor, DragState, InputHandler, Key, KeyEvent, Modifiers, Transition};
use kurbo::Point;
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Move,
    Resize,
    Region(Marquee),
}

/// Selects, moves, resizes, aligns, duplicates and deletes cells
#[derive(Debug, Default)]
pub struct ModifyCellHandler {
    /// Shift is held
    resize: bool,

    drag: DragState,

    gesture: Option<Gesture>,

    /// Model-space deltas applied so far in the current gesture
    deltas: CellDeltas,
}

impl ModifyCellHandler {
    /// Whether drags currently resize instead of move
    pub fn is_resizing(&self) -> bool {
        self.resize
    }

    /// Apply a selection edit and record it as one action
    fn edit(state: &mut EditorState, op: impl FnOnce(&MultiCell, &mut Document) -> CellDeltas) {
        let Some(selection) = state.selection.as_ref() else {
            return;
        };
        let action = ModifyCellsAction::coalesced(op(selection, &mut state.document));
        if !action.is_empty() {
            state.record(action);
        }
    }

    fn delete_selection(state: &mut EditorState) {
        let Some(selection) = state.selection.take() else {
            return;
        };
        let before = state.document.cells.clone();
        let after = state.document.without(selection.members());
        if after.len() != before.len() {
            state.perform(DeleteCellsAction::new(before, after));
        }
    }

    fn duplicate_reference(state: &mut EditorState, direction: Direction) {
        let Some(reference) = state.selection.as_ref().map(|s| s.reference()) else {
            return;
        };
        let Some(cell) = state.document.get_cell(&reference) else {
            return;
        };
        let mut copy = cell.duplicated(direction);
        copy.label = state.document.next_label();
        state.selection = Some(MultiCell::new(copy.id));
        state.perform(CreateCellAction::new(copy));
    }
}

impl InputHandler for ModifyCellHandler {
    fn leave(&mut self, state: &mut EditorState) {
        self.resize = false;
        self.gesture = None;
        self.deltas.clear();
        self.drag.end();
        state.selection = None;
    }

    fn pointer_down(&mut self, state: &mut EditorState, pos: Point, modifiers: Modifiers) -> Transition {
        let hit = state
            .document
            .cell_at(pos.x, pos.y, &state.transform)
            .map(|c| c.id);

        let gesture = match hit {
            Some(id) => {
                match &mut state.selection {
                    Some(selection) if selection.contains(&id) => selection.set_reference(id),
                    selection => *selection = Some(MultiCell::new(id)),
                }
                if self.resize || modifiers.shift {
                    Gesture::Resize
                } else {
                    Gesture::Move
                }
            }
            None => {
                state.selection = None;
                Gesture::Region(Marquee::start(pos))
            }
        };

        self.gesture = Some(gesture);
        self.deltas.clear();
        self.drag.start(pos);
        Transition::Stay
    }

    fn pointer_move(&mut self, state: &mut EditorState, pos: Point, _modifiers: Modifiers) -> Transition {
        let Some(delta) = self.drag.update(pos) else {
            return Transition::Stay;
        };

        match self.gesture.as_mut() {
            Some(Gesture::Region(marquee)) => marquee.extend(delta),
            Some(Gesture::Move) => {
                if let Some(selection) = &state.selection {
                    let applied = selection.move_by(&mut state.document, delta, &state.transform);
                    self.deltas.extend(applied);
                }
            }
            Some(Gesture::Resize) => {
                if let Some(selection) = &state.selection {
                    let applied =
                        selection.transform(&mut state.document, 0.0, 0.0, delta.x, delta.y, &state.transform);
                    self.deltas.extend(applied);
                }
            }
            None => {}
        }
        Transition::Stay
    }

    fn pointer_up(&mut self, state: &mut EditorState, pos: Point, modifiers: Modifiers) -> Transition {
        self.pointer_move(state, pos, modifiers);
        self.drag.end();

        match self.gesture.take() {
            Some(Gesture::Region(marquee)) => {
                let ids = marquee.enclosed(&state.document.cells, &state.transform);
                debug!("marquee selected {} cell(s)", ids.len());
                state.selection = MultiCell::create(&ids);
            }
            Some(Gesture::Move) | Some(Gesture::Resize) => {
                if let Some(selection) = &state.selection {
                    let sorted = selection.sort_points(&mut state.document);
                    self.deltas.extend(sorted);
                }
                let action = ModifyCellsAction::coalesced(std::mem::take(&mut self.deltas));
                if !action.is_empty() {
                    state.record(action);
                }
            }
            None => {}
        }
        Transition::Stay
    }

    fn key_down(&mut self, state: &mut EditorState, event: &KeyEvent) -> Transition {
        // Only a bare Shift press arms resizing; any other key disarms it
        self.resize = event.key == Key::Shift;
        if handle_zoom_key(state, event) {
            return Transition::Stay;
        }
        // Editing keys would fight with the gesture's pending deltas
        if self.gesture.is_some() || event.modifiers.ctrl {
            return Transition::Stay;
        }

        match event.key {
            Key::Delete | Key::Backspace => Self::delete_selection(state),
            Key::Escape => state.selection = None,
            Key::ArrowLeft => Self::duplicate_reference(state, Direction::Left),
            Key::ArrowRight => Self::duplicate_reference(state, Direction::Right),
            Key::ArrowUp => Self::duplicate_reference(state, Direction::Up),
            Key::ArrowDown => Self::duplicate_reference(state, Direction::Down),
            Key::Char(_) => match event.key.char() {
                Some('y') => Self::edit(state, MultiCell::horizontal_align),
                Some('x') => Self::edit(state, MultiCell::vertical_align),
                Some('w') => Self::edit(state, MultiCell::sync_width),
                Some('h') => Self::edit(state, MultiCell::sync_height),
                _ => {}
            },
            _ => {}
        }
        Transition::Stay
    }

    fn key_up(&mut self, _state: &mut EditorState, event: &KeyEvent) -> Transition {
        if event.key == Key::Shift {
            self.resize = false;
        }
        Transition::Stay
    }

    fn draw(&self, _state: &EditorState, renderer: &mut dyn Renderer) {
        if let Some(Gesture::Region(marquee)) = &self.gesture {
            renderer.draw_marquee(marquee.rect());
        }
    }

    fn gesture_position(&self) -> Option<Point> {
        self.drag.last_pos
    }

    fn cursor(&self) -> Cursor {
        match self.gesture {
            Some(Gesture::Move) => Cursor::Grabbing,
            Some(Gesture::Resize) => Cursor::Crosshair,
            _ => Cursor::Move,
        }
    }
}
