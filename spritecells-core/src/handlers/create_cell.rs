//! Cell creation mode
//!
//! Press starts a transient cell, drag sets its bottom-right corner, and
//! release commits it if it is large enough on screen.

use super::handle_zoom_key;
use crate::actions::CreateCellAction;
use crate::cell::Cell;
use crate::renderer::{CellStyle, Renderer};
use crate::selection::MultiCell;
use crate::session::EditorState;
use crate::tool::{Cursor, InputHandler, InputMode, KeyEvent, Modifiers, Transition};
use kurbo::Point;
use log::debug;

/// Draws new cells
#[derive(Debug, Default)]
pub struct CreateCellHandler {
    /// Cell being drawn, not yet in the document
    cell: Option<Cell>,

    last_pos: Option<Point>,
}

impl CreateCellHandler {
    /// The in-progress cell, if a drag is active
    pub fn pending(&self) -> Option<&Cell> {
        self.cell.as_ref()
    }
}

impl InputHandler for CreateCellHandler {
    fn leave(&mut self, _state: &mut EditorState) {
        self.cell = None;
        self.last_pos = None;
    }

    fn pointer_down(&mut self, state: &mut EditorState, pos: Point, _modifiers: Modifiers) -> Transition {
        let origin = state.transform.to_model(pos);
        self.cell = Some(Cell::at_point("creating", origin));
        self.last_pos = Some(pos);
        Transition::Stay
    }

    fn pointer_move(&mut self, state: &mut EditorState, pos: Point, _modifiers: Modifiers) -> Transition {
        if let Some(cell) = self.cell.as_mut() {
            cell.set_right(pos.x, &state.transform);
            cell.set_bottom(pos.y, &state.transform);
            self.last_pos = Some(pos);
        }
        Transition::Stay
    }

    fn pointer_up(&mut self, state: &mut EditorState, pos: Point, modifiers: Modifiers) -> Transition {
        self.pointer_move(state, pos, modifiers);
        self.last_pos = None;
        let Some(mut cell) = self.cell.take() else {
            return Transition::Stay;
        };

        cell.sort_points();
        let min = state.config.min_cell_size;
        if cell.width(&state.transform) <= min || cell.height(&state.transform) <= min {
            debug!("discarding cell below {}px", min);
            return Transition::Stay;
        }

        cell.label = state.document.next_label();
        state.selection = Some(MultiCell::new(cell.id));
        state.document.cells.push(cell.clone());
        state.record(CreateCellAction::new(cell));

        Transition::Switch(InputMode::ModifyCell)
    }

    fn key_down(&mut self, state: &mut EditorState, event: &KeyEvent) -> Transition {
        handle_zoom_key(state, event);
        Transition::Stay
    }

    fn draw(&self, state: &EditorState, renderer: &mut dyn Renderer) {
        if let Some(cell) = &self.cell {
            renderer.draw_cell(cell.screen_rect(&state.transform), &cell.label, CellStyle::Creating);
        }
    }

    fn gesture_position(&self) -> Option<Point> {
        self.last_pos
    }

    fn cursor(&self) -> Cursor {
        Cursor::Crosshair
    }
}
