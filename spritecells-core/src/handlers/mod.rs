//! Input handlers for each editor mode

pub mod create_cell;
pub mod image;
pub mod modify_cell;

pub use create_cell::CreateCellHandler;
pub use image::ImageHandler;
pub use modify_cell::ModifyCellHandler;

use crate::session::EditorState;
use crate::tool::{InputMode, InputState, KeyEvent};

/// Zoom in on `+`/`=`, out on `-`/`_`. Returns whether the key was used.
pub(crate) fn handle_zoom_key(state: &mut EditorState, event: &KeyEvent) -> bool {
    let step = state.config.zoom_step;
    match event.key.char() {
        Some('+') | Some('=') => state.transform.zoom(step),
        Some('-') | Some('_') => state.transform.zoom(-step),
        _ => return false,
    }
    true
}

/// Input state with the standard handler registered for every mode
pub fn default_input_state() -> InputState {
    let mut input = InputState::new();
    input.add(InputMode::Image, Box::new(ImageHandler::default()));
    input.add(InputMode::CreateCell, Box::new(CreateCellHandler::default()));
    input.add(InputMode::ModifyCell, Box::new(ModifyCellHandler::default()));
    input
}
