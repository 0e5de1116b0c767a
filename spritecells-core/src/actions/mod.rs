//! Action implementations for cell editing
//!
//! This module contains the concrete action types that can be recorded in
//! the editor's [`ActionHistory`](crate::action::ActionHistory), and the
//! [`CellAction`] union the history stores.

pub mod create_cell;
pub mod delete_cells;
pub mod modify_cells;

pub use create_cell::CreateCellAction;
pub use delete_cells::DeleteCellsAction;
pub use modify_cells::ModifyCellsAction;

use crate::action::Action;
use crate::document::Document;

/// Any action recorded by the editor
#[derive(Clone, Debug)]
pub enum CellAction {
    CreateCell(CreateCellAction),
    DeleteCells(DeleteCellsAction),
    ModifyCells(ModifyCellsAction),
}

impl Action for CellAction {
    type Target = Document;

    fn redo(&self, document: &mut Document) {
        match self {
            CellAction::CreateCell(a) => a.redo(document),
            CellAction::DeleteCells(a) => a.redo(document),
            CellAction::ModifyCells(a) => a.redo(document),
        }
    }

    fn undo(&self, document: &mut Document) {
        match self {
            CellAction::CreateCell(a) => a.undo(document),
            CellAction::DeleteCells(a) => a.undo(document),
            CellAction::ModifyCells(a) => a.undo(document),
        }
    }

    fn name(&self) -> String {
        match self {
            CellAction::CreateCell(a) => a.name(),
            CellAction::DeleteCells(a) => a.name(),
            CellAction::ModifyCells(a) => a.name(),
        }
    }
}

impl From<CreateCellAction> for CellAction {
    fn from(action: CreateCellAction) -> Self {
        CellAction::CreateCell(action)
    }
}

impl From<DeleteCellsAction> for CellAction {
    fn from(action: DeleteCellsAction) -> Self {
        CellAction::DeleteCells(action)
    }
}

impl From<ModifyCellsAction> for CellAction {
    fn from(action: ModifyCellsAction) -> Self {
        CellAction::ModifyCells(action)
    }
}
