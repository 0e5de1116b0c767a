//! Create cell action
//!
//! Handles appending a newly drawn cell to the end of the cell list.

use crate::action::Action;
use crate::cell::Cell;
use crate::document::Document;

/// Action that appends a cell to the document
#[derive(Clone, Debug)]
pub struct CreateCellAction {
    cell: Cell,
}

impl CreateCellAction {
    /// Create a new create-cell action
    ///
    /// # Arguments
    ///
    /// * `cell` - The committed (sorted) cell, as it appears in the list
    pub fn new(cell: Cell) -> Self {
        Self { cell }
    }
}

impl Action for CreateCellAction {
    type Target = Document;

    fn redo(&self, document: &mut Document) {
        document.cells.push(self.cell.clone());
    }

    fn undo(&self, document: &mut Document) {
        // The created cell is always the last one while this action is the head
        document.cells.pop();
    }

    fn name(&self) -> String {
        "create-cell".to_string()
    }
}
