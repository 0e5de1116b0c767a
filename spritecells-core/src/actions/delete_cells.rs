//! Delete cells action
//!
//! Swaps the whole cell list between a pre-delete and post-delete snapshot.
//! Also used for "clear all", where the post-delete snapshot is empty.

use crate::action::Action;
use crate::cell::Cell;
use crate::document::Document;

/// Action that replaces the cell list with a smaller one
#[derive(Clone, Debug)]
pub struct DeleteCellsAction {
    /// List before the delete
    before: Vec<Cell>,

    /// List after the delete
    after: Vec<Cell>,
}

impl DeleteCellsAction {
    pub fn new(before: Vec<Cell>, after: Vec<Cell>) -> Self {
        Self { before, after }
    }

    /// Number of cells removed by this action
    pub fn removed_count(&self) -> usize {
        self.before.len().saturating_sub(self.after.len())
    }
}

impl Action for DeleteCellsAction {
    type Target = Document;

    fn redo(&self, document: &mut Document) {
        document.cells = self.after.clone();
    }

    fn undo(&self, document: &mut Document) {
        document.cells = self.before.clone();
    }

    fn name(&self) -> String {
        let count = self.removed_count();
        if count == 1 {
            "delete-cell".to_string()
        } else {
            format!("delete-cells ({})", count)
        }
    }
}
