//! Modify cells action
//!
//! Records the model-space edge deltas of a move, resize or alignment so
//! they can be negated on undo. Deltas are in model space, which makes the
//! replay independent of the zoom level at the time of undo/redo.

use crate::action::Action;
use crate::cell::EdgeDelta;
use crate::document::Document;
use uuid::Uuid;

/// Action that shifts the edges of one or more cells
#[derive(Clone, Debug)]
pub struct ModifyCellsAction {
    /// Per-cell delta, one entry per affected cell
    deltas: Vec<(Uuid, EdgeDelta)>,
}

impl ModifyCellsAction {
    pub fn new(deltas: Vec<(Uuid, EdgeDelta)>) -> Self {
        Self { deltas }
    }

    /// Merge deltas reported for the same cell, dropping ones that cancel out
    pub fn coalesced(deltas: impl IntoIterator<Item = (Uuid, EdgeDelta)>) -> Self {
        let mut merged: Vec<(Uuid, EdgeDelta)> = Vec::new();
        for (id, d) in deltas {
            match merged.iter_mut().find(|(existing, _)| *existing == id) {
                Some((_, total)) => *total = *total + d,
                None => merged.push((id, d)),
            }
        }
        merged.retain(|(_, d)| !d.is_zero());
        Self { deltas: merged }
    }

    pub fn deltas(&self) -> &[(Uuid, EdgeDelta)] {
        &self.deltas
    }

    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }
}

impl Action for ModifyCellsAction {
    type Target = Document;

    fn redo(&self, document: &mut Document) {
        for (id, delta) in &self.deltas {
            document.shift_cell(id, *delta);
        }
    }

    fn undo(&self, document: &mut Document) {
        for (id, delta) in &self.deltas {
            document.shift_cell(id, -*delta);
        }
    }

    fn name(&self) -> String {
        "modify-cell".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;

    #[test]
    fn test_modify_cells_action() {
        let mut document = Document::default();
        let a = Cell::new("cell-0", 0.0, 0.0, 10.0, 10.0);
        let b = Cell::new("cell-1", 20.0, 20.0, 30.0, 30.0);
        let (a_id, b_id) = (a.id, b.id);
        document.cells.push(a);
        document.cells.push(b);
        let original = document.clone();

        let action = ModifyCellsAction::new(vec![
            (a_id, EdgeDelta::new(1.0, 2.0, 3.0, 4.0)),
            (b_id, EdgeDelta::new(-5.0, 0.0, 0.0, 5.0)),
        ]);

        action.redo(&mut document);
        assert_eq!(document.get_cell(&a_id).unwrap().right, 13.0);
        assert_eq!(document.get_cell(&b_id).unwrap().top, 15.0);

        action.undo(&mut document);
        assert_eq!(document, original);
    }

    #[test]
    fn test_coalesced_merges_per_cell() {
        let id = Uuid::new_v4();
        let other = Uuid::new_v4();
        let action = ModifyCellsAction::coalesced(vec![
            (id, EdgeDelta::new(1.0, 1.0, 1.0, 1.0)),
            (other, EdgeDelta::new(0.0, 2.0, 2.0, 0.0)),
            (id, EdgeDelta::new(1.0, 1.0, 1.0, 1.0)),
            (other, EdgeDelta::new(0.0, -2.0, -2.0, 0.0)),
        ]);
        assert_eq!(action.deltas(), &[(id, EdgeDelta::new(2.0, 2.0, 2.0, 2.0))]);
    }
}
