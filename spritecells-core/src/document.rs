//! Document structure for a sprite sheet
//!
//! The Document holds the size of the loaded image and the flat list of
//! cells defined over it, in creation order.

use crate::cell::{Cell, EdgeDelta};
use crate::transform::Transform;
use kurbo::Size;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sprite sheet being edited
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Image size in pixels (model space)
    pub image_size: Size,

    /// Persisted cells, in creation order
    pub cells: Vec<Cell>,
}

impl Document {
    /// Create an empty document over an image of the given size
    pub fn new(image_size: Size) -> Self {
        Self {
            image_size,
            cells: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get a cell by ID
    pub fn get_cell(&self, id: &Uuid) -> Option<&Cell> {
        self.cells.iter().find(|c| &c.id == id)
    }

    /// Get a mutable cell by ID
    pub fn get_cell_mut(&mut self, id: &Uuid) -> Option<&mut Cell> {
        self.cells.iter_mut().find(|c| &c.id == id)
    }

    /// First cell whose screen rectangle contains the point
    pub fn cell_at(&self, x_screen: f64, y_screen: f64, t: &Transform) -> Option<&Cell> {
        self.cells.iter().find(|c| c.contains(x_screen, y_screen, t))
    }

    /// Apply a model-space delta to one cell; missing ids are ignored
    pub(crate) fn shift_cell(&mut self, id: &Uuid, delta: EdgeDelta) {
        if let Some(cell) = self.get_cell_mut(id) {
            cell.shift_edges(delta);
        }
    }

    /// Copy of the list without the given ids
    pub fn without(&self, ids: &[Uuid]) -> Vec<Cell> {
        self.cells
            .iter()
            .filter(|c| !ids.contains(&c.id))
            .cloned()
            .collect()
    }

    /// Label for the next created cell
    pub fn next_label(&self) -> String {
        format!("cell-{}", self.cells.len())
    }
}
