//! Selection state management
//!
//! A [`MultiCell`] groups several cells so they can be moved, resized and
//! aligned as one unit, anchored on a reference cell. A [`Marquee`] is the
//! drag rectangle used to pick cells by containment.
//!
//! Members are referenced by id; the geometry lives in the [`Document`].
//! Every mutating operation returns the model-space delta applied to each
//! member so the caller can record a single undoable action.

use crate::cell::{Cell, EdgeDelta};
use crate::document::Document;
use crate::transform::Transform;
use kurbo::{Point, Rect, Vec2};
use uuid::Uuid;

/// Per-cell deltas produced by a group edit
pub type CellDeltas = Vec<(Uuid, EdgeDelta)>;

/// Group of selected cells with a designated reference cell
#[derive(Clone, Debug, PartialEq)]
pub struct MultiCell {
    /// Member ids in selection order
    members: Vec<Uuid>,

    /// Anchor for alignment and resize
    reference: Uuid,
}

impl MultiCell {
    /// Single-cell selection; the cell is also the reference
    pub fn new(cell: Uuid) -> Self {
        Self {
            members: vec![cell],
            reference: cell,
        }
    }

    /// Build a group from a set of cells, e.g. the result of a marquee.
    ///
    /// The first id becomes the reference. Returns `None` for an empty set.
    pub fn create(cells: &[Uuid]) -> Option<Self> {
        let first = *cells.first()?;
        let mut members = Vec::with_capacity(cells.len());
        for &id in cells {
            if !members.contains(&id) {
                members.push(id);
            }
        }
        Some(Self {
            members,
            reference: first,
        })
    }

    pub fn members(&self) -> &[Uuid] {
        &self.members
    }

    pub fn reference(&self) -> Uuid {
        self.reference
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Check if a cell is part of this group
    pub fn contains(&self, id: &Uuid) -> bool {
        self.members.contains(id)
    }

    /// Re-designate the anchor without changing membership.
    ///
    /// Ignored if `id` is not a member.
    pub fn set_reference(&mut self, id: Uuid) {
        if self.contains(&id) {
            self.reference = id;
        }
    }

    /// Drop members that no longer exist in the document.
    ///
    /// Returns `false` if the reference itself is gone, in which case the
    /// group should be discarded.
    pub fn retain_existing(&mut self, document: &Document) -> bool {
        self.members.retain(|id| document.get_cell(id).is_some());
        self.contains(&self.reference)
    }

    /// Translate every member by a screen-space delta
    pub fn move_by(&self, document: &mut Document, delta: Vec2, t: &Transform) -> CellDeltas {
        let d = EdgeDelta::translation(t.screen_to_model_delta(delta));
        self.apply_uniform(document, d)
    }

    /// Apply the same screen-space edge deltas to every member
    pub fn transform(
        &self,
        document: &mut Document,
        dt: f64,
        dl: f64,
        dr: f64,
        db: f64,
        t: &Transform,
    ) -> CellDeltas {
        let v = t.screen_to_model_delta(Vec2::new(dl, dt));
        let w = t.screen_to_model_delta(Vec2::new(dr, db));
        self.apply_uniform(document, EdgeDelta::new(v.y, v.x, w.x, w.y))
    }

    /// Move every member vertically so its top matches the reference's top
    pub fn horizontal_align(&self, document: &mut Document) -> CellDeltas {
        self.apply_relative(document, |reference, cell| {
            let dy = reference.top - cell.top;
            EdgeDelta::new(dy, 0.0, 0.0, dy)
        })
    }

    /// Move every member horizontally so its left matches the reference's left
    pub fn vertical_align(&self, document: &mut Document) -> CellDeltas {
        self.apply_relative(document, |reference, cell| {
            let dx = reference.left - cell.left;
            EdgeDelta::new(0.0, dx, dx, 0.0)
        })
    }

    /// Give every member the reference's width, holding its left edge
    pub fn sync_width(&self, document: &mut Document) -> CellDeltas {
        self.apply_relative(document, |reference, cell| {
            let dw = reference.width_model() - cell.width_model();
            EdgeDelta::new(0.0, 0.0, dw, 0.0)
        })
    }

    /// Give every member the reference's height, holding its top edge
    pub fn sync_height(&self, document: &mut Document) -> CellDeltas {
        self.apply_relative(document, |reference, cell| {
            let dh = reference.height_model() - cell.height_model();
            EdgeDelta::new(0.0, 0.0, 0.0, dh)
        })
    }

    /// Canonicalize every member.
    ///
    /// Returns the deltas needed to reproduce the change, since sorting an
    /// inverted box moves its edges.
    pub fn sort_points(&self, document: &mut Document) -> CellDeltas {
        let mut deltas = Vec::new();
        for id in &self.members {
            if let Some(cell) = document.get_cell_mut(id) {
                let before = (cell.top, cell.left, cell.right, cell.bottom);
                cell.sort_points();
                let d = EdgeDelta::new(
                    cell.top - before.0,
                    cell.left - before.1,
                    cell.right - before.2,
                    cell.bottom - before.3,
                );
                if !d.is_zero() {
                    deltas.push((*id, d));
                }
            }
        }
        deltas
    }

    fn apply_uniform(&self, document: &mut Document, d: EdgeDelta) -> CellDeltas {
        if d.is_zero() {
            return Vec::new();
        }
        let mut deltas = Vec::with_capacity(self.members.len());
        for id in &self.members {
            if let Some(cell) = document.get_cell_mut(id) {
                cell.shift_edges(d);
                deltas.push((*id, d));
            }
        }
        deltas
    }

    fn apply_relative(
        &self,
        document: &mut Document,
        delta_for: impl Fn(&Cell, &Cell) -> EdgeDelta,
    ) -> CellDeltas {
        let reference = match document.get_cell(&self.reference) {
            Some(c) => c.clone(),
            None => return Vec::new(),
        };

        let mut deltas = Vec::new();
        for id in &self.members {
            if *id == self.reference {
                continue;
            }
            if let Some(cell) = document.get_cell_mut(id) {
                let d = delta_for(&reference, cell);
                if !d.is_zero() {
                    cell.shift_edges(d);
                    deltas.push((*id, d));
                }
            }
        }
        deltas
    }
}

/// Drag rectangle for region selection, in screen space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marquee {
    pub x: f64,
    pub y: f64,
    /// May be negative while dragging up/left
    pub w: f64,
    pub h: f64,
}

impl Marquee {
    /// Zero-sized marquee at a screen point
    pub fn start(pos: Point) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            w: 0.0,
            h: 0.0,
        }
    }

    /// Grow by a pointer delta
    pub fn extend(&mut self, delta: Vec2) {
        self.w += delta.x;
        self.h += delta.y;
    }

    /// Same region with non-negative width and height
    pub fn normalized(&self) -> Marquee {
        let mut m = *self;
        if m.w < 0.0 {
            m.x += m.w;
            m.w = m.w.abs();
        }
        if m.h < 0.0 {
            m.y += m.h;
            m.h = m.h.abs();
        }
        m
    }

    pub fn rect(&self) -> Rect {
        let m = self.normalized();
        Rect::new(m.x, m.y, m.x + m.w, m.y + m.h)
    }

    /// Strict containment of a cell's screen rectangle (not intersection)
    pub fn contains(&self, cell: &Cell, t: &Transform) -> bool {
        let r = self.normalized();
        let (x, y) = (cell.x(t), cell.y(t));
        r.x <= x && r.y <= y && r.x + r.w >= x + cell.width(t) && r.y + r.h >= y + cell.height(t)
    }

    /// Ids of every enclosed cell, in list order
    pub fn enclosed(&self, cells: &[Cell], t: &Transform) -> Vec<Uuid> {
        cells
            .iter()
            .filter(|c| self.contains(c, t))
            .map(|c| c.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document_with(rects: &[(f64, f64, f64, f64)]) -> (Document, Vec<Uuid>) {
        let mut document = Document::default();
        let mut ids = Vec::new();
        for (i, &(top, left, right, bottom)) in rects.iter().enumerate() {
            let cell = Cell::new(format!("cell-{}", i), top, left, right, bottom);
            ids.push(cell.id);
            document.cells.push(cell);
        }
        (document, ids)
    }

    #[test]
    fn test_new_is_its_own_reference() {
        let id = Uuid::new_v4();
        let group = MultiCell::new(id);
        assert_eq!(group.reference(), id);
        assert_eq!(group.members(), &[id]);
    }

    #[test]
    fn test_set_reference_requires_membership() {
        let ids = [Uuid::new_v4(), Uuid::new_v4()];
        let mut group = MultiCell::create(&ids).unwrap();
        assert_eq!(group.reference(), ids[0]);

        group.set_reference(ids[1]);
        assert_eq!(group.reference(), ids[1]);

        group.set_reference(Uuid::new_v4());
        assert_eq!(group.reference(), ids[1]);
        assert_eq!(group.len(), 2);
    }

    #[test]
    fn test_create_empty_is_none() {
        assert!(MultiCell::create(&[]).is_none());
    }

    #[test]
    fn test_horizontal_align_matches_top() {
        let (mut document, ids) = document_with(&[(10.0, 0.0, 20.0, 30.0), (50.0, 40.0, 60.0, 55.0)]);
        let group = MultiCell::create(&ids).unwrap();
        let deltas = group.horizontal_align(&mut document);

        let moved = document.get_cell(&ids[1]).unwrap();
        assert_eq!((moved.top, moved.bottom), (10.0, 15.0));
        assert_eq!(deltas.len(), 1);
    }

    #[test]
    fn test_vertical_align_matches_left() {
        let (mut document, ids) = document_with(&[(0.0, 10.0, 20.0, 10.0), (30.0, 45.0, 60.0, 40.0)]);
        let group = MultiCell::create(&ids).unwrap();
        group.vertical_align(&mut document);

        let moved = document.get_cell(&ids[1]).unwrap();
        assert_eq!((moved.left, moved.right), (10.0, 25.0));
    }

    #[test]
    fn test_sync_width_and_height_hold_top_left() {
        let (mut document, ids) = document_with(&[(0.0, 0.0, 32.0, 48.0), (100.0, 100.0, 110.0, 105.0)]);
        let group = MultiCell::create(&ids).unwrap();
        group.sync_width(&mut document);
        group.sync_height(&mut document);

        let cell = document.get_cell(&ids[1]).unwrap();
        assert_eq!((cell.top, cell.left), (100.0, 100.0));
        assert_eq!((cell.width_model(), cell.height_model()), (32.0, 48.0));
    }

    #[test]
    fn test_move_applies_to_every_member() {
        let (mut document, ids) = document_with(&[(0.0, 0.0, 10.0, 10.0), (20.0, 20.0, 30.0, 30.0)]);
        let group = MultiCell::create(&ids).unwrap();
        let t = Transform::new();
        let deltas = group.move_by(&mut document, Vec2::new(5.0, -5.0), &t);

        assert_eq!(deltas.len(), 2);
        assert_eq!(document.cells[0].left, 5.0);
        assert_eq!(document.cells[1].top, 15.0);
    }

    #[test]
    fn test_marquee_requires_full_containment() {
        let (document, ids) = document_with(&[(10.0, 10.0, 20.0, 20.0), (15.0, 15.0, 50.0, 50.0)]);
        let t = Transform::new();

        let mut marquee = Marquee::start(Point::new(30.0, 30.0));
        marquee.extend(Vec2::new(-25.0, -25.0));
        assert_eq!(marquee.normalized().x, 5.0);

        assert_eq!(marquee.enclosed(&document.cells, &t), vec![ids[0]]);
    }

    #[test]
    fn test_retain_existing_drops_deleted() {
        let (mut document, ids) = document_with(&[(0.0, 0.0, 10.0, 10.0), (20.0, 20.0, 30.0, 30.0)]);
        let mut group = MultiCell::create(&ids).unwrap();
        document.cells.remove(1);
        assert!(group.retain_existing(&document));
        assert_eq!(group.len(), 1);

        document.cells.clear();
        assert!(!group.retain_existing(&document));
    }
}
