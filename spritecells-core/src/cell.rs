//! Cell geometry
//!
//! A cell is a labelled rectangle in model space. The bounds are stored as
//! four independent edges so an in-progress drag can temporarily invert the
//! box; [`Cell::sort_points`] restores the canonical form.

use crate::transform::Transform;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Neg};
use uuid::Uuid;

/// Model-space change to the four edges of a cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeDelta {
    pub top: f64,
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
}

impl EdgeDelta {
    pub const ZERO: EdgeDelta = EdgeDelta {
        top: 0.0,
        left: 0.0,
        right: 0.0,
        bottom: 0.0,
    };

    pub fn new(top: f64, left: f64, right: f64, bottom: f64) -> Self {
        Self {
            top,
            left,
            right,
            bottom,
        }
    }

    /// Same translation applied to all four edges
    pub fn translation(delta: Vec2) -> Self {
        Self::new(delta.y, delta.x, delta.x, delta.y)
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl Neg for EdgeDelta {
    type Output = EdgeDelta;

    fn neg(self) -> EdgeDelta {
        EdgeDelta::new(-self.top, -self.left, -self.right, -self.bottom)
    }
}

impl Add for EdgeDelta {
    type Output = EdgeDelta;

    fn add(self, rhs: EdgeDelta) -> EdgeDelta {
        EdgeDelta::new(
            self.top + rhs.top,
            self.left + rhs.left,
            self.right + rhs.right,
            self.bottom + rhs.bottom,
        )
    }
}

/// Direction used when duplicating a cell next to itself
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// A labelled sprite bounding box
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Unique identifier
    pub id: Uuid,

    /// Display label, e.g. `cell-3`
    pub label: String,

    pub top: f64,
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Cell {
    /// Create a cell from model-space bounds, canonicalizing them
    pub fn new(label: impl Into<String>, top: f64, left: f64, right: f64, bottom: f64) -> Self {
        let mut cell = Self {
            id: Uuid::new_v4(),
            label: label.into(),
            top,
            left,
            right,
            bottom,
        };
        cell.sort_points();
        cell
    }

    /// Zero-sized cell at a model point, the start of a create drag
    pub fn at_point(label: impl Into<String>, point: Point) -> Self {
        Self::new(label, point.y, point.x, point.x, point.y)
    }

    /// Model-space width (negative while inverted)
    pub fn width_model(&self) -> f64 {
        self.right - self.left
    }

    /// Model-space height (negative while inverted)
    pub fn height_model(&self) -> f64 {
        self.bottom - self.top
    }

    /// Screen x of the left edge
    pub fn x(&self, t: &Transform) -> f64 {
        t.scale * (self.left + t.offset_x)
    }

    /// Screen y of the top edge
    pub fn y(&self, t: &Transform) -> f64 {
        t.scale * (self.top + t.offset_y)
    }

    /// Screen-space width
    pub fn width(&self, t: &Transform) -> f64 {
        t.scale * self.width_model()
    }

    /// Screen-space height
    pub fn height(&self, t: &Transform) -> f64 {
        t.scale * self.height_model()
    }

    /// Projected rectangle in screen space (normalized)
    pub fn screen_rect(&self, t: &Transform) -> Rect {
        Rect::new(
            self.x(t),
            self.y(t),
            self.x(t) + self.width(t),
            self.y(t) + self.height(t),
        )
        .abs()
    }

    /// Model-space rectangle (normalized)
    pub fn model_rect(&self) -> Rect {
        Rect::new(self.left, self.top, self.right, self.bottom).abs()
    }

    /// Set the right edge from a screen x coordinate
    pub fn set_right(&mut self, x_screen: f64, t: &Transform) {
        self.right = t.x_to_model(x_screen);
    }

    /// Set the bottom edge from a screen y coordinate
    pub fn set_bottom(&mut self, y_screen: f64, t: &Transform) {
        self.bottom = t.y_to_model(y_screen);
    }

    /// Translate by a screen-space delta
    pub fn move_by(&mut self, delta_screen: Vec2, t: &Transform) -> EdgeDelta {
        let d = EdgeDelta::translation(t.screen_to_model_delta(delta_screen));
        self.shift_edges(d);
        d
    }

    /// Apply four independent screen-space edge deltas.
    ///
    /// Returns the model-space delta that was applied.
    pub fn transform(&mut self, dt: f64, dl: f64, dr: f64, db: f64, t: &Transform) -> EdgeDelta {
        let v = t.screen_to_model_delta(Vec2::new(dl, dt));
        let w = t.screen_to_model_delta(Vec2::new(dr, db));
        let d = EdgeDelta::new(v.y, v.x, w.x, w.y);
        self.shift_edges(d);
        d
    }

    /// Apply a model-space edge delta
    pub fn shift_edges(&mut self, d: EdgeDelta) {
        self.top += d.top;
        self.left += d.left;
        self.right += d.right;
        self.bottom += d.bottom;
    }

    /// Move the top-left corner to a model point, keeping the extent
    pub fn set_pos(&mut self, x: f64, y: f64) {
        let w = self.width_model();
        let h = self.height_model();
        self.left = x;
        self.top = y;
        self.right = x + w;
        self.bottom = y + h;
    }

    /// Inclusive hit test against the projected screen rectangle
    pub fn contains(&self, x_screen: f64, y_screen: f64, t: &Transform) -> bool {
        let x = self.x(t);
        let y = self.y(t);
        x <= x_screen
            && x_screen <= x + self.width(t)
            && y <= y_screen
            && y_screen <= y + self.height(t)
    }

    /// Canonicalize the bounds so that `left <= right` and `top <= bottom`
    pub fn sort_points(&mut self) {
        let (top, left, right, bottom) = (self.top, self.left, self.right, self.bottom);
        self.top = top.min(bottom);
        self.left = left.min(right);
        self.right = left.max(right);
        self.bottom = top.max(bottom);
    }

    pub fn is_canonical(&self) -> bool {
        self.left <= self.right && self.top <= self.bottom
    }

    /// Copy of this cell placed directly next to it, with a fresh id
    pub fn duplicated(&self, direction: Direction) -> Cell {
        let mut copy = self.clone();
        copy.id = Uuid::new_v4();
        let (w, h) = (self.width_model(), self.height_model());
        let offset = match direction {
            Direction::Left => Vec2::new(-w, 0.0),
            Direction::Right => Vec2::new(w, 0.0),
            Direction::Up => Vec2::new(0.0, -h),
            Direction::Down => Vec2::new(0.0, h),
        };
        copy.shift_edges(EdgeDelta::translation(offset));
        copy
    }
}
