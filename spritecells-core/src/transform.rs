//! View transform between model space and screen space
//!
//! The transform is an additive offset followed by a uniform scale:
//! `screen = scale * (model + offset)`. It is shared by every cell and by the
//! image, so panning or zooming moves the whole scene at once.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Pan/zoom state of the editor view
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Model-space offset added before scaling (x component)
    pub offset_x: f64,

    /// Model-space offset added before scaling (y component)
    pub offset_y: f64,

    /// Uniform zoom factor, never negative
    pub scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform {
    /// Identity transform: no offset, scale 1
    pub fn new() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            scale: 1.0,
        }
    }

    /// Offset as a vector
    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.offset_x, self.offset_y)
    }

    /// Set the offset so that `point / scale` becomes the new model offset.
    ///
    /// No-op at scale 0.
    pub fn move_at(&mut self, point: Point) {
        if self.scale == 0.0 {
            return;
        }
        self.offset_x = point.x / self.scale;
        self.offset_y = point.y / self.scale;
    }

    /// Pan by a screen-space delta.
    ///
    /// No-op at scale 0.
    pub fn move_by(&mut self, delta: Vec2) {
        if self.scale == 0.0 {
            return;
        }
        self.offset_x += delta.x / self.scale;
        self.offset_y += delta.y / self.scale;
    }

    /// Add `d` to the scale, clamping at 0
    pub fn zoom(&mut self, d: f64) {
        self.scale += d;
        if self.scale < 0.0 {
            self.scale = 0.0;
        }
    }

    /// Back to the identity transform
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Map a model-space point to screen space
    pub fn to_screen(&self, model: Point) -> Point {
        Point::new(
            self.scale * (model.x + self.offset_x),
            self.scale * (model.y + self.offset_y),
        )
    }

    /// Map a screen-space point back to model space.
    ///
    /// At scale 0 every screen point maps to `-offset`, the single model
    /// point the whole scene has collapsed onto.
    pub fn to_model(&self, screen: Point) -> Point {
        if self.scale == 0.0 {
            return Point::new(-self.offset_x, -self.offset_y);
        }
        Point::new(
            screen.x / self.scale - self.offset_x,
            screen.y / self.scale - self.offset_y,
        )
    }

    /// Map a single screen x coordinate to model space
    pub fn x_to_model(&self, x: f64) -> f64 {
        self.to_model(Point::new(x, 0.0)).x
    }

    /// Map a single screen y coordinate to model space
    pub fn y_to_model(&self, y: f64) -> f64 {
        self.to_model(Point::new(0.0, y)).y
    }

    /// Convert a screen-space length/delta to model space (zero at scale 0)
    pub fn screen_to_model_delta(&self, delta: Vec2) -> Vec2 {
        if self.scale == 0.0 {
            return Vec2::ZERO;
        }
        delta / self.scale
    }

    /// Map a model-space rectangle to screen space
    pub fn rect_to_screen(&self, rect: Rect) -> Rect {
        Rect::from_points(self.to_screen(rect.origin()), self.to_screen(Point::new(rect.x1, rect.y1)))
    }
}
