//! Cell export
//!
//! Produces the rectangles a sprite sheet consumer needs: one entry per
//! cell, in creation order, in image-pixel coordinates. Model space is
//! image-pixel space, so no view transform is involved.

use crate::cell::Cell;
use kurbo::Size;
use serde::{Deserialize, Serialize};

/// Exported sprite rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExportRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Round to 2 decimal places
fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Clamp a cell to the image and convert it to an [`ExportRect`]
pub fn export_cell(cell: &Cell, image_size: Size) -> ExportRect {
    let rect = cell.model_rect();
    // Negative or NaN image extents collapse to 0
    let max_x = image_size.width.max(0.0);
    let max_y = image_size.height.max(0.0);
    let left = rect.x0.clamp(0.0, max_x);
    let right = rect.x1.clamp(0.0, max_x);
    let top = rect.y0.clamp(0.0, max_y);
    let bottom = rect.y1.clamp(0.0, max_y);

    ExportRect {
        x: round2(left),
        y: round2(top),
        width: round2(right - left),
        height: round2(bottom - top),
    }
}

/// Export every cell, in list order
pub fn export_cells(cells: &[Cell], image_size: Size) -> Vec<ExportRect> {
    cells.iter().map(|c| export_cell(c, image_size)).collect()
}

/// Serialize exported rectangles as a JSON array
pub fn to_json(rects: &[ExportRect]) -> Result<String, serde_json::Error> {
    serde_json::to_string(rects)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> Size {
        Size::new(128.0, 64.0)
    }

    #[test]
    fn test_degenerate_image_size_collapses() {
        let cell = Cell::new("cell-0", 10.0, 10.0, 60.0, 40.0);
        let collapsed = ExportRect {
            x: 0.0,
            y: 10.0,
            width: 0.0,
            height: 30.0,
        };
        assert_eq!(export_cell(&cell, Size::new(f64::NAN, 64.0)), collapsed);
        assert_eq!(export_cell(&cell, Size::new(-1.0, 64.0)), collapsed);
    }

    #[test]
    fn test_export_inside_image() {
        let cell = Cell::new("cell-0", 10.0, 10.0, 60.0, 60.0);
        assert_eq!(
            export_cell(&cell, image()),
            ExportRect {
                x: 10.0,
                y: 10.0,
                width: 50.0,
                height: 50.0
            }
        );
    }

    #[test]
    fn test_export_clamps_to_image() {
        let cell = Cell::new("cell-0", -5.0, 100.0, 200.0, 80.0);
        let rect = export_cell(&cell, image());
        assert_eq!((rect.x, rect.y), (100.0, 0.0));
        assert_eq!((rect.width, rect.height), (28.0, 64.0));
    }

    #[test]
    fn test_export_rounds_to_two_decimals() {
        let cell = Cell::new("cell-0", 1.0 / 3.0, 2.0 / 3.0, 10.123456, 5.0);
        let rect = export_cell(&cell, image());
        assert_eq!(rect.x, 0.67);
        assert_eq!(rect.y, 0.33);
        assert_eq!(rect.width, 9.46);
        assert_eq!(rect.height, 4.67);
    }

    #[test]
    fn test_export_keeps_order_and_json_shape() {
        let cells = vec![
            Cell::new("cell-0", 0.0, 20.0, 30.0, 10.0),
            Cell::new("cell-1", 0.0, 0.0, 10.0, 10.0),
        ];
        let rects = export_cells(&cells, image());
        assert_eq!(rects[0].x, 20.0);
        assert_eq!(rects[1].x, 0.0);

        let json = to_json(&rects[1..]).unwrap();
        assert_eq!(json, r#"[{"x":0.0,"y":0.0,"width":10.0,"height":10.0}]"#);
    }
}
