//! Rendering contract
//!
//! The core never paints pixels itself. A frontend implements [`Renderer`]
//! for its paint surface and the session walks the scene through it, with
//! every rectangle already projected to screen space.

use crate::session::EditorState;
use crate::tool::InputState;
use kurbo::Rect;

/// How a cell should be painted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    /// Persisted, unselected cell
    Normal,
    /// Member of the current selection
    Selected,
    /// Reference cell of the current selection
    Reference,
    /// Transient cell being drawn
    Creating,
}

/// Paint surface used by the editor
pub trait Renderer {
    /// Start a new frame
    fn clear(&mut self) {}

    /// Draw the loaded image at its projected screen rectangle
    fn draw_image(&mut self, rect: Rect);

    /// Draw a filled cell rectangle with its label
    fn draw_cell(&mut self, rect: Rect, label: &str, style: CellStyle);

    /// Draw the stroked outline of an in-progress marquee
    fn draw_marquee(&mut self, rect: Rect);
}

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Image(Rect),
    Cell {
        rect: Rect,
        label: String,
        style: CellStyle,
    },
    Marquee(Rect),
}

/// Renderer that records draw calls instead of painting
#[derive(Debug, Default)]
pub struct FrameLog {
    pub commands: Vec<DrawCommand>,
}

impl FrameLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded cells, in draw order
    pub fn cells(&self) -> impl Iterator<Item = (&Rect, &str, CellStyle)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Cell { rect, label, style } => Some((rect, label.as_str(), *style)),
            _ => None,
        })
    }
}

impl Renderer for FrameLog {
    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn draw_image(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::Image(rect));
    }

    fn draw_cell(&mut self, rect: Rect, label: &str, style: CellStyle) {
        self.commands.push(DrawCommand::Cell {
            rect,
            label: label.to_string(),
            style,
        });
    }

    fn draw_marquee(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::Marquee(rect));
    }
}

/// Draw one frame: image, mode overlays, then every persisted cell
pub fn render_scene(state: &EditorState, input: &InputState, renderer: &mut dyn Renderer) {
    renderer.clear();

    let image = Rect::from_origin_size((0.0, 0.0), state.document.image_size);
    renderer.draw_image(state.transform.rect_to_screen(image));

    input.draw(state, renderer);

    for cell in &state.document.cells {
        let style = match &state.selection {
            Some(sel) if sel.reference() == cell.id => CellStyle::Reference,
            Some(sel) if sel.contains(&cell.id) => CellStyle::Selected,
            _ => CellStyle::Normal,
        };
        renderer.draw_cell(cell.screen_rect(&state.transform), &cell.label, style);
    }
}
