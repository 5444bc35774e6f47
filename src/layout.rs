/// Width the artwork and fonts are designed for.
pub const REFERENCE_WIDTH: f32 = 800.0;
/// Canvas height at the reference width; the background art is 8:3.
pub const REFERENCE_HEIGHT: f32 = 300.0;
pub const BASE_FONT_SIZE: f32 = 8.0;
pub const BASE_ICON_SIZE: f32 = 100.0;
/// Horizontal padding on each side of the canvas inside the window.
pub const WINDOW_PADDING: f32 = 10.0;
pub const GRAPH_HEIGHT: f32 = 300.0;
pub const BUTTON_PADDING: [u16; 2] = [5, 8];

/// Sizes derived from the canvas width. Always recomputed from the reference
/// values, so resizing back and forth never accumulates rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub scale: f32,
    pub font_size: u16,
    pub icon_size: u32,
    pub graph_width: f32,
}

impl Layout {
    pub fn for_canvas_width(width: u32) -> Self {
        let scale = width as f32 / REFERENCE_WIDTH;
        Self {
            canvas_width: width,
            canvas_height: (width as f32 * REFERENCE_HEIGHT / REFERENCE_WIDTH) as u32,
            scale,
            font_size: (BASE_FONT_SIZE * scale).floor() as u16,
            icon_size: (BASE_ICON_SIZE * scale).floor() as u32,
            graph_width: width as f32,
        }
    }

    /// Canvas width available inside a window of the given width.
    pub fn canvas_width_for_window(window_width: u32) -> u32 {
        (window_width as f32 - 2.0 * WINDOW_PADDING).max(0.0) as u32
    }

    /// Font size to hand to widgets; a zero size would hide the text entirely.
    pub fn render_font_size(&self) -> f32 {
        f32::from(self.font_size.max(1))
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::for_canvas_width(REFERENCE_WIDTH as u32)
    }
}
