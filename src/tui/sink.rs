use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::domain::{RenderEvent, TextStyle};
use crate::media::Bitmap;

/// Width in terminal cells of rendered image previews.
const PREVIEW_COLS: u32 = 60;

/// A displayed element. Image cells are precomputed once at accept time so
/// redraws stay cheap; their colors come from the bitmap itself, not the
/// theme.
pub enum ViewElement {
    Text { text: String, style: TextStyle },
    Image { lines: Vec<Line<'static>> },
    Notice(String),
}

/// Single-consumer presentation surface. Must only be touched from the UI
/// task; worker output reaches it exclusively through the coordinator's
/// channel. Owns displayed images for exactly as long as they are in the
/// view: `reset` drops them.
#[derive(Default)]
pub struct PresentationSink {
    elements: Vec<ViewElement>,
}

impl PresentationSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one render event, in call order.
    pub fn accept(&mut self, event: RenderEvent) {
        let element = match event {
            RenderEvent::TextBlock { text, style } => ViewElement::Text { text, style },
            RenderEvent::Image(bitmap) => ViewElement::Image {
                lines: half_block_lines(&bitmap, PREVIEW_COLS),
            },
            RenderEvent::ErrorNotice(text) => ViewElement::Notice(text),
        };
        self.elements.push(element);
    }

    /// Clear all displayed elements, releasing image buffers.
    pub fn reset(&mut self) {
        self.elements.clear();
    }

    pub fn elements(&self) -> &[ViewElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Render a bitmap as rows of '▀' cells: each cell shows two vertically
/// stacked pixels via foreground/background colors, which roughly squares
/// the terminal's 1:2 cell aspect.
fn half_block_lines(bitmap: &Bitmap, max_cols: u32) -> Vec<Line<'static>> {
    if bitmap.width() == 0 || bitmap.height() == 0 {
        return Vec::new();
    }

    let cols = bitmap.width().min(max_cols).max(1);
    let scale = bitmap.width() as f32 / cols as f32;
    let rows_px = ((bitmap.height() as f32 / scale).round() as u32).max(1);
    let rows = rows_px.div_ceil(2);

    let mut lines = Vec::with_capacity(rows as usize);
    for row in 0..rows {
        let mut spans = Vec::with_capacity(cols as usize);
        for col in 0..cols {
            let src_x = (col as f32 * scale) as u32;
            let top_y = (row as f32 * 2.0 * scale) as u32;
            let bottom_y = ((row as f32 * 2.0 + 1.0) * scale) as u32;

            let (tr, tg, tb) = bitmap.pixel(src_x, top_y);
            let (br, bg, bb) = bitmap.pixel(src_x, bottom_y);

            spans.push(Span::styled(
                "\u{2580}",
                Style::default()
                    .fg(Color::Rgb(tr, tg, tb))
                    .bg(Color::Rgb(br, bg, bb)),
            ));
        }
        lines.push(Line::from(spans));
    }
    lines
}
