use image::{
    Rgb, RgbImage,
    imageops::{self, FilterType},
};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::frame::Roi;

const HALF_BLOCK: &str = "▀";

/// Camera preview drawn with half-block characters, two pixels per cell.
///
/// The frame is scaled to fit the area with its aspect ratio kept, and the
/// region of interest is outlined.
#[derive(Debug)]
pub struct CameraDisplay<'a> {
    frame: Option<&'a RgbImage>,
    roi: Option<Roi>,
    roi_color: Color,
    block: Option<BlockWidget<'a>>,
}

impl<'a> CameraDisplay<'a> {
    pub fn new(frame: Option<&'a RgbImage>) -> Self {
        Self {
            frame,
            roi: None,
            roi_color: Color::Green,
            block: None,
        }
    }

    pub fn roi(self, roi: Roi) -> Self {
        Self {
            roi: Some(roi),
            ..self
        }
    }

    pub fn roi_color(self, roi_color: Color) -> Self {
        Self { roi_color, ..self }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }
}

/// Largest `(width, height)` with the aspect ratio of `frame` that fits in
/// `cols` x `rows` pixels.
fn fit(frame: (u32, u32), cols: u32, rows: u32) -> (u32, u32) {
    let (fw, fh) = (u64::from(frame.0), u64::from(frame.1));
    let (cols, rows) = (u64::from(cols), u64::from(rows));
    let (w, h) = if fw * rows <= fh * cols {
        (fw * rows / fh, rows)
    } else {
        (cols, fh * cols / fw)
    };
    (
        u32::try_from(w.max(1)).unwrap_or(u32::MAX),
        u32::try_from(h.max(1)).unwrap_or(u32::MAX),
    )
}

fn scale(value: u32, to: u32, from: u32) -> u32 {
    u32::try_from(u64::from(value) * u64::from(to) / u64::from(from)).unwrap_or(u32::MAX)
}

/// Outline of `roi` in the scaled image, as inclusive `(x0, y0, x1, y1)`.
fn scaled_outline(
    roi: Roi,
    frame: (u32, u32),
    scaled: (u32, u32),
) -> Option<(u32, u32, u32, u32)> {
    let (x, y, w, h) = roi.clamp_to(frame.0, frame.1)?;
    let x0 = scale(x, scaled.0, frame.0);
    let y0 = scale(y, scaled.1, frame.1);
    let x1 = scale(x + w, scaled.0, frame.0).saturating_sub(1).max(x0);
    let y1 = scale(y + h, scaled.1, frame.1).saturating_sub(1).max(y0);
    Some((x0, y0, x1, y1))
}

fn to_color(pixel: Rgb<u8>) -> Color {
    let Rgb([r, g, b]) = pixel;
    Color::Rgb(r, g, b)
}

impl Widget for CameraDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let Some(frame) = self.frame.filter(|f| f.width() > 0 && f.height() > 0) else {
            Line::styled("No camera", Style::new().fg(Color::DarkGray))
                .centered()
                .render(area.centered_vertically(Constraint::Length(1)), buf);
            return;
        };
        if area.is_empty() {
            return;
        }

        let (w, h) = fit(
            frame.dimensions(),
            u32::from(area.width),
            u32::from(area.height) * 2,
        );
        let mut scaled = imageops::resize(frame, w, h, FilterType::Nearest);
        if let Some((x0, y0, x1, y1)) = self
            .roi
            .and_then(|roi| scaled_outline(roi, frame.dimensions(), (w, h)))
        {
            let outline = match self.roi_color {
                Color::Rgb(r, g, b) => Rgb([r, g, b]),
                _ => Rgb([0, 255, 0]),
            };
            for x in x0..=x1 {
                scaled.put_pixel(x, y0, outline);
                scaled.put_pixel(x, y1, outline);
            }
            for y in y0..=y1 {
                scaled.put_pixel(x0, y, outline);
                scaled.put_pixel(x1, y, outline);
            }
        }

        let cols = u16::try_from(w).unwrap_or(area.width);
        let rows = u16::try_from(h.div_ceil(2)).unwrap_or(area.height);
        let left = area.x + (area.width - cols) / 2;
        let top = area.y + (area.height - rows) / 2;
        for row in 0..rows {
            for col in 0..cols {
                let px = u32::from(col);
                let py = u32::from(row) * 2;
                let upper = to_color(*scaled.get_pixel(px, py));
                let lower = if py + 1 < h {
                    to_color(*scaled.get_pixel(px, py + 1))
                } else {
                    Color::Reset
                };
                if let Some(cell) = buf.cell_mut((left + col, top + row)) {
                    cell.set_symbol(HALF_BLOCK).set_fg(upper).set_bg(lower);
                }
            }
        }
    }
}
