//! Calendar heat-map renderer, PNG output.

use std::io::Cursor;
use std::path::Path;

use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{ImageFormat, Rgb, RgbImage};

use super::palette::ylgn;
use crate::error::{CoreError, Result};
use crate::stats::{CalendarGrid, WEEKDAYS};

const GLYPH: u32 = 8;
const BACKGROUND: Rgb<u8> = Rgb([0xff, 0xff, 0xff]);
const INK: Rgb<u8> = Rgb([0x33, 0x33, 0x33]);

/// Row labels, Sunday first.
const ROW_LABELS: [&str; WEEKDAYS] = ["", "M", "", "W", "", "F", ""];

/// Draws a [`CalendarGrid`] as square cells with month and weekday labels.
#[derive(Debug, Clone)]
pub struct HeatmapRenderer {
    /// Cell edge in pixels.
    pub cell: u32,
    /// Space between cells in pixels.
    pub gap: u32,
    /// Outer border in pixels.
    pub margin: u32,
}

impl Default for HeatmapRenderer {
    fn default() -> Self {
        Self {
            cell: 12,
            gap: 2,
            margin: 4,
        }
    }
}

impl HeatmapRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn pitch(&self) -> u32 {
        self.cell + self.gap
    }

    fn left(&self) -> u32 {
        self.margin + GLYPH + self.gap * 2
    }

    fn top(&self) -> u32 {
        self.margin + GLYPH + self.gap * 2
    }

    /// Pixel size of the image for a grid with `weeks` columns.
    pub fn dimensions(&self, weeks: usize) -> (u32, u32) {
        let width = self.left() + weeks as u32 * self.pitch() + self.margin;
        let height = self.top() + WEEKDAYS as u32 * self.pitch() + self.margin;
        (width, height)
    }

    /// Top-left pixel of the cell at `(week, weekday)`.
    pub fn cell_origin(&self, week: usize, weekday: usize) -> (u32, u32) {
        (
            self.left() + week as u32 * self.pitch(),
            self.top() + weekday as u32 * self.pitch(),
        )
    }

    /// Draw the grid into a new image.
    pub fn render(&self, grid: &CalendarGrid) -> RgbImage {
        let (width, height) = self.dimensions(grid.weeks());
        let mut img = RgbImage::from_pixel(width, height, BACKGROUND);

        for week in 0..grid.weeks() {
            for weekday in 0..WEEKDAYS {
                if let Some(value) = grid.cell(week, weekday) {
                    let (x, y) = self.cell_origin(week, weekday);
                    fill_rect(&mut img, x, y, self.cell, self.cell, ylgn(grid.intensity(value)));
                }
            }
        }

        // Month names sit above the first week of each month.
        let mut free_from = 0;
        for (week, label) in grid.month_labels().iter().enumerate() {
            let (x, _) = self.cell_origin(week, 0);
            if label.is_empty() || x < free_from {
                continue;
            }
            let end = draw_text(&mut img, x, self.margin, label, INK);
            free_from = end + self.gap;
        }

        for (weekday, label) in ROW_LABELS.iter().enumerate() {
            let (_, y) = self.cell_origin(0, weekday);
            let y = y + self.cell.saturating_sub(GLYPH) / 2;
            draw_text(&mut img, self.margin, y, label, INK);
        }

        img
    }

    /// Render and encode as PNG bytes.
    pub fn encode_png(&self, grid: &CalendarGrid) -> Result<Vec<u8>> {
        let img = self.render(grid);
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
        Ok(buf)
    }

    /// Render to `path`, replacing any existing file.
    ///
    /// The image is encoded before the file is opened, so an encoding
    /// failure leaves an existing file untouched.
    pub fn write_png(&self, grid: &CalendarGrid, path: &Path) -> Result<()> {
        let bytes = self.encode_png(grid)?;
        std::fs::write(path, &bytes).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote heat-map");
        Ok(())
    }
}

fn fill_rect(img: &mut RgbImage, x: u32, y: u32, w: u32, h: u32, color: Rgb<u8>) {
    for py in y..(y + h).min(img.height()) {
        for px in x..(x + w).min(img.width()) {
            img.put_pixel(px, py, color);
        }
    }
}

/// Draw `text` with 8x8 bitmap glyphs; returns the x just past the text.
/// Characters without a glyph advance without drawing.
fn draw_text(img: &mut RgbImage, x: u32, y: u32, text: &str, color: Rgb<u8>) -> u32 {
    let mut cursor = x;
    for c in text.chars() {
        if let Some(glyph) = BASIC_FONTS.get(c) {
            for (row, bits) in glyph.iter().enumerate() {
                for col in 0..GLYPH {
                    if (*bits >> col) & 1 == 0 {
                        continue;
                    }
                    let (px, py) = (cursor + col, y + row as u32);
                    if px < img.width() && py < img.height() {
                        img.put_pixel(px, py, color);
                    }
                }
            }
        }
        cursor += GLYPH;
    }
    cursor
}
