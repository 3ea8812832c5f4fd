//! Immediate-mode drawing surface backed by terminal cells.
//!
//! Coordinates are virtual pixels; [`CellMetrics`] decides which cell a
//! pixel lands in. A cell whose symbol is a space counts as transparent when
//! the canvas is drawn onto another canvas.

use mindless_core::{CellMetrics, Rgba, Viewport};

use crate::pixels::PixelBuffer;

/// Upper half block, used to show two vertical pixels in one cell.
pub const HALF_BLOCK: char = '▀';

/// Glyphs faded below this brightness are erased.
const ERASE_THRESHOLD: u8 = 10;

/// One terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub symbol: char,
    pub fg: Rgba,
    pub bg: Rgba,
}

impl Cell {
    /// Empty black cell.
    pub const BLANK: Cell = Cell {
        symbol: ' ',
        fg: Rgba::BLACK,
        bg: Rgba::BLACK,
    };

    /// Whether the cell shows nothing but its background.
    pub fn is_blank(&self) -> bool {
        self.symbol == ' '
    }

    /// Colors of the upper and lower half of the cell.
    pub(crate) fn halves(&self) -> (Rgba, Rgba) {
        if self.symbol == HALF_BLOCK {
            (self.fg, self.bg)
        } else {
            (self.bg, self.bg)
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}

/// How pixel layers are combined with what is already on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    #[default]
    Normal,
    Overlay,
}

impl BlendMode {
    fn apply(self, dst: Rgba, src: Rgba, opacity: f32) -> Rgba {
        match self {
            BlendMode::Normal => dst.blend(src, opacity),
            BlendMode::Overlay => dst.overlay(src, opacity),
        }
    }
}

/// Axis-aligned rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PixelRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Normalized position of a point inside the rectangle, if it is inside.
    fn normalize(&self, px: f32, py: f32) -> Option<(f32, f32)> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        let u = (px - self.x) / self.width;
        let v = (py - self.y) / self.height;
        ((0.0..1.0).contains(&u) && (0.0..1.0).contains(&v)).then_some((u, v))
    }
}

/// Grid of cells addressed in pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct CellCanvas {
    metrics: CellMetrics,
    width: u32,
    height: u32,
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl CellCanvas {
    /// Create a blank canvas covering `width × height` pixels.
    pub fn new(width: u32, height: u32, metrics: CellMetrics) -> Self {
        let (cols, rows) = metrics.grid_for(width, height);
        Self {
            metrics,
            width,
            height,
            cols,
            rows,
            cells: vec![Cell::BLANK; cols as usize * rows as usize],
        }
    }

    /// Create a blank canvas covering a viewport.
    pub fn for_viewport(viewport: Viewport, metrics: CellMetrics) -> Self {
        Self::new(viewport.width, viewport.height, metrics)
    }

    /// Resize to a new viewport. Like a canvas size assignment, this clears
    /// the content even if the size is unchanged.
    pub fn resize(&mut self, viewport: Viewport) {
        *self = Self::for_viewport(viewport, self.metrics);
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    pub fn metrics(&self) -> CellMetrics {
        self.metrics
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Cell at a grid position.
    pub fn cell(&self, col: i32, row: i32) -> Option<&Cell> {
        self.index(col, row).map(|i| &self.cells[i])
    }

    /// Mutable cell at a grid position.
    pub fn cell_mut(&mut self, col: i32, row: i32) -> Option<&mut Cell> {
        self.index(col, row).map(|i| &mut self.cells[i])
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// All cells, row-major, mutable.
    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return None;
        }
        Some(row as usize * self.cols as usize + col as usize)
    }

    /// Column range `[start, end)` of cells touched by a pixel span.
    fn col_span(&self, x: f32, width: f32) -> (i32, i32) {
        let start = self.metrics.col_at(x).max(0);
        let end = ((x + width) / self.metrics.width as f32).ceil() as i32;
        (start, end.min(self.cols as i32))
    }

    /// Row range `[start, end)` of cells touched by a pixel span.
    fn row_span(&self, y: f32, height: f32) -> (i32, i32) {
        let start = self.metrics.row_at(y).max(0);
        let end = ((y + height) / self.metrics.height as f32).ceil() as i32;
        (start, end.min(self.rows as i32))
    }

    /// Paint a rectangle with `color`, honouring its alpha.
    ///
    /// Glyphs that fade to near black are erased so trails end cleanly.
    pub fn fill_rect(&mut self, rect: PixelRect, color: Rgba) {
        let (c0, c1) = self.col_span(rect.x, rect.width);
        let (r0, r1) = self.row_span(rect.y, rect.height);
        for row in r0..r1 {
            for col in c0..c1 {
                if let Some(cell) = self.cell_mut(col, row) {
                    cell.fg = cell.fg.blend(color, 1.0);
                    cell.bg = cell.bg.blend(color, 1.0);
                    if max_channel(cell.fg) < ERASE_THRESHOLD
                        && max_channel(cell.bg) < ERASE_THRESHOLD
                    {
                        cell.symbol = ' ';
                    }
                }
            }
        }
    }

    /// Draw text with its top-left corner at `(x, y)`, one cell per char.
    ///
    /// Spaces leave the underlying cells untouched.
    pub fn fill_text(&mut self, text: &str, x: f32, y: f32, color: Rgba) {
        let col = self.metrics.col_at(x);
        let row = self.metrics.row_at(y);
        for (i, ch) in text.chars().enumerate() {
            if ch == ' ' {
                continue;
            }
            if let Some(cell) = self.cell_mut(col + i as i32, row) {
                cell.symbol = ch;
                cell.fg = color;
            }
        }
    }

    /// Copy the `src` region of another canvas to `(dx, dy)`.
    ///
    /// Blank source cells are transparent. Both regions are clipped.
    pub fn draw_canvas(&mut self, source: &CellCanvas, src: PixelRect, dx: f32, dy: f32) {
        if src.width <= 0.0 || src.height <= 0.0 {
            return;
        }
        let (c0, c1) = source.col_span(src.x, src.width);
        let (r0, r1) = source.row_span(src.y, src.height);
        // round to the nearest column
        let dst_col = (dx / self.metrics.width.max(1) as f32).round() as i32
            - source.metrics.col_at(src.x);
        let dst_row = self.metrics.row_at(dy) - source.metrics.row_at(src.y);

        for row in r0..r1 {
            for col in c0..c1 {
                let Some(from) = source.cell(col, row).copied() else {
                    continue;
                };
                if from.is_blank() {
                    continue;
                }
                if let Some(to) = self.cell_mut(col + dst_col, row + dst_row) {
                    to.symbol = from.symbol;
                    to.fg = from.fg;
                    if from.symbol == HALF_BLOCK {
                        to.bg = from.bg;
                    }
                }
            }
        }
    }

    /// Composite a pixel buffer stretched over `dst`.
    ///
    /// Every cell samples two pixels, one per half. Empty cells and half
    /// block cells become half block cells showing both samples; cells with
    /// a glyph keep it and take the average of the samples.
    pub fn draw_pixels(
        &mut self,
        pixels: &PixelBuffer,
        dst: PixelRect,
        opacity: f32,
        mode: BlendMode,
    ) {
        if pixels.is_empty() || opacity <= 0.0 {
            return;
        }
        let (c0, c1) = self.col_span(dst.x, dst.width);
        let (r0, r1) = self.row_span(dst.y, dst.height);
        let cw = self.metrics.width as f32;
        let ch = self.metrics.height as f32;

        for row in r0..r1 {
            for col in c0..c1 {
                let cx = (col as f32 + 0.5) * cw;
                let top_y = (row as f32 + 0.25) * ch;
                let bottom_y = (row as f32 + 0.75) * ch;
                let top = dst.normalize(cx, top_y).map(|(u, v)| pixels.sample(u, v));
                let bottom = dst.normalize(cx, bottom_y).map(|(u, v)| pixels.sample(u, v));
                if top.is_none() && bottom.is_none() {
                    continue;
                }
                let Some(cell) = self.cell_mut(col, row) else {
                    continue;
                };

                if cell.is_blank() || cell.symbol == HALF_BLOCK {
                    let (upper, lower) = cell.halves();
                    let upper = top.map_or(upper, |s| mode.apply(upper, s, opacity));
                    let lower = bottom.map_or(lower, |s| mode.apply(lower, s, opacity));
                    *cell = Cell {
                        symbol: HALF_BLOCK,
                        fg: upper,
                        bg: lower,
                    };
                } else {
                    let sample = average(top.into_iter().chain(bottom));
                    cell.fg = mode.apply(cell.fg, sample, opacity);
                    cell.bg = mode.apply(cell.bg, sample, opacity);
                }
            }
        }
    }
}

fn max_channel(c: Rgba) -> u8 {
    c.r.max(c.g).max(c.b)
}

fn average(colors: impl Iterator<Item = Rgba>) -> Rgba {
    let (mut r, mut g, mut b, mut a, mut n) = (0u32, 0u32, 0u32, 0u32, 0u32);
    for c in colors {
        r += c.r as u32;
        g += c.g as u32;
        b += c.b as u32;
        a += c.a as u32;
        n += 1;
    }
    if n == 0 {
        return Rgba::TRANSPARENT;
    }
    Rgba::new((r / n) as u8, (g / n) as u8, (b / n) as u8, (a / n) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(cols: u32, rows: u32) -> CellCanvas {
        CellCanvas::new(cols * 8, rows * 16, CellMetrics::default())
    }

    #[test]
    fn grid_covers_partial_cells() {
        let c = CellCanvas::new(20, 17, CellMetrics::default());
        assert_eq!((c.cols(), c.rows()), (3, 2));
        let empty = CellCanvas::new(0, 0, CellMetrics::default());
        assert!(empty.cells().is_empty());
    }

    #[test]
    fn fill_text_maps_pixels_to_cells_and_skips_spaces() {
        let mut c = canvas(10, 4);
        c.fill_text("A B", 16.0, 32.0, Rgba::WHITE);
        assert_eq!(c.cell(2, 2).unwrap().symbol, 'A');
        assert!(c.cell(3, 2).unwrap().is_blank());
        assert_eq!(c.cell(4, 2).unwrap().symbol, 'B');
    }

    #[test]
    fn fill_text_out_of_bounds_is_ignored() {
        let mut c = canvas(2, 2);
        c.fill_text("XYZ", 8.0, -16.0, Rgba::WHITE);
        c.fill_text("XYZ", 8.0, 1000.0, Rgba::WHITE);
        c.fill_text("XYZ", 8.0, 0.0, Rgba::WHITE);
        assert_eq!(c.cell(1, 0).unwrap().symbol, 'X');
        assert!(c.cells().iter().filter(|cell| !cell.is_blank()).count() == 1);
    }

    #[test]
    fn repeated_fades_erase_glyphs() {
        let mut c = canvas(4, 4);
        c.fill_text("Z", 0.0, 0.0, Rgba::from_hex(0x60A5FA));
        let fade = Rgba::new(0, 0, 0, 20);
        let full = PixelRect::new(0.0, 0.0, c.width() as f32, c.height() as f32);

        c.fill_rect(full, fade);
        let once = c.cell(0, 0).unwrap();
        assert_eq!(once.symbol, 'Z');
        assert!(once.fg.b < 0xFA);

        for _ in 0..200 {
            c.fill_rect(full, fade);
        }
        assert!(c.cell(0, 0).unwrap().is_blank());
    }

    #[test]
    fn draw_canvas_copies_region_with_transparency() {
        let mut sprite = canvas(6, 1);
        sprite.fill_text("HELLO", 8.0, 0.0, Rgba::WHITE);

        let mut c = canvas(10, 3);
        c.fill_text("##########", 0.0, 16.0, Rgba::BLACK.with_alpha(255));
        // two-cell wide slice starting at the 'E'
        c.draw_canvas(&sprite, PixelRect::new(16.0, 0.0, 16.0, 16.0), 40.0, 16.0);

        let row: String = (0..10).map(|col| c.cell(col, 1).unwrap().symbol).collect();
        assert_eq!(row, "#####EL###");
    }

    #[test]
    fn draw_canvas_rounds_fractional_offsets_to_the_nearest_column() {
        let mut sprite = canvas(2, 1);
        sprite.fill_text("AB", 0.0, 0.0, Rgba::WHITE);

        let mut shifts = Vec::new();
        for step in -59..=59 {
            let offset = step as f32 / 10.0;
            let mut c = canvas(6, 1);
            c.draw_canvas(&sprite, PixelRect::new(0.0, 0.0, 16.0, 16.0), 16.0 + offset, 0.0);
            let col = (0..6).find(|&col| c.cell(col, 0).unwrap().symbol == 'A').unwrap();
            let shift = col - 2;
            // halfway rounds away from zero: 1.5 cells -> 2, 2.5 cells -> 3
            let expected = if offset < -4.0 {
                -1
            } else if offset >= 4.0 {
                1
            } else {
                0
            };
            assert_eq!(shift, expected, "offset {offset}");
            shifts.push(shift);
        }
        assert!(shifts.contains(&-1));
        assert!(shifts.contains(&1));
    }

    #[test]
    fn draw_canvas_clips_at_edges() {
        let mut sprite = canvas(3, 1);
        sprite.fill_text("ABC", 0.0, 0.0, Rgba::WHITE);
        let mut c = canvas(2, 1);
        c.draw_canvas(&sprite, PixelRect::new(0.0, 0.0, 24.0, 16.0), -8.0, 0.0);
        assert_eq!(c.cell(0, 0).unwrap().symbol, 'B');
        assert_eq!(c.cell(1, 0).unwrap().symbol, 'C');
    }

    #[test]
    fn draw_pixels_turns_blank_cells_into_half_blocks() {
        let mut pixels = PixelBuffer::new(1, 2);
        pixels.set_pixel(0, 0, Rgba::WHITE);
        pixels.set_pixel(0, 1, Rgba::rgb(255, 0, 0));

        let mut c = canvas(1, 1);
        c.draw_pixels(&pixels, PixelRect::new(0.0, 0.0, 8.0, 16.0), 1.0, BlendMode::Normal);
        let cell = c.cell(0, 0).unwrap();
        assert_eq!(cell.symbol, HALF_BLOCK);
        assert_eq!(cell.fg, Rgba::WHITE);
        assert_eq!(cell.bg, Rgba::rgb(255, 0, 0));
    }

    #[test]
    fn draw_pixels_keeps_glyphs() {
        let mut pixels = PixelBuffer::new(1, 1);
        pixels.set_pixel(0, 0, Rgba::WHITE);

        let mut c = canvas(1, 1);
        c.fill_text("Q", 0.0, 0.0, Rgba::BLACK);
        c.draw_pixels(&pixels, PixelRect::new(0.0, 0.0, 8.0, 16.0), 0.5, BlendMode::Normal);
        let cell = c.cell(0, 0).unwrap();
        assert_eq!(cell.symbol, 'Q');
        assert_eq!(cell.fg.r, 128);
    }

    #[test]
    fn draw_pixels_ignores_empty_sources() {
        let mut c = canvas(2, 2);
        let before = c.clone();
        let rect = PixelRect::new(0.0, 0.0, 16.0, 32.0);
        c.draw_pixels(&PixelBuffer::new(0, 0), rect, 1.0, BlendMode::Normal);
        assert_eq!(c, before);
    }

    #[test]
    fn resize_clears() {
        let mut c = canvas(2, 2);
        c.fill_text("AB", 0.0, 0.0, Rgba::WHITE);
        c.resize(c.viewport());
        assert!(c.cells().iter().all(Cell::is_blank));
        c.resize(Viewport::new(80, 32));
        assert_eq!((c.cols(), c.rows()), (10, 2));
    }
}
