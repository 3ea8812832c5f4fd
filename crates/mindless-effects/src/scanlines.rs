//! CRT scanline layer.

use mindless_core::Rgba;

use crate::canvas::{CellCanvas, HALF_BLOCK};

/// Shade painted over the lower pixel row of every cell (black at 25%).
pub const SCANLINE_SHADE: Rgba = Rgba::new(0, 0, 0, 64);

/// Darken every second pixel row.
///
/// A cell covers two pixel rows, so the lower half of each cell is shaded.
/// Glyph cells cannot split their foreground, so only their background is.
pub fn draw_scanlines(canvas: &mut CellCanvas) {
    for cell in canvas.cells_mut() {
        if cell.is_blank() || cell.symbol == HALF_BLOCK {
            let (upper, lower) = cell.halves();
            cell.symbol = HALF_BLOCK;
            cell.fg = upper;
            cell.bg = lower.blend(SCANLINE_SHADE, 1.0);
        } else {
            cell.bg = cell.bg.blend(SCANLINE_SHADE, 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::PixelRect;
    use mindless_core::CellMetrics;

    #[test]
    fn lower_halves_are_darker() {
        let mut canvas = CellCanvas::new(16, 16, CellMetrics::default());
        canvas.fill_rect(PixelRect::new(0.0, 0.0, 16.0, 16.0), Rgba::rgb(200, 200, 200));
        canvas.fill_text("A", 8.0, 0.0, Rgba::WHITE);
        draw_scanlines(&mut canvas);

        let plain = canvas.cell(0, 0).unwrap();
        assert_eq!(plain.symbol, HALF_BLOCK);
        assert_eq!(plain.fg, Rgba::rgb(200, 200, 200));
        assert!(plain.bg.r < 200);

        let glyph = canvas.cell(1, 0).unwrap();
        assert_eq!(glyph.symbol, 'A');
        assert_eq!(glyph.fg, Rgba::WHITE);
        assert!(glyph.bg.r < 200);
    }
}
