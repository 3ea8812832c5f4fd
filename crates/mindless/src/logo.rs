//! Logo image loading.

use std::path::Path;

use mindless_core::Rgba;
use mindless_effects::PixelBuffer;
use mindless_fonts::{GLYPH_HEIGHT, glyph_pixel, glyph_width};

/// Letter drawn by the built-in emblem.
const EMBLEM_LETTER: char = 'M';
/// Pixels per glyph dot in the emblem.
const EMBLEM_DOT_PX: u32 = 8;
/// Empty glyph dots around the letter.
const EMBLEM_MARGIN: u32 = 1;
const EMBLEM_BACKGROUND: Rgba = Rgba::from_hex(0x0F172A);
const EMBLEM_FOREGROUND: Rgba = Rgba::from_hex(0x3B82F6);

/// Load the configured logo, or the built-in emblem when there is none or it
/// cannot be decoded.
pub fn load_logo(path: Option<&Path>) -> PixelBuffer {
    let Some(path) = path else {
        return emblem();
    };
    match image::open(path) {
        Ok(img) => {
            let rgba = img.to_rgba8();
            let (width, height) = rgba.dimensions();
            match PixelBuffer::from_rgba(width, height, rgba.into_raw()) {
                Some(buffer) if !buffer.is_empty() => {
                    tracing::info!(path = %path.display(), width, height, "loaded logo");
                    buffer
                }
                _ => {
                    tracing::warn!(path = %path.display(), "logo image is empty, using emblem");
                    emblem()
                }
            }
        }
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "could not load logo, using emblem"
            );
            emblem()
        }
    }
}

/// Rasterize the block-font letter onto a dark square.
pub fn emblem() -> PixelBuffer {
    let glyph_cols = glyph_width(EMBLEM_LETTER) as u32;
    let glyph_rows = GLYPH_HEIGHT as u32;
    let side = (glyph_cols.max(glyph_rows) + 2 * EMBLEM_MARGIN) * EMBLEM_DOT_PX;
    let left = (side - glyph_cols * EMBLEM_DOT_PX) / 2;
    let top = (side - glyph_rows * EMBLEM_DOT_PX) / 2;

    let mut buffer = PixelBuffer::new(side, side);
    for y in 0..side {
        for x in 0..side {
            let lit = x >= left
                && y >= top
                && glyph_pixel(
                    EMBLEM_LETTER,
                    ((x - left) / EMBLEM_DOT_PX) as usize,
                    ((y - top) / EMBLEM_DOT_PX) as usize,
                );
            let color = if lit {
                EMBLEM_FOREGROUND
            } else {
                EMBLEM_BACKGROUND
            };
            buffer.set_pixel(x, y, color);
        }
    }
    buffer
}

/// Height over width, for layout.
pub fn aspect(logo: &PixelBuffer) -> f32 {
    if logo.width() == 0 {
        return 1.0;
    }
    logo.height() as f32 / logo.width() as f32
}
