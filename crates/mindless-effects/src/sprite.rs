//! Offscreen text sprites that the rain slices and tears.

use mindless_core::{CellMetrics, MOBILE_BREAKPOINT_PX, Rgba};
use mindless_fonts::{ART_ROWS, LETTER_SPACING, block_width, build_block_art};

use crate::canvas::CellCanvas;

/// Primary wordmark color.
pub const WORDMARK_COLOR: Rgba = Rgba::WHITE;
/// Wordmark accent color.
pub const ACCENT_COLOR: Rgba = Rgba::from_hex(0x3B82F6);
/// Caption color.
pub const CAPTION_COLOR: Rgba = Rgba::from_hex(0x60A5FA);

/// Left padding of the wordmark inside its sprite.
pub const WORDMARK_PAD_PX: f32 = 10.0;
/// Left padding of the caption inside its sprite.
pub const CAPTION_PAD_PX: f32 = 5.0;

const WORDMARK_SPRITE_WIDTH_PX: u32 = 600;
const WORDMARK_SPRITE_EXTRA_HEIGHT_PX: u32 = 20;
const CAPTION_SPRITE_WIDTH_PX: u32 = 300;
const CAPTION_SPRITE_EXTRA_HEIGHT_PX: u32 = 10;

/// Typeface used for the wordmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordmarkSize {
    /// Three-row block letters.
    Block,
    /// Plain one-row text.
    Plain,
}

impl WordmarkSize {
    /// Block letters once the canvas is at least tablet wide.
    pub fn for_width(width: u32) -> Self {
        if width >= MOBILE_BREAKPOINT_PX {
            WordmarkSize::Block
        } else {
            WordmarkSize::Plain
        }
    }
}

/// Pre-rendered text plus its measured extent.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSprite {
    canvas: CellCanvas,
    text_width: f32,
    text_height: f32,
}

impl TextSprite {
    /// Render the two-color wordmark.
    pub fn wordmark(primary: &str, accent: &str, size: WordmarkSize, metrics: CellMetrics) -> Self {
        let cw = metrics.width as f32;
        let full = format!("{primary}{accent}");

        let (text_cols, text_rows) = match size {
            WordmarkSize::Block => (block_width(&full), ART_ROWS),
            WordmarkSize::Plain => (full.chars().count(), 1),
        };
        let text_width = text_cols as f32 * cw;
        let text_height = (text_rows * metrics.height as usize) as f32;

        let width =
            WORDMARK_SPRITE_WIDTH_PX.max((text_width + 2.0 * WORDMARK_PAD_PX).ceil() as u32);
        let height = text_height as u32 + WORDMARK_SPRITE_EXTRA_HEIGHT_PX;
        let mut canvas = CellCanvas::new(width, height, metrics);

        match size {
            WordmarkSize::Block => {
                let accent_col = if primary.is_empty() {
                    0
                } else {
                    block_width(primary) + LETTER_SPACING
                };
                let left = metrics.col_at(WORDMARK_PAD_PX);
                for (row, line) in build_block_art(&full).iter().enumerate() {
                    for (i, ch) in line.chars().enumerate() {
                        if ch == ' ' {
                            continue;
                        }
                        let color = if i < accent_col {
                            WORDMARK_COLOR
                        } else {
                            ACCENT_COLOR
                        };
                        if let Some(cell) = canvas.cell_mut(left + i as i32, row as i32) {
                            cell.symbol = ch;
                            cell.fg = color;
                        }
                    }
                }
            }
            WordmarkSize::Plain => {
                canvas.fill_text(primary, WORDMARK_PAD_PX, 0.0, WORDMARK_COLOR);
                let accent_x = WORDMARK_PAD_PX + primary.chars().count() as f32 * cw;
                canvas.fill_text(accent, accent_x, 0.0, ACCENT_COLOR);
            }
        }

        Self {
            canvas,
            text_width,
            text_height,
        }
    }

    /// Render the caption line as `> text_`.
    pub fn caption(text: &str, metrics: CellMetrics) -> Self {
        let line = format!("> {text}_");
        let text_width = line.chars().count() as f32 * metrics.width as f32;
        let text_height = metrics.height as f32;

        let width = CAPTION_SPRITE_WIDTH_PX.max((text_width + 2.0 * CAPTION_PAD_PX).ceil() as u32);
        let height = text_height as u32 + CAPTION_SPRITE_EXTRA_HEIGHT_PX;
        let mut canvas = CellCanvas::new(width, height, metrics);
        canvas.fill_text(&line, CAPTION_PAD_PX, 0.0, CAPTION_COLOR);

        Self {
            canvas,
            text_width,
            text_height,
        }
    }

    pub fn canvas(&self) -> &CellCanvas {
        &self.canvas
    }

    /// Measured width of the text itself.
    pub fn text_width(&self) -> f32 {
        self.text_width
    }

    /// Height of one line of the text.
    pub fn text_height(&self) -> f32 {
        self.text_height
    }

    /// Width of the whole sprite.
    pub fn width(&self) -> f32 {
        self.canvas.width() as f32
    }

    /// Height of the whole sprite.
    pub fn height(&self) -> f32 {
        self.canvas.height() as f32
    }
}

/// Keeps both sprites and rebuilds them only when their inputs change.
///
/// Rebuilding every tick would give the same pixels; caching just skips the
/// work while the caption is unchanged.
#[derive(Debug, Clone)]
pub struct SpriteCache {
    primary: String,
    accent: String,
    metrics: CellMetrics,
    wordmark: (WordmarkSize, TextSprite),
    caption: (String, TextSprite),
}

impl SpriteCache {
    pub fn new(primary: &str, accent: &str, metrics: CellMetrics) -> Self {
        let size = WordmarkSize::Plain;
        Self {
            primary: primary.to_string(),
            accent: accent.to_string(),
            metrics,
            wordmark: (size, TextSprite::wordmark(primary, accent, size, metrics)),
            caption: (String::new(), TextSprite::caption("", metrics)),
        }
    }

    /// Make sure both sprites match `size` and `caption`.
    pub fn refresh(&mut self, size: WordmarkSize, caption: &str) {
        if self.wordmark.0 != size {
            self.wordmark = (
                size,
                TextSprite::wordmark(&self.primary, &self.accent, size, self.metrics),
            );
        }
        if self.caption.0 != caption {
            self.caption = (caption.to_string(), TextSprite::caption(caption, self.metrics));
        }
    }

    pub fn wordmark(&self) -> &TextSprite {
        &self.wordmark.1
    }

    pub fn caption(&self) -> &TextSprite {
        &self.caption.1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(sprite: &TextSprite, row: i32) -> String {
        let canvas = sprite.canvas();
        (0..canvas.cols() as i32)
            .map(|col| canvas.cell(col, row).unwrap().symbol)
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    #[test]
    fn plain_wordmark_is_two_colored() {
        let m = CellMetrics::default();
        let sprite = TextSprite::wordmark("MINDLESS", ".PR", WordmarkSize::Plain, m);
        assert_eq!(row_text(&sprite, 0), " MINDLESS.PR");
        assert_eq!(sprite.text_width(), 11.0 * 8.0);
        assert_eq!(sprite.text_height(), 16.0);
        assert_eq!(sprite.width(), 600.0);

        let canvas = sprite.canvas();
        assert_eq!(canvas.cell(1, 0).unwrap().fg, WORDMARK_COLOR);
        assert_eq!(canvas.cell(9, 0).unwrap().fg, ACCENT_COLOR);
    }

    #[test]
    fn block_wordmark_spans_three_rows() {
        let m = CellMetrics::default();
        let sprite = TextSprite::wordmark("MINDLESS", ".PR", WordmarkSize::Block, m);
        assert_eq!(sprite.text_height(), 48.0);
        assert_eq!(sprite.text_width(), 61.0 * 8.0);
        for row in 0..3 {
            assert!(!row_text(&sprite, row).is_empty());
        }
        assert!(row_text(&sprite, 3).is_empty());

        // the first lit cell is white, the last lit cell is the accent
        let canvas = sprite.canvas();
        let lit: Vec<_> = canvas.cells().iter().filter(|c| !c.is_blank()).collect();
        assert_eq!(lit.first().unwrap().fg, WORDMARK_COLOR);
        assert_eq!(lit.last().unwrap().fg, ACCENT_COLOR);
    }

    #[test]
    fn long_wordmarks_widen_the_sprite() {
        let m = CellMetrics::default();
        let text = "A".repeat(100);
        let sprite = TextSprite::wordmark(&text, "", WordmarkSize::Block, m);
        assert!(sprite.width() >= sprite.text_width() + 2.0 * WORDMARK_PAD_PX);
    }

    #[test]
    fn caption_has_prompt_and_cursor() {
        let m = CellMetrics::default();
        let sprite = TextSprite::caption("COMING", m);
        assert_eq!(row_text(&sprite, 0), "> COMING_");
        assert_eq!(sprite.text_width(), 9.0 * 8.0);
        assert_eq!(sprite.width(), 300.0);
    }

    #[test]
    fn cache_matches_fresh_render() {
        let m = CellMetrics::default();
        let mut cache = SpriteCache::new("MINDLESS", ".PR", m);
        cache.refresh(WordmarkSize::Block, "COMING SO");

        assert_eq!(
            cache.wordmark(),
            &TextSprite::wordmark("MINDLESS", ".PR", WordmarkSize::Block, m)
        );
        assert_eq!(cache.caption(), &TextSprite::caption("COMING SO", m));

        cache.refresh(WordmarkSize::Plain, "");
        assert_eq!(cache.caption(), &TextSprite::caption("", m));
        assert_eq!(cache.wordmark().text_height(), 16.0);
    }

    #[test]
    fn size_breakpoint() {
        assert_eq!(WordmarkSize::for_width(767), WordmarkSize::Plain);
        assert_eq!(WordmarkSize::for_width(768), WordmarkSize::Block);
    }
}
