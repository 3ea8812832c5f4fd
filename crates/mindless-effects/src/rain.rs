//! Matrix rain with glitching text (stateful).
//!
//! Every tick fades the canvas, copies the wordmark and caption one rain
//! column at a time, tears the slice a drop is passing through, and then
//! drops one random glyph per column.

use std::time::Duration;

use mindless_core::{CellMetrics, DeviceClass, Noise, Rgba, Throttle, Viewport};

use crate::canvas::{CellCanvas, PixelRect};
use crate::chars::RAIN_GLYPHS;
use crate::layout::SplashLayout;
use crate::sprite::{CAPTION_PAD_PX, SpriteCache, TextSprite, WORDMARK_PAD_PX, WordmarkSize};
use crate::typewriter::SharedCaption;

/// Black at 8% opacity, painted over everything each tick.
pub const TRAIL_FADE: Rgba = Rgba::new(0, 0, 0, 20);
/// Usual rain glyph color.
pub const RAIN_COLOR: Rgba = Rgba::from_hex(0x60A5FA);
/// Occasional bright glyph color.
pub const HIGHLIGHT_COLOR: Rgba = Rgba::WHITE;
/// A glyph is bright when a uniform sample exceeds this.
const HIGHLIGHT_THRESHOLD: f32 = 0.98;
/// A drop below the canvas restarts when a uniform sample exceeds this.
const RESET_THRESHOLD: f32 = 0.975;

/// Horizontal and vertical extent of one distortable text line.
#[derive(Debug, Clone, Copy)]
struct TextBand {
    /// Left edge of the text on screen.
    start_x: f32,
    /// Columns this far left of `start_x` still take part.
    lead: f32,
    /// Columns this far right of the text end still take part.
    trail: f32,
    /// Added to the screen offset to get the sprite x coordinate.
    src_shift: f32,
    /// Top of the sprite on screen.
    top: f32,
    /// Lowest drop position that still tears the text.
    bottom: f32,
    /// Height of a torn slice, in rain font sizes.
    band_fonts: f32,
    /// Largest horizontal tear displacement in pixels.
    max_offset: f32,
}

impl TextBand {
    fn wordmark(layout: &SplashLayout, sprite: &TextSprite) -> Self {
        let baseline = layout.wordmark_baseline();
        Self {
            start_x: layout.center_x() - sprite.text_width() / 2.0 - WORDMARK_PAD_PX,
            lead: 0.0,
            trail: 2.0 * WORDMARK_PAD_PX,
            src_shift: 0.0,
            top: baseline - sprite.text_height(),
            bottom: baseline + 10.0,
            band_fonts: 2.0,
            max_offset: 6.0,
        }
    }

    fn caption(layout: &SplashLayout, sprite: &TextSprite) -> Self {
        let baseline = layout.caption_baseline();
        Self {
            start_x: layout.center_x() - sprite.text_width() / 2.0,
            lead: 2.0 * CAPTION_PAD_PX,
            trail: 2.0 * CAPTION_PAD_PX,
            src_shift: 2.0 * CAPTION_PAD_PX,
            top: baseline - sprite.text_height(),
            bottom: baseline + CAPTION_PAD_PX,
            band_fonts: 1.5,
            max_offset: 4.0,
        }
    }
}

/// Rain and text distortion state.
#[derive(Debug)]
pub struct RainRenderer {
    canvas: CellCanvas,
    caption: SharedCaption,
    sprites: SpriteCache,
    font_size: u32,
    drops: Vec<u32>,
    throttle: Throttle,
    noise: Noise,
}

impl RainRenderer {
    pub fn new(
        viewport: Viewport,
        metrics: CellMetrics,
        device: DeviceClass,
        wordmark: (&str, &str),
        caption: SharedCaption,
    ) -> Self {
        Self::with_noise(viewport, metrics, device, wordmark, caption, Noise::new())
    }

    /// Create a renderer with a specific noise source.
    pub fn with_noise(
        viewport: Viewport,
        metrics: CellMetrics,
        device: DeviceClass,
        wordmark: (&str, &str),
        caption: SharedCaption,
        noise: Noise,
    ) -> Self {
        let font_size = device.rain_font_size();
        let columns = viewport.width.div_ceil(font_size) as usize;
        Self {
            canvas: CellCanvas::for_viewport(viewport, metrics),
            caption,
            sprites: SpriteCache::new(wordmark.0, wordmark.1, metrics),
            font_size,
            drops: vec![1; columns],
            throttle: Throttle::new(device.rain_interval()),
            noise,
        }
    }

    /// Resize listener. Resizing clears the canvas; the columns follow on the
    /// next tick.
    pub fn resize(&mut self, viewport: Viewport) {
        self.canvas.resize(viewport);
    }

    /// Frame callback. Ticks if the throttle allows; returns whether it did.
    pub fn on_frame(&mut self, now: Duration) -> bool {
        if !self.throttle.ready(now) {
            return false;
        }
        self.tick();
        true
    }

    pub fn canvas(&self) -> &CellCanvas {
        &self.canvas
    }

    /// Fall position of every column, in rows.
    pub fn drops(&self) -> &[u32] {
        &self.drops
    }

    pub fn columns(&self) -> usize {
        self.drops.len()
    }

    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    /// Advance the animation by one step.
    pub fn tick(&mut self) {
        let width = self.canvas.width();
        let height = self.canvas.height();
        let font = self.font_size as f32;

        self.canvas.fill_rect(
            PixelRect::new(0.0, 0.0, width as f32, height as f32),
            TRAIL_FADE,
        );

        let columns = width.div_ceil(self.font_size) as usize;
        if columns != self.drops.len() {
            tracing::debug!(from = self.drops.len(), to = columns, "rain columns recalculated");
            self.drops = vec![1; columns];
        }

        let layout = SplashLayout::new(self.canvas.viewport());
        self.caption.with(|text| {
            self.sprites.refresh(WordmarkSize::for_width(width), text);
        });
        let wordmark = self.sprites.wordmark();
        let caption = self.sprites.caption();

        let wordmark_band = TextBand::wordmark(&layout, wordmark);
        let caption_band = TextBand::caption(&layout, caption);

        for (i, drop) in self.drops.iter_mut().enumerate() {
            let glyph = RAIN_GLYPHS[self.noise.index(RAIN_GLYPHS.len())];
            let drop_x = i as f32 * font;
            let drop_y = *drop as f32 * font;

            for (sprite, band) in [(wordmark, &wordmark_band), (caption, &caption_band)] {
                distort_column(
                    &mut self.canvas,
                    sprite,
                    band,
                    (drop_x, drop_y),
                    font,
                    &mut self.noise,
                );
            }

            let color = if self.noise.next_f32() > HIGHLIGHT_THRESHOLD {
                HIGHLIGHT_COLOR
            } else {
                RAIN_COLOR
            };
            // the drop position is the glyph baseline; the cell above it holds the glyph
            let mut buf = [0u8; 4];
            self.canvas.fill_text(glyph.encode_utf8(&mut buf), drop_x, drop_y - font, color);

            if drop_y > height as f32 && self.noise.next_f32() > RESET_THRESHOLD {
                *drop = 0;
            }
            *drop += 1;
        }
    }
}

/// Copy the text slice under one rain column and tear it where the drop is.
fn distort_column(
    canvas: &mut CellCanvas,
    sprite: &TextSprite,
    band: &TextBand,
    (drop_x, drop_y): (f32, f32),
    font: f32,
    noise: &mut Noise,
) {
    let end_x = band.start_x + sprite.text_width() + band.trail;
    if drop_x < band.start_x - band.lead || drop_x >= end_x {
        return;
    }
    let src_x = drop_x - band.start_x + band.src_shift;
    if src_x < 0.0 || src_x >= sprite.width() {
        return;
    }

    let source = sprite.canvas();
    let sprite_height = sprite.height();
    canvas.draw_canvas(
        source,
        PixelRect::new(src_x, 0.0, font, sprite_height),
        drop_x,
        band.top,
    );

    let over_text = drop_y > band.top - font && drop_y < band.bottom;
    if !over_text {
        return;
    }
    let src_y = (drop_y - band.top).max(0.0);
    let src_h = (sprite_height - src_y).min(font * band.band_fonts);
    if src_h > 0.0 && src_y < sprite_height {
        let offset = (noise.next_f32() - 0.5) * 2.0 * band.max_offset;
        let offset = snap_to_cells(offset, canvas.metrics().width as f32, noise);
        canvas.draw_canvas(
            source,
            PixelRect::new(src_x, src_y, font, src_h),
            drop_x + offset,
            band.top + src_y,
        );
    }
}

/// Stochastically round a pixel offset to whole cells, keeping its mean so
/// offsets smaller than a cell still tear now and then.
fn snap_to_cells(offset: f32, cell: f32, noise: &mut Noise) -> f32 {
    if cell <= 0.0 {
        return offset;
    }
    (offset / cell + noise.next_f32()).floor() * cell
}
