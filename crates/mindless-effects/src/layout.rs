//! Placement of the logo, wordmark and caption.
//!
//! Offsets are tuned for an 800 px tall page. Shorter viewports (most
//! terminals) scale them down so everything stays on screen.

use mindless_core::{MOBILE_BREAKPOINT_PX, Viewport};

use crate::canvas::PixelRect;

/// Page height the vertical offsets were designed for.
pub const REFERENCE_HEIGHT_PX: f32 = 800.0;

/// Logo image center relative to the viewport center.
const LOGO_OFFSET_PX: f32 = -128.0;
/// Wordmark baseline relative to the viewport center.
const WORDMARK_OFFSET_PX: f32 = 160.0;
/// Caption baseline relative to the viewport center.
const CAPTION_OFFSET_PX: f32 = 200.0;

/// Width at which the logo image reaches its largest size.
const LARGE_BREAKPOINT_PX: u32 = 1024;

/// Resolved positions for one viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplashLayout {
    viewport: Viewport,
    scale: f32,
}

impl SplashLayout {
    pub fn new(viewport: Viewport) -> Self {
        let scale = (viewport.height as f32 / REFERENCE_HEIGHT_PX).min(1.0);
        Self { viewport, scale }
    }

    /// Vertical scale applied to offsets, in `[0, 1]`.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn center_x(&self) -> f32 {
        self.viewport.center().0
    }

    /// Baseline of the wordmark text.
    pub fn wordmark_baseline(&self) -> f32 {
        self.viewport.center().1 + WORDMARK_OFFSET_PX * self.scale
    }

    /// Baseline of the typewriter caption.
    pub fn caption_baseline(&self) -> f32 {
        self.viewport.center().1 + CAPTION_OFFSET_PX * self.scale
    }

    /// Display width of the logo image before vertical scaling.
    pub fn logo_width(&self) -> f32 {
        match self.viewport.width {
            w if w < MOBILE_BREAKPOINT_PX => 192.0,
            w if w < LARGE_BREAKPOINT_PX => 256.0,
            _ => 320.0,
        }
    }

    /// Rectangle of the logo image for a given height/width ratio.
    pub fn logo_rect(&self, aspect: f32) -> PixelRect {
        let (cx, cy) = self.viewport.center();
        let width = self.logo_width() * self.scale;
        let height = width * aspect;
        let center_y = cy + LOGO_OFFSET_PX * self.scale;
        PixelRect::new(cx - width / 2.0, center_y - height / 2.0, width, height)
    }
}
