//! Visual effects for the mindless splash screen.
//!
//! Every effect is a small state machine driven by the frame loop through a
//! [`FrameScheduler`]: stateless noise layers (grain, static) that repaint a
//! pixel buffer on a throttle, the stateful matrix rain that tears the
//! wordmark and caption, and the typewriter that feeds the caption.

mod canvas;
mod chars;
mod grain;
mod layout;
mod pixels;
mod rain;
mod scanlines;
mod scheduler;
mod sprite;
mod static_noise;
mod typewriter;

pub use canvas::{BlendMode, Cell, CellCanvas, HALF_BLOCK, PixelRect};
pub use chars::RAIN_GLYPHS;
pub use grain::{GRAIN_ALPHA, GRAIN_AMPLITUDE, GRAIN_SIZE_PX, GrainRenderer};
pub use layout::{REFERENCE_HEIGHT_PX, SplashLayout};
pub use pixels::PixelBuffer;
pub use rain::{HIGHLIGHT_COLOR, RAIN_COLOR, RainRenderer, TRAIL_FADE};
pub use scanlines::{SCANLINE_SHADE, draw_scanlines};
pub use scheduler::{FrameScheduler, Subscription};
pub use sprite::{
    ACCENT_COLOR, CAPTION_COLOR, SpriteCache, TextSprite, WORDMARK_COLOR, WordmarkSize,
};
pub use static_noise::StaticRenderer;
pub use typewriter::{Phase, SharedCaption, Typewriter, TypewriterTiming};
