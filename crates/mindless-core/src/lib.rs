//! Core types shared across the mindless crates.
//!
//! Everything here is a plain value type: colors, viewport geometry, the
//! per-device timing table, frame throttling, the noise source used by the
//! renderers and the easing curves behind the splash transitions.

mod color;
mod noise;
mod throttle;
mod transition;
mod viewport;

pub use color::Rgba;
pub use noise::Noise;
pub use throttle::Throttle;
pub use transition::{CubicBezier, Presence, Transition};
pub use viewport::{CellMetrics, DeviceClass, MOBILE_BREAKPOINT_PX, Viewport};
