//! Film grain overlay for the logo.

use std::time::Duration;

use mindless_core::{DeviceClass, Noise, Throttle};

use crate::pixels::PixelBuffer;

/// Side length of the square grain buffer in pixels.
pub const GRAIN_SIZE_PX: u32 = 320;
/// Alpha of every grain pixel.
pub const GRAIN_ALPHA: u8 = 20;
/// Maximum deviation from mid gray.
pub const GRAIN_AMPLITUDE: f32 = 15.0;

/// Repaints a fixed-size buffer of low-contrast gray noise.
#[derive(Debug)]
pub struct GrainRenderer {
    buffer: PixelBuffer,
    throttle: Throttle,
    noise: Noise,
}

impl GrainRenderer {
    pub fn new(device: DeviceClass) -> Self {
        Self::with_noise(device, Noise::new())
    }

    /// Create a renderer with a specific noise source.
    pub fn with_noise(device: DeviceClass, noise: Noise) -> Self {
        Self {
            buffer: PixelBuffer::new(GRAIN_SIZE_PX, GRAIN_SIZE_PX),
            throttle: Throttle::new(device.noise_interval()),
            noise,
        }
    }

    /// Frame callback. Repaints if the throttle allows; returns whether it did.
    pub fn on_frame(&mut self, now: Duration) -> bool {
        if !self.throttle.ready(now) {
            return false;
        }
        self.render();
        true
    }

    /// Fill the buffer with fresh grain.
    pub fn render(&mut self) {
        for px in self.buffer.data_mut().chunks_exact_mut(4) {
            let grain = self.noise.range(-GRAIN_AMPLITUDE, GRAIN_AMPLITUDE);
            let v = (128.0 + grain).round().clamp(0.0, 255.0) as u8;
            px.copy_from_slice(&[v, v, v, GRAIN_ALPHA]);
        }
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }
}
