//! Full-screen TV static.

use std::time::Duration;

use mindless_core::{DeviceClass, Noise, Throttle, Viewport};

use crate::pixels::PixelBuffer;

/// Repaints a viewport-sized buffer of opaque gray noise.
///
/// On mobile the buffer is half resolution; it is stretched back over the
/// viewport when composited.
#[derive(Debug)]
pub struct StaticRenderer {
    buffer: PixelBuffer,
    scale: f32,
    throttle: Throttle,
    noise: Noise,
}

impl StaticRenderer {
    pub fn new(viewport: Viewport, device: DeviceClass) -> Self {
        Self::with_noise(viewport, device, Noise::new())
    }

    /// Create a renderer with a specific noise source.
    pub fn with_noise(viewport: Viewport, device: DeviceClass, noise: Noise) -> Self {
        let scale = device.static_scale();
        Self {
            buffer: PixelBuffer::for_viewport(viewport.scaled(scale)),
            scale,
            throttle: Throttle::new(device.noise_interval()),
            noise,
        }
    }

    /// Resize listener: recompute the buffer for the new viewport.
    pub fn resize(&mut self, viewport: Viewport) {
        let size = viewport.scaled(self.scale);
        tracing::debug!(width = size.width, height = size.height, "static buffer resized");
        self.buffer = PixelBuffer::for_viewport(size);
    }

    /// Frame callback. Repaints if the throttle allows; returns whether it did.
    pub fn on_frame(&mut self, now: Duration) -> bool {
        if !self.throttle.ready(now) {
            return false;
        }
        self.render();
        true
    }

    /// Fill the buffer with fresh static.
    pub fn render(&mut self) {
        for px in self.buffer.data_mut().chunks_exact_mut(4) {
            let v = (self.noise.next_f32() * 255.0).round() as u8;
            px.copy_from_slice(&[v, v, v, 255]);
        }
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }
}
