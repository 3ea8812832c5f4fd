//! Viewport geometry and the device-class timing table.

use std::time::Duration;

/// Viewports narrower than this are treated as mobile.
pub const MOBILE_BREAKPOINT_PX: u32 = 768;

/// Size of the drawing area in virtual pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Create a viewport of the given pixel size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Center point in pixels.
    pub fn center(&self) -> (f32, f32) {
        (self.width as f32 / 2.0, self.height as f32 / 2.0)
    }

    /// Scale both dimensions, truncating like a canvas size assignment does.
    pub fn scaled(&self, scale: f32) -> Viewport {
        Viewport {
            width: (self.width as f32 * scale) as u32,
            height: (self.height as f32 * scale) as u32,
        }
    }
}

/// Pixel size of one terminal cell.
///
/// All effect geometry is computed in virtual pixels; these metrics map it
/// onto the terminal grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMetrics {
    pub width: u16,
    pub height: u16,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            width: 8,
            height: 16,
        }
    }
}

impl CellMetrics {
    /// Create cell metrics, never smaller than one pixel per side.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Viewport covered by a terminal of `cols × rows` cells.
    pub fn viewport(&self, cols: u16, rows: u16) -> Viewport {
        Viewport::new(
            cols as u32 * self.width as u32,
            rows as u32 * self.height as u32,
        )
    }

    /// Number of cells needed to cover `width × height` pixels.
    pub fn grid_for(&self, width: u32, height: u32) -> (u16, u16) {
        let cols = width.div_ceil(self.width as u32);
        let rows = height.div_ceil(self.height as u32);
        (
            cols.min(u16::MAX as u32) as u16,
            rows.min(u16::MAX as u32) as u16,
        )
    }

    /// Column containing the pixel x coordinate.
    pub fn col_at(&self, x: f32) -> i32 {
        (x / self.width as f32).floor() as i32
    }

    /// Row containing the pixel y coordinate.
    pub fn row_at(&self, y: f32) -> i32 {
        (y / self.height as f32).floor() as i32
    }
}

/// Device class, which picks the per-renderer cadence and resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeviceClass {
    #[default]
    Desktop,
    Mobile,
}

impl DeviceClass {
    /// Classify a viewport by its width.
    pub fn detect(viewport: Viewport) -> Self {
        if viewport.width < MOBILE_BREAKPOINT_PX {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }

    /// Repaint interval of the grain and static overlays.
    pub fn noise_interval(self) -> Duration {
        match self {
            DeviceClass::Desktop => Duration::from_millis(50),
            DeviceClass::Mobile => Duration::from_millis(100),
        }
    }

    /// Repaint interval of the matrix rain.
    pub fn rain_interval(self) -> Duration {
        match self {
            DeviceClass::Desktop => Duration::from_millis(33),
            DeviceClass::Mobile => Duration::from_millis(50),
        }
    }

    /// Rain font size in pixels; larger means fewer columns.
    pub fn rain_font_size(self) -> u32 {
        match self {
            DeviceClass::Desktop => 16,
            DeviceClass::Mobile => 20,
        }
    }

    /// Resolution scale of the static overlay buffer.
    pub fn static_scale(self) -> f32 {
        match self {
            DeviceClass::Desktop => 1.0,
            DeviceClass::Mobile => 0.5,
        }
    }
}
