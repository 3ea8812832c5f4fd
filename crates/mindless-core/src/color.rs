//! RGBA colors and the two blend modes the splash needs.

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

    /// Create a color from its four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create an opaque color from a `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Self::rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Return the same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Source-over composite of `src` onto `self`.
    ///
    /// `opacity` multiplies the source alpha, the way a CSS `opacity` on the
    /// source layer would. The result keeps the destination alpha.
    pub fn blend(self, src: Rgba, opacity: f32) -> Rgba {
        let alpha = (src.a as f32 / 255.0) * opacity.clamp(0.0, 1.0);
        Rgba {
            r: mix(self.r, src.r, alpha),
            g: mix(self.g, src.g, alpha),
            b: mix(self.b, src.b, alpha),
            a: self.a,
        }
    }

    /// `mix-blend-mode: overlay` of `src` onto `self`, then composited with
    /// the source alpha scaled by `opacity`.
    pub fn overlay(self, src: Rgba, opacity: f32) -> Rgba {
        let blended = Rgba {
            r: overlay_channel(self.r, src.r),
            g: overlay_channel(self.g, src.g),
            b: overlay_channel(self.b, src.b),
            a: src.a,
        };
        self.blend(blended, opacity)
    }

    /// Scale the color channels towards black.
    pub fn dim(self, factor: f32) -> Rgba {
        self.blend(Rgba::BLACK, 1.0 - factor.clamp(0.0, 1.0))
    }
}

fn mix(dst: u8, src: u8, alpha: f32) -> u8 {
    (dst as f32 * (1.0 - alpha) + src as f32 * alpha)
        .round()
        .clamp(0.0, 255.0) as u8
}

fn overlay_channel(base: u8, top: u8) -> u8 {
    let b = base as f32 / 255.0;
    let t = top as f32 / 255.0;
    let v = if b < 0.5 {
        2.0 * b * t
    } else {
        1.0 - 2.0 * (1.0 - b) * (1.0 - t)
    };
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_literals_unpack() {
        assert_eq!(Rgba::from_hex(0x3B82F6), Rgba::rgb(0x3B, 0x82, 0xF6));
        assert_eq!(Rgba::from_hex(0x60A5FA).a, 255);
    }

    #[test]
    fn blend_respects_alpha_and_opacity() {
        let dst = Rgba::WHITE;
        assert_eq!(dst.blend(Rgba::BLACK, 0.0), Rgba::WHITE);
        assert_eq!(dst.blend(Rgba::BLACK, 1.0), Rgba::BLACK);
        assert_eq!(dst.blend(Rgba::BLACK.with_alpha(0), 1.0), Rgba::WHITE);

        let half = dst.blend(Rgba::BLACK, 0.5);
        assert_eq!(half.r, 128);
    }

    #[test]
    fn overlay_with_mid_gray_is_close_to_identity() {
        let base = Rgba::rgb(200, 40, 128);
        let out = base.overlay(Rgba::rgb(128, 128, 128), 1.0);
        assert!(out.r.abs_diff(base.r) <= 2);
        assert!(out.g.abs_diff(base.g) <= 2);
        assert!(out.b.abs_diff(base.b) <= 2);
    }

    #[test]
    fn dim_towards_black() {
        assert_eq!(Rgba::WHITE.dim(0.0), Rgba::BLACK);
        assert_eq!(Rgba::WHITE.dim(1.0), Rgba::WHITE);
        assert_eq!(Rgba::WHITE.dim(0.75), Rgba::rgb(191, 191, 191));
    }
}
