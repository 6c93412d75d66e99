//! Host drawing and viewport seams.

use crate::geometry::Vec2;

/// Straight-alpha RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// The FlashNet accent green.
    pub const FLASH_GREEN: Self = Self::rgb(0x00, 0xE0, 0x1F);

    #[inline]
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[inline]
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with alpha scaled by `t` in `[0, 1]`.
    #[must_use]
    pub fn with_opacity(self, t: f64) -> Self {
        let a = (self.a as f64 * t.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }
}

/// Stroke parameters for a polyline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokePaint {
    pub color: Rgba,
    pub line_width: f64,
    /// Round caps and joins; false means butt caps / miter joins.
    pub round: bool,
}

impl Default for StrokePaint {
    fn default() -> Self {
        Self {
            color: Rgba::FLASH_GREEN,
            line_width: 1.0,
            round: true,
        }
    }
}

/// A drawing surface that can clear itself and stroke polylines.
///
/// This is the only drawing capability the effect engines need. The browser
/// shim backs it with a 2D canvas context; tests back it with a recording
/// fake.
pub trait StrokeSurface {
    /// Erase the whole surface.
    fn clear(&mut self);

    /// Stroke one open polyline through `points` in order.
    fn stroke_polyline(&mut self, points: &[Vec2], paint: &StrokePaint);
}

/// Read-only view of the host viewport.
///
/// The one shared resource (scroll offset, size, pixel ratio); every
/// consumer reads, nobody but the host writes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub scroll_y: f64,
    /// Device pixel ratio as reported by the host, unclamped.
    pub dpr: f64,
}

impl Viewport {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            scroll_y: 0.0,
            dpr: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_opacity_scales_alpha() {
        let c = Rgba::FLASH_GREEN.with_opacity(0.5);
        assert_eq!(c.a, 128);
        assert_eq!((c.r, c.g, c.b), (0x00, 0xE0, 0x1F));
    }

    #[test]
    fn with_opacity_clamps() {
        assert_eq!(Rgba::FLASH_GREEN.with_opacity(7.0).a, 255);
        assert_eq!(Rgba::FLASH_GREEN.with_opacity(-1.0).a, 0);
    }

    #[test]
    fn default_paint_is_one_px_round_green() {
        let p = StrokePaint::default();
        assert_eq!(p.color, Rgba::FLASH_GREEN);
        assert_eq!(p.line_width, 1.0);
        assert!(p.round);
    }
}
