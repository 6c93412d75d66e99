//! Continuous 2D geometry.
//!
//! Effects operate in continuous coordinates (css-pixel space in the
//! original page, sub-cell space on a painter), so everything here is `f64`.

/// A 2D point or displacement.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise translation.
    #[inline]
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl core::ops::Add for Vec2 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl core::ops::Mul<f64> for Vec2 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// An axis-aligned rectangle in continuous coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectF {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RectF {
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle grown by `amount` on every side (shrunk when negative).
    ///
    /// Width/height never go below zero.
    #[must_use]
    pub fn inflate(self, amount: f64) -> Self {
        Self {
            x: self.x - amount,
            y: self.y - amount,
            width: (self.width + 2.0 * amount).max(0.0),
            height: (self.height + 2.0 * amount).max(0.0),
        }
    }

    #[inline]
    #[must_use]
    pub fn center(self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// True when the rectangle has no area.
    #[inline]
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// True when `p` lies inside (inclusive of the top/left edge).
    #[must_use]
    pub fn contains(self, p: Vec2) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn inflate_grows_symmetrically() {
        let r = RectF::new(10.0, 20.0, 100.0, 50.0).inflate(60.0);
        assert_eq!(r.x, -50.0);
        assert_eq!(r.y, -40.0);
        assert_eq!(r.width, 220.0);
        assert_eq!(r.height, 170.0);
    }

    #[test]
    fn inflate_never_goes_negative() {
        let r = RectF::new(0.0, 0.0, 10.0, 10.0).inflate(-20.0);
        assert_eq!(r.width, 0.0);
        assert_eq!(r.height, 0.0);
        assert!(r.is_empty());
    }

    #[test]
    fn center_of_rect() {
        let c = RectF::new(0.0, 0.0, 10.0, 4.0).center();
        assert_eq!(c, Vec2::new(5.0, 2.0));
    }

    #[test]
    fn contains_is_half_open() {
        let r = RectF::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Vec2::new(0.0, 0.0)));
        assert!(!r.contains(Vec2::new(10.0, 10.0)));
    }

    proptest! {
        #[test]
        fn inflate_keeps_sizes_non_negative(
            w in 0.0f64..1e4, h in 0.0f64..1e4, amount in -1e4f64..1e4
        ) {
            let r = RectF::new(0.0, 0.0, w, h).inflate(amount);
            prop_assert!(r.width >= 0.0 && r.height >= 0.0);
        }

        #[test]
        fn inflate_preserves_the_center(
            x in -1e3f64..1e3, y in -1e3f64..1e3,
            w in 1.0f64..1e3, h in 1.0f64..1e3, amount in 0.0f64..1e3
        ) {
            let r = RectF::new(x, y, w, h);
            let grown = r.inflate(amount);
            prop_assert!((grown.center().x - r.center().x).abs() < 1e-9);
            prop_assert!((grown.center().y - r.center().y).abs() < 1e-9);
        }
    }
}
