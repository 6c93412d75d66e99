//! Rounded-rectangle perimeter parameterization.
//!
//! Maps a normalized progress value in `[0, 1]` onto the boundary of a
//! rounded rectangle, treated as four straight edges and four quarter-circle
//! arcs laid end to end. The border engine walks this mapping at evenly
//! spaced progress values and jitters the resulting points.

use std::f64::consts::{FRAC_PI_2, PI};

use flashfx_core::Vec2;

/// A rounded rectangle with a parameterized perimeter.
///
/// `radius` is clamped to half the shorter side on construction, so the
/// corner arcs can never overlap. A radius of zero degenerates to a plain
/// rectangle: the arc spans collapse to zero length and are skipped when
/// walking the perimeter (no division by zero).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedRect {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    radius: f64,
}

/// One traversal segment of the perimeter, in walk order starting at the
/// top edge and going clockwise.
#[derive(Debug, Clone, Copy)]
enum Span {
    Top,
    ArcTopRight,
    Right,
    ArcBottomRight,
    Bottom,
    ArcBottomLeft,
    Left,
    ArcTopLeft,
}

const WALK_ORDER: [Span; 8] = [
    Span::Top,
    Span::ArcTopRight,
    Span::Right,
    Span::ArcBottomRight,
    Span::Bottom,
    Span::ArcBottomLeft,
    Span::Left,
    Span::ArcTopLeft,
];

impl RoundedRect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64, radius: f64) -> Self {
        let width = width.max(0.0);
        let height = height.max(0.0);
        let radius = radius.clamp(0.0, width.min(height) / 2.0);
        Self {
            left,
            top,
            width,
            height,
            radius,
        }
    }

    #[inline]
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Length of one straight span along the given axis extent.
    #[inline]
    fn straight(&self, extent: f64) -> f64 {
        extent - 2.0 * self.radius
    }

    /// Length of one quarter-circle arc.
    #[inline]
    fn arc_len(&self) -> f64 {
        PI * self.radius / 2.0
    }

    /// Total perimeter length.
    #[must_use]
    pub fn perimeter(&self) -> f64 {
        2.0 * self.straight(self.width) + 2.0 * self.straight(self.height) + 4.0 * self.arc_len()
    }

    fn span_len(&self, span: Span) -> f64 {
        match span {
            Span::Top | Span::Bottom => self.straight(self.width),
            Span::Left | Span::Right => self.straight(self.height),
            _ => self.arc_len(),
        }
    }

    /// Point at fraction `f` in `[0, 1]` along one span.
    fn span_point(&self, span: Span, f: f64) -> Vec2 {
        let (l, t, w, h, r) = (self.left, self.top, self.width, self.height, self.radius);
        let sw = self.straight(w);
        let sh = self.straight(h);
        let arc = |cx: f64, cy: f64, start: f64| {
            let angle = start + f * FRAC_PI_2;
            Vec2::new(cx + r * angle.cos(), cy + r * angle.sin())
        };
        match span {
            Span::Top => Vec2::new(l + r + f * sw, t),
            Span::ArcTopRight => arc(l + w - r, t + r, -FRAC_PI_2),
            Span::Right => Vec2::new(l + w, t + r + f * sh),
            Span::ArcBottomRight => arc(l + w - r, t + h - r, 0.0),
            Span::Bottom => Vec2::new(l + w - r - f * sw, t + h),
            Span::ArcBottomLeft => arc(l + r, t + h - r, FRAC_PI_2),
            Span::Left => Vec2::new(l, t + h - r - f * sh),
            Span::ArcTopLeft => arc(l + r, t + r, PI),
        }
    }

    /// Map perimeter progress in `[0, 1]` to a boundary point.
    ///
    /// Walks the cumulative-length ladder over the eight spans and
    /// interpolates within whichever span contains `progress * perimeter` —
    /// linearly on edges, angularly on arcs. Progress 0 and 1 both map to
    /// the start of the top edge (closed loop).
    #[must_use]
    pub fn point_at(&self, progress: f64) -> Vec2 {
        let start = Vec2::new(self.left + self.radius, self.top);
        let total = self.perimeter();
        if total <= 0.0 {
            return start;
        }

        let d = progress.clamp(0.0, 1.0) * total;
        let mut acc = 0.0;
        for span in WALK_ORDER {
            let len = self.span_len(span);
            // Zero-length spans (arcs at radius 0, edges at width == 2r)
            // are skipped rather than divided through.
            if len > 0.0 && d <= acc + len {
                return self.span_point(span, (d - acc) / len);
            }
            acc += len;
        }
        // Floating-point slop past the last span wraps to the start.
        start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assert_close(a: Vec2, b: Vec2) {
        assert!(
            (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9,
            "{a:?} != {b:?}"
        );
    }

    #[test]
    fn radius_is_clamped_to_half_shorter_side() {
        let rect = RoundedRect::new(0.0, 0.0, 100.0, 40.0, 300.0);
        assert_eq!(rect.radius(), 20.0);
    }

    #[test]
    fn zero_radius_perimeter_is_plain_rectangle() {
        let rect = RoundedRect::new(0.0, 0.0, 100.0, 40.0, 0.0);
        assert_eq!(rect.perimeter(), 280.0);
    }

    #[test]
    fn zero_radius_points_lie_on_edges() {
        let rect = RoundedRect::new(10.0, 20.0, 100.0, 40.0, 0.0);
        let n = 97;
        for i in 0..=n {
            let p = rect.point_at(i as f64 / n as f64);
            let on_horizontal = ((p.y - 20.0).abs() < 1e-9 || (p.y - 60.0).abs() < 1e-9)
                && (10.0 - 1e-9..=110.0 + 1e-9).contains(&p.x);
            let on_vertical = ((p.x - 10.0).abs() < 1e-9 || (p.x - 110.0).abs() < 1e-9)
                && (20.0 - 1e-9..=60.0 + 1e-9).contains(&p.y);
            assert!(on_horizontal || on_vertical, "point {p:?} off the rectangle");
        }
    }

    #[test]
    fn corners_are_visited_in_clockwise_order() {
        let rect = RoundedRect::new(0.0, 0.0, 100.0, 100.0, 0.0);
        assert_close(rect.point_at(0.0), Vec2::new(0.0, 0.0));
        assert_close(rect.point_at(0.25), Vec2::new(100.0, 0.0));
        assert_close(rect.point_at(0.5), Vec2::new(100.0, 100.0));
        assert_close(rect.point_at(0.75), Vec2::new(0.0, 100.0));
    }

    #[test]
    fn rounded_corner_arc_midpoint_is_on_the_circle() {
        let rect = RoundedRect::new(0.0, 0.0, 100.0, 100.0, 10.0);
        // Top-right arc occupies [80, 80 + 5π] of the perimeter ladder.
        let total = rect.perimeter();
        let mid = (80.0 + PI * 10.0 / 4.0) / total;
        let p = rect.point_at(mid);
        let center = Vec2::new(90.0, 10.0);
        let dist = ((p.x - center.x).powi(2) + (p.y - center.y).powi(2)).sqrt();
        assert!((dist - 10.0).abs() < 1e-9, "arc point {p:?} not on circle");
    }

    #[test]
    fn degenerate_rect_is_safe() {
        let rect = RoundedRect::new(5.0, 5.0, 0.0, 0.0, 10.0);
        assert_eq!(rect.perimeter(), 0.0);
        assert_close(rect.point_at(0.5), Vec2::new(5.0, 5.0));
    }

    proptest! {
        #[test]
        fn closed_loop(
            w in 1.0f64..2000.0,
            h in 1.0f64..2000.0,
            r in 0.0f64..500.0,
            left in -500.0f64..500.0,
            top in -500.0f64..500.0,
        ) {
            let rect = RoundedRect::new(left, top, w, h, r);
            let a = rect.point_at(0.0);
            let b = rect.point_at(1.0);
            prop_assert!((a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6,
                "open loop: {a:?} vs {b:?}");
        }

        #[test]
        fn adjacent_samples_are_continuous(
            w in 10.0f64..500.0,
            h in 10.0f64..500.0,
            r in 0.0f64..100.0,
        ) {
            let rect = RoundedRect::new(0.0, 0.0, w, h, r);
            let n = 256;
            let max_step = rect.perimeter() / n as f64 + 1e-6;
            for i in 0..n {
                let a = rect.point_at(i as f64 / n as f64);
                let b = rect.point_at((i + 1) as f64 / n as f64);
                let step = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
                prop_assert!(step <= max_step * 1.01, "jump of {step} at sample {i}");
            }
        }
    }
}
