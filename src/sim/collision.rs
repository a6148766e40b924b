//! Static collision geometry
//!
//! Buildings are axis-aligned rectangles. Moving bodies collide as a point
//! plus a fixed radius, so the test below inflates the rectangle by the
//! radius on every side. This is conservative and inexact for rotated
//! vehicles (they are drawn rotated but collide as a circle proxy) - an
//! accepted approximation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle: top-left origin plus size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner in world coordinates
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub const fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Inflated-point overlap test against a circle at `center` with `radius`
    #[inline]
    pub fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        center.x + radius > self.pos.x
            && center.x - radius < self.pos.x + self.size.x
            && center.y + radius > self.pos.y
            && center.y - radius < self.pos.y + self.size.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_inside() {
        let rect = Rect::new(Vec2::new(100.0, 100.0), Vec2::new(200.0, 300.0));
        assert!(rect.overlaps_circle(Vec2::new(150.0, 150.0), 0.0));
    }

    #[test]
    fn test_radius_padding() {
        let rect = Rect::new(Vec2::new(100.0, 100.0), Vec2::new(200.0, 300.0));
        // Point left of the rect, but the radius reaches in
        assert!(rect.overlaps_circle(Vec2::new(90.0, 150.0), 16.0));
        // Radius falls just short
        assert!(!rect.overlaps_circle(Vec2::new(80.0, 150.0), 16.0));
    }

    #[test]
    fn test_edge_touch_is_not_overlap() {
        // Strict inequalities: a circle exactly tangent to the edge misses
        let rect = Rect::new(Vec2::new(100.0, 100.0), Vec2::new(50.0, 50.0));
        assert!(!rect.overlaps_circle(Vec2::new(70.0, 120.0), 30.0));
        assert!(rect.overlaps_circle(Vec2::new(70.1, 120.0), 30.0));
    }

    #[test]
    fn test_clear_miss() {
        let rect = Rect::new(Vec2::new(500.0, 500.0), Vec2::new(50.0, 50.0));
        assert!(!rect.overlaps_circle(Vec2::new(605.0, 600.0), 30.0));
    }
}
