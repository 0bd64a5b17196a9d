//! Axis-aligned bounding boxes
//!
//! Every entity in the arena is a rectangle, so one overlap test covers
//! projectile/alien, projectile/shield and projectile/player contacts.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn from_pos(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// Strict AABB overlap test.
///
/// Rectangles that only share an edge do not overlap.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.pos.x < b.right() && a.right() > b.pos.x && a.pos.y < b.bottom() && a.bottom() > b.pos.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_hit() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(overlaps(&a, &b));
        assert!(overlaps(&b, &a));
    }

    #[test]
    fn test_edge_touching_is_not_a_hit() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Right edge of a == left edge of b
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!overlaps(&a, &b));
        // Bottom edge of a == top edge of c
        let c = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!overlaps(&a, &c));
    }

    #[test]
    fn test_contained_rect_overlaps() {
        let outer = Rect::new(100.0, 460.0, 100.0, 50.0);
        let inner = Rect::new(148.0, 470.0, 4.0, 15.0);
        assert!(overlaps(&outer, &inner));
        assert!(overlaps(&inner, &outer));
    }

    #[test]
    fn test_disjoint() {
        let a = Rect::new(0.0, 0.0, 4.0, 15.0);
        let b = Rect::new(400.0, 300.0, 40.0, 30.0);
        assert!(!overlaps(&a, &b));
    }
}
