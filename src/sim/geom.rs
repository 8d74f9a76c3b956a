//! Axis-aligned rectangle geometry
//!
//! Everything in the level is an AABB in screen space (y grows downward):
//! - `left`/`top`: minimum corner
//! - `right`/`bottom`: maximum corner

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

/// Penetration depth of one box into another, measured per side.
///
/// Each value is the distance the moving box would have to travel in that
/// direction to stop touching the other box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlap {
    /// Push toward -x (out through the other box's left edge)
    pub left: f32,
    /// Push toward +x (out through the other box's right edge)
    pub right: f32,
    /// Push toward -y (out through the other box's top edge)
    pub top: f32,
    /// Push toward +y (out through the other box's bottom edge)
    pub bottom: f32,
}

impl Overlap {
    #[inline]
    pub fn horizontal(&self) -> f32 {
        self.left.min(self.right)
    }

    #[inline]
    pub fn vertical(&self) -> f32 {
        self.top.min(self.bottom)
    }
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Build from a top-left corner and a size
    pub fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new(x, y, x + w, y + h)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.right) * 0.5,
            (self.top + self.bottom) * 0.5,
        )
    }

    /// Strict intersection: boxes that only share an edge do not intersect
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }

    /// Intersection deeper than `slop` on both axes
    #[inline]
    pub fn overlaps_by(&self, other: &Rect, slop: f32) -> bool {
        self.left < other.right - slop
            && other.left < self.right - slop
            && self.top < other.bottom - slop
            && other.top < self.bottom - slop
    }

    /// Strict point containment
    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x > self.left && p.x < self.right && p.y > self.top && p.y < self.bottom
    }

    /// Grow by `margin` on every side
    pub fn expand(&self, margin: f32) -> Rect {
        Rect::new(
            self.left - margin,
            self.top - margin,
            self.right + margin,
            self.bottom + margin,
        )
    }

    /// Per-side overlap of `self` (the moving box) into `other`
    pub fn overlap(&self, other: &Rect) -> Overlap {
        Overlap {
            left: self.right - other.left,
            right: other.right - self.left,
            top: self.bottom - other.top,
            bottom: other.bottom - self.top,
        }
    }

    /// Area of the intersection (0 when disjoint)
    pub fn intersection_area(&self, other: &Rect) -> f32 {
        let w = self.right.min(other.right) - self.left.max(other.left);
        let h = self.bottom.min(other.bottom) - self.top.max(other.top);
        w.max(0.0) * h.max(0.0)
    }
}
