use serde::{Deserialize, Serialize};

/// A position in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
}

impl WorldPos {
    pub fn new(x: f32, y: f32) -> WorldPos {
        WorldPos { x, y }
    }
    /// True if `other` lies strictly within `tolerance` of this position on both axes.
    pub fn within(&self, other: &WorldPos, tolerance: f32) -> bool {
        other.x > self.x - tolerance
            && other.x < self.x + tolerance
            && other.y > self.y - tolerance
            && other.y < self.y + tolerance
    }
}

/// Axis-aligned rectangle in world units, stored by its edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl WorldRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> WorldRect {
        WorldRect::from_edges(left, top, left + width, top + height)
    }
    pub fn from_edges(left: f32, top: f32, right: f32, bottom: f32) -> WorldRect {
        WorldRect {
            left,
            top,
            right,
            bottom,
        }
    }
    /// Builds the rectangle spanned by two corners, in any order.
    pub fn from_corners(a: WorldPos, b: WorldPos) -> WorldRect {
        WorldRect::from_edges(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
    }
    pub fn width(&self) -> f32 {
        self.right - self.left
    }
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
    pub fn center(&self) -> WorldPos {
        WorldPos::new(
            self.left + self.width() / 2.0,
            self.top + self.height() / 2.0,
        )
    }
    /// Half-open containment: the left and top edges belong to the rectangle, the right and
    /// bottom edges belong to its neighbours.
    pub fn contains(&self, pos: WorldPos) -> bool {
        pos.x >= self.left && pos.x < self.right && pos.y >= self.top && pos.y < self.bottom
    }
    /// Strict overlap. Rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &WorldRect) -> bool {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right.min(other.right);
        let bottom = self.bottom.min(other.bottom);
        left < right && top < bottom
    }
}
