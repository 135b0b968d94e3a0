use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in screen space (Y-down, pixels).
/// Plain 4 floats so clip rectangles can be shared with a renderer as-is.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, Pod, Zeroable)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Per-edge inset applied to a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Margins {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Margins {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Same inset on every edge.
    pub fn uniform(inset: f32) -> Self {
        Self::new(inset, inset, inset, inset)
    }
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Build the smallest rectangle spanning two corner points.
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        let min = a.min(b);
        let max = a.max(b);
        Self::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn max(&self) -> Vec2 {
        Vec2::new(self.right(), self.bottom())
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// A rectangle is valid when it has finite coordinates and a positive area.
    pub fn is_valid(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    /// Inset each edge by the given margins. The result may be invalid if the
    /// margins exceed the rectangle.
    pub fn shrunk(&self, margins: Margins) -> Self {
        Self::new(
            self.x + margins.left,
            self.y + margins.top,
            self.width - margins.left - margins.right,
            self.height - margins.top - margins.bottom,
        )
    }

    /// Whether a point lies inside (edges inclusive), with a small tolerance.
    pub fn contains(&self, p: Vec2, tolerance: f32) -> bool {
        p.x >= self.left() - tolerance
            && p.x <= self.right() + tolerance
            && p.y >= self.top() - tolerance
            && p.y <= self.bottom() + tolerance
    }

    /// Whether `other` lies fully inside this rectangle.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.left() >= self.left()
            && other.right() <= self.right()
            && other.top() >= self.top()
            && other.bottom() <= self.bottom()
    }

    /// Overlapping area of two rectangles, if any.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        let r = Rect::new(left, top, right - left, bottom - top);
        r.is_valid().then_some(r)
    }

    /// Bounding rectangle of both.
    pub fn united(&self, other: &Rect) -> Rect {
        Rect::from_corners(self.min().min(other.min()), self.max().max(other.max()))
    }

    /// Map a normalized point (0..1 on each axis) into this rectangle.
    pub fn at(&self, uv: Vec2) -> Vec2 {
        self.min() + self.size() * uv
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_rect_is_invalid() {
        assert!(!Rect::new(10.0, 10.0, 0.0, 20.0).is_valid());
        assert!(!Rect::new(10.0, 10.0, 20.0, -1.0).is_valid());
        assert!(!Rect::new(f32::NAN, 0.0, 1.0, 1.0).is_valid());
        assert!(Rect::new(0.0, 0.0, 1.0, 1.0).is_valid());
    }

    #[test]
    fn shrunk_applies_margins() {
        let r = Rect::new(10.0, 550.0, 40.0, 20.0).shrunk(Margins::new(2.0, 3.0, 4.0, 5.0));
        assert_eq!(r, Rect::new(12.0, 553.0, 34.0, 12.0));
        let collapsed = Rect::new(0.0, 0.0, 4.0, 4.0).shrunk(Margins::uniform(2.0));
        assert!(!collapsed.is_valid());
    }

    #[test]
    fn intersection_and_union() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert_eq!(a.intersection(&b), Some(Rect::new(5.0, 5.0, 5.0, 5.0)));
        assert_eq!(a.united(&b), Rect::new(0.0, 0.0, 15.0, 15.0));
        let far = Rect::new(20.0, 20.0, 1.0, 1.0);
        assert_eq!(a.intersection(&far), None);
    }
}
