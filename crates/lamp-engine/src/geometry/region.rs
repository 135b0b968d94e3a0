use glam::Vec2;
use super::rect::Rect;

/// A set of rectangles describing an area on screen.
/// Rectangles may overlap; the region is their union.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Region {
    rects: Vec<Rect>,
}

impl Region {
    pub fn new() -> Self {
        Self::default()
    }

    /// Region covering a single rectangle. Invalid rectangles yield an empty region.
    pub fn from_rect(rect: Rect) -> Self {
        let mut region = Self::new();
        region.add(rect);
        region
    }

    /// Add a rectangle to the union. Degenerate rectangles are ignored.
    pub fn add(&mut self, rect: Rect) {
        if rect.is_valid() {
            self.rects.push(rect);
        }
    }

    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Bounding rectangle of every member, or `None` for an empty region.
    pub fn bounding_rect(&self) -> Option<Rect> {
        let (first, rest) = self.rects.split_first()?;
        Some(rest.iter().fold(*first, |acc, r| acc.united(r)))
    }

    pub fn contains(&self, p: Vec2) -> bool {
        self.rects.iter().any(|r| r.contains(p, 0.0))
    }

    /// Pairwise intersection of both regions.
    pub fn intersected(&self, other: &Region) -> Region {
        let mut out = Region::new();
        for a in &self.rects {
            for b in &other.rects {
                if let Some(r) = a.intersection(b) {
                    out.rects.push(r);
                }
            }
        }
        out
    }
}
