//! Window quads: the deformable surface of a redirected window.
//!
//! A window is painted as a list of quads. The effect subdivides that list
//! into a regular grid and then moves each vertex; texture coordinates stay put,
//! so the captured pixels stretch with the geometry.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use super::rect::Rect;

/// One vertex of a window quad: screen position plus texture coordinate.
/// 4 floats = 16 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct WindowVertex {
    pub x: f32,
    pub y: f32,
    pub u: f32,
    pub v: f32,
}

impl WindowVertex {
    pub const FLOATS: usize = 4;

    pub fn new(pos: Vec2, uv: Vec2) -> Self {
        Self { x: pos.x, y: pos.y, u: uv.x, v: uv.y }
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn uv(&self) -> Vec2 {
        Vec2::new(self.u, self.v)
    }

    pub fn set_pos(&mut self, pos: Vec2) {
        self.x = pos.x;
        self.y = pos.y;
    }
}

/// A quad with vertices in order: top-left, top-right, bottom-right, bottom-left.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct WindowQuad {
    pub vertices: [WindowVertex; 4],
}

impl WindowQuad {
    /// Axis-aligned quad covering `rect`, texture-mapped over `uv`.
    pub fn new(rect: Rect, uv: Rect) -> Self {
        let corners = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        Self {
            vertices: corners.map(|c| WindowVertex::new(rect.at(c), uv.at(c))),
        }
    }

    /// Bilinear sample across the quad (s along top edge, t down the left edge).
    fn sample(&self, s: f32, t: f32) -> WindowVertex {
        let [tl, tr, br, bl] = self.vertices;
        let top_pos = tl.pos().lerp(tr.pos(), s);
        let bottom_pos = bl.pos().lerp(br.pos(), s);
        let top_uv = tl.uv().lerp(tr.uv(), s);
        let bottom_uv = bl.uv().lerp(br.uv(), s);
        WindowVertex::new(top_pos.lerp(bottom_pos, t), top_uv.lerp(bottom_uv, t))
    }

    pub fn bounding_rect(&self) -> Rect {
        let min = self.vertices.iter().fold(Vec2::splat(f32::INFINITY), |m, v| m.min(v.pos()));
        let max = self.vertices.iter().fold(Vec2::splat(f32::NEG_INFINITY), |m, v| m.max(v.pos()));
        Rect::from_corners(min, max)
    }
}

/// The list of quads a window is painted with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuadList {
    quads: Vec<WindowQuad>,
}

impl QuadList {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single quad covering the whole window, texture-mapped 0..1.
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            quads: vec![WindowQuad::new(rect, Rect::new(0.0, 0.0, 1.0, 1.0))],
        }
    }

    pub fn len(&self) -> usize {
        self.quads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WindowQuad> {
        self.quads.iter()
    }

    /// Iterate over every vertex of every quad, mutably.
    pub fn vertices_mut(&mut self) -> impl Iterator<Item = &mut WindowVertex> {
        self.quads.iter_mut().flat_map(|q| q.vertices.iter_mut())
    }

    /// Subdivide every quad into `resolution × resolution` cells.
    /// A resolution of 0 is treated as 1.
    pub fn make_grid(&self, resolution: u32) -> QuadList {
        let n = resolution.max(1);
        let mut out = Vec::with_capacity(self.quads.len() * (n * n) as usize);
        let step = 1.0 / n as f32;

        for quad in &self.quads {
            for row in 0..n {
                let t0 = row as f32 * step;
                let t1 = if row + 1 == n { 1.0 } else { (row + 1) as f32 * step };
                for col in 0..n {
                    let s0 = col as f32 * step;
                    let s1 = if col + 1 == n { 1.0 } else { (col + 1) as f32 * step };
                    out.push(WindowQuad {
                        vertices: [
                            quad.sample(s0, t0),
                            quad.sample(s1, t0),
                            quad.sample(s1, t1),
                            quad.sample(s0, t1),
                        ],
                    });
                }
            }
        }

        QuadList { quads: out }
    }

    /// Bounding rectangle of all vertices, or `None` when empty.
    pub fn bounding_rect(&self) -> Option<Rect> {
        let (first, rest) = self.quads.split_first()?;
        Some(rest.iter().fold(first.bounding_rect(), |acc, q| acc.united(&q.bounding_rect())))
    }

    /// Append the quads as a triangle list (two triangles, 6 vertices per quad).
    pub fn write_triangles(&self, out: &mut Vec<WindowVertex>) {
        out.reserve(self.quads.len() * 6);
        for quad in &self.quads {
            let [a, b, c, d] = quad.vertices;
            out.extend_from_slice(&[a, b, c, a, c, d]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_is_4_floats() {
        assert_eq!(std::mem::size_of::<WindowVertex>(), 16);
        assert_eq!(std::mem::size_of::<WindowQuad>(), 64);
    }

    #[test]
    fn make_grid_subdivides_evenly() {
        let list = QuadList::from_rect(Rect::new(0.0, 0.0, 100.0, 50.0));
        let grid = list.make_grid(4);
        assert_eq!(grid.len(), 16);
        assert_eq!(grid.bounding_rect(), Some(Rect::new(0.0, 0.0, 100.0, 50.0)));

        let first = grid.iter().next().unwrap();
        assert_eq!(first.bounding_rect(), Rect::new(0.0, 0.0, 25.0, 12.5));
        let uv = first.vertices[2].uv();
        assert!((uv - Vec2::new(0.25, 0.25)).length() < 1e-6);
    }

    #[test]
    fn zero_resolution_keeps_one_cell_per_quad() {
        let list = QuadList::from_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(list.make_grid(0).len(), 1);
    }

    #[test]
    fn triangles_are_six_per_quad() {
        let grid = QuadList::from_rect(Rect::new(0.0, 0.0, 10.0, 10.0)).make_grid(3);
        let mut out = Vec::new();
        grid.write_triangles(&mut out);
        assert_eq!(out.len(), 9 * 6);
    }
}
