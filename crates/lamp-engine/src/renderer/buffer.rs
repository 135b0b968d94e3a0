use bytemuck::{Pod, Zeroable};
use crate::api::host::EffectHost;
use crate::api::types::{PaintData, WindowId};
use crate::effect::lamp::MagicLampEffect;
use crate::geometry::{QuadList, Rect, Region, WindowVertex};

/// Where one window's geometry sits in a [`MeshBuffer`].
/// Mirrors the wire format: 5 u32 per batch.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct WindowBatch {
    /// Window the batch belongs to.
    pub window: u32,
    /// First vertex of the batch.
    pub vertex_start: u32,
    /// Number of vertices (6 per quad).
    pub vertex_count: u32,
    /// First clip rectangle of the batch.
    pub clip_start: u32,
    /// Number of clip rectangles; 0 means unclipped.
    pub clip_count: u32,
}

impl WindowBatch {
    pub const WORDS: usize = 5;
}

/// Deformed window geometry for a frame, flattened for upload.
pub struct MeshBuffer {
    /// Triangle-list vertices of every batch, back to back.
    pub vertices: Vec<WindowVertex>,
    /// Clip rectangles of every batch, back to back.
    pub clip_rects: Vec<Rect>,
    pub batches: Vec<WindowBatch>,
}

impl MeshBuffer {
    pub fn new() -> Self {
        Self::with_capacity(4096)
    }

    /// Create a buffer with room for `vertices` vertices.
    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            clip_rects: Vec::new(),
            batches: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.clip_rects.clear();
        self.batches.clear();
    }

    /// Append one window's quads and optional clip region.
    pub fn push_window(&mut self, window: WindowId, quads: &QuadList, clip: Option<&Region>) {
        let vertex_start = self.vertices.len() as u32;
        quads.write_triangles(&mut self.vertices);

        let clip_start = self.clip_rects.len() as u32;
        if let Some(region) = clip {
            self.clip_rects.extend_from_slice(region.rects());
        }

        self.batches.push(WindowBatch {
            window: window.0,
            vertex_start,
            vertex_count: self.vertices.len() as u32 - vertex_start,
            clip_start,
            clip_count: self.clip_rects.len() as u32 - clip_start,
        });
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn batch_count(&self) -> u32 {
        self.batches.len() as u32
    }

    pub fn clip_rect_count(&self) -> u32 {
        self.clip_rects.len() as u32
    }

    /// Raw pointer to vertex data (4 floats per vertex).
    pub fn vertices_ptr(&self) -> *const f32 {
        self.vertices.as_ptr() as *const f32
    }

    /// Raw pointer to batch data ([`WindowBatch::WORDS`] u32 per batch).
    pub fn batches_ptr(&self) -> *const u32 {
        self.batches.as_ptr() as *const u32
    }

    /// Raw pointer to clip rectangles (x, y, width, height floats).
    pub fn clip_rects_ptr(&self) -> *const f32 {
        self.clip_rects.as_ptr() as *const f32
    }
}

impl Default for MeshBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Rebuild `buffer` with the deformed geometry of every animating window,
/// clipped to `screen`.
pub fn build_mesh_buffer(
    effect: &MagicLampEffect,
    host: &impl EffectHost,
    screen: &Region,
    buffer: &mut MeshBuffer,
) {
    buffer.clear();

    let mut windows: Vec<WindowId> = effect.animating_windows().collect();
    windows.sort();

    for window in windows {
        let Some(rect) = host.window_geometry(window) else {
            continue;
        };
        let mut quads = QuadList::from_rect(rect);
        let mut paint = PaintData::default();
        if !effect.apply(window, &mut quads, &mut paint) {
            continue;
        }
        let clip = paint.clip.as_ref().map(|_| effect.paint_window(window, screen));
        buffer.push_window(window, &quads, clip.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_is_5_words() {
        assert_eq!(std::mem::size_of::<WindowBatch>(), WindowBatch::WORDS * 4);
    }

    #[test]
    fn push_window_records_ranges() {
        let mut buf = MeshBuffer::new();
        let a = QuadList::from_rect(Rect::new(0.0, 0.0, 10.0, 10.0)).make_grid(2);
        let b = QuadList::from_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        let clip = Region::from_rect(Rect::new(0.0, 0.0, 5.0, 5.0));

        buf.push_window(WindowId(7), &a, Some(&clip));
        buf.push_window(WindowId(8), &b, None);

        assert_eq!(buf.vertex_count(), 4 * 6 + 6);
        assert_eq!(buf.batches[0], WindowBatch { window: 7, vertex_start: 0, vertex_count: 24, clip_start: 0, clip_count: 1 });
        assert_eq!(buf.batches[1], WindowBatch { window: 8, vertex_start: 24, vertex_count: 6, clip_start: 1, clip_count: 0 });

        buf.clear();
        assert_eq!(buf.batch_count(), 0);
        assert_eq!(buf.clip_rect_count(), 0);
    }
}
