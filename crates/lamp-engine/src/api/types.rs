use crate::geometry::Region;

/// Identifier of a compositor window. Opaque to the effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u32);

/// Direction of travel of an animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationKind {
    /// Window collapses into its icon.
    Minimize,
    /// Window expands out of its icon.
    Unminimize,
}

/// Token that keeps a minimized window painted while it animates.
///
/// Not `Clone`: a token is created once by the host and handed back once,
/// so it cannot be released twice.
#[derive(Debug, PartialEq, Eq)]
pub struct VisibleRef {
    window: WindowId,
}

impl VisibleRef {
    pub fn new(window: WindowId) -> Self {
        Self { window }
    }

    pub fn window(&self) -> WindowId {
        self.window
    }
}

/// Per-frame screen flags collected before painting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenPrePaintData {
    /// Some window on screen will be painted with deformed geometry.
    pub transformed_windows: bool,
}

/// Per-frame window flags collected before painting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowPrePaintData {
    /// This window's geometry is deformed this frame.
    pub transformed: bool,
}

/// Paint-level state handed to the renderer alongside the deformed quads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaintData {
    /// Area outside of which nothing of the window may be painted.
    pub clip: Option<Region>,
}
