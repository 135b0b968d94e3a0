use std::time::Duration;
use crate::api::types::{VisibleRef, WindowId};
use crate::geometry::Rect;

/// The compositor the effect runs inside.
///
/// Everything outside the deformation itself lives behind this trait: window
/// tracking, icon geometry, offscreen redirection and repaint scheduling.
/// All calls happen on the render-loop thread.
pub trait EffectHost {
    /// Presentation clock. Must be the same clock frame timestamps come from.
    fn now(&self) -> Duration;

    /// Windows currently known to the compositor, bottom to top.
    fn stacking_order(&self) -> Vec<WindowId>;

    /// Frame geometry of a window, or `None` if the window is gone.
    fn window_geometry(&self, window: WindowId) -> Option<Rect>;

    /// Taskbar icon geometry of a window, or `None` if no panel reported one.
    fn icon_geometry(&self, window: WindowId) -> Option<Rect>;

    /// Whether another effect currently owns the whole screen.
    fn fullscreen_effect_active(&self) -> bool;

    /// Whether the compositor animates at all (e.g. not disabled by the user).
    fn animations_supported(&self) -> bool {
        true
    }

    /// Whether windows can be captured into offscreen textures.
    fn offscreen_supported(&self) -> bool {
        true
    }

    /// Start capturing the window's pixels into a texture.
    fn redirect(&mut self, window: WindowId);

    /// Stop capturing; the window is painted normally again.
    fn unredirect(&mut self, window: WindowId);

    /// Keep a minimized window painted until the token is released.
    fn acquire_visible_ref(&mut self, window: WindowId) -> VisibleRef;

    /// Give a token back. Each token is released exactly once.
    fn release_visible_ref(&mut self, token: VisibleRef);

    /// Schedule a repaint of the whole screen.
    fn add_repaint_full(&mut self);
}
