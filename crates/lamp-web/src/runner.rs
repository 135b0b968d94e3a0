use std::collections::{HashMap, HashSet};
use std::time::Duration;
use lamp_engine::{
    build_mesh_buffer, EffectHost, LampSettings, MagicLampEffect, MeshBuffer, Rect, Region,
    ScreenPrePaintData, VisibleRef, WindowId, WindowPrePaintData,
};

/// Compositor state as reported by the page.
///
/// The page owns the real windows; this side only mirrors what the effect
/// needs to ask about and records what the effect asks for in return.
#[derive(Debug, Default)]
pub struct WebHost {
    now: Duration,
    stacking: Vec<WindowId>,
    windows: HashMap<WindowId, Rect>,
    icons: HashMap<WindowId, Rect>,
    fullscreen_effect: bool,
    redirected: HashSet<WindowId>,
    visible_refs: HashMap<WindowId, u32>,
    repaint_requested: bool,
}

impl WebHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_time(&mut self, now_ms: f64) {
        match Duration::try_from_secs_f64(now_ms / 1000.0) {
            Ok(now) => self.now = now,
            Err(e) => log::warn!("ignoring page time {}ms: {}", now_ms, e),
        }
    }

    pub fn add_window(&mut self, window: WindowId) {
        if !self.stacking.contains(&window) {
            self.stacking.push(window);
        }
    }

    pub fn remove_window(&mut self, window: WindowId) {
        self.stacking.retain(|w| *w != window);
        self.windows.remove(&window);
        self.icons.remove(&window);
    }

    pub fn set_window_geometry(&mut self, window: WindowId, rect: Rect) {
        self.windows.insert(window, rect);
    }

    /// An invalid rect clears the icon geometry.
    pub fn set_icon_geometry(&mut self, window: WindowId, rect: Rect) {
        if rect.is_valid() {
            self.icons.insert(window, rect);
        } else {
            self.icons.remove(&window);
        }
    }

    pub fn set_fullscreen_effect(&mut self, active: bool) {
        self.fullscreen_effect = active;
    }

    pub fn is_redirected(&self, window: WindowId) -> bool {
        self.redirected.contains(&window)
    }

    /// Outstanding visible tokens for `window`.
    pub fn visible_refs(&self, window: WindowId) -> u32 {
        self.visible_refs.get(&window).copied().unwrap_or(0)
    }

    /// Take the pending repaint request, if any.
    pub fn take_repaint(&mut self) -> bool {
        std::mem::take(&mut self.repaint_requested)
    }
}

impl EffectHost for WebHost {
    fn now(&self) -> Duration {
        self.now
    }

    fn stacking_order(&self) -> Vec<WindowId> {
        self.stacking.clone()
    }

    fn window_geometry(&self, window: WindowId) -> Option<Rect> {
        self.windows.get(&window).copied()
    }

    fn icon_geometry(&self, window: WindowId) -> Option<Rect> {
        self.icons.get(&window).copied()
    }

    fn fullscreen_effect_active(&self) -> bool {
        self.fullscreen_effect
    }

    fn redirect(&mut self, window: WindowId) {
        self.redirected.insert(window);
    }

    fn unredirect(&mut self, window: WindowId) {
        self.redirected.remove(&window);
    }

    fn acquire_visible_ref(&mut self, window: WindowId) -> VisibleRef {
        *self.visible_refs.entry(window).or_insert(0) += 1;
        VisibleRef::new(window)
    }

    fn release_visible_ref(&mut self, token: VisibleRef) {
        let window = token.window();
        if let Some(count) = self.visible_refs.get_mut(&window) {
            *count -= 1;
            if *count == 0 {
                self.visible_refs.remove(&window);
            }
        }
    }

    fn add_repaint_full(&mut self) {
        self.repaint_requested = true;
    }
}

/// Drives the effect from the page's animation frames.
///
/// wasm-bindgen cannot export this directly, so `lib.rs` keeps one in a
/// `thread_local!` and forwards free functions to it.
pub struct EffectRunner {
    host: WebHost,
    effect: MagicLampEffect,
    mesh: MeshBuffer,
    screen: Region,
}

impl EffectRunner {
    pub fn new(settings: &LampSettings, screen: Rect) -> Self {
        let host = WebHost::new();
        let effect = MagicLampEffect::new(settings, &host);
        Self {
            host,
            effect,
            mesh: MeshBuffer::new(),
            screen: Region::from_rect(screen),
        }
    }

    pub fn host(&self) -> &WebHost {
        &self.host
    }

    pub fn effect(&self) -> &MagicLampEffect {
        &self.effect
    }

    pub fn mesh(&self) -> &MeshBuffer {
        &self.mesh
    }

    pub fn reconfigure(&mut self, settings: &LampSettings) {
        self.effect.reconfigure(settings);
    }

    pub fn set_screen(&mut self, screen: Rect) {
        self.screen = Region::from_rect(screen);
    }

    // ---- Window events ----

    pub fn window_added(&mut self, window: WindowId, geometry: Rect) {
        self.host.add_window(window);
        self.host.set_window_geometry(window, geometry);
        self.effect.window_added(window);
    }

    pub fn window_deleted(&mut self, window: WindowId) {
        self.effect.window_deleted(&mut self.host, window);
        self.host.remove_window(window);
    }

    pub fn set_window_geometry(&mut self, window: WindowId, geometry: Rect) {
        self.host.set_window_geometry(window, geometry);
    }

    pub fn set_icon_geometry(&mut self, window: WindowId, geometry: Rect) {
        self.host.set_icon_geometry(window, geometry);
    }

    /// Report a minimized-state change at page time `now_ms`.
    pub fn set_minimized(&mut self, window: WindowId, minimized: bool, now_ms: f64) -> bool {
        self.host.set_time(now_ms);
        self.effect.window_minimized_changed(&mut self.host, window, minimized)
    }

    pub fn set_fullscreen_effect(&mut self, active: bool) {
        self.host.set_fullscreen_effect(active);
        self.effect.active_fullscreen_effect_changed(&mut self.host);
    }

    /// Run one frame at page time `now_ms` and rebuild the mesh.
    /// Returns whether another frame should be scheduled.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        self.host.set_time(now_ms);
        let now = self.host.now();

        let mut screen_data = ScreenPrePaintData::default();
        self.effect.pre_paint_screen(&mut screen_data);

        let windows: Vec<WindowId> = self.effect.animating_windows().collect();
        for window in windows {
            let mut data = WindowPrePaintData::default();
            self.effect.pre_paint_window(window, &mut data, now);
        }

        build_mesh_buffer(&self.effect, &self.host, &self.screen, &mut self.mesh);

        self.effect.post_paint_screen(&mut self.host);
        self.effect.is_active()
    }

    /// Whether the effect asked for a full repaint since the last call.
    pub fn take_repaint(&mut self) -> bool {
        self.host.take_repaint()
    }

    /// Ids of windows with an animation in flight, ascending.
    pub fn animating_windows(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.effect.animating_windows().map(|w| w.0).collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Rect = Rect { x: 0.0, y: 0.0, width: 1920.0, height: 1080.0 };

    fn runner_with_window() -> (EffectRunner, WindowId) {
        let mut runner = EffectRunner::new(&LampSettings::default(), SCREEN);
        let w = WindowId(3);
        runner.window_added(w, Rect::new(400.0, 200.0, 800.0, 600.0));
        runner.set_icon_geometry(w, Rect::new(900.0, 1040.0, 40.0, 40.0));
        (runner, w)
    }

    #[test]
    fn minimize_runs_to_completion() {
        let (mut runner, w) = runner_with_window();
        assert!(runner.set_minimized(w, true, 1000.0));
        assert!(runner.host().is_redirected(w));
        assert_eq!(runner.host().visible_refs(w), 1);
        assert!(runner.take_repaint());
        assert!(!runner.take_repaint());

        assert!(runner.frame(1100.0));
        assert_eq!(runner.animating_windows(), vec![3]);
        assert_eq!(runner.mesh().batch_count(), 1);
        // 40 x 40 grid, two triangles per cell
        assert_eq!(runner.mesh().vertex_count(), 40 * 40 * 6);

        assert!(!runner.frame(1300.0));
        assert!(runner.take_repaint());
        assert!(runner.animating_windows().is_empty());
        assert!(!runner.host().is_redirected(w));
        assert_eq!(runner.host().visible_refs(w), 0);
    }

    #[test]
    fn minimize_without_icon_does_nothing() {
        let mut runner = EffectRunner::new(&LampSettings::default(), SCREEN);
        let w = WindowId(1);
        runner.window_added(w, Rect::new(0.0, 0.0, 100.0, 100.0));
        assert!(!runner.set_minimized(w, true, 0.0));
        assert!(!runner.take_repaint());
        assert!(!runner.frame(16.0));
        assert_eq!(runner.mesh().batch_count(), 0);
    }

    #[test]
    fn fullscreen_effect_cancels_animations() {
        let (mut runner, w) = runner_with_window();
        runner.set_minimized(w, true, 0.0);
        runner.frame(50.0);
        runner.set_fullscreen_effect(true);
        assert!(runner.animating_windows().is_empty());
        assert_eq!(runner.host().visible_refs(w), 0);
        assert!(!runner.host().is_redirected(w));
        // While it stays active nothing new starts.
        assert!(!runner.set_minimized(w, false, 60.0));
    }

    #[test]
    fn deleting_window_drops_its_animation() {
        let (mut runner, w) = runner_with_window();
        runner.set_minimized(w, true, 0.0);
        runner.window_deleted(w);
        assert!(runner.animating_windows().is_empty());
        assert_eq!(runner.host().visible_refs(w), 0);
        assert!(!runner.frame(16.0));
    }

    #[test]
    fn mesh_is_clipped_to_screen() {
        let (mut runner, w) = runner_with_window();
        runner.set_minimized(w, true, 0.0);
        runner.frame(125.0);
        let batch = runner.mesh().batches[0];
        assert!(batch.clip_count > 0);
        for rect in &runner.mesh().clip_rects {
            assert!(SCREEN.contains_rect(rect));
        }
    }

    #[test]
    fn bad_clock_values_are_ignored() {
        let mut host = WebHost::new();
        host.set_time(500.0);
        host.set_time(f64::NAN);
        host.set_time(-1.0);
        host.set_time(f64::MAX);
        host.set_time(1e300);
        assert_eq!(host.now(), Duration::from_millis(500));
    }
}
