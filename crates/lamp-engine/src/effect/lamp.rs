// effect/lamp.rs
//
// The magic lamp effect. Owns one Model per animating window and drives the
// models from the compositor's frame hooks.
//
// Usage (once per frame, on the render thread):
//   effect.pre_paint_screen(&mut screen_data);
//   effect.pre_paint_window(id, &mut window_data, now);   // per window
//   effect.apply(id, &mut quads, &mut paint);             // per window
//   let clip = effect.paint_window(id, &device_region);    // per window
//   effect.post_paint_screen(&mut host);

use std::collections::{HashMap, HashSet};
use std::time::Duration;
use crate::api::host::EffectHost;
use crate::api::types::{
    AnimationKind, PaintData, ScreenPrePaintData, VisibleRef, WindowId, WindowPrePaintData,
};
use crate::config::settings::LampSettings;
use crate::core::model::Model;
use crate::core::params::Parameters;
use crate::geometry::{QuadList, Region};

/// Position of the effect in the compositor's effect chain.
pub const CHAIN_POSITION: i32 = 50;

/// Per-window animation record.
#[derive(Debug, Default)]
pub struct AnimationData {
    pub model: Model,
    /// Held while a minimizing window must stay painted. Released once, when
    /// the record is removed.
    visible_ref: Option<VisibleRef>,
}

impl AnimationData {
    pub fn holds_visible_ref(&self) -> bool {
        self.visible_ref.is_some()
    }

    fn release(self, host: &mut impl EffectHost) {
        if let Some(token) = self.visible_ref {
            host.release_visible_ref(token);
        }
    }
}

/// Magic lamp minimize/unminimize effect.
#[derive(Debug)]
pub struct MagicLampEffect {
    parameters: Parameters,
    /// Windows whose minimized state the effect follows.
    windows: HashSet<WindowId>,
    animations: HashMap<WindowId, AnimationData>,
}

impl MagicLampEffect {
    /// Create the effect and start tracking every window the host knows of.
    pub fn new(settings: &LampSettings, host: &impl EffectHost) -> Self {
        let mut effect = Self {
            parameters: settings.parameters(),
            windows: HashSet::new(),
            animations: HashMap::new(),
        };
        for window in host.stacking_order() {
            effect.window_added(window);
        }
        effect
    }

    /// Whether the compositor can run this effect at all.
    pub fn supported(host: &impl EffectHost) -> bool {
        host.offscreen_supported() && host.animations_supported()
    }

    /// Swap in new settings. Animations already running keep their snapshot.
    pub fn reconfigure(&mut self, settings: &LampSettings) {
        self.parameters = settings.parameters();
        log::info!(
            "magic lamp reconfigured: curve {:?}, duration {:?}, grid {}",
            self.parameters.shape_curve,
            self.parameters.squash_duration,
            self.parameters.grid_resolution
        );
    }

    /// Snapshot new animations will start with.
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn is_active(&self) -> bool {
        !self.animations.is_empty()
    }

    pub fn animation(&self, window: WindowId) -> Option<&AnimationData> {
        self.animations.get(&window)
    }

    /// Windows with an animation in flight, in no particular order.
    pub fn animating_windows(&self) -> impl Iterator<Item = WindowId> + '_ {
        self.animations.keys().copied()
    }

    pub fn is_tracked(&self, window: WindowId) -> bool {
        self.windows.contains(&window)
    }

    // -- Window events --

    pub fn window_added(&mut self, window: WindowId) {
        self.windows.insert(window);
    }

    /// Drop the window's animation immediately, whatever its state.
    pub fn window_deleted(&mut self, host: &mut impl EffectHost, window: WindowId) {
        self.windows.remove(&window);
        if let Some(data) = self.animations.remove(&window) {
            data.release(host);
        }
    }

    /// Dispatch a minimized-state change of a tracked window.
    pub fn window_minimized_changed(
        &mut self,
        host: &mut impl EffectHost,
        window: WindowId,
        minimized: bool,
    ) -> bool {
        if !self.windows.contains(&window) {
            log::debug!("ignoring minimize change of untracked window {:?}", window);
            return false;
        }
        if minimized {
            self.on_minimize(host, window)
        } else {
            self.on_unminimize(host, window)
        }
    }

    /// Start a minimize animation. Returns whether one started.
    pub fn on_minimize(&mut self, host: &mut impl EffectHost, window: WindowId) -> bool {
        if !self.start(&*host, window, AnimationKind::Minimize) {
            return false;
        }
        let token = host.acquire_visible_ref(window);
        if let Some(data) = self.animations.get_mut(&window) {
            if let Some(old) = data.visible_ref.replace(token) {
                host.release_visible_ref(old);
            }
        }
        host.redirect(window);
        host.add_repaint_full();
        true
    }

    /// Start an unminimize animation. Returns whether one started.
    pub fn on_unminimize(&mut self, host: &mut impl EffectHost, window: WindowId) -> bool {
        if !self.start(&*host, window, AnimationKind::Unminimize) {
            return false;
        }
        host.redirect(window);
        host.add_repaint_full();
        true
    }

    fn start(&mut self, host: &impl EffectHost, window: WindowId, kind: AnimationKind) -> bool {
        if host.fullscreen_effect_active() {
            log::debug!("fullscreen effect active, not animating {:?}", window);
            return false;
        }

        let Some(icon_rect) = host.icon_geometry(window).filter(|r| r.is_valid()) else {
            log::debug!("no icon geometry for {:?}", window);
            return false;
        };
        let Some(window_rect) = host.window_geometry(window) else {
            log::debug!("no geometry for {:?}", window);
            return false;
        };

        // Validate on a scratch model first so a rejected request never
        // creates or disturbs a record.
        let mut model = Model::new();
        if !model.start(kind, window_rect, icon_rect, self.parameters, host.now()) {
            return false;
        }

        let data = self.animations.entry(window).or_default();
        data.model = model;
        true
    }

    /// Another effect took over (or released) the screen. Taking over
    /// cancels every animation on the spot.
    pub fn active_fullscreen_effect_changed(&mut self, host: &mut impl EffectHost) {
        if !host.fullscreen_effect_active() {
            return;
        }
        for (window, data) in self.animations.drain() {
            host.unredirect(window);
            data.release(host);
        }
    }

    // -- Frame hooks --

    pub fn pre_paint_screen(&self, data: &mut ScreenPrePaintData) {
        data.transformed_windows = true;
    }

    /// Advance the window's model to `now`.
    pub fn pre_paint_window(
        &mut self,
        window: WindowId,
        data: &mut WindowPrePaintData,
        now: Duration,
    ) {
        if let Some(animation) = self.animations.get_mut(&window) {
            animation.model.advance(now);
            data.transformed = true;
        }
    }

    /// Subdivide the window's quads to the grid the animation started with
    /// and deform them.
    /// Returns `false` (leaving the quads alone) if the window is not animating.
    pub fn apply(&self, window: WindowId, quads: &mut QuadList, paint: &mut PaintData) -> bool {
        let Some(animation) = self.animations.get(&window) else {
            return false;
        };
        let resolution = animation
            .model
            .grid_resolution()
            .unwrap_or(self.parameters.grid_resolution);
        *quads = quads.make_grid(resolution);
        animation.model.apply(quads, paint);
        true
    }

    /// Region the window may be painted into this frame.
    pub fn paint_window(&self, window: WindowId, device_region: &Region) -> Region {
        match self.animations.get(&window) {
            Some(animation) if animation.model.needs_clip() => {
                animation.model.clip_region().intersected(device_region)
            }
            _ => device_region.clone(),
        }
    }

    /// Drop finished animations and hand their windows back to normal painting.
    pub fn post_paint_screen(&mut self, host: &mut impl EffectHost) {
        let finished: Vec<WindowId> = self
            .animations
            .iter()
            .filter(|(_, data)| data.model.done())
            .map(|(window, _)| *window)
            .collect();

        for window in finished {
            if let Some(data) = self.animations.remove(&window) {
                log::trace!("animation of {:?} finished", window);
                host.unredirect(window);
                data.release(host);
            }
        }

        host.add_repaint_full();
    }
}
