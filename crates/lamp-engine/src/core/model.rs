//! The magic lamp deformation model.
//!
//! One `Model` drives one window's minimize or unminimize animation. Each
//! frame it is advanced to the presentation time; it then maps any point of
//! the window's surface to its deformed position, so the caller can sample
//! it at whatever grid resolution it paints with.
//!
//! Geometry is expressed in a travel/lateral frame picked by [`Direction`]:
//! `v` runs from the window edge farthest from the icon (0) to the nearest
//! (1), `u` runs across. Three phases shape the field:
//!
//! - squash: rows travel from the window onto the icon, near rows first;
//! - stretch: an early lateral narrowing near the icon (the lamp's neck);
//! - bump: a sideways overshoot of the midsection that returns to zero.
//!
//! Unminimize evaluates the same field with time mirrored, so it is the exact
//! reverse of a minimize with the same rectangles and parameters.

use std::f32::consts::PI;
use std::time::Duration;
use glam::Vec2;
use crate::api::types::{AnimationKind, PaintData};
use crate::core::direction::Direction;
use crate::core::params::Parameters;
use crate::core::timeline::{fraction, Timeline};
use crate::extensions::easing::lerp;
use crate::geometry::{QuadList, Rect, Region};

/// How far (in squash progress) the farthest row lags behind the nearest.
const ROW_LAG: f32 = 0.5;

/// Progress of a running animation, every value in [0, 1].
///
/// All values count forward in time for both kinds: 0 at start, 1 at the end.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Progress {
    /// Fraction of the total duration elapsed.
    pub time: f32,
    /// Squash phase, eased through the shape curve.
    pub shape: f32,
    /// Stretch phase.
    pub stretch: f32,
    /// Bump phase (linear; the displacement itself rises and falls).
    pub bump: f32,
}

/// How strongly each phase currently deforms the window, in minimize terms:
/// 0 is the untouched window, 1 the fully collapsed one.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct Deformation {
    squash: f32,
    stretch: f32,
    /// Bump envelope, 0 at both ends and 1 at its peak.
    bump: f32,
}

#[derive(Debug, Clone)]
struct Animation {
    kind: AnimationKind,
    timeline: Timeline,
    window_rect: Rect,
    target_rect: Rect,
    direction: Direction,
    /// +1 or -1: which lateral side the bump pushes towards.
    bump_sign: f32,
    params: Parameters,
    progress: Progress,
    deformation: Deformation,
}

impl Animation {
    fn advance(&mut self, now: Duration) {
        let elapsed = self.timeline.update(now);
        let total = self.timeline.duration();

        // Minimize-equivalent time: unminimize runs the same field backwards.
        let mirrored = match self.kind {
            AnimationKind::Minimize => elapsed.min(total),
            AnimationKind::Unminimize => total.saturating_sub(elapsed),
        };

        let p = &self.params;
        let squash_t = fraction(mirrored, p.squash_duration);
        let stretch_t = fraction(mirrored, p.stretch_duration);
        let bump_t = fraction(mirrored, p.bump_duration);

        self.deformation = Deformation {
            squash: p.shape_curve.apply(squash_t),
            stretch: stretch_t,
            bump: (PI * bump_t).sin().max(0.0),
        };

        let d = self.deformation;
        self.progress = match self.kind {
            AnimationKind::Minimize => Progress {
                time: self.timeline.progress(),
                shape: d.squash,
                stretch: d.stretch,
                bump: bump_t,
            },
            AnimationKind::Unminimize => Progress {
                time: self.timeline.progress(),
                shape: 1.0 - d.squash,
                stretch: 1.0 - d.stretch,
                bump: 1.0 - bump_t,
            },
        };
    }

    fn is_identity(&self) -> bool {
        let d = self.deformation;
        d.squash <= 0.0
            && (d.stretch <= 0.0 || self.params.shape_factor <= 0.0)
            && (d.bump <= 0.0 || self.params.bump_distance <= 0.0)
    }

    fn deform(&self, p: Vec2) -> Vec2 {
        let dir = self.direction;
        let d = self.deformation;
        let (along, lateral) = dir.split(p);
        let (window_far, window_near) = dir.along_span(&self.window_rect);
        let (window_lo, window_hi) = dir.lateral_span(&self.window_rect);
        let (target_far, target_near) = dir.along_span(&self.target_rect);
        let (target_lo, target_hi) = dir.lateral_span(&self.target_rect);

        let v = (along - window_far) / (window_near - window_far);
        let u = (lateral - window_lo) / (window_hi - window_lo);
        let row = v.clamp(0.0, 1.0);

        let travel = row_travel(d.squash, row);
        let along = lerp(along, lerp(target_far, target_near, v), travel);

        let neck = self.params.shape_factor * d.stretch * self.params.shape_curve.apply(row);
        let narrowing = travel.max(neck);
        let lateral = lerp(lateral, lerp(target_lo, target_hi, u), narrowing);

        let bump = self.bump_sign * self.params.bump_distance * d.bump * (PI * row).sin();
        dir.join(along, lateral + bump)
    }

    /// Endpoints of the undeformed row at `v`, in screen space.
    fn row_endpoints(&self, v: f32) -> (Vec2, Vec2) {
        let dir = self.direction;
        let (far, near) = dir.along_span(&self.window_rect);
        let (lo, hi) = dir.lateral_span(&self.window_rect);
        let along = lerp(far, near, v);
        (dir.join(along, lo), dir.join(along, hi))
    }
}

/// Travel of the row at `v` for a given squash amount. Near rows lead; every
/// row has arrived once squash reaches 1.
fn row_travel(squash: f32, v: f32) -> f32 {
    ((squash - (1.0 - v) * ROW_LAG) / (1.0 - ROW_LAG)).clamp(0.0, 1.0)
}

/// Deformation model for one window's animation.
///
/// Idle until [`Model::start`]; the controller drops it once [`Model::done`].
#[derive(Debug, Clone, Default)]
pub struct Model {
    animation: Option<Animation>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) an animation at `now`.
    ///
    /// The target is `icon_rect` inset by the parameters' icon margins. If the
    /// target or the window is degenerate nothing happens and `false` is
    /// returned; a running animation, if any, carries on untouched.
    pub fn start(
        &mut self,
        kind: AnimationKind,
        window_rect: Rect,
        icon_rect: Rect,
        params: Parameters,
        now: Duration,
    ) -> bool {
        let target_rect = icon_rect.shrunk(params.icon_margins);
        if !target_rect.is_valid() || !window_rect.is_valid() {
            log::debug!(
                "not animating {:?}: window {:?}, target {:?}",
                kind, window_rect, target_rect
            );
            return false;
        }

        let direction = Direction::towards(&window_rect, &target_rect);
        let (window_lo, window_hi) = direction.lateral_span(&window_rect);
        let (target_lo, target_hi) = direction.lateral_span(&target_rect);
        let bump_sign = if (target_lo + target_hi) >= (window_lo + window_hi) { 1.0 } else { -1.0 };

        let mut animation = Animation {
            kind,
            timeline: Timeline::new(now, params.total_duration()),
            window_rect,
            target_rect,
            direction,
            bump_sign,
            params,
            progress: Progress::default(),
            deformation: Deformation::default(),
        };
        animation.advance(now);
        self.animation = Some(animation);
        true
    }

    /// Move the animation to presentation time `now`. No-op while idle.
    pub fn advance(&mut self, now: Duration) {
        if let Some(animation) = self.animation.as_mut() {
            animation.advance(now);
        }
    }

    /// Whether the animation has run its full duration (or never started).
    pub fn done(&self) -> bool {
        self.animation.as_ref().map_or(true, |a| a.timeline.done())
    }

    pub fn is_running(&self) -> bool {
        self.animation.is_some()
    }

    pub fn kind(&self) -> Option<AnimationKind> {
        self.animation.as_ref().map(|a| a.kind)
    }

    pub fn progress(&self) -> Progress {
        self.animation.as_ref().map(|a| a.progress).unwrap_or_default()
    }

    pub fn elapsed(&self) -> Duration {
        self.animation.as_ref().map_or(Duration::ZERO, |a| a.timeline.elapsed())
    }

    pub fn start_time(&self) -> Option<Duration> {
        self.animation.as_ref().map(|a| a.timeline.start())
    }

    pub fn window_rect(&self) -> Option<Rect> {
        self.animation.as_ref().map(|a| a.window_rect)
    }

    /// Icon rectangle with margins applied.
    pub fn target_rect(&self) -> Option<Rect> {
        self.animation.as_ref().map(|a| a.target_rect)
    }

    pub fn direction(&self) -> Option<Direction> {
        self.animation.as_ref().map(|a| a.direction)
    }

    pub fn parameters(&self) -> Option<&Parameters> {
        self.animation.as_ref().map(|a| &a.params)
    }

    /// Grid subdivisions the animation was started with.
    pub fn grid_resolution(&self) -> Option<u32> {
        self.animation.as_ref().map(|a| a.params.grid_resolution)
    }

    /// Deformed position of a point of the window's surface.
    pub fn deform(&self, p: Vec2) -> Vec2 {
        match &self.animation {
            Some(animation) => animation.deform(p),
            None => p,
        }
    }

    /// Offset field: how far the point at `p` moves this frame.
    pub fn offset_at(&self, p: Vec2) -> Vec2 {
        self.deform(p) - p
    }

    /// Whether the deformed window no longer covers its own bounds, so
    /// painting must be clipped to [`Model::clip_region`].
    pub fn needs_clip(&self) -> bool {
        self.animation.as_ref().is_some_and(|a| !a.is_identity())
    }

    /// Area covered by the deformed window this frame: one band per grid row.
    /// Empty while idle.
    pub fn clip_region(&self) -> Region {
        let mut region = Region::new();
        let Some(animation) = &self.animation else {
            return region;
        };

        let rows = animation.params.grid_resolution.max(1);
        let deformed_row = |i: u32| {
            let (a, b) = animation.row_endpoints(i as f32 / rows as f32);
            (animation.deform(a), animation.deform(b))
        };

        let mut prev = deformed_row(0);
        for i in 1..=rows {
            let next = deformed_row(i);
            let min = prev.0.min(prev.1).min(next.0).min(next.1);
            let max = prev.0.max(prev.1).max(next.0).max(next.1);
            region.add(Rect::from_corners(min, max));
            prev = next;
        }
        region
    }

    /// Deform a pre-subdivided quad grid in place and record the clip region
    /// the renderer must honour.
    pub fn apply(&self, quads: &mut QuadList, paint: &mut PaintData) {
        let Some(animation) = &self.animation else {
            return;
        };
        for vertex in quads.vertices_mut() {
            vertex.set_pos(animation.deform(vertex.pos()));
        }
        paint.clip = self.needs_clip().then(|| self.clip_region());
    }
}
