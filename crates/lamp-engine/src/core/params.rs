use std::time::Duration;
use crate::extensions::easing::Easing;
use crate::geometry::Margins;

/// Base duration used when the user did not configure one.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(250);

/// The stretch phase runs this fraction of the base duration.
pub const STRETCH_RATIO: f64 = 0.7;

/// Immutable snapshot of the tunables an animation runs with.
///
/// A model copies the snapshot when it starts, so reconfiguring the effect
/// never changes the shape of an animation already in flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    /// Curve applied to the collapse of the window shape.
    pub shape_curve: Easing,
    /// Duration of the main collapse.
    pub squash_duration: Duration,
    /// Duration of the early lateral narrowing (the lamp's neck).
    pub stretch_duration: Duration,
    /// Duration of the perpendicular overshoot.
    pub bump_duration: Duration,
    /// Lateral narrowing reached by the end of the stretch phase, in [0, 1].
    pub shape_factor: f32,
    /// Peak perpendicular displacement of the bump, in pixels.
    pub bump_distance: f32,
    /// Inset applied to the icon so the collapse point sits inside it.
    pub icon_margins: Margins,
    /// Grid subdivisions per axis.
    pub grid_resolution: u32,
}

impl Default for Parameters {
    fn default() -> Self {
        Self::from_base_duration(DEFAULT_DURATION)
    }
}

impl Parameters {
    /// Derive all three phase durations from one base duration.
    /// Squash and bump take the base; stretch takes 70% of it. Both are
    /// floored at 1ms.
    pub fn from_base_duration(base: Duration) -> Self {
        let base = base.max(Duration::from_millis(1));
        let stretch_ms = ((base.as_millis() as f64 * STRETCH_RATIO).round() as u64).max(1);
        Self {
            shape_curve: Easing::InOutSine,
            squash_duration: base,
            stretch_duration: Duration::from_millis(stretch_ms),
            bump_duration: base,
            shape_factor: 0.7,
            bump_distance: 25.0,
            icon_margins: Margins::default(),
            grid_resolution: 40,
        }
    }

    // -- Builder methods --

    pub fn with_shape_curve(mut self, curve: Easing) -> Self {
        self.shape_curve = curve;
        self
    }

    pub fn with_squash_duration(mut self, duration: Duration) -> Self {
        self.squash_duration = duration.max(Duration::from_millis(1));
        self
    }

    pub fn with_stretch_duration(mut self, duration: Duration) -> Self {
        self.stretch_duration = duration.max(Duration::from_millis(1));
        self
    }

    pub fn with_bump_duration(mut self, duration: Duration) -> Self {
        self.bump_duration = duration.max(Duration::from_millis(1));
        self
    }

    pub fn with_shape_factor(mut self, factor: f32) -> Self {
        self.shape_factor = if factor.is_finite() { factor.clamp(0.0, 1.0) } else { 0.0 };
        self
    }

    pub fn with_bump_distance(mut self, distance: f32) -> Self {
        self.bump_distance = if distance.is_finite() { distance.max(0.0) } else { 0.0 };
        self
    }

    pub fn with_icon_margins(mut self, margins: Margins) -> Self {
        self.icon_margins = margins;
        self
    }

    pub fn with_grid_resolution(mut self, resolution: u32) -> Self {
        self.grid_resolution = resolution.max(1);
        self
    }

    /// Length of the whole animation: the longest of the three phases.
    pub fn total_duration(&self) -> Duration {
        self.squash_duration
            .max(self.stretch_duration)
            .max(self.bump_duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_follow_base() {
        let p = Parameters::from_base_duration(Duration::from_millis(250));
        assert_eq!(p.squash_duration, Duration::from_millis(250));
        assert_eq!(p.bump_duration, Duration::from_millis(250));
        assert_eq!(p.stretch_duration, Duration::from_millis(175));
        assert_eq!(p.total_duration(), Duration::from_millis(250));
    }

    #[test]
    fn stretch_is_floored_at_one_ms() {
        let p = Parameters::from_base_duration(Duration::ZERO);
        assert_eq!(p.squash_duration, Duration::from_millis(1));
        assert_eq!(p.stretch_duration, Duration::from_millis(1));
    }

    #[test]
    fn builders_sanitize_values() {
        let p = Parameters::default()
            .with_shape_factor(4.0)
            .with_bump_distance(-10.0)
            .with_grid_resolution(0);
        assert_eq!(p.shape_factor, 1.0);
        assert_eq!(p.bump_distance, 0.0);
        assert_eq!(p.grid_resolution, 1);
    }

    #[test]
    fn total_is_longest_phase() {
        let p = Parameters::default().with_bump_duration(Duration::from_millis(400));
        assert_eq!(p.total_duration(), Duration::from_millis(400));
    }
}
