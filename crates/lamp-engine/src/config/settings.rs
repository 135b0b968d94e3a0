use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::core::params::{Parameters, DEFAULT_DURATION};
use crate::extensions::easing::Easing;
use crate::geometry::Margins;

/// Upper bound on grid subdivisions per axis.
pub const MAX_GRID_RESOLUTION: u32 = 256;

/// User-facing settings of the effect.
/// Loaded from JSON on reconfiguration; every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LampSettings {
    /// Shape curve selector: 0 Linear, 1 Quad, 2 Cubic, 3 Quart, 4 Quint,
    /// 5 Sine, 6 Circ, 7 Bounce, 8 Bezier. Anything else means Sine.
    pub shape_curve: u32,
    /// Animation duration in milliseconds. 0 uses the default duration
    /// scaled by `speed_factor`.
    pub duration_ms: u64,
    /// Global animation speed multiplier applied to the default duration.
    pub speed_factor: f32,
    /// Lateral narrowing reached early in the animation, in [0, 1].
    pub initial_shape_factor: f32,
    /// Peak sideways overshoot in pixels.
    pub max_bump_distance: f32,
    /// Grid subdivisions per axis.
    pub grid_resolution: u32,
    /// Margin of the panel's task frame; half of it is inset from each
    /// side of the icon.
    pub icon_margins: f32,
}

impl Default for LampSettings {
    fn default() -> Self {
        Self {
            shape_curve: Easing::InOutSine.index(),
            duration_ms: 0,
            speed_factor: 1.0,
            initial_shape_factor: 0.7,
            max_bump_distance: 25.0,
            grid_resolution: 40,
            icon_margins: 0.0,
        }
    }
}

impl LampSettings {
    /// Parse settings from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Effective base duration of an animation.
    pub fn base_duration(&self) -> Duration {
        if self.duration_ms > 0 {
            return Duration::from_millis(self.duration_ms);
        }
        let factor = if self.speed_factor.is_finite() && self.speed_factor >= 0.0 {
            self.speed_factor
        } else {
            1.0
        };
        match Duration::try_from_secs_f32(DEFAULT_DURATION.as_secs_f32() * factor) {
            Ok(duration) => duration,
            Err(e) => {
                log::warn!("speed factor {} out of range ({}), using default duration", factor, e);
                DEFAULT_DURATION
            }
        }
    }

    /// Build the parameter snapshot new animations will run with.
    pub fn parameters(&self) -> Parameters {
        let inset = if self.icon_margins.is_finite() { self.icon_margins.max(0.0) * 0.5 } else { 0.0 };
        Parameters::from_base_duration(self.base_duration())
            .with_shape_curve(Easing::from_index(self.shape_curve))
            .with_shape_factor(self.initial_shape_factor)
            .with_bump_distance(self.max_bump_distance)
            .with_icon_margins(Margins::uniform(inset))
            .with_grid_resolution(self.grid_resolution.clamp(1, MAX_GRID_RESOLUTION))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_uses_defaults() {
        let settings = LampSettings::from_json("{}").unwrap();
        assert_eq!(settings, LampSettings::default());

        let p = settings.parameters();
        assert_eq!(p.shape_curve, Easing::InOutSine);
        assert_eq!(p.squash_duration, Duration::from_millis(250));
        assert_eq!(p.stretch_duration, Duration::from_millis(175));
        assert_eq!(p.grid_resolution, 40);
    }

    #[test]
    fn parse_full_settings() {
        let json = r#"{
            "shape_curve": 8,
            "duration_ms": 400,
            "initial_shape_factor": 0.5,
            "max_bump_distance": 10,
            "grid_resolution": 1000,
            "icon_margins": 8
        }"#;
        let p = LampSettings::from_json(json).unwrap().parameters();
        assert_eq!(p.shape_curve, Easing::Bezier);
        assert_eq!(p.squash_duration, Duration::from_millis(400));
        assert_eq!(p.bump_duration, Duration::from_millis(400));
        assert_eq!(p.stretch_duration, Duration::from_millis(280));
        assert_eq!(p.shape_factor, 0.5);
        assert_eq!(p.bump_distance, 10.0);
        assert_eq!(p.grid_resolution, MAX_GRID_RESOLUTION);
        assert_eq!(p.icon_margins, Margins::uniform(4.0));
    }

    #[test]
    fn default_duration_scales_with_speed() {
        let settings = LampSettings { speed_factor: 2.0, ..Default::default() };
        assert_eq!(settings.base_duration(), Duration::from_millis(500));
        let instant = LampSettings { speed_factor: 0.0, ..Default::default() };
        // Floored so the animation still completes.
        assert_eq!(instant.parameters().squash_duration, Duration::from_millis(1));
    }

    #[test]
    fn huge_speed_factor_falls_back_to_default_duration() {
        let settings = LampSettings::from_json(r#"{"speed_factor": 1e30}"#).unwrap();
        assert_eq!(settings.base_duration(), DEFAULT_DURATION);
        assert_eq!(settings.parameters().squash_duration, DEFAULT_DURATION);
    }

    #[test]
    fn unknown_curve_falls_back_to_sine() {
        let settings = LampSettings { shape_curve: 42, ..Default::default() };
        assert_eq!(settings.parameters().shape_curve, Easing::InOutSine);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(LampSettings::from_json("{ \"shape_curve\": \"fast\" }").is_err());
        assert!(LampSettings::from_json("not json").is_err());
    }
}
