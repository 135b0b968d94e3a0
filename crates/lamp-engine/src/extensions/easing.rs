// extensions/easing.rs
//
// Pure easing curves for the lamp shape.
// No dependencies on the model or the effect, only math.

use std::f32::consts::PI;
use glam::Vec2;

/// Control points of the fixed Bézier shape curve. The curve runs from (0, 0)
/// to (1, 1); with it, "0" corresponds to the farthest edge of a window and
/// "1" to the closest.
pub const BEZIER_C1: Vec2 = Vec2::new(0.3, 0.0);
pub const BEZIER_C2: Vec2 = Vec2::new(0.7, 1.0);

/// Easing curve applied to the collapse of the window shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant velocity (no easing).
    Linear,
    /// Slow start and end.
    InOutQuad,
    /// Stronger slow start and end.
    InOutCubic,
    /// Very strong slow start and end.
    InOutQuart,
    /// Strongest polynomial slow start and end.
    InOutQuint,
    /// Sine wave easing (smooth). The fallback for unknown selectors.
    #[default]
    InOutSine,
    /// Circular easing.
    InOutCirc,
    /// Bounces at both ends.
    InOutBounce,
    /// Cubic Bézier through [`BEZIER_C1`] and [`BEZIER_C2`].
    Bezier,
}

impl Easing {
    /// Every selectable curve, in selector order.
    pub const ALL: [Easing; 9] = [
        Easing::Linear,
        Easing::InOutQuad,
        Easing::InOutCubic,
        Easing::InOutQuart,
        Easing::InOutQuint,
        Easing::InOutSine,
        Easing::InOutCirc,
        Easing::InOutBounce,
        Easing::Bezier,
    ];

    /// Map a configuration selector to a curve.
    /// Unknown selectors fall back to [`Easing::InOutSine`].
    pub fn from_index(index: u32) -> Self {
        match Self::ALL.get(index as usize) {
            Some(curve) => *curve,
            None => {
                log::warn!("unknown shape curve {}, falling back to sine", index);
                Easing::InOutSine
            }
        }
    }

    /// Selector of this curve, the inverse of [`Easing::from_index`].
    pub fn index(self) -> u32 {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(5) as u32
    }

    /// Apply the easing function to a normalized time value `t` in [0, 1].
    /// Input is clamped; the result is in [0, 1].
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let eased = match self {
            Easing::Linear => t,

            Easing::InOutQuad => in_out_pow(t, 2),
            Easing::InOutCubic => in_out_pow(t, 3),
            Easing::InOutQuart => in_out_pow(t, 4),
            Easing::InOutQuint => in_out_pow(t, 5),

            Easing::InOutSine => -((PI * t).cos() - 1.0) / 2.0,

            Easing::InOutCirc => {
                if t < 0.5 {
                    (1.0 - (1.0 - (2.0 * t).powi(2)).sqrt()) / 2.0
                } else {
                    ((1.0 - (-2.0 * t + 2.0).powi(2)).sqrt() + 1.0) / 2.0
                }
            }

            Easing::InOutBounce => {
                if t < 0.5 {
                    (1.0 - bounce_out(1.0 - 2.0 * t)) / 2.0
                } else {
                    (1.0 + bounce_out(2.0 * t - 1.0)) / 2.0
                }
            }

            Easing::Bezier => cubic_bezier(BEZIER_C1, BEZIER_C2, t),
        };
        eased.clamp(0.0, 1.0)
    }
}

#[inline]
fn in_out_pow(t: f32, n: i32) -> f32 {
    if t < 0.5 {
        2.0_f32.powi(n - 1) * t.powi(n)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(n) / 2.0
    }
}

#[inline]
fn bounce_out(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;

    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

/// One coordinate of a cubic Bézier from 0 to 1: 3·p1·(1-s)²·s + 3·p2·(1-s)·s² + s³.
#[inline]
fn bezier_axis(p1: f32, p2: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * p1 * inv * inv * s + 3.0 * p2 * inv * s * s + s * s * s
}

#[inline]
fn bezier_axis_slope(p1: f32, p2: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * p1 * inv * inv + 6.0 * (p2 - p1) * inv * s + 3.0 * (1.0 - p2) * s * s
}

/// Evaluate y for a given x on the cubic Bézier (0,0)-c1-c2-(1,1).
/// Newton steps first, then bisection if the slope is too flat.
fn cubic_bezier(c1: Vec2, c2: Vec2, x: f32) -> f32 {
    const EPSILON: f32 = 1e-6;

    let mut s = x;
    for _ in 0..8 {
        let err = bezier_axis(c1.x, c2.x, s) - x;
        if err.abs() < EPSILON {
            return bezier_axis(c1.y, c2.y, s);
        }
        let slope = bezier_axis_slope(c1.x, c2.x, s);
        if slope.abs() < EPSILON {
            break;
        }
        s -= err / slope;
    }

    let (mut low, mut high) = (0.0_f32, 1.0_f32);
    s = x;
    for _ in 0..32 {
        let estimate = bezier_axis(c1.x, c2.x, s);
        if (estimate - x).abs() < EPSILON {
            break;
        }
        if estimate < x {
            low = s;
        } else {
            high = s;
        }
        s = (low + high) / 2.0;
    }

    bezier_axis(c1.y, c2.y, s)
}

// ── Interpolation helpers ────────────────────────────────────────────────

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_curves_hit_endpoints() {
        for curve in Easing::ALL {
            assert!(curve.apply(0.0).abs() < 1e-4, "{:?} at 0", curve);
            assert!((curve.apply(1.0) - 1.0).abs() < 1e-4, "{:?} at 1", curve);
        }
    }

    #[test]
    fn all_curves_stay_in_unit_range() {
        for curve in Easing::ALL {
            for i in 0..=100 {
                let v = curve.apply(i as f32 / 100.0);
                assert!((0.0..=1.0).contains(&v), "{:?} produced {}", curve, v);
            }
        }
    }

    #[test]
    fn symmetric_curves_pass_through_half() {
        for curve in [
            Easing::Linear,
            Easing::InOutQuad,
            Easing::InOutCubic,
            Easing::InOutQuart,
            Easing::InOutQuint,
            Easing::InOutSine,
            Easing::InOutCirc,
            Easing::Bezier,
        ] {
            let mid = curve.apply(0.5);
            assert!((mid - 0.5).abs() < 1e-3, "{:?} at 0.5 was {}", curve, mid);
        }
    }

    #[test]
    fn bezier_is_slow_at_start() {
        // Control points (0.3, 0) and (0.7, 1) keep the start flat.
        let early = Easing::Bezier.apply(0.1);
        assert!(early < 0.1, "Bezier should lag linear early, got {}", early);
        let late = Easing::Bezier.apply(0.9);
        assert!(late > 0.9, "Bezier should lead linear late, got {}", late);
    }

    #[test]
    fn bezier_matches_parametric_point() {
        // At s = 0.25 the curve passes through (x(s), y(s)).
        let s = 0.25;
        let x = bezier_axis(BEZIER_C1.x, BEZIER_C2.x, s);
        let y = bezier_axis(BEZIER_C1.y, BEZIER_C2.y, s);
        assert!((Easing::Bezier.apply(x) - y).abs() < 1e-4);
    }

    #[test]
    fn unknown_selector_falls_back_to_sine() {
        assert_eq!(Easing::from_index(8), Easing::Bezier);
        assert_eq!(Easing::from_index(9), Easing::InOutSine);
        assert_eq!(Easing::from_index(u32::MAX), Easing::InOutSine);
        assert_eq!(Easing::InOutCirc.index(), 6);
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        assert_eq!(Easing::Linear.apply(-3.0), 0.0);
        assert_eq!(Easing::Linear.apply(7.0), 1.0);
        assert_eq!(Easing::InOutSine.apply(f32::NAN), 0.0);
    }

    #[test]
    fn lerp_interpolates() {
        assert!((lerp(100.0, 200.0, 0.5) - 150.0).abs() < 0.001);
        assert!((lerp(-10.0, 10.0, 0.25) + 5.0).abs() < 1e-6);
    }
}
