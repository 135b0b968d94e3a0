// extensions/mod.rs
//
// Curve math used by the model. Kept free of model and effect types so the
// curves can be evaluated on their own.

pub mod easing;

pub use easing::{Easing, lerp, BEZIER_C1, BEZIER_C2};
