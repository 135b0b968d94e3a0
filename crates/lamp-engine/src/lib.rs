pub mod api;
pub mod config;
pub mod core;
pub mod effect;
pub mod extensions;
pub mod geometry;
pub mod renderer;

// Re-export key types at crate root for convenience
pub use api::host::EffectHost;
pub use api::types::{
    AnimationKind, PaintData, ScreenPrePaintData, VisibleRef, WindowId, WindowPrePaintData,
};
pub use config::settings::LampSettings;
pub use core::direction::Direction;
pub use core::model::{Model, Progress};
pub use core::params::{Parameters, DEFAULT_DURATION};
pub use core::timeline::Timeline;
pub use effect::lamp::{AnimationData, MagicLampEffect, CHAIN_POSITION};
pub use extensions::{Easing, lerp};
pub use geometry::{Margins, QuadList, Rect, Region, WindowQuad, WindowVertex};
pub use renderer::buffer::{build_mesh_buffer, MeshBuffer, WindowBatch};
