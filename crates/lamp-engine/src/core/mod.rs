pub mod direction;
pub mod model;
pub mod params;
pub mod timeline;
