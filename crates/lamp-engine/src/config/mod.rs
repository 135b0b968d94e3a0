pub mod settings;

pub use settings::LampSettings;
