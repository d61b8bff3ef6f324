pub mod extract;
pub mod presets;
