// src/lib.rs - Library interface for internal module access

pub mod animation;
pub mod constants;
pub mod data_input;
pub mod font_config;
pub mod plot_framework;
pub mod simulation;
pub mod types;
pub mod video_export;

pub fn crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
