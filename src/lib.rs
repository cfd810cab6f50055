// src/lib.rs - Library interface for internal module access

pub mod config;
pub mod constants;
pub mod data_input;
pub mod errors;
pub mod plot_framework;
pub mod plot_functions;
pub mod types;

pub fn crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
