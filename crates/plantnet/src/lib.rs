//! PlantNet — client library for the PlantNet species-identification API.

pub mod client;
pub mod format;
pub mod types;

pub use client::{PlantNetClient, DEFAULT_BASE_URL};
pub use format::render;
pub use types::*;
