//! Particle sphere - decorative 3D point cloud for the landing page hero
//!
//! - Samples points uniformly inside a ball and spins them, easing toward the
//!   pointer
//! - Draws a companion wireframe icosphere with constant spin
//! - Browser build (`wasm` feature) renders to a canvas on `requestAnimationFrame`
//! - Native build (`cli` feature) runs the same component headless on tokio

pub mod core;
pub mod errors;
pub mod render;
pub mod sphere;
pub mod theme;

#[cfg(feature = "cli")]
pub mod frame_loop_native;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub mod frame_loop_wasm;
#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
mod web;

pub use crate::core::{
    sample_ball, Camera, DriverParams, DriverState, PointCloud, PointerOffset, Rotation,
    SphereConfig, Viewport, Wireframe,
};
pub use errors::SphereError;
pub use render::{Frame, SphereRenderer, StatsRenderer, Style};
pub use sphere::ParticleSphere;

#[cfg(feature = "cli")]
pub use frame_loop_native::{FrameLoop, DEFAULT_FRAME_PERIOD};

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub use frame_loop_wasm::FrameLoop;
