//! Ambient particle background for a web page.
//!
//! A fixed population of particles drifts across a canvas, bounces off its
//! edges, and pairs that come close are joined by lines that fade with
//! distance. The simulation and drawing logic run against the [`Surface`]
//! trait so they can be driven headless; [`AnimationHandle`] wires them to a
//! browser canvas and `requestAnimationFrame`.

mod utils;

pub mod animation;
pub mod color;
pub mod config;
pub mod error;
pub mod field;
pub mod particle;
pub mod surface;

pub use animation::AnimationHandle;
pub use color::Color;
pub use config::FieldConfig;
pub use error::FieldError;
pub use field::{connection_opacity, FrameStats, ParticleField};
pub use particle::Particle;
pub use surface::{CanvasSurface, CommandBuffer, DrawCommand, Surface};

use std::sync::Once;
use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

static INIT: Once = Once::new();

/// Installs the panic hook and routes `tracing` output to the browser console.
/// Safe to call more than once. [`AnimationHandle::start`] and friends call it
/// themselves, so hosts only need it to get logging before starting a field.
#[wasm_bindgen]
pub fn initialize() {
    INIT.call_once(|| {
        utils::set_panic_hook();
        tracing_wasm::set_as_global_default();
    });
}
