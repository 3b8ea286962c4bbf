//! A decorative field of glowing particles for a page background.
//!
//! Particles drift in from random spots at startup and burst out around the
//! pointer whenever it moves. Every frame the canvas is overpainted with a
//! translucent dark tint, leaving short trails, and each particle slows down,
//! fades and is dropped once its life runs out.
//!
//! From javascript:
//!
//! ```js
//! import init, { initialize, start } from "glowfield";
//! await init();
//! initialize();
//! const background = start("particles");
//! // ...
//! background.stop();
//! ```
//!
//! The simulation itself (`Animator`) is independent of the browser: it paints
//! into any `Surface`, draws its randomness from any `rand::Rng`, and is driven
//! by whoever calls `step`, which is what the tests do.

extern crate nalgebra_glm as glm;

mod utils;

pub mod animator;
pub mod canvas;
pub mod color;
pub mod config;
pub mod countdown;
pub mod error;
pub mod logging;
pub mod particle;
pub mod scheduler;
pub mod surface;
pub mod web;

use wasm_bindgen::prelude::*;

pub use animator::{Animator, Phase};
pub use color::{Color, PALETTE};
pub use config::FieldConfig;
pub use countdown::Countdown;
pub use error::{ConfigError, ScheduleError, SetupError, SurfaceError};
pub use particle::Particle;
pub use scheduler::{FrameLoop, FrameScheduler, ManualScheduler};
pub use surface::{Paint, Rect, RecordingSurface, Size, Surface};
pub use web::{start, ParticleBackground};

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}
