//! Animated, stylised heart driven by a dual-chamber pacing clock.
//!
//! The crate computes timing, geometry and marker positions; drawing is
//! delegated to a [`render::Renderer`] that receives plain primitives.

pub mod animation;
pub mod config;
pub mod cycle;
pub mod geometry;
pub mod keyboard;
pub mod render;
pub mod scene;
pub mod units;

pub use config::{ConfigError, ParticleTiming, SimulationConfig};
pub use scene::{Frame, SimulationState};
