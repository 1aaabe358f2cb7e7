//! Markers moving over the scene geometry as a function of time.

pub mod conduction;
pub mod particle;
pub mod sampler;

pub use conduction::{ConductionAnimator, ConductionPaths, MarkerState, Spark, SparkKind};
pub use particle::{Particle, ParticleField};
pub use sampler::{resolve_position, MovingMarker};
