use glam::Vec2;
use log::{info, warn};
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::animation::sampler::MovingMarker;
use crate::config::{ParticleTiming, SimulationConfig};
use crate::geometry::{Path, PathId};
use crate::render::Color;
use crate::units::Milliseconds;

/// Frames longer than this are treated as a stall, not as motion
const MAX_FRAME_GAP: Milliseconds = Milliseconds(250.0);

/// A blood-flow marker. Lives as long as the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub marker: MovingMarker,
    pub size: f32,
    pub color: Color,
}

/// Flow markers circulating the great vessels, independent of the beat.
#[derive(Debug, Clone, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
    timing: ParticleTiming,
    reference_fps: f64,
}

impl ParticleField {
    /// Scatter `config.particle_count` particles over the traversable
    /// paths among `candidates`, chosen with replacement.
    pub fn populate(
        config: &SimulationConfig,
        paths: &[Path],
        candidates: &[PathId],
        palette: &[Color],
        rng: &mut impl Rng,
    ) -> Self {
        let usable: Vec<PathId> = candidates
            .iter()
            .copied()
            .filter(|id| paths.get(id.0).is_some_and(Path::is_traversable))
            .collect();
        let mut field = Self {
            particles: Vec::with_capacity(config.particle_count),
            timing: config.particle_timing,
            reference_fps: config.reference_fps,
        };
        if usable.is_empty() || palette.is_empty() {
            warn!("No flow paths to carry particles");
            return field;
        }
        let (speed_low, speed_high) = ordered(*config.particle_speed.start(), *config.particle_speed.end());
        let (size_low, size_high) = ordered(*config.particle_size.start(), *config.particle_size.end());
        for _ in 0..config.particle_count {
            let (Some(&path), Some(&color)) = (usable.choose(rng), palette.choose(rng)) else {
                break;
            };
            let length = paths[path.0].len();
            let index = rng.random_range(0..length) as f32;
            let speed = rng.random_range(speed_low..=speed_high);
            let size = rng.random_range(size_low..=size_high);
            field.particles.push(Particle {
                marker: MovingMarker::new(path, index, speed),
                size,
                color,
            });
        }
        info!(
            "Released {} particles over {} vessels ({:?})",
            field.particles.len(),
            usable.len(),
            field.timing
        );
        field
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// How many speed-steps a frame is worth. Frame-locked timing is one
    /// step per frame; real-time timing scales by the frame duration so the
    /// flow matches frame-locked speed at the reference frame rate.
    pub fn steps_for(&self, frame_gap: Option<Milliseconds>) -> f32 {
        match self.timing {
            ParticleTiming::FrameLocked => 1.0,
            ParticleTiming::RealTime => {
                let Some(gap) = frame_gap else {
                    return 0.0;
                };
                let gap = gap.0.clamp(0.0, MAX_FRAME_GAP.0);
                (gap * self.reference_fps / 1000.0) as f32
            }
        }
    }

    pub fn advance(&mut self, paths: &[Path], steps: f32) {
        for particle in &mut self.particles {
            particle.marker.advance(paths, steps);
        }
    }

    /// Current position of each particle that has one
    pub fn positions<'a>(
        &'a self,
        paths: &'a [Path],
    ) -> impl Iterator<Item = (Vec2, &'a Particle)> + 'a {
        self.particles
            .iter()
            .filter_map(move |particle| Some((particle.marker.position(paths)?, particle)))
    }
}

fn ordered(a: f32, b: f32) -> (f32, f32) {
    (a.min(b), a.max(b))
}
