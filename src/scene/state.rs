use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::animation::{ConductionAnimator, ParticleField, Spark};
use crate::config::{ConfigError, SimulationConfig};
use crate::cycle::{CycleClock, CycleSnapshot, Pacing, PacingSchedule};
use crate::keyboard::{HostAction, HostKey, Keyboard};
use crate::render::Renderer;
use crate::scene::anatomy::Anatomy;
use crate::scene::frame;
use crate::scene::palette::FLOW_COLORS;
use crate::units::{Milliseconds, Percent};

const ATRIAL_CONTRACTION: Percent = Percent(1.5);
const VENTRICULAR_CONTRACTION: Percent = Percent(2.2);

/// Everything computed for one frame, handed to drawing and then dropped
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub snapshot: CycleSnapshot,
    pub pacing: Pacing,
    pub sparks: Vec<Spark>,
    pub atrial_scale: f32,
    pub ventricular_scale: f32,
}

/// The whole scene: geometry, clock, particles and conduction markers.
///
/// Constructed once and threaded through the host's frame loop. One tick
/// runs to completion at a time; geometry is never mutated after
/// construction.
pub struct SimulationState {
    config: SimulationConfig,
    seed: u64,
    clock: CycleClock,
    schedule: PacingSchedule,
    anatomy: Anatomy,
    particles: ParticleField,
    conduction: ConductionAnimator,
    keyboard: Keyboard,
    last_tick: Option<Milliseconds>,
    frames: u64,
}

impl SimulationState {
    /// Build the scene with its cycle starting at `origin`. Random geometry
    /// comes from a generator that is discarded before the first frame.
    pub fn new(config: SimulationConfig, origin: Milliseconds) -> Result<Self, ConfigError> {
        config.validate()?;
        let clock = CycleClock::new(config.bpm, origin)?;
        let schedule = PacingSchedule::from_config(&config);
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let anatomy = Anatomy::build(&mut rng);
        let particles = ParticleField::populate(
            &config,
            &anatomy.paths,
            &anatomy.flow_paths(),
            &FLOW_COLORS,
            &mut rng,
        );
        info!("Scene ready (seed {seed}, cycle {})", clock.cycle());
        Ok(Self {
            conduction: ConductionAnimator::new(config.show_native_rhythm),
            config,
            seed,
            clock,
            schedule,
            anatomy,
            particles,
            keyboard: Keyboard::default(),
            last_tick: None,
            frames: 0,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn clock(&self) -> &CycleClock {
        &self.clock
    }

    pub fn schedule(&self) -> &PacingSchedule {
        &self.schedule
    }

    pub fn anatomy(&self) -> &Anatomy {
        &self.anatomy
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn keyboard(&self) -> &Keyboard {
        &self.keyboard
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Advance to `now` and compute this frame's markers.
    pub fn tick(&mut self, now: Milliseconds) -> Frame {
        let frame_gap = self.last_tick.map(|last| now - last);
        self.last_tick = Some(now);
        let steps = self.particles.steps_for(frame_gap);
        self.particles.advance(&self.anatomy.paths, steps);

        let snapshot = self.clock.at(now);
        let pacing = self.schedule.evaluate(&snapshot);
        let sparks = self
            .conduction
            .sparks(&self.anatomy.conduction, &pacing, &snapshot);
        self.frames += 1;
        Frame {
            snapshot,
            pacing,
            sparks,
            atrial_scale: 1.0 + ATRIAL_CONTRACTION.as_factor() * pacing.atrial_intensity,
            ventricular_scale: 1.0
                + VENTRICULAR_CONTRACTION.as_factor() * pacing.ventricular_intensity,
        }
    }

    /// Tick and hand the frame's primitives to `renderer`
    pub fn render(&mut self, now: Milliseconds, renderer: &mut dyn Renderer) -> Frame {
        let frame = self.tick(now);
        frame::draw(self, &frame, renderer);
        frame
    }

    /// The host stopped calling. The next tick resumes without a jump in
    /// real-time particle motion; cycle phase never depended on tick history.
    pub fn pause(&mut self) {
        self.last_tick = None;
    }

    pub fn key_pressed(&self, key: HostKey, renderer: &mut dyn Renderer) {
        match self.keyboard.action_for(key) {
            Some(HostAction::ToggleFullscreen) => {
                let fullscreen = !renderer.is_fullscreen();
                info!("Fullscreen {}", if fullscreen { "on" } else { "off" });
                renderer.set_fullscreen(fullscreen);
            }
            None => {}
        }
    }
}
