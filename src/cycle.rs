//! Cardiac cycle timing: phase within the beat and the paced pulse windows.

use std::f64::consts::PI;

use log::info;

use crate::config::{ConfigError, SimulationConfig};
use crate::units::{BeatsPerMinute, Milliseconds};

/// Largest phase value strictly below one
const PHASE_CEILING: f64 = 1.0 - f64::EPSILON / 2.0;

/// Turns absolute time into a position within the repeating cycle.
///
/// Phase is always derived from the time elapsed since `origin`, never
/// accumulated frame by frame, so stopping and restarting the host loop
/// cannot introduce drift.
#[derive(Debug, Clone)]
pub struct CycleClock {
    bpm: BeatsPerMinute,
    cycle: Milliseconds,
    origin: Milliseconds,
}

/// Where in the cycle a single frame falls. Valid for that frame only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleSnapshot {
    pub cycle: Milliseconds,
    pub elapsed_in_cycle: Milliseconds,
    pub phase: f64,
}

impl CycleClock {
    pub fn new(bpm: BeatsPerMinute, origin: Milliseconds) -> Result<Self, ConfigError> {
        if !bpm.is_valid() {
            return Err(ConfigError::NonPositiveBpm(*bpm));
        }
        Ok(Self {
            bpm,
            cycle: bpm.cycle(),
            origin,
        })
    }

    pub fn bpm(&self) -> BeatsPerMinute {
        self.bpm
    }

    pub fn cycle(&self) -> Milliseconds {
        self.cycle
    }

    pub fn origin(&self) -> Milliseconds {
        self.origin
    }

    pub fn at(&self, now: Milliseconds) -> CycleSnapshot {
        self.at_elapsed(now - self.origin)
    }

    pub fn at_elapsed(&self, elapsed: Milliseconds) -> CycleSnapshot {
        let elapsed_in_cycle = elapsed.wrapped(self.cycle);
        let phase = (elapsed_in_cycle / self.cycle).clamp(0.0, PHASE_CEILING);
        CycleSnapshot {
            cycle: self.cycle,
            elapsed_in_cycle,
            phase,
        }
    }
}

/// A stretch of the cycle during which a chamber is paced.
///
/// Both ends are inclusive, so two windows that touch both report
/// membership at the shared instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseWindow {
    pub start: Milliseconds,
    pub end: Milliseconds,
}

impl PulseWindow {
    pub fn new(start: Milliseconds, width: Milliseconds) -> Self {
        Self {
            start,
            end: start + width,
        }
    }

    pub fn width(&self) -> Milliseconds {
        self.end - self.start
    }

    pub fn midpoint(&self) -> Milliseconds {
        self.start + self.width() * 0.5
    }

    pub fn contains(&self, t: Milliseconds) -> bool {
        self.start <= t && t <= self.end
    }

    /// Half-sine bump: zero at and outside the edges, one at the midpoint.
    pub fn ease(&self, t: Milliseconds) -> f32 {
        if !self.contains(t) || self.width().0 <= 0.0 {
            return 0.0;
        }
        let u = (t - self.start) / self.width();
        (u * PI).sin().max(0.0) as f32
    }
}

/// The two pacing windows of a dual-chamber pacemaker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PacingSchedule {
    pub atrial: PulseWindow,
    pub ventricular: PulseWindow,
}

/// Pacing state for one frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pacing {
    pub atrial: bool,
    pub ventricular: bool,
    pub atrial_intensity: f32,
    pub ventricular_intensity: f32,
}

impl PacingSchedule {
    pub fn from_config(config: &SimulationConfig) -> Self {
        let schedule = Self {
            atrial: PulseWindow::new(Milliseconds(0.0), config.atrial_width),
            ventricular: PulseWindow::new(config.av_delay, config.ventricular_width),
        };
        info!(
            "Pacing at {}: atrial [{}, {}], ventricular [{}, {}]",
            config.bpm,
            schedule.atrial.start,
            schedule.atrial.end,
            schedule.ventricular.start,
            schedule.ventricular.end
        );
        schedule
    }

    pub fn evaluate(&self, snapshot: &CycleSnapshot) -> Pacing {
        let t = snapshot.elapsed_in_cycle;
        Pacing {
            atrial: self.atrial.contains(t),
            ventricular: self.ventricular.contains(t),
            atrial_intensity: self.atrial.ease(t),
            ventricular_intensity: self.ventricular.ease(t),
        }
    }
}
