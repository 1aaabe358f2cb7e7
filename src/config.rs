use std::fmt;
use std::ops::RangeInclusive;

use crate::units::{BeatsPerMinute, Milliseconds};

/// Error types that can occur while validating a simulation configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Heart rate is zero, negative or not a finite number
    NonPositiveBpm(f32),
    /// A pulse window has no duration
    EmptyPulseWindow { name: &'static str, width: f64 },
    /// A pulse window does not fit inside one cardiac cycle
    PulseWindowOutsideCycle {
        name: &'static str,
        start: f64,
        end: f64,
        cycle: f64,
    },
    /// Particle speed range is reversed or not finite
    InvalidSpeedRange { low: f32, high: f32 },
    /// Particle size range is reversed, negative or not finite
    InvalidSizeRange { low: f32, high: f32 },
    /// Reference frame rate is zero, negative or not a finite number
    InvalidReferenceFps(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositiveBpm(bpm) => {
                write!(f, "Heart rate must be a positive number of beats per minute, got {bpm}")
            }
            ConfigError::EmptyPulseWindow { name, width } => {
                write!(f, "The {name} pulse window must be wider than 0ms, got {width}ms")
            }
            ConfigError::PulseWindowOutsideCycle {
                name,
                start,
                end,
                cycle,
            } => write!(
                f,
                "The {name} pulse window [{start}, {end}]ms does not fit in a {cycle:.1}ms cycle"
            ),
            ConfigError::InvalidSpeedRange { low, high } => {
                write!(f, "Particle speed range {low}..{high} is invalid")
            }
            ConfigError::InvalidSizeRange { low, high } => {
                write!(f, "Particle size range {low}..{high} is invalid")
            }
            ConfigError::InvalidReferenceFps(fps) => {
                write!(f, "Reference frame rate must be a positive number, got {fps}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// How particles advance along their vessels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParticleTiming {
    /// One speed step per rendered frame, so flow speed follows the frame rate
    #[default]
    FrameLocked,
    /// Speed is scaled by elapsed time relative to the reference frame rate
    RealTime,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 680.0,
        }
    }
}

/// Everything fixed at startup. There is no runtime reconfiguration.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub bpm: BeatsPerMinute,
    pub av_delay: Milliseconds,
    pub atrial_width: Milliseconds,
    pub ventricular_width: Milliseconds,
    pub particle_count: usize,
    /// Path samples per frame at the reference frame rate
    pub particle_speed: RangeInclusive<f32>,
    pub particle_size: RangeInclusive<f32>,
    pub particle_timing: ParticleTiming,
    pub reference_fps: f64,
    pub show_native_rhythm: bool,
    pub seed: Option<u64>,
    pub canvas: CanvasSize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            bpm: BeatsPerMinute(60.0),
            av_delay: Milliseconds(160.0),
            atrial_width: Milliseconds(80.0),
            ventricular_width: Milliseconds(80.0),
            particle_count: 80,
            particle_speed: 0.4..=1.2,
            particle_size: 2.0..=4.0,
            particle_timing: ParticleTiming::FrameLocked,
            reference_fps: 60.0,
            show_native_rhythm: true,
            seed: None,
            canvas: CanvasSize::default(),
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.bpm.is_valid() {
            return Err(ConfigError::NonPositiveBpm(*self.bpm));
        }
        let cycle = self.bpm.cycle();
        check_window("atrial", Milliseconds(0.0), self.atrial_width, cycle)?;
        check_window("ventricular", self.av_delay, self.ventricular_width, cycle)?;
        let (low, high) = (*self.particle_speed.start(), *self.particle_speed.end());
        if !(low.is_finite() && high.is_finite()) || low > high {
            return Err(ConfigError::InvalidSpeedRange { low, high });
        }
        let (low, high) = (*self.particle_size.start(), *self.particle_size.end());
        if !(low.is_finite() && high.is_finite()) || low < 0.0 || low > high {
            return Err(ConfigError::InvalidSizeRange { low, high });
        }
        if !(self.reference_fps.is_finite() && self.reference_fps > 0.0) {
            return Err(ConfigError::InvalidReferenceFps(self.reference_fps));
        }
        Ok(())
    }
}

fn check_window(
    name: &'static str,
    start: Milliseconds,
    width: Milliseconds,
    cycle: Milliseconds,
) -> Result<(), ConfigError> {
    if !(width.0 > 0.0) {
        return Err(ConfigError::EmptyPulseWindow { name, width: width.0 });
    }
    let end = start + width;
    if !(start.0 >= 0.0) || end > cycle {
        return Err(ConfigError::PulseWindowOutsideCycle {
            name,
            start: start.0,
            end: end.0,
            cycle: cycle.0,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(SimulationConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_zero_and_negative_bpm() {
        for bpm in [0.0, -60.0, f32::NAN] {
            let config = SimulationConfig {
                bpm: BeatsPerMinute(bpm),
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::NonPositiveBpm(_))
            ));
        }
    }

    #[test]
    fn test_rejects_window_beyond_cycle() {
        // 300 bpm gives a 200ms cycle, too short for 160 + 80
        let config = SimulationConfig {
            bpm: BeatsPerMinute(300.0),
            ..Default::default()
        };
        let error = config.validate().unwrap_err();
        assert_eq!(
            error,
            ConfigError::PulseWindowOutsideCycle {
                name: "ventricular",
                start: 160.0,
                end: 240.0,
                cycle: 200.0,
            }
        );
        assert!(error.to_string().contains("ventricular"));
    }

    #[test]
    fn test_rejects_empty_window() {
        let config = SimulationConfig {
            atrial_width: Milliseconds(0.0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyPulseWindow { name: "atrial", .. })
        ));
    }

    #[test]
    fn test_rejects_reversed_speed_range() {
        let config = SimulationConfig {
            particle_speed: 1.2..=0.4,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSpeedRange { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_size_range() {
        for particle_size in [-5.0..=-3.0, 4.0..=2.0, f32::NAN..=4.0, 2.0..=f32::INFINITY] {
            let config = SimulationConfig {
                particle_size,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidSizeRange { .. })
            ));
        }
    }

    #[test]
    fn test_rejects_bad_reference_fps() {
        for reference_fps in [0.0, -60.0, f64::NAN, f64::INFINITY] {
            let config = SimulationConfig {
                particle_timing: ParticleTiming::RealTime,
                reference_fps,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidReferenceFps(_))
            ));
        }
    }
}
