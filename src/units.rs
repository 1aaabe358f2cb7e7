/*
 * Copyright (c) 2020. Beautiful Code BV, Rotterdam, Netherlands
 * Licensed under GNU GENERAL PUBLIC LICENSE Version 3.
 */

//! Units for the pacing simulation
//!
//! Type-safe wrappers for the handful of quantities the clock and the
//! geometry work with, so a heart rate can never be passed where a
//! duration is expected.

use std::ops::{Add, Deref, Div, Mul, Sub};

/// Duration or timestamp in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Milliseconds(pub f64);

/// Heart rate in beats per minute
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct BeatsPerMinute(pub f32);

/// Angle in degrees (the layout is written in degrees)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Degrees(pub f32);

/// Percentage value (0-100)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Percent(pub f32);

pub const MILLISECONDS_PER_MINUTE: f64 = 60_000.0;

impl Deref for Milliseconds {
    type Target = f64;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Deref for BeatsPerMinute {
    type Target = f32;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Deref for Degrees {
    type Target = f32;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Deref for Percent {
    type Target = f32;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl BeatsPerMinute {
    /// Length of one cardiac cycle
    pub fn cycle(self) -> Milliseconds {
        Milliseconds(MILLISECONDS_PER_MINUTE / self.0 as f64)
    }

    /// Usable as a clock rate: strictly positive and finite
    pub fn is_valid(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }
}

impl Milliseconds {
    pub fn from_seconds(seconds: f64) -> Self {
        Self(seconds * 1000.0)
    }

    /// Euclidean remainder, always in `[0, modulus)` for a positive modulus
    pub fn wrapped(self, modulus: Milliseconds) -> Milliseconds {
        let wrapped = self.0.rem_euclid(modulus.0);
        // rem_euclid can round up to the modulus itself for tiny negatives
        if wrapped >= modulus.0 {
            Milliseconds(0.0)
        } else {
            Milliseconds(wrapped)
        }
    }
}

impl Degrees {
    pub fn to_radians(self) -> f32 {
        self.0.to_radians()
    }

    /// Linear interpolation between two angles
    pub fn lerp(self, other: Degrees, t: f32) -> Degrees {
        Degrees(self.0 + (other.0 - self.0) * t)
    }
}

impl Percent {
    /// Convert percentage to a factor (0.0-1.0)
    pub fn as_factor(self) -> f32 {
        self.0 / 100.0
    }
}

impl Add for Milliseconds {
    type Output = Milliseconds;

    fn add(self, other: Milliseconds) -> Milliseconds {
        Milliseconds(self.0 + other.0)
    }
}

impl Sub for Milliseconds {
    type Output = Milliseconds;

    fn sub(self, other: Milliseconds) -> Milliseconds {
        Milliseconds(self.0 - other.0)
    }
}

impl Mul<f64> for Milliseconds {
    type Output = Milliseconds;

    fn mul(self, scalar: f64) -> Milliseconds {
        Milliseconds(self.0 * scalar)
    }
}

// Ratio of two durations
impl Div for Milliseconds {
    type Output = f64;

    fn div(self, other: Milliseconds) -> f64 {
        self.0 / other.0
    }
}

impl std::fmt::Display for Milliseconds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}ms", self.0)
    }
}

impl std::fmt::Display for BeatsPerMinute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}bpm", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_from_bpm() {
        assert_eq!(BeatsPerMinute(60.0).cycle(), Milliseconds(1000.0));
        assert_eq!(BeatsPerMinute(120.0).cycle(), Milliseconds(500.0));
        assert!((*BeatsPerMinute(72.0).cycle() - 833.333).abs() < 1e-3);
    }

    #[test]
    fn test_bpm_validity() {
        assert!(BeatsPerMinute(60.0).is_valid());
        assert!(!BeatsPerMinute(0.0).is_valid());
        assert!(!BeatsPerMinute(-10.0).is_valid());
        assert!(!BeatsPerMinute(f32::NAN).is_valid());
        assert!(!BeatsPerMinute(f32::INFINITY).is_valid());
    }

    #[test]
    fn test_wrapped_stays_in_range() {
        let cycle = Milliseconds(1000.0);
        assert_eq!(Milliseconds(2500.0).wrapped(cycle), Milliseconds(500.0));
        assert_eq!(Milliseconds(1000.0).wrapped(cycle), Milliseconds(0.0));
        let tiny_negative = Milliseconds(-1e-18).wrapped(cycle);
        assert!(*tiny_negative >= 0.0 && *tiny_negative < 1000.0);
    }

    #[test]
    fn test_degree_conversion() {
        assert!((Degrees(180.0).to_radians() - std::f32::consts::PI).abs() < 1e-6);
        assert_eq!(Degrees(-45.0).lerp(Degrees(45.0), 0.5), Degrees(0.0));
    }

    #[test]
    fn test_percent_factor() {
        assert_eq!(Percent(50.0).as_factor(), 0.5);
    }
}
