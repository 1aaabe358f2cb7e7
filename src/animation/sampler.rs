/*
 * Copyright (c) 2020. Beautiful Code BV, Rotterdam, Netherlands
 * Licensed under GNU GENERAL PUBLIC LICENSE Version 3.
 */

//! Positions along sampled paths for a continuous, fractional index.
//!
//! Every path is treated as a closed loop here: an index past the last
//! sample interpolates back toward the first, even for vessels that are
//! open at both ends. Markers therefore cycle around smoothly instead of
//! jumping when they wrap.

use glam::Vec2;

use crate::geometry::{Path, PathId};

/// Interpolated position for `continuous_index`, or `None` when the path
/// has fewer than two samples.
pub fn resolve_position(points: &[Vec2], continuous_index: f32) -> Option<Vec2> {
    let n = points.len();
    if n < 2 {
        return None;
    }
    let wrapped = continuous_index.rem_euclid(n as f32);
    let index = wrapped.floor() as usize % n;
    let fraction = wrapped - wrapped.floor();
    let next = (index + 1) % n;
    Some(points[index].lerp(points[next], fraction))
}

/// Something travelling along one path of the geometry table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovingMarker {
    pub path: PathId,
    pub index: f32,
    /// Samples per step
    pub speed: f32,
}

impl MovingMarker {
    pub fn new(path: PathId, index: f32, speed: f32) -> Self {
        Self { path, index, speed }
    }

    /// Move `steps` speed-units forward, wrapping at the path length.
    /// Inert on degenerate paths.
    pub fn advance(&mut self, paths: &[Path], steps: f32) {
        let Some(path) = paths.get(self.path.0) else {
            return;
        };
        if !path.is_traversable() {
            return;
        }
        self.index = (self.index + self.speed * steps).rem_euclid(path.len() as f32);
    }

    pub fn position(&self, paths: &[Path]) -> Option<Vec2> {
        let path = paths.get(self.path.0)?;
        resolve_position(path.points(), self.index)
    }
}
