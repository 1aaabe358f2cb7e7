use glam::Vec2;
use log::debug;

use crate::cycle::{CycleSnapshot, Pacing};
use crate::geometry::{Fiber, FiberBundle, Path};

pub const ATRIAL_SPARK_SPEED: f32 = 0.8;
pub const NATIVE_SPARK_SPEED: f32 = 0.4;
pub const HIS_SPARK_SPEED: f32 = 0.9;
pub const PURKINJE_SPARK_SPEED: f32 = 0.8;

/// Conduction system geometry, owned by the scene
#[derive(Debug, Clone, Default)]
pub struct ConductionPaths {
    /// SA node to AV node
    pub sa_to_av: Path,
    /// AV node down the bundle of His
    pub his: Path,
    pub right_bundle: FiberBundle,
    pub left_bundle: FiberBundle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SparkKind {
    /// Paced atrial impulse
    Atrial,
    /// Underlying sinus rhythm that never gets past the blocked AV node
    Native,
    His,
    Purkinje,
}

/// Where an impulse is this frame. Not kept between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spark {
    pub kind: SparkKind,
    pub position: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerState {
    #[default]
    Idle,
    Active,
}

impl From<bool> for MarkerState {
    fn from(active: bool) -> Self {
        if active {
            MarkerState::Active
        } else {
            MarkerState::Idle
        }
    }
}

/// Stepped spark along a dense path: the sample index advances in whole
/// steps with the phase and the spark sits halfway to the next sample,
/// which gives the visible ticking motion.
pub fn spark_along(path: &Path, phase: f64, speed: f32) -> Option<Vec2> {
    let points = path.points();
    let n = points.len();
    if n < 2 {
        return None;
    }
    let step = (phase * n as f64 * speed as f64).floor().max(0.0) as usize;
    let index = step % (n - 1);
    Some(points[index].lerp(points[index + 1], 0.5))
}

/// Continuous spark along a single fiber
pub fn spark_on_fiber(fiber: &Fiber, phase: f64, speed: f32) -> Vec2 {
    let fraction = (phase * speed as f64).rem_euclid(1.0) as f32;
    fiber.point_at(fraction)
}

/// Emits conduction sparks gated by the pacing windows.
///
/// Each marker group is either idle or active, re-evaluated every frame
/// with no hysteresis. The remembered state is only used to report
/// transitions; positions always come fresh from the current phase.
#[derive(Debug, Clone, Default)]
pub struct ConductionAnimator {
    show_native_rhythm: bool,
    atrial: MarkerState,
    ventricular: MarkerState,
}

impl ConductionAnimator {
    pub fn new(show_native_rhythm: bool) -> Self {
        Self {
            show_native_rhythm,
            ..Default::default()
        }
    }

    pub fn atrial_state(&self) -> MarkerState {
        self.atrial
    }

    pub fn ventricular_state(&self) -> MarkerState {
        self.ventricular
    }

    pub fn sparks(
        &mut self,
        paths: &ConductionPaths,
        pacing: &Pacing,
        snapshot: &CycleSnapshot,
    ) -> Vec<Spark> {
        self.transition(pacing, snapshot);
        let phase = snapshot.phase;
        let mut sparks = Vec::new();
        let atrial = if pacing.atrial {
            Some((SparkKind::Atrial, ATRIAL_SPARK_SPEED))
        } else if self.show_native_rhythm {
            Some((SparkKind::Native, NATIVE_SPARK_SPEED))
        } else {
            None
        };
        if let Some((kind, speed)) = atrial {
            if let Some(position) = spark_along(&paths.sa_to_av, phase, speed) {
                sparks.push(Spark { kind, position });
            }
        }
        if pacing.ventricular {
            if let Some(position) = spark_along(&paths.his, phase, HIS_SPARK_SPEED) {
                sparks.push(Spark {
                    kind: SparkKind::His,
                    position,
                });
            }
            let fibers = paths
                .right_bundle
                .fibers()
                .iter()
                .chain(paths.left_bundle.fibers());
            sparks.extend(fibers.map(|fiber| Spark {
                kind: SparkKind::Purkinje,
                position: spark_on_fiber(fiber, phase, PURKINJE_SPARK_SPEED),
            }));
        }
        sparks
    }

    fn transition(&mut self, pacing: &Pacing, snapshot: &CycleSnapshot) {
        let atrial = MarkerState::from(pacing.atrial);
        if atrial != self.atrial {
            debug!("Atrial markers {:?} at {}", atrial, snapshot.elapsed_in_cycle);
            self.atrial = atrial;
        }
        let ventricular = MarkerState::from(pacing.ventricular);
        if ventricular != self.ventricular {
            debug!(
                "Ventricular markers {:?} at {}",
                ventricular, snapshot.elapsed_in_cycle
            );
            self.ventricular = ventricular;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::FiberFan;
    use crate::units::{Degrees, Milliseconds};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn line(n: usize) -> Path {
        Path::new((0..n).map(|i| Vec2::new(i as f32, 0.0)).collect())
    }

    fn snapshot(phase: f64) -> CycleSnapshot {
        CycleSnapshot {
            cycle: Milliseconds(1000.0),
            elapsed_in_cycle: Milliseconds(phase * 1000.0),
            phase,
        }
    }

    fn paths() -> ConductionPaths {
        let bundle = FiberFan {
            origin: Vec2::ZERO,
            count: 3,
            radius: 50.0..=50.0,
            angles: (Degrees(-45.0), Degrees(45.0)),
            baseline_y: 0.0,
        }
        .generate(&mut ChaCha8Rng::seed_from_u64(0));
        ConductionPaths {
            sa_to_av: line(37),
            his: line(25),
            right_bundle: bundle.clone(),
            left_bundle: bundle,
        }
    }

    #[test]
    fn test_spark_steps_by_half_sample() {
        let path = line(37);
        // floor(0.05 * 37 * 0.8) = 1
        assert_eq!(spark_along(&path, 0.05, 0.8), Some(Vec2::new(1.5, 0.0)));
        assert_eq!(spark_along(&path, 0.0, 0.8), Some(Vec2::new(0.5, 0.0)));
        // the spark never references past the last sample
        for step in 0..1000 {
            let position = spark_along(&path, step as f64 / 1000.0, 1.7).unwrap();
            assert!(position.x > 0.0 && position.x < 36.0);
        }
    }

    #[test]
    fn test_spark_needs_two_samples() {
        assert_eq!(spark_along(&line(1), 0.5, 0.8), None);
        assert_eq!(spark_along(&Path::default(), 0.5, 0.8), None);
    }

    #[test]
    fn test_fiber_spark_wraps() {
        let fiber = Fiber {
            origin: Vec2::ZERO,
            end: Vec2::new(0.0, 100.0),
        };
        let halfway = spark_on_fiber(&fiber, 0.5, 0.8);
        assert!((halfway - Vec2::new(0.0, 40.0)).length() < 1e-4);
        let wrapped = spark_on_fiber(&fiber, 0.75, 2.0);
        assert!((wrapped - Vec2::new(0.0, 50.0)).length() < 1e-4);
    }

    #[test]
    fn test_paced_atrium_emits_one_atrial_spark() {
        let mut animator = ConductionAnimator::new(true);
        let pacing = Pacing {
            atrial: true,
            ..Default::default()
        };
        let sparks = animator.sparks(&paths(), &pacing, &snapshot(0.04));
        assert_eq!(sparks.len(), 1);
        assert_eq!(sparks[0].kind, SparkKind::Atrial);
        assert_eq!(animator.atrial_state(), MarkerState::Active);
    }

    #[test]
    fn test_native_rhythm_only_when_shown() {
        let idle = Pacing::default();
        let mut shown = ConductionAnimator::new(true);
        let sparks = shown.sparks(&paths(), &idle, &snapshot(0.5));
        assert_eq!(sparks.len(), 1);
        assert_eq!(sparks[0].kind, SparkKind::Native);
        let mut hidden = ConductionAnimator::new(false);
        assert!(hidden.sparks(&paths(), &idle, &snapshot(0.5)).is_empty());
    }

    #[test]
    fn test_ventricular_sparks_cover_every_fiber() {
        let mut animator = ConductionAnimator::new(false);
        let pacing = Pacing {
            ventricular: true,
            ..Default::default()
        };
        let sparks = animator.sparks(&paths(), &pacing, &snapshot(0.2));
        assert_eq!(sparks.iter().filter(|s| s.kind == SparkKind::His).count(), 1);
        assert_eq!(sparks.iter().filter(|s| s.kind == SparkKind::Purkinje).count(), 6);
        assert_eq!(animator.ventricular_state(), MarkerState::Active);
        animator.sparks(&paths(), &Pacing::default(), &snapshot(0.3));
        assert_eq!(animator.ventricular_state(), MarkerState::Idle);
    }
}
