use std::ops::RangeInclusive;

use glam::Vec2;
use rand::Rng;

use crate::units::Degrees;

/// Vertical squash applied to fiber endpoints so the fan lies flat
const FAN_FLATTENING: f32 = 0.4;

/// One straight conduction fiber
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fiber {
    pub origin: Vec2,
    pub end: Vec2,
}

impl Fiber {
    pub fn point_at(&self, fraction: f32) -> Vec2 {
        self.origin.lerp(self.end, fraction)
    }
}

/// Description of a fan of fibers radiating from one point
#[derive(Debug, Clone)]
pub struct FiberFan {
    pub origin: Vec2,
    pub count: usize,
    pub radius: RangeInclusive<f32>,
    pub angles: (Degrees, Degrees),
    /// Endpoints are spread vertically around this line rather than the origin
    pub baseline_y: f32,
}

/// Fixed set of fibers. Generated once, never re-rolled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FiberBundle {
    fibers: Vec<Fiber>,
}

impl FiberFan {
    /// Evenly spaced angles, each fiber with its own random length.
    pub fn generate(&self, rng: &mut impl Rng) -> FiberBundle {
        let (low, high) = ordered(&self.radius);
        let (from, to) = self.angles;
        let fibers = (0..self.count)
            .map(|i| {
                let t = if self.count > 1 {
                    i as f32 / (self.count - 1) as f32
                } else {
                    0.5
                };
                let angle = from.lerp(to, t).to_radians();
                let radius = rng.random_range(low..=high);
                let end = Vec2::new(
                    self.origin.x + angle.cos() * radius,
                    self.baseline_y + angle.sin() * FAN_FLATTENING * radius,
                );
                Fiber {
                    origin: self.origin,
                    end,
                }
            })
            .collect();
        FiberBundle { fibers }
    }
}

fn ordered(range: &RangeInclusive<f32>) -> (f32, f32) {
    let (a, b) = (*range.start(), *range.end());
    (a.min(b), a.max(b))
}

impl FiberBundle {
    pub fn fibers(&self) -> &[Fiber] {
        &self.fibers
    }

    pub fn len(&self) -> usize {
        self.fibers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fibers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn fan(count: usize) -> FiberFan {
        FiberFan {
            origin: Vec2::new(360.0, 240.0),
            count,
            radius: 60.0..=130.0,
            angles: (Degrees(-45.0), Degrees(45.0)),
            baseline_y: 360.0,
        }
    }

    #[test]
    fn test_endpoints_follow_fan_shape() {
        let bundle = fan(6).generate(&mut ChaCha8Rng::seed_from_u64(7));
        assert_eq!(bundle.len(), 6);
        for fiber in bundle.fibers() {
            assert_eq!(fiber.origin, Vec2::new(360.0, 240.0));
            let dx = fiber.end.x - fiber.origin.x;
            let dy = fiber.end.y - 360.0;
            // cos(±45°) bounds the horizontal reach
            assert!(dx >= 60.0 * 0.7071 - 1e-3 && dx <= 130.0 + 1e-3);
            assert!(dy.abs() <= 0.4 * 130.0 * 0.7072);
        }
        let first = bundle.fibers()[0];
        let last = bundle.fibers()[5];
        assert!(first.end.y < 360.0 && last.end.y > 360.0);
    }

    #[test]
    fn test_same_seed_same_bundle() {
        let a = fan(7).generate(&mut ChaCha8Rng::seed_from_u64(42));
        let b = fan(7).generate(&mut ChaCha8Rng::seed_from_u64(42));
        let c = fan(7).generate(&mut ChaCha8Rng::seed_from_u64(43));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_single_fiber_points_straight() {
        let bundle = fan(1).generate(&mut ChaCha8Rng::seed_from_u64(1));
        let fiber = bundle.fibers()[0];
        assert!((fiber.end.y - 360.0).abs() < 1e-4);
        assert!(fiber.end.x > fiber.origin.x);
    }

    #[test]
    fn test_empty_fan() {
        assert!(fan(0).generate(&mut ChaCha8Rng::seed_from_u64(1)).is_empty());
    }

    #[test]
    fn test_point_along_fiber() {
        let fiber = Fiber {
            origin: Vec2::ZERO,
            end: Vec2::new(10.0, 20.0),
        };
        assert_eq!(fiber.point_at(0.5), Vec2::new(5.0, 10.0));
    }
}
