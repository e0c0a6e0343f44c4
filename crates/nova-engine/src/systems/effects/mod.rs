//! Visual effects: particle bursts plus the scene's shared random source.

mod rng;
mod particle;

pub use rng::Rng;
pub use particle::ParticleBurst;

use glam::Vec3;
use crate::components::mesh::SDFColor;

/// Container for transient visual effects.
/// Games spawn bursts via public methods; the engine ticks them once per fixed step.
#[derive(Debug)]
pub struct EffectsState {
    pub bursts: Vec<ParticleBurst>,
    pub rng: Rng,
}

impl EffectsState {
    /// Create a new EffectsState with the given RNG seed.
    pub fn new(seed: u64) -> Self {
        EffectsState {
            bursts: Vec::new(),
            rng: Rng::new(seed.wrapping_add(7919)),
        }
    }

    /// Spawn `count` points at `center`, each moving in a uniformly random
    /// direction at a speed drawn from `speed` (world units per tick).
    pub fn spawn_burst(&mut self, center: Vec3, count: usize, speed: (f32, f32), fade: f32, color: SDFColor) {
        let mut velocities = Vec::with_capacity(count);
        for _ in 0..count {
            let dir = self.rng.unit_vector();
            velocities.push(dir * self.rng.in_range(speed));
        }
        let positions = vec![center; count];
        self.bursts.push(ParticleBurst::new(positions, velocities, fade).with_color(color));
    }

    /// Advance all bursts and drop the ones that have faded out.
    pub fn tick(&mut self) {
        self.bursts.retain_mut(|b| b.tick());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_speeds_stay_in_range() {
        let mut fx = EffectsState::new(3);
        fx.spawn_burst(Vec3::new(1.0, 2.0, 3.0), 40, (0.2, 1.0), 0.02, SDFColor::WHITE);
        assert_eq!(fx.bursts[0].len(), 40);
        for v in &fx.bursts[0].velocities {
            let speed = v.length();
            assert!(speed >= 0.2 - 1e-4 && speed < 1.0 + 1e-4, "speed {}", speed);
        }
    }

    #[test]
    fn burst_is_discarded_once_transparent() {
        let mut fx = EffectsState::new(3);
        fx.spawn_burst(Vec3::ZERO, 10, (0.2, 1.0), 0.25, SDFColor::WHITE);
        for _ in 0..3 {
            fx.tick();
        }
        assert_eq!(fx.bursts.len(), 1);
        fx.tick();
        assert!(fx.bursts.is_empty());
    }
}
