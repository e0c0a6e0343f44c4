//! Seedable pseudo-random number generator (xorshift64).
//! Every random draw in a scene goes through one of these so layouts can be pinned by seed.

use glam::Vec3;

/// Seedable pseudo-random number generator (xorshift64).
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform float in [0, 1). Uses the top 24 bits so every value is exact in f32.
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform float in [min, max).
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Uniform float in the half-open interval described by a `(min, max)` pair.
    pub fn in_range(&mut self, bounds: (f32, f32)) -> f32 {
        self.range(bounds.0, bounds.1)
    }

    /// Direction uniformly distributed over the unit sphere.
    /// Azimuth is uniform in [0, 2π); the polar angle is `acos(2u - 1)`,
    /// which keeps samples from bunching at the poles.
    pub fn unit_vector(&mut self) -> Vec3 {
        let theta = self.next_f32() * std::f32::consts::TAU;
        let phi = (2.0 * self.next_f32() - 1.0).clamp(-1.0, 1.0).acos();
        let (sin_phi, cos_phi) = phi.sin_cos();
        Vec3::new(sin_phi * theta.cos(), cos_phi, sin_phi * theta.sin())
    }
}
