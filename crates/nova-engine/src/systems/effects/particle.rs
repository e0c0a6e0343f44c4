//! Particle bursts: a fixed set of points drifting at constant velocity
//! under one shared, linearly fading opacity.

use glam::Vec3;
use crate::components::mesh::SDFColor;

#[derive(Debug, Clone)]
pub struct ParticleBurst {
    pub positions: Vec<Vec3>,
    /// World units per tick.
    pub velocities: Vec<Vec3>,
    pub opacity: f32,
    /// Opacity lost per tick.
    pub fade: f32,
    /// Point size in world units.
    pub size: f32,
    pub color: SDFColor,
    age: u32,
    lifetime: u32,
}

impl ParticleBurst {
    pub const DEFAULT_SIZE: f32 = 0.5;

    pub fn new(positions: Vec<Vec3>, velocities: Vec<Vec3>, fade: f32) -> Self {
        Self {
            positions,
            velocities,
            opacity: 1.0,
            fade,
            size: Self::DEFAULT_SIZE,
            color: SDFColor::WHITE,
            age: 0,
            lifetime: lifetime_ticks(fade),
        }
    }

    pub fn with_color(mut self, color: SDFColor) -> Self {
        self.color = color;
        self
    }

    /// Advance one tick. Returns false once fully transparent.
    pub fn tick(&mut self) -> bool {
        for (p, v) in self.positions.iter_mut().zip(&self.velocities) {
            *p += *v;
        }
        self.age = self.age.saturating_add(1);
        self.opacity = (1.0 - self.fade * self.age as f32).max(0.0);
        self.age < self.lifetime
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Ticks until opacity reaches zero. The small slack absorbs f32 error in
/// `1 / fade`, so 0.02 gives 50 rather than 51.
fn lifetime_ticks(fade: f32) -> u32 {
    if fade <= 0.0 {
        return u32::MAX;
    }
    ((1.0 / fade) - 1e-4).ceil().max(1.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_moves_and_fades() {
        let mut burst = ParticleBurst::new(vec![Vec3::ZERO], vec![Vec3::X], 0.25);
        assert!(burst.tick());
        assert_eq!(burst.positions[0], Vec3::X);
        assert!((burst.opacity - 0.75).abs() < 1e-6);
        assert!(burst.tick());
        assert!(burst.tick());
        assert!(!burst.tick());
    }

    #[test]
    fn two_percent_fade_lives_fifty_ticks() {
        let mut burst = ParticleBurst::new(vec![Vec3::ZERO], vec![Vec3::Y], 0.02);
        let mut alive = 1;
        while burst.tick() {
            alive += 1;
        }
        assert_eq!(alive, 50);
        assert!(burst.opacity < 1e-6);
    }

    #[test]
    fn uneven_fade_rounds_lifetime_up() {
        let mut burst = ParticleBurst::new(vec![Vec3::ZERO], vec![Vec3::ZERO], 0.3);
        assert!(burst.tick());
        assert!(burst.tick());
        assert!(burst.tick());
        assert!(burst.opacity > 0.0);
        assert!(!burst.tick());
    }
}
