// extensions/easing.rs
//
// Pure easing curves for tween interpolation.
// No dependencies on Entity/Scene, just math.

use glam::Vec3;

/// Easing curve applied to normalized tween progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant velocity.
    #[default]
    Linear,
    /// Slow start (t²).
    QuadIn,
    /// Slow end.
    QuadOut,
    /// Stronger slow end (1 - (1-t)³).
    CubicOut,
}

impl Easing {
    /// Apply the curve to `t` in [0, 1]. Input is clamped.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
        }
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linearly interpolate between two Vec3 values.
#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

/// Interpolate with easing.
#[inline]
pub fn ease(a: f32, b: f32, t: f32, easing: Easing) -> f32 {
    lerp(a, b, easing.apply(t))
}

/// Interpolate Vec3 with easing.
#[inline]
pub fn ease_vec3(a: Vec3, b: Vec3, t: f32, easing: Easing) -> Vec3 {
    lerp_vec3(a, b, easing.apply(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 4] = [Easing::Linear, Easing::QuadIn, Easing::QuadOut, Easing::CubicOut];

    #[test]
    fn every_curve_hits_endpoints() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-3, "{:?} at 0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-3, "{:?} at 1", easing);
        }
    }

    #[test]
    fn quad_in_starts_slow() {
        assert!(Easing::QuadIn.apply(0.5) < 0.5);
        assert!(Easing::CubicOut.apply(0.5) > 0.5);
    }

    #[test]
    fn input_is_clamped() {
        assert_eq!(Easing::Linear.apply(2.0), 1.0);
        assert_eq!(Easing::Linear.apply(-1.0), 0.0);
    }

    #[test]
    fn ease_vec3_interpolates() {
        let v = ease_vec3(Vec3::ZERO, Vec3::splat(2.0), 0.5, Easing::Linear);
        assert_eq!(v, Vec3::ONE);
    }
}
