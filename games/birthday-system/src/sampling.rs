//! Random placement and coloring. Every draw goes through the scene's seeded `Rng`.

use glam::Vec3;
use nova_engine::{Rng, SDFColor};

/// Point uniformly distributed over a sphere of the given radius.
pub fn sphere_point(rng: &mut Rng, radius: f32) -> Vec3 {
    rng.unit_vector() * radius
}

/// Point on a spherical shell: uniform direction, radius drawn from `radius`.
pub fn shell_point(rng: &mut Rng, radius: (f32, f32)) -> Vec3 {
    let dir = rng.unit_vector();
    dir * rng.in_range(radius)
}

/// Pastel HSL color: any hue, saturation and lightness within the given bands.
pub fn pastel_color(rng: &mut Rng, saturation: (f32, f32), lightness: (f32, f32)) -> SDFColor {
    let hue = rng.next_f32();
    let s = rng.in_range(saturation);
    let l = rng.in_range(lightness);
    SDFColor::from_hsl(hue, s, l)
}
