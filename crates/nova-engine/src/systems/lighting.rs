/// Scene lighting for the host's sphere shader.
///
/// Lights are persistent: add them once at init and they stay until removed.
/// Point lights are serialized in world space; the host combines them with the
/// camera matrices to shade each projected sphere.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use crate::components::mesh::SDFColor;

/// Floats per point light on the wire.
pub const LIGHT_FLOATS: usize = 8;

/// Floats in the hemisphere block: sky rgb, ground rgb, intensity.
pub const HEMISPHERE_FLOATS: usize = 7;

/// A 3D point light.
///
/// Wire format (8 floats / 32 bytes):
/// `[x, y, z, r, g, b, intensity, range]`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PointLight {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub intensity: f32,
    /// Falloff distance in world units. Zero means no falloff.
    pub range: f32,
}

impl PointLight {
    pub fn new(pos: Vec3, color: SDFColor, intensity: f32) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            z: pos.z,
            r: color.r,
            g: color.g,
            b: color.b,
            intensity,
            range: 0.0,
        }
    }

    pub fn pos(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// Sky/ground gradient ambient light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HemisphereLight {
    pub sky: SDFColor,
    pub ground: SDFColor,
    pub intensity: f32,
}

impl HemisphereLight {
    pub fn new(sky: SDFColor, ground: SDFColor, intensity: f32) -> Self {
        Self { sky, ground, intensity }
    }

    pub fn to_array(&self) -> [f32; HEMISPHERE_FLOATS] {
        [
            self.sky.r, self.sky.g, self.sky.b,
            self.ground.r, self.ground.g, self.ground.b,
            self.intensity,
        ]
    }
}

impl Default for HemisphereLight {
    /// Flat white ambient: unlit output when no other lights exist.
    fn default() -> Self {
        Self::new(SDFColor::WHITE, SDFColor::WHITE, 1.0)
    }
}

/// Manages the hemisphere light and active point lights.
#[derive(Debug)]
pub struct LightState {
    lights: Vec<PointLight>,
    hemisphere: HemisphereLight,
    hemisphere_buffer: [f32; HEMISPHERE_FLOATS],
}

impl LightState {
    pub fn new() -> Self {
        Self::with_capacity(8)
    }

    pub fn with_capacity(max_lights: usize) -> Self {
        let hemisphere = HemisphereLight::default();
        Self {
            lights: Vec::with_capacity(max_lights),
            hemisphere,
            hemisphere_buffer: hemisphere.to_array(),
        }
    }

    pub fn add(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    pub fn count(&self) -> usize {
        self.lights.len()
    }

    pub fn set_hemisphere(&mut self, hemisphere: HemisphereLight) {
        self.hemisphere = hemisphere;
        self.hemisphere_buffer = hemisphere.to_array();
    }

    pub fn hemisphere(&self) -> HemisphereLight {
        self.hemisphere
    }

    /// Pointer to the point-light array for host reads.
    pub fn buffer_ptr(&self) -> *const f32 {
        self.lights.as_ptr() as *const f32
    }

    /// Pointer to the hemisphere block for host reads.
    pub fn hemisphere_ptr(&self) -> *const f32 {
        self.hemisphere_buffer.as_ptr()
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}
