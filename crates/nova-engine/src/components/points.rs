use glam::Vec3;
use crate::components::mesh::SDFColor;

/// A static cloud of points in the entity's local space (e.g. a star field).
/// Scaling the owning entity scales the whole cloud about its origin.
#[derive(Debug, Clone)]
pub struct PointCloud {
    pub positions: Vec<Vec3>,
    /// Point size in world units (attenuated by distance when projected).
    pub size: f32,
    pub color: SDFColor,
    pub alpha: f32,
}

impl PointCloud {
    pub fn new(positions: Vec<Vec3>, size: f32, color: SDFColor) -> Self {
        Self {
            positions,
            size,
            color,
            alpha: 1.0,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
