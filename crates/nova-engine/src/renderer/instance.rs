use bytemuck::{Pod, Zeroable};

/// Camera-facing textured quad, already projected to screen space.
/// 8 floats = 32 bytes per instance.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BillboardInstance {
    /// Pixel center, origin top-left.
    pub x: f32,
    pub y: f32,
    /// Size in pixels.
    pub width: f32,
    pub height: f32,
    /// View-space distance.
    pub depth: f32,
    pub alpha: f32,
    /// Index into the texture registry.
    pub texture: f32,
    /// 1.0 when the quad is occluded by nearer geometry, 0.0 when drawn on top.
    pub depth_test: f32,
}

impl BillboardInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// A single projected point (stars, explosion particles).
/// 4 floats = 16 bytes per instance.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct PointInstance {
    pub x: f32,
    pub y: f32,
    /// Diameter in pixels.
    pub size: f32,
    pub alpha: f32,
}

impl PointInstance {
    pub const FLOATS: usize = 4;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Fixed-capacity instance buffer shared by the billboard and point passes.
#[derive(Debug)]
pub struct InstanceBuffer<T: Pod> {
    instances: Vec<T>,
    max: usize,
}

pub type BillboardBuffer = InstanceBuffer<BillboardInstance>;
pub type PointBuffer = InstanceBuffer<PointInstance>;

impl<T: Pod> InstanceBuffer<T> {
    pub fn with_capacity(max: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max),
            max,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// Push an instance. Returns false once the buffer is full.
    pub fn push(&mut self, instance: T) -> bool {
        if self.instances.len() >= self.max {
            return false;
        }
        self.instances.push(instance);
        true
    }

    pub fn instances(&self) -> &[T] {
        &self.instances
    }

    pub fn instances_mut(&mut self) -> &mut Vec<T> {
        &mut self.instances
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn capacity(&self) -> usize {
        self.max
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}
