use bytemuck::{Pod, Zeroable};

/// Per-instance SDF sphere data, already projected to screen space.
/// The host draws each as a lit impostor sphere.
/// 12 floats = 48 bytes per instance.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SDFInstance {
    /// Pixel position, origin top-left.
    pub x: f32,
    pub y: f32,
    /// Radius in pixels.
    pub radius: f32,
    /// View-space distance, used for painter ordering and fog.
    pub depth: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub shininess: f32,
    pub emissive: f32,
    pub alpha: f32,
    pub _pad0: f32,
    pub _pad1: f32,
}

impl SDFInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Buffer of SDF instances, ordered back to front.
#[derive(Debug)]
pub struct SDFBuffer {
    instances: Vec<SDFInstance>,
    max: usize,
}

impl SDFBuffer {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

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
    pub fn push(&mut self, instance: SDFInstance) -> bool {
        if self.instances.len() >= self.max {
            return false;
        }
        self.instances.push(instance);
        true
    }

    pub fn instances(&self) -> &[SDFInstance] {
        &self.instances
    }

    pub fn instances_mut(&mut self) -> &mut Vec<SDFInstance> {
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

impl Default for SDFBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sdf_instance_is_48_bytes() {
        assert_eq!(std::mem::size_of::<SDFInstance>(), 48);
        assert_eq!(SDFInstance::FLOATS, 12);
    }

    #[test]
    fn push_stops_at_capacity() {
        let mut buf = SDFBuffer::with_capacity(2);
        assert!(buf.push(SDFInstance::default()));
        assert!(buf.push(SDFInstance::default()));
        assert!(!buf.push(SDFInstance::default()));
        assert_eq!(buf.instance_count(), 2);
        assert_eq!(buf.as_floats().len(), 24);
        buf.clear();
        assert_eq!(buf.instance_count(), 0);
    }
}
