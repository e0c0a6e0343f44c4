/// Frame buffer layout shared with the host renderer.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [SDF spheres: max_sdf_instances × 12 floats]
/// [Billboards: max_billboards × 8 floats]
/// [Points: max_points × 4 floats]
/// [Sounds: max_sounds × 1 float]
/// [Events: max_events × 4 floats]
/// [Lights: max_lights × 8 floats]
/// ```
///
/// Capacities are written into the header each frame alongside the live counts.
/// The host reads them from the header to compute offsets.

use crate::api::game::GameConfig;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_SDF_INSTANCES: usize = 2;
pub const HEADER_SDF_INSTANCE_COUNT: usize = 3;
pub const HEADER_MAX_BILLBOARDS: usize = 4;
pub const HEADER_BILLBOARD_COUNT: usize = 5;
pub const HEADER_MAX_POINTS: usize = 6;
pub const HEADER_POINT_COUNT: usize = 7;
pub const HEADER_MAX_SOUNDS: usize = 8;
pub const HEADER_SOUND_COUNT: usize = 9;
pub const HEADER_MAX_EVENTS: usize = 10;
pub const HEADER_EVENT_COUNT: usize = 11;
pub const HEADER_MAX_LIGHTS: usize = 12;
pub const HEADER_LIGHT_COUNT: usize = 13;
pub const HEADER_VIEWPORT_WIDTH: usize = 14;
pub const HEADER_VIEWPORT_HEIGHT: usize = 15;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per SDF sphere: x, y, radius, depth, r, g, b, shininess, emissive, alpha, pad×2.
pub const SDF_INSTANCE_FLOATS: usize = 12;

/// Floats per billboard: x, y, width, height, depth, alpha, texture, depth_test.
pub const BILLBOARD_FLOATS: usize = 8;

/// Floats per point: x, y, size, alpha.
pub const POINT_FLOATS: usize = 4;

/// Floats per game event: kind, a, b, c.
pub const EVENT_FLOATS: usize = 4;

/// Floats per point light: x, y, z, r, g, b, intensity, range.
pub const LIGHT_FLOATS: usize = crate::systems::lighting::LIGHT_FLOATS;

/// Floats in the camera block: view matrix then projection matrix, column-major.
pub const CAMERA_FLOATS: usize = 32;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_sdf_instances: usize,
    pub max_billboards: usize,
    pub max_points: usize,
    pub max_sounds: usize,
    pub max_events: usize,
    pub max_lights: usize,

    /// Offset (in floats) where SDF data begins.
    pub sdf_data_offset: usize,
    /// Offset (in floats) where billboard data begins.
    pub billboard_data_offset: usize,
    /// Offset (in floats) where point data begins.
    pub point_data_offset: usize,
    /// Offset (in floats) where sound data begins.
    pub sound_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,
    /// Offset (in floats) where light data begins.
    pub light_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(
        max_sdf_instances: usize,
        max_billboards: usize,
        max_points: usize,
        max_sounds: usize,
        max_events: usize,
        max_lights: usize,
    ) -> Self {
        let sdf_data_offset = HEADER_FLOATS;
        let billboard_data_offset = sdf_data_offset + max_sdf_instances * SDF_INSTANCE_FLOATS;
        let point_data_offset = billboard_data_offset + max_billboards * BILLBOARD_FLOATS;
        let sound_data_offset = point_data_offset + max_points * POINT_FLOATS;
        let event_data_offset = sound_data_offset + max_sounds;
        let light_data_offset = event_data_offset + max_events * EVENT_FLOATS;
        let buffer_total_floats = light_data_offset + max_lights * LIGHT_FLOATS;

        Self {
            max_sdf_instances,
            max_billboards,
            max_points,
            max_sounds,
            max_events,
            max_lights,
            sdf_data_offset,
            billboard_data_offset,
            point_data_offset,
            sound_data_offset,
            event_data_offset,
            light_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.max_sdf_instances,
            config.max_billboards,
            config.max_points,
            config.max_sounds,
            config.max_events,
            config.max_lights,
        )
    }

    /// Fill the capacity fields of a header. Counts are written per frame.
    pub fn write_capacities(&self, header: &mut [f32; HEADER_FLOATS]) {
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_MAX_SDF_INSTANCES] = self.max_sdf_instances as f32;
        header[HEADER_MAX_BILLBOARDS] = self.max_billboards as f32;
        header[HEADER_MAX_POINTS] = self.max_points as f32;
        header[HEADER_MAX_SOUNDS] = self.max_sounds as f32;
        header[HEADER_MAX_EVENTS] = self.max_events as f32;
        header[HEADER_MAX_LIGHTS] = self.max_lights as f32;
    }
}
