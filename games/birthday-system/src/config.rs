use glam::Vec2;
use nova_engine::{AssetManifest, SoundDescriptor, VideoDescriptor};

// ── Custom event kinds from the page ────────────────────────────────

pub const CUSTOM_START: u32 = 1;
pub const CUSTOM_CLOSE_VIDEO: u32 = 2;
pub const CUSTOM_CLOSE_MESSAGE: u32 = 3;
/// Viewport resize (sent by the host as kind=99).
pub const CUSTOM_RESIZE: u32 = 99;

// ── Game event kinds to the page ────────────────────────────────────

/// Exponential fog: a = packed 0xRRGGBB color, b = density.
pub const EVENT_FOG: f32 = 1.0;

// ── Sound cues ──────────────────────────────────────────────────────

pub const SOUND_EXPLOSION: u32 = 1;

// ── Scene look ──────────────────────────────────────────────────────

pub const FOG_COLOR: u32 = 0x000021;
pub const FOG_DENSITY: f32 = 0.00015;
pub const HEMI_SKY: u32 = 0xffeebb;
pub const HEMI_GROUND: u32 = 0x080822;
pub const HEMI_INTENSITY: f32 = 0.6;
pub const POINT_LIGHT_INTENSITY: f32 = 1.2;
pub const METEOR_COLOR: u32 = 0xdddddd;
pub const LABEL_FONT: &str = "bold 48px Montserrat, sans-serif";
pub const FLASH_STOPS: [&str; 4] = ["#fff", "#ffdd33", "#ff6666", "transparent"];

/// Tunables for the scene. `Default` is the shipped layout; tests shrink the counts.
/// Ranges are half-open `(min, max)` pairs.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub camera_fov: f32,
    pub camera_near: f32,
    pub camera_far: f32,
    pub camera_position: glam::Vec3,
    pub orbit_damping: f32,
    /// Pointer travel in pixels before a press turns into a drag.
    pub drag_threshold: f32,

    pub star_count: usize,
    pub star_radius: f32,
    pub star_size: f32,

    pub planet_radius: f32,
    pub ring_radius: (f32, f32),
    pub ring_height: (f32, f32),
    pub label_offset: f32,
    pub label_size: Vec2,
    /// Emissive glow as a fraction of the base color.
    pub emissive: f32,
    /// Pivot spin in radians per tick for item 0; later items add `planet_spin_step` each.
    pub planet_spin: f32,
    pub planet_spin_step: f32,

    pub decorative_count: usize,
    pub decorative_shell: (f32, f32),
    pub decorative_radius: (f32, f32),
    pub decorative_saturation: (f32, f32),
    pub decorative_lightness: (f32, f32),
    pub decorative_spin: f32,
    pub decorative_spin_step: f32,

    pub meteor_count: usize,
    pub meteor_radius: (f32, f32),
    pub meteor_x: (f32, f32),
    pub meteor_y: (f32, f32),
    pub meteor_depth: (f32, f32),
    /// World units per tick.
    pub meteor_speed: (f32, f32),
    /// How far past the camera a meteor may travel before it is recycled.
    pub meteor_margin: f32,

    pub burst_count: usize,
    pub burst_speed: (f32, f32),
    pub burst_fade: f32,

    /// Characters revealed per second in the message modal.
    pub typewriter_cps: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera_fov: 60.0,
            camera_near: 0.1,
            camera_far: 2000.0,
            camera_position: glam::Vec3::new(0.0, 10.0, 40.0),
            orbit_damping: 0.1,
            drag_threshold: 4.0,

            star_count: 20_000,
            star_radius: 1000.0,
            star_size: 1.0,

            planet_radius: 3.0,
            ring_radius: (15.0, 35.0),
            ring_height: (-5.0, 5.0),
            label_offset: 5.0,
            label_size: Vec2::new(14.0, 4.0),
            emissive: 0.2,
            planet_spin: 0.002,
            planet_spin_step: 0.0005,

            decorative_count: 20,
            decorative_shell: (50.0, 400.0),
            decorative_radius: (2.0, 50.0),
            decorative_saturation: (0.6, 1.0),
            decorative_lightness: (0.5, 0.8),
            decorative_spin: 0.001,
            decorative_spin_step: 0.0001,

            meteor_count: 50,
            meteor_radius: (0.1, 0.6),
            meteor_x: (-100.0, 100.0),
            meteor_y: (-50.0, 50.0),
            meteor_depth: (-1000.0, -500.0),
            meteor_speed: (0.5, 2.5),
            meteor_margin: 5.0,

            burst_count: 40,
            burst_speed: (0.2, 1.0),
            burst_fade: 0.02,

            typewriter_cps: 40.0,
        }
    }
}

/// Media the page loads unless the host supplies its own manifest.
pub fn default_manifest() -> AssetManifest {
    let mut manifest = AssetManifest::default();
    manifest.sounds.insert(
        "explosion".into(),
        SoundDescriptor::new("audio/explosion.mp3")
            .with_event(SOUND_EXPLOSION)
            .with_volume(0.2),
    );
    manifest.sounds.insert(
        "ambient".into(),
        SoundDescriptor::new("audio/ambient.mp3").with_volume(0.2).looping(),
    );
    manifest.videos.insert(
        "kika".into(),
        VideoDescriptor { path: "videos/planet1.mp4".into() },
    );
    manifest
}
