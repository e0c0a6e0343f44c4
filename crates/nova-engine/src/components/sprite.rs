use glam::Vec2;
use crate::api::types::TextureId;

/// Camera-facing billboard (text labels, flashes).
/// The texture itself is described in the `TextureRegistry` and rasterized by the host.
#[derive(Debug, Clone)]
pub struct SpriteComponent {
    /// Which registered texture to draw.
    pub texture: TextureId,
    /// Size in world units before entity scale.
    pub size: Vec2,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    /// When false the billboard is drawn on top of scene geometry.
    pub depth_test: bool,
}

impl SpriteComponent {
    pub fn new(texture: TextureId, size: Vec2) -> Self {
        Self {
            texture,
            size,
            alpha: 1.0,
            depth_test: true,
        }
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn without_depth_test(mut self) -> Self {
        self.depth_test = false;
        self
    }
}
