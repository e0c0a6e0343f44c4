use serde::Serialize;
use crate::api::types::TextureId;

/// A texture the host rasterizes once onto an off-screen canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TextureDescriptor {
    /// A line of centered text on a transparent canvas.
    Text {
        text: String,
        /// CSS font shorthand.
        font: String,
        color: String,
        width: u32,
        height: u32,
    },
    /// A square radial gradient; `stops` are spread evenly from center to edge.
    RadialGradient {
        size: u32,
        stops: Vec<String>,
    },
}

impl TextureDescriptor {
    pub fn text(text: impl Into<String>, font: impl Into<String>, width: u32, height: u32) -> Self {
        TextureDescriptor::Text {
            text: text.into(),
            font: font.into(),
            color: "#fff".into(),
            width,
            height,
        }
    }

    pub fn radial_gradient(size: u32, stops: &[&str]) -> Self {
        TextureDescriptor::RadialGradient {
            size,
            stops: stops.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Registry of textures described by the game.
/// A `TextureId` is the index of its descriptor.
#[derive(Debug, Default)]
pub struct TextureRegistry {
    textures: Vec<TextureDescriptor>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a texture. Identical descriptors share one id.
    pub fn register(&mut self, descriptor: TextureDescriptor) -> TextureId {
        if let Some(index) = self.textures.iter().position(|t| *t == descriptor) {
            return TextureId(index as u32);
        }
        self.textures.push(descriptor);
        TextureId((self.textures.len() - 1) as u32)
    }

    /// Look up a texture by id. Returns None if not found.
    pub fn get(&self, id: TextureId) -> Option<&TextureDescriptor> {
        self.textures.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// All descriptors as a JSON array, indexed by `TextureId`.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.textures)
    }
}
