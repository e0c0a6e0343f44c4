pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{EntityId, TextureId, SoundEvent, GameEvent};
pub use components::entity::Entity;
pub use components::mesh::{MeshComponent, SDFShape, SDFColor};
pub use components::points::PointCloud;
pub use components::sprite::SpriteComponent;
pub use core::scene::Scene;
pub use core::time::FixedTimestep;
pub use renderer::camera::{PerspectiveCamera, OrbitControls, Projection, Ray};
pub use renderer::instance::{BillboardInstance, BillboardBuffer, PointInstance, PointBuffer};
pub use renderer::sdf_instance::{SDFInstance, SDFBuffer};
pub use input::queue::{InputEvent, InputQueue};
pub use assets::manifest::{AssetManifest, SoundDescriptor, VideoDescriptor};
pub use assets::registry::{TextureRegistry, TextureDescriptor};
pub use bridge::protocol::ProtocolLayout;
pub use systems::effects::{EffectsState, ParticleBurst, Rng};
pub use systems::lighting::{PointLight, HemisphereLight, LightState};

// Extensions: decoupled optional systems
pub use extensions::{
    Easing, lerp, lerp_vec3, ease, ease_vec3,
    TweenState, Tween, TweenId, TweenTarget, TweenGroupId,
};
