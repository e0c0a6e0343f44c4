use serde::Serialize;
use crate::api::types::{EntityId, SoundEvent, GameEvent};
use crate::assets::manifest::AssetManifest;
use crate::assets::registry::TextureRegistry;
use crate::core::scene::Scene;
use crate::extensions::tween::TweenState;
use crate::input::queue::InputQueue;
use crate::renderer::camera::PerspectiveCamera;
use crate::systems::effects::EffectsState;
use crate::systems::lighting::LightState;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Initial viewport width in pixels.
    pub viewport_width: f32,
    /// Initial viewport height in pixels.
    pub viewport_height: f32,
    /// Maximum number of projected spheres (default: 512).
    pub max_sdf_instances: usize,
    /// Maximum number of billboards (default: 64).
    pub max_billboards: usize,
    /// Maximum number of points, star fields included (default: 32768).
    pub max_points: usize,
    /// Maximum number of sound events per frame (default: 32).
    pub max_sounds: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Maximum number of point lights (default: 8).
    pub max_lights: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            viewport_width: 800.0,
            viewport_height: 600.0,
            max_sdf_instances: 512,
            max_billboards: 64,
            max_points: 32768,
            max_sounds: 32,
            max_events: 32,
            max_lights: 8,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, configure the scene.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed step. Read input, advance game state, queue sounds and UI commands.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);
}

/// Mutable access to engine state, passed to Game::init and Game::update.
#[derive(Debug)]
pub struct EngineContext {
    pub scene: Scene,
    pub camera: PerspectiveCamera,
    pub effects: EffectsState,
    pub tweens: TweenState,
    pub lights: LightState,
    pub textures: TextureRegistry,
    pub manifest: AssetManifest,
    pub sounds: Vec<SoundEvent>,
    pub events: Vec<GameEvent>,
    /// Serialized commands for the HTML overlay, in emission order.
    pub ui_commands: Vec<serde_json::Value>,
    next_id: u32,
    dt: f32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_config(&GameConfig::default(), 42)
    }

    pub fn with_config(config: &GameConfig, seed: u64) -> Self {
        Self {
            scene: Scene::new(),
            camera: PerspectiveCamera::new(
                60.0,
                config.viewport_width,
                config.viewport_height,
                0.1,
                2000.0,
            ),
            effects: EffectsState::new(seed),
            tweens: TweenState::new(),
            lights: LightState::with_capacity(config.max_lights),
            textures: TextureRegistry::new(),
            manifest: AssetManifest::default(),
            sounds: Vec::new(),
            events: Vec::new(),
            ui_commands: Vec::new(),
            next_id: 1,
            dt: config.fixed_dt,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Remove an entity along with any tweens still targeting it.
    pub fn despawn(&mut self, id: EntityId) {
        self.tweens.remove_entity(id);
        self.scene.despawn(id);
    }

    /// Emit a sound event to be forwarded to the host.
    pub fn emit_sound(&mut self, event: SoundEvent) {
        self.sounds.push(event);
    }

    /// Emit a game event to be forwarded to the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Queue a command for the HTML overlay.
    /// A command that fails to serialize is logged and dropped.
    pub fn emit_ui<T: Serialize>(&mut self, command: &T) {
        match serde_json::to_value(command) {
            Ok(value) => self.ui_commands.push(value),
            Err(e) => log::error!("dropping UI command: {}", e),
        }
    }

    /// Clear per-frame transient data (sounds, events, UI commands).
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
        self.ui_commands.clear();
    }

    /// Advance tweens and particle effects by one fixed step.
    /// Called by the runner after `Game::update()`.
    pub fn step_extensions(&mut self) {
        self.tweens.tick(self.dt, &mut self.scene);
        self.effects.tick();
    }

    /// Fixed timestep in seconds.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::Entity;
    use crate::extensions::{Easing, Tween};
    use glam::Vec3;

    #[derive(Serialize)]
    #[serde(tag = "type", rename_all = "snake_case")]
    enum Command {
        ShowThing { name: String },
    }

    #[test]
    fn ids_are_unique() {
        let mut ctx = EngineContext::new();
        let a = ctx.next_id();
        let b = ctx.next_id();
        assert_ne!(a, b);
    }

    #[test]
    fn ui_commands_serialize_and_clear() {
        let mut ctx = EngineContext::new();
        ctx.emit_ui(&Command::ShowThing { name: "x".into() });
        assert_eq!(ctx.ui_commands[0]["type"], "show_thing");
        assert_eq!(ctx.ui_commands[0]["name"], "x");
        ctx.emit_sound(SoundEvent(1));
        ctx.clear_frame_data();
        assert!(ctx.ui_commands.is_empty());
        assert!(ctx.sounds.is_empty());
    }

    #[test]
    fn step_extensions_advances_tweens_by_fixed_dt() {
        let config = GameConfig { fixed_dt: 0.5, ..Default::default() };
        let mut ctx = EngineContext::with_config(&config, 1);
        let id = ctx.next_id();
        ctx.scene.spawn(Entity::new(id));
        ctx.tweens.add(id, Tween::position(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 1.0, Easing::Linear));
        ctx.step_extensions();
        assert!((ctx.scene.get(id).unwrap().pos.x - 5.0).abs() < 1e-4);
    }

    #[test]
    fn despawn_drops_tweens() {
        let mut ctx = EngineContext::new();
        let id = ctx.next_id();
        ctx.scene.spawn(Entity::new(id));
        ctx.tweens.add(id, Tween::alpha(1.0, 0.0, 1.0, Easing::Linear));
        ctx.despawn(id);
        assert!(ctx.tweens.is_empty());
        assert!(ctx.scene.is_empty());
    }
}
