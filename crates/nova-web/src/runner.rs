use nova_engine::{
    Game, GameConfig, EngineContext, AssetManifest,
    InputEvent, InputQueue, FixedTimestep, ProtocolLayout,
    SDFBuffer, BillboardBuffer, PointBuffer,
};
use nova_engine::bridge::protocol::{
    CAMERA_FLOATS, HEADER_FLOATS, HEADER_FRAME_COUNTER,
    HEADER_SDF_INSTANCE_COUNT, HEADER_BILLBOARD_COUNT, HEADER_POINT_COUNT,
    HEADER_SOUND_COUNT, HEADER_EVENT_COUNT, HEADER_LIGHT_COUNT,
    HEADER_VIEWPORT_WIDTH, HEADER_VIEWPORT_HEIGHT,
};
use nova_engine::systems::render::{build_billboard_buffer, build_point_buffer};
use nova_engine::systems::sdf_render::build_sdf_buffer;

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner through
/// `export_game!`, because wasm-bindgen cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    timestep: FixedTimestep,
    config: GameConfig,
    layout: ProtocolLayout,
    initialized: bool,
    sdf_buffer: SDFBuffer,
    billboard_buffer: BillboardBuffer,
    point_buffer: PointBuffer,
    /// Flat buffer of sound event IDs for host reads.
    sound_buffer: Vec<u8>,
    header: [f32; HEADER_FLOATS],
    camera_buffer: [f32; CAMERA_FLOATS],
    ui_json: String,
    frame: u64,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G, seed: u64) -> Self {
        let config = game.config();
        let layout = ProtocolLayout::from_config(&config);
        let mut header = [0.0; HEADER_FLOATS];
        layout.write_capacities(&mut header);

        Self {
            ctx: EngineContext::with_config(&config, seed),
            input: InputQueue::new(),
            timestep: FixedTimestep::new(config.fixed_dt),
            sdf_buffer: SDFBuffer::with_capacity(config.max_sdf_instances),
            billboard_buffer: BillboardBuffer::with_capacity(config.max_billboards),
            point_buffer: PointBuffer::with_capacity(config.max_points),
            sound_buffer: Vec::with_capacity(config.max_sounds),
            header,
            camera_buffer: [0.0; CAMERA_FLOATS],
            ui_json: String::from("[]"),
            frame: 0,
            initialized: false,
            layout,
            config,
            game,
        }
    }

    /// Initialize the game. Call once after construction.
    /// Whatever init emits (events, UI commands) is readable before the first tick.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.publish();
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: fixed-step updates, then rebuild every output buffer.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();

        let steps = self.timestep.accumulate(dt);
        for step in 0..steps {
            self.game.update(&mut self.ctx, &self.input);
            self.ctx.step_extensions();
            // Input is consumed by the first step only; a frame with zero steps keeps it queued.
            if step == 0 {
                self.input.drain();
            }
        }

        self.publish();
    }

    /// Viewport changed. Only the camera projection is affected.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.ctx.camera.resize(width, height);
        self.header[HEADER_VIEWPORT_WIDTH] = self.ctx.camera.viewport.x;
        self.header[HEADER_VIEWPORT_HEIGHT] = self.ctx.camera.viewport.y;
    }

    /// Replace the media manifest. A malformed manifest is logged and ignored.
    pub fn load_manifest(&mut self, json: &str) {
        match AssetManifest::from_json(json) {
            Ok(manifest) => {
                log::info!(
                    "manifest loaded: {} sounds, {} videos",
                    manifest.sounds.len(),
                    manifest.videos.len()
                );
                self.ctx.manifest = manifest;
            }
            Err(e) => log::warn!("ignoring malformed manifest: {}", e),
        }
    }

    fn publish(&mut self) {
        build_sdf_buffer(&self.ctx.scene, &self.ctx.camera, &mut self.sdf_buffer);
        build_billboard_buffer(&self.ctx.scene, &self.ctx.camera, &mut self.billboard_buffer);
        build_point_buffer(&self.ctx.scene, &self.ctx.effects, &self.ctx.camera, &mut self.point_buffer);

        self.sound_buffer.clear();
        for sound in self.ctx.sounds.iter().take(self.config.max_sounds) {
            self.sound_buffer.push(sound.0 as u8);
        }
        self.ctx.events.truncate(self.config.max_events);

        self.ui_json = match serde_json::to_string(&self.ctx.ui_commands) {
            Ok(json) => json,
            Err(e) => {
                log::error!("failed to serialize UI commands: {}", e);
                String::from("[]")
            }
        };

        let view = self.ctx.camera.view_matrix().to_cols_array();
        let projection = self.ctx.camera.projection_matrix().to_cols_array();
        self.camera_buffer[..16].copy_from_slice(&view);
        self.camera_buffer[16..].copy_from_slice(&projection);

        self.frame += 1;
        self.header[HEADER_FRAME_COUNTER] = self.frame as f32;
        self.header[HEADER_SDF_INSTANCE_COUNT] = self.sdf_buffer.instance_count() as f32;
        self.header[HEADER_BILLBOARD_COUNT] = self.billboard_buffer.instance_count() as f32;
        self.header[HEADER_POINT_COUNT] = self.point_buffer.instance_count() as f32;
        self.header[HEADER_SOUND_COUNT] = self.sound_buffer.len() as f32;
        self.header[HEADER_EVENT_COUNT] = self.ctx.events.len() as f32;
        self.header[HEADER_LIGHT_COUNT] = self.ctx.lights.count().min(self.layout.max_lights) as f32;
        self.header[HEADER_VIEWPORT_WIDTH] = self.ctx.camera.viewport.x;
        self.header[HEADER_VIEWPORT_HEIGHT] = self.ctx.camera.viewport.y;
    }

    // ---- Pointer accessors for host reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn sdf_instances_ptr(&self) -> *const f32 {
        self.sdf_buffer.instances_ptr()
    }

    pub fn sdf_instance_count(&self) -> u32 {
        self.sdf_buffer.instance_count() as u32
    }

    pub fn billboards_ptr(&self) -> *const f32 {
        self.billboard_buffer.instances_ptr()
    }

    pub fn billboard_count(&self) -> u32 {
        self.billboard_buffer.instance_count() as u32
    }

    pub fn points_ptr(&self) -> *const f32 {
        self.point_buffer.instances_ptr()
    }

    pub fn point_count(&self) -> u32 {
        self.point_buffer.instance_count() as u32
    }

    pub fn sound_events_ptr(&self) -> *const u8 {
        self.sound_buffer.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sound_buffer.len() as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn lights_ptr(&self) -> *const f32 {
        self.ctx.lights.buffer_ptr()
    }

    pub fn light_count(&self) -> u32 {
        self.ctx.lights.count().min(self.layout.max_lights) as u32
    }

    pub fn hemisphere_ptr(&self) -> *const f32 {
        self.ctx.lights.hemisphere_ptr()
    }

    pub fn camera_ptr(&self) -> *const f32 {
        self.camera_buffer.as_ptr()
    }

    // ---- JSON accessors ----

    /// UI commands emitted during the last frame, as a JSON array.
    pub fn ui_commands_json(&self) -> String {
        self.ui_json.clone()
    }

    /// Texture descriptors, indexed by texture id.
    pub fn textures_json(&self) -> String {
        self.ctx.textures.to_json().unwrap_or_else(|e| {
            log::error!("failed to serialize textures: {}", e);
            String::from("[]")
        })
    }

    /// The active media manifest.
    pub fn manifest_json(&self) -> String {
        self.ctx.manifest.to_json().unwrap_or_else(|e| {
            log::error!("failed to serialize manifest: {}", e);
            String::from("{}")
        })
    }

    // ---- Capacity accessors ----

    pub fn max_sdf_instances(&self) -> u32 {
        self.layout.max_sdf_instances as u32
    }

    pub fn max_billboards(&self) -> u32 {
        self.layout.max_billboards as u32
    }

    pub fn max_points(&self) -> u32 {
        self.layout.max_points as u32
    }

    pub fn max_sounds(&self) -> u32 {
        self.layout.max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn max_lights(&self) -> u32 {
        self.layout.max_lights as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    // ---- Direct access (native tests and tools) ----

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn game(&self) -> &G {
        &self.game
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nova_engine::{Entity, GameEvent, MeshComponent, SDFColor, SoundEvent};

    #[derive(Default)]
    struct Recorder {
        updates: u32,
        pointer_downs: u32,
    }

    impl Game for Recorder {
        fn init(&mut self, ctx: &mut EngineContext) {
            let id = ctx.next_id();
            ctx.scene.spawn(Entity::new(id).with_mesh(MeshComponent::sphere(1.0, SDFColor::WHITE)));
            ctx.camera.position = glam::Vec3::new(0.0, 0.0, 10.0);
            ctx.emit_event(GameEvent::new(7.0, 0.0, 0.0, 0.0));
        }

        fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
            self.updates += 1;
            for event in input.iter() {
                if let InputEvent::PointerDown { .. } = event {
                    self.pointer_downs += 1;
                    ctx.emit_sound(SoundEvent(3));
                }
            }
        }
    }

    #[test]
    fn init_publishes_before_first_tick() {
        let mut runner = GameRunner::new(Recorder::default(), 1);
        runner.init();
        assert_eq!(runner.game_events_len(), 1);
        assert_eq!(runner.sdf_instance_count(), 1);
    }

    #[test]
    fn input_is_seen_by_one_step_only() {
        let mut runner = GameRunner::new(Recorder::default(), 1);
        runner.init();
        runner.push_input(InputEvent::PointerDown { x: 1.0, y: 1.0 });
        runner.tick(3.0 / 60.0 + 1e-4);
        assert_eq!(runner.game().updates, 3);
        assert_eq!(runner.game().pointer_downs, 1);
        assert_eq!(runner.sound_events_len(), 1);
    }

    #[test]
    fn zero_step_frame_keeps_input_queued() {
        let mut runner = GameRunner::new(Recorder::default(), 1);
        runner.init();
        runner.push_input(InputEvent::PointerDown { x: 1.0, y: 1.0 });
        runner.tick(0.001);
        assert_eq!(runner.game().updates, 0);
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.game().pointer_downs, 1);
    }

    #[test]
    fn malformed_manifest_is_ignored() {
        let mut runner = GameRunner::new(Recorder::default(), 1);
        runner.init();
        runner.load_manifest(r#"{ "videos": { "a": { "path": "a.mp4" } } }"#);
        runner.load_manifest("{ nope");
        assert_eq!(runner.context().manifest.video_path("a"), Some("a.mp4"));
    }

    #[test]
    fn resize_only_touches_camera() {
        let mut runner = GameRunner::new(Recorder::default(), 1);
        runner.init();
        runner.resize(1024.0, 512.0);
        assert_eq!(runner.context().camera.viewport, glam::Vec2::new(1024.0, 512.0));
        assert_eq!(runner.context().scene.len(), 1);
    }
}
