/// Birthday System: a star field, a one-shot supernova intro, and five planets
/// that open a video or a message when clicked.
///
/// Orbit the camera by dragging. Everything except the stars stays hidden until
/// the intro completes, then appears in one step.

use glam::Vec2;
use nova_engine::{
    EngineContext, EntityId, Game, GameConfig, InputEvent, InputQueue, OrbitControls, SDFColor,
};

use crate::bootstrap;
use crate::config::{
    default_manifest, SceneConfig, CUSTOM_CLOSE_MESSAGE, CUSTOM_CLOSE_VIDEO, CUSTOM_RESIZE,
    CUSTOM_START,
};
use crate::content::ITEMS;
use crate::factories::{self, DecorativePlanet, InteractivePlanet, Meteor};
use crate::interaction::{self, Modals, UiCommand};
use crate::intro::IntroSequence;

/// Headroom on top of the star field for click bursts.
const BURST_POINT_BUDGET: usize = 4096;

// ── Pointer state ───────────────────────────────────────────────────

#[derive(Debug, Default, Clone, Copy)]
struct Pointer {
    pressed: bool,
    dragging: bool,
    start: Vec2,
    last: Vec2,
}

// ── Game struct ─────────────────────────────────────────────────────

pub struct BirthdaySystem {
    cfg: SceneConfig,
    star_field: Option<EntityId>,
    planets: Vec<InteractivePlanet>,
    decorative: Vec<DecorativePlanet>,
    meteors: Vec<Meteor>,
    intro: IntroSequence,
    modals: Modals,
    controls: Option<OrbitControls>,
    pointer: Pointer,
}

impl BirthdaySystem {
    pub fn new() -> Self {
        Self::with_config(SceneConfig::default())
    }

    pub fn with_config(cfg: SceneConfig) -> Self {
        let modals = Modals::new(cfg.typewriter_cps);
        Self {
            cfg,
            star_field: None,
            planets: Vec::new(),
            decorative: Vec::new(),
            meteors: Vec::new(),
            intro: IntroSequence::new(),
            modals,
            controls: None,
            pointer: Pointer::default(),
        }
    }

    /// Every entity that appears when the intro completes.
    fn reveal_set(&self) -> Vec<EntityId> {
        self.planets
            .iter()
            .map(|p| p.pivot)
            .chain(self.decorative.iter().map(|d| d.pivot))
            .chain(self.meteors.iter().map(|m| m.id))
            .collect()
    }

    fn start(&mut self, ctx: &mut EngineContext) {
        let Some(stars) = self.star_field else { return };
        if self.intro.start(ctx, stars) {
            ctx.emit_ui(&UiCommand::HideStartScreen);
        }
    }

    fn on_pointer_down(&mut self, ctx: &mut EngineContext, screen: Vec2) {
        self.pointer = Pointer { pressed: true, dragging: false, start: screen, last: screen };

        if !self.intro.is_complete() {
            return;
        }
        let Some(hit) = interaction::pick(&ctx.scene, &ctx.camera, &self.planets, screen) else {
            return;
        };
        let planet = self.planets[hit.planet];
        let Some(item) = ITEMS.get(planet.item) else { return };
        log::debug!("picked {} at {:?}", item.label, hit.point);

        let color = ctx
            .scene
            .get(planet.mesh)
            .and_then(|e| e.mesh)
            .map_or(SDFColor::WHITE, |m| m.color);
        ctx.effects.spawn_burst(
            hit.point,
            self.cfg.burst_count,
            self.cfg.burst_speed,
            self.cfg.burst_fade,
            color,
        );
        self.modals.open(ctx, item);
    }

    fn on_pointer_move(&mut self, ctx: &EngineContext, screen: Vec2) {
        if !self.pointer.pressed {
            return;
        }
        if !self.pointer.dragging && (screen - self.pointer.start).length() > self.cfg.drag_threshold {
            self.pointer.dragging = true;
        }
        if self.pointer.dragging {
            let delta = screen - self.pointer.last;
            if let Some(controls) = &mut self.controls {
                controls.rotate(delta.x, delta.y, ctx.camera.viewport.y);
            }
        }
        self.pointer.last = screen;
    }

    fn spin(&self, ctx: &mut EngineContext) {
        for (i, p) in self.planets.iter().enumerate() {
            if let Some(e) = ctx.scene.get_mut(p.pivot) {
                e.rotation.y += self.cfg.planet_spin + i as f32 * self.cfg.planet_spin_step;
            }
        }
        for (i, d) in self.decorative.iter().enumerate() {
            if let Some(e) = ctx.scene.get_mut(d.pivot) {
                e.rotation.y += self.cfg.decorative_spin + i as f32 * self.cfg.decorative_spin_step;
            }
        }
    }

    /// Stream meteors toward the camera, recycling any that pass it.
    fn advance_meteors(&self, ctx: &mut EngineContext) {
        let threshold = ctx.camera.position.z + self.cfg.meteor_margin;
        for meteor in &self.meteors {
            let Some(e) = ctx.scene.get_mut(meteor.id) else { continue };
            e.pos.z += meteor.speed;
            if e.pos.z > threshold {
                e.pos = factories::meteor_start(&mut ctx.effects.rng, &self.cfg);
            }
        }
    }
}

impl Default for BirthdaySystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for BirthdaySystem {
    fn config(&self) -> GameConfig {
        GameConfig {
            max_points: self.cfg.star_count + BURST_POINT_BUDGET,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        ctx.manifest = default_manifest();

        // ── Environment ─────────────────────────────────────────────
        self.star_field = Some(bootstrap::build_environment(ctx, &self.cfg));

        // ── Hidden until the intro completes ────────────────────────
        self.planets = factories::spawn_interactive_planets(ctx, &self.cfg);
        self.decorative = factories::spawn_decorative_planets(ctx, &self.cfg);
        self.meteors = factories::spawn_meteors(ctx, &self.cfg);

        self.controls = Some(OrbitControls::from_camera(&ctx.camera).with_damping(self.cfg.orbit_damping));

        log::info!(
            "birthday system ready: {} planets, {} decorative, {} meteors",
            self.planets.len(),
            self.decorative.len(),
            self.meteors.len()
        );
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        let dt = ctx.dt();

        // ── Intro completion ────────────────────────────────────────
        let finished: Vec<u32> = ctx.tweens.drain_completed().collect();
        for event in finished {
            if self.intro.on_tween_event(ctx, event) {
                let ids = self.reveal_set();
                ctx.scene.set_visible_all(&ids, true);
                ctx.emit_ui(&UiCommand::PlayMusic);
            }
        }

        // ── Handle input ────────────────────────────────────────────
        for event in input.iter() {
            match *event {
                InputEvent::Custom { kind, a, b, .. } => match kind {
                    CUSTOM_START => self.start(ctx),
                    CUSTOM_CLOSE_VIDEO => self.modals.close_video(ctx),
                    CUSTOM_CLOSE_MESSAGE => self.modals.close_message(ctx),
                    CUSTOM_RESIZE => ctx.camera.resize(a, b),
                    _ => {}
                },
                InputEvent::Resize { width, height } => ctx.camera.resize(width, height),
                InputEvent::PointerDown { x, y } => self.on_pointer_down(ctx, Vec2::new(x, y)),
                InputEvent::PointerMove { x, y } => self.on_pointer_move(ctx, Vec2::new(x, y)),
                InputEvent::PointerUp { .. } => self.pointer = Pointer::default(),
            }
        }

        // ── Animate ─────────────────────────────────────────────────
        self.spin(ctx);
        self.advance_meteors(ctx);
        self.modals.tick(ctx, dt);

        if let Some(controls) = &mut self.controls {
            controls.update(&mut ctx.camera);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use crate::config::SOUND_EXPLOSION;
    use crate::factories::child_with_tag;
    use nova_engine::SoundEvent;
    use crate::content::Content;

    fn small() -> SceneConfig {
        SceneConfig { star_count: 200, decorative_count: 20, meteor_count: 50, ..Default::default() }
    }

    fn setup() -> (BirthdaySystem, EngineContext) {
        let mut game = BirthdaySystem::with_config(small());
        let mut ctx = EngineContext::with_config(&game.config(), 7);
        game.init(&mut ctx);
        (game, ctx)
    }

    /// One fixed step the way the runner drives it. Returns the UI command types.
    fn step(game: &mut BirthdaySystem, ctx: &mut EngineContext, events: &[InputEvent]) -> Vec<String> {
        let mut input = InputQueue::new();
        for e in events {
            input.push(*e);
        }
        ctx.clear_frame_data();
        game.update(ctx, &input);
        ctx.step_extensions();
        ctx.ui_commands
            .iter()
            .filter_map(|c| c["type"].as_str().map(str::to_string))
            .collect()
    }

    fn custom(kind: u32) -> InputEvent {
        InputEvent::Custom { kind, a: 0.0, b: 0.0, c: 0.0 }
    }

    fn visible_count(game: &BirthdaySystem, ctx: &EngineContext) -> usize {
        let meshes = game
            .planets
            .iter()
            .map(|p| p.mesh)
            .chain(game.decorative.iter().filter_map(|d| child_with_tag(&ctx.scene, d.pivot, "decor")))
            .chain(game.meteors.iter().map(|m| m.id));
        meshes.filter(|&id| ctx.scene.is_visible_in_hierarchy(id)).count()
    }

    fn total(game: &BirthdaySystem) -> usize {
        game.planets.len() + game.decorative.len() + game.meteors.len()
    }

    /// Start and run until the intro has finished; returns every UI command seen.
    fn run_intro(game: &mut BirthdaySystem, ctx: &mut EngineContext) -> Vec<String> {
        let mut seen = step(game, ctx, &[custom(CUSTOM_START)]);
        for _ in 0..300 {
            seen.extend(step(game, ctx, &[]));
        }
        seen
    }

    #[test]
    fn everything_hidden_before_start() {
        let (mut game, mut ctx) = setup();
        assert_eq!(total(&game), 5 + 20 + 50);
        for _ in 0..120 {
            step(&mut game, &mut ctx, &[]);
        }
        assert_eq!(visible_count(&game, &ctx), 0);
        assert!(ctx.scene.is_visible_in_hierarchy(game.star_field.unwrap()));
    }

    #[test]
    fn reveal_is_all_or_nothing() {
        let (mut game, mut ctx) = setup();
        let n = total(&game);
        step(&mut game, &mut ctx, &[custom(CUSTOM_START)]);
        for _ in 0..300 {
            step(&mut game, &mut ctx, &[]);
            let v = visible_count(&game, &ctx);
            assert!(v == 0 || v == n, "partial reveal: {} of {}", v, n);
        }
        assert_eq!(visible_count(&game, &ctx), n);
        assert!(ctx.scene.find_by_tag("flash").is_none());
    }

    #[test]
    fn start_fires_once() {
        let (mut game, mut ctx) = setup();
        let first = step(&mut game, &mut ctx, &[custom(CUSTOM_START), custom(CUSTOM_START)]);
        assert_eq!(first, vec!["hide_start_screen"]);
        assert_eq!(ctx.sounds, vec![SoundEvent(SOUND_EXPLOSION)]);

        let mut seen = Vec::new();
        for _ in 0..300 {
            seen.extend(step(&mut game, &mut ctx, &[]));
        }
        seen.extend(step(&mut game, &mut ctx, &[custom(CUSTOM_START)]));
        assert!(ctx.sounds.is_empty());
        assert_eq!(seen.iter().filter(|t| *t == "play_music").count(), 1);
        assert!(!seen.iter().any(|t| t == "hide_start_screen"));
    }

    #[test]
    fn clicks_before_intro_completes_are_ignored() {
        let (mut game, mut ctx) = setup();
        let center = InputEvent::PointerDown { x: 400.0, y: 300.0 };
        assert!(step(&mut game, &mut ctx, &[center]).is_empty());
        assert!(!game.modals.is_open());
        assert!(ctx.effects.bursts.is_empty());
    }

    /// Hide every interactive planet but one and park the camera so its
    /// sphere sits dead center.
    fn isolate(game: &BirthdaySystem, ctx: &mut EngineContext, index: usize) {
        for (i, p) in game.planets.iter().enumerate() {
            ctx.scene.get_mut(p.pivot).unwrap().visible = i == index;
        }
        let pivot = game.planets[index].pivot;
        let mesh = game.planets[index].mesh;
        {
            let p = ctx.scene.get_mut(pivot).unwrap();
            p.rotation = Vec3::ZERO;
        }
        ctx.scene.get_mut(mesh).unwrap().pos = Vec3::ZERO;
        for d in &game.decorative {
            ctx.scene.get_mut(d.pivot).unwrap().visible = false;
        }
        for m in &game.meteors {
            ctx.scene.get_mut(m.id).unwrap().visible = false;
        }
    }

    #[test]
    fn video_planet_pauses_music_and_resumes_on_close() {
        let (mut game, mut ctx) = setup();
        run_intro(&mut game, &mut ctx);
        isolate(&game, &mut ctx, 0);

        let down = InputEvent::PointerDown { x: 400.0, y: 300.0 };
        let cmds = step(&mut game, &mut ctx, &[down]);
        assert_eq!(cmds, vec!["pause_music", "show_video"]);
        assert_eq!(ctx.ui_commands[1]["src"], "videos/planet1.mp4");
        assert_eq!(ctx.effects.bursts.len(), 1);
        assert_eq!(ctx.effects.bursts[0].len(), 40);

        let cmds = step(&mut game, &mut ctx, &[custom(CUSTOM_CLOSE_VIDEO)]);
        assert_eq!(cmds, vec!["hide_video", "play_music"]);
    }

    #[test]
    fn message_planet_shows_its_text() {
        let (mut game, mut ctx) = setup();
        run_intro(&mut game, &mut ctx);
        isolate(&game, &mut ctx, 2);

        let down = InputEvent::PointerDown { x: 400.0, y: 300.0 };
        let cmds = step(&mut game, &mut ctx, &[down]);
        assert!(cmds.contains(&"show_message".to_string()));
        assert!(!cmds.contains(&"pause_music".to_string()));

        let Content::Message { text } = ITEMS[2].content else { unreachable!() };
        let ticks = (text.chars().count() as f32 / 40.0 * 60.0) as usize + 2;
        for _ in 0..ticks {
            step(&mut game, &mut ctx, &[]);
        }
        assert_eq!(game.modals.message_text(), Some(text));

        let cmds = step(&mut game, &mut ctx, &[custom(CUSTOM_CLOSE_MESSAGE)]);
        assert_eq!(cmds, vec!["hide_message"]);
    }

    #[test]
    fn decorative_and_meteor_clicks_open_nothing() {
        let (mut game, mut ctx) = setup();
        run_intro(&mut game, &mut ctx);
        for p in &game.planets {
            ctx.scene.get_mut(p.pivot).unwrap().visible = false;
        }

        // Put a decorative planet and a meteor straight under the cursor.
        let d = game.decorative[0];
        ctx.scene.get_mut(d.pivot).unwrap().rotation = Vec3::ZERO;
        let decor = child_with_tag(&ctx.scene, d.pivot, "decor").unwrap();
        ctx.scene.get_mut(decor).unwrap().pos = Vec3::ZERO;
        let m = game.meteors[0];
        ctx.scene.get_mut(m.id).unwrap().pos = Vec3::new(0.0, 5.0, 20.0);

        let down = InputEvent::PointerDown { x: 400.0, y: 300.0 };
        assert!(step(&mut game, &mut ctx, &[down]).is_empty());
        assert!(!game.modals.is_open());
    }

    #[test]
    fn meteors_respawn_on_the_tick_they_pass_the_camera() {
        let (mut game, mut ctx) = setup();
        let threshold = ctx.camera.position.z + game.cfg.meteor_margin;
        let m = game.meteors[0];
        ctx.scene.get_mut(m.id).unwrap().pos.z = threshold - m.speed * 0.5;

        step(&mut game, &mut ctx, &[]);
        let z = ctx.scene.get(m.id).unwrap().pos.z;
        assert!((-1000.0..=-500.0).contains(&z), "z = {}", z);

        for _ in 0..2000 {
            step(&mut game, &mut ctx, &[]);
            for m in &game.meteors {
                assert!(ctx.scene.get(m.id).unwrap().pos.z <= threshold);
            }
        }
    }

    #[test]
    fn pivots_spin_each_tick() {
        let (mut game, mut ctx) = setup();
        let pivot = game.planets[1].pivot;
        let before = ctx.scene.get(pivot).unwrap().rotation.y;
        step(&mut game, &mut ctx, &[]);
        let after = ctx.scene.get(pivot).unwrap().rotation.y;
        assert!((after - before - (0.002 + 0.0005)).abs() < 1e-5);
    }

    #[test]
    fn drag_orbits_camera_without_moving_distance() {
        let (mut game, mut ctx) = setup();
        let start = ctx.camera.position;
        step(
            &mut game,
            &mut ctx,
            &[
                InputEvent::PointerDown { x: 100.0, y: 300.0 },
                InputEvent::PointerMove { x: 200.0, y: 300.0 },
                InputEvent::PointerUp { x: 200.0, y: 300.0 },
            ],
        );
        for _ in 0..60 {
            step(&mut game, &mut ctx, &[]);
        }
        let end = ctx.camera.position;
        assert!((end - start).length() > 1.0);
        assert!((end.length() - start.length()).abs() < 1e-3);
    }

    #[test]
    fn resize_only_touches_camera() {
        let (mut game, mut ctx) = setup();
        let entities = ctx.scene.len();
        step(
            &mut game,
            &mut ctx,
            &[InputEvent::Custom { kind: CUSTOM_RESIZE, a: 1280.0, b: 720.0, c: 0.0 }],
        );
        assert_eq!(ctx.camera.viewport, Vec2::new(1280.0, 720.0));
        step(&mut game, &mut ctx, &[InputEvent::Resize { width: 640.0, height: 480.0 }]);
        assert_eq!(ctx.camera.viewport, Vec2::new(640.0, 480.0));
        assert_eq!(ctx.scene.len(), entities);
    }
}
