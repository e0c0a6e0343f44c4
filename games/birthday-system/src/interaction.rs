//! Pointer picking and the two HTML modals (video, message).

use glam::{Vec2, Vec3};
use nova_engine::systems::sdf_render::max_scale;
use nova_engine::{EngineContext, PerspectiveCamera, Scene};
use serde::Serialize;

use crate::content::{Content, ContentItem};
use crate::factories::InteractivePlanet;

// ── Picking ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    /// Index into the planet slice passed to `pick`.
    pub planet: usize,
    pub point: Vec3,
    pub distance: f32,
}

/// Cast a ray through `screen` and return the nearest interactive planet it hits.
/// Only planet meshes are tested; hidden ones are skipped.
pub fn pick(
    scene: &Scene,
    camera: &PerspectiveCamera,
    planets: &[InteractivePlanet],
    screen: Vec2,
) -> Option<PickHit> {
    let ray = camera.ray_from_screen(screen);
    let mut best: Option<PickHit> = None;

    for (index, planet) in planets.iter().enumerate() {
        if !scene.is_visible_in_hierarchy(planet.mesh) {
            continue;
        }
        let Some(mesh) = scene.get(planet.mesh).and_then(|e| e.mesh) else {
            continue;
        };
        let Some(world) = scene.world_matrix(planet.mesh) else {
            continue;
        };
        let center = world.transform_point3(Vec3::ZERO);
        let radius = mesh.radius() * max_scale(&world);

        if let Some(t) = ray.intersect_sphere(center, radius) {
            if best.map_or(true, |b| t < b.distance) {
                best = Some(PickHit { planet: index, point: ray.at(t), distance: t });
            }
        }
    }
    best
}

// ── Typewriter ──────────────────────────────────────────────────────

/// Reveals a text a fixed number of characters per second.
#[derive(Debug, Clone)]
pub struct Typewriter {
    text: String,
    cps: f32,
    elapsed: f32,
    shown: usize,
    total: usize,
}

impl Typewriter {
    pub fn new(text: impl Into<String>, cps: f32) -> Self {
        let text = text.into();
        let total = text.chars().count();
        Self { text, cps, elapsed: 0.0, shown: 0, total }
    }

    /// Advance by `dt` seconds. Returns true if more text became visible.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.is_done() {
            return false;
        }
        self.elapsed += dt;
        let shown = if self.cps > 0.0 {
            ((self.elapsed * self.cps) as usize).min(self.total)
        } else {
            self.total
        };
        let changed = shown != self.shown;
        self.shown = shown;
        changed
    }

    /// The revealed prefix.
    pub fn visible(&self) -> &str {
        match self.text.char_indices().nth(self.shown) {
            Some((byte, _)) => &self.text[..byte],
            None => &self.text,
        }
    }

    pub fn is_done(&self) -> bool {
        self.shown >= self.total
    }
}

// ── UI commands ─────────────────────────────────────────────────────

/// Commands for the page overlay, serialized as `{"type": "...", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiCommand {
    HideStartScreen,
    PlayMusic,
    PauseMusic,
    ShowVideo { src: String },
    HideVideo,
    ShowMessage,
    MessageText { text: String },
    HideMessage,
}

// ── Modals ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum ModalState {
    None,
    Video { src: String },
    Message(Typewriter),
}

/// At most one modal is open. Opening one replaces the other.
#[derive(Debug, Clone)]
pub struct Modals {
    state: ModalState,
    cps: f32,
}

impl Modals {
    pub fn new(typewriter_cps: f32) -> Self {
        Self { state: ModalState::None, cps: typewriter_cps }
    }

    #[cfg(test)]
    pub fn is_open(&self) -> bool {
        !matches!(self.state, ModalState::None)
    }

    #[cfg(test)]
    pub fn video_src(&self) -> Option<&str> {
        match &self.state {
            ModalState::Video { src } => Some(src),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn message_text(&self) -> Option<&str> {
        match &self.state {
            ModalState::Message(tw) => Some(tw.visible()),
            _ => None,
        }
    }

    pub fn open(&mut self, ctx: &mut EngineContext, item: &ContentItem) {
        match item.content {
            Content::Video { key, src } => {
                if matches!(self.state, ModalState::Message(_)) {
                    ctx.emit_ui(&UiCommand::HideMessage);
                }
                let src = ctx.manifest.video_path(key).unwrap_or(src).to_string();
                log::debug!("opening video for {}: {}", item.label, src);
                ctx.emit_ui(&UiCommand::PauseMusic);
                ctx.emit_ui(&UiCommand::ShowVideo { src: src.clone() });
                self.state = ModalState::Video { src };
            }
            Content::Message { text } => {
                self.close_video(ctx);
                log::debug!("opening message from {}", item.label);
                ctx.emit_ui(&UiCommand::ShowMessage);
                ctx.emit_ui(&UiCommand::MessageText { text: String::new() });
                self.state = ModalState::Message(Typewriter::new(text, self.cps));
            }
        }
    }

    /// Close the video modal and resume the ambient track. No-op if it is not open.
    pub fn close_video(&mut self, ctx: &mut EngineContext) {
        if let ModalState::Video { src } = &self.state {
            log::debug!("closing video {}", src);
            ctx.emit_ui(&UiCommand::HideVideo);
            ctx.emit_ui(&UiCommand::PlayMusic);
            self.state = ModalState::None;
        }
    }

    pub fn close_message(&mut self, ctx: &mut EngineContext) {
        if let ModalState::Message(_) = self.state {
            ctx.emit_ui(&UiCommand::HideMessage);
            self.state = ModalState::None;
        }
    }

    /// Advance the typewriter and push newly revealed text to the overlay.
    pub fn tick(&mut self, ctx: &mut EngineContext, dt: f32) {
        if let ModalState::Message(tw) = &mut self.state {
            if tw.tick(dt) {
                let text = tw.visible().to_string();
                ctx.emit_ui(&UiCommand::MessageText { text });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;
    use crate::content::ITEMS;
    use crate::factories::spawn_interactive_planets;
    use nova_engine::VideoDescriptor;
    use serde_json::json;

    fn types(ctx: &EngineContext) -> Vec<String> {
        ctx.ui_commands
            .iter()
            .filter_map(|c| c["type"].as_str().map(str::to_string))
            .collect()
    }

    #[test]
    fn typewriter_counts_characters_not_bytes() {
        let mut tw = Typewriter::new("h\u{e9}llo", 10.0);
        assert_eq!(tw.visible(), "");
        assert!(tw.tick(0.2));
        assert_eq!(tw.visible(), "h\u{e9}");
        assert!(!tw.tick(0.05));
        tw.tick(1.0);
        assert!(tw.is_done());
        assert_eq!(tw.visible(), "h\u{e9}llo");
        assert!(!tw.tick(1.0));
    }

    #[test]
    fn ui_commands_serialize_tagged() {
        let v = serde_json::to_value(UiCommand::ShowVideo { src: "a.mp4".into() }).unwrap();
        assert_eq!(v, json!({"type": "show_video", "src": "a.mp4"}));
        let v = serde_json::to_value(UiCommand::HideStartScreen).unwrap();
        assert_eq!(v, json!({"type": "hide_start_screen"}));
    }

    #[test]
    fn video_prefers_manifest_path() {
        let mut ctx = EngineContext::new();
        let mut modals = Modals::new(40.0);

        modals.open(&mut ctx, &ITEMS[0]);
        assert_eq!(modals.video_src(), Some("videos/planet1.mp4"));
        assert_eq!(types(&ctx), vec!["pause_music", "show_video"]);

        ctx.clear_frame_data();
        modals.close_video(&mut ctx);
        ctx.manifest.videos.insert("kika".into(), VideoDescriptor { path: "cdn/kika.webm".into() });
        modals.open(&mut ctx, &ITEMS[0]);
        assert_eq!(modals.video_src(), Some("cdn/kika.webm"));
    }

    #[test]
    fn message_replaces_video_and_resumes_music() {
        let mut ctx = EngineContext::new();
        let mut modals = Modals::new(40.0);
        modals.open(&mut ctx, &ITEMS[0]);
        ctx.clear_frame_data();

        modals.open(&mut ctx, &ITEMS[2]);
        assert_eq!(
            types(&ctx),
            vec!["hide_video", "play_music", "show_message", "message_text"]
        );
        assert!(modals.video_src().is_none());
        assert_eq!(modals.message_text(), Some(""));
    }

    #[test]
    fn message_reveals_full_text() {
        let mut ctx = EngineContext::new();
        let mut modals = Modals::new(40.0);
        modals.open(&mut ctx, &ITEMS[3]);

        let Content::Message { text } = ITEMS[3].content else { unreachable!() };
        let ticks = (text.chars().count() as f32 / 40.0 * 60.0) as usize + 2;
        for _ in 0..ticks {
            modals.tick(&mut ctx, 1.0 / 60.0);
        }
        assert_eq!(modals.message_text(), Some(text));
        let last = ctx.ui_commands.last().unwrap();
        assert_eq!(last["text"], json!(text));

        ctx.clear_frame_data();
        modals.close_message(&mut ctx);
        assert_eq!(types(&ctx), vec!["hide_message"]);
        assert!(!modals.is_open());
    }

    #[test]
    fn closing_what_is_not_open_is_silent() {
        let mut ctx = EngineContext::new();
        let mut modals = Modals::new(40.0);
        modals.close_video(&mut ctx);
        modals.close_message(&mut ctx);
        assert!(ctx.ui_commands.is_empty());
    }

    #[test]
    fn pick_finds_nearest_visible_planet() {
        let mut ctx = EngineContext::new();
        ctx.camera.position = Vec3::new(0.0, 10.0, 40.0);
        let planets = spawn_interactive_planets(&mut ctx, &SceneConfig::default());
        let screen = Vec2::new(400.0, 300.0);

        // Everything still hidden.
        assert!(pick(&ctx.scene, &ctx.camera, &planets, screen).is_none());

        ctx.scene.set_visible_all(&[planets[0].pivot], true);
        let hit = pick(&ctx.scene, &ctx.camera, &planets, screen).unwrap();
        assert_eq!(hit.planet, 0);
        assert!((hit.point.length() - 3.0).abs() < 1e-3);

        // Far corner misses.
        assert!(pick(&ctx.scene, &ctx.camera, &planets, Vec2::new(2.0, 2.0)).is_none());
    }
}
