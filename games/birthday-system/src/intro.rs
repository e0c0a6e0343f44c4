//! The one-shot "supernova" intro.
//!
//! Stars collapse, a gradient flash blooms in front of the camera and fades while
//! the stars regrow. Every track belongs to one tween group, so completion
//! resolves a single event no matter how the tracks overlap.

use glam::{Vec2, Vec3};
use nova_engine::{
    Easing, EngineContext, Entity, EntityId, SoundEvent, SpriteComponent, TextureDescriptor,
    Tween,
};

use crate::config::{FLASH_STOPS, SOUND_EXPLOSION};

/// Tween-group event id signalling the end of the intro.
pub const INTRO_COMPLETE: u32 = 1;

const STAR_COLLAPSE_SCALE: f32 = 0.1;
const STAR_COLLAPSE_SECS: f32 = 1.5;
const FLASH_DISTANCE: f32 = 10.0;
const FLASH_SIZE: f32 = 400.0;
const FLASH_TEXTURE_SIZE: u32 = 512;
const FLASH_START: f32 = 1.5;
const FLASH_BLOOM_SECS: f32 = 0.3;
const FLASH_FADE_SECS: f32 = 2.0;
const STAR_REGROW_SECS: f32 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Running { flash: EntityId },
    Complete,
}

#[derive(Debug)]
pub struct IntroSequence {
    phase: Phase,
}

impl IntroSequence {
    pub fn new() -> Self {
        Self { phase: Phase::Idle }
    }

    pub fn is_started(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    /// Kick off the intro. Returns false (and does nothing) if it already ran.
    pub fn start(&mut self, ctx: &mut EngineContext, star_field: EntityId) -> bool {
        if self.is_started() {
            return false;
        }

        ctx.emit_sound(SoundEvent(SOUND_EXPLOSION));

        let texture = ctx
            .textures
            .register(TextureDescriptor::radial_gradient(FLASH_TEXTURE_SIZE, &FLASH_STOPS));
        let flash_pos = ctx.camera.position + ctx.camera.forward() * FLASH_DISTANCE;
        let flash = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(flash)
                .with_tag("flash")
                .with_pos(flash_pos)
                .with_scale(Vec3::splat(STAR_COLLAPSE_SCALE))
                .with_sprite(SpriteComponent::new(texture, Vec2::splat(FLASH_SIZE)).with_alpha(0.0)),
        );

        let fade_start = FLASH_START + FLASH_BLOOM_SECS;
        ctx.tweens.add_group(
            vec![
                (
                    star_field,
                    Tween::scale_uniform(1.0, STAR_COLLAPSE_SCALE, STAR_COLLAPSE_SECS, Easing::QuadIn),
                ),
                (
                    flash,
                    Tween::alpha(0.0, 1.0, FLASH_BLOOM_SECS, Easing::QuadOut).with_delay(FLASH_START),
                ),
                (
                    flash,
                    Tween::scale_uniform(STAR_COLLAPSE_SCALE, 1.0, FLASH_BLOOM_SECS, Easing::QuadOut)
                        .with_delay(FLASH_START),
                ),
                (
                    flash,
                    Tween::alpha(1.0, 0.0, FLASH_FADE_SECS, Easing::CubicOut).with_delay(fade_start),
                ),
                (
                    star_field,
                    Tween::scale_uniform(STAR_COLLAPSE_SCALE, 1.0, STAR_REGROW_SECS, Easing::CubicOut)
                        .with_delay(FLASH_START),
                ),
            ],
            INTRO_COMPLETE,
        );

        log::info!("intro started");
        self.phase = Phase::Running { flash };
        true
    }

    /// Feed a completed tween event. Returns true exactly once: when the intro
    /// finishes. The flash is removed at that point.
    pub fn on_tween_event(&mut self, ctx: &mut EngineContext, event: u32) -> bool {
        match (self.phase, event) {
            (Phase::Running { flash }, INTRO_COMPLETE) => {
                ctx.despawn(flash);
                self.phase = Phase::Complete;
                log::info!("intro complete");
                true
            }
            _ => false,
        }
    }
}

impl Default for IntroSequence {
    fn default() -> Self {
        Self::new()
    }
}
