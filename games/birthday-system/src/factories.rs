//! Entity factories. Everything spawned here starts hidden; the intro reveals it.

use glam::{Vec2, Vec3};
use nova_engine::{
    EngineContext, Entity, EntityId, MeshComponent, Rng, SDFColor, SpriteComponent,
    TextureDescriptor,
};

use crate::config::{SceneConfig, LABEL_FONT, METEOR_COLOR};
use crate::content::{ITEMS, PLANET_COLORS};
use crate::sampling;

/// A clickable planet: a hidden pivot holding a sphere and its name tag.
#[derive(Debug, Clone, Copy)]
pub struct InteractivePlanet {
    pub pivot: EntityId,
    pub mesh: EntityId,
    /// Index into `content::ITEMS`.
    pub item: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct DecorativePlanet {
    pub pivot: EntityId,
}

#[derive(Debug, Clone, Copy)]
pub struct Meteor {
    pub id: EntityId,
    /// World units per tick toward +Z.
    pub speed: f32,
}

/// One planet per content item. Item 0 sits at the center; the rest are placed
/// on an offset ring at a random angle, radius and height.
pub fn spawn_interactive_planets(ctx: &mut EngineContext, cfg: &SceneConfig) -> Vec<InteractivePlanet> {
    let mut planets = Vec::with_capacity(ITEMS.len());
    for (i, item) in ITEMS.iter().enumerate() {
        let (offset, angle) = if i == 0 {
            (Vec3::ZERO, 0.0)
        } else {
            let rng = &mut ctx.effects.rng;
            let radius = rng.in_range(cfg.ring_radius);
            let height = rng.in_range(cfg.ring_height);
            let angle = rng.next_f32() * std::f32::consts::TAU;
            (Vec3::new(radius, height, 0.0), angle)
        };

        let pivot = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(pivot)
                .with_tag("planet_pivot")
                .with_rotation(Vec3::new(0.0, angle, 0.0))
                .hidden(),
        );

        let color = SDFColor::from_hex(PLANET_COLORS[i]);
        let mesh = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(mesh)
                .with_tag("planet")
                .with_parent(pivot)
                .with_pos(offset)
                .with_mesh(MeshComponent::sphere(cfg.planet_radius, color).with_emissive(cfg.emissive)),
        );

        let label_pos = offset + Vec3::new(0.0, cfg.label_offset, 0.0);
        spawn_label(ctx, pivot, item.label, label_pos, cfg.label_size);

        planets.push(InteractivePlanet { pivot, mesh, item: i });
    }
    planets
}

/// Purely visual planets scattered over a spherical shell around the origin.
pub fn spawn_decorative_planets(ctx: &mut EngineContext, cfg: &SceneConfig) -> Vec<DecorativePlanet> {
    let mut planets = Vec::with_capacity(cfg.decorative_count);
    for _ in 0..cfg.decorative_count {
        let rng = &mut ctx.effects.rng;
        let pos = sampling::shell_point(rng, cfg.decorative_shell);
        let color = sampling::pastel_color(rng, cfg.decorative_saturation, cfg.decorative_lightness);
        let radius = rng.in_range(cfg.decorative_radius);

        let pivot = ctx.next_id();
        ctx.scene.spawn(Entity::new(pivot).with_tag("decor_pivot").hidden());

        let mesh = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(mesh)
                .with_tag("decor")
                .with_parent(pivot)
                .with_pos(pos)
                .with_mesh(MeshComponent::sphere(radius, color).with_emissive(cfg.emissive)),
        );

        planets.push(DecorativePlanet { pivot });
    }
    planets
}

/// Small spheres far down -Z that stream toward the camera.
pub fn spawn_meteors(ctx: &mut EngineContext, cfg: &SceneConfig) -> Vec<Meteor> {
    let mut meteors = Vec::with_capacity(cfg.meteor_count);
    for _ in 0..cfg.meteor_count {
        let rng = &mut ctx.effects.rng;
        let pos = meteor_start(rng, cfg);
        let radius = rng.in_range(cfg.meteor_radius);
        let speed = rng.in_range(cfg.meteor_speed);

        let id = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(id)
                .with_tag("meteor")
                .with_pos(pos)
                .with_mesh(
                    MeshComponent::sphere(radius, SDFColor::from_hex(METEOR_COLOR))
                        .with_shininess(0.0)
                        .with_emissive(1.0),
                )
                .hidden(),
        );
        meteors.push(Meteor { id, speed });
    }
    meteors
}

/// Random far-field starting point for a meteor.
pub fn meteor_start(rng: &mut Rng, cfg: &SceneConfig) -> Vec3 {
    Vec3::new(
        rng.in_range(cfg.meteor_x),
        rng.in_range(cfg.meteor_y),
        rng.in_range(cfg.meteor_depth),
    )
}

/// Name tag: text drawn onto a 512×128 canvas by the host, shown as a
/// billboard that is never hidden behind geometry.
pub fn spawn_label(ctx: &mut EngineContext, parent: EntityId, text: &str, pos: Vec3, size: Vec2) -> EntityId {
    let texture = ctx.textures.register(TextureDescriptor::text(text, LABEL_FONT, 512, 128));
    let id = ctx.next_id();
    ctx.scene.spawn(
        Entity::new(id)
            .with_tag("label")
            .with_parent(parent)
            .with_pos(pos)
            .with_sprite(SpriteComponent::new(texture, size).without_depth_test()),
    );
    id
}

/// First child of `parent` carrying `tag`.
#[cfg(test)]
pub(crate) fn child_with_tag(scene: &nova_engine::Scene, parent: EntityId, tag: &str) -> Option<EntityId> {
    scene
        .iter()
        .find(|e| e.parent == Some(parent) && e.tag == tag)
        .map(|e| e.id)
}
