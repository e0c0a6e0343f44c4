//! Camera, lights, fog and the star field. Built once at init.

use glam::Vec3;
use nova_engine::{
    EngineContext, Entity, EntityId, GameEvent, HemisphereLight, PerspectiveCamera,
    PointCloud, PointLight, SDFColor,
};

use crate::config::{
    SceneConfig, EVENT_FOG, FOG_COLOR, FOG_DENSITY, HEMI_GROUND, HEMI_INTENSITY, HEMI_SKY,
    POINT_LIGHT_INTENSITY,
};
use crate::sampling;

/// Set up camera, lighting and fog, and spawn the star field.
/// Returns the star field entity (the intro animates its scale).
pub fn build_environment(ctx: &mut EngineContext, cfg: &SceneConfig) -> EntityId {
    let viewport = ctx.camera.viewport;
    ctx.camera = PerspectiveCamera::new(
        cfg.camera_fov,
        viewport.x,
        viewport.y,
        cfg.camera_near,
        cfg.camera_far,
    )
    .with_position(cfg.camera_position)
    .looking_at(Vec3::ZERO);

    ctx.lights.set_hemisphere(HemisphereLight::new(
        SDFColor::from_hex(HEMI_SKY),
        SDFColor::from_hex(HEMI_GROUND),
        HEMI_INTENSITY,
    ));
    ctx.lights.add(PointLight::new(Vec3::ZERO, SDFColor::WHITE, POINT_LIGHT_INTENSITY));

    ctx.emit_event(GameEvent::new(EVENT_FOG, FOG_COLOR as f32, FOG_DENSITY, 0.0));

    spawn_star_field(ctx, cfg)
}

fn spawn_star_field(ctx: &mut EngineContext, cfg: &SceneConfig) -> EntityId {
    let rng = &mut ctx.effects.rng;
    let positions: Vec<Vec3> = (0..cfg.star_count)
        .map(|_| sampling::sphere_point(rng, cfg.star_radius))
        .collect();

    let id = ctx.next_id();
    ctx.scene.spawn(
        Entity::new(id)
            .with_tag("stars")
            .with_points(PointCloud::new(positions, cfg.star_size, SDFColor::WHITE)),
    );
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_matches_scene_config() {
        let mut ctx = EngineContext::new();
        let cfg = SceneConfig { star_count: 100, ..Default::default() };
        let stars = build_environment(&mut ctx, &cfg);

        assert_eq!(ctx.camera.position, Vec3::new(0.0, 10.0, 40.0));
        assert_eq!(ctx.camera.fov_y_deg, 60.0);
        assert_eq!(ctx.lights.count(), 1);
        assert_eq!(ctx.lights.hemisphere().intensity, 0.6);

        let fog = ctx.events[0];
        assert_eq!(fog.kind, EVENT_FOG);
        assert_eq!(fog.a, 0x21 as f32);

        let cloud = ctx.scene.get(stars).unwrap().points.as_ref().unwrap();
        assert_eq!(cloud.len(), 100);
        for p in &cloud.positions {
            assert!((p.length() - 1000.0).abs() < 0.5);
        }
        assert!(ctx.scene.get(stars).unwrap().visible);
    }
}
