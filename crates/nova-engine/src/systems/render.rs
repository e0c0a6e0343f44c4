use glam::Vec3;
use crate::core::scene::Scene;
use crate::renderer::camera::PerspectiveCamera;
use crate::renderer::instance::{BillboardBuffer, BillboardInstance, PointBuffer, PointInstance};
use crate::systems::effects::EffectsState;
use crate::systems::sdf_render::max_scale;

/// Build the billboard buffer from every visible entity with a sprite.
/// Quads keep their world size, so they shrink with distance. Sorted back to front.
pub fn build_billboard_buffer(scene: &Scene, camera: &PerspectiveCamera, buffer: &mut BillboardBuffer) {
    buffer.clear();
    let view_proj = camera.view_projection();
    for entity in scene.iter() {
        let sprite = match &entity.sprite {
            Some(s) => s,
            None => continue,
        };
        if sprite.alpha <= 0.0 || !scene.is_visible_in_hierarchy(entity.id) {
            continue;
        }
        let world = match scene.world_matrix(entity.id) {
            Some(m) => m,
            None => continue,
        };
        let projected = match camera.project_with(&view_proj, world.transform_point3(Vec3::ZERO)) {
            Some(p) => p,
            None => continue,
        };
        let sx = world.x_axis.truncate().length();
        let sy = world.y_axis.truncate().length();
        let pushed = buffer.push(BillboardInstance {
            x: projected.screen.x,
            y: projected.screen.y,
            width: sprite.size.x * sx * projected.scale,
            height: sprite.size.y * sy * projected.scale,
            depth: projected.depth,
            alpha: sprite.alpha,
            texture: sprite.texture.0 as f32,
            depth_test: if sprite.depth_test { 1.0 } else { 0.0 },
        });
        if !pushed {
            log::warn!("billboard buffer full ({} instances), dropping the rest", buffer.capacity());
            break;
        }
    }
    buffer
        .instances_mut()
        .sort_by(|a, b| b.depth.total_cmp(&a.depth));
}

/// Build the point buffer from visible point clouds, then particle bursts.
/// Points past capacity are silently dropped.
pub fn build_point_buffer(
    scene: &Scene,
    effects: &EffectsState,
    camera: &PerspectiveCamera,
    buffer: &mut PointBuffer,
) {
    buffer.clear();
    let view_proj = camera.view_projection();

    for entity in scene.iter() {
        let cloud = match &entity.points {
            Some(p) => p,
            None => continue,
        };
        if cloud.alpha <= 0.0 || !scene.is_visible_in_hierarchy(entity.id) {
            continue;
        }
        let world = match scene.world_matrix(entity.id) {
            Some(m) => m,
            None => continue,
        };
        let size = cloud.size * max_scale(&world);
        let clip_from_local = view_proj * world;
        for local in &cloud.positions {
            if let Some(p) = camera.project_with(&clip_from_local, *local) {
                if !buffer.push(PointInstance {
                    x: p.screen.x,
                    y: p.screen.y,
                    size: size * p.scale,
                    alpha: cloud.alpha,
                }) {
                    return;
                }
            }
        }
    }

    for burst in &effects.bursts {
        for pos in &burst.positions {
            if let Some(p) = camera.project_with(&view_proj, *pos) {
                if !buffer.push(PointInstance {
                    x: p.screen.x,
                    y: p.screen.y,
                    size: burst.size * p.scale,
                    alpha: burst.opacity,
                }) {
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{EntityId, TextureId};
    use crate::components::entity::Entity;
    use crate::components::mesh::SDFColor;
    use crate::components::points::PointCloud;
    use crate::components::sprite::SpriteComponent;
    use glam::Vec2;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::new(60.0, 800.0, 600.0, 0.1, 2000.0)
            .with_position(Vec3::new(0.0, 0.0, 40.0))
            .looking_at(Vec3::ZERO)
    }

    #[test]
    fn billboard_carries_texture_and_depth_flag() {
        let mut scene = Scene::new();
        scene.spawn(
            Entity::new(EntityId(1))
                .with_pos(Vec3::new(0.0, 5.0, 0.0))
                .with_sprite(SpriteComponent::new(TextureId(3), Vec2::new(14.0, 4.0)).without_depth_test()),
        );
        let mut buffer = BillboardBuffer::with_capacity(8);
        build_billboard_buffer(&scene, &camera(), &mut buffer);

        let inst = buffer.instances()[0];
        assert_eq!(inst.texture, 3.0);
        assert_eq!(inst.depth_test, 0.0);
        assert!(inst.y < 300.0);
        assert!((inst.width / inst.height - 3.5).abs() < 1e-3);
    }

    #[test]
    fn transparent_billboards_are_skipped() {
        let mut scene = Scene::new();
        scene.spawn(
            Entity::new(EntityId(1))
                .with_sprite(SpriteComponent::new(TextureId(0), Vec2::ONE).with_alpha(0.0)),
        );
        let mut buffer = BillboardBuffer::with_capacity(8);
        build_billboard_buffer(&scene, &camera(), &mut buffer);
        assert_eq!(buffer.instance_count(), 0);
    }

    #[test]
    fn points_include_clouds_and_bursts() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_points(PointCloud::new(
            vec![Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 100.0)],
            1.0,
            SDFColor::WHITE,
        )));
        let mut effects = EffectsState::new(1);
        effects.spawn_burst(Vec3::ZERO, 5, (0.2, 1.0), 0.02, SDFColor::WHITE);

        let mut buffer = PointBuffer::with_capacity(64);
        build_point_buffer(&scene, &effects, &camera(), &mut buffer);
        // The point behind the camera is culled.
        assert_eq!(buffer.instance_count(), 2 + 5);
    }

    #[test]
    fn hidden_cloud_emits_no_points() {
        let mut scene = Scene::new();
        scene.spawn(
            Entity::new(EntityId(1))
                .hidden()
                .with_points(PointCloud::new(vec![Vec3::ZERO], 1.0, SDFColor::WHITE)),
        );
        let effects = EffectsState::new(1);
        let mut buffer = PointBuffer::with_capacity(64);
        build_point_buffer(&scene, &effects, &camera(), &mut buffer);
        assert_eq!(buffer.instance_count(), 0);
    }

    #[test]
    fn cloud_under_moved_parent_lands_where_world_points_do() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_pos(Vec3::new(3.0, -2.0, 0.0)));
        scene.spawn(
            Entity::new(EntityId(2))
                .with_parent(EntityId(1))
                .with_points(PointCloud::new(vec![Vec3::new(1.0, 1.0, 0.0)], 1.0, SDFColor::WHITE)),
        );
        let effects = EffectsState::new(1);
        let cam = camera();
        let mut buffer = PointBuffer::with_capacity(8);
        build_point_buffer(&scene, &effects, &cam, &mut buffer);

        let expected = cam.project(Vec3::new(4.0, -1.0, 0.0)).unwrap();
        let inst = buffer.instances()[0];
        assert!((inst.x - expected.screen.x).abs() < 1e-3);
        assert!((inst.y - expected.screen.y).abs() < 1e-3);
        assert!((inst.size - expected.scale).abs() < 1e-4);
    }
}
