use glam::Mat4;
use crate::core::scene::Scene;
use crate::renderer::camera::PerspectiveCamera;
use crate::renderer::sdf_instance::{SDFBuffer, SDFInstance};

/// Largest axis scale baked into a world matrix.
pub fn max_scale(m: &Mat4) -> f32 {
    m.x_axis
        .truncate()
        .length()
        .max(m.y_axis.truncate().length())
        .max(m.z_axis.truncate().length())
}

/// Build the SDF instance buffer from every visible entity with a mesh.
/// Spheres are projected through the camera and sorted back to front;
/// anything behind the camera or outside the clip range is dropped.
pub fn build_sdf_buffer(scene: &Scene, camera: &PerspectiveCamera, buffer: &mut SDFBuffer) {
    buffer.clear();
    let view_proj = camera.view_projection();
    for entity in scene.iter() {
        let mesh = match &entity.mesh {
            Some(m) => m,
            None => continue,
        };
        if !scene.is_visible_in_hierarchy(entity.id) {
            continue;
        }
        let world = match scene.world_matrix(entity.id) {
            Some(m) => m,
            None => continue,
        };
        let center = world.transform_point3(glam::Vec3::ZERO);
        let projected = match camera.project_with(&view_proj, center) {
            Some(p) => p,
            None => continue,
        };
        let pushed = buffer.push(SDFInstance {
            x: projected.screen.x,
            y: projected.screen.y,
            radius: mesh.radius() * max_scale(&world) * projected.scale,
            depth: projected.depth,
            r: mesh.color.r,
            g: mesh.color.g,
            b: mesh.color.b,
            shininess: mesh.shininess,
            emissive: mesh.emissive,
            alpha: 1.0,
            _pad0: 0.0,
            _pad1: 0.0,
        });
        if !pushed {
            log::warn!("SDF buffer full ({} instances), dropping the rest", buffer.capacity());
            break;
        }
    }
    buffer
        .instances_mut()
        .sort_by(|a, b| b.depth.total_cmp(&a.depth));
}
