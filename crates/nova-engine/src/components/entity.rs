use glam::{EulerRot, Mat4, Quat, Vec3};
use crate::api::types::EntityId;
use crate::components::mesh::MeshComponent;
use crate::components::points::PointCloud;
use crate::components::sprite::SpriteComponent;

/// Fat Entity: a single struct with optional components.
/// Designed for simplicity over ECS purity: a scene here holds a few hundred of these.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Visibility flag. A hidden entity hides everything parented under it.
    pub visible: bool,
    /// Pivot this entity is attached to. Local transforms compose with the parent's.
    pub parent: Option<EntityId>,
    /// Position relative to the parent (or world).
    pub pos: Vec3,
    /// Euler rotation (XYZ order, radians) relative to the parent.
    pub rotation: Vec3,
    /// Scale relative to the parent.
    pub scale: Vec3,
    /// SDF mesh (optional; entities without a mesh, sprite or points are pure pivots).
    pub mesh: Option<MeshComponent>,
    /// Camera-facing billboard.
    pub sprite: Option<SpriteComponent>,
    /// Point cloud.
    pub points: Option<PointCloud>,
}

impl Entity {
    /// Create a new visible entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            visible: true,
            parent: None,
            pos: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            mesh: None,
            sprite: None,
            points: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_parent(mut self, parent: EntityId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_mesh(mut self, mesh: MeshComponent) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn with_sprite(mut self, sprite: SpriteComponent) -> Self {
        self.sprite = Some(sprite);
        self
    }

    pub fn with_points(mut self, points: PointCloud) -> Self {
        self.points = Some(points);
        self
    }

    /// Start hidden.
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Transform from this entity's local space into its parent's space.
    pub fn local_matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.pos)
    }
}
