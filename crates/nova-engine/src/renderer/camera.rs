use glam::{Mat4, Vec2, Vec3};

/// Perspective camera for 3D rendering.
/// Screen coordinates are CSS pixels with the origin at the top-left of the canvas.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov_y_deg: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
    /// Viewport size in pixels.
    pub viewport: Vec2,
}

/// A world point mapped onto the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Pixel position, origin top-left.
    pub screen: Vec2,
    /// Distance along the view axis. Larger is further away.
    pub depth: f32,
    /// Pixels per world unit at this depth.
    pub scale: f32,
}

/// A half-line in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length.
    pub direction: Vec3,
}

impl Ray {
    /// Distance along the ray to the first hit with a sphere, if any.
    /// A ray starting inside the sphere reports the exit point.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let a = self.direction.dot(self.direction);
        let b = 2.0 * oc.dot(self.direction);
        let c = oc.dot(oc) - radius * radius;
        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 || a <= 0.0 {
            return None;
        }
        let sqrt_d = discriminant.sqrt();
        let t1 = (-b - sqrt_d) / (2.0 * a);
        let t2 = (-b + sqrt_d) / (2.0 * a);
        if t1 > 0.0 {
            Some(t1)
        } else if t2 > 0.0 {
            Some(t2)
        } else {
            None
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

impl PerspectiveCamera {
    pub fn new(fov_y_deg: f32, width: f32, height: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y_deg,
            near,
            far,
            position: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            viewport: Vec2::new(width.max(1.0), height.max(1.0)),
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn looking_at(mut self, target: Vec3) -> Self {
        self.target = target;
        self
    }

    /// Update the viewport (and therefore the aspect ratio).
    /// Degenerate sizes are clamped to one pixel.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width.max(1.0), height.max(1.0));
    }

    pub fn aspect(&self) -> f32 {
        self.viewport.x / self.viewport.y
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_deg.to_radians(), self.aspect(), self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Unit vector the camera looks along.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    /// Project a world point to the screen.
    /// Returns None for points behind the camera or outside the near/far range.
    pub fn project(&self, world: Vec3) -> Option<Projection> {
        self.project_with(&self.view_projection(), world)
    }

    /// Like [`project`](Self::project) with a precomputed `view_projection()`,
    /// optionally premultiplied by a model matrix so `point` can stay local.
    pub fn project_with(&self, clip_from_point: &Mat4, point: Vec3) -> Option<Projection> {
        let clip = *clip_from_point * point.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        if !(0.0..=1.0).contains(&ndc.z) {
            return None;
        }
        let screen = Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ndc.y) * 0.5 * self.viewport.y,
        );
        let half_fov = (self.fov_y_deg.to_radians() * 0.5).tan();
        let scale = self.viewport.y / (2.0 * half_fov * clip.w);
        Some(Projection { screen, depth: clip.w, scale })
    }

    /// Pixel position to normalized device coordinates in [-1, 1], Y up.
    pub fn screen_to_ndc(&self, screen: Vec2) -> Vec2 {
        Vec2::new(
            screen.x / self.viewport.x * 2.0 - 1.0,
            1.0 - screen.y / self.viewport.y * 2.0,
        )
    }

    /// World-space ray from the camera through a pixel.
    pub fn ray_from_screen(&self, screen: Vec2) -> Ray {
        let ndc = self.screen_to_ndc(screen);
        let inv = self.view_projection().inverse();
        let near = inv.project_point3(Vec3::new(ndc.x, ndc.y, 0.0));
        let far = inv.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        let direction = (far - near).normalize_or_zero();
        Ray { origin: self.position, direction }
    }
}

/// Drag-to-orbit camera controls with inertial damping.
/// The camera orbits `target` on a sphere of fixed radius.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    pub distance: f32,
    /// Angle around +Y, measured from +Z toward +X.
    pub azimuth: f32,
    /// Angle above the XZ plane.
    pub elevation: f32,
    /// Fraction of the pending rotation applied per update. Zero disables inertia.
    pub damping: f32,
    azimuth_delta: f32,
    elevation_delta: f32,
}

const MAX_ELEVATION: f32 = std::f32::consts::FRAC_PI_2 - 1e-3;

impl OrbitControls {
    /// Derive orbit parameters from the camera's current placement.
    pub fn from_camera(camera: &PerspectiveCamera) -> Self {
        let offset = camera.position - camera.target;
        let distance = offset.length();
        let (azimuth, elevation) = if distance > 0.0 {
            (offset.x.atan2(offset.z), (offset.y / distance).clamp(-1.0, 1.0).asin())
        } else {
            (0.0, 0.0)
        };
        Self {
            target: camera.target,
            distance,
            azimuth,
            elevation,
            damping: 0.0,
            azimuth_delta: 0.0,
            elevation_delta: 0.0,
        }
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping.clamp(0.0, 1.0);
        self
    }

    /// Queue a rotation from a pointer drag of (dx, dy) pixels.
    /// Dragging the full viewport height turns the camera one revolution.
    pub fn rotate(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        self.azimuth_delta -= std::f32::consts::TAU * dx / h;
        self.elevation_delta += std::f32::consts::TAU * dy / h;
    }

    /// Apply pending rotation and place the camera.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) {
        if self.damping > 0.0 {
            self.azimuth += self.azimuth_delta * self.damping;
            self.elevation += self.elevation_delta * self.damping;
            self.azimuth_delta *= 1.0 - self.damping;
            self.elevation_delta *= 1.0 - self.damping;
        } else {
            self.azimuth += self.azimuth_delta;
            self.elevation += self.elevation_delta;
            self.azimuth_delta = 0.0;
            self.elevation_delta = 0.0;
        }
        self.elevation = self.elevation.clamp(-MAX_ELEVATION, MAX_ELEVATION);

        let (sin_az, cos_az) = self.azimuth.sin_cos();
        let (sin_el, cos_el) = self.elevation.sin_cos();
        let offset = Vec3::new(
            self.distance * cos_el * sin_az,
            self.distance * sin_el,
            self.distance * cos_el * cos_az,
        );
        camera.target = self.target;
        camera.position = self.target + offset;
    }
}
