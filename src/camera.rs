use crate::config::CameraConfig;

pub const YAW: f32 = -90.;
pub const PITCH: f32 = 0.;
pub const SPEED: f32 = 2.5;
pub const SENSITIVITY: f32 = 0.1;
pub const ZOOM: f32 = 45.;

const PITCH_LIMIT: f32 = 89.;
const MIN_ZOOM: f32 = 1.;
const MAX_ZOOM: f32 = 45.;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right,
}

/// Free-look camera. Angles are kept in degrees.
#[derive(Clone, Debug)]
pub struct Camera {
    position: glm::Vec3,
    front: glm::Vec3,
    right: glm::Vec3,
    up: glm::Vec3,
    world_up: glm::Vec3,
    yaw: f32,
    pitch: f32,
    speed: f32,
    sensitivity: f32,
    zoom: f32,
}

impl Camera {
    #[cfg(test)]
    pub fn new(position: glm::Vec3) -> Camera {
        Camera::with_orientation(position, YAW, PITCH)
    }

    pub fn with_orientation(position: glm::Vec3, yaw: f32, pitch: f32) -> Camera {
        let mut camera = Camera {
            position,
            front: glm::vec3(0., 0., -1.),
            right: glm::vec3(1., 0., 0.),
            up: glm::vec3(0., 1., 0.),
            world_up: glm::vec3(0., 1., 0.),
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            speed: SPEED,
            sensitivity: SENSITIVITY,
            zoom: ZOOM,
        };
        camera.update_vectors();
        camera
    }

    pub fn from_config(config: &CameraConfig) -> Camera {
        let [x, y, z] = config.position;
        let mut camera = Camera::with_orientation(glm::vec3(x, y, z), config.yaw, config.pitch);
        camera.speed = config.speed;
        camera.sensitivity = config.sensitivity;
        camera.zoom = config.zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        camera
    }

    pub fn position(&self) -> glm::Vec3 {
        self.position
    }

    pub fn front(&self) -> glm::Vec3 {
        self.front
    }

    pub fn right(&self) -> glm::Vec3 {
        self.right
    }

    pub fn up(&self) -> glm::Vec3 {
        self.up
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Vertical field of view in degrees.
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn view_matrix(&self) -> glm::Mat4 {
        glm::look_at(&self.position, &(self.position + self.front), &self.up)
    }

    pub fn projection_matrix(&self, aspect: f32, near: f32, far: f32) -> glm::Mat4 {
        glm::perspective(aspect, self.zoom.to_radians(), near, far)
    }

    /// Moves along the ground plane; `dt` is seconds since the previous frame.
    pub fn apply_keyboard_move(&mut self, direction: Movement, dt: f32) {
        let velocity = self.speed * dt;

        match direction {
            Movement::Forward => self.position += self.horizontal_front() * velocity,
            Movement::Backward => self.position -= self.horizontal_front() * velocity,
            Movement::Left => self.position -= self.right * velocity,
            Movement::Right => self.position += self.right * velocity,
        }
    }

    pub fn apply_mouse_look(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch = (self.pitch + dy * self.sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);

        self.update_vectors();
    }

    pub fn apply_scroll(&mut self, dy: f32) {
        self.zoom = (self.zoom - dy).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    fn horizontal_front(&self) -> glm::Vec3 {
        // pitch never reaches 90 degrees, so the projection is never zero
        glm::normalize(&glm::vec3(self.front.x, 0., self.front.z))
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());

        self.front = glm::normalize(&glm::vec3(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos()
        ));
        self.right = glm::normalize(&glm::cross(&self.front, &self.world_up));
        self.up = glm::normalize(&glm::cross(&self.right, &self.front));
    }
}
