//! The orbiting camera.

use glam::{Mat4, Vec3};

use crate::config::CameraConfig;

/// A camera circling the origin in the XZ plane, always looking at the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    /// Radians. Grows without bound.
    pub orbit_angle: f32,
    /// Radians per second.
    pub angular_speed: f32,
    pub radius: f32,
    pub eye_height: f32,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl OrbitCamera {
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            orbit_angle: 0.0,
            angular_speed: config.orbit_speed_degrees.to_radians(),
            radius: config.orbit_radius,
            eye_height: config.eye_height,
            fov_y: config.fov_y_degrees.to_radians(),
            near: config.near,
            far: config.far,
        }
    }

    /// Moves the camera along its orbit by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.orbit_angle += self.angular_speed * dt;
    }

    pub fn eye(&self) -> Vec3 {
        Vec3::new(
            self.radius * self.orbit_angle.sin(),
            self.eye_height,
            self.radius * self.orbit_angle.cos(),
        )
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), Vec3::ZERO, Vec3::Y)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y, aspect, self.near, self.far)
    }

    /// `projection * view` for a drawable of the given size.
    pub fn view_projection(&self, width: u32, height: u32) -> Mat4 {
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        self.projection(aspect) * self.view()
    }
}
