//! Camera and view management.

use glam::{Mat4, Vec3};
use infigrid_core::{ViewerOptions, WorldAxis};

/// Smallest polar angle from the up axis; keeps the view matrix well defined.
const MIN_POLAR_ANGLE: f32 = 0.01;

/// A perspective camera with turntable navigation.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space.
    pub position: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Up vector. Orbiting turns around this axis.
    pub up: Vec3,
    /// Field of view in radians.
    pub fov: f32,
    /// Aspect ratio (width / height).
    pub aspect_ratio: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
}

impl Camera {
    /// Creates a new camera with default settings.
    #[must_use]
    pub fn new(aspect_ratio: f32) -> Self {
        Self::from_options(&ViewerOptions::default(), aspect_ratio)
    }

    /// Creates a camera from viewer options.
    #[must_use]
    pub fn from_options(options: &ViewerOptions, aspect_ratio: f32) -> Self {
        let mut camera = Self {
            position: options.camera_position,
            target: options.camera_target,
            up: options.up_axis.unit(),
            fov: std::f32::consts::FRAC_PI_4,
            aspect_ratio,
            near: 0.01,
            far: 1000.0,
        };
        camera.set_fov_degrees(options.fov_degrees);
        camera.set_near(options.near);
        camera.set_far(options.far);
        camera
    }

    /// Sets the aspect ratio.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }

    /// Sets the up axis.
    ///
    /// A camera looking along the new axis is tilted just off it so the view
    /// matrix stays defined.
    pub fn set_up_axis(&mut self, axis: WorldAxis) {
        self.up = axis.unit();
        self.orbit(0.0, 0.0);
    }

    /// Returns the view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Returns the projection matrix.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect_ratio, self.near, self.far)
    }

    /// Returns the combined view-projection matrix.
    #[must_use]
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Returns the camera's forward direction.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    /// Returns the camera's right direction.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.forward().cross(self.up).normalize_or_zero()
    }

    /// Returns the distance from the camera to its target.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }

    /// Orbits the camera around the target.
    ///
    /// `delta_x` turns about the up axis, `delta_y` tilts toward or away from
    /// it. The tilt stops just short of the poles.
    pub fn orbit(&mut self, delta_x: f32, delta_y: f32) {
        let up = self.up.normalize_or(Vec3::Y);
        let (e1, e2) = up.any_orthonormal_pair();

        let offset = self.position - self.target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return;
        }

        let mut theta = offset.dot(e2).atan2(offset.dot(e1));
        let mut phi = (offset.dot(up) / radius).clamp(-1.0, 1.0).acos();

        theta -= delta_x;
        phi = (phi - delta_y).clamp(MIN_POLAR_ANGLE, std::f32::consts::PI - MIN_POLAR_ANGLE);

        self.position = self.target
            + radius * (phi.sin() * (theta.cos() * e1 + theta.sin() * e2) + phi.cos() * up);
    }

    /// Pans the camera.
    pub fn pan(&mut self, delta_x: f32, delta_y: f32) {
        let right = self.right();
        let screen_up = right.cross(self.forward());
        let offset = right * delta_x + screen_up * delta_y;
        self.position += offset;
        self.target += offset;
    }

    /// Moves the camera toward (positive) or away from (negative) the target.
    pub fn zoom(&mut self, delta: f32) {
        let direction = self.forward();
        let distance = self.distance();
        let new_distance = (distance - delta).max(0.1);
        self.position = self.target - direction * new_distance;
    }

    /// Sets the field of view in radians.
    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov.clamp(0.1, std::f32::consts::PI - 0.1);
    }

    /// Sets the near clipping plane.
    pub fn set_near(&mut self, near: f32) {
        self.near = near.max(0.001);
    }

    /// Sets the far clipping plane.
    pub fn set_far(&mut self, far: f32) {
        self.far = far.max(self.near + 0.1);
    }

    /// Returns FOV in degrees.
    #[must_use]
    pub fn fov_degrees(&self) -> f32 {
        self.fov.to_degrees()
    }

    /// Sets FOV from degrees.
    pub fn set_fov_degrees(&mut self, degrees: f32) {
        self.set_fov(degrees.to_radians());
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(16.0 / 9.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_defaults() {
        let camera = Camera::default();
        assert_eq!(camera.position, Vec3::new(10.0, 10.0, 10.0));
        assert_eq!(camera.up, Vec3::Z);
        assert!((camera.fov_degrees() - 40.0).abs() < 1e-3);
        assert_eq!(camera.far, 4000.0);
    }

    #[test]
    fn test_set_fov_clamping() {
        let mut camera = Camera::new(1.0);
        camera.set_fov(0.0);
        assert!(camera.fov >= 0.1);

        camera.set_fov(std::f32::consts::PI);
        assert!(camera.fov < std::f32::consts::PI);
    }

    #[test]
    fn test_set_far_stays_beyond_near() {
        let mut camera = Camera::new(1.0);
        camera.set_near(5.0);
        camera.set_far(1.0);
        assert!(camera.far > camera.near);
    }

    #[test]
    fn test_orbit_keeps_radius() {
        let mut camera = Camera::new(1.0);
        let radius = camera.distance();
        camera.orbit(0.7, -0.3);
        assert!((camera.distance() - radius).abs() < 1e-3);
    }

    #[test]
    fn test_orbit_turns_about_up_axis() {
        let mut camera = Camera::new(1.0);
        let height = camera.position.z;
        camera.orbit(1.2, 0.0);
        assert!((camera.position.z - height).abs() < 1e-3);
        assert!(camera.position.x != 10.0 || camera.position.y != 10.0);
    }

    #[test]
    fn test_orbit_stops_at_pole() {
        let mut camera = Camera::new(1.0);
        camera.orbit(0.0, 10.0);
        let offset = (camera.position - camera.target).normalize();
        assert!(offset.dot(camera.up) < 1.0);
        assert!(camera.view_matrix().is_finite());
    }

    #[test]
    fn test_set_up_axis_avoids_looking_along_up() {
        let mut camera = Camera::new(1.0);
        camera.position = Vec3::new(0.0, 0.0, 10.0);
        camera.target = Vec3::ZERO;
        camera.up = Vec3::Y;
        camera.set_up_axis(WorldAxis::Z);

        assert_eq!(camera.up, Vec3::Z);
        assert!(camera.forward().cross(camera.up).length() > 1e-3);
        assert!(camera.view_matrix().is_finite());
        assert!((camera.distance() - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_set_up_axis_keeps_general_position() {
        let mut camera = Camera::new(1.0);
        let before = camera.position;
        camera.set_up_axis(WorldAxis::Y);
        assert_eq!(camera.up, Vec3::Y);
        assert!((camera.position - before).length() < 1e-3);
    }

    #[test]
    fn test_pan_moves_target_with_position() {
        let mut camera = Camera::new(1.0);
        let before = camera.position - camera.target;
        camera.pan(1.0, 2.0);
        let after = camera.position - camera.target;
        assert!((before - after).length() < 1e-4);
        assert!(camera.target.length() > 1.0);
    }

    #[test]
    fn test_zoom() {
        let mut camera = Camera::new(1.0);
        let initial_distance = camera.distance();
        camera.zoom(1.0);
        assert!(camera.distance() < initial_distance);

        camera.zoom(1.0e6);
        assert!((camera.distance() - 0.1).abs() < 1e-3);
    }
}
