//! First-Person Camera
//!
//! Mouse-look camera for the sandbox. Raw pointer motion turns yaw and pitch
//! directly with no smoothing. The crosshair sits at screen center, so the
//! targeting ray is simply the camera position plus its forward vector.
//!
//! Conventions: +X right, +Y up, yaw 0 looks toward -Z, positive pitch looks up.

use glam::{Mat4, Vec3};

/// Pitch limit: ±89 degrees in radians
const PITCH_LIMIT: f32 = 89.0 * std::f32::consts::PI / 180.0;

/// Perspective projection parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in degrees
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub aspect: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            aspect: 16.0 / 9.0,
        }
    }
}

impl Projection {
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    /// Window resize. Zero-sized windows (minimized) keep the old aspect.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }
}

/// A ray cast from the camera through the crosshair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRay {
    pub origin: Vec3,
    /// Unit length
    pub direction: Vec3,
}

#[derive(Clone, Debug)]
pub struct FirstPersonCamera {
    /// Eye position in world space
    pub position: Vec3,
    /// Horizontal angle (radians), unrestricted
    pub yaw: f32,
    /// Vertical angle (radians), clamped to ±89°
    pub pitch: f32,
    /// Radians per pixel of pointer motion
    pub sensitivity: f32,
    pub projection: Projection,
}

impl Default for FirstPersonCamera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            sensitivity: 0.002,
            projection: Projection::default(),
        }
    }
}

impl FirstPersonCamera {
    pub fn new(position: Vec3, sensitivity: f32) -> Self {
        Self {
            position,
            sensitivity,
            ..Default::default()
        }
    }

    /// Turns the camera by a pointer delta in pixels.
    ///
    /// Moving right increases yaw; moving down (positive `dy`) looks down.
    pub fn apply_mouse_delta(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch = (self.pitch - dy * self.sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    #[inline]
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            -self.yaw.cos() * self.pitch.cos(),
        )
        .normalize()
    }

    #[inline]
    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    /// Forward projected onto the ground plane.
    #[inline]
    pub fn horizontal_forward(&self) -> Vec3 {
        Vec3::new(self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    /// Right projected onto the ground plane.
    #[inline]
    pub fn horizontal_right(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, self.yaw.sin())
    }

    /// Ray through the screen center.
    pub fn center_ray(&self) -> CameraRay {
        CameraRay {
            origin: self.position,
            direction: self.forward(),
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), Vec3::Y)
    }

    /// Camera-to-world transform, used to attach the hand block.
    pub fn world_from_camera(&self) -> Mat4 {
        self.view_matrix().inverse()
    }
}
