//! Camera and cube transforms.
//!
//! Matrices are built column-major for column vectors. That storage is the
//! same byte sequence a row-vector DirectXMath matrix would have, so the
//! shaders receive `to_cols_array()` unchanged and multiply `mul(M, v)`.

use bevy_math::Mat4;
use bevy_math::Vec3;

pub const FIELD_OF_VIEW_DEGREES: f32 = 45.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 100.0;

pub const EYE_POSITION: Vec3 = Vec3::new(0.0, 0.0, -10.0);
pub const FOCUS_POINT: Vec3 = Vec3::new(0.0, 0.0, 0.0);
pub const UP_DIRECTION: Vec3 = Vec3::new(0.0, 1.0, 0.0);

pub const DEGREES_PER_SECOND: f32 = 90.0;

pub fn rotation_axis() -> Vec3 {
    Vec3::new(0.0, 1.0, 1.0).normalize()
}

/// Left-handed perspective for the given client area.
pub fn projection_matrix(client_width: u32, client_height: u32) -> Mat4 {
    let aspect_ratio = client_width as f32 / client_height.max(1) as f32;
    Mat4::perspective_lh(
        FIELD_OF_VIEW_DEGREES.to_radians(),
        aspect_ratio,
        NEAR_PLANE,
        FAR_PLANE,
    )
}

/// The camera never moves.
pub fn view_matrix() -> Mat4 {
    Mat4::look_at_lh(EYE_POSITION, FOCUS_POINT, UP_DIRECTION)
}

pub fn world_matrix(angle_degrees: f32) -> Mat4 {
    Mat4::from_axis_angle(rotation_axis(), angle_degrees.to_radians())
}

/// The matrices rewritten every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTransforms {
    pub view: Mat4,
    pub world: Mat4,
}

/// Spin state of the cube. The angle stays in `[0, 360)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct CubeRotation {
    angle_degrees: f32,
}

impl CubeRotation {
    pub fn angle_degrees(&self) -> f32 {
        self.angle_degrees
    }

    pub fn advance(&mut self, delta_seconds: f32) -> FrameTransforms {
        self.angle_degrees =
            (self.angle_degrees + DEGREES_PER_SECOND * delta_seconds).rem_euclid(360.0);
        FrameTransforms {
            view: view_matrix(),
            world: world_matrix(self.angle_degrees),
        }
    }
}
