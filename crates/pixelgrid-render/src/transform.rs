//! World-to-screen transform uniform shared by both pipelines.
//!
//! Geometry is stored in world coordinates; the GPU applies:
//! ```text
//! screen_pos = world_pos * scale + offset
//! clip_pos   = projection * screen_pos
//! ```
//! so pan/zoom only rewrites this 80-byte uniform, never the geometry.

use bytemuck::{Pod, Zeroable};
use pixelgrid_core::CameraState;

/// GPU uniform for the camera transform.
///
/// Layout (80 bytes, 16-byte aligned):
/// ```text
/// offset 0:  mat4x4<f32> projection  (64 bytes)
/// offset 64: vec2<f32>   scale        (8 bytes)
/// offset 72: vec2<f32>   offset       (8 bytes)
/// ```
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable, PartialEq)]
pub struct ViewTransform {
    projection: [[f32; 4]; 4],
    scale: [f32; 2],
    offset: [f32; 2],
}

impl ViewTransform {
    /// Build the transform for a camera and a viewport size in pixels.
    ///
    /// The camera offset is the world point at the viewport's top-left, so
    /// `screen = (world - camera_offset) * camera_scale`.
    pub fn for_camera(camera: &CameraState, viewport_width: f32, viewport_height: f32) -> Self {
        let s = camera.scale as f32;
        Self {
            projection: Self::ortho_matrix(viewport_width, viewport_height),
            scale: [s, s],
            offset: [
                -(camera.offset_x as f32) * s,
                -(camera.offset_y as f32) * s,
            ],
        }
    }

    /// Screen position of a world point under this transform, for tests and
    /// hit checks.
    pub fn world_to_screen(&self, world_x: f32, world_y: f32) -> (f32, f32) {
        (
            world_x * self.scale[0] + self.offset[0],
            world_y * self.scale[1] + self.offset[1],
        )
    }

    /// Orthographic projection for the given viewport size.
    ///
    /// Maps (0,0) to top-left and (width, height) to bottom-right.
    fn ortho_matrix(width: f32, height: f32) -> [[f32; 4]; 4] {
        [
            [2.0 / width, 0.0, 0.0, 0.0],
            [0.0, -2.0 / height, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [-1.0, 1.0, 0.0, 1.0],
        ]
    }
}
