//! Pure math over the frame uniform block.
//!
//! Every function here is side-effect free and reads the published
//! [`FrameConstants`] without validating it: a degenerate projection or a
//! zero resolution degrades to infinities/NaN instead of faulting, matching
//! the shader-side behavior these functions mirror.

use glam::{FloatExt, Mat3, Mat4, Vec2, Vec3};

use super::constants::{FrameConstants, MASSIVE_LOD_LEVELS, VOXEL_LOD_LEVELS};

/// Convert a screen-pixel coordinate into normalized `[0, 1]` UV space.
///
/// Linear in the input; `screen_to_uv(frame, resolution)` is `(1, 1)`.
pub fn screen_to_uv(frame: &FrameConstants, screencoord: Vec2) -> Vec2 {
    let invres = Vec2::ONE / Vec2::from_array(frame.resolution);
    screencoord * invres
}

/// Recover view-space depth from a hardware depth-buffer value using the
/// projection's depth-encoding terms.
///
/// Returns the view-space z coordinate, which is negative for visible points
/// (the camera looks down its own -Z axis).
pub fn linearize_depth(hw_depth: f32, proj: Mat4) -> f32 {
    -proj.w_axis.z / (hw_depth + proj.z_axis.z)
}

/// Reconstruct the camera-relative position of the surface sampled at `uv`
/// with hardware depth `hw_depth`.
///
/// The result is expressed with the camera at the local origin: the engine
/// renders camera-relative (`world_offset` carries the origin shift), so no
/// camera position is ever added back in. The returned vector shares the
/// orientation frame of world space, not its translation.
///
/// Branch-free: frustum half-extents come from the projection diagonal, the
/// ray is interpolated across the top-left-origin UV (y flipped against the
/// Y-up view space), depth is linearized, and the view rotation is undone by
/// the transpose of the view matrix's upper 3x3 (orthonormal, so transpose
/// is inverse).
pub fn reconstruct_camera_relative_position(
    frame: &FrameConstants,
    hw_depth: f32,
    uv: Vec2,
) -> Vec3 {
    let proj = Mat4::from_cols_array_2d(&frame.projection_matrix);
    let ray_x = 1.0 / proj.x_axis.x;
    let ray_y = 1.0 / proj.y_axis.y;
    let screen_ray = Vec3::new(
        (-ray_x).lerp(ray_x, uv.x),
        -(-ray_y).lerp(ray_y, uv.y),
        -1.0,
    );

    let depth = -linearize_depth(hw_depth, proj);
    let view_rotation = Mat3::from_mat4(Mat4::from_cols_array_2d(&frame.view_matrix));
    let view_direction = view_rotation.transpose() * screen_ray;

    depth * view_direction
}

/// Look up the configured (near, far) distance band for a voxel LOD tier.
///
/// Massive tiers are offset 8 slots past the 8 standard tiers. Out-of-range
/// indices clamp to the coarsest configured tier rather than erroring.
pub fn voxel_lod_range(frame: &FrameConstants, lod: u32, is_massive: bool) -> Vec2 {
    let lod = (lod + VOXEL_LOD_LEVELS * is_massive as u32)
        .min(VOXEL_LOD_LEVELS + MASSIVE_LOD_LEVELS - 1);
    let entry = frame.voxel_lod_range[(lod / 2) as usize];
    if lod % 2 == 1 {
        Vec2::new(entry[2], entry[3])
    } else {
        Vec2::new(entry[0], entry[1])
    }
}
