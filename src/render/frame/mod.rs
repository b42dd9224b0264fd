//! Per-frame uniform block and the math that consumes it.
//!
//! [`FrameConstants`] is the snapshot of camera, lighting, atmosphere,
//! tonemapping, and voxel-LOD parameters uploaded once per frame. The host
//! builds a [`FrameState`], converts it, and publishes the result; after
//! that the block is read-only for the rest of the frame, so the pure
//! functions in [`math`] are safe to call from any number of readers.

pub mod constants;
pub mod math;
pub mod settings;
pub mod state;

pub use constants::{
    FrameConstants, FRAME_CONSTANTS_SIZE, MASSIVE_LOD_LEVELS, MAX_ADDITIONAL_SUNS,
    VOXEL_LOD_LEVELS, VOXEL_LOD_RANGE_VECS, VOXEL_LOD_TOTAL,
};
pub use math::{
    linearize_depth, reconstruct_camera_relative_position, screen_to_uv, voxel_lod_range,
};
pub use settings::RenderSettings;
pub use state::FrameState;
