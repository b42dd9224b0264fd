//! The per-frame GPU uniform block.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec4};

/// Capacity of the additional-sun direction array.
pub const MAX_ADDITIONAL_SUNS: usize = 5;

/// Standard voxel LOD tiers.
pub const VOXEL_LOD_LEVELS: u32 = 8;

/// Massive (planet-scale) voxel LOD tiers, offset past the standard ones.
pub const MASSIVE_LOD_LEVELS: u32 = 16;

/// Total voxel LOD tiers (standard + massive).
pub const VOXEL_LOD_TOTAL: usize = (VOXEL_LOD_LEVELS + MASSIVE_LOD_LEVELS) as usize;

/// Vec4 entries in the LOD range table; each entry holds two (near, far) pairs.
pub const VOXEL_LOD_RANGE_VECS: usize = VOXEL_LOD_TOTAL / 2;

/// Exact byte size of [`FrameConstants`], shared with the shader-side declaration.
pub const FRAME_CONSTANTS_SIZE: usize = 1072;

/// Per-frame uniform block (must match the shader struct exactly).
///
/// Published once per frame by the host and treated as read-only until the
/// next frame boundary. Field order, widths, and the explicit padding fields
/// are a binary contract with GPU-side code: reordering or resizing anything
/// here silently corrupts every field that follows. The layout tests below
/// pin the size and critical offsets.
///
/// Matrices are stored in glam's column-major `to_cols_array_2d` form. All
/// vec3-plus-scalar groups are arranged so no field straddles a 16-byte
/// boundary.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct FrameConstants {
    // -- Camera transforms (7 * 64 bytes, offset 0) --
    pub view_projection_matrix: [[f32; 4]; 4],
    pub view_matrix: [[f32; 4]; 4],
    pub projection_matrix: [[f32; 4]; 4],
    pub inv_view_matrix: [[f32; 4]; 4],
    pub inv_proj_matrix: [[f32; 4]; 4],
    pub inv_view_proj_matrix: [[f32; 4]; 4],
    /// View-projection in absolute world space (before the camera-relative
    /// origin shift).
    pub view_projection_matrix_world: [[f32; 4]; 4],
    /// Rendering-origin shift that keeps the camera near the float origin
    /// (w unused).
    pub world_offset: [f32; 4],

    // -- Viewport (16 bytes, offset 464) --
    pub resolution: [f32; 2],
    /// Elapsed time in seconds.
    pub time: f32,
    /// Frame delta time in seconds.
    pub timedelta: f32,

    // -- Terrain (32 bytes, offset 480) --
    pub terrain_texture_distances: [f32; 4],
    pub terrain_material_transition: [f32; 2],
    pub tiles_num: u32,
    pub tiles_x: u32,

    // -- Foliage (32 bytes, offset 512) --
    pub foliage_clipping_scaling: [f32; 4],
    pub wind_vec: [f32; 3],
    /// Wind response decay constant.
    pub tau: f32,

    // -- Exposure / tonemapping (48 bytes, offset 544) --
    pub backlight_mult: f32,
    pub env_mult: f32,
    pub contrast: f32,
    pub brightness: f32,
    pub middle_grey: f32,
    pub luminance_exposure: f32,
    pub bloom_exposure: f32,
    pub bloom_mult: f32,
    pub middle_grey_curve_sharpness: f32,
    pub middle_grey_base: f32,
    pub blue_shift_rapidness: f32,
    pub blue_shift_scale: f32,

    // -- Fog (16 bytes, offset 592) --
    pub fog_density: f32,
    pub fog_mult: f32,
    pub fog_offset: f32,
    /// RGBA8, red in the least significant byte. See [`pack_rgba`].
    pub fog_color: u32,

    // -- Lighting (48 bytes, offset 608) --
    pub directional_light_vec: [f32; 3],
    pub skybox_blend: f32,
    pub directional_light_color: [f32; 3],
    pub forward_pass_ambient: f32,
    pub additional_sun_color: [f32; 3],
    pub additional_sun_intensity: f32,
    /// Directions of the active additional suns (w unused). Entries at
    /// index >= `additional_suns_in_use` are never read.
    pub additional_sun_directions: [[f32; 4]; MAX_ADDITIONAL_SUNS],
    pub additional_suns_in_use: i32,
    pub _padding1: [f32; 3],

    // -- Tonemapping curve (32 bytes, offset 752) --
    pub tonemapping_a: f32,
    pub tonemapping_b: f32,
    pub tonemapping_c: f32,
    pub tonemapping_d: f32,
    pub tonemapping_e: f32,
    pub tonemapping_f: f32,
    pub log_lum_threshold: f32,
    /// Non-zero forces LOD visualization in the voxel shaders.
    pub debug_voxel_lod: f32,

    // -- Voxel LOD (224 bytes, offset 784) --
    /// 24 (near, far) distance pairs packed two per entry. See
    /// [`pack_lod_ranges`].
    pub voxel_lod_range: [[f32; 4]; VOXEL_LOD_RANGE_VECS],
    pub skybox_brightness: f32,
    pub shadow_fadeout: f32,
    pub _padding2: [f32; 2],

    // -- Voxel ambient occlusion (16 bytes, offset 992) --
    /// 0.0 or 1.0.
    pub enable_voxel_ao: f32,
    pub voxel_ao_min: f32,
    pub voxel_ao_max: f32,
    pub voxel_ao_offset: f32,

    // -- Background (64 bytes, offset 1008) --
    pub background_orientation: [[f32; 4]; 4],
}

// The shader-side declaration assumes exactly this size.
const _: () = assert!(std::mem::size_of::<FrameConstants>() == FRAME_CONSTANTS_SIZE);
const _: () = assert!(std::mem::size_of::<FrameConstants>() % 16 == 0);

impl Default for FrameConstants {
    fn default() -> Self {
        let identity = Mat4::IDENTITY.to_cols_array_2d();
        Self {
            view_projection_matrix: identity,
            view_matrix: identity,
            projection_matrix: identity,
            inv_view_matrix: identity,
            inv_proj_matrix: identity,
            inv_view_proj_matrix: identity,
            view_projection_matrix_world: identity,
            background_orientation: identity,
            resolution: [1.0, 1.0],
            ..Self::zeroed()
        }
    }
}

/// Pack a linear `[0, 1]` RGBA color into 8 bits per channel, red in the
/// least significant byte. Out-of-range components are clamped.
pub fn pack_rgba(color: Vec4) -> u32 {
    let c = color.clamp(Vec4::ZERO, Vec4::ONE) * 255.0;
    (c.x.round() as u32)
        | (c.y.round() as u32) << 8
        | (c.z.round() as u32) << 16
        | (c.w.round() as u32) << 24
}

/// Unpack an RGBA8 color into linear `[0, 1]` components.
pub fn unpack_rgba(packed: u32) -> Vec4 {
    Vec4::new(
        (packed & 0xff) as f32,
        (packed >> 8 & 0xff) as f32,
        (packed >> 16 & 0xff) as f32,
        (packed >> 24 & 0xff) as f32,
    ) / 255.0
}

/// Pack 24 (near, far) LOD distance pairs into the vec4 table layout:
/// entry `i` holds pair `2i` in xy and pair `2i + 1` in zw. Lossless.
pub fn pack_lod_ranges(ranges: &[[f32; 2]; VOXEL_LOD_TOTAL]) -> [[f32; 4]; VOXEL_LOD_RANGE_VECS] {
    let mut packed = [[0.0; 4]; VOXEL_LOD_RANGE_VECS];
    for (i, entry) in packed.iter_mut().enumerate() {
        let [near_even, far_even] = ranges[i * 2];
        let [near_odd, far_odd] = ranges[i * 2 + 1];
        *entry = [near_even, far_even, near_odd, far_odd];
    }
    packed
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::offset_of;

    #[test]
    fn test_exact_size() {
        assert_eq!(
            std::mem::size_of::<FrameConstants>(),
            FRAME_CONSTANTS_SIZE,
            "FrameConstants must match the shader-side byte size"
        );
    }

    #[test]
    fn test_field_offsets() {
        // Offsets are the shader-side contract; any drift here means a field
        // was reordered, resized, or picked up implicit padding.
        assert_eq!(offset_of!(FrameConstants, view_projection_matrix), 0);
        assert_eq!(offset_of!(FrameConstants, view_matrix), 64);
        assert_eq!(offset_of!(FrameConstants, projection_matrix), 128);
        assert_eq!(offset_of!(FrameConstants, inv_view_matrix), 192);
        assert_eq!(offset_of!(FrameConstants, inv_proj_matrix), 256);
        assert_eq!(offset_of!(FrameConstants, inv_view_proj_matrix), 320);
        assert_eq!(offset_of!(FrameConstants, view_projection_matrix_world), 384);
        assert_eq!(offset_of!(FrameConstants, world_offset), 448);
        assert_eq!(offset_of!(FrameConstants, resolution), 464);
        assert_eq!(offset_of!(FrameConstants, time), 472);
        assert_eq!(offset_of!(FrameConstants, timedelta), 476);
        assert_eq!(offset_of!(FrameConstants, terrain_texture_distances), 480);
        assert_eq!(offset_of!(FrameConstants, terrain_material_transition), 496);
        assert_eq!(offset_of!(FrameConstants, tiles_num), 504);
        assert_eq!(offset_of!(FrameConstants, foliage_clipping_scaling), 512);
        assert_eq!(offset_of!(FrameConstants, wind_vec), 528);
        assert_eq!(offset_of!(FrameConstants, tau), 540);
        assert_eq!(offset_of!(FrameConstants, backlight_mult), 544);
        assert_eq!(offset_of!(FrameConstants, middle_grey), 560);
        assert_eq!(offset_of!(FrameConstants, middle_grey_curve_sharpness), 576);
        assert_eq!(offset_of!(FrameConstants, fog_density), 592);
        assert_eq!(offset_of!(FrameConstants, fog_color), 604);
        assert_eq!(offset_of!(FrameConstants, directional_light_vec), 608);
        assert_eq!(offset_of!(FrameConstants, directional_light_color), 624);
        assert_eq!(offset_of!(FrameConstants, additional_sun_color), 640);
        assert_eq!(offset_of!(FrameConstants, additional_sun_directions), 656);
        assert_eq!(offset_of!(FrameConstants, additional_suns_in_use), 736);
        assert_eq!(offset_of!(FrameConstants, tonemapping_a), 752);
        assert_eq!(offset_of!(FrameConstants, log_lum_threshold), 776);
        assert_eq!(offset_of!(FrameConstants, voxel_lod_range), 784);
        assert_eq!(offset_of!(FrameConstants, skybox_brightness), 976);
        assert_eq!(offset_of!(FrameConstants, enable_voxel_ao), 992);
        assert_eq!(offset_of!(FrameConstants, background_orientation), 1008);
    }

    #[test]
    fn test_bytemuck_cast() {
        let frame = FrameConstants::default();
        let bytes = bytemuck::bytes_of(&frame);
        assert_eq!(bytes.len(), FRAME_CONSTANTS_SIZE);
    }

    #[test]
    fn test_default_padding_is_zero() {
        let frame = FrameConstants::default();
        assert_eq!(frame._padding1, [0.0; 3]);
        assert_eq!(frame._padding2, [0.0; 2]);
    }

    #[test]
    fn test_pack_rgba_round_trip() {
        let color = Vec4::new(1.0, 0.5, 0.0, 1.0);
        let packed = pack_rgba(color);
        assert_eq!(packed & 0xff, 255);
        assert_eq!(packed >> 24, 255);

        let unpacked = unpack_rgba(packed);
        assert!((unpacked.x - 1.0).abs() < 1e-6);
        assert!((unpacked.y - 0.5).abs() < 1.0 / 255.0);
        assert_eq!(unpacked.z, 0.0);
    }

    #[test]
    fn test_pack_rgba_clamps() {
        let packed = pack_rgba(Vec4::new(2.0, -1.0, 0.0, 1.0));
        assert_eq!(packed & 0xff, 255);
        assert_eq!(packed >> 8 & 0xff, 0);
    }

    #[test]
    fn test_pack_lod_ranges_layout() {
        let mut ranges = [[0.0f32; 2]; VOXEL_LOD_TOTAL];
        for (i, r) in ranges.iter_mut().enumerate() {
            *r = [i as f32, i as f32 + 0.5];
        }
        let packed = pack_lod_ranges(&ranges);

        // Pair 0 in xy of entry 0, pair 1 in zw of entry 0
        assert_eq!(packed[0], [0.0, 0.5, 1.0, 1.5]);
        // Last pair lands in zw of the last entry
        assert_eq!(packed[VOXEL_LOD_RANGE_VECS - 1], [22.0, 22.5, 23.0, 23.5]);
    }
}
