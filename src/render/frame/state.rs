//! Host-side frame state and its conversion to the GPU block.

use glam::{Mat4, Vec2, Vec3, Vec4};

use super::constants::{
    pack_lod_ranges, pack_rgba, FrameConstants, MAX_ADDITIONAL_SUNS, VOXEL_LOD_TOTAL,
};

/// CPU-side snapshot of everything the frame uniform block carries, in
/// friendly types (glam vectors, unpacked color, per-tier LOD table).
///
/// The host fills this from its camera, environment, and postprocess systems
/// each frame, then converts it with `FrameConstants::from(&state)` and
/// publishes the result. Matrices arrive already computed; the conversion
/// only derives the combined view-projection and the inverses.
#[derive(Clone, Debug)]
pub struct FrameState {
    // Camera
    pub view: Mat4,
    pub projection: Mat4,
    /// View-projection in absolute world space, before the camera-relative
    /// origin shift.
    pub view_projection_world: Mat4,
    pub world_offset: Vec3,

    // Viewport
    pub resolution: Vec2,
    pub time: f32,
    pub timedelta: f32,

    // Terrain
    pub terrain_texture_distances: Vec4,
    pub terrain_material_transition: Vec2,
    pub tiles_num: u32,
    pub tiles_x: u32,

    // Foliage
    pub foliage_clipping_scaling: Vec4,
    pub wind: Vec3,
    pub wind_tau: f32,

    // Exposure / tonemapping
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
    /// Filmic curve coefficients A-F.
    pub tonemapping_curve: [f32; 6],
    pub log_lum_threshold: f32,

    // Fog
    pub fog_density: f32,
    pub fog_mult: f32,
    pub fog_offset: f32,
    /// Linear RGBA, packed to 8 bits per channel during conversion.
    pub fog_color: Vec4,

    // Lighting
    pub directional_light_vec: Vec3,
    pub skybox_blend: f32,
    pub directional_light_color: Vec3,
    pub forward_pass_ambient: f32,
    pub additional_sun_color: Vec3,
    pub additional_sun_intensity: f32,
    pub additional_sun_directions: [Vec3; MAX_ADDITIONAL_SUNS],
    /// Clamped to [`MAX_ADDITIONAL_SUNS`] during conversion.
    pub additional_suns_in_use: u32,

    // Voxel LOD
    pub voxel_lod_ranges: [[f32; 2]; VOXEL_LOD_TOTAL],
    pub skybox_brightness: f32,
    pub shadow_fadeout: f32,
    pub debug_voxel_lod: f32,

    // Voxel ambient occlusion
    pub enable_voxel_ao: bool,
    pub voxel_ao_min: f32,
    pub voxel_ao_max: f32,
    pub voxel_ao_offset: f32,

    // Background
    pub background_orientation: Mat4,
}

/// Default LOD bands: overlapping, roughly doubling with distance so each
/// tier fades in before the previous one fades out.
fn default_lod_ranges() -> [[f32; 2]; VOXEL_LOD_TOTAL] {
    let mut ranges = [[0.0f32; 2]; VOXEL_LOD_TOTAL];
    let mut near = 0.0f32;
    let mut far = 60.0f32;
    for r in ranges.iter_mut() {
        *r = [near, far];
        near = far * 0.9;
        far *= 2.0;
    }
    ranges
}

impl Default for FrameState {
    fn default() -> Self {
        Self {
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            view_projection_world: Mat4::IDENTITY,
            world_offset: Vec3::ZERO,
            resolution: Vec2::new(1280.0, 720.0),
            time: 0.0,
            timedelta: 0.0,
            terrain_texture_distances: Vec4::new(40.0, 120.0, 400.0, 2000.0),
            terrain_material_transition: Vec2::new(5.0, 20.0),
            tiles_num: 0,
            tiles_x: 0,
            foliage_clipping_scaling: Vec4::new(1.0, 1.0, 0.0, 0.0),
            wind: Vec3::ZERO,
            wind_tau: 0.5,
            backlight_mult: 1.0,
            env_mult: 1.0,
            contrast: 1.0,
            brightness: 1.0,
            middle_grey: 0.18,
            luminance_exposure: 1.0,
            bloom_exposure: 1.0,
            bloom_mult: 0.25,
            middle_grey_curve_sharpness: 4.0,
            middle_grey_base: 0.005,
            blue_shift_rapidness: 0.01,
            blue_shift_scale: 0.5,
            // Filmic operator coefficients
            tonemapping_curve: [0.15, 0.50, 0.10, 0.20, 0.02, 0.30],
            log_lum_threshold: -16.0,
            fog_density: 0.0,
            fog_mult: 1.0,
            fog_offset: 0.0,
            fog_color: Vec4::new(0.5, 0.6, 0.7, 1.0),
            directional_light_vec: Vec3::NEG_Y,
            skybox_blend: 0.0,
            directional_light_color: Vec3::ONE,
            forward_pass_ambient: 0.1,
            additional_sun_color: Vec3::new(1.0, 0.95, 0.9),
            additional_sun_intensity: 0.0,
            additional_sun_directions: [Vec3::ZERO; MAX_ADDITIONAL_SUNS],
            additional_suns_in_use: 0,
            voxel_lod_ranges: default_lod_ranges(),
            skybox_brightness: 1.0,
            shadow_fadeout: 250.0,
            debug_voxel_lod: 0.0,
            enable_voxel_ao: false,
            voxel_ao_min: 0.0,
            voxel_ao_max: 1.0,
            voxel_ao_offset: 0.0,
            background_orientation: Mat4::IDENTITY,
        }
    }
}

impl From<&FrameState> for FrameConstants {
    fn from(s: &FrameState) -> Self {
        let view_projection = s.projection * s.view;
        let suns_in_use = s.additional_suns_in_use.min(MAX_ADDITIONAL_SUNS as u32);

        let mut additional_sun_directions = [[0.0f32; 4]; MAX_ADDITIONAL_SUNS];
        for (slot, dir) in additional_sun_directions
            .iter_mut()
            .zip(s.additional_sun_directions)
        {
            *slot = dir.extend(0.0).to_array();
        }

        Self {
            view_projection_matrix: view_projection.to_cols_array_2d(),
            view_matrix: s.view.to_cols_array_2d(),
            projection_matrix: s.projection.to_cols_array_2d(),
            inv_view_matrix: s.view.inverse().to_cols_array_2d(),
            inv_proj_matrix: s.projection.inverse().to_cols_array_2d(),
            inv_view_proj_matrix: view_projection.inverse().to_cols_array_2d(),
            view_projection_matrix_world: s.view_projection_world.to_cols_array_2d(),
            world_offset: s.world_offset.extend(0.0).to_array(),
            resolution: s.resolution.to_array(),
            time: s.time,
            timedelta: s.timedelta,
            terrain_texture_distances: s.terrain_texture_distances.to_array(),
            terrain_material_transition: s.terrain_material_transition.to_array(),
            tiles_num: s.tiles_num,
            tiles_x: s.tiles_x,
            foliage_clipping_scaling: s.foliage_clipping_scaling.to_array(),
            wind_vec: s.wind.to_array(),
            tau: s.wind_tau,
            backlight_mult: s.backlight_mult,
            env_mult: s.env_mult,
            contrast: s.contrast,
            brightness: s.brightness,
            middle_grey: s.middle_grey,
            luminance_exposure: s.luminance_exposure,
            bloom_exposure: s.bloom_exposure,
            bloom_mult: s.bloom_mult,
            middle_grey_curve_sharpness: s.middle_grey_curve_sharpness,
            middle_grey_base: s.middle_grey_base,
            blue_shift_rapidness: s.blue_shift_rapidness,
            blue_shift_scale: s.blue_shift_scale,
            fog_density: s.fog_density,
            fog_mult: s.fog_mult,
            fog_offset: s.fog_offset,
            fog_color: pack_rgba(s.fog_color),
            directional_light_vec: s.directional_light_vec.to_array(),
            skybox_blend: s.skybox_blend,
            directional_light_color: s.directional_light_color.to_array(),
            forward_pass_ambient: s.forward_pass_ambient,
            additional_sun_color: s.additional_sun_color.to_array(),
            additional_sun_intensity: s.additional_sun_intensity,
            additional_sun_directions,
            additional_suns_in_use: suns_in_use as i32,
            _padding1: [0.0; 3],
            tonemapping_a: s.tonemapping_curve[0],
            tonemapping_b: s.tonemapping_curve[1],
            tonemapping_c: s.tonemapping_curve[2],
            tonemapping_d: s.tonemapping_curve[3],
            tonemapping_e: s.tonemapping_curve[4],
            tonemapping_f: s.tonemapping_curve[5],
            log_lum_threshold: s.log_lum_threshold,
            debug_voxel_lod: s.debug_voxel_lod,
            voxel_lod_range: pack_lod_ranges(&s.voxel_lod_ranges),
            skybox_brightness: s.skybox_brightness,
            shadow_fadeout: s.shadow_fadeout,
            _padding2: [0.0; 2],
            enable_voxel_ao: if s.enable_voxel_ao { 1.0 } else { 0.0 },
            voxel_ao_min: s.voxel_ao_min,
            voxel_ao_max: s.voxel_ao_max,
            voxel_ao_offset: s.voxel_ao_offset,
            background_orientation: s.background_orientation.to_cols_array_2d(),
        }
    }
}
