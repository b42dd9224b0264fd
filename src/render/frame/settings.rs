//! Authored render settings: tonemapping, fog, terrain, and voxel values
//! loaded from a JSON settings file and merged into [`FrameState`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use super::constants::VOXEL_LOD_TOTAL;
use super::state::FrameState;

/// Tonemapping and exposure settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TonemapSettings {
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
    pub curve: [f32; 6],
    pub log_lum_threshold: f32,
}

impl Default for TonemapSettings {
    fn default() -> Self {
        let s = FrameState::default();
        Self {
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
            curve: s.tonemapping_curve,
            log_lum_threshold: s.log_lum_threshold,
        }
    }
}

/// Distance fog settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct FogSettings {
    pub density: f32,
    pub mult: f32,
    pub offset: f32,
    /// Linear RGBA.
    pub color: [f32; 4],
}

impl Default for FogSettings {
    fn default() -> Self {
        Self {
            density: 0.0,
            mult: 1.0,
            offset: 0.0,
            color: [0.5, 0.6, 0.7, 1.0],
        }
    }
}

/// Terrain texturing settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainSettings {
    /// Distance thresholds for terrain texture tiers.
    pub texture_distances: [f32; 4],
    /// Material blend start/width.
    pub material_transition: [f32; 2],
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            texture_distances: [40.0, 120.0, 400.0, 2000.0],
            material_transition: [5.0, 20.0],
        }
    }
}

/// Voxel LOD bands and ambient occlusion settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct VoxelSettings {
    /// (near, far) distance band per LOD tier, standard tiers first.
    /// Normalized to exactly 24 entries when applied.
    pub lod_ranges: Vec<[f32; 2]>,
    pub shadow_fadeout: f32,
    pub enable_ao: bool,
    pub ao_min: f32,
    pub ao_max: f32,
    pub ao_offset: f32,
}

impl Default for VoxelSettings {
    fn default() -> Self {
        let s = FrameState::default();
        Self {
            lod_ranges: s.voxel_lod_ranges.to_vec(),
            shadow_fadeout: s.shadow_fadeout,
            enable_ao: s.enable_voxel_ao,
            ao_min: s.voxel_ao_min,
            ao_max: s.voxel_ao_max,
            ao_offset: s.voxel_ao_offset,
        }
    }
}

/// Authored render settings, loaded once and applied to the frame state.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub tonemap: TonemapSettings,
    pub fog: FogSettings,
    pub terrain: TerrainSettings,
    pub voxel: VoxelSettings,
    pub skybox_brightness: f32,
}

impl RenderSettings {
    /// Load settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&text)?;
        if settings.voxel.ao_min > settings.voxel.ao_max {
            return Err(Error::Settings(format!(
                "voxel ao_min {} exceeds ao_max {}",
                settings.voxel.ao_min, settings.voxel.ao_max
            )));
        }
        Ok(settings)
    }

    /// Write settings to a JSON file (pretty-printed).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }

    /// Merge these settings into a frame state. Per-frame dynamics (camera,
    /// time, wind, sun directions) are untouched.
    pub fn apply_to(&self, state: &mut FrameState) {
        let t = &self.tonemap;
        state.backlight_mult = t.backlight_mult;
        state.env_mult = t.env_mult;
        state.contrast = t.contrast;
        state.brightness = t.brightness;
        state.middle_grey = t.middle_grey;
        state.luminance_exposure = t.luminance_exposure;
        state.bloom_exposure = t.bloom_exposure;
        state.bloom_mult = t.bloom_mult;
        state.middle_grey_curve_sharpness = t.middle_grey_curve_sharpness;
        state.middle_grey_base = t.middle_grey_base;
        state.blue_shift_rapidness = t.blue_shift_rapidness;
        state.blue_shift_scale = t.blue_shift_scale;
        state.tonemapping_curve = t.curve;
        state.log_lum_threshold = t.log_lum_threshold;

        state.fog_density = self.fog.density;
        state.fog_mult = self.fog.mult;
        state.fog_offset = self.fog.offset;
        state.fog_color = self.fog.color.into();

        state.terrain_texture_distances = self.terrain.texture_distances.into();
        state.terrain_material_transition = self.terrain.material_transition.into();

        state.voxel_lod_ranges = self.normalized_lod_ranges();
        state.shadow_fadeout = self.voxel.shadow_fadeout;
        state.enable_voxel_ao = self.voxel.enable_ao;
        state.voxel_ao_min = self.voxel.ao_min;
        state.voxel_ao_max = self.voxel.ao_max;
        state.voxel_ao_offset = self.voxel.ao_offset;

        state.skybox_brightness = self.skybox_brightness;
    }

    /// LOD table normalized to exactly [`VOXEL_LOD_TOTAL`] entries: extra
    /// entries are dropped, missing ones are zero (never drawn).
    fn normalized_lod_ranges(&self) -> [[f32; 2]; VOXEL_LOD_TOTAL] {
        if self.voxel.lod_ranges.len() != VOXEL_LOD_TOTAL {
            log::warn!(
                "voxel LOD table has {} entries, expected {}; normalizing",
                self.voxel.lod_ranges.len(),
                VOXEL_LOD_TOTAL
            );
        }
        let mut ranges = [[0.0f32; 2]; VOXEL_LOD_TOTAL];
        for (slot, range) in ranges.iter_mut().zip(&self.voxel.lod_ranges) {
            *slot = *range;
        }
        ranges
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            tonemap: TonemapSettings::default(),
            fog: FogSettings::default(),
            terrain: TerrainSettings::default(),
            voxel: VoxelSettings::default(),
            skybox_brightness: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let settings = RenderSettings {
            skybox_brightness: 0.75,
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        let parsed: RenderSettings = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.skybox_brightness, 0.75);
        assert_eq!(parsed.tonemap.curve, settings.tonemap.curve);
        assert_eq!(parsed.voxel.lod_ranges.len(), VOXEL_LOD_TOTAL);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let parsed: RenderSettings =
            serde_json::from_str(r#"{"fog": {"density": 0.02}}"#).unwrap();
        assert_eq!(parsed.fog.density, 0.02);
        assert_eq!(parsed.fog.mult, 1.0);
        assert_eq!(parsed.tonemap.contrast, 1.0);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("render_settings.json");

        let mut settings = RenderSettings::default();
        settings.fog.density = 0.015;
        settings.save(&path).unwrap();

        let loaded = RenderSettings::load(&path).unwrap();
        assert_eq!(loaded.fog.density, 0.015);
    }

    #[test]
    fn test_load_missing_file_errors() {
        assert!(RenderSettings::load("/nonexistent/render_settings.json").is_err());
    }

    #[test]
    fn test_load_rejects_inverted_ao_bounds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("render_settings.json");

        let mut settings = RenderSettings::default();
        settings.voxel.ao_min = 0.9;
        settings.voxel.ao_max = 0.1;
        settings.save(&path).unwrap();

        assert!(RenderSettings::load(&path).is_err());
    }

    #[test]
    fn test_apply_to_frame_state() {
        let mut settings = RenderSettings::default();
        settings.tonemap.contrast = 1.2;
        settings.fog.color = [1.0, 0.0, 0.0, 1.0];
        settings.voxel.enable_ao = true;

        let mut state = FrameState::default();
        settings.apply_to(&mut state);

        assert_eq!(state.contrast, 1.2);
        assert_eq!(state.fog_color.x, 1.0);
        assert!(state.enable_voxel_ao);
    }

    #[test]
    fn test_short_lod_table_zero_extends() {
        let mut settings = RenderSettings::default();
        settings.voxel.lod_ranges = vec![[0.0, 50.0], [45.0, 100.0]];

        let mut state = FrameState::default();
        settings.apply_to(&mut state);

        assert_eq!(state.voxel_lod_ranges[1], [45.0, 100.0]);
        assert_eq!(state.voxel_lod_ranges[2], [0.0, 0.0]);
        assert_eq!(state.voxel_lod_ranges[VOXEL_LOD_TOTAL - 1], [0.0, 0.0]);
    }

    #[test]
    fn test_long_lod_table_truncates() {
        let mut settings = RenderSettings::default();
        settings.voxel.lod_ranges = vec![[1.0, 2.0]; VOXEL_LOD_TOTAL + 10];

        let mut state = FrameState::default();
        settings.apply_to(&mut state);

        assert_eq!(state.voxel_lod_ranges.len(), VOXEL_LOD_TOTAL);
        assert_eq!(state.voxel_lod_ranges[VOXEL_LOD_TOTAL - 1], [1.0, 2.0]);
    }
}
