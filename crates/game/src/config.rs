//! Simulation configuration. Loaded from firehawk.ron at startup.

use procgen::ForestLayoutConfig;
use renderer::BuildingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "firehawk.ron";

/// Ground plane size; the lake is derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainConfig {
    /// Extent along X.
    #[serde(default = "default_terrain_size")]
    pub width: f32,
    /// Extent along Z.
    #[serde(default = "default_terrain_size")]
    pub height: f32,
    /// Grid cells per side of the ground mesh.
    #[serde(default = "default_terrain_subdivisions")]
    pub subdivisions: u32,
}

fn default_terrain_size() -> f32 {
    400.0
}
fn default_terrain_subdivisions() -> u32 {
    40
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            width: default_terrain_size(),
            height: default_terrain_size(),
            subdivisions: default_terrain_subdivisions(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HelicopterConfig {
    #[serde(default = "default_rope_length")]
    pub rope_length: f32,
    /// Bucket bottom diameter; also the footprint used for the lake test.
    #[serde(default = "default_bucket_width")]
    pub bucket_width: f32,
    /// Radius of the bucket mouth; reach of a water drop.
    #[serde(default = "default_bucket_top_radius")]
    pub bucket_top_radius: f32,
    /// Start position. Defaults to the heliport on the building roof.
    #[serde(default)]
    pub start: Option<[f32; 3]>,
}

fn default_rope_length() -> f32 {
    10.0
}
fn default_bucket_width() -> f32 {
    3.0
}
fn default_bucket_top_radius() -> f32 {
    2.0
}

impl Default for HelicopterConfig {
    fn default() -> Self {
        Self {
            rope_length: default_rope_length(),
            bucket_width: default_bucket_width(),
            bucket_top_radius: default_bucket_top_radius(),
            start: None,
        }
    }
}

/// Persistent simulation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    #[serde(default)]
    pub terrain: TerrainConfig,
    #[serde(default)]
    pub building: BuildingConfig,
    /// Building and landing pad position (x, z).
    #[serde(default = "default_heliport")]
    pub heliport: [f32; 2],
    #[serde(default)]
    pub helicopter: HelicopterConfig,
    #[serde(default)]
    pub forest: ForestLayoutConfig,
    /// Simulated milliseconds per frame.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: f32,
    /// Frames played by a headless run.
    #[serde(default = "default_frames")]
    pub frames: u64,
}

fn default_heliport() -> [f32; 2] {
    [-120.0, 0.0]
}
fn default_tick_ms() -> f32 {
    16.0
}
fn default_frames() -> u64 {
    1500
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            terrain: TerrainConfig::default(),
            building: BuildingConfig::default(),
            heliport: default_heliport(),
            helicopter: HelicopterConfig::default(),
            forest: ForestLayoutConfig::default(),
            tick_ms: default_tick_ms(),
            frames: default_frames(),
        }
    }
}

impl SimConfig {
    /// Load config from `firehawk.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if let Ok(data) = std::fs::read_to_string(path) {
            match Self::from_ron_str(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }

    pub fn from_ron_str(data: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(data)
    }

    /// Helicopter start position, on the roof unless configured.
    pub fn helicopter_start(&self) -> [f32; 3] {
        let [x, z] = self.heliport;
        self.helicopter
            .start
            .unwrap_or([x, self.building.height, z])
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = SimConfig::from_ron_str("()").unwrap();
        assert_eq!(config, SimConfig::default());
        assert_eq!(config.terrain.width, 400.0);
        assert_eq!(config.helicopter_start(), [-120.0, 40.0, 0.0]);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = SimConfig::from_ron_str(
            "(terrain: (width: 200.0), helicopter: (rope_length: 6.0, start: Some((1.0, 2.0, 3.0))), frames: 10)",
        )
        .unwrap();
        assert_eq!(config.terrain.width, 200.0);
        assert_eq!(config.terrain.height, 400.0);
        assert_eq!(config.helicopter.rope_length, 6.0);
        assert_eq!(config.helicopter.bucket_width, 3.0);
        assert_eq!(config.helicopter_start(), [1.0, 2.0, 3.0]);
        assert_eq!(config.frames, 10);
        assert_eq!(config.forest, ForestLayoutConfig::default());
    }

    #[test]
    fn round_trips_through_ron() {
        let mut config = SimConfig::default();
        config.forest.seed = 77;
        let text = ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::default()).unwrap();
        assert_eq!(SimConfig::from_ron_str(&text).unwrap(), config);
    }

    #[test]
    fn invalid_file_falls_back() {
        let path = std::env::temp_dir().join(format!("firehawk-invalid-{}.ron", std::process::id()));
        std::fs::write(&path, "(terrain: oops").unwrap();
        assert_eq!(SimConfig::load_from(&path), SimConfig::default());
        std::fs::remove_file(&path).unwrap();

        assert_eq!(SimConfig::load_from(&path), SimConfig::default());
    }
}
