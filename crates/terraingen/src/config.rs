use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

pub const CONFIG_PATH: &str = "terraingen_config.toml";

static CONFIG: OnceLock<Mutex<TerrainGenConfig>> = OnceLock::new();

/// Get a copy of the current configuration, loading from file if not already loaded.
///
/// A missing or invalid file is not fatal here: the defaults are used and a warning is logged.
pub fn get_config() -> TerrainGenConfig {
    let config_mutex = CONFIG.get_or_init(|| {
        let config = TerrainGenConfig::load_from_file(CONFIG_PATH).unwrap_or_else(|err| {
            log::warn!("{CONFIG_PATH} not loaded ({err}), using default terrain config");
            TerrainGenConfig::default()
        });
        Mutex::new(config)
    });
    lock(config_mutex).clone()
}

/// Re-read [`CONFIG_PATH`] and replace the cached configuration.
pub fn reload_config() -> Result<(), ConfigError> {
    reload_config_from_file(CONFIG_PATH)
}

fn reload_config_from_file(path: impl AsRef<Path>) -> Result<(), ConfigError> {
    let new_config = TerrainGenConfig::load_from_file(path)?;

    let config_mutex = CONFIG.get_or_init(|| Mutex::new(new_config.clone()));
    *lock(config_mutex) = new_config;
    Ok(())
}

fn lock(config: &Mutex<TerrainGenConfig>) -> MutexGuard<'_, TerrainGenConfig> {
    config.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainGenConfig {
    pub world: WorldConfig,
    pub noise: NoiseConfig,
    pub atlas: AtlasConfig,
    pub streaming: StreamingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    pub world_width_chunks: u32,
    pub world_height_chunks: u32,
    /// Cells per chunk side. A chunk samples `chunk_size + 1` nodes per axis.
    pub chunk_size: u32,
    /// Width of the band along the world border that fades into solid rock.
    pub edge_thickness: f32,
    /// Nodes with a density strictly above this value are solid.
    pub terrain_threshold: f32,
    /// Offset added to every noise sample coordinate.
    pub seed: f32,
}

/// One octave of the density noise.
///
/// `frequency` acts as a feature scale: sample coordinates are divided by it, so larger
/// values give broader caves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseLayer {
    pub frequency: f32,
    pub intensity: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseConfig {
    pub layers: Vec<NoiseLayer>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtlasConfig {
    pub columns: u32,
    pub rows: u32,
    pub tile_index: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StreamingConfig {
    /// Chunks activated in each direction around the viewer's chunk.
    pub view_distance: u32,
    /// Deactivate chunks that leave the view window. `false` only ever grows the active set.
    pub deactivate_outside: bool,
    pub clear_radius: f32,
    pub clear_interval_secs: f32,
}

impl Default for TerrainGenConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            noise: NoiseConfig::default(),
            atlas: AtlasConfig {
                columns: 4,
                rows: 4,
                tile_index: 0,
            },
            streaming: StreamingConfig {
                view_distance: 2,
                deactivate_outside: true,
                clear_radius: 2.5,
                clear_interval_secs: 0.5,
            },
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            world_width_chunks: 12,
            world_height_chunks: 8,
            chunk_size: 16,
            edge_thickness: 6.0,
            terrain_threshold: 0.42,
            seed: 0.0,
        }
    }
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            layers: vec![
                NoiseLayer {
                    frequency: 20.0,
                    intensity: 1.0,
                },
                NoiseLayer {
                    frequency: 8.0,
                    intensity: 1.0,
                },
                NoiseLayer {
                    frequency: 3.0,
                    intensity: 0.5,
                },
            ],
        }
    }
}

impl TerrainGenConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: TerrainGenConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.world.validate()?;
        self.noise.validate()?;
        self.atlas.validate()?;
        self.streaming.validate()
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        if self.world_width_chunks == 0 || self.world_height_chunks == 0 {
            return Err(ConfigError::EmptyWorld {
                width: self.world_width_chunks,
                height: self.world_height_chunks,
            });
        }
        let fits = |chunks: u32| {
            chunks
                .checked_mul(self.chunk_size)
                .is_some_and(|units| i32::try_from(units).is_ok())
        };
        if !fits(self.world_width_chunks) || !fits(self.world_height_chunks) {
            return Err(ConfigError::WorldTooLarge {
                width: self.world_width_chunks,
                height: self.world_height_chunks,
                chunk_size: self.chunk_size,
            });
        }
        validate_threshold(self.terrain_threshold)?;
        if !self.edge_thickness.is_finite() || self.edge_thickness < 0.0 {
            return Err(ConfigError::InvalidEdgeThickness(self.edge_thickness));
        }
        if !self.seed.is_finite() {
            return Err(ConfigError::InvalidSeed(self.seed));
        }
        Ok(())
    }

    /// World width in world units (one unit per cell).
    pub fn world_width(&self) -> f32 {
        self.world_width_chunks as f32 * self.chunk_size as f32
    }

    pub fn world_height(&self) -> f32 {
        self.world_height_chunks as f32 * self.chunk_size as f32
    }
}

pub(crate) fn validate_threshold(threshold: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(ConfigError::InvalidThreshold(threshold))
    }
}

impl NoiseLayer {
    fn validate(&self, index: usize) -> Result<(), ConfigError> {
        if !self.frequency.is_finite() || self.frequency <= 0.0 {
            return Err(ConfigError::InvalidFrequency {
                index,
                frequency: self.frequency,
            });
        }
        if !(0.0..=1.0).contains(&self.intensity) {
            return Err(ConfigError::InvalidIntensity {
                index,
                intensity: self.intensity,
            });
        }
        Ok(())
    }
}

impl NoiseConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_layers(&self.layers)
    }
}

pub(crate) fn validate_layers(layers: &[NoiseLayer]) -> Result<(), ConfigError> {
    if layers.is_empty() {
        return Err(ConfigError::NoNoiseLayers);
    }
    layers
        .iter()
        .enumerate()
        .try_for_each(|(index, layer)| layer.validate(index))
}

impl AtlasConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(ConfigError::EmptyAtlas {
                columns: self.columns,
                rows: self.rows,
            });
        }
        if self.columns.checked_mul(self.rows).is_none() {
            return Err(ConfigError::AtlasTooLarge {
                columns: self.columns,
                rows: self.rows,
            });
        }
        Ok(())
    }
}

impl StreamingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.clear_radius.is_finite() || self.clear_radius < 0.0 {
            return Err(ConfigError::InvalidClearRadius(self.clear_radius));
        }
        if !self.clear_interval_secs.is_finite() || self.clear_interval_secs <= 0.0 {
            return Err(ConfigError::InvalidClearInterval(self.clear_interval_secs));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn default_config_is_valid() {
        assert!(TerrainGenConfig::default().validate().is_ok());
    }

    #[test]
    fn toml_round_trip_keeps_every_section() {
        let config = TerrainGenConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: TerrainGenConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn parses_hand_written_file() {
        let text = r#"
            [world]
            world_width_chunks = 3
            world_height_chunks = 2
            chunk_size = 8
            edge_thickness = 2.0
            terrain_threshold = 0.5
            seed = 12.5

            [[noise.layers]]
            frequency = 4.0
            intensity = 0.8

            [atlas]
            columns = 2
            rows = 1
            tile_index = 1

            [streaming]
            view_distance = 1
            deactivate_outside = false
            clear_radius = 1.5
            clear_interval_secs = 0.25
        "#;
        let config: TerrainGenConfig = toml::from_str(text).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.world.world_width(), 24.0);
        assert_eq!(config.noise.layers.len(), 1);
        assert!(!config.streaming.deactivate_outside);
    }

    #[test]
    fn save_then_load_from_disk() {
        let path = std::env::temp_dir().join(format!(
            "terraingen_config_test_{}.toml",
            std::process::id()
        ));
        let mut config = TerrainGenConfig::default();
        config.world.seed = 42.0;
        config.save_to_file(&path).unwrap();

        let loaded = TerrainGenConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = TerrainGenConfig::load_from_file("does/not/exist.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn zero_chunk_size_is_rejected() {
        let mut world = WorldConfig::default();
        world.chunk_size = 0;
        assert!(matches!(world.validate(), Err(ConfigError::ZeroChunkSize)));
    }

    #[rstest]
    #[case(0, 4)]
    #[case(4, 0)]
    fn empty_world_is_rejected(#[case] width: u32, #[case] height: u32) {
        let mut world = WorldConfig::default();
        world.world_width_chunks = width;
        world.world_height_chunks = height;
        assert!(matches!(
            world.validate(),
            Err(ConfigError::EmptyWorld { .. })
        ));
    }

    #[rstest]
    #[case(-0.01)]
    #[case(1.01)]
    #[case(f32::NAN)]
    fn threshold_outside_unit_range_is_rejected(#[case] threshold: f32) {
        let mut world = WorldConfig::default();
        world.terrain_threshold = threshold;
        assert!(matches!(
            world.validate(),
            Err(ConfigError::InvalidThreshold(_))
        ));
    }

    #[rstest]
    #[case(-1.0)]
    #[case(f32::INFINITY)]
    fn bad_edge_thickness_is_rejected(#[case] thickness: f32) {
        let mut world = WorldConfig::default();
        world.edge_thickness = thickness;
        assert!(matches!(
            world.validate(),
            Err(ConfigError::InvalidEdgeThickness(_))
        ));
    }

    #[test]
    fn no_layers_is_rejected() {
        let noise = NoiseConfig { layers: vec![] };
        assert!(matches!(noise.validate(), Err(ConfigError::NoNoiseLayers)));
    }

    #[rstest]
    #[case(0.0, 0.5)]
    #[case(-2.0, 0.5)]
    fn non_positive_frequency_is_rejected(#[case] frequency: f32, #[case] intensity: f32) {
        let noise = NoiseConfig {
            layers: vec![
                NoiseLayer {
                    frequency: 1.0,
                    intensity: 1.0,
                },
                NoiseLayer {
                    frequency,
                    intensity,
                },
            ],
        };
        assert!(matches!(
            noise.validate(),
            Err(ConfigError::InvalidFrequency { index: 1, .. })
        ));
    }

    #[test]
    fn intensity_above_one_is_rejected() {
        let noise = NoiseConfig {
            layers: vec![NoiseLayer {
                frequency: 1.0,
                intensity: 1.5,
            }],
        };
        assert!(matches!(
            noise.validate(),
            Err(ConfigError::InvalidIntensity { index: 0, .. })
        ));
    }

    #[test]
    fn empty_atlas_is_rejected() {
        let atlas = AtlasConfig {
            columns: 0,
            rows: 2,
            tile_index: 0,
        };
        assert!(matches!(atlas.validate(), Err(ConfigError::EmptyAtlas { .. })));
    }

    #[rstest]
    #[case(65536, 65536)]
    #[case(u32::MAX, 2)]
    fn atlas_with_overflowing_tile_count_is_rejected(#[case] columns: u32, #[case] rows: u32) {
        let mut config = TerrainGenConfig::default();
        config.atlas.columns = columns;
        config.atlas.rows = rows;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::AtlasTooLarge { .. })
        ));
    }

    #[rstest]
    #[case(65536, 1, 65536)]
    #[case(1, u32::MAX, 2)]
    #[case(1 << 20, 4, 2048)]
    fn world_too_large_for_coordinates_is_rejected(
        #[case] width: u32,
        #[case] height: u32,
        #[case] chunk_size: u32,
    ) {
        let mut config = TerrainGenConfig::default();
        config.world.world_width_chunks = width;
        config.world.world_height_chunks = height;
        config.world.chunk_size = chunk_size;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::WorldTooLarge { .. })
        ));
    }

    #[rstest]
    #[case(0.0)]
    #[case(-0.5)]
    #[case(f32::NAN)]
    fn clear_interval_must_be_positive(#[case] secs: f32) {
        let mut config = TerrainGenConfig::default();
        config.streaming.clear_interval_secs = secs;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidClearInterval(_))
        ));
    }
}
