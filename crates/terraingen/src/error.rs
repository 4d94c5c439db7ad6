use thiserror::Error;

/// Everything that can go wrong while loading or validating terrain configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("chunk size must be positive")]
    ZeroChunkSize,
    #[error("world must be at least 1x1 chunks, got {width}x{height}")]
    EmptyWorld { width: u32, height: u32 },
    #[error("world of {width}x{height} chunks of size {chunk_size} does not fit the coordinate range")]
    WorldTooLarge {
        width: u32,
        height: u32,
        chunk_size: u32,
    },
    #[error("at least one noise layer is required")]
    NoNoiseLayers,
    #[error("noise layer {index}: frequency must be positive and finite, got {frequency}")]
    InvalidFrequency { index: usize, frequency: f32 },
    #[error("noise layer {index}: intensity must be within [0, 1], got {intensity}")]
    InvalidIntensity { index: usize, intensity: f32 },
    #[error("terrain threshold must be within [0, 1], got {0}")]
    InvalidThreshold(f32),
    #[error("edge thickness must be finite and non-negative, got {0}")]
    InvalidEdgeThickness(f32),
    #[error("seed must be finite, got {0}")]
    InvalidSeed(f32),
    #[error("texture atlas needs at least one tile, got {columns}x{rows}")]
    EmptyAtlas { columns: u32, rows: u32 },
    #[error("texture atlas of {columns}x{rows} tiles has too many tiles to index")]
    AtlasTooLarge { columns: u32, rows: u32 },
    #[error("clear radius must be finite and non-negative, got {0}")]
    InvalidClearRadius(f32),
    #[error("clear interval must be a positive number of seconds, got {0}")]
    InvalidClearInterval(f32),
}
