pub use crate::atlas::{TileAtlas, UvRect};
pub use crate::chunk::{Chunk, ChunkCoord, NodeGrid};
pub use crate::config::{
    AtlasConfig, NoiseConfig, NoiseLayer, StreamingConfig, TerrainGenConfig, WorldConfig,
};
pub use crate::density::DensityField;
pub use crate::edges::{Edge, merge_edges};
pub use crate::error::ConfigError;
pub use crate::mesh_data::{ChunkGeometry, MeshData};
pub use crate::world::{ActivationChanges, TerrainStats, TerrainWorld};
