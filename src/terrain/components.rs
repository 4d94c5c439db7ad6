use bevy::prelude::*;
use terraingen::chunk::ChunkCoord;

/// Render entity of one terrain chunk, positioned at the chunk origin.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component)]
pub struct TerrainChunk {
    pub x: i32,
    pub y: i32,
}

impl From<ChunkCoord> for TerrainChunk {
    fn from(coord: ChunkCoord) -> Self {
        Self {
            x: coord.x,
            y: coord.y,
        }
    }
}

/// A lit charge that blows a hole of `radius` once its fuse runs out.
#[derive(Component, Reflect)]
#[reflect(Component)]
pub struct TntCharge {
    pub fuse: Timer,
    pub radius: f32,
}
