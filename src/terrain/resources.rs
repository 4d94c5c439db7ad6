use bevy::prelude::*;
use std::collections::HashMap;
use terraingen::chunk::ChunkCoord;
use terraingen::config::TerrainGenConfig;
use terraingen::world::TerrainWorld;

#[derive(Resource, Clone)]
pub struct TerrainSettings {
    /// Applied on the next regeneration.
    pub config: TerrainGenConfig,
    pub seed_code: u32,
    pub pickaxe_radius: f32,
    pub tnt_radius: f32,
    pub tnt_fuse_secs: f32,
    pub clear_around_viewer: bool,
    pub show_colliders: bool,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            config: terraingen::get_config(),
            seed_code: 0,
            pickaxe_radius: 1.5,
            tnt_radius: 6.0,
            tnt_fuse_secs: 1.5,
            clear_around_viewer: false,
            show_colliders: false,
        }
    }
}

#[derive(Resource, Default)]
pub struct CurrentTerrain {
    pub world: Option<TerrainWorld>,
}

#[derive(Resource, Default)]
pub struct ChunkEntities(pub HashMap<ChunkCoord, Entity>);

#[derive(Resource)]
pub struct TerrainMaterial(pub Handle<ColorMaterial>);

#[derive(Resource)]
pub struct ViewerClearTimer(pub Timer);

impl Default for ViewerClearTimer {
    fn default() -> Self {
        let secs = terraingen::get_config().streaming.clear_interval_secs;
        Self(Timer::from_seconds(secs, TimerMode::Repeating))
    }
}

/// Width in logical pixels of the debug side panel, updated every frame it is drawn.
#[derive(Resource, Default)]
pub struct DebugPanelWidth(pub f32);
