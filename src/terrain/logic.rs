use bevy::math::Vec2;
use terraingen::config::TerrainGenConfig;
use terraingen::error::ConfigError;
use terraingen::world::TerrainWorld;

/// Radius of the pocket blasted around the spawn point.
pub const SPAWN_CLEAR_RADIUS: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigTool {
    Pickaxe,
    Tnt,
}

impl DigTool {
    /// Left click digs, right click drops a charge. Left wins when both go down in one frame.
    pub fn from_clicks(left: bool, right: bool) -> Option<Self> {
        match (left, right) {
            (true, _) => Some(DigTool::Pickaxe),
            (false, true) => Some(DigTool::Tnt),
            _ => None,
        }
    }
}

pub fn build_world(config: &TerrainGenConfig) -> Result<TerrainWorld, ConfigError> {
    TerrainWorld::from_config(config)
}

/// Pick an open spot near the middle of the world and clear a pocket around it.
pub fn prepare_spawn(world: &mut TerrainWorld) -> Vec2 {
    let center = world.world_size() / 2.0;
    let search_radius = world.config().chunk_size * 2;
    let spawn = world
        .find_open_position(center, search_radius)
        .unwrap_or(center);
    world.destroy_in_radius(spawn, SPAWN_CLEAR_RADIUS);
    spawn
}

/// The debug panel is docked to the right edge of the window.
pub fn cursor_over_panel(cursor_x: f32, window_width: f32, panel_width: f32) -> bool {
    panel_width > 0.0 && cursor_x >= window_width - panel_width
}
