pub mod components;
pub mod events;
mod logic;
pub mod resources;
pub mod systems;
pub mod ui;

use crate::core::state::GameState;
use crate::terrain::components::*;
use crate::terrain::events::*;
use crate::terrain::resources::*;
use crate::terrain::systems::*;
use crate::terrain::ui::render_terrain_debug_ui;
use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

pub struct TerrainPlugin;

impl Plugin for TerrainPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<DestroyTerrainEvent>()
            .add_message::<RegenerateTerrainEvent>()
            .add_message::<GenerateNewSeedEvent>()
            .register_type::<TerrainChunk>()
            .register_type::<TntCharge>()
            .init_resource::<TerrainSettings>()
            .init_resource::<CurrentTerrain>()
            .init_resource::<ChunkEntities>()
            .init_resource::<ViewerClearTimer>()
            .init_resource::<DebugPanelWidth>()
            .add_systems(
                OnEnter(GameState::Generating),
                (setup_terrain_material, generate_terrain).chain(),
            )
            .add_systems(
                Update,
                (
                    handle_generate_new_seed,
                    regenerate_terrain_on_event,
                    dig_with_tools,
                    tick_tnt_charges,
                    clear_around_viewer,
                    apply_terrain_destruction,
                    update_active_chunks,
                    draw_collider_gizmos,
                )
                    .chain()
                    .run_if(in_state(GameState::InGame)),
            )
            .add_systems(
                EguiPrimaryContextPass,
                render_terrain_debug_ui.run_if(in_state(GameState::InGame)),
            );
    }
}
