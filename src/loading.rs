use crate::GameState;
use bevy::prelude::*;
use bevy_asset_loader::prelude::*;

pub struct LoadingPlugin;

impl Plugin for LoadingPlugin {
    fn build(&self, app: &mut App) {
        app.add_loading_state(
            LoadingState::new(GameState::AssetLoading)
                .continue_to_state(GameState::Generating)
                .load_collection::<TextureAssets>(),
        );
    }
}

#[derive(AssetCollection, Resource)]
pub struct TextureAssets {
    /// 4x4 grid of terrain tiles, picked by `atlas.tile_index` in the terrain config.
    #[asset(path = "textures/terrain_atlas.png")]
    pub terrain_atlas: Handle<Image>,
}
