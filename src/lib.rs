mod core;
mod helpers;
mod loading;
mod terrain;

use crate::core::camera::CameraPlugin;
use crate::core::state::GameState;
use crate::loading::LoadingPlugin;
use crate::terrain::TerrainPlugin;
use bevy::app::App;
#[cfg(debug_assertions)]
use bevy::diagnostic::LogDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>().add_plugins((
            EguiPlugin::default(),
            CameraPlugin,
            LoadingPlugin,
            TerrainPlugin,
        ));

        #[cfg(debug_assertions)]
        {
            app.add_plugins(LogDiagnosticsPlugin::default());
        }
    }
}
