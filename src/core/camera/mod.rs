pub(crate) mod components;
pub(crate) mod events;
mod logic;
mod systems;

use crate::core::camera::components::*;
use crate::core::camera::events::SetCameraPositionEvent;
use crate::core::camera::systems::*;
use crate::core::state::GameState;
use bevy::prelude::*;

/// Orthographic 2D camera that doubles as the terrain viewer.
pub(crate) struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<SetCameraPositionEvent>()
            .register_type::<MainCamera>()
            .add_systems(Startup, spawn_camera)
            .add_systems(
                PostUpdate,
                (
                    handle_camera_position_events,
                    camera_control.run_if(in_state(GameState::InGame)),
                )
                    .chain(),
            );
    }
}
