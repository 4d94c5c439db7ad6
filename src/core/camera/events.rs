use bevy::prelude::*;

/// Centre the main camera on a world position, keeping the current zoom.
#[derive(Message)]
pub struct SetCameraPositionEvent {
    pub position: Vec2,
}
