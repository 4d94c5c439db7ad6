use bevy::prelude::*;

/// Clear every terrain node within `radius` of `position` (world space).
#[derive(Message, Debug, Clone, Copy)]
pub struct DestroyTerrainEvent {
    pub position: Vec2,
    pub radius: f32,
}

#[derive(Message)]
pub struct RegenerateTerrainEvent;

#[derive(Message)]
pub struct GenerateNewSeedEvent;
