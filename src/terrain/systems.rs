use crate::core::camera::components::MainCamera;
use crate::core::camera::events::SetCameraPositionEvent;
use crate::core::state::GameState;
use crate::helpers::mesh::chunk_mesh;
use crate::loading::TextureAssets;
use crate::terrain::components::{TerrainChunk, TntCharge};
use crate::terrain::events::*;
use crate::terrain::logic::{DigTool, build_world, cursor_over_panel, prepare_spawn};
use crate::terrain::resources::*;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use std::collections::HashSet;
use terraingen::config::TerrainGenConfig;
use terraingen::world::TerrainWorld;

const TNT_COLOR: Color = Color::srgb(0.85, 0.15, 0.1);
const COLLIDER_COLOR: Color = Color::srgb(0.2, 1.0, 0.4);

pub fn setup_terrain_material(
    mut commands: Commands,
    textures: Res<TextureAssets>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    let material = materials.add(ColorMaterial {
        texture: Some(textures.terrain_atlas.clone()),
        ..default()
    });
    commands.insert_resource(TerrainMaterial(material));
}

pub fn generate_terrain(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    material: Res<TerrainMaterial>,
    settings: Res<TerrainSettings>,
    mut current_terrain: ResMut<CurrentTerrain>,
    mut chunk_entities: ResMut<ChunkEntities>,
    mut camera_events: MessageWriter<SetCameraPositionEvent>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let world = match build_world(&settings.config) {
        Ok(world) => world,
        Err(err) => {
            warn!("Terrain settings rejected ({err}), generating with defaults");
            match build_world(&TerrainGenConfig::default()) {
                Ok(world) => world,
                Err(err) => {
                    error!("Default terrain config is invalid: {err}");
                    return;
                }
            }
        }
    };

    install_world(
        world,
        &settings,
        &mut commands,
        &mut meshes,
        &material.0,
        &mut chunk_entities,
        &mut current_terrain,
        &mut camera_events,
    );
    next_state.set(GameState::InGame);
}

pub fn regenerate_terrain_on_event(
    mut commands: Commands,
    mut events: MessageReader<RegenerateTerrainEvent>,
    mut meshes: ResMut<Assets<Mesh>>,
    material: Res<TerrainMaterial>,
    settings: Res<TerrainSettings>,
    mut current_terrain: ResMut<CurrentTerrain>,
    mut chunk_entities: ResMut<ChunkEntities>,
    mut camera_events: MessageWriter<SetCameraPositionEvent>,
    charges: Query<Entity, With<TntCharge>>,
) {
    if events.read().count() == 0 {
        return;
    }

    // keep the current world if the new settings are unusable
    let world = match build_world(&settings.config) {
        Ok(world) => world,
        Err(err) => {
            warn!("Terrain not regenerated: {err}");
            return;
        }
    };

    for entity in charges.iter() {
        commands.entity(entity).despawn();
    }
    install_world(
        world,
        &settings,
        &mut commands,
        &mut meshes,
        &material.0,
        &mut chunk_entities,
        &mut current_terrain,
        &mut camera_events,
    );
}

pub fn handle_generate_new_seed(
    mut events: MessageReader<GenerateNewSeedEvent>,
    mut settings: ResMut<TerrainSettings>,
    mut regenerate_events: MessageWriter<RegenerateTerrainEvent>,
) {
    for _ in events.read() {
        let code = terraingen::tools::generate_seed_code();
        settings.seed_code = code;
        settings.config.world.seed = terraingen::tools::seed_from_code(code);
        regenerate_events.write(RegenerateTerrainEvent);
    }
}

pub fn dig_with_tools(
    mut commands: Commands,
    mouse_input: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_q: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    settings: Res<TerrainSettings>,
    panel_width: Res<DebugPanelWidth>,
    mut destroy_events: MessageWriter<DestroyTerrainEvent>,
) {
    let Some(tool) = DigTool::from_clicks(
        mouse_input.just_pressed(MouseButton::Left),
        mouse_input.just_pressed(MouseButton::Right),
    ) else {
        return;
    };
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    if cursor_over_panel(cursor.x, window.width(), panel_width.0) {
        return;
    }
    let Ok((camera, camera_transform)) = camera_q.single() else {
        return;
    };
    let Ok(target) = camera.viewport_to_world_2d(camera_transform, cursor) else {
        return;
    };

    match tool {
        DigTool::Pickaxe => {
            destroy_events.write(DestroyTerrainEvent {
                position: target,
                radius: settings.pickaxe_radius,
            });
        }
        DigTool::Tnt => {
            commands.spawn((
                Sprite::from_color(TNT_COLOR, Vec2::splat(1.2)),
                Transform::from_translation(target.extend(1.0)),
                TntCharge {
                    fuse: Timer::from_seconds(settings.tnt_fuse_secs, TimerMode::Once),
                    radius: settings.tnt_radius,
                },
            ));
        }
    }
}

pub fn tick_tnt_charges(
    mut commands: Commands,
    time: Res<Time>,
    mut charges: Query<(Entity, &mut TntCharge, &Transform)>,
    mut destroy_events: MessageWriter<DestroyTerrainEvent>,
) {
    for (entity, mut charge, transform) in charges.iter_mut() {
        if !charge.fuse.tick(time.delta()).just_finished() {
            continue;
        }
        let position = transform.translation.truncate();
        info!(
            "TNT detonated at ({:.1}, {:.1}), radius {}",
            position.x, position.y, charge.radius
        );
        destroy_events.write(DestroyTerrainEvent {
            position,
            radius: charge.radius,
        });
        commands.entity(entity).despawn();
    }
}

pub fn clear_around_viewer(
    time: Res<Time>,
    settings: Res<TerrainSettings>,
    mut timer: ResMut<ViewerClearTimer>,
    camera_q: Query<&Transform, With<MainCamera>>,
    mut destroy_events: MessageWriter<DestroyTerrainEvent>,
) {
    if !settings.clear_around_viewer || !timer.0.tick(time.delta()).just_finished() {
        return;
    }
    let Ok(camera) = camera_q.single() else {
        return;
    };
    destroy_events.write(DestroyTerrainEvent {
        position: camera.translation.truncate(),
        radius: settings.config.streaming.clear_radius,
    });
}

/// Apply every destruction request of this frame, then swap in fresh meshes for the chunks
/// that actually changed.
pub fn apply_terrain_destruction(
    mut events: MessageReader<DestroyTerrainEvent>,
    mut current_terrain: ResMut<CurrentTerrain>,
    chunk_entities: Res<ChunkEntities>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut chunk_meshes: Query<&mut Mesh2d, With<TerrainChunk>>,
) {
    let Some(world) = current_terrain.world.as_mut() else {
        events.clear();
        return;
    };

    let mut rebuilt = HashSet::new();
    for event in events.read() {
        rebuilt.extend(world.destroy_in_radius(event.position, event.radius));
    }

    for coord in rebuilt {
        let (Some(chunk), Some(&entity)) = (world.chunk(coord), chunk_entities.0.get(&coord))
        else {
            continue;
        };
        if let Ok(mut mesh) = chunk_meshes.get_mut(entity) {
            mesh.0 = meshes.add(chunk_mesh(chunk.mesh()));
        }
    }
}

pub fn update_active_chunks(
    settings: Res<TerrainSettings>,
    mut current_terrain: ResMut<CurrentTerrain>,
    chunk_entities: Res<ChunkEntities>,
    camera_q: Query<&Transform, With<MainCamera>>,
    mut visibility_q: Query<&mut Visibility, With<TerrainChunk>>,
) {
    let Some(world) = current_terrain.world.as_mut() else {
        return;
    };
    let Ok(camera) = camera_q.single() else {
        return;
    };

    let streaming = &settings.config.streaming;
    world.set_deactivate_outside(streaming.deactivate_outside);
    let changes = world.update_active_chunks(camera.translation.truncate(), streaming.view_distance);
    if changes.is_empty() {
        return;
    }

    for (coords, visibility) in [
        (&changes.activated, Visibility::Inherited),
        (&changes.deactivated, Visibility::Hidden),
    ] {
        for coord in coords {
            let Some(&entity) = chunk_entities.0.get(coord) else {
                continue;
            };
            if let Ok(mut chunk_visibility) = visibility_q.get_mut(entity) {
                *chunk_visibility = visibility;
            }
        }
    }
    debug!(
        "Chunks activated: {}, deactivated: {}",
        changes.activated.len(),
        changes.deactivated.len()
    );
}

pub fn draw_collider_gizmos(
    mut gizmos: Gizmos,
    settings: Res<TerrainSettings>,
    current_terrain: Res<CurrentTerrain>,
) {
    if !settings.show_colliders {
        return;
    }
    let Some(world) = current_terrain.world.as_ref() else {
        return;
    };
    for chunk in world.chunks().filter(|chunk| chunk.is_active()) {
        let origin = chunk.origin();
        for path in chunk.colliders() {
            gizmos.linestrip_2d(path.iter().map(|&point| point + origin), COLLIDER_COLOR);
        }
    }
}

/// Replace the rendered terrain with `world`: clear a spawn pocket, activate the chunks around
/// it, respawn one mesh entity per chunk and move the camera there.
#[allow(clippy::too_many_arguments)]
fn install_world(
    mut world: TerrainWorld,
    settings: &TerrainSettings,
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    material: &Handle<ColorMaterial>,
    chunk_entities: &mut ChunkEntities,
    current_terrain: &mut CurrentTerrain,
    camera_events: &mut MessageWriter<SetCameraPositionEvent>,
) {
    let spawn = prepare_spawn(&mut world);
    world.set_deactivate_outside(settings.config.streaming.deactivate_outside);
    world.update_active_chunks(spawn, settings.config.streaming.view_distance);

    for (_, entity) in chunk_entities.0.drain() {
        commands.entity(entity).despawn();
    }
    for chunk in world.chunks() {
        let visibility = if chunk.is_active() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        let entity = commands
            .spawn((
                Mesh2d(meshes.add(chunk_mesh(chunk.mesh()))),
                MeshMaterial2d(material.clone()),
                Transform::from_translation(chunk.origin().extend(0.0)),
                visibility,
                TerrainChunk::from(chunk.coord()),
            ))
            .id();
        chunk_entities.0.insert(chunk.coord(), entity);
    }

    camera_events.write(SetCameraPositionEvent { position: spawn });

    let stats = world.stats();
    info!(
        "Terrain ready: {} chunks, {} active, spawn at ({:.0}, {:.0})",
        stats.chunks, stats.active_chunks, spawn.x, spawn.y
    );
    current_terrain.world = Some(world);
}
