use crate::core::camera::components::MainCamera;
use crate::core::camera::events::SetCameraPositionEvent;
use crate::core::camera::logic::{CameraInput, DEFAULT_SCALE, calculate_camera_transform};
use bevy::input::ButtonInput;
use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::log::info;
use bevy::prelude::*;

/// Pixel scroll deltas per line of a notched wheel.
const PIXELS_PER_LINE: f32 = 40.0;

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scale: DEFAULT_SCALE,
            ..OrthographicProjection::default_2d()
        }),
        Transform::from_xyz(0.0, 0.0, 0.0),
        MainCamera,
    ));

    info!("Camera spawned");
}

pub fn camera_control(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut mouse_wheel: MessageReader<MouseWheel>,
    time: Res<Time>,
    mut camera_q: Query<(&mut Transform, &mut Projection), With<MainCamera>>,
) {
    let Ok((mut transform, mut projection)) = camera_q.single_mut() else {
        return;
    };
    let Projection::Orthographic(ortho) = projection.as_mut() else {
        return;
    };

    let mouse_wheel_delta = mouse_wheel
        .read()
        .map(|ev| match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y / PIXELS_PER_LINE,
        })
        .sum::<f32>();

    let input = CameraInput {
        move_up: keyboard_input.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]),
        move_down: keyboard_input.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]),
        move_left: keyboard_input.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]),
        move_right: keyboard_input.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]),
        sprint: keyboard_input.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]),
        mouse_wheel_delta,
    };

    let update = calculate_camera_transform(
        transform.translation,
        ortho.scale,
        &input,
        time.delta_secs(),
    );
    transform.translation = update.translation;
    ortho.scale = update.scale;
}

pub fn handle_camera_position_events(
    mut events: MessageReader<SetCameraPositionEvent>,
    mut camera_q: Query<&mut Transform, With<MainCamera>>,
) {
    let Some(event) = events.read().last() else {
        return;
    };
    if let Ok(mut transform) = camera_q.single_mut() {
        transform.translation = event.position.extend(transform.translation.z);
    }
}
