use bevy::math::Vec3;

/// World units per screen pixel when the game starts.
pub const DEFAULT_SCALE: f32 = 0.06;
pub const MIN_SCALE: f32 = 0.01;
pub const MAX_SCALE: f32 = 0.5;
/// Pan speed in screen pixels per second, so panning feels the same at every zoom level.
const PAN_SPEED: f32 = 500.0;
const SPRINT_MULTIPLIER: f32 = 3.0;
const ZOOM_FACTOR: f32 = 1.1;

pub struct CameraInput {
    pub move_up: bool,
    pub move_down: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub sprint: bool,
    /// Scroll distance in lines, positive zooms in.
    pub mouse_wheel_delta: f32,
}

pub struct CameraTransformUpdate {
    pub translation: Vec3,
    pub scale: f32,
}

/// Calculate the panned position and zoom of the 2D camera from input.
pub fn calculate_camera_transform(
    current_translation: Vec3,
    current_scale: f32,
    input: &CameraInput,
    delta_time: f32,
) -> CameraTransformUpdate {
    let mut translation = current_translation;
    let mut scale = current_scale;

    let mut speed = PAN_SPEED * current_scale;
    if input.sprint {
        speed *= SPRINT_MULTIPLIER;
    }

    let mut dir = Vec3::ZERO;
    if input.move_up {
        dir += Vec3::Y;
    }
    if input.move_down {
        dir -= Vec3::Y;
    }
    if input.move_left {
        dir -= Vec3::X;
    }
    if input.move_right {
        dir += Vec3::X;
    }
    if dir.length_squared() > 0.0 {
        translation += dir.normalize() * speed * delta_time;
    }

    if input.mouse_wheel_delta.abs() > 0.0 {
        scale = (scale * ZOOM_FACTOR.powf(-input.mouse_wheel_delta)).clamp(MIN_SCALE, MAX_SCALE);
    }

    CameraTransformUpdate { translation, scale }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn default_input() -> CameraInput {
        CameraInput {
            move_up: false,
            move_down: false,
            move_left: false,
            move_right: false,
            sprint: false,
            mouse_wheel_delta: 0.0,
        }
    }

    #[test]
    fn test_no_input_no_change() {
        let start_pos = Vec3::new(1.0, 2.0, 3.0);
        let input = default_input();

        let result = calculate_camera_transform(start_pos, 0.1, &input, 1.0);

        assert_eq!(result.translation, start_pos);
        assert_eq!(result.scale, 0.1);
    }

    // at scale 0.1 the camera pans 50 world units per second
    #[rstest]
    #[case(true, false, false, false, 0.0, 50.0)] // up
    #[case(false, true, false, false, 0.0, -50.0)] // down
    #[case(false, false, true, false, -50.0, 0.0)] // left
    #[case(false, false, false, true, 50.0, 0.0)] // right
    fn test_basic_movement(
        #[case] move_up: bool,
        #[case] move_down: bool,
        #[case] move_left: bool,
        #[case] move_right: bool,
        #[case] expected_x: f32,
        #[case] expected_y: f32,
    ) {
        let mut input = default_input();
        input.move_up = move_up;
        input.move_down = move_down;
        input.move_left = move_left;
        input.move_right = move_right;

        let result = calculate_camera_transform(Vec3::ZERO, 0.1, &input, 1.0);

        assert!(
            (result.translation.x - expected_x).abs() < 0.01,
            "x was {}, expected {}",
            result.translation.x,
            expected_x
        );
        assert!(
            (result.translation.y - expected_y).abs() < 0.01,
            "y was {}, expected {}",
            result.translation.y,
            expected_y
        );
        assert_eq!(result.translation.z, 0.0);
    }

    #[rstest]
    #[case(false, 50.0)]
    #[case(true, 150.0)]
    fn test_sprint_multiplier(#[case] sprint: bool, #[case] expected_y: f32) {
        let mut input = default_input();
        input.move_up = true;
        input.sprint = sprint;

        let result = calculate_camera_transform(Vec3::ZERO, 0.1, &input, 1.0);

        assert!((result.translation.y - expected_y).abs() < 0.01);
    }

    #[test]
    fn test_pan_speed_follows_zoom() {
        let mut input = default_input();
        input.move_right = true;

        let near = calculate_camera_transform(Vec3::ZERO, 0.05, &input, 1.0);
        let far = calculate_camera_transform(Vec3::ZERO, 0.2, &input, 1.0);

        assert!((far.translation.x - near.translation.x * 4.0).abs() < 0.01);
    }

    #[test]
    fn test_diagonal_movement_normalized() {
        let mut input = default_input();
        input.move_up = true;
        input.move_right = true;

        let result = calculate_camera_transform(Vec3::ZERO, 0.1, &input, 1.0);

        assert!((result.translation.length() - 50.0).abs() < 0.01);
    }

    #[rstest]
    #[case(1.0)]
    #[case(3.0)]
    fn test_scroll_up_zooms_in(#[case] wheel_delta: f32) {
        let mut input = default_input();
        input.mouse_wheel_delta = wheel_delta;

        let result = calculate_camera_transform(Vec3::ZERO, 0.1, &input, 1.0);

        assert!(result.scale < 0.1);
        assert_eq!(result.translation, Vec3::ZERO);
    }

    #[test]
    fn test_scroll_down_zooms_out() {
        let mut input = default_input();
        input.mouse_wheel_delta = -1.0;

        let result = calculate_camera_transform(Vec3::ZERO, 0.1, &input, 1.0);

        assert!((result.scale - 0.11).abs() < 1e-4);
    }

    #[rstest]
    #[case(100.0, MIN_SCALE)]
    #[case(-100.0, MAX_SCALE)]
    fn test_zoom_is_clamped(#[case] wheel_delta: f32, #[case] expected: f32) {
        let mut input = default_input();
        input.mouse_wheel_delta = wheel_delta;

        let result = calculate_camera_transform(Vec3::ZERO, 0.1, &input, 1.0);

        assert_eq!(result.scale, expected);
    }

    #[rstest]
    #[case(0.5, 25.0)]
    #[case(1.0, 50.0)]
    #[case(2.0, 100.0)]
    fn test_delta_time_affects_movement(#[case] delta_time: f32, #[case] expected_y: f32) {
        let mut input = default_input();
        input.move_up = true;

        let result = calculate_camera_transform(Vec3::ZERO, 0.1, &input, delta_time);

        assert!((result.translation.y - expected_y).abs() < 0.01);
    }
}
