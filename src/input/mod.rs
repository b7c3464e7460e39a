//! Input module - PlayerInput resource and capture_input system

use bevy::prelude::*;

/// Buffered input state for the batsman
///
/// Edge-triggered fields accumulate until the consuming system clears them,
/// so a press is never lost to system ordering.
#[derive(Resource, Default)]
pub struct PlayerInput {
    /// Cursor position normalized to 0..1 across the window, if inside it
    pub cursor: Option<Vec2>,
    /// Press edge - accumulate until consumed by the swing system
    pub swing_pressed: bool,
    /// Is the button currently held
    pub swing_held: bool,
    /// Reset request - accumulate until consumed
    pub reset_pressed: bool,
}

/// Runs in Update to capture pointer and keyboard state
pub fn capture_input(
    windows: Query<&Window>,
    mouse: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut input: ResMut<PlayerInput>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    if let Some(position) = window.cursor_position() {
        input.cursor = Some(Vec2::new(
            position.x / window.width(),
            position.y / window.height(),
        ));
    }

    if mouse.just_pressed(MouseButton::Left) {
        input.swing_pressed = true;
    }
    input.swing_held = mouse.pressed(MouseButton::Left);

    // R restarts a finished match
    if keyboard.just_pressed(KeyCode::KeyR) {
        input.reset_pressed = true;
    }
}
