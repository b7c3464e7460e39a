//! HUD components and systems (scoreboard and status display)
//!
//! Thin presentation over MatchState and StatusLine; everything it shows
//! comes from resources the simulation already maintains.

use bevy::prelude::*;

use crate::constants::{TEXT_ACCENT, TEXT_PRIMARY};
use crate::scoring::{MatchState, StatusLine};

/// Scoreboard text component
#[derive(Component)]
pub struct ScoreboardText;

/// Status line text component
#[derive(Component)]
pub struct StatusText;

/// Spawn the HUD text nodes (called from setup)
pub fn spawn_hud(commands: &mut Commands) {
    commands.spawn((
        Text::new("0 runs | 0 balls"),
        TextFont {
            font_size: 28.0,
            ..default()
        },
        TextColor(TEXT_PRIMARY),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(12.0),
            ..default()
        },
        ScoreboardText,
    ));
    commands.spawn((
        Text::new("Ready"),
        TextFont {
            font_size: 42.0,
            ..default()
        },
        TextColor(TEXT_ACCENT),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(48.0),
            left: Val::Px(12.0),
            ..default()
        },
        StatusText,
    ));
}

/// Update the scoreboard line
pub fn update_scoreboard(
    match_state: Res<MatchState>,
    mut text_query: Query<&mut Text, With<ScoreboardText>>,
) {
    let Ok(mut text) = text_query.single_mut() else {
        return;
    };
    text.0 = format!(
        "{} runs | {} balls | {} hit, {} missed{}",
        match_state.runs,
        match_state.balls,
        match_state.hits,
        match_state.misses,
        if match_state.game_over {
            "  -  press R to bat again"
        } else {
            ""
        }
    );
}

/// Update the status line
pub fn update_status_text(
    status: Res<StatusLine>,
    mut text_query: Query<&mut Text, With<StatusText>>,
) {
    let Ok(mut text) = text_query.single_mut() else {
        return;
    };
    if status.is_changed() {
        text.0 = status.0.clone();
    }
}
