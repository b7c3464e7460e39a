//! Bat pose tracking and the swing gesture window
//!
//! The cursor steers the blade inside a reach box around the batsman; a
//! press opens a short timed window during which contact may resolve. A
//! window that closes with a live, un-hit ball on the pitch is a miss.

use bevy::prelude::*;

use crate::arena::AnchorSet;
use crate::ball::{Ball, DeliveryTag};
use crate::bat::components::{BatPose, SwingState};
use crate::constants::*;
use crate::events::{EventBus, GameEvent};
use crate::helpers::sim_dt;
use crate::input::PlayerInput;
use crate::pitch::PitchBasis;
use crate::scoring::{DeliveryFlags, MatchState, StatusLine};
use crate::tuning::GameplayTweaks;

/// Chase the cursor with the blade and track its velocity
pub fn update_bat_pose(
    input: Res<PlayerInput>,
    anchors: Res<AnchorSet>,
    mut pose: ResMut<BatPose>,
    time: Res<Time>,
) {
    let dt = sim_dt(&time);
    let Some(cursor) = input.cursor else {
        return;
    };
    let pitch = PitchBasis::from_anchors(&anchors);

    // cursor (0..1 left-to-right, 0..1 top-to-bottom) into the reach box
    let side = (cursor.x * 2.0 - 1.0) * BAT_REACH_SIDE;
    let height =
        BAT_REACH_HEIGHT_MIN + (1.0 - cursor.y) * (BAT_REACH_HEIGHT_MAX - BAT_REACH_HEIGHT_MIN);
    let target_mid = anchors.batsman + pitch.side * side + Vec3::Y * height;

    let prev_mid = pose.sweet_spot();
    let alpha = (BAT_FOLLOW_RATE * dt).min(1.0);
    let new_mid = prev_mid.lerp(target_mid, alpha);

    // blade hangs vertically from the grip, half its length each way
    let half = Vec3::Y * (BAT_BLADE_LENGTH / 2.0);
    pose.blade_top = new_mid + half;
    pose.blade_bottom = new_mid - half;
    pose.velocity = (new_mid - prev_mid) / dt;
}

/// A press opens the swing window (one gesture per press)
pub fn start_swing(
    mut input: ResMut<PlayerInput>,
    mut swing: ResMut<SwingState>,
    tweaks: Res<GameplayTweaks>,
    match_state: Res<MatchState>,
) {
    if !input.swing_pressed {
        return;
    }
    // consume the press edge
    input.swing_pressed = false;
    if match_state.game_over || swing.active {
        return;
    }
    swing.begin(tweaks.bat.swing_window);
}

/// Close the window; an unconsumed swing over a live ball is a miss
pub fn expire_swing(
    mut swing: ResMut<SwingState>,
    mut match_state: ResMut<MatchState>,
    flags: Res<DeliveryFlags>,
    mut bus: ResMut<EventBus>,
    mut status: ResMut<StatusLine>,
    balls: Query<&DeliveryTag, With<Ball>>,
    time: Res<Time>,
) {
    if !swing.active {
        return;
    }
    swing.time_left -= sim_dt(&time);
    if swing.time_left > 0.0 {
        return;
    }
    swing.active = false;
    if swing.consumed {
        return;
    }
    // swung at a live ball and never touched it
    if let Ok(tag) = balls.single() {
        if !flags.was_hit && !match_state.game_over {
            match_state.misses += 1;
            status.set("Swung and missed");
            bus.emit(GameEvent::Miss { id: tag.0 });
        }
    }
}
