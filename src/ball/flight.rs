//! Ball flight and bounce controller
//!
//! One scripted state machine per delivery: swings the ball through the air,
//! redirects it at the stumps off the bounce, then keeps the skid honest.
//! The moment the bat takes over (the `Struck` component appears) every
//! scripted override here stops for the rest of the delivery.

use bevy::prelude::*;

use crate::arena::AnchorSet;
use crate::ball::components::*;
use crate::constants::*;
use crate::events::{EventBus, GameEvent};
use crate::helpers::{flatten, sim_dt};
use crate::pitch::PitchBasis;
use crate::scoring::{DeliveryFlags, MatchState};
use crate::tuning::GameplayTweaks;

/// Drive the scripted delivery: air swing, bounce redirect, skid floor
pub fn ball_flight_control(
    tweaks: Res<GameplayTweaks>,
    anchors: Res<AnchorSet>,
    match_state: Res<MatchState>,
    mut bus: ResMut<EventBus>,
    mut query: Query<
        (
            &Transform,
            &mut Velocity,
            &mut LiveDelivery,
            &mut BallMaterial,
            &BallAge,
            &DeliveryTag,
        ),
        (With<Ball>, Without<Struck>),
    >,
    time: Res<Time>,
) {
    if match_state.game_over {
        return;
    }
    let Ok((transform, mut velocity, mut live, mut material, age, tag)) = query.single_mut()
    else {
        return;
    };
    let dt = sim_dt(&time);
    let pitch = PitchBasis::from_anchors(&anchors);
    let bowling = &tweaks.bowling;

    match live.phase {
        FlightPhase::Airborne => {
            // air swing, faded out before the nominal bounce
            let fade_end = live.plan.flight_time * SWING_FADE_FRAC;
            if age.0 < fade_end {
                let fade = 1.0 - age.0 / fade_end;
                velocity.0 +=
                    pitch.side * live.plan.swing_bias * bowling.swing_accel_max * fade * dt;
            }

            let touch = PITCH_SURFACE_Y + BALL_RADIUS * BOUNCE_TOUCH_MULT;
            // look one step ahead, with a two-frame tolerance on the nominal
            // bounce time, so the kinematic reflect can't fire first
            let next_y = transform.translation.y + velocity.0.y * dt;
            if age.0 >= live.plan.flight_time - 2.0 * dt
                && next_y.min(transform.translation.y) <= touch
            {
                // off the pitch: send it at the stumps with some life left
                let speed =
                    (velocity.0.length() * bowling.bounce_speed_retention).max(bowling.bounce_min_speed);
                let pop = (-velocity.0.y * material.restitution).max(BOUNCE_MIN_POP);
                let dir =
                    flatten(anchors.wicket_target - transform.translation).normalize_or_zero();
                velocity.0 = dir * speed;
                velocity.0.y = pop;
                // seam kick after the redirect so the deviation survives it
                velocity.0 += pitch.side * live.plan.seam_kick;

                if !live.material_lowered {
                    material.restitution = POST_BOUNCE_RESTITUTION;
                    material.ground_friction = POST_BOUNCE_FRICTION;
                    live.material_lowered = true;
                }
                live.phase = FlightPhase::Bounced;
                bus.emit(GameEvent::Bounce {
                    id: tag.0,
                    x: transform.translation.x,
                    z: transform.translation.z,
                });
            }
        }
        FlightPhase::Bounced => {
            // settled back onto the surface: skid from here on
            let on_ground = transform.translation.y <= PITCH_SURFACE_Y + BALL_RADIUS + 0.005;
            if on_ground && velocity.0.y.abs() < 0.25 {
                velocity.0.y = 0.0;
                live.phase = FlightPhase::Skidding;
            }
        }
        FlightPhase::Skidding => {
            velocity.0.y = 0.0;
            let horizontal = flatten(velocity.0);
            if horizontal.length() < bowling.skid_min_speed {
                // don't let the ball die on the pitch short of the stumps
                let dir =
                    flatten(anchors.wicket_target - transform.translation).normalize_or_zero();
                velocity.0 = dir * bowling.skid_min_speed;
            }
        }
    }
}

/// Track ground contact on a struck ball
///
/// The hit assist briefly parks the ball at the blade, so contact with the
/// ground is only trusted after a grace period, via the lowest height seen
/// since release.
pub fn track_struck_ball(
    mut flags: ResMut<DeliveryFlags>,
    mut query: Query<(&Transform, &mut Struck, &BallAge), With<Ball>>,
) {
    let Ok((transform, mut struck, age)) = query.single_mut() else {
        return;
    };
    if !struck.released || age.0 - struck.at_age < HIT_GROUND_GRACE {
        return;
    }
    struck.min_y_since_release = struck.min_y_since_release.min(transform.translation.y);
    if struck.min_y_since_release <= PITCH_SURFACE_Y + BALL_RADIUS * 1.2 {
        flags.touched_ground_since_hit = true;
    }
}
