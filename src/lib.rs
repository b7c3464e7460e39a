//! Batgame - a first-person cricket batting simulator built with Bevy
//!
//! This crate provides all game components, resources, and systems organized into modules.

// Core modules
pub mod constants;
pub mod countdown;
pub mod events;
pub mod helpers;
pub mod sim;
pub mod tuning;

// Game logic modules
pub mod arena;
pub mod ball;
pub mod bat;
pub mod delivery;
pub mod input;
pub mod pitch;
pub mod scoring;
pub mod ui;

// Re-export commonly used types for convenience
pub use arena::colliders::{
    StaticCollider, Wicket, collider_meshes, setup_colliders, spawn_static_colliders,
    spawn_wicket_collider,
};
pub use arena::{
    ARENA_LAYOUT_FILE, AnchorSet, ArenaLayout, BoundaryGeometry, MeshDef, MeshTag, MissingAnchor,
};
pub use ball::{
    Ball, BallAge, BallMaterial, DeliveryTag, FlightPhase, LiveDelivery, Struck, Velocity,
    apply_velocity, ball_flight_control, ball_gravity, ball_ground_collision,
    ball_static_collisions, tick_ball_age, track_struck_ball,
};
pub use bat::{
    BatBlade, BatPose, ContactScore, SwingState, expire_swing, hit_assist, resolve_contact,
    start_swing, update_bat_pose,
};
pub use constants::*;
pub use countdown::{MatchCountdown, in_countdown, not_in_countdown, update_countdown};
pub use delivery::{
    DeliveryKind, DeliveryPlan, DeliveryScheduler, SchedulerPhase, generate_delivery,
    schedule_delivery, spawn_ball,
};
pub use events::{
    BusEvent, EndReason, EventBus, EventLogConfig, EventLogger, GameEvent, log_events,
    update_event_bus_time,
};
pub use helpers::*;
pub use input::PlayerInput;
pub use pitch::PitchBasis;
pub use scoring::{
    DeliveryFlags, MatchState, StatusLine, check_boundary, check_delivery_end, check_wicket,
    reset_match,
};
pub use sim::HeadlessAppBuilder;
pub use tuning::{BatTuning, BowlingTuning, GAMEPLAY_TUNING_FILE, GameplayTweaks};

use bevy::prelude::Vec3;

// =============================================================================
// DELIVERY TRAJECTORY (shared with the generator and its tests)
// =============================================================================

/// Closed-form launch velocity that carries a ball from `release` to
/// `target` in exactly `flight_time` seconds under constant gravity.
///
/// Horizontal components are linear; the vertical one accounts for the drop
/// under gravity: vy = (dy - 0.5*g*t^2) / t. The resulting parabola passes
/// through `target` at `flight_time` for any chosen time, which is what lets
/// delivery speed vary without per-frame steering.
pub fn solve_launch_velocity(
    release: Vec3,
    target: Vec3,
    flight_time: f32,
    gravity_y: f32,
) -> Vec3 {
    let t = flight_time.max(0.001);
    Vec3::new(
        (target.x - release.x) / t,
        (target.y - release.y - 0.5 * gravity_y * t * t) / t,
        (target.z - release.z) / t,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::GRAVITY_Y;

    /// Ideal ballistic position after `t` seconds
    fn position_at(release: Vec3, velocity: Vec3, t: f32) -> Vec3 {
        release + velocity * t + Vec3::Y * (0.5 * GRAVITY_Y * t * t)
    }

    #[test]
    fn test_solved_arc_passes_through_target() {
        let cases = [
            (Vec3::new(0.2, 2.05, 0.3), Vec3::new(0.1, 0.0, 13.2), 0.8),
            (Vec3::new(0.0, 2.0, 0.0), Vec3::new(-0.4, 0.0, 18.4), 1.0),
            (Vec3::new(1.0, 1.8, 0.5), Vec3::new(0.0, 0.0, 8.0), 0.25),
            (Vec3::new(0.0, 3.0, 0.0), Vec3::new(0.5, 0.1, 16.0), 1.35),
        ];
        for (release, target, t) in cases {
            let velocity = solve_launch_velocity(release, target, t, GRAVITY_Y);
            let reached = position_at(release, velocity, t);
            assert!(
                (reached - target).length() < 1e-4,
                "missed target by {} for t={}",
                (reached - target).length(),
                t
            );
        }
    }

    #[test]
    fn test_longer_flight_time_means_slower_ball() {
        let release = Vec3::new(0.0, 2.0, 0.0);
        let target = Vec3::new(0.0, 0.0, 14.0);
        let quick = solve_launch_velocity(release, target, 0.5, GRAVITY_Y);
        let slow = solve_launch_velocity(release, target, 1.2, GRAVITY_Y);
        assert!(quick.z > slow.z);
    }

    #[test]
    fn test_degenerate_flight_time_is_clamped() {
        let velocity = solve_launch_velocity(Vec3::ZERO, Vec3::ONE, 0.0, GRAVITY_Y);
        assert!(velocity.is_finite());
    }
}
