//! Ball-related components

use bevy::prelude::*;

use crate::constants::{BALL_GROUND_FRICTION, BALL_RESTITUTION};
use crate::delivery::DeliveryPlan;

/// Marker for the live ball (at most one exists at any tick)
#[derive(Component)]
pub struct Ball;

/// Linear velocity in meters per second
#[derive(Component, Default, Debug, Clone, Copy)]
pub struct Velocity(pub Vec3);

/// Seconds since the delivery was released
#[derive(Component, Default, Debug)]
pub struct BallAge(pub f32);

/// Generation counter of the delivery that owns this ball
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryTag(pub u64);

/// Phase of the scripted delivery flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlightPhase {
    #[default]
    Airborne,
    Bounced,
    Skidding,
}

/// Scripted flight state: the delivery plan plus one-shot transition flags
#[derive(Component, Debug)]
pub struct LiveDelivery {
    pub plan: DeliveryPlan,
    pub phase: FlightPhase,
    /// The post-bounce material change happens exactly once
    pub material_lowered: bool,
}

/// Ball surface response consumed by the kinematic step
#[derive(Component, Debug, Clone, Copy)]
pub struct BallMaterial {
    pub restitution: f32,
    /// Horizontal velocity retained after 1 second of ground contact
    pub ground_friction: f32,
}

impl Default for BallMaterial {
    fn default() -> Self {
        Self {
            restitution: BALL_RESTITUTION,
            ground_friction: BALL_GROUND_FRICTION,
        }
    }
}

/// Present once the bat has struck the ball
///
/// While `assist_frames` counts down the ball is pinned to the blade; on
/// release it takes `launch` as its velocity and the scripted delivery
/// controller stays out of the way for good.
#[derive(Component, Debug, Clone, Copy)]
pub struct Struck {
    /// Ball age at the moment of contact
    pub at_age: f32,
    pub assist_frames: u8,
    pub launch: Vec3,
    pub released: bool,
    /// Lowest height seen since release, for trusted ground-touch detection
    pub min_y_since_release: f32,
}

impl Struck {
    pub fn new(at_age: f32, assist_frames: u8, launch: Vec3) -> Self {
        Self {
            at_age,
            assist_frames,
            launch,
            released: false,
            min_y_since_release: f32::MAX,
        }
    }
}
