//! Delivery scheduler - one ball live at a time
//!
//! Holds the between-deliveries timer and spawns the next ball when it
//! elapses. Spawning unconditionally disposes whatever ball is still
//! around, which is the only cancellation mechanism the game needs.

use bevy::prelude::*;

use crate::arena::AnchorSet;
use crate::ball::{Ball, BallAge, BallMaterial, DeliveryTag, FlightPhase, LiveDelivery, Velocity};
use crate::constants::DELIVERY_INTERVAL;
use crate::delivery::{DeliveryPlan, generate_delivery};
use crate::events::{EventBus, GameEvent};
use crate::helpers::sim_dt;
use crate::scoring::{DeliveryFlags, MatchState, StatusLine};
use crate::tuning::GameplayTweaks;

/// Where the scheduler is in the delivery cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerPhase {
    /// Counting down to the next ball
    Waiting,
    /// A ball is live
    InFlight,
}

/// Delivery cycle state and the generation counter that tags each ball
#[derive(Resource, Debug)]
pub struct DeliveryScheduler {
    pub phase: SchedulerPhase,
    pub timer: f32,
    pub next_id: u64,
}

impl Default for DeliveryScheduler {
    fn default() -> Self {
        Self {
            phase: SchedulerPhase::Waiting,
            timer: 1.0,
            next_id: 1,
        }
    }
}

impl DeliveryScheduler {
    /// Mark the current delivery resolved and queue the next one
    pub fn resolve(&mut self) {
        self.phase = SchedulerPhase::Waiting;
        self.timer = DELIVERY_INTERVAL;
    }

    /// Back to the initial state (match reset)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Bowl the next ball once the waiting timer elapses
pub fn schedule_delivery(
    mut scheduler: ResMut<DeliveryScheduler>,
    mut match_state: ResMut<MatchState>,
    mut flags: ResMut<DeliveryFlags>,
    mut bus: ResMut<EventBus>,
    mut status: ResMut<StatusLine>,
    tweaks: Res<GameplayTweaks>,
    anchors: Res<AnchorSet>,
    balls: Query<Entity, With<Ball>>,
    mut commands: Commands,
    time: Res<Time>,
) {
    if match_state.game_over {
        return;
    }
    if scheduler.phase == SchedulerPhase::InFlight {
        return;
    }
    scheduler.timer -= sim_dt(&time);
    if scheduler.timer > 0.0 {
        return;
    }

    // a new delivery disposes whatever ball is still around
    for entity in &balls {
        commands.entity(entity).despawn();
    }

    let id = scheduler.next_id;
    scheduler.next_id += 1;

    let mut rng = rand::thread_rng();
    let plan = generate_delivery(&mut rng, id, &anchors, &tweaks.bowling);

    info!(
        "Delivery {}: {} pitching at ({:.1}, {:.1})",
        id,
        plan.kind.label(),
        plan.bounce_point.x,
        plan.bounce_point.z
    );
    bus.emit(GameEvent::DeliveryStart {
        id,
        kind: plan.kind,
        speed: plan.launch_velocity.length(),
    });
    status.set("Here it comes...");

    flags.reset();
    match_state.balls += 1;
    spawn_ball(&mut commands, plan);
    scheduler.phase = SchedulerPhase::InFlight;
}

/// Spawn the live ball for a plan. Logic components only - visuals are
/// attached separately in windowed mode.
pub fn spawn_ball(commands: &mut Commands, plan: DeliveryPlan) -> Entity {
    commands
        .spawn((
            Ball,
            Transform::from_translation(plan.release_point),
            Velocity(plan.launch_velocity),
            BallAge(0.0),
            BallMaterial::default(),
            DeliveryTag(plan.id),
            LiveDelivery {
                plan,
                phase: FlightPhase::Airborne,
                material_lowered: false,
            },
        ))
        .id()
}
