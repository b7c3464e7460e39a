//! Headless app builder
//!
//! Builds a Bevy app with the full simulation system chain and no window,
//! used by integration tests to drive whole deliveries frame by frame.
//! Callers poke resources (BatPose, PlayerInput, SwingState) directly in
//! place of real input devices.

use bevy::prelude::*;

use crate::arena::colliders::setup_colliders;
use crate::arena::{AnchorSet, ArenaLayout, BoundaryGeometry};
use crate::ball::{
    apply_velocity, ball_flight_control, ball_gravity, ball_ground_collision,
    ball_static_collisions, tick_ball_age, track_struck_ball,
};
use crate::bat::{BatPose, SwingState, expire_swing, hit_assist, resolve_contact, start_swing};
use crate::countdown::{self, MatchCountdown};
use crate::delivery::{DeliveryScheduler, schedule_delivery};
use crate::events::{EventBus, update_event_bus_time};
use crate::input::PlayerInput;
use crate::scoring::{
    DeliveryFlags, MatchState, StatusLine, check_boundary, check_delivery_end, check_wicket,
    reset_match,
};
use crate::tuning::GameplayTweaks;

/// Builder for creating headless apps
pub struct HeadlessAppBuilder {
    layout: ArenaLayout,
    tweaks: GameplayTweaks,
    with_countdown: bool,
}

impl Default for HeadlessAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessAppBuilder {
    /// Create a new builder over the built-in arena
    pub fn new() -> Self {
        Self {
            layout: ArenaLayout::default_layout(),
            tweaks: GameplayTweaks::default(),
            with_countdown: false,
        }
    }

    /// Use a custom arena layout
    pub fn with_layout(mut self, layout: ArenaLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Use custom gameplay tuning
    pub fn with_tweaks(mut self, tweaks: GameplayTweaks) -> Self {
        self.tweaks = tweaks;
        self
    }

    /// Start with the pre-match countdown active (default: skipped)
    pub fn with_countdown(mut self) -> Self {
        self.with_countdown = true;
        self
    }

    /// Build the app with minimal plugins, all gameplay resources and the
    /// full chained simulation schedule.
    ///
    /// Ordering matters: contact resolution runs before the flight
    /// controller, so a hit suppresses scripted velocity writes within the
    /// same frame.
    pub fn build(self) -> App {
        let anchors = AnchorSet::from_layout(&self.layout)
            .expect("built-in or provided layout must carry every required anchor");
        let boundary = BoundaryGeometry::from_layout(&self.layout);
        let bat_pose = BatPose::from_anchors(&anchors);

        let mut app = App::new();
        app.add_plugins(MinimalPlugins);

        app.insert_resource(self.layout)
            .insert_resource(anchors)
            .insert_resource(boundary)
            .insert_resource(self.tweaks)
            .insert_resource(bat_pose)
            .insert_resource(if self.with_countdown {
                MatchCountdown::default()
            } else {
                MatchCountdown {
                    timer: 0.0,
                    active: false,
                }
            })
            .init_resource::<MatchState>()
            .init_resource::<DeliveryFlags>()
            .init_resource::<DeliveryScheduler>()
            .init_resource::<SwingState>()
            .init_resource::<PlayerInput>()
            .init_resource::<StatusLine>()
            .insert_resource(EventBus::new());

        app.add_systems(Startup, setup_colliders);
        app.add_systems(
            Update,
            (
                (update_event_bus_time, countdown::update_countdown).chain(),
                schedule_delivery.run_if(countdown::not_in_countdown),
                tick_ball_age,
                // bat before ball: a contact this frame preempts the
                // scripted flight writes this same frame
                (start_swing, resolve_contact, expire_swing).chain(),
                (
                    ball_flight_control,
                    ball_gravity,
                    apply_velocity,
                    ball_ground_collision,
                    ball_static_collisions,
                    hit_assist,
                    track_struck_ball,
                )
                    .chain(),
                (check_wicket, check_boundary, check_delivery_end).chain(),
                reset_match,
            )
                .chain(),
        );

        app
    }
}
