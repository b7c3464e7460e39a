//! Bat-ball contact resolution and the shot power model
//!
//! Contact quality is the product of four factors - timing, blade
//! placement, swing speed and alignment - with a hard gate that reserves
//! six-carrying launches for contacts where every factor is strong at once.

use bevy::prelude::*;
use rand::Rng;

use crate::arena::AnchorSet;
use crate::ball::{Ball, BallAge, DeliveryTag, Struck, Velocity};
use crate::bat::components::{BatPose, SwingState};
use crate::constants::HIT_ASSIST_FRAMES;
use crate::events::{EventBus, GameEvent};
use crate::helpers::{closest_point_on_segment, flatten, rotate_y};
use crate::pitch::PitchBasis;
use crate::scoring::{DeliveryFlags, MatchState, StatusLine};
use crate::tuning::{BatTuning, GameplayTweaks};

/// Quality factors and launch numbers of one resolved contact
#[derive(Debug, Clone, Copy)]
pub struct ContactScore {
    pub timing: f32,
    pub alignment: f32,
    pub sweet: f32,
    pub swing: f32,
    /// Horizontal launch speed, m/s
    pub power: f32,
    /// Vertical launch speed, m/s
    pub loft: f32,
    pub six_ready: bool,
    /// Blended direction the ball leaves along (before mishit noise)
    pub hit_dir: Vec3,
}

impl ContactScore {
    /// Score a contact from raw geometry. Pure, so the curves and the six
    /// gate can be tested directly.
    ///
    /// `dist_to_batsman` is how far the ball is from the batsman point at
    /// contact, `blade_t` the parametric contact position along the blade,
    /// `shot_line` the nominal scoring direction (unit, horizontal).
    pub fn compute(
        tuning: &BatTuning,
        dist_to_batsman: f32,
        blade_t: f32,
        bat_velocity: Vec3,
        shot_line: Vec3,
    ) -> Self {
        // narrow, harshly penalizing timing curve
        let deviation =
            ((dist_to_batsman - tuning.ideal_contact_dist).abs() / tuning.timing_window).min(1.0);
        let timing = (1.0 - deviation) * (1.0 - deviation);

        let bat_speed = bat_velocity.length();
        let swing = ((bat_speed - tuning.bat_speed_min)
            / (tuning.bat_speed_ref - tuning.bat_speed_min))
            .clamp(0.0, 1.0);

        // triangular sweet spot, peak at the blade middle
        let sweet = (1.0 - 2.0 * (blade_t - 0.5).abs()).max(0.0);

        let bat_dir = bat_velocity.normalize_or_zero();
        let hit_dir = (bat_dir * tuning.hit_dir_bat_weight
            + shot_line * (1.0 - tuning.hit_dir_bat_weight))
            .normalize_or_zero();
        let alignment = bat_dir.dot(hit_dir).clamp(0.0, 1.0);

        let quality = timing.powf(1.6) * sweet * alignment * swing;
        let mut power = tuning.power_base + tuning.power_max_extra * quality;
        let mut loft = tuning.loft_base + tuning.loft_max_extra * quality;

        // mistimed shots travel weakly no matter how hard the swing
        if timing < tuning.timing_penalty_threshold {
            power *= tuning.timing_power_penalty;
            loft *= tuning.timing_loft_penalty;
        }

        // only a near-perfect contact is allowed to carry the rope
        let six_ready = timing >= tuning.six_timing_threshold
            && alignment >= tuning.six_align_threshold
            && swing >= tuning.six_swing_threshold
            && sweet >= tuning.six_sweet_threshold;
        if !six_ready {
            power = power.min(tuning.six_power_cap);
            loft = loft.min(tuning.six_loft_cap);
        }

        Self {
            timing,
            alignment,
            sweet,
            swing,
            power,
            loft,
            six_ready,
            hit_dir,
        }
    }

    /// Launch velocity for this contact. Edges and top-edges come from
    /// direction noise proportional to how bad the timing/placement was.
    pub fn launch_velocity(&self, tuning: &BatTuning, rng: &mut impl Rng) -> Vec3 {
        let badness = (1.0 - self.timing).max(1.0 - self.sweet);
        let yaw = rng.gen_range(-1.0f32..1.0) * tuning.mishit_dir_noise * badness;
        let dir = rotate_y(flatten(self.hit_dir).normalize_or_zero(), yaw);
        let mut launch = dir * self.power;
        launch.y = self.loft * (1.0 + rng.gen_range(-0.25f32..0.25) * badness);
        launch
    }
}

/// Resolve at most one contact per swing window
pub fn resolve_contact(
    tweaks: Res<GameplayTweaks>,
    anchors: Res<AnchorSet>,
    pose: Res<BatPose>,
    mut swing: ResMut<SwingState>,
    mut match_state: ResMut<MatchState>,
    mut flags: ResMut<DeliveryFlags>,
    mut bus: ResMut<EventBus>,
    mut status: ResMut<StatusLine>,
    balls: Query<(Entity, &Transform, &BallAge, &DeliveryTag), (With<Ball>, Without<Struck>)>,
    mut commands: Commands,
) {
    if match_state.game_over || !swing.active || swing.consumed {
        return;
    }
    let Ok((entity, transform, age, tag)) = balls.single() else {
        return;
    };

    let ball_pos = transform.translation;
    let (closest, blade_t) = closest_point_on_segment(pose.blade_top, pose.blade_bottom, ball_pos);
    if (ball_pos - closest).length() > tweaks.bat.hit_radius {
        return;
    }
    swing.consumed = true;

    let pitch = PitchBasis::from_anchors(&anchors);
    let shot_line = -pitch.forward; // straight back down the ground
    let dist_to_batsman = (ball_pos - anchors.batsman).length();
    let score = ContactScore::compute(
        &tweaks.bat,
        dist_to_batsman,
        blade_t,
        pose.velocity,
        shot_line,
    );

    let mut rng = rand::thread_rng();
    let launch = score.launch_velocity(&tweaks.bat, &mut rng);

    commands
        .entity(entity)
        .insert(Struck::new(age.0, HIT_ASSIST_FRAMES, launch));
    flags.was_hit = true;
    match_state.hits += 1;

    if score.six_ready {
        status.set("Middled it!");
    } else if score.timing < tweaks.bat.timing_penalty_threshold {
        status.set("Got a piece of it...");
    } else {
        status.set("Good contact");
    }
    info!(
        "Contact: timing {:.2} sweet {:.2} align {:.2} swing {:.2} -> power {:.1} loft {:.1}",
        score.timing, score.sweet, score.alignment, score.swing, score.power, score.loft
    );
    bus.emit(GameEvent::Struck {
        id: tag.0,
        timing: score.timing,
        alignment: score.alignment,
        sweet: score.sweet,
        swing: score.swing,
        power: score.power,
        loft: score.loft,
        six_ready: score.six_ready,
    });
}

/// Pin the ball to the blade for a couple of frames, then let it fly.
/// Runs after the kinematic step so the pin wins the frame.
pub fn hit_assist(
    pose: Res<BatPose>,
    mut query: Query<(&mut Transform, &mut Velocity, &mut Struck), With<Ball>>,
) {
    let Ok((mut transform, mut velocity, mut struck)) = query.single_mut() else {
        return;
    };
    if struck.released {
        return;
    }
    if struck.assist_frames > 0 {
        struck.assist_frames -= 1;
        transform.translation = pose.sweet_spot();
        velocity.0 = Vec3::ZERO;
    } else {
        velocity.0 = struck.launch;
        struck.released = true;
        struck.min_y_since_release = transform.translation.y;
    }
}
