//! Per-delivery procedural trajectory generation
//!
//! Picks a delivery type, walks the authored target through bias and jitter,
//! clamps it onto the pitch and solves the release velocity in closed form.
//! The only side effect is RNG consumption.

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::arena::AnchorSet;
use crate::constants::{BOUNCE_MARGIN_LEN, BOUNCE_MARGIN_SIDE, GRAVITY_Y};
use crate::pitch::PitchBasis;
use crate::solve_launch_velocity;
use crate::tuning::BowlingTuning;

/// Delivery type, selected per ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryKind {
    GoodLength,
    Yorker,
}

impl DeliveryKind {
    pub fn label(&self) -> &'static str {
        match self {
            DeliveryKind::GoodLength => "good length",
            DeliveryKind::Yorker => "yorker",
        }
    }
}

/// One ball's worth of bowling, consumed by the scheduler when it spawns
#[derive(Debug, Clone)]
pub struct DeliveryPlan {
    pub id: u64,
    pub kind: DeliveryKind,
    pub release_point: Vec3,
    pub bounce_point: Vec3,
    /// Seconds from release to the intended bounce
    pub flight_time: f32,
    pub launch_velocity: Vec3,
    /// Lateral impulse applied off the seam at the bounce
    pub seam_kick: f32,
    /// Direction and strength of air swing, -1..1
    pub swing_bias: f32,
}

/// Generate one delivery
pub fn generate_delivery(
    rng: &mut impl Rng,
    id: u64,
    anchors: &AnchorSet,
    tuning: &BowlingTuning,
) -> DeliveryPlan {
    let pitch = PitchBasis::from_anchors(anchors);

    let kind = if rng.gen_bool(tuning.yorker_probability.clamp(0.0, 1.0) as f64) {
        DeliveryKind::Yorker
    } else {
        DeliveryKind::GoodLength
    };
    let (base, line_bias, speed, length_jitter) = match kind {
        DeliveryKind::GoodLength => (
            anchors.bounce_good,
            tuning.good_length_line_bias,
            tuning.good_length_speed,
            tuning.length_jitter,
        ),
        DeliveryKind::Yorker => (
            anchors.bounce_yorker,
            tuning.yorker_line_bias,
            tuning.yorker_speed,
            tuning.length_jitter * tuning.yorker_length_jitter_mult,
        ),
    };

    // pull the line toward the off-stump corridor
    let off_pull = (anchors.off_stump - base).dot(pitch.side);
    let mut target = base + pitch.side * off_pull * line_bias;

    // bounded jitter along both pitch axes; line spread scales with width
    let line_jitter = pitch.width * tuning.line_jitter_width_frac;
    target += pitch.side * rng.gen_range(-line_jitter..line_jitter);
    target += pitch.forward * rng.gen_range(-length_jitter..length_jitter);

    let bounce_point = pitch.clamp_point_to_pitch(target, BOUNCE_MARGIN_SIDE, BOUNCE_MARGIN_LEN);

    let release_point = anchors.ball_release;
    let distance = (bounce_point - release_point).length();
    let flight_time =
        (distance / speed).clamp(tuning.flight_time_min, tuning.flight_time_max);
    let launch_velocity =
        solve_launch_velocity(release_point, bounce_point, flight_time, GRAVITY_Y);

    DeliveryPlan {
        id,
        kind,
        release_point,
        bounce_point,
        flight_time,
        launch_velocity,
        seam_kick: rng.gen_range(-tuning.seam_kick_max..tuning.seam_kick_max),
        swing_bias: rng.gen_range(-1.0..1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::ArenaLayout;
    use crate::constants::{BOUNCE_MARGIN_LEN, BOUNCE_MARGIN_SIDE};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn anchors() -> AnchorSet {
        AnchorSet::from_layout(&ArenaLayout::default_layout()).unwrap()
    }

    #[test]
    fn test_bounce_points_stay_inside_the_pitch() {
        let anchors = anchors();
        let tuning = BowlingTuning::default();
        let pitch = PitchBasis::from_anchors(&anchors);
        let mut rng = StdRng::seed_from_u64(7);
        for id in 0..200 {
            let plan = generate_delivery(&mut rng, id, &anchors, &tuning);
            let (u, v) = pitch.to_local(plan.bounce_point);
            assert!(
                u >= BOUNCE_MARGIN_LEN - 1e-3 && u <= pitch.length - BOUNCE_MARGIN_LEN + 1e-3,
                "length coordinate {} out of bounds for delivery {}",
                u,
                id
            );
            assert!(
                v.abs() <= pitch.width / 2.0 - BOUNCE_MARGIN_SIDE + 1e-3,
                "line coordinate {} out of bounds for delivery {}",
                v,
                id
            );
        }
    }

    #[test]
    fn test_flight_time_is_clamped() {
        let anchors = anchors();
        let tuning = BowlingTuning::default();
        let mut rng = StdRng::seed_from_u64(11);
        for id in 0..100 {
            let plan = generate_delivery(&mut rng, id, &anchors, &tuning);
            assert!(plan.flight_time >= tuning.flight_time_min);
            assert!(plan.flight_time <= tuning.flight_time_max);
        }
    }

    #[test]
    fn test_launch_velocity_passes_through_bounce_point() {
        let anchors = anchors();
        let tuning = BowlingTuning::default();
        let mut rng = StdRng::seed_from_u64(13);
        for id in 0..100 {
            let plan = generate_delivery(&mut rng, id, &anchors, &tuning);
            let t = plan.flight_time;
            let reached = plan.release_point
                + plan.launch_velocity * t
                + Vec3::Y * (0.5 * GRAVITY_Y * t * t);
            assert!(
                (reached - plan.bounce_point).length() < 1e-3,
                "delivery {} missed its bounce point by {}",
                id,
                (reached - plan.bounce_point).length()
            );
        }
    }

    #[test]
    fn test_both_delivery_kinds_occur() {
        let anchors = anchors();
        let tuning = BowlingTuning::default();
        let mut rng = StdRng::seed_from_u64(17);
        let mut yorkers = 0;
        let mut good = 0;
        for id in 0..200 {
            match generate_delivery(&mut rng, id, &anchors, &tuning).kind {
                DeliveryKind::Yorker => yorkers += 1,
                DeliveryKind::GoodLength => good += 1,
            }
        }
        assert!(yorkers > 0);
        assert!(good > yorkers, "good-length balls should dominate the mix");
    }

    #[test]
    fn test_yorkers_pitch_fuller_than_good_length() {
        let anchors = anchors();
        let tuning = BowlingTuning::default();
        let pitch = PitchBasis::from_anchors(&anchors);
        let mut rng = StdRng::seed_from_u64(19);
        let mut yorker_u = Vec::new();
        let mut good_u = Vec::new();
        for id in 0..300 {
            let plan = generate_delivery(&mut rng, id, &anchors, &tuning);
            let (u, _) = pitch.to_local(plan.bounce_point);
            match plan.kind {
                DeliveryKind::Yorker => yorker_u.push(u),
                DeliveryKind::GoodLength => good_u.push(u),
            }
        }
        let avg = |v: &[f32]| v.iter().sum::<f32>() / v.len() as f32;
        assert!(avg(&yorker_u) > avg(&good_u));
    }
}
