//! Global gameplay tuning settings (decoupled from the systems that use them)
//!
//! Policy values live here in one documented structure; the delivery and bat
//! systems only consume it. Loaded from JSON so balancing passes don't need a
//! recompile.

use bevy::log::warn;
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use std::fs;

use crate::constants::*;

/// Path to global gameplay tuning config
pub const GAMEPLAY_TUNING_FILE: &str = "config/gameplay_tuning.json";

/// Bowling-side tuning: delivery selection, trajectory and bounce behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BowlingTuning {
    pub yorker_probability: f32,
    pub good_length_speed: f32,
    pub yorker_speed: f32,
    pub good_length_line_bias: f32,
    pub yorker_line_bias: f32,
    pub line_jitter_width_frac: f32,
    pub length_jitter: f32,
    pub yorker_length_jitter_mult: f32,
    pub seam_kick_max: f32,
    pub swing_accel_max: f32,
    pub flight_time_min: f32,
    pub flight_time_max: f32,
    pub bounce_speed_retention: f32,
    pub bounce_min_speed: f32,
    pub skid_min_speed: f32,
}

impl Default for BowlingTuning {
    fn default() -> Self {
        Self {
            yorker_probability: YORKER_PROBABILITY,
            good_length_speed: GOOD_LENGTH_SPEED,
            yorker_speed: YORKER_SPEED,
            good_length_line_bias: GOOD_LENGTH_LINE_BIAS,
            yorker_line_bias: YORKER_LINE_BIAS,
            line_jitter_width_frac: LINE_JITTER_WIDTH_FRAC,
            length_jitter: LENGTH_JITTER,
            yorker_length_jitter_mult: YORKER_LENGTH_JITTER_MULT,
            seam_kick_max: SEAM_KICK_MAX,
            swing_accel_max: SWING_ACCEL_MAX,
            flight_time_min: FLIGHT_TIME_MIN,
            flight_time_max: FLIGHT_TIME_MAX,
            bounce_speed_retention: BOUNCE_SPEED_RETENTION,
            bounce_min_speed: BOUNCE_MIN_SPEED,
            skid_min_speed: SKID_MIN_SPEED,
        }
    }
}

/// Batting-side tuning: swing window, contact scoring curves and the six gate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatTuning {
    pub swing_window: f32,
    pub hit_radius: f32,
    pub ideal_contact_dist: f32,
    pub timing_window: f32,
    pub timing_penalty_threshold: f32,
    pub timing_power_penalty: f32,
    pub timing_loft_penalty: f32,
    pub power_base: f32,
    pub power_max_extra: f32,
    pub loft_base: f32,
    pub loft_max_extra: f32,
    pub six_timing_threshold: f32,
    pub six_align_threshold: f32,
    pub six_swing_threshold: f32,
    pub six_sweet_threshold: f32,
    pub six_power_cap: f32,
    pub six_loft_cap: f32,
    pub bat_speed_min: f32,
    pub bat_speed_ref: f32,
    pub hit_dir_bat_weight: f32,
    pub mishit_dir_noise: f32,
}

impl Default for BatTuning {
    fn default() -> Self {
        Self {
            swing_window: SWING_WINDOW,
            hit_radius: HIT_RADIUS,
            ideal_contact_dist: IDEAL_CONTACT_DIST,
            timing_window: TIMING_WINDOW,
            timing_penalty_threshold: TIMING_PENALTY_THRESHOLD,
            timing_power_penalty: TIMING_POWER_PENALTY,
            timing_loft_penalty: TIMING_LOFT_PENALTY,
            power_base: POWER_BASE,
            power_max_extra: POWER_MAX_EXTRA,
            loft_base: LOFT_BASE,
            loft_max_extra: LOFT_MAX_EXTRA,
            six_timing_threshold: SIX_TIMING_THRESHOLD,
            six_align_threshold: SIX_ALIGN_THRESHOLD,
            six_swing_threshold: SIX_SWING_THRESHOLD,
            six_sweet_threshold: SIX_SWEET_THRESHOLD,
            six_power_cap: SIX_POWER_CAP,
            six_loft_cap: SIX_LOFT_CAP,
            bat_speed_min: BAT_SPEED_MIN,
            bat_speed_ref: BAT_SPEED_REF,
            hit_dir_bat_weight: HIT_DIR_BAT_WEIGHT,
            mishit_dir_noise: MISHIT_DIR_NOISE,
        }
    }
}

/// Runtime gameplay tuning resource
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayTweaks {
    pub bowling: BowlingTuning,
    pub bat: BatTuning,
}

impl GameplayTweaks {
    /// Load tuning from the config file, falling back to compiled defaults
    pub fn load_or_default(path: &str) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(tweaks) => tweaks,
                Err(e) => {
                    warn!("Failed to parse tuning {}: {}, using defaults", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to load tuning {}: {}, using defaults", path, e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let tweaks = GameplayTweaks::load_or_default("config/does_not_exist.json");
        assert_eq!(tweaks.bowling.yorker_probability, YORKER_PROBABILITY);
        assert_eq!(tweaks.bat.swing_window, SWING_WINDOW);
    }

    #[test]
    fn test_partial_config_keeps_defaults_for_missing_fields() {
        let tweaks: GameplayTweaks =
            serde_json::from_str(r#"{"bowling": {"yorker_probability": 0.5}}"#).unwrap();
        assert_eq!(tweaks.bowling.yorker_probability, 0.5);
        assert_eq!(tweaks.bowling.good_length_speed, GOOD_LENGTH_SPEED);
        assert_eq!(tweaks.bat.hit_radius, HIT_RADIUS);
    }
}
