//! Match countdown system - 3-2-1 before the bowling starts
//!
//! Triggered at game start and after each match reset. While active, the
//! delivery scheduler is held back by a run condition.

use bevy::prelude::*;

use crate::constants::COUNTDOWN_SECONDS;
use crate::helpers::sim_dt;
use crate::scoring::StatusLine;

/// Resource tracking the countdown state
#[derive(Resource)]
pub struct MatchCountdown {
    /// Time remaining in countdown
    pub timer: f32,
    /// Whether countdown is currently active
    pub active: bool,
}

impl Default for MatchCountdown {
    fn default() -> Self {
        Self {
            timer: COUNTDOWN_SECONDS,
            active: true, // Start active for game start
        }
    }
}

impl MatchCountdown {
    /// Start a new countdown
    pub fn start(&mut self) {
        self.timer = COUNTDOWN_SECONDS;
        self.active = true;
    }

    /// Check if countdown is finished
    pub fn is_finished(&self) -> bool {
        !self.active
    }

    /// Get the current number to display (3, 2, 1, or 0 for "Play!")
    pub fn display_number(&self) -> u32 {
        if self.timer > 2.0 {
            3
        } else if self.timer > 1.0 {
            2
        } else if self.timer > 0.0 {
            1
        } else {
            0
        }
    }
}

/// System to update the countdown timer and status text
pub fn update_countdown(
    time: Res<Time>,
    mut countdown: ResMut<MatchCountdown>,
    mut status: ResMut<StatusLine>,
) {
    if !countdown.active {
        return;
    }

    countdown.timer -= sim_dt(&time);

    let display = countdown.display_number();
    if display > 0 {
        status.set(format!("Ready... {}", display));
    } else {
        status.set("Play!");
    }

    // End countdown after showing "Play!" briefly
    if countdown.timer < -0.3 {
        countdown.active = false;
    }
}

/// Run condition: game is NOT in countdown
pub fn not_in_countdown(countdown: Res<MatchCountdown>) -> bool {
    !countdown.active
}

/// Run condition: game IS in countdown
pub fn in_countdown(countdown: Res<MatchCountdown>) -> bool {
    countdown.active
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_number_sequence() {
        let mut countdown = MatchCountdown::default();
        assert_eq!(countdown.display_number(), 3);
        countdown.timer = 1.5;
        assert_eq!(countdown.display_number(), 2);
        countdown.timer = 0.5;
        assert_eq!(countdown.display_number(), 1);
        countdown.timer = -0.1;
        assert_eq!(countdown.display_number(), 0);
    }

    #[test]
    fn test_start_rearms() {
        let mut countdown = MatchCountdown {
            timer: -1.0,
            active: false,
        };
        countdown.start();
        assert!(countdown.active);
        assert_eq!(countdown.timer, COUNTDOWN_SECONDS);
    }
}
