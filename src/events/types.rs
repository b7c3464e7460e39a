//! Event type definitions for the logging system

use serde::{Deserialize, Serialize};

use crate::delivery::DeliveryKind;

/// Why a delivery ended without a wicket or boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    TimedOut,
    FellThrough,
}

/// All game events that can be logged
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GameEvent {
    // === Session Events ===
    /// Session started (generated once per game launch)
    SessionStart {
        session_id: String, // UUID v4
        timestamp: String,  // ISO 8601
    },
    /// Match started or restarted after a reset
    MatchStart,

    // === Delivery Events ===
    /// A new ball was bowled
    DeliveryStart {
        id: u64,
        kind: DeliveryKind,
        speed: f32,
    },
    /// The ball pitched and was redirected at the stumps
    Bounce { id: u64, x: f32, z: f32 },
    /// Delivery ended with no boundary and no wicket
    DeliveryEnd { id: u64, reason: EndReason },

    // === Batting Events ===
    /// Bat made contact; quality factors and the resulting launch
    Struck {
        id: u64,
        timing: f32,
        alignment: f32,
        sweet: f32,
        swing: f32,
        power: f32,
        loft: f32,
        six_ready: bool,
    },
    /// Swing window expired with a live, un-hit ball
    Miss { id: u64 },

    // === Scoring Events ===
    /// Ball crossed the rope (runs is 4 or 6)
    Boundary { id: u64, runs: u32 },
    /// Hit ball survived to delivery end - a single credited
    TerminalRun { id: u64 },
    /// Ball hit the stumps
    WicketHit { id: u64 },

    // === Match Events ===
    /// Match over; final numbers
    MatchEnd {
        runs: u32,
        balls: u32,
        hits: u32,
        misses: u32,
    },
    /// Match state zeroed for a fresh start
    MatchReset,
}

impl GameEvent {
    /// Get the event type code for compact serialization
    pub fn type_code(&self) -> &'static str {
        match self {
            GameEvent::SessionStart { .. } => "SE",
            GameEvent::MatchStart => "MS",
            GameEvent::DeliveryStart { .. } => "DS",
            GameEvent::Bounce { .. } => "B",
            GameEvent::DeliveryEnd { .. } => "DE",
            GameEvent::Struck { .. } => "H",
            GameEvent::Miss { .. } => "M",
            GameEvent::Boundary { .. } => "BD",
            GameEvent::TerminalRun { .. } => "R1",
            GameEvent::WicketHit { .. } => "W",
            GameEvent::MatchEnd { .. } => "ME",
            GameEvent::MatchReset => "MR",
        }
    }
}
