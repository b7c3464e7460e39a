//! UI module - HUD scoreboard and status line

mod hud;

pub use hud::*;
