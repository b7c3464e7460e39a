//! Bat module - pose tracking, swing gestures and contact resolution

mod components;
mod contact;
mod swing;

pub use components::*;
pub use contact::*;
pub use swing::*;
