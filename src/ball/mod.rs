//! Ball module - components, kinematics and the scripted flight controller

mod components;
mod flight;
mod physics;

pub use components::*;
pub use flight::*;
pub use physics::*;
