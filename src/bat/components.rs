//! Bat components and resources

use bevy::prelude::*;

use crate::arena::AnchorSet;

/// Cursor-driven bat pose: the blade segment plus its tracked velocity
#[derive(Resource, Debug, Clone)]
pub struct BatPose {
    pub blade_top: Vec3,
    pub blade_bottom: Vec3,
    /// Velocity of the blade midpoint, meters per second
    pub velocity: Vec3,
}

impl BatPose {
    /// Rest pose straight from the authored blade anchors
    pub fn from_anchors(anchors: &AnchorSet) -> Self {
        Self {
            blade_top: anchors.bat_l,
            blade_bottom: anchors.bat_r,
            velocity: Vec3::ZERO,
        }
    }

    /// Blade midpoint - also the sweet spot the hit assist pins to
    pub fn sweet_spot(&self) -> Vec3 {
        (self.blade_top + self.blade_bottom) * 0.5
    }
}

/// One swing attempt per pointer press
#[derive(Resource, Debug, Clone, Default)]
pub struct SwingState {
    pub active: bool,
    /// Seconds left before the window closes
    pub time_left: f32,
    /// Contact has been resolved for this swing
    pub consumed: bool,
}

impl SwingState {
    pub fn begin(&mut self, window: f32) {
        self.active = true;
        self.time_left = window;
        self.consumed = false;
    }
}

/// Marker for the visible bat mesh (windowed mode only)
#[derive(Component)]
pub struct BatBlade;
