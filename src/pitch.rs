//! Pitch-local coordinate frame derived from the four pitch anchors
//!
//! Every component that reasons about "on or off the pitch" goes through
//! this basis. It is cheap to derive, so it is recomputed on demand rather
//! than cached.

use bevy::prelude::*;

use crate::arena::AnchorSet;
use crate::constants::PITCH_SURFACE_Y;

/// Local frame of the pitch rectangle
///
/// `forward` runs from the bowler's end toward the batsman, `side` runs
/// left-to-right across the pitch. Both are unit vectors in the ground plane.
#[derive(Debug, Clone, Copy)]
pub struct PitchBasis {
    pub forward: Vec3,
    pub side: Vec3,
    pub length: f32,
    pub width: f32,
    pub center: Vec3,
    start: Vec3,
}

impl PitchBasis {
    /// Derive the frame from the authored pitch anchors
    pub fn from_anchors(anchors: &AnchorSet) -> Self {
        let start = anchors.pitch_start;
        let along = anchors.pitch_end - start;
        let across = anchors.pitch_right - anchors.pitch_left;
        let length = along.length();
        let width = across.length();
        let forward = (along / length).with_y(0.0).normalize();
        let side = (across / width).with_y(0.0).normalize();
        let mut center = (start + anchors.pitch_end) * 0.5;
        center.y = PITCH_SURFACE_Y;
        Self {
            forward,
            side,
            length,
            width,
            center,
            start,
        }
    }

    /// Pitch-local coordinates of a world point: u along `forward` measured
    /// from the bowler's end, v along `side` measured from the centerline
    pub fn to_local(&self, p: Vec3) -> (f32, f32) {
        let u = (p - self.start).dot(self.forward);
        let v = (p - self.center).dot(self.side);
        (u, v)
    }

    /// World point for pitch-local (u, v), on the pitch surface
    pub fn to_world(&self, u: f32, v: f32) -> Vec3 {
        let mut p = self.start + self.forward * u + self.side * v;
        p.y = PITCH_SURFACE_Y;
        p
    }

    /// Clamp a point into the pitch rectangle, `margin_len` inside either end
    /// and `margin_side` inside either side line, forced onto the surface.
    pub fn clamp_point_to_pitch(&self, p: Vec3, margin_side: f32, margin_len: f32) -> Vec3 {
        let (u, v) = self.to_local(p);
        let u = u.clamp(margin_len, self.length - margin_len);
        let half = self.width / 2.0;
        let v = v.clamp(-half + margin_side, half - margin_side);
        self.to_world(u, v)
    }
}
