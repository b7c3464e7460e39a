//! Tunable constants for batgame
//!
//! All gameplay values are defined here for easy tweaking. Values that make
//! sense to balance at runtime are mirrored into `tuning::GameplayTweaks`.

use bevy::prelude::*;

// =============================================================================
// FRAME TIMING
// =============================================================================

/// Minimum frame delta - keeps headless runs advancing at a fixed step
pub const MIN_FRAME_DT: f32 = 1.0 / 60.0;

// =============================================================================
// SCENE COLORS
// =============================================================================

pub const GROUND_COLOR: Color = Color::srgb(0.22, 0.42, 0.2);
pub const PITCH_COLOR: Color = Color::srgb(0.76, 0.68, 0.5);
pub const BALL_COLOR: Color = Color::srgb(0.65, 0.12, 0.1);
pub const BAT_COLOR: Color = Color::srgb(0.82, 0.66, 0.42);
pub const STUMP_COLOR: Color = Color::srgb(0.9, 0.86, 0.72);

pub const TEXT_PRIMARY: Color = Color::srgb(0.95, 0.9, 0.8); // Bone white/cream
pub const TEXT_ACCENT: Color = Color::srgb(0.9, 0.75, 0.4); // Gold/amber

// =============================================================================
// PITCH & BALL
// =============================================================================

/// World-space height of the pitch surface
pub const PITCH_SURFACE_Y: f32 = 0.0;
pub const BALL_RADIUS: f32 = 0.036;

/// Generated bounce points stay this far inside the pitch side lines (meters)
pub const BOUNCE_MARGIN_SIDE: f32 = 0.25;
/// Generated bounce points stay this far inside the pitch ends (meters)
pub const BOUNCE_MARGIN_LEN: f32 = 0.8;

pub const GRAVITY_Y: f32 = -9.81;

/// Ball material before its first pitch bounce
pub const BALL_RESTITUTION: f32 = 0.46;
/// Horizontal velocity retained after 1 second on the ground
pub const BALL_GROUND_FRICTION: f32 = 0.82;
/// Ball material after the pitch bounce - the ball skids rather than re-bounces
pub const POST_BOUNCE_RESTITUTION: f32 = 0.08;
pub const POST_BOUNCE_FRICTION: f32 = 0.65;

/// Bounce triggers once height above the surface drops below radius * this
pub const BOUNCE_TOUCH_MULT: f32 = 1.6;

// =============================================================================
// BOWLING
// =============================================================================

pub const YORKER_PROBABILITY: f32 = 0.25;
pub const GOOD_LENGTH_SPEED: f32 = 17.0;
pub const YORKER_SPEED: f32 = 19.5;
/// Pull of the bounce point toward the off-stump line, per delivery type
pub const GOOD_LENGTH_LINE_BIAS: f32 = 0.12;
pub const YORKER_LINE_BIAS: f32 = 0.25;
/// Random line jitter as a fraction of pitch width
pub const LINE_JITTER_WIDTH_FRAC: f32 = 0.18;
/// Random length jitter in meters (yorkers get a tighter spread)
pub const LENGTH_JITTER: f32 = 1.1;
pub const YORKER_LENGTH_JITTER_MULT: f32 = 0.45;
pub const SEAM_KICK_MAX: f32 = 1.4;
pub const SWING_ACCEL_MAX: f32 = 3.2;
/// Swing force has faded to zero by this fraction of the flight time
pub const SWING_FADE_FRAC: f32 = 0.8;
pub const FLIGHT_TIME_MIN: f32 = 0.25;
pub const FLIGHT_TIME_MAX: f32 = 1.35;

/// Speed retained through the pitch bounce
pub const BOUNCE_SPEED_RETENTION: f32 = 0.65;
/// Post-bounce speed never drops below this
pub const BOUNCE_MIN_SPEED: f32 = 6.0;
/// Minimum upward velocity out of the bounce - prevents double-pitching in place
pub const BOUNCE_MIN_POP: f32 = 0.9;
/// Skidding balls are pushed back up to this speed toward the stumps
pub const SKID_MIN_SPEED: f32 = 4.5;

/// A delivery that is still alive after this many seconds is retired
pub const BALL_TIMEOUT: f32 = 8.0;
/// A ball this far below the surface has fallen out of the world
pub const FELL_THROUGH_Y: f32 = -2.0;

// =============================================================================
// BATTING
// =============================================================================

/// Seconds a swing gesture stays open after the press
pub const SWING_WINDOW: f32 = 0.16;
/// Ball-center-to-blade distance that counts as contact
pub const HIT_RADIUS: f32 = 0.22;
/// Distance from the batsman at which contact is perfectly timed (meters)
pub const IDEAL_CONTACT_DIST: f32 = 1.65;
/// Deviation from the ideal distance that drops the timing score to zero
pub const TIMING_WINDOW: f32 = 0.95;

/// Below this timing score the shot is treated as mistimed
pub const TIMING_PENALTY_THRESHOLD: f32 = 0.45;
pub const TIMING_POWER_PENALTY: f32 = 0.55;
pub const TIMING_LOFT_PENALTY: f32 = 0.50;

/// Launch speed = base + extra * quality factors (m/s)
pub const POWER_BASE: f32 = 8.0;
pub const POWER_MAX_EXTRA: f32 = 26.0;
/// Vertical launch = base + extra * quality factors (m/s)
pub const LOFT_BASE: f32 = 1.6;
pub const LOFT_MAX_EXTRA: f32 = 8.4;

// Every factor must clear its threshold for a shot to carry six range
pub const SIX_TIMING_THRESHOLD: f32 = 0.85;
pub const SIX_ALIGN_THRESHOLD: f32 = 0.80;
pub const SIX_SWING_THRESHOLD: f32 = 0.75;
pub const SIX_SWEET_THRESHOLD: f32 = 0.70;
/// Caps applied when the six gate does not open
pub const SIX_POWER_CAP: f32 = 21.0;
pub const SIX_LOFT_CAP: f32 = 4.5;

/// Bat speed normalization range for the swing-speed factor
pub const BAT_SPEED_MIN: f32 = 2.0;
pub const BAT_SPEED_REF: f32 = 14.0;
/// Weight of the bat-velocity direction in the blended hit direction
pub const HIT_DIR_BAT_WEIGHT: f32 = 0.55;
/// Max lateral/vertical direction noise on a fully mishit ball (radians)
pub const MISHIT_DIR_NOISE: f32 = 0.55;

/// Frames the ball stays pinned to the blade before release
pub const HIT_ASSIST_FRAMES: u8 = 2;
/// Seconds after a hit during which ground contact is not trusted
pub const HIT_GROUND_GRACE: f32 = 0.22;

/// Cursor-driven bat reach box around the batsman point
pub const BAT_REACH_SIDE: f32 = 1.25;
pub const BAT_REACH_HEIGHT_MIN: f32 = 0.15;
pub const BAT_REACH_HEIGHT_MAX: f32 = 1.6;
/// Blade midpoint chases the cursor target at this rate (1/s)
pub const BAT_FOLLOW_RATE: f32 = 18.0;
/// Blade segment length (meters)
pub const BAT_BLADE_LENGTH: f32 = 0.65;

// =============================================================================
// MATCH FLOW
// =============================================================================

/// Ball-center-to-stumps distance (ground plane) that counts as hitting the wicket
pub const WICKET_HIT_RADIUS: f32 = 0.28;
/// Balls above bail height pass over the stumps
pub const WICKET_HEIGHT: f32 = 0.72;
/// Wicket checks are ignored for this long after release
pub const WICKET_GRACE: f32 = 0.25;
/// Pause between a resolved delivery and the next one
pub const DELIVERY_INTERVAL: f32 = 2.5;
pub const COUNTDOWN_SECONDS: f32 = 3.0;
/// Used when the arena layout carries no boundary mesh
pub const BOUNDARY_FALLBACK_RADIUS: f32 = 55.0;

// =============================================================================
// ENVIRONMENT COLLIDERS
// =============================================================================

/// Meshes below this vertex count carry no collidable geometry
pub const MIN_COLLIDER_VERTICES: u32 = 24;
/// Meshes whose bounding diagonal exceeds pitch length * this are shells
pub const MAX_COLLIDER_DIAG_MULT: f32 = 4.0;
pub const STATIC_FRICTION: f32 = 0.9;
pub const STATIC_RESTITUTION: f32 = 0.05;
