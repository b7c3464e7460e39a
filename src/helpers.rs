//! Utility functions for batgame

use bevy::prelude::*;

use crate::constants::MIN_FRAME_DT;

/// Frame delta clamped to the fixed step, for headless mode compatibility
pub fn sim_dt(time: &Time) -> f32 {
    time.delta_secs().max(MIN_FRAME_DT)
}

/// Closest point on segment `a`-`b` to `p`, plus the parametric position
/// t in [0,1] along the segment (0 = `a`, 1 = `b`).
pub fn closest_point_on_segment(a: Vec3, b: Vec3, p: Vec3) -> (Vec3, f32) {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return (a, 0.0);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (a + ab * t, t)
}

/// Move a value toward a target by a maximum delta
pub fn move_toward(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}

/// Project a vector onto the ground plane (zero the Y component)
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Rotate a vector around +Y by `angle` radians
pub fn rotate_y(v: Vec3, angle: f32) -> Vec3 {
    let (sin_a, cos_a) = angle.sin_cos();
    Vec3::new(v.x * cos_a + v.z * sin_a, v.y, -v.x * sin_a + v.z * cos_a)
}

/// Whole-token, case-insensitive name match.
///
/// Mesh names are split on separators and camelCase boundaries, so
/// "PitchMarker_01" matches "marker" but "Handrail" does not match "man".
/// Substring matching over raw names excluded unrelated meshes too eagerly.
pub fn name_has_token(name: &str, token: &str) -> bool {
    let token = token.to_ascii_lowercase();
    name_tokens(name).any(|t| t == token)
}

/// Iterate the lowercase tokens of a mesh name
fn name_tokens(name: &str) -> impl Iterator<Item = String> + '_ {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;
    for c in name.chars() {
        if c.is_alphanumeric() {
            // camelCase boundary starts a new token
            if c.is_uppercase() && prev_lower && !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            current.push(c.to_ascii_lowercase());
            prev_lower = c.is_lowercase();
        } else {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            prev_lower = false;
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens.into_iter()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closest_point_midpoint() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(2.0, 0.0, 0.0);
        let (point, t) = closest_point_on_segment(a, b, Vec3::new(1.0, 1.0, 0.0));
        assert!((point - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-6);
        assert!((t - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_closest_point_clamps_to_ends() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(1.0, 0.0, 0.0);
        let (point, t) = closest_point_on_segment(a, b, Vec3::new(-5.0, 0.0, 0.0));
        assert_eq!(point, a);
        assert_eq!(t, 0.0);
        let (point, t) = closest_point_on_segment(a, b, Vec3::new(9.0, 2.0, 0.0));
        assert_eq!(point, b);
        assert_eq!(t, 1.0);
    }

    #[test]
    fn test_degenerate_segment() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let (point, t) = closest_point_on_segment(a, a, Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(point, a);
        assert_eq!(t, 0.0);
    }

    #[test]
    fn test_move_toward() {
        assert_eq!(move_toward(0.0, 10.0, 3.0), 3.0);
        assert_eq!(move_toward(9.0, 10.0, 3.0), 10.0);
        assert_eq!(move_toward(10.0, 0.0, 4.0), 6.0);
    }

    #[test]
    fn test_rotate_y_quarter_turn() {
        let v = rotate_y(Vec3::new(1.0, 0.5, 0.0), std::f32::consts::FRAC_PI_2);
        assert!((v - Vec3::new(0.0, 0.5, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_name_tokens_separators() {
        assert!(name_has_token("PitchMarker_01", "marker"));
        assert!(name_has_token("bounce-point.good", "point"));
        assert!(name_has_token("Player2Mesh", "player2"));
    }

    #[test]
    fn test_name_tokens_no_substring_false_positive() {
        // "man" must not match inside an unrelated word
        assert!(!name_has_token("Handrail", "man"));
        assert!(!name_has_token("Germany_Flag", "man"));
        assert!(name_has_token("third_man_fielder", "man"));
    }
}
