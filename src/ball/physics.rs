//! Ball physics systems
//!
//! A small kinematic step: gravity, integration, and collision response
//! against the pitch surface and the static environment colliders. The
//! flight controller decides *what* velocity the ball should have; these
//! systems only advance it.

use bevy::prelude::*;

use crate::arena::colliders::StaticCollider;
use crate::ball::components::*;
use crate::constants::*;
use crate::helpers::sim_dt;

/// Advance ball age
pub fn tick_ball_age(mut query: Query<&mut BallAge, With<Ball>>, time: Res<Time>) {
    let dt = sim_dt(&time);
    for mut age in &mut query {
        age.0 += dt;
    }
}

/// Apply gravity to the ball
pub fn ball_gravity(
    mut query: Query<(&mut Velocity, Option<&Struck>), With<Ball>>,
    time: Res<Time>,
) {
    let dt = sim_dt(&time);
    for (mut velocity, struck) in &mut query {
        // pinned to the blade during the hit assist
        if struck.is_some_and(|s| !s.released) {
            continue;
        }
        velocity.0.y += GRAVITY_Y * dt;
    }
}

/// Apply velocity to all entities with a Velocity component
pub fn apply_velocity(mut query: Query<(&mut Transform, &Velocity)>, time: Res<Time>) {
    // Use minimum dt for headless mode compatibility
    let dt = sim_dt(&time);
    for (mut transform, velocity) in &mut query {
        transform.translation += velocity.0 * dt;
    }
}

/// Keep the ball above the pitch surface, with restitution and friction
/// taken from its current material
pub fn ball_ground_collision(
    mut query: Query<(&mut Transform, &mut Velocity, &BallMaterial, Option<&Struck>), With<Ball>>,
    time: Res<Time>,
) {
    let dt = sim_dt(&time);
    let floor = PITCH_SURFACE_Y + BALL_RADIUS;
    for (mut transform, mut velocity, material, struck) in &mut query {
        if struck.is_some_and(|s| !s.released) {
            continue;
        }
        if transform.translation.y > floor {
            continue;
        }
        transform.translation.y = floor;
        if velocity.0.y < 0.0 {
            let bounced = -velocity.0.y * material.restitution;
            // a bounce too weak to clear the ball's own radius becomes a roll
            velocity.0.y = if bounced * bounced > 2.0 * -GRAVITY_Y * BALL_RADIUS {
                bounced
            } else {
                0.0
            };
        }
        let keep = material.ground_friction.powf(dt);
        velocity.0.x *= keep;
        velocity.0.z *= keep;
    }
}

/// Bounce the ball off static environment colliders
pub fn ball_static_collisions(
    mut balls: Query<(&mut Transform, &mut Velocity), With<Ball>>,
    colliders: Query<&StaticCollider>,
) {
    for (mut transform, mut velocity) in &mut balls {
        for collider in &colliders {
            let center = transform.translation;
            let closest = collider.closest_point(center);
            let offset = center - closest;
            let dist = offset.length();
            if dist >= BALL_RADIUS || dist <= f32::EPSILON {
                continue;
            }
            let normal = offset / dist;
            // push out of the surface
            transform.translation = closest + normal * BALL_RADIUS;
            let into = velocity.0.dot(normal);
            if into < 0.0 {
                let tangential = velocity.0 - normal * into;
                let reflected = -into * collider.restitution;
                velocity.0 = tangential * (1.0 - collider.friction * 0.5) + normal * reflected;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weak_bounce_becomes_roll() {
        // restitution on a slow drop should zero out vertical velocity
        let material = BallMaterial {
            restitution: 0.08,
            ground_friction: 0.65,
        };
        let bounced = 0.3 * material.restitution;
        assert!(bounced * bounced < 2.0 * -GRAVITY_Y * BALL_RADIUS);
    }

    #[test]
    fn test_static_collision_reflects_normal_component() {
        let collider = StaticCollider {
            min: Vec3::new(-1.0, 0.0, 4.0),
            max: Vec3::new(1.0, 2.0, 5.0),
            friction: 0.9,
            restitution: 0.05,
        };
        // ball just inside the -Z face, moving +Z
        let center = Vec3::new(0.0, 1.0, 4.01);
        let closest = collider.closest_point(center);
        assert_eq!(closest, center);
        // the system only reacts when the closest point differs from the
        // center; a ball overlapping a face from outside does
        let outside = Vec3::new(0.0, 1.0, 3.98);
        let closest = collider.closest_point(outside);
        assert_eq!(closest, Vec3::new(0.0, 1.0, 4.0));
        let normal = (outside - closest).normalize();
        assert!((normal - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
    }
}
