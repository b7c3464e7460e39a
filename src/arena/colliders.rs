//! Environment collider builder
//!
//! Filters the arena's mesh descriptors down to the set that should block
//! the ball, and spawns them as static axis-aligned colliders. Authored
//! tags win outright; the name/size heuristics only judge untagged meshes.

use bevy::prelude::*;

use super::{AnchorSet, ArenaLayout, MeshDef, MeshTag};
use crate::constants::*;
use crate::helpers::name_has_token;

/// Static axis-aligned collider the ball bounces off
#[derive(Component, Debug, Clone, Copy)]
pub struct StaticCollider {
    pub min: Vec3,
    pub max: Vec3,
    pub friction: f32,
    pub restitution: f32,
}

impl StaticCollider {
    /// Closest point inside the box to `p`
    pub fn closest_point(&self, p: Vec3) -> Vec3 {
        p.clamp(self.min, self.max)
    }
}

/// Marker for the stump collider, checked for ball proximity
#[derive(Component)]
pub struct Wicket;

/// Names that mark authored helper geometry rather than solid scenery
const MARKER_TOKENS: &[&str] = &["marker", "anchor", "point", "target", "helper", "gizmo"];

/// Names that mark characters, which are animated and never static scenery
const CHARACTER_TOKENS: &[&str] = &[
    "player", "batsman", "bowler", "keeper", "fielder", "umpire", "man", "character",
];

/// Decide which meshes become static colliders
pub fn collider_meshes<'a>(layout: &'a ArenaLayout, pitch_length: f32) -> Vec<&'a MeshDef> {
    layout
        .meshes
        .iter()
        .filter(|mesh| mesh_is_collidable(mesh, layout, pitch_length))
        .collect()
}

fn mesh_is_collidable(mesh: &MeshDef, layout: &ArenaLayout, pitch_length: f32) -> bool {
    if !mesh.enabled {
        return false;
    }
    // authored intent overrides every heuristic
    match mesh.tag {
        Some(MeshTag::Collider) => return true,
        Some(MeshTag::Ignore) => return false,
        None => {}
    }
    // meshes that share a name with an anchor are authored markers
    if layout.anchors.iter().any(|a| a.name == mesh.name) {
        return false;
    }
    if MARKER_TOKENS.iter().any(|t| name_has_token(&mesh.name, t)) {
        return false;
    }
    if CHARACTER_TOKENS.iter().any(|t| name_has_token(&mesh.name, t)) {
        return false;
    }
    if mesh.vertex_count < MIN_COLLIDER_VERTICES {
        return false;
    }
    // oversized boxes are invisible bounding shells around the whole scene
    if mesh.diagonal() > pitch_length * MAX_COLLIDER_DIAG_MULT {
        return false;
    }
    true
}

/// Spawn static colliders for the surviving meshes; returns how many
pub fn spawn_static_colliders(
    commands: &mut Commands,
    layout: &ArenaLayout,
    pitch_length: f32,
) -> usize {
    let meshes = collider_meshes(layout, pitch_length);
    for mesh in &meshes {
        commands.spawn((
            Name::new(mesh.name.clone()),
            StaticCollider {
                min: mesh.min_v(),
                max: mesh.max_v(),
                friction: STATIC_FRICTION,
                restitution: STATIC_RESTITUTION,
            },
        ));
    }
    info!("Built {} static colliders from arena meshes", meshes.len());
    meshes.len()
}

/// Startup system: build the environment and stump colliders
pub fn setup_colliders(
    mut commands: Commands,
    layout: Res<ArenaLayout>,
    anchors: Res<AnchorSet>,
) {
    let pitch = crate::pitch::PitchBasis::from_anchors(&anchors);
    spawn_static_colliders(&mut commands, &layout, pitch.length);
    spawn_wicket_collider(&mut commands, &anchors);
}

/// Spawn the stump block at the wicket target
pub fn spawn_wicket_collider(commands: &mut Commands, anchors: &AnchorSet) {
    let center = anchors.wicket_target;
    let half = Vec3::new(0.12, 0.36, 0.03);
    commands.spawn((
        Name::new("Stumps"),
        Wicket,
        StaticCollider {
            min: center - half,
            max: center + half,
            friction: STATIC_FRICTION,
            restitution: STATIC_RESTITUTION,
        },
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(layout: &ArenaLayout) -> Vec<String> {
        collider_meshes(layout, 20.12)
            .iter()
            .map(|m| m.name.clone())
            .collect()
    }

    #[test]
    fn test_default_layout_filter() {
        let layout = ArenaLayout::default_layout();
        let kept = names(&layout);
        // solid scenery survives
        assert!(kept.contains(&"SightScreen_North".to_string()));
        assert!(kept.contains(&"Pavilion".to_string()));
        assert!(kept.contains(&"AdBoard_01".to_string()));
        // rope is tagged ignore, marker is helper geometry, batsman is a
        // character, shell is oversized
        assert!(!kept.contains(&"BoundaryRope".to_string()));
        assert!(!kept.contains(&"PitchMarker_Good".to_string()));
        assert!(!kept.contains(&"PlayerBatsman".to_string()));
        assert!(!kept.contains(&"StadiumShell".to_string()));
    }

    #[test]
    fn test_disabled_mesh_excluded_even_when_tagged() {
        let mut layout = ArenaLayout::default_layout();
        layout.meshes.push(MeshDef {
            name: "Bench".into(),
            vertex_count: 500,
            index_count: 900,
            min: [5.0, 0.0, 5.0],
            max: [6.0, 1.0, 7.0],
            enabled: false,
            tag: Some(MeshTag::Collider),
        });
        assert!(!names(&layout).contains(&"Bench".to_string()));
    }

    #[test]
    fn test_collider_tag_overrides_heuristics() {
        let mut layout = ArenaLayout::default_layout();
        // too few vertices for the heuristic, but authored as a collider
        layout.meshes.push(MeshDef {
            name: "Rail".into(),
            vertex_count: 4,
            index_count: 6,
            min: [2.0, 0.0, 2.0],
            max: [3.0, 1.0, 2.2],
            enabled: true,
            tag: Some(MeshTag::Collider),
        });
        assert!(names(&layout).contains(&"Rail".to_string()));
    }

    #[test]
    fn test_token_match_does_not_overreach() {
        let mut layout = ArenaLayout::default_layout();
        // contains "man" only as a substring - must be kept
        layout.meshes.push(MeshDef {
            name: "Handrail_East".into(),
            vertex_count: 120,
            index_count: 200,
            min: [10.0, 0.0, 10.0],
            max: [12.0, 1.2, 10.3],
            enabled: true,
            tag: None,
        });
        assert!(names(&layout).contains(&"Handrail_East".to_string()));
    }

    #[test]
    fn test_vertex_threshold() {
        let mut layout = ArenaLayout::default_layout();
        layout.meshes.push(MeshDef {
            name: "Flagpole".into(),
            vertex_count: 6,
            index_count: 8,
            min: [8.0, 0.0, 8.0],
            max: [8.2, 4.0, 8.2],
            enabled: true,
            tag: None,
        });
        assert!(!names(&layout).contains(&"Flagpole".to_string()));
    }

    #[test]
    fn test_closest_point() {
        let collider = StaticCollider {
            min: Vec3::ZERO,
            max: Vec3::ONE,
            friction: 0.9,
            restitution: 0.05,
        };
        assert_eq!(
            collider.closest_point(Vec3::new(2.0, 0.5, 0.5)),
            Vec3::new(1.0, 0.5, 0.5)
        );
        assert_eq!(
            collider.closest_point(Vec3::new(0.5, 0.5, 0.5)),
            Vec3::new(0.5, 0.5, 0.5)
        );
    }
}
