//! Arena layout: authored anchor points, mesh descriptors and boundary geometry
//!
//! The layout file plays the role the imported stadium asset played for the
//! original scene: a flat list of named anchors plus per-mesh bookkeeping
//! (bounds, vertex counts, authored tags) that the collider builder filters.

pub mod colliders;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;

use crate::constants::{BOUNDARY_FALLBACK_RADIUS, PITCH_SURFACE_Y};
use crate::helpers::name_has_token;

/// Path to the arena layout description
pub const ARENA_LAYOUT_FILE: &str = "config/arena_layout.json";

/// Named world-space point authored in the layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnchorDef {
    pub name: String,
    pub pos: [f32; 3],
}

/// Authored collider intent for a mesh; heuristics only run when absent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeshTag {
    Collider,
    Ignore,
}

/// Imported-mesh bookkeeping the collider builder filters on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshDef {
    pub name: String,
    #[serde(default)]
    pub vertex_count: u32,
    #[serde(default)]
    pub index_count: u32,
    pub min: [f32; 3],
    pub max: [f32; 3],
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub tag: Option<MeshTag>,
}

fn default_enabled() -> bool {
    true
}

impl MeshDef {
    pub fn min_v(&self) -> Vec3 {
        Vec3::from_array(self.min)
    }

    pub fn max_v(&self) -> Vec3 {
        Vec3::from_array(self.max)
    }

    pub fn center(&self) -> Vec3 {
        (self.min_v() + self.max_v()) * 0.5
    }

    /// Full bounding-box diagonal length
    pub fn diagonal(&self) -> f32 {
        (self.max_v() - self.min_v()).length()
    }
}

/// The whole authored scene description
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArenaLayout {
    pub anchors: Vec<AnchorDef>,
    pub meshes: Vec<MeshDef>,
}

impl ArenaLayout {
    /// Load the layout from file, returns the built-in ground on error
    pub fn load_from_file(path: &str) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(layout) => layout,
                Err(e) => {
                    warn!("Failed to parse layout {}: {}, using built-in", path, e);
                    Self::default_layout()
                }
            },
            Err(e) => {
                warn!("Failed to load layout {}: {}, using built-in", path, e);
                Self::default_layout()
            }
        }
    }

    /// Look up an anchor position by exact name
    pub fn anchor(&self, name: &str) -> Option<Vec3> {
        self.anchors
            .iter()
            .find(|a| a.name == name)
            .map(|a| Vec3::from_array(a.pos))
    }

    /// Built-in practice ground: a regulation pitch with the stumps at the
    /// far end and a handful of surrounding meshes.
    ///
    /// The pitch runs along +Z from the bowler's end; the batsman defends
    /// the stumps near z = 19.5.
    pub fn default_layout() -> Self {
        let anchors = vec![
            AnchorDef { name: "PitchStart".into(), pos: [0.0, 0.0, 0.0] },
            AnchorDef { name: "PitchEnd".into(), pos: [0.0, 0.0, 20.12] },
            AnchorDef { name: "PitchLeft".into(), pos: [-1.525, 0.0, 10.06] },
            AnchorDef { name: "PitchRight".into(), pos: [1.525, 0.0, 10.06] },
            AnchorDef { name: "BallRelease".into(), pos: [0.2, 2.05, 0.3] },
            AnchorDef { name: "BatsmanPoint".into(), pos: [0.25, 0.0, 18.6] },
            AnchorDef { name: "WicketTarget".into(), pos: [0.0, 0.35, 19.5] },
            AnchorDef { name: "BounceGood".into(), pos: [0.0, 0.0, 13.2] },
            AnchorDef { name: "BounceYorker".into(), pos: [0.0, 0.0, 18.4] },
            AnchorDef { name: "OffStump".into(), pos: [0.3, 0.0, 16.0] },
            AnchorDef { name: "BatL".into(), pos: [0.45, 0.85, 18.55] },
            AnchorDef { name: "BatR".into(), pos: [0.45, 0.2, 18.6] },
            AnchorDef { name: "BatStart".into(), pos: [0.4, 1.0, 18.65] },
        ];
        let meshes = vec![
            MeshDef {
                name: "BoundaryRope".into(),
                vertex_count: 512,
                index_count: 1024,
                min: [-55.0, 0.0, -45.0],
                max: [55.0, 0.3, 65.0],
                enabled: true,
                tag: Some(MeshTag::Ignore),
            },
            MeshDef {
                name: "SightScreen_North".into(),
                vertex_count: 220,
                index_count: 396,
                min: [-4.0, 0.0, -12.5],
                max: [4.0, 5.0, -12.0],
                enabled: true,
                tag: None,
            },
            MeshDef {
                name: "Pavilion".into(),
                vertex_count: 4500,
                index_count: 9200,
                min: [30.0, 0.0, 0.0],
                max: [48.0, 12.0, 30.0],
                enabled: true,
                tag: None,
            },
            MeshDef {
                name: "AdBoard_01".into(),
                vertex_count: 36,
                index_count: 60,
                min: [-20.0, 0.0, 40.0],
                max: [-14.0, 1.0, 40.4],
                enabled: true,
                tag: None,
            },
            MeshDef {
                name: "PitchMarker_Good".into(),
                vertex_count: 8,
                index_count: 12,
                min: [-0.2, 0.0, 13.0],
                max: [0.2, 0.02, 13.4],
                enabled: true,
                tag: None,
            },
            MeshDef {
                name: "PlayerBatsman".into(),
                vertex_count: 3000,
                index_count: 5800,
                min: [0.0, 0.0, 18.3],
                max: [0.6, 1.8, 18.9],
                enabled: true,
                tag: None,
            },
            MeshDef {
                name: "StadiumShell".into(),
                vertex_count: 20000,
                index_count: 41000,
                min: [-90.0, 0.0, -70.0],
                max: [90.0, 40.0, 110.0],
                enabled: true,
                tag: None,
            },
        ];
        Self { anchors, meshes }
    }
}

/// Fatal configuration error: a required anchor is absent from the layout
#[derive(Debug, Clone)]
pub struct MissingAnchor(pub String);

impl fmt::Display for MissingAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "required anchor '{}' missing from arena layout", self.0)
    }
}

impl std::error::Error for MissingAnchor {}

/// The anchors gameplay cannot run without, resolved once at startup
#[derive(Resource, Debug, Clone, Copy)]
pub struct AnchorSet {
    pub pitch_start: Vec3,
    pub pitch_end: Vec3,
    pub pitch_left: Vec3,
    pub pitch_right: Vec3,
    pub ball_release: Vec3,
    pub batsman: Vec3,
    pub wicket_target: Vec3,
    pub bounce_good: Vec3,
    pub bounce_yorker: Vec3,
    pub off_stump: Vec3,
    /// Blade endpoints and grip of the bat's rest pose
    pub bat_l: Vec3,
    pub bat_r: Vec3,
    pub bat_start: Vec3,
}

impl AnchorSet {
    /// Resolve every required anchor; any absence is a hard failure
    pub fn from_layout(layout: &ArenaLayout) -> Result<Self, MissingAnchor> {
        let get = |name: &str| {
            layout
                .anchor(name)
                .ok_or_else(|| MissingAnchor(name.to_string()))
        };
        Ok(Self {
            pitch_start: get("PitchStart")?,
            pitch_end: get("PitchEnd")?,
            pitch_left: get("PitchLeft")?,
            pitch_right: get("PitchRight")?,
            ball_release: get("BallRelease")?,
            batsman: get("BatsmanPoint")?,
            wicket_target: get("WicketTarget")?,
            bounce_good: get("BounceGood")?,
            bounce_yorker: get("BounceYorker")?,
            off_stump: get("OffStump")?,
            bat_l: get("BatL")?,
            bat_r: get("BatR")?,
            bat_start: get("BatStart")?,
        })
    }
}

/// Boundary circle on the ground plane, derived once from the boundary mesh
#[derive(Resource, Debug, Clone, Copy)]
pub struct BoundaryGeometry {
    pub center: Vec2,
    pub radius: f32,
}

impl BoundaryGeometry {
    /// Derive the circle from the layout's boundary mesh bounding box,
    /// falling back to a default radius around the pitch center.
    pub fn from_layout(layout: &ArenaLayout) -> Self {
        let rope = layout
            .meshes
            .iter()
            .find(|m| name_has_token(&m.name, "boundary") || name_has_token(&m.name, "rope"));
        match rope {
            Some(mesh) => {
                let center = mesh.center();
                let extent = mesh.max_v() - mesh.min_v();
                Self {
                    center: Vec2::new(center.x, center.z),
                    radius: (extent.x + extent.z) / 4.0,
                }
            }
            None => {
                warn!("No boundary mesh in layout, using fallback radius");
                let center = layout
                    .anchor("PitchEnd")
                    .unwrap_or(Vec3::new(0.0, PITCH_SURFACE_Y, 20.0))
                    * 0.5;
                Self {
                    center: Vec2::new(center.x, center.z),
                    radius: BOUNDARY_FALLBACK_RADIUS,
                }
            }
        }
    }

    /// Is the point inside the rope (XZ projection)?
    pub fn contains(&self, p: Vec3) -> bool {
        Vec2::new(p.x, p.z).distance(self.center) < self.radius
    }
}
