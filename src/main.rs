//! Batgame - a first-person cricket batting simulator built with Bevy
//!
//! Main entry point: app setup and system registration.

use batgame::{
    ARENA_LAYOUT_FILE, AnchorSet, ArenaLayout, BALL_COLOR, BALL_RADIUS, BAT_BLADE_LENGTH,
    BAT_COLOR, Ball, BatBlade, BatPose, BoundaryGeometry, DeliveryFlags, DeliveryScheduler,
    EventBus, EventLogConfig, EventLogger, GAMEPLAY_TUNING_FILE, GROUND_COLOR, GameEvent,
    GameplayTweaks, MatchCountdown, MatchState, PITCH_COLOR, PitchBasis, PlayerInput, STUMP_COLOR,
    StatusLine, SwingState, ball, bat, countdown, delivery, events, input, scoring,
    setup_colliders, ui,
};
use bevy::prelude::*;

fn main() {
    let tweaks = GameplayTweaks::load_or_default(GAMEPLAY_TUNING_FILE);
    let layout = ArenaLayout::load_from_file(ARENA_LAYOUT_FILE);
    // gameplay cannot run without its geometry
    let anchors = match AnchorSet::from_layout(&layout) {
        Ok(anchors) => anchors,
        Err(e) => panic!("arena layout is unusable: {}", e),
    };
    let boundary = BoundaryGeometry::from_layout(&layout);
    let bat_pose = BatPose::from_anchors(&anchors);

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                resolution: bevy::window::WindowResolution::new(1280, 720),
                title: "Batgame".into(),
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::srgb(0.52, 0.72, 0.9)))
        .insert_resource(layout)
        .insert_resource(anchors)
        .insert_resource(boundary)
        .insert_resource(tweaks)
        .insert_resource(bat_pose)
        .insert_resource(EventLogger::new(EventLogConfig::default()))
        .insert_resource(EventBus::new())
        .init_resource::<MatchState>()
        .init_resource::<DeliveryFlags>()
        .init_resource::<DeliveryScheduler>()
        .init_resource::<SwingState>()
        .init_resource::<PlayerInput>()
        .init_resource::<StatusLine>()
        .init_resource::<MatchCountdown>()
        .add_systems(Startup, (setup_scene, setup_colliders, start_event_log))
        // Simulation chain. Bat systems run before the flight controller so
        // a contact preempts scripted velocity writes within the same frame.
        .add_systems(
            Update,
            (
                input::capture_input,
                bat::update_bat_pose,
                (events::update_event_bus_time, countdown::update_countdown).chain(),
                delivery::schedule_delivery.run_if(countdown::not_in_countdown),
                ball::tick_ball_age,
                (bat::start_swing, bat::resolve_contact, bat::expire_swing).chain(),
                (
                    ball::ball_flight_control,
                    ball::ball_gravity,
                    ball::apply_velocity,
                    ball::ball_ground_collision,
                    ball::ball_static_collisions,
                    bat::hit_assist,
                    ball::track_struck_ball,
                )
                    .chain(),
                (
                    scoring::check_wicket,
                    scoring::check_boundary,
                    scoring::check_delivery_end,
                )
                    .chain(),
                scoring::reset_match,
            )
                .chain(),
        )
        // Presentation and logging - no ordering constraints between these
        .add_systems(
            Update,
            (
                attach_ball_visuals,
                update_bat_visual,
                ui::update_scoreboard,
                ui::update_status_text,
                events::log_events,
            ),
        )
        .run();
}

/// Open the session log and mark the match started
fn start_event_log(mut logger: ResMut<EventLogger>, mut bus: ResMut<EventBus>) {
    logger.start_session();
    bus.emit(GameEvent::MatchStart);
}

/// Spawn the camera, light, ground, pitch, stumps, bat and HUD
fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    anchors: Res<AnchorSet>,
    boundary: Res<BoundaryGeometry>,
) {
    let pitch = PitchBasis::from_anchors(&anchors);

    // first-person camera just behind the batsman, facing the bowler
    let eye = anchors.batsman + pitch.forward * 2.4 + Vec3::Y * 1.7;
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(eye).looking_at(anchors.ball_release, Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 12_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -1.0, 0.4, 0.0)),
    ));

    // outfield out to the rope
    commands.spawn((
        Mesh3d(meshes.add(Cylinder::new(boundary.radius, 0.02))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: GROUND_COLOR,
            perceptual_roughness: 1.0,
            ..default()
        })),
        Transform::from_xyz(boundary.center.x, -0.012, boundary.center.y),
    ));

    // pitch strip
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(pitch.width, 0.02, pitch.length))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: PITCH_COLOR,
            perceptual_roughness: 0.9,
            ..default()
        })),
        Transform::from_translation(pitch.center)
            .with_rotation(Quat::from_rotation_arc(Vec3::Z, pitch.forward)),
    ));

    // stumps
    let stump_material = materials.add(StandardMaterial {
        base_color: STUMP_COLOR,
        ..default()
    });
    let stump_mesh = meshes.add(Cylinder::new(0.02, 0.7));
    for offset in [-0.11, 0.0, 0.11] {
        let mut position = anchors.wicket_target + pitch.side * offset;
        position.y = 0.35;
        commands.spawn((
            Mesh3d(stump_mesh.clone()),
            MeshMaterial3d(stump_material.clone()),
            Transform::from_translation(position),
        ));
    }

    // bat blade, driven by the cursor each frame
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(0.11, BAT_BLADE_LENGTH, 0.04))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: BAT_COLOR,
            perceptual_roughness: 0.7,
            ..default()
        })),
        Transform::from_translation(anchors.batsman + Vec3::Y * 0.6),
        BatBlade,
    ));

    ui::spawn_hud(&mut commands);
}

/// Dress newly spawned balls with a mesh and material
fn attach_ball_visuals(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    query: Query<Entity, Added<Ball>>,
) {
    for entity in &query {
        commands.entity(entity).insert((
            Mesh3d(meshes.add(Sphere::new(BALL_RADIUS))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: BALL_COLOR,
                perceptual_roughness: 0.4,
                ..default()
            })),
        ));
    }
}

/// Keep the visible blade on the simulated bat pose
fn update_bat_visual(pose: Res<BatPose>, mut query: Query<&mut Transform, With<BatBlade>>) {
    let Ok(mut transform) = query.single_mut() else {
        return;
    };
    transform.translation = pose.sweet_spot();
}
