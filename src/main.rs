use avian3d::prelude::*;
use bevy::prelude::*;
use bevy_climbing::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Climbing".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(BevyClimbingPlugin)
        .add_systems(Startup, spawn_world)
        .add_systems(FixedUpdate, bounce_platforms)
        .add_observer(log_climb_notifications)
        .run();
}

/// Kinematic platform that swings back and forth along X
#[derive(Component)]
struct Swinging {
    speed: f32,
    range: f32,
}

fn spawn_world(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let ground_material = materials.add(Color::srgb(0.35, 0.35, 0.4));
    let wall_material = materials.add(Color::srgb(0.6, 0.45, 0.3));

    commands.spawn((
        RigidBody::Static,
        Collider::cuboid(40.0, 1.0, 40.0),
        CollisionLayers::new(GameLayer::World, [GameLayer::Player]),
        Mesh3d(meshes.add(Cuboid::new(40.0, 1.0, 40.0))),
        MeshMaterial3d(ground_material),
        Transform::from_xyz(0.0, -0.5, 0.0),
    ));

    // Climbing wall with a ledge on top
    commands.spawn((
        RigidBody::Static,
        Collider::cuboid(6.0, 4.0, 1.0),
        CollisionLayers::new([GameLayer::Climbable, GameLayer::Ledge], [GameLayer::Player]),
        Mesh3d(meshes.add(Cuboid::new(6.0, 4.0, 1.0))),
        MeshMaterial3d(wall_material.clone()),
        Transform::from_xyz(0.0, 2.0, -4.0),
    ));

    commands.spawn((
        Swinging {
            speed: 2.0,
            range: 4.0,
        },
        RigidBody::Kinematic,
        Collider::cuboid(2.0, 0.5, 2.0),
        CollisionLayers::new(GameLayer::Climbable, [GameLayer::Player]),
        LinearVelocity(Vec3::X * 2.0),
        Mesh3d(meshes.add(Cuboid::new(2.0, 0.5, 2.0))),
        MeshMaterial3d(wall_material),
        Transform::from_xyz(0.0, 3.5, 4.0),
    ));

    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn bounce_platforms(mut query: Query<(&Transform, &Swinging, &mut LinearVelocity)>) {
    for (transform, swinging, mut velocity) in &mut query {
        if transform.translation.x > swinging.range {
            velocity.x = -swinging.speed;
        } else if transform.translation.x < -swinging.range {
            velocity.x = swinging.speed;
        }
    }
}

fn log_climb_notifications(trigger: On<ClimbNotification>) {
    info!("{} -> {}", trigger.name, trigger.entity);
}
