use avian3d::prelude::*;
use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;

use super::climb::*;
use super::input::*;
use super::pose::*;
use super::state::*;
use crate::climbing::{Climber, ClimbingConfig};
use crate::physics::GameLayer;

/// Fixed-update stages of the climbing controller, run in order
#[derive(SystemSet, Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum ClimbingSystems {
    /// Grounded detection, desktop head pose and input dispatch
    Input,
    /// Anchor tracking, after everything else has moved the hands
    Track,
}

/// Plugin for the climbing player
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<EnhancedInputPlugin>() {
            app.add_plugins(EnhancedInputPlugin);
        }

        // Register input context for player
        app.add_input_context::<Player>();
        app.init_resource::<SpawnPlatform>();

        // Input observers
        app.add_observer(handle_look_input);
        app.add_observer(queue_press::<GrabLeftAction>)
            .add_observer(queue_release::<GrabLeftAction>)
            .add_observer(queue_press::<GrabRightAction>)
            .add_observer(queue_release::<GrabRightAction>)
            .add_observer(queue_press::<UseLeftAction>)
            .add_observer(queue_release::<UseLeftAction>)
            .add_observer(queue_press::<UseRightAction>)
            .add_observer(queue_release::<UseRightAction>)
            .add_observer(queue_press::<UseAction>)
            .add_observer(queue_release::<UseAction>)
            .add_observer(queue_press::<DropAction>)
            .add_observer(queue_release::<DropAction>)
            .add_observer(queue_press::<JumpAction>)
            .add_observer(queue_release::<JumpAction>);

        // Gameplay requests and config checks
        app.add_observer(handle_force_grab);
        app.add_observer(handle_release_if_grabbing);
        app.add_observer(validate_climbing_config);

        app.add_systems(Startup, spawn_player);

        app.configure_sets(
            FixedUpdate,
            (ClimbingSystems::Input, ClimbingSystems::Track).chain(),
        );
        app.add_systems(
            FixedUpdate,
            (
                (update_grounded_state, update_desktop_head_pose, dispatch_climb_input)
                    .chain()
                    .in_set(ClimbingSystems::Input),
                track_climbing.in_set(ClimbingSystems::Track),
            ),
        );

        app.add_systems(Update, apply_head_look);

        // Clear look input at end of frame
        app.add_systems(Last, clear_look_input);
    }
}

/// Spawns the player entity with all required components
pub fn spawn_player(mut commands: Commands, platform: Res<SpawnPlatform>) {
    let body = PlayerBody::default();
    let config = ClimbingConfig {
        platform: **platform,
        ..default()
    };

    // Head camera, child of the body
    let head = commands
        .spawn((
            ClimbHead,
            HeadLook::default(),
            Camera3d::default(),
            Projection::Perspective(PerspectiveProjection {
                fov: 90.0_f32.to_radians(),
                ..default()
            }),
            Transform::from_translation(Vec3::new(0.0, body.height / 2.0 - 0.1, 0.0)),
        ))
        .id();

    let capsule_height = body.height - body.radius * 2.0;

    commands
        .spawn((
            Player,
            Climber::from_config(&config),
            config,
            body,
            TrackedPose::default(),
            HeldObjects::default(),
            PendingClimbInput::default(),
            LookInput::default(),
        ))
        .insert((
            // Physics - Dynamic body with locked rotation; climbing drives its velocity
            RigidBody::Dynamic,
            Collider::capsule(body.radius, capsule_height),
            CollisionLayers::new(
                GameLayer::Player,
                [GameLayer::World, GameLayer::Climbable, GameLayer::Ledge],
            ),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            TranslationInterpolation,
            Friction::new(0.0),
            Restitution::new(0.0),
            GravityScale(1.0),
        ))
        .insert((
            Transform::from_translation(Vec3::new(0.0, 2.0, 0.0)),
            Visibility::default(),
        ))
        .insert(
            // Input bindings
            actions!(Player[
                (
                    Action::<LookAction>::new(),
                    bindings![Binding::mouse_motion()],
                ),
                (
                    Action::<UseAction>::new(),
                    bindings![MouseButton::Left],
                ),
                (
                    Action::<DropAction>::new(),
                    bindings![MouseButton::Right],
                ),
                (
                    Action::<GrabLeftAction>::new(),
                    bindings![GamepadButton::LeftTrigger],
                ),
                (
                    Action::<GrabRightAction>::new(),
                    bindings![GamepadButton::RightTrigger],
                ),
                (
                    Action::<UseLeftAction>::new(),
                    bindings![GamepadButton::LeftTrigger2],
                ),
                (
                    Action::<UseRightAction>::new(),
                    bindings![GamepadButton::RightTrigger2],
                ),
                (
                    Action::<JumpAction>::new(),
                    bindings![KeyCode::Space, GamepadButton::South],
                ),
            ]),
        )
        .add_child(head);
}
