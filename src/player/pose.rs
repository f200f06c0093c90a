use avian3d::prelude::*;
use bevy::prelude::*;

use super::input::LookInput;
use super::state::*;
use crate::climbing::{ClimbPlatform, Climber};
use crate::physics::{GameLayer, detect_ground};

/// Updates grounded state via a short sphere cast under the body
pub fn update_grounded_state(
    mut commands: Commands,
    spatial_query: SpatialQuery,
    query: Query<(Entity, &Transform, &PlayerBody, Has<Grounded>), With<Player>>,
) {
    let ground_mask: LayerMask = [GameLayer::World, GameLayer::Climbable, GameLayer::Ledge].into();

    for (entity, transform, body, was_grounded) in &query {
        let is_grounded = detect_ground(
            &spatial_query,
            transform.translation,
            body.radius,
            body.height,
            ground_mask,
        )
        .is_some();

        if is_grounded && !was_grounded {
            commands.entity(entity).insert(Grounded);
        } else if !is_grounded && was_grounded {
            commands.entity(entity).remove::<Grounded>();
        }
    }
}

/// Applies mouse look rotation to the head
pub fn apply_head_look(
    player_query: Query<&LookInput, With<Player>>,
    mut head_query: Query<(&mut Transform, &mut HeadLook), With<ClimbHead>>,
) {
    let Ok(look_input) = player_query.single() else {
        return;
    };

    for (mut transform, mut look) in &mut head_query {
        look.yaw -= look_input.x * look.sensitivity;
        look.pitch = (look.pitch - look_input.y * look.sensitivity).clamp(-look.max_pitch, look.max_pitch);
        transform.rotation = look.rotation();
    }
}

/// World-space head position and forward direction for a body at the given physics pose.
pub fn desktop_head_pose(body_position: Vec3, body_rotation: Quat, head_offset: Vec3, look: &HeadLook) -> (Vec3, Dir3) {
    let head = body_position + body_rotation * head_offset;
    let forward = (body_rotation * look.rotation()) * Dir3::NEG_Z;
    (head, forward)
}

/// Derives each desktop climber's head pose from its physics body.
///
/// Runs on the fixed tick before dispatch and tracking. The anchor tracking pulls the body onto
/// the hand with gain 1, so it needs this tick's body position: a propagated or interpolated
/// transform lags by a tick and makes the hang oscillate.
pub fn update_desktop_head_pose(
    head_query: Query<(&Transform, &HeadLook, &ChildOf), With<ClimbHead>>,
    mut player_query: Query<(&Climber, &Position, &Rotation, &mut TrackedPose), With<Player>>,
) {
    for (head_transform, look, child_of) in &head_query {
        let Ok((climber, position, rotation, mut pose)) = player_query.get_mut(child_of.parent()) else {
            continue;
        };
        if climber.mode().platform() != ClimbPlatform::Desktop {
            continue;
        }
        let (head, forward) = desktop_head_pose(position.0, rotation.0, head_transform.translation, look);
        pose.head = head;
        pose.head_forward = forward;
    }
}
