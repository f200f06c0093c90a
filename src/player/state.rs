use bevy::prelude::*;

use crate::climbing::{ClimbPlatform, Hand};

/// Marker component for the player entity (also used as input context)
#[derive(Component, Default)]
pub struct Player;

/// Player body dimensions
#[derive(Component, Clone, Copy)]
pub struct PlayerBody {
    /// Standing collider height
    pub height: f32,
    /// Collider radius
    pub radius: f32,
}

impl Default for PlayerBody {
    fn default() -> Self {
        Self {
            height: 1.8,
            radius: 0.3,
        }
    }
}

/// Marker: player is on the ground
#[derive(Component)]
#[component(storage = "SparseSet")]
pub struct Grounded;

/// Marker for the entity whose transform is the player's head (usually the camera)
#[derive(Component)]
pub struct ClimbHead;

/// Head yaw/pitch driven by mouse look
#[derive(Component, Clone)]
pub struct HeadLook {
    /// Mouse sensitivity
    pub sensitivity: f32,
    pub yaw: f32,
    pub pitch: f32,
    /// Maximum absolute pitch
    pub max_pitch: f32,
}

impl HeadLook {
    /// Head rotation relative to the body
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }
}

impl Default for HeadLook {
    fn default() -> Self {
        Self {
            sensitivity: 0.003,
            yaw: 0.0,
            pitch: 0.0,
            max_pitch: 89.0_f32.to_radians(),
        }
    }
}

/// Tracked head and hand poses in world space.
///
/// VR hosts write this every frame from their tracking source. On desktop the head is derived
/// each fixed tick from the body and the [`ClimbHead`] look, and hand positions are unused.
#[derive(Component, Clone, Copy)]
pub struct TrackedPose {
    pub head: Vec3,
    pub head_forward: Dir3,
    pub left_hand: Vec3,
    pub right_hand: Vec3,
}

impl Default for TrackedPose {
    fn default() -> Self {
        Self {
            head: Vec3::ZERO,
            head_forward: Dir3::NEG_Z,
            left_hand: Vec3::ZERO,
            right_hand: Vec3::ZERO,
        }
    }
}

impl TrackedPose {
    pub fn hand(&self, hand: Hand) -> Vec3 {
        match hand {
            Hand::Left => self.left_hand,
            Hand::Right => self.right_hand,
        }
    }
}

/// Objects held in each hand's pickup slot, maintained by whatever pickup system the game uses
#[derive(Component, Default, Clone, Copy)]
pub struct HeldObjects {
    pub left: Option<Entity>,
    pub right: Option<Entity>,
}

impl HeldObjects {
    pub fn get(&self, hand: Hand) -> Option<Entity> {
        match hand {
            Hand::Left => self.left,
            Hand::Right => self.right,
        }
    }
}

/// Asks `entity`'s climber to grab `surface` at its origin plus `offset`
#[derive(EntityEvent, Debug, Clone)]
pub struct ForceGrab {
    pub entity: Entity,
    pub surface: Entity,
    pub hand: Hand,
    pub offset: Vec3,
}

/// Asks `entity`'s climber to let go, but only if it's holding `surface`
#[derive(EntityEvent, Debug, Clone)]
pub struct ReleaseIfGrabbing {
    pub entity: Entity,
    pub surface: Entity,
}

/// Platform the spawned player climbs with
#[derive(Resource, Clone, Copy, Default, Deref)]
pub struct SpawnPlatform(pub ClimbPlatform);
