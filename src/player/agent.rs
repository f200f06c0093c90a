use avian3d::prelude::*;
use bevy::prelude::*;

use super::state::{HeldObjects, TrackedPose};
use crate::climbing::{ClimbAgent, Hand};

/// The player's rigid body as seen by the climbing core
pub struct BodyAgent<'a> {
    pub transform: &'a mut Transform,
    pub velocity: &'a mut LinearVelocity,
    pub gravity_scale: &'a mut GravityScale,
    pub pose: &'a TrackedPose,
    pub held: &'a HeldObjects,
    pub grounded: bool,
    /// Standing height, used to put the feet on teleport targets
    pub height: f32,
}

impl ClimbAgent for BodyAgent<'_> {
    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity.0 = velocity;
    }

    fn set_gravity_scale(&mut self, scale: f32) {
        self.gravity_scale.0 = scale;
    }

    fn teleport_to(&mut self, position: Vec3, rotation: Quat) {
        self.transform.translation = position + Vec3::Y * (self.height / 2.0);
        self.transform.rotation = rotation;
    }

    fn rotation(&self) -> Quat {
        self.transform.rotation
    }

    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn held_object(&self, hand: Hand) -> Option<Entity> {
        self.held.get(hand)
    }

    fn hand_position(&self, hand: Hand) -> Vec3 {
        self.pose.hand(hand)
    }

    fn head_pose(&self) -> (Vec3, Dir3) {
        (self.pose.head, self.pose.head_forward)
    }
}
