//! Seams between the climbing core and the world it runs in.
//!
//! The core never touches the ECS directly. Geometry queries, the agent's body and the
//! notification transport are reached through these traits, which the player plugin implements
//! on top of Avian and Bevy and tests implement with fakes.

use avian3d::prelude::LayerMask;
use bevy::prelude::*;

use super::config::ClimbingConfig;
use super::state::Hand;

/// A ray query hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeHit {
    pub point: Vec3,
    pub normal: Vec3,
    pub surface: Entity,
    pub distance: f32,
}

/// Read-only spatial queries against the physics world.
///
/// All queries are synchronous and bounded; the tick depends on their answers immediately.
pub trait GeometryProbes {
    /// Surfaces overlapping a sphere, in the engine's native order.
    fn sphere_overlap(&self, center: Vec3, radius: f32, mask: LayerMask) -> Vec<Entity>;

    /// Closest hit along a ray.
    fn ray_cast(
        &self,
        origin: Vec3,
        direction: Dir3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<ProbeHit>;

    /// Whether a vertical capsule between `bottom` and `top` is obstructed.
    fn capsule_check(&self, bottom: Vec3, top: Vec3, radius: f32, mask: LayerMask) -> bool;

    /// Current world transform of a surface, if it still exists.
    fn surface_transform(&self, surface: Entity) -> Option<GlobalTransform>;
}

/// The body being climbed with: its actuators and tracked pose.
pub trait ClimbAgent {
    fn set_velocity(&mut self, velocity: Vec3);
    fn set_gravity_scale(&mut self, scale: f32);
    /// Moves the agent so it stands on `position`.
    fn teleport_to(&mut self, position: Vec3, rotation: Quat);
    fn rotation(&self) -> Quat;
    fn is_grounded(&self) -> bool;
    /// Object held in the pickup slot of `hand`, if any.
    fn held_object(&self, hand: Hand) -> Option<Entity>;
    fn hand_position(&self, hand: Hand) -> Vec3;
    /// Head position and facing direction.
    fn head_pose(&self) -> (Vec3, Dir3);
}

/// Fire-and-forget delivery of named climbing events.
pub trait ClimbEventSink {
    fn notify(&mut self, event: &str, target: Entity);
}

/// Everything a climbing operation needs from outside the climber for one call.
pub struct ClimbContext<'a> {
    pub config: &'a ClimbingConfig,
    pub probes: &'a dyn GeometryProbes,
    pub agent: &'a mut dyn ClimbAgent,
    pub events: &'a mut dyn ClimbEventSink,
}
