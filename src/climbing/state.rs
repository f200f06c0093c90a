use bevy::prelude::*;

/// Which limb is climbing.
///
/// Desktop climbers always report [`Hand::Right`], the logical slot used by the head ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum Hand {
    Left,
    Right,
}

/// Attachment point on a climbable surface, stored in the surface's local space so it
/// follows the surface when it moves.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct GrabAnchor {
    /// The grabbed surface entity
    pub surface: Entity,
    /// Hand position in the surface's local frame
    pub local_offset: Vec3,
}

impl GrabAnchor {
    /// Builds an anchor that sits at `world_point` on `surface` right now.
    pub fn at_world_point(surface: Entity, surface_transform: &GlobalTransform, world_point: Vec3) -> Self {
        Self {
            surface,
            local_offset: surface_transform
                .affine()
                .inverse()
                .transform_point3(world_point),
        }
    }

    /// Current world position of the anchored hand.
    pub fn world_position(&self, surface_transform: &GlobalTransform) -> Vec3 {
        surface_transform.transform_point(self.local_offset)
    }
}

/// Climbing state of a single agent.
///
/// The anchor only exists while climbing, so the two can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub enum ClimbState {
    #[default]
    Idle,
    Climbing { hand: Hand, anchor: GrabAnchor },
}

impl ClimbState {
    pub fn is_climbing(&self) -> bool {
        matches!(self, Self::Climbing { .. })
    }

    pub fn hand(&self) -> Option<Hand> {
        match self {
            Self::Idle => None,
            Self::Climbing { hand, .. } => Some(*hand),
        }
    }

    pub fn anchor(&self) -> Option<&GrabAnchor> {
        match self {
            Self::Idle => None,
            Self::Climbing { anchor, .. } => Some(anchor),
        }
    }
}
