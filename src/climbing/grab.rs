use bevy::prelude::*;

use super::config::{ClimbPlatform, ClimbingConfig};
use super::state::Hand;
use super::world::ClimbContext;

/// Desktop aiming state: where the virtual hand hangs relative to the head.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DesktopAim {
    /// Head direction captured while the primary button is held
    pub direction: Vec3,
    /// Distance from the head to the virtual hand
    pub hang_distance: f32,
    /// Primary button went down on a successful grab and hasn't been released
    pub primary_held: bool,
}

impl DesktopAim {
    /// Relaxes the hang distance toward `resting` without passing it.
    pub fn relax(&mut self, resting: f32, speed: f32, dt: f32) {
        if self.hang_distance > resting {
            self.hang_distance = (self.hang_distance - speed * dt).max(resting);
        }
    }
}

/// Where a grab probe landed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrabCandidate {
    pub surface: Entity,
    /// World point the hand attaches at
    pub point: Vec3,
}

/// Input-mode specific grab detection and anchor targeting
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClimbMode {
    Vr,
    Desktop(DesktopAim),
}

impl ClimbMode {
    pub fn new(platform: ClimbPlatform) -> Self {
        match platform {
            ClimbPlatform::Vr => Self::Vr,
            ClimbPlatform::Desktop => Self::Desktop(DesktopAim::default()),
        }
    }

    pub fn platform(&self) -> ClimbPlatform {
        match self {
            Self::Vr => ClimbPlatform::Vr,
            Self::Desktop(_) => ClimbPlatform::Desktop,
        }
    }

    pub fn desktop_aim(&self) -> Option<&DesktopAim> {
        match self {
            Self::Vr => None,
            Self::Desktop(aim) => Some(aim),
        }
    }

    pub fn desktop_aim_mut(&mut self) -> Option<&mut DesktopAim> {
        match self {
            Self::Vr => None,
            Self::Desktop(aim) => Some(aim),
        }
    }

    /// Probes for a grabbable surface. Doesn't touch the aim; see [`ClimbMode::aim_at`].
    ///
    /// VR overlaps a sphere around the tracked hand and keeps the hand where it is. Desktop
    /// casts a ray from the head and snaps the hand onto the hit point.
    pub fn detect_grab(&self, hand: Hand, ctx: &ClimbContext) -> Option<GrabCandidate> {
        let config = ctx.config;
        match self {
            Self::Vr => {
                let hand_pos = ctx.agent.hand_position(hand);
                let surfaces =
                    ctx.probes
                        .sphere_overlap(hand_pos, config.vr.hand_radius, config.climbable_mask);
                let surface = *surfaces.first()?;
                Some(GrabCandidate {
                    surface,
                    point: hand_pos,
                })
            }
            Self::Desktop(_) => {
                let (head, forward) = ctx.agent.head_pose();
                let hit = ctx.probes.ray_cast(
                    head,
                    forward,
                    config.desktop.reach,
                    config.climbable_mask,
                )?;
                Some(GrabCandidate {
                    surface: hit.surface,
                    point: hit.point,
                })
            }
        }
    }

    /// Points the desktop virtual hand at `point`, starting the hang distance there so the hand
    /// doesn't jump outward. No-op in VR.
    pub fn aim_at(&mut self, point: Vec3, ctx: &ClimbContext) {
        let Self::Desktop(aim) = self else {
            return;
        };
        let (head, forward) = ctx.agent.head_pose();
        let to_point = point - head;
        aim.direction = to_point.try_normalize().unwrap_or(forward.as_vec3());
        aim.hang_distance = to_point.length();
    }

    /// Position the agent's hand should be at this tick.
    pub fn anchor_target(&mut self, hand: Hand, ctx: &ClimbContext, dt: f32) -> Vec3 {
        match self {
            Self::Vr => ctx.agent.hand_position(hand),
            Self::Desktop(aim) => {
                let config: &ClimbingConfig = ctx.config;
                let (head, forward) = ctx.agent.head_pose();
                if aim.primary_held {
                    aim.direction = forward.as_vec3();
                }
                aim.relax(config.desktop.resting_distance, config.desktop.aim_speed, dt);
                head + aim.direction * aim.hang_distance
            }
        }
    }
}
