use avian3d::prelude::*;
use bevy::prelude::*;
use thiserror::Error;

use crate::physics::GameLayer;

/// Input platform, chosen once when the climber is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum ClimbPlatform {
    /// Tracked hands grab by overlapping a surface
    Vr,
    /// A ray from the head grabs whatever the player looks at
    #[default]
    Desktop,
}

/// Wall jump tuning
#[derive(Debug, Clone, Copy)]
pub struct WallJumpConfig {
    /// Whether jumping while climbing lets go with a boost
    pub enabled: bool,
    /// Upward boost in m/s
    pub speed: f32,
}

impl Default for WallJumpConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            speed: 5.0,
        }
    }
}

/// Ledge assist: teleport onto a flat top surface instead of flinging on release
#[derive(Debug, Clone, Copy)]
pub struct LedgeAssistConfig {
    pub enabled: bool,
    /// Surfaces the ledge ray may land on
    pub mask: LayerMask,
    /// Geometry that blocks the clearance capsule, ceilings and plain world colliders included
    pub obstruction_mask: LayerMask,
    /// Maximum angle between the hit normal and up (radians, exclusive)
    pub max_angle: f32,
    /// Height of the clearance capsule standing on the ledge
    pub capsule_height: f32,
    /// Radius of the clearance capsule
    pub capsule_radius: f32,
    /// Gap left between the ledge surface and the bottom of the capsule
    pub capsule_margin: f32,
}

impl Default for LedgeAssistConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            mask: [GameLayer::Climbable, GameLayer::Ledge].into(),
            obstruction_mask: [GameLayer::World, GameLayer::Climbable, GameLayer::Ledge].into(),
            max_angle: 30.0_f32.to_radians(),
            capsule_height: 1.8,
            capsule_radius: 0.3,
            capsule_margin: 0.05,
        }
    }
}

/// VR-only tuning
#[derive(Debug, Clone, Copy)]
pub struct VrConfig {
    /// Bind grabbing to the grip button (true) or the trigger (false)
    pub use_grip_buttons: bool,
    /// Radius of the grab sphere around the tracked hand
    pub hand_radius: f32,
    /// Cap on the player-driven part of the release velocity (m/s)
    pub max_fling_speed: f32,
    /// Scale applied to the capped release velocity
    pub fling_multiplier: f32,
}

impl Default for VrConfig {
    fn default() -> Self {
        Self {
            use_grip_buttons: true,
            hand_radius: 0.1,
            max_fling_speed: 6.0,
            fling_multiplier: 1.2,
        }
    }
}

/// Desktop-only tuning
#[derive(Debug, Clone, Copy)]
pub struct DesktopConfig {
    /// Length of the grab ray from the head
    pub reach: f32,
    /// Hang distance the virtual hand relaxes toward after grabbing
    pub resting_distance: f32,
    /// Speed at which the hang distance relaxes (m/s)
    pub aim_speed: f32,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            reach: 2.0,
            resting_distance: 0.5,
            aim_speed: 5.0,
        }
    }
}

/// Who hears about grabs and drops
#[derive(Debug, Clone)]
pub struct ClimbEventConfig {
    /// Also notify the grabbed surface itself
    pub send_to_climbed: bool,
    /// Listeners notified on every grab and drop
    pub targets: Vec<Entity>,
    pub grabbed_event: String,
    pub dropped_event: String,
}

impl Default for ClimbEventConfig {
    fn default() -> Self {
        Self {
            send_to_climbed: true,
            targets: Vec::new(),
            grabbed_event: "ClimbingGrabbed".into(),
            dropped_event: "ClimbingDropped".into(),
        }
    }
}

/// Climbing configuration, attached to the climbing player
#[derive(Component, Debug, Clone)]
pub struct ClimbingConfig {
    /// Read once by [`Climber::from_config`](super::Climber::from_config). Afterwards the
    /// climber's mode decides the platform, so changing this at runtime has no effect.
    pub platform: ClimbPlatform,
    /// Surfaces that can be grabbed
    pub climbable_mask: LayerMask,
    pub wall_jump: WallJumpConfig,
    /// Zero the agent's gravity scale while climbing
    pub gravity_override: bool,
    /// Average the last few climbing velocities on release
    pub velocity_buffer: bool,
    pub ledge_assist: LedgeAssistConfig,
    pub vr: VrConfig,
    pub desktop: DesktopConfig,
    pub events: ClimbEventConfig,
}

impl Default for ClimbingConfig {
    fn default() -> Self {
        Self {
            platform: ClimbPlatform::default(),
            climbable_mask: GameLayer::Climbable.into(),
            wall_jump: WallJumpConfig::default(),
            gravity_override: false,
            velocity_buffer: true,
            ledge_assist: LedgeAssistConfig::default(),
            vr: VrConfig::default(),
            desktop: DesktopConfig::default(),
            events: ClimbEventConfig::default(),
        }
    }
}

/// Configuration values that can't produce sensible climbing
#[derive(Debug, Error, PartialEq)]
pub enum ClimbConfigError {
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("ledge assist max angle must be in (0, pi/2], got {0}")]
    LedgeAngle(f32),

    #[error("event name for {0} is empty")]
    EmptyEventName(&'static str),
}

impl ClimbingConfig {
    /// Checks the tuning values. Climbing still runs with a bad config; callers log the error.
    pub fn validate(&self) -> Result<(), ClimbConfigError> {
        positive("vr.hand_radius", self.vr.hand_radius)?;
        positive("vr.max_fling_speed", self.vr.max_fling_speed)?;
        non_negative("vr.fling_multiplier", self.vr.fling_multiplier)?;
        positive("desktop.reach", self.desktop.reach)?;
        non_negative("desktop.resting_distance", self.desktop.resting_distance)?;
        non_negative("desktop.aim_speed", self.desktop.aim_speed)?;
        non_negative("wall_jump.speed", self.wall_jump.speed)?;

        let ledge = &self.ledge_assist;
        if !(ledge.max_angle > 0.0 && ledge.max_angle <= std::f32::consts::FRAC_PI_2) {
            return Err(ClimbConfigError::LedgeAngle(ledge.max_angle));
        }
        positive("ledge_assist.capsule_height", ledge.capsule_height)?;
        positive("ledge_assist.capsule_radius", ledge.capsule_radius)?;
        non_negative("ledge_assist.capsule_margin", ledge.capsule_margin)?;

        if self.events.grabbed_event.is_empty() {
            return Err(ClimbConfigError::EmptyEventName("grabbed"));
        }
        if self.events.dropped_event.is_empty() {
            return Err(ClimbConfigError::EmptyEventName("dropped"));
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ClimbConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ClimbConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ClimbConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ClimbConfigError::Negative { field, value })
    }
}
