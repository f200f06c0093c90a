use bevy::prelude::*;

use super::config::{ClimbPlatform, ClimbingConfig};
use super::events::{send_dropped, send_grabbed};
use super::grab::ClimbMode;
use super::ledge::try_ledge_assist;
use super::state::{ClimbState, GrabAnchor, Hand};
use super::velocity::VelocityTracker;
use super::world::ClimbContext;

/// How a climb ends
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Release {
    /// Fling with the tracked velocity, plus an extra boost
    Fling { boost: Vec3 },
    /// Stop dead, for letting go while already standing
    Reset,
    /// Stand on a ledge instead of flinging
    Teleport(Vec3),
}

/// Climbing state machine for one agent.
///
/// Owns the climb state, the input-mode specific grab logic and the velocity tracker. Every
/// transition goes through [`Climber::attach`] or [`Climber::detach`] so entry and exit
/// actions always run the same way.
#[derive(Component, Debug, Clone)]
pub struct Climber {
    state: ClimbState,
    mode: ClimbMode,
    tracker: VelocityTracker,
}

impl Climber {
    pub fn new(platform: ClimbPlatform) -> Self {
        Self {
            state: ClimbState::Idle,
            mode: ClimbMode::new(platform),
            tracker: VelocityTracker::default(),
        }
    }

    /// Builds a climber for the platform named in `config`.
    pub fn from_config(config: &ClimbingConfig) -> Self {
        Self::new(config.platform)
    }

    pub fn state(&self) -> &ClimbState {
        &self.state
    }

    pub fn mode(&self) -> &ClimbMode {
        &self.mode
    }

    pub(crate) fn mode_mut(&mut self) -> &mut ClimbMode {
        &mut self.mode
    }

    pub fn tracker(&self) -> &VelocityTracker {
        &self.tracker
    }

    pub fn is_climbing(&self) -> bool {
        self.state.is_climbing()
    }

    pub fn is_climbing_with_hand(&self, hand: Hand) -> bool {
        self.state.hand() == Some(hand)
    }

    pub fn is_grabbing(&self, surface: Entity) -> bool {
        self.state.anchor().is_some_and(|anchor| anchor.surface == surface)
    }

    /// Probes for a surface with `hand` and starts climbing it on a hit.
    pub fn grab(&mut self, hand: Hand, ctx: &mut ClimbContext) -> bool {
        let Some(candidate) = self.mode.detect_grab(hand, ctx) else {
            return false;
        };
        let Some(surface_transform) = ctx.probes.surface_transform(candidate.surface) else {
            return false;
        };
        let anchor = GrabAnchor::at_world_point(candidate.surface, &surface_transform, candidate.point);
        self.mode.aim_at(candidate.point, ctx);
        self.attach(hand, anchor, candidate.point, ctx);
        true
    }

    /// Grabs `surface` at its origin plus a world-space `offset`, without probing.
    pub fn force_grab(&mut self, surface: Entity, hand: Hand, offset: Vec3, ctx: &mut ClimbContext) -> bool {
        let Some(surface_transform) = ctx.probes.surface_transform(surface) else {
            return false;
        };
        let point = surface_transform.translation() + offset;
        let anchor = GrabAnchor::at_world_point(surface, &surface_transform, point);
        self.mode.aim_at(point, ctx);
        self.attach(hand, anchor, point, ctx);
        true
    }

    /// Lets go and flings with the tracked velocity.
    pub fn release(&mut self, ctx: &mut ClimbContext) -> bool {
        self.detach(Release::Fling { boost: Vec3::ZERO }, ctx)
    }

    /// Lets go and adds `boost` on top of the fling.
    pub fn release_with_boost(&mut self, boost: Vec3, ctx: &mut ClimbContext) -> bool {
        self.detach(Release::Fling { boost }, ctx)
    }

    /// Lets go only if `surface` is the one being climbed.
    pub fn release_grabbed_if_current(&mut self, surface: Entity, ctx: &mut ClimbContext) -> bool {
        self.is_grabbing(surface) && self.release(ctx)
    }

    /// Stand-on point for a ledge-assisted release, if the ledge allows it.
    pub fn ledge_assist_target(&self, ctx: &ClimbContext) -> Option<Vec3> {
        let ledge = &ctx.config.ledge_assist;
        if !ledge.enabled || !self.is_climbing() {
            return None;
        }
        let (head, _) = ctx.agent.head_pose();
        try_ledge_assist(head, self.tracker.last_anchor(), ledge, ctx.probes)
    }

    /// Teleports onto a ledge if possible, otherwise flings.
    pub fn release_with_ledge_assist(&mut self, ctx: &mut ClimbContext) -> bool {
        match self.ledge_assist_target(ctx) {
            Some(position) => self.detach(Release::Teleport(position), ctx),
            None => self.release(ctx),
        }
    }

    /// Advances anchor tracking by one fixed tick.
    ///
    /// Runs after everything else that moves the hand or head, so the commanded velocity pulls
    /// the agent onto the final anchor position.
    pub fn tick(&mut self, dt: f32, ctx: &mut ClimbContext) {
        if !(dt.is_finite() && dt > 0.0) {
            return;
        }
        let ClimbState::Climbing { hand, anchor } = self.state else {
            return;
        };
        let Some(surface_transform) = ctx.probes.surface_transform(anchor.surface) else {
            debug!("climbed surface {} is gone, letting go", anchor.surface);
            self.release(ctx);
            return;
        };

        let anchor_position = anchor.world_position(&surface_transform);
        let target = self.mode.anchor_target(hand, ctx, dt);
        let velocity = self.tracker.record(anchor_position, target, dt);
        ctx.agent.set_velocity(velocity);
    }

    /// Idle/Climbing -> Climbing. Grabbing while already climbing drops the old surface first.
    fn attach(&mut self, hand: Hand, anchor: GrabAnchor, anchor_position: Vec3, ctx: &mut ClimbContext) {
        let previous = self.state.anchor().map(|a| a.surface);

        self.tracker.reset(anchor_position);
        if ctx.config.gravity_override {
            ctx.agent.set_gravity_scale(0.0);
        }

        if let Some(previous) = previous {
            send_dropped(&ctx.config.events, previous, &mut *ctx.events);
        }
        send_grabbed(&ctx.config.events, anchor.surface, &mut *ctx.events);

        debug!("grabbed {} with {:?} hand", anchor.surface, hand);
        self.state = ClimbState::Climbing { hand, anchor };
    }

    /// Climbing -> Idle. No-op when idle.
    pub(crate) fn detach(&mut self, release: Release, ctx: &mut ClimbContext) -> bool {
        let ClimbState::Climbing { anchor, .. } = self.state else {
            return false;
        };
        let config = ctx.config;

        match release {
            Release::Fling { boost } => {
                let velocity = self.tracker.release_velocity(
                    config.velocity_buffer,
                    config.vr.max_fling_speed,
                    config.vr.fling_multiplier,
                );
                ctx.agent.set_velocity(velocity + boost);
            }
            Release::Reset => ctx.agent.set_velocity(Vec3::ZERO),
            Release::Teleport(position) => {
                debug!("ledge assist onto {position}");
                let rotation = ctx.agent.rotation();
                ctx.agent.teleport_to(position, rotation);
                ctx.agent.set_velocity(Vec3::ZERO);
            }
        }

        if config.gravity_override {
            ctx.agent.set_gravity_scale(1.0);
        }
        send_dropped(&config.events, anchor.surface, &mut *ctx.events);

        debug!("released {}", anchor.surface);
        self.state = ClimbState::Idle;
        true
    }
}
