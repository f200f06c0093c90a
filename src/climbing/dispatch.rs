use bevy::prelude::*;

use super::config::ClimbPlatform;
use super::machine::{Climber, Release};
use super::state::Hand;
use super::world::ClimbContext;

/// Platform buttons the climber listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum ClimbButton {
    /// VR grip
    Grab,
    /// VR trigger, desktop left click
    Use,
    /// Desktop right click
    Drop,
    Jump,
}

/// A single press or release from the host input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub struct InputEdge {
    pub button: ClimbButton,
    pub pressed: bool,
    /// Hand the edge came from, VR only
    pub hand: Option<Hand>,
}

impl InputEdge {
    pub fn press(button: ClimbButton, hand: Option<Hand>) -> Self {
        Self {
            button,
            pressed: true,
            hand,
        }
    }

    pub fn release(button: ClimbButton, hand: Option<Hand>) -> Self {
        Self {
            button,
            pressed: false,
            hand,
        }
    }
}

impl Climber {
    /// Maps a raw input edge onto grab and release intents.
    ///
    /// On desktop, left click always drives the logical left slot and right click the logical
    /// right slot, whatever the physical mouse buttons mean. In VR only the configured grab
    /// button (grip or trigger) is honoured.
    pub fn handle_input(&mut self, edge: InputEdge, ctx: &mut ClimbContext) {
        let config = ctx.config;

        if edge.button == ClimbButton::Jump {
            if edge.pressed && config.wall_jump.enabled && self.is_climbing() {
                self.release_with_boost(Vec3::Y * config.wall_jump.speed, ctx);
            }
            return;
        }

        match self.mode().platform() {
            ClimbPlatform::Vr => {
                let bound = if config.vr.use_grip_buttons {
                    ClimbButton::Grab
                } else {
                    ClimbButton::Use
                };
                if edge.button == ClimbButton::Drop {
                    warn!("climbing received a drop input in VR, which is not handled");
                    return;
                }
                if edge.button != bound {
                    return;
                }
                let Some(hand) = edge.hand else {
                    return;
                };
                self.process_input(edge.pressed, hand, ctx);
            }
            ClimbPlatform::Desktop => match edge.button {
                ClimbButton::Use => self.process_input(edge.pressed, Hand::Left, ctx),
                ClimbButton::Drop => self.process_input(edge.pressed, Hand::Right, ctx),
                ClimbButton::Grab | ClimbButton::Jump => {}
            },
        }
    }

    /// Grab or release intent for one hand slot.
    pub fn process_input(&mut self, pressed: bool, hand: Hand, ctx: &mut ClimbContext) {
        match self.mode().platform() {
            ClimbPlatform::Vr => {
                if pressed && !self.is_climbing_with_hand(hand) {
                    self.grab(hand, ctx);
                } else if !pressed && self.is_climbing_with_hand(hand) {
                    self.release_with_ledge_assist(ctx);
                }
            }
            ClimbPlatform::Desktop => match hand {
                Hand::Left => self.process_desktop_primary(pressed, ctx),
                Hand::Right => {
                    if !pressed && self.is_climbing() && ctx.agent.held_object(Hand::Right).is_none() {
                        self.release(ctx);
                    }
                }
            },
        }
    }

    fn process_desktop_primary(&mut self, pressed: bool, ctx: &mut ClimbContext) {
        if pressed {
            // The head ray always climbs with the nominal right hand
            if self.grab(Hand::Right, ctx) {
                self.set_primary_held(true);
            }
            return;
        }

        self.set_primary_held(false);
        if !self.is_climbing() {
            return;
        }
        if ctx.agent.is_grounded() {
            self.detach(Release::Reset, ctx);
        } else if let Some(position) = self.ledge_assist_target(ctx) {
            self.detach(Release::Teleport(position), ctx);
        }
        // Otherwise keep hanging: mid-air the primary button alone can't let go
    }

    fn set_primary_held(&mut self, held: bool) {
        if let Some(aim) = self.mode_mut().desktop_aim_mut() {
            aim.primary_held = held;
        }
    }
}
