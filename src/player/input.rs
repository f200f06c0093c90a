use bevy::ecs::observer::On;
use bevy::prelude::{Component, Deref, DerefMut, EntityEvent, Query, Vec2};
use bevy_enhanced_input::prelude::*;

use crate::climbing::{ClimbButton, Hand, InputEdge};

/// Look around (mouse delta)
#[derive(Debug, InputAction)]
#[action_output(Vec2)]
pub struct LookAction;

/// VR grip, left hand
#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct GrabLeftAction;

/// VR grip, right hand
#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct GrabRightAction;

/// VR trigger, left hand
#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct UseLeftAction;

/// VR trigger, right hand
#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct UseRightAction;

/// Desktop primary button (left click)
#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct UseAction;

/// Desktop secondary button (right click)
#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct DropAction;

/// Jump action
#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct JumpAction;

/// An input action that feeds the climbing input dispatcher
pub trait ClimbInput: InputAction {
    const BUTTON: ClimbButton;
    const HAND: Option<Hand> = None;
}

impl ClimbInput for GrabLeftAction {
    const BUTTON: ClimbButton = ClimbButton::Grab;
    const HAND: Option<Hand> = Some(Hand::Left);
}

impl ClimbInput for GrabRightAction {
    const BUTTON: ClimbButton = ClimbButton::Grab;
    const HAND: Option<Hand> = Some(Hand::Right);
}

impl ClimbInput for UseLeftAction {
    const BUTTON: ClimbButton = ClimbButton::Use;
    const HAND: Option<Hand> = Some(Hand::Left);
}

impl ClimbInput for UseRightAction {
    const BUTTON: ClimbButton = ClimbButton::Use;
    const HAND: Option<Hand> = Some(Hand::Right);
}

impl ClimbInput for UseAction {
    const BUTTON: ClimbButton = ClimbButton::Use;
}

impl ClimbInput for DropAction {
    const BUTTON: ClimbButton = ClimbButton::Drop;
}

impl ClimbInput for JumpAction {
    const BUTTON: ClimbButton = ClimbButton::Jump;
}

/// Stores the current look input delta
#[derive(Component, Default, Deref, DerefMut)]
pub struct LookInput(pub Vec2);

/// Button edges received since the last climbing tick, oldest first
#[derive(Component, Default, Deref, DerefMut)]
pub struct PendingClimbInput(pub Vec<InputEdge>);

/// System to handle look input via observer
pub fn handle_look_input(trigger: On<Fire<LookAction>>, mut query: Query<&mut LookInput>) {
    if let Ok(mut look_input) = query.get_mut(trigger.event_target()) {
        look_input.0 = trigger.value;
    }
}

/// Queue a press edge for the climbing dispatcher
pub fn queue_press<A: ClimbInput>(trigger: On<Start<A>>, mut query: Query<&mut PendingClimbInput>) {
    if let Ok(mut pending) = query.get_mut(trigger.event_target()) {
        pending.push(InputEdge::press(A::BUTTON, A::HAND));
    }
}

/// Queue a release edge for the climbing dispatcher
pub fn queue_release<A: ClimbInput>(trigger: On<Complete<A>>, mut query: Query<&mut PendingClimbInput>) {
    if let Ok(mut pending) = query.get_mut(trigger.event_target()) {
        pending.push(InputEdge::release(A::BUTTON, A::HAND));
    }
}

/// Clears look input each frame
pub fn clear_look_input(mut query: Query<&mut LookInput>) {
    for mut look in &mut query {
        look.0 = Vec2::ZERO;
    }
}
