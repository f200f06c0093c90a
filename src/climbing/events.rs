use bevy::prelude::*;

use super::config::ClimbEventConfig;
use super::world::ClimbEventSink;

/// Named climbing event delivered to the climbed surface and configured listeners.
///
/// Observe it on any entity listed in [`ClimbEventConfig::targets`], or on a climbable
/// surface when forwarding to climbed objects is enabled.
#[derive(EntityEvent, Debug, Clone, PartialEq)]
pub struct ClimbNotification {
    /// Receiver of the notification
    pub entity: Entity,
    /// The climbing player that grabbed or dropped
    pub climber: Entity,
    /// Event name from the climbing configuration
    pub name: String,
}

/// Collects notifications during a climbing call so they can be triggered afterwards.
pub struct NotificationBuffer {
    climber: Entity,
    pending: Vec<ClimbNotification>,
}

impl NotificationBuffer {
    pub fn new(climber: Entity) -> Self {
        Self {
            climber,
            pending: Vec::new(),
        }
    }

    pub fn drain(&mut self) -> impl Iterator<Item = ClimbNotification> + '_ {
        self.pending.drain(..)
    }
}

impl ClimbEventSink for NotificationBuffer {
    fn notify(&mut self, event: &str, target: Entity) {
        self.pending.push(ClimbNotification {
            entity: target,
            climber: self.climber,
            name: event.to_owned(),
        });
    }
}

pub(crate) fn send_grabbed(config: &ClimbEventConfig, surface: Entity, sink: &mut dyn ClimbEventSink) {
    fan_out(config, &config.grabbed_event, surface, sink);
}

pub(crate) fn send_dropped(config: &ClimbEventConfig, surface: Entity, sink: &mut dyn ClimbEventSink) {
    fan_out(config, &config.dropped_event, surface, sink);
}

fn fan_out(config: &ClimbEventConfig, event: &str, surface: Entity, sink: &mut dyn ClimbEventSink) {
    if config.send_to_climbed {
        sink.notify(event, surface);
    }
    for &target in &config.targets {
        sink.notify(event, target);
    }
}
