//! Grab, hang and release.
//!
//! The core here is engine-agnostic: it reaches physics, the player body and event delivery
//! through the traits in [`world`]. The player plugin wires those to Avian and Bevy.

mod config;
mod dispatch;
mod events;
mod grab;
mod ledge;
mod machine;
mod state;
mod velocity;
pub mod world;

#[cfg(test)]
mod tests;

pub use config::*;
pub use dispatch::{ClimbButton, InputEdge};
pub use events::{ClimbNotification, NotificationBuffer};
pub use grab::{ClimbMode, DesktopAim, GrabCandidate};
pub use ledge::{clearance_capsule, try_ledge_assist, LEDGE_RAY_OVERSHOOT};
pub use machine::{Climber, Release};
pub use state::{ClimbState, GrabAnchor, Hand};
pub use velocity::{fling_velocity, VelocityTracker, VELOCITY_BUFFER_LEN};
pub use world::{ClimbAgent, ClimbContext, ClimbEventSink, GeometryProbes, ProbeHit};
