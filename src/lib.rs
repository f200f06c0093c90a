pub mod climbing;
pub mod physics;
pub mod player;

pub use physics::PhysicsPlugin;
pub use player::PlayerPlugin;

use bevy::prelude::*;

/// Unified plugin that adds physics and the climbing player.
pub struct BevyClimbingPlugin;

impl Plugin for BevyClimbingPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<PhysicsPlugin>() {
            app.add_plugins(PhysicsPlugin);
        }
        if !app.is_plugin_added::<PlayerPlugin>() {
            app.add_plugins(PlayerPlugin);
        }
    }
}

pub mod prelude {
    pub use crate::climbing::{
        ClimbButton, ClimbEventConfig, ClimbNotification, ClimbPlatform, ClimbState, Climber,
        ClimbingConfig, DesktopConfig, Hand, InputEdge, LedgeAssistConfig, VrConfig,
        WallJumpConfig,
    };
    pub use crate::physics::{GameLayer, PhysicsPlugin};
    pub use crate::player::{
        spawn_player, ClimbHead, ClimbingSystems, ForceGrab, Grounded, HeldObjects, Player,
        PlayerBody, PlayerPlugin, ReleaseIfGrabbing, SpawnPlatform, TrackedPose,
    };
    pub use crate::BevyClimbingPlugin;
}
