mod agent;
mod climb;
pub mod input;
mod plugin;
mod pose;
mod state;

pub use agent::BodyAgent;
pub use input::{LookInput, PendingClimbInput};
pub use plugin::{spawn_player, ClimbingSystems, PlayerPlugin};
pub use state::*;
