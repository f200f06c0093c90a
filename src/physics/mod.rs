mod ground;
mod layers;
mod plugin;
mod probes;

pub use ground::*;
pub use layers::GameLayer;
pub use plugin::PhysicsPlugin;
pub use probes::AvianProbes;
