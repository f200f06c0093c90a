use avian3d::prelude::*;

/// Collision layers for the physics simulation
#[derive(PhysicsLayer, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Player character
    Player,
    /// Static world geometry
    World,
    /// Surfaces that can be grabbed and climbed
    Climbable,
    /// Tops that ledge assist may stand the player on
    Ledge,
}
