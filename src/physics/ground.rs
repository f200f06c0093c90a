use avian3d::prelude::*;
use bevy::prelude::*;

/// Maximum angle (in radians) that counts as standing ground
pub const MAX_SLOPE_ANGLE: f32 = 0.785; // ~45 degrees

/// Distance to cast below the body for ground detection
pub const GROUND_CAST_DISTANCE: f32 = 0.1;

/// Result of a ground detection check
#[derive(Debug, Clone)]
pub struct GroundHit {
    pub point: Vec3,
    pub normal: Vec3,
    pub distance: f32,
}

/// Sphere-casts down from the bottom of a capsule body to find walkable ground
pub fn detect_ground(
    spatial_query: &SpatialQuery,
    position: Vec3,
    collider_radius: f32,
    collider_height: f32,
    ground_mask: LayerMask,
) -> Option<GroundHit> {
    // Smaller than the body so walls beside the player don't count
    let cast_radius = collider_radius * 0.5;
    let cast_shape = Collider::sphere(cast_radius);

    let capsule_bottom = position.y - collider_height / 2.0 + collider_radius;
    let cast_origin = Vec3::new(position.x, capsule_bottom, position.z);

    let filter = SpatialQueryFilter::default().with_mask(ground_mask);
    let config = ShapeCastConfig {
        max_distance: collider_radius - cast_radius + GROUND_CAST_DISTANCE,
        ..default()
    };

    let hit = spatial_query.cast_shape(
        &cast_shape,
        cast_origin,
        Quat::IDENTITY,
        Dir3::NEG_Y,
        &config,
        &filter,
    )?;

    (hit.normal1.angle_between(Vec3::Y) <= MAX_SLOPE_ANGLE).then(|| GroundHit {
        point: hit.point1,
        normal: hit.normal1,
        distance: hit.distance,
    })
}
