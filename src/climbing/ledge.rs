use bevy::prelude::*;

use super::config::LedgeAssistConfig;
use super::world::GeometryProbes;

/// How far past the anchor the ledge ray keeps going
pub const LEDGE_RAY_OVERSHOOT: f32 = 0.25;

/// Looks for a flat, unobstructed ledge to stand on instead of flinging.
///
/// The ray goes from the head toward the last tracked anchor position (not the live hand) and
/// a little beyond it. The hit must face up within `max_angle` (strictly) and a capsule
/// standing on the hit point must be clear. Returns the stand-on point.
pub fn try_ledge_assist(
    head: Vec3,
    anchor: Vec3,
    config: &LedgeAssistConfig,
    probes: &dyn GeometryProbes,
) -> Option<Vec3> {
    let to_anchor = anchor - head;
    let direction = Dir3::new(to_anchor).ok()?;
    let max_distance = to_anchor.length() + LEDGE_RAY_OVERSHOOT;

    let hit = probes.ray_cast(head, direction, max_distance, config.mask)?;

    // Walls and steep slopes aren't ledges
    if hit.normal.angle_between(Vec3::Y) >= config.max_angle {
        return None;
    }

    let (bottom, top) = clearance_capsule(hit.point, config);
    if probes.capsule_check(bottom, top, config.capsule_radius, config.obstruction_mask) {
        return None;
    }

    Some(hit.point)
}

/// Segment endpoints of the clearance capsule standing on `point`
pub fn clearance_capsule(point: Vec3, config: &LedgeAssistConfig) -> (Vec3, Vec3) {
    let base = point + Vec3::Y * config.capsule_margin;
    let bottom = base + Vec3::Y * config.capsule_radius;
    let top = base + Vec3::Y * (config.capsule_height - config.capsule_radius).max(config.capsule_radius);
    (bottom, top)
}
