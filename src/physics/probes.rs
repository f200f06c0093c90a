use avian3d::prelude::*;
use bevy::prelude::*;

use crate::climbing::{GeometryProbes, ProbeHit};
use crate::player::Player;

/// Climbing geometry probes backed by Avian spatial queries.
pub struct AvianProbes<'a, 'w, 's> {
    pub spatial_query: &'a SpatialQuery<'w, 's>,
    pub surfaces: &'a Query<'w, 's, &'static GlobalTransform, Without<Player>>,
}

impl GeometryProbes for AvianProbes<'_, '_, '_> {
    fn sphere_overlap(&self, center: Vec3, radius: f32, mask: LayerMask) -> Vec<Entity> {
        let filter = SpatialQueryFilter::default().with_mask(mask);
        self.spatial_query.shape_intersections(
            &Collider::sphere(radius),
            center,
            Quat::IDENTITY,
            &filter,
        )
    }

    fn ray_cast(
        &self,
        origin: Vec3,
        direction: Dir3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<ProbeHit> {
        let filter = SpatialQueryFilter::default().with_mask(mask);
        let hit = self
            .spatial_query
            .cast_ray(origin, direction, max_distance, true, &filter)?;
        Some(ProbeHit {
            point: origin + direction * hit.distance,
            normal: hit.normal,
            surface: hit.entity,
            distance: hit.distance,
        })
    }

    fn capsule_check(&self, bottom: Vec3, top: Vec3, radius: f32, mask: LayerMask) -> bool {
        let filter = SpatialQueryFilter::default().with_mask(mask);
        let shape = Collider::capsule(radius, top.distance(bottom));
        !self
            .spatial_query
            .shape_intersections(&shape, (bottom + top) * 0.5, Quat::IDENTITY, &filter)
            .is_empty()
    }

    fn surface_transform(&self, surface: Entity) -> Option<GlobalTransform> {
        self.surfaces.get(surface).ok().copied()
    }
}
