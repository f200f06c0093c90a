use avian3d::prelude::*;
use bevy::prelude::*;

use super::agent::BodyAgent;
use super::input::PendingClimbInput;
use super::state::*;
use crate::climbing::{ClimbContext, Climber, ClimbingConfig, NotificationBuffer};
use crate::physics::AvianProbes;

/// Everything a climbing system reads or writes on the player
type ClimberQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static mut Climber,
        &'static ClimbingConfig,
        &'static mut PendingClimbInput,
        &'static mut Transform,
        &'static mut LinearVelocity,
        &'static mut GravityScale,
        &'static TrackedPose,
        &'static HeldObjects,
        &'static PlayerBody,
        Has<Grounded>,
    ),
    With<Player>,
>;

/// Surfaces the climber can hang from: anything with a transform that isn't a player
type SurfaceQuery<'w, 's> = Query<'w, 's, &'static GlobalTransform, Without<Player>>;

/// Runs one climbing operation for `entity` and triggers the notifications it produced.
fn run_climber<R>(
    commands: &mut Commands,
    probes: &AvianProbes,
    climbers: &mut ClimberQuery,
    entity: Entity,
    operation: impl FnOnce(&mut Climber, &mut PendingClimbInput, &mut ClimbContext) -> R,
) -> Option<R> {
    let Ok((
        entity,
        mut climber,
        config,
        mut pending,
        mut transform,
        mut velocity,
        mut gravity_scale,
        pose,
        held,
        body,
        grounded,
    )) = climbers.get_mut(entity)
    else {
        return None;
    };

    let mut agent = BodyAgent {
        transform: &mut transform,
        velocity: &mut velocity,
        gravity_scale: &mut gravity_scale,
        pose,
        held,
        grounded,
        height: body.height,
    };
    let mut events = NotificationBuffer::new(entity);
    let result = {
        let mut ctx = ClimbContext {
            config,
            probes,
            agent: &mut agent,
            events: &mut events,
        };
        operation(&mut climber, &mut pending, &mut ctx)
    };

    for notification in events.drain() {
        commands.trigger(notification);
    }
    Some(result)
}

/// Feeds queued button edges to each climber, in the order they arrived
pub fn dispatch_climb_input(
    mut commands: Commands,
    spatial_query: SpatialQuery,
    surfaces: SurfaceQuery,
    mut climbers: ClimberQuery,
) {
    let probes = AvianProbes {
        spatial_query: &spatial_query,
        surfaces: &surfaces,
    };
    let entities: Vec<Entity> = climbers
        .iter()
        .filter(|(_, _, _, pending, ..)| !pending.is_empty())
        .map(|(entity, ..)| entity)
        .collect();

    for entity in entities {
        run_climber(&mut commands, &probes, &mut climbers, entity, |climber, pending, ctx| {
            for edge in pending.drain(..) {
                climber.handle_input(edge, ctx);
            }
        });
    }
}

/// Moves climbing players onto their anchors and records velocity samples.
///
/// Runs last in the climbing set so the commanded velocity reflects the final hand position.
pub fn track_climbing(
    mut commands: Commands,
    spatial_query: SpatialQuery,
    surfaces: SurfaceQuery,
    mut climbers: ClimberQuery,
    time: Res<Time>,
) {
    let dt = time.delta_secs();
    let probes = AvianProbes {
        spatial_query: &spatial_query,
        surfaces: &surfaces,
    };
    let entities: Vec<Entity> = climbers
        .iter()
        .filter(|(_, climber, ..)| climber.is_climbing())
        .map(|(entity, ..)| entity)
        .collect();

    for entity in entities {
        run_climber(&mut commands, &probes, &mut climbers, entity, |climber, _, ctx| {
            climber.tick(dt, ctx);
        });
    }
}

/// Handles [`ForceGrab`] requests from gameplay code
pub fn handle_force_grab(
    trigger: On<ForceGrab>,
    mut commands: Commands,
    spatial_query: SpatialQuery,
    surfaces: SurfaceQuery,
    mut climbers: ClimberQuery,
) {
    let probes = AvianProbes {
        spatial_query: &spatial_query,
        surfaces: &surfaces,
    };
    let request = trigger.event();
    let grabbed = run_climber(&mut commands, &probes, &mut climbers, request.entity, |climber, _, ctx| {
        climber.force_grab(request.surface, request.hand, request.offset, ctx)
    });
    if grabbed == Some(false) {
        debug!("force grab of {} failed, surface has no transform", request.surface);
    }
}

/// Handles [`ReleaseIfGrabbing`] requests from gameplay code
pub fn handle_release_if_grabbing(
    trigger: On<ReleaseIfGrabbing>,
    mut commands: Commands,
    spatial_query: SpatialQuery,
    surfaces: SurfaceQuery,
    mut climbers: ClimberQuery,
) {
    let probes = AvianProbes {
        spatial_query: &spatial_query,
        surfaces: &surfaces,
    };
    let request = trigger.event();
    run_climber(&mut commands, &probes, &mut climbers, request.entity, |climber, _, ctx| {
        climber.release_grabbed_if_current(request.surface, ctx)
    });
}

/// Warns about climbing configurations that can't work well
pub fn validate_climbing_config(add: On<Add, ClimbingConfig>, query: Query<&ClimbingConfig>) {
    let Ok(config) = query.get(add.entity) else {
        return;
    };
    if let Err(err) = config.validate() {
        warn!("invalid climbing config on {}: {err}", add.entity);
    }
}
