//! Climbing scenarios driven through fake probes, agent and event sink.

use std::collections::HashMap;

use avian3d::prelude::LayerMask;
use bevy::prelude::*;

use super::*;

// -----------------------------------------------------------------------------
// Fakes
// -----------------------------------------------------------------------------

#[derive(Default)]
struct FakeProbes {
    overlaps: Vec<Entity>,
    ray_hit: Option<ProbeHit>,
    obstructed: bool,
    surfaces: HashMap<Entity, GlobalTransform>,
}

impl GeometryProbes for FakeProbes {
    fn sphere_overlap(&self, _: Vec3, _: f32, _: LayerMask) -> Vec<Entity> {
        self.overlaps.clone()
    }

    fn ray_cast(&self, _: Vec3, _: Dir3, max_distance: f32, _: LayerMask) -> Option<ProbeHit> {
        self.ray_hit.filter(|hit| hit.distance <= max_distance)
    }

    fn capsule_check(&self, _: Vec3, _: Vec3, _: f32, _: LayerMask) -> bool {
        self.obstructed
    }

    fn surface_transform(&self, surface: Entity) -> Option<GlobalTransform> {
        self.surfaces.get(&surface).copied()
    }
}

struct FakeAgent {
    velocity: Vec3,
    velocity_commands: usize,
    gravity_scale: f32,
    teleported_to: Option<Vec3>,
    grounded: bool,
    held_right: Option<Entity>,
    left_hand: Vec3,
    right_hand: Vec3,
    head: Vec3,
    forward: Dir3,
}

impl Default for FakeAgent {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            velocity_commands: 0,
            gravity_scale: 1.0,
            teleported_to: None,
            grounded: false,
            held_right: None,
            left_hand: Vec3::new(-0.3, 1.0, 0.0),
            right_hand: Vec3::new(0.0, 1.0, 0.0),
            head: Vec3::new(0.0, 1.5, 0.0),
            forward: Dir3::NEG_Z,
        }
    }
}

impl ClimbAgent for FakeAgent {
    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
        self.velocity_commands += 1;
    }

    fn set_gravity_scale(&mut self, scale: f32) {
        self.gravity_scale = scale;
    }

    fn teleport_to(&mut self, position: Vec3, _: Quat) {
        self.teleported_to = Some(position);
    }

    fn rotation(&self) -> Quat {
        Quat::IDENTITY
    }

    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn held_object(&self, hand: Hand) -> Option<Entity> {
        match hand {
            Hand::Left => None,
            Hand::Right => self.held_right,
        }
    }

    fn hand_position(&self, hand: Hand) -> Vec3 {
        match hand {
            Hand::Left => self.left_hand,
            Hand::Right => self.right_hand,
        }
    }

    fn head_pose(&self) -> (Vec3, Dir3) {
        (self.head, self.forward)
    }
}

#[derive(Default)]
struct Recorder(Vec<(String, Entity)>);

impl ClimbEventSink for Recorder {
    fn notify(&mut self, event: &str, target: Entity) {
        self.0.push((event.to_owned(), target));
    }
}

struct Harness {
    world: World,
    config: ClimbingConfig,
    probes: FakeProbes,
    agent: FakeAgent,
    events: Recorder,
    climber: Climber,
}

impl Harness {
    fn new(platform: ClimbPlatform) -> Self {
        Self {
            world: World::new(),
            config: ClimbingConfig {
                platform,
                ..default()
            },
            probes: FakeProbes::default(),
            agent: FakeAgent::default(),
            events: Recorder::default(),
            climber: Climber::new(platform),
        }
    }

    fn surface_at(&mut self, position: Vec3) -> Entity {
        let surface = self.world.spawn_empty().id();
        self.probes
            .surfaces
            .insert(surface, GlobalTransform::from_translation(position));
        surface
    }

    fn move_surface(&mut self, surface: Entity, position: Vec3) {
        self.probes
            .surfaces
            .insert(surface, GlobalTransform::from_translation(position));
    }

    fn run<R>(&mut self, f: impl FnOnce(&mut Climber, &mut ClimbContext) -> R) -> R {
        let mut ctx = ClimbContext {
            config: &self.config,
            probes: &self.probes,
            agent: &mut self.agent,
            events: &mut self.events,
        };
        f(&mut self.climber, &mut ctx)
    }

    fn input(&mut self, edge: InputEdge) {
        self.run(|climber, ctx| climber.handle_input(edge, ctx));
    }

    fn tick(&mut self, dt: f32) {
        self.run(|climber, ctx| climber.tick(dt, ctx));
    }

    fn names(&self) -> Vec<&str> {
        self.events.0.iter().map(|(name, _)| name.as_str()).collect()
    }
}

fn assert_close(a: Vec3, b: Vec3) {
    assert!((a - b).length() < 1e-3, "{a} != {b}");
}

fn desktop_hit(surface: Entity, distance: f32) -> ProbeHit {
    ProbeHit {
        point: Vec3::new(0.0, 1.5, -distance),
        normal: Vec3::Z,
        surface,
        distance,
    }
}

// -----------------------------------------------------------------------------
// State invariants
// -----------------------------------------------------------------------------

#[test]
fn test_climbing_iff_exactly_one_hand() {
    let mut h = Harness::new(ClimbPlatform::Vr);
    let wall = h.surface_at(Vec3::ZERO);
    h.probes.overlaps = vec![wall];

    assert!(!h.climber.is_climbing_with_hand(Hand::Left));
    assert!(!h.climber.is_climbing_with_hand(Hand::Right));
    assert!(h.climber.state().anchor().is_none());

    assert!(h.run(|c, ctx| c.grab(Hand::Left, ctx)));
    assert!(h.climber.is_climbing());
    assert!(h.climber.state().anchor().is_some());
    assert!(h.climber.is_climbing_with_hand(Hand::Left));
    assert!(!h.climber.is_climbing_with_hand(Hand::Right));
    assert!(h.climber.is_grabbing(wall));
}

#[test]
fn test_grab_miss_changes_nothing() {
    let mut h = Harness::new(ClimbPlatform::Vr);
    assert!(!h.run(|c, ctx| c.grab(Hand::Right, ctx)));
    assert_eq!(*h.climber.state(), ClimbState::Idle);
    assert!(h.events.0.is_empty());
    assert_eq!(h.agent.velocity_commands, 0);
}

#[test]
fn test_release_while_idle_is_noop() {
    let mut h = Harness::new(ClimbPlatform::Vr);
    assert!(!h.run(|c, ctx| c.release(ctx)));
    assert!(!h.run(|c, ctx| c.release_with_boost(Vec3::Y * 5.0, ctx)));
    assert_eq!(h.agent.velocity_commands, 0);
    assert!(h.events.0.is_empty());
    assert_eq!(*h.climber.state(), ClimbState::Idle);
}

// -----------------------------------------------------------------------------
// Release velocity
// -----------------------------------------------------------------------------

#[test]
fn test_stationary_grab_release_is_zero() {
    let mut h = Harness::new(ClimbPlatform::Vr);
    h.config.velocity_buffer = false;
    let wall = h.surface_at(Vec3::ZERO);
    h.probes.overlaps = vec![wall];

    h.run(|c, ctx| c.grab(Hand::Right, ctx));
    h.run(|c, ctx| c.release(ctx));

    assert_eq!(h.agent.velocity, Vec3::ZERO);
    assert!(!h.climber.is_climbing());
}

#[test]
fn test_buffered_release_averages_samples() {
    let mut h = Harness::new(ClimbPlatform::Vr);
    h.config.vr.max_fling_speed = 100.0;
    h.config.vr.fling_multiplier = 1.0;
    let wall = h.surface_at(Vec3::ZERO);
    h.probes.overlaps = vec![wall];
    h.run(|c, ctx| c.grab(Hand::Right, ctx));

    let dt = 0.5;
    for i in 1..=5 {
        // Hand drifts so the climbing velocity is (i, 0, 0)
        h.agent.right_hand = Vec3::new(-(i as f32) * dt, 1.0, 0.0);
        h.tick(dt);
        assert_close(h.agent.velocity, Vec3::new(i as f32, 0.0, 0.0));
    }

    h.run(|c, ctx| c.release(ctx));
    assert_close(h.agent.velocity, Vec3::new(3.0, 0.0, 0.0));
}

#[test]
fn test_early_release_ignores_previous_climb() {
    let mut h = Harness::new(ClimbPlatform::Vr);
    h.config.vr.max_fling_speed = 100.0;
    h.config.vr.fling_multiplier = 1.0;
    let wall = h.surface_at(Vec3::ZERO);
    h.probes.overlaps = vec![wall];

    h.run(|c, ctx| c.grab(Hand::Right, ctx));
    h.agent.right_hand = Vec3::new(-5.0, 1.0, 0.0);
    for _ in 0..5 {
        h.tick(1.0);
    }
    h.run(|c, ctx| c.release(ctx));

    h.agent.right_hand = Vec3::new(0.0, 1.0, 0.0);
    h.run(|c, ctx| c.grab(Hand::Right, ctx));
    h.agent.right_hand = Vec3::new(0.0, 0.0, 0.0);
    h.tick(1.0);
    h.run(|c, ctx| c.release(ctx));

    assert_close(h.agent.velocity, Vec3::new(0.0, 1.0, 0.0));
}

#[test]
fn test_fling_is_capped_relative_to_moving_surface() {
    let mut h = Harness::new(ClimbPlatform::Vr);
    h.config.velocity_buffer = false;
    let platform = h.surface_at(Vec3::ZERO);
    h.probes.overlaps = vec![platform];
    h.run(|c, ctx| c.grab(Hand::Right, ctx));

    let dt = 0.1;
    h.move_surface(platform, Vec3::new(0.0, 0.0, 0.3));
    h.agent.right_hand = Vec3::new(-5.0, 1.0, 0.3);
    h.tick(dt);

    let surface = Vec3::new(0.0, 0.0, 3.0);
    let climbing = Vec3::new(50.0, 0.0, 0.0);
    assert_close(h.climber.tracker().surface_velocity(), surface);
    assert_close(h.climber.tracker().climbing_velocity(), climbing);

    h.run(|c, ctx| c.release(ctx));
    let expected = surface + (climbing - surface).normalize() * 6.0 * 1.2;
    assert_close(h.agent.velocity, expected);
}

#[test]
fn test_riding_a_moving_surface_carries_its_velocity() {
    let mut h = Harness::new(ClimbPlatform::Vr);
    let platform = h.surface_at(Vec3::ZERO);
    h.probes.overlaps = vec![platform];
    h.run(|c, ctx| c.grab(Hand::Right, ctx));

    // Hand stays where it was, platform slides along x
    h.move_surface(platform, Vec3::new(0.2, 0.0, 0.0));
    h.tick(0.1);
    assert_close(h.agent.velocity, Vec3::new(2.0, 0.0, 0.0));
    assert_close(h.climber.tracker().surface_velocity(), Vec3::new(2.0, 0.0, 0.0));
}

#[test]
fn test_wall_jump_adds_boost() {
    let mut h = Harness::new(ClimbPlatform::Vr);
    h.config.velocity_buffer = false;
    let wall = h.surface_at(Vec3::ZERO);
    h.probes.overlaps = vec![wall];
    h.run(|c, ctx| c.grab(Hand::Right, ctx));

    h.input(InputEdge::press(ClimbButton::Jump, None));
    assert!(!h.climber.is_climbing());
    assert_close(h.agent.velocity, Vec3::new(0.0, 5.0, 0.0));
}

#[test]
fn test_wall_jump_disabled_keeps_climbing() {
    let mut h = Harness::new(ClimbPlatform::Vr);
    h.config.wall_jump.enabled = false;
    let wall = h.surface_at(Vec3::ZERO);
    h.probes.overlaps = vec![wall];
    h.run(|c, ctx| c.grab(Hand::Right, ctx));

    h.input(InputEdge::press(ClimbButton::Jump, None));
    assert!(h.climber.is_climbing());
}

// -----------------------------------------------------------------------------
// VR
// -----------------------------------------------------------------------------

#[test]
fn test_vr_scenario_grab_track_release() {
    let mut h = Harness::new(ClimbPlatform::Vr);
    h.config.velocity_buffer = false;
    let wall = h.surface_at(Vec3::ZERO);
    h.probes.overlaps = vec![wall];
    h.agent.right_hand = Vec3::new(0.0, 1.0, 0.0);

    h.input(InputEdge::press(ClimbButton::Grab, Some(Hand::Right)));
    assert!(h.climber.is_climbing_with_hand(Hand::Right));

    // Pulling the hand down climbs the body up
    h.agent.right_hand = Vec3::new(0.0, 0.9, 0.0);
    h.tick(0.1);
    assert_close(h.agent.velocity, Vec3::new(0.0, 1.0, 0.0));

    h.input(InputEdge::release(ClimbButton::Grab, Some(Hand::Right)));
    assert!(!h.climber.is_climbing());
    assert_close(h.agent.velocity, Vec3::new(0.0, 1.2, 0.0));
}

#[test]
fn test_vr_grab_keeps_hand_in_place() {
    let mut h = Harness::new(ClimbPlatform::Vr);
    let wall = h.surface_at(Vec3::new(1.0, 0.0, 0.0));
    h.probes.overlaps = vec![wall];
    h.agent.left_hand = Vec3::new(0.7, 1.2, 0.1);

    h.run(|c, ctx| c.grab(Hand::Left, ctx));
    let anchor = *h.climber.state().anchor().unwrap();
    assert_close(anchor.local_offset, Vec3::new(-0.3, 1.2, 0.1));
    assert_close(h.climber.tracker().last_anchor(), h.agent.left_hand);
}

#[test]
fn test_vr_first_overlap_wins() {
    let mut h = Harness::new(ClimbPlatform::Vr);
    let first = h.surface_at(Vec3::ZERO);
    let second = h.surface_at(Vec3::ONE);
    h.probes.overlaps = vec![first, second];

    h.run(|c, ctx| c.grab(Hand::Right, ctx));
    assert!(h.climber.is_grabbing(first));
}

#[test]
fn test_vr_ignores_unbound_button() {
    let mut h = Harness::new(ClimbPlatform::Vr);
    let wall = h.surface_at(Vec3::ZERO);
    h.probes.overlaps = vec![wall];

    h.input(InputEdge::press(ClimbButton::Use, Some(Hand::Right)));
    assert!(!h.climber.is_climbing());

    h.config.vr.use_grip_buttons = false;
    h.input(InputEdge::press(ClimbButton::Grab, Some(Hand::Right)));
    assert!(!h.climber.is_climbing());
    h.input(InputEdge::press(ClimbButton::Use, Some(Hand::Right)));
    assert!(h.climber.is_climbing_with_hand(Hand::Right));
}

#[test]
fn test_vr_drop_button_is_ignored() {
    let mut h = Harness::new(ClimbPlatform::Vr);
    let wall = h.surface_at(Vec3::ZERO);
    h.probes.overlaps = vec![wall];
    h.run(|c, ctx| c.grab(Hand::Right, ctx));

    h.input(InputEdge::release(ClimbButton::Drop, Some(Hand::Right)));
    assert!(h.climber.is_climbing());
}

#[test]
fn test_vr_other_hand_release_keeps_climbing() {
    let mut h = Harness::new(ClimbPlatform::Vr);
    let wall = h.surface_at(Vec3::ZERO);
    h.probes.overlaps = vec![wall];
    h.input(InputEdge::press(ClimbButton::Grab, Some(Hand::Left)));

    h.input(InputEdge::release(ClimbButton::Grab, Some(Hand::Right)));
    assert!(h.climber.is_climbing_with_hand(Hand::Left));
}

#[test]
fn test_vr_hand_swap_moves_the_climb() {
    let mut h = Harness::new(ClimbPlatform::Vr);
    let wall = h.surface_at(Vec3::ZERO);
    h.probes.overlaps = vec![wall];
    h.input(InputEdge::press(ClimbButton::Grab, Some(Hand::Left)));
    h.input(InputEdge::press(ClimbButton::Grab, Some(Hand::Right)));

    assert!(h.climber.is_climbing_with_hand(Hand::Right));
    assert!(!h.climber.is_climbing_with_hand(Hand::Left));

    // Letting go with the old hand no longer matters
    h.input(InputEdge::release(ClimbButton::Grab, Some(Hand::Left)));
    assert!(h.climber.is_climbing());
}

#[test]
fn test_vr_release_uses_ledge_assist() {
    let mut h = Harness::new(ClimbPlatform::Vr);
    h.config.ledge_assist.enabled = true;
    let ledge = h.surface_at(Vec3::ZERO);
    h.probes.overlaps = vec![ledge];
    h.input(InputEdge::press(ClimbButton::Grab, Some(Hand::Right)));

    let top = Vec3::new(0.0, 1.0, -0.2);
    h.probes.ray_hit = Some(ProbeHit {
        point: top,
        normal: Vec3::Y,
        surface: ledge,
        distance: 0.6,
    });
    h.input(InputEdge::release(ClimbButton::Grab, Some(Hand::Right)));

    assert!(!h.climber.is_climbing());
    assert_eq!(h.agent.teleported_to, Some(top));
    assert_eq!(h.agent.velocity, Vec3::ZERO);
    assert_eq!(h.names(), ["ClimbingGrabbed", "ClimbingDropped"]);
}

#[test]
fn test_vr_blocked_ledge_falls_back_to_fling() {
    let mut h = Harness::new(ClimbPlatform::Vr);
    h.config.ledge_assist.enabled = true;
    let ledge = h.surface_at(Vec3::ZERO);
    h.probes.overlaps = vec![ledge];
    h.probes.obstructed = true;
    h.probes.ray_hit = Some(ProbeHit {
        point: Vec3::new(0.0, 1.0, -0.2),
        normal: Vec3::Y,
        surface: ledge,
        distance: 0.6,
    });
    h.input(InputEdge::press(ClimbButton::Grab, Some(Hand::Right)));
    h.input(InputEdge::release(ClimbButton::Grab, Some(Hand::Right)));

    assert!(!h.climber.is_climbing());
    assert!(h.agent.teleported_to.is_none());
}

// -----------------------------------------------------------------------------
// Desktop
// -----------------------------------------------------------------------------

#[test]
fn test_desktop_scenario_hang_distance_relaxes() {
    let mut h = Harness::new(ClimbPlatform::Desktop);
    let wall = h.surface_at(Vec3::new(0.0, 0.0, -1.5));
    h.probes.ray_hit = Some(desktop_hit(wall, 1.5));

    h.input(InputEdge::press(ClimbButton::Use, None));
    assert!(h.climber.is_climbing_with_hand(Hand::Right));

    let aim = *h.climber.mode().desktop_aim().unwrap();
    assert!((aim.hang_distance - 1.5).abs() < 1e-5);
    assert!(aim.primary_held);

    let mut previous = aim.hang_distance;
    for _ in 0..10 {
        h.tick(0.1);
        let distance = h.climber.mode().desktop_aim().unwrap().hang_distance;
        assert!(distance <= previous);
        assert!(distance >= 0.5);
        previous = distance;
    }
    assert!((previous - 0.5).abs() < 1e-5);
}

#[test]
fn test_desktop_grab_snaps_to_hit_point() {
    let mut h = Harness::new(ClimbPlatform::Desktop);
    h.config.desktop.resting_distance = 1.5;
    let wall = h.surface_at(Vec3::new(0.0, 0.0, -1.5));
    h.probes.ray_hit = Some(desktop_hit(wall, 1.5));

    h.input(InputEdge::press(ClimbButton::Use, None));
    // First tick: hand target sits on the hit point, nothing to climb toward
    h.tick(0.1);
    assert_close(h.agent.velocity, Vec3::ZERO);
    assert_close(h.climber.tracker().last_anchor(), Vec3::new(0.0, 1.5, -1.5));
}

#[test]
fn test_desktop_ray_beyond_reach_misses() {
    let mut h = Harness::new(ClimbPlatform::Desktop);
    let wall = h.surface_at(Vec3::ZERO);
    h.probes.ray_hit = Some(desktop_hit(wall, 2.5));

    h.input(InputEdge::press(ClimbButton::Use, None));
    assert!(!h.climber.is_climbing());
    assert!(!h.climber.mode().desktop_aim().unwrap().primary_held);
}

#[test]
fn test_desktop_hit_without_transform_leaves_aim_alone() {
    let mut h = Harness::new(ClimbPlatform::Desktop);
    let despawned = h.world.spawn_empty().id();
    h.probes.ray_hit = Some(desktop_hit(despawned, 1.5));

    let grabbed = h.run(|climber, ctx| climber.grab(Hand::Right, ctx));
    assert!(!grabbed);
    assert!(!h.climber.is_climbing());
    assert_eq!(*h.climber.mode().desktop_aim().unwrap(), DesktopAim::default());
    assert!(h.events.0.is_empty());
}

#[test]
fn test_desktop_aim_follows_head_only_while_held() {
    let mut h = Harness::new(ClimbPlatform::Desktop);
    let wall = h.surface_at(Vec3::new(0.0, 0.0, -1.5));
    h.probes.ray_hit = Some(desktop_hit(wall, 1.5));
    h.input(InputEdge::press(ClimbButton::Use, None));

    h.agent.forward = Dir3::NEG_X;
    h.tick(0.1);
    assert_close(h.climber.mode().desktop_aim().unwrap().direction, Vec3::NEG_X);

    // Let go of the primary button mid-air: still hanging, aim frozen
    h.input(InputEdge::release(ClimbButton::Use, None));
    assert!(h.climber.is_climbing());
    h.agent.forward = Dir3::Y;
    h.tick(0.1);
    assert_close(h.climber.mode().desktop_aim().unwrap().direction, Vec3::NEG_X);
}

#[test]
fn test_desktop_grounded_release_resets_velocity() {
    let mut h = Harness::new(ClimbPlatform::Desktop);
    let wall = h.surface_at(Vec3::new(0.0, 0.0, -1.5));
    h.probes.ray_hit = Some(desktop_hit(wall, 1.5));
    h.input(InputEdge::press(ClimbButton::Use, None));

    h.agent.head = Vec3::new(0.0, 1.0, 0.0);
    h.tick(0.1);
    assert!(h.agent.velocity.length() > 0.0);

    h.agent.grounded = true;
    h.input(InputEdge::release(ClimbButton::Use, None));
    assert!(!h.climber.is_climbing());
    assert_eq!(h.agent.velocity, Vec3::ZERO);
}

#[test]
fn test_desktop_midair_release_with_ledge_assist_teleports() {
    let mut h = Harness::new(ClimbPlatform::Desktop);
    h.config.ledge_assist.enabled = true;
    let ledge = h.surface_at(Vec3::new(0.0, 0.0, -1.5));
    h.probes.ray_hit = Some(ProbeHit {
        point: Vec3::new(0.0, 1.5, -1.5),
        normal: Vec3::Y,
        surface: ledge,
        distance: 1.5,
    });
    h.input(InputEdge::press(ClimbButton::Use, None));
    h.input(InputEdge::release(ClimbButton::Use, None));

    assert!(!h.climber.is_climbing());
    assert_eq!(h.agent.teleported_to, Some(Vec3::new(0.0, 1.5, -1.5)));
}

#[test]
fn test_desktop_right_click_releases_without_pickup() {
    let mut h = Harness::new(ClimbPlatform::Desktop);
    let wall = h.surface_at(Vec3::new(0.0, 0.0, -1.5));
    h.probes.ray_hit = Some(desktop_hit(wall, 1.5));
    h.input(InputEdge::press(ClimbButton::Use, None));

    h.agent.held_right = Some(h.world.spawn_empty().id());
    h.input(InputEdge::press(ClimbButton::Drop, None));
    h.input(InputEdge::release(ClimbButton::Drop, None));
    assert!(h.climber.is_climbing());

    h.agent.held_right = None;
    h.input(InputEdge::press(ClimbButton::Drop, None));
    assert!(h.climber.is_climbing());
    h.input(InputEdge::release(ClimbButton::Drop, None));
    assert!(!h.climber.is_climbing());
}

#[test]
fn test_desktop_ignores_grip_button() {
    let mut h = Harness::new(ClimbPlatform::Desktop);
    let wall = h.surface_at(Vec3::new(0.0, 0.0, -1.5));
    h.probes.ray_hit = Some(desktop_hit(wall, 1.5));

    h.input(InputEdge::press(ClimbButton::Grab, Some(Hand::Left)));
    assert!(!h.climber.is_climbing());
}

// -----------------------------------------------------------------------------
// Notifications and external operations
// -----------------------------------------------------------------------------

#[test]
fn test_regrab_drops_old_surface_then_grabs_new() {
    let mut h = Harness::new(ClimbPlatform::Vr);
    let old = h.surface_at(Vec3::ZERO);
    let new = h.surface_at(Vec3::new(0.0, 2.0, 0.0));
    h.probes.overlaps = vec![old];
    h.run(|c, ctx| c.grab(Hand::Left, ctx));
    h.events.0.clear();

    h.probes.overlaps = vec![new];
    h.run(|c, ctx| c.grab(Hand::Right, ctx));

    assert_eq!(
        h.events.0,
        vec![
            ("ClimbingDropped".to_string(), old),
            ("ClimbingGrabbed".to_string(), new),
        ]
    );
    assert!(h.climber.is_grabbing(new));
}

#[test]
fn test_listeners_receive_every_notification() {
    let mut h = Harness::new(ClimbPlatform::Vr);
    let listener = h.world.spawn_empty().id();
    h.config.events.targets = vec![listener];
    h.config.events.send_to_climbed = false;
    let wall = h.surface_at(Vec3::ZERO);
    h.probes.overlaps = vec![wall];

    h.run(|c, ctx| c.grab(Hand::Right, ctx));
    h.run(|c, ctx| c.release(ctx));

    assert_eq!(
        h.events.0,
        vec![
            ("ClimbingGrabbed".to_string(), listener),
            ("ClimbingDropped".to_string(), listener),
        ]
    );
}

#[test]
fn test_force_grab_anchors_at_offset() {
    let mut h = Harness::new(ClimbPlatform::Vr);
    let bar = h.surface_at(Vec3::new(1.0, 2.0, 0.0));

    assert!(h.run(|c, ctx| c.force_grab(bar, Hand::Left, Vec3::new(0.0, 0.5, 0.0), ctx)));
    assert!(h.climber.is_climbing_with_hand(Hand::Left));
    assert_close(h.climber.tracker().last_anchor(), Vec3::new(1.0, 2.5, 0.0));
    assert_eq!(h.names(), ["ClimbingGrabbed"]);
}

#[test]
fn test_force_grab_unknown_surface_fails() {
    let mut h = Harness::new(ClimbPlatform::Vr);
    let ghost = h.world.spawn_empty().id();
    assert!(!h.run(|c, ctx| c.force_grab(ghost, Hand::Left, Vec3::ZERO, ctx)));
    assert!(!h.climber.is_climbing());
}

#[test]
fn test_release_grabbed_if_current() {
    let mut h = Harness::new(ClimbPlatform::Vr);
    let wall = h.surface_at(Vec3::ZERO);
    let other = h.surface_at(Vec3::ONE);
    h.probes.overlaps = vec![wall];
    h.run(|c, ctx| c.grab(Hand::Right, ctx));

    assert!(!h.run(|c, ctx| c.release_grabbed_if_current(other, ctx)));
    assert!(h.climber.is_climbing());
    assert!(h.run(|c, ctx| c.release_grabbed_if_current(wall, ctx)));
    assert!(!h.climber.is_climbing());
}

#[test]
fn test_gravity_override_round_trip() {
    let mut h = Harness::new(ClimbPlatform::Vr);
    h.config.gravity_override = true;
    let wall = h.surface_at(Vec3::ZERO);
    h.probes.overlaps = vec![wall];

    h.run(|c, ctx| c.grab(Hand::Right, ctx));
    assert_eq!(h.agent.gravity_scale, 0.0);
    h.run(|c, ctx| c.release(ctx));
    assert_eq!(h.agent.gravity_scale, 1.0);
}

#[test]
fn test_vanished_surface_releases_on_tick() {
    let mut h = Harness::new(ClimbPlatform::Vr);
    let wall = h.surface_at(Vec3::ZERO);
    h.probes.overlaps = vec![wall];
    h.run(|c, ctx| c.grab(Hand::Right, ctx));

    h.probes.surfaces.remove(&wall);
    h.tick(0.1);
    assert!(!h.climber.is_climbing());
    assert_eq!(h.names(), ["ClimbingGrabbed", "ClimbingDropped"]);
}

#[test]
fn test_zero_dt_tick_is_skipped() {
    let mut h = Harness::new(ClimbPlatform::Vr);
    let wall = h.surface_at(Vec3::ZERO);
    h.probes.overlaps = vec![wall];
    h.run(|c, ctx| c.grab(Hand::Right, ctx));

    h.tick(0.0);
    assert_eq!(h.agent.velocity_commands, 0);
}
