use bevy::prelude::*;

/// Number of climbing velocity samples averaged on release
pub const VELOCITY_BUFFER_LEN: usize = 5;

/// Tracks the hand anchor while climbing and turns its motion into velocities.
///
/// Two velocities are kept apart: the climbing velocity (what the agent needs to stay on the
/// anchor) and the surface velocity (how fast the anchor itself moves, e.g. on a platform).
#[derive(Debug, Clone, Default)]
pub struct VelocityTracker {
    samples: [Vec3; VELOCITY_BUFFER_LEN],
    valid_samples: usize,
    tick: usize,
    climbing_velocity: Vec3,
    surface_velocity: Vec3,
    last_anchor: Vec3,
}

impl VelocityTracker {
    /// Starts tracking a fresh anchor. Samples from a previous climb are discarded.
    pub fn reset(&mut self, anchor: Vec3) {
        self.samples = [Vec3::ZERO; VELOCITY_BUFFER_LEN];
        self.valid_samples = 0;
        self.tick = 0;
        self.climbing_velocity = Vec3::ZERO;
        self.surface_velocity = Vec3::ZERO;
        self.last_anchor = anchor;
    }

    /// Records one tick and returns the climbing velocity the agent should adopt.
    pub fn record(&mut self, anchor: Vec3, target: Vec3, dt: f32) -> Vec3 {
        let inv_dt = 1.0 / dt;
        self.climbing_velocity = (anchor - target) * inv_dt;
        self.surface_velocity = (anchor - self.last_anchor) * inv_dt;
        self.last_anchor = anchor;

        self.samples[self.tick % VELOCITY_BUFFER_LEN] = self.climbing_velocity;
        self.tick = self.tick.wrapping_add(1);
        self.valid_samples = (self.valid_samples + 1).min(VELOCITY_BUFFER_LEN);

        self.climbing_velocity
    }

    /// Mean of the samples recorded since the last reset
    pub fn average(&self) -> Option<Vec3> {
        if self.valid_samples == 0 {
            return None;
        }
        // Until the ring wraps, valid samples occupy the front of the buffer
        let sum: Vec3 = self.samples[..self.valid_samples].iter().copied().sum();
        Some(sum / self.valid_samples as f32)
    }

    /// Velocity to give the agent when letting go.
    ///
    /// With buffering, the climbing estimate is replaced by the sample mean first. Only the
    /// part relative to the surface is capped and scaled, so a moving platform's own motion
    /// is always passed on in full.
    pub fn release_velocity(&mut self, buffered: bool, max_fling_speed: f32, multiplier: f32) -> Vec3 {
        if buffered {
            if let Some(mean) = self.average() {
                self.climbing_velocity = mean;
            }
        }
        fling_velocity(
            self.climbing_velocity,
            self.surface_velocity,
            max_fling_speed,
            multiplier,
        )
    }

    pub fn climbing_velocity(&self) -> Vec3 {
        self.climbing_velocity
    }

    pub fn surface_velocity(&self) -> Vec3 {
        self.surface_velocity
    }

    /// Anchor position seen on the most recent tick
    pub fn last_anchor(&self) -> Vec3 {
        self.last_anchor
    }
}

/// `surface + clamp(climbing - surface, max) * multiplier`
pub fn fling_velocity(climbing: Vec3, surface: Vec3, max_fling_speed: f32, multiplier: f32) -> Vec3 {
    surface + (climbing - surface).clamp_length_max(max_fling_speed) * multiplier
}
