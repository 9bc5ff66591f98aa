//! Adversary motion and AI
//!
//! A three-state machine: a scripted entering descent, wander-augmented
//! pursuit, and a terminal defeated state. The descent drives position
//! directly (tween-style); pursuit only sets velocity and leaves integration
//! to the tick.

use glam::Vec2;

use crate::consts::*;
use crate::sim::state::{Adversary, AdversaryState, Facing};
use crate::{ease_back_out, ease_sine_out};

impl Adversary {
    /// Reseed for a new round: back to the descent start, full HP, collision off
    pub(crate) fn reset_for_round(&mut self) {
        self.pos = Vec2::new(ENTER_X, ENTER_START_Y);
        self.vel = Vec2::ZERO;
        self.facing = Facing::Down;
        self.hp = ADVERSARY_HP_MAX;
        self.state = AdversaryState::Entering;
        self.collision_enabled = false;
        self.visible = false;
        self.scale = 1.0;
        self.last_contact_ms = None;
        self.enter_begin_ms = 0.0;
        self.scale_rest_ms = 0.0;
    }

    /// Anchor the entering descent on the current clock (combat start)
    pub(crate) fn begin_entry(&mut self, now_ms: f64) {
        self.enter_begin_ms = now_ms;
    }

    /// Advance the entering descent; returns true on arrival
    pub(crate) fn update_entering(&mut self, now_ms: f64) -> bool {
        debug_assert_eq!(self.state, AdversaryState::Entering);
        let t = now_ms - self.enter_begin_ms;
        if t < ENTER_DELAY_MS {
            return false;
        }
        self.visible = true;
        let u = ((t - ENTER_DELAY_MS) / ENTER_DURATION_MS) as f32;
        if u < 1.0 {
            let y = ENTER_START_Y + (ENTER_END_Y - ENTER_START_Y) * ease_sine_out(u);
            self.pos = Vec2::new(ENTER_X, y);
            return false;
        }
        self.pos = Vec2::new(ENTER_X, ENTER_END_Y);
        self.state = AdversaryState::Pursuing;
        self.collision_enabled = true;
        true
    }

    /// Wander-augmented seek toward the avatar
    pub(crate) fn update_pursuit(&mut self, target: Vec2, now_ms: f64) {
        debug_assert_eq!(self.state, AdversaryState::Pursuing);
        match pursuit_steer(self.pos, target, now_ms) {
            Some(vel) => {
                self.vel = vel;
                if let Some(facing) = Facing::from_velocity(vel) {
                    self.facing = facing;
                }
            }
            // Degenerate steer: hold position and keep the last facing
            None => self.vel = Vec2::ZERO,
        }
    }

    /// One-way transition to Defeated; a second call changes nothing
    pub fn mark_defeated(&mut self) {
        if self.state == AdversaryState::Defeated {
            return;
        }
        self.state = AdversaryState::Defeated;
        self.vel = Vec2::ZERO;
        self.collision_enabled = false;
    }

    /// Arm the respawn scale pop
    pub(crate) fn pop_scale(&mut self, now_ms: f64) {
        self.scale = RESPAWN_POP_SCALE;
        self.scale_rest_ms = now_ms + RESPAWN_POP_MS;
    }

    /// Decay the respawn scale pop back to 1.0
    pub(crate) fn tick_scale(&mut self, now_ms: f64) {
        if now_ms >= self.scale_rest_ms {
            self.scale = 1.0;
            return;
        }
        let u = 1.0 - ((self.scale_rest_ms - now_ms) / RESPAWN_POP_MS) as f32;
        self.scale = RESPAWN_POP_SCALE + (1.0 - RESPAWN_POP_SCALE) * ease_back_out(u);
    }
}

/// Steering velocity for pursuit, `None` when the combined vector is degenerate
///
/// The wander term is a pure function of the monotonic clock, so pursuit
/// oscillates deterministically without touching the RNG.
pub fn pursuit_steer(from: Vec2, target: Vec2, now_ms: f64) -> Option<Vec2> {
    let mut to_target = target - from;
    let wander = Vec2::new(
        (now_ms / WANDER_PERIOD_X_MS).cos() as f32,
        (now_ms / WANDER_PERIOD_Y_MS).sin() as f32,
    );
    to_target += wander * WANDER_SCALE;

    if to_target.length_squared() > 1e-3 {
        Some(to_target.normalize() * ADVERSARY_SPEED)
    } else {
        None
    }
}
