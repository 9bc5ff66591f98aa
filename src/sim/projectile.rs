//! Projectile pool, firing and homing
//!
//! A fixed pool of reusable slots. Spawning picks the lowest idle slot and
//! fails silently when every slot is live; homing blends velocity toward the
//! target a little each tick so shots curve rather than snap.

use glam::Vec2;

use crate::consts::*;
use crate::sim::state::{AdversaryState, Phase, Projectile, ProjectilePool, SimEvent, SimState};

impl ProjectilePool {
    pub(crate) fn new() -> Self {
        Self {
            slots: vec![Projectile::idle(); PROJECTILE_POOL_SIZE],
        }
    }

    /// Activate the lowest idle slot, or `None` when the pool is exhausted
    pub fn spawn(&mut self, origin: Vec2, aim: Vec2, homing: bool, now_ms: f64) -> Option<usize> {
        let slot = self.slots.iter().position(|p| !p.active)?;
        let dir = aim.normalize_or_zero();
        debug_assert!(dir != Vec2::ZERO, "spawn called with a degenerate aim");
        let p = &mut self.slots[slot];
        p.pos = origin;
        p.vel = dir * PROJECTILE_SPEED;
        p.expires_at_ms = now_ms + PROJECTILE_LIFETIME_MS;
        p.homing = homing;
        p.active = true;
        Some(slot)
    }

    /// Return a slot to the pool; unknown or idle slots are a no-op
    pub fn despawn(&mut self, slot: usize) {
        if let Some(p) = self.slots.get_mut(slot) {
            p.active = false;
            p.vel = Vec2::ZERO;
        }
    }

    /// Blend every live homing shot toward the target
    ///
    /// Shots sitting on top of the target keep their velocity; steering
    /// there would be pure float noise.
    pub(crate) fn tick_homing(&mut self, target: Vec2) {
        for p in self.slots.iter_mut().filter(|p| p.active && p.homing) {
            let to_target = target - p.pos;
            if to_target.length_squared() < 0.01 {
                continue;
            }
            let desired = to_target.normalize() * PROJECTILE_SPEED;
            p.vel += (desired - p.vel) * HOMING_BLEND;
        }
    }

    /// Expire shots whose lifetime deadline has passed
    pub(crate) fn tick_lifetimes(&mut self, now_ms: f64) {
        for p in self.slots.iter_mut().filter(|p| p.active) {
            if now_ms >= p.expires_at_ms {
                p.active = false;
                p.vel = Vec2::ZERO;
            }
        }
    }

    /// Live slots with their indices
    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &Projectile)> + '_ {
        self.slots.iter().enumerate().filter(|(_, p)| p.active)
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|p| p.active).count()
    }

    pub(crate) fn deactivate_all(&mut self) {
        for p in self.slots.iter_mut() {
            p.active = false;
            p.vel = Vec2::ZERO;
        }
    }
}

/// Unit aim vector for a new shot
///
/// Points at the adversary while it is alive and not co-located with the
/// avatar; otherwise falls back to the avatar's facing so a shot always has
/// a direction.
pub fn resolve_aim(state: &SimState) -> Vec2 {
    if state.adversary.state != AdversaryState::Defeated {
        let to_target = state.adversary.pos - state.avatar.pos;
        if to_target.length_squared() >= 0.01 {
            return to_target.normalize();
        }
    }
    state.avatar.facing.unit()
}

impl SimState {
    /// Fire request from the host: rate-limit, aim, spawn
    ///
    /// The cooldown re-arms on every accepted request, even when the pool
    /// has no free slot for it.
    pub(crate) fn try_fire(&mut self) {
        debug_assert_eq!(self.phase, Phase::Combat);
        if self.clock_ms < self.fire_ready_at_ms {
            return;
        }
        self.fire_ready_at_ms = self.clock_ms + FIRE_COOLDOWN_MS;
        let aim = resolve_aim(self);
        let homing = self.rules.homing_shots;
        let Some(slot) = self
            .projectiles
            .spawn(self.avatar.pos, aim, homing, self.clock_ms)
        else {
            return;
        };
        self.push_event(SimEvent::ProjectileFired { slot });
    }
}
