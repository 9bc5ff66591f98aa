//! Collision outcome arbitration
//!
//! The host reports raw geometric facts (avatar touched the adversary, a
//! projectile hit or left the arena) and this module decides what they mean
//! under the active rules. Stale reports for a phase or state that has moved
//! on are dropped.

use glam::Vec2;

use crate::config::{ContactPolicy, DefeatPolicy};
use crate::consts::*;
use crate::sim::state::{AdversaryState, Phase, SimEvent, SimState};

impl SimState {
    /// Avatar/adversary overlap reported by the host
    ///
    /// A penalty window keeps one sustained overlap from triggering every
    /// tick; a rejected report does not extend the window.
    pub fn on_avatar_contact(&mut self) {
        if self.phase != Phase::Combat {
            return;
        }
        if self.adversary.state != AdversaryState::Pursuing {
            return;
        }
        if let Some(last) = self.adversary.last_contact_ms {
            if self.clock_ms - last < CONTACT_COOLDOWN_MS {
                return;
            }
        }
        self.adversary.last_contact_ms = Some(self.clock_ms);

        match self.rules.contact_policy {
            ContactPolicy::SoftReset => {
                self.avatar.pos = Vec2::new(AVATAR_SPAWN_X, AVATAR_SPAWN_Y);
                self.adversary.pos = Vec2::new(ADVERSARY_SPAWN_X, ADVERSARY_SPAWN_Y);
                self.adversary.vel = Vec2::ZERO;
                self.push_event(SimEvent::ContactPenalty);
                log::debug!("contact penalty, both combatants reset");
            }
            ContactPolicy::HardLoss => self.on_avatar_caught(),
        }
    }

    /// Projectile/adversary overlap reported by the host
    pub fn on_projectile_hit(&mut self, slot: usize) {
        if self.phase != Phase::Combat {
            return;
        }
        let Some(p) = self.projectiles.slots.get(slot) else {
            return;
        };
        if !p.active {
            return;
        }
        // A shot that arrives after the killing blow flies on
        if self.adversary.state == AdversaryState::Defeated || !self.adversary.collision_enabled {
            return;
        }

        self.projectiles.despawn(slot);
        debug_assert!(self.adversary.hp > 0, "live adversary with zero hp");
        self.adversary.hp = self.adversary.hp.saturating_sub(1);
        self.push_event(SimEvent::AdversaryHit {
            hp: self.adversary.hp,
        });
        if self.adversary.hp > 0 {
            return;
        }

        self.push_event(SimEvent::AdversaryDefeated);
        match self.rules.defeat_policy {
            DefeatPolicy::EndRound => {
                self.adversary.mark_defeated();
                self.on_adversary_defeated();
            }
            DefeatPolicy::RespawnInPlace => {
                let x = self.rng_state.roll_range(RESPAWN_X_MIN, RESPAWN_X_MAX);
                let y = self.rng_state.roll_range(RESPAWN_Y_MIN, RESPAWN_Y_MAX);
                self.adversary.hp = ADVERSARY_HP_MAX;
                self.adversary.pos = Vec2::new(x, y);
                self.adversary.vel = Vec2::ZERO;
                self.adversary.pop_scale(self.clock_ms);
                self.push_event(SimEvent::AdversaryRespawned);
                log::debug!("adversary respawned at ({:.0}, {:.0})", x, y);
            }
        }
    }

    /// Projectile left the arena; the slot just goes back to the pool
    pub fn on_projectile_out_of_bounds(&mut self, slot: usize) {
        self.projectiles.despawn(slot);
    }
}
