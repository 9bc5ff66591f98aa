//! Round lifecycle
//!
//! Phase transitions gate everything else: no entity updates, spawning, or
//! damage outside Combat. All timed behavior is a deadline compared against
//! the monotonic clock.

use glam::Vec2;

use crate::consts::*;
use crate::sim::state::{Avatar, Phase, SimEvent, SimState};

impl SimState {
    /// Start (or restart) a round
    ///
    /// Valid from `AwaitingStart` and both resolved phases; a no-op mid-round.
    /// Fully reseeds the avatar, the adversary, and the projectile pool, then
    /// arms the countdown. No deadline armed before this call survives it.
    pub fn begin_round(&mut self) {
        match self.phase {
            Phase::AwaitingStart | Phase::RoundWon | Phase::RoundLost => {}
            Phase::Countdown | Phase::Combat => return,
        }

        self.avatar = Avatar::spawn();
        self.avatar.visible = true;
        self.adversary.reset_for_round();
        self.projectiles.deactivate_all();
        self.fire_ready_at_ms = 0.0;

        self.countdown_deadline_ms = self.clock_ms + COUNTDOWN_MS;
        self.countdown_display = (COUNTDOWN_MS / 1000.0).ceil() as u32;
        self.phase = Phase::Countdown;
        self.push_event(SimEvent::RoundStarted);
        self.push_event(SimEvent::CountdownTick {
            seconds_left: self.countdown_display,
        });
        log::info!("round started, countdown from {}", self.countdown_display);
    }

    /// Advance the countdown; flips to Combat when the deadline passes
    pub(crate) fn tick_countdown(&mut self) {
        debug_assert_eq!(self.phase, Phase::Countdown);
        let remaining = self.countdown_deadline_ms - self.clock_ms;
        if remaining <= 0.0 {
            self.phase = Phase::Combat;
            self.countdown_display = 0;
            self.adversary.begin_entry(self.clock_ms);
            self.push_event(SimEvent::CombatStarted);
            log::info!("combat started");
            return;
        }

        let display = (remaining / 1000.0).ceil() as u32;
        if display != self.countdown_display {
            self.countdown_display = display;
            self.push_event(SimEvent::CountdownTick {
                seconds_left: display,
            });
        }
    }

    /// The avatar was caught under hard-loss rules; ends the round
    pub(crate) fn on_avatar_caught(&mut self) {
        debug_assert_eq!(self.phase, Phase::Combat);
        self.phase = Phase::RoundLost;
        self.avatar.vel = Vec2::ZERO;
        self.adversary.vel = Vec2::ZERO;
        self.push_event(SimEvent::AvatarCaught);
        log::info!("round lost: avatar caught");
    }

    /// The adversary went down for good; ends the round
    pub(crate) fn on_adversary_defeated(&mut self) {
        debug_assert_eq!(self.phase, Phase::Combat);
        self.phase = Phase::RoundWon;
        self.rounds_won += 1;
        self.avatar.vel = Vec2::ZERO;
        self.adversary.vel = Vec2::ZERO;
        log::info!("round won: adversary defeated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RulesConfig;
    use crate::sim::state::AdversaryState;

    #[test]
    fn test_begin_round_arms_countdown() {
        let mut state = SimState::new(1, RulesConfig::default());
        state.begin_round();

        assert_eq!(state.phase, Phase::Countdown);
        assert_eq!(state.countdown_display, 5);
        assert!(state.avatar.visible);
        assert_eq!(state.adversary.state, AdversaryState::Entering);
        assert_eq!(state.adversary.pos, Vec2::new(ENTER_X, ENTER_START_Y));
        assert!(!state.adversary.collision_enabled);
        let events = state.drain_events();
        assert!(events.contains(&SimEvent::RoundStarted));
    }

    #[test]
    fn test_begin_round_idempotent_mid_round() {
        let mut state = SimState::new(1, RulesConfig::default());
        state.begin_round();
        state.begin_round();
        let events = state.drain_events();
        let starts = events
            .iter()
            .filter(|e| **e == SimEvent::RoundStarted)
            .count();
        assert_eq!(starts, 1);

        // Still a no-op once combat is live
        state.clock_ms += COUNTDOWN_MS;
        state.tick_countdown();
        assert_eq!(state.phase, Phase::Combat);
        state.begin_round();
        assert_eq!(state.phase, Phase::Combat);
    }

    #[test]
    fn test_countdown_counts_whole_seconds() {
        let mut state = SimState::new(1, RulesConfig::default());
        state.begin_round();
        state.drain_events();

        let mut seen = Vec::new();
        while state.phase == Phase::Countdown {
            state.clock_ms += 100.0;
            state.tick_countdown();
            for event in state.drain_events() {
                if let SimEvent::CountdownTick { seconds_left } = event {
                    seen.push(seconds_left);
                }
            }
        }
        assert_eq!(seen, vec![4, 3, 2, 1]);
        assert_eq!(state.phase, Phase::Combat);
        assert_eq!(state.countdown_seconds(), 0);
    }

    #[test]
    fn test_restart_after_resolution() {
        let mut state = SimState::new(1, RulesConfig::default());
        state.begin_round();
        state.clock_ms += COUNTDOWN_MS;
        state.tick_countdown();
        state.on_avatar_caught();
        assert_eq!(state.phase, Phase::RoundLost);
        assert_eq!(state.avatar.vel, Vec2::ZERO);
        assert_eq!(state.adversary.vel, Vec2::ZERO);

        state.begin_round();
        assert_eq!(state.phase, Phase::Countdown);
        assert_eq!(state.adversary.hp, ADVERSARY_HP_MAX);
    }
}
