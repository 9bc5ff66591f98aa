//! Per-tick simulation update
//!
//! One entry point, `tick`, advances the clock, applies input, runs the
//! phase machine and integrates motion. State in, state out; hosts call it
//! at a fixed cadence and read events afterward.

use glam::Vec2;

use crate::consts::*;
use crate::sim::state::{AdversaryState, Phase, SimEvent, SimState};

/// Preferred avatar/adversary distance while the autopilot drives
const AUTOPILOT_STANDOFF: f32 = 200.0;
/// Per-axis slack so the autopilot does not jitter around its target line
const AUTOPILOT_DEADBAND: f32 = 8.0;

/// Host input sampled for one tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Move intent, already mapped from whatever device the host reads
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Fire request; holding it is fine, the cooldown rate-limits
    pub fire: bool,
    /// Request a new round; ignored while one is underway
    pub start_round: bool,
    /// Let the sim drive the avatar itself (demo mode)
    pub autopilot: bool,
}

/// Advance the simulation by one fixed step of `dt_ms`
pub fn tick(state: &mut SimState, input: &TickInput, dt_ms: f64) {
    state.clock_ms += dt_ms;

    let mut input = *input;
    if input.autopilot {
        drive_autopilot(state, &mut input);
    }

    if input.start_round {
        state.begin_round();
    }

    match state.phase {
        Phase::AwaitingStart | Phase::RoundWon | Phase::RoundLost => return,
        Phase::Countdown => {
            state.tick_countdown();
            return;
        }
        Phase::Combat => {}
    }

    state
        .avatar
        .apply_intent(input.up, input.down, input.left, input.right);

    match state.adversary.state {
        AdversaryState::Entering => {
            if state.adversary.update_entering(state.clock_ms) {
                state.push_event(SimEvent::AdversaryArrived);
                log::debug!("adversary arrived, pursuit begins");
            }
        }
        AdversaryState::Pursuing => {
            let target = state.avatar.pos;
            state.adversary.update_pursuit(target, state.clock_ms);
        }
        AdversaryState::Defeated => {}
    }
    state.adversary.tick_scale(state.clock_ms);

    if input.fire {
        state.try_fire();
    }

    if state.adversary.state != AdversaryState::Defeated {
        let target = state.adversary.pos;
        state.projectiles.tick_homing(target);
    }
    state.projectiles.tick_lifetimes(state.clock_ms);

    integrate(state, dt_ms);
}

/// Euler step for everything that moves by velocity
///
/// The entering descent drives the adversary's position directly and starts
/// above the arena, so only pursuit integrates and clamps it.
fn integrate(state: &mut SimState, dt_ms: f64) {
    let dt = (dt_ms / 1000.0) as f32;

    let avatar = &mut state.avatar;
    avatar.pos += avatar.vel * dt;
    avatar.pos = clamp_to_arena(avatar.pos, AVATAR_WIDTH, AVATAR_HEIGHT);

    if state.adversary.state == AdversaryState::Pursuing {
        let adversary = &mut state.adversary;
        adversary.pos += adversary.vel * dt;
        adversary.pos = clamp_to_arena(adversary.pos, ADVERSARY_WIDTH, ADVERSARY_HEIGHT);
    }

    for p in state.projectiles.slots.iter_mut().filter(|p| p.active) {
        p.pos += p.vel * dt;
    }
}

/// Keep a centered rect of the given size fully inside the arena
fn clamp_to_arena(pos: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(
        pos.x.clamp(width / 2.0, ARENA_WIDTH - width / 2.0),
        pos.y.clamp(height / 2.0, ARENA_HEIGHT - height / 2.0),
    )
}

/// Synthesize input for demo mode: keep a standoff distance and fire
fn drive_autopilot(state: &SimState, input: &mut TickInput) {
    match state.phase {
        Phase::AwaitingStart | Phase::RoundWon | Phase::RoundLost => {
            input.start_round = true;
        }
        Phase::Countdown => {}
        Phase::Combat => {
            let to_adversary = state.adversary.pos - state.avatar.pos;
            let chasing = to_adversary.length_squared() > AUTOPILOT_STANDOFF * AUTOPILOT_STANDOFF;
            let dir = if chasing { to_adversary } else { -to_adversary };
            input.left = dir.x < -AUTOPILOT_DEADBAND;
            input.right = dir.x > AUTOPILOT_DEADBAND;
            input.up = dir.y < -AUTOPILOT_DEADBAND;
            input.down = dir.y > AUTOPILOT_DEADBAND;
            input.fire = true;
        }
    }
}
