//! Reference host wiring
//!
//! The sim never detects overlaps itself. A host owns the geometry queries
//! the way a scene graph or physics layer would, and reports the results
//! back through the arbitration entry points. `step` is the canonical
//! frame: advance one tick, then scan and report.

use glam::Vec2;

use crate::consts::*;
use crate::sim::{SimState, TickInput, tick};

/// Strict AABB overlap between two centered rects; touching edges miss
pub fn rects_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    let delta = (a_pos - b_pos).abs() * 2.0;
    delta.x < a_size.x + b_size.x && delta.y < a_size.y + b_size.y
}

/// Whether a projectile rect touches or crosses the arena edge
pub fn projectile_out_of_bounds(pos: Vec2) -> bool {
    pos.x - PROJECTILE_WIDTH / 2.0 <= 0.0
        || pos.x + PROJECTILE_WIDTH / 2.0 >= ARENA_WIDTH
        || pos.y - PROJECTILE_HEIGHT / 2.0 <= 0.0
        || pos.y + PROJECTILE_HEIGHT / 2.0 >= ARENA_HEIGHT
}

/// One full host frame: advance the sim, then report what the geometry says
pub fn step(state: &mut SimState, input: &TickInput, dt_ms: f64) {
    tick(state, input, dt_ms);

    // Bounds exits first so escaped slots never reach the hit scan
    let exited: Vec<usize> = state
        .projectiles
        .iter_active()
        .filter(|(_, p)| projectile_out_of_bounds(p.pos))
        .map(|(slot, _)| slot)
        .collect();
    for slot in exited {
        state.on_projectile_out_of_bounds(slot);
    }

    let adversary_size = Vec2::new(ADVERSARY_WIDTH, ADVERSARY_HEIGHT);

    if state.adversary.collision_enabled {
        let avatar_size = Vec2::new(AVATAR_WIDTH, AVATAR_HEIGHT);
        let adversary_pos = state.adversary.pos;
        if rects_overlap(state.avatar.pos, avatar_size, adversary_pos, adversary_size) {
            state.on_avatar_contact();
        }
    }

    // The contact policy may have moved the adversary or ended the round,
    // so the hit scan reads fresh state.
    if state.adversary.collision_enabled {
        let adversary_pos = state.adversary.pos;
        let projectile_size = Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT);
        let hits: Vec<usize> = state
            .projectiles
            .iter_active()
            .filter(|(_, p)| rects_overlap(p.pos, projectile_size, adversary_pos, adversary_size))
            .map(|(slot, _)| slot)
            .collect();
        for slot in hits {
            state.on_projectile_hit(slot);
        }
    }
}
