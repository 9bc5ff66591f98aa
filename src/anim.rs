//! Presentation hints
//!
//! Pure mapping from sim state to the sprite vocabulary a host renderer
//! uses: walk animation keys, idle frame indices, playback rates. Keeps
//! rendering decisions out of the sim itself.

use crate::sim::Facing;

/// Frames per facing row in the walk sheets
pub const FRAMES_PER_ROW: u32 = 4;

/// Which sprite sheet family an entity draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Avatar,
    Adversary,
}

/// Walk animation key for a facing, e.g. `walk_left` or `enemy_walk_left`
pub fn walk_key(kind: EntityKind, facing: Facing) -> &'static str {
    match (kind, facing) {
        (EntityKind::Avatar, Facing::Down) => "walk_down",
        (EntityKind::Avatar, Facing::Left) => "walk_left",
        (EntityKind::Avatar, Facing::Right) => "walk_right",
        (EntityKind::Avatar, Facing::Up) => "walk_up",
        (EntityKind::Adversary, Facing::Down) => "enemy_walk_down",
        (EntityKind::Adversary, Facing::Left) => "enemy_walk_left",
        (EntityKind::Adversary, Facing::Right) => "enemy_walk_right",
        (EntityKind::Adversary, Facing::Up) => "enemy_walk_up",
    }
}

/// Sheet row holding a facing's walk cycle
pub fn walk_row(facing: Facing) -> u32 {
    match facing {
        Facing::Down => 0,
        Facing::Left => 1,
        Facing::Right => 2,
        Facing::Up => 3,
    }
}

/// Standing frame: the first frame of the facing's row
pub fn idle_frame(facing: Facing) -> u32 {
    walk_row(facing) * FRAMES_PER_ROW
}

/// Walk cycle playback rate in frames per second
pub fn frame_rate(kind: EntityKind) -> u32 {
    match kind {
        EntityKind::Avatar => 8,
        EntityKind::Adversary => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_frames_start_each_row() {
        assert_eq!(idle_frame(Facing::Down), 0);
        assert_eq!(idle_frame(Facing::Left), 4);
        assert_eq!(idle_frame(Facing::Right), 8);
        assert_eq!(idle_frame(Facing::Up), 12);
    }

    #[test]
    fn test_walk_keys_follow_the_sheet_naming() {
        assert_eq!(walk_key(EntityKind::Avatar, Facing::Down), "walk_down");
        assert_eq!(
            walk_key(EntityKind::Adversary, Facing::Right),
            "enemy_walk_right"
        );
    }

    #[test]
    fn test_adversary_walks_slower() {
        assert!(frame_rate(EntityKind::Adversary) < frame_rate(EntityKind::Avatar));
    }
}
