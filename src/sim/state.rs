//! Simulation state and core types
//!
//! Everything the host needs to render a frame lives here; behavior is split
//! across the sibling modules (`phase`, `adversary`, `projectile`, `contact`).

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::RulesConfig;
use crate::consts::*;

/// Top-level round lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the start trigger (overlay up)
    AwaitingStart,
    /// Pre-combat countdown running
    Countdown,
    /// Live gameplay
    Combat,
    /// Round ended with the adversary defeated
    RoundWon,
    /// Round ended with the avatar caught
    RoundLost,
}

/// Cardinal facing; selects the walk row / idle frame on the host side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Facing {
    #[default]
    Down,
    Left,
    Right,
    Up,
}

impl Facing {
    /// Facing from a movement vector by dominant axis; `None` when not moving.
    /// Ties go to the horizontal axis.
    pub fn from_velocity(v: Vec2) -> Option<Self> {
        if v.x == 0.0 && v.y == 0.0 {
            return None;
        }
        Some(if v.x.abs() >= v.y.abs() {
            if v.x < 0.0 { Facing::Left } else { Facing::Right }
        } else if v.y < 0.0 {
            Facing::Up
        } else {
            Facing::Down
        })
    }

    /// Unit vector along the facing (screen coordinates, +y is down)
    pub fn unit(self) -> Vec2 {
        match self {
            Facing::Down => Vec2::new(0.0, 1.0),
            Facing::Left => Vec2::new(-1.0, 0.0),
            Facing::Right => Vec2::new(1.0, 0.0),
            Facing::Up => Vec2::new(0.0, -1.0),
        }
    }
}

/// Presentation-facing things that happened during a tick
///
/// Drained by the host each frame for overlay text, camera effects, and audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimEvent {
    /// A round was (re)started and the countdown armed
    RoundStarted,
    /// Countdown display value changed (whole seconds remaining)
    CountdownTick { seconds_left: u32 },
    /// Countdown finished, combat is live
    CombatStarted,
    /// The adversary finished its entering descent and began pursuing
    AdversaryArrived,
    /// A projectile left the given pool slot
    ProjectileFired { slot: usize },
    /// A projectile hit the adversary; carries the remaining HP
    AdversaryHit { hp: u32 },
    /// Adversary HP reached zero
    AdversaryDefeated,
    /// The adversary came back at a new position (respawn-in-place rules)
    AdversaryRespawned,
    /// Accepted avatar contact under soft-reset rules
    ContactPenalty,
    /// Accepted avatar contact under hard-loss rules; the round is lost
    AvatarCaught,
}

/// The player-controlled avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avatar {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Last movement facing; idle holds it
    pub facing: Facing,
    pub visible: bool,
}

impl Avatar {
    pub fn spawn() -> Self {
        Self {
            pos: Vec2::new(AVATAR_SPAWN_X, AVATAR_SPAWN_Y),
            vel: Vec2::ZERO,
            facing: Facing::Down,
            visible: false,
        }
    }

    /// Apply merged directional intent. Axis speeds are fixed (diagonals are
    /// not normalized) and left/up win when opposite directions are held.
    pub fn apply_intent(&mut self, up: bool, down: bool, left: bool, right: bool) {
        let mut vel = Vec2::ZERO;
        if left {
            vel.x = -AVATAR_SPEED;
        } else if right {
            vel.x = AVATAR_SPEED;
        }
        if up {
            vel.y = -AVATAR_SPEED;
        } else if down {
            vel.y = AVATAR_SPEED;
        }
        self.vel = vel;
        if let Some(facing) = Facing::from_velocity(vel) {
            self.facing = facing;
        }
    }
}

/// Adversary motion state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdversaryState {
    /// Descending onto the arena; ignores the avatar, collision off
    Entering,
    /// Steering toward the avatar, collision on
    Pursuing,
    /// Downed; nothing changes until the next round
    Defeated,
}

/// The single pursuing adversary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Adversary {
    pub pos: Vec2,
    pub vel: Vec2,
    pub facing: Facing,
    pub hp: u32,
    pub state: AdversaryState,
    /// Host-side overlap scans must skip this entity while false
    pub collision_enabled: bool,
    pub visible: bool,
    /// Presentation scale; pops above 1.0 briefly after a respawn
    pub scale: f32,
    /// Clock value of the last accepted avatar contact
    pub last_contact_ms: Option<f64>,
    /// Clock value when the entering descent was anchored
    pub(crate) enter_begin_ms: f64,
    /// Deadline for the respawn scale pop decay
    pub(crate) scale_rest_ms: f64,
}

impl Adversary {
    pub fn spawn() -> Self {
        Self {
            pos: Vec2::new(ADVERSARY_SPAWN_X, ADVERSARY_SPAWN_Y),
            vel: Vec2::ZERO,
            facing: Facing::Down,
            hp: ADVERSARY_HP_MAX,
            state: AdversaryState::Entering,
            collision_enabled: false,
            visible: false,
            scale: 1.0,
            last_contact_ms: None,
            enter_begin_ms: 0.0,
            scale_rest_ms: 0.0,
        }
    }
}

/// A pooled projectile slot
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Clock deadline when the slot despawns unhit
    pub expires_at_ms: f64,
    pub homing: bool,
    pub active: bool,
}

impl Projectile {
    pub(crate) fn idle() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            expires_at_ms: 0.0,
            homing: false,
            active: false,
        }
    }

    /// Sprite rotation derived from velocity
    pub fn rotation(&self) -> f32 {
        self.vel.y.atan2(self.vel.x)
    }
}

/// Fixed-capacity projectile pool; the slot index doubles as the projectile id
/// the host reports back in overlap and bounds-exit events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectilePool {
    pub slots: Vec<Projectile>,
}

/// RNG wrapper that stays deterministic across serialization
///
/// The Pcg32 itself is not serialized; after a load the stream is replayed
/// from the seed by draw count on first use. Every draw must go through
/// [`RngState::roll_range`] so the count stays accurate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub draws: u64,
    #[serde(skip)]
    rng: Option<Pcg32>,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            draws: 0,
            rng: None,
        }
    }

    /// Uniform sample in [lo, hi)
    pub fn roll_range(&mut self, lo: f32, hi: f32) -> f32 {
        let seed = self.seed;
        let draws = self.draws;
        let rng = self.rng.get_or_insert_with(|| {
            let mut rng = Pcg32::seed_from_u64(seed);
            for _ in 0..draws {
                let _: f32 = rng.random();
            }
            rng
        });
        let value = lo + (hi - lo) * rng.random::<f32>();
        self.draws += 1;
        value
    }
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// RNG state for respawn rolls
    pub rng_state: RngState,
    /// Round rules chosen at construction
    pub rules: RulesConfig,
    /// Monotonic simulation clock in milliseconds, never reset
    pub clock_ms: f64,
    /// Rounds won this session
    pub rounds_won: u32,
    pub phase: Phase,
    /// Countdown deadline on the simulation clock
    pub countdown_deadline_ms: f64,
    /// Last whole-second countdown value reported
    pub countdown_display: u32,
    pub avatar: Avatar,
    pub adversary: Adversary,
    pub projectiles: ProjectilePool,
    /// Fire-rate gate; lives outside the pool
    pub fire_ready_at_ms: f64,
    /// Events queued since the last drain (presentation only)
    #[serde(skip)]
    pub events: Vec<SimEvent>,
}

impl SimState {
    /// Create a fresh simulation waiting for a start trigger
    pub fn new(seed: u64, rules: RulesConfig) -> Self {
        Self {
            seed,
            rng_state: RngState::new(seed),
            rules,
            clock_ms: 0.0,
            rounds_won: 0,
            phase: Phase::AwaitingStart,
            countdown_deadline_ms: 0.0,
            countdown_display: 0,
            avatar: Avatar::spawn(),
            adversary: Adversary::spawn(),
            projectiles: ProjectilePool::new(),
            fire_ready_at_ms: 0.0,
            events: Vec::new(),
        }
    }

    /// Countdown seconds remaining for overlay text; 0 outside Countdown
    pub fn countdown_seconds(&self) -> u32 {
        if self.phase == Phase::Countdown {
            self.countdown_display
        } else {
            0
        }
    }

    /// Drain the events queued since the last call
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: SimEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_facing_dominant_axis() {
        assert_eq!(Facing::from_velocity(Vec2::ZERO), None);
        assert_eq!(Facing::from_velocity(Vec2::new(-5.0, 1.0)), Some(Facing::Left));
        assert_eq!(Facing::from_velocity(Vec2::new(5.0, -1.0)), Some(Facing::Right));
        assert_eq!(Facing::from_velocity(Vec2::new(1.0, -5.0)), Some(Facing::Up));
        assert_eq!(Facing::from_velocity(Vec2::new(-1.0, 5.0)), Some(Facing::Down));
        // Ties resolve horizontally
        assert_eq!(Facing::from_velocity(Vec2::new(3.0, 3.0)), Some(Facing::Right));
        assert_eq!(Facing::from_velocity(Vec2::new(-3.0, 3.0)), Some(Facing::Left));
    }

    #[test]
    fn test_avatar_intent_mapping() {
        let mut avatar = Avatar::spawn();
        avatar.apply_intent(false, false, true, false);
        assert_eq!(avatar.vel, Vec2::new(-AVATAR_SPEED, 0.0));
        assert_eq!(avatar.facing, Facing::Left);

        // Left wins over right, up over down
        avatar.apply_intent(true, true, true, true);
        assert_eq!(avatar.vel, Vec2::new(-AVATAR_SPEED, -AVATAR_SPEED));

        // Idle holds the last facing
        avatar.apply_intent(false, false, false, false);
        assert_eq!(avatar.vel, Vec2::ZERO);
        assert_eq!(avatar.facing, Facing::Left);
    }

    #[test]
    fn test_rng_replay_after_deserialize() {
        let mut a = RngState::new(42);
        let first = a.roll_range(0.0, 100.0);
        let json = serde_json::to_string(&a).expect("serialize");
        let mut b: RngState = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(a.roll_range(0.0, 100.0), b.roll_range(0.0, 100.0));
        assert!((0.0..100.0).contains(&first));
    }

    #[test]
    fn test_state_roundtrip_keeps_gameplay_fields() {
        let mut state = SimState::new(7, RulesConfig::default());
        state.clock_ms = 1234.5;
        state.avatar.pos = Vec2::new(200.0, 300.0);
        state.push_event(SimEvent::RoundStarted);

        let json = serde_json::to_string(&state).expect("serialize");
        let restored: SimState = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored.clock_ms, state.clock_ms);
        assert_eq!(restored.avatar.pos, state.avatar.pos);
        assert_eq!(restored.adversary.hp, state.adversary.hp);
        // The event queue is presentation-only and not persisted
        assert!(restored.events.is_empty());
    }

    proptest! {
        #[test]
        fn prop_facing_follows_dominant_axis(
            x in -900.0f32..900.0,
            y in -900.0f32..900.0,
        ) {
            match Facing::from_velocity(Vec2::new(x, y)) {
                None => prop_assert!(x == 0.0 && y == 0.0),
                Some(Facing::Left) => prop_assert!(x < 0.0 && x.abs() >= y.abs()),
                Some(Facing::Right) => prop_assert!(x > 0.0 && x.abs() >= y.abs()),
                Some(Facing::Up) => prop_assert!(y < 0.0 && y.abs() > x.abs()),
                Some(Facing::Down) => prop_assert!(y > 0.0 && y.abs() > x.abs()),
            }
        }
    }
}
