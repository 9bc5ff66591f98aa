//! Roboman core - a top-down combat encounter simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (round phases, adversary AI, projectiles, contact rules)
//! - `anim`: Facing-to-presentation-key mapping for the render layer
//! - `config`: Construction-time round rule policies
//! - `host`: Reference host collaborator (overlap scan, bounds-exit detection)

pub mod anim;
pub mod config;
pub mod host;
pub mod sim;

pub use config::{ContactPolicy, DefeatPolicy, RulesConfig};

/// Game tuning constants
pub mod consts {
    /// Reference host frame duration in milliseconds (60 Hz loop)
    pub const FRAME_DT_MS: f64 = 1000.0 / 60.0;

    /// Arena dimensions in pixels
    pub const ARENA_WIDTH: f32 = 540.0;
    pub const ARENA_HEIGHT: f32 = 960.0;

    /// Avatar movement speed (px/s)
    pub const AVATAR_SPEED: f32 = 880.0;
    pub const AVATAR_SPAWN_X: f32 = 120.0;
    pub const AVATAR_SPAWN_Y: f32 = 120.0;
    /// Avatar sprite frame size
    pub const AVATAR_WIDTH: f32 = 41.0;
    pub const AVATAR_HEIGHT: f32 = 50.0;

    /// Adversary pursuit speed (px/s)
    pub const ADVERSARY_SPEED: f32 = 180.0;
    pub const ADVERSARY_SPAWN_X: f32 = 420.0;
    pub const ADVERSARY_SPAWN_Y: f32 = 240.0;
    pub const ADVERSARY_WIDTH: f32 = 40.0;
    pub const ADVERSARY_HEIGHT: f32 = 51.0;
    /// Adversary hit points at round start
    pub const ADVERSARY_HP_MAX: u32 = 20;

    /// Entering descent: off-screen drop-in at the arena midline
    pub const ENTER_X: f32 = 270.0;
    pub const ENTER_START_Y: f32 = -80.0;
    pub const ENTER_END_Y: f32 = 120.0;
    /// Invisible hold before the descent starts
    pub const ENTER_DELAY_MS: f64 = 500.0;
    pub const ENTER_DURATION_MS: f64 = 1600.0;

    /// Wander oscillation mixed into pursuit steering
    pub const WANDER_SCALE: f32 = 70.0;
    pub const WANDER_PERIOD_X_MS: f64 = 900.0;
    pub const WANDER_PERIOD_Y_MS: f64 = 700.0;

    /// Projectile defaults
    pub const PROJECTILE_SPEED: f32 = 720.0;
    pub const PROJECTILE_LIFETIME_MS: f64 = 900.0;
    pub const PROJECTILE_POOL_SIZE: usize = 40;
    pub const PROJECTILE_WIDTH: f32 = 10.0;
    pub const PROJECTILE_HEIGHT: f32 = 4.0;
    /// Minimum time between accepted fire requests
    pub const FIRE_COOLDOWN_MS: f64 = 150.0;
    /// Per-tick blend factor steering homing shots toward the target
    pub const HOMING_BLEND: f32 = 0.05;

    /// Minimum time between accepted avatar-adversary contacts
    pub const CONTACT_COOLDOWN_MS: f64 = 750.0;

    /// Pre-combat countdown length
    pub const COUNTDOWN_MS: f64 = 5000.0;

    /// Respawn-in-place reposition bounds
    pub const RESPAWN_X_MIN: f32 = 60.0;
    pub const RESPAWN_X_MAX: f32 = 480.0;
    pub const RESPAWN_Y_MIN: f32 = 80.0;
    pub const RESPAWN_Y_MAX: f32 = 880.0;
    /// Respawn scale pop, decays back to 1.0
    pub const RESPAWN_POP_SCALE: f32 = 1.3;
    pub const RESPAWN_POP_MS: f64 = 220.0;
}

/// Sine ease-out: fast start, gentle stop
#[inline]
pub fn ease_sine_out(t: f32) -> f32 {
    (t.clamp(0.0, 1.0) * std::f32::consts::FRAC_PI_2).sin()
}

/// Back ease-out: overshoots slightly past 1.0 before settling
#[inline]
pub fn ease_back_out(t: f32) -> f32 {
    const C1: f32 = 1.70158;
    const C3: f32 = C1 + 1.0;
    let t = t.clamp(0.0, 1.0) - 1.0;
    1.0 + C3 * t * t * t + C1 * t * t
}
