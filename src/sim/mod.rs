//! Deterministic simulation module
//!
//! All combat logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Monotonic millisecond clock owned by the state
//! - No rendering or platform dependencies

pub mod adversary;
pub mod contact;
pub mod phase;
pub mod projectile;
pub mod state;
pub mod tick;

pub use adversary::pursuit_steer;
pub use projectile::resolve_aim;
pub use state::{
    Adversary, AdversaryState, Avatar, Facing, Phase, Projectile, ProjectilePool, RngState,
    SimEvent, SimState,
};
pub use tick::{TickInput, tick};
