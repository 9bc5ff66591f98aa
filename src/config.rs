//! Round rule policies
//!
//! The two observed rule variants (soft contact penalty vs hard loss,
//! round-ending defeat vs respawn-in-place) are construction-time
//! configuration, not separate state machines. Loaded from JSON by the demo
//! binary:
//!
//! ```json
//! { "contact_policy": "HardLoss", "defeat_policy": "RespawnInPlace", "homing_shots": false }
//! ```

use serde::{Deserialize, Serialize};

/// What an accepted avatar-adversary contact does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ContactPolicy {
    /// Reposition both entities to their spawn points; the round continues
    #[default]
    SoftReset,
    /// The avatar is caught and the round ends in a loss
    HardLoss,
}

/// What happens when adversary HP reaches zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DefeatPolicy {
    /// The adversary stays down and the round ends in a win
    #[default]
    EndRound,
    /// The adversary comes back at a random position with full HP; the round continues
    RespawnInPlace,
}

/// Round rules chosen when the simulation is constructed
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub contact_policy: ContactPolicy,
    pub defeat_policy: DefeatPolicy,
    /// Whether player shots steer toward the adversary after launch
    pub homing_shots: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            contact_policy: ContactPolicy::SoftReset,
            defeat_policy: DefeatPolicy::EndRound,
            homing_shots: true,
        }
    }
}

impl RulesConfig {
    /// Load rules from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))
    }

    /// Load rules from an optional JSON file, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_or_default(path: &std::path::Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(rules) => {
                log::info!("Loaded rules from {}", path.display());
                rules
            }
            Err(err) => {
                log::warn!("Ignoring malformed rules file {}: {}", path.display(), err);
                Self::default()
            }
        }
    }
}
