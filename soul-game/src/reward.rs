//! Kill rewards.
//!
//! The formula here is boss-agnostic; skipping major encounters and picking
//! recipients is dispatch policy (see [`crate::hooks`]).

use serde::{Deserialize, Serialize};

use crate::config::SoulConfig;
use crate::constants::{
    REWARD_DAMAGE_DIVISOR, REWARD_DEFENSE_DIVISOR, REWARD_HP_DIVISOR, REWARD_MIN_XP,
};
use crate::numbers::{floor_f64_to_u64, u64_to_f64};

/// Combat stats of a defeated entity as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CombatStats {
    pub max_hp: i32,
    pub defense: i32,
    pub damage: i32,
}

impl CombatStats {
    #[must_use]
    pub const fn new(max_hp: i32, defense: i32, damage: i32) -> Self {
        Self {
            max_hp,
            defense,
            damage,
        }
    }
}

/// A single defeat as delivered by the host's kill hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KillEvent {
    pub stats: CombatStats,
    #[serde(default)]
    pub is_boss: bool,
}

/// A player considered for a share of a kill.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Recipient {
    pub active: bool,
    pub dead: bool,
    /// Distance from the defeated entity's center, in world pixels.
    pub distance: f32,
}

impl Recipient {
    #[must_use]
    pub const fn nearby(distance: f32) -> Self {
        Self {
            active: true,
            dead: false,
            distance,
        }
    }

    /// Active, alive, and within the configured share radius.
    #[must_use]
    pub fn is_eligible(&self, config: &SoulConfig) -> bool {
        self.active && !self.dead && self.distance <= config.xp_share_range
    }
}

/// Raw XP for a defeat:
/// `floor((max_hp / 100) × (1 + defense / 10) × (1 + damage / 25))`,
/// never below 1 while the entity had health.
#[must_use]
pub fn xp_for(stats: CombatStats) -> u64 {
    if stats.max_hp <= 0 {
        return 0;
    }
    let base = f64::from(stats.max_hp) / REWARD_HP_DIVISOR;
    let defense = 1.0 + f64::from(stats.defense) / REWARD_DEFENSE_DIVISOR;
    let damage = 1.0 + f64::from(stats.damage) / REWARD_DAMAGE_DIVISOR;
    floor_f64_to_u64(base * defense * damage).max(REWARD_MIN_XP)
}

/// Scale raw XP by the global multiplier, flooring the result.
#[must_use]
pub fn apply_multiplier(xp: u64, config: &SoulConfig) -> u64 {
    floor_f64_to_u64(u64_to_f64(xp) * f64::from(config.xp_multiplier))
}
