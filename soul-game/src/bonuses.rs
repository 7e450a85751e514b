//! Stat bonuses granted by allocated attribute ranks.
use serde::{Deserialize, Serialize};

use crate::constants::{AGILITY_BONUS_PER_RANK, DAMAGE_BONUS_PER_RANK, DEFENSE_BONUS_PER_RANK};
use crate::numbers::u32_to_f32;
use crate::progression::ProgressionState;

/// Modifiers for the host to fold into the player's stats each tick.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StatBonuses {
    /// Additive damage multiplier (0.05 = +5%).
    pub damage: f32,
    /// Flat defense.
    pub defense: i32,
    pub move_speed: f32,
    pub run_acceleration: f32,
}

impl StatBonuses {
    #[must_use]
    pub fn from_state(state: &ProgressionState) -> Self {
        let agility = u32_to_f32(state.agility_rank) * AGILITY_BONUS_PER_RANK;
        Self {
            damage: u32_to_f32(state.damage_rank) * DAMAGE_BONUS_PER_RANK,
            defense: i32::try_from(state.defense_rank)
                .unwrap_or(i32::MAX)
                .saturating_mul(DEFENSE_BONUS_PER_RANK),
            move_speed: agility,
            run_acceleration: agility,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
