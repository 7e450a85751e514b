//! Centralized balance and tuning constants for the progression engine.
//!
//! Tunables that players may change live in [`crate::config::SoulConfig`];
//! everything here is fixed game math reviewed in version control.

// Logging targets ----------------------------------------------------------
pub(crate) const LOG_TARGET: &str = "soul";
pub(crate) const LOG_TARGET_DEBUG: &str = "soul::debug";
pub(crate) const LOG_TARGET_NET_SYNC: &str = "soul::net_sync";

// Phase tuning -------------------------------------------------------------
pub(crate) const LEVEL_CAP_STEP: u32 = 10;
pub const MIN_LEVEL: u32 = 1;
/// Largest banked XP a save can hold.
pub const MAX_EXPERIENCE: u64 = i64::MAX.unsigned_abs();

// Kill rewards -------------------------------------------------------------
pub(crate) const REWARD_HP_DIVISOR: f64 = 100.0;
pub(crate) const REWARD_DEFENSE_DIVISOR: f64 = 10.0;
pub(crate) const REWARD_DAMAGE_DIVISOR: f64 = 25.0;
pub(crate) const REWARD_MIN_XP: u64 = 1;

// Attribute allocation cost schedule ---------------------------------------
// Each entry is (rank threshold, cost from that threshold upward).
pub(crate) const DAMAGE_COST_STEPS: [(u32, u32); 3] = [(0, 1), (10, 2), (20, 3)];
pub(crate) const DEFENSE_COST_STEPS: [(u32, u32); 3] = [(0, 2), (5, 3), (10, 4)];
pub(crate) const AGILITY_COST_STEPS: [(u32, u32); 2] = [(0, 2), (10, 3)];

// Attribute bonuses per rank -----------------------------------------------
pub(crate) const DAMAGE_BONUS_PER_RANK: f32 = 0.005;
pub(crate) const DEFENSE_BONUS_PER_RANK: i32 = 1;
pub(crate) const AGILITY_BONUS_PER_RANK: f32 = 0.005;

// Talent defaults ----------------------------------------------------------
pub(crate) const DEFAULT_TALENT_COST: u32 = 1;
pub(crate) const MAX_TALENT_RING: u8 = 7;

// Persistence keys ---------------------------------------------------------
pub const KEY_CURRENT_XP: &str = "currentXP";
pub const KEY_CURRENT_LEVEL: &str = "currentLevel";
pub const KEY_TALENT_POINTS: &str = "talentPoints";
pub const KEY_BASIC_POINTS: &str = "basicPoints";
pub const KEY_DAMAGE_RANK: &str = "soulDamageRank";
pub const KEY_DEFENSE_RANK: &str = "soulDefenseRank";
pub const KEY_AGILITY_RANK: &str = "soulAgilityRank";
pub const KEY_UNLOCKED_TALENTS: &str = "unlockedTalents";
