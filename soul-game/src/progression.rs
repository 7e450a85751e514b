//! Per-player progression record and the leveling loop.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeSet;

use crate::config::SoulConfig;
use crate::constants::{MAX_EXPERIENCE, MIN_LEVEL};
use crate::context::SoulContext;
use crate::formula::required_xp;
use crate::phase::{WorldProgress, current_level_cap};

/// Notification emitted once per level gained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUp {
    /// The level just reached.
    pub level: u32,
    pub talent_point_granted: bool,
}

/// Level-ups produced by one XP award, in ascending level order.
pub type LevelUps = SmallVec<[LevelUp; 4]>;

/// Everything the engine tracks for one player.
///
/// Owned by that player's session; only the player's own handlers mutate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionState {
    /// Banked XP not yet consumed by a level-up.
    pub experience: u64,
    pub level: u32,
    pub talent_points: u32,
    pub basic_points: u32,
    pub unlocked_talents: BTreeSet<String>,
    pub damage_rank: u32,
    pub defense_rank: u32,
    pub agility_rank: u32,
}

impl Default for ProgressionState {
    fn default() -> Self {
        Self {
            experience: 0,
            level: MIN_LEVEL,
            talent_points: 0,
            basic_points: 0,
            unlocked_talents: BTreeSet::new(),
            damage_rank: 0,
            defense_rank: 0,
            agility_rank: 0,
        }
    }
}

impl ProgressionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Award XP and level up as far as the world's current cap allows.
    ///
    /// Non-positive amounts are ignored.
    pub fn add_xp<W: WorldProgress + ?Sized>(
        &mut self,
        amount: i64,
        ctx: &SoulContext,
        world: &W,
    ) -> LevelUps {
        self.add_xp_capped(amount, current_level_cap(world), ctx)
    }

    /// Same as [`Self::add_xp`] with an explicit level cap.
    pub fn add_xp_capped(&mut self, amount: i64, cap: u32, ctx: &SoulContext) -> LevelUps {
        let mut level_ups = LevelUps::new();
        let Ok(amount) = u64::try_from(amount) else {
            return level_ups;
        };
        if amount == 0 {
            return level_ups;
        }

        self.experience = self.experience.saturating_add(amount).min(MAX_EXPERIENCE);
        ctx.logger().debug(format_args!(
            "gained {amount} xp, banked {}",
            self.experience
        ));

        self.settle(cap, ctx, &mut level_ups);
        level_ups
    }

    fn settle(&mut self, cap: u32, ctx: &SoulContext, level_ups: &mut LevelUps) {
        let logger = ctx.logger();
        if self.level >= cap {
            logger.debug(format_args!("level {} is at cap {cap}", self.level));
            return;
        }

        while self.level < cap {
            let required = required_xp(self.level + 1, ctx.config());
            if self.experience < required {
                break;
            }
            self.experience -= required;
            self.level += 1;
            let talent_point_granted = self.grant_level_rewards(ctx.config());
            if talent_point_granted {
                logger.info(format_args!(
                    "reached level {} and earned a talent point",
                    self.level
                ));
            } else {
                logger.info(format_args!("reached level {}", self.level));
            }
            level_ups.push(LevelUp {
                level: self.level,
                talent_point_granted,
            });
        }
    }

    /// One basic point per level, plus a talent point on every Nth level.
    fn grant_level_rewards(&mut self, config: &SoulConfig) -> bool {
        self.basic_points = self.basic_points.saturating_add(1);
        let frequency = config.talent_point_frequency.max(1);
        let granted = self.level % frequency == 0;
        if granted {
            self.talent_points = self.talent_points.saturating_add(1);
        }
        granted
    }

    /// XP needed to reach the next level from the current one.
    #[must_use]
    pub fn xp_for_next_level(&self, config: &SoulConfig) -> u64 {
        required_xp(self.level.saturating_add(1), config)
    }

    /// Whether the player can still gain levels in `world`.
    #[must_use]
    pub fn is_capped<W: WorldProgress + ?Sized>(&self, world: &W) -> bool {
        self.level >= current_level_cap(world)
    }

    // Privileged operations for the debug console ---------------------------

    /// Force the level into `[1, cap]` without touching banked XP or points.
    pub fn set_level(&mut self, level: u32, cap: u32) {
        self.level = level.clamp(MIN_LEVEL, cap.max(MIN_LEVEL));
    }

    pub fn add_talent_points(&mut self, points: u32) {
        self.talent_points = self.talent_points.saturating_add(points);
    }

    pub fn add_basic_points(&mut self, points: u32) {
        self.basic_points = self.basic_points.saturating_add(points);
    }

    /// Back to a brand new character.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
