//! Entry points the host engine glue calls into.
//!
//! Lifecycle callbacks (kill, load, save, tick) are plain functions here;
//! virtual dispatch and event subscription stay on the host side.

use serde::{Deserialize, Serialize};

use crate::bonuses::StatBonuses;
use crate::context::SoulContext;
use crate::numbers::saturating_u64_to_i64;
use crate::persistence::{self, TagCompound};
use crate::phase::WorldProgress;
use crate::progression::{LevelUps, ProgressionState};
use crate::reward::{KillEvent, Recipient, apply_multiplier, xp_for};

/// What one kill handed out.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KillOutcome {
    /// XP each recipient received, after the multiplier.
    pub xp_awarded: u64,
    pub recipients: usize,
    /// Level-ups per recipient, in recipient order.
    pub level_ups: Vec<LevelUps>,
}

impl KillOutcome {
    #[must_use]
    pub fn total_level_ups(&self) -> usize {
        self.level_ups.iter().map(|ups| ups.len()).sum()
    }
}

/// XP a kill is worth after the multiplier. Bosses are worth nothing.
#[must_use]
pub fn kill_xp(kill: &KillEvent, ctx: &SoulContext) -> u64 {
    if kill.is_boss {
        return 0;
    }
    apply_multiplier(xp_for(kill.stats), ctx.config())
}

/// Award a kill to every given player state.
pub fn on_kill<'a, W, I>(
    kill: &KillEvent,
    recipients: I,
    ctx: &SoulContext,
    world: &W,
) -> KillOutcome
where
    W: WorldProgress + ?Sized,
    I: IntoIterator<Item = &'a mut ProgressionState>,
{
    let logger = ctx.logger();
    if kill.is_boss {
        logger.debug(format_args!("boss defeated, no experience awarded"));
        return KillOutcome::default();
    }

    let xp = kill_xp(kill, ctx);
    logger.debug(format_args!(
        "kill worth {xp} xp (hp {}, def {}, dmg {})",
        kill.stats.max_hp, kill.stats.defense, kill.stats.damage
    ));
    if xp == 0 {
        return KillOutcome::default();
    }

    let amount = saturating_u64_to_i64(xp);
    let level_ups: Vec<LevelUps> = recipients
        .into_iter()
        .map(|state| state.add_xp(amount, ctx, world))
        .collect();
    KillOutcome {
        xp_awarded: xp,
        recipients: level_ups.len(),
        level_ups,
    }
}

/// Award a kill to the candidates standing close enough, skipping absent or
/// dead players.
pub fn on_kill_nearby<'a, W, I>(
    kill: &KillEvent,
    candidates: I,
    ctx: &SoulContext,
    world: &W,
) -> KillOutcome
where
    W: WorldProgress + ?Sized,
    I: IntoIterator<Item = (Recipient, &'a mut ProgressionState)>,
{
    let config = ctx.config();
    let eligible = candidates
        .into_iter()
        .filter(|(recipient, _)| recipient.is_eligible(config))
        .map(|(_, state)| state);
    on_kill(kill, eligible, ctx, world)
}

impl ProgressionState {
    /// Replace this state with the contents of a save.
    pub fn on_load(&mut self, data: &TagCompound, ctx: &SoulContext) {
        *self = persistence::deserialize(data);
        ctx.logger().net_sync(format_args!(
            "loaded level {} with {} xp banked",
            self.level, self.experience
        ));
    }

    #[must_use]
    pub fn on_save(&self) -> TagCompound {
        persistence::serialize(self)
    }

    /// Per-frame bonuses derived from allocated ranks.
    #[must_use]
    pub fn on_tick(&self) -> StatBonuses {
        StatBonuses::from_state(self)
    }
}
