//! Seeded kill simulation for balancing the curve.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use soul_game::{
    CombatStats, KillEvent, LevelUp, ProgressionState, SoulContext, WorldProgress, on_kill,
};

const BOSS_CHANCE: f64 = 0.02;
const HP_RANGE: (i32, i32) = (5, 2_000);
const DEFENSE_RANGE: (i32, i32) = (0, 40);
const DAMAGE_RANGE: (i32, i32) = (5, 100);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationSummary {
    pub seed: u64,
    pub kills: u32,
    pub bosses_skipped: u32,
    pub xp_awarded: u64,
    pub start_level: u32,
    pub end_level: u32,
    pub talent_points_earned: u32,
    pub level_ups: Vec<LevelUp>,
}

fn roll_kill(rng: &mut ChaCha8Rng) -> KillEvent {
    KillEvent {
        stats: CombatStats::new(
            rng.gen_range(HP_RANGE.0..=HP_RANGE.1),
            rng.gen_range(DEFENSE_RANGE.0..=DEFENSE_RANGE.1),
            rng.gen_range(DAMAGE_RANGE.0..=DAMAGE_RANGE.1),
        ),
        is_boss: rng.gen_bool(BOSS_CHANCE),
    }
}

/// Feed `kills` random defeats to `state`. The same seed always produces the
/// same sequence.
pub fn run_simulation<W: WorldProgress + ?Sized>(
    state: &mut ProgressionState,
    seed: u64,
    kills: u32,
    ctx: &SoulContext,
    world: &W,
) -> SimulationSummary {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let start_level = state.level;
    let start_talents = state.talent_points;
    let mut summary = SimulationSummary {
        seed,
        kills,
        bosses_skipped: 0,
        xp_awarded: 0,
        start_level,
        end_level: start_level,
        talent_points_earned: 0,
        level_ups: Vec::new(),
    };

    for _ in 0..kills {
        let kill = roll_kill(&mut rng);
        if kill.is_boss {
            summary.bosses_skipped += 1;
        }
        let outcome = on_kill(&kill, [&mut *state], ctx, world);
        summary.xp_awarded = summary.xp_awarded.saturating_add(outcome.xp_awarded);
        summary
            .level_ups
            .extend(outcome.level_ups.into_iter().flatten());
    }

    summary.end_level = state.level;
    summary.talent_points_earned = state.talent_points.saturating_sub(start_talents);
    summary
}
