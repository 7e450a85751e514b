//! Experience curve.
use crate::config::SoulConfig;
use crate::constants::MIN_LEVEL;
use crate::numbers::floor_f64_to_u64;

/// XP needed to advance *into* `level`: `floor(base × level^exponent)`.
/// Level 1 and below cost nothing.
#[must_use]
pub fn required_xp(level: u32, config: &SoulConfig) -> u64 {
    if level <= MIN_LEVEL {
        return 0;
    }
    let base = f64::from(config.base_xp_required);
    let exponent = f64::from(config.leveling_exponent);
    floor_f64_to_u64(base * f64::from(level).powf(exponent))
}

/// Total XP needed to climb from `from` to `to`, i.e. the sum of
/// `required_xp` over `from + 1 ..= to`. Zero when `to <= from`.
#[must_use]
pub fn cumulative_xp(from: u32, to: u32, config: &SoulConfig) -> u64 {
    (from.saturating_add(1)..=to).fold(0_u64, |acc, level| {
        acc.saturating_add(required_xp(level, config))
    })
}
