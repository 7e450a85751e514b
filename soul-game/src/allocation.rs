//! Basic-point allocation into soul attributes.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{AGILITY_COST_STEPS, DAMAGE_COST_STEPS, DEFENSE_COST_STEPS};
use crate::context::SoulContext;
use crate::progression::ProgressionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    Damage,
    Defense,
    Agility,
}

impl Attribute {
    pub const ALL: [Self; 3] = [Self::Damage, Self::Defense, Self::Agility];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Damage => "damage",
            Self::Defense => "defense",
            Self::Agility => "agility",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Damage => "Soul Damage",
            Self::Defense => "Soul Defense",
            Self::Agility => "Soul Agility",
        }
    }

    /// Per-rank bonus as shown next to the attribute.
    #[must_use]
    pub const fn bonus_label(self) -> &'static str {
        match self {
            Self::Damage => "+0.5% damage",
            Self::Defense => "+1 defense",
            Self::Agility => "+0.5% move speed",
        }
    }

    const fn cost_steps(self) -> &'static [(u32, u32)] {
        match self {
            Self::Damage => &DAMAGE_COST_STEPS,
            Self::Defense => &DEFENSE_COST_STEPS,
            Self::Agility => &AGILITY_COST_STEPS,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Attribute {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "damage" => Ok(Self::Damage),
            "defense" => Ok(Self::Defense),
            "agility" => Ok(Self::Agility),
            _ => Err(()),
        }
    }
}

/// Basic points needed to buy the rank after `rank`. A step function of the
/// current rank.
#[must_use]
pub fn allocation_cost(attribute: Attribute, rank: u32) -> u32 {
    attribute
        .cost_steps()
        .iter()
        .rev()
        .find(|(threshold, _)| rank >= *threshold)
        .map_or(0, |(_, cost)| *cost)
}

impl ProgressionState {
    #[must_use]
    pub const fn rank(&self, attribute: Attribute) -> u32 {
        match attribute {
            Attribute::Damage => self.damage_rank,
            Attribute::Defense => self.defense_rank,
            Attribute::Agility => self.agility_rank,
        }
    }

    const fn rank_mut(&mut self, attribute: Attribute) -> &mut u32 {
        match attribute {
            Attribute::Damage => &mut self.damage_rank,
            Attribute::Defense => &mut self.defense_rank,
            Attribute::Agility => &mut self.agility_rank,
        }
    }

    #[must_use]
    pub fn next_cost(&self, attribute: Attribute) -> u32 {
        allocation_cost(attribute, self.rank(attribute))
    }

    /// Buy one rank of `attribute`. Returns `false` without mutating when the
    /// player cannot afford it. Ranks are uncapped.
    pub fn allocate(&mut self, attribute: Attribute, ctx: &SoulContext) -> bool {
        let cost = self.next_cost(attribute);
        if self.basic_points < cost {
            return false;
        }
        self.basic_points -= cost;
        let rank = self.rank_mut(attribute);
        *rank = rank.saturating_add(1);
        ctx.logger().debug(format_args!(
            "{attribute} rank {} for {cost} basic point(s)",
            self.rank(attribute)
        ));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SoulConfig;

    fn ctx() -> SoulContext {
        SoulContext::new(SoulConfig::default())
    }

    #[test]
    fn damage_cost_boundaries() {
        assert_eq!(allocation_cost(Attribute::Damage, 0), 1);
        assert_eq!(allocation_cost(Attribute::Damage, 9), 1);
        assert_eq!(allocation_cost(Attribute::Damage, 10), 2);
        assert_eq!(allocation_cost(Attribute::Damage, 19), 2);
        assert_eq!(allocation_cost(Attribute::Damage, 20), 3);
        assert_eq!(allocation_cost(Attribute::Damage, 500), 3);
    }

    #[test]
    fn defense_cost_boundaries() {
        assert_eq!(allocation_cost(Attribute::Defense, 0), 2);
        assert_eq!(allocation_cost(Attribute::Defense, 4), 2);
        assert_eq!(allocation_cost(Attribute::Defense, 5), 3);
        assert_eq!(allocation_cost(Attribute::Defense, 9), 3);
        assert_eq!(allocation_cost(Attribute::Defense, 10), 4);
    }

    #[test]
    fn agility_cost_boundaries() {
        assert_eq!(allocation_cost(Attribute::Agility, 0), 2);
        assert_eq!(allocation_cost(Attribute::Agility, 9), 2);
        assert_eq!(allocation_cost(Attribute::Agility, 10), 3);
        assert_eq!(allocation_cost(Attribute::Agility, 40), 3);
    }

    #[test]
    fn damage_rank_nine_to_ten_crosses_a_step() {
        let mut state = ProgressionState {
            damage_rank: 9,
            basic_points: 3,
            ..ProgressionState::default()
        };
        assert!(state.allocate(Attribute::Damage, &ctx()));
        assert_eq!(state.damage_rank, 10);
        assert_eq!(state.basic_points, 2);
        assert_eq!(state.next_cost(Attribute::Damage), 2);
        assert!(state.allocate(Attribute::Damage, &ctx()));
        assert_eq!(state.basic_points, 0);
        assert_eq!(state.damage_rank, 11);
    }

    #[test]
    fn insufficient_points_is_a_no_op() {
        let mut state = ProgressionState {
            basic_points: 1,
            ..ProgressionState::default()
        };
        let before = state.clone();
        assert!(!state.allocate(Attribute::Defense, &ctx()));
        assert!(!state.allocate(Attribute::Agility, &ctx()));
        assert_eq!(state, before);
        assert!(state.allocate(Attribute::Damage, &ctx()));
        assert_eq!(state.rank(Attribute::Damage), 1);
        assert_eq!(state.basic_points, 0);
    }

    #[test]
    fn attributes_parse_and_display() {
        for attribute in Attribute::ALL {
            assert_eq!(attribute.to_string().parse::<Attribute>(), Ok(attribute));
        }
        assert_eq!("luck".parse::<Attribute>(), Err(()));
    }
}
