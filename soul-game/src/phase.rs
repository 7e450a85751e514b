//! World resonance phases and the level cap they impose.
//!
//! The phase is never stored: it is recomputed from the host's milestone
//! flags on every query so a boss defeated mid-session raises the cap at once.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::LEVEL_CAP_STEP;

/// World-progress signals reported by the host game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Milestone {
    FirstBoss,
    DungeonGuardian,
    HardMode,
    AnyMechanicalBoss,
    JungleBoss,
    TempleBoss,
    FinalBoss,
}

impl Milestone {
    pub const ALL: [Self; 7] = [
        Self::FirstBoss,
        Self::DungeonGuardian,
        Self::HardMode,
        Self::AnyMechanicalBoss,
        Self::JungleBoss,
        Self::TempleBoss,
        Self::FinalBoss,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstBoss => "first_boss",
            Self::DungeonGuardian => "dungeon_guardian",
            Self::HardMode => "hard_mode",
            Self::AnyMechanicalBoss => "any_mechanical_boss",
            Self::JungleBoss => "jungle_boss",
            Self::TempleBoss => "temple_boss",
            Self::FinalBoss => "final_boss",
        }
    }
}

impl fmt::Display for Milestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Milestone {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|milestone| milestone.as_str() == s)
            .ok_or(())
    }
}

/// Read-only oracle over the host's world state.
pub trait WorldProgress {
    fn reached(&self, milestone: Milestone) -> bool;
}

impl<W: WorldProgress + ?Sized> WorldProgress for &W {
    fn reached(&self, milestone: Milestone) -> bool {
        (**self).reached(milestone)
    }
}

/// Plain milestone flags, for hosts that snapshot world state and for tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldFlags {
    pub first_boss: bool,
    pub dungeon_guardian: bool,
    pub hard_mode: bool,
    pub any_mechanical_boss: bool,
    pub jungle_boss: bool,
    pub temple_boss: bool,
    pub final_boss: bool,
}

impl WorldFlags {
    #[must_use]
    pub fn with(mut self, milestone: Milestone) -> Self {
        self.set(milestone, true);
        self
    }

    pub fn set(&mut self, milestone: Milestone, reached: bool) {
        let flag = match milestone {
            Milestone::FirstBoss => &mut self.first_boss,
            Milestone::DungeonGuardian => &mut self.dungeon_guardian,
            Milestone::HardMode => &mut self.hard_mode,
            Milestone::AnyMechanicalBoss => &mut self.any_mechanical_boss,
            Milestone::JungleBoss => &mut self.jungle_boss,
            Milestone::TempleBoss => &mut self.temple_boss,
            Milestone::FinalBoss => &mut self.final_boss,
        };
        *flag = reached;
    }

    /// Flags for a world that has progressed exactly through `phase`.
    #[must_use]
    pub fn through(phase: Phase) -> Self {
        Phase::ALL
            .into_iter()
            .filter(|p| *p <= phase)
            .filter_map(Phase::milestone)
            .fold(Self::default(), Self::with)
    }
}

impl WorldProgress for WorldFlags {
    fn reached(&self, milestone: Milestone) -> bool {
        match milestone {
            Milestone::FirstBoss => self.first_boss,
            Milestone::DungeonGuardian => self.dungeon_guardian,
            Milestone::HardMode => self.hard_mode,
            Milestone::AnyMechanicalBoss => self.any_mechanical_boss,
            Milestone::JungleBoss => self.jungle_boss,
            Milestone::TempleBoss => self.temple_boss,
            Milestone::FinalBoss => self.final_boss,
        }
    }
}

/// Resonance phase, ordered from the start of the game to the endgame.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Start = 1,
    PreHardmodeEarly = 2,
    PreHardmodeMid = 3,
    Hardmode = 4,
    MechanicalBosses = 5,
    Plantera = 6,
    LateGame = 7,
    Endgame = 8,
}

impl Phase {
    pub const ALL: [Self; 8] = [
        Self::Start,
        Self::PreHardmodeEarly,
        Self::PreHardmodeMid,
        Self::Hardmode,
        Self::MechanicalBosses,
        Self::Plantera,
        Self::LateGame,
        Self::Endgame,
    ];

    /// One-based ordinal.
    #[must_use]
    pub const fn index(self) -> u32 {
        self as u32
    }

    #[must_use]
    pub const fn level_cap(self) -> u32 {
        self.index() * LEVEL_CAP_STEP
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::PreHardmodeEarly => "Pre-Hardmode Early",
            Self::PreHardmodeMid => "Pre-Hardmode Mid",
            Self::Hardmode => "Hardmode",
            Self::MechanicalBosses => "Mechanical Bosses",
            Self::Plantera => "Plantera",
            Self::LateGame => "Late Game",
            Self::Endgame => "Endgame",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::PreHardmodeEarly => "pre_hardmode_early",
            Self::PreHardmodeMid => "pre_hardmode_mid",
            Self::Hardmode => "hardmode",
            Self::MechanicalBosses => "mechanical_bosses",
            Self::Plantera => "plantera",
            Self::LateGame => "late_game",
            Self::Endgame => "endgame",
        }
    }

    /// Milestone that unlocks this phase; the first phase is unconditional.
    #[must_use]
    pub const fn milestone(self) -> Option<Milestone> {
        match self {
            Self::Start => None,
            Self::PreHardmodeEarly => Some(Milestone::FirstBoss),
            Self::PreHardmodeMid => Some(Milestone::DungeonGuardian),
            Self::Hardmode => Some(Milestone::HardMode),
            Self::MechanicalBosses => Some(Milestone::AnyMechanicalBoss),
            Self::Plantera => Some(Milestone::JungleBoss),
            Self::LateGame => Some(Milestone::TempleBoss),
            Self::Endgame => Some(Milestone::FinalBoss),
        }
    }

    fn unlocked_in<W: WorldProgress + ?Sized>(self, world: &W) -> bool {
        self.milestone().is_none_or(|m| world.reached(m))
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|p| p.as_str() == s).ok_or(())
    }
}

/// Highest phase whose milestone the world has reached, checked from the top down.
#[must_use]
pub fn current_phase<W: WorldProgress + ?Sized>(world: &W) -> Phase {
    Phase::ALL
        .into_iter()
        .rev()
        .find(|phase| phase.unlocked_in(world))
        .unwrap_or(Phase::Start)
}

#[must_use]
pub fn current_level_cap<W: WorldProgress + ?Sized>(world: &W) -> u32 {
    current_phase(world).level_cap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caps_step_by_ten() {
        let caps: Vec<u32> = Phase::ALL.iter().map(|p| p.level_cap()).collect();
        assert_eq!(caps, vec![10, 20, 30, 40, 50, 60, 70, 80]);
        assert!(Phase::Start < Phase::Endgame);
        assert_eq!(Phase::default(), Phase::Start);
    }

    #[test]
    fn fresh_world_is_start_phase() {
        let world = WorldFlags::default();
        assert_eq!(current_phase(&world), Phase::Start);
        assert_eq!(current_level_cap(&world), 10);
    }

    #[test]
    fn highest_reached_milestone_wins() {
        // Hard mode without the dungeon guardian still lands in Hardmode.
        let world = WorldFlags::default()
            .with(Milestone::FirstBoss)
            .with(Milestone::HardMode);
        assert_eq!(current_phase(&world), Phase::Hardmode);

        let world = world.with(Milestone::FinalBoss);
        assert_eq!(current_phase(&world), Phase::Endgame);
        assert_eq!(current_level_cap(&world), 80);
    }

    #[test]
    fn through_reaches_exactly_that_phase() {
        for phase in Phase::ALL {
            assert_eq!(current_phase(&WorldFlags::through(phase)), phase);
        }
        assert_eq!(WorldFlags::through(Phase::Start), WorldFlags::default());
    }

    #[test]
    fn live_world_changes_are_observed() {
        let mut world = WorldFlags::default();
        assert_eq!(current_phase(&world), Phase::Start);
        world.set(Milestone::JungleBoss, true);
        assert_eq!(current_phase(&world), Phase::Plantera);
        world.set(Milestone::JungleBoss, false);
        assert_eq!(current_phase(&world), Phase::Start);
    }

    #[test]
    fn names_parse_and_display() {
        for phase in Phase::ALL {
            assert_eq!(phase.to_string().parse::<Phase>(), Ok(phase));
            assert!(!phase.display_name().is_empty());
        }
        for milestone in Milestone::ALL {
            assert_eq!(milestone.to_string().parse::<Milestone>(), Ok(milestone));
        }
        assert_eq!("nowhere".parse::<Phase>(), Err(()));
        assert_eq!(Phase::MechanicalBosses.display_name(), "Mechanical Bosses");
    }
}
