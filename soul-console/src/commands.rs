use anyhow::{Result, bail};
use clap::Subcommand;
use serde::Serialize;

use soul_game::{
    Attribute, CombatStats, KillEvent, LevelUp, Phase, ProgressionState, SoulContext,
    TalentCatalog, WorldFlags, current_level_cap, current_phase, on_kill,
};

use crate::simulate::{SimulationSummary, run_simulation};

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Add experience through the normal leveling path (debug)
    #[command(name = "addxp")]
    AddXp {
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
    /// Force the level, clamped to the current phase cap (debug)
    #[command(name = "setlevel")]
    SetLevel { level: u32 },
    /// Grant talent points (debug)
    #[command(name = "addtalent")]
    AddTalent { points: u32 },
    /// Grant basic points (debug)
    #[command(name = "addbasic")]
    AddBasic { points: u32 },
    /// Wipe the player back to a fresh character (debug)
    Reset,
    /// Show the player's progression (debug)
    Info,
    /// Spend basic points on one rank of an attribute
    Allocate {
        #[arg(value_parser = parse_attribute)]
        attribute: Attribute,
    },
    /// Spend talent points on a talent node
    Unlock { id: String },
    /// List the talent tree with each node's status
    Talents,
    /// Award a single kill
    Kill {
        #[arg(long)]
        hp: i32,
        #[arg(long, default_value_t = 0)]
        defense: i32,
        #[arg(long, default_value_t = 0)]
        damage: i32,
        #[arg(long)]
        boss: bool,
    },
    /// Run a seeded batch of random kills
    Simulate {
        #[arg(long, default_value_t = 1337)]
        seed: u64,
        #[arg(long, default_value_t = 100)]
        kills: u32,
    },
}

impl Command {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AddXp { .. } => "addxp",
            Self::SetLevel { .. } => "setlevel",
            Self::AddTalent { .. } => "addtalent",
            Self::AddBasic { .. } => "addbasic",
            Self::Reset => "reset",
            Self::Info => "info",
            Self::Allocate { .. } => "allocate",
            Self::Unlock { .. } => "unlock",
            Self::Talents => "talents",
            Self::Kill { .. } => "kill",
            Self::Simulate { .. } => "simulate",
        }
    }

    /// Commands that bypass normal play and need debug mode.
    #[must_use]
    pub const fn is_privileged(&self) -> bool {
        matches!(
            self,
            Self::AddXp { .. }
                | Self::SetLevel { .. }
                | Self::AddTalent { .. }
                | Self::AddBasic { .. }
                | Self::Reset
                | Self::Info
        )
    }
}

fn parse_attribute(value: &str) -> Result<Attribute, String> {
    value
        .to_ascii_lowercase()
        .parse()
        .map_err(|()| format!("unknown attribute `{value}` (damage, defense, agility)"))
}

pub fn parse_phase(value: &str) -> Result<Phase, String> {
    value
        .parse()
        .map_err(|()| format!("unknown phase `{value}`"))
}

/// What a command did, for the report.
#[derive(Debug, Clone, Serialize)]
pub struct CommandOutcome {
    pub command: &'static str,
    pub success: bool,
    pub message: String,
    pub level_ups: Vec<LevelUp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simulation: Option<SimulationSummary>,
}

impl CommandOutcome {
    fn ok(command: &Command, message: impl Into<String>) -> Self {
        Self {
            command: command.name(),
            success: true,
            message: message.into(),
            level_ups: Vec::new(),
            simulation: None,
        }
    }

    fn refused(command: &Command, message: impl Into<String>) -> Self {
        Self {
            success: false,
            ..Self::ok(command, message)
        }
    }
}

/// Apply `command` to `state`.
///
/// # Errors
///
/// Returns an error when a privileged command is used without debug mode.
pub fn apply(
    command: &Command,
    state: &mut ProgressionState,
    ctx: &SoulContext,
    catalog: &TalentCatalog,
    world: &WorldFlags,
) -> Result<CommandOutcome> {
    if command.is_privileged() && !ctx.debug_mode() {
        bail!(
            "`{}` is a debug command; enable debug_mode or pass --debug",
            command.name()
        );
    }

    let outcome = match command {
        Command::AddXp { amount } => {
            let ups = state.add_xp(*amount, ctx, world);
            let mut outcome = CommandOutcome::ok(command, format!("added {amount} xp"));
            outcome.level_ups = ups.into_vec();
            outcome
        }
        Command::SetLevel { level } => {
            state.set_level(*level, current_level_cap(world));
            CommandOutcome::ok(command, format!("level set to {}", state.level))
        }
        Command::AddTalent { points } => {
            state.add_talent_points(*points);
            CommandOutcome::ok(command, format!("added {points} talent point(s)"))
        }
        Command::AddBasic { points } => {
            state.add_basic_points(*points);
            CommandOutcome::ok(command, format!("added {points} basic point(s)"))
        }
        Command::Reset => {
            state.reset();
            CommandOutcome::ok(command, "progression reset")
        }
        Command::Info | Command::Talents => CommandOutcome::ok(command, ""),
        Command::Allocate { attribute } => {
            let cost = state.next_cost(*attribute);
            if state.allocate(*attribute, ctx) {
                CommandOutcome::ok(
                    command,
                    format!(
                        "{} is now rank {}",
                        attribute.display_name(),
                        state.rank(*attribute)
                    ),
                )
            } else {
                CommandOutcome::refused(
                    command,
                    format!(
                        "{} needs {cost} basic point(s), have {}",
                        attribute.display_name(),
                        state.basic_points
                    ),
                )
            }
        }
        Command::Unlock { id } => unlock(command, state, ctx, catalog, world, id),
        Command::Kill {
            hp,
            defense,
            damage,
            boss,
        } => {
            let kill = KillEvent {
                stats: CombatStats::new(*hp, *defense, *damage),
                is_boss: *boss,
            };
            let result = on_kill(&kill, [&mut *state], ctx, world);
            let mut outcome =
                CommandOutcome::ok(command, format!("kill worth {} xp", result.xp_awarded));
            outcome.level_ups = result.level_ups.into_iter().flatten().collect();
            outcome
        }
        Command::Simulate { seed, kills } => {
            let summary = run_simulation(state, *seed, *kills, ctx, world);
            let mut outcome = CommandOutcome::ok(
                command,
                format!(
                    "{kills} kills awarded {} xp, level {} -> {}",
                    summary.xp_awarded, summary.start_level, summary.end_level
                ),
            );
            outcome.level_ups.clone_from(&summary.level_ups);
            outcome.simulation = Some(summary);
            outcome
        }
    };
    Ok(outcome)
}

fn unlock(
    command: &Command,
    state: &mut ProgressionState,
    ctx: &SoulContext,
    catalog: &TalentCatalog,
    world: &WorldFlags,
    id: &str,
) -> CommandOutcome {
    let Some(node) = catalog.get(id) else {
        return CommandOutcome::refused(command, format!("unknown talent `{id}`"));
    };
    let status = state.talent_status(node, current_phase(world));
    if state.unlock_talent(catalog, id, world, ctx) {
        CommandOutcome::ok(command, format!("unlocked {}", node.name_en))
    } else {
        CommandOutcome::refused(
            command,
            format!("cannot unlock {}: {}", node.name_en, status.reason()),
        )
    }
}
