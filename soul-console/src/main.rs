mod commands;
mod report;
mod simulate;
mod storage;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::io::{BufWriter, stdout};
use std::path::PathBuf;

use soul_game::{Milestone, Phase, SoulEngine, WorldFlags, render, talent_tree};

use commands::{Command, apply, parse_phase};
use report::{PlayerReport, generate_console_report, generate_json_report};
use storage::{FileDataLoader, FileStorage};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    /// Colored, human-readable summary
    Console,
    /// Machine-readable JSON
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "soul-console", version = "0.1.0")]
#[command(about = "Debug console and kill simulator for Soul-Attuned progression saves")]
struct Args {
    /// Directory holding one JSON save per player
    #[arg(long, default_value = "saves")]
    saves: PathBuf,

    /// Player whose save is loaded and written back
    #[arg(long, default_value = "player")]
    player: String,

    /// Configuration JSON (defaults to the bundled config)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Talent catalog JSON (defaults to the bundled tree)
    #[arg(long)]
    talents: Option<PathBuf>,

    /// Highest phase the world has reached
    #[arg(long, value_parser = parse_phase, default_value = "start")]
    phase: Phase,

    /// Extra milestones reached (comma-separated, e.g. first_boss,hard_mode)
    #[arg(long, default_value = "")]
    world: String,

    /// Enable debug mode and the privileged commands
    #[arg(long)]
    debug: bool,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let world = build_world(args.phase, &args.world)?;
    let loader =
        FileDataLoader::new(args.config.clone(), args.talents.clone()).with_debug(args.debug);
    let engine = SoulEngine::new(loader, FileStorage::new(&args.saves))?;
    let ctx = engine.context();

    let mut state = engine
        .load_player(&args.player)
        .with_context(|| format!("failed to load save for {}", args.player))?;
    log::debug!(
        "loaded {} at level {} from {}",
        args.player,
        state.level,
        args.saves.display()
    );
    let outcome = apply(&args.command, &mut state, ctx, engine.catalog(), &world)?;
    if !outcome.success {
        log::warn!("{} refused for {}: {}", outcome.command, args.player, outcome.message);
    }
    engine
        .save_player(&args.player, &state)
        .with_context(|| format!("failed to write save for {}", args.player))?;
    log::debug!("saved {} at level {}", args.player, state.level);

    let talents = matches!(args.command, Command::Talents | Command::Unlock { .. })
        .then(|| talent_tree(&state, engine.catalog(), &world));
    let report = PlayerReport {
        player: args.player.clone(),
        outcome,
        hud: render(&state, &world, ctx),
        bonuses: state.on_tick(),
        talents,
    };

    match args.report {
        ReportFormat::Console => {
            announce_banner();
            generate_console_report(&report);
        }
        ReportFormat::Json => {
            let mut writer = BufWriter::new(stdout());
            generate_json_report(&mut writer, &report)?;
        }
    }

    if !report.outcome.success {
        std::process::exit(1);
    }
    Ok(())
}

fn announce_banner() {
    println!("{}", "🔮 Soul-Attuned Console".bright_cyan().bold());
    println!("{}", "================================".cyan());
}

fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// World flags through `phase`, plus any individually listed milestones.
fn build_world(phase: Phase, milestones: &str) -> Result<WorldFlags> {
    let mut world = WorldFlags::through(phase);
    for name in split_csv(milestones) {
        let milestone: Milestone = name
            .parse()
            .map_err(|()| anyhow::anyhow!("unknown milestone `{name}`"))?;
        world.set(milestone, true);
    }
    Ok(world)
}

#[cfg(test)]
mod tests {
    use super::*;
    use soul_game::current_phase;

    #[test]
    fn split_csv_trims_and_filters() {
        let parts = split_csv(" first_boss, ,hard_mode,  ");
        assert_eq!(parts, vec!["first_boss", "hard_mode"]);
    }

    #[test]
    fn world_combines_phase_and_milestones() {
        let world = build_world(Phase::PreHardmodeMid, "").unwrap();
        assert_eq!(current_phase(&world), Phase::PreHardmodeMid);

        let world = build_world(Phase::Start, "first_boss,hard_mode").unwrap();
        assert_eq!(current_phase(&world), Phase::Hardmode);

        assert!(build_world(Phase::Start, "moon_lord").is_err());
    }
}
