use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;

use soul_game::{HudModel, NodeStatus, StatBonuses, TalentNodeView};

use crate::commands::CommandOutcome;

#[derive(Debug, Clone, Serialize)]
pub struct PlayerReport {
    pub player: String,
    pub outcome: CommandOutcome,
    pub hud: HudModel,
    pub bonuses: StatBonuses,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub talents: Option<Vec<TalentNodeView>>,
}

/// Write the report as pretty JSON
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn generate_json_report<W: Write>(writer: &mut W, report: &PlayerReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, report)?;
    writeln!(writer)?;
    Ok(())
}

pub fn generate_console_report(report: &PlayerReport) {
    let outcome = &report.outcome;
    let status = if outcome.success {
        "✅".green()
    } else {
        "❌".red()
    };
    if outcome.message.is_empty() {
        println!("{status} {}", outcome.command.bold());
    } else {
        println!("{status} {} {}", outcome.command.bold(), outcome.message);
    }
    for up in &outcome.level_ups {
        if up.talent_point_granted {
            println!(
                "   ⬆️  Level {} {}",
                up.level.to_string().bright_green(),
                "+1 talent point".bright_magenta()
            );
        } else {
            println!("   ⬆️  Level {}", up.level.to_string().bright_green());
        }
    }
    if let Some(sim) = &outcome.simulation {
        println!(
            "   Seed {} | {} kills ({} bosses skipped) | {} xp",
            sim.seed, sim.kills, sim.bosses_skipped, sim.xp_awarded
        );
    }
    println!();

    print_hud(&report.player, &report.hud);
    print_bonuses(&report.bonuses);
    if let Some(talents) = &report.talents {
        print_talents(talents);
    }
}

fn print_hud(player: &str, hud: &HudModel) {
    println!("{}", format!("🔮 {player}").bright_cyan().bold());
    println!("{}", "=".repeat(32).cyan());
    println!(
        "Level {} / {} ({})",
        hud.level.to_string().bold(),
        hud.level_cap,
        hud.phase_name
    );
    if hud.at_cap {
        println!(
            "XP: {} banked {}",
            hud.experience,
            "[at cap]".yellow()
        );
    } else {
        println!(
            "XP: {} / {} ({:.1}%)",
            hud.experience,
            hud.xp_to_next,
            hud.progress * 100.0
        );
    }
    println!(
        "Basic points: {} | Talent points: {}",
        hud.basic_points.to_string().green(),
        hud.talent_points.to_string().magenta()
    );
    for row in &hud.attributes {
        let cost = format!("next {}", row.next_cost);
        let cost = if row.affordable {
            cost.green()
        } else {
            cost.dimmed()
        };
        println!(
            "  {:14} rank {:>3}  {cost}  ({})",
            row.name, row.rank, row.bonus_label
        );
    }
}

fn print_bonuses(bonuses: &StatBonuses) {
    if bonuses.is_empty() {
        return;
    }
    println!(
        "Bonuses: +{:.1}% damage, +{} defense, +{:.1}% move speed",
        bonuses.damage * 100.0,
        bonuses.defense,
        bonuses.move_speed * 100.0
    );
}

fn print_talents(talents: &[TalentNodeView]) {
    println!();
    println!("{}", "🌳 Talent Tree".bright_yellow().bold());
    println!("{}", "=".repeat(32).yellow());
    for view in talents {
        let status = match view.status {
            NodeStatus::Active => view.status.as_str().green(),
            NodeStatus::Unlockable => view.status.as_str().bright_cyan(),
            _ => view.status.as_str().dimmed(),
        };
        println!(
            "  [{}] {:14} {:18} cost {} lvl {:>2}  {status}",
            view.ring, view.id, view.name_en, view.cost, view.required_level
        );
    }
}
