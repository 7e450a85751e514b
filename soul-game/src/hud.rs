//! Read-only display models for the HUD, attribute panel, and talent tree.
//!
//! Rendering stays with the host; these functions only describe what to draw.

use serde::{Deserialize, Serialize};

use crate::allocation::Attribute;
use crate::context::SoulContext;
use crate::numbers::u64_to_f64;
use crate::phase::{Phase, WorldProgress, current_phase};
use crate::progression::ProgressionState;
use crate::talents::{NodeStatus, TalentCatalog};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeRow {
    pub attribute: Attribute,
    pub name: String,
    pub rank: u32,
    pub next_cost: u32,
    pub affordable: bool,
    pub bonus_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudModel {
    pub level: u32,
    pub experience: u64,
    /// XP for the next level; zero once the cap is reached.
    pub xp_to_next: u64,
    /// Fraction of the way to the next level, in `[0, 1]`.
    pub progress: f64,
    pub at_cap: bool,
    pub level_cap: u32,
    pub phase: Phase,
    pub phase_name: String,
    pub basic_points: u32,
    pub talent_points: u32,
    pub opacity: f32,
    pub attributes: Vec<AttributeRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalentNodeView {
    pub id: String,
    pub name: String,
    pub name_en: String,
    pub cost: u32,
    pub required_level: u32,
    pub required_phase: Phase,
    pub ring: u8,
    pub angle: f32,
    pub status: NodeStatus,
}

#[must_use]
pub fn render<W: WorldProgress + ?Sized>(
    state: &ProgressionState,
    world: &W,
    ctx: &SoulContext,
) -> HudModel {
    let config = ctx.config();
    let phase = current_phase(world);
    let level_cap = phase.level_cap();
    let at_cap = state.level >= level_cap;
    let xp_to_next = if at_cap {
        0
    } else {
        state.xp_for_next_level(config)
    };
    let progress = if xp_to_next == 0 {
        1.0
    } else {
        (u64_to_f64(state.experience) / u64_to_f64(xp_to_next)).clamp(0.0, 1.0)
    };

    let attributes = Attribute::ALL
        .into_iter()
        .map(|attribute| {
            let next_cost = state.next_cost(attribute);
            AttributeRow {
                attribute,
                name: attribute.display_name().to_string(),
                rank: state.rank(attribute),
                next_cost,
                affordable: state.basic_points >= next_cost,
                bonus_label: attribute.bonus_label().to_string(),
            }
        })
        .collect();

    HudModel {
        level: state.level,
        experience: state.experience,
        xp_to_next,
        progress,
        at_cap,
        level_cap,
        phase,
        phase_name: phase.display_name().to_string(),
        basic_points: state.basic_points,
        talent_points: state.talent_points,
        opacity: config.hud_opacity,
        attributes,
    }
}

#[must_use]
pub fn talent_tree<W: WorldProgress + ?Sized>(
    state: &ProgressionState,
    catalog: &TalentCatalog,
    world: &W,
) -> Vec<TalentNodeView> {
    let phase = current_phase(world);
    catalog
        .iter()
        .map(|node| TalentNodeView {
            id: node.id.clone(),
            name: node.name.clone(),
            name_en: node.name_en.clone(),
            cost: node.talent_point_cost,
            required_level: node.required_level,
            required_phase: node.required_phase,
            ring: node.ring,
            angle: node.angle,
            status: state.talent_status(node, phase),
        })
        .collect()
}
