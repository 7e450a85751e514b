//! Talent nodes, the content catalog, and the talent ledger on [`ProgressionState`].
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

use crate::constants::{DEFAULT_TALENT_COST, MAX_TALENT_RING, MIN_LEVEL};
use crate::context::SoulContext;
use crate::phase::{Phase, WorldProgress, current_phase};
use crate::progression::ProgressionState;

const DEFAULT_TALENT_DATA: &str = include_str!("../assets/talents.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TalentNodeType {
    /// Permanent effect.
    #[default]
    Passive,
    /// Triggered by the player.
    Active,
    /// Large build-defining passive.
    Keystone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassBranch {
    #[default]
    Universal,
    Melee,
    Ranged,
    Mage,
    Summoner,
}

/// Unlock eligibility of a node for one player, as shown in the talent tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    /// Already unlocked.
    Active,
    Unlockable,
    /// Not enough talent points, or the player's level is too low.
    LockedPoints,
    LockedPhase,
    LockedPrerequisites,
}

impl NodeStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Unlockable => "unlockable",
            Self::LockedPoints => "locked_points",
            Self::LockedPhase => "locked_phase",
            Self::LockedPrerequisites => "locked_prerequisites",
        }
    }

    #[must_use]
    pub const fn reason(self) -> &'static str {
        match self {
            Self::Active => "Node already active",
            Self::Unlockable => "Ready to unlock",
            Self::LockedPoints => "Not enough talent points",
            Self::LockedPhase => "World resonance too low",
            Self::LockedPrerequisites => "Prerequisite nodes not unlocked",
        }
    }
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static definition of one talent. Immutable after content load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalentNode {
    pub id: String,
    /// Name in the mod's native language.
    pub name: String,
    pub name_en: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_cost")]
    pub talent_point_cost: u32,
    #[serde(default = "default_required_level")]
    pub required_level: u32,
    #[serde(default)]
    pub required_phase: Phase,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub node_type: TalentNodeType,
    #[serde(default)]
    pub class_branch: ClassBranch,
    /// Tree ring, 0 is the core.
    #[serde(default)]
    pub ring: u8,
    /// Degrees around the ring.
    #[serde(default)]
    pub angle: f32,
}

fn default_cost() -> u32 {
    DEFAULT_TALENT_COST
}

fn default_required_level() -> u32 {
    MIN_LEVEL
}

impl TalentNode {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        name_en: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            name_en: name_en.into(),
            description: description.into(),
            talent_point_cost: DEFAULT_TALENT_COST,
            required_level: MIN_LEVEL,
            required_phase: Phase::Start,
            prerequisites: Vec::new(),
            node_type: TalentNodeType::Passive,
            class_branch: ClassBranch::Universal,
            ring: 0,
            angle: 0.0,
        }
    }

    #[must_use]
    pub const fn with_cost(mut self, cost: u32) -> Self {
        self.talent_point_cost = cost;
        self
    }

    #[must_use]
    pub const fn with_required_level(mut self, level: u32) -> Self {
        self.required_level = level;
        self
    }

    #[must_use]
    pub const fn with_required_phase(mut self, phase: Phase) -> Self {
        self.required_phase = phase;
        self
    }

    #[must_use]
    pub fn with_prerequisites<I, S>(mut self, prerequisites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prerequisites = prerequisites.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub const fn with_position(mut self, ring: u8, angle: f32) -> Self {
        self.ring = ring;
        self.angle = angle;
        self
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate talent id `{0}`")]
    DuplicateId(String),
    #[error("talent `{node}` requires unknown talent `{prerequisite}`")]
    UnknownPrerequisite { node: String, prerequisite: String },
    #[error("talent `{node}` sits on ring {ring}, beyond the outermost ring")]
    RingOutOfRange { node: String, ring: u8 },
}

/// Every talent node known to the game, in content order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TalentCatalog {
    nodes: Vec<TalentNode>,
}

#[derive(Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    nodes: Vec<TalentNode>,
}

impl TalentCatalog {
    #[must_use]
    pub const fn empty() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Build a catalog, checking ids are unique and prerequisites resolve.
    ///
    /// # Errors
    ///
    /// Returns an error for duplicate ids, dangling prerequisites, or rings
    /// past the outermost one.
    pub fn from_nodes(nodes: Vec<TalentNode>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(nodes.len());
        for node in &nodes {
            if !seen.insert(node.id.as_str()) {
                return Err(CatalogError::DuplicateId(node.id.clone()));
            }
            if node.ring > MAX_TALENT_RING {
                return Err(CatalogError::RingOutOfRange {
                    node: node.id.clone(),
                    ring: node.ring,
                });
            }
        }
        for node in &nodes {
            if let Some(missing) = node
                .prerequisites
                .iter()
                .find(|id| !seen.contains(id.as_str()))
            {
                return Err(CatalogError::UnknownPrerequisite {
                    node: node.id.clone(),
                    prerequisite: missing.clone(),
                });
            }
        }
        Ok(Self { nodes })
    }

    /// Load a catalog from a `{ "nodes": [...] }` JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or the nodes are inconsistent.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        Self::from_nodes(document.nodes)
    }

    /// Bundled talent tree shipped with the crate.
    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_TALENT_DATA).unwrap_or_default()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&TalentNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TalentNode> {
        self.nodes.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<'a> IntoIterator for &'a TalentCatalog {
    type Item = &'a TalentNode;
    type IntoIter = std::slice::Iter<'a, TalentNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

impl ProgressionState {
    #[must_use]
    pub fn has_talent(&self, id: &str) -> bool {
        self.unlocked_talents.contains(id)
    }

    /// Eligibility of `node` in the given phase. The first failing check wins:
    /// owned, then points and level, then phase, then prerequisites. Unlocking
    /// always needs at least one point, even for a node that costs nothing.
    #[must_use]
    pub fn talent_status(&self, node: &TalentNode, phase: Phase) -> NodeStatus {
        if self.has_talent(&node.id) {
            return NodeStatus::Active;
        }
        if self.talent_points < node.talent_point_cost.max(1) || self.level < node.required_level {
            return NodeStatus::LockedPoints;
        }
        if phase < node.required_phase {
            return NodeStatus::LockedPhase;
        }
        if !node.prerequisites.iter().all(|id| self.has_talent(id)) {
            return NodeStatus::LockedPrerequisites;
        }
        NodeStatus::Unlockable
    }

    /// Spend talent points on `id`. Returns `false` without mutating when the
    /// id is unknown, no points are left, or the node is not unlockable.
    /// Deducts the node's own point cost.
    pub fn unlock_talent<W: WorldProgress + ?Sized>(
        &mut self,
        catalog: &TalentCatalog,
        id: &str,
        world: &W,
        ctx: &SoulContext,
    ) -> bool {
        let Some(node) = catalog.get(id) else {
            ctx.logger().warn(format_args!("unlock requested for unknown talent `{id}`"));
            return false;
        };
        let status = self.talent_status(node, current_phase(world));
        if status != NodeStatus::Unlockable {
            ctx.logger()
                .debug(format_args!("talent `{id}` not unlocked: {}", status.reason()));
            return false;
        }

        self.talent_points -= node.talent_point_cost;
        self.unlocked_talents.insert(node.id.clone());
        ctx.logger().info(format_args!(
            "unlocked talent `{id}` for {} point(s)",
            node.talent_point_cost
        ));
        true
    }

    /// Insert a talent without any checks or cost. Returns `false` if already owned.
    pub fn grant_talent(&mut self, id: impl Into<String>) -> bool {
        self.unlocked_talents.insert(id.into())
    }
}
