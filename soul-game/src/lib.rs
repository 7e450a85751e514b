//! Soul-Attuned Progression Engine
//!
//! Platform-agnostic leveling, talent, and attribute logic for the Soul-Attuned
//! mod. Hosts feed in kills and world milestones; this crate owns the player's
//! progression record and its save format.

pub mod allocation;
pub mod bonuses;
pub mod config;
pub mod constants;
pub mod context;
pub mod formula;
pub mod hooks;
pub mod hud;
pub mod numbers;
pub mod persistence;
pub mod phase;
pub mod progression;
pub mod reward;
pub mod talents;

use anyhow::Context as _;

// Re-export commonly used types
pub use allocation::{Attribute, allocation_cost};
pub use bonuses::StatBonuses;
pub use config::{ConfigError, SoulConfig};
pub use context::{SoulContext, SoulLogger};
pub use formula::{cumulative_xp, required_xp};
pub use hooks::{KillOutcome, kill_xp, on_kill, on_kill_nearby};
pub use hud::{AttributeRow, HudModel, TalentNodeView, render, talent_tree};
pub use persistence::{TagCompound, TagValue};
pub use phase::{
    Milestone, Phase, WorldFlags, WorldProgress, current_level_cap, current_phase,
};
pub use progression::{LevelUp, LevelUps, ProgressionState};
pub use reward::{CombatStats, KillEvent, Recipient, apply_multiplier, xp_for};
pub use talents::{
    CatalogError, ClassBranch, NodeStatus, TalentCatalog, TalentNode, TalentNodeType,
};

/// Source of configuration and talent content.
/// Platform-specific implementations should provide this
pub trait DataLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the mod configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be read or parsed.
    fn load_config(&self) -> Result<SoulConfig, Self::Error>;

    /// Load the talent tree
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be read or is inconsistent.
    fn load_talent_catalog(&self) -> Result<TalentCatalog, Self::Error>;
}

/// Per-player save slots keyed by player name.
/// Platform-specific implementations should provide this
pub trait PlayerStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist a player's save data
    ///
    /// # Errors
    ///
    /// Returns an error if the data cannot be written.
    fn save_player(&self, player: &str, data: &TagCompound) -> Result<(), Self::Error>;

    /// Read a player's save data, `None` when no save exists
    ///
    /// # Errors
    ///
    /// Returns an error if the save exists but cannot be read.
    fn load_player(&self, player: &str) -> Result<Option<TagCompound>, Self::Error>;

    /// Remove a player's save data
    ///
    /// # Errors
    ///
    /// Returns an error if the save cannot be removed.
    fn delete_player(&self, player: &str) -> Result<(), Self::Error>;
}

/// Loaded configuration and content plus the storage backend for one world.
pub struct SoulEngine<L, S>
where
    L: DataLoader,
    S: PlayerStorage,
{
    data_loader: L,
    storage: S,
    context: SoulContext,
    catalog: TalentCatalog,
}

impl<L, S> SoulEngine<L, S>
where
    L: DataLoader,
    S: PlayerStorage,
{
    /// Load configuration and talents through `data_loader`.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or the configuration is out of range.
    pub fn new(data_loader: L, storage: S) -> anyhow::Result<Self> {
        let config = data_loader
            .load_config()
            .context("failed to load soul configuration")?;
        config.validate().context("soul configuration rejected")?;
        let catalog = data_loader
            .load_talent_catalog()
            .context("failed to load talent catalog")?;
        let context = SoulContext::new(config);
        context.logger().info(format_args!(
            "engine ready with {} talent node(s)",
            catalog.len()
        ));
        Ok(Self {
            data_loader,
            storage,
            context,
            catalog,
        })
    }

    #[must_use]
    pub const fn context(&self) -> &SoulContext {
        &self.context
    }

    #[must_use]
    pub const fn catalog(&self) -> &TalentCatalog {
        &self.catalog
    }

    #[must_use]
    pub const fn data_loader(&self) -> &L {
        &self.data_loader
    }

    /// Load a player's progression; players without a save start fresh.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn load_player(&self, player: &str) -> Result<ProgressionState, S::Error> {
        let mut state = ProgressionState::new();
        if let Some(data) = self.storage.load_player(player)? {
            state.on_load(&data, &self.context);
        }
        Ok(state)
    }

    /// Save a player's progression
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn save_player(&self, player: &str, state: &ProgressionState) -> Result<(), S::Error> {
        self.storage.save_player(player, &state.on_save())
    }

    /// Delete a player's save
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn delete_player(&self, player: &str) -> Result<(), S::Error> {
        self.storage.delete_player(player)
    }
}
