//! Tagged key-value save format for [`ProgressionState`].
//!
//! Loading never fails: every missing or mistyped key falls back to its
//! default so older saves without newer fields still load.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::{
    KEY_AGILITY_RANK, KEY_BASIC_POINTS, KEY_CURRENT_LEVEL, KEY_CURRENT_XP, KEY_DAMAGE_RANK,
    KEY_DEFENSE_RANK, KEY_TALENT_POINTS, KEY_UNLOCKED_TALENTS, MIN_LEVEL,
};
use crate::numbers::{clamp_i64_to_u32, clamp_i64_to_u64, saturating_u64_to_i64};
use crate::progression::ProgressionState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    Int(i64),
    Str(String),
    List(Vec<String>),
    /// Anything else found in a save. Kept as-is and read as absent.
    Other(serde_json::Value),
}

impl From<i64> for TagValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for TagValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<String> for TagValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Vec<String>> for TagValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// Ordered string-keyed map of tag values, one per player save.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagCompound(BTreeMap<String, TagValue>);

impl TagCompound {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<TagValue>) {
        self.0.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&TagValue> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<TagValue> {
        self.0.remove(key)
    }

    #[must_use]
    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.0.get(key)? {
            TagValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn get_list(&self, key: &str) -> Option<&[String]> {
        match self.0.get(key)? {
            TagValue::List(values) => Some(values),
            _ => None,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Write every field under its stable key. Talents are stored as a sorted list.
#[must_use]
pub fn serialize(state: &ProgressionState) -> TagCompound {
    let mut tag = TagCompound::new();
    tag.set(KEY_CURRENT_XP, saturating_u64_to_i64(state.experience));
    tag.set(KEY_CURRENT_LEVEL, state.level);
    tag.set(KEY_TALENT_POINTS, state.talent_points);
    tag.set(KEY_BASIC_POINTS, state.basic_points);
    tag.set(KEY_DAMAGE_RANK, state.damage_rank);
    tag.set(KEY_DEFENSE_RANK, state.defense_rank);
    tag.set(KEY_AGILITY_RANK, state.agility_rank);
    tag.set(
        KEY_UNLOCKED_TALENTS,
        state.unlocked_talents.iter().cloned().collect::<Vec<_>>(),
    );
    tag
}

/// Rebuild a state, defaulting anything absent: counters to 0, level to 1,
/// talents to the empty set. Negative counters clamp to their floor.
#[must_use]
pub fn deserialize(tag: &TagCompound) -> ProgressionState {
    let counter = |key: &str| tag.get_int(key).map_or(0, |v| clamp_i64_to_u32(v, 0));
    ProgressionState {
        experience: tag.get_int(KEY_CURRENT_XP).map_or(0, clamp_i64_to_u64),
        level: tag
            .get_int(KEY_CURRENT_LEVEL)
            .map_or(MIN_LEVEL, |v| clamp_i64_to_u32(v, MIN_LEVEL)),
        talent_points: counter(KEY_TALENT_POINTS),
        basic_points: counter(KEY_BASIC_POINTS),
        damage_rank: counter(KEY_DAMAGE_RANK),
        defense_rank: counter(KEY_DEFENSE_RANK),
        agility_rank: counter(KEY_AGILITY_RANK),
        unlocked_talents: tag
            .get_list(KEY_UNLOCKED_TALENTS)
            .map(|ids| ids.iter().cloned().collect())
            .unwrap_or_default(),
    }
}
