//! Process-wide tunables for leveling and rewards.
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_CONFIG_DATA: &str = include_str!("../assets/config.json");

pub const XP_MULTIPLIER_RANGE: (f32, f32) = (0.1, 10.0);
pub const BASE_XP_RANGE: (u32, u32) = (50, 1_000);
pub const LEVELING_EXPONENT_RANGE: (f32, f32) = (1.0, 2.5);
pub const TALENT_POINT_FREQUENCY_RANGE: (u32, u32) = (1, 10);
pub const HUD_OPACITY_RANGE: (f32, f32) = (0.0, 1.0);
pub const XP_SHARE_RANGE_RANGE: (f32, f32) = (0.0, 10_000.0);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config field `{field}` = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Leveling configuration, read-only once a session starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoulConfig {
    /// Multiplies every XP award after the kill formula.
    pub xp_multiplier: f32,
    /// `BaseXP` in `BaseXP × level^exponent`.
    pub base_xp_required: u32,
    pub leveling_exponent: f32,
    /// One talent point is granted every N levels.
    pub talent_point_frequency: u32,
    /// Enables debug logging and the privileged console commands.
    pub debug_mode: bool,
    /// Kill sharing radius in world pixels.
    pub xp_share_range: f32,
    pub hud_opacity: f32,
}

impl Default for SoulConfig {
    fn default() -> Self {
        Self {
            xp_multiplier: 1.0,
            base_xp_required: 100,
            leveling_exponent: 1.5,
            talent_point_frequency: 5,
            debug_mode: false,
            xp_share_range: 1_200.0,
            hud_opacity: 1.0,
        }
    }
}

impl SoulConfig {
    /// Load the bundled default configuration, falling back to compiled defaults.
    #[must_use]
    pub fn load_from_static() -> Self {
        serde_json::from_str(DEFAULT_CONFIG_DATA).unwrap_or_default()
    }

    /// Parse a configuration document; absent fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check every field against its documented range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OutOfRange`] for the first field outside its range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_f32("xp_multiplier", self.xp_multiplier, XP_MULTIPLIER_RANGE)?;
        check_u32("base_xp_required", self.base_xp_required, BASE_XP_RANGE)?;
        check_f32(
            "leveling_exponent",
            self.leveling_exponent,
            LEVELING_EXPONENT_RANGE,
        )?;
        check_u32(
            "talent_point_frequency",
            self.talent_point_frequency,
            TALENT_POINT_FREQUENCY_RANGE,
        )?;
        check_f32("xp_share_range", self.xp_share_range, XP_SHARE_RANGE_RANGE)?;
        check_f32("hud_opacity", self.hud_opacity, HUD_OPACITY_RANGE)?;
        Ok(())
    }

    /// Copy of this configuration with every field forced into range.
    /// Non-finite floats fall back to their defaults.
    #[must_use]
    pub fn clamped(&self) -> Self {
        let defaults = Self::default();
        Self {
            xp_multiplier: clamp_f32(
                self.xp_multiplier,
                XP_MULTIPLIER_RANGE,
                defaults.xp_multiplier,
            ),
            base_xp_required: self
                .base_xp_required
                .clamp(BASE_XP_RANGE.0, BASE_XP_RANGE.1),
            leveling_exponent: clamp_f32(
                self.leveling_exponent,
                LEVELING_EXPONENT_RANGE,
                defaults.leveling_exponent,
            ),
            talent_point_frequency: self
                .talent_point_frequency
                .clamp(TALENT_POINT_FREQUENCY_RANGE.0, TALENT_POINT_FREQUENCY_RANGE.1),
            debug_mode: self.debug_mode,
            xp_share_range: clamp_f32(
                self.xp_share_range,
                XP_SHARE_RANGE_RANGE,
                defaults.xp_share_range,
            ),
            hud_opacity: clamp_f32(self.hud_opacity, HUD_OPACITY_RANGE, defaults.hud_opacity),
        }
    }
}

fn check_f32(field: &'static str, value: f32, (min, max): (f32, f32)) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value: f64::from(value),
            min: f64::from(min),
            max: f64::from(max),
        })
    }
}

fn check_u32(field: &'static str, value: u32, (min, max): (u32, u32)) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value: f64::from(value),
            min: f64::from(min),
            max: f64::from(max),
        })
    }
}

fn clamp_f32(value: f32, (min, max): (f32, f32), fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_config_matches_defaults() {
        let config = SoulConfig::load_from_static();
        assert_eq!(config, SoulConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = SoulConfig::from_json(r#"{ "leveling_exponent": 2.0, "debug_mode": true }"#)
            .unwrap();
        assert!((config.leveling_exponent - 2.0).abs() < f32::EPSILON);
        assert!(config.debug_mode);
        assert_eq!(config.base_xp_required, 100);
        assert_eq!(config.talent_point_frequency, 5);
    }

    #[test]
    fn validate_reports_first_out_of_range_field() {
        let config = SoulConfig {
            base_xp_required: 10,
            talent_point_frequency: 0,
            ..SoulConfig::default()
        };
        match config.validate() {
            Err(ConfigError::OutOfRange { field, .. }) => assert_eq!(field, "base_xp_required"),
            other => panic!("unexpected validation result: {other:?}"),
        }

        let nan = SoulConfig {
            xp_multiplier: f32::NAN,
            ..SoulConfig::default()
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn clamped_forces_fields_into_range() {
        let wild = SoulConfig {
            xp_multiplier: 50.0,
            base_xp_required: 5,
            leveling_exponent: f32::INFINITY,
            talent_point_frequency: 0,
            debug_mode: true,
            xp_share_range: -4.0,
            hud_opacity: 3.0,
        };
        let tame = wild.clamped();
        assert!(tame.validate().is_ok());
        assert!((tame.xp_multiplier - 10.0).abs() < f32::EPSILON);
        assert_eq!(tame.base_xp_required, 50);
        assert!((tame.leveling_exponent - 1.5).abs() < f32::EPSILON);
        assert_eq!(tame.talent_point_frequency, 1);
        assert!(tame.debug_mode);
        assert!(tame.xp_share_range.abs() < f32::EPSILON);
        assert!((tame.hud_opacity - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            SoulConfig::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
