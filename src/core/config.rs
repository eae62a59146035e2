//! Balance configuration.
//!
//! Every tunable defaults to its constant in `core::constants`; a JSON
//! document only needs to name the fields it overrides.

use super::constants::*;
use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceConfig {
    /// XP needed to go from level 1 to level 2
    pub starting_xp_to_next_level: u64,

    /// Each level-up multiplies the next threshold by this (rounded)
    pub xp_threshold_growth: f64,

    /// Rage gained per point of damage dealt or taken (Rage classes only)
    pub rage_gain_ratio: f64,

    /// Probability that a flee attempt succeeds
    pub flee_chance: f64,

    /// Counter-hit damage relative to a basic attack
    pub counter_damage_multiplier: f64,

    pub counterattack_rage_cost: u32,

    pub spell_mana_cost: u32,

    /// Where a defeated character wakes up
    pub respawn_location_id: String,

    /// Defeat refills every pool when true, only health when false
    pub defeat_full_restore: bool,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            starting_xp_to_next_level: STARTING_XP_TO_NEXT_LEVEL,
            xp_threshold_growth: XP_THRESHOLD_GROWTH,
            rage_gain_ratio: RAGE_GAIN_RATIO,
            flee_chance: FLEE_SUCCESS_CHANCE,
            counter_damage_multiplier: COUNTER_DAMAGE_MULTIPLIER,
            counterattack_rage_cost: COUNTERATTACK_RAGE_COST,
            spell_mana_cost: SPELL_MANA_COST,
            respawn_location_id: RESPAWN_LOCATION_ID.to_string(),
            defeat_full_restore: true,
            seed: None,
        }
    }
}

impl BalanceConfig {
    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: BalanceConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Same settings with a fixed seed, for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_probability("rage_gain_ratio", self.rage_gain_ratio)?;
        check_probability("flee_chance", self.flee_chance)?;

        if !(self.xp_threshold_growth.is_finite() && self.xp_threshold_growth >= 1.0) {
            return Err(ConfigError::Invalid {
                field: "xp_threshold_growth",
                reason: format!("must be at least 1.0, got {}", self.xp_threshold_growth),
            });
        }
        if !(self.counter_damage_multiplier.is_finite() && self.counter_damage_multiplier >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "counter_damage_multiplier",
                reason: format!("must be non-negative, got {}", self.counter_damage_multiplier),
            });
        }
        if self.respawn_location_id.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "respawn_location_id",
                reason: "must not be empty".to_string(),
            });
        }
        if self.starting_xp_to_next_level == 0 {
            tracing::warn!(
                "starting_xp_to_next_level is 0; leveling will be clamped to the sentinel threshold"
            );
        }
        Ok(())
    }
}

fn check_probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be within 0.0..=1.0, got {}", value),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_constants() {
        let config = BalanceConfig::default();
        assert_eq!(config.starting_xp_to_next_level, 100);
        assert_eq!(config.flee_chance, 0.75);
        assert_eq!(config.rage_gain_ratio, 0.5);
        assert_eq!(config.counterattack_rage_cost, 10);
        assert_eq!(config.respawn_location_id, "town_square");
        assert!(config.defeat_full_restore);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = BalanceConfig::from_json_str(r#"{ "rage_gain_ratio": 0.33, "seed": 7 }"#)
            .unwrap();
        assert_eq!(config.rage_gain_ratio, 0.33);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.flee_chance, 0.75);
    }

    #[test]
    fn test_out_of_range_probability_rejected() {
        let err = BalanceConfig::from_json_str(r#"{ "flee_chance": 1.5 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "flee_chance",
                ..
            }
        ));
    }

    #[test]
    fn test_shrinking_xp_growth_rejected() {
        let err = BalanceConfig::from_json_str(r#"{ "xp_threshold_growth": 0.5 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "xp_threshold_growth",
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = BalanceConfig::from_json_str("{ flee_chance: }").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_path_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "defeat_full_restore": false }}"#).unwrap();

        let config = BalanceConfig::from_path(file.path()).unwrap();
        assert!(!config.defeat_full_restore);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = BalanceConfig::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_with_seed() {
        let config = BalanceConfig::default().with_seed(42);
        assert_eq!(config.seed, Some(42));
    }
}
