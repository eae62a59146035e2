//! Simulation configuration.

use crate::character::CharacterClass;
use crate::core::config::BalanceConfig;
use crate::core::constants::*;

/// Configuration for a batch of auto-battles.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of fights to run
    pub num_runs: u32,

    /// Base seed; run `i` uses `seed + i` (None = entropy)
    pub seed: Option<u64>,

    pub class: CharacterClass,

    /// Location whose enemy pool supplies every roster
    pub location_id: String,

    /// Rounds after which a fight is abandoned and counted as timed out
    pub max_rounds: u32,

    /// Healing potions in the pack at the start of each fight
    pub starting_potions: u32,

    /// Flee once health drops to this fraction of max (0.0 = never flee)
    pub flee_below: f64,

    pub balance: BalanceConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: SIM_DEFAULT_RUNS,
            seed: None,
            class: CharacterClass::Fighter,
            location_id: SIM_DEFAULT_LOCATION_ID.to_string(),
            max_rounds: SIM_MAX_ROUNDS,
            starting_potions: SIM_STARTING_POTIONS,
            flee_below: 0.0,
            balance: BalanceConfig::default(),
        }
    }
}

impl SimConfig {
    /// Quick config for comparing one class against one location.
    pub fn matchup(class: CharacterClass, location_id: &str, num_runs: u32) -> Self {
        Self {
            num_runs,
            class,
            location_id: location_id.to_string(),
            ..Default::default()
        }
    }
}
