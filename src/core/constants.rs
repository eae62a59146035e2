// Attributes and derived pools
pub const NUM_ATTRIBUTES: usize = 8;
pub const BASE_PHYSICAL_ATTRIBUTE: u32 = 5;
pub const BASE_RESOURCE_ATTRIBUTE: u32 = 3;
pub const PRIMARY_STAT_BOOST: u32 = 7;
pub const SECONDARY_STAT_BOOST: u32 = 4;
pub const POOL_PER_ATTRIBUTE_POINT: u32 = 10;

// XP and leveling
pub const STARTING_LEVEL: u32 = 1;
pub const STARTING_XP_TO_NEXT_LEVEL: u64 = 100;
pub const XP_THRESHOLD_GROWTH: f64 = 1.5;
pub const XP_THRESHOLD_SENTINEL: u64 = u64::MAX / 2;
pub const MAX_LEVEL_UPS_PER_GRANT: usize = 1000;

// Combat
pub const PLAYER_ATTACK_SPREAD: u32 = 5;
pub const FLEE_SUCCESS_CHANCE: f64 = 0.75;
pub const RAGE_GAIN_RATIO: f64 = 0.5;
pub const COUNTER_DAMAGE_MULTIPLIER: f64 = 1.1;
pub const COUNTERATTACK_RAGE_COST: u32 = 10;
pub const SPELL_MANA_COST: u32 = 10;
pub const HEALING_SPELL_FAITH_MULTIPLIER: u32 = 2;

// Items
pub const MINOR_HEALING_POTION_AMOUNT: u32 = 25;
pub const CRUSTY_BREAD_HEAL_AMOUNT: u32 = 5;

// Character creation
pub const MAX_CHARACTER_NAME_LENGTH: usize = 20;

// World
pub const RESPAWN_LOCATION_ID: &str = "town_square";

// Balance simulator
pub const SIM_DEFAULT_RUNS: u32 = 1000;
pub const SIM_DEFAULT_LOCATION_ID: &str = "forest_entrance";
pub const SIM_MAX_ROUNDS: u32 = 500;
pub const SIM_STARTING_POTIONS: u32 = 1;
pub const SIM_POTION_HEALTH_RATIO: f64 = 0.35;
