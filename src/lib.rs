//! Stonecrest - turn-based text RPG simulation core
//!
//! Characters, items, enemies, the world map and the combat state machine,
//! driven through the `Game` orchestrator. The library never prints and never
//! installs a log subscriber; front ends decide how to present the logs it
//! returns.

pub mod build_info;
pub mod character;
pub mod combat;
pub mod core;
pub mod items;
pub mod simulator;
pub mod world;

pub use crate::core::{BalanceConfig, ConfigError, Game, GameError};
