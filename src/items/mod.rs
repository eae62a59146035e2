//! Item system: types, catalogue, loot tables, and inventory.

#![allow(unused_imports)]

pub mod catalog;
pub mod drops;
pub mod inventory;
pub mod types;

pub use catalog::*;
pub use drops::*;
pub use inventory::*;
pub use types::*;
