//! Character attributes, identity, resources, and progression.

#![allow(unused_imports)]

pub mod attributes;
pub mod derived_stats;
pub mod identity;
pub mod player;
pub mod progression;
pub mod resources;

pub use attributes::*;
pub use derived_stats::*;
pub use identity::*;
pub use player::*;
pub use progression::*;
pub use resources::*;
