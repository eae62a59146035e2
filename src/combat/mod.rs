//! Combat system: enemies, skills, and the turn state machine.

#![allow(unused_imports)]

pub mod enemy;
pub mod logic;
pub mod skills;
pub mod types;

pub use enemy::*;
pub use logic::*;
pub use skills::*;
pub use types::*;
