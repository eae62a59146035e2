//! Core settings, errors, and the game orchestrator.

#![allow(unused_imports)]

pub mod config;
pub mod constants;
pub mod error;
pub mod game;

pub use config::*;
pub use constants::*;
pub use error::*;
pub use game::*;
