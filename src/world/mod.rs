//! World map, locations, and encounter generation.

#![allow(unused_imports)]

pub mod data;
pub mod encounter;
pub mod location;
pub mod map;

pub use data::*;
pub use encounter::*;
pub use location::*;
pub use map::*;
