//! Error types for the simulation core.
//!
//! Every `GameError` is recoverable: a rejected request leaves the character,
//! the world and any active combat exactly as they were, and the caller may
//! simply submit a different request. `ConfigError` is only produced while
//! loading balance settings, before a game exists.

use crate::character::ResourceKind;
use crate::combat::CombatPhase;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("no character has been created yet")]
    NotInitialized,

    #[error("the character has already been created")]
    AlreadyInitialized,

    #[error("not enough {resource}: {required} needed, {available} available")]
    InsufficientResource {
        resource: ResourceKind,
        required: u32,
        available: u32,
    },

    #[error("there is no enemy left to target")]
    InvalidTarget,

    #[error("{action} is not allowed while {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: CombatPhase,
    },

    #[error("{0}")]
    AbilityUnavailable(String),

    #[error("you don't have any {0}")]
    ItemNotFound(String),

    #[error("{0} can't be used")]
    ItemNotUsable(String),

    #[error("an encounter needs at least one enemy")]
    EmptyEncounter,

    #[error("a combat is already in progress")]
    CombatInProgress,

    #[error("no combat is in progress")]
    NoCombat,

    #[error("unknown location '{0}'")]
    UnknownLocation(String),

    #[error("you can't go {0}")]
    NoExit(String),

    #[error("invalid name: {0}")]
    InvalidName(String),

    #[error("{origin} is not an origin available to the {race} race")]
    InvalidOrigin { race: String, origin: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::MenuState;

    #[test]
    fn test_insufficient_resource_message() {
        let err = GameError::InsufficientResource {
            resource: ResourceKind::Rage,
            required: 10,
            available: 4,
        };
        assert_eq!(err.to_string(), "not enough rage: 10 needed, 4 available");
    }

    #[test]
    fn test_invalid_transition_message_names_phase() {
        let err = GameError::InvalidTransition {
            action: "Back",
            phase: CombatPhase::PlayerChoice(MenuState::Main),
        };
        assert_eq!(
            err.to_string(),
            "Back is not allowed while choosing an action"
        );
    }

    #[test]
    fn test_config_error_from_json() {
        let parse_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: ConfigError = parse_err.into();
        assert!(err.to_string().starts_with("failed to parse config"));
    }
}
