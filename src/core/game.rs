//! Exploration-layer orchestrator.
//!
//! `Game` owns everything a session needs (the player slot, the world map,
//! the active combat, the RNG and the balance settings) and hands `&mut`
//! borrows down to the combat and character code.

use super::config::BalanceConfig;
use super::error::GameError;
use crate::character::{Character, CharacterBuilder, PlayerSlot};
use crate::combat::{CombatOutcome, CombatSession, Enemy, PlayerAction, TurnOutcome};
use crate::world::{default_world, roll_encounter, WorldMap};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// What an exploration request produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExploreReport {
    pub log: Vec<String>,
    /// Opening turn of a combat that this request started, if any.
    pub combat: Option<TurnOutcome>,
}

#[derive(Debug, Clone)]
struct ActiveCombat {
    session: CombatSession,
    return_location: String,
}

pub struct Game {
    player: PlayerSlot,
    world: WorldMap,
    combat: Option<ActiveCombat>,
    rng: ChaCha8Rng,
    config: BalanceConfig,
}

impl Game {
    /// New game on the default map, seeded from `config.seed` or entropy.
    pub fn new(config: BalanceConfig) -> Result<Self, GameError> {
        Self::with_world(config, default_world()?)
    }

    /// Fails if the configured respawn location is not on the map.
    pub fn with_world(config: BalanceConfig, world: WorldMap) -> Result<Self, GameError> {
        if !world.contains(&config.respawn_location_id) {
            return Err(GameError::UnknownLocation(config.respawn_location_id.clone()));
        }
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Ok(Self {
            player: PlayerSlot::new(),
            world,
            combat: None,
            rng,
            config,
        })
    }

    pub fn config(&self) -> &BalanceConfig {
        &self.config
    }

    pub fn player(&self) -> &PlayerSlot {
        &self.player
    }

    pub fn character(&self) -> Result<&Character, GameError> {
        self.player.character()
    }

    pub fn world(&self) -> &WorldMap {
        &self.world
    }

    pub fn combat(&self) -> Option<&CombatSession> {
        self.combat.as_ref().map(|active| &active.session)
    }

    pub fn in_combat(&self) -> bool {
        self.combat.is_some()
    }

    /// Creates the one character of this game. Progression settings come
    /// from the game's balance config.
    pub fn create_character(&mut self, builder: CharacterBuilder) -> Result<(), GameError> {
        self.player.initialize_with(builder.balance(&self.config))
    }

    pub fn look(&self) -> String {
        self.world.look()
    }

    /// Full rest: refills every pool and clears rage.
    pub fn rest(&mut self) -> Result<String, GameError> {
        self.ensure_exploring()?;
        let character = self.player.character_mut()?;
        character.restore_to_max();
        Ok(format!("You rest and recover. HP: {}", character.health()))
    }

    /// Moves through an exit; arriving may trigger an ambush.
    pub fn travel(&mut self, direction: &str) -> Result<ExploreReport, GameError> {
        self.ensure_exploring()?;
        let look = self.world.travel(direction)?.look();
        let mut report = ExploreReport {
            log: vec![look],
            combat: None,
        };
        self.check_for_encounter(&mut report)?;
        Ok(report)
    }

    /// Explicitly searches the current location for trouble.
    pub fn search(&mut self) -> Result<ExploreReport, GameError> {
        self.ensure_exploring()?;
        let mut report = ExploreReport {
            log: vec!["You search the area...".to_string()],
            combat: None,
        };
        self.check_for_encounter(&mut report)?;
        if report.combat.is_none() {
            report
                .log
                .push("You find nothing of interest.".to_string());
        }
        Ok(report)
    }

    /// Starts a fight against a given roster at the current location.
    pub fn start_combat(&mut self, roster: Vec<Enemy>) -> Result<TurnOutcome, GameError> {
        self.ensure_exploring()?;
        let (session, outcome) = CombatSession::start(roster, &self.config)?;
        self.combat = Some(ActiveCombat {
            session,
            return_location: self.world.current_id().to_string(),
        });
        Ok(outcome)
    }

    /// Forwards an action to the active combat and, once it ends, applies
    /// the relocation and appends the post-combat report.
    pub fn submit_combat_action(&mut self, action: PlayerAction) -> Result<TurnOutcome, GameError> {
        let character = self.player.character_mut()?;
        let active = self.combat.as_mut().ok_or(GameError::NoCombat)?;
        let mut outcome = active
            .session
            .submit_player_action(character, action, &mut self.rng)?;

        if let Some(result) = outcome.outcome() {
            let destination = match result {
                CombatOutcome::Defeat => self.config.respawn_location_id.clone(),
                CombatOutcome::Victory | CombatOutcome::Fled => active.return_location.clone(),
            };
            self.combat = None;
            self.world.set_current(&destination)?;

            if let Some(summary) = &outcome.summary {
                if result == CombatOutcome::Victory {
                    outcome.log.extend(summary.report_lines());
                }
            }
            if result == CombatOutcome::Defeat {
                outcome
                    .log
                    .push("You wake up back in town, battered but alive.".to_string());
            }
            outcome.log.push(self.world.look());
        }
        Ok(outcome)
    }

    fn ensure_exploring(&self) -> Result<(), GameError> {
        self.player.character()?;
        if self.combat.is_some() {
            return Err(GameError::CombatInProgress);
        }
        Ok(())
    }

    fn check_for_encounter(&mut self, report: &mut ExploreReport) -> Result<(), GameError> {
        let location = self.world.current()?;
        let roster = roll_encounter(location, &mut self.rng);
        if roster.is_empty() {
            return Ok(());
        }
        report
            .log
            .push(format!("You are ambushed in {}!", location.name));
        report.combat = Some(self.start_combat(roster)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{CharacterClass, Origin, Race};
    use crate::combat::EnemyKind;

    fn seeded_game() -> Game {
        let mut game = Game::new(BalanceConfig::default().with_seed(99)).unwrap();
        game.create_character(CharacterBuilder::new(
            "Brakka",
            Race::Orc,
            CharacterClass::Fighter,
            Origin::BloodfangTribeWarrior,
        ))
        .unwrap();
        game
    }

    #[test]
    fn test_actions_require_character() {
        let mut game = Game::new(BalanceConfig::default().with_seed(1)).unwrap();
        assert_eq!(game.travel("north").unwrap_err(), GameError::NotInitialized);
        assert_eq!(game.search().unwrap_err(), GameError::NotInitialized);
        assert_eq!(
            game.submit_combat_action(PlayerAction::Attack).unwrap_err(),
            GameError::NotInitialized
        );
    }

    #[test]
    fn test_bad_respawn_location_rejected() {
        let config = BalanceConfig {
            respawn_location_id: "atlantis".to_string(),
            ..BalanceConfig::default()
        };
        assert!(matches!(Game::new(config), Err(GameError::UnknownLocation(_))));
    }

    #[test]
    fn test_town_travel_never_ambushes() {
        let mut game = seeded_game();
        let report = game.travel("east").unwrap();
        assert!(report.combat.is_none());
        assert!(report.log[0].starts_with("Location: General Store"));
        let report = game.search().unwrap();
        assert_eq!(report.log.last().unwrap(), "You find nothing of interest.");
    }

    #[test]
    fn test_no_exit_error() {
        let mut game = seeded_game();
        assert_eq!(
            game.travel("south").unwrap_err(),
            GameError::NoExit("south".to_string())
        );
    }

    #[test]
    fn test_no_combat_error() {
        let mut game = seeded_game();
        assert_eq!(
            game.submit_combat_action(PlayerAction::Attack).unwrap_err(),
            GameError::NoCombat
        );
    }

    #[test]
    fn test_exploration_blocked_during_combat() {
        let mut game = seeded_game();
        game.start_combat(vec![EnemyKind::GoblinScavenger.spawn()])
            .unwrap();
        assert!(game.in_combat());
        assert_eq!(game.travel("north").unwrap_err(), GameError::CombatInProgress);
        assert_eq!(game.rest().unwrap_err(), GameError::CombatInProgress);
    }

    #[test]
    fn test_fight_to_the_end_returns_to_exploration() {
        let mut game = seeded_game();
        game.start_combat(vec![EnemyKind::GoblinScavenger.spawn()])
            .unwrap();
        let mut last = None;
        for _ in 0..50 {
            let outcome = game.submit_combat_action(PlayerAction::Attack).unwrap();
            if outcome.is_finished() {
                last = Some(outcome);
                break;
            }
        }
        let outcome = last.unwrap();
        assert_eq!(outcome.outcome(), Some(CombatOutcome::Victory));
        assert!(!game.in_combat());
        assert_eq!(game.world().current_id(), "town_square");
        assert!(outcome.log.contains(&"Enemies Slain:".to_string()));
        assert_eq!(game.character().unwrap().xp(), 10);
    }
}
