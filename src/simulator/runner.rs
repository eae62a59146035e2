//! Auto-battle runner built on the real combat session.
//!
//! Every run builds a fresh character, rolls a guaranteed encounter from the
//! chosen location and plays it out with a fixed policy, so the numbers come
//! from exactly the rules a player would face.

use super::config::SimConfig;
use super::report::SimReport;
use crate::character::{Character, CharacterBuilder, CharacterClass, Race};
use crate::combat::{
    CombatOutcome, CombatPhase, CombatSession, MenuState, PlayerAction, Skill, Spell,
};
use crate::core::config::BalanceConfig;
use crate::core::constants::SIM_POTION_HEALTH_RATIO;
use crate::core::error::GameError;
use crate::items::ItemId;
use crate::world::{build_encounter, default_world};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// What one fight produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    /// `None` when the fight hit the round cap
    pub outcome: Option<CombatOutcome>,
    pub rounds: u32,
    pub enemies: u32,
    pub xp: u64,
    pub gold: u64,
    pub level_ups: u32,
    pub health_left: u32,
    pub potions_used: u32,
}

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> Result<SimReport, GameError> {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let stats = simulate_single_run(config, &mut rng)?;
        tracing::debug!(
            run = run_idx + 1,
            outcome = ?stats.outcome,
            rounds = stats.rounds,
            enemies = stats.enemies,
            "run finished"
        );
        all_runs.push(stats);
    }

    Ok(SimReport::from_runs(&all_runs, config))
}

/// Plays one fight from a fresh character to an outcome or the round cap.
pub fn simulate_single_run(config: &SimConfig, rng: &mut impl Rng) -> Result<RunStats, GameError> {
    let mut character = sim_character(config.class, &config.balance)?;
    let potion = ItemId::MinorHealingPotion.create();
    let potion_name = potion.name.clone();
    if config.starting_potions > 0 {
        character.add_item(potion.with_quantity(config.starting_potions));
    }

    let world = default_world()?;
    let location = world
        .get(&config.location_id)
        .ok_or_else(|| GameError::UnknownLocation(config.location_id.clone()))?;
    let roster = build_encounter(location, 0.0, rng);
    let enemies = roster.len() as u32;
    let (mut session, mut last) = CombatSession::start(roster, &config.balance)?;

    // Each round takes at most three calls (open skills, select, attack).
    let max_calls = config.max_rounds.saturating_mul(3).max(1);
    let mut calls = 0;
    while !last.is_finished() && session.round() <= config.max_rounds && calls < max_calls {
        calls += 1;
        let action = choose_action(&character, &session, config);
        last = match session.submit_player_action(&mut character, action, rng) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::debug!(%err, "auto action rejected, falling back");
                session.submit_player_action(&mut character, fallback_action(&session), rng)?
            }
        };
    }

    let (xp, gold, level_ups) = match &last.summary {
        Some(summary) => (summary.xp, summary.gold, summary.level_ups.len() as u32),
        None => (0, 0, 0),
    };
    let potions_left = character.inventory().count(&potion_name);
    // A defeat restores the character, so the pool no longer shows the loss.
    let health_left = match last.outcome() {
        Some(CombatOutcome::Defeat) => 0,
        _ => character.health().current(),
    };

    Ok(RunStats {
        outcome: last.outcome(),
        rounds: session.round(),
        enemies,
        xp,
        gold,
        level_ups,
        health_left,
        potions_used: config.starting_potions.saturating_sub(potions_left),
    })
}

/// The simulator's stand-in player for a class.
fn sim_character(class: CharacterClass, balance: &BalanceConfig) -> Result<Character, GameError> {
    let race = Race::Human;
    CharacterBuilder::new("Simulant", race, class, race.origins()[0])
        .balance(balance)
        .build()
}

/// Fixed policy: flee or drink when hurt, then skill, then spell, then attack.
pub fn choose_action(character: &Character, session: &CombatSession, config: &SimConfig) -> PlayerAction {
    if session.phase() == CombatPhase::PlayerChoice(MenuState::Skills) {
        return match ready_skill(character, &config.balance) {
            Some(skill) => PlayerAction::SelectSkill(skill),
            None => PlayerAction::Back,
        };
    }

    let health = character.health();
    let ratio = health.current() as f64 / health.max().max(1) as f64;
    if config.flee_below > 0.0 && ratio <= config.flee_below {
        return PlayerAction::Flee;
    }

    let potion = ItemId::MinorHealingPotion.create().name;
    if ratio <= SIM_POTION_HEALTH_RATIO && character.has_item(&potion) {
        return PlayerAction::UseItem(potion);
    }

    if ready_skill(character, &config.balance).is_some() {
        return PlayerAction::OpenSkills;
    }

    if let Some(spell) = Spell::for_class(character.class()) {
        let affordable = character.mana().current() >= config.balance.spell_mana_cost;
        let worth_it = spell.needs_target() || ratio < 0.5;
        if affordable && worth_it {
            return PlayerAction::Cast;
        }
    }

    PlayerAction::Attack
}

fn ready_skill(character: &Character, balance: &BalanceConfig) -> Option<Skill> {
    Skill::for_class(character.class())
        .iter()
        .copied()
        .find(|skill| skill.can_activate(character, skill_cost(*skill, balance)).is_ok())
}

fn skill_cost(skill: Skill, balance: &BalanceConfig) -> u32 {
    match skill {
        Skill::Counterattack => balance.counterattack_rage_cost,
    }
}

fn fallback_action(session: &CombatSession) -> PlayerAction {
    match session.phase() {
        CombatPhase::PlayerChoice(MenuState::Skills) => PlayerAction::Back,
        _ => PlayerAction::Attack,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(class: CharacterClass, location: &str, runs: u32) -> SimConfig {
        SimConfig {
            seed: Some(42),
            ..SimConfig::matchup(class, location, runs)
        }
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let cfg = config(CharacterClass::Fighter, "forest_entrance", 20);
        let a = run_simulation(&cfg).unwrap();
        let b = run_simulation(&cfg).unwrap();
        assert_eq!(a.victories, b.victories);
        assert_eq!(a.avg_rounds, b.avg_rounds);
        assert_eq!(a.avg_gold, b.avg_gold);
    }

    #[test]
    fn test_every_run_is_accounted_for() {
        let cfg = config(CharacterClass::Wizard, "deep_woods", 30);
        let report = run_simulation(&cfg).unwrap();
        assert_eq!(report.num_runs, 30);
        assert_eq!(
            report.victories + report.defeats + report.fled + report.timed_out,
            30
        );
    }

    #[test]
    fn test_safe_location_has_no_enemies() {
        let cfg = config(CharacterClass::Scout, "town_square", 1);
        assert_eq!(run_simulation(&cfg).unwrap_err(), GameError::EmptyEncounter);
    }

    #[test]
    fn test_unknown_location_rejected() {
        let cfg = config(CharacterClass::Scout, "atlantis", 1);
        assert!(matches!(
            run_simulation(&cfg),
            Err(GameError::UnknownLocation(_))
        ));
    }

    #[test]
    fn test_fighter_opens_skills_once_rage_allows() {
        let cfg = config(CharacterClass::Fighter, "forest_entrance", 1);
        let mut character = sim_character(CharacterClass::Fighter, &cfg.balance).unwrap();
        let (session, _) = CombatSession::start(
            vec![crate::combat::EnemyKind::ForestWolf.spawn()],
            &cfg.balance,
        )
        .unwrap();
        assert_eq!(choose_action(&character, &session, &cfg), PlayerAction::Attack);
        character.gain_rage_from_damage(40, 0.5);
        assert_eq!(
            choose_action(&character, &session, &cfg),
            PlayerAction::OpenSkills
        );
    }

    #[test]
    fn test_wounded_character_drinks_potion() {
        let cfg = config(CharacterClass::Scout, "forest_entrance", 1);
        let mut character = sim_character(CharacterClass::Scout, &cfg.balance).unwrap();
        character.add_item(ItemId::MinorHealingPotion.create());
        let (session, _) = CombatSession::start(
            vec![crate::combat::EnemyKind::ForestWolf.spawn()],
            &cfg.balance,
        )
        .unwrap();
        let max = character.health().max();
        character.take_damage(max - 1);
        assert_eq!(
            choose_action(&character, &session, &cfg),
            PlayerAction::UseItem("Minor Healing Potion".to_string())
        );
    }

    #[test]
    fn test_flee_threshold_is_respected() {
        let cfg = SimConfig {
            flee_below: 0.9,
            ..config(CharacterClass::Wizard, "forest_entrance", 1)
        };
        let mut character = sim_character(CharacterClass::Wizard, &cfg.balance).unwrap();
        let (session, _) = CombatSession::start(
            vec![crate::combat::EnemyKind::ForestWolf.spawn()],
            &cfg.balance,
        )
        .unwrap();
        character.take_damage(20);
        assert_eq!(choose_action(&character, &session, &cfg), PlayerAction::Flee);
    }
}
