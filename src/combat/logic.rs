use super::enemy::Enemy;
use super::skills::{consume_counterattack, roll_basic_attack, Skill, Spell, SpellEffect};
use super::types::*;
use crate::character::{Character, ResourceKind};
use crate::core::config::BalanceConfig;
use crate::core::error::GameError;
use crate::items::ItemEffect;
use rand::Rng;

/// Log and events accumulated while one call is processed.
#[derive(Debug, Default)]
struct TurnLog {
    lines: Vec<String>,
    events: Vec<CombatEvent>,
}

impl TurnLog {
    fn line(&mut self, message: impl Into<String>) {
        self.lines.push(message.into());
    }

    fn event(&mut self, event: CombatEvent) {
        self.events.push(event);
    }
}

/// One fight between the character and an enemy roster.
///
/// The session never owns the character; every call borrows it mutably for
/// the duration of one atomic step. Between calls the phase is always
/// `PlayerChoice(_)` or `End(_)`.
#[derive(Debug, Clone)]
pub struct CombatSession {
    enemies: Vec<Enemy>,
    phase: CombatPhase,
    round: u32,
    slain: Vec<String>,
    config: BalanceConfig,
}

impl CombatSession {
    /// Opens a fight. Enemies already at 0 HP are dropped from the roster;
    /// fails with `EmptyEncounter` if none is left.
    pub fn start(
        mut roster: Vec<Enemy>,
        config: &BalanceConfig,
    ) -> Result<(CombatSession, TurnOutcome), GameError> {
        roster.retain(Enemy::is_alive);
        if roster.is_empty() {
            return Err(GameError::EmptyEncounter);
        }

        let mut session = CombatSession {
            enemies: roster,
            phase: CombatPhase::Start,
            round: 1,
            slain: Vec::new(),
            config: config.clone(),
        };

        let mut log = TurnLog::default();
        log.line("--- COMBAT STARTED ---");
        let names: Vec<String> = session
            .living_enemies()
            .map(|enemy| enemy.name.clone())
            .collect();
        for enemy in &session.enemies {
            log.line(format!("You face {}!", enemy));
        }
        log.event(CombatEvent::CombatStarted { enemies: names });
        tracing::info!(enemies = session.enemies.len(), "combat started");

        session.enter_player_turn(&mut log);
        let outcome = session.outcome(log, None);
        Ok((session, outcome))
    }

    pub fn phase(&self) -> CombatPhase {
        self.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn living_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| e.is_alive())
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Processes one player request.
    ///
    /// `Err` means the request was rejected and nothing changed: the phase,
    /// the roster and the character are exactly as before the call.
    pub fn submit_player_action(
        &mut self,
        character: &mut Character,
        action: PlayerAction,
        rng: &mut impl Rng,
    ) -> Result<TurnOutcome, GameError> {
        let menu = match self.phase {
            CombatPhase::PlayerChoice(menu) => menu,
            phase => {
                return Err(GameError::InvalidTransition {
                    action: action.name(),
                    phase,
                })
            }
        };

        let mut log = TurnLog::default();
        match (menu, action) {
            (MenuState::Main, PlayerAction::Attack) => self.resolve_attack(character, &mut log, rng)?,
            (MenuState::Main, PlayerAction::Cast) => self.resolve_cast(character, &mut log, rng)?,
            (MenuState::Main, PlayerAction::UseItem(name)) => {
                self.resolve_item(character, &name, &mut log, rng)?
            }
            (MenuState::Main, PlayerAction::Flee) => self.resolve_flee(character, &mut log, rng),
            (MenuState::Main, PlayerAction::OpenSkills) => {
                let skills = Skill::for_class(character.class());
                if skills.is_empty() {
                    return Err(GameError::AbilityUnavailable(format!(
                        "A {} has no skills to use.",
                        character.class()
                    )));
                }
                self.phase = CombatPhase::PlayerChoice(MenuState::Skills);
                for skill in skills {
                    log.line(format!(
                        "- {} ({} {})",
                        skill,
                        self.skill_cost(*skill),
                        skill.resource()
                    ));
                }
                log.line("- Back");
            }
            (MenuState::Skills, PlayerAction::SelectSkill(skill)) => {
                self.resolve_skill(character, skill, &mut log, rng)?
            }
            (MenuState::Skills, PlayerAction::Back) => {
                self.phase = CombatPhase::PlayerChoice(MenuState::Main);
            }
            (_, action) => {
                return Err(GameError::InvalidTransition {
                    action: action.name(),
                    phase: self.phase,
                })
            }
        }

        tracing::debug!(phase = %self.phase, round = self.round, "player action resolved");
        let summary = match self.phase {
            CombatPhase::End(outcome) => Some(self.finish(character, outcome, &mut log, rng)),
            _ => None,
        };
        Ok(self.outcome(log, summary))
    }

    fn skill_cost(&self, skill: Skill) -> u32 {
        match skill {
            Skill::Counterattack => self.config.counterattack_rage_cost,
        }
    }

    fn first_living_index(&self) -> Option<usize> {
        self.enemies.iter().position(Enemy::is_alive)
    }

    fn resolve_attack(
        &mut self,
        character: &mut Character,
        log: &mut TurnLog,
        rng: &mut impl Rng,
    ) -> Result<(), GameError> {
        let target = self.first_living_index().ok_or(GameError::InvalidTarget)?;
        self.phase = CombatPhase::ResolvingAction;

        let rolled = roll_basic_attack(character, rng);
        let dealt = self.enemies[target].take_damage(rolled);
        let name = self.enemies[target].name.clone();
        log.line(format!(
            "{} attacks {} for {} damage!",
            character.name(),
            name,
            dealt
        ));
        log.event(CombatEvent::PlayerAttack {
            target: name,
            damage: dealt,
        });
        self.report_enemy_status(target, log);
        self.gain_rage(character, dealt, log);

        self.continue_after_player_action(character, log, rng);
        Ok(())
    }

    fn resolve_cast(
        &mut self,
        character: &mut Character,
        log: &mut TurnLog,
        rng: &mut impl Rng,
    ) -> Result<(), GameError> {
        let spell = Spell::for_class(character.class()).ok_or_else(|| {
            GameError::AbilityUnavailable(format!("A {} cannot cast spells.", character.class()))
        })?;
        let target = if spell.needs_target() {
            Some(self.first_living_index().ok_or(GameError::InvalidTarget)?)
        } else {
            None
        };
        character.use_mana(self.config.spell_mana_cost)?;
        self.phase = CombatPhase::ResolvingAction;

        match (spell.roll_effect(character, rng), target) {
            (SpellEffect::Damage(amount), Some(index)) => {
                let dealt = self.enemies[index].take_damage(amount);
                let name = self.enemies[index].name.clone();
                log.line(format!(
                    "{} casts {} at {} for {} damage!",
                    character.name(),
                    spell,
                    name,
                    dealt
                ));
                log.event(CombatEvent::SpellCast {
                    spell: spell.name().to_string(),
                    target: Some(name),
                    amount: dealt,
                });
                self.report_enemy_status(index, log);
            }
            (SpellEffect::Damage(_), None) => {}
            (SpellEffect::Heal(amount), _) => {
                let healed = character.heal(amount);
                log.line(format!(
                    "{} casts {} and recovers {} health. HP: {}",
                    character.name(),
                    spell,
                    healed,
                    character.health()
                ));
                log.event(CombatEvent::SpellCast {
                    spell: spell.name().to_string(),
                    target: None,
                    amount: healed,
                });
            }
        }

        self.continue_after_player_action(character, log, rng);
        Ok(())
    }

    fn resolve_item(
        &mut self,
        character: &mut Character,
        name: &str,
        log: &mut TurnLog,
        rng: &mut impl Rng,
    ) -> Result<(), GameError> {
        let item = character
            .inventory()
            .get(name)
            .cloned()
            .ok_or_else(|| GameError::ItemNotFound(name.to_string()))?;
        let heal = match item.effect {
            ItemEffect::Heal(amount) => amount,
            ItemEffect::None => return Err(GameError::ItemNotUsable(item.name)),
        };
        if !character.remove_item(&item.name, 1) {
            return Err(GameError::ItemNotFound(item.name));
        }
        self.phase = CombatPhase::ResolvingAction;

        let healed = character.heal(heal);
        log.line(format!(
            "{} uses {} and recovers {} health. HP: {}",
            character.name(),
            item.name,
            healed,
            character.health()
        ));
        log.event(CombatEvent::ItemUsed {
            item: item.name,
            healed,
        });

        self.continue_after_player_action(character, log, rng);
        Ok(())
    }

    fn resolve_flee(&mut self, character: &mut Character, log: &mut TurnLog, rng: &mut impl Rng) {
        self.phase = CombatPhase::ResolvingAction;
        log.line("You attempt to flee...");
        let roll = rng.gen::<f64>();
        let success = self.config.flee_chance > 0.0 && roll <= self.config.flee_chance;
        log.event(CombatEvent::FleeAttempt { success });
        tracing::debug!(roll, success, "flee attempt");

        if success {
            log.line("...successfully escaped!");
            self.phase = CombatPhase::End(CombatOutcome::Fled);
        } else {
            log.line("...but fail!");
            self.run_enemy_turn(character, log, rng);
        }
    }

    fn resolve_skill(
        &mut self,
        character: &mut Character,
        skill: Skill,
        log: &mut TurnLog,
        rng: &mut impl Rng,
    ) -> Result<(), GameError> {
        let cost = self.skill_cost(skill);
        skill.activate(character, cost)?;
        self.phase = CombatPhase::ResolvingAction;

        log.line(format!(
            "{} readies {}! ({} {} remaining)",
            character.name(),
            skill,
            character.pool(skill.resource()).current(),
            skill.resource()
        ));
        log.event(CombatEvent::SkillActivated { skill, cost });
        self.run_enemy_turn(character, log, rng);
        Ok(())
    }

    /// End check after the player's action, then the enemies act.
    fn continue_after_player_action(
        &mut self,
        character: &mut Character,
        log: &mut TurnLog,
        rng: &mut impl Rng,
    ) {
        if let Some(outcome) = self.end_condition(character) {
            self.phase = CombatPhase::End(outcome);
        } else {
            self.run_enemy_turn(character, log, rng);
        }
    }

    fn run_enemy_turn(&mut self, character: &mut Character, log: &mut TurnLog, rng: &mut impl Rng) {
        self.phase = CombatPhase::EnemyTurn;
        log.line("--- Enemy Turn ---");

        for index in 0..self.enemies.len() {
            if !self.enemies[index].is_alive() {
                continue;
            }
            let rolled = self.enemies[index].roll_damage(rng);
            let enemy_name = self.enemies[index].name.clone();

            if consume_counterattack(character) {
                let basic = roll_basic_attack(character, rng);
                let counter = (basic as f64 * self.config.counter_damage_multiplier).round() as u32;
                let dealt = self.enemies[index].take_damage(counter);
                log.line(format!(
                    "{} counters {}'s attack and strikes back for {} damage!",
                    character.name(),
                    enemy_name,
                    dealt
                ));
                log.event(CombatEvent::AttackCountered {
                    enemy: enemy_name,
                    negated: rolled,
                    counter_damage: dealt,
                });
                self.report_enemy_status(index, log);
            } else {
                let taken = character.take_damage(rolled);
                log.line(format!(
                    "{} attacks! You take {} from {}! HP: {}",
                    enemy_name,
                    taken,
                    enemy_name,
                    character.health()
                ));
                log.event(CombatEvent::EnemyAttack {
                    enemy: enemy_name,
                    damage: taken,
                });
                self.gain_rage(character, taken, log);
            }

            if !character.is_alive() {
                log.line("You are defeated!");
                log.event(CombatEvent::PlayerDefeated);
                break;
            }
        }

        match self.end_condition(character) {
            Some(outcome) => self.phase = CombatPhase::End(outcome),
            None => {
                self.round += 1;
                self.enter_player_turn(log);
            }
        }
    }

    fn enter_player_turn(&mut self, log: &mut TurnLog) {
        log.line("--- Your Turn ---");
        self.phase = CombatPhase::PlayerChoice(MenuState::Main);
    }

    /// Defeat takes priority over victory.
    fn end_condition(&self, character: &Character) -> Option<CombatOutcome> {
        if !character.is_alive() {
            Some(CombatOutcome::Defeat)
        } else if self.first_living_index().is_none() {
            Some(CombatOutcome::Victory)
        } else {
            None
        }
    }

    fn report_enemy_status(&mut self, index: usize, log: &mut TurnLog) {
        let enemy = &self.enemies[index];
        if enemy.is_defeated() {
            log.line(format!("{} defeated!", enemy.name));
            log.event(CombatEvent::EnemyDefeated {
                enemy: enemy.name.clone(),
            });
            self.slain.push(enemy.name.clone());
        } else {
            log.line(format!(
                "{} HP: {}/{}",
                enemy.name, enemy.current_health, enemy.max_health
            ));
        }
    }

    fn gain_rage(&self, character: &mut Character, damage: u32, log: &mut TurnLog) {
        let gained = character.gain_rage_from_damage(damage, self.config.rage_gain_ratio);
        if gained > 0 {
            log.event(CombatEvent::ResourceGained {
                resource: ResourceKind::Rage,
                amount: gained,
            });
        }
    }

    /// Applies the end-of-combat effects to the character.
    fn finish(
        &mut self,
        character: &mut Character,
        outcome: CombatOutcome,
        log: &mut TurnLog,
        rng: &mut impl Rng,
    ) -> CombatSummary {
        character.set_stance(false);

        let mut summary = CombatSummary {
            outcome,
            rounds: self.round,
            slain: self.slain.clone(),
            gold: 0,
            xp: 0,
            items: Vec::new(),
            level_ups: Vec::new(),
        };

        match outcome {
            CombatOutcome::Victory => {
                log.line("You are victorious!");
                for enemy in self.enemies.iter().filter(|e| e.is_defeated()) {
                    let loot = enemy.roll_loot(rng);
                    summary.xp += enemy.xp_reward;
                    summary.gold += u64::from(loot.gold);
                    summary.items.extend(loot.items);
                }
                character.add_gold(summary.gold);
                for item in &summary.items {
                    character.add_item(item.clone());
                }
                summary.level_ups = character.gain_experience(summary.xp);
                for level_up in &summary.level_ups {
                    log.line(format!(
                        "{} reached Level {}! Stats increased.",
                        character.name(),
                        level_up.new_level
                    ));
                    log.event(CombatEvent::LevelUp(*level_up));
                }
            }
            CombatOutcome::Defeat => {
                log.line("You have been defeated...");
                if self.config.defeat_full_restore {
                    character.restore_to_max();
                } else {
                    character.restore_health();
                }
            }
            CombatOutcome::Fled => log.line("Combat ended."),
        }
        log.line("--- COMBAT ENDED ---");
        log.event(CombatEvent::CombatEnded { outcome });

        tracing::info!(
            %outcome,
            rounds = summary.rounds,
            xp = summary.xp,
            gold = summary.gold,
            "combat ended"
        );
        summary
    }

    fn outcome(&self, log: TurnLog, summary: Option<CombatSummary>) -> TurnOutcome {
        TurnOutcome {
            log: log.lines,
            events: log.events,
            phase: self.phase,
            summary,
        }
    }
}
