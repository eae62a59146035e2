use super::skills::Skill;
use crate::character::{LevelUp, ResourceKind};
use crate::items::Item;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuState {
    Main,
    Skills,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatOutcome {
    Victory,
    Defeat,
    Fled,
}

/// Turn phase of a combat session.
///
/// `Start`, `ResolvingAction` and `EnemyTurn` only exist while a call is
/// being processed; between calls the session is always in `PlayerChoice`
/// or `End`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatPhase {
    Start,
    PlayerChoice(MenuState),
    ResolvingAction,
    EnemyTurn,
    End(CombatOutcome),
}

impl CombatPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, CombatPhase::End(_))
    }
}

impl fmt::Display for CombatPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombatPhase::Start => f.write_str("combat is starting"),
            CombatPhase::PlayerChoice(MenuState::Main) => f.write_str("choosing an action"),
            CombatPhase::PlayerChoice(MenuState::Skills) => f.write_str("choosing a skill"),
            CombatPhase::ResolvingAction => f.write_str("an action is resolving"),
            CombatPhase::EnemyTurn => f.write_str("enemies are acting"),
            CombatPhase::End(_) => f.write_str("combat is over"),
        }
    }
}

impl fmt::Display for CombatOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombatOutcome::Victory => f.write_str("Victory"),
            CombatOutcome::Defeat => f.write_str("Defeat"),
            CombatOutcome::Fled => f.write_str("Fled"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    Attack,
    Cast,
    UseItem(String),
    Flee,
    OpenSkills,
    SelectSkill(Skill),
    Back,
}

impl PlayerAction {
    pub fn name(&self) -> &'static str {
        match self {
            PlayerAction::Attack => "Attack",
            PlayerAction::Cast => "Cast",
            PlayerAction::UseItem(_) => "Use item",
            PlayerAction::Flee => "Flee",
            PlayerAction::OpenSkills => "Open skills",
            PlayerAction::SelectSkill(_) => "Select skill",
            PlayerAction::Back => "Back",
        }
    }
}

/// Structured record of what happened during one call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    CombatStarted {
        enemies: Vec<String>,
    },
    PlayerAttack {
        target: String,
        damage: u32,
    },
    SpellCast {
        spell: String,
        target: Option<String>,
        amount: u32,
    },
    ItemUsed {
        item: String,
        healed: u32,
    },
    SkillActivated {
        skill: Skill,
        cost: u32,
    },
    EnemyAttack {
        enemy: String,
        damage: u32,
    },
    AttackCountered {
        enemy: String,
        negated: u32,
        counter_damage: u32,
    },
    ResourceGained {
        resource: ResourceKind,
        amount: u32,
    },
    EnemyDefeated {
        enemy: String,
    },
    FleeAttempt {
        success: bool,
    },
    PlayerDefeated,
    LevelUp(LevelUp),
    CombatEnded {
        outcome: CombatOutcome,
    },
}

/// Rewards and casualties of a finished combat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatSummary {
    pub outcome: CombatOutcome,
    pub rounds: u32,
    pub slain: Vec<String>,
    pub gold: u64,
    pub xp: u64,
    pub items: Vec<Item>,
    pub level_ups: Vec<LevelUp>,
}

impl CombatSummary {
    /// Post-combat report shown in the exploration log.
    pub fn report_lines(&self) -> Vec<String> {
        let mut lines = vec!["--------------------".to_string()];
        if !self.slain.is_empty() {
            lines.push("Enemies Slain:".to_string());
            lines.extend(self.slain.iter().map(|name| format!("- {}", name)));
        }
        if !self.items.is_empty() {
            lines.push("Loot Obtained:".to_string());
            for item in &self.items {
                if item.stackable && item.quantity() > 1 {
                    lines.push(format!("- {} (x{})", item.name, item.quantity()));
                } else {
                    lines.push(format!("- {}", item.name));
                }
            }
        }
        if self.gold > 0 {
            lines.push(format!("You found {} gold coins.", self.gold));
        }
        if self.xp > 0 {
            lines.push(format!("You gained {} experience.", self.xp));
        }
        lines.push("--------------------".to_string());
        lines
    }
}

/// Result of one accepted call into a combat session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnOutcome {
    pub log: Vec<String>,
    pub events: Vec<CombatEvent>,
    pub phase: CombatPhase,
    pub summary: Option<CombatSummary>,
}

impl TurnOutcome {
    pub fn is_finished(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn outcome(&self) -> Option<CombatOutcome> {
        match self.phase {
            CombatPhase::End(outcome) => Some(outcome),
            _ => None,
        }
    }
}
