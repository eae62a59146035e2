//! Resource-gated abilities layered on top of the basic attack.
//!
//! Skills live behind the skills menu (Fighter only for now); spells are
//! what the Cast action uses for the mana classes.

use crate::character::{Character, CharacterClass, ResourceKind};
use crate::core::constants::{HEALING_SPELL_FAITH_MULTIPLIER, PLAYER_ATTACK_SPREAD};
use crate::core::error::GameError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Skill {
    /// Parry-and-riposte stance: negates the next incoming attack and
    /// strikes back.
    Counterattack,
}

impl Skill {
    pub fn name(&self) -> &'static str {
        match self {
            Skill::Counterattack => "Counterattack",
        }
    }

    pub fn class(&self) -> CharacterClass {
        match self {
            Skill::Counterattack => CharacterClass::Fighter,
        }
    }

    pub fn resource(&self) -> ResourceKind {
        match self {
            Skill::Counterattack => ResourceKind::Rage,
        }
    }

    /// Skills listed in a class's skills menu.
    pub fn for_class(class: CharacterClass) -> &'static [Skill] {
        match class {
            CharacterClass::Fighter => &[Skill::Counterattack],
            CharacterClass::Wizard
            | CharacterClass::Scout
            | CharacterClass::Ranger
            | CharacterClass::Cleric => &[],
        }
    }

    /// Checks class, stance and resource without changing anything.
    pub fn can_activate(&self, character: &Character, cost: u32) -> Result<(), GameError> {
        if character.class() != self.class() {
            return Err(GameError::AbilityUnavailable(format!(
                "Only a {} can use {}.",
                self.class(),
                self.name()
            )));
        }
        if *self == Skill::Counterattack && character.stance_active() {
            return Err(GameError::AbilityUnavailable(format!(
                "{} is already active.",
                self.name()
            )));
        }
        let available = character.pool(self.resource()).current();
        if available < cost {
            return Err(GameError::InsufficientResource {
                resource: self.resource(),
                required: cost,
                available,
            });
        }
        Ok(())
    }

    /// Deducts the cost and applies the effect, or fails with no deduction.
    pub fn activate(&self, character: &mut Character, cost: u32) -> Result<(), GameError> {
        self.can_activate(character, cost)?;
        character.use_resource(self.resource(), cost)?;
        match self {
            Skill::Counterattack => character.set_stance(true),
        }
        tracing::debug!(skill = self.name(), cost, "skill activated");
        Ok(())
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Spends an active Counterattack stance. Returns false if none was active.
pub fn consume_counterattack(character: &mut Character) -> bool {
    if character.stance_active() {
        character.set_stance(false);
        true
    } else {
        false
    }
}

/// Uniform in `[base, base + spread)`, floored at 1. Bases near `u32::MAX`
/// are pulled down so the range stays non-empty.
pub fn roll_spread(base: u32, rng: &mut impl Rng) -> u32 {
    let low = base.min(u32::MAX - PLAYER_ATTACK_SPREAD);
    rng.gen_range(low..low + PLAYER_ATTACK_SPREAD).max(1)
}

/// Basic attack damage: `[Strength, Strength + 5)`, at least 1.
pub fn roll_basic_attack(character: &Character, rng: &mut impl Rng) -> u32 {
    roll_spread(character.attributes().strength(), rng)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Spell {
    ArcaneBolt,
    AimedShot,
    HolyLight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpellEffect {
    Damage(u32),
    Heal(u32),
}

impl Spell {
    pub fn for_class(class: CharacterClass) -> Option<Spell> {
        match class {
            CharacterClass::Wizard => Some(Spell::ArcaneBolt),
            CharacterClass::Ranger => Some(Spell::AimedShot),
            CharacterClass::Cleric => Some(Spell::HolyLight),
            CharacterClass::Fighter | CharacterClass::Scout => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Spell::ArcaneBolt => "Arcane Bolt",
            Spell::AimedShot => "Aimed Shot",
            Spell::HolyLight => "Holy Light",
        }
    }

    pub fn needs_target(&self) -> bool {
        !matches!(self, Spell::HolyLight)
    }

    pub fn roll_effect(&self, character: &Character, rng: &mut impl Rng) -> SpellEffect {
        let attrs = character.attributes();
        match self {
            Spell::ArcaneBolt => SpellEffect::Damage(roll_spread(attrs.intelligence(), rng)),
            Spell::AimedShot => SpellEffect::Damage(roll_spread(attrs.agility(), rng)),
            Spell::HolyLight => {
                SpellEffect::Heal(attrs.faith().saturating_mul(HEALING_SPELL_FAITH_MULTIPLIER))
            }
        }
    }
}

impl fmt::Display for Spell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
