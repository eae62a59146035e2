//! Race, class and origin catalogue.
//!
//! All three are closed enums; adding a variant forces every `match` below
//! to be updated, which is how new classes pick up their stat boosts.

use super::attributes::AttributeType;
use super::resources::ResourceKind;
use crate::core::constants::{PRIMARY_STAT_BOOST, SECONDARY_STAT_BOOST};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Race {
    Human,
    Elf,
    Dwarf,
    Orc,
    Troll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterClass {
    Fighter,
    Wizard,
    Scout,
    Ranger,
    Cleric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Origin {
    CitizenOfStonecrest,
    AcolyteOfTheSunTemple,
    ReaverOfTheBrokenCoast,
    WhisperwindForestDweller,
    LoremasterOfSilverspire,
    ShadowWalkerOfTheHiddenPaths,
    ClanHoldOfIronpeak,
    DeepRoadsProspector,
    GuardianOfTheAncestralTombs,
    BloodfangTribeWarrior,
    SpiritCallerOfTheAshPlains,
    StrongholdArtificer,
    MossrockValleyGuardian,
    RiverbendShaman,
    HighPeakClanMember,
}

impl Race {
    pub fn all() -> [Race; 5] {
        [Race::Human, Race::Elf, Race::Dwarf, Race::Orc, Race::Troll]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Race::Human => "Human",
            Race::Elf => "Elf",
            Race::Dwarf => "Dwarf",
            Race::Orc => "Orc",
            Race::Troll => "Troll",
        }
    }

    /// Origins a character of this race may choose.
    pub fn origins(&self) -> [Origin; 3] {
        match self {
            Race::Human => [
                Origin::CitizenOfStonecrest,
                Origin::AcolyteOfTheSunTemple,
                Origin::ReaverOfTheBrokenCoast,
            ],
            Race::Elf => [
                Origin::WhisperwindForestDweller,
                Origin::LoremasterOfSilverspire,
                Origin::ShadowWalkerOfTheHiddenPaths,
            ],
            Race::Dwarf => [
                Origin::ClanHoldOfIronpeak,
                Origin::DeepRoadsProspector,
                Origin::GuardianOfTheAncestralTombs,
            ],
            Race::Orc => [
                Origin::BloodfangTribeWarrior,
                Origin::SpiritCallerOfTheAshPlains,
                Origin::StrongholdArtificer,
            ],
            Race::Troll => [
                Origin::MossrockValleyGuardian,
                Origin::RiverbendShaman,
                Origin::HighPeakClanMember,
            ],
        }
    }

    pub fn allows_origin(&self, origin: Origin) -> bool {
        self.origins().contains(&origin)
    }
}

impl CharacterClass {
    pub fn all() -> [CharacterClass; 5] {
        [
            CharacterClass::Fighter,
            CharacterClass::Wizard,
            CharacterClass::Scout,
            CharacterClass::Ranger,
            CharacterClass::Cleric,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            CharacterClass::Fighter => "Fighter",
            CharacterClass::Wizard => "Wizard",
            CharacterClass::Scout => "Scout",
            CharacterClass::Ranger => "Ranger",
            CharacterClass::Cleric => "Cleric",
        }
    }

    /// Case-insensitive lookup by class name.
    pub fn from_name(name: &str) -> Option<CharacterClass> {
        Self::all()
            .into_iter()
            .find(|class| class.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Primary (+7) and secondary (+4) boosts applied on top of the baseline.
    pub fn stat_boosts(&self) -> &'static [(AttributeType, u32)] {
        match self {
            CharacterClass::Fighter => &[
                (AttributeType::Strength, PRIMARY_STAT_BOOST),
                (AttributeType::Fury, PRIMARY_STAT_BOOST),
                (AttributeType::Stamina, SECONDARY_STAT_BOOST),
            ],
            CharacterClass::Wizard => &[
                (AttributeType::Intelligence, PRIMARY_STAT_BOOST),
                (AttributeType::Wisdom, PRIMARY_STAT_BOOST),
            ],
            CharacterClass::Scout => &[
                (AttributeType::Agility, PRIMARY_STAT_BOOST),
                (AttributeType::Endurance, PRIMARY_STAT_BOOST),
            ],
            CharacterClass::Ranger => &[
                (AttributeType::Agility, PRIMARY_STAT_BOOST),
                (AttributeType::Wisdom, SECONDARY_STAT_BOOST),
            ],
            CharacterClass::Cleric => &[
                (AttributeType::Faith, PRIMARY_STAT_BOOST),
                (AttributeType::Wisdom, PRIMARY_STAT_BOOST),
                (AttributeType::Stamina, SECONDARY_STAT_BOOST),
            ],
        }
    }

    /// The pool this class spends on its special actions.
    pub fn primary_resource(&self) -> ResourceKind {
        match self {
            CharacterClass::Fighter => ResourceKind::Rage,
            CharacterClass::Wizard | CharacterClass::Ranger | CharacterClass::Cleric => {
                ResourceKind::Mana
            }
            CharacterClass::Scout => ResourceKind::Energy,
        }
    }
}

impl Origin {
    pub fn name(&self) -> &'static str {
        match self {
            Origin::CitizenOfStonecrest => "CitizenOfStonecrest",
            Origin::AcolyteOfTheSunTemple => "AcolyteOfTheSunTemple",
            Origin::ReaverOfTheBrokenCoast => "ReaverOfTheBrokenCoast",
            Origin::WhisperwindForestDweller => "WhisperwindForestDweller",
            Origin::LoremasterOfSilverspire => "LoremasterOfSilverspire",
            Origin::ShadowWalkerOfTheHiddenPaths => "ShadowWalkerOfTheHiddenPaths",
            Origin::ClanHoldOfIronpeak => "ClanHoldOfIronpeak",
            Origin::DeepRoadsProspector => "DeepRoadsProspector",
            Origin::GuardianOfTheAncestralTombs => "GuardianOfTheAncestralTombs",
            Origin::BloodfangTribeWarrior => "BloodfangTribeWarrior",
            Origin::SpiritCallerOfTheAshPlains => "SpiritCallerOfTheAshPlains",
            Origin::StrongholdArtificer => "StrongholdArtificer",
            Origin::MossrockValleyGuardian => "MossrockValleyGuardian",
            Origin::RiverbendShaman => "RiverbendShaman",
            Origin::HighPeakClanMember => "HighPeakClanMember",
        }
    }

    /// Human-readable name with spaces, e.g. "Citizen Of Stonecrest".
    pub fn display_name(&self) -> String {
        split_camel_case(self.name())
    }

    /// The race this origin belongs to.
    pub fn race(&self) -> Race {
        Race::all()
            .into_iter()
            .find(|race| race.allows_origin(*self))
            .unwrap_or(Race::Human)
    }
}

impl fmt::Display for Race {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

/// Inserts a space before every interior capital letter.
pub fn split_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 8);
    for (i, ch) in name.chars().enumerate() {
        if i > 0 && ch.is_uppercase() && !out.ends_with(' ') {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}
