use super::identity::CharacterClass;
use crate::core::constants::{
    BASE_PHYSICAL_ATTRIBUTE, BASE_RESOURCE_ATTRIBUTE, NUM_ATTRIBUTES,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AttributeType {
    Strength,
    Agility,
    Intelligence,
    Stamina,
    Wisdom,
    Fury,
    Endurance,
    Faith,
}

impl AttributeType {
    pub fn all() -> [AttributeType; NUM_ATTRIBUTES] {
        [
            AttributeType::Strength,
            AttributeType::Agility,
            AttributeType::Intelligence,
            AttributeType::Stamina,
            AttributeType::Wisdom,
            AttributeType::Fury,
            AttributeType::Endurance,
            AttributeType::Faith,
        ]
    }

    /// The four attributes that size the resource pools.
    pub fn resource_attributes() -> [AttributeType; 4] {
        [
            AttributeType::Wisdom,
            AttributeType::Fury,
            AttributeType::Endurance,
            AttributeType::Faith,
        ]
    }

    pub fn abbrev(&self) -> &'static str {
        match self {
            AttributeType::Strength => "STR",
            AttributeType::Agility => "AGI",
            AttributeType::Intelligence => "INT",
            AttributeType::Stamina => "STA",
            AttributeType::Wisdom => "WIS",
            AttributeType::Fury => "FUR",
            AttributeType::Endurance => "END",
            AttributeType::Faith => "FAI",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AttributeType::Strength => "Strength",
            AttributeType::Agility => "Agility",
            AttributeType::Intelligence => "Intelligence",
            AttributeType::Stamina => "Stamina",
            AttributeType::Wisdom => "Wisdom",
            AttributeType::Fury => "Fury",
            AttributeType::Endurance => "Endurance",
            AttributeType::Faith => "Faith",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            AttributeType::Strength => 0,
            AttributeType::Agility => 1,
            AttributeType::Intelligence => 2,
            AttributeType::Stamina => 3,
            AttributeType::Wisdom => 4,
            AttributeType::Fury => 5,
            AttributeType::Endurance => 6,
            AttributeType::Faith => 7,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attributes {
    values: [u32; NUM_ATTRIBUTES],
}

impl Default for Attributes {
    fn default() -> Self {
        Self::new()
    }
}

impl Attributes {
    /// Baseline spread: 5 in the physical stats, 3 in the resource stats.
    pub fn new() -> Self {
        let mut attrs = Self {
            values: [BASE_PHYSICAL_ATTRIBUTE; NUM_ATTRIBUTES],
        };
        for attr in AttributeType::resource_attributes() {
            attrs.set(attr, BASE_RESOURCE_ATTRIBUTE);
        }
        attrs
    }

    /// Builds attributes from values in `AttributeType::all()` order
    /// (STR, AGI, INT, STA, WIS, FUR, END, FAI).
    pub const fn from_values(values: [u32; NUM_ATTRIBUTES]) -> Self {
        Self { values }
    }

    pub fn get(&self, attr: AttributeType) -> u32 {
        self.values[attr.index()]
    }

    pub fn set(&mut self, attr: AttributeType, value: u32) {
        self.values[attr.index()] = value;
    }

    pub fn add(&mut self, attr: AttributeType, amount: u32) {
        self.values[attr.index()] = self.values[attr.index()].saturating_add(amount);
    }

    pub fn increment(&mut self, attr: AttributeType) {
        self.add(attr, 1);
    }

    /// +1 to every attribute (level-up).
    pub fn increment_all(&mut self) {
        for attr in AttributeType::all() {
            self.increment(attr);
        }
    }

    pub fn strength(&self) -> u32 {
        self.get(AttributeType::Strength)
    }

    pub fn agility(&self) -> u32 {
        self.get(AttributeType::Agility)
    }

    pub fn intelligence(&self) -> u32 {
        self.get(AttributeType::Intelligence)
    }

    pub fn stamina(&self) -> u32 {
        self.get(AttributeType::Stamina)
    }

    pub fn wisdom(&self) -> u32 {
        self.get(AttributeType::Wisdom)
    }

    pub fn fury(&self) -> u32 {
        self.get(AttributeType::Fury)
    }

    pub fn endurance(&self) -> u32 {
        self.get(AttributeType::Endurance)
    }

    pub fn faith(&self) -> u32 {
        self.get(AttributeType::Faith)
    }

    /// Applies class specialization in place.
    ///
    /// The resource attributes are reset to the low baseline first, so the
    /// class boosts alone decide which pools are large.
    pub fn specialize(&mut self, class: CharacterClass) {
        for attr in AttributeType::resource_attributes() {
            self.set(attr, BASE_RESOURCE_ATTRIBUTE);
        }
        for &(attr, boost) in class.stat_boosts() {
            self.add(attr, boost);
        }
    }

    /// Convenience: baseline attributes specialized for `class`.
    pub fn for_class(class: CharacterClass) -> Self {
        let mut attrs = Self::new();
        attrs.specialize(class);
        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_attributes_baseline() {
        let attrs = Attributes::new();
        assert_eq!(attrs.strength(), 5);
        assert_eq!(attrs.agility(), 5);
        assert_eq!(attrs.intelligence(), 5);
        assert_eq!(attrs.stamina(), 5);
        assert_eq!(attrs.wisdom(), 3);
        assert_eq!(attrs.fury(), 3);
        assert_eq!(attrs.endurance(), 3);
        assert_eq!(attrs.faith(), 3);
    }

    #[test]
    fn test_get_set() {
        let mut attrs = Attributes::new();
        attrs.set(AttributeType::Strength, 16);
        assert_eq!(attrs.get(AttributeType::Strength), 16);
        assert_eq!(attrs.get(AttributeType::Agility), 5);
    }

    #[test]
    fn test_from_values_order() {
        let attrs = Attributes::from_values([6, 7, 3, 4, 2, 4, 4, 1]);
        assert_eq!(attrs.strength(), 6);
        assert_eq!(attrs.agility(), 7);
        assert_eq!(attrs.intelligence(), 3);
        assert_eq!(attrs.stamina(), 4);
        assert_eq!(attrs.wisdom(), 2);
        assert_eq!(attrs.fury(), 4);
        assert_eq!(attrs.endurance(), 4);
        assert_eq!(attrs.faith(), 1);
    }

    #[test]
    fn test_increment_all() {
        let mut attrs = Attributes::new();
        attrs.increment_all();
        for attr in AttributeType::all() {
            let expected = if AttributeType::resource_attributes().contains(&attr) {
                4
            } else {
                6
            };
            assert_eq!(attrs.get(attr), expected, "{}", attr.name());
        }
    }

    #[test]
    fn test_fighter_specialization() {
        let attrs = Attributes::for_class(CharacterClass::Fighter);
        assert_eq!(attrs.strength(), 12);
        assert_eq!(attrs.fury(), 10);
        assert_eq!(attrs.stamina(), 9);
        assert_eq!(attrs.wisdom(), 3);
        assert_eq!(attrs.endurance(), 3);
    }

    #[test]
    fn test_wizard_specialization() {
        let attrs = Attributes::for_class(CharacterClass::Wizard);
        assert_eq!(attrs.intelligence(), 12);
        assert_eq!(attrs.wisdom(), 10);
        assert_eq!(attrs.stamina(), 5);
    }

    #[test]
    fn test_scout_ranger_cleric_specialization() {
        let scout = Attributes::for_class(CharacterClass::Scout);
        assert_eq!(scout.agility(), 12);
        assert_eq!(scout.endurance(), 10);

        let ranger = Attributes::for_class(CharacterClass::Ranger);
        assert_eq!(ranger.agility(), 12);
        assert_eq!(ranger.wisdom(), 7);

        let cleric = Attributes::for_class(CharacterClass::Cleric);
        assert_eq!(cleric.faith(), 10);
        assert_eq!(cleric.wisdom(), 10);
        assert_eq!(cleric.stamina(), 9);
    }

    #[test]
    fn test_specialization_resets_inflated_resource_stats() {
        let mut attrs = Attributes::new();
        attrs.set(AttributeType::Fury, 40);
        attrs.set(AttributeType::Faith, 25);
        attrs.specialize(CharacterClass::Wizard);
        assert_eq!(attrs.fury(), 3);
        assert_eq!(attrs.faith(), 3);
        assert_eq!(attrs.wisdom(), 10);
    }

    #[test]
    fn test_attribute_type_abbrev() {
        assert_eq!(AttributeType::Strength.abbrev(), "STR");
        assert_eq!(AttributeType::Agility.abbrev(), "AGI");
        assert_eq!(AttributeType::Fury.abbrev(), "FUR");
        assert_eq!(AttributeType::Faith.abbrev(), "FAI");
    }
}
