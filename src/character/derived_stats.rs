use super::attributes::Attributes;
use crate::core::constants::POOL_PER_ATTRIBUTE_POINT;
use serde::{Deserialize, Serialize};

/// Maximum pool sizes derived from attributes.
///
/// Shared by characters and enemies so both use the same multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedStats {
    pub max_health: u32,
    pub max_mana: u32,
    pub max_rage: u32,
    pub max_energy: u32,
}

impl DerivedStats {
    pub fn from_attributes(attrs: &Attributes) -> Self {
        // Max HP = STA × 10, Mana = WIS × 10, Rage = FUR × 10, Energy = END × 10
        Self {
            max_health: pool_size(attrs.stamina()),
            max_mana: pool_size(attrs.wisdom()),
            max_rage: pool_size(attrs.fury()),
            max_energy: pool_size(attrs.endurance()),
        }
    }
}

fn pool_size(attribute: u32) -> u32 {
    attribute.saturating_mul(POOL_PER_ATTRIBUTE_POINT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::attributes::AttributeType;
    use proptest::prelude::*;

    #[test]
    fn test_baseline_pools() {
        let stats = DerivedStats::from_attributes(&Attributes::new());
        assert_eq!(stats.max_health, 50);
        assert_eq!(stats.max_mana, 30);
        assert_eq!(stats.max_rage, 30);
        assert_eq!(stats.max_energy, 30);
    }

    #[test]
    fn test_recompute_after_mutation() {
        let mut attrs = Attributes::new();
        let before = DerivedStats::from_attributes(&attrs);
        attrs.increment_all();
        let after = DerivedStats::from_attributes(&attrs);
        assert_eq!(after.max_health, before.max_health + 10);
        assert_eq!(after.max_mana, before.max_mana + 10);
        assert_eq!(after.max_rage, before.max_rage + 10);
        assert_eq!(after.max_energy, before.max_energy + 10);
    }

    #[test]
    fn test_zero_attributes_give_empty_pools() {
        let stats = DerivedStats::from_attributes(&Attributes::from_values([0; 8]));
        assert_eq!(stats.max_health, 0);
        assert_eq!(stats.max_rage, 0);
    }

    proptest! {
        #[test]
        fn prop_pools_are_ten_times_attribute(values in prop::array::uniform8(0u32..10_000)) {
            let attrs = Attributes::from_values(values);
            let stats = DerivedStats::from_attributes(&attrs);
            prop_assert_eq!(stats.max_health, attrs.get(AttributeType::Stamina) * 10);
            prop_assert_eq!(stats.max_mana, attrs.get(AttributeType::Wisdom) * 10);
            prop_assert_eq!(stats.max_rage, attrs.get(AttributeType::Fury) * 10);
            prop_assert_eq!(stats.max_energy, attrs.get(AttributeType::Endurance) * 10);
        }
    }
}
