//! Static item definitions. Every call returns a fresh instance.

use super::types::{Item, ItemEffect, ItemType};
use crate::core::constants::{CRUSTY_BREAD_HEAL_AMOUNT, MINOR_HEALING_POTION_AMOUNT};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemId {
    GoblinEar,
    WolfPelt,
    SpiderSilk,
    BanditMask,
    MinorHealingPotion,
    CrustyBread,
}

impl ItemId {
    pub fn all() -> [ItemId; 6] {
        [
            ItemId::GoblinEar,
            ItemId::WolfPelt,
            ItemId::SpiderSilk,
            ItemId::BanditMask,
            ItemId::MinorHealingPotion,
            ItemId::CrustyBread,
        ]
    }

    pub fn create(&self) -> Item {
        match self {
            ItemId::GoblinEar => Item::new(
                "Goblin Ear",
                "A grimy goblin ear. Proof of a kill, or perhaps an ingredient?",
                ItemType::Generic,
                2,
                true,
            ),
            ItemId::WolfPelt => Item::new(
                "Wolf Pelt",
                "A rough wolf pelt. Could be useful for crafting or trade.",
                ItemType::Generic,
                5,
                true,
            ),
            ItemId::SpiderSilk => Item::new(
                "Spider Silk",
                "A sticky strand of potent spider silk.",
                ItemType::Generic,
                3,
                true,
            ),
            ItemId::BanditMask => Item::new(
                "Bandit Mask",
                "A tattered mask, often worn by highwaymen.",
                ItemType::Generic,
                10,
                false,
            ),
            ItemId::MinorHealingPotion => Item::new(
                "Minor Healing Potion",
                "A common potion that restores a small amount of health.",
                ItemType::Potion,
                25,
                true,
            )
            .with_effect(ItemEffect::Heal(MINOR_HEALING_POTION_AMOUNT)),
            ItemId::CrustyBread => Item::new(
                "Crusty Bread",
                "A somewhat stale loaf of bread. Better than nothing.",
                ItemType::Food,
                1,
                true,
            )
            .with_effect(ItemEffect::Heal(CRUSTY_BREAD_HEAL_AMOUNT)),
        }
    }
}

/// Looks up a catalogue item by display name (case-insensitive).
pub fn item_by_name(name: &str) -> Option<Item> {
    ItemId::all()
        .into_iter()
        .map(|id| id.create())
        .find(|item| item.name.eq_ignore_ascii_case(name.trim()))
}
