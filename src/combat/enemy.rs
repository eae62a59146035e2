use crate::character::{Attributes, DerivedStats};
use crate::items::{roll_gold, roll_loot_table, Item, ItemId, LootDrop};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    GoblinScavenger,
    ForestWolf,
    GiantForestSpider,
    RoadBandit,
}

impl EnemyKind {
    pub fn all() -> [EnemyKind; 4] {
        [
            EnemyKind::GoblinScavenger,
            EnemyKind::ForestWolf,
            EnemyKind::GiantForestSpider,
            EnemyKind::RoadBandit,
        ]
    }

    /// A fresh copy of this kind's static template.
    pub fn template(&self) -> EnemyTemplate {
        match self {
            EnemyKind::GoblinScavenger => EnemyTemplate {
                kind: *self,
                name: "Goblin Scavenger".to_string(),
                attributes: Attributes::from_values([6, 7, 3, 4, 2, 4, 4, 1]),
                min_damage: 2,
                max_damage: 4,
                xp_reward: 10,
                min_gold: 1,
                max_gold: 5,
                loot: vec![
                    LootDrop::new(ItemId::GoblinEar, 0.6, 1, 2),
                    LootDrop::single(ItemId::CrustyBread, 0.15),
                ],
            },
            EnemyKind::ForestWolf => EnemyTemplate {
                kind: *self,
                name: "Forest Wolf".to_string(),
                attributes: Attributes::from_values([7, 8, 2, 6, 2, 5, 6, 1]),
                min_damage: 3,
                max_damage: 6,
                xp_reward: 15,
                min_gold: 3,
                max_gold: 10,
                loot: vec![LootDrop::single(ItemId::WolfPelt, 0.7)],
            },
            EnemyKind::GiantForestSpider => EnemyTemplate {
                kind: *self,
                name: "Giant Forest Spider".to_string(),
                attributes: Attributes::from_values([5, 9, 2, 5, 1, 3, 4, 1]),
                min_damage: 2,
                max_damage: 5,
                xp_reward: 12,
                min_gold: 2,
                max_gold: 7,
                loot: vec![LootDrop::new(ItemId::SpiderSilk, 0.5, 1, 3)],
            },
            EnemyKind::RoadBandit => EnemyTemplate {
                kind: *self,
                name: "Road Bandit".to_string(),
                attributes: Attributes::from_values([8, 7, 5, 7, 4, 5, 5, 3]),
                min_damage: 4,
                max_damage: 7,
                xp_reward: 20,
                min_gold: 10,
                max_gold: 25,
                loot: vec![
                    LootDrop::single(ItemId::BanditMask, 0.2),
                    LootDrop::single(ItemId::MinorHealingPotion, 0.1),
                ],
            },
        }
    }

    pub fn spawn(&self) -> Enemy {
        Enemy::from_template(self.template())
    }
}

/// Static description of an enemy type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub kind: EnemyKind,
    pub name: String,
    pub attributes: Attributes,
    pub min_damage: u32,
    pub max_damage: u32,
    pub xp_reward: u64,
    pub min_gold: u32,
    pub max_gold: u32,
    pub loot: Vec<LootDrop>,
}

/// Gold and items rolled from a defeated enemy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DroppedLoot {
    pub gold: u32,
    pub items: Vec<Item>,
}

/// One combatant, instantiated per encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub name: String,
    pub attributes: Attributes,
    pub max_health: u32,
    pub current_health: u32,
    pub min_damage: u32,
    pub max_damage: u32,
    pub xp_reward: u64,
    pub min_gold: u32,
    pub max_gold: u32,
    pub loot: Vec<LootDrop>,
}

impl Enemy {
    /// Damage bounds are normalized so `min <= max`.
    pub fn from_template(template: EnemyTemplate) -> Self {
        let max_health = DerivedStats::from_attributes(&template.attributes).max_health;
        Self {
            kind: template.kind,
            name: template.name,
            attributes: template.attributes,
            max_health,
            current_health: max_health,
            min_damage: template.min_damage,
            max_damage: template.max_damage.max(template.min_damage),
            xp_reward: template.xp_reward,
            min_gold: template.min_gold,
            max_gold: template.max_gold.max(template.min_gold),
            loot: template.loot,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    pub fn is_defeated(&self) -> bool {
        !self.is_alive()
    }

    /// Returns the damage actually applied.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let before = self.current_health;
        self.current_health = self.current_health.saturating_sub(amount);
        before - self.current_health
    }

    /// Uniform in `[min_damage, max_damage]`.
    pub fn roll_damage(&self, rng: &mut impl Rng) -> u32 {
        rng.gen_range(self.min_damage..=self.max_damage)
    }

    pub fn roll_loot(&self, rng: &mut impl Rng) -> DroppedLoot {
        DroppedLoot {
            gold: roll_gold(self.min_gold, self.max_gold, rng),
            items: roll_loot_table(&self.loot, rng),
        }
    }
}

impl fmt::Display for Enemy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}/{}HP)",
            self.name, self.current_health, self.max_health
        )
    }
}
