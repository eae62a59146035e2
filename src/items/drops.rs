use super::catalog::ItemId;
use super::types::Item;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One loot-table entry: an item, its drop chance and quantity range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LootDrop {
    pub item: ItemId,
    chance: f64,
    min_qty: u32,
    max_qty: u32,
}

impl LootDrop {
    /// Chance is clamped to 0..=1; quantities to `1 <= min <= max`.
    pub fn new(item: ItemId, chance: f64, min_qty: u32, max_qty: u32) -> Self {
        let chance = if chance.is_nan() {
            0.0
        } else {
            chance.clamp(0.0, 1.0)
        };
        let min_qty = min_qty.max(1);
        Self {
            item,
            chance,
            min_qty,
            max_qty: max_qty.max(min_qty),
        }
    }

    pub fn single(item: ItemId, chance: f64) -> Self {
        Self::new(item, chance, 1, 1)
    }

    pub fn chance(&self) -> f64 {
        self.chance
    }

    pub fn quantity_range(&self) -> (u32, u32) {
        (self.min_qty, self.max_qty)
    }

    /// Rolls this entry. Returns a fresh item instance if it drops.
    pub fn roll(&self, rng: &mut impl Rng) -> Option<Item> {
        if !drop_hits(self.chance, rng.gen::<f64>()) {
            return None;
        }
        let item = self.item.create();
        let quantity = if item.stackable {
            rng.gen_range(self.min_qty..=self.max_qty)
        } else {
            1
        };
        Some(item.with_quantity(quantity))
    }
}

/// Inclusive drop check. A chance of zero never hits, even on a roll of 0.0.
pub fn drop_hits(chance: f64, roll: f64) -> bool {
    chance > 0.0 && roll <= chance
}

/// Uniform gold in `[min, max]`; a reversed range yields `min`.
pub fn roll_gold(min: u32, max: u32, rng: &mut impl Rng) -> u32 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..=max)
}

/// Rolls every entry independently.
pub fn roll_loot_table(table: &[LootDrop], rng: &mut impl Rng) -> Vec<Item> {
    table.iter().filter_map(|entry| entry.roll(rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_new_clamps_values() {
        let drop = LootDrop::new(ItemId::GoblinEar, 1.7, 0, 0);
        assert_eq!(drop.chance(), 1.0);
        assert_eq!(drop.quantity_range(), (1, 1));

        let drop = LootDrop::new(ItemId::SpiderSilk, -0.3, 3, 1);
        assert_eq!(drop.chance(), 0.0);
        assert_eq!(drop.quantity_range(), (3, 3));
    }

    #[test]
    fn test_drop_hits_boundaries() {
        assert!(drop_hits(0.5, 0.5));
        assert!(!drop_hits(0.5, 0.5000001));
        assert!(!drop_hits(0.0, 0.0));
        assert!(drop_hits(1.0, 1.0));
    }

    #[test]
    fn test_certain_drop_always_drops() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let entry = LootDrop::single(ItemId::WolfPelt, 1.0);
        for _ in 0..1000 {
            assert!(entry.roll(&mut rng).is_some());
        }
    }

    #[test]
    fn test_zero_chance_never_drops() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let entry = LootDrop::single(ItemId::WolfPelt, 0.0);
        for _ in 0..1000 {
            assert!(entry.roll(&mut rng).is_none());
        }
    }

    #[test]
    fn test_stackable_quantity_within_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let entry = LootDrop::new(ItemId::SpiderSilk, 1.0, 1, 3);
        let mut seen = [false; 4];
        for _ in 0..500 {
            let item = entry.roll(&mut rng).unwrap();
            assert!((1..=3).contains(&item.quantity()));
            seen[item.quantity() as usize] = true;
        }
        assert!(seen[1] && seen[2] && seen[3]);
    }

    #[test]
    fn test_non_stackable_ignores_quantity_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(14);
        let entry = LootDrop::new(ItemId::BanditMask, 1.0, 2, 5);
        for _ in 0..100 {
            assert_eq!(entry.roll(&mut rng).unwrap().quantity(), 1);
        }
    }

    #[test]
    fn test_roll_gold_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(15);
        for _ in 0..500 {
            let gold = roll_gold(3, 10, &mut rng);
            assert!((3..=10).contains(&gold));
        }
        assert_eq!(roll_gold(7, 7, &mut rng), 7);
        assert_eq!(roll_gold(9, 2, &mut rng), 9);
    }
}
