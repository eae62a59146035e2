use super::attributes::Attributes;
use super::derived_stats::DerivedStats;
use super::identity::{CharacterClass, Origin, Race};
use super::resources::{ResourceKind, ResourcePool};
use crate::core::config::BalanceConfig;
use crate::core::constants::{
    MAX_CHARACTER_NAME_LENGTH, STARTING_LEVEL, STARTING_XP_TO_NEXT_LEVEL, XP_THRESHOLD_GROWTH,
};
use crate::core::error::GameError;
use crate::items::{Inventory, Item};
use serde::Serialize;
use std::fmt::Write as _;
use uuid::Uuid;

const SUMMARY_RULE: &str = "--------------------";

/// The player-controlled character.
///
/// Only `CharacterBuilder::build` produces one, so a `Character` always has
/// a validated identity and pools consistent with its attributes. It
/// serializes for reports but has no `Deserialize` for the same reason.
#[derive(Debug, Clone, Serialize)]
pub struct Character {
    pub id: Uuid,
    name: String,
    race: Race,
    class: CharacterClass,
    origin: Origin,
    attributes: Attributes,
    health: ResourcePool,
    mana: ResourcePool,
    rage: ResourcePool,
    energy: ResourcePool,
    inventory: Inventory,
    gold: u64,
    pub(super) level: u32,
    pub(super) xp: u64,
    pub(super) xp_to_next_level: u64,
    pub(super) xp_threshold_growth: f64,
    stance_active: bool,
}

#[derive(Debug, Clone)]
pub struct CharacterBuilder {
    name: String,
    race: Race,
    class: CharacterClass,
    origin: Origin,
    base: Attributes,
    starting_xp_to_next_level: u64,
    xp_threshold_growth: f64,
}

impl CharacterBuilder {
    pub fn new(name: impl Into<String>, race: Race, class: CharacterClass, origin: Origin) -> Self {
        Self {
            name: name.into(),
            race,
            class,
            origin,
            base: Attributes::new(),
            starting_xp_to_next_level: STARTING_XP_TO_NEXT_LEVEL,
            xp_threshold_growth: XP_THRESHOLD_GROWTH,
        }
    }

    /// Attributes before class specialization (defaults to the baseline).
    pub fn base_attributes(mut self, base: Attributes) -> Self {
        self.base = base;
        self
    }

    pub fn balance(mut self, config: &BalanceConfig) -> Self {
        self.starting_xp_to_next_level = config.starting_xp_to_next_level;
        self.xp_threshold_growth = config.xp_threshold_growth;
        self
    }

    pub fn build(self) -> Result<Character, GameError> {
        let name = validate_name(&self.name)?;
        if !self.race.allows_origin(self.origin) {
            return Err(GameError::InvalidOrigin {
                race: self.race.to_string(),
                origin: self.origin.to_string(),
            });
        }

        let mut attributes = self.base;
        attributes.specialize(self.class);

        let mut character = Character {
            id: Uuid::new_v4(),
            name,
            race: self.race,
            class: self.class,
            origin: self.origin,
            attributes,
            health: ResourcePool::default(),
            mana: ResourcePool::default(),
            rage: ResourcePool::default(),
            energy: ResourcePool::default(),
            inventory: Inventory::new(),
            gold: 0,
            level: STARTING_LEVEL,
            xp: 0,
            xp_to_next_level: self.starting_xp_to_next_level,
            xp_threshold_growth: self.xp_threshold_growth,
            stance_active: false,
        };
        character.recompute_derived_stats();
        character.restore_to_max();

        tracing::info!(
            name = %character.name,
            class = %character.class,
            hp = %character.health,
            "character created"
        );
        Ok(character)
    }
}

fn validate_name(raw: &str) -> Result<String, GameError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(GameError::InvalidName("name cannot be empty".to_string()));
    }
    if name.chars().count() > MAX_CHARACTER_NAME_LENGTH {
        return Err(GameError::InvalidName(format!(
            "name must be {} characters or less",
            MAX_CHARACTER_NAME_LENGTH
        )));
    }
    Ok(name.to_string())
}

impl Character {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn race(&self) -> Race {
        self.race
    }

    pub fn class(&self) -> CharacterClass {
        self.class
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub(super) fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    pub fn health(&self) -> &ResourcePool {
        &self.health
    }

    pub fn mana(&self) -> &ResourcePool {
        &self.mana
    }

    pub fn rage(&self) -> &ResourcePool {
        &self.rage
    }

    pub fn energy(&self) -> &ResourcePool {
        &self.energy
    }

    pub fn pool(&self, kind: ResourceKind) -> &ResourcePool {
        match kind {
            ResourceKind::Health => &self.health,
            ResourceKind::Mana => &self.mana,
            ResourceKind::Rage => &self.rage,
            ResourceKind::Energy => &self.energy,
        }
    }

    fn pool_mut(&mut self, kind: ResourceKind) -> &mut ResourcePool {
        match kind {
            ResourceKind::Health => &mut self.health,
            ResourceKind::Mana => &mut self.mana,
            ResourceKind::Rage => &mut self.rage,
            ResourceKind::Energy => &mut self.energy,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn xp(&self) -> u64 {
        self.xp
    }

    pub fn xp_to_next_level(&self) -> u64 {
        self.xp_to_next_level
    }

    pub fn gold(&self) -> u64 {
        self.gold
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn is_alive(&self) -> bool {
        self.health.current() > 0
    }

    pub fn derived_stats(&self) -> DerivedStats {
        DerivedStats::from_attributes(&self.attributes)
    }

    /// Recomputes every max pool from the current attributes. Current values
    /// are clamped to the new maxima but never raised.
    pub fn recompute_derived_stats(&mut self) {
        let stats = self.derived_stats();
        self.health.set_max(stats.max_health);
        self.mana.set_max(stats.max_mana);
        self.rage.set_max(stats.max_rage);
        self.energy.set_max(stats.max_energy);
    }

    /// Full rest: health, mana and energy refilled, rage emptied.
    pub fn restore_to_max(&mut self) {
        self.health.refill();
        self.mana.refill();
        self.energy.refill();
        self.rage.clear();
    }

    pub fn restore_health(&mut self) {
        self.health.refill();
    }

    pub(super) fn refill(&mut self, kind: ResourceKind) {
        self.pool_mut(kind).refill();
    }

    pub(super) fn grant(&mut self, kind: ResourceKind, amount: u32) -> u32 {
        self.pool_mut(kind).restore(amount)
    }

    /// Returns the damage actually applied.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        self.health.drain(amount)
    }

    /// Returns the health actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        self.health.restore(amount)
    }

    /// Spends `amount` from a pool, or fails without changing anything.
    pub fn use_resource(&mut self, kind: ResourceKind, amount: u32) -> Result<(), GameError> {
        let pool = self.pool_mut(kind);
        if pool.max() == 0 {
            return Err(GameError::AbilityUnavailable(format!("You do not use {}.", kind)));
        }
        let available = pool.current();
        if pool.try_spend(amount) {
            Ok(())
        } else {
            Err(GameError::InsufficientResource {
                resource: kind,
                required: amount,
                available,
            })
        }
    }

    pub fn use_mana(&mut self, amount: u32) -> Result<(), GameError> {
        self.use_resource(ResourceKind::Mana, amount)
    }

    pub fn use_rage(&mut self, amount: u32) -> Result<(), GameError> {
        self.use_resource(ResourceKind::Rage, amount)
    }

    pub fn use_energy(&mut self, amount: u32) -> Result<(), GameError> {
        self.use_resource(ResourceKind::Energy, amount)
    }

    /// Rage earned from dealing or taking `damage`. Only classes whose
    /// primary resource is rage gain any. Returns the rage actually added.
    pub fn gain_rage_from_damage(&mut self, damage: u32, ratio: f64) -> u32 {
        if self.class.primary_resource() != ResourceKind::Rage {
            return 0;
        }
        let amount = (damage as f64 * ratio).floor().max(0.0) as u32;
        self.rage.restore(amount)
    }

    pub fn stance_active(&self) -> bool {
        self.stance_active
    }

    pub(crate) fn set_stance(&mut self, active: bool) {
        self.stance_active = active;
    }

    pub fn add_gold(&mut self, amount: u64) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// Returns false (and spends nothing) for zero or unaffordable amounts.
    pub fn spend_gold(&mut self, amount: u64) -> bool {
        if amount > 0 && self.gold >= amount {
            self.gold -= amount;
            true
        } else {
            false
        }
    }

    pub fn add_item(&mut self, item: Item) {
        self.inventory.add(item);
    }

    pub fn remove_item(&mut self, name: &str, quantity: u32) -> bool {
        self.inventory.remove(name, quantity)
    }

    pub fn has_item(&self, name: &str) -> bool {
        self.inventory.count(name) > 0
    }

    pub fn stats_summary(&self) -> String {
        let a = &self.attributes;
        let mut s = String::new();
        let _ = writeln!(s, "--- Player Stats ---");
        let _ = writeln!(
            s,
            "Name: {} ({} {} from {})",
            self.name, self.race, self.class, self.origin
        );
        let _ = writeln!(
            s,
            "Level: {} (XP: {}/{})",
            self.level, self.xp, self.xp_to_next_level
        );
        let _ = writeln!(s, "{}", SUMMARY_RULE);
        let _ = writeln!(s, "Health: {} / {}", self.health.current(), self.health.max());
        if self.mana.max() > 0 {
            let _ = writeln!(
                s,
                "Mana:   {} / {} (WIS: {})",
                self.mana.current(),
                self.mana.max(),
                a.wisdom()
            );
        }
        if self.rage.max() > 0 {
            let _ = writeln!(
                s,
                "Rage:   {} / {} (FUR: {})",
                self.rage.current(),
                self.rage.max(),
                a.fury()
            );
        }
        if self.energy.max() > 0 {
            let _ = writeln!(
                s,
                "Energy: {} / {} (END: {})",
                self.energy.current(),
                self.energy.max(),
                a.endurance()
            );
        }
        let _ = writeln!(s, "Gold: {}g", self.gold);
        let _ = writeln!(s, "{}", SUMMARY_RULE);
        let _ = writeln!(s, "Attributes:");
        let _ = writeln!(
            s,
            "  Strength: {}  |  Agility: {}  |  Intelligence: {}",
            a.strength(),
            a.agility(),
            a.intelligence()
        );
        let _ = writeln!(
            s,
            "  Stamina: {} |  Wisdom: {} |  Fury: {}",
            a.stamina(),
            a.wisdom(),
            a.fury()
        );
        let _ = writeln!(s, "  Endurance: {} |  Faith: {}", a.endurance(), a.faith());
        let _ = writeln!(s, "{}", SUMMARY_RULE);
        s
    }

    pub fn inventory_summary(&self) -> String {
        let mut s = String::new();
        let _ = writeln!(s, "--- Inventory ---");
        if self.inventory.is_empty() {
            let _ = writeln!(s, "Your inventory is empty.");
        } else {
            for item in self.inventory.iter() {
                let _ = writeln!(s, "- {}", item);
            }
        }
        let _ = writeln!(s);
        let _ = writeln!(s, "Gold: {}g", self.gold);
        let _ = writeln!(s, "{}", SUMMARY_RULE);
        s
    }
}

/// Holds the single player character of a session.
///
/// Starts empty; `initialize` fills it exactly once.
#[derive(Debug, Clone, Default)]
pub enum PlayerSlot {
    #[default]
    Uninitialized,
    Ready(Box<Character>),
}

impl PlayerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initialize(
        &mut self,
        name: &str,
        race: Race,
        class: CharacterClass,
        origin: Origin,
        base: Attributes,
    ) -> Result<(), GameError> {
        self.initialize_with(CharacterBuilder::new(name, race, class, origin).base_attributes(base))
    }

    /// Builds and stores the character. A second call is rejected and the
    /// existing character is kept.
    pub fn initialize_with(&mut self, builder: CharacterBuilder) -> Result<(), GameError> {
        if let PlayerSlot::Ready(existing) = self {
            tracing::warn!(name = %existing.name(), "ignoring repeated character initialization");
            return Err(GameError::AlreadyInitialized);
        }
        *self = PlayerSlot::Ready(Box::new(builder.build()?));
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self, PlayerSlot::Ready(_))
    }

    pub fn character(&self) -> Result<&Character, GameError> {
        match self {
            PlayerSlot::Ready(character) => Ok(&**character),
            PlayerSlot::Uninitialized => Err(GameError::NotInitialized),
        }
    }

    pub fn character_mut(&mut self) -> Result<&mut Character, GameError> {
        match self {
            PlayerSlot::Ready(character) => Ok(&mut **character),
            PlayerSlot::Uninitialized => Err(GameError::NotInitialized),
        }
    }

    pub fn stats_summary(&self) -> String {
        self.character()
            .map(Character::stats_summary)
            .unwrap_or_else(|_| "Player data not available yet.".to_string())
    }

    pub fn inventory_summary(&self) -> String {
        self.character()
            .map(Character::inventory_summary)
            .unwrap_or_else(|_| "Player data not available yet.".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::ItemId;

    fn fighter() -> Character {
        CharacterBuilder::new(
            "Brakka",
            Race::Orc,
            CharacterClass::Fighter,
            Origin::BloodfangTribeWarrior,
        )
        .build()
        .unwrap()
    }

    #[test]
    fn test_character_serializes_built_state() {
        let hero = fighter();
        let value = serde_json::to_value(&hero).unwrap();
        assert_eq!(value["name"], "Brakka");
        assert_eq!(value["level"], 1);
        assert_eq!(value["health"]["max"], u64::from(hero.health().max()));
    }

    fn wizard() -> Character {
        CharacterBuilder::new(
            "Ilyra",
            Race::Elf,
            CharacterClass::Wizard,
            Origin::LoremasterOfSilverspire,
        )
        .build()
        .unwrap()
    }

    #[test]
    fn test_build_applies_specialization_and_pools() {
        let c = fighter();
        assert_eq!(c.attributes().strength(), 12);
        assert_eq!(c.health().max(), 90);
        assert_eq!(c.health().current(), 90);
        assert_eq!(c.rage().max(), 100);
        assert_eq!(c.rage().current(), 0);
        assert_eq!(c.mana().current(), c.mana().max());
        assert_eq!(c.level(), 1);
        assert_eq!(c.xp(), 0);
        assert_eq!(c.xp_to_next_level(), 100);
    }

    #[test]
    fn test_build_trims_name() {
        let c = CharacterBuilder::new("  Tamsin  ", Race::Human, CharacterClass::Cleric, Origin::AcolyteOfTheSunTemple)
            .build()
            .unwrap();
        assert_eq!(c.name(), "Tamsin");
    }

    #[test]
    fn test_build_rejects_bad_names() {
        let empty = CharacterBuilder::new("   ", Race::Human, CharacterClass::Scout, Origin::CitizenOfStonecrest)
            .build();
        assert!(matches!(empty, Err(GameError::InvalidName(_))));

        let long = CharacterBuilder::new(
            "ThisNameIsDefinitelyTooLong",
            Race::Human,
            CharacterClass::Scout,
            Origin::CitizenOfStonecrest,
        )
        .build();
        assert!(matches!(long, Err(GameError::InvalidName(_))));
    }

    #[test]
    fn test_build_rejects_foreign_origin() {
        let result = CharacterBuilder::new("Grum", Race::Dwarf, CharacterClass::Fighter, Origin::RiverbendShaman)
            .build();
        assert!(matches!(result, Err(GameError::InvalidOrigin { .. })));
    }

    #[test]
    fn test_slot_initialize_once() {
        let mut slot = PlayerSlot::new();
        assert!(matches!(slot.character(), Err(GameError::NotInitialized)));

        slot.initialize(
            "Ilyra",
            Race::Elf,
            CharacterClass::Wizard,
            Origin::WhisperwindForestDweller,
            Attributes::new(),
        )
        .unwrap();
        assert!(slot.is_initialized());

        let again = slot.initialize(
            "Other",
            Race::Human,
            CharacterClass::Fighter,
            Origin::CitizenOfStonecrest,
            Attributes::new(),
        );
        assert_eq!(again, Err(GameError::AlreadyInitialized));
        assert_eq!(slot.character().unwrap().name(), "Ilyra");
    }

    #[test]
    fn test_slot_summaries_before_init() {
        let slot = PlayerSlot::new();
        assert_eq!(slot.stats_summary(), "Player data not available yet.");
        assert_eq!(slot.inventory_summary(), "Player data not available yet.");
    }

    #[test]
    fn test_take_damage_and_heal() {
        let mut c = wizard();
        assert_eq!(c.take_damage(20), 20);
        assert_eq!(c.health().current(), 30);
        assert_eq!(c.heal(100), 20);
        assert_eq!(c.take_damage(500), 50);
        assert!(!c.is_alive());
    }

    #[test]
    fn test_use_resource_failures_leave_pool_untouched() {
        let mut c = wizard();
        assert!(c.use_mana(30).is_ok());
        assert_eq!(c.mana().current(), 70);

        let err = c.use_mana(80).unwrap_err();
        assert_eq!(
            err,
            GameError::InsufficientResource {
                resource: ResourceKind::Mana,
                required: 80,
                available: 70,
            }
        );
        assert_eq!(c.mana().current(), 70);
    }

    #[test]
    fn test_use_rage_at_zero() {
        let mut c = fighter();
        assert!(matches!(
            c.use_rage(10),
            Err(GameError::InsufficientResource {
                resource: ResourceKind::Rage,
                ..
            })
        ));
    }

    #[test]
    fn test_use_resource_without_pool() {
        let mut c = fighter();
        let zeroed = Attributes::from_values([5, 5, 5, 5, 0, 0, 0, 0]);
        *c.attributes_mut() = zeroed;
        c.recompute_derived_stats();
        assert!(matches!(c.use_energy(1), Err(GameError::AbilityUnavailable(_))));
    }

    #[test]
    fn test_rage_gain_only_for_rage_classes() {
        let mut f = fighter();
        assert_eq!(f.gain_rage_from_damage(7, 0.5), 3);
        assert_eq!(f.rage().current(), 3);

        let mut w = wizard();
        assert_eq!(w.gain_rage_from_damage(7, 0.5), 0);
        assert_eq!(w.rage().current(), 0);
    }

    #[test]
    fn test_rage_gain_capped() {
        let mut f = fighter();
        f.gain_rage_from_damage(1000, 0.5);
        assert_eq!(f.rage().current(), f.rage().max());
    }

    #[test]
    fn test_restore_to_max_clears_rage() {
        let mut f = fighter();
        f.gain_rage_from_damage(40, 0.5);
        f.take_damage(30);
        f.restore_to_max();
        assert_eq!(f.rage().current(), 0);
        assert_eq!(f.health().current(), f.health().max());
    }

    #[test]
    fn test_gold() {
        let mut c = wizard();
        c.add_gold(12);
        assert!(!c.spend_gold(13));
        assert!(!c.spend_gold(0));
        assert!(c.spend_gold(12));
        assert_eq!(c.gold(), 0);
    }

    #[test]
    fn test_items() {
        let mut c = wizard();
        c.add_item(ItemId::WolfPelt.create().with_quantity(2));
        assert!(c.has_item("Wolf Pelt"));
        assert!(c.remove_item("Wolf Pelt", 2));
        assert!(!c.has_item("Wolf Pelt"));
    }

    #[test]
    fn test_stats_summary_lists_only_used_pools() {
        let c = wizard();
        let summary = c.stats_summary();
        assert!(summary.starts_with("--- Player Stats ---\n"));
        assert!(summary.contains("Name: Ilyra (Elf Wizard from Loremaster Of Silverspire)"));
        assert!(summary.contains("Level: 1 (XP: 0/100)"));
        assert!(summary.contains("Health: 50 / 50"));
        assert!(summary.contains("Mana:   100 / 100 (WIS: 10)"));
        assert!(summary.contains("Rage:   0 / 30 (FUR: 3)"));
        assert!(summary.contains("Gold: 0g"));
    }

    #[test]
    fn test_inventory_summary() {
        let mut c = wizard();
        assert!(c.inventory_summary().contains("Your inventory is empty."));
        c.add_item(ItemId::GoblinEar.create().with_quantity(2));
        c.add_gold(7);
        let summary = c.inventory_summary();
        assert!(summary.contains("- Goblin Ear (x2) - Value: 2g"));
        assert!(summary.contains("Gold: 7g"));
    }
}
