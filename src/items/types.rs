use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemType {
    Generic,
    Potion,
    Food,
}

impl ItemType {
    pub fn name(&self) -> &'static str {
        match self {
            ItemType::Generic => "Generic",
            ItemType::Potion => "Potion",
            ItemType::Food => "Food",
        }
    }
}

/// What happens when an item is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemEffect {
    None,
    Heal(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub description: String,
    pub item_type: ItemType,
    pub gold_value: u32,
    pub stackable: bool,
    pub effect: ItemEffect,
    quantity: u32,
}

impl Item {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        item_type: ItemType,
        gold_value: u32,
        stackable: bool,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            item_type,
            gold_value,
            stackable,
            effect: ItemEffect::None,
            quantity: 1,
        }
    }

    pub fn with_effect(mut self, effect: ItemEffect) -> Self {
        self.effect = effect;
        self
    }

    /// Sets the quantity. Non-stackable items always stay at 1, and a
    /// stackable item never drops below 1.
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = if self.stackable { quantity.max(1) } else { 1 };
        self
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn is_usable(&self) -> bool {
        self.effect != ItemEffect::None
    }

    /// Merges `amount` into this stack. Returns false (and does nothing)
    /// for non-stackable items.
    pub(crate) fn add_quantity(&mut self, amount: u32) -> bool {
        if !self.stackable {
            tracing::warn!(item = %self.name, "tried to add quantity to non-stackable item");
            return false;
        }
        self.quantity = self.quantity.saturating_add(amount);
        true
    }

    pub(crate) fn take_quantity(&mut self, amount: u32) -> bool {
        if self.quantity < amount {
            return false;
        }
        self.quantity -= amount;
        true
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.stackable && self.quantity > 1 {
            write!(
                f,
                "{} (x{}) - Value: {}g",
                self.name, self.quantity, self.gold_value
            )
        } else {
            write!(f, "{} - Value: {}g", self.name, self.gold_value)
        }
    }
}
