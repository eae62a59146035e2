use super::types::Item;
use serde::{Deserialize, Serialize};

/// Ordered item list. Stackable items merge by name; non-stackable items
/// are kept as separate entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: Item) {
        if item.stackable {
            if let Some(existing) = self
                .items
                .iter_mut()
                .find(|i| i.stackable && i.name == item.name)
            {
                existing.add_quantity(item.quantity());
                return;
            }
        }
        self.items.push(item);
    }

    /// Removes `quantity` of the named item. All-or-nothing: returns false
    /// and leaves the inventory untouched if there is not enough.
    pub fn remove(&mut self, name: &str, quantity: u32) -> bool {
        if quantity == 0 || self.count(name) < quantity {
            return false;
        }
        let Some(index) = self.position(name) else {
            return false;
        };

        if self.items[index].stackable {
            if !self.items[index].take_quantity(quantity) {
                return false;
            }
            if self.items[index].quantity() == 0 {
                self.items.remove(index);
            }
        } else {
            for _ in 0..quantity {
                if let Some(index) = self.position(name) {
                    self.items.remove(index);
                }
            }
        }
        true
    }

    /// Total quantity across every entry with this name.
    pub fn count(&self, name: &str) -> u32 {
        self.items
            .iter()
            .filter(|i| i.name == name)
            .map(|i| i.quantity())
            .sum()
    }

    pub fn get(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|i| i.name == name)
    }
}
