use crate::combat::EnemyKind;
use serde::{Deserialize, Serialize};

/// A place on the world map and its encounter settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub description: String,
    exits: Vec<(String, String)>,
    possible_enemies: Vec<EnemyKind>,
    encounter_chance: f64,
    max_enemies: u32,
}

impl Location {
    /// A safe location: no encounters.
    pub fn new(id: &str, name: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            exits: Vec::new(),
            possible_enemies: Vec::new(),
            encounter_chance: 0.0,
            max_enemies: 1,
        }
    }

    /// Chance is clamped to 0..=1 and the enemy cap to at least 1.
    pub fn with_encounters(mut self, chance: f64, max_enemies: u32) -> Self {
        self.encounter_chance = if chance.is_nan() {
            0.0
        } else {
            chance.clamp(0.0, 1.0)
        };
        self.max_enemies = max_enemies.max(1);
        self
    }

    /// Directions are case-insensitive; a repeated direction is ignored.
    pub fn add_exit(&mut self, direction: &str, target_id: &str) {
        let direction = direction.to_ascii_lowercase();
        if self.exit(&direction).is_some() {
            tracing::warn!(location = %self.id, %direction, "duplicate exit ignored");
            return;
        }
        self.exits.push((direction, target_id.to_string()));
    }

    pub fn add_possible_enemy(&mut self, kind: EnemyKind) {
        if !self.possible_enemies.contains(&kind) {
            self.possible_enemies.push(kind);
        }
    }

    pub fn exit(&self, direction: &str) -> Option<&str> {
        self.exits
            .iter()
            .find(|(dir, _)| dir.eq_ignore_ascii_case(direction.trim()))
            .map(|(_, target)| target.as_str())
    }

    pub fn exits(&self) -> impl Iterator<Item = (&str, &str)> {
        self.exits.iter().map(|(d, t)| (d.as_str(), t.as_str()))
    }

    pub fn possible_enemies(&self) -> &[EnemyKind] {
        &self.possible_enemies
    }

    pub fn encounter_chance(&self) -> f64 {
        self.encounter_chance
    }

    pub fn max_enemies(&self) -> u32 {
        self.max_enemies
    }

    pub fn exits_description(&self) -> String {
        if self.exits.is_empty() {
            return "There are no obvious exits.".to_string();
        }
        let directions: Vec<&str> = self.exits.iter().map(|(d, _)| d.as_str()).collect();
        format!("You can go: {}.", directions.join(", "))
    }

    pub fn look(&self) -> String {
        format!(
            "Location: {}\n{}\n{}\n",
            self.name,
            self.description,
            self.exits_description()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encounter_settings_clamped() {
        let loc = Location::new("x", "X", "").with_encounters(1.4, 0);
        assert_eq!(loc.encounter_chance(), 1.0);
        assert_eq!(loc.max_enemies(), 1);
        let loc = Location::new("y", "Y", "").with_encounters(-0.2, 3);
        assert_eq!(loc.encounter_chance(), 0.0);
    }

    #[test]
    fn test_exits_case_insensitive_and_unique() {
        let mut loc = Location::new("a", "A", "");
        loc.add_exit("North", "b");
        loc.add_exit("north", "c");
        assert_eq!(loc.exit("NORTH"), Some("b"));
        assert_eq!(loc.exits().count(), 1);
        assert_eq!(loc.exit("south"), None);
    }

    #[test]
    fn test_possible_enemies_deduplicated() {
        let mut loc = Location::new("a", "A", "");
        loc.add_possible_enemy(EnemyKind::ForestWolf);
        loc.add_possible_enemy(EnemyKind::ForestWolf);
        assert_eq!(loc.possible_enemies(), &[EnemyKind::ForestWolf]);
    }

    #[test]
    fn test_exits_description() {
        let mut loc = Location::new("a", "A", "Somewhere.");
        assert_eq!(loc.exits_description(), "There are no obvious exits.");
        loc.add_exit("north", "b");
        loc.add_exit("east", "c");
        assert_eq!(loc.exits_description(), "You can go: north, east.");
        assert_eq!(loc.look(), "Location: A\nSomewhere.\nYou can go: north, east.\n");
    }
}
