use super::location::Location;
use crate::core::error::GameError;
use std::collections::HashMap;

/// All locations plus the one the character currently occupies.
#[derive(Debug, Clone)]
pub struct WorldMap {
    locations: HashMap<String, Location>,
    current: String,
}

impl WorldMap {
    /// Fails if `start_id` is not among `locations`.
    pub fn new(locations: Vec<Location>, start_id: &str) -> Result<Self, GameError> {
        let mut map = HashMap::with_capacity(locations.len());
        for location in locations {
            let key = location.id.to_ascii_lowercase();
            if map.contains_key(&key) {
                tracing::warn!(id = %location.id, "duplicate location ignored");
                continue;
            }
            map.insert(key, location);
        }
        let start = start_id.to_ascii_lowercase();
        if !map.contains_key(&start) {
            return Err(GameError::UnknownLocation(start_id.to_string()));
        }
        Ok(Self {
            locations: map,
            current: start,
        })
    }

    pub fn get(&self, id: &str) -> Option<&Location> {
        self.locations.get(&id.to_ascii_lowercase())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn current_id(&self) -> &str {
        &self.current
    }

    pub fn current(&self) -> Result<&Location, GameError> {
        self.get(&self.current)
            .ok_or_else(|| GameError::UnknownLocation(self.current.clone()))
    }

    /// Moves to `id` directly (respawn, retreat).
    pub fn set_current(&mut self, id: &str) -> Result<&Location, GameError> {
        let key = id.to_ascii_lowercase();
        if !self.locations.contains_key(&key) {
            return Err(GameError::UnknownLocation(id.to_string()));
        }
        self.current = key;
        self.current()
    }

    /// Follows an exit from the current location.
    pub fn travel(&mut self, direction: &str) -> Result<&Location, GameError> {
        let target = self
            .current()?
            .exit(direction)
            .ok_or_else(|| GameError::NoExit(direction.trim().to_ascii_lowercase()))?
            .to_string();
        tracing::debug!(from = %self.current, to = %target, "travel");
        self.set_current(&target)
    }

    pub fn look(&self) -> String {
        match self.current() {
            Ok(location) => location.look(),
            Err(_) => "You are lost in the void.".to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.locations.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_rooms() -> WorldMap {
        let mut a = Location::new("a", "Room A", "First.");
        a.add_exit("east", "b");
        let mut b = Location::new("b", "Room B", "Second.");
        b.add_exit("west", "a");
        WorldMap::new(vec![a, b], "a").unwrap()
    }

    #[test]
    fn test_unknown_start_rejected() {
        let err = WorldMap::new(vec![Location::new("a", "A", "")], "zzz").unwrap_err();
        assert_eq!(err, GameError::UnknownLocation("zzz".to_string()));
    }

    #[test]
    fn test_travel_follows_exits() {
        let mut map = two_rooms();
        assert_eq!(map.travel("East").unwrap().name, "Room B");
        assert_eq!(map.current_id(), "b");
        assert_eq!(map.travel("west").unwrap().id, "a");
    }

    #[test]
    fn test_travel_without_exit_keeps_position() {
        let mut map = two_rooms();
        let err = map.travel("north").unwrap_err();
        assert_eq!(err, GameError::NoExit("north".to_string()));
        assert_eq!(map.current_id(), "a");
    }

    #[test]
    fn test_exit_to_missing_location() {
        let mut a = Location::new("a", "A", "");
        a.add_exit("down", "nowhere");
        let mut map = WorldMap::new(vec![a], "a").unwrap();
        assert!(matches!(map.travel("down"), Err(GameError::UnknownLocation(_))));
        assert_eq!(map.current_id(), "a");
    }

    #[test]
    fn test_set_current() {
        let mut map = two_rooms();
        map.set_current("B").unwrap();
        assert_eq!(map.current_id(), "b");
        assert!(map.set_current("c").is_err());
        assert_eq!(map.current_id(), "b");
    }
}
