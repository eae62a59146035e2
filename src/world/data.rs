//! The starting region: Stonecrest town and the forest to its north.

use super::location::Location;
use super::map::WorldMap;
use crate::combat::EnemyKind;
use crate::core::constants::RESPAWN_LOCATION_ID;
use crate::core::error::GameError;

pub fn default_locations() -> Vec<Location> {
    let mut town_square = Location::new(
        "town_square",
        "Town Square",
        "You are in the bustling town square. Cobblestone paths lead in several directions. A fountain gurgles peacefully in the center.",
    );
    town_square.add_exit("north", "north_road");
    town_square.add_exit("east", "general_store");

    let mut north_road = Location::new(
        "north_road",
        "North Road",
        "A dusty road leading north out of town. Fields stretch to the east and west. The air grows cooler to the north.",
    );
    north_road.add_exit("south", "town_square");
    north_road.add_exit("north", "forest_entrance");

    let mut general_store = Location::new(
        "general_store",
        "General Store",
        "A cozy shop filled with various goods. A counter stands at the back. A sign reads 'Open'.",
    );
    general_store.add_exit("west", "town_square");

    let mut forest_entrance = Location::new(
        "forest_entrance",
        "Forest Entrance",
        "The road gives way to a dark and ancient forest. A narrow, overgrown path winds north into the gloomy woods. You hear the distant caw of a crow.",
    )
    .with_encounters(0.3, 2);
    forest_entrance.add_possible_enemy(EnemyKind::ForestWolf);
    forest_entrance.add_possible_enemy(EnemyKind::GoblinScavenger);
    forest_entrance.add_exit("south", "north_road");
    forest_entrance.add_exit("north", "deep_woods");

    let mut deep_woods = Location::new(
        "deep_woods",
        "Deep Woods",
        "You are deep within the woods. Sunlight barely penetrates the thick canopy above. Strange sounds echo around you. Paths lead east and west, and the way back south.",
    )
    .with_encounters(0.5, 3);
    deep_woods.add_possible_enemy(EnemyKind::GiantForestSpider);
    deep_woods.add_possible_enemy(EnemyKind::ForestWolf);
    deep_woods.add_possible_enemy(EnemyKind::RoadBandit);
    deep_woods.add_exit("south", "forest_entrance");
    deep_woods.add_exit("east", "forest_clearing");
    deep_woods.add_exit("west", "ancient_grove");

    let mut ancient_grove = Location::new(
        "ancient_grove",
        "Ancient Grove",
        "You've stumbled into a serene grove. A circle of moss-covered stones stands silently in the center. The air feels strangely calm here. A path leads east out of the grove.",
    )
    .with_encounters(0.1, 1);
    ancient_grove.add_possible_enemy(EnemyKind::GoblinScavenger);
    ancient_grove.add_exit("east", "deep_woods");

    let mut forest_clearing = Location::new(
        "forest_clearing",
        "Forest Clearing",
        "A small, sun-dappled clearing. Wildflowers grow in patches. A narrow path leads west, back into the deeper woods.",
    )
    .with_encounters(0.2, 2);
    forest_clearing.add_possible_enemy(EnemyKind::GoblinScavenger);
    forest_clearing.add_possible_enemy(EnemyKind::GiantForestSpider);
    forest_clearing.add_exit("west", "deep_woods");

    vec![
        town_square,
        north_road,
        general_store,
        forest_entrance,
        deep_woods,
        ancient_grove,
        forest_clearing,
    ]
}

/// The default map, starting in the respawn location.
pub fn default_world() -> Result<WorldMap, GameError> {
    WorldMap::new(default_locations(), RESPAWN_LOCATION_ID)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_world_starts_in_town() {
        let world = default_world().unwrap();
        assert_eq!(world.current_id(), "town_square");
        assert_eq!(world.len(), 7);
    }

    #[test]
    fn test_every_exit_leads_somewhere() {
        let world = default_world().unwrap();
        for location in world.iter() {
            for (direction, target) in location.exits() {
                assert!(
                    world.contains(target),
                    "{} exit {} points at missing {}",
                    location.id,
                    direction,
                    target
                );
            }
        }
    }

    #[test]
    fn test_town_is_safe() {
        let world = default_world().unwrap();
        for id in ["town_square", "north_road", "general_store"] {
            let loc = world.get(id).unwrap();
            assert_eq!(loc.encounter_chance(), 0.0);
            assert!(loc.possible_enemies().is_empty());
        }
    }

    #[test]
    fn test_forest_encounter_settings() {
        let world = default_world().unwrap();
        let deep = world.get("deep_woods").unwrap();
        assert_eq!(deep.encounter_chance(), 0.5);
        assert_eq!(deep.max_enemies(), 3);
        assert_eq!(deep.possible_enemies().len(), 3);
        assert_eq!(world.get("ancient_grove").unwrap().max_enemies(), 1);
    }

    #[test]
    fn test_walk_to_deep_woods_and_back() {
        let mut world = default_world().unwrap();
        world.travel("north").unwrap();
        world.travel("north").unwrap();
        assert_eq!(world.travel("north").unwrap().id, "deep_woods");
        world.travel("west").unwrap();
        assert_eq!(world.current_id(), "ancient_grove");
        world.travel("east").unwrap();
        world.travel("east").unwrap();
        assert_eq!(world.current_id(), "forest_clearing");
    }
}
