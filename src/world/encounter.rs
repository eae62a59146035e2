use super::location::Location;
use crate::combat::Enemy;
use rand::Rng;

/// Rolls whether `location` produces a fight and, if so, its roster.
/// An empty roster means no encounter.
pub fn roll_encounter(location: &Location, rng: &mut impl Rng) -> Vec<Enemy> {
    if !can_have_encounters(location) {
        return Vec::new();
    }
    let roll = rng.gen::<f64>();
    build_encounter(location, roll, rng)
}

/// Builds a roster from an already drawn encounter roll. The boundary is
/// inclusive: `roll == encounter_chance` is a hit.
pub fn build_encounter(location: &Location, roll: f64, rng: &mut impl Rng) -> Vec<Enemy> {
    if !can_have_encounters(location) || roll > location.encounter_chance() {
        tracing::debug!(location = %location.id, roll, "no encounter");
        return Vec::new();
    }

    let pool = location.possible_enemies();
    let count = rng.gen_range(1..=location.max_enemies());
    let roster: Vec<Enemy> = (0..count)
        .map(|_| pool[rng.gen_range(0..pool.len())].spawn())
        .collect();

    tracing::debug!(location = %location.id, roll, count, "encounter rolled");
    roster
}

fn can_have_encounters(location: &Location) -> bool {
    !location.possible_enemies().is_empty() && location.encounter_chance() > 0.0
}
