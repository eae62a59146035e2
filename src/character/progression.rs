use super::player::Character;
use super::resources::ResourceKind;
use crate::core::constants::{MAX_LEVEL_UPS_PER_GRANT, XP_THRESHOLD_SENTINEL};
use serde::{Deserialize, Serialize};

/// One level gained during `gain_experience`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUp {
    pub new_level: u32,
    pub health_gained: u32,
    pub xp_to_next_level: u64,
}

/// Next threshold: `round(current × growth)`, or the sentinel when that
/// would leave a zero threshold.
pub fn next_xp_threshold(current: u64, growth: f64) -> u64 {
    let next = (current as f64 * growth).round();
    if next < 1.0 {
        XP_THRESHOLD_SENTINEL
    } else {
        next as u64
    }
}

impl Character {
    /// Adds XP and applies every level-up it pays for, up to
    /// `MAX_LEVEL_UPS_PER_GRANT`. XP past the cap stays banked and pays out
    /// on the next grant. Zero is a no-op.
    pub fn gain_experience(&mut self, amount: u64) -> Vec<LevelUp> {
        let mut level_ups = Vec::new();
        if amount == 0 {
            return level_ups;
        }
        self.xp = self.xp.saturating_add(amount);
        tracing::debug!(name = %self.name(), amount, xp = self.xp, "experience gained");

        if self.xp_to_next_level == 0 {
            tracing::warn!("xp threshold was 0, clamping to sentinel");
            self.xp_to_next_level = XP_THRESHOLD_SENTINEL;
        }

        while self.xp >= self.xp_to_next_level {
            if level_ups.len() == MAX_LEVEL_UPS_PER_GRANT {
                tracing::warn!(
                    xp = self.xp,
                    next = self.xp_to_next_level,
                    "level-up cap reached, banking the remaining xp"
                );
                break;
            }
            self.xp -= self.xp_to_next_level;
            self.xp_to_next_level = next_xp_threshold(self.xp_to_next_level, self.xp_threshold_growth);
            let health_gained = self.level_up();
            level_ups.push(LevelUp {
                new_level: self.level,
                health_gained,
                xp_to_next_level: self.xp_to_next_level,
            });
        }
        level_ups
    }

    /// +1 level and +1 to every attribute. Health grows by the change in
    /// max health; mana and energy refill; rage is left alone.
    fn level_up(&mut self) -> u32 {
        let old_max_health = self.health().max();
        self.level = self.level.saturating_add(1);
        self.attributes_mut().increment_all();
        self.recompute_derived_stats();

        let delta = self.health().max().saturating_sub(old_max_health);
        let health_gained = self.grant(ResourceKind::Health, delta);
        self.refill(ResourceKind::Mana);
        self.refill(ResourceKind::Energy);

        tracing::info!(
            name = %self.name(),
            level = self.level,
            next = self.xp_to_next_level,
            "level up"
        );
        health_gained
    }
}
