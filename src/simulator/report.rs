//! Simulation report generation.

use super::config::SimConfig;
use super::runner::RunStats;
use crate::combat::CombatOutcome;
use serde::Serialize;

/// Aggregated results from a batch of fights.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub class: String,
    pub location: String,
    pub num_runs: u32,

    // Outcome counts
    pub victories: u32,
    pub defeats: u32,
    pub fled: u32,
    pub timed_out: u32,

    // Per-run averages
    pub avg_rounds: f64,
    pub avg_enemies: f64,
    pub avg_xp: f64,
    pub avg_gold: f64,
    pub avg_health_left: f64,
    pub avg_potions_used: f64,

    pub total_level_ups: u32,
}

impl SimReport {
    pub fn from_runs(runs: &[RunStats], config: &SimConfig) -> Self {
        let count = |outcome: Option<CombatOutcome>| {
            runs.iter().filter(|r| r.outcome == outcome).count() as u32
        };

        Self {
            class: config.class.to_string(),
            location: config.location_id.clone(),
            num_runs: runs.len() as u32,
            victories: count(Some(CombatOutcome::Victory)),
            defeats: count(Some(CombatOutcome::Defeat)),
            fled: count(Some(CombatOutcome::Fled)),
            timed_out: count(None),
            avg_rounds: mean(runs, |r| r.rounds as f64),
            avg_enemies: mean(runs, |r| r.enemies as f64),
            avg_xp: mean(runs, |r| r.xp as f64),
            avg_gold: mean(runs, |r| r.gold as f64),
            avg_health_left: mean(runs, |r| r.health_left as f64),
            avg_potions_used: mean(runs, |r| r.potions_used as f64),
            total_level_ups: runs.iter().map(|r| r.level_ups).sum(),
        }
    }

    /// Percentage of runs won.
    pub fn win_rate(&self) -> f64 {
        percent(self.victories, self.num_runs)
    }

    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                      SIMULATION RESULTS\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!("Matchup: {} at {}\n", self.class, self.location));
        report.push_str(&format!("Runs:    {}\n\n", self.num_runs));

        report.push_str("OUTCOMES\n");
        report.push_str("───────────────────────────────────────────────────────────────\n");
        for (label, n) in [
            ("Victory", self.victories),
            ("Defeat", self.defeats),
            ("Fled", self.fled),
            ("Timed out", self.timed_out),
        ] {
            report.push_str(&format!(
                "  {:<10} {:>6}  ({:>5.1}%)\n",
                label,
                n,
                percent(n, self.num_runs)
            ));
        }

        report.push_str("\nAVERAGES PER FIGHT\n");
        report.push_str("───────────────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Rounds:        {:.2}\n", self.avg_rounds));
        report.push_str(&format!("  Enemies:       {:.2}\n", self.avg_enemies));
        report.push_str(&format!("  XP:            {:.2}\n", self.avg_xp));
        report.push_str(&format!("  Gold:          {:.2}\n", self.avg_gold));
        report.push_str(&format!("  Health left:   {:.2}\n", self.avg_health_left));
        report.push_str(&format!("  Potions used:  {:.2}\n", self.avg_potions_used));
        report.push_str(&format!("  Level-ups:     {}\n", self.total_level_ups));

        if self.num_runs > 0 {
            report.push_str("\nBALANCE NOTES\n");
            report.push_str("───────────────────────────────────────────────────────────────\n");
            let win_rate = self.win_rate();
            if win_rate < 50.0 {
                report.push_str("  ⚠️  Fewer than half the fights are won - enemies too strong?\n");
            } else if win_rate > 98.0 && self.avg_health_left > 0.0 {
                report.push_str("  ⚠️  Almost every fight is won - enemies too weak?\n");
            } else {
                report.push_str("  ✓ Win rate within the expected band\n");
            }
            if self.timed_out > 0 {
                report.push_str("  ⚠️  Some fights hit the round cap - damage too low?\n");
            }
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

fn mean(runs: &[RunStats], value: impl Fn(&RunStats) -> f64) -> f64 {
    if runs.is_empty() {
        return 0.0;
    }
    runs.iter().map(value).sum::<f64>() / runs.len() as f64
}

fn percent(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
