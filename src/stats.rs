use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Cumulative results across all rounds. Only ever incremented.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    #[serde(default)]
    pub total_games: u32,
    #[serde(default)]
    pub total_wins: u32,
    /// Attempts needed for a win mapped to how many wins took that many attempts.
    #[serde(default)]
    pub distribution: BTreeMap<u32, u32>,
}

impl Statistics {
    pub fn record_win(&mut self, attempts: u32) {
        self.total_games += 1;
        self.total_wins += 1;
        *self.distribution.entry(attempts).or_insert(0) += 1;
    }

    pub fn record_loss(&mut self) {
        self.total_games += 1;
    }

    pub fn wins_in(&self, attempts: u32) -> u32 {
        self.distribution.get(&attempts).copied().unwrap_or(0)
    }

    /// Rounded win percentage, 0 when nothing has been played.
    pub fn win_percentage(&self) -> u32 {
        if self.total_games == 0 {
            return 0;
        }
        ((self.total_wins as f64 / self.total_games as f64) * 100.0).round() as u32
    }

    /// One row per attempt count `1..=max_attempts`, zero-filled.
    pub fn distribution_rows(&self, max_attempts: u32) -> Vec<(u32, u32)> {
        (1..=max_attempts).map(|n| (n, self.wins_in(n))).collect()
    }
}
