//! Score: base points per erased cell, chain bonus table, all-clear bonus.

use crate::config::Config;

/// Points per erased cell before the chain bonus.
const POINTS_PER_CELL: u32 = 10;

#[derive(Debug, Clone)]
pub struct ScoreKeeper {
    chain_bonus: Vec<u32>,
    all_clear_bonus: u32,
    total: u32,
}

impl ScoreKeeper {
    pub fn new(config: &Config) -> Self {
        Self {
            chain_bonus: config.chain_bonus.clone(),
            all_clear_bonus: config.all_clear_bonus,
            total: 0,
        }
    }

    /// Bonus percentage for a chain index; indices past the table clamp to its last entry.
    pub fn chain_bonus(&self, chain: usize) -> u32 {
        self.chain_bonus
            .get(chain)
            .or_else(|| self.chain_bonus.last())
            .copied()
            .unwrap_or(0)
    }

    /// Adds `floor(cleared * 10 * (1 + bonus / 100))`, plus the all-clear bonus when set, to the
    /// running total. Returns the amount added.
    pub fn calculate_score(&mut self, cleared: usize, chain: usize, all_clear: bool) -> u32 {
        let base = cleared as u32 * POINTS_PER_CELL;
        let mut added = base * (100 + self.chain_bonus(chain)) / 100;
        if all_clear {
            added += self.all_clear_bonus;
        }
        self.total = self.total.saturating_add(added);
        added
    }

    #[inline]
    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn reset(&mut self) {
        self.total = 0;
    }
}
