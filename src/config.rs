//! Construction-time constants for one session: grid size, colours, drop timing, scoring tables.

use thiserror::Error;

/// Connected same-colour cells needed before a group erases. Fixed by the rules.
pub const ERASE_THRESHOLD: usize = 4;

/// Largest grid side the terminal view can lay out.
pub const MAX_GRID_SIDE: usize = 64;

/// Highest colour count the palette can draw distinctly.
pub const MAX_COLORS: u8 = 6;

/// Chain bonus percentages indexed by chain number (1st chain = index 1). Longer chains clamp to
/// the last entry.
pub const DEFAULT_CHAIN_BONUS: [u32; 12] = [0, 0, 8, 16, 32, 64, 96, 128, 160, 192, 224, 256];

/// Bonus for emptying the whole board at the end of a chain.
pub const DEFAULT_ALL_CLEAR_BONUS: u32 = 2100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid must have at least one column")]
    ZeroColumns,
    #[error("grid must have at least 2 rows, got {0}")]
    TooFewRows(usize),
    #[error("grid is at most {max}x{max}, got {cols}x{rows}", max = MAX_GRID_SIDE)]
    GridTooLarge { cols: usize, rows: usize },
    #[error("colour count must be in 1..={max}, got {got}", max = MAX_COLORS)]
    ColorCount { got: u8 },
    #[error("drop interval must be positive")]
    ZeroDropInterval,
    #[error("fast-drop multiplier must be positive")]
    ZeroFastDropMultiplier,
    #[error("erase threshold is fixed at {expected}, got {0}", expected = ERASE_THRESHOLD)]
    EraseThreshold(usize),
    #[error("chain bonus table must not be empty")]
    EmptyChainBonus,
}

/// Everything the simulation reads at construction. Never changes during a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub cols: usize,
    pub rows: usize,
    /// Colour tags are drawn from `1..=colors`.
    pub colors: u8,
    /// Unscaled time between automatic one-row drops.
    pub drop_interval_ms: u32,
    /// Time scale applied while fast drop is held.
    pub fast_drop_multiplier: u32,
    pub erase_threshold: usize,
    pub chain_bonus: Vec<u32>,
    pub all_clear_bonus: u32,
    /// Fixed RNG seed for reproducible colour sequences; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cols: 6,
            rows: 12,
            colors: 4,
            drop_interval_ms: 500,
            fast_drop_multiplier: 10,
            erase_threshold: ERASE_THRESHOLD,
            chain_bonus: DEFAULT_CHAIN_BONUS.to_vec(),
            all_clear_bonus: DEFAULT_ALL_CLEAR_BONUS,
            seed: None,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cols == 0 {
            return Err(ConfigError::ZeroColumns);
        }
        if self.rows < 2 {
            return Err(ConfigError::TooFewRows(self.rows));
        }
        if self.cols > MAX_GRID_SIDE || self.rows > MAX_GRID_SIDE {
            return Err(ConfigError::GridTooLarge {
                cols: self.cols,
                rows: self.rows,
            });
        }
        if self.colors == 0 || self.colors > MAX_COLORS {
            return Err(ConfigError::ColorCount { got: self.colors });
        }
        if self.drop_interval_ms == 0 {
            return Err(ConfigError::ZeroDropInterval);
        }
        if self.fast_drop_multiplier == 0 {
            return Err(ConfigError::ZeroFastDropMultiplier);
        }
        if self.erase_threshold != ERASE_THRESHOLD {
            return Err(ConfigError::EraseThreshold(self.erase_threshold));
        }
        if self.chain_bonus.is_empty() {
            return Err(ConfigError::EmptyChainBonus);
        }
        Ok(())
    }

    /// Fixed spawn coordinate of the axis cell: horizontal centre, top row.
    #[inline]
    pub fn spawn_point(&self) -> (i32, i32) {
        ((self.cols / 2) as i32, 0)
    }
}
