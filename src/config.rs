use crate::error::{ConfigError, Result};

/// Board shape and mine count for one session.
///
/// A `seed` of 0 draws the mine layout from OS entropy; any other value makes
/// placement reproducible.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    width: usize,
    height: usize,
    mine_count: usize,
    seed: u64,
}

impl GameConfig {
    pub fn new(width: usize, height: usize, mine_count: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidDimensions { width, height });
        }
        let cells = width * height;
        if mine_count >= cells {
            return Err(ConfigError::TooManyMines { mines: mine_count, cells });
        }
        Ok(Self { width, height, mine_count, seed: 0 })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }
    pub fn mine_count(&self) -> usize { self.mine_count }
    pub fn seed(&self) -> u64 { self.seed }
    pub fn total_cells(&self) -> usize { self.width * self.height }
}
