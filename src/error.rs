use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Board dimensions must be positive (got {width}x{height})")]
    InvalidDimensions { width: usize, height: usize },
    #[error("Mines must be less than cells ({mines} mines for {cells} cells)")]
    TooManyMines { mines: usize, cells: usize },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
