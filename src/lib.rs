pub mod config;
pub mod engine;
pub mod error;
pub mod glyph;
pub mod navigation;
pub mod session;
pub mod ticker;
pub mod tui;

pub use config::GameConfig;
pub use engine::{AdjacencyCache, Board, Cell, FlagOutcome, RevealOutcome};
pub use error::{ConfigError, Result};
pub use glyph::{CellGlyph, StatusGlyph};
pub use navigation::{move_focus, Direction};
pub use session::{mount, GameSession, PlayState, SessionEvent, Snapshot};
