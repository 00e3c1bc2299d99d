//! What each cell and the status indicator should display.

use crate::engine::Cell;
use crate::session::PlayState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellGlyph {
    Hidden,
    Flag,
    WrongFlag,
    Mine,
    /// Revealed safe cell; zero renders blank.
    Count(u8),
}

impl CellGlyph {
    pub fn for_cell(cell: &Cell) -> Self {
        if !cell.is_revealed() {
            if cell.is_flagged() { Self::Flag } else { Self::Hidden }
        } else if cell.is_flagged() && !cell.is_armed() {
            Self::WrongFlag
        } else if cell.is_armed() {
            Self::Mine
        } else {
            Self::Count(cell.armed_adjacent_count())
        }
    }

    pub fn symbol(self) -> char {
        match self {
            // Hidden cells need a mark of their own, since revealed zeros are blank.
            Self::Hidden => '.',
            Self::Flag => 'F',
            Self::WrongFlag => 'X',
            Self::Mine => '*',
            Self::Count(0) => ' ',
            Self::Count(n) => char::from_digit(n as u32, 10).unwrap_or('?'),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusGlyph {
    Blank,
    Loss,
    Win,
}

impl StatusGlyph {
    pub fn for_state(state: PlayState) -> Self {
        match state {
            PlayState::Playing => Self::Blank,
            PlayState::Lost => Self::Loss,
            PlayState::Won => Self::Win,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Blank => "",
            Self::Loss => "💀",
            Self::Win => "🎉",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Board;

    #[test]
    fn hidden_cells_show_flag_or_nothing() {
        let mut board = Board::with_mines(3, 1, &[(2, 0)]).unwrap();
        board.toggle_flag(1, 0);
        assert_eq!(board.cell(0, 0).unwrap().glyph(), CellGlyph::Hidden);
        assert_eq!(board.cell(1, 0).unwrap().glyph(), CellGlyph::Flag);
        assert_eq!(CellGlyph::Hidden.symbol(), '.');
    }

    #[test]
    fn loss_marks_wrong_flags_and_mines() {
        let mut board = Board::with_mines(3, 1, &[(0, 0), (2, 0)]).unwrap();
        board.toggle_flag(1, 0);
        board.toggle_flag(2, 0);
        board.reveal(0, 0);
        assert_eq!(board.cell(0, 0).unwrap().glyph(), CellGlyph::Mine);
        assert_eq!(board.cell(1, 0).unwrap().glyph(), CellGlyph::WrongFlag);
        assert_eq!(board.cell(2, 0).unwrap().glyph(), CellGlyph::Flag);
    }

    #[test]
    fn counts_render_blank_for_zero() {
        assert_eq!(CellGlyph::Count(0).symbol(), ' ');
        assert_eq!(CellGlyph::Count(3).symbol(), '3');
    }

    #[test]
    fn status_follows_play_state() {
        assert_eq!(StatusGlyph::for_state(PlayState::Playing).symbol(), "");
        assert_eq!(StatusGlyph::for_state(PlayState::Lost), StatusGlyph::Loss);
        assert_eq!(StatusGlyph::for_state(PlayState::Won), StatusGlyph::Win);
    }
}
