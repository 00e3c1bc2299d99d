use std::fmt::{self, Write as _};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GameConfig;
use crate::error::Result;
use crate::glyph::CellGlyph;

/// Sampling key given to the first revealed cell. Random keys live in `[0, 1)`,
/// so this one always sorts last and is never picked as a mine.
const EXCLUDED_KEY: f64 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoOp,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool { !matches!(self, Self::NoOp) }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoOp,
    Flagged,
    Unflagged,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    armed: bool,
    revealed: bool,
    flagged: bool,
    armed_adjacent: u8,
}

impl Cell {
    pub fn is_armed(&self) -> bool { self.armed }
    pub fn is_revealed(&self) -> bool { self.revealed }
    pub fn is_flagged(&self) -> bool { self.flagged }
    pub fn armed_adjacent_count(&self) -> u8 { self.armed_adjacent }
    pub fn glyph(&self) -> CellGlyph { CellGlyph::for_cell(self) }
}

/// Lazily computed, memoized neighbor lists keyed by cell index.
///
/// Neighbors are listed row by row starting at the upper-left offset and only
/// include in-bounds cells. Once computed a list never changes.
#[derive(Clone, Debug)]
pub struct AdjacencyCache {
    width: usize,
    height: usize,
    cache: Vec<Option<Box<[usize]>>>,
}

impl AdjacencyCache {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, cache: vec![None; width * height] }
    }

    /// Neighbor indices of (`x`, `y`), or `None` when it lies off the grid.
    pub fn neighbors(&mut self, x: usize, y: usize) -> Option<&[usize]> {
        if x >= self.width || y >= self.height { return None; }
        Some(self.neighbors_of(idx(self.width, x, y)))
    }

    pub fn is_cached(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.cache[idx(self.width, x, y)].is_some()
    }

    fn neighbors_of(&mut self, i: usize) -> &[usize] {
        let (w, h) = (self.width, self.height);
        &**self.cache[i].get_or_insert_with(|| {
            neighbors(w, h, i % w, i / w).map(|(nx, ny)| idx(w, nx, ny)).collect()
        })
    }
}

pub struct Board {
    width: usize,
    height: usize,
    mine_count: usize,
    cells: Vec<Cell>,
    adjacency: AdjacencyCache,
    hidden_count: usize,
    flagged_count: usize,
    mines_placed: bool,
    rng: StdRng,
}

impl Board {
    pub fn new(config: &GameConfig) -> Self {
        let (width, height) = (config.width(), config.height());
        let total = config.total_cells();
        let rng = match config.seed() {
            0 => StdRng::from_os_rng(),
            seed => StdRng::seed_from_u64(seed),
        };
        Self {
            width,
            height,
            mine_count: config.mine_count(),
            cells: vec![Cell::default(); total],
            adjacency: AdjacencyCache::new(width, height),
            hidden_count: total,
            flagged_count: 0,
            mines_placed: false,
            rng,
        }
    }

    /// Builds a board whose mines are already placed at `mines`.
    ///
    /// Duplicate and out-of-bounds coordinates are ignored; the resulting mine
    /// count must still leave at least one safe cell.
    pub fn with_mines(width: usize, height: usize, mines: &[(usize, usize)]) -> Result<Self> {
        let mut armed: Vec<usize> = mines.iter()
            .filter(|&&(x, y)| x < width && y < height)
            .map(|&(x, y)| idx(width, x, y))
            .collect();
        armed.sort_unstable();
        armed.dedup();

        let config = GameConfig::new(width, height, armed.len())?;
        let mut board = Self::new(&config.with_seed(1));
        board.arm(&armed);
        Ok(board)
    }

    /// Places mines so that the cell at (`x`, `y`) stays safe. Runs at most once
    /// per board; returns whether placement happened on this call.
    pub fn place_mines(&mut self, x: usize, y: usize) -> bool {
        if self.mines_placed || x >= self.width || y >= self.height { return false; }
        let excluded = idx(self.width, x, y);

        let mut keyed: Vec<(f64, usize)> = (0..self.cells.len())
            .map(|i| (if i == excluded { EXCLUDED_KEY } else { self.rng.random::<f64>() }, i))
            .collect();
        keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
        let armed: Vec<usize> = keyed[..self.mine_count].iter().map(|&(_, i)| i).collect();

        self.arm(&armed);
        tracing::debug!(mines = self.mine_count, safe_x = x, safe_y = y, "placed mines");
        true
    }

    fn arm(&mut self, armed: &[usize]) {
        for &i in armed {
            self.cells[i].armed = true;
        }
        for &i in armed {
            for &n in self.adjacency.neighbors_of(i) {
                self.cells[n].armed_adjacent += 1;
            }
        }
        self.mines_placed = true;
    }

    /// Reveals one cell, cascading through zero-count regions.
    ///
    /// The first accepted reveal on a board places the mines around it. Flagged
    /// and already revealed cells are left alone, and do not trigger placement.
    /// Play state is not tracked here; callers decide whether a reveal is
    /// allowed at all.
    pub fn reveal(&mut self, x: usize, y: usize) -> RevealOutcome {
        if x >= self.width || y >= self.height { return RevealOutcome::NoOp; }
        let i = idx(self.width, x, y);
        if self.cells[i].flagged || self.cells[i].revealed { return RevealOutcome::NoOp; }
        if !self.mines_placed { self.place_mines(x, y); }
        let cell = self.cells[i];

        self.reveal_cell(i);
        if cell.armed {
            self.expose_after_loss();
            return RevealOutcome::HitMine;
        }
        if cell.armed_adjacent == 0 { self.flood_reveal(i); }

        if self.hidden_count == self.mine_count { RevealOutcome::Won } else { RevealOutcome::Revealed }
    }

    pub fn toggle_flag(&mut self, x: usize, y: usize) -> FlagOutcome {
        if x >= self.width || y >= self.height { return FlagOutcome::NoOp; }
        let cell = &mut self.cells[idx(self.width, x, y)];
        if cell.revealed { return FlagOutcome::NoOp; }
        cell.flagged = !cell.flagged;
        if cell.flagged {
            self.flagged_count += 1;
            FlagOutcome::Flagged
        } else {
            self.flagged_count -= 1;
            FlagOutcome::Unflagged
        }
    }

    fn reveal_cell(&mut self, i: usize) {
        if self.cells[i].revealed { return; }
        self.cells[i].revealed = true;
        self.hidden_count -= 1;
    }

    // Breadth-first, one frontier per ring. Nonzero cells are revealed but
    // never expanded.
    fn flood_reveal(&mut self, origin: usize) {
        let mut frontier = self.adjacency.neighbors_of(origin).to_vec();
        while !frontier.is_empty() {
            let mut next = Vec::new();
            for i in frontier {
                let cell = self.cells[i];
                if cell.revealed || cell.flagged || cell.armed { continue; }
                self.reveal_cell(i);
                if cell.armed_adjacent == 0 {
                    next.extend_from_slice(self.adjacency.neighbors_of(i));
                }
            }
            frontier = next;
        }
    }

    // Correctly flagged mines stay hidden; everything else is shown, which
    // exposes wrong flags too.
    fn expose_after_loss(&mut self) {
        for i in 0..self.cells.len() {
            let cell = self.cells[i];
            if !(cell.flagged && cell.armed) { self.reveal_cell(i); }
        }
    }

    pub fn render(&self, show_all: bool, one_based: bool) -> String {
        let mut s = String::new();
        // Column header
        s.push_str("    ");
        for x in 0..self.width {
            let label = if one_based { x + 1 } else { x };
            let _ = write!(s, "{:>2} ", label);
        }
        s.push('\n');
        s.push_str("   ");
        s.push_str(&"-".repeat(self.width * 3 + 1));
        s.push('\n');

        for y in 0..self.height {
            let row_label = if one_based { y + 1 } else { y };
            let _ = write!(s, "{:>2} | ", row_label);
            for x in 0..self.width {
                let c = &self.cells[idx(self.width, x, y)];
                let glyph = if show_all && c.armed && !c.revealed { CellGlyph::Mine } else { c.glyph() };
                let _ = write!(s, "{}  ", glyph.symbol());
            }
            s.push('\n');
        }
        s
    }
}

fn idx(w: usize, x: usize, y: usize) -> usize { y * w + x }

fn neighbors(w: usize, h: usize, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> {
    let x = x as isize; let y = y as isize; let w = w as isize; let h = h as isize;
    let mut out = Vec::with_capacity(8);
    for dy in -1..=1 {
        for dx in -1..=1 {
            if dx == 0 && dy == 0 { continue; }
            let nx = x + dx; let ny = y + dy;
            if nx >= 0 && ny >= 0 && nx < w && ny < h {
                out.push((nx as usize, ny as usize));
            }
        }
    }
    out.into_iter()
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false, true))
    }
}

// Public getters for encapsulation
impl Board {
    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }
    pub fn mine_count(&self) -> usize { self.mine_count }
    pub fn hidden_count(&self) -> usize { self.hidden_count }
    pub fn flagged_count(&self) -> usize { self.flagged_count }
    pub fn mines_placed(&self) -> bool { self.mines_placed }
    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        if x < self.width && y < self.height { Some(&self.cells[idx(self.width, x, y)]) } else { None }
    }
    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize), &Cell)> + '_ {
        let w = self.width;
        self.cells.iter().enumerate().map(move |(i, c)| ((i % w, i / w), c))
    }
}
