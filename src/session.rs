//! One game from first click to win or loss.
//!
//! [`GameSession`] wraps a [`Board`] with the play-state machine, the flag
//! budget and the elapsed-time ticker. Every action is synchronous and safe to
//! call in any state; inapplicable actions are no-ops. Observers are told after
//! each mutation so a presentation layer can decide when to redraw.

use std::fmt;
use std::time::{Duration, Instant};

use crate::config::GameConfig;
use crate::engine::{Board, Cell, FlagOutcome, RevealOutcome};
use crate::glyph::StatusGlyph;
use crate::navigation::{self, Direction};
use crate::ticker::Ticker;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlayState {
    #[default]
    Playing,
    Lost,
    Won,
}

impl PlayState {
    pub const fn is_finished(self) -> bool { !matches!(self, Self::Playing) }
}

/// Per-session values a presentation layer displays next to the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub play_state: PlayState,
    pub elapsed_seconds: u64,
    /// Mines minus flags placed; negative when over-flagged.
    pub flag_budget: isize,
}

impl Snapshot {
    pub fn status_glyph(&self) -> StatusGlyph { StatusGlyph::for_state(self.play_state) }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    CellsChanged,
    FlagBudgetChanged(isize),
    ClockChanged(u64),
    PlayStateChanged(PlayState),
}

type Observer = Box<dyn FnMut(&SessionEvent)>;

pub struct GameSession {
    board: Board,
    play_state: PlayState,
    elapsed_seconds: u64,
    flag_budget: isize,
    started: bool,
    ticker: Ticker,
    observers: Vec<Observer>,
}

/// Starts a session for `config` and reports its mutations to `target`.
pub fn mount<F>(config: &GameConfig, target: F) -> GameSession
where
    F: FnMut(&SessionEvent) + 'static,
{
    let mut session = GameSession::new(config);
    session.subscribe(target);
    session
}

impl GameSession {
    pub fn new(config: &GameConfig) -> Self {
        Self::with_board(Board::new(config))
    }

    pub fn with_board(board: Board) -> Self {
        let flag_budget = board.mine_count() as isize - board.flagged_count() as isize;
        Self {
            board,
            play_state: PlayState::Playing,
            elapsed_seconds: 0,
            flag_budget,
            started: false,
            ticker: Ticker::new(),
            observers: Vec::new(),
        }
    }

    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&SessionEvent) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    pub fn reveal(&mut self, x: usize, y: usize) -> RevealOutcome {
        self.reveal_at(x, y, Instant::now())
    }

    pub fn reveal_at(&mut self, x: usize, y: usize, now: Instant) -> RevealOutcome {
        if self.play_state.is_finished() {
            tracing::trace!(x, y, state = ?self.play_state, "ignoring reveal after game end");
            return RevealOutcome::NoOp;
        }

        let outcome = self.board.reveal(x, y);
        // The clock runs from the first accepted reveal, whether or not the
        // board came with its mines already placed.
        if !self.started && outcome.has_update() {
            self.started = true;
            self.ticker.start_at(now);
        }

        match outcome {
            RevealOutcome::NoOp => {}
            RevealOutcome::Revealed => self.emit(SessionEvent::CellsChanged),
            RevealOutcome::HitMine => {
                tracing::info!(x, y, "hit a mine");
                self.emit(SessionEvent::CellsChanged);
                self.finish(PlayState::Lost, now);
            }
            RevealOutcome::Won => {
                self.emit(SessionEvent::CellsChanged);
                self.finish(PlayState::Won, now);
                tracing::info!(seconds = self.elapsed_seconds, "board cleared");
            }
        }
        outcome
    }

    pub fn toggle_flag(&mut self, x: usize, y: usize) -> FlagOutcome {
        if self.play_state.is_finished() {
            tracing::trace!(x, y, state = ?self.play_state, "ignoring flag after game end");
            return FlagOutcome::NoOp;
        }
        let outcome = self.board.toggle_flag(x, y);
        match outcome {
            FlagOutcome::NoOp => return outcome,
            FlagOutcome::Flagged => self.flag_budget -= 1,
            FlagOutcome::Unflagged => self.flag_budget += 1,
        }
        self.emit(SessionEvent::CellsChanged);
        self.emit(SessionEvent::FlagBudgetChanged(self.flag_budget));
        outcome
    }

    pub fn move_focus(&self, x: usize, y: usize, direction: Direction) -> Option<(usize, usize)> {
        navigation::move_focus(self.board.width(), self.board.height(), x, y, direction)
    }

    pub fn tick(&mut self) { self.tick_at(Instant::now()) }

    pub fn tick_at(&mut self, now: Instant) {
        if self.play_state.is_finished() { return; }
        if let Some(seconds) = self.ticker.tick_at(now) {
            if seconds != self.elapsed_seconds {
                self.elapsed_seconds = seconds;
                self.emit(SessionEvent::ClockChanged(seconds));
            }
        }
    }

    /// How long the caller may wait before the next [`tick`](Self::tick) is due.
    pub fn until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.ticker.until_next_tick(now)
    }

    /// Releases the ticker and drops observers. Also runs on drop.
    pub fn teardown(&mut self) {
        if self.ticker.stop() { tracing::debug!("session torn down with ticker running"); }
        self.observers.clear();
    }

    fn finish(&mut self, state: PlayState, now: Instant) {
        if let Some(seconds) = self.ticker.tick_at(now) { self.elapsed_seconds = seconds; }
        self.ticker.stop();
        self.play_state = state;
        self.emit(SessionEvent::PlayStateChanged(state));
    }

    fn emit(&mut self, event: SessionEvent) {
        for observer in &mut self.observers {
            observer(&event);
        }
    }
}

impl Drop for GameSession {
    fn drop(&mut self) { self.teardown(); }
}

impl fmt::Display for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.board, f)
    }
}

// Read-only projection for presentation layers
impl GameSession {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot { play_state: self.play_state, elapsed_seconds: self.elapsed_seconds, flag_budget: self.flag_budget }
    }
    pub fn play_state(&self) -> PlayState { self.play_state }
    pub fn elapsed_seconds(&self) -> u64 { self.elapsed_seconds }
    pub fn flag_budget(&self) -> isize { self.flag_budget }
    pub fn ticker_running(&self) -> bool { self.ticker.is_running() }
    pub fn width(&self) -> usize { self.board.width() }
    pub fn height(&self) -> usize { self.board.height() }
    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> { self.board.cell(x, y) }
    pub fn board(&self) -> &Board { &self.board }
}
