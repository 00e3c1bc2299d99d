use std::io;
use std::rc::Rc;
use std::time::Instant;

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Terminal;

use crate::config::GameConfig;
use crate::glyph::CellGlyph;
use crate::navigation::Direction;
use crate::session::{mount, GameSession, PlayState};
use crate::ticker::TICK_INTERVAL;

pub fn run_tui(config: GameConfig) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let _guard = TermGuard;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Set by session observers; the loop redraws only when something changed.
    let dirty = Rc::new(std::cell::Cell::new(true));
    let mut session = start_session(&config, &dirty);
    let mut focus = (0usize, 0usize);

    let mut last_inner_board = Rect::default();
    let res = loop {
        if dirty.replace(false) {
            terminal.draw(|f| { last_inner_board = ui(f, &session, focus); })?;
        }

        let timeout = session.until_next_tick(Instant::now()).unwrap_or(TICK_INTERVAL);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let direction = match key.code {
                        KeyCode::Char('h') | KeyCode::Left => Some(Direction::Left),
                        KeyCode::Char('l') | KeyCode::Right => Some(Direction::Right),
                        KeyCode::Char('k') | KeyCode::Up => Some(Direction::Up),
                        KeyCode::Char('j') | KeyCode::Down => Some(Direction::Down),
                        _ => None,
                    };
                    if let Some(direction) = direction {
                        if let Some(target) = session.move_focus(focus.0, focus.1, direction) {
                            focus = target;
                            dirty.set(true);
                        }
                        continue;
                    }
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => break Ok(()),
                        KeyCode::Char('f') => { session.toggle_flag(focus.0, focus.1); }
                        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('r') => {
                            session.reveal(focus.0, focus.1);
                        }
                        KeyCode::Char('n') => {
                            tracing::info!("restarting");
                            session = start_session(&config, &dirty);
                        }
                        _ => {}
                    }
                }
                Event::Mouse(m) => {
                    // Map mouse to cell coordinates within the inner board area
                    if let MouseEventKind::Down(btn) = m.kind {
                        if let Some((cx, cy)) = pos_to_cell(m.column, m.row, last_inner_board, session.width() as u16, session.height() as u16) {
                            let (cx, cy) = (cx as usize, cy as usize);
                            match btn {
                                MouseButton::Left => { session.reveal(cx, cy); }
                                MouseButton::Right => { session.toggle_flag(cx, cy); }
                                MouseButton::Middle => {}
                            }
                            focus = (cx, cy);
                            dirty.set(true);
                        }
                    }
                }
                Event::Resize(_, _) => dirty.set(true),
                _ => {}
            }
        }
        session.tick();
    };

    session.teardown();
    terminal.show_cursor()?;
    res
}

fn start_session(config: &GameConfig, dirty: &Rc<std::cell::Cell<bool>>) -> GameSession {
    let dirty = Rc::clone(dirty);
    dirty.set(true);
    mount(config, move |_| dirty.set(true))
}

fn ui(f: &mut ratatui::Frame, session: &GameSession, focus: (usize, usize)) -> Rect {
    let root = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(f.size());

    let snapshot = session.snapshot();
    let header = Paragraph::new(format!(
        "F {:>3}    {:^4}    T {:>3}",
        snapshot.flag_budget,
        snapshot.status_glyph().symbol(),
        snapshot.elapsed_seconds,
    ))
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Minesweeper"));
    f.render_widget(header, root[0]);

    let area = centered_grid_area(root[1], session.width() as u16, session.height() as u16);
    let inner = inner_area(area);
    draw_board(f, session, area, focus);

    let help = match snapshot.play_state {
        PlayState::Lost => "Boom! n to restart, q to quit",
        PlayState::Won => "Cleared! n to restart, q to quit",
        PlayState::Playing => "Mouse: left=reveal, right=flag • Arrows/HJKL move • Enter/Space reveal • f flag • n new • q quit",
    };
    let footer = Paragraph::new(format!("{help}  [row {}, col {}]", focus.1 + 1, focus.0 + 1))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, root[2]);
    inner
}

// Borders take one cell on each side.
fn centered_grid_area(parent: Rect, cols: u16, rows: u16) -> Rect {
    let grid_w = cols * 2 + 2;
    let grid_h = rows + 2;
    let x = parent.x.saturating_add((parent.width.saturating_sub(grid_w)) / 2);
    let y = parent.y.saturating_add((parent.height.saturating_sub(grid_h)) / 2);
    Rect { x, y, width: grid_w.min(parent.width), height: grid_h.min(parent.height) }
}

fn draw_board(f: &mut ratatui::Frame, session: &GameSession, area: Rect, focus: (usize, usize)) {
    let mut lines: Vec<Line> = Vec::with_capacity(session.height());
    for y in 0..session.height() {
        let mut spans: Vec<Span> = Vec::with_capacity(session.width());
        for x in 0..session.width() {
            let Some(cell) = session.cell(x, y) else { continue };
            let glyph = cell.glyph();
            let mut ch = glyph.symbol();
            let mut style = glyph_style(glyph);

            if focus == (x, y) {
                style = style.add_modifier(Modifier::REVERSED);
                if ch == ' ' { ch = '·'; }
            }
            spans.push(Span::styled(format!("{} ", ch), style));
        }
        lines.push(Line::from(spans));
    }

    let board_block = Block::default().borders(Borders::ALL).title("Board");
    let para = Paragraph::new(lines).block(board_block);
    f.render_widget(para, area);
}

fn glyph_style(glyph: CellGlyph) -> Style {
    match glyph {
        CellGlyph::Hidden => Style::default().fg(Color::DarkGray),
        CellGlyph::Flag => Style::default().fg(Color::Yellow),
        CellGlyph::WrongFlag => Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        CellGlyph::Mine => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        CellGlyph::Count(n) => number_style(n),
    }
}

fn number_style(n: u8) -> Style {
    match n {
        0 => Style::default().fg(Color::Gray),
        1 => Style::default().fg(Color::Blue),
        2 => Style::default().fg(Color::Green),
        3 => Style::default().fg(Color::Red),
        4 => Style::default().fg(Color::Magenta),
        5 => Style::default().fg(Color::Yellow),
        6 => Style::default().fg(Color::Cyan),
        _ => Style::default().fg(Color::White),
    }
}

fn inner_area(area: Rect) -> Rect {
    Rect { x: area.x.saturating_add(1), y: area.y.saturating_add(1), width: area.width.saturating_sub(2), height: area.height.saturating_sub(2) }
}

fn pos_to_cell(mx: u16, my: u16, inner: Rect, cols: u16, rows: u16) -> Option<(u16, u16)> {
    if mx < inner.x || my < inner.y { return None; }
    // two columns per cell, matching draw_board
    let cx = (mx - inner.x) / 2;
    let cy = my - inner.y;
    if cx < cols && cy < rows { Some((cx, cy)) } else { None }
}

struct TermGuard;
impl Drop for TermGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = stdout.execute(DisableMouseCapture);
        let _ = stdout.execute(LeaveAlternateScreen);
    }
}
