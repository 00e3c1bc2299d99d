use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use sweeper::{tui, GameConfig, GameSession, PlayState};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sweeper", about = "Rust CLI/TUI Minesweeper", version)]
struct Args {
    /// Launch TUI mode
    #[arg(long)]
    tui: bool,
    /// Board width
    #[arg(long, default_value_t = 9)]
    width: usize,
    /// Board height
    #[arg(long, default_value_t = 9)]
    height: usize,
    /// Number of mines
    #[arg(long, default_value_t = 10)]
    mines: usize,
    /// Seed (0 = random)
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Append logs to this file (the only log output in TUI mode)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn print_help() {
    println!("Commands:");
    println!("  r x y   - reveal cell at column x, row y (1-based)");
    println!("  f x y   - toggle flag at x, y (1-based)");
    println!("  q       - quit");
    println!("  h/help  - show this help");
}

/// Logs go to `--log-file` when given. Without one, line mode logs to stderr
/// and TUI mode stays silent so the terminal is not overdrawn.
fn setup_logging(args: &Args) -> io::Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(path) = &args.log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let (writer, guard) = tracing_appender::non_blocking(file);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(false))
            .init();
        tracing::info!("Log file: {}", path.display());
        return Ok(Some(guard));
    }

    if !args.tui {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }
    Ok(None)
}

/// Parses `x y` as 1-based coordinates into 0-based ones.
fn parse_coords(parts: &[&str]) -> Result<(usize, usize), &'static str> {
    if parts.len() < 2 { return Err("Expected x y"); }
    let x = parts[0].parse::<usize>().map_err(|_| "Invalid x")?;
    let y = parts[1].parse::<usize>().map_err(|_| "Invalid y")?;
    if x == 0 || y == 0 { return Err("Use 1-based coordinates"); }
    Ok((x - 1, y - 1))
}

fn main() {
    let args = Args::parse();
    let _log_guard = match setup_logging(&args) {
        Ok(guard) => guard,
        Err(e) => { eprintln!("Cannot open log file: {}", e); return; }
    };

    let config = match GameConfig::new(args.width, args.height, args.mines) {
        Ok(c) => c.with_seed(args.seed),
        Err(e) => { eprintln!("{}", e); return; }
    };

    if args.tui {
        if let Err(e) = tui::run_tui(config) {
            eprintln!("TUI error: {}", e);
        }
        return;
    }

    let mut session = GameSession::new(&config);

    println!("Minesweeper {}x{} with {} mines{}", args.width, args.height, args.mines, if args.seed != 0 { format!(" (seed {})", args.seed) } else { String::new() });
    println!("Coordinates are 1-based. Type 'h' for help.");
    print_help();

    let mut input = String::new();
    loop {
        session.tick();
        let snapshot = session.snapshot();
        println!("\n{}", session);
        println!("Flags left: {}  Time: {}s", snapshot.flag_budget, snapshot.elapsed_seconds);
        match snapshot.play_state {
            PlayState::Lost => {
                println!("Boom! You hit a mine. Game over.\n");
                println!("Final board (mines shown):\n{}", session.board().render(true, true));
                break;
            }
            PlayState::Won => {
                println!("Congratulations! You cleared the board in {}s!\n", snapshot.elapsed_seconds);
                println!("Final board (mines shown):\n{}", session.board().render(true, true));
                break;
            }
            PlayState::Playing => {}
        }

        print!("> ");
        let _ = io::stdout().flush();
        input.clear();
        if io::stdin().read_line(&mut input).is_err() { break; }
        let line = input.trim();
        if line.is_empty() { continue; }

        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts[0].to_lowercase().as_str() {
            "q" | "quit" | "exit" => break,
            "h" | "help" => { print_help(); continue; },
            "r" | "reveal" => match parse_coords(&parts[1..]) {
                Ok((x, y)) => {
                    if !session.reveal(x, y).has_update() { println!("Nothing to reveal there"); }
                }
                Err(msg) => println!("{}. Usage: r x y", msg),
            },
            "f" | "flag" => match parse_coords(&parts[1..]) {
                Ok((x, y)) => {
                    if session.toggle_flag(x, y) == sweeper::FlagOutcome::NoOp { println!("Cannot flag revealed cell or out of bounds"); }
                }
                Err(msg) => println!("{}. Usage: f x y", msg),
            },
            other => {
                println!("Unknown command '{}'. Type 'h' for help.", other);
            }
        }
    }
}
