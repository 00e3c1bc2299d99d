use sweeper::engine::{Board, FlagOutcome, RevealOutcome};
use sweeper::GameConfig;

fn neighbors(w: usize, h: usize, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> {
    let x = x as isize; let y = y as isize; let w = w as isize; let h = h as isize;
    let mut out = Vec::new();
    for dy in -1..=1 {
        for dx in -1..=1 {
            if dx == 0 && dy == 0 { continue; }
            let nx = x + dx; let ny = y + dy;
            if nx >= 0 && ny >= 0 && nx < w && ny < h { out.push((nx as usize, ny as usize)); }
        }
    }
    out.into_iter()
}

fn board(w: usize, h: usize, mines: usize, seed: u64) -> Board {
    Board::new(&GameConfig::new(w, h, mines).expect("config").with_seed(seed))
}

#[test]
fn safe_first_reveal_is_not_mine() {
    for seed in 1..200 {
        let mut b = board(9, 9, 70, seed);
        let x = (seed % 9) as usize;
        let y = (seed / 9 % 9) as usize;
        let outcome = b.reveal(x, y);
        assert_ne!(outcome, RevealOutcome::HitMine, "seed {}", seed);
        let c = b.cell(x, y).unwrap();
        assert!(c.is_revealed());
        assert!(!c.is_armed());
    }
}

#[test]
fn adjacency_matches_neighbor_mines() {
    for seed in 1..50 {
        let mut b = board(8, 6, 12, seed);
        let _ = b.reveal(0, 0); // places mines
        let w = b.width(); let h = b.height();
        let mut mine_count = 0;
        for y in 0..h {
            for x in 0..w {
                let c = b.cell(x, y).unwrap();
                if c.is_armed() { mine_count += 1; }
                let adj = neighbors(w, h, x, y).filter(|&(nx, ny)| b.cell(nx, ny).unwrap().is_armed()).count();
                assert_eq!(c.armed_adjacent_count() as usize, adj, "adjacency mismatch at ({},{})", x, y);
            }
        }
        assert_eq!(mine_count, b.mine_count());
    }
}

#[test]
fn densest_board_leaves_only_first_cell_safe() {
    let mut b = board(3, 3, 8, 5);
    assert_eq!(b.reveal(1, 1), RevealOutcome::Won);
    assert_eq!(b.cell(1, 1).unwrap().armed_adjacent_count(), 8);
    assert_eq!(b.hidden_count(), 8);
}

#[test]
fn center_of_three_by_three_shows_one() {
    for seed in 1..100 {
        let mut b = board(3, 3, 1, seed);
        assert_eq!(b.reveal(1, 1), RevealOutcome::Revealed);
        assert_eq!(b.cell(1, 1).unwrap().armed_adjacent_count(), 1);
        assert_eq!(b.hidden_count(), 8, "center must not cascade");
        let armed = b.cells().filter(|(_, c)| c.is_armed()).count();
        assert_eq!(armed, 1);
    }
}

#[test]
fn empty_board_clears_in_one_reveal() {
    for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
        let mut b = board(2, 2, 0, 3);
        assert_eq!(b.reveal(x, y), RevealOutcome::Won);
        assert_eq!(b.hidden_count(), 0);
        assert!(b.cells().all(|(_, c)| c.is_revealed()));
    }
}

#[test]
fn cascade_stops_at_numbered_border() {
    // Mine column at x = 3 splits the 6x3 board; x = 2 is the numbered border.
    let mut b = Board::with_mines(6, 3, &[(3, 0), (3, 1), (3, 2)]).unwrap();
    assert_eq!(b.reveal(0, 0), RevealOutcome::Revealed);
    for y in 0..3 {
        for x in 0..3 {
            assert!(b.cell(x, y).unwrap().is_revealed(), "({},{}) should be open", x, y);
        }
        assert!(b.cell(2, y).unwrap().armed_adjacent_count() > 0);
        for x in 3..6 {
            assert!(!b.cell(x, y).unwrap().is_revealed(), "({},{}) should stay hidden", x, y);
        }
    }
    assert_eq!(b.hidden_count(), 9);
}

#[test]
fn numbered_cell_does_not_expand() {
    let mut b = Board::with_mines(4, 4, &[(0, 0)]).unwrap();
    assert_eq!(b.reveal(1, 1), RevealOutcome::Revealed);
    assert_eq!(b.hidden_count(), 15);
}

#[test]
fn hitting_mine_exposes_all_but_correct_flags() {
    let mut b = Board::with_mines(4, 4, &[(0, 0), (3, 3), (0, 3)]).unwrap();
    assert_eq!(b.toggle_flag(3, 3), FlagOutcome::Flagged); // correct
    assert_eq!(b.toggle_flag(2, 2), FlagOutcome::Flagged); // wrong
    assert_eq!(b.reveal(0, 0), RevealOutcome::HitMine);
    for ((x, y), c) in b.cells() {
        let expected_hidden = c.is_flagged() && c.is_armed();
        assert_eq!(!c.is_revealed(), expected_hidden, "({},{})", x, y);
    }
    assert!(b.cell(2, 2).unwrap().is_revealed());
    assert!(b.cell(0, 3).unwrap().is_revealed());
}

#[test]
fn revealed_and_flagged_cells_are_untouched() {
    let mut b = Board::with_mines(3, 3, &[(2, 2)]).unwrap();
    b.toggle_flag(0, 0);
    assert_eq!(b.reveal(0, 0), RevealOutcome::NoOp);
    assert!(!b.cell(0, 0).unwrap().is_revealed());

    assert_eq!(b.reveal(1, 1), RevealOutcome::Revealed);
    let hidden = b.hidden_count();
    assert_eq!(b.reveal(1, 1), RevealOutcome::NoOp);
    assert_eq!(b.hidden_count(), hidden);
    assert_eq!(b.toggle_flag(1, 1), FlagOutcome::NoOp);
}

#[test]
fn out_of_bounds_is_noop() {
    let mut b = board(3, 3, 1, 9);
    assert_eq!(b.reveal(3, 0), RevealOutcome::NoOp);
    assert_eq!(b.toggle_flag(0, 3), FlagOutcome::NoOp);
    assert!(!b.mines_placed());
    assert!(b.cell(3, 3).is_none());
}

#[test]
fn hidden_count_never_increases() {
    for seed in 1..30 {
        let mut b = board(10, 10, 15, seed);
        let mut last = b.hidden_count();
        'play: for y in 0..10 {
            for x in 0..10 {
                let outcome = b.reveal(x, y);
                assert!(b.hidden_count() <= last);
                last = b.hidden_count();
                match outcome {
                    RevealOutcome::HitMine => break 'play,
                    RevealOutcome::Won => { assert_eq!(b.hidden_count(), b.mine_count()); break 'play; }
                    _ => {}
                }
            }
        }
    }
}
