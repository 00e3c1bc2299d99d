//! Keyboard focus movement over the grid.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Target cell for moving focus from (`x`, `y`), or `None` to stay put.
///
/// Horizontal moves wrap to the neighboring row; vertical moves stop at the
/// edges.
pub fn move_focus(width: usize, height: usize, x: usize, y: usize, direction: Direction) -> Option<(usize, usize)> {
    let x = x as isize; let y = y as isize;
    let (primary, fallback) = match direction {
        Direction::Up => ((x, y - 1), None),
        Direction::Down => ((x, y + 1), None),
        Direction::Left => ((x - 1, y), Some((width as isize - 1, y - 1))),
        Direction::Right => ((x + 1, y), Some((0, y + 1))),
    };
    std::iter::once(primary)
        .chain(fallback)
        .find_map(|(cx, cy)| in_bounds(width, height, cx, cy))
}

fn in_bounds(w: usize, h: usize, x: isize, y: isize) -> Option<(usize, usize)> {
    if x >= 0 && y >= 0 && (x as usize) < w && (y as usize) < h { Some((x as usize, y as usize)) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::*;

    #[test]
    fn moves_inside_grid() {
        assert_eq!(move_focus(3, 3, 1, 1, Up), Some((1, 0)));
        assert_eq!(move_focus(3, 3, 1, 1, Down), Some((1, 2)));
        assert_eq!(move_focus(3, 3, 1, 1, Left), Some((0, 1)));
        assert_eq!(move_focus(3, 3, 1, 1, Right), Some((2, 1)));
    }

    #[test]
    fn horizontal_moves_wrap_rows() {
        assert_eq!(move_focus(4, 3, 0, 1, Left), Some((3, 0)));
        assert_eq!(move_focus(4, 3, 3, 1, Right), Some((0, 2)));
    }

    #[test]
    fn corners_stay_put() {
        assert_eq!(move_focus(4, 3, 0, 0, Left), None);
        assert_eq!(move_focus(4, 3, 3, 2, Right), None);
        assert_eq!(move_focus(4, 3, 2, 0, Up), None);
        assert_eq!(move_focus(4, 3, 2, 2, Down), None);
    }
}
