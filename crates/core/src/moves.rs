//! Direction mapping - turns a swipe into N independent lines
//!
//! | Swipe | Lines   | Leading edge (index 0 of each line) |
//! |-------|---------|-------------------------------------|
//! | Left  | rows    | column 0                            |
//! | Right | rows    | last column                         |
//! | Up    | columns | row 0                               |
//! | Down  | columns | last row                            |
//!
//! Every line is read from the pre-swipe grid and written to a fresh grid, so
//! no line's result can leak into another line's input.

use crate::grid::Grid;
use crate::line::{can_compact, compact_into, LineStep};
use crate::types::{Direction, GameEvent, Position, EMPTY};

/// Board position of the `i`-th cell (in travel order) of line `line`.
#[inline]
pub fn line_position(size: usize, direction: Direction, line: usize, i: usize) -> Position {
    let last = size - 1;
    match direction {
        Direction::Left => Position::new(line, i),
        Direction::Right => Position::new(line, last - i),
        Direction::Up => Position::new(i, line),
        Direction::Down => Position::new(last - i, line),
    }
}

/// Outcome of sliding a whole board. The source grid is untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    pub grid: Grid,
    /// `Moved` / `Merged` events in line order.
    pub events: Vec<GameEvent>,
    /// Sum of every tile produced by a merge.
    pub score: u64,
    pub merges: u32,
    /// True if any line changed.
    pub changed: bool,
}

/// Compute the result of swiping `grid` in `direction`.
pub fn slide(grid: &Grid, direction: Direction) -> Slide {
    let size = grid.size();
    let mut next = Grid::new(size);
    let mut events = Vec::new();
    let mut score = 0u64;
    let mut merges = 0u32;
    let mut changed = false;

    let mut input = vec![EMPTY; size];
    let mut output = vec![EMPTY; size];
    let mut steps: Vec<LineStep> = Vec::with_capacity(size);

    for line in 0..size {
        let at = |i: usize| line_position(size, direction, line, i);

        for (i, slot) in input.iter_mut().enumerate() {
            *slot = grid.get(at(i)).unwrap_or(EMPTY);
        }

        steps.clear();
        let summary = compact_into(&input, &mut output, &mut steps);
        score += summary.score;
        merges += summary.merges;
        changed |= summary.changed;

        for (i, &value) in output.iter().enumerate() {
            if value != EMPTY {
                next.set(at(i), value);
            }
        }

        events.extend(steps.iter().map(|step| match *step {
            LineStep::Moved { from, to } => GameEvent::Moved {
                from: at(from),
                to: at(to),
            },
            LineStep::Merged { from, to, value } => GameEvent::Merged {
                from: at(from),
                to: at(to),
                value,
            },
        }));
    }

    Slide {
        grid: next,
        events,
        score,
        merges,
        changed,
    }
}

/// True if swiping `grid` in `direction` would change it.
///
/// This is the read-only probe used for game-over detection and legal-move
/// queries; it never builds a new grid.
pub fn would_change(grid: &Grid, direction: Direction) -> bool {
    let size = grid.size();
    let mut line_buf = vec![EMPTY; size];
    (0..size).any(|line| {
        for (i, slot) in line_buf.iter_mut().enumerate() {
            *slot = grid
                .get(line_position(size, direction, line, i))
                .unwrap_or(EMPTY);
        }
        can_compact(&line_buf)
    })
}

/// True if the board is full and no swipe can change it.
pub fn is_stuck(grid: &Grid) -> bool {
    grid.is_full()
        && Direction::ALL
            .iter()
            .all(|&direction| !would_change(grid, direction))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[Vec<u32>]) -> Grid {
        Grid::from_rows(rows).unwrap()
    }

    #[test]
    fn line_positions_follow_travel_order() {
        assert_eq!(line_position(4, Direction::Left, 1, 0), Position::new(1, 0));
        assert_eq!(line_position(4, Direction::Right, 1, 0), Position::new(1, 3));
        assert_eq!(line_position(4, Direction::Up, 2, 0), Position::new(0, 2));
        assert_eq!(line_position(4, Direction::Down, 2, 0), Position::new(3, 2));
        assert_eq!(line_position(4, Direction::Down, 2, 3), Position::new(0, 2));
    }

    #[test]
    fn slide_right_reverses_rows() {
        let g = grid(&[
            vec![2, 2, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
            vec![4, 0, 4, 8],
        ]);
        let s = slide(&g, Direction::Right);
        assert_eq!(
            s.grid.rows(),
            vec![
                vec![0, 0, 0, 4],
                vec![0, 0, 0, 0],
                vec![0, 0, 0, 0],
                vec![0, 0, 8, 8],
            ]
        );
        assert_eq!(s.score, 12);
        assert!(s.changed);
        assert_eq!(
            s.events,
            vec![
                GameEvent::Moved {
                    from: Position::new(0, 1),
                    to: Position::new(0, 3),
                },
                GameEvent::Merged {
                    from: Position::new(0, 0),
                    to: Position::new(0, 3),
                    value: 4,
                },
                GameEvent::Merged {
                    from: Position::new(3, 0),
                    to: Position::new(3, 2),
                    value: 8,
                },
            ]
        );
        // Source grid untouched.
        assert_eq!(g.get(Position::new(0, 0)), Some(2));
    }

    #[test]
    fn slide_down_works_on_columns() {
        let g = grid(&[vec![2, 0, 0], vec![2, 0, 0], vec![4, 0, 0]]);
        let s = slide(&g, Direction::Down);
        assert_eq!(s.grid.rows(), vec![vec![0, 0, 0], vec![4, 0, 0], vec![4, 0, 0]]);
        assert_eq!(s.merges, 1);
    }

    #[test]
    fn packed_columns_do_not_move() {
        let g = grid(&[vec![2, 2], vec![4, 0]]);
        let s = slide(&g, Direction::Up);
        assert_eq!(s.grid.rows(), vec![vec![2, 2], vec![4, 0]]);
        assert!(!s.changed);
        assert!(s.events.is_empty());
    }

    #[test]
    fn would_change_matches_slide() {
        let g = grid(&[vec![2, 4], vec![0, 8]]);
        for direction in Direction::ALL {
            assert_eq!(would_change(&g, direction), slide(&g, direction).changed);
        }
    }

    #[test]
    fn stuck_detection() {
        assert!(is_stuck(&grid(&[vec![2, 4], vec![4, 2]])));
        assert!(!is_stuck(&grid(&[vec![2, 2], vec![4, 8]])));
        assert!(!is_stuck(&grid(&[vec![2, 4], vec![4, 0]])));
    }
}
