//! Grid module - owns the tile values of the board
//!
//! The grid is an N x N square where each cell is either empty (0) or holds a
//! positive power of two. Uses a flat vector in row-major order.
//! Coordinates: (row, col), row 0 is the top edge, col 0 is the left edge.

use crate::error::ValidationError;
use crate::types::{Position, EMPTY, MAX_BOARD_SIZE, MIN_BOARD_SIZE};

/// True if `value` may sit on the board as a tile (a positive power of two).
#[inline]
pub fn is_tile_value(value: u32) -> bool {
    value.is_power_of_two()
}

/// The game grid - N columns x N rows using flat storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    size: usize,
    /// Flat vector of cells, row-major order (row * size + col)
    cells: Vec<u32>,
}

impl Grid {
    /// Create a new empty grid
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![EMPTY; size * size],
        }
    }

    /// Build a grid from row-major rows, validating every cell.
    ///
    /// Accepts any integer type so that negative values in a restore payload
    /// are reported as [`ValidationError::InvalidTile`] rather than lost in a
    /// conversion.
    pub fn from_rows<T>(rows: &[Vec<T>]) -> Result<Self, ValidationError>
    where
        T: Copy + Into<i64>,
    {
        let size = rows.len();
        if size == 0 {
            return Err(ValidationError::Empty);
        }
        if size < MIN_BOARD_SIZE {
            return Err(ValidationError::TooSmall {
                size,
                min: MIN_BOARD_SIZE,
            });
        }
        if size > MAX_BOARD_SIZE {
            return Err(ValidationError::TooLarge {
                size,
                max: MAX_BOARD_SIZE,
            });
        }

        let mut cells = Vec::with_capacity(size * size);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != size {
                return Err(ValidationError::NotSquare {
                    row,
                    len: values.len(),
                    expected: size,
                });
            }
            for (col, &raw) in values.iter().enumerate() {
                let value: i64 = raw.into();
                let tile = u32::try_from(value)
                    .ok()
                    .filter(|&v| v == EMPTY || is_tile_value(v))
                    .ok_or(ValidationError::InvalidTile {
                        at: Position::new(row, col),
                        value,
                    })?;
                cells.push(tile);
            }
        }

        Ok(Self { size, cells })
    }

    /// Calculate flat index from a position
    #[inline(always)]
    fn index(&self, pos: Position) -> Option<usize> {
        if pos.row >= self.size || pos.col >= self.size {
            return None;
        }
        Some(pos.row * self.size + pos.col)
    }

    #[inline]
    fn position(&self, idx: usize) -> Position {
        Position::new(idx / self.size, idx % self.size)
    }

    /// Side length of the board
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get the value at a position
    /// Returns None if out of bounds
    pub fn get(&self, pos: Position) -> Option<u32> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Set the value at a position
    /// Returns false if out of bounds
    pub(crate) fn set(&mut self, pos: Position, value: u32) -> bool {
        debug_assert!(value == EMPTY || is_tile_value(value));
        match self.index(pos) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Number of empty cells
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v == EMPTY).count()
    }

    /// Empty cells in row-major order
    pub fn empty_positions(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, v)| **v == EMPTY)
            .map(|(idx, _)| self.position(idx))
            .collect()
    }

    pub fn is_full(&self) -> bool {
        !self.cells.contains(&EMPTY)
    }

    /// Largest tile on the board (0 for an empty board)
    pub fn max_tile(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(EMPTY)
    }

    /// Sum of all tile values
    pub fn sum(&self) -> u64 {
        self.cells.iter().map(|&v| u64::from(v)).sum()
    }

    pub fn contains(&self, value: u32) -> bool {
        self.cells.contains(&value)
    }

    /// Get a reference to the internal cells (row-major)
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Owned row-major copy of the board
    pub fn rows(&self) -> Vec<Vec<u32>> {
        self.cells.chunks(self.size).map(<[u32]>::to_vec).collect()
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }
}
