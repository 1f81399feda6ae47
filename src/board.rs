use std::ops::RangeInclusive;

use crate::error::{SnakeError, SnakeResult};
use crate::{Coords, TermInt};

pub const MIN_ROWS: TermInt = 3;
pub const MIN_COLUMNS: TermInt = 8;

/// Playing field derived from the terminal size at startup.
///
/// Row and column `1` and the last row/column hold the border; everything
/// strictly between them is playable. Coordinates are one-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board {
    rows: TermInt,
    columns: TermInt,
}

impl Board {
    pub fn new(rows: TermInt, columns: TermInt) -> SnakeResult<Self> {
        if rows < MIN_ROWS || columns < MIN_COLUMNS {
            return Err(SnakeError::TerminalTooSmall {
                columns,
                rows,
                min_columns: MIN_COLUMNS,
                min_rows: MIN_ROWS,
            });
        }

        Ok(Board { rows, columns })
    }

    pub fn rows(&self) -> TermInt {
        self.rows
    }

    pub fn columns(&self) -> TermInt {
        self.columns
    }

    pub fn is_in_bounds(&self, (row, col): Coords) -> bool {
        row > 1 && row < self.rows as i32 && col > 1 && col < self.columns as i32
    }

    /// Pulls a coordinate into the interior instead of failing on it.
    pub fn clamp(&self, (row, col): Coords) -> Coords {
        (
            row.max(2).min(self.rows as i32 - 1),
            col.max(2).min(self.columns as i32 - 1),
        )
    }

    pub fn food_rows(&self) -> RangeInclusive<i32> {
        2..=self.rows as i32 - 1
    }

    pub fn food_columns(&self) -> RangeInclusive<i32> {
        2..=self.columns as i32 - 1
    }
}
