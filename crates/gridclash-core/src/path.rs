//! The branching path grid a token advances through between battles.
//!
//! Columns hold different numbers of cells, widening toward the middle of
//! the strip and narrowing again at the end. Columns are centered
//! vertically; columns 4, 6, and 8 sit half a cell lower so adjacent lanes
//! interleave on screen.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Cells per column, start to finish.
pub const LANE_PROFILE: [usize; 11] = [1, 2, 3, 4, 4, 4, 4, 4, 3, 2, 1];

/// Columns drawn half a cell lower than their centered position.
const STAGGERED_COLUMNS: [usize; 3] = [4, 6, 8];

/// One cell of the path grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathCell {
    /// Token occupying the cell, if any.
    pub token: Option<u8>,
    /// Whether the cell is highlighted as a move candidate.
    pub highlight: bool,
}

impl PathCell {
    /// Returns `true` when a token occupies the cell.
    #[must_use]
    pub const fn is_occupied(&self) -> bool {
        self.token.is_some()
    }
}

/// The branching lane strip.
///
/// All operations on out-of-range coordinates are no-ops reporting failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathGrid {
    columns: Vec<Vec<PathCell>>,
    origin: Vec2,
    cell_size: f32,
}

impl PathGrid {
    /// Creates the standard path grid with the given screen geometry.
    #[must_use]
    pub fn new(origin: Vec2, cell_size: f32) -> Self {
        Self {
            columns: LANE_PROFILE
                .iter()
                .map(|&rows| vec![PathCell::default(); rows])
                .collect(),
            origin,
            cell_size,
        }
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` when `(col, row)` names a cell that exists.
    #[must_use]
    pub fn is_valid(&self, col: usize, row: usize) -> bool {
        self.columns.get(col).is_some_and(|cells| row < cells.len())
    }

    /// Returns the cell at `(col, row)`, if it exists.
    #[must_use]
    pub fn get(&self, col: usize, row: usize) -> Option<&PathCell> {
        self.columns.get(col)?.get(row)
    }

    /// Places `token` on `(col, row)`.
    ///
    /// Fails without mutation when the cell does not exist or is occupied.
    pub fn occupy(&mut self, col: usize, row: usize, token: u8) -> bool {
        match self.columns.get_mut(col).and_then(|cells| cells.get_mut(row)) {
            Some(cell) if !cell.is_occupied() => {
                cell.token = Some(token);
                true
            }
            _ => false,
        }
    }

    /// Clears the token on `(col, row)`, returning it.
    pub fn clear(&mut self, col: usize, row: usize) -> Option<u8> {
        self.columns.get_mut(col)?.get_mut(row)?.token.take()
    }

    /// Moves a token one hand-off from `from` to `to`.
    ///
    /// Fails without mutation when the source is empty or the destination
    /// is invalid or occupied.
    pub fn move_token(&mut self, from: (usize, usize), to: (usize, usize)) -> bool {
        let occupied_target = match self.get(to.0, to.1) {
            Some(cell) => cell.is_occupied(),
            None => return false,
        };
        if occupied_target || !self.get(from.0, from.1).is_some_and(PathCell::is_occupied) {
            return false;
        }
        if let Some(token) = self.clear(from.0, from.1) {
            return self.occupy(to.0, to.1, token);
        }
        false
    }

    /// Sets the highlight flag on `(col, row)`.
    pub fn highlight(&mut self, col: usize, row: usize, on: bool) -> bool {
        match self.columns.get_mut(col).and_then(|cells| cells.get_mut(row)) {
            Some(cell) => {
                cell.highlight = on;
                true
            }
            None => false,
        }
    }

    /// Clears every highlight.
    pub fn clear_highlights(&mut self) {
        for column in &mut self.columns {
            for cell in column {
                cell.highlight = false;
            }
        }
    }

    /// Returns the screen center of `(col, row)`, if the cell exists.
    ///
    /// Each column is centered against the tallest column; staggered
    /// columns shift down an extra half cell.
    #[must_use]
    pub fn cell_center(&self, col: usize, row: usize) -> Option<Vec2> {
        if !self.is_valid(col, row) {
            return None;
        }
        let max_rows = LANE_PROFILE.iter().copied().max().unwrap_or(0);
        #[allow(clippy::cast_precision_loss)]
        let mut v_offset = ((max_rows - LANE_PROFILE[col]) as f32) * self.cell_size / 2.0;
        if STAGGERED_COLUMNS.contains(&col) {
            v_offset += self.cell_size / 2.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let offset = Vec2::new(
            (col as f32 + 0.5) * self.cell_size,
            (row as f32 + 0.5) * self.cell_size + v_offset,
        );
        Some(self.origin + offset)
    }
}
