//! Tactical boards and the lane targeting algorithm.
//!
//! Each side owns one 3x3 [`Board`]. Placement obeys a single-occupancy
//! invariant (a coordinate maps to at most one piece), and every mutating
//! operation that would violate bounds or occupancy is a no-op reporting
//! failure.
//!
//! # Targeting
//!
//! Attacks never cross columns: the attacker's column is the lane, shared
//! with the enemy board. Each side shoots toward the other's front line, so
//! the scan over the enemy column runs row 2 -> 0 for player attacks and
//! row 0 -> 2 for opponent attacks; the first occupied cell encountered is
//! the nearest enemy in the lane.
//!
//! Declaring an attack applies NO damage. [`Board::attack`] only computes
//! the attacker and target anchors plus a human-readable message; damage is
//! deferred to the effect queue so it can be synchronized with the
//! projectile animation. A piece must never die before the player sees why.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{AttackError, PlaceError, PlaceFailure};
use crate::piece::Piece;

/// Rows and columns per board.
pub const BOARD_SIZE: usize = 3;

// =============================================================================
// Side
// =============================================================================

/// Which combatant a board (or a pending attack's target) belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The human player's board, drawn at the bottom of the screen.
    Player,
    /// The opponent's board, drawn at the top.
    Opponent,
}

impl Side {
    /// Returns the opposing side.
    #[must_use]
    pub const fn enemy(self) -> Self {
        match self {
            Self::Player => Self::Opponent,
            Self::Opponent => Self::Player,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player => write!(f, "player"),
            Self::Opponent => write!(f, "opponent"),
        }
    }
}

// =============================================================================
// Attack declaration
// =============================================================================

/// A declared-but-not-yet-applied attack.
///
/// Produced by [`Board::attack`]; carries everything the caller needs to
/// start the projectile animation and enqueue the pending damage record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackDeclaration {
    /// Attacker cell on the declaring board.
    pub attacker: (usize, usize),
    /// Target cell on the enemy board.
    pub target: (usize, usize),
    /// Damage to apply once the projectile lands.
    pub damage: u32,
    /// Human-readable description of the declaration.
    pub message: String,
    /// Screen center of the attacker cell (projectile start).
    pub attacker_anchor: Vec2,
    /// Screen center of the target cell (projectile end).
    pub target_anchor: Vec2,
    /// `true` when the player declared the attack.
    pub by_player: bool,
}

// =============================================================================
// Board
// =============================================================================

/// One side's 3x3 tactical grid.
///
/// The board also carries its screen geometry (origin and cell size) so the
/// targeting algorithm can hand projectile anchors back to the animation
/// layer without the core reaching into any rendering code.
///
/// # Example
///
/// ```
/// use gridclash_core::board::{Board, Side};
/// use gridclash_core::piece::Piece;
/// use glam::Vec2;
///
/// let mut board = Board::new(Side::Player, Vec2::new(420.0, 500.0), 100.0);
/// board.place(Piece::new(5, 10, "warrior"), 0, 1).unwrap();
/// assert_eq!(board.count(), 1);
/// let warrior = board.remove(0, 1).unwrap();
/// assert_eq!(warrior.job, "warrior");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    side: Side,
    cells: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
    origin: Vec2,
    cell_size: f32,
}

impl Board {
    /// Creates an empty board for `side` with the given screen geometry.
    #[must_use]
    pub fn new(side: Side, origin: Vec2, cell_size: f32) -> Self {
        Self {
            side,
            cells: Default::default(),
            origin,
            cell_size,
        }
    }

    /// Returns which side owns this board.
    #[must_use]
    pub const fn side(&self) -> Side {
        self.side
    }

    /// Returns `true` when `(row, col)` lies on the grid.
    #[must_use]
    pub const fn in_bounds(row: usize, col: usize) -> bool {
        row < BOARD_SIZE && col < BOARD_SIZE
    }

    /// Returns the piece at `(row, col)`, if any.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&Piece> {
        self.cells.get(row)?.get(col)?.as_ref()
    }

    /// Returns a mutable reference to the piece at `(row, col)`, if any.
    #[must_use]
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Piece> {
        self.cells.get_mut(row)?.get_mut(col)?.as_mut()
    }

    /// Places a piece at `(row, col)`.
    ///
    /// # Errors
    ///
    /// [`PlaceError::OutOfBounds`] or [`PlaceError::Occupied`]; either way
    /// the board is unchanged and the piece comes back in the failure.
    pub fn place(
        &mut self,
        piece: Piece,
        row: usize,
        col: usize,
    ) -> Result<(), PlaceFailure<Piece>> {
        if !Self::in_bounds(row, col) {
            return Err(PlaceFailure::new(piece, PlaceError::OutOfBounds { row, col }));
        }
        if self.cells[row][col].is_some() {
            return Err(PlaceFailure::new(piece, PlaceError::Occupied { row, col }));
        }
        tracing::debug!(side = %self.side, row, col, piece = %piece, "piece placed");
        self.cells[row][col] = Some(piece);
        Ok(())
    }

    /// Places a piece by its 1..=9 serial position.
    ///
    /// Serials number the grid row-major:
    ///
    /// ```text
    /// 1 2 3
    /// 4 5 6
    /// 7 8 9
    /// ```
    ///
    /// # Errors
    ///
    /// [`PlaceError::BadSerial`] for serials outside 1..=9, otherwise the
    /// same failures as [`Board::place`].
    pub fn place_by_serial(
        &mut self,
        piece: Piece,
        serial: usize,
    ) -> Result<(), PlaceFailure<Piece>> {
        if !(1..=9).contains(&serial) {
            return Err(PlaceFailure::new(piece, PlaceError::BadSerial(serial)));
        }
        let index = serial - 1;
        self.place(piece, index / BOARD_SIZE, index % BOARD_SIZE)
    }

    /// Removes and returns the piece at `(row, col)`.
    ///
    /// Clears the slot unconditionally when in range; out-of-range
    /// coordinates return `None` without touching the board.
    pub fn remove(&mut self, row: usize, col: usize) -> Option<Piece> {
        if !Self::in_bounds(row, col) {
            return None;
        }
        self.cells[row][col].take()
    }

    /// Iterates occupied cells in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (usize, usize, &Piece)> {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter_map(move |(col, slot)| slot.as_ref().map(|piece| (row, col, piece)))
        })
    }

    /// Returns the number of occupied cells.
    #[must_use]
    pub fn count(&self) -> usize {
        self.pieces().count()
    }

    /// Returns `true` when no cell is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Clears the attacked marker on every piece.
    pub fn reset_attack_statuses(&mut self) {
        for row in &mut self.cells {
            for slot in row.iter_mut().flatten() {
                slot.reset_attack_status();
            }
        }
    }

    /// Returns the screen center of cell `(row, col)`.
    ///
    /// Used as the projectile anchor for attacks declared from or landing
    /// on this board.
    #[must_use]
    pub fn cell_center(&self, row: usize, col: usize) -> Vec2 {
        #[allow(clippy::cast_precision_loss)]
        let offset = Vec2::new(
            (col as f32 + 0.5) * self.cell_size,
            (row as f32 + 0.5) * self.cell_size,
        );
        self.origin + offset
    }

    /// Declares an attack from `(row, col)` down its lane into `enemy`.
    ///
    /// The scan direction over the enemy column depends on which side this
    /// board belongs to: the player scans the enemy rows 2 -> 0, the
    /// opponent scans 0 -> 2. No damage is applied here; the returned
    /// [`AttackDeclaration`] is handed to the animation layer and the
    /// effect queue.
    ///
    /// # Errors
    ///
    /// [`AttackError::EmptyCell`] when no piece occupies the attacking
    /// cell, [`AttackError::NoTarget`] when the lane holds no enemy.
    pub fn attack(
        &self,
        enemy: &Board,
        row: usize,
        col: usize,
    ) -> Result<AttackDeclaration, AttackError> {
        let Some(attacker) = self.get(row, col) else {
            return Err(AttackError::EmptyCell { row, col });
        };

        let scan: [usize; BOARD_SIZE] = match self.side {
            Side::Player => [2, 1, 0],
            Side::Opponent => [0, 1, 2],
        };
        let Some((target_row, target)) = scan
            .into_iter()
            .find_map(|r| enemy.get(r, col).map(|piece| (r, piece)))
        else {
            return Err(AttackError::NoTarget { col });
        };

        let message = format!(
            "{side} {attacker} attacks {target} in lane {col} for {damage}",
            side = self.side,
            damage = attacker.attack,
        );
        tracing::debug!(side = %self.side, row, col, target_row, "attack declared");

        Ok(AttackDeclaration {
            attacker: (row, col),
            target: (target_row, col),
            damage: attacker.attack,
            message,
            attacker_anchor: self.cell_center(row, col),
            target_anchor: enemy.cell_center(target_row, col),
            by_player: self.side == Side::Player,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
