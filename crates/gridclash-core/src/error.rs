//! Error types for placement and attack declaration.
//!
//! Gameplay failures are ordinary values: UI input is untrusted, so every
//! mutating operation that would violate a bounds or occupancy invariant is
//! a no-op that reports failure through these types. Nothing here is a
//! panic path.

use thiserror::Error;

/// A rejected placement, carrying the content back to the caller.
///
/// Placement consumes its content by value; the failure path returns it
/// so a drag-and-drop layer can restore the content without cloning
/// ahead of every attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct PlaceFailure<T> {
    /// The content that could not be placed.
    pub content: T,
    /// Why placement failed.
    pub reason: PlaceError,
}

impl<T> PlaceFailure<T> {
    /// Pairs rejected content with the reason it bounced.
    #[must_use]
    pub const fn new(content: T, reason: PlaceError) -> Self {
        Self { content, reason }
    }
}

/// Failure to place content into a board or container slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlaceError {
    /// The coordinates fall outside the grid.
    #[error("coordinates ({row}, {col}) are out of bounds")]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },
    /// The slot already holds content; placement never overwrites.
    #[error("slot ({row}, {col}) is already occupied")]
    Occupied {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },
    /// A serial position outside 1..=9 was given to the placement boundary.
    #[error("serial position {0} is outside 1..=9")]
    BadSerial(usize),
    /// No empty slot remains for a first-empty placement.
    #[error("container is full")]
    Full,
}

/// Failure to declare an attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AttackError {
    /// No piece occupies the attacking cell.
    #[error("no piece at ({row}, {col}) to attack with")]
    EmptyCell {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },
    /// The lane holds no enemy piece.
    #[error("no target in lane {col}")]
    NoTarget {
        /// The attacker's column.
        col: usize,
    },
    /// The piece has already attacked this turn.
    #[error("piece at ({row}, {col}) has already attacked this turn")]
    AlreadyAttacked {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },
}
