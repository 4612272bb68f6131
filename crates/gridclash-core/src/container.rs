//! Unordered-slot container stores: the backpack and the reward box.
//!
//! A [`Container`] shares the boards' slot model (R x C grid, single
//! occupancy, no-op failures) but has no lane or attack semantics, and its
//! slots hold [`SlotContent`] so spare pieces and consumable items mix
//! freely.
//!
//! Containers never reach into one another. Moving content between any two
//! stores is decomposed by the caller into `remove` from the source then
//! `place`/`add_first_empty` into the destination, a single atomic hand-off
//! within one event handler.

use serde::{Deserialize, Serialize};

use crate::error::{PlaceError, PlaceFailure};
use crate::piece::SlotContent;

/// Backpack shape: 3 rows by 6 columns.
pub const BACKPACK_ROWS: usize = 3;
/// Backpack shape: 3 rows by 6 columns.
pub const BACKPACK_COLS: usize = 6;
/// Reward box shape: a single row of 3 slots.
pub const REWARD_BOX_ROWS: usize = 1;
/// Reward box shape: a single row of 3 slots.
pub const REWARD_BOX_COLS: usize = 3;

/// An R x C grid of optional [`SlotContent`].
///
/// # Example
///
/// ```
/// use gridclash_core::container::Container;
/// use gridclash_core::piece::Item;
///
/// let mut backpack = Container::backpack();
/// let (row, col) = backpack.add_first_empty(Item::new(5, 10, "restores 5 life").into()).unwrap();
/// assert_eq!((row, col), (0, 0));
/// assert_eq!(backpack.count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    rows: usize,
    cols: usize,
    slots: Vec<Option<SlotContent>>,
}

impl Container {
    /// Creates an empty container with the given shape.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            slots: vec![None; rows * cols],
        }
    }

    /// Creates the player's backpack (3 x 6).
    #[must_use]
    pub fn backpack() -> Self {
        Self::new(BACKPACK_ROWS, BACKPACK_COLS)
    }

    /// Creates the reward box (1 x 3).
    #[must_use]
    pub fn reward_box() -> Self {
        Self::new(REWARD_BOX_ROWS, REWARD_BOX_COLS)
    }

    /// Returns the container's row count.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the container's column count.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then_some(row * self.cols + col)
    }

    /// Returns the content at `(row, col)`, if any.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&SlotContent> {
        self.slots.get(self.index(row, col)?)?.as_ref()
    }

    /// Places content at `(row, col)`.
    ///
    /// # Errors
    ///
    /// [`PlaceError::OutOfBounds`] or [`PlaceError::Occupied`]; the
    /// container is unchanged on failure and the content comes back in
    /// the failure.
    pub fn place(
        &mut self,
        content: SlotContent,
        row: usize,
        col: usize,
    ) -> Result<(), PlaceFailure<SlotContent>> {
        let Some(index) = self.index(row, col) else {
            return Err(PlaceFailure::new(content, PlaceError::OutOfBounds { row, col }));
        };
        if self.slots[index].is_some() {
            return Err(PlaceFailure::new(content, PlaceError::Occupied { row, col }));
        }
        self.slots[index] = Some(content);
        Ok(())
    }

    /// Removes and returns the content at `(row, col)`.
    pub fn remove(&mut self, row: usize, col: usize) -> Option<SlotContent> {
        let index = self.index(row, col)?;
        self.slots[index].take()
    }

    /// Returns the first empty slot in row-major order, if any.
    #[must_use]
    pub fn first_empty(&self) -> Option<(usize, usize)> {
        self.slots
            .iter()
            .position(Option::is_none)
            .map(|index| (index / self.cols, index % self.cols))
    }

    /// Places content into the first empty slot, scanning row-major.
    ///
    /// Returns the coordinates the content landed in.
    ///
    /// # Errors
    ///
    /// [`PlaceError::Full`] when no empty slot remains; the content comes
    /// back in the failure.
    pub fn add_first_empty(
        &mut self,
        content: SlotContent,
    ) -> Result<(usize, usize), PlaceFailure<SlotContent>> {
        let Some((row, col)) = self.first_empty() else {
            return Err(PlaceFailure::new(content, PlaceError::Full));
        };
        self.slots[row * self.cols + col] = Some(content);
        Ok((row, col))
    }

    /// Returns `true` when every slot is occupied.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Returns the number of occupied slots.
    #[must_use]
    pub fn count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Iterates occupied slots in row-major order.
    pub fn contents(&self) -> impl Iterator<Item = (usize, usize, &SlotContent)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.as_ref()
                .map(|content| (index / self.cols, index % self.cols, content))
        })
    }
}
