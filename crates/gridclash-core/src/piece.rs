//! Pieces, items, and the tagged slot content stored by every container.
//!
//! This module provides the leaf entities of the game:
//! - [`Piece`]: a combatant with attack and life attributes
//! - [`Item`]: a consumable that buffs a piece when applied
//! - [`SlotContent`]: the tagged union a container slot holds
//! - [`PieceFlags`]: fusion and attacked-this-turn markers
//!
//! A piece has no behavior beyond taking damage and tracking attack
//! eligibility. Within one turn it cycles
//! `Ready -> mark_attacked -> Attacked -> reset_attack_status -> Ready`;
//! removal from a board simply drops it out of that cycle.

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Status flags carried by a piece.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct PieceFlags: u8 {
        /// The piece was created by fusing two others.
        const FUSION = 1 << 0;
        /// The piece has already attacked this turn.
        const ATTACKED = 1 << 1;
    }
}

/// A combatant occupying a board, backpack, or reward-box slot.
///
/// Exactly one container (or the input layer's transient dragged slot) owns
/// a piece at any instant. Life may go negative transiently after an
/// overkill hit; the effect queue's drain removes the piece from its board
/// before the cleanup pass completes.
///
/// # Example
///
/// ```
/// use gridclash_core::piece::Piece;
///
/// let mut mage = Piece::new(8, 5, "mage");
/// assert!(mage.can_attack());
/// mage.mark_attacked();
/// assert!(!mage.can_attack());
/// mage.reset_attack_status();
/// assert!(mage.can_attack());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    /// Damage dealt per declared attack.
    pub attack: u32,
    /// Remaining life. May dip below zero before removal.
    pub life: i32,
    /// Job label. Pure flavor: no gameplay rule dispatches on it.
    pub job: String,
    /// Ability text accumulated from applied items.
    pub ability: String,
    flags: PieceFlags,
}

impl Piece {
    /// Creates a piece with the given combat attributes.
    #[must_use]
    pub fn new(attack: u32, life: i32, job: impl Into<String>) -> Self {
        Self {
            attack,
            life,
            job: job.into(),
            ability: String::new(),
            flags: PieceFlags::empty(),
        }
    }

    /// Creates a fusion piece.
    #[must_use]
    pub fn new_fusion(attack: u32, life: i32, job: impl Into<String>) -> Self {
        Self {
            flags: PieceFlags::FUSION,
            ..Self::new(attack, life, job)
        }
    }

    /// Returns `true` if this is a fusion piece.
    #[must_use]
    pub const fn is_fusion(&self) -> bool {
        self.flags.contains(PieceFlags::FUSION)
    }

    /// Subtracts `amount` from life without clamping.
    ///
    /// Callers check `life <= 0` separately; negative life stays
    /// inspectable for overkill diagnostics.
    pub fn take_damage(&mut self, amount: u32) {
        self.life = self.life.saturating_sub_unsigned(amount);
    }

    /// Returns `true` iff the piece has not attacked this turn.
    #[must_use]
    pub const fn can_attack(&self) -> bool {
        !self.flags.contains(PieceFlags::ATTACKED)
    }

    /// Marks the piece as having attacked. Idempotent.
    pub fn mark_attacked(&mut self) {
        self.flags.insert(PieceFlags::ATTACKED);
    }

    /// Clears the attacked marker. Called once per piece per turn advance.
    pub fn reset_attack_status(&mut self) {
        self.flags.remove(PieceFlags::ATTACKED);
    }

    /// Returns the raw flag set.
    #[must_use]
    pub const fn flags(&self) -> PieceFlags {
        self.flags
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (atk {}, life {})", self.job, self.attack, self.life)?;
        if self.is_fusion() {
            write!(f, " [fusion]")?;
        }
        Ok(())
    }
}

/// A consumable that buffs a piece.
///
/// Items are stateless beyond their bonuses. Applying one mutates the
/// target piece additively; the caller then removes the item from its
/// container, completing the consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Added to the piece's attack on application.
    pub attack_bonus: u32,
    /// Added to the piece's life on application.
    pub life_bonus: i32,
    /// Ability text appended to the piece's description.
    pub ability: String,
}

impl Item {
    /// Creates an item with the given bonuses and ability text.
    #[must_use]
    pub fn new(attack_bonus: u32, life_bonus: i32, ability: impl Into<String>) -> Self {
        Self {
            attack_bonus,
            life_bonus,
            ability: ability.into(),
        }
    }

    /// Applies this item's bonuses to a piece.
    ///
    /// Ability text is comma-joined when the piece already has one. The
    /// caller is responsible for removing the item from its container
    /// afterwards.
    pub fn apply_to(&self, piece: &mut Piece) {
        piece.attack += self.attack_bonus;
        piece.life += self.life_bonus;
        if !self.ability.is_empty() {
            if piece.ability.is_empty() {
                piece.ability = self.ability.clone();
            } else {
                piece.ability.push_str(", ");
                piece.ability.push_str(&self.ability);
            }
        }
    }
}

/// Content held by a backpack or reward-box slot.
///
/// Containers switch on this explicit discriminant instead of inspecting
/// runtime types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SlotContent {
    /// A spare piece waiting to be deployed.
    Piece(Piece),
    /// A consumable item.
    Item(Item),
}

impl SlotContent {
    /// Returns `true` if the slot holds a piece.
    #[must_use]
    pub const fn is_piece(&self) -> bool {
        matches!(self, Self::Piece(_))
    }

    /// Returns `true` if the slot holds an item.
    #[must_use]
    pub const fn is_item(&self) -> bool {
        matches!(self, Self::Item(_))
    }

    /// Returns a reference to the piece, if this is a piece.
    #[must_use]
    pub const fn as_piece(&self) -> Option<&Piece> {
        match self {
            Self::Piece(piece) => Some(piece),
            Self::Item(_) => None,
        }
    }

    /// Returns a mutable reference to the piece, if this is a piece.
    #[must_use]
    pub fn as_piece_mut(&mut self) -> Option<&mut Piece> {
        match self {
            Self::Piece(piece) => Some(piece),
            Self::Item(_) => None,
        }
    }

    /// Returns a reference to the item, if this is an item.
    #[must_use]
    pub const fn as_item(&self) -> Option<&Item> {
        match self {
            Self::Item(item) => Some(item),
            Self::Piece(_) => None,
        }
    }
}

impl From<Piece> for SlotContent {
    fn from(piece: Piece) -> Self {
        Self::Piece(piece)
    }
}

impl From<Item> for SlotContent {
    fn from(item: Item) -> Self {
        Self::Item(item)
    }
}
