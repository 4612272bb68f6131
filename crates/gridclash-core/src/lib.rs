//! # Gridclash Core
//!
//! Turn and combat resolution core for the Gridclash auto-battler.
//!
//! Two 3x3 boards face each other across shared lanes. Pieces are placed on
//! a board, declare attacks down their lane, and the resulting damage is
//! held in an effect queue until the projectile animation for the attack has
//! landed. A turn controller drives the opponent's automatic attack sweep
//! and the per-turn economy.
//!
//! ## Architecture
//!
//! - **Pieces and items** ([`piece`]): the gameplay attributes and the
//!   tagged slot content stored by every container.
//! - **Boards** ([`board`]): the two tactical grids and the lane targeting
//!   algorithm. Targeting only *declares* an attack; it never applies
//!   damage.
//! - **Containers** ([`container`]): the backpack and reward box, sharing
//!   the boards' slot model without the lane semantics.
//! - **Animation gate** ([`animation`]): in-flight projectiles whose
//!   completion gates the effect queue.
//! - **Effect queue** ([`effect`]): pending damage records, applied exactly
//!   once when all projectiles have landed.
//! - **Turn controller** ([`game`]): the consolidated [`game::GameState`]
//!   owning every piece of mutable game state.
//!
//! ## Usage
//!
//! ```
//! use gridclash_core::game::{GameConfig, GameState};
//! use gridclash_core::piece::Piece;
//!
//! let mut game = GameState::new(GameConfig::default());
//! game.player_board_mut()
//!     .place_by_serial(Piece::new(5, 10, "warrior"), 1)
//!     .unwrap();
//! game.advance_turn();
//! assert_eq!(game.turn(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod animation;
pub mod board;
pub mod container;
pub mod effect;
pub mod error;
pub mod game;
pub mod message;
pub mod path;
pub mod piece;

pub use animation::AnimationManager;
pub use board::{AttackDeclaration, Board, Side, BOARD_SIZE};
pub use container::Container;
pub use effect::{EffectQueue, PendingAttack};
pub use error::{AttackError, PlaceError, PlaceFailure};
pub use game::{GameConfig, GameState};
pub use message::MessageLog;
pub use path::PathGrid;
pub use piece::{Item, Piece, PieceFlags, SlotContent};

#[cfg(test)]
mod tests;
