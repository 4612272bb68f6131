//! The turn controller and the consolidated game state.
//!
//! [`GameState`] owns every piece of mutable game state: both boards, the
//! backpack and reward box, the path grid, the animation manager, the
//! effect queue, the message log, and the turn/coin counters. It is
//! created at game start, mutated only through the operations here, and
//! torn down at process exit. The input and render layers hold no game
//! state of their own.
//!
//! # Frame ordering
//!
//! Once per frame, after input handling and before rendering, the caller
//! invokes [`GameState::tick`]: animations advance first, then the effect
//! queue drains against the idle signal. A frame therefore never shows
//! post-damage state alongside a still-in-flight projectile for the same
//! record.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::animation::{AnimationManager, DEFAULT_PROJECTILE_SPEED};
use crate::board::{Board, Side};
use crate::container::Container;
use crate::effect::{EffectQueue, PendingAttack};
use crate::error::AttackError;
use crate::message::{MessageLog, DEFAULT_HISTORY};
use crate::path::PathGrid;
use crate::piece::Item;

// =============================================================================
// Configuration
// =============================================================================

/// Presentation geometry and tuning knobs, consolidated in one place.
///
/// The reference layout centers two 300-pixel boards on a 1440x900 screen:
/// the opponent board near the top edge, the player board near the bottom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Top-left corner of the player board.
    pub player_board_origin: Vec2,
    /// Top-left corner of the opponent board.
    pub opponent_board_origin: Vec2,
    /// Top-left corner of the path grid.
    pub path_origin: Vec2,
    /// Board and path cell size in pixels.
    pub cell_size: f32,
    /// Projectile flight speed in pixels per frame.
    pub projectile_speed: f32,
    /// Flat coin grant per turn advance.
    pub turn_stipend: u32,
    /// A reward item is granted every this many turns.
    pub reward_interval: u32,
    /// Coin balance at game start.
    pub starting_coins: u32,
    /// Message history entries kept.
    pub message_history: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_board_origin: Vec2::new(420.0, 500.0),
            opponent_board_origin: Vec2::new(420.0, 50.0),
            path_origin: Vec2::new(170.0, 250.0),
            cell_size: 100.0,
            projectile_speed: DEFAULT_PROJECTILE_SPEED,
            turn_stipend: 10,
            reward_interval: 3,
            starting_coins: 100,
            message_history: DEFAULT_HISTORY,
        }
    }
}

// =============================================================================
// Game state
// =============================================================================

/// The whole game: boards, stores, effect machinery, and the turn counter.
///
/// # Example
///
/// ```
/// use gridclash_core::game::{GameConfig, GameState};
/// use gridclash_core::piece::Piece;
///
/// let mut game = GameState::new(GameConfig::default());
/// game.player_board_mut()
///     .place_by_serial(Piece::new(5, 10, "warrior"), 5)
///     .unwrap();
/// game.opponent_board_mut()
///     .place_by_serial(Piece::new(3, 8, "enemy"), 5)
///     .unwrap();
///
/// // Declare, then run frames until the projectile lands and damage applies.
/// game.declare_attack(1, 1).unwrap();
/// while !game.animations().is_idle() || !game.effects().is_empty() {
///     game.tick();
/// }
/// assert_eq!(game.opponent_board().get(1, 1).unwrap().life, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    config: GameConfig,
    turn: u32,
    coins: u32,
    player_board: Board,
    opponent_board: Board,
    backpack: Container,
    reward_box: Container,
    path: PathGrid,
    animations: AnimationManager,
    effects: EffectQueue,
    log: MessageLog,
}

impl GameState {
    /// Creates a fresh game at turn 1.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let player_board = Board::new(Side::Player, config.player_board_origin, config.cell_size);
        let opponent_board =
            Board::new(Side::Opponent, config.opponent_board_origin, config.cell_size);
        let mut log = MessageLog::new(config.message_history);
        log.push("The game begins!");
        Self {
            turn: 1,
            coins: config.starting_coins,
            player_board,
            opponent_board,
            backpack: Container::backpack(),
            reward_box: Container::reward_box(),
            path: PathGrid::new(config.path_origin, config.cell_size),
            animations: AnimationManager::new(config.projectile_speed),
            effects: EffectQueue::new(),
            log,
            config,
        }
    }

    /// Returns the current turn number, starting at 1.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// Returns the current coin balance.
    #[must_use]
    pub const fn coins(&self) -> u32 {
        self.coins
    }

    /// Returns the game configuration.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Returns the player board.
    #[must_use]
    pub const fn player_board(&self) -> &Board {
        &self.player_board
    }

    /// Returns the player board mutably, for setup and drag placement.
    pub fn player_board_mut(&mut self) -> &mut Board {
        &mut self.player_board
    }

    /// Returns the opponent board.
    #[must_use]
    pub const fn opponent_board(&self) -> &Board {
        &self.opponent_board
    }

    /// Returns the opponent board mutably, for setup.
    pub fn opponent_board_mut(&mut self) -> &mut Board {
        &mut self.opponent_board
    }

    /// Returns the backpack.
    #[must_use]
    pub const fn backpack(&self) -> &Container {
        &self.backpack
    }

    /// Returns the backpack mutably, for drag placement.
    pub fn backpack_mut(&mut self) -> &mut Container {
        &mut self.backpack
    }

    /// Returns the reward box.
    #[must_use]
    pub const fn reward_box(&self) -> &Container {
        &self.reward_box
    }

    /// Returns the reward box mutably, for drag placement.
    pub fn reward_box_mut(&mut self) -> &mut Container {
        &mut self.reward_box
    }

    /// Returns the path grid.
    #[must_use]
    pub const fn path(&self) -> &PathGrid {
        &self.path
    }

    /// Returns the path grid mutably.
    pub fn path_mut(&mut self) -> &mut PathGrid {
        &mut self.path
    }

    /// Returns the animation manager.
    #[must_use]
    pub const fn animations(&self) -> &AnimationManager {
        &self.animations
    }

    /// Returns the effect queue.
    #[must_use]
    pub const fn effects(&self) -> &EffectQueue {
        &self.effects
    }

    /// Returns the message log.
    #[must_use]
    pub const fn log(&self) -> &MessageLog {
        &self.log
    }

    // =========================================================================
    // Economy
    // =========================================================================

    /// Grants coins.
    pub fn add_coins(&mut self, amount: u32) {
        self.coins += amount;
        self.log.push(format!("Gained {amount} coins"));
    }

    /// Spends coins; fails (and logs) when the balance is insufficient.
    ///
    /// The balance never goes below zero.
    pub fn spend_coins(&mut self, amount: u32) -> bool {
        if let Some(remaining) = self.coins.checked_sub(amount) {
            self.coins = remaining;
            self.log.push(format!("Spent {amount} coins"));
            true
        } else {
            self.log.push("Not enough coins!");
            false
        }
    }

    // =========================================================================
    // Attacks
    // =========================================================================

    /// Declares the player's single context-menu attack from `(row, col)`.
    ///
    /// Follows the declare -> spawn projectile -> enqueue -> mark-attacked
    /// pattern for one piece. Damage lands later, through [`Self::tick`].
    ///
    /// # Errors
    ///
    /// [`AttackError::AlreadyAttacked`] when the piece has spent its attack
    /// this turn, otherwise the failures of [`Board::attack`].
    pub fn declare_attack(&mut self, row: usize, col: usize) -> Result<(), AttackError> {
        if let Some(piece) = self.player_board.get(row, col) {
            if !piece.can_attack() {
                return Err(AttackError::AlreadyAttacked { row, col });
            }
        }
        self.declare_from(Side::Player, row, col)
    }

    /// Shared declare -> spawn -> enqueue -> mark path for both sides.
    fn declare_from(&mut self, side: Side, row: usize, col: usize) -> Result<(), AttackError> {
        let (attacker_board, enemy_board) = match side {
            Side::Player => (&self.player_board, &self.opponent_board),
            Side::Opponent => (&self.opponent_board, &self.player_board),
        };
        let declaration = attacker_board.attack(enemy_board, row, col)?;

        self.animations
            .spawn(declaration.attacker_anchor, declaration.target_anchor);
        self.effects
            .enqueue(PendingAttack::from_declaration(&declaration, side));

        let board = match side {
            Side::Player => &mut self.player_board,
            Side::Opponent => &mut self.opponent_board,
        };
        if let Some(piece) = board.get_mut(row, col) {
            piece.mark_attacked();
        }
        Ok(())
    }

    // =========================================================================
    // Turn advance
    // =========================================================================

    /// Advances to the next turn.
    ///
    /// In order: the turn counter increments and the stipend is granted;
    /// every reward interval a reward item lands in the reward box; every
    /// eligible opponent piece declares an attack down its lane (enqueued
    /// through the same path as player attacks); finally attack status is
    /// reset on both boards, clearing the opponent's just-used attacks and
    /// refreshing the player's pieces for the coming turn.
    pub fn advance_turn(&mut self) {
        self.turn += 1;
        tracing::info!(turn = self.turn, "turn advanced");
        self.log.push(format!("Turn {} begins", self.turn));
        self.add_coins(self.config.turn_stipend);

        if self.turn % self.reward_interval() == 0 {
            self.grant_reward();
        }

        // Opponent sweep: deterministic row-major pass, not a strategy.
        let attackers: Vec<(usize, usize)> = self
            .opponent_board
            .pieces()
            .filter(|(_, _, piece)| piece.can_attack())
            .map(|(row, col, _)| (row, col))
            .collect();
        for (row, col) in attackers {
            // Lanes without a player piece simply declare nothing.
            let _ = self.declare_from(Side::Opponent, row, col);
        }

        self.player_board.reset_attack_statuses();
        self.opponent_board.reset_attack_statuses();
    }

    fn reward_interval(&self) -> u32 {
        self.config.reward_interval.max(1)
    }

    /// Drops a reward item into the reward box, escalating with the game's
    /// length. A full box forfeits the reward.
    fn grant_reward(&mut self) {
        let tier = (self.turn / self.reward_interval()).min(3);
        let item = Item::new(
            5 * tier,
            10 * tier as i32,
            format!("restores {} life", 5 * tier),
        );
        match self.reward_box.add_first_empty(item.into()) {
            Ok(_) => self.log.push("A reward has arrived!"),
            Err(_) => self.log.push("The reward box is full; reward lost"),
        }
    }

    // =========================================================================
    // Frame tick
    // =========================================================================

    /// Runs one frame of deferred-effect processing.
    ///
    /// Animations advance first; the effect queue then drains against the
    /// resulting idle signal, so damage for a batch applies on the same
    /// frame its last projectile lands.
    ///
    /// Returns the number of pending attacks that applied this frame.
    pub fn tick(&mut self) -> usize {
        self.animations.advance();
        self.effects.drain(
            self.animations.is_idle(),
            &mut self.player_board,
            &mut self.opponent_board,
            &mut self.log,
        )
    }

    // =========================================================================
    // Item application
    // =========================================================================

    /// Applies the item in backpack slot `item_slot` to the player piece at
    /// `target`, consuming the item.
    ///
    /// Fails without net mutation (the item snaps back to its slot) when
    /// the slot holds no item or the target cell holds no piece.
    pub fn use_item(&mut self, item_slot: (usize, usize), target: (usize, usize)) -> bool {
        let (slot_row, slot_col) = item_slot;
        let Some(content) = self.backpack.remove(slot_row, slot_col) else {
            return false;
        };
        let item = match content {
            crate::piece::SlotContent::Item(item) => item,
            other @ crate::piece::SlotContent::Piece(_) => {
                // Slot held a spare piece, not a consumable; put it back.
                // The slot was just vacated, so the restore cannot bounce.
                let restored = self.backpack.place(other, slot_row, slot_col);
                debug_assert!(restored.is_ok());
                return false;
            }
        };

        let (target_row, target_col) = target;
        match self.player_board.get_mut(target_row, target_col) {
            Some(piece) => {
                item.apply_to(piece);
                self.log.push(format!("Item used: now {piece}"));
                true
            }
            None => {
                // No piece at the target; the slot was just vacated, so
                // the restore cannot bounce.
                let restored = self.backpack.place(item.into(), slot_row, slot_col);
                debug_assert!(restored.is_ok());
                false
            }
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

// =============================================================================
// Tests
// =============================================================================
