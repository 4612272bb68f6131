//! The effect queue: pending attacks gated on animation completion.
//!
//! This is the synchronization core of the game. Declaring an attack and
//! applying its damage are decoupled so that damage never lands before the
//! projectile for it has visibly arrived. A [`PendingAttack`] record is
//! created the instant an attack is declared and consumed exactly once,
//! when the queue observes that every in-flight animation has finished.
//!
//! # Gating
//!
//! The queue gates *all* pending records on *all* animations being idle
//! rather than pairing each record with its own projectile: a batch of
//! simultaneous attacks resolves atomically once every projectile in the
//! batch has landed. An individual projectile that lands early therefore
//! waits for its siblings.

use serde::{Deserialize, Serialize};

use crate::board::{AttackDeclaration, Board, Side};
use crate::message::MessageLog;

/// A declared attack whose damage has not yet been applied.
///
/// The record names the target by board side and coordinates rather than
/// holding a piece reference; the target may die to an earlier record in
/// the same batch, in which case this record is discarded unapplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingAttack {
    /// Which board the target piece sits on.
    pub target_side: Side,
    /// Target row on that board.
    pub row: usize,
    /// Target column on that board.
    pub col: usize,
    /// Damage to apply.
    pub damage: u32,
    /// Declaration message, emitted when the damage lands.
    pub message: String,
    /// `true` when the player declared the attack.
    pub by_player: bool,
}

impl PendingAttack {
    /// Builds the pending record for a declaration made by `attacker_side`.
    #[must_use]
    pub fn from_declaration(declaration: &AttackDeclaration, attacker_side: Side) -> Self {
        let (row, col) = declaration.target;
        Self {
            target_side: attacker_side.enemy(),
            row,
            col,
            damage: declaration.damage,
            message: declaration.message.clone(),
            by_player: declaration.by_player,
        }
    }
}

/// Holds pending attacks across frames until the animation gate opens.
///
/// # Example
///
/// ```
/// use gridclash_core::board::{Board, Side};
/// use gridclash_core::effect::{EffectQueue, PendingAttack};
/// use gridclash_core::message::MessageLog;
/// use gridclash_core::piece::Piece;
/// use glam::Vec2;
///
/// let mut player = Board::new(Side::Player, Vec2::ZERO, 100.0);
/// let mut opponent = Board::new(Side::Opponent, Vec2::ZERO, 100.0);
/// opponent.place(Piece::new(0, 10, "enemy"), 0, 0).unwrap();
///
/// let mut queue = EffectQueue::default();
/// queue.enqueue(PendingAttack {
///     target_side: Side::Opponent,
///     row: 0,
///     col: 0,
///     damage: 4,
///     message: "hit".into(),
///     by_player: true,
/// });
///
/// let mut log = MessageLog::default();
/// // Gate closed: nothing happens.
/// queue.drain(false, &mut player, &mut opponent, &mut log);
/// assert_eq!(opponent.get(0, 0).unwrap().life, 10);
/// // Gate open: damage lands.
/// queue.drain(true, &mut player, &mut opponent, &mut log);
/// assert_eq!(opponent.get(0, 0).unwrap().life, 6);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectQueue {
    pending: Vec<PendingAttack>,
}

impl EffectQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a pending attack.
    ///
    /// The caller starts the matching projectile animation at the same
    /// time; the queue only ever polls the manager's idle signal, it does
    /// not own animations.
    pub fn enqueue(&mut self, record: PendingAttack) {
        self.pending.push(record);
    }

    /// Returns the number of records awaiting the gate.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` when no record is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Applies every pending record if the animation gate is open.
    ///
    /// When `animations_idle` is false this is a no-op and the records
    /// carry over to the next frame. When true, each record still
    /// referencing a live piece at its target coordinates applies its
    /// damage; a piece reduced to `life <= 0` is removed from its board
    /// and a death message is logged with player-victory or
    /// opponent-victory phrasing. Every record is consumed exactly once.
    ///
    /// Returns the number of records that applied damage.
    pub fn drain(
        &mut self,
        animations_idle: bool,
        player_board: &mut Board,
        opponent_board: &mut Board,
        log: &mut MessageLog,
    ) -> usize {
        if !animations_idle || self.pending.is_empty() {
            return 0;
        }

        let mut applied = 0;
        for record in std::mem::take(&mut self.pending) {
            let board = match record.target_side {
                Side::Player => &mut *player_board,
                Side::Opponent => &mut *opponent_board,
            };
            // The target may already be gone: killed by an earlier record
            // in this batch, or moved by the input layer mid-flight.
            let Some(target) = board.get_mut(record.row, record.col) else {
                continue;
            };

            target.take_damage(record.damage);
            let fatal = target.life <= 0;
            applied += 1;
            log.push(record.message.clone());

            if fatal {
                if let Some(fallen) = board.remove(record.row, record.col) {
                    tracing::info!(side = %record.target_side, row = record.row,
                        col = record.col, piece = %fallen, "piece destroyed");
                    if record.by_player {
                        log.push(format!("Enemy {} is destroyed!", fallen.job));
                    } else {
                        log.push(format!("Your {} has fallen!", fallen.job));
                    }
                }
            }
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Piece;
    use glam::Vec2;

    fn boards() -> (Board, Board) {
        (
            Board::new(Side::Player, Vec2::new(420.0, 500.0), 100.0),
            Board::new(Side::Opponent, Vec2::new(420.0, 50.0), 100.0),
        )
    }

    fn record(target_side: Side, row: usize, col: usize, damage: u32, by_player: bool) -> PendingAttack {
        PendingAttack {
            target_side,
            row,
            col,
            damage,
            message: format!("{damage} damage to ({row}, {col})"),
            by_player,
        }
    }

    mod gating_tests {
        use super::*;

        #[test]
        fn closed_gate_applies_nothing() {
            let (mut player, mut opponent) = boards();
            opponent.place(Piece::new(0, 10, "enemy"), 1, 1).unwrap();
            let mut queue = EffectQueue::new();
            let mut log = MessageLog::default();
            queue.enqueue(record(Side::Opponent, 1, 1, 5, true));

            assert_eq!(queue.drain(false, &mut player, &mut opponent, &mut log), 0);
            assert_eq!(opponent.get(1, 1).unwrap().life, 10);
            assert_eq!(queue.len(), 1);
        }

        #[test]
        fn open_gate_applies_and_consumes() {
            let (mut player, mut opponent) = boards();
            opponent.place(Piece::new(0, 10, "enemy"), 1, 1).unwrap();
            let mut queue = EffectQueue::new();
            let mut log = MessageLog::default();
            queue.enqueue(record(Side::Opponent, 1, 1, 5, true));

            assert_eq!(queue.drain(true, &mut player, &mut opponent, &mut log), 1);
            assert_eq!(opponent.get(1, 1).unwrap().life, 5);
            assert!(queue.is_empty());
        }

        #[test]
        fn records_are_never_reprocessed() {
            let (mut player, mut opponent) = boards();
            opponent.place(Piece::new(0, 10, "enemy"), 1, 1).unwrap();
            let mut queue = EffectQueue::new();
            let mut log = MessageLog::default();
            queue.enqueue(record(Side::Opponent, 1, 1, 5, true));

            queue.drain(true, &mut player, &mut opponent, &mut log);
            queue.drain(true, &mut player, &mut opponent, &mut log);
            assert_eq!(opponent.get(1, 1).unwrap().life, 5);
        }
    }

    mod removal_tests {
        use super::*;

        #[test]
        fn fatal_damage_removes_piece_and_logs_victory() {
            let (mut player, mut opponent) = boards();
            opponent.place(Piece::new(0, 4, "mage"), 2, 0).unwrap();
            let mut queue = EffectQueue::new();
            let mut log = MessageLog::default();
            queue.enqueue(record(Side::Opponent, 2, 0, 9, true));

            queue.drain(true, &mut player, &mut opponent, &mut log);
            assert!(opponent.get(2, 0).is_none());
            assert_eq!(log.latest(), "Enemy mage is destroyed!");
        }

        #[test]
        fn opponent_kill_uses_fallen_phrasing() {
            let (mut player, mut opponent) = boards();
            player.place(Piece::new(0, 3, "warrior"), 0, 0).unwrap();
            let mut queue = EffectQueue::new();
            let mut log = MessageLog::default();
            queue.enqueue(record(Side::Player, 0, 0, 3, false));

            queue.drain(true, &mut player, &mut opponent, &mut log);
            assert!(player.get(0, 0).is_none());
            assert_eq!(log.latest(), "Your warrior has fallen!");
        }

        #[test]
        fn survivor_keeps_reduced_life() {
            let (mut player, mut opponent) = boards();
            opponent.place(Piece::new(0, 10, "enemy"), 0, 0).unwrap();
            let mut queue = EffectQueue::new();
            let mut log = MessageLog::default();
            queue.enqueue(record(Side::Opponent, 0, 0, 6, true));

            queue.drain(true, &mut player, &mut opponent, &mut log);
            let survivor = opponent.get(0, 0).unwrap();
            assert_eq!(survivor.life, 4);
        }

        #[test]
        fn stale_record_for_empty_cell_is_discarded() {
            let (mut player, mut opponent) = boards();
            let mut queue = EffectQueue::new();
            let mut log = MessageLog::default();
            queue.enqueue(record(Side::Opponent, 0, 0, 6, true));

            assert_eq!(queue.drain(true, &mut player, &mut opponent, &mut log), 0);
            assert!(queue.is_empty());
        }

        #[test]
        fn batch_resolves_atomically() {
            let (mut player, mut opponent) = boards();
            opponent.place(Piece::new(0, 10, "a"), 0, 0).unwrap();
            opponent.place(Piece::new(0, 10, "b"), 0, 1).unwrap();
            let mut queue = EffectQueue::new();
            let mut log = MessageLog::default();
            queue.enqueue(record(Side::Opponent, 0, 0, 3, true));
            queue.enqueue(record(Side::Opponent, 0, 1, 4, true));

            assert_eq!(queue.drain(true, &mut player, &mut opponent, &mut log), 2);
            assert_eq!(opponent.get(0, 0).unwrap().life, 7);
            assert_eq!(opponent.get(0, 1).unwrap().life, 6);
        }

        #[test]
        fn second_record_against_dead_target_is_dropped() {
            let (mut player, mut opponent) = boards();
            opponent.place(Piece::new(0, 5, "enemy"), 0, 0).unwrap();
            let mut queue = EffectQueue::new();
            let mut log = MessageLog::default();
            queue.enqueue(record(Side::Opponent, 0, 0, 5, true));
            queue.enqueue(record(Side::Opponent, 0, 0, 5, true));

            // First record kills and removes the piece, second finds the
            // slot empty and is discarded.
            assert_eq!(queue.drain(true, &mut player, &mut opponent, &mut log), 1);
            assert!(opponent.get(0, 0).is_none());
        }
    }

    #[test]
    fn from_declaration_targets_the_enemy_side() {
        let (mut player, mut opponent) = boards();
        player.place(Piece::new(5, 10, "warrior"), 0, 1).unwrap();
        opponent.place(Piece::new(6, 9, "enemy"), 2, 1).unwrap();

        let declaration = player.attack(&opponent, 0, 1).unwrap();
        let pending = PendingAttack::from_declaration(&declaration, Side::Player);
        assert_eq!(pending.target_side, Side::Opponent);
        assert_eq!((pending.row, pending.col), (2, 1));
        assert_eq!(pending.damage, 5);
        assert!(pending.by_player);
    }
}
