//! Shared test fixtures.

use crate::game::{GameConfig, GameState};
use crate::piece::Piece;

/// A fresh game with the default configuration.
pub fn new_game() -> GameState {
    GameState::new(GameConfig::default())
}

/// A game with one piece per side, facing each other in lane 0.
///
/// The player's warrior (atk 5, life 10) sits at (0, 0); the opponent's
/// goblin (atk 3, life 8) sits at (1, 0).
pub fn skirmish_game() -> GameState {
    let mut game = new_game();
    game.player_board_mut()
        .place(Piece::new(5, 10, "warrior"), 0, 0)
        .unwrap();
    game.opponent_board_mut()
        .place(Piece::new(3, 8, "goblin"), 1, 0)
        .unwrap();
    game
}

/// Ticks until every projectile has landed and the effect queue is empty.
///
/// Returns the number of pending attacks that applied. Panics if the game
/// fails to settle within a generous frame budget.
pub fn settle(game: &mut GameState) -> usize {
    let mut applied = 0;
    for _ in 0..1_000 {
        applied += game.tick();
        if game.animations().is_idle() && game.effects().is_empty() {
            return applied;
        }
    }
    panic!("game did not settle within 1000 frames");
}
