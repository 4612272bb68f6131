//! Property-based checks over placement, serial mapping, and flight math.

use glam::Vec2;
use proptest::prelude::*;

use crate::animation::Projectile;
use crate::board::{Board, Side, BOARD_SIZE};
use crate::container::Container;
use crate::error::PlaceError;
use crate::piece::{Item, Piece};

fn test_board() -> Board {
    Board::new(Side::Player, Vec2::ZERO, 100.0)
}

proptest! {
    /// Serial placement 1-9 lands on the same cell as direct row-major
    /// placement.
    #[test]
    fn serial_matches_row_major_coordinates(serial in 1_usize..=9) {
        let mut by_serial = test_board();
        let mut by_coords = test_board();
        let piece = Piece::new(5, 10, "warrior");

        by_serial.place_by_serial(piece.clone(), serial).unwrap();
        let (row, col) = ((serial - 1) / BOARD_SIZE, (serial - 1) % BOARD_SIZE);
        by_coords.place(piece, row, col).unwrap();

        prop_assert_eq!(by_serial, by_coords);
    }

    /// Serials outside 1-9 never mutate the board, and the piece comes
    /// back to the caller.
    #[test]
    fn invalid_serials_are_rejected(serial in proptest::sample::select(vec![0_usize, 10, 11, 100])) {
        let mut board = test_board();
        let piece = Piece::new(5, 10, "warrior");
        let err = board.place_by_serial(piece.clone(), serial).unwrap_err();
        prop_assert_eq!(err.reason, PlaceError::BadSerial(serial));
        prop_assert_eq!(err.content, piece);
        prop_assert!(board.is_empty());
    }

    /// Placing then removing restores an empty cell, for any in-range cell.
    #[test]
    fn place_remove_round_trips(row in 0_usize..BOARD_SIZE, col in 0_usize..BOARD_SIZE) {
        let mut board = test_board();
        let piece = Piece::new(3, 7, "archer");
        board.place(piece.clone(), row, col).unwrap();
        prop_assert_eq!(board.remove(row, col), Some(piece));
        prop_assert!(board.is_empty());
    }

    /// Out-of-range placement fails without mutating the board, and the
    /// piece comes back to the caller.
    #[test]
    fn out_of_range_placement_is_a_no_op(
        row in BOARD_SIZE..20_usize,
        col in 0_usize..20,
    ) {
        let mut board = test_board();
        let piece = Piece::new(1, 1, "x");
        let err = board.place(piece.clone(), row, col).unwrap_err();
        prop_assert_eq!(err.reason, PlaceError::OutOfBounds { row, col });
        prop_assert_eq!(err.content, piece);
        prop_assert!(board.is_empty());
    }

    /// A container's occupied count tracks placements exactly and never
    /// exceeds its capacity.
    #[test]
    fn container_count_tracks_fill(n in 0_usize..25) {
        let mut backpack = Container::backpack();
        let capacity = backpack.rows() * backpack.cols();
        let mut placed = 0;
        for _ in 0..n {
            if backpack.add_first_empty(Item::new(1, 1, "x").into()).is_ok() {
                placed += 1;
            }
        }
        prop_assert_eq!(backpack.count(), placed);
        prop_assert_eq!(placed, n.min(capacity));
        prop_assert_eq!(backpack.is_full(), placed == capacity);
    }

    /// Every projectile lands on its target within the expected number of
    /// frames, regardless of direction.
    #[test]
    fn projectiles_always_land(
        sx in -500.0_f32..500.0, sy in -500.0_f32..500.0,
        tx in -500.0_f32..500.0, ty in -500.0_f32..500.0,
        speed in 1.0_f32..50.0,
    ) {
        let start = Vec2::new(sx, sy);
        let target = Vec2::new(tx, ty);
        let mut projectile = Projectile::new(start, target, speed);

        let budget = (start.distance(target) / speed).ceil() as usize + 2;
        let mut frames = 0;
        while !projectile.advance() {
            frames += 1;
            prop_assert!(frames <= budget, "flight exceeded {budget} frames");
        }
        prop_assert_eq!(projectile.position(), target);
    }
}
