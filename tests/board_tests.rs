//! Board tests - grid addressing, placement checks and line compaction

use std::sync::Arc;

use blockfall::core::{standard_catalog, Board, PieceInstance};
use blockfall::types::EMPTY_CELL;

fn fill_row(board: &mut Board, y: i32, value: u8) {
    for x in 0..board.width() as i32 {
        board.set_cell(x, y, value);
    }
}

fn occupied(board: &Board) -> usize {
    board.cells().iter().filter(|&&c| c != EMPTY_CELL).count()
}

#[test]
fn test_board_new_empty() {
    let board = Board::new(10, 20, 5);
    assert_eq!(board.width(), 10);
    assert_eq!(board.height(), 20);
    assert_eq!(board.total_height(), 25);

    for y in 0..25 {
        for x in 0..10 {
            assert_eq!(board.get(x, y), Some(EMPTY_CELL), "cell ({}, {})", x, y);
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new(10, 20, 5);

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(10, 0), None);
    assert_eq!(board.get(0, 25), None);
}

#[test]
fn test_placement_rejects_outside_and_occupied() {
    let mut board = Board::new(10, 20, 0);
    board.set_cell(3, 0, 1);

    assert!(board.is_valid_placement(&[(0, 0), (1, 0), (2, 0), (9, 19)]));
    assert!(!board.is_valid_placement(&[(0, 0), (1, 0), (2, 0), (3, 0)]));
    assert!(!board.is_valid_placement(&[(-1, 0)]));
    assert!(!board.is_valid_placement(&[(10, 5)]));
    assert!(!board.is_valid_placement(&[(5, -1)]));
    assert!(!board.is_valid_placement(&[(5, 20)]));
}

#[test]
fn test_lock_sets_exactly_four_cells() {
    let mut board = Board::new(10, 20, 5);
    let mut piece = PieceInstance::new(Arc::new(standard_catalog()[2].clone()));
    piece.place_at(4, 0);

    board.lock_piece(&piece);

    assert_eq!(occupied(&board), 4);
    for (x, y) in piece.tiles() {
        assert_eq!(board.get(x, y), Some(piece.value()));
    }
}

#[test]
fn test_single_row_clear_after_last_cell() {
    let mut board = Board::new(10, 20, 0);
    for x in 0..9 {
        board.set_cell(x, 0, 4);
    }
    board.set_cell(3, 1, 6);
    assert!(!board.is_row_full(0));

    board.set_cell(9, 0, 4);
    assert!(board.is_row_full(0));
    assert_eq!(board.compact_lines(), 1);

    assert_eq!(board.get(3, 0), Some(6));
    assert_eq!(occupied(&board), 1);
}

#[test]
fn test_two_adjacent_rows_clear_together() {
    let mut board = Board::new(10, 20, 0);
    fill_row(&mut board, 0, 1);
    fill_row(&mut board, 1, 2);
    board.set_cell(0, 2, 7);

    assert_eq!(board.compact_lines(), 2);
    assert_eq!(board.get(0, 0), Some(7));
    assert_eq!(occupied(&board), 1);
}

#[test]
fn test_rows_above_keep_their_order() {
    let mut board = Board::new(4, 6, 0);
    fill_row(&mut board, 1, 9);
    // Distinct markers in rows 2, 3 and 4
    board.set_cell(0, 2, 1);
    board.set_cell(1, 3, 2);
    board.set_cell(2, 4, 3);
    board.set_cell(3, 0, 5);

    assert_eq!(board.compact_lines(), 1);

    assert_eq!(board.get(3, 0), Some(5));
    assert_eq!(board.get(0, 1), Some(1));
    assert_eq!(board.get(1, 2), Some(2));
    assert_eq!(board.get(2, 3), Some(3));
    assert!(!board.any_occupied_from_row(4));
}

#[test]
fn test_compaction_is_idempotent() {
    let mut board = Board::new(5, 8, 2);
    fill_row(&mut board, 0, 1);
    fill_row(&mut board, 3, 1);
    fill_row(&mut board, 9, 1);
    board.set_cell(2, 2, 4);
    board.set_cell(4, 5, 4);

    assert_eq!(board.compact_lines(), 3);
    let after = board.cells().to_vec();

    assert_eq!(board.compact_lines(), 0);
    assert_eq!(board.cells(), after.as_slice());
}

#[test]
fn test_buffer_rows_clear_like_visible_rows() {
    let mut board = Board::new(3, 4, 2);
    fill_row(&mut board, 5, 2);
    board.set_cell(1, 4, 6);

    assert_eq!(board.compact_lines(), 1);
    assert_eq!(board.get(1, 4), Some(6));
    assert!(!board.any_occupied_from_row(5));
}

#[test]
fn test_reset_clears_everything() {
    let mut board = Board::new(10, 20, 5);
    fill_row(&mut board, 0, 3);
    board.set_cell(9, 24, 3);

    board.reset();
    assert_eq!(occupied(&board), 0);
}
