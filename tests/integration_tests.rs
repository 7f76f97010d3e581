//! Integration tests for the game loop through the public API

use blocktris::core::{Board, GameController, GameOptions, Tetromino};
use blocktris::types::{GameAction, GamePhase, PieceKind};

fn immediate() -> GameOptions {
    GameOptions {
        line_clear_animation: false,
    }
}

fn started(seed: u32) -> GameController {
    let mut state = GameController::with_options(seed, immediate());
    assert!(state.apply_action(GameAction::Confirm));
    state
}

/// Board whose row 19 is complete except where the first piece of `seed` lands.
fn gap_for_first_piece(seed: u32) -> Board {
    let ghost = started(seed).ghost().unwrap();
    let holes: Vec<i8> = ghost
        .cells()
        .filter(|&(_, y)| y == 19)
        .map(|(x, _)| x)
        .collect();

    let mut board = Board::new();
    board.fill_row_except(19, PieceKind::T, &holes);
    board
}

fn hard_drop_until_over(state: &mut GameController) -> usize {
    let mut drops = 0;
    while state.phase() != GamePhase::GameOver && drops < 200 {
        state.apply_action(GameAction::HardDrop);
        drops += 1;
    }
    drops
}

#[test]
fn test_game_lifecycle() {
    let mut state = GameController::with_options(12345, immediate());
    assert_eq!(state.phase(), GamePhase::Title);

    state.apply_action(GameAction::Confirm);
    assert_eq!(state.phase(), GamePhase::Playing);
    assert_eq!(state.current().x, 3);
    assert_eq!(state.current().y, 0);

    state.apply_action(GameAction::Pause);
    assert_eq!(state.phase(), GamePhase::Paused);
    state.apply_action(GameAction::Pause);
    assert_eq!(state.phase(), GamePhase::Playing);

    hard_drop_until_over(&mut state);
    assert_eq!(state.phase(), GamePhase::GameOver);
    assert!(state.board().filled_count() > 0);

    state.apply_action(GameAction::Retry);
    assert_eq!(state.phase(), GamePhase::Playing);
    assert_eq!(state.board().filled_count(), 0);
    assert_eq!(state.score(), 0);
}

#[test]
fn test_stacking_at_spawn_tops_out() {
    let mut state = started(777);
    let drops = hard_drop_until_over(&mut state);
    assert_eq!(state.phase(), GamePhase::GameOver);
    assert!(drops < 200, "took {} drops", drops);
    assert_eq!(state.lines(), 0);
}

#[test]
fn test_blocked_spawn_at_start_is_game_over() {
    let mut board = Board::new();
    for x in 0..10 {
        board.set(x, 0, Some(PieceKind::Z));
        board.set(x, 1, Some(PieceKind::Z));
    }
    let mut state = GameController::with_options(5, immediate()).with_board(board);
    state.apply_action(GameAction::Confirm);
    assert_eq!(state.phase(), GamePhase::GameOver);
}

#[test]
fn test_hard_drop_ends_where_it_cannot_move_down() {
    let mut state = started(42);
    state.apply_action(GameAction::MoveLeft);
    let ghost = state.ghost().unwrap();
    let kind = state.current().kind;

    state.apply_action(GameAction::HardDrop);

    for (x, y) in ghost.cells() {
        assert_eq!(state.board().get(x, y), Some(Some(kind)));
    }
    let mut below = ghost;
    below.shift(0, 1);
    let blocked = below
        .cells()
        .any(|(x, y)| !ghost.cells().any(|c| c == (x, y)) && !state.board().is_valid(x, y));
    assert!(blocked);
}

#[test]
fn test_first_drop_clears_prepared_row() {
    let seed = 2024;
    let mut state = GameController::with_options(seed, immediate()).with_board(gap_for_first_piece(seed));
    state.apply_action(GameAction::Confirm);

    let placed = state.current();
    state.apply_action(GameAction::HardDrop);

    assert_eq!(state.lines(), 1);
    assert_eq!(state.score(), 100);
    // Only the piece's cells above row 19 remain.
    let leftover = Tetromino::at(placed.kind, 0, 0).cells().count() - 1;
    assert!(state.board().filled_count() <= leftover);
}

#[test]
fn test_hold_then_second_hold_is_rejected() {
    let mut state = started(12345);
    let first = state.current().kind;
    let next = state.next().kind;

    assert!(state.apply_action(GameAction::Hold));
    assert_eq!(state.held(), Some(first));
    assert_eq!(state.current(), Tetromino::new(next));
    assert!(!state.can_hold());

    let before = state.snapshot();
    assert!(!state.apply_action(GameAction::Hold));
    assert_eq!(state.snapshot(), before);

    state.apply_action(GameAction::HardDrop);
    assert!(state.can_hold());
    assert!(state.apply_action(GameAction::Hold));
    assert_eq!(state.current(), Tetromino::new(first));
}

#[test]
fn test_soft_drop_moves_one_row_without_locking() {
    let mut state = started(9);
    let y = state.current().y;
    assert!(state.apply_action(GameAction::SoftDrop));
    assert_eq!(state.current().y, y + 1);

    while state.apply_action(GameAction::SoftDrop) {}
    let resting = state.current();
    assert!(!state.apply_action(GameAction::SoftDrop));
    assert_eq!(state.current(), resting);
    assert_eq!(state.board().filled_count(), 0);

    // Gravity locks it once the interval elapses.
    for _ in 0..state.drop_interval() {
        state.update();
    }
    assert_eq!(state.board().filled_count(), 4);
}

#[test]
fn test_ghost_tracks_moves() {
    let mut state = started(31);
    let before = state.ghost().unwrap();
    assert!(state.apply_action(GameAction::MoveRight));
    let after = state.ghost().unwrap();

    assert_eq!(after.x, before.x + 1);
    assert_eq!(after.kind, state.current().kind);
    assert_eq!(after.rotation, state.current().rotation);
}

#[test]
fn test_same_seed_same_game() {
    let mut a = started(99);
    let mut b = started(99);
    for _ in 0..10 {
        assert_eq!(a.current(), b.current());
        assert_eq!(a.next(), b.next());
        a.apply_action(GameAction::HardDrop);
        b.apply_action(GameAction::HardDrop);
    }
    assert_eq!(a.board(), b.board());
}

#[test]
fn test_new_record_reported_at_game_over() {
    let seed = 2024;
    let mut state = GameController::with_options(seed, immediate())
        .with_board(gap_for_first_piece(seed))
        .with_high_score(50);
    state.apply_action(GameAction::Confirm);
    state.apply_action(GameAction::HardDrop);
    assert_eq!(state.high_score(), 100);

    hard_drop_until_over(&mut state);
    assert_eq!(state.take_new_record(), Some(100));
    assert_eq!(state.take_new_record(), None);

    // The record persists across retries.
    state.apply_action(GameAction::Retry);
    assert_eq!(state.high_score(), 100);
    assert_eq!(state.take_new_record(), None);
}
