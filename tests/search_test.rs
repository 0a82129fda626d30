use hydrodraughts_wasm::board::{Board, PieceKind, PlayerColor, Square};
use hydrodraughts_wasm::evaluation::evaluate;
use hydrodraughts_wasm::game::GameState;
use hydrodraughts_wasm::moves::Move;
use hydrodraughts_wasm::scenarios::load_scenario;
use hydrodraughts_wasm::search::{
    SearchLimits, WIN_BOUND, best_move, search_with_limits,
};

fn sq(row: i8, col: i8) -> Square {
    Square::new(row, col)
}

fn game_with(pieces: &[(i8, i8, PieceKind)], turn: PlayerColor) -> GameState {
    let mut board = Board::new();
    for &(r, c, p) in pieces {
        board.set(Square::new(r, c), p);
    }
    GameState::from_board(board, turn)
}

#[test]
fn engine_takes_the_winning_capture() {
    let mut game = load_scenario(11).expect("scenario 11");
    let m = best_move(&mut game, PlayerColor::Black, 3);
    assert_eq!(m, Some(Move::new(sq(2, 3), sq(4, 5), true)));
}

#[test]
fn immediate_capture_beats_quiet_moves() {
    // White has quiet moves with the king elsewhere, but the capture is
    // mandatory and must be the engine's choice.
    let mut game = game_with(
        &[
            (5, 2, PieceKind::WhiteMan),
            (4, 3, PieceKind::BlackMan),
            (7, 6, PieceKind::WhiteKing),
            (0, 1, PieceKind::BlackMan),
        ],
        PlayerColor::White,
    );
    let m = best_move(&mut game, PlayerColor::White, 4).expect("a move");
    assert!(m.is_capture);
    assert_eq!(m, Move::new(sq(5, 2), sq(3, 4), true));
}

#[test]
fn multi_capture_consumes_one_depth_unit() {
    let mut game = load_scenario(2).expect("scenario 2");
    let result = search_with_limits(&mut game, PlayerColor::White, 1, SearchLimits::NONE, true);
    assert_eq!(result.best_move, Some(Move::new(sq(5, 2), sq(3, 4), true)));
    // One node for the continuation from (3,4), one leaf after the second
    // jump. Counting the first jump as a whole turn would stop at one node.
    assert_eq!(result.nodes, 2);

    // The leaf is the position after both jumps, with black to move.
    let mut after = game.clone();
    assert!(after.attempt_move(sq(5, 2), sq(3, 4), PlayerColor::White).combo_continues);
    assert!(!after.attempt_move(sq(3, 4), sq(1, 2), PlayerColor::White).combo_continues);
    assert_eq!(result.score, evaluate(&after.board));
}

#[test]
fn engine_finishes_a_combo_it_started() {
    let mut game = load_scenario(2).expect("scenario 2");
    let first = game.play_engine_turn(2).expect("first jump");
    assert_eq!(first, Move::new(sq(5, 2), sq(3, 4), true));
    assert!(game.combo().is_active());
    assert_eq!(game.turn, PlayerColor::White);

    let second = game.play_engine_turn(2).expect("second jump");
    assert_eq!(second, Move::new(sq(3, 4), sq(1, 2), true));
    assert!(!game.combo().is_active());
    assert_eq!(game.turn, PlayerColor::Black);
}

#[test]
fn search_is_side_symmetric() {
    // Mirror scenario 11 for white: same capture, opposite sign.
    let mut game = game_with(
        &[(5, 4, PieceKind::WhiteMan), (4, 3, PieceKind::BlackMan)],
        PlayerColor::White,
    );
    let result = search_with_limits(&mut game, PlayerColor::White, 3, SearchLimits::NONE, true);
    assert_eq!(result.best_move, Some(Move::new(sq(5, 4), sq(3, 2), true)));
    assert!(result.score > WIN_BOUND);

    let mut mirrored = load_scenario(11).expect("scenario 11");
    let black = search_with_limits(&mut mirrored, PlayerColor::Black, 3, SearchLimits::NONE, true);
    assert_eq!(black.score, -result.score);
}

#[test]
fn stuck_side_gets_no_move() {
    let mut game = game_with(&[(4, 4, PieceKind::WhiteMan)], PlayerColor::Black);
    assert_eq!(best_move(&mut game, PlayerColor::Black, 5), None);
}

#[test]
fn self_play_runs_to_completion_without_corrupting_state() {
    let mut game = GameState::new_game();
    for _ in 0..200 {
        if game.is_game_over() {
            break;
        }
        let side = game.turn;
        let pieces_before = game.board.count(side.opponent());
        let m = game.play_engine_turn(2).expect("side has moves");
        if m.is_capture {
            assert_eq!(game.board.count(side.opponent()), pieces_before - 1);
        }
        assert!(game.board.count(PlayerColor::White) <= 12);
        assert!(game.board.count(PlayerColor::Black) <= 12);
    }
}

#[test]
fn deeper_search_still_returns_legal_moves() {
    let mut game = GameState::new_game();
    for depth in 1..=6 {
        let m = best_move(&mut game, PlayerColor::White, depth).expect("opening move");
        assert!(game.is_legal(m.from, m.to, PlayerColor::White).is_some());
    }
}
