use crate::board::{Board, PieceKind, PlayerColor, Square};
use crate::moves::JUMP_DELTAS;

pub const MAN_VALUE: i32 = 100;
pub const KING_VALUE: i32 = 200;
pub const THREAT_PENALTY: i32 = 200;

#[inline]
pub fn get_piece_value(piece: PieceKind) -> i32 {
    match piece {
        PieceKind::Empty => 0,
        PieceKind::WhiteMan | PieceKind::BlackMan => MAN_VALUE,
        PieceKind::WhiteKing | PieceKind::BlackKing => KING_VALUE,
    }
}

/// Coarse threat probe: an enemy on an adjacent diagonal with an empty
/// square right behind it, in any of the four directions. Ignores whose turn
/// it is and every mandatory-capture constraint on the rest of the board.
pub fn can_be_captured(board: &Board, sq: Square, color: PlayerColor) -> bool {
    JUMP_DELTAS.iter().any(|&(dr, dc)| {
        let beyond = sq.offset(dr, dc);
        beyond.in_bounds()
            && board.get(sq.offset(dr / 2, dc / 2)).is_enemy_of(color)
            && board.get(beyond).is_empty()
    })
}

/// Static score of the position. Positive favors white.
pub fn evaluate(board: &Board) -> i32 {
    board
        .pieces()
        .map(|(sq, piece)| {
            let Some(color) = piece.color() else {
                return 0;
            };
            let mut value = get_piece_value(piece);
            if can_be_captured(board, sq, color) {
                value -= THREAT_PENALTY;
            }
            match color {
                PlayerColor::White => value,
                PlayerColor::Black => -value,
            }
        })
        .sum()
}

/// Material only, no threat penalty. Positive favors white.
pub fn calculate_material(board: &Board) -> i32 {
    board
        .pieces()
        .map(|(_, piece)| match piece.color() {
            Some(PlayerColor::White) => get_piece_value(piece),
            Some(PlayerColor::Black) => -get_piece_value(piece),
            None => 0,
        })
        .sum()
}
