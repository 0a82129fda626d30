use crate::board::{Board, PieceKind, PlayerColor, Square};
use crate::game::ComboState;
use arrayvec::ArrayVec;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Every piece has at most four legal moves in a position (either four jumps
/// or four steps, never a mix), so 64 squares × 4 bounds any board.
pub const MAX_MOVES: usize = 256;

pub const JUMP_DELTAS: [(i8, i8); 4] = [(-2, -2), (-2, 2), (2, -2), (2, 2)];
pub const STEP_DELTAS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

pub type MoveList = ArrayVec<Move, MAX_MOVES>;

/// Destinations reachable by a single piece.
pub type Destinations = SmallVec<[Square; 4]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub is_capture: bool,
}

impl Move {
    pub fn new(from: Square, to: Square, is_capture: bool) -> Self {
        Move {
            from,
            to,
            is_capture,
        }
    }

    /// Square of the jumped piece, if this move is a capture.
    #[inline]
    pub fn captured_square(&self) -> Option<Square> {
        self.is_capture.then(|| self.from.midpoint(self.to))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.is_capture { 'x' } else { '-' };
        write!(
            f,
            "{},{}{}{},{}",
            self.from.row, self.from.col, sep, self.to.row, self.to.col
        )
    }
}

/// Landing square of a jump by `piece` from `from` in direction `delta`, if
/// that jump is a legal capture for `side`: on the board, landing empty,
/// enemy in between, and forward unless `piece` is a king.
#[inline]
pub fn jump_target(
    board: &Board,
    from: Square,
    piece: PieceKind,
    delta: (i8, i8),
    side: PlayerColor,
) -> Option<Square> {
    let (dr, dc) = delta;
    let to = from.offset(dr, dc);
    if !to.in_bounds() || !board.get(to).is_empty() {
        return None;
    }
    if !board.get(from.offset(dr / 2, dc / 2)).is_enemy_of(side) {
        return None;
    }
    piece.can_travel(dr).then_some(to)
}

/// Whether the piece on `sq` (of `side`) has any capture available.
#[inline]
pub fn piece_can_capture(board: &Board, sq: Square, side: PlayerColor) -> bool {
    let piece = board.get(sq);
    JUMP_DELTAS
        .iter()
        .any(|&d| jump_target(board, sq, piece, d, side).is_some())
}

/// Existence probe for mandatory capture: stops at the first capture found.
pub fn has_capture(board: &Board, side: PlayerColor) -> bool {
    board
        .pieces_of(side)
        .any(|sq| piece_can_capture(board, sq, side))
}

/// Core legality check shared by the validator and the generator.
/// `steps_allowed` carries the already-computed "no combo and no capture
/// anywhere" condition so the generator does not repeat the board-wide probe.
fn validate(
    board: &Board,
    from: Square,
    to: Square,
    side: PlayerColor,
    steps_allowed: bool,
) -> Option<Move> {
    if !from.in_bounds() || !to.in_bounds() {
        return None;
    }
    let piece = board.get(from);
    if !piece.belongs_to(side) || !board.get(to).is_empty() {
        return None;
    }

    let dr = to.row - from.row;
    let dc = to.col - from.col;
    match (dr.abs(), dc.abs()) {
        (1, 1) if steps_allowed && piece.can_travel(dr) => Some(Move::new(from, to, false)),
        (2, 2) => {
            jump_target(board, from, piece, (dr, dc), side).map(|to| Move::new(from, to, true))
        }
        _ => None,
    }
}

/// Single-move legality check. Returns the move (with its capture flag) when
/// `from -> to` is legal for `side`.
pub fn is_legal(
    board: &Board,
    combo: ComboState,
    from: Square,
    to: Square,
    side: PlayerColor,
) -> Option<Move> {
    if let Some(pinned) = combo.square() {
        if from != pinned {
            return None;
        }
        return validate(board, from, to, side, false).filter(|m| m.is_capture);
    }
    let steps_allowed = !has_capture(board, side);
    validate(board, from, to, side, steps_allowed)
}

fn push_piece_moves(
    board: &Board,
    from: Square,
    side: PlayerColor,
    must_capture: bool,
    out: &mut impl Extend<Move>,
) {
    for (dr, dc) in JUMP_DELTAS {
        if let Some(m) = validate(board, from, from.offset(dr, dc), side, false) {
            out.extend(Some(m));
        }
    }
    if must_capture {
        return;
    }
    for (dr, dc) in STEP_DELTAS {
        if let Some(m) = validate(board, from, from.offset(dr, dc), side, true) {
            out.extend(Some(m));
        }
    }
}

/// All legal moves for `side`, honoring combo pinning and mandatory capture.
pub fn legal_moves(board: &Board, combo: ComboState, side: PlayerColor) -> MoveList {
    let mut moves = MoveList::new();
    if let Some(pinned) = combo.square() {
        push_piece_moves(board, pinned, side, true, &mut moves);
        return moves;
    }

    let must_capture = has_capture(board, side);
    for from in board.pieces_of(side) {
        push_piece_moves(board, from, side, must_capture, &mut moves);
    }
    moves
}

/// Legal destinations of the piece on `sq`. Empty for squares without a
/// piece of `side`, for pieces pinned by mandatory capture elsewhere, and for
/// anything but the combo piece while a combo is running.
pub fn legal_destinations(
    board: &Board,
    combo: ComboState,
    sq: Square,
    side: PlayerColor,
) -> Destinations {
    let mut out = Destinations::new();
    if !sq.in_bounds() || !board.get(sq).belongs_to(side) {
        return out;
    }
    let must_capture = match combo.square() {
        Some(pinned) if pinned != sq => return out,
        Some(_) => true,
        None => has_capture(board, side),
    };
    let mut moves: SmallVec<[Move; 4]> = SmallVec::new();
    push_piece_moves(board, sq, side, must_capture, &mut moves);
    out.extend(moves.into_iter().map(|m| m.to));
    out
}

/// Destinations grouped by moving piece; pieces with nothing to do are absent.
pub fn destinations_by_piece(
    board: &Board,
    combo: ComboState,
    side: PlayerColor,
) -> FxHashMap<Square, Destinations> {
    let mut map: FxHashMap<Square, Destinations> = FxHashMap::default();
    for m in legal_moves(board, combo, side) {
        map.entry(m.from).or_default().push(m.to);
    }
    map
}
