use crate::board::{Board, PieceKind, PlayerColor, Square};
use crate::moves::{
    self, Destinations, JUMP_DELTAS, Move, MoveList, destinations_by_piece, jump_target,
};
use crate::search;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A capture chain in progress. While active, only the piece on the combo
/// square may move, and only by capturing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ComboState {
    square: Option<Square>,
}

impl ComboState {
    pub const NONE: ComboState = ComboState { square: None };

    #[inline]
    pub fn at(sq: Square) -> Self {
        ComboState { square: Some(sq) }
    }

    #[inline]
    pub fn is_active(self) -> bool {
        self.square.is_some()
    }

    #[inline]
    pub fn square(self) -> Option<Square> {
        self.square
    }
}

/// Everything needed to reverse one `apply_move`. Consumed by `undo_move`;
/// records must be undone in reverse order of creation.
#[must_use = "a move record must be passed back to undo_move"]
#[derive(Debug)]
pub struct MoveRecord {
    mv: Move,
    moved_piece: PieceKind,
    captured: Option<(Square, PieceKind)>,
    prev_combo: ComboState,
    prev_selection: Option<Square>,
}

impl MoveRecord {
    pub fn captured(&self) -> Option<(Square, PieceKind)> {
        self.captured
    }
}

/// Result of a move attempted through the committed-game path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub committed: bool,
    /// True while the same piece still has to keep capturing.
    pub combo_continues: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    pub turn: PlayerColor,
    combo: ComboState,
    selection: Option<Square>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}

impl GameState {
    /// Standard opening position, white to move.
    pub fn new_game() -> Self {
        Self::from_board(Board::standard(), PlayerColor::White)
    }

    pub fn from_board(board: Board, turn: PlayerColor) -> Self {
        GameState {
            board,
            turn,
            combo: ComboState::NONE,
            selection: None,
        }
    }

    #[inline]
    pub fn combo(&self) -> ComboState {
        self.combo
    }

    #[inline]
    pub fn selection(&self) -> Option<Square> {
        self.selection
    }

    pub fn legal_moves(&self, side: PlayerColor) -> MoveList {
        moves::legal_moves(&self.board, self.combo, side)
    }

    pub fn legal_destinations(&self, sq: Square, side: PlayerColor) -> Destinations {
        moves::legal_destinations(&self.board, self.combo, sq, side)
    }

    pub fn is_legal(&self, from: Square, to: Square, side: PlayerColor) -> Option<Move> {
        moves::is_legal(&self.board, self.combo, from, to, side)
    }

    pub fn has_capture(&self, side: PlayerColor) -> bool {
        moves::has_capture(&self.board, side)
    }

    pub fn side_has_any_legal_move(&self, side: PlayerColor) -> bool {
        !self.legal_moves(side).is_empty()
    }

    /// The side to move is stuck (no pieces or no moves).
    pub fn is_game_over(&self) -> bool {
        !self.side_has_any_legal_move(self.turn)
    }

    /// Pieces of `side` that have somewhere to go, with their destinations.
    pub fn selectable_pieces(&self, side: PlayerColor) -> FxHashMap<Square, Destinations> {
        destinations_by_piece(&self.board, self.combo, side)
    }

    /// Select the piece on `sq` for the side to move. Refused for pieces with
    /// no legal destination, which covers pieces pinned by mandatory capture
    /// and anything but the combo piece mid-chain.
    pub fn select(&mut self, sq: Square) -> bool {
        if self.legal_destinations(sq, self.turn).is_empty() {
            return false;
        }
        self.selection = Some(sq);
        true
    }

    /// Drop the current selection. A combo keeps its piece selected.
    pub fn deselect(&mut self) {
        self.selection = self.combo.square();
    }

    /// Destinations of the selected piece, recomputed from the position.
    pub fn possible_moves(&self) -> Destinations {
        self.selection
            .map(|sq| self.legal_destinations(sq, self.turn))
            .unwrap_or_default()
    }

    /// Apply a legal move for `side` and return the record that reverses it.
    pub fn apply_move(&mut self, m: Move, side: PlayerColor) -> MoveRecord {
        let moved_piece = self.board.get(m.from);
        debug_assert!(moved_piece.belongs_to(side), "moving {:?} for {:?}", moved_piece, side);
        debug_assert!(self.board.get(m.to).is_empty(), "destination of {} is occupied", m);

        let mut record = MoveRecord {
            mv: m,
            moved_piece,
            captured: None,
            prev_combo: self.combo,
            prev_selection: self.selection,
        };

        self.board.set(m.from, PieceKind::Empty);

        if let Some(mid) = m.captured_square() {
            let victim = self.board.get(mid);
            debug_assert!(victim.is_enemy_of(side), "capture {} jumps {:?}", m, victim);
            record.captured = Some((mid, victim));
            self.board.set(mid, PieceKind::Empty);
        }

        // Promotion lands before the continuation probe so a fresh king can
        // keep capturing backward in the same chain.
        let landed = moved_piece.promoted_at(m.to.row);
        self.board.set(m.to, landed);

        let continues = m.is_capture
            && JUMP_DELTAS
                .iter()
                .any(|&d| jump_target(&self.board, m.to, landed, d, side).is_some());

        if continues {
            self.combo = ComboState::at(m.to);
            self.selection = Some(m.to);
        } else {
            self.combo = ComboState::NONE;
            self.selection = None;
        }

        record
    }

    /// Exact inverse of the `apply_move` that produced `record`.
    pub fn undo_move(&mut self, record: MoveRecord) {
        let m = record.mv;
        debug_assert!(
            self.board.get(m.to) == record.moved_piece
                || self.board.get(m.to) == record.moved_piece.promoted_at(m.to.row),
            "undo of {} against mismatched board",
            m
        );
        debug_assert!(self.board.get(m.from).is_empty(), "undo of {}: source occupied", m);

        self.board.set(m.to, PieceKind::Empty);
        self.board.set(m.from, record.moved_piece);

        if let Some((sq, piece)) = record.captured {
            debug_assert!(self.board.get(sq).is_empty(), "undo of {}: captured square occupied", m);
            self.board.set(sq, piece);
        }

        self.combo = record.prev_combo;
        self.selection = record.prev_selection;
    }

    /// Committed-game path: validate and play `from -> to` for `side`. The
    /// turn passes to the opponent once no combo continues. Illegal attempts
    /// leave the game untouched and report whether a combo is still pending.
    pub fn attempt_move(&mut self, from: Square, to: Square, side: PlayerColor) -> MoveOutcome {
        let legal = if side == self.turn {
            self.is_legal(from, to, side)
        } else {
            None
        };

        let Some(m) = legal else {
            return MoveOutcome {
                committed: false,
                combo_continues: self.combo.is_active(),
            };
        };

        let _committed = self.apply_move(m, side);
        self.commit_turn(side)
    }

    fn commit_turn(&mut self, side: PlayerColor) -> MoveOutcome {
        let combo_continues = self.combo.is_active();
        if !combo_continues {
            self.turn = side.opponent();
        }
        MoveOutcome {
            committed: true,
            combo_continues,
        }
    }

    /// Let the engine play one move for the side to move at `depth`. Mid-combo
    /// the search root only holds the pinned piece's captures, so calling this
    /// repeatedly finishes the chain. Returns `None` when the side is stuck.
    pub fn play_engine_turn(&mut self, depth: u32) -> Option<Move> {
        let side = self.turn;
        let m = search::best_move(self, side, depth)?;
        let _committed = self.apply_move(m, side);
        self.commit_turn(side);
        Some(m)
    }

    /// Count move sequences `depth` turns deep. A combo continuation stays on
    /// the same turn, exactly as the search counts depth.
    pub fn perft(&mut self, depth: u32) -> u64 {
        let side = self.turn;
        self.perft_side(depth, side)
    }

    fn perft_side(&mut self, depth: u32, side: PlayerColor) -> u64 {
        if depth == 0 {
            return 1;
        }

        let mut nodes = 0;
        for m in self.legal_moves(side) {
            let record = self.apply_move(m, side);
            nodes += if self.combo.is_active() {
                self.perft_side(depth, side)
            } else {
                self.perft_side(depth - 1, side.opponent())
            };
            self.undo_move(record);
        }
        nodes
    }
}
