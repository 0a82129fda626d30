use serde::{Deserialize, Serialize};

pub const BOARD_SIZE: i8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerColor {
    White,
    Black,
}

impl PlayerColor {
    #[inline]
    pub fn opponent(self) -> Self {
        match self {
            PlayerColor::White => PlayerColor::Black,
            PlayerColor::Black => PlayerColor::White,
        }
    }

    /// Row delta of a forward step: white advances toward row 0, black toward row 7.
    #[inline]
    pub fn forward(self) -> i8 {
        match self {
            PlayerColor::White => -1,
            PlayerColor::Black => 1,
        }
    }

    /// Row on which a man of this color is promoted.
    #[inline]
    pub fn promotion_row(self) -> i8 {
        match self {
            PlayerColor::White => 0,
            PlayerColor::Black => BOARD_SIZE - 1,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "w" | "white" | "White" => Some(PlayerColor::White),
            "b" | "black" | "Black" => Some(PlayerColor::Black),
            _ => None,
        }
    }

    pub fn to_str(self) -> &'static str {
        match self {
            PlayerColor::White => "w",
            PlayerColor::Black => "b",
        }
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PieceKind {
    #[default]
    Empty,
    WhiteMan,
    WhiteKing,
    BlackMan,
    BlackKing,
}

impl PieceKind {
    #[inline]
    pub fn is_empty(self) -> bool {
        self == PieceKind::Empty
    }

    #[inline]
    pub fn is_king(self) -> bool {
        matches!(self, PieceKind::WhiteKing | PieceKind::BlackKing)
    }

    #[inline]
    pub fn color(self) -> Option<PlayerColor> {
        match self {
            PieceKind::Empty => None,
            PieceKind::WhiteMan | PieceKind::WhiteKing => Some(PlayerColor::White),
            PieceKind::BlackMan | PieceKind::BlackKing => Some(PlayerColor::Black),
        }
    }

    #[inline]
    pub fn belongs_to(self, side: PlayerColor) -> bool {
        self.color() == Some(side)
    }

    /// True for a piece of the side opposing `side`; empty squares are never enemies.
    #[inline]
    pub fn is_enemy_of(self, side: PlayerColor) -> bool {
        self.color() == Some(side.opponent())
    }

    /// The kind this piece becomes on reaching `row`. Kings and men short of
    /// their far rank are returned unchanged.
    #[inline]
    pub fn promoted_at(self, row: i8) -> Self {
        match self {
            PieceKind::WhiteMan if row == PlayerColor::White.promotion_row() => {
                PieceKind::WhiteKing
            }
            PieceKind::BlackMan if row == PlayerColor::Black.promotion_row() => {
                PieceKind::BlackKing
            }
            other => other,
        }
    }

    /// Whether this piece may travel with row delta `dr` (sign only matters).
    /// Kings go anywhere; men only forward.
    #[inline]
    pub fn can_travel(self, dr: i8) -> bool {
        match self {
            PieceKind::Empty => false,
            PieceKind::WhiteKing | PieceKind::BlackKing => true,
            PieceKind::WhiteMan => dr < 0,
            PieceKind::BlackMan => dr > 0,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            PieceKind::WhiteMan => 'o',
            PieceKind::WhiteKing => 'O',
            PieceKind::BlackMan => 'x',
            PieceKind::BlackKing => 'X',
            PieceKind::Empty => '.',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'o' => Some(PieceKind::WhiteMan),
            'O' => Some(PieceKind::WhiteKing),
            'x' => Some(PieceKind::BlackMan),
            'X' => Some(PieceKind::BlackKing),
            '.' => Some(PieceKind::Empty),
            _ => None,
        }
    }
}

/// A board coordinate. Stored signed so that probes off the edge of the board
/// are representable and can be rejected by `in_bounds`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    pub row: i8,
    pub col: i8,
}

impl Square {
    #[inline]
    pub const fn new(row: i8, col: i8) -> Self {
        Square { row, col }
    }

    #[inline]
    pub fn in_bounds(self) -> bool {
        self.row >= 0 && self.row < BOARD_SIZE && self.col >= 0 && self.col < BOARD_SIZE
    }

    #[inline]
    pub fn offset(self, dr: i8, dc: i8) -> Self {
        Square::new(self.row + dr, self.col + dc)
    }

    /// Square halfway between `self` and `other`; only meaningful for jumps.
    #[inline]
    pub fn midpoint(self, other: Square) -> Self {
        Square::new((self.row + other.row) / 2, (self.col + other.col) / 2)
    }

    /// Index into a row-major 64-entry array. Callers check `in_bounds` first.
    #[inline]
    pub fn index(self) -> usize {
        debug_assert!(self.in_bounds(), "square {:?} is off the board", self);
        (self.row as usize) * (BOARD_SIZE as usize) + self.col as usize
    }
}
