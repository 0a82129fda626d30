use std::fmt;

pub use crate::pieces::{BOARD_SIZE, PieceKind, PlayerColor, Square};

/// The 8×8 grid. Row 0 is black's back rank, row 7 is white's.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [PieceKind; 64],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// An empty board.
    pub fn new() -> Self {
        Board {
            squares: [PieceKind::Empty; 64],
        }
    }

    /// Standard opening layout: twelve men per side on the dark squares of
    /// the three rows nearest each player.
    pub fn standard() -> Self {
        let mut board = Board::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if (row + col) % 2 == 0 {
                    continue;
                }
                let sq = Square::new(row, col);
                if row < 3 {
                    board.set(sq, PieceKind::BlackMan);
                } else if row >= BOARD_SIZE - 3 {
                    board.set(sq, PieceKind::WhiteMan);
                }
            }
        }
        board
    }

    /// Piece on `sq`, or `Empty` for squares off the board.
    #[inline]
    pub fn get(&self, sq: Square) -> PieceKind {
        if !sq.in_bounds() {
            return PieceKind::Empty;
        }
        self.squares[sq.index()]
    }

    #[inline]
    pub fn set(&mut self, sq: Square, piece: PieceKind) {
        self.squares[sq.index()] = piece;
    }

    /// Every occupied square in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, PieceKind)> + '_ {
        self.squares.iter().enumerate().filter_map(|(i, &p)| {
            if p.is_empty() {
                None
            } else {
                let i = i as i8;
                Some((Square::new(i / BOARD_SIZE, i % BOARD_SIZE), p))
            }
        })
    }

    /// Squares holding a piece of `side`, in row-major order.
    pub fn pieces_of(&self, side: PlayerColor) -> impl Iterator<Item = Square> + '_ {
        self.pieces()
            .filter(move |(_, p)| p.belongs_to(side))
            .map(|(sq, _)| sq)
    }

    pub fn count(&self, side: PlayerColor) -> usize {
        self.pieces_of(side).count()
    }

    /// Parse eight lines of `o O x X .` (row 0 first). Whitespace around
    /// lines is ignored.
    pub fn from_rows(text: &str) -> Option<Self> {
        let mut board = Board::new();
        let mut rows = 0;
        for (row, line) in text.lines().map(str::trim).filter(|l| !l.is_empty()).enumerate() {
            if row >= BOARD_SIZE as usize {
                return None;
            }
            let cells: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if cells.len() != BOARD_SIZE as usize {
                return None;
            }
            for (col, c) in cells.into_iter().enumerate() {
                board.set(Square::new(row as i8, col as i8), PieceKind::from_char(c)?);
            }
            rows += 1;
        }
        (rows == BOARD_SIZE as usize).then_some(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", self.get(Square::new(row, col)).to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_layout_has_twelve_per_side() {
        let board = Board::standard();
        assert_eq!(board.count(PlayerColor::White), 12);
        assert_eq!(board.count(PlayerColor::Black), 12);
        assert_eq!(board.get(Square::new(0, 1)), PieceKind::BlackMan);
        assert_eq!(board.get(Square::new(7, 0)), PieceKind::WhiteMan);
        assert_eq!(board.get(Square::new(0, 0)), PieceKind::Empty);
        for (sq, _) in board.pieces() {
            assert_eq!((sq.row + sq.col) % 2, 1);
            assert!(!(3..5).contains(&sq.row));
        }
    }

    #[test]
    fn display_and_parse_agree() {
        let board = Board::standard();
        let text = board.to_string();
        assert_eq!(Board::from_rows(&text), Some(board));
    }

    #[test]
    fn off_board_reads_as_empty() {
        let board = Board::standard();
        assert_eq!(board.get(Square::new(-1, 0)), PieceKind::Empty);
        assert_eq!(board.get(Square::new(2, 9)), PieceKind::Empty);
    }
}
