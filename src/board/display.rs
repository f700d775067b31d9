use std::fmt;

use common::bitboard::Square;

use super::Board;

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} |", rank + 1)?;
            for file in 0..8u8 {
                let square = Square::from_rank_file(rank, file);
                let square_char = match self.get(square) {
                    Some((piece, color)) => piece.to_fen_char(color),
                    None => '.',
                };
                write!(f, " {}", square_char)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  +----------------")?;
        writeln!(f, "    a b c d e f g h")
    }
}

/// Builds a `Board` from a picture of the position, given from white's
/// perspective with rank 8 on the first row:
///
/// ```ignore
/// let board = chess_position! {
///     ....k...
///     ........
///     ........
///     ........
///     ........
///     ........
///     ....P...
///     ....K...
/// };
/// ```
///
/// `Board`, `Piece` and `Color` must be in scope at the call site.
#[macro_export]
macro_rules! chess_position {
    ($($square:tt)*) => {{
        let mut board = Board::new();
        let squares: Vec<char> = stringify!($($square)*)
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        assert_eq!(
            squares.len(),
            64,
            "chess_position! expects 64 squares, got {}",
            squares.len()
        );
        for (i, &square_char) in squares.iter().enumerate() {
            if square_char == '.' {
                continue;
            }
            let (piece, color) = match square_char {
                'P' => (Piece::Pawn, Color::White),
                'N' => (Piece::Knight, Color::White),
                'B' => (Piece::Bishop, Color::White),
                'R' => (Piece::Rook, Color::White),
                'Q' => (Piece::Queen, Color::White),
                'K' => (Piece::King, Color::White),
                'p' => (Piece::Pawn, Color::Black),
                'n' => (Piece::Knight, Color::Black),
                'b' => (Piece::Bishop, Color::Black),
                'r' => (Piece::Rook, Color::Black),
                'q' => (Piece::Queen, Color::Black),
                'k' => (Piece::King, Color::Black),
                other => panic!("invalid character in chess position: {}", other),
            };
            // The first row of the picture is rank 8, so the row index is
            // flipped to map onto square indices that start at a1.
            let row = i / 8;
            let file = (i % 8) as u8;
            let rank = 7 - (row as u8);
            let square = common::bitboard::Square::from_rank_file(rank, file);
            board.put(square, piece, color).unwrap();
        }
        board
    }};
}
