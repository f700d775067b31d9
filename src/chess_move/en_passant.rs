use common::bitboard::Square;

use crate::board::color::Color;
use crate::board::error::BoardError;
use crate::board::piece::Piece;
use crate::board::Board;

use super::Capture;

/// A pawn capturing a pawn that just double-pushed past it. The captured pawn
/// is not on the target square but one rank behind it.
#[derive(Clone, PartialEq, Eq)]
pub struct EnPassantChessMove {
    from_square: Square,
    to_square: Square,
}

impl EnPassantChessMove {
    pub fn new(from_square: Square, to_square: Square) -> Self {
        Self {
            from_square,
            to_square,
        }
    }

    pub fn from_square(&self) -> Square {
        self.from_square
    }

    pub fn to_square(&self) -> Square {
        self.to_square
    }

    /// En passant always captures a pawn. A white capture lands on rank 6,
    /// a black capture on rank 3.
    pub fn captures(&self) -> Capture {
        if self.to_square.rank() == 5 {
            (Piece::Pawn, Color::Black)
        } else {
            (Piece::Pawn, Color::White)
        }
    }

    fn captured_square(&self) -> Square {
        Square::from_rank_file(self.from_square.rank(), self.to_square.file())
    }

    pub(super) fn apply(&self, board: &mut Board) -> Result<(), BoardError> {
        let color = match board.get(self.from_square) {
            Some((Piece::Pawn, color)) => color,
            Some(_) => return Err(BoardError::EnPassantNonPawn),
            None => {
                return Err(BoardError::FromSquareEmpty {
                    op: "apply",
                    square: self.from_square,
                })
            }
        };

        let captured_square = self.captured_square();
        match board.get(captured_square) {
            Some((Piece::Pawn, captured_color)) if captured_color == color.opposite() => {}
            _ => {
                return Err(BoardError::UnexpectedCapture {
                    square: captured_square,
                })
            }
        }

        board.remove(self.from_square);
        board.remove(captured_square);
        board.push_en_passant_target(None);
        board.lose_castle_rights(0);
        board.put(self.to_square, Piece::Pawn, color)
    }

    pub(super) fn undo(&self, board: &mut Board) -> Result<(), BoardError> {
        let (piece, color) = board
            .remove(self.to_square)
            .ok_or(BoardError::ToSquareEmpty {
                op: "undo",
                square: self.to_square,
            })?;
        if piece != Piece::Pawn {
            return Err(BoardError::EnPassantNonPawn);
        }

        board.pop_castle_rights();
        board.pop_en_passant_target();

        board.put(self.captured_square(), Piece::Pawn, color.opposite())?;
        board.put(self.from_square, Piece::Pawn, color)
    }
}
