use common::bitboard::{square, Square};

use crate::board::castle_rights::{
    BLACK_KINGSIDE_RIGHTS, BLACK_QUEENSIDE_RIGHTS, WHITE_KINGSIDE_RIGHTS, WHITE_QUEENSIDE_RIGHTS,
};
use crate::board::color::Color;
use crate::board::error::BoardError;
use crate::board::piece::Piece;
use crate::board::Board;

/// The king moving two squares towards a rook, with the rook jumping to the
/// square the king crossed. Identified by the king's from and to squares.
#[derive(Clone, PartialEq, Eq)]
pub struct CastleChessMove {
    from_square: Square,
    to_square: Square,
}

impl CastleChessMove {
    pub fn castle_kingside(color: Color) -> Self {
        match color {
            Color::White => Self {
                from_square: square::E1,
                to_square: square::G1,
            },
            Color::Black => Self {
                from_square: square::E8,
                to_square: square::G8,
            },
        }
    }

    pub fn castle_queenside(color: Color) -> Self {
        match color {
            Color::White => Self {
                from_square: square::E1,
                to_square: square::C1,
            },
            Color::Black => Self {
                from_square: square::E8,
                to_square: square::C8,
            },
        }
    }

    pub fn from_square(&self) -> Square {
        self.from_square
    }

    pub fn to_square(&self) -> Square {
        self.to_square
    }

    fn is_kingside(&self) -> bool {
        self.to_square.file() == 6
    }

    fn rook_squares(&self) -> (Square, Square) {
        let rank = self.from_square.rank();
        if self.is_kingside() {
            (Square::from_rank_file(rank, 7), Square::from_rank_file(rank, 5))
        } else {
            (Square::from_rank_file(rank, 0), Square::from_rank_file(rank, 3))
        }
    }

    pub(super) fn apply(&self, board: &mut Board) -> Result<(), BoardError> {
        let color = match board.get(self.from_square) {
            Some((Piece::King, color)) => color,
            Some(_) => return Err(BoardError::CastleNonKing),
            None => {
                return Err(BoardError::FromSquareEmpty {
                    op: "apply",
                    square: self.from_square,
                })
            }
        };

        let (rook_from, rook_to) = self.rook_squares();
        match board.get(rook_from) {
            Some((Piece::Rook, rook_color)) if rook_color == color => {}
            _ => return Err(BoardError::CastleRookMissing { square: rook_from }),
        }

        board.remove(self.from_square);
        board.remove(rook_from);

        board.push_en_passant_target(None);
        let lost_rights = match color {
            Color::White => WHITE_KINGSIDE_RIGHTS | WHITE_QUEENSIDE_RIGHTS,
            Color::Black => BLACK_KINGSIDE_RIGHTS | BLACK_QUEENSIDE_RIGHTS,
        };
        board.lose_castle_rights(lost_rights);

        board.put(self.to_square, Piece::King, color)?;
        board.put(rook_to, Piece::Rook, color)
    }

    pub(super) fn undo(&self, board: &mut Board) -> Result<(), BoardError> {
        let color = match board.get(self.to_square) {
            Some((Piece::King, color)) => color,
            Some(_) => return Err(BoardError::CastleNonKing),
            None => {
                return Err(BoardError::ToSquareEmpty {
                    op: "undo",
                    square: self.to_square,
                })
            }
        };

        let (rook_from, rook_to) = self.rook_squares();
        board.remove(self.to_square);
        board
            .remove(rook_to)
            .ok_or(BoardError::CastleRookMissing { square: rook_to })?;

        board.pop_castle_rights();
        board.pop_en_passant_target();

        board.put(self.from_square, Piece::King, color)?;
        board.put(rook_from, Piece::Rook, color)
    }
}
