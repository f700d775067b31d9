use common::bitboard::{square, Square};

use crate::board::castle_rights::CastleRightsBitmask;
use crate::board::color::Color;
use crate::board::error::BoardError;
use crate::board::piece::Piece;
use crate::board::Board;

use super::Capture;

/// A pawn reaching the final rank and converting into a stronger piece,
/// optionally capturing on the promotion square.
#[derive(Clone, PartialEq, Eq)]
pub struct PawnPromotionChessMove {
    from_square: Square,
    to_square: Square,
    capture: Option<Capture>,
    promote_to: Piece,
}

impl PawnPromotionChessMove {
    pub fn new(
        from_square: Square,
        to_square: Square,
        capture: Option<Capture>,
        promote_to: Piece,
    ) -> Self {
        Self {
            from_square,
            to_square,
            capture,
            promote_to,
        }
    }

    pub fn from_square(&self) -> Square {
        self.from_square
    }

    pub fn to_square(&self) -> Square {
        self.to_square
    }

    pub fn captures(&self) -> Option<Capture> {
        self.capture
    }

    pub fn promote_to_piece(&self) -> Piece {
        self.promote_to
    }

    pub(super) fn apply(&self, board: &mut Board) -> Result<(), BoardError> {
        if board.get(self.to_square) != self.capture {
            return Err(BoardError::UnexpectedCapture {
                square: self.to_square,
            });
        }
        match board.get(self.from_square) {
            Some((Piece::Pawn, _)) => {}
            _ => return Err(BoardError::PromotionNonPawn),
        }

        let (_, color) = board
            .remove(self.from_square)
            .ok_or(BoardError::FromSquareEmpty {
                op: "apply",
                square: self.from_square,
            })?;

        board.push_en_passant_target(None);

        let captured = board.remove(self.to_square);
        let mut lost_rights: CastleRightsBitmask = 0;
        if let Some((Piece::Rook, captured_color)) = captured {
            lost_rights |= rook_home_rights(captured_color, self.to_square);
        }
        board.lose_castle_rights(lost_rights);

        board.put(self.to_square, self.promote_to, color)
    }

    pub(super) fn undo(&self, board: &mut Board) -> Result<(), BoardError> {
        let (_, color) = board
            .remove(self.to_square)
            .ok_or(BoardError::ToSquareEmpty {
                op: "undo",
                square: self.to_square,
            })?;

        if let Some((captured_piece, captured_color)) = self.capture {
            board.put(self.to_square, captured_piece, captured_color)?;
        }

        board.pop_castle_rights();
        board.pop_en_passant_target();

        board.put(self.from_square, Piece::Pawn, color)
    }
}

fn rook_home_rights(color: Color, square: Square) -> CastleRightsBitmask {
    use crate::board::castle_rights::{
        BLACK_KINGSIDE_RIGHTS, BLACK_QUEENSIDE_RIGHTS, WHITE_KINGSIDE_RIGHTS,
        WHITE_QUEENSIDE_RIGHTS,
    };
    match (color, square) {
        (Color::White, square::A1) => WHITE_QUEENSIDE_RIGHTS,
        (Color::White, square::H1) => WHITE_KINGSIDE_RIGHTS,
        (Color::Black, square::A8) => BLACK_QUEENSIDE_RIGHTS,
        (Color::Black, square::H8) => BLACK_KINGSIDE_RIGHTS,
        _ => 0,
    }
}
