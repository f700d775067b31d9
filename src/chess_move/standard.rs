use common::bitboard::{square, Square};

use crate::board::castle_rights::{
    CastleRightsBitmask, BLACK_KINGSIDE_RIGHTS, BLACK_QUEENSIDE_RIGHTS, WHITE_KINGSIDE_RIGHTS,
    WHITE_QUEENSIDE_RIGHTS,
};
use crate::board::color::Color;
use crate::board::error::BoardError;
use crate::board::piece::Piece;
use crate::board::Board;

use super::Capture;

/// A move of one piece from one square to another, optionally capturing the
/// occupant of the target square. Castling, en passant and promotions are
/// separate move types.
#[derive(Clone, PartialEq, Eq)]
pub struct StandardChessMove {
    from_square: Square,
    to_square: Square,
    capture: Option<Capture>,
}

impl StandardChessMove {
    pub fn new(from_square: Square, to_square: Square, capture: Option<Capture>) -> Self {
        Self {
            from_square,
            to_square,
            capture,
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

    pub(super) fn apply(&self, board: &mut Board) -> Result<(), BoardError> {
        if board.get(self.to_square) != self.capture {
            return Err(BoardError::UnexpectedCapture {
                square: self.to_square,
            });
        }

        let (piece, color) = board
            .remove(self.from_square)
            .ok_or(BoardError::FromSquareEmpty {
                op: "apply",
                square: self.from_square,
            })?;

        // A pawn double push exposes the skipped square to en passant.
        let en_passant_target = if piece == Piece::Pawn && self.is_double_push(color) {
            Some(Square::from_rank_file(
                (self.from_square.rank() + self.to_square.rank()) / 2,
                self.from_square.file(),
            ))
        } else {
            None
        };
        board.push_en_passant_target(en_passant_target);

        let captured = board.remove(self.to_square);

        let mut lost_rights = rights_lost_by_moving(piece, color, self.from_square);
        if let Some((Piece::Rook, captured_color)) = captured {
            lost_rights |= rights_lost_by_rook_capture(captured_color, self.to_square);
        }
        board.lose_castle_rights(lost_rights);

        board.put(self.to_square, piece, color)
    }

    pub(super) fn undo(&self, board: &mut Board) -> Result<(), BoardError> {
        let (piece, color) = board
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

        board.put(self.from_square, piece, color)
    }

    fn is_double_push(&self, color: Color) -> bool {
        match color {
            Color::White => self.from_square.rank() == 1 && self.to_square.rank() == 3,
            Color::Black => self.from_square.rank() == 6 && self.to_square.rank() == 4,
        }
    }
}

fn rights_lost_by_moving(piece: Piece, color: Color, from_square: Square) -> CastleRightsBitmask {
    match (piece, color, from_square) {
        (Piece::Rook, Color::White, square::A1) => WHITE_QUEENSIDE_RIGHTS,
        (Piece::Rook, Color::White, square::H1) => WHITE_KINGSIDE_RIGHTS,
        (Piece::Rook, Color::Black, square::A8) => BLACK_QUEENSIDE_RIGHTS,
        (Piece::Rook, Color::Black, square::H8) => BLACK_KINGSIDE_RIGHTS,
        (Piece::King, Color::White, square::E1) => WHITE_KINGSIDE_RIGHTS | WHITE_QUEENSIDE_RIGHTS,
        (Piece::King, Color::Black, square::E8) => BLACK_KINGSIDE_RIGHTS | BLACK_QUEENSIDE_RIGHTS,
        _ => 0,
    }
}

fn rights_lost_by_rook_capture(color: Color, to_square: Square) -> CastleRightsBitmask {
    match (color, to_square) {
        (Color::White, square::A1) => WHITE_QUEENSIDE_RIGHTS,
        (Color::White, square::H1) => WHITE_KINGSIDE_RIGHTS,
        (Color::Black, square::A8) => BLACK_QUEENSIDE_RIGHTS,
        (Color::Black, square::H8) => BLACK_KINGSIDE_RIGHTS,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::castle_rights::ALL_CASTLE_RIGHTS;
    use crate::std_move;
    use common::bitboard::square::*;

    #[test]
    fn test_apply_and_undo_restores_the_board() {
        let mut board = Board::starting_position();
        let original_fen = board.to_fen();

        let chess_move = std_move!(E2, E4);
        chess_move.apply(&mut board).unwrap();
        assert_eq!(board.get(E4), Some((Piece::Pawn, Color::White)));
        assert_eq!(board.get(E2), None);
        assert_eq!(board.peek_en_passant_target(), Some(E3));

        chess_move.undo(&mut board).unwrap();
        assert_eq!(original_fen, board.to_fen());
    }

    #[test]
    fn test_capture_and_undo_restores_the_piece() {
        let mut board = Board::new();
        board.put(D4, Piece::Pawn, Color::White).unwrap();
        board.put(E5, Piece::Pawn, Color::Black).unwrap();
        let original_fen = board.to_fen();

        let capture = std_move!(D4, E5, (Piece::Pawn, Color::Black));
        capture.apply(&mut board).unwrap();
        assert_eq!(board.get(E5), Some((Piece::Pawn, Color::White)));
        assert_eq!(board.get(D4), None);

        capture.undo(&mut board).unwrap();
        assert_eq!(original_fen, board.to_fen());
    }

    #[test]
    fn test_apply_rejects_unexpected_capture() {
        let mut board = Board::new();
        board.put(D4, Piece::Pawn, Color::White).unwrap();
        board.put(D5, Piece::Pawn, Color::Black).unwrap();

        // The move claims the target square is empty, but it is not.
        let chess_move = std_move!(D4, D5);
        assert_eq!(
            chess_move.apply(&mut board),
            Err(BoardError::UnexpectedCapture { square: D5 })
        );
    }

    #[test]
    fn test_moving_the_king_loses_castle_rights() {
        let mut board = Board::new();
        board.put(E1, Piece::King, Color::White).unwrap();
        board.put(E8, Piece::King, Color::Black).unwrap();
        assert_eq!(board.peek_castle_rights(), ALL_CASTLE_RIGHTS);

        let king_move = std_move!(E1, E2);
        king_move.apply(&mut board).unwrap();
        assert_eq!(
            board.peek_castle_rights(),
            BLACK_KINGSIDE_RIGHTS | BLACK_QUEENSIDE_RIGHTS
        );

        king_move.undo(&mut board).unwrap();
        assert_eq!(board.peek_castle_rights(), ALL_CASTLE_RIGHTS);
    }

    #[test]
    fn test_capturing_a_rook_loses_castle_rights() {
        let mut board = Board::new();
        board.put(A1, Piece::Rook, Color::White).unwrap();
        board.put(A8, Piece::Rook, Color::Black).unwrap();

        let rook_takes_rook = std_move!(A8, A1, (Piece::Rook, Color::White));
        rook_takes_rook.apply(&mut board).unwrap();
        assert_eq!(
            board.peek_castle_rights(),
            ALL_CASTLE_RIGHTS & !WHITE_QUEENSIDE_RIGHTS & !BLACK_QUEENSIDE_RIGHTS
        );
    }

    #[test]
    fn test_halfmove_clock_resets_on_pawn_moves_and_captures() {
        let mut board = Board::new();
        board.put(A1, Piece::Rook, Color::White).unwrap();
        board.put(A7, Piece::Pawn, Color::Black).unwrap();
        board.put(H7, Piece::Pawn, Color::White).unwrap();

        let quiet_rook_move = std_move!(A1, A5);
        quiet_rook_move.apply(&mut board).unwrap();
        assert_eq!(board.halfmove_clock(), 1);

        let pawn_move = std_move!(H7, H8);
        pawn_move.apply(&mut board).unwrap();
        assert_eq!(board.halfmove_clock(), 0);

        let capture = std_move!(A5, A7, (Piece::Pawn, Color::Black));
        capture.apply(&mut board).unwrap();
        assert_eq!(board.halfmove_clock(), 0);

        capture.undo(&mut board).unwrap();
        pawn_move.undo(&mut board).unwrap();
        assert_eq!(board.halfmove_clock(), 1);
        quiet_rook_move.undo(&mut board).unwrap();
        assert_eq!(board.halfmove_clock(), 0);
    }
}
