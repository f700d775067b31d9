pub mod castle;
pub mod en_passant;
pub mod pawn_promotion;
pub mod standard;

use core::fmt;

use common::bitboard::Square;

use crate::board::color::Color;
use crate::board::error::BoardError;
use crate::board::piece::Piece;
use crate::board::Board;

use self::castle::CastleChessMove;
use self::en_passant::EnPassantChessMove;
use self::pawn_promotion::PawnPromotionChessMove;
use self::standard::StandardChessMove;

/// The piece removed from the board by a capturing move.
pub type Capture = (Piece, Color);

/// A legal transition between two positions. Applying a move mutates the
/// board in place; undoing the most recently applied move restores the board
/// exactly, including the stacked en passant, castling and halfmove state.
#[derive(Clone, PartialEq, Eq)]
pub enum ChessMove {
    Standard(StandardChessMove),
    PawnPromotion(PawnPromotionChessMove),
    EnPassant(EnPassantChessMove),
    Castle(CastleChessMove),
}

impl ChessMove {
    pub fn from_square(&self) -> Square {
        match self {
            ChessMove::Standard(m) => m.from_square(),
            ChessMove::PawnPromotion(m) => m.from_square(),
            ChessMove::EnPassant(m) => m.from_square(),
            ChessMove::Castle(m) => m.from_square(),
        }
    }

    pub fn to_square(&self) -> Square {
        match self {
            ChessMove::Standard(m) => m.to_square(),
            ChessMove::PawnPromotion(m) => m.to_square(),
            ChessMove::EnPassant(m) => m.to_square(),
            ChessMove::Castle(m) => m.to_square(),
        }
    }

    pub fn captures(&self) -> Option<Capture> {
        match self {
            ChessMove::Standard(m) => m.captures(),
            ChessMove::PawnPromotion(m) => m.captures(),
            ChessMove::EnPassant(m) => Some(m.captures()),
            ChessMove::Castle(_) => None,
        }
    }

    #[must_use = "move application may fail"]
    pub fn apply(&self, board: &mut Board) -> Result<(), BoardError> {
        let from_square = self.from_square();
        let (piece, color) = board
            .get(from_square)
            .ok_or(BoardError::FromSquareEmpty {
                op: "apply",
                square: from_square,
            })?;

        match self {
            ChessMove::Standard(m) => m.apply(board)?,
            ChessMove::PawnPromotion(m) => m.apply(board)?,
            ChessMove::EnPassant(m) => m.apply(board)?,
            ChessMove::Castle(m) => m.apply(board)?,
        }

        if self.captures().is_some() || piece == Piece::Pawn {
            board.reset_halfmove_clock();
        } else {
            board.increment_halfmove_clock();
        }
        if color == Color::Black {
            board.increment_fullmove_number();
        }
        board.count_current_position();

        Ok(())
    }

    #[must_use = "move undo may fail"]
    pub fn undo(&self, board: &mut Board) -> Result<(), BoardError> {
        // The position count keys on the current hash, so it is reverted
        // before any state is unwound.
        board.uncount_current_position();
        board.pop_halfmove_clock();

        match self {
            ChessMove::Standard(m) => m.undo(board)?,
            ChessMove::PawnPromotion(m) => m.undo(board)?,
            ChessMove::EnPassant(m) => m.undo(board)?,
            ChessMove::Castle(m) => m.undo(board)?,
        }

        let from_square = self.from_square();
        let (_, color) = board.get(from_square).ok_or(BoardError::FromSquareEmpty {
            op: "undo",
            square: from_square,
        })?;
        if color == Color::Black {
            board.decrement_fullmove_number();
        }

        Ok(())
    }

    pub fn to_uci(&self) -> String {
        let from = self.from_square().to_algebraic();
        let to = self.to_square().to_algebraic();
        match self {
            ChessMove::PawnPromotion(m) => {
                let promotion_char = match m.promote_to_piece() {
                    Piece::Queen => 'q',
                    Piece::Rook => 'r',
                    Piece::Bishop => 'b',
                    Piece::Knight => 'n',
                    other => panic!("invalid promotion piece: {}", other),
                };
                format!("{}{}{}", from, to, promotion_char)
            }
            _ => format!("{}{}", from, to),
        }
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let move_kind = match self {
            ChessMove::Standard(_) => "move",
            ChessMove::PawnPromotion(m) => match m.promote_to_piece() {
                Piece::Queen => "promote to queen",
                Piece::Rook => "promote to rook",
                Piece::Bishop => "promote to bishop",
                Piece::Knight => "promote to knight",
                other => panic!("invalid promotion piece: {}", other),
            },
            ChessMove::EnPassant(_) => "en passant",
            ChessMove::Castle(_) => "castle",
        };
        let capture_note = match self.captures() {
            Some((piece, _)) => format!(" capturing {}", piece),
            None => String::new(),
        };
        write!(
            f,
            "{} {}{}{}",
            move_kind,
            self.from_square().to_algebraic(),
            self.to_square().to_algebraic(),
            capture_note
        )
    }
}

impl fmt::Debug for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[macro_export]
macro_rules! std_move {
    ($from:expr, $to:expr, $capture:expr) => {
        $crate::chess_move::ChessMove::Standard(
            $crate::chess_move::standard::StandardChessMove::new($from, $to, Some($capture)),
        )
    };
    ($from:expr, $to:expr) => {
        $crate::chess_move::ChessMove::Standard(
            $crate::chess_move::standard::StandardChessMove::new($from, $to, None),
        )
    };
}

#[macro_export]
macro_rules! promotion {
    ($from:expr, $to:expr, $capture:expr, $piece:expr) => {
        $crate::chess_move::ChessMove::PawnPromotion(
            $crate::chess_move::pawn_promotion::PawnPromotionChessMove::new(
                $from, $to, $capture, $piece,
            ),
        )
    };
}

#[macro_export]
macro_rules! en_passant_move {
    ($from:expr, $to:expr) => {
        $crate::chess_move::ChessMove::EnPassant(
            $crate::chess_move::en_passant::EnPassantChessMove::new($from, $to),
        )
    };
}

#[macro_export]
macro_rules! castle_kingside {
    ($color:expr) => {
        $crate::chess_move::ChessMove::Castle(
            $crate::chess_move::castle::CastleChessMove::castle_kingside($color),
        )
    };
}

#[macro_export]
macro_rules! castle_queenside {
    ($color:expr) => {
        $crate::chess_move::ChessMove::Castle(
            $crate::chess_move::castle::CastleChessMove::castle_queenside($color),
        )
    };
}
