use common::bitboard::Square;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BoardError {
    #[error("cannot place a piece on occupied square {square}")]
    SquareOccupied { square: Square },
    #[error("cannot {op} move, the from square {square} is empty")]
    FromSquareEmpty { op: &'static str, square: Square },
    #[error("cannot {op} move, the to square {square} is empty")]
    ToSquareEmpty { op: &'static str, square: Square },
    #[error("the occupant of {square} does not match the expected capture")]
    UnexpectedCapture { square: Square },
    #[error("en passant must be performed by a pawn")]
    EnPassantNonPawn,
    #[error("castling expects a rook on {square}")]
    CastleRookMissing { square: Square },
    #[error("castling must be performed by a king")]
    CastleNonKing,
    #[error("promotion must be performed by a pawn")]
    PromotionNonPawn,
}
